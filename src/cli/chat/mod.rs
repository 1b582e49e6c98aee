pub mod context;
pub mod guidelines;
pub mod options;
pub mod prompt;
pub mod session_state;

use std::io::Write;
use std::process::ExitCode;

use context::PromptContext;
use crossterm::style::Stylize;
use eyre::Result;
use options::{parse_choice, parse_choices, Complication, DietaryPreference, FoodAllergy, Page, Symptom, Trimester};
use prompt::generate_prompt;
use session_state::{ChatHistory, Role, SessionState, StateChange};
use tracing::{debug, info};

use crate::config::GroqConfig;
use crate::groq_client::{CompletionAdapter, ModelSettings};
use crate::prompts;

const WELCOME_TEXT: &str = "
Welcome to Mother Health Care, your trusted pregnancy companion.

We're here to support you through every step of your pregnancy with:
• Personalized nutrition guidance        /nutrition
• AI-powered symptom checking            /symptoms
• Nutrition guidelines by trimester      /guidelines first|second|third

/help         Show the help dialogue
/quit         Quit the application
";

const HELP_TEXT: &str = "
Mother Health Care

Navigation
/home  /symptoms  /nutrition  /library  /resources

Nutritionist
/diet a,b             Set dietary preferences (none to clear)
/allergies a,b        Set food allergies (none to clear)
/month N              Set the current month of pregnancy (1-9)
/mealplan [type]      Generate a meal plan (full-day-plan, breakfast, lunch, dinner, snacks)
/guidelines [t]       Show guidelines for a trimester (first, second, third)
<question>            Ask the nutrition assistant

Symptom Checker
/week N               Set the current week of pregnancy (1-42)
/symptom a,b          Set current symptoms
/severity s           Set severity (mild, moderate, severe)
/complication a,b     Set previous complications
/details text         Describe the symptoms in detail
/assess [details]     Get an assessment
<details>             Set details and get an assessment

/history              Show the conversation for the current page
/help                 Show this help dialogue
/quit                 Quit the application
";

const COMING_SOON: &str = "This feature is under development.";

pub struct ChatContext {
    output: Box<dyn Write>,
    state: SessionState,
    completion: CompletionAdapter,
    nutrition_settings: ModelSettings,
    symptom_settings: ModelSettings,
}

impl ChatContext {
    pub fn new(output: Box<dyn Write>, completion: CompletionAdapter, config: &GroqConfig) -> Self {
        Self {
            output,
            state: SessionState::new(),
            completion,
            nutrition_settings: ModelSettings::nutritionist(config),
            symptom_settings: ModelSettings::virtual_doctor(config),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    pub async fn run(&mut self) -> Result<ExitCode> {
        if !self.completion.is_available() {
            writeln!(
                self.output,
                "{}",
                "Groq API key not found. Answers will be unavailable until GROQ_API_KEY is set.".yellow()
            )?;
        }

        self.print_welcome()?;
        self.run_interactive().await?;

        Ok(ExitCode::SUCCESS)
    }

    fn print_welcome(&mut self) -> Result<()> {
        writeln!(self.output, "{}", WELCOME_TEXT)?;
        Ok(())
    }

    async fn run_interactive(&mut self) -> Result<()> {
        let mut rl = prompt::rl()?;

        loop {
            let prompt_text = generate_prompt(self.state.navigation);
            let readline = rl.readline(&prompt_text);

            match readline {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }

                    rl.add_history_entry(line.as_str());

                    if line.trim() == "/quit" {
                        break;
                    }

                    if let Err(e) = self.handle_input(&line).await {
                        writeln!(self.output, "Error: {}", e)?;
                    }
                }
                Err(rustyline::error::ReadlineError::Interrupted | rustyline::error::ReadlineError::Eof) => break,
                Err(e) => {
                    writeln!(self.output, "Error: {}", e)?;
                    break;
                }
            }
        }

        info!("Session ended");
        Ok(())
    }

    pub async fn handle_input(&mut self, input: &str) -> Result<()> {
        let input = input.trim();
        if !input.starts_with('/') {
            return self.handle_free_text(input).await;
        }

        let (command, rest) = match input.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };
        debug!(command, "Handling command");

        match command {
            "/help" => {
                writeln!(self.output, "{}", HELP_TEXT)?;
            }
            "/home" => self.navigate(Page::Home)?,
            "/symptoms" => self.navigate(Page::SymptomChecker)?,
            "/nutrition" => self.navigate(Page::Nutritionist)?,
            "/library" => self.navigate(Page::EducationalLibrary)?,
            "/resources" => self.navigate(Page::Resources)?,
            "/diet" => match parse_choices::<DietaryPreference>(rest) {
                Ok(preferences) => {
                    let change = self.state.set_dietary_preferences(preferences);
                    self.render(change)?;
                }
                Err(e) => self.print_invalid(&e)?,
            },
            "/allergies" => match parse_choices::<FoodAllergy>(rest) {
                Ok(allergies) => {
                    let change = self.state.set_food_allergies(allergies);
                    self.render(change)?;
                }
                Err(e) => self.print_invalid(&e)?,
            },
            "/month" => match parse_number(rest) {
                Ok(month) => {
                    let change = self.state.set_nutrition_month(month);
                    self.render(change)?;
                }
                Err(e) => self.print_invalid(&e)?,
            },
            "/week" => match parse_number(rest) {
                Ok(week) => {
                    let change = self.state.set_symptom_week(week);
                    self.render(change)?;
                }
                Err(e) => self.print_invalid(&e)?,
            },
            "/symptom" => match parse_choices::<Symptom>(rest) {
                Ok(symptoms) => {
                    let change = self.state.set_symptoms(symptoms);
                    self.render(change)?;
                }
                Err(e) => self.print_invalid(&e)?,
            },
            "/severity" => match parse_choice(rest) {
                Ok(severity) => {
                    let change = self.state.set_severity(severity);
                    self.render(change)?;
                }
                Err(e) => self.print_invalid(&e)?,
            },
            "/complication" => match parse_choices::<Complication>(rest) {
                Ok(complications) => {
                    let change = self.state.set_complications(complications);
                    self.render(change)?;
                }
                Err(e) => self.print_invalid(&e)?,
            },
            "/details" => {
                let change = self.state.set_symptom_details(rest);
                self.render(change)?;
            }
            "/mealplan" => {
                if !rest.is_empty() {
                    match parse_choice(rest) {
                        Ok(meal_type) => {
                            self.state.set_meal_type(meal_type);
                        }
                        Err(e) => return self.print_invalid(&e),
                    }
                }
                self.generate_meal_plan().await?;
            }
            "/guidelines" => {
                let trimester = if rest.is_empty() {
                    Trimester::for_month(self.state.nutrition_month)
                } else {
                    match parse_choice(rest) {
                        Ok(trimester) => trimester,
                        Err(e) => return self.print_invalid(&e),
                    }
                };
                self.show_guidelines(trimester)?;
            }
            "/assess" => {
                if !rest.is_empty() {
                    self.state.set_symptom_details(rest);
                }
                self.assess_symptoms().await?;
            }
            "/history" => self.print_history()?,
            _ => {
                writeln!(self.output, "Unknown command: {}. Type /help for the list of commands.", command)?;
            }
        }

        Ok(())
    }

    async fn handle_free_text(&mut self, text: &str) -> Result<()> {
        match self.state.navigation {
            Page::Nutritionist => self.ask_nutritionist(text).await,
            Page::SymptomChecker => {
                self.state.set_symptom_details(text);
                self.assess_symptoms().await
            }
            _ => {
                writeln!(
                    self.output,
                    "Select an option to get started: /nutrition for nutrition advice or /symptoms for the symptom checker."
                )?;
                Ok(())
            }
        }
    }

    fn navigate(&mut self, page: Page) -> Result<()> {
        let change = self.state.navigate(page);
        self.render(change)
    }

    /// Ask the nutrition assistant and record the exchange.
    pub async fn ask_nutritionist(&mut self, question: &str) -> Result<()> {
        let prompt = PromptContext::new(
            self.state.nutrition_stage(),
            &self.state.dietary_preferences,
            &self.state.food_allergies,
            question,
        )
        .nutrition_prompt();

        let reply = self
            .completion
            .answer(&prompt.system, &prompt.user, &self.nutrition_settings)
            .await;

        let change = self.state.record_nutrition_exchange(question, reply);
        self.render(change)
    }

    /// Meal plans are shown once and not kept in the chat history.
    pub async fn generate_meal_plan(&mut self) -> Result<String> {
        let query = prompts::meal_plan_query(self.state.meal_type.label(), self.state.nutrition_month);
        let prompt = PromptContext::new(
            self.state.nutrition_stage(),
            &self.state.dietary_preferences,
            &self.state.food_allergies,
            query,
        )
        .nutrition_prompt();

        let plan = self
            .completion
            .answer(&prompt.system, &prompt.user, &self.nutrition_settings)
            .await;

        writeln!(self.output, "\n{}\n{}\n", format!("{} meal plan", self.state.meal_type).bold(), plan)?;
        Ok(plan)
    }

    /// Run the symptom assessment for the current form, if it has symptoms.
    pub async fn assess_symptoms(&mut self) -> Result<()> {
        if self.state.symptom_form.symptoms.is_empty() {
            writeln!(self.output, "{}", "Please select at least one symptom for assessment.".yellow())?;
            return Ok(());
        }

        if guidelines::needs_emergency_warning(&self.state.symptom_form) {
            writeln!(self.output, "{}", guidelines::EMERGENCY_WARNING.red().bold())?;
        }

        let summary = self.state.symptom_form.summary();
        let prompt = PromptContext::for_symptoms(self.state.symptom_form.stage(), summary.as_str()).symptom_prompt();

        let reply = self
            .completion
            .answer(&prompt.system, &prompt.user, &self.symptom_settings)
            .await;

        let change = self.state.record_symptom_exchange(summary, reply);
        self.render(change)
    }

    pub fn show_guidelines(&mut self, trimester: Trimester) -> Result<()> {
        let change = self.state.set_trimester(trimester);
        self.render(change)
    }

    /// Re-render whatever the last state change affects.
    fn render(&mut self, change: StateChange) -> Result<()> {
        match change {
            StateChange::Navigated(page) => self.render_page(page)?,
            StateChange::DietaryPreferences => {
                let line = join_labels(self.state.dietary_preferences.iter().map(|p| p.label()));
                writeln!(self.output, "Dietary preferences: {}", line)?;
            }
            StateChange::FoodAllergies => {
                let line = join_labels(self.state.food_allergies.iter().map(|a| a.label()));
                writeln!(self.output, "Food allergies: {}", line)?;
            }
            StateChange::NutritionMonth => {
                writeln!(self.output, "Current month of pregnancy: {}", self.state.nutrition_month)?;
            }
            StateChange::MealType => {
                writeln!(self.output, "Meal type: {}", self.state.meal_type)?;
            }
            StateChange::Trimester => {
                writeln!(self.output, "\n{}\n", self.state.trimester.to_string().bold())?;
                writeln!(self.output, "{}\n", guidelines::trimester_guidelines(self.state.trimester))?;
                writeln!(self.output, "{}", guidelines::PROVIDER_NOTE.blue())?;
            }
            StateChange::SymptomForm => self.render_symptom_form()?,
            StateChange::NutritionHistory => {
                if let Some(reply) = self.state.nutrition_chat_history.last_reply() {
                    writeln!(self.output, "{} {}", "Nutritionist:".green().bold(), reply.content())?;
                }
            }
            StateChange::SymptomHistory => {
                if let Some(reply) = self.state.symptom_chat_history.last_reply() {
                    writeln!(self.output, "\n{}\n{}", "### Assessment".bold(), reply.content())?;
                }
            }
        }
        Ok(())
    }

    fn render_page(&mut self, page: Page) -> Result<()> {
        match page {
            Page::Home => {
                self.print_welcome()?;
            }
            Page::Nutritionist => {
                writeln!(self.output, "{}", "Nutritionist - Your Maternal Nutrition Expert".bold())?;
                self.render(StateChange::DietaryPreferences)?;
                self.render(StateChange::FoodAllergies)?;
                self.render(StateChange::NutritionMonth)?;
                writeln!(self.output, "Ask about nutrition during pregnancy, or try /mealplan and /guidelines.")?;
            }
            Page::SymptomChecker => {
                writeln!(self.output, "{}", "Virtual Doctor - Your Pregnancy Symptom Checker".bold())?;
                self.render_symptom_form()?;
            }
            Page::EducationalLibrary | Page::Resources => {
                writeln!(self.output, "{} - Coming Soon", page.label().bold())?;
                writeln!(self.output, "{}", COMING_SOON)?;
            }
        }
        Ok(())
    }

    fn render_symptom_form(&mut self) -> Result<()> {
        let form = &self.state.symptom_form;
        writeln!(self.output, "Current week of pregnancy: {}", form.week)?;
        writeln!(self.output, "Current symptoms: {}", join_labels(form.symptoms.iter().map(|s| s.label())))?;
        writeln!(self.output, "Symptom severity: {}", form.severity)?;
        writeln!(
            self.output,
            "Previous complications: {}",
            join_labels(form.complications.iter().map(|c| c.label()))
        )?;
        if !form.details.is_empty() {
            writeln!(self.output, "Details: {}", form.details)?;
        }
        if guidelines::needs_emergency_warning(form) {
            writeln!(self.output, "{}", guidelines::EMERGENCY_WARNING.red().bold())?;
        }
        Ok(())
    }

    fn print_history(&mut self) -> Result<()> {
        let (history, reply_label) = match self.state.navigation {
            Page::SymptomChecker => (&self.state.symptom_chat_history, "Doctor:"),
            _ => (&self.state.nutrition_chat_history, "Nutritionist:"),
        };

        if history.is_empty() {
            writeln!(self.output, "No conversation yet.")?;
            return Ok(());
        }

        write_history(&mut self.output, history, reply_label)
    }

    fn print_invalid(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message.red())?;
        Ok(())
    }
}

fn write_history(output: &mut Box<dyn Write>, history: &ChatHistory, reply_label: &str) -> Result<()> {
    for message in history.messages() {
        let label = match message.role() {
            Role::User => "You:".cyan().bold(),
            Role::Assistant | Role::Doctor => reply_label.green().bold(),
        };
        writeln!(
            output,
            "[{}] {} {}",
            message.sent_at().format("%H:%M"),
            label,
            message.content()
        )?;
    }
    Ok(())
}

fn join_labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    let labels: Vec<&str> = labels.collect();
    if labels.is_empty() {
        prompts::NONE_TOKEN.to_string()
    } else {
        labels.join(", ")
    }
}

fn parse_number(input: &str) -> Result<i64, String> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("'{}' is not a number", input.trim()))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
