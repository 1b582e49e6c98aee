mod cli;
mod config;
mod groq_client;
mod prompts;

use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use eyre::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::cli::chat::options::{Complication, DietaryPreference, FoodAllergy, MealType, Severity, Symptom, Trimester};
use crate::cli::chat::ChatContext;
use crate::config::GroqConfig;
use crate::groq_client::CompletionAdapter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (the default)
    Chat,

    /// Ask the nutrition assistant one question
    Nutrition {
        /// Current month of pregnancy (1-9)
        #[arg(short, long, default_value_t = 1)]
        month: i64,

        /// Dietary preference, repeatable
        #[arg(long = "diet", value_enum)]
        diet: Vec<DietaryPreference>,

        /// Food allergy, repeatable
        #[arg(long = "allergy", value_enum)]
        allergies: Vec<FoodAllergy>,

        /// The question to ask
        question: String,
    },

    /// Generate a meal plan
    MealPlan {
        /// Months of pregnancy (1-9)
        #[arg(short, long, default_value_t = 1)]
        month: i64,

        /// Meal type [default: full-day-plan]
        #[arg(long, value_enum)]
        meal: Option<MealType>,

        /// Dietary preference, repeatable
        #[arg(long = "diet", value_enum)]
        diet: Vec<DietaryPreference>,

        /// Food allergy, repeatable
        #[arg(long = "allergy", value_enum)]
        allergies: Vec<FoodAllergy>,
    },

    /// Get a symptom assessment from the virtual doctor
    Symptoms {
        /// Current week of pregnancy (1-42)
        #[arg(short, long, default_value_t = 1)]
        week: i64,

        /// Current symptom, repeatable
        #[arg(long = "symptom", value_enum, required = true)]
        symptoms: Vec<Symptom>,

        /// Symptom severity [default: mild]
        #[arg(long, value_enum)]
        severity: Option<Severity>,

        /// Previous pregnancy complication, repeatable
        #[arg(long = "complication", value_enum)]
        complications: Vec<Complication>,

        /// Describe the symptoms in detail
        #[arg(short, long)]
        details: Option<String>,
    },

    /// Show nutrition guidelines for a trimester
    Guidelines {
        #[arg(value_enum)]
        trimester: Trimester,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Mother Health Care");

    let config = GroqConfig::from_env();
    let completion = CompletionAdapter::from_config(&config);
    let mut chat_context = ChatContext::new(Box::new(io::stdout()), completion, &config);

    match cli.command {
        None | Some(Commands::Chat) => chat_context.run().await,
        Some(Commands::Nutrition { month, diet, allergies, question }) => {
            let state = chat_context.state_mut();
            state.set_nutrition_month(month);
            state.set_dietary_preferences(diet);
            state.set_food_allergies(allergies);
            chat_context.ask_nutritionist(&question).await?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::MealPlan { month, meal, diet, allergies }) => {
            let state = chat_context.state_mut();
            state.set_nutrition_month(month);
            state.set_meal_type(meal.unwrap_or_default());
            state.set_dietary_preferences(diet);
            state.set_food_allergies(allergies);
            chat_context.generate_meal_plan().await?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Symptoms { week, symptoms, severity, complications, details }) => {
            let state = chat_context.state_mut();
            state.set_symptom_week(week);
            state.set_symptoms(symptoms);
            state.set_severity(severity.unwrap_or_default());
            state.set_complications(complications);
            state.set_symptom_details(details.unwrap_or_default());
            chat_context.assess_symptoms().await?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Guidelines { trimester }) => {
            chat_context.show_guidelines(trimester)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
