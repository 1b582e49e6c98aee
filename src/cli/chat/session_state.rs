//! Per-session state for one user of the app.
//!
//! A `SessionState` is created with typed defaults when the session starts,
//! owned by exactly one `ChatContext`, and dropped with it. Nothing here is
//! global or persisted.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Local};

use super::context::{clamp_month, clamp_week, PregnancyStage, MIN_MONTH, MIN_WEEK};
use super::options::{Complication, DietaryPreference, FoodAllergy, MealType, Page, Severity, Symptom, Trimester};
use crate::prompts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    Doctor,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Doctor => "doctor",
        })
    }
}

/// One history entry. Fields are private so an appended entry can't change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    role: Role,
    content: String,
    sent_at: DateTime<Local>,
}

impl ChatMessage {
    fn new(role: Role, content: String) -> Self {
        Self { role, content, sent_at: Local::now() }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn sent_at(&self) -> DateTime<Local> {
        self.sent_at
    }
}

/// Append-only conversation log.
///
/// Entries only go in as user/reply pairs, so every user entry is followed by
/// exactly one reply and the length is always even.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_exchange(&mut self, user: impl Into<String>, reply_role: Role, reply: impl Into<String>) {
        debug_assert_ne!(reply_role, Role::User);
        self.messages.push(ChatMessage::new(Role::User, user.into()));
        self.messages.push(ChatMessage::new(reply_role, reply.into()));
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The most recent reply, if any.
    pub fn last_reply(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Inputs of the symptom checker form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomForm {
    pub week: u8,
    pub symptoms: BTreeSet<Symptom>,
    pub severity: Severity,
    pub complications: BTreeSet<Complication>,
    pub details: String,
}

impl Default for SymptomForm {
    fn default() -> Self {
        Self {
            week: MIN_WEEK,
            symptoms: BTreeSet::new(),
            severity: Severity::default(),
            complications: BTreeSet::new(),
            details: String::new(),
        }
    }
}

impl SymptomForm {
    pub fn stage(&self) -> PregnancyStage {
        PregnancyStage::Week(self.week)
    }

    pub fn summary(&self) -> String {
        let symptoms: Vec<&str> = self.symptoms.iter().map(|s| s.label()).collect();
        let complications: Vec<&str> = self.complications.iter().map(|c| c.label()).collect();
        prompts::symptom_summary(self.week, &symptoms, self.severity.label(), &complications, &self.details)
    }
}

/// What changed in the last mutation. The front end re-renders from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    Navigated(Page),
    DietaryPreferences,
    FoodAllergies,
    NutritionMonth,
    MealType,
    Trimester,
    SymptomForm,
    NutritionHistory,
    SymptomHistory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub navigation: Page,
    pub dietary_preferences: BTreeSet<DietaryPreference>,
    pub food_allergies: BTreeSet<FoodAllergy>,
    pub nutrition_chat_history: ChatHistory,
    pub symptom_chat_history: ChatHistory,
    pub nutrition_month: u8,
    pub meal_type: MealType,
    pub trimester: Trimester,
    pub symptom_form: SymptomForm,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            navigation: Page::default(),
            dietary_preferences: BTreeSet::new(),
            food_allergies: BTreeSet::new(),
            nutrition_chat_history: ChatHistory::new(),
            symptom_chat_history: ChatHistory::new(),
            nutrition_month: MIN_MONTH,
            meal_type: MealType::default(),
            trimester: Trimester::default(),
            symptom_form: SymptomForm::default(),
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigate(&mut self, page: Page) -> StateChange {
        self.navigation = page;
        StateChange::Navigated(page)
    }

    /// Replaces the whole selection, like re-submitting a multi-select.
    pub fn set_dietary_preferences(&mut self, preferences: impl IntoIterator<Item = DietaryPreference>) -> StateChange {
        self.dietary_preferences = preferences.into_iter().collect();
        StateChange::DietaryPreferences
    }

    pub fn set_food_allergies(&mut self, allergies: impl IntoIterator<Item = FoodAllergy>) -> StateChange {
        self.food_allergies = allergies.into_iter().collect();
        StateChange::FoodAllergies
    }

    pub fn set_nutrition_month(&mut self, month: i64) -> StateChange {
        self.nutrition_month = clamp_month(month);
        StateChange::NutritionMonth
    }

    pub fn set_meal_type(&mut self, meal_type: MealType) -> StateChange {
        self.meal_type = meal_type;
        StateChange::MealType
    }

    pub fn set_trimester(&mut self, trimester: Trimester) -> StateChange {
        self.trimester = trimester;
        StateChange::Trimester
    }

    pub fn set_symptom_week(&mut self, week: i64) -> StateChange {
        self.symptom_form.week = clamp_week(week);
        StateChange::SymptomForm
    }

    pub fn set_symptoms(&mut self, symptoms: impl IntoIterator<Item = Symptom>) -> StateChange {
        self.symptom_form.symptoms = symptoms.into_iter().collect();
        StateChange::SymptomForm
    }

    pub fn set_severity(&mut self, severity: Severity) -> StateChange {
        self.symptom_form.severity = severity;
        StateChange::SymptomForm
    }

    pub fn set_complications(&mut self, complications: impl IntoIterator<Item = Complication>) -> StateChange {
        self.symptom_form.complications = complications.into_iter().collect();
        StateChange::SymptomForm
    }

    pub fn set_symptom_details(&mut self, details: impl Into<String>) -> StateChange {
        self.symptom_form.details = details.into();
        StateChange::SymptomForm
    }

    /// The question and its answer go in together; a failed call still
    /// produces answer text, so no question is ever left unpaired.
    pub fn record_nutrition_exchange(&mut self, question: impl Into<String>, reply: impl Into<String>) -> StateChange {
        self.nutrition_chat_history.record_exchange(question, Role::Assistant, reply);
        StateChange::NutritionHistory
    }

    pub fn record_symptom_exchange(&mut self, summary: impl Into<String>, reply: impl Into<String>) -> StateChange {
        self.symptom_chat_history.record_exchange(summary, Role::Doctor, reply);
        StateChange::SymptomHistory
    }

    pub fn nutrition_stage(&self) -> PregnancyStage {
        PregnancyStage::Month(self.nutrition_month)
    }
}

#[cfg(test)]
#[path = "session_state_test.rs"]
mod tests;
