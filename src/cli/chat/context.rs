use super::options::{DietaryPreference, FoodAllergy};
use crate::prompts::{self, PromptPair};

pub const MIN_MONTH: u8 = 1;
pub const MAX_MONTH: u8 = 9;
pub const MIN_WEEK: u8 = 1;
pub const MAX_WEEK: u8 = 42;

/// How far along the pregnancy is, as the user entered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PregnancyStage {
    Month(u8),
    Week(u8),
}

impl PregnancyStage {
    /// Month number handed to the personas. Weeks floor-divide by four, so
    /// weeks 1-3 come out as month 0.
    pub fn month(self) -> u8 {
        match self {
            Self::Month(month) => month,
            Self::Week(week) => week_to_month(week),
        }
    }
}

pub fn week_to_month(week: u8) -> u8 {
    week / 4
}

pub fn clamp_month(month: i64) -> u8 {
    month.clamp(MIN_MONTH as i64, MAX_MONTH as i64) as u8
}

pub fn clamp_week(week: i64) -> u8 {
    week.clamp(MIN_WEEK as i64, MAX_WEEK as i64) as u8
}

/// Everything one completion call needs. Built per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptContext {
    pub stage: PregnancyStage,
    pub preferences: Vec<DietaryPreference>,
    pub allergies: Vec<FoodAllergy>,
    pub query: String,
}

impl PromptContext {
    pub fn new<'a>(
        stage: PregnancyStage,
        preferences: impl IntoIterator<Item = &'a DietaryPreference>,
        allergies: impl IntoIterator<Item = &'a FoodAllergy>,
        query: impl Into<String>,
    ) -> Self {
        Self {
            stage,
            preferences: preferences.into_iter().copied().collect(),
            allergies: allergies.into_iter().copied().collect(),
            query: query.into(),
        }
    }

    /// The symptom persona ignores diet and allergy selections.
    pub fn for_symptoms(stage: PregnancyStage, query: impl Into<String>) -> Self {
        Self {
            stage,
            preferences: Vec::new(),
            allergies: Vec::new(),
            query: query.into(),
        }
    }

    pub fn nutrition_prompt(&self) -> PromptPair {
        let preferences: Vec<&str> = self.preferences.iter().map(|p| p.label()).collect();
        let allergies: Vec<&str> = self.allergies.iter().map(|a| a.label()).collect();
        prompts::build_nutrition_prompt(&self.query, self.stage.month(), &preferences, &allergies)
    }

    pub fn symptom_prompt(&self) -> PromptPair {
        match self.stage {
            PregnancyStage::Week(week) => prompts::build_symptom_prompt(&self.query, week),
            PregnancyStage::Month(month) => PromptPair {
                system: prompts::symptom_system_instruction(month),
                user: prompts::user_message(&self.query),
            },
        }
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
