//! Fixed choice lists offered by the front end.
//!
//! Every multi-select in the app draws from one of these enums, so stored
//! selections can never hold a value outside the offered set.

use std::fmt;

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, ValueEnum)]
pub enum Page {
    #[default]
    Home,
    SymptomChecker,
    Nutritionist,
    EducationalLibrary,
    Resources,
}

impl Page {
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::SymptomChecker => "Symptom Checker",
            Self::Nutritionist => "Nutritionist",
            Self::EducationalLibrary => "Educational Library",
            Self::Resources => "Resources",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum DietaryPreference {
    Vegetarian,
    Vegan,
    Halal,
    Kosher,
    GlutenFree,
    DairyFree,
}

impl DietaryPreference {
    pub fn label(self) -> &'static str {
        match self {
            Self::Vegetarian => "Vegetarian",
            Self::Vegan => "Vegan",
            Self::Halal => "Halal",
            Self::Kosher => "Kosher",
            Self::GlutenFree => "Gluten-Free",
            Self::DairyFree => "Dairy-Free",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum FoodAllergy {
    Nuts,
    Dairy,
    Eggs,
    Soy,
    Shellfish,
    Wheat,
    Fish,
}

impl FoodAllergy {
    pub fn label(self) -> &'static str {
        match self {
            Self::Nuts => "Nuts",
            Self::Dairy => "Dairy",
            Self::Eggs => "Eggs",
            Self::Soy => "Soy",
            Self::Shellfish => "Shellfish",
            Self::Wheat => "Wheat",
            Self::Fish => "Fish",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MealType {
    #[default]
    FullDayPlan,
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealType {
    pub fn label(self) -> &'static str {
        match self {
            Self::FullDayPlan => "Full Day Plan",
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::Snacks => "Snacks",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Trimester {
    #[default]
    First,
    Second,
    Third,
}

impl Trimester {
    pub fn label(self) -> &'static str {
        match self {
            Self::First => "First Trimester (Months 1-3)",
            Self::Second => "Second Trimester (Months 4-6)",
            Self::Third => "Third Trimester (Months 7-9)",
        }
    }

    /// Months past nine stay in the third trimester.
    pub fn for_month(month: u8) -> Self {
        match month {
            0..=3 => Self::First,
            4..=6 => Self::Second,
            _ => Self::Third,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum Symptom {
    Nausea,
    Headache,
    Fatigue,
    Cramping,
    Bleeding,
    Swelling,
    BackPain,
    Fever,
    Other,
}

impl Symptom {
    pub fn label(self) -> &'static str {
        match self {
            Self::Nausea => "Nausea",
            Self::Headache => "Headache",
            Self::Fatigue => "Fatigue",
            Self::Cramping => "Cramping",
            Self::Bleeding => "Bleeding",
            Self::Swelling => "Swelling",
            Self::BackPain => "Back Pain",
            Self::Fever => "Fever",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, ValueEnum)]
pub enum Severity {
    #[default]
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum Complication {
    #[value(name = "none")]
    NoneReported,
    GestationalDiabetes,
    Preeclampsia,
    MorningSickness,
    Other,
}

impl Complication {
    pub fn label(self) -> &'static str {
        match self {
            Self::NoneReported => "None",
            Self::GestationalDiabetes => "Gestational Diabetes",
            Self::Preeclampsia => "Preeclampsia",
            Self::MorningSickness => "Morning Sickness",
            Self::Other => "Other",
        }
    }
}

macro_rules! display_via_label {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )+
    };
}

display_via_label!(Page, DietaryPreference, FoodAllergy, MealType, Trimester, Symptom, Severity, Complication);

/// Parse one choice, accepting labels like "Gluten-Free" or "back pain".
pub fn parse_choice<T: ValueEnum>(input: &str) -> Result<T, String> {
    let normalized = input.trim().replace([' ', '_'], "-");
    T::from_str(&normalized, true).map_err(|_| {
        let allowed = T::value_variants()
            .iter()
            .filter_map(|v| v.to_possible_value())
            .map(|v| v.get_name().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("'{}' is not one of: {}", input.trim(), allowed)
    })
}

/// Parse a comma-separated multi-select. A lone `none` (or blank) clears it.
///
/// Unknown entries reject the whole list so a typo never half-applies.
pub fn parse_choices<T: ValueEnum>(input: &str) -> Result<Vec<T>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Ok(Vec::new());
    }

    trimmed
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_choice::<T>)
        .collect()
}

#[cfg(test)]
#[path = "options_test.rs"]
mod tests;
