//! Persona instructions and the user messages sent alongside them.
//!
//! Everything here is plain string templating: no I/O, and every function
//! returns non-empty text for any input, including blank queries and empty
//! selections.

/// Substituted wherever a selection list is empty.
pub const NONE_TOKEN: &str = "None";

/// Sent in place of a blank question so the user turn is never empty.
pub const FALLBACK_QUESTION: &str = "Please share general guidance for my current stage of pregnancy.";

/// A system instruction paired with the user turn it frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

pub fn build_nutrition_prompt<P, A>(query: &str, pregnancy_month: u8, preferences: &[P], allergies: &[A]) -> PromptPair
where
    P: AsRef<str>,
    A: AsRef<str>,
{
    PromptPair {
        system: nutrition_system_instruction(pregnancy_month, preferences, allergies),
        user: user_message(query),
    }
}

pub fn build_symptom_prompt(symptom_summary: &str, pregnancy_week: u8) -> PromptPair {
    PromptPair {
        system: symptom_system_instruction(pregnancy_week / 4),
        user: user_message(symptom_summary),
    }
}

pub fn nutrition_system_instruction<P, A>(pregnancy_month: u8, preferences: &[P], allergies: &[A]) -> String
where
    P: AsRef<str>,
    A: AsRef<str>,
{
    format!(
        "You are a maternal nutrition expert. The user is {month} months pregnant.
Dietary preferences: {preferences}
Food allergies: {allergies}

Provide nutritional advice that:
1. Is safe for pregnancy
2. Meets increased nutritional needs for the specific pregnancy month
3. Avoids any listed allergens
4. Respects dietary preferences
5. Includes specific food suggestions and portions",
        month = pregnancy_month,
        preferences = join_or_none(preferences),
        allergies = join_or_none(allergies),
    )
}

/// Month 0 (weeks 1-3) is rendered as-is; the user turn still carries the
/// exact week.
pub fn symptom_system_instruction(pregnancy_month: u8) -> String {
    format!(
        "You are a virtual doctor. The patient is {} months pregnant.
Provide a detailed assessment including:
1. Possible causes
2. Whether this is normal for their stage of pregnancy
3. Recommended actions
4. When to seek immediate medical attention",
        pregnancy_month
    )
}

pub fn user_message(query: &str) -> String {
    if query.trim().is_empty() {
        FALLBACK_QUESTION.to_string()
    } else {
        query.to_string()
    }
}

/// The question sent by the meal planner.
pub fn meal_plan_query(meal_type: &str, pregnancy_month: u8) -> String {
    format!(
        "Create a {} meal plan for someone {} months pregnant.",
        meal_type.to_lowercase(),
        pregnancy_month
    )
}

/// The user turn sent by the symptom checker.
pub fn symptom_summary<S, C>(pregnancy_week: u8, symptoms: &[S], severity: &str, complications: &[C], details: &str) -> String
where
    S: AsRef<str>,
    C: AsRef<str>,
{
    let details = details.trim();
    format!(
        "Patient is {} weeks pregnant with the following symptoms:
- Current Symptoms: {}
- Severity: {}
- Previous Complications: {}
- Additional Details: {}",
        pregnancy_week,
        join_or_none(symptoms),
        severity,
        join_or_none(complications),
        if details.is_empty() { NONE_TOKEN } else { details },
    )
}

fn join_or_none<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        NONE_TOKEN.to_string()
    } else {
        items.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
    }
}

#[cfg(test)]
#[path = "prompts_test.rs"]
mod tests;
