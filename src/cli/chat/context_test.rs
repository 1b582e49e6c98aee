use super::*;

use std::collections::BTreeSet;

#[test]
fn week_to_month_boundaries() {
    assert_eq!(week_to_month(1), 0);
    assert_eq!(week_to_month(3), 0);
    assert_eq!(week_to_month(4), 1);
    assert_eq!(week_to_month(7), 1);
    assert_eq!(week_to_month(42), 10);
}

#[test]
fn stage_month_passes_months_through() {
    assert_eq!(PregnancyStage::Month(5).month(), 5);
    assert_eq!(PregnancyStage::Week(20).month(), 5);
}

#[test]
fn clamping_keeps_stage_in_range() {
    assert_eq!(clamp_month(0), MIN_MONTH);
    assert_eq!(clamp_month(12), MAX_MONTH);
    assert_eq!(clamp_month(6), 6);
    assert_eq!(clamp_week(-3), MIN_WEEK);
    assert_eq!(clamp_week(50), MAX_WEEK);
}

#[test]
fn nutrition_prompt_uses_stored_selections() {
    let preferences = BTreeSet::from([DietaryPreference::Vegan]);
    let allergies = BTreeSet::from([FoodAllergy::Nuts, FoodAllergy::Dairy]);
    let ctx = PromptContext::new(PregnancyStage::Month(5), &preferences, &allergies, "Is tofu ok?");

    let prompt = ctx.nutrition_prompt();
    assert!(prompt.system.contains("Dietary preferences: Vegan"));
    assert!(prompt.system.contains("Food allergies: Nuts, Dairy"));
    assert!(prompt.system.contains("5 months pregnant"));
    assert_eq!(prompt.user, "Is tofu ok?");
}

#[test]
fn symptom_prompt_from_week_uses_floor_month() {
    let ctx = PromptContext::for_symptoms(PregnancyStage::Week(2), "Patient is 2 weeks pregnant");
    let prompt = ctx.symptom_prompt();
    assert!(prompt.system.contains("The patient is 0 months pregnant."));
    assert_eq!(prompt.user, "Patient is 2 weeks pregnant");
}

#[test]
fn symptom_prompt_from_month_skips_conversion() {
    let prompt = PromptContext::for_symptoms(PregnancyStage::Month(6), "").symptom_prompt();
    assert!(prompt.system.contains("The patient is 6 months pregnant."));
    assert!(!prompt.user.is_empty());
}
