use super::*;

#[test]
fn option_sets_match_offered_choices() {
    assert_eq!(DietaryPreference::value_variants().len(), 6);
    assert_eq!(FoodAllergy::value_variants().len(), 7);
    assert_eq!(Symptom::value_variants().len(), 9);
    assert_eq!(MealType::value_variants().len(), 5);
}

#[test]
fn parse_choice_accepts_labels_and_value_names() {
    assert_eq!(parse_choice::<DietaryPreference>("Gluten-Free"), Ok(DietaryPreference::GlutenFree));
    assert_eq!(parse_choice::<DietaryPreference>("dairy free"), Ok(DietaryPreference::DairyFree));
    assert_eq!(parse_choice::<Symptom>("Back Pain"), Ok(Symptom::BackPain));
    assert_eq!(parse_choice::<MealType>("full_day_plan"), Ok(MealType::FullDayPlan));
    assert_eq!(parse_choice::<Complication>("None"), Ok(Complication::NoneReported));
}

#[test]
fn parse_choice_lists_allowed_values_on_error() {
    let err = parse_choice::<FoodAllergy>("peanuts").unwrap_err();
    assert!(err.contains("'peanuts'"));
    assert!(err.contains("shellfish"));
}

#[test]
fn parse_choices_splits_on_commas() {
    let parsed = parse_choices::<FoodAllergy>("Nuts, shellfish ,Fish").unwrap();
    assert_eq!(parsed, vec![FoodAllergy::Nuts, FoodAllergy::Shellfish, FoodAllergy::Fish]);
}

#[test]
fn parse_choices_none_clears() {
    assert!(parse_choices::<DietaryPreference>("none").unwrap().is_empty());
    assert!(parse_choices::<DietaryPreference>("  ").unwrap().is_empty());
}

#[test]
fn parse_choices_rejects_whole_list_on_typo() {
    assert!(parse_choices::<DietaryPreference>("Vegan, Paleo").is_err());
}

#[test]
fn trimester_for_month() {
    assert_eq!(Trimester::for_month(0), Trimester::First);
    assert_eq!(Trimester::for_month(3), Trimester::First);
    assert_eq!(Trimester::for_month(4), Trimester::Second);
    assert_eq!(Trimester::for_month(7), Trimester::Third);
    assert_eq!(Trimester::for_month(10), Trimester::Third);
}

#[test]
fn display_uses_human_labels() {
    assert_eq!(Page::SymptomChecker.to_string(), "Symptom Checker");
    assert_eq!(Complication::NoneReported.to_string(), "None");
    assert_eq!(Trimester::Second.to_string(), "Second Trimester (Months 4-6)");
}
