use super::*;

const NO_TAGS: [&str; 0] = [];

#[test]
fn nutrition_prompt_interpolates_selections() {
    let prompt = build_nutrition_prompt("What should I eat for iron?", 5, &["Vegan"], &["Nuts"]);

    assert!(prompt.system.contains("Vegan"));
    assert!(prompt.system.contains("Nuts"));
    assert!(prompt.system.contains("The user is 5 months pregnant."));
    assert_eq!(prompt.user, "What should I eat for iron?");
}

#[test]
fn nutrition_prompt_lists_five_requirements() {
    let prompt = build_nutrition_prompt("q", 3, &NO_TAGS, &NO_TAGS);
    for item in ["1. Is safe", "2. Meets increased", "3. Avoids any listed allergens", "4. Respects", "5. Includes"] {
        assert!(prompt.system.contains(item), "missing {item}");
    }
}

#[test]
fn empty_selections_become_none() {
    let prompt = build_nutrition_prompt("q", 2, &NO_TAGS, &NO_TAGS);
    assert!(prompt.system.contains("Dietary preferences: None"));
    assert!(prompt.system.contains("Food allergies: None"));
}

#[test]
fn multiple_selections_are_comma_joined() {
    let system = nutrition_system_instruction(7, &["Halal", "Gluten-Free"], &["Soy", "Fish"]);
    assert!(system.contains("Dietary preferences: Halal, Gluten-Free"));
    assert!(system.contains("Food allergies: Soy, Fish"));
}

#[test]
fn builders_are_total_over_blank_input() {
    let nutrition = build_nutrition_prompt("", 1, &NO_TAGS, &NO_TAGS);
    let symptom = build_symptom_prompt("   ", 1);

    for prompt in [nutrition, symptom] {
        assert!(!prompt.system.is_empty());
        assert!(!prompt.user.is_empty());
        assert_eq!(prompt.user, FALLBACK_QUESTION);
    }
}

#[test]
fn symptom_prompt_floors_weeks_into_months() {
    for (week, month) in [(1, 0), (3, 0), (4, 1), (7, 1), (42, 10)] {
        let prompt = build_symptom_prompt("cramps", week);
        let expected = format!("The patient is {month} months pregnant.");
        assert!(prompt.system.contains(&expected), "week {week}: {}", prompt.system);
    }
}

#[test]
fn symptom_prompt_lists_four_sections() {
    let system = symptom_system_instruction(4);
    assert!(system.contains("1. Possible causes"));
    assert!(system.contains("2. Whether this is normal"));
    assert!(system.contains("3. Recommended actions"));
    assert!(system.contains("4. When to seek immediate medical attention"));
}

#[test]
fn meal_plan_query_lowercases_meal_type() {
    assert_eq!(
        meal_plan_query("Full Day Plan", 6),
        "Create a full day plan meal plan for someone 6 months pregnant."
    );
}

#[test]
fn symptom_summary_fills_every_line() {
    let summary = symptom_summary(12, &["Nausea", "Fatigue"], "Moderate", &NO_TAGS, "  worse in the morning ");
    assert!(summary.starts_with("Patient is 12 weeks pregnant"));
    assert!(summary.contains("- Current Symptoms: Nausea, Fatigue"));
    assert!(summary.contains("- Severity: Moderate"));
    assert!(summary.contains("- Previous Complications: None"));
    assert!(summary.contains("- Additional Details: worse in the morning"));

    let bare = symptom_summary(30, &["Fever"], "Severe", &["Preeclampsia"], "");
    assert!(bare.contains("- Additional Details: None"));
}
