use super::options::{Severity, Symptom, Trimester};
use super::session_state::SymptomForm;

pub const PROVIDER_NOTE: &str = "Note: These are general guidelines. Always consult your healthcare provider \
for personalized nutrition advice during pregnancy.";

pub const EMERGENCY_WARNING: &str = "IMPORTANT: If you're experiencing severe symptoms, heavy bleeding, or high fever, \
please seek immediate medical attention or contact your healthcare provider.
This tool is not a replacement for professional medical care.";

const FIRST_TRIMESTER: &str = "### First Trimester Nutrition Guidelines
- Focus on folate-rich foods
- Small, frequent meals to manage nausea
- Stay hydrated
- Key nutrients: Folic acid, Iron, Vitamin B6

Recommended Foods:
- Leafy greens
- Whole grains
- Lean proteins
- Citrus fruits";

const SECOND_TRIMESTER: &str = "### Second Trimester Nutrition Guidelines
- Increased caloric needs
- Focus on calcium and vitamin D
- Protein-rich foods
- Omega-3 fatty acids

Recommended Foods:
- Dairy products
- Fatty fish (low-mercury)
- Lean meats
- Nuts and seeds";

const THIRD_TRIMESTER: &str = "### Third Trimester Nutrition Guidelines
- Higher protein needs
- Iron-rich foods
- Smaller, more frequent meals
- Foods to aid digestion

Recommended Foods:
- High-protein foods
- Iron-fortified foods
- Fiber-rich fruits and vegetables
- Healthy fats";

pub fn trimester_guidelines(trimester: Trimester) -> &'static str {
    match trimester {
        Trimester::First => FIRST_TRIMESTER,
        Trimester::Second => SECOND_TRIMESTER,
        Trimester::Third => THIRD_TRIMESTER,
    }
}

/// Bleeding, fever, or a severe rating warrant the emergency banner.
pub fn needs_emergency_warning(form: &SymptomForm) -> bool {
    form.severity == Severity::Severe
        || form
            .symptoms
            .iter()
            .any(|symptom| matches!(symptom, Symptom::Bleeding | Symptom::Fever))
}
