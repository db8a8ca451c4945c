use serde::Serialize;

pub const RESCHEDULE_RESPONSE: &str = "I can help you reschedule your appointment. What date and time would work better for you? Our next available slots are tomorrow at 10:00 AM or Thursday at 2:30 PM.";
pub const CANCEL_RESPONSE: &str = "I understand you'd like to cancel your appointment. Please note our 24-hour cancellation policy. Would you like me to cancel your appointment or reschedule it instead?";
pub const LOCATION_RESPONSE: &str = "Our clinic is located at 123 Medical Drive. Free parking is available in the adjacent lot. The main entrance is wheelchair accessible.";
pub const INSURANCE_RESPONSE: &str = "We accept most major insurance plans including Blue Cross, Aetna, and UnitedHealth. Your copay will be $30. We also accept cash, credit cards, and HSA cards.";
pub const PREPARATION_RESPONSE: &str = "Please bring a valid ID, insurance card, and list of current medications. If this is a follow-up, bring any test results. Arrive 15 minutes early for check-in.";
pub const TEST_RESULTS_RESPONSE: &str = "Test results are typically available within 24-48 hours. You'll receive a notification when they're ready. You can view them through our patient portal or we can discuss them during your next visit.";
pub const FALLBACK_RESPONSE: &str = "Thank you for your message. A member of our team will get back to you shortly. For urgent medical concerns, please call our office directly at (555) 123-4567.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Reschedule,
    Cancel,
    Location,
    Insurance,
    Preparation,
    TestResults,
    Fallback,
}

/// One keyword rule: matches when any keyword is a substring of the
/// lower-cased input.
#[derive(Debug, Clone)]
pub struct ClassifierRule {
    pub kind: RuleKind,
    pub keywords: Vec<&'static str>,
    pub response: &'static str,
}

impl ClassifierRule {
    pub fn new(kind: RuleKind, keywords: &[&'static str], response: &'static str) -> Self {
        Self {
            kind,
            keywords: keywords.to_vec(),
            response,
        }
    }

    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|keyword| lowered.contains(keyword))
    }
}

/// Ordered keyword rules, first match wins, with a fallback when nothing
/// matches. Pure: the same lower-cased input always picks the same rule.
#[derive(Debug, Clone)]
pub struct ResponseClassifier {
    rules: Vec<ClassifierRule>,
    fallback: ClassifierRule,
}

impl Default for ResponseClassifier {
    fn default() -> Self {
        Self::new(
            vec![
                ClassifierRule::new(RuleKind::Reschedule, &["reschedule", "change"], RESCHEDULE_RESPONSE),
                ClassifierRule::new(RuleKind::Cancel, &["cancel"], CANCEL_RESPONSE),
                ClassifierRule::new(RuleKind::Location, &["parking", "location"], LOCATION_RESPONSE),
                ClassifierRule::new(RuleKind::Insurance, &["insurance", "payment"], INSURANCE_RESPONSE),
                ClassifierRule::new(RuleKind::Preparation, &["prepare", "bring"], PREPARATION_RESPONSE),
                ClassifierRule::new(RuleKind::TestResults, &["test", "result"], TEST_RESULTS_RESPONSE),
            ],
            ClassifierRule::new(RuleKind::Fallback, &[], FALLBACK_RESPONSE),
        )
    }
}

impl ResponseClassifier {
    pub fn new(rules: Vec<ClassifierRule>, fallback: ClassifierRule) -> Self {
        Self { rules, fallback }
    }

    pub fn classify(&self, input: &str) -> &ClassifierRule {
        let lowered = input.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .unwrap_or(&self.fallback)
    }

    pub fn respond(&self, input: &str) -> &'static str {
        self.classify(input).response
    }

    pub fn rules(&self) -> &[ClassifierRule] {
        &self.rules
    }
}
