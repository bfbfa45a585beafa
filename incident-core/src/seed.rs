use crate::record::{IncidentRecord, Severity};

/// Fixed incidents the dashboard starts with.
pub fn mock_incidents() -> Vec<IncidentRecord> {
    vec![
        IncidentRecord::new(
            1,
            "Biased Recommendation Algorithm",
            "Algorithm consistently favored certain demographics in product recommendations, \
             leading to unequal access to opportunities. Investigation revealed training data \
             imbalance which has now been addressed.",
            Severity::Medium,
            "2025-03-15T10:00:00Z",
        ),
        IncidentRecord::new(
            2,
            "LLM Hallucination in Critical Info",
            "LLM provided incorrect safety procedure information when queried about emergency \
             protocols. This led to confusion during a test run but was caught before \
             deployment. Model has been retrained with more accurate safety data.",
            Severity::High,
            "2025-04-01T14:30:00Z",
        ),
        IncidentRecord::new(
            3,
            "Minor Data Leak via Chatbot",
            "Chatbot inadvertently exposed non-sensitive user metadata in responses. No personal \
             or identifying information was revealed, but system has been patched to prevent \
             similar occurrences.",
            Severity::Low,
            "2025-03-20T09:15:00Z",
        ),
    ]
}
