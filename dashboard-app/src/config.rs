use incident_core::{SelectorError, SeveritySelector, SortOrder, ViewState};
use thiserror::Error;

pub const SEED_VAR: &str = "DASHBOARD_SEED";
pub const SEVERITY_FILTER_VAR: &str = "DASHBOARD_SEVERITY_FILTER";
pub const SORT_ORDER_VAR: &str = "DASHBOARD_SORT_ORDER";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: expected true/false, got '{value}'")]
    InvalidBool { var: &'static str, value: String },
    #[error("{var}: {source}")]
    InvalidSelector {
        var: &'static str,
        #[source]
        source: SelectorError,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Load the mock incidents at startup.
    pub seed_mock_data: bool,
    /// Initial selector values.
    pub view: ViewState,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            seed_mock_data: true,
            view: ViewState::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(SEED_VAR) {
            config.seed_mock_data = parse_bool(SEED_VAR, &value)?;
        }
        if let Some(value) = lookup(SEVERITY_FILTER_VAR) {
            config.view.severity = value
                .trim()
                .parse::<SeveritySelector>()
                .map_err(|source| ConfigError::InvalidSelector {
                    var: SEVERITY_FILTER_VAR,
                    source,
                })?;
        }
        if let Some(value) = lookup(SORT_ORDER_VAR) {
            config.view.order = value
                .trim()
                .parse::<SortOrder>()
                .map_err(|source| ConfigError::InvalidSelector {
                    var: SORT_ORDER_VAR,
                    source,
                })?;
        }

        Ok(config)
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_string(),
        }),
    }
}
