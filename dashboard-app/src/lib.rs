pub mod commands;
pub mod config;
pub mod notify;
pub mod state;

use crate::commands::IncidentFormDto;
use crate::config::DashboardConfig;
use crate::notify::{NotificationSink, TracingSink};
use crate::state::AppState;
use incident_core::IncidentStore;
use incident_core::seed::mock_incidents;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "incident_core=info,dashboard_app=info";

pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

pub fn build_state(
    config: &DashboardConfig,
    sink: impl NotificationSink,
) -> Result<AppState, String> {
    let store = if config.seed_mock_data {
        IncidentStore::seeded(mock_incidents()).map_err(|e| e.to_string())?
    } else {
        IncidentStore::new()
    };
    tracing::info!(
        incidents = store.len(),
        severity = %config.view.severity,
        order = %config.view.order,
        "dashboard state ready"
    );
    Ok(AppState::new(store, config.view, Box::new(sink)))
}

pub fn run() -> Result<(), String> {
    let config = DashboardConfig::from_env().map_err(|e| e.to_string())?;
    let state = build_state(&config, TracingSink)?;

    print_json("view", &commands::get_view_state(&state))?;
    print_json("incidents", &commands::list_incidents(&state))?;
    Ok(())
}

/// Walks the add/filter/sort workflow against the seeded store and prints
/// each derived view.
pub fn run_demo() -> Result<(), String> {
    let config = DashboardConfig {
        seed_mock_data: true,
        ..DashboardConfig::default()
    };
    let mut state = build_state(&config, TracingSink)?;

    print_json("incidents", &commands::list_incidents(&state))?;

    commands::toggle_form(&mut state);
    let reported = commands::report_incident(
        &mut state,
        IncidentFormDto {
            title: "Prompt Injection Bypassed Content Filter".into(),
            description: "Crafted instructions embedded in a shared document caused the \
                          assistant to ignore its moderation policy."
                .into(),
            severity: "High".into(),
        },
    )?;
    print_json("reported", &reported)?;

    // Blank titles are refused; the store is left as it was.
    let blank = IncidentFormDto {
        severity: "Low".into(),
        ..IncidentFormDto::default()
    };
    match commands::report_incident(&mut state, blank) {
        Ok(unexpected) => print_json("accepted", &unexpected)?,
        Err(message) => print_json("rejected", &serde_json::json!({ "message": message }))?,
    }

    commands::set_severity_filter(&mut state, "High")?;
    print_json("high, newest first", &commands::list_incidents(&state))?;

    commands::set_sort_order(&mut state, "Oldest First")?;
    print_json("high, oldest first", &commands::list_incidents(&state))?;

    print_json("view", &commands::get_view_state(&state))?;
    Ok(())
}

fn print_json(label: &str, value: &impl serde::Serialize) -> Result<(), String> {
    println!(
        "{label}:\n{}",
        serde_json::to_string_pretty(value).map_err(|e| e.to_string())?
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NoopSink;
    use incident_core::{SeveritySelector, SortOrder, ViewState};

    #[test]
    fn build_state_seeds_by_default() {
        let state = build_state(&DashboardConfig::default(), NoopSink).expect("state");
        assert_eq!(state.store.len(), 3);
        assert_eq!(state.view, ViewState::default());
        assert!(!state.form_visible);
    }

    #[test]
    fn build_state_honours_config() {
        let config = DashboardConfig {
            seed_mock_data: false,
            view: ViewState {
                severity: SeveritySelector::All,
                order: SortOrder::OldestFirst,
            },
        };
        let state = build_state(&config, NoopSink).expect("state");
        assert!(state.store.is_empty());
        assert_eq!(state.view.order, SortOrder::OldestFirst);
        assert!(commands::list_incidents(&state).is_empty());
    }
}
