use crate::notify::{INCIDENT_REJECTED, INCIDENT_REPORTED, VIEW_UPDATED};
use crate::state::AppState;
use chrono::{DateTime, SecondsFormat, Utc};
use incident_core::{
    IncidentRecord, Severity, SeveritySelector, SortOrder, derive_view, validate_record,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentDto {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub severity: String,
    pub reported_at: String,
}

impl From<&IncidentRecord> for IncidentDto {
    fn from(record: &IncidentRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            description: record.description.clone(),
            severity: record.severity.to_string(),
            reported_at: record.reported_at.clone(),
        }
    }
}

/// What the report form collects. Id and report time are assigned on submit.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct IncidentFormDto {
    pub title: String,
    pub description: String,
    pub severity: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewStateDto {
    pub severity_filter: String,
    pub sort_order: String,
    pub form_visible: bool,
    pub total_incidents: usize,
    pub shown_incidents: usize,
}

pub fn list_incidents(state: &AppState) -> Vec<IncidentDto> {
    derive_view(&state.store, &state.view)
        .into_iter()
        .map(IncidentDto::from)
        .collect()
}

pub fn report_incident(state: &mut AppState, form: IncidentFormDto) -> Result<IncidentDto, String> {
    report_incident_at(state, form, Utc::now())
}

pub fn report_incident_at(
    state: &mut AppState,
    form: IncidentFormDto,
    now: DateTime<Utc>,
) -> Result<IncidentDto, String> {
    let severity = match form.severity.parse::<Severity>() {
        Ok(severity) => severity,
        Err(err) => return Err(reject(state, err.to_string())),
    };

    let record = IncidentRecord::new(
        state.store.next_id(),
        form.title.trim(),
        form.description.trim(),
        severity,
        now.to_rfc3339_opts(SecondsFormat::Millis, true),
    );
    append_incident(state, record)
}

/// Appends a fully formed record. Validation and duplicate ids are reported
/// both as the returned error and as a rejection notification.
pub fn append_incident(
    state: &mut AppState,
    record: IncidentRecord,
) -> Result<IncidentDto, String> {
    if let Err(err) = validate_record(&record) {
        return Err(reject(state, err.to_string()));
    }

    let dto = IncidentDto::from(&record);
    if let Err(err) = state.store.append(record) {
        return Err(reject(state, err.to_string()));
    }

    state.form_visible = false;
    tracing::info!(id = dto.id, severity = %dto.severity, "incident reported");
    state.sink.emit_json(
        INCIDENT_REPORTED,
        serde_json::json!({ "id": dto.id, "title": dto.title, "severity": dto.severity }),
    );
    Ok(dto)
}

pub fn set_severity_filter(state: &mut AppState, label: &str) -> Result<(), String> {
    let selector = label.parse::<SeveritySelector>().map_err(|e| {
        tracing::warn!(label, "ignored unknown severity filter");
        e.to_string()
    })?;
    state.view.severity = selector;
    notify_view(state);
    Ok(())
}

pub fn set_sort_order(state: &mut AppState, label: &str) -> Result<(), String> {
    let order = label.parse::<SortOrder>().map_err(|e| {
        tracing::warn!(label, "ignored unknown sort order");
        e.to_string()
    })?;
    state.view.order = order;
    notify_view(state);
    Ok(())
}

pub fn get_view_state(state: &AppState) -> ViewStateDto {
    ViewStateDto {
        severity_filter: state.view.severity.to_string(),
        sort_order: state.view.order.to_string(),
        form_visible: state.form_visible,
        total_incidents: state.store.len(),
        shown_incidents: derive_view(&state.store, &state.view).len(),
    }
}

/// Flips the report form between shown and hidden; returns the new state.
pub fn toggle_form(state: &mut AppState) -> bool {
    state.form_visible = !state.form_visible;
    state.form_visible
}

pub fn severity_options() -> Vec<String> {
    SeveritySelector::OPTIONS
        .iter()
        .map(ToString::to_string)
        .collect()
}

pub fn sort_options() -> Vec<String> {
    SortOrder::OPTIONS.iter().map(ToString::to_string).collect()
}

fn reject(state: &AppState, message: String) -> String {
    tracing::warn!(%message, "incident rejected");
    state
        .sink
        .emit_json(INCIDENT_REJECTED, serde_json::json!({ "message": message }));
    message
}

fn notify_view(state: &AppState) {
    tracing::debug!(
        severity = %state.view.severity,
        order = %state.view.order,
        "view selectors changed"
    );
    state.sink.emit_json(
        VIEW_UPDATED,
        serde_json::json!({
            "severity_filter": state.view.severity.label(),
            "sort_order": state.view.order.label(),
        }),
    );
}
