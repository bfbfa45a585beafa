use crate::notify::NotificationSink;
use incident_core::{IncidentStore, ViewState};

/// Everything the dashboard holds between user actions.
///
/// Selector slots and the form flag live here and are passed explicitly into
/// the view functions; nothing is kept in globals.
pub struct AppState {
    pub store: IncidentStore,
    pub view: ViewState,
    pub form_visible: bool,
    pub sink: Box<dyn NotificationSink>,
}

impl AppState {
    pub fn new(store: IncidentStore, view: ViewState, sink: Box<dyn NotificationSink>) -> Self {
        Self {
            store,
            view,
            form_visible: false,
            sink,
        }
    }
}
