use std::sync::{Arc, Mutex};
use tracing::trace;
use super::events::AppEvent;

/// Typed surface the UI implements to receive workflow updates.
///
/// The core never touches a concrete UI; it only emits `AppEvent`s here.
pub trait ViewBinder: Send + Sync {
    fn render(&self, event: AppEvent);
}

/// Emit an application event to the bound view
pub fn emit_event(view: &dyn ViewBinder, event: AppEvent) {
    trace!(event = event.name(), "emit");
    view.render(event);
}

/// View that drops every event (headless one-shot commands)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl ViewBinder for NullView {
    fn render(&self, _event: AppEvent) {}
}

/// View that records events in order, for tests and scripted runs
#[derive(Debug, Default, Clone)]
pub struct RecordingView {
    events: Arc<Mutex<Vec<AppEvent>>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AppEvent> {
        match self.events.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ViewBinder for RecordingView {
    fn render(&self, event: AppEvent) {
        match self.events.lock() {
            Ok(mut guard) => guard.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}
