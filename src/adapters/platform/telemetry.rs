//! Telemetry reporters.

use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

use crate::ports::{TelemetryEvent, TelemetryReporter};

/// Emits each event as a structured `info` log line.
#[derive(Debug, Clone, Default)]
pub struct TracingTelemetryReporter;

impl TelemetryReporter for TracingTelemetryReporter {
    fn report_event(&self, event: TelemetryEvent) {
        let properties = serde_json::to_string(event.properties()).unwrap_or_default();
        info!(
            target: "telemetry",
            event_type = event.event_type(),
            properties = %properties,
            "Telemetry event"
        );
    }
}

/// Keeps every reported event in memory (useful for tests).
#[derive(Debug, Clone, Default)]
pub struct RecordingTelemetryReporter {
    events: Arc<Mutex<Vec<TelemetryEvent>>>,
}

impl RecordingTelemetryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl TelemetryReporter for RecordingTelemetryReporter {
    fn report_event(&self, event: TelemetryEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
