use tokio::sync::mpsc::{self, error::TrySendError};

use crate::domain::{TelemetryEvent, TelemetrySink};

// Best-effort telemetry: events are queued without waiting and written by a
// background task. A full or closed queue drops the event.
#[derive(Clone)]
pub struct ChannelTelemetry {
    tx: mpsc::Sender<TelemetryEvent>,
}

impl ChannelTelemetry {
    pub fn new(tx: mpsc::Sender<TelemetryEvent>) -> Self {
        Self { tx }
    }

    // Must be called from within a Tokio runtime.
    pub fn spawn(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        tokio::spawn(drain(rx));
        Self::new(tx)
    }
}

impl TelemetrySink for ChannelTelemetry {
    fn record(&self, event: TelemetryEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                tracing::warn!(category = %event.category, "telemetry queue full, dropping event");
            }
            Err(TrySendError::Closed(event)) => {
                tracing::warn!(category = %event.category, "telemetry queue closed, dropping event");
            }
        }
    }
}

async fn drain(mut rx: mpsc::Receiver<TelemetryEvent>) {
    while let Some(event) = rx.recv().await {
        log_data_point(&event);
    }
}

// `kind` keeps data points distinguishable when the formatter hides targets.
fn log_data_point(event: &TelemetryEvent) {
    tracing::info!(
        target: "telemetry",
        kind = "telemetry",
        category = %event.category,
        fields = ?event.fields,
        "data point"
    );
}
