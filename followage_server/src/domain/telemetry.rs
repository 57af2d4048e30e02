use serde::Serialize;
use std::fmt;

// Index under which an analytics data point is recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TelemetryCategory {
    Errors,
    Commands,
    FeatureUsage,
}

impl TelemetryCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TelemetryCategory::Errors => "errors",
            TelemetryCategory::Commands => "commands",
            TelemetryCategory::FeatureUsage => "feature_usage",
        }
    }
}

impl fmt::Display for TelemetryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Fire-and-forget analytics data point. Field order is significant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TelemetryEvent {
    pub category: TelemetryCategory,
    pub fields: Vec<String>,
}

impl TelemetryEvent {
    pub fn new<I, S>(category: TelemetryCategory, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            category,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn errors<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(TelemetryCategory::Errors, fields)
    }
}
