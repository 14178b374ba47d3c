use crate::ingest::DatasetError;
use crate::screening::RuleConfigError;
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Dataset(DatasetError),
    RuleConfig(RuleConfigError),
    Render(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Dataset(err) => write!(f, "dataset error: {}", err),
            AppError::RuleConfig(err) => write!(f, "invalid rule configuration: {}", err),
            AppError::Render(err) => write!(f, "output rendering error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Dataset(err) => Some(err),
            AppError::RuleConfig(err) => Some(err),
            AppError::Render(err) => Some(err),
        }
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<DatasetError> for AppError {
    fn from(value: DatasetError) -> Self {
        Self::Dataset(value)
    }
}

impl From<RuleConfigError> for AppError {
    fn from(value: RuleConfigError) -> Self {
        Self::RuleConfig(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Render(value)
    }
}
