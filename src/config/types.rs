use std::time::Duration;

use serde::Deserialize;

use crate::args::{OutputFormat, parse_duration_value};
use crate::error::ValidationError;

/// Keys accepted in `lbcheck.toml` / `lbcheck.json`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub dns: Option<Vec<String>>,
    pub requests: Option<u64>,
    pub timeout: Option<DurationValue>,
    #[serde(alias = "max_concurrent")]
    pub concurrency: Option<usize>,
    pub interval: Option<DurationValue>,
    pub recovery_window: Option<DurationValue>,
    pub resolve_timeout: Option<DurationValue>,
    pub redirect: Option<u32>,
    pub quiet_responses: Option<bool>,
    pub output_format: Option<OutputFormat>,
    pub no_color: Option<bool>,
    pub verbose: Option<bool>,
}

/// A duration written either as whole seconds or as text such as `"250ms"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(0) => Err(ValidationError::DurationZero),
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration_value(text),
        }
    }
}
