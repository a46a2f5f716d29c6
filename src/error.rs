// Adapter error taxonomy: execution, parse, normalization.

use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` exited with {status}: {stderr}")]
    ExitStatus {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("`{program}` did not finish within {after:?}")]
    Timeout { program: String, after: Duration },

    #[error("invalid JSON from `{source_name}` in {fragment:?}: {error}")]
    Parse {
        source_name: String,
        fragment: String,
        #[source]
        error: serde_json::Error,
    },

    #[error("invalid {field} {raw:?}: {reason}")]
    Normalize {
        field: &'static str,
        raw: String,
        reason: String,
    },

    #[error("no reading {chip}/{feature}/{input} in sensor output")]
    MissingReading {
        chip: String,
        feature: String,
        input: String,
    },

    #[error("host info: {0}")]
    HostInfo(String),
}

impl AdapterError {
    pub(crate) fn normalize(field: &'static str, raw: &str, reason: impl Into<String>) -> Self {
        AdapterError::Normalize {
            field,
            raw: raw.to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, AdapterError::Timeout { .. })
    }
}
