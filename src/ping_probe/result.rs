use serde::{Deserialize, Serialize};

/// Label grouping probed hosts, e.g. a datacenter or an environment.
/// Serialized as a bare string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cluster(pub String);

impl Cluster {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Cluster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Accumulator filled in by [`ProbeResult::parse`].
///
/// `hostname` and `cluster` are set by the caller. The data fields are
/// assigned step by step while parsing, so after a failure they hold
/// whatever was extracted before the failing step. `timestamp` and `error`
/// are written on every exit path of the parser.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeResult {
    pub hostname: String,
    pub cluster: Cluster,
    pub submitted: u32,
    pub confirmed: u32,
    /// Percentage, 0.0 to 100.0.
    pub loss: f64,
    pub confirmation_message: String,
    /// Seconds since the UNIX epoch, UTC.
    pub timestamp: i64,
    pub error: String,
}

impl ProbeResult {
    pub fn new(hostname: impl Into<String>, cluster: Cluster) -> Self {
        Self {
            hostname: hostname.into(),
            cluster,
            ..Default::default()
        }
    }

    /// Marks the record as failed for a reason outside of parsing,
    /// e.g. the captured output could not be read.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.timestamp = chrono::Utc::now().timestamp();
        self.error = message.into();
    }

    pub fn is_success(&self) -> bool {
        self.error.is_empty()
    }
}
