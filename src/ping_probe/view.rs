use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use super::result::{Cluster, ProbeResult};

/// Output shape of a [`ProbeResult`], ready to be serialized as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub hostname: String,
    pub cluster: Cluster,
    pub submitted: u32,
    pub confirmed: u32,
    /// One decimal and a trailing '%', e.g. `12.5%`.
    pub loss: String,
    #[serde(rename = "confirmation")]
    pub confirmation_message: String,
    /// RFC 3339 in UTC, e.g. `1970-01-01T00:00:00Z`.
    #[serde(rename = "ts")]
    pub timestamp: String,
    pub error: String,
}

fn format_loss(loss: f64) -> String {
    format!("{loss:.1}%")
}

fn format_timestamp(timestamp: i64) -> String {
    // Out of range values fall back to the epoch.
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl From<&ProbeResult> for ResultView {
    fn from(result: &ProbeResult) -> Self {
        Self {
            hostname: result.hostname.clone(),
            cluster: result.cluster.clone(),
            submitted: result.submitted,
            confirmed: result.confirmed,
            loss: format_loss(result.loss),
            confirmation_message: result.confirmation_message.clone(),
            timestamp: format_timestamp(result.timestamp),
            error: result.error.clone(),
        }
    }
}

impl ProbeResult {
    pub fn to_view(&self) -> ResultView {
        ResultView::from(self)
    }
}
