//! Extraction of ping statistics from raw probe output.
//!
//! The probe prints a summary such as:
//!
//! ```text
//! 10 transactions submitted, 9 transactions confirmed, 10.0% transaction loss
//! min/mean/max/stddev = 1.021/2.113/3.402/0.514 ms
//! ```
//!
//! Four patterns are matched against that text in a fixed order. Only the
//! first occurrence of each pattern is used, and the first failing step
//! aborts the remaining ones.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use thiserror::Error;

use super::result::ProbeResult;

const SUBMITTED_FIELD: &str = "submitted";
const CONFIRMED_FIELD: &str = "confirmed";
const LOSS_FIELD: &str = "loss";
const CONFIRMATION_FIELD: &str = "confirmation";

static SUBMITTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+\stransactions submitted").unwrap());
static CONFIRMED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+\stransactions confirmed").unwrap());
// The '%' is optional so that a loss figure printed without it is reported
// as a malformed segment instead of a missing one.
static LOSS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9.]+%?\stransaction loss").unwrap());
// Greedy: runs up to the last "ms" in the output.
static CONFIRMATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"min/mean/max/stddev\s*=\s*[\s\S]*ms").unwrap());

/// Errors raised while extracting statistics from probe output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The expected pattern does not occur in the output.
    #[error("pattern for '{field}' not found in probe output")]
    PatternNotFound { field: &'static str },

    /// The pattern matched but the captured value is not a valid number.
    #[error("cannot convert '{segment}' to {field}: {reason}")]
    ConversionError {
        field: &'static str,
        segment: String,
        reason: String,
    },

    /// The matched segment does not have the expected structure.
    #[error("malformed {field} segment: '{segment}'")]
    MalformedSegment {
        field: &'static str,
        segment: String,
    },
}

impl ParseError {
    pub fn field(&self) -> &'static str {
        match self {
            ParseError::PatternNotFound { field }
            | ParseError::ConversionError { field, .. }
            | ParseError::MalformedSegment { field, .. } => *field,
        }
    }
}

fn find_pattern<'a>(
    re: &Regex,
    output: &'a str,
    field: &'static str,
) -> Result<&'a str, ParseError> {
    re.find(output)
        .map(|m| m.as_str())
        .ok_or(ParseError::PatternNotFound { field })
}

/// Parses the leading count of a "N transactions ..." segment.
fn parse_count(segment: &str, field: &'static str) -> Result<u32, ParseError> {
    let token = segment.split_whitespace().next().unwrap_or_default();
    token.parse::<u32>().map_err(|e| {
        log::debug!("Transactions {field} token '{token}' is not a count: {e}");
        ParseError::ConversionError {
            field,
            segment: segment.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Parses the percentage in front of "% transaction loss".
/// The value must be finite and lie within 0 to 100.
fn parse_loss(segment: &str) -> Result<f64, ParseError> {
    let parts: Vec<&str> = segment.split('%').collect();
    if parts.len() != 2 {
        return Err(ParseError::MalformedSegment {
            field: LOSS_FIELD,
            segment: segment.to_string(),
        });
    }

    let conversion_error = |reason: String| ParseError::ConversionError {
        field: LOSS_FIELD,
        segment: segment.to_string(),
        reason,
    };

    let loss = parts[0]
        .parse::<f64>()
        .map_err(|e| conversion_error(e.to_string()))?;
    if !loss.is_finite() {
        log::debug!("Transaction loss '{}' overflows a float", parts[0]);
        return Err(conversion_error("value out of range".to_string()));
    }
    if loss > 100.0 {
        return Err(ParseError::MalformedSegment {
            field: LOSS_FIELD,
            segment: segment.to_string(),
        });
    }

    Ok(loss)
}

impl ProbeResult {
    /// Fills the statistic fields of this record from raw probe output.
    ///
    /// `timestamp` is set to the current UTC time whether or not parsing
    /// succeeds. On failure `error` holds the error's message and the fields
    /// extracted before the failing step are kept; on success `error` is
    /// cleared.
    pub fn parse(&mut self, output: &str) -> Result<(), ParseError> {
        let outcome = self.extract(output);
        self.timestamp = Utc::now().timestamp();

        match outcome {
            Ok(confirmation) => {
                self.confirmation_message = confirmation;
                self.error.clear();
                log::debug!(
                    "Parsed probe output for {}: {}/{} confirmed, {:.1}% loss",
                    self.hostname,
                    self.confirmed,
                    self.submitted,
                    self.loss
                );
                Ok(())
            }
            Err(e) => {
                self.error = e.to_string();
                log::warn!(
                    "Probe output for {} rejected at step '{}': {e}",
                    self.hostname,
                    e.field()
                );
                Err(e)
            }
        }
    }

    /// Runs the extraction steps in order, assigning each field as soon as
    /// it is converted. Returns the confirmation text, which is only stored
    /// once the whole pipeline has succeeded.
    fn extract(&mut self, output: &str) -> Result<String, ParseError> {
        let segment = find_pattern(&SUBMITTED_RE, output, SUBMITTED_FIELD)?;
        self.submitted = parse_count(segment, SUBMITTED_FIELD)?;

        let segment = find_pattern(&CONFIRMED_RE, output, CONFIRMED_FIELD)?;
        self.confirmed = parse_count(segment, CONFIRMED_FIELD)?;

        let segment = find_pattern(&LOSS_RE, output, LOSS_FIELD)?;
        self.loss = parse_loss(segment)?;

        let segment = find_pattern(&CONFIRMATION_RE, output, CONFIRMATION_FIELD)?;
        if segment.is_empty() {
            return Err(ParseError::MalformedSegment {
                field: CONFIRMATION_FIELD,
                segment: String::new(),
            });
        }

        Ok(segment.to_string())
    }
}
