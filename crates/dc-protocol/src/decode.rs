//! Structured decoding of raw model output into the schema types.
//!
//! Models are told to reply with bare JSON, but in practice fence it in
//! markdown or pad it with prose. Decoding strips that wrapping, parses
//! strictly against the schema, then checks the range constraints serde
//! cannot express. Violations are reported as [`DecodeError`], never
//! coerced into a "nearest valid" value.

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::intent::SupportIntent;
use crate::quick_fix::QuickFixResponse;
use crate::ticket::TicketRecommendation;

/// Hard cap on ticket subject length, from the store's field definition.
pub const SUBJECT_MAX_CHARS: usize = 100;

/// Why a model payload failed to decode.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Not valid JSON, missing a required field, or an unknown enum label.
    #[error("malformed model output: {0}")]
    Malformed(String),
    /// A numeric field fell outside its documented range.
    #[error("{field} = {value} is outside [0.0, 1.0]")]
    OutOfRange { field: &'static str, value: f64 },
    /// Subject exceeds the store's field limit.
    #[error("subject is {len} characters (limit {max})")]
    SubjectTooLong { len: usize, max: usize },
}

/// Pull the JSON payload out of a model reply that may be wrapped in
/// markdown code fences or surrounded by prose.
pub fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();

    // Try ```json ... ``` first
    if let Some(start) = trimmed.find("```json") {
        let after_fence = &trimmed[start + 7..];
        if let Some(end) = after_fence.find("```") {
            return after_fence[..end].trim();
        }
    }

    // Try ``` ... ```
    if let Some(start) = trimmed.find("```") {
        let after_fence = &trimmed[start + 3..];
        if let Some(end) = after_fence.find("```") {
            return after_fence[..end].trim();
        }
    }

    // Assume raw JSON
    trimmed
}

fn parse<T: DeserializeOwned>(raw: &str) -> Result<T, DecodeError> {
    serde_json::from_str(extract_json(raw)).map_err(|e| DecodeError::Malformed(e.to_string()))
}

fn check_unit_interval(field: &'static str, value: f64) -> Result<(), DecodeError> {
    if !(0.0..=1.0).contains(&value) || value.is_nan() {
        return Err(DecodeError::OutOfRange { field, value });
    }
    Ok(())
}

impl SupportIntent {
    /// Decode raw routing-model output, enforcing the confidence range.
    pub fn decode(raw: &str) -> Result<Self, DecodeError> {
        let intent: Self = parse(raw)?;
        check_unit_interval("confidence", intent.confidence)?;
        Ok(intent)
    }
}

impl QuickFixResponse {
    /// Decode raw quick-fix-model output, enforcing the confidence range.
    pub fn decode(raw: &str) -> Result<Self, DecodeError> {
        let resp: Self = parse(raw)?;
        check_unit_interval("confidence", resp.confidence)?;
        Ok(resp)
    }
}

impl TicketRecommendation {
    /// Decode raw ticket-model output, enforcing the subject length cap.
    pub fn decode(raw: &str) -> Result<Self, DecodeError> {
        let rec: Self = parse(raw)?;
        let len = rec.subject.chars().count();
        if len > SUBJECT_MAX_CHARS {
            return Err(DecodeError::SubjectTooLong {
                len,
                max: SUBJECT_MAX_CHARS,
            });
        }
        Ok(rec)
    }
}
