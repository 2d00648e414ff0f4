//! Response decoders, one per response shape.
//!
//! A body that fails to decode fails the whole call. No partially populated
//! record is ever returned.

use crate::errors::WealthEngineError;
use crate::models::{BatchID, BatchJobResults, BatchJobStatus, BatchProfile, Profile, ScoredProfile};
use serde::de::DeserializeOwned;
use serde::Deserialize;

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, WealthEngineError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(
            "Failed to decode {} ({} bytes): {}",
            std::any::type_name::<T>(),
            body.len(),
            e
        );
        WealthEngineError::Decode(e)
    })
}

/// Decodes a profile returned by the matching endpoints.
pub fn decode_profile(body: &[u8]) -> Result<Profile, WealthEngineError> {
    decode(body)
}

/// Decodes a score response.
pub fn decode_score_response(body: &[u8]) -> Result<ScoredProfile, WealthEngineError> {
    decode(body)
}

/// Decodes the job handle returned by a batch submission.
pub fn decode_batch_response(body: &[u8]) -> Result<BatchID, WealthEngineError> {
    decode(body)
}

/// Decodes the status of a batch job.
pub fn decode_batch_status(body: &[u8]) -> Result<BatchJobStatus, WealthEngineError> {
    decode(body)
}

#[derive(Deserialize)]
struct WrappedResults {
    profiles: Vec<BatchProfile>,
}

/// Decodes the results of a batch job.
///
/// The provider answers with a bare array of batch profiles; a
/// `{"profiles": [...]}` object is accepted as well. The shape is chosen from
/// the first byte so a bad record reports its own error and position.
pub fn decode_batch_results_response(body: &[u8]) -> Result<BatchJobResults, WealthEngineError> {
    let first = body.iter().find(|b| !b.is_ascii_whitespace());
    let profiles = match first {
        Some(b'{') => decode::<WrappedResults>(body)?.profiles,
        _ => decode::<Vec<BatchProfile>>(body)?,
    };
    Ok(BatchJobResults { profiles })
}
