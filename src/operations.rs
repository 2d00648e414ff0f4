//! One method per WealthEngine endpoint.
//!
//! Every call builds its lookup record, serializes it, sends it and decodes
//! the typed response. Failures are returned to the caller with the endpoint
//! path attached; nothing is retried.

use crate::client::WealthEngine;
use crate::config::DetailMode;
use crate::decode;
use crate::errors::{ResultExt, WealthEngineError};
use crate::models::*;
use serde::Serialize;
use url::Url;

const SCORE_BY_ADDRESS: &str = "score/score_one/by_address/";
const SCORE_BY_EMAIL: &str = "score/score_one/by_email/";
const SCORE_BY_PHONE: &str = "score/score_one/by_phone/";
const FIND_ONE_BY_ADDRESS: &str = "profile/find_one/by_address";
const FIND_ONE_BY_EMAIL: &str = "profile/find_one/by_email";
const FIND_ONE_BY_PHONE: &str = "profile/find_one/by_phone";
const FIND_MANY: &str = "profile/find_many";
const FIND_MANY_RESULTS: &str = "profile/find_many/results";
const JOB_STATUS: &str = "job/status";

impl WealthEngine {
    /// Looks up a profile by address and scores it with `model`.
    pub async fn score_one_by_address(
        &self,
        lookup: &AddressLookup,
        model: &str,
    ) -> Result<ScoredProfile, WealthEngineError> {
        let body = AddressLookupScore::new(lookup.clone(), model);
        self.make_score_request(SCORE_BY_ADDRESS, &body).await
    }

    /// Looks up a profile by email and scores it with `model`.
    pub async fn score_one_by_email(
        &self,
        lookup: &EmailLookup,
        model: &str,
    ) -> Result<ScoredProfile, WealthEngineError> {
        let body = EmailLookupScore::new(lookup.clone(), model);
        self.make_score_request(SCORE_BY_EMAIL, &body).await
    }

    /// Looks up a profile by phone number and scores it with `model`.
    pub async fn score_one_by_phone(
        &self,
        lookup: &PhoneLookup,
        model: &str,
    ) -> Result<ScoredProfile, WealthEngineError> {
        let body = PhoneLookupScore::new(lookup.clone(), model);
        self.make_score_request(SCORE_BY_PHONE, &body).await
    }

    /// Matches a profile by address.
    ///
    /// `mode` is `"full"` or `"basic"`; any other value, including an empty
    /// string, requests the full profile.
    pub async fn match_one_by_address(
        &self,
        lookup: &AddressLookup,
        mode: &str,
    ) -> Result<Profile, WealthEngineError> {
        self.make_match_request(FIND_ONE_BY_ADDRESS, mode, lookup).await
    }

    /// Matches a profile by email. See [`WealthEngine::match_one_by_address`] for `mode`.
    pub async fn match_one_by_email(
        &self,
        lookup: &EmailLookup,
        mode: &str,
    ) -> Result<Profile, WealthEngineError> {
        self.make_match_request(FIND_ONE_BY_EMAIL, mode, lookup).await
    }

    /// Matches a profile by phone number. See [`WealthEngine::match_one_by_address`] for `mode`.
    pub async fn match_one_by_phone(
        &self,
        lookup: &PhoneLookup,
        mode: &str,
    ) -> Result<Profile, WealthEngineError> {
        self.make_match_request(FIND_ONE_BY_PHONE, mode, lookup).await
    }

    /// Submits a batch of lookups for asynchronous processing.
    ///
    /// The returned [`BatchID`] is the only handle on the job; poll it with
    /// [`WealthEngine::get_batch_job_status`] and fetch the output with
    /// [`WealthEngine::get_batch_job_results`] once the job is complete.
    pub async fn find_many(&self, batch: &Batch, mode: &str) -> Result<BatchID, WealthEngineError> {
        let path = format!("{}/{}", FIND_MANY, DetailMode::from_param(mode));
        tracing::info!("Submitting batch of {} lookups to {}", batch.len(), path);

        let url = self.resource_url(&path).context(path.clone())?;
        let id = self
            .post_json(url, batch, decode::decode_batch_response)
            .await
            .context(path)?;

        tracing::info!("✓ Batch job accepted: {}", id);
        Ok(id)
    }

    /// Checks on the status of a batch job.
    pub async fn get_batch_job_status(
        &self,
        batch_id: &BatchID,
    ) -> Result<BatchJobStatus, WealthEngineError> {
        tracing::info!("Fetching status of batch job {}", batch_id);

        let url = self
            .resource_url_with_id(JOB_STATUS, &batch_id.id)
            .with_context(|| format!("{}/{}", JOB_STATUS, batch_id))?;
        let status = self
            .execute(self.get_request(url))
            .await
            .and_then(|body| decode::decode_batch_status(&body))
            .with_context(|| format!("{}/{}", JOB_STATUS, batch_id))?;

        tracing::debug!("Batch job {} status: {}", batch_id, status.status);
        Ok(status)
    }

    /// Fetches the processed results of a batch job.
    pub async fn get_batch_job_results(
        &self,
        batch_id: &BatchID,
    ) -> Result<BatchJobResults, WealthEngineError> {
        tracing::info!("Fetching results of batch job {}", batch_id);

        let url = self
            .resource_url_with_id(FIND_MANY_RESULTS, &batch_id.id)
            .with_context(|| format!("{}/{}", FIND_MANY_RESULTS, batch_id))?;
        let results = self
            .execute(self.get_request(url))
            .await
            .and_then(|body| decode::decode_batch_results_response(&body))
            .with_context(|| format!("{}/{}", FIND_MANY_RESULTS, batch_id))?;

        tracing::info!(
            "✓ Batch job {} returned {} profiles",
            batch_id,
            results.profiles.len()
        );
        Ok(results)
    }

    async fn make_score_request<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ScoredProfile, WealthEngineError> {
        tracing::info!("Scoring profile via {}", path);

        let url = self.resource_url(path).context(path)?;
        self.post_json(url, body, decode::decode_score_response)
            .await
            .context(path)
    }

    async fn make_match_request<B: Serialize>(
        &self,
        prefix: &str,
        mode: &str,
        body: &B,
    ) -> Result<Profile, WealthEngineError> {
        let path = format!("{}/{}", prefix, DetailMode::from_param(mode));
        tracing::info!("Matching profile via {}", path);

        let url = self.resource_url(&path).context(path.clone())?;
        self.post_json(url, body, decode::decode_profile)
            .await
            .context(path)
    }

    async fn post_json<B, T, D>(&self, url: Url, body: &B, decoder: D) -> Result<T, WealthEngineError>
    where
        B: Serialize,
        D: FnOnce(&[u8]) -> Result<T, WealthEngineError>,
    {
        let payload = serde_json::to_vec(body).map_err(WealthEngineError::Serialization)?;
        tracing::debug!("POST {} ({} bytes)", url, payload.len());

        let response = self.execute(self.post_request(url, payload)).await?;
        decoder(&response)
    }
}
