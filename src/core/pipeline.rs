use crate::core::matcher::{CandidateTiers, DonorMatcher};
use crate::models::{BloodRequest, NewBloodRequest, RequestSummary};
use crate::services::dispatch::NotificationDispatcher;
use crate::services::store::{Store, StoreError};
use std::sync::Arc;

/// In-process stage of one submission. Traced per transition; the stored
/// request status is not driven by this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PipelineStage {
    Received,
    Matched,
    Notifying,
    Completed,
}

/// Aggregate result of one submission.
///
/// `notified_count` counts near-tier donors with a confirmed email delivery;
/// `near_count`/`far_count` are tier sizes before the far-tier cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSummary {
    pub request_id: i64,
    pub near_count: usize,
    pub far_count: usize,
    pub notified_count: usize,
}

/// Orchestrates one hospital request end to end:
/// persist → match → notify → record.
///
/// Only the initial persist can fail the submission. Matching degrades to
/// zero candidates on store failure, and per-donor notification outcomes are
/// counted but never raised. There is no retry and no mid-run cancellation.
pub struct RequestPipeline {
    store: Arc<dyn Store>,
    matcher: DonorMatcher,
    dispatcher: NotificationDispatcher,
    far_notify_limit: usize,
}

impl RequestPipeline {
    pub fn new(
        store: Arc<dyn Store>,
        dispatcher: NotificationDispatcher,
        far_notify_limit: usize,
    ) -> Self {
        let matcher = DonorMatcher::new(store.clone());
        Self {
            store,
            matcher,
            dispatcher,
            far_notify_limit,
        }
    }

    /// Run the pipeline for one submission.
    ///
    /// Fails only if the request itself cannot be persisted.
    pub async fn submit(&self, request: NewBloodRequest) -> Result<PipelineSummary, StoreError> {
        let request_id = self.store.create_request(&request).await?;
        self.trace_stage(request_id, PipelineStage::Received);

        let tiers = match self
            .matcher
            .find_candidates(request.required_blood_type, &request.hospital_location)
            .await
        {
            Ok(tiers) => {
                if tiers.near.is_empty() && tiers.far.is_empty() {
                    tracing::info!(request_id, "No eligible donors for this request");
                }
                tiers
            }
            Err(e) => {
                // Distinct from "zero eligible donors": the store itself
                // failed, so we degrade to an empty candidate set.
                tracing::warn!(request_id, error = %e, "Donor lookup failed, continuing with zero candidates");
                CandidateTiers::default()
            }
        };
        self.trace_stage(request_id, PipelineStage::Matched);

        let summary = RequestSummary::from(&request);
        self.trace_stage(request_id, PipelineStage::Notifying);

        // All near-tier donors first, then up to far_notify_limit far-tier
        // donors in fetch order. A match is recorded iff the email channel
        // confirmed delivery, in both tiers.
        let mut notified_count = 0;
        for donor in &tiers.near {
            if self.notify_and_record(request_id, donor, &summary).await {
                notified_count += 1;
            }
        }

        for donor in tiers.far.iter().take(self.far_notify_limit) {
            self.notify_and_record(request_id, donor, &summary).await;
        }

        self.trace_stage(request_id, PipelineStage::Completed);
        tracing::info!(
            request_id,
            near = tiers.near.len(),
            far = tiers.far.len(),
            notified = notified_count,
            "Request processed"
        );

        Ok(PipelineSummary {
            request_id,
            near_count: tiers.near.len(),
            far_count: tiers.far.len(),
            notified_count,
        })
    }

    /// Notify one donor and record a match if email delivery was confirmed.
    /// Never fails: every outcome is absorbed here so the next donor always
    /// gets its attempt.
    async fn notify_and_record(
        &self,
        request_id: i64,
        donor: &crate::models::Donor,
        summary: &RequestSummary,
    ) -> bool {
        let report = self.dispatcher.notify(donor, summary).await;
        if !report.email_confirmed() {
            return false;
        }

        match self.store.insert_match(request_id, donor.id).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(request_id, donor_id = donor.id, error = %e, "Failed to record match");
                false
            }
        }
    }

    /// Recompute candidate tiers for a stored request (the match summary
    /// view). Store failure during matching degrades to empty tiers; an
    /// unknown request id is a hard [`StoreError::NotFound`].
    pub async fn match_summary(
        &self,
        request_id: i64,
    ) -> Result<(BloodRequest, CandidateTiers), StoreError> {
        let request = self.store.get_request(request_id).await?;

        let tiers = match self
            .matcher
            .find_candidates(request.required_blood_type, &request.hospital_location)
            .await
        {
            Ok(tiers) => tiers,
            Err(e) => {
                tracing::warn!(request_id, error = %e, "Donor lookup failed for match summary");
                CandidateTiers::default()
            }
        };

        Ok((request, tiers))
    }

    fn trace_stage(&self, request_id: i64, stage: PipelineStage) {
        tracing::debug!(request_id, stage = ?stage, "Pipeline stage");
    }
}
