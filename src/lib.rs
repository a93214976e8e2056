//! Bloodlink - donor matching and notification service for urgent blood
//! requests.
//!
//! The core pipeline takes a hospital request, finds donors with a
//! compatible ABO/Rh blood type, splits them into near/far tiers by a
//! location heuristic, notifies them best-effort over email and an optional
//! secondary channel, and records which donors were reached.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    classify, compatible_donor_types, partition_by_proximity, BloodType, CandidateTiers,
    DonorMatcher, PipelineSummary, Proximity, RequestPipeline, ALL_BLOOD_TYPES,
};
pub use models::{BloodRequest, Donor, NewBloodRequest, NewDonor, RequestSummary, Urgency};
pub use services::{
    ChannelOutcome, DispatchReport, NotificationDispatcher, SqliteStore, Store, StoreError,
};
