// Core algorithm exports
pub mod compatibility;
pub mod matcher;
pub mod pipeline;
pub mod proximity;

pub use compatibility::{compatible_donor_types, BloodType, ParseBloodTypeError, ALL_BLOOD_TYPES};
pub use matcher::{partition_by_proximity, CandidateTiers, DonorMatcher};
pub use pipeline::{PipelineSummary, RequestPipeline};
pub use proximity::{classify, Proximity};
