//! `ownercheck-match`: employee / company-owner identity matching engine.
//!
//! Pure engine crate: receives pre-loaded records, returns ranked and
//! deduplicated matches. No CLI or IO dependencies.

pub mod alphabet;
pub mod config;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod phonetic;
pub mod rank;
pub mod similarity;
pub mod summary;
pub mod surname;

pub use config::{Criteria, Criterion, MatchConfig, Thresholds, THRESHOLDS};
pub use engine::{run, run_with_criteria};
pub use error::MatchError;
pub use model::{EmployeeRecord, MatchInput, MatchRun, OutputRecord, OwnerRecord};
