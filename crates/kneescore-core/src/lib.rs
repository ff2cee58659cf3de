//! kneescore-core
//!
//! Pure domain types for patient-reported knee questionnaires: questions,
//! answer sets, the raw-answer normalizer and the submission envelope.
//! No scoring logic lives here; this is the shared vocabulary the
//! instrument registry and its callers agree on.

pub mod error;
pub mod models;
pub mod normalize;
