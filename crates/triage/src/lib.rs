//! PediSafe Triage Library
//!
//! The safety-critical core: deterministic red-flag classification, the
//! conversation engine that drives the RAG pipeline, and response
//! post-processing.

pub mod assembler;
pub mod classifier;
pub mod engine;
pub mod extract;
pub mod levels;
pub mod session;

pub use assembler::finalize;
pub use classifier::{classify, TriageSignal, RED_FLAGS};
pub use engine::TriageEngine;
pub use extract::{extract_age_months, extract_temperature_celsius};
pub use levels::{detect_level, TriageLevel, ALL_LEVELS};
pub use session::Session;
