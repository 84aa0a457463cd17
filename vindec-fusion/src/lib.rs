//! vindec-fusion library interface
//!
//! The decode fusion pipeline: reconciles the two upstream provider records
//! for a VIN into one canonical vehicle descriptor, applying field-priority
//! resolution, body-style classification, brand-specific overrides, and
//! synthetic-trim post-processing. The HTTP clients, VIN validity check,
//! persistence, and request handling live outside this crate.

pub mod fusion;
pub mod providers;
pub mod validation;

pub use crate::fusion::{decode, DecodeOutcome, DecodePipeline, DecodeReport};
