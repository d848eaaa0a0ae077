//! Airport stop reference data.
//!
//! Provides airport → stop place, scheduled stop point, route point and
//! quay ids, looked up once from a [`StopRegistry`] and shared read-only by
//! every line conversion.

mod error;
mod reference;
mod registry;

pub use error::StopError;
pub use reference::{StopReference, StopReferenceData, load_quay_map};
pub use registry::{DerivedStopRegistry, JsonStopRegistry, StopRecord, StopRegistry};
