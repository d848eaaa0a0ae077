//! Timetable document model and composition.
//!
//! Lines are converted independently into [`PublicationDelivery`]
//! documents. Shared resources (authority, operators, stops) go into one
//! common document per run.

pub mod builder;
mod compose;
mod config;
mod context;
mod error;
pub mod ids;
pub mod model;

pub use compose::{COMMON_LOCAL_ID, compose_common, compose_line};
pub use config::{AuthorityInfo, DocumentConfig};
pub use context::{ConversionContext, LineObjects};
pub use error::ConversionError;
pub use ids::{Codespace, ElementType};
pub use model::PublicationDelivery;
