//! Flight timetable converter.
//!
//! Turns airport flight board events into NeTEx-style timetable documents:
//! one document per airline line plus one shared document per run.

pub mod config;
pub mod domain;
pub mod feed;
pub mod netex;
pub mod pipeline;
pub mod schedule;
pub mod sink;
pub mod stops;
