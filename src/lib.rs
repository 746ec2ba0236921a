//! Location-aware prayer schedule engine.
//!
//! Computes the five daily prayer instants plus sunrise for a coordinate and
//! date, the qibla bearing to the Kaaba, distance-ranked mosque lists, and a
//! live next-event countdown. All components are pure or hold only small
//! immutable state; timing, persistence and presentation belong to callers.

pub mod cli;
pub mod error;
pub mod geo;
pub mod output;
pub mod rank;
pub mod series;
pub mod solar;
pub mod timezone;
pub mod tracker;
pub mod types;

pub use error::{Error, Result};
