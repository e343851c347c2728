//! Acquisition and reconstruction core for the swath ranging survey platform.
//!
//! The modules cover the on-line half of a survey (NMEA sentence decoding,
//! fused session records and their append-only log) and the off-line half
//! (planar projection, swath geometry, smoothing, series reconstruction)
//! behind safe, synchronous APIs.

pub mod geo;
pub mod math;
pub mod nmea;
pub mod prelude;
pub mod processing;
pub mod session;
pub mod telemetry;

pub use prelude::{ArrayConfig, CoreError, CoreResult};
