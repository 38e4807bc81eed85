//! Core infrastructure for the peepers runtime.
//!
//! This crate provides the pieces shared by the face engine and the host
//! application: a wrap-tolerant millisecond clock, a tick-rate counter, and
//! the logging subsystem.

pub mod clock;
pub mod fps;
pub mod logging;
