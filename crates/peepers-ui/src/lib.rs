//! Terminal rendering layer for peepers.
//!
//! Turns the engine's eye polygons into braille outlines and lays them out
//! next to a HUD and the in-app log panel. All rendering uses [`ratatui`];
//! this crate owns the presentation while [`peepers_face`] owns the state.

pub mod eyes;
pub mod hud;
pub mod layout;
pub mod surface;
