//! Core 2-D grouped particle collision library.
//!
//! Main components:
//! - [`config`] — immutable simulation configuration and its validation.
//! - [`group`] — named particle categories.
//! - [`allocator`] — splits a total population across groups by ratio.
//! - [`particle`] — placement, motion integration and collision response.
//! - [`simulation`] — owns the population and advances it tick by tick.
//! - [`stats`] — aggregate counts for display.
//! - [`canvas`] — the drawing capability a host provides.
//! - [`arena`], [`types`], [`error`] — shared building blocks.

pub mod allocator;
pub mod arena;
pub mod canvas;
pub mod config;
pub mod error;
pub mod group;
pub mod particle;
pub mod simulation;
pub mod stats;
pub mod types;

pub use simulation::Simulation;
