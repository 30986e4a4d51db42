#![forbid(unsafe_code)]

//! Core: long-press disambiguation for pointer and touch input.
//!
//! # Role in lpress
//! `lpress-core` decides, from a live stream of mouse and single-finger touch
//! samples plus page scroll notifications, whether the user is tapping,
//! scrolling, or deliberately holding. It is deterministic and host-driven:
//! callers pass the current time into every operation and advance timers
//! explicitly.
//!
//! # Primary responsibilities
//! - **Sampling** ([`sample`]): collapse mouse and touch into one [`geometry::Point`],
//!   rejecting multi-touch; keep a five-sample velocity window.
//! - **Classification** ([`classifier`]): displacement and velocity checks.
//! - **Timers** ([`timer`]): cancellable virtual-time queue and the
//!   commit → hold cascade.
//! - **State machine** ([`engine`]): [`LongPressEngine`] and its lifecycle.
//!
//! # How it fits in the system
//! `lpress-web` wraps [`LongPressEngine`] with DOM-shaped handlers, the page
//! scroll listener lifecycle, and `preventDefault` decisions.

pub mod classifier;
pub mod config;
pub mod engine;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod sample;
pub mod timer;

pub use config::{ConfigError, LongPressConfig};
pub use engine::{LongPressEngine, PressState, TrackingState};
pub use geometry::Point;
