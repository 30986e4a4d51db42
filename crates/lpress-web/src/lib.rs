#![forbid(unsafe_code)]

//! `lpress-web` adapts [`lpress_core::LongPressEngine`] to browser hosts.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (JS) pushes mouse, touch
//!   and page scroll events and drives timers with [`LongPressHandlers::tick`].
//! - **Deterministic time**: every handler takes the host's current instant.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! This crate does not bind to `wasm-bindgen`. Hosts read
//! [`PressDispatch::prevent_default`] and the queued
//! [`ScrollListenerCommand`]s and apply them to the DOM themselves.

pub mod handlers;
#[cfg(feature = "input-parser")]
pub mod input_parser;
pub mod options;

pub use handlers::{
    HostEvent, LongPressHandlers, MousePhase, PressDispatch, PressIgnoredReason, PressLogEntry,
    PressLogOutcome, PressPhase, ScrollListenerCommand, TouchPhase,
};
pub use options::LongPressOptions;
