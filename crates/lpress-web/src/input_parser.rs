#![forbid(unsafe_code)]

//! JSON input parser for host-encoded pointer events and options.
//!
//! [`parse_host_event`] accepts one JSON object per DOM event and returns the
//! corresponding [`HostEvent`]. Event kinds the long-press adapter does not
//! consume (keyboard, wheel, focus, ...) return `Ok(None)`.
//!
//! # Schema
//!
//! ```text
//! {"kind":"mouse","phase":"down|move|up|leave","x":f64,"y":f64,"button":i32}
//! {"kind":"touch","phase":"start|move|end|cancel","touches":[{"id":u32,"x":f64,"y":f64}]}
//! {"kind":"scroll"}
//! ```
//!
//! `button` defaults to the primary button. `touches` lists the *active*
//! touch points and defaults to empty, which is what a final `touchend`
//! carries.
//!
//! Feature-gated behind `input-parser`.

use lpress_core::event::{MouseButton, MouseInput, TouchInput, TouchPoint};
use lpress_core::geometry::Point;
use serde::Deserialize;

use crate::handlers::{HostEvent, MousePhase, TouchPhase};
use crate::options::LongPressOptions;

/// Errors from parsing encoded host JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputParseError {
    /// Malformed JSON.
    Json(String),
    /// Missing required field.
    MissingField(&'static str),
    /// Unknown phase value for the event kind.
    UnknownPhase(String),
}

impl core::fmt::Display for InputParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "JSON parse error: {msg}"),
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
            Self::UnknownPhase(phase) => write!(f, "unknown phase: {phase}"),
        }
    }
}

impl std::error::Error for InputParseError {}

#[derive(Debug, Deserialize)]
struct RawInput {
    kind: String,
    #[serde(default)]
    phase: Option<String>,
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default)]
    button: Option<i32>,
    #[serde(default)]
    touches: Vec<RawTouch>,
}

#[derive(Debug, Deserialize)]
struct RawTouch {
    #[serde(default)]
    id: u32,
    x: f64,
    y: f64,
}

/// Parse one JSON-encoded host event.
///
/// Returns `Ok(None)` for kinds with no long-press meaning, and `Err` for
/// malformed JSON, a missing phase or coordinate, or an unknown phase.
pub fn parse_host_event(json: &str) -> Result<Option<HostEvent>, InputParseError> {
    let raw: RawInput =
        serde_json::from_str(json).map_err(|e| InputParseError::Json(e.to_string()))?;

    match raw.kind.as_str() {
        "mouse" | "pointer" => parse_mouse_event(&raw).map(Some),
        "touch" => parse_touch_event(raw).map(Some),
        "scroll" => Ok(Some(HostEvent::WindowScroll)),
        _ => Ok(None),
    }
}

/// Parse host-side [`LongPressOptions`] (camelCase keys, all optional).
pub fn parse_options(json: &str) -> Result<LongPressOptions, InputParseError> {
    serde_json::from_str(json).map_err(|e| InputParseError::Json(e.to_string()))
}

fn parse_mouse_event(raw: &RawInput) -> Result<HostEvent, InputParseError> {
    let phase = match raw.phase.as_deref() {
        Some("down") => MousePhase::Down,
        Some("move") => MousePhase::Move,
        Some("up") => MousePhase::Up,
        Some("leave") => MousePhase::Leave,
        Some(other) => return Err(InputParseError::UnknownPhase(other.to_string())),
        None => return Err(InputParseError::MissingField("phase")),
    };
    let x = raw.x.ok_or(InputParseError::MissingField("x"))?;
    let y = raw.y.ok_or(InputParseError::MissingField("y"))?;
    Ok(HostEvent::Mouse {
        phase,
        input: MouseInput {
            position: Point::new(x, y),
            button: raw.button.map_or(MouseButton::Left, MouseButton::from_dom),
        },
    })
}

fn parse_touch_event(raw: RawInput) -> Result<HostEvent, InputParseError> {
    let phase = match raw.phase.as_deref() {
        Some("start") => TouchPhase::Start,
        Some("move") => TouchPhase::Move,
        Some("end") => TouchPhase::End,
        Some("cancel") => TouchPhase::Cancel,
        Some(other) => return Err(InputParseError::UnknownPhase(other.to_string())),
        None => return Err(InputParseError::MissingField("phase")),
    };
    let touches = raw
        .touches
        .into_iter()
        .map(|t| TouchPoint::new(t.id, t.x, t.y))
        .collect();
    Ok(HostEvent::Touch {
        phase,
        input: TouchInput { touches },
    })
}
