#![forbid(unsafe_code)]

//! Position sampling: pointer normalization and the velocity window.
//!
//! [`sample_position`] turns a [`PointerInput`] into a single [`Point`],
//! rejecting touch events that carry zero or several active touches.
//! Multi-touch is never interpreted as "the first finger".
//!
//! [`SampleWindow`] keeps the last [`SAMPLE_WINDOW_CAPACITY`] timestamped
//! positions for velocity estimation; the oldest sample is evicted first.

use std::collections::VecDeque;

use web_time::Instant;

use crate::event::PointerInput;
use crate::geometry::Point;

/// Number of samples retained for velocity estimation.
pub const SAMPLE_WINDOW_CAPACITY: usize = 5;

/// Why a pointer event produced no position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleRejection {
    /// Touch event with no active touch points.
    NoTouch,
    /// Touch event with more than one active touch point.
    MultiTouch,
}

impl core::fmt::Display for SampleRejection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoTouch => f.write_str("touch event carries no active touch"),
            Self::MultiTouch => f.write_str("multi-touch event"),
        }
    }
}

/// Normalize a pointer event to a single coordinate pair.
pub fn sample_position(input: &PointerInput) -> Result<Point, SampleRejection> {
    match input {
        PointerInput::Mouse(mouse) => Ok(mouse.position),
        PointerInput::Touch(touch) => match touch.touches.as_slice() {
            [] => Err(SampleRejection::NoTouch),
            [only] => Ok(only.position),
            _ => Err(SampleRejection::MultiTouch),
        },
    }
}

/// One timestamped position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSample {
    pub position: Point,
    pub at: Instant,
}

impl PositionSample {
    #[must_use]
    pub const fn new(position: Point, at: Instant) -> Self {
        Self { position, at }
    }
}

/// Bounded ring of recent samples.
#[derive(Debug, Clone, Default)]
pub struct SampleWindow {
    samples: VecDeque<PositionSample>,
}

impl SampleWindow {
    /// Create an empty window.
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(SAMPLE_WINDOW_CAPACITY),
        }
    }

    /// Append a sample, evicting the oldest when full.
    pub fn push(&mut self, sample: PositionSample) {
        if self.samples.len() == SAMPLE_WINDOW_CAPACITY {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    #[inline]
    #[must_use]
    pub fn oldest(&self) -> Option<&PositionSample> {
        self.samples.front()
    }

    #[inline]
    #[must_use]
    pub fn newest(&self) -> Option<&PositionSample> {
        self.samples.back()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &PositionSample> {
        self.samples.iter()
    }
}
