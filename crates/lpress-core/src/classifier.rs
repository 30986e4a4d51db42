#![forbid(unsafe_code)]

//! Movement classification: hold versus scroll/drag.
//!
//! Two independent checks run on every move sample:
//!
//! - **Displacement**: `|dx| > t` or `|dy| > t * m`, measured from the start
//!   position. The vertical axis tolerates `m` times more drift because hand
//!   tremor during a hold is larger vertically on touch screens.
//! - **Velocity**: Euclidean speed between the oldest and newest sample in the
//!   [`SampleWindow`]. A slow drift can pass the displacement check for a long
//!   time, so a fast swipe is caught here even while it is still inside the
//!   pixel tolerance.
//!
//! Displacement is evaluated first and the first positive check wins.

use crate::config::LongPressConfig;
use crate::geometry::Point;
use crate::sample::SampleWindow;

/// Outcome of classifying one move sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Movement {
    /// Within tolerance; the hold continues.
    Still,
    /// Displacement from the start position exceeded the threshold.
    Displaced { dx: f64, dy: f64 },
    /// Windowed velocity exceeded the threshold.
    TooFast { px_per_ms: f64 },
}

impl Movement {
    /// Whether the interaction must be treated as a scroll.
    #[inline]
    #[must_use]
    pub const fn is_scroll(self) -> bool {
        !matches!(self, Self::Still)
    }
}

/// Stateless classifier over a config's thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementClassifier {
    threshold_x: f64,
    threshold_y: f64,
    velocity_threshold: f64,
}

impl MovementClassifier {
    #[must_use]
    pub fn new(config: &LongPressConfig) -> Self {
        Self {
            threshold_x: config.movement_threshold_px,
            threshold_y: config.vertical_threshold_px(),
            velocity_threshold: config.velocity_threshold_px_per_ms,
        }
    }

    /// Classify `current` against `start` and the recent sample window.
    #[must_use]
    pub fn classify(&self, start: Point, current: Point, window: &SampleWindow) -> Movement {
        let (dx, dy) = current.delta_from(start);
        if dx.abs() > self.threshold_x || dy.abs() > self.threshold_y {
            return Movement::Displaced { dx, dy };
        }
        match window_velocity(window) {
            Some(px_per_ms) if px_per_ms > self.velocity_threshold => {
                Movement::TooFast { px_per_ms }
            }
            _ => Movement::Still,
        }
    }
}

/// Speed in px/ms between the oldest and newest samples.
///
/// Returns `None` with fewer than two samples or a non-positive time span.
#[must_use]
pub fn window_velocity(window: &SampleWindow) -> Option<f64> {
    let (oldest, newest) = (window.oldest()?, window.newest()?);
    let dt_ms = newest.at.checked_duration_since(oldest.at)?.as_secs_f64() * 1000.0;
    if dt_ms <= 0.0 {
        return None;
    }
    let (dx, dy) = newest.position.delta_from(oldest.position);
    let vx = dx.abs() / dt_ms;
    let vy = dy.abs() / dt_ms;
    Some((vx * vx + vy * vy).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::PositionSample;
    use web_time::{Duration, Instant};

    fn classifier() -> MovementClassifier {
        MovementClassifier::new(&LongPressConfig::default())
    }

    fn window_of(points: &[(f64, f64, u64)]) -> (SampleWindow, Instant) {
        let t0 = Instant::now();
        let mut window = SampleWindow::new();
        for &(x, y, ms) in points {
            window.push(PositionSample::new(
                Point::new(x, y),
                t0 + Duration::from_millis(ms),
            ));
        }
        (window, t0)
    }

    #[test]
    fn horizontal_beyond_threshold_is_displaced() {
        let (window, _) = window_of(&[(0.0, 0.0, 0), (21.0, 0.0, 400)]);
        let m = classifier().classify(Point::new(0.0, 0.0), Point::new(21.0, 0.0), &window);
        assert_eq!(m, Movement::Displaced { dx: 21.0, dy: 0.0 });
        assert!(m.is_scroll());
    }

    #[test]
    fn horizontal_at_threshold_is_still() {
        let (window, _) = window_of(&[(0.0, 0.0, 0), (20.0, 0.0, 400)]);
        let m = classifier().classify(Point::new(0.0, 0.0), Point::new(20.0, 0.0), &window);
        assert_eq!(m, Movement::Still);
    }

    #[test]
    fn vertical_tolerance_is_doubled() {
        let (window, _) = window_of(&[(0.0, 0.0, 0), (0.0, 35.0, 400)]);
        let m = classifier().classify(Point::new(0.0, 0.0), Point::new(0.0, 35.0), &window);
        assert_eq!(m, Movement::Still);

        let m = classifier().classify(Point::new(0.0, 0.0), Point::new(0.0, -41.0), &window);
        assert!(matches!(m, Movement::Displaced { .. }));
    }

    #[test]
    fn fast_swipe_inside_tolerance_is_too_fast() {
        // 30px vertical over 50ms = 0.6 px/ms, still inside the 40px band.
        let (window, _) = window_of(&[
            (0.0, 0.0, 0),
            (0.0, 7.5, 12),
            (0.0, 15.0, 25),
            (0.0, 22.5, 37),
            (0.0, 30.0, 50),
        ]);
        let m = classifier().classify(Point::new(0.0, 0.0), Point::new(0.0, 30.0), &window);
        match m {
            Movement::TooFast { px_per_ms } => assert!((px_per_ms - 0.6).abs() < 1e-9),
            other => panic!("expected TooFast, got {other:?}"),
        }
    }

    #[test]
    fn velocity_is_euclidean() {
        let (window, _) = window_of(&[(0.0, 0.0, 0), (3.0, 4.0, 10)]);
        let v = window_velocity(&window).unwrap();
        assert!((v - 0.5).abs() < 1e-9);

        let (slow, _) = window_of(&[(0.0, 0.0, 0), (3.0, 4.0, 20)]);
        let m = classifier().classify(Point::new(0.0, 0.0), Point::new(3.0, 4.0), &slow);
        assert_eq!(m, Movement::Still);
    }

    #[test]
    fn zero_time_span_has_no_velocity() {
        let (window, _) = window_of(&[(0.0, 0.0, 5), (15.0, 0.0, 5)]);
        assert_eq!(window_velocity(&window), None);
        let m = classifier().classify(Point::new(0.0, 0.0), Point::new(15.0, 0.0), &window);
        assert_eq!(m, Movement::Still);
    }

    #[test]
    fn single_sample_has_no_velocity() {
        let (window, _) = window_of(&[(0.0, 0.0, 0)]);
        assert_eq!(window_velocity(&window), None);
    }

    #[test]
    fn displacement_wins_over_velocity() {
        let (window, _) = window_of(&[(0.0, 0.0, 0), (100.0, 0.0, 10)]);
        let m = classifier().classify(Point::new(0.0, 0.0), Point::new(100.0, 0.0), &window);
        assert!(matches!(m, Movement::Displaced { .. }));
    }
}
