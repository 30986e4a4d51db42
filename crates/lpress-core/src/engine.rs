#![forbid(unsafe_code)]

//! Long-press state machine.
//!
//! [`LongPressEngine`] decides, from a stream of pointer samples and page
//! scroll notifications, whether the user is tapping, scrolling, or holding.
//! Time is supplied by the host: every operation takes `now`, and timers only
//! fire from [`LongPressEngine::tick`].
//!
//! # State Machine
//!
//! ```text
//! Idle ──start──▶ Pending ──commit──▶ Armed ──hold──▶ Triggered
//!                   │                   │                │
//!                   └──move/scroll──▶ Cancelled          │
//!                                       │                │
//!        Idle ◀──reset/settle/end───────┘◀───end/scroll──┘
//! ```
//!
//! # Invariants
//!
//! 1. At most one commit timer and one hold timer are live at any time.
//! 2. A fired or cancelled handle is cleared from its slot before the next
//!    transition.
//! 3. `on_long_press` runs at most once per interaction.
//! 4. `on_cancel` runs only when an interaction that reached `Triggered` ends.
//! 5. After [`dispose`](LongPressEngine::dispose) no timer is live and every
//!    operation is a no-op.
//!
//! # Failure Modes
//!
//! - A panic inside a caller callback propagates out of `tick`/`end`; the
//!   engine has already recorded the transition that invoked it.
//! - A duplicate `start` mid-interaction restarts tracking from the new
//!   position rather than being rejected.

use web_time::Instant;

use crate::classifier::{Movement, MovementClassifier};
use crate::config::{ConfigError, LongPressConfig};
use crate::geometry::Point;
use crate::sample::{PositionSample, SampleWindow};
use crate::timer::{
    ArmingTimers, FiredTimer, TimerHandle, TimerKind, TimerQueue, claim_slot, disarm_slot,
};

#[cfg(feature = "tracing")]
use crate::logging::{debug, trace, warn};
#[cfg(not(feature = "tracing"))]
use crate::{debug, trace, warn};

/// Observable engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PressState {
    /// No interaction in progress.
    #[default]
    Idle,
    /// Pointer down; commit timer armed.
    Pending,
    /// Commit delay passed; hold timer armed.
    Armed,
    /// Hold elapsed; the long press is active until release.
    Triggered,
    /// Classified as a scroll; waiting for the scrolling flag to clear.
    Cancelled,
}

impl PressState {
    /// Whether a press is being tracked toward a possible long press.
    #[inline]
    #[must_use]
    pub const fn is_tracking(self) -> bool {
        matches!(self, Self::Pending | Self::Armed)
    }
}

/// Per-interaction tracking record, reset in place on every `start`.
#[derive(Debug, Clone, Default)]
pub struct TrackingState {
    start_position: Point,
    last_position: Point,
    is_scrolling: bool,
    long_press_triggered: bool,
    arming: ArmingTimers,
    samples: SampleWindow,
}

impl TrackingState {
    #[must_use]
    pub const fn start_position(&self) -> Point {
        self.start_position
    }

    #[must_use]
    pub const fn last_position(&self) -> Point {
        self.last_position
    }

    #[must_use]
    pub const fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    #[must_use]
    pub const fn long_press_triggered(&self) -> bool {
        self.long_press_triggered
    }

    #[must_use]
    pub const fn arming(&self) -> &ArmingTimers {
        &self.arming
    }

    #[must_use]
    pub const fn samples(&self) -> &SampleWindow {
        &self.samples
    }

    fn restart(&mut self, position: Point, now: Instant) {
        self.start_position = position;
        self.last_position = position;
        self.is_scrolling = false;
        self.long_press_triggered = false;
        self.samples.clear();
        self.samples.push(PositionSample::new(position, now));
    }
}

/// Lifecycle of the page-level scroll listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScrollListener {
    Installed,
    Removed,
}

type Callback = Box<dyn FnMut()>;

/// Long-press recognizer for one target element.
///
/// Feed pointer samples through [`start`](Self::start),
/// [`move_to`](Self::move_to), [`end`](Self::end) and
/// [`cancel`](Self::cancel); forward page scrolls to
/// [`global_scroll`](Self::global_scroll); call [`tick`](Self::tick) at or
/// after [`next_deadline`](Self::next_deadline).
pub struct LongPressEngine {
    config: LongPressConfig,
    classifier: MovementClassifier,
    timers: TimerQueue,
    tracking: TrackingState,
    state: PressState,
    scroll_reset: Option<TimerHandle>,
    scroll_settle: Option<TimerHandle>,
    listener: ScrollListener,
    on_long_press: Callback,
    on_cancel: Option<Callback>,
}

impl std::fmt::Debug for LongPressEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LongPressEngine")
            .field("state", &self.state)
            .field("scrolling", &self.tracking.is_scrolling)
            .field("live_timers", &self.timers.len())
            .field("listener", &self.listener)
            .finish()
    }
}

impl LongPressEngine {
    /// Create an engine and install its page scroll listener.
    pub fn new(
        config: LongPressConfig,
        on_long_press: impl FnMut() + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(?config, "long-press engine created; scroll listener installed");
        Ok(Self {
            classifier: MovementClassifier::new(&config),
            config,
            timers: TimerQueue::new(),
            tracking: TrackingState::default(),
            state: PressState::Idle,
            scroll_reset: None,
            scroll_settle: None,
            listener: ScrollListener::Installed,
            on_long_press: Box::new(on_long_press),
            on_cancel: None,
        })
    }

    /// Attach the callback run when an active long press ends.
    #[must_use]
    pub fn with_on_cancel(mut self, on_cancel: impl FnMut() + 'static) -> Self {
        self.on_cancel = Some(Box::new(on_cancel));
        self
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &LongPressConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub const fn state(&self) -> PressState {
        self.state
    }

    /// Whether the long press is currently active.
    #[inline]
    #[must_use]
    pub fn is_long_pressing(&self) -> bool {
        self.state == PressState::Triggered
    }

    #[inline]
    #[must_use]
    pub const fn is_scrolling(&self) -> bool {
        self.tracking.is_scrolling
    }

    #[inline]
    #[must_use]
    pub const fn tracking(&self) -> &TrackingState {
        &self.tracking
    }

    /// Number of timers currently scheduled, of any kind.
    #[inline]
    #[must_use]
    pub fn live_timer_count(&self) -> usize {
        self.timers.len()
    }

    /// Number of live timers of one kind.
    #[must_use]
    pub fn live_timers_of(&self, kind: TimerKind) -> usize {
        self.timers.count_kind(kind)
    }

    /// Whether the page scroll listener is still installed.
    #[inline]
    #[must_use]
    pub fn scroll_listener_installed(&self) -> bool {
        self.listener == ScrollListener::Installed
    }

    /// When the host should next call [`tick`](Self::tick).
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Pointer down at `position`.
    ///
    /// Ignored while the scrolling flag is set. Otherwise tracking is reset in
    /// place, so a duplicate `start` mid-interaction restarts the press.
    /// Returns whether the press was accepted.
    pub fn start(&mut self, position: Point, now: Instant) -> bool {
        if !self.scroll_listener_installed() {
            return false;
        }
        if self.tracking.is_scrolling {
            trace!(?position, "start ignored while scrolling");
            return false;
        }
        if self.state != PressState::Idle {
            debug!(state = ?self.state, "re-entrant start restarts interaction");
        }
        self.tracking.restart(position, now);
        self.tracking
            .arming
            .arm_commit(&mut self.timers, now, self.config.commit_delay);
        self.transition(PressState::Pending);
        true
    }

    /// Pointer moved to `position`.
    ///
    /// Only `Pending` and `Armed` presses are sampled. Returns the
    /// classification, or `None` when the move was ignored.
    pub fn move_to(&mut self, position: Point, now: Instant) -> Option<Movement> {
        if !self.state.is_tracking() {
            return None;
        }
        self.tracking.last_position = position;
        self.tracking
            .samples
            .push(PositionSample::new(position, now));
        let movement = self.classifier.classify(
            self.tracking.start_position,
            position,
            &self.tracking.samples,
        );
        if movement.is_scroll() {
            debug!(?movement, "movement cancels press");
            self.tracking.is_scrolling = true;
            self.finish_interaction();
            self.schedule_scroll_reset(now);
        }
        Some(movement)
    }

    /// Pointer released. Returns whether a long press had triggered.
    pub fn end(&mut self, now: Instant) -> bool {
        self.release(now)
    }

    /// Pointer left the target or the host cancelled the touch.
    ///
    /// Same semantics as [`end`](Self::end).
    pub fn cancel(&mut self, now: Instant) -> bool {
        self.release(now)
    }

    /// The page scrolled.
    ///
    /// Cancels any in-flight interaction and holds the scrolling flag until
    /// `scroll_reset_delay` after the most recent scroll.
    pub fn global_scroll(&mut self, now: Instant) {
        if !self.scroll_listener_installed() {
            return;
        }
        self.tracking.is_scrolling = true;
        if self.state != PressState::Idle {
            debug!(state = ?self.state, "page scroll cancels press");
            self.finish_interaction();
        }
        disarm_slot(&mut self.timers, &mut self.scroll_settle);
        self.scroll_settle = Some(self.timers.schedule(
            TimerKind::ScrollSettle,
            now,
            self.config.scroll_reset_delay,
        ));
    }

    /// Fire every timer due at `now`, in deadline order.
    ///
    /// Cascaded timers are scheduled from the firing timer's deadline, so a
    /// single late tick still observes commit before hold. Returns the number
    /// of timers fired.
    pub fn tick(&mut self, now: Instant) -> usize {
        let mut fired = 0;
        while let Some(timer) = self.timers.pop_due(now) {
            fired += 1;
            self.on_timer(timer);
        }
        fired
    }

    /// Tear down: clear every timer and remove the scroll listener.
    ///
    /// Idempotent. Returns the number of timers that were still live.
    pub fn dispose(&mut self) -> usize {
        if !self.scroll_listener_installed() {
            return 0;
        }
        let disarmed = self.tracking.arming.disarm(&mut self.timers);
        self.scroll_reset = None;
        self.scroll_settle = None;
        let cleared = disarmed + self.timers.clear();
        self.tracking.long_press_triggered = false;
        self.tracking.is_scrolling = false;
        self.state = PressState::Idle;
        self.listener = ScrollListener::Removed;
        debug!(cleared, "long-press engine disposed; scroll listener removed");
        cleared
    }
}

// ---------------------------------------------------------------------------
// Internal transitions
// ---------------------------------------------------------------------------

impl LongPressEngine {
    fn transition(&mut self, to: PressState) {
        if self.state != to {
            trace!(from = ?self.state, to = ?to, "press state");
            self.state = to;
        }
    }

    fn release(&mut self, now: Instant) -> bool {
        if !self.scroll_listener_installed() {
            return false;
        }
        let was_long_press = self.tracking.long_press_triggered;
        self.finish_interaction();
        self.transition(PressState::Idle);
        if self.tracking.is_scrolling {
            self.schedule_scroll_reset(now);
        }
        was_long_press
    }

    /// Clear both arming timers and leave the active states.
    ///
    /// `Pending`/`Armed` become `Cancelled`; `Triggered` becomes `Idle` and
    /// runs `on_cancel`.
    fn finish_interaction(&mut self) {
        self.tracking.arming.disarm(&mut self.timers);
        let was_triggered = std::mem::take(&mut self.tracking.long_press_triggered);
        match self.state {
            PressState::Pending | PressState::Armed => self.transition(PressState::Cancelled),
            PressState::Triggered => self.transition(PressState::Idle),
            PressState::Idle | PressState::Cancelled => {}
        }
        if was_triggered && let Some(on_cancel) = self.on_cancel.as_mut() {
            on_cancel();
        }
    }

    fn schedule_scroll_reset(&mut self, now: Instant) {
        disarm_slot(&mut self.timers, &mut self.scroll_reset);
        self.scroll_reset = Some(self.timers.schedule(
            TimerKind::ScrollReset,
            now,
            self.config.scroll_reset_delay,
        ));
    }

    fn clear_scrolling(&mut self) {
        self.tracking.is_scrolling = false;
        if self.state == PressState::Cancelled {
            self.transition(PressState::Idle);
        }
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn on_timer(&mut self, timer: FiredTimer) {
        let FiredTimer { handle, deadline } = timer;
        match handle.kind() {
            TimerKind::Commit if self.tracking.arming.accept_commit(handle) => {
                if self.tracking.is_scrolling {
                    return;
                }
                self.tracking
                    .arming
                    .arm_hold(&mut self.timers, deadline, self.config.hold_duration);
                self.transition(PressState::Armed);
            }
            TimerKind::Hold if self.tracking.arming.accept_hold(handle) => {
                if self.tracking.is_scrolling {
                    return;
                }
                self.tracking.long_press_triggered = true;
                self.transition(PressState::Triggered);
                debug!(position = ?self.tracking.start_position, "long press");
                (self.on_long_press)();
            }
            TimerKind::ScrollReset if claim_slot(&mut self.scroll_reset, handle) => {
                // A page scroll still settling owns the flag.
                if self.scroll_settle.is_none() {
                    self.clear_scrolling();
                }
            }
            TimerKind::ScrollSettle if claim_slot(&mut self.scroll_settle, handle) => {
                self.clear_scrolling();
            }
            kind => {
                warn!(?kind, "fired timer has no owning slot");
            }
        }
    }
}

impl Drop for LongPressEngine {
    fn drop(&mut self) {
        self.dispose();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
