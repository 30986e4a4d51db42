#![forbid(unsafe_code)]

//! Deterministic web adapter for long-press recognition.
//!
//! This module bridges browser mouse, touch and page scroll signals into
//! [`LongPressEngine`] operations while enforcing:
//! - single-finger touch only (multi-touch is a logged no-op),
//! - `preventDefault` on touch release only after a long press fired, and
//! - explicit scroll-listener install/remove commands for JS hosts.
//!
//! Every handler returns a [`PressDispatch`] carrying the `preventDefault`
//! decision and a [`PressLogEntry`] describing what happened.

use lpress_core::engine::{LongPressEngine, PressState};
use lpress_core::event::{MouseButton, MouseInput, PointerInput, TouchInput};
use lpress_core::geometry::Point;
use lpress_core::sample::{SampleRejection, sample_position};
use web_time::Instant;

/// Host command for managing the page-level scroll listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollListenerCommand {
    /// Attach a passive `scroll` listener to the window.
    Install,
    /// Detach it.
    Remove,
}

/// Lifecycle phase recorded for one adapter dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressPhase {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerLeave,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
    WindowScroll,
}

/// Why an incoming signal was not forwarded to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressIgnoredReason {
    /// Touch event carried more than one active touch.
    MultiTouch,
    /// Touch event carried no active touch where one was required.
    NoTouch,
    /// The handlers were already disposed.
    Disposed,
    /// Mouse down with a non-primary button.
    SecondaryButton,
}

impl From<SampleRejection> for PressIgnoredReason {
    fn from(rejection: SampleRejection) -> Self {
        match rejection {
            SampleRejection::NoTouch => Self::NoTouch,
            SampleRejection::MultiTouch => Self::MultiTouch,
        }
    }
}

/// Outcome category for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressLogOutcome {
    Forwarded,
    Ignored(PressIgnoredReason),
}

/// Structured log record for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressLogEntry {
    pub phase: PressPhase,
    pub position: Option<Point>,
    pub state_before: PressState,
    pub state_after: PressState,
    pub outcome: PressLogOutcome,
}

/// Result of one handler call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressDispatch {
    /// Whether the host should call `event.preventDefault()`.
    pub prevent_default: bool,
    pub log: PressLogEntry,
}

impl PressDispatch {
    /// `true` if the signal reached the engine.
    #[must_use]
    pub const fn forwarded(&self) -> bool {
        matches!(self.log.outcome, PressLogOutcome::Forwarded)
    }
}

/// Mouse lifecycle phase of a decoded host event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MousePhase {
    Down,
    Move,
    Up,
    Leave,
}

/// Touch lifecycle phase of a decoded host event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// One decoded host signal, routed by [`LongPressHandlers::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Mouse { phase: MousePhase, input: MouseInput },
    Touch { phase: TouchPhase, input: TouchInput },
    WindowScroll,
}

/// DOM-shaped handler set around one [`LongPressEngine`].
///
/// Handlers take the current host time. The host must also call
/// [`tick`](Self::tick) at or after [`next_deadline`](Self::next_deadline)
/// so that commit, hold and scroll-reset timers fire.
pub struct LongPressHandlers {
    engine: LongPressEngine,
    commands: Vec<ScrollListenerCommand>,
}

impl LongPressHandlers {
    /// Wrap an engine. Queues [`ScrollListenerCommand::Install`].
    #[must_use]
    pub fn new(engine: LongPressEngine) -> Self {
        let commands = if engine.scroll_listener_installed() {
            vec![ScrollListenerCommand::Install]
        } else {
            Vec::new()
        };
        Self { engine, commands }
    }

    #[must_use]
    pub const fn engine(&self) -> &LongPressEngine {
        &self.engine
    }

    /// The observable "is long-pressing" flag.
    #[must_use]
    pub fn is_long_pressing(&self) -> bool {
        self.engine.is_long_pressing()
    }

    /// Take queued scroll-listener commands, oldest first.
    pub fn drain_host_commands(&mut self) -> Vec<ScrollListenerCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.engine.next_deadline()
    }

    /// Fire every timer due at `now`. Returns the number fired.
    pub fn tick(&mut self, now: Instant) -> usize {
        self.engine.tick(now)
    }

    /// Tear down the engine. Queues [`ScrollListenerCommand::Remove`] the
    /// first time; later calls are no-ops.
    pub fn dispose(&mut self) -> usize {
        if !self.engine.scroll_listener_installed() {
            return 0;
        }
        let cleared = self.engine.dispose();
        self.commands.push(ScrollListenerCommand::Remove);
        cleared
    }

    // ------------------------------------------------------------------
    // Mouse
    // ------------------------------------------------------------------

    pub fn pointer_down(&mut self, input: MouseInput, now: Instant) -> PressDispatch {
        let phase = PressPhase::PointerDown;
        if input.button != MouseButton::Left {
            return self.ignored(
                phase,
                Some(input.position),
                PressIgnoredReason::SecondaryButton,
            );
        }
        self.forward(phase, Some(input.position), |engine| {
            engine.start(input.position, now);
            false
        })
    }

    pub fn pointer_move(&mut self, input: MouseInput, now: Instant) -> PressDispatch {
        self.forward(PressPhase::PointerMove, Some(input.position), |engine| {
            engine.move_to(input.position, now);
            false
        })
    }

    pub fn pointer_up(&mut self, input: MouseInput, now: Instant) -> PressDispatch {
        self.forward(PressPhase::PointerUp, Some(input.position), |engine| {
            engine.end(now);
            false
        })
    }

    pub fn pointer_leave(&mut self, input: MouseInput, now: Instant) -> PressDispatch {
        self.forward(PressPhase::PointerLeave, Some(input.position), |engine| {
            engine.cancel(now);
            false
        })
    }

    // ------------------------------------------------------------------
    // Touch
    // ------------------------------------------------------------------

    pub fn touch_start(&mut self, input: &TouchInput, now: Instant) -> PressDispatch {
        let phase = PressPhase::TouchStart;
        match sample_touch(input) {
            Ok(position) => self.forward(phase, Some(position), |engine| {
                engine.start(position, now);
                false
            }),
            Err(rejection) => self.ignored(phase, None, rejection.into()),
        }
    }

    pub fn touch_move(&mut self, input: &TouchInput, now: Instant) -> PressDispatch {
        let phase = PressPhase::TouchMove;
        match sample_touch(input) {
            Ok(position) => self.forward(phase, Some(position), |engine| {
                engine.move_to(position, now);
                false
            }),
            Err(rejection) => self.ignored(phase, None, rejection.into()),
        }
    }

    pub fn touch_end(&mut self, input: &TouchInput, now: Instant) -> PressDispatch {
        self.touch_release(PressPhase::TouchEnd, input, |engine| engine.end(now))
    }

    pub fn touch_cancel(&mut self, input: &TouchInput, now: Instant) -> PressDispatch {
        self.touch_release(PressPhase::TouchCancel, input, |engine| engine.cancel(now))
    }

    // ------------------------------------------------------------------
    // Window
    // ------------------------------------------------------------------

    /// Page-level scroll notification from the installed listener.
    pub fn window_scroll(&mut self, now: Instant) -> PressDispatch {
        self.forward(PressPhase::WindowScroll, None, |engine| {
            engine.global_scroll(now);
            false
        })
    }

    /// Route a decoded host event to its handler.
    pub fn dispatch(&mut self, event: &HostEvent, now: Instant) -> PressDispatch {
        match event {
            HostEvent::Mouse { phase, input } => match phase {
                MousePhase::Down => self.pointer_down(*input, now),
                MousePhase::Move => self.pointer_move(*input, now),
                MousePhase::Up => self.pointer_up(*input, now),
                MousePhase::Leave => self.pointer_leave(*input, now),
            },
            HostEvent::Touch { phase, input } => match phase {
                TouchPhase::Start => self.touch_start(input, now),
                TouchPhase::Move => self.touch_move(input, now),
                TouchPhase::End => self.touch_end(input, now),
                TouchPhase::Cancel => self.touch_cancel(input, now),
            },
            HostEvent::WindowScroll => self.window_scroll(now),
        }
    }
}

// ---------------------------------------------------------------------------
// Internal dispatch
// ---------------------------------------------------------------------------

impl LongPressHandlers {
    /// Touch end/cancel. The lifted finger is already gone from `touches`, so
    /// zero or one remaining touch is a release; more is multi-touch.
    fn touch_release(
        &mut self,
        phase: PressPhase,
        input: &TouchInput,
        release: impl FnOnce(&mut LongPressEngine) -> bool,
    ) -> PressDispatch {
        let position = match input.touches.as_slice() {
            [] => None,
            [only] => Some(only.position),
            _ => return self.ignored(phase, None, PressIgnoredReason::MultiTouch),
        };
        self.forward(phase, position, release)
    }

    /// Run `op` against a live engine. `op` returns the `preventDefault`
    /// decision.
    fn forward(
        &mut self,
        phase: PressPhase,
        position: Option<Point>,
        op: impl FnOnce(&mut LongPressEngine) -> bool,
    ) -> PressDispatch {
        if !self.engine.scroll_listener_installed() {
            return self.ignored(phase, position, PressIgnoredReason::Disposed);
        }
        let state_before = self.engine.state();
        let prevent_default = op(&mut self.engine);
        let log = PressLogEntry {
            phase,
            position,
            state_before,
            state_after: self.engine.state(),
            outcome: PressLogOutcome::Forwarded,
        };
        Self::record(log, prevent_default)
    }

    fn ignored(
        &self,
        phase: PressPhase,
        position: Option<Point>,
        reason: PressIgnoredReason,
    ) -> PressDispatch {
        let state = self.engine.state();
        let reason = if self.engine.scroll_listener_installed() {
            reason
        } else {
            PressIgnoredReason::Disposed
        };
        let log = PressLogEntry {
            phase,
            position,
            state_before: state,
            state_after: state,
            outcome: PressLogOutcome::Ignored(reason),
        };
        Self::record(log, false)
    }

    fn record(log: PressLogEntry, prevent_default: bool) -> PressDispatch {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            phase = ?log.phase,
            from = ?log.state_before,
            to = ?log.state_after,
            outcome = ?log.outcome,
            "press dispatch"
        );
        PressDispatch {
            prevent_default,
            log,
        }
    }
}

impl core::fmt::Debug for LongPressHandlers {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LongPressHandlers")
            .field("engine", &self.engine)
            .field("pending_commands", &self.commands.len())
            .finish()
    }
}

fn sample_touch(input: &TouchInput) -> Result<Point, SampleRejection> {
    sample_position(&PointerInput::Touch(input.clone()))
}
