#![cfg(feature = "input-parser")]
#![forbid(unsafe_code)]

//! Replays JSON-encoded host sessions through the adapter.
//!
//! Run:
//!   cargo test -p lpress-web --features input-parser --test host_session

use std::cell::Cell;
use std::rc::Rc;

use lpress_core::{LongPressEngine, PressState};
use lpress_web::input_parser::{parse_host_event, parse_options};
use lpress_web::{
    LongPressHandlers, PressDispatch, PressIgnoredReason, PressLogOutcome, PressPhase,
    ScrollListenerCommand,
};
use pretty_assertions::assert_eq;
use web_time::{Duration, Instant};

struct Session {
    handlers: LongPressHandlers,
    presses: Rc<Cell<u32>>,
    cancels: Rc<Cell<u32>>,
    t0: Instant,
}

impl Session {
    fn new(options_json: &str) -> Self {
        let config = parse_options(options_json)
            .expect("options should parse")
            .into_config()
            .expect("options should be valid");
        let presses = Rc::new(Cell::new(0));
        let cancels = Rc::new(Cell::new(0));
        let (p, c) = (presses.clone(), cancels.clone());
        let engine = LongPressEngine::new(config, move || p.set(p.get() + 1))
            .expect("validated config")
            .with_on_cancel(move || c.set(c.get() + 1));
        Self {
            handlers: LongPressHandlers::new(engine),
            presses,
            cancels,
            t0: Instant::now(),
        }
    }

    /// Advance timers to `ms` and feed one encoded event.
    fn feed(&mut self, ms: u64, json: &str) -> PressDispatch {
        let now = self.t0 + Duration::from_millis(ms);
        self.handlers.tick(now);
        let event = parse_host_event(json)
            .expect("event should parse")
            .expect("event should map");
        self.handlers.dispatch(&event, now)
    }

    fn advance(&mut self, ms: u64) {
        self.handlers.tick(self.t0 + Duration::from_millis(ms));
    }
}

#[test]
fn touch_hold_then_release_prevents_default() {
    let mut s = Session::new("{}");
    s.feed(0, r#"{"kind":"touch","phase":"start","touches":[{"id":1,"x":100,"y":200}]}"#);
    s.feed(150, r#"{"kind":"touch","phase":"move","touches":[{"id":1,"x":103,"y":210}]}"#);
    s.advance(600);
    assert_eq!(s.presses.get(), 1);
    assert!(s.handlers.is_long_pressing());

    let end = s.feed(900, r#"{"kind":"touch","phase":"end","touches":[]}"#);
    assert!(end.prevent_default);
    assert_eq!(end.log.state_before, PressState::Triggered);
    assert_eq!(end.log.state_after, PressState::Idle);
    assert_eq!(s.cancels.get(), 1);
}

#[test]
fn quick_tap_keeps_default_behavior() {
    let mut s = Session::new("{}");
    s.feed(0, r#"{"kind":"touch","phase":"start","touches":[{"id":1,"x":10,"y":10}]}"#);
    let end = s.feed(120, r#"{"kind":"touch","phase":"end"}"#);
    assert!(!end.prevent_default);
    s.advance(2_000);
    assert_eq!(s.presses.get(), 0);
    assert_eq!(s.handlers.next_deadline(), None);
}

#[test]
fn page_scroll_blocks_next_press_until_settled() {
    let mut s = Session::new(r#"{"scrollResetDelayMs":150}"#);
    s.feed(0, r#"{"kind":"scroll"}"#);
    s.feed(50, r#"{"kind":"scroll"}"#);

    let blocked = s.feed(120, r#"{"kind":"mouse","phase":"down","x":5,"y":5,"button":0}"#);
    assert_eq!(blocked.log.outcome, PressLogOutcome::Forwarded);
    assert_eq!(blocked.log.state_after, PressState::Idle);

    let accepted = s.feed(210, r#"{"kind":"mouse","phase":"down","x":5,"y":5,"button":0}"#);
    assert_eq!(accepted.log.state_after, PressState::Pending);
}

#[test]
fn vertical_drift_within_tolerance_still_fires() {
    let mut s = Session::new("{}");
    s.feed(0, r#"{"kind":"mouse","phase":"down","x":0,"y":0}"#);
    s.feed(200, r#"{"kind":"mouse","phase":"move","x":0,"y":15}"#);
    s.feed(400, r#"{"kind":"mouse","phase":"move","x":0,"y":30}"#);
    s.advance(600);
    assert_eq!(s.presses.get(), 1);

    let up = s.feed(650, r#"{"kind":"mouse","phase":"up","x":0,"y":30}"#);
    assert!(!up.prevent_default);
}

#[test]
fn horizontal_drag_cancels() {
    let mut s = Session::new(r#"{"movementThresholdPx":10}"#);
    s.feed(0, r#"{"kind":"mouse","phase":"down","x":0,"y":0}"#);
    let moved = s.feed(300, r#"{"kind":"mouse","phase":"move","x":11,"y":0}"#);
    assert_eq!(moved.log.state_after, PressState::Cancelled);
    s.advance(1_000);
    assert_eq!(s.presses.get(), 0);
}

#[test]
fn two_finger_events_are_logged_and_ignored() {
    let mut s = Session::new("{}");
    s.feed(0, r#"{"kind":"touch","phase":"start","touches":[{"id":1,"x":0,"y":0}]}"#);
    let pinch = s.feed(
        200,
        r#"{"kind":"touch","phase":"move","touches":[{"id":1,"x":0,"y":0},{"id":2,"x":90,"y":90}]}"#,
    );
    assert_eq!(pinch.log.phase, PressPhase::TouchMove);
    assert_eq!(
        pinch.log.outcome,
        PressLogOutcome::Ignored(PressIgnoredReason::MultiTouch)
    );
    assert_eq!(pinch.log.state_after, PressState::Armed);
    s.advance(600);
    assert_eq!(s.presses.get(), 1);
}

#[test]
fn right_click_is_ignored() {
    let mut s = Session::new("{}");
    let down = s.feed(0, r#"{"kind":"mouse","phase":"down","x":0,"y":0,"button":2}"#);
    assert_eq!(
        down.log.outcome,
        PressLogOutcome::Ignored(PressIgnoredReason::SecondaryButton)
    );
    s.advance(1_000);
    assert_eq!(s.presses.get(), 0);
}

#[test]
fn listener_lifecycle_across_dispose() {
    let mut s = Session::new("{}");
    s.feed(0, r#"{"kind":"touch","phase":"start","touches":[{"id":1,"x":0,"y":0}]}"#);
    s.feed(10, r#"{"kind":"scroll"}"#);
    s.handlers.dispose();
    s.handlers.dispose();

    assert_eq!(
        s.handlers.drain_host_commands(),
        vec![ScrollListenerCommand::Install, ScrollListenerCommand::Remove]
    );
    assert_eq!(s.handlers.engine().live_timer_count(), 0);

    let late = s.feed(20, r#"{"kind":"scroll"}"#);
    assert_eq!(
        late.log.outcome,
        PressLogOutcome::Ignored(PressIgnoredReason::Disposed)
    );
}
