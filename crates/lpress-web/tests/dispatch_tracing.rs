#![cfg(feature = "tracing")]
#![forbid(unsafe_code)]

//! Dispatch trace events emitted by the adapter.
//!
//! Run:
//!   cargo test -p lpress-web --features tracing --test dispatch_tracing

use std::sync::{Arc, Mutex};

use lpress_core::event::{TouchInput, TouchPoint};
use lpress_core::{LongPressConfig, LongPressEngine};
use lpress_web::LongPressHandlers;
use tracing_subscriber::layer::SubscriberExt;
use web_time::Instant;

struct DispatchCapture {
    phases: Arc<Mutex<Vec<String>>>,
}

struct PhaseVisitor {
    is_dispatch: bool,
    phase: Option<String>,
}

impl tracing::field::Visit for PhaseVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "message" => self.is_dispatch = format!("{value:?}") == "press dispatch",
            "phase" => self.phase = Some(format!("{value:?}")),
            _ => {}
        }
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for DispatchCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = PhaseVisitor {
            is_dispatch: false,
            phase: None,
        };
        event.record(&mut visitor);
        if visitor.is_dispatch
            && let Some(phase) = visitor.phase
        {
            self.phases.lock().unwrap().push(phase);
        }
    }
}

#[test]
fn every_dispatch_is_traced_including_ignored() {
    let phases = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(DispatchCapture {
        phases: phases.clone(),
    });

    tracing::subscriber::with_default(subscriber, || {
        let engine = LongPressEngine::new(LongPressConfig::default(), || {}).unwrap();
        let mut handlers = LongPressHandlers::new(engine);
        let now = Instant::now();
        let one = TouchInput {
            touches: [TouchPoint::new(1, 0.0, 0.0)].into_iter().collect(),
        };
        let two = TouchInput {
            touches: [TouchPoint::new(1, 0.0, 0.0), TouchPoint::new(2, 5.0, 5.0)]
                .into_iter()
                .collect(),
        };
        handlers.touch_start(&one, now);
        handlers.touch_move(&two, now);
        handlers.touch_end(&TouchInput::default(), now);
        handlers.window_scroll(now);
    });

    assert_eq!(
        *phases.lock().unwrap(),
        vec!["TouchStart", "TouchMove", "TouchEnd", "WindowScroll"]
    );
}
