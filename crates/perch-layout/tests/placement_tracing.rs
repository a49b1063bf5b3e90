#![cfg(feature = "tracing")]

//! Structured log events emitted by `place`.

use std::sync::{Arc, Mutex};

use perch_core::geometry::{Rect, Viewport};
use perch_harness::MockHost;
use perch_layout::{PlacementOptions, PlacementTrigger, place};
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

#[derive(Debug, Default, Clone, PartialEq)]
struct Captured {
    message: String,
    reason: Option<String>,
    trigger: Option<String>,
    top: Option<f64>,
}

#[derive(Default)]
struct CapturedVisitor(Captured);

impl tracing::field::Visit for CapturedVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        match field.name() {
            "message" => self.0.message = value.to_owned(),
            "reason" => self.0.reason = Some(value.to_owned()),
            "trigger" => self.0.trigger = Some(value.to_owned()),
            _ => {}
        }
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        if field.name() == "top" {
            self.0.top = Some(value);
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" && self.0.message.is_empty() {
            self.0.message = format!("{value:?}").trim_matches('"').to_owned();
        }
    }
}

struct PlacementCapture {
    events: Arc<Mutex<Vec<Captured>>>,
}

impl<S> Layer<S> for PlacementCapture
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = CapturedVisitor::default();
        event.record(&mut visitor);
        if visitor.0.message.starts_with("popover.") {
            self.events.lock().expect("capture lock").push(visitor.0);
        }
    }
}

fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<Captured>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(PlacementCapture {
        events: Arc::clone(&events),
    });
    let result = {
        let _guard = tracing::subscriber::set_default(subscriber);
        tracing::callsite::rebuild_interest_cache();
        f()
    };
    let events = events.lock().expect("capture lock").clone();
    (result, events)
}

#[test]
fn place_event_carries_trigger_and_position() {
    let host: MockHost<()> = MockHost::new(Viewport::new(1024.0, 768.0));
    let anchor = host.create_element(Rect::new(100.0, 200.0, 50.0, 20.0));
    let target = host.create_element(Rect::new(0.0, 0.0, 80.0, 40.0));

    let (outcome, events) = capture(|| {
        place(
            &host,
            anchor,
            target,
            &PlacementOptions::default(),
            PlacementTrigger::Mount,
        )
    });
    assert!(outcome.is_some());
    let placed = events
        .iter()
        .find(|e| e.message == "popover.place")
        .expect("popover.place emitted");
    assert_eq!(placed.trigger.as_deref(), Some("mount"));
    assert_eq!(placed.top, Some(220.0));
}

#[test]
fn off_screen_event_only_on_scroll() {
    let host: MockHost<()> = MockHost::new(Viewport::new(1024.0, 768.0));
    let anchor = host.create_element(Rect::new(100.0, -10.0, 50.0, 20.0));
    let target = host.create_element(Rect::new(0.0, 0.0, 80.0, 40.0));
    let options = PlacementOptions::default();

    let (_, events) = capture(|| place(&host, anchor, target, &options, PlacementTrigger::Update));
    assert!(events.iter().all(|e| e.message != "popover.off_screen"));

    let (_, events) = capture(|| place(&host, anchor, target, &options, PlacementTrigger::Scroll));
    assert_eq!(
        events
            .iter()
            .filter(|e| e.message == "popover.off_screen")
            .count(),
        1
    );
}

#[test]
fn skipped_pass_names_the_reason() {
    let host: MockHost<()> = MockHost::new(Viewport::new(1024.0, 768.0));
    let anchor = host.create_element(Rect::new(100.0, 200.0, 50.0, 20.0));
    let target = host.create_element(Rect::new(0.0, 0.0, 80.0, 40.0));
    host.detach_element(target);

    let (outcome, events) = capture(|| {
        place(
            &host,
            anchor,
            target,
            &PlacementOptions::default(),
            PlacementTrigger::Update,
        )
    });
    assert!(outcome.is_none());
    let skipped: Vec<_> = events
        .iter()
        .filter(|e| e.message == "popover.placement_skipped")
        .collect();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].reason.as_deref(), Some("target_unmeasurable"));
}
