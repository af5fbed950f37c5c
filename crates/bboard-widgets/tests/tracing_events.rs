#![forbid(unsafe_code)]
#![cfg(feature = "tracing")]

//! Structured tracing emitted by the panel.
//!
//! Verify that:
//! - every reconciliation runs inside a `blackboard.reconcile` span
//! - each committed mutation emits one structured event with its ids
//! - no-op edits emit nothing
//!
//! Run:
//!   cargo test -p bboard-widgets --features tracing --test tracing_events

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

use bboard_core::graph::{NodeGraph, PropertyGraph};
use bboard_core::property::{Property, PropertyKind};
use bboard_widgets::Blackboard;

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    fields: HashMap<String, String>,
    message: Option<String>,
    parent_span_name: Option<String>,
}

#[derive(Debug, Clone)]
struct CapturedSpan {
    name: String,
    fields: HashMap<String, String>,
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
}

struct CaptureHandle {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
}

impl CaptureHandle {
    fn events_named(&self, message: &str) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.message.as_deref() == Some(message))
            .cloned()
            .collect()
    }

    fn spans_named(&self, name: &str) -> Vec<CapturedSpan> {
        self.spans
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.name == name)
            .cloned()
            .collect()
    }
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        self.spans.lock().unwrap().push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let parent_span_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span_ref| span_ref.name().to_string());

        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message: fields.get("message").cloned(),
            fields,
            parent_span_name,
        });
    }
}

fn with_captured_events<F>(f: F) -> CaptureHandle
where
    F: FnOnce(),
{
    let events = Arc::new(Mutex::new(Vec::new()));
    let spans = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: events.clone(),
        spans: spans.clone(),
    };
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(layer);
    tracing::subscriber::with_default(subscriber, f);
    CaptureHandle { events, spans }
}

fn board() -> Blackboard<NodeGraph> {
    let graph = NodeGraph::new().with_properties(
        ["A", "B", "C"]
            .into_iter()
            .map(|n| Property::named(PropertyKind::Float, n)),
    );
    Blackboard::with_history(graph, &Default::default())
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn reconcile_runs_in_span_with_counts() {
    let handle = with_captured_events(|| {
        let mut board = board();
        let c = board.graph().properties()[2].id();
        board.move_property(c, 0);
    });

    let spans = handle.spans_named("blackboard.reconcile");
    assert!(!spans.is_empty());
    let initial = &spans[0];
    assert_eq!(initial.fields.get("added").map(String::as_str), Some("3"));
    assert!(spans.iter().any(|s| s.fields.get("moved").map(String::as_str) == Some("true")));

    let done = handle.events_named("blackboard.reconcile.done");
    assert!(
        done.iter()
            .all(|e| e.parent_span_name.as_deref() == Some("blackboard.reconcile"))
    );
    assert!(done.iter().any(|e| e.fields.get("reordered").map(String::as_str) == Some("true")));
}

#[test]
fn rename_emits_structured_event() {
    let handle = with_captured_events(|| {
        let mut board = board();
        let a = board.graph().properties()[0].id();
        board.rename_property(a, "B");
    });

    let renames = handle.events_named("blackboard.rename");
    assert_eq!(renames.len(), 1);
    let event = &renames[0];
    assert_eq!(event.level, tracing::Level::DEBUG);
    assert_eq!(event.fields.get("from").map(String::as_str), Some("A"));
    assert_eq!(event.fields.get("to").map(String::as_str), Some("B1"));
    assert!(event.fields.contains_key("id"));
}

#[test]
fn noop_edits_emit_nothing() {
    let handle = with_captured_events(|| {
        let mut board = board();
        let a = board.graph().properties()[0].id();
        board.rename_property(a, " A ");
        board.move_property(a, 0);
        board.edit_path(" / ");
    });

    assert!(handle.events_named("blackboard.rename").is_empty());
    assert!(handle.events_named("blackboard.move").is_empty());
    assert!(handle.events_named("blackboard.path").is_empty());
    assert!(handle.events_named("undo.checkpoint").is_empty());
}

#[test]
fn undo_emits_label() {
    let handle = with_captured_events(|| {
        let mut board = board();
        board.edit_path("Shaders");
        board.undo();
    });

    let undos = handle.events_named("blackboard.undo");
    assert_eq!(undos.len(), 1);
    assert_eq!(undos[0].fields.get("label").map(String::as_str), Some("Edit Path"));
    assert_eq!(handle.events_named("undo.checkpoint").len(), 1);
}
