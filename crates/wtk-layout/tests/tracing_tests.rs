#![forbid(unsafe_code)]

//! Tracing instrumentation tests.
//!
//! Spans and events enabled:
//!   cargo test -p wtk-layout --features tracing --test tracing_tests
//!
//! Zero-overhead verification (no feature):
//!   cargo test -p wtk-layout --test tracing_tests -- zero_overhead

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use wtk_layout::{Alignment, CellData, FlexLayout, Panel, Rect, Size, Sizes};
#[cfg(feature = "tracing")]
use wtk_layout::{Hint, Sizer};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured span with its metadata and parent info.
#[derive(Debug, Clone)]
#[allow(dead_code)]
struct CapturedSpan {
    name: String,
    fields: HashMap<String, String>,
    parent_name: Option<String>,
}

/// A tracing Layer that records spans and event messages.
struct SpanCapture {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    events: Arc<Mutex<Vec<String>>>,
}

/// Handle to read what was captured.
struct CaptureHandle {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    events: Arc<Mutex<Vec<String>>>,
}

impl CaptureHandle {
    fn spans(&self) -> Vec<CapturedSpan> {
        self.spans.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

/// Visitor that extracts span and event fields.
struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0
            .push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for SpanCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);

        let parent_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span_ref| span_ref.name().to_string());

        self.spans.lock().unwrap().push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
            parent_name,
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        if let Some((_, message)) = visitor.0.into_iter().find(|(name, _)| name == "message") {
            self.events.lock().unwrap().push(message);
        }
    }
}

/// Set up a tracing subscriber with capture and run a closure.
fn with_captured_spans<F>(f: F) -> CaptureHandle
where
    F: FnOnce(),
{
    let spans = Arc::new(Mutex::new(Vec::new()));
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = SpanCapture {
        spans: spans.clone(),
        events: events.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    CaptureHandle { spans, events }
}

fn sample_tree() -> Panel {
    let fill = CellData::new().h_grab(true).h_align(Alignment::Fill);
    let mut inner = Panel::new().with_layout(FlexLayout::new().columns(2));
    inner.add(Panel::leaf(Sizes::fixed(Size::new(10.0, 10.0))));
    inner.add(Panel::leaf(Sizes::fixed(Size::new(10.0, 10.0))).with_layout_data(fill));

    let mut root = Panel::new().with_layout(FlexLayout::new().columns(2));
    root.add(Panel::leaf(Sizes::fixed(Size::new(40.0, 20.0))));
    root.add(inner.with_layout_data(fill));
    root
}

// ============================================================================
// Unit Tests
// ============================================================================

#[test]
#[cfg(feature = "tracing")]
fn solve_spans_are_created_for_sizes_and_layout() {
    let handle = with_captured_spans(|| {
        let mut root = sample_tree();
        let _ = root.sizes(Hint::NONE);
        root.set_bounds(Rect::from_size(200.0, 50.0));
        root.layout();
    });

    let spans = handle.spans();
    let solves: Vec<_> = spans.iter().filter(|s| s.name == "flex_solve").collect();
    let ops: Vec<_> = solves.iter().filter_map(|s| s.fields.get("op")).collect();
    assert!(ops.iter().any(|op| *op == "sizes"), "ops: {ops:?}");
    assert!(ops.iter().any(|op| *op == "layout"), "ops: {ops:?}");

    let root_span = solves
        .iter()
        .find(|s| s.parent_name.is_none())
        .expect("a root flex_solve span");
    assert_eq!(root_span.fields.get("columns").map(String::as_str), Some("2"));
    assert_eq!(root_span.fields.get("children").map(String::as_str), Some("2"));
}

#[test]
#[cfg(feature = "tracing")]
fn nested_containers_nest_their_spans() {
    let handle = with_captured_spans(|| {
        let _ = sample_tree().sizes(Hint::NONE);
    });

    let spans = handle.spans();
    assert!(
        spans
            .iter()
            .any(|s| s.name == "flex_solve" && s.parent_name.as_deref() == Some("flex_solve")),
        "inner panel should size inside the outer solve: {spans:?}"
    );
}

#[test]
#[cfg(feature = "tracing")]
fn slack_rounds_are_logged() {
    let handle = with_captured_spans(|| {
        let mut root = sample_tree();
        root.set_bounds(Rect::from_size(300.0, 50.0));
        root.layout();
    });

    let events = handle.events();
    assert!(
        events.iter().any(|e| e == "slack round"),
        "expected slack round events, got {events:?}"
    );
}

/// When compiled without `--features tracing`, no solve spans exist.
#[test]
fn zero_overhead_when_disabled() {
    let handle = with_captured_spans(|| {
        let mut root = sample_tree();
        root.set_bounds(Rect::from_size(200.0, 50.0));
        root.layout();
    });

    let spans = handle.spans();
    let solves = spans.iter().filter(|s| s.name == "flex_solve").count();

    #[cfg(not(feature = "tracing"))]
    assert_eq!(solves, 0, "no flex_solve spans without the tracing feature");

    #[cfg(feature = "tracing")]
    assert!(solves > 0, "flex_solve spans expected with the tracing feature");
}
