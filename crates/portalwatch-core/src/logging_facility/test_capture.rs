//! In-memory log capture for tests
//!
//! Installs a global subscriber whose only layer records every event, so
//! tests can assert that a failure was logged with the right fields.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One recorded event; every field value is kept as text
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Default)]
struct FieldText(HashMap<String, String>);

impl Visit for FieldText {
    // Integers and bools arrive here too; their Debug form is plain text
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

type EventLog = Arc<Mutex<Vec<CapturedEvent>>>;

struct CaptureLayer {
    events: EventLog,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut text = FieldText::default();
        event.record(&mut text);
        let fields = text.0;

        let captured = CapturedEvent {
            level: *event.metadata().level(),
            op: fields.get("op").cloned(),
            event: fields.get("event").cloned(),
            fields,
        };
        if let Ok(mut events) = self.events.lock() {
            events.push(captured);
        }
    }
}

/// Shared handle on everything captured so far
#[derive(Clone)]
pub struct TestCapture {
    events: EventLog,
}

impl TestCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }

    /// # Panics
    ///
    /// Panics if no captured event has this `op` and `event`
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let matching = self.count_events(|e| {
            e.op.as_deref() == Some(op) && e.event.as_deref() == Some(event)
        });
        assert!(
            matching > 0,
            "no captured event with op={} event={}",
            op,
            event
        );
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture subscriber on first use and return the shared handle
///
/// All tests in a process share one capture, so assertions should filter on
/// an `op` name or field value unique to the test.
///
/// ```
/// use portalwatch_core::logging_facility::test_capture::init_test_capture;
/// use portalwatch_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_capture_op");
/// capture.assert_event_exists("doc_capture_op", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let events = EventLog::default();
            let layer = CaptureLayer {
                events: Arc::clone(&events),
            };
            let _ = tracing_subscriber::registry().with(layer).try_init();
            TestCapture { events }
        })
        .clone()
}
