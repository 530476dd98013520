//! Log events emitted on `sqlfill.render` and `sqlfill.fill`.
#![cfg(feature = "tracing")]

use serde_json::json;
use sqlfill::{FillError, RenderConfig, Renderer, Unit, limit, psql, where_};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

#[derive(Debug, Clone)]
struct Recorded {
    target: String,
    level: Level,
    fields: BTreeMap<String, String>,
}

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<Recorded>>>);

impl<S: Subscriber> Layer<S> for Recorder {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = Fields::default();
        event.record(&mut fields);
        self.0.lock().unwrap().push(Recorded {
            target: event.metadata().target().to_string(),
            level: *event.metadata().level(),
            fields: fields.0,
        });
    }
}

#[derive(Default)]
struct Fields(BTreeMap<String, String>);

impl Visit for Fields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }
}

fn capture<T>(f: impl FnOnce() -> T) -> (T, Vec<Recorded>) {
    let recorder = Recorder::default();
    let subscriber = Registry::default().with(recorder.clone());
    let out = tracing::subscriber::with_default(subscriber, f);
    let events = recorder.0.lock().unwrap().clone();
    (out, events)
}

fn on_target<'a>(events: &'a [Recorded], target: &str) -> Vec<&'a Recorded> {
    events.iter().filter(|e| e.target == target).collect()
}

fn where_name_age() -> sqlfill::Filler {
    where_([Unit::pair("name =", "x"), Unit::pair("age >", 3)]).unwrap()
}

#[test]
fn render_emits_one_debug_event_with_truncated_sql() {
    let filler = where_name_age();
    let renderer = Renderer::new(RenderConfig::new().with_max_sql_length(10));

    let (rendered, events) = capture(|| renderer.render_filler(&filler));
    assert_eq!(rendered.sql, "WHERE ( name = $1 AND age > $2 )");

    let render_events = on_target(&events, "sqlfill.render");
    assert_eq!(render_events.len(), 1);
    let event = render_events[0];
    assert_eq!(event.level, Level::DEBUG);
    assert_eq!(event.fields["style"], "positional");
    assert_eq!(event.fields["param_count"], "2");
    assert_eq!(event.fields["sql"], "WHERE ( na...");
}

#[test]
fn render_without_truncation_logs_full_sql() {
    let filler = where_name_age();
    let renderer = Renderer::new(RenderConfig::new().no_truncate());

    let (rendered, events) = capture(|| renderer.render_filler(&filler));

    let render_events = on_target(&events, "sqlfill.render");
    assert_eq!(render_events.len(), 1);
    assert_eq!(render_events[0].fields["sql"], rendered.sql);
}

#[test]
fn disabled_trace_emits_nothing() {
    let filler = where_name_age();
    let renderer = Renderer::new(RenderConfig::new().disable_trace());

    let (_, events) = capture(|| renderer.render(&["SELECT 1 ", ""], &[filler]).unwrap());
    assert!(on_target(&events, "sqlfill.render").is_empty());
}

#[test]
fn construction_errors_warn_on_fill_target() {
    let (results, events) = capture(|| {
        vec![
            where_(Vec::<Unit>::new()).map(|_| ()),
            Unit::try_from(json!(42)).map(|_| ()),
            Unit::try_from(json!({"a; DROP": 1})).map(|_| ()),
            psql(&["only"], &[limit(1i64)]).map(|_| ()),
        ]
    });
    assert!(results.iter().all(Result::is_err));
    assert_eq!(results[0], Err(FillError::EmptyWhere));

    let warnings = on_target(&events, "sqlfill.fill");
    assert_eq!(warnings.len(), 4);
    assert!(warnings.iter().all(|e| e.level == Level::WARN));
    assert_eq!(warnings[0].fields["error"], FillError::EmptyWhere.to_string());
}

#[test]
fn successful_construction_is_silent() {
    let (_, events) = capture(|| {
        where_([Unit::pair("id =", 1)]).unwrap();
        Unit::try_from(json!(["id =", 1])).unwrap();
    });
    assert!(on_target(&events, "sqlfill.fill").is_empty());
}
