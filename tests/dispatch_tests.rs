use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use scrolly::ScrollyError;
use scrolly::api::{
    ChartUpdate, DispatchCore, DispatchOutcome, DispatchPhase, StoryContext, VisibilityChange,
};
use scrolly::core::{StageDescriptor, StageStore, TriggerPolicy, TriggerValue};
use scrolly::error::ScrollyResult;
use scrolly::extensions::Visualization;
use scrolly::interaction::EntryEvent;
use scrolly::render::{MemoryPanel, PanelSurface};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

type UpdateLog = Rc<RefCell<Vec<(String, Option<TriggerValue>)>>>;
type SharedPanel = Rc<RefCell<MemoryPanel>>;

#[derive(Clone)]
struct RecordingChart {
    id: String,
    log: UpdateLog,
}

impl Visualization for RecordingChart {
    fn update(&mut self, value: Option<TriggerValue>) -> ScrollyResult<()> {
        self.log.borrow_mut().push((self.id.clone(), value));
        Ok(())
    }
}

struct FailingChart;

impl Visualization for FailingChart {
    fn update(&mut self, _value: Option<TriggerValue>) -> ScrollyResult<()> {
        Err(ScrollyError::ChartFailure("no rows for selection".to_owned()))
    }
}

/// Counts `WARN` events emitted while it is the active subscriber.
#[derive(Clone, Default)]
struct WarnCounter(Arc<AtomicUsize>);

impl WarnCounter {
    fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

struct PanickingChart;

impl Visualization for PanickingChart {
    fn update(&mut self, _value: Option<TriggerValue>) -> ScrollyResult<()> {
        panic!("layout exploded");
    }
}

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, month, day).expect("valid date")
}

fn enter(stage_index: usize) -> EntryEvent {
    EntryEvent { stage_index }
}

fn story(descriptors: Vec<StageDescriptor>) -> StoryContext {
    StoryContext::new(
        StageStore::from_descriptors(descriptors, &TriggerPolicy::default()).expect("stages"),
    )
}

fn register_recording(
    context: &mut StoryContext,
    ids: &[&str],
    log: &UpdateLog,
) -> Vec<(String, SharedPanel)> {
    ids.iter()
        .map(|id| {
            let panel = Rc::new(RefCell::new(MemoryPanel::default()));
            let chart = RecordingChart {
                id: (*id).to_owned(),
                log: log.clone(),
            };
            context.register(*id, chart, panel.clone()).expect("register");
            ((*id).to_owned(), panel)
        })
        .collect()
}

#[test]
fn bar_chart_scenario_updates_without_panel_churn() {
    let mut context = story(vec![
        StageDescriptor::new(Some("bar-chart")).with_step(1),
        StageDescriptor::new(Some("bar-chart")).with_step(2),
        StageDescriptor::new(Some("")),
    ]);
    let log = UpdateLog::default();
    let panels = register_recording(&mut context, &["map", "bar-chart"], &log);
    let bar_panel = &panels[1].1;

    DispatchCore::on_enter(&mut context, enter(0));
    assert!(bar_panel.state().is_visible());
    assert_eq!(context.state().current_visualization(), Some("bar-chart"));
    let writes_after_first = bar_panel.borrow().mutation_count;

    let outcome = DispatchCore::on_enter(&mut context, enter(1));
    assert_eq!(
        outcome,
        DispatchOutcome::Committed {
            stage_index: 1,
            visibility: Some(VisibilityChange::Unchanged),
            update: ChartUpdate::Applied {
                visualization: "bar-chart".to_owned()
            },
        }
    );
    assert!(bar_panel.state().is_visible());
    assert_eq!(bar_panel.borrow().mutation_count, writes_after_first);

    DispatchCore::on_enter(&mut context, enter(2));
    assert!(panels.iter().all(|(_, panel)| !panel.state().is_visible()));
    assert_eq!(context.state().current_visualization(), None);

    assert_eq!(
        *log.borrow(),
        vec![
            ("bar-chart".to_owned(), Some(TriggerValue::Step(1))),
            ("bar-chart".to_owned(), Some(TriggerValue::Step(2))),
        ]
    );
}

#[test]
fn out_of_order_events_resolve_last_write_wins() {
    let descriptors = (1..=6)
        .map(|day| StageDescriptor::new(Some("map")).with_date(date(3, day)))
        .collect();
    let mut context = story(descriptors);
    let log = UpdateLog::default();
    register_recording(&mut context, &["map"], &log);

    for index in [3, 1, 5] {
        DispatchCore::on_enter(&mut context, enter(index));
    }

    assert_eq!(
        context.state().current_trigger_value(),
        Some(TriggerValue::Date(date(3, 6)))
    );
    assert_eq!(context.state().as_of_date(), Some(date(3, 6)));
    assert_eq!(context.state().phase(), DispatchPhase::Active(5));
    assert_eq!(log.borrow().len(), 3);
}

#[test]
fn unknown_target_skips_update_and_keeps_panel() {
    let mut context = story(vec![
        StageDescriptor::new(Some("map")).with_date(date(1, 1)),
        StageDescriptor::new(Some("nonexistent")).with_date(date(2, 1)),
    ]);
    let log = UpdateLog::default();
    register_recording(&mut context, &["map"], &log);

    DispatchCore::on_enter(&mut context, enter(0));
    let warnings = WarnCounter::default();
    let subscriber = tracing_subscriber::registry().with(warnings.clone());
    let outcome = tracing::subscriber::with_default(subscriber, || {
        DispatchCore::on_enter(&mut context, enter(1))
    });

    assert_eq!(warnings.count(), 1);
    assert_eq!(
        outcome,
        DispatchOutcome::Committed {
            stage_index: 1,
            visibility: None,
            update: ChartUpdate::Skipped,
        }
    );
    assert_eq!(context.state().current_visualization(), Some("map"));
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn out_of_range_event_is_ignored() {
    let mut context = story(vec![StageDescriptor::new(Some("map")).with_date(date(1, 1))]);
    let log = UpdateLog::default();
    register_recording(&mut context, &["map"], &log);
    DispatchCore::on_enter(&mut context, enter(0));

    let outcome = DispatchCore::on_enter(&mut context, enter(7));
    assert_eq!(outcome, DispatchOutcome::Ignored { stage_index: 7 });
    assert_eq!(context.state().phase(), DispatchPhase::Active(0));
    assert_eq!(context.state().committed_events(), 1);
}

#[test]
fn null_trigger_is_forwarded_to_chart() {
    let mut context = story(vec![StageDescriptor::new(Some("stream-graph"))]);
    let log = UpdateLog::default();
    register_recording(&mut context, &["stream-graph"], &log);

    DispatchCore::on_enter(&mut context, enter(0));
    assert_eq!(*log.borrow(), vec![("stream-graph".to_owned(), None)]);
}

#[test]
fn keep_stage_only_moves_narrative_position() {
    let mut context = story(vec![
        StageDescriptor::new(Some("bar-chart")).with_step(3),
        StageDescriptor::new(None),
    ]);
    let log = UpdateLog::default();
    let panels = register_recording(&mut context, &["bar-chart"], &log);

    DispatchCore::on_enter(&mut context, enter(0));
    let outcome = DispatchCore::on_enter(&mut context, enter(1));

    assert_eq!(
        outcome,
        DispatchOutcome::Committed {
            stage_index: 1,
            visibility: Some(VisibilityChange::Unchanged),
            update: ChartUpdate::Skipped,
        }
    );
    assert!(panels[0].1.state().is_visible());
    assert_eq!(context.state().current_visualization(), Some("bar-chart"));
    assert_eq!(context.state().current_trigger_value(), None);
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn chart_failures_do_not_stop_dispatch() {
    let mut context = story(vec![
        StageDescriptor::new(Some("bubble-chart")).with_date(date(1, 1)),
        StageDescriptor::new(Some("stream-graph")).with_step(1),
        StageDescriptor::new(Some("map")).with_date(date(2, 1)),
    ]);
    context
        .register("bubble-chart", FailingChart, MemoryPanel::default())
        .expect("register");
    context
        .register("stream-graph", PanickingChart, MemoryPanel::default())
        .expect("register");
    let log = UpdateLog::default();
    register_recording(&mut context, &["map"], &log);

    let failed = DispatchCore::on_enter(&mut context, enter(0));
    assert!(matches!(
        failed,
        DispatchOutcome::Committed {
            update: ChartUpdate::Failed { ref visualization, .. },
            ..
        } if visualization == "bubble-chart"
    ));

    let panicked = DispatchCore::on_enter(&mut context, enter(1));
    assert!(matches!(
        panicked,
        DispatchOutcome::Committed {
            update: ChartUpdate::Failed { ref reason, .. },
            ..
        } if reason.contains("layout exploded")
    ));

    DispatchCore::on_enter(&mut context, enter(2));
    assert_eq!(context.state().current_visualization(), Some("map"));
    assert_eq!(
        *log.borrow(),
        vec![("map".to_owned(), Some(TriggerValue::Date(date(2, 1))))]
    );
}

#[test]
fn prime_shows_chart_without_marking_stage_active() {
    let mut context = story(vec![StageDescriptor::new(Some("map")).with_date(date(1, 22))]);
    let log = UpdateLog::default();
    let panels = register_recording(&mut context, &["map"], &log);

    DispatchCore::prime(&mut context, 0);
    assert!(panels[0].1.state().is_visible());
    assert_eq!(context.state().phase(), DispatchPhase::Idle);
    assert_eq!(log.borrow().len(), 1);
}
