use std::cell::RefCell;
use std::rc::Rc;

use scrolly::ScrollyError;
use scrolly::api::{StoryContext, VisibilityChange, VisibilityRouter};
use scrolly::core::{StageStore, StageTarget, TriggerValue};
use scrolly::error::ScrollyResult;
use scrolly::extensions::Visualization;
use scrolly::render::{MemoryPanel, PanelState, PanelSurface};

const IDS: [&str; 4] = ["map", "bubble-chart", "bar-chart", "stream-graph"];

struct NoopChart;

impl Visualization for NoopChart {
    fn update(&mut self, _value: Option<TriggerValue>) -> ScrollyResult<()> {
        Ok(())
    }
}

type SharedPanel = Rc<RefCell<MemoryPanel>>;

fn context_with_panels() -> (StoryContext, Vec<(&'static str, SharedPanel)>) {
    let mut context = StoryContext::new(StageStore::default());
    let mut panels = Vec::new();
    for id in IDS {
        let panel = Rc::new(RefCell::new(MemoryPanel::default()));
        context
            .register(id, NoopChart, panel.clone())
            .expect("register");
        panels.push((id, panel));
    }
    (context, panels)
}

fn visible(panels: &[(&'static str, SharedPanel)]) -> Vec<&'static str> {
    panels
        .iter()
        .filter(|(_, panel)| panel.state().is_visible())
        .map(|(id, _)| *id)
        .collect()
}

fn show(id: &str) -> StageTarget {
    StageTarget::Show(id.to_owned())
}

#[test]
fn show_only_switches_exclusively() {
    let (mut context, panels) = context_with_panels();

    let change = VisibilityRouter::show_only(&mut context, &show("map")).expect("route map");
    assert_eq!(
        change,
        VisibilityChange::Switched {
            from: None,
            to: "map".to_owned()
        }
    );
    assert_eq!(visible(&panels), vec!["map"]);

    VisibilityRouter::show_only(&mut context, &show("stream-graph")).expect("route stream");
    assert_eq!(visible(&panels), vec!["stream-graph"]);
    assert_eq!(context.state().current_visualization(), Some("stream-graph"));
}

#[test]
fn repeated_target_performs_no_panel_writes() {
    let (mut context, panels) = context_with_panels();
    VisibilityRouter::show_only(&mut context, &show("bar-chart")).expect("route");
    let writes: Vec<usize> = panels
        .iter()
        .map(|(_, panel)| panel.borrow().mutation_count)
        .collect();

    let change = VisibilityRouter::show_only(&mut context, &show("bar-chart")).expect("route again");
    assert_eq!(change, VisibilityChange::Unchanged);
    let after: Vec<usize> = panels
        .iter()
        .map(|(_, panel)| panel.borrow().mutation_count)
        .collect();
    assert_eq!(writes, after);
}

#[test]
fn unknown_target_keeps_current_panel() {
    let (mut context, panels) = context_with_panels();
    VisibilityRouter::show_only(&mut context, &show("map")).expect("route");

    let err = VisibilityRouter::show_only(&mut context, &show("nonexistent"))
        .expect_err("unknown id must fail");
    assert!(matches!(err, ScrollyError::UnknownVisualization(id) if id == "nonexistent"));
    assert_eq!(context.state().current_visualization(), Some("map"));
    assert_eq!(visible(&panels), vec!["map"]);
}

#[test]
fn hide_all_clears_every_panel() {
    let (mut context, panels) = context_with_panels();
    // A host may have left several panels visible before routing starts.
    panels[0].1.borrow_mut().set_state(PanelState::Visible);
    panels[2].1.borrow_mut().set_state(PanelState::Visible);

    let change = VisibilityRouter::show_only(&mut context, &StageTarget::HideAll).expect("hide all");
    assert_eq!(change, VisibilityChange::Cleared);
    assert!(visible(&panels).is_empty());
    assert_eq!(context.state().current_visualization(), None);
}

#[test]
fn keep_target_leaves_visibility_alone() {
    let (mut context, panels) = context_with_panels();
    VisibilityRouter::show_only(&mut context, &show("bubble-chart")).expect("route");
    let change = VisibilityRouter::show_only(&mut context, &StageTarget::Keep).expect("keep");
    assert_eq!(change, VisibilityChange::Unchanged);
    assert_eq!(visible(&panels), vec!["bubble-chart"]);
}

#[test]
fn panel_class_names_match_container_tags() {
    assert_eq!(PanelState::Hidden.class_name(), "hidden");
    assert_eq!(PanelState::Visible.class_name(), "visible");
}
