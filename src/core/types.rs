use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Highest ordinal step any stage may carry.
pub const MAX_STEP: u8 = 5;

/// Value forwarded to a chart's update call to select what it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TriggerValue {
    Date(NaiveDate),
    Step(u8),
}

impl TriggerValue {
    #[must_use]
    pub fn kind(self) -> TriggerKind {
        match self {
            Self::Date(_) => TriggerKind::Date,
            Self::Step(_) => TriggerKind::Step,
        }
    }

    #[must_use]
    pub fn as_date(self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(date),
            Self::Step(_) => None,
        }
    }

    #[must_use]
    pub fn as_step(self) -> Option<u8> {
        match self {
            Self::Step(step) => Some(step),
            Self::Date(_) => None,
        }
    }
}

impl fmt::Display for TriggerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Step(step) => write!(f, "step {step}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerKind {
    Date,
    Step,
}

/// Where a stage sends the reader's attention.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageTarget {
    /// Show the registered visualization with this id.
    Show(String),
    /// Empty sentinel: hide every panel.
    HideAll,
    /// No visualization key at all: visibility and charts stay as they are.
    Keep,
}

impl StageTarget {
    /// Maps the raw `visualization` field of a stage descriptor.
    #[must_use]
    pub fn from_descriptor(visualization: Option<&str>) -> Self {
        match visualization {
            None => Self::Keep,
            Some("") => Self::HideAll,
            Some(id) => Self::Show(id.to_owned()),
        }
    }

    #[must_use]
    pub fn visualization_id(&self) -> Option<&str> {
        match self {
            Self::Show(id) => Some(id),
            Self::HideAll | Self::Keep => None,
        }
    }
}

/// One scroll-triggered beat of the story.
///
/// Fields are private so a stage cannot change once it is handed to a
/// [`StageStore`](super::StageStore).
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeStage {
    index: usize,
    trigger_value: Option<TriggerValue>,
    target: StageTarget,
    title: String,
    narrative: String,
}

impl NarrativeStage {
    #[must_use]
    pub fn new(index: usize, trigger_value: Option<TriggerValue>, target: StageTarget) -> Self {
        Self {
            index,
            trigger_value,
            target,
            title: String::new(),
            narrative: String::new(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_narrative(mut self, narrative: impl Into<String>) -> Self {
        self.narrative = narrative.into();
        self
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn trigger_value(&self) -> Option<TriggerValue> {
        self.trigger_value
    }

    #[must_use]
    pub fn target(&self) -> &StageTarget {
        &self.target
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn narrative(&self) -> &str {
        &self.narrative
    }
}
