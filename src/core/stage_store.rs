use chrono::{DateTime, NaiveDate};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::{MAX_STEP, NarrativeStage, StageTarget, TriggerKind, TriggerValue};
use crate::error::{ScrollyError, ScrollyResult};

/// Decides which descriptor field becomes a stage's trigger value.
///
/// Step-driven visualizations receive the ordinal `step`; every other
/// target (including the hide-all and keep sentinels) receives the `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerPolicy {
    step_driven: IndexSet<String>,
}

impl Default for TriggerPolicy {
    fn default() -> Self {
        Self::new(["stream-graph", "bar-chart"])
    }
}

impl TriggerPolicy {
    #[must_use]
    pub fn new<I, S>(step_driven: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            step_driven: step_driven.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn is_step_driven(&self, visualization_id: &str) -> bool {
        self.step_driven.contains(visualization_id)
    }

    #[must_use]
    pub fn kind_for(&self, target: &StageTarget) -> TriggerKind {
        match target.visualization_id() {
            Some(id) if self.is_step_driven(id) => TriggerKind::Step,
            _ => TriggerKind::Date,
        }
    }
}

/// Raw stage record as supplied by the narrative data.
///
/// `visualization` distinguishes a missing key (`None`) from the empty
/// hide-all sentinel (`Some("")`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDescriptor {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub step: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub narrative: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visualization: Option<String>,
}

impl StageDescriptor {
    #[must_use]
    pub fn new(visualization: Option<&str>) -> Self {
        Self {
            visualization: visualization.map(str::to_owned),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date.format("%Y-%m-%d").to_string());
        self
    }

    #[must_use]
    pub fn with_step(mut self, step: u8) -> Self {
        self.step = Some(i64::from(step));
        self
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

    /// Validates the descriptor and resolves it into an immutable stage.
    pub fn into_stage(self, index: usize, policy: &TriggerPolicy) -> ScrollyResult<NarrativeStage> {
        let date = match self.date.as_deref() {
            Some(raw) => Some(parse_stage_date(raw).ok_or_else(|| ScrollyError::InvalidStage {
                index,
                reason: format!("unrecognized date `{raw}`"),
            })?),
            None => None,
        };

        let step = match self.step {
            Some(raw) => {
                let step = u8::try_from(raw)
                    .ok()
                    .filter(|step| (1..=MAX_STEP).contains(step))
                    .ok_or_else(|| ScrollyError::InvalidStage {
                        index,
                        reason: format!("step must be between 1 and {MAX_STEP}, got {raw}"),
                    })?;
                Some(step)
            }
            None => None,
        };

        let target = StageTarget::from_descriptor(self.visualization.as_deref());
        let trigger_value = match policy.kind_for(&target) {
            TriggerKind::Step => step.map(TriggerValue::Step),
            TriggerKind::Date => date.map(TriggerValue::Date),
        };

        Ok(NarrativeStage::new(index, trigger_value, target)
            .with_title(self.title)
            .with_narrative(self.narrative))
    }
}

/// Accepts ISO dates, the `MM-DD-YYYY` reporting format and RFC 3339 timestamps.
fn parse_stage_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%m-%d-%Y"))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}

/// Ordered, immutable sequence of narrative stages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageStore {
    stages: Vec<NarrativeStage>,
}

impl StageStore {
    /// Builds a store from already-resolved stages.
    ///
    /// Each stage's `index` must equal its position in the sequence.
    pub fn new(stages: Vec<NarrativeStage>) -> ScrollyResult<Self> {
        if let Some((position, stage)) = stages
            .iter()
            .enumerate()
            .find(|(position, stage)| stage.index() != *position)
        {
            return Err(ScrollyError::InvalidStage {
                index: position,
                reason: format!("stage carries index {}", stage.index()),
            });
        }
        Ok(Self { stages })
    }

    pub fn from_descriptors<I>(descriptors: I, policy: &TriggerPolicy) -> ScrollyResult<Self>
    where
        I: IntoIterator<Item = StageDescriptor>,
    {
        let stages = descriptors
            .into_iter()
            .enumerate()
            .map(|(index, descriptor)| descriptor.into_stage(index, policy))
            .collect::<ScrollyResult<Vec<_>>>()?;
        Ok(Self { stages })
    }

    /// Parses a JSON array of stage descriptors.
    pub fn from_json_str(json: &str, policy: &TriggerPolicy) -> ScrollyResult<Self> {
        let descriptors: Vec<StageDescriptor> = serde_json::from_str(json)?;
        Self::from_descriptors(descriptors, policy)
    }

    #[must_use]
    pub fn stages(&self) -> &[NarrativeStage] {
        &self.stages
    }

    pub fn stage_at(&self, index: usize) -> ScrollyResult<&NarrativeStage> {
        self.stages.get(index).ok_or(ScrollyError::OutOfRange {
            index,
            len: self.stages.len(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NarrativeStage> {
        self.stages.iter()
    }
}
