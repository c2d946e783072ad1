use chrono::NaiveDate;
use tracing::debug;

use crate::core::{MAX_STEP, TriggerValue};
use crate::error::ScrollyResult;
use crate::extensions::Visualization;

/// Fewest dates the stream graph ever reveals.
const MIN_VISIBLE_DATES: usize = 5;

/// Variant share stream graph revealed progressively over five steps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamGraphModel {
    dates: Vec<NaiveDate>,
    current_step: Option<u8>,
    visible_end: usize,
}

impl StreamGraphModel {
    #[must_use]
    pub fn new(mut dates: Vec<NaiveDate>) -> Self {
        dates.sort_unstable();
        dates.dedup();
        Self {
            dates,
            current_step: None,
            visible_end: 0,
        }
    }

    #[must_use]
    pub fn current_step(&self) -> Option<u8> {
        self.current_step
    }

    /// Exclusive end index into the sorted dates.
    ///
    /// May exceed the number of dates when fewer than five exist.
    #[must_use]
    pub fn visible_end(&self) -> usize {
        self.visible_end
    }

    #[must_use]
    pub fn visible_dates(&self) -> &[NaiveDate] {
        &self.dates[..self.visible_end.min(self.dates.len())]
    }
}

impl Visualization for StreamGraphModel {
    fn update(&mut self, value: Option<TriggerValue>) -> ScrollyResult<()> {
        let Some(step) = value
            .and_then(TriggerValue::as_step)
            .filter(|step| (1..=MAX_STEP).contains(step))
        else {
            debug!(?value, "stream graph ignores trigger");
            return Ok(());
        };

        let total = self.dates.len();
        let end = (usize::from(step) * total) / usize::from(MAX_STEP);
        self.visible_end = end.min(total).max(MIN_VISIBLE_DATES);
        self.current_step = Some(step);
        Ok(())
    }
}
