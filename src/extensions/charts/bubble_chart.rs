use chrono::NaiveDate;
use tracing::debug;

use crate::core::TriggerValue;
use crate::error::{ScrollyError, ScrollyResult};
use crate::extensions::Visualization;

/// Force-directed bubble layout of cases against population.
///
/// The layout is settled once on first update; later stages keep it.
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleChartModel {
    min_date: NaiveDate,
    max_date: NaiveDate,
    rendered_as_of: Option<NaiveDate>,
}

impl BubbleChartModel {
    pub fn new(min_date: NaiveDate, max_date: NaiveDate) -> ScrollyResult<Self> {
        if min_date > max_date {
            return Err(ScrollyError::InvalidConfig(format!(
                "bubble chart date range is inverted: {min_date} > {max_date}"
            )));
        }
        Ok(Self {
            min_date,
            max_date,
            rendered_as_of: None,
        })
    }

    #[must_use]
    pub fn rendered_as_of(&self) -> Option<NaiveDate> {
        self.rendered_as_of
    }

    #[must_use]
    pub fn has_been_rendered(&self) -> bool {
        self.rendered_as_of.is_some()
    }
}

impl Visualization for BubbleChartModel {
    fn update(&mut self, value: Option<TriggerValue>) -> ScrollyResult<()> {
        if self.has_been_rendered() {
            return Ok(());
        }
        let Some(date) = value.and_then(TriggerValue::as_date) else {
            debug!(?value, "bubble chart waits for a date trigger");
            return Ok(());
        };
        self.rendered_as_of = Some(date.clamp(self.min_date, self.max_date));
        Ok(())
    }
}
