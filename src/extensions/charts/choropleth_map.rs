use chrono::NaiveDate;
use tracing::debug;

use crate::core::TriggerValue;
use crate::error::ScrollyResult;
use crate::extensions::Visualization;

/// Map coloured by cumulative cases as of a reporting date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChoroplethMapModel {
    dates: Vec<NaiveDate>,
    selected: Option<NaiveDate>,
}

impl ChoroplethMapModel {
    #[must_use]
    pub fn new(mut dates: Vec<NaiveDate>) -> Self {
        dates.sort_unstable();
        dates.dedup();
        Self {
            dates,
            selected: None,
        }
    }

    #[must_use]
    pub fn reporting_dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Reporting date the map is currently coloured for.
    #[must_use]
    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected
    }
}

impl Visualization for ChoroplethMapModel {
    fn update(&mut self, value: Option<TriggerValue>) -> ScrollyResult<()> {
        let Some(date) = value.and_then(TriggerValue::as_date) else {
            debug!(?value, "choropleth map ignores non-date trigger");
            return Ok(());
        };

        // Latest reporting date not after the trigger; earlier triggers fall
        // back to the first report.
        let upper = self.dates.partition_point(|candidate| *candidate <= date);
        self.selected = self.dates.get(upper.saturating_sub(1)).copied();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, month, day).expect("valid date")
    }

    #[test]
    fn selects_latest_report_not_after_trigger() {
        let mut map = ChoroplethMapModel::new(vec![day(3, 1), day(1, 1), day(2, 1)]);
        map.update(Some(TriggerValue::Date(day(2, 15)))).expect("update");
        assert_eq!(map.selected_date(), Some(day(2, 1)));

        map.update(Some(TriggerValue::Date(day(1, 1)))).expect("update");
        assert_eq!(map.selected_date(), Some(day(1, 1)));
    }

    #[test]
    fn early_trigger_clamps_to_first_report() {
        let mut map = ChoroplethMapModel::new(vec![day(3, 1), day(4, 1)]);
        map.update(Some(TriggerValue::Date(day(1, 1)))).expect("update");
        assert_eq!(map.selected_date(), Some(day(3, 1)));
    }

    #[test]
    fn step_and_null_triggers_keep_selection() {
        let mut map = ChoroplethMapModel::new(vec![day(3, 1)]);
        map.update(Some(TriggerValue::Date(day(3, 5)))).expect("update");
        map.update(Some(TriggerValue::Step(2))).expect("update");
        map.update(None).expect("update");
        assert_eq!(map.selected_date(), Some(day(3, 1)));
    }
}
