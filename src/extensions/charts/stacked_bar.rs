use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::TriggerValue;
use crate::error::{ScrollyError, ScrollyResult};
use crate::extensions::Visualization;

/// What the vaccination bar chart currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarSelection {
    /// Monthly stacks for `year`, `months` bars wide.
    Year { year: i32, months: usize },
    /// Year selected but no rows recorded: render the "no data" message.
    Placeholder { year: i32 },
}

/// Stacked monthly vaccination bars, one stage per year.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedBarModel {
    months_per_year: IndexMap<i32, usize>,
    selection: Option<BarSelection>,
}

impl Default for StackedBarModel {
    fn default() -> Self {
        Self {
            months_per_year: [2021, 2022, 2023].into_iter().map(|year| (year, 0)).collect(),
            selection: None,
        }
    }
}

impl StackedBarModel {
    /// Creates a model whose stage `n` selects the `n`-th year.
    pub fn new(years: impl IntoIterator<Item = i32>) -> ScrollyResult<Self> {
        let months_per_year: IndexMap<i32, usize> =
            years.into_iter().map(|year| (year, 0)).collect();
        if months_per_year.is_empty() {
            return Err(ScrollyError::InvalidConfig(
                "stacked bar chart needs at least one year".to_owned(),
            ));
        }
        Ok(Self {
            months_per_year,
            selection: None,
        })
    }

    /// Records how many monthly rows exist for `year`.
    pub fn set_months(&mut self, year: i32, months: usize) -> ScrollyResult<()> {
        let slot = self.months_per_year.get_mut(&year).ok_or_else(|| {
            ScrollyError::InvalidConfig(format!("year {year} is not a bar chart stage"))
        })?;
        *slot = months.min(12);
        Ok(())
    }

    #[must_use]
    pub fn max_stages(&self) -> usize {
        self.months_per_year.len()
    }

    #[must_use]
    pub fn selection(&self) -> Option<BarSelection> {
        self.selection
    }
}

impl Visualization for StackedBarModel {
    fn update(&mut self, value: Option<TriggerValue>) -> ScrollyResult<()> {
        let stage = value.and_then(TriggerValue::as_step).map(usize::from);
        let Some((&year, &months)) = stage
            .filter(|stage| (1..=self.max_stages()).contains(stage))
            .and_then(|stage| self.months_per_year.get_index(stage - 1))
        else {
            debug!(?value, max_stages = self.max_stages(), "bar chart ignores trigger");
            return Ok(());
        };

        self.selection = Some(if months == 0 {
            BarSelection::Placeholder { year }
        } else {
            BarSelection::Year { year, months }
        });
        Ok(())
    }
}
