//! Built-in COVID-19 story.

use chrono::NaiveDate;

use crate::core::StageDescriptor;
use crate::error::{ScrollyError, ScrollyResult};

pub const MAP: &str = "map";
pub const BUBBLE_CHART: &str = "bubble-chart";
pub const BAR_CHART: &str = "bar-chart";
pub const STREAM_GRAPH: &str = "stream-graph";

/// Builds the COVID-19 narrative over the sorted case-report dates.
///
/// Map and stream-graph stages pick reporting dates at fixed fractions of the
/// timeline; bubble-chart stages all use `bubble_max_date`.
pub fn covid_story(
    sorted_dates: &[NaiveDate],
    bubble_max_date: NaiveDate,
) -> ScrollyResult<Vec<StageDescriptor>> {
    if sorted_dates.is_empty() {
        return Err(ScrollyError::InvalidStage {
            index: 0,
            reason: "covid story needs at least one reporting date".to_owned(),
        });
    }

    let at = |fraction: f64| {
        let index = (sorted_dates.len() as f64 * fraction).floor() as usize;
        sorted_dates[index.min(sorted_dates.len() - 1)]
    };

    let map = |fraction: f64, title: &str, narrative: &str| {
        StageDescriptor::new(Some(MAP))
            .with_date(at(fraction))
            .with_title(title)
            .with_narrative(narrative)
    };
    let bubble = |title: &str, narrative: &str| {
        StageDescriptor::new(Some(BUBBLE_CHART))
            .with_date(bubble_max_date)
            .with_title(title)
            .with_narrative(narrative)
    };
    let stream = |fraction: f64, step: u8, title: &str, narrative: &str| {
        StageDescriptor::new(Some(STREAM_GRAPH))
            .with_date(at(fraction))
            .with_step(step)
            .with_title(title)
            .with_narrative(narrative)
    };
    let bar = |step: u8, title: &str, narrative: &str| {
        StageDescriptor::new(Some(BAR_CHART))
            .with_step(step)
            .with_title(title)
            .with_narrative(narrative)
    };

    Ok(vec![
        map(0.0, "", ""),
        map(
            0.0,
            "The Beginning",
            "In late 2019, reports emerged of a mysterious respiratory illness in Wuhan, China. \
             Few could have predicted how this moment would reshape our global society.",
        ),
        map(
            0.2,
            "Initial Spread",
            "As COVID-19 began its global journey, isolated cases quickly evolved into localized \
             outbreaks, challenging our understanding of pandemic response.",
        ),
        map(
            0.4,
            "Global Crisis Unfolds",
            "By mid-2020 the virus had reached nearly every corner of the globe, and healthcare \
             systems faced unprecedented strain as case numbers soared.",
        ),
        map(
            0.6,
            "Waves of Impact",
            "Different regions experienced distinct waves of infection at different times. \
             No two countries shared exactly the same story.",
        ),
        map(
            0.8,
            "Evolving Response",
            "As understanding of the virus improved, countries adapted their strategies, \
             balancing public health measures against economic impacts.",
        ),
        bubble(
            "Global Population Impact and Variant Distribution",
            "Population size and case numbers tell different stories across nations. The \
             varying sizes of these bubbles reveal stark disparities in impact.",
        ),
        bubble(
            "",
            "Larger nations saw higher total case numbers, yet population size alone did not \
             determine impact.",
        ),
        bubble(
            "",
            "The variant mix within each country shows how travel patterns, outbreak timing \
             and local containment shaped which variants became dominant.",
        ),
        StageDescriptor::new(Some("")).with_title(
            "Challenges simple assumptions about how a pandemic spreads across populations of \
             different sizes.",
        ),
        stream(
            0.7,
            1,
            "The Early Dominance of Ancestral Strains",
            "In the early months the viral landscape was simple: ancestral strains reigned \
             while scientists rushed to sequence the virus.",
        ),
        stream(
            0.8,
            2,
            "The Rise of Alpha and Beta Variants",
            "Alpha and Beta showed how the virus could evolve, with increased transmissibility \
             forcing new response strategies.",
        ),
        stream(
            0.9,
            3,
            "The Variant Race",
            "Gamma and Mu made fleeting appearances before being outpaced by the Delta and \
             Omicron waves.",
        ),
        stream(
            0.95,
            4,
            "The Global Spread of Delta",
            "Delta showed how a single variant could become globally dominant.",
        ),
        stream(
            1.0,
            5,
            "The Omicron Era",
            "Omicron's high transmissibility but often milder symptoms in vaccinated people \
             changed how we viewed the pandemic's future.",
        ),
        bar(
            1,
            "2021 Vaccination Progress",
            "2021 marked the first full year of global vaccination efforts.",
        ),
        bar(
            2,
            "2022 Vaccination Coverage",
            "Throughout 2022 programs expanded with booster doses and continued primary \
             vaccinations.",
        ),
        bar(
            3,
            "2023 Current Status",
            "In 2023 the focus shifted to maintaining immunity through booster programs.",
        ),
        StageDescriptor::new(None),
    ])
}
