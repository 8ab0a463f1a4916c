use std::collections::HashSet;

use super::color::SeriesColor;
use super::daily_counts::DailyCounts;

/// Width of one day slot in bar-layout units.
pub const DAY_SLOT_UNITS: f32 = 10.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point {
    pub day: u32,
    pub count: u64,
    pub label: String,
}

impl Point {
    pub fn new(day: u32, count: u64) -> Self {
        Self {
            day,
            count,
            label: count.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Series {
    pub name: String,
    pub points: Vec<Point>,
    pub hidden: bool,
}

impl Series {
    pub fn new(name: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            name: name.into(),
            points,
            hidden: false,
        }
    }

    pub fn color(&self) -> SeriesColor {
        SeriesColor::for_name(&self.name)
    }
}

/// Largest count seen so far; never decreases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalMax(u64);

impl GlobalMax {
    pub fn get(self) -> u64 {
        self.0
    }

    pub fn fold(&mut self, observed: u64) {
        self.0 = self.0.max(observed);
    }
}

/// One file that finished reading, parsing and aggregation.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub name: String,
    pub counts: DailyCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub added: Vec<String>,
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub name: String,
    pub color: SeriesColor,
    pub hidden: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarLayout {
    pub offset: f32,
    pub width: f32,
}

#[derive(Debug, Clone, Default)]
pub struct SeriesCollection {
    series: Vec<Series>,
    global_max: GlobalMax,
}

impl SeriesCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn global_max(&self) -> GlobalMax {
        self.global_max
    }

    pub fn contains(&self, name: &str) -> bool {
        self.series.iter().any(|series| series.name == name)
    }

    /// Appends a finished batch in one step. Names already present, including
    /// ones merged by an overlapping batch, are skipped.
    pub fn merge_batch(&mut self, parsed: Vec<ParsedFile>) -> MergeSummary {
        let mut known: HashSet<String> =
            self.series.iter().map(|series| series.name.clone()).collect();
        let mut summary = MergeSummary::default();
        let mut incoming = Vec::with_capacity(parsed.len());
        let mut batch_max = GlobalMax::default();

        for file in parsed {
            if !known.insert(file.name.clone()) {
                tracing::debug!(name = %file.name, "series already present, skipping");
                summary.skipped.push(file.name);
                continue;
            }
            batch_max.fold(file.counts.max_count);
            let series = Series::new(file.name, file.counts.points);
            tracing::debug!(name = %series.name, color = %series.color().hex(), "series added");
            summary.added.push(series.name.clone());
            incoming.push(series);
        }

        self.series.extend(incoming);
        self.global_max.fold(batch_max.get());

        summary
    }

    /// Flips visibility of the named series; unknown names are ignored.
    pub fn toggle(&mut self, name: &str) -> bool {
        match self.series.iter_mut().find(|series| series.name == name) {
            Some(series) => {
                series.hidden = !series.hidden;
                true
            }
            None => false,
        }
    }

    pub fn legend(&self) -> Vec<LegendEntry> {
        self.series
            .iter()
            .map(|series| LegendEntry {
                name: series.name.clone(),
                color: series.color(),
                hidden: series.hidden,
            })
            .collect()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Series> {
        self.series.iter().filter(|series| !series.hidden)
    }

    pub fn value_domain(&self, margin: u64) -> (u64, u64) {
        (0, self.global_max.get().saturating_add(margin))
    }

    pub fn day_domain(max_day: u32) -> (u32, u32) {
        (0, max_day)
    }

    /// Spacing depends on the total series count so hiding a series does not
    /// reflow the others.
    pub fn bar_layout(&self) -> BarLayout {
        let slots = (self.series.len() + 1) as f32;
        BarLayout {
            offset: DAY_SLOT_UNITS / slots,
            width: DAY_SLOT_UNITS / 2.0 / slots,
        }
    }
}
