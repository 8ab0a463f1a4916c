use crate::charts::{BarPoint, BarSeries, ChartConfig, Domain, GroupedBarChart};
use crate::data::series::SeriesCollection;
use crate::settings::ChartSettings;

pub struct DailyTransactionsReport;

impl DailyTransactionsReport {
    pub fn title() -> &'static str {
        "Transactions per Day"
    }

    pub fn subtitle() -> &'static str {
        "One bar group per day of month, one bar per file"
    }

    pub fn domain(collection: &SeriesCollection, settings: &ChartSettings) -> Domain {
        let (x_min, x_max) = SeriesCollection::day_domain(settings.max_day);
        let (y_min, y_max) = collection.value_domain(settings.value_margin);
        Domain {
            x: (x_min as f32, x_max as f32),
            y: (y_min as f32, y_max as f32),
        }
    }

    pub fn chart(collection: &SeriesCollection, settings: &ChartSettings) -> GroupedBarChart {
        let series = collection
            .visible()
            .map(|series| BarSeries {
                name: series.name.clone(),
                color: series.color().into(),
                values: series
                    .points
                    .iter()
                    .map(|point| BarPoint {
                        x: point.day as f32,
                        value: point.count as f32,
                        label: point.label.clone(),
                    })
                    .collect(),
            })
            .collect();

        GroupedBarChart::new(
            series,
            collection.bar_layout(),
            Self::domain(collection, settings),
        )
        .with_config(ChartConfig {
            padding: 40.0,
            grid_lines: settings.grid_lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::daily_counts::DailyCounts;
    use crate::data::series::{ParsedFile, Point};

    #[test]
    fn domain_tracks_global_max_plus_margin() {
        let mut collection = SeriesCollection::new();
        collection.merge_batch(vec![ParsedFile {
            name: "jan.csv".to_string(),
            counts: DailyCounts {
                points: vec![Point::new(15, 2), Point::new(16, 6)],
                max_count: 6,
                accepted_rows: 8,
                skipped_dates: 0,
            },
        }]);

        let domain = DailyTransactionsReport::domain(&collection, &ChartSettings::default());

        assert_eq!(domain.x, (0.0, 31.0));
        assert_eq!(domain.y, (0.0, 16.0));
    }
}
