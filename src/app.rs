use std::path::PathBuf;
use std::time::Duration;

use iced::{event, window, Element, Event, Subscription, Task, Theme};

use crate::data::series::SeriesCollection;
use crate::importing::{ingest_batch, plan_batch, BatchOutcome, IngestState};
use crate::message::Message;
use crate::settings::Settings;

pub struct App {
    theme: Theme,
    settings: Settings,
    collection: SeriesCollection,
    ingest: IngestState,
}

impl App {
    pub fn new(settings: Settings) -> (Self, Task<Message>) {
        (
            Self {
                theme: Theme::Dark,
                settings,
                collection: SeriesCollection::new(),
                ingest: IngestState::new(),
            },
            Task::none(),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::FileDropped(path) => {
                tracing::debug!(path = %path.display(), "file dropped");
                if self.ingest.queue_drop(path) {
                    let settle = Duration::from_millis(self.settings.ingest.drop_settle_ms);
                    Task::perform(tokio::time::sleep(settle), |_| Message::DropSettled)
                } else {
                    Task::none()
                }
            }
            Message::DropSettled => {
                let paths = self.ingest.take_drop();
                self.start_batch(paths)
            }
            Message::OpenFilePicker => Task::perform(
                async {
                    rfd::AsyncFileDialog::new()
                        .set_title("Select revenue report CSV files")
                        .add_filter("CSV", &["csv"])
                        .pick_files()
                        .await
                        .map(|files| {
                            files
                                .into_iter()
                                .map(|file| file.path().to_path_buf())
                                .collect()
                        })
                        .unwrap_or_default()
                },
                Message::FilesPicked,
            ),
            Message::FilesPicked(paths) => self.start_batch(paths),
            Message::BatchIngested(outcome) => {
                self.apply_batch(outcome);
                Task::none()
            }
            Message::ToggleSeries(name) => {
                if !self.collection.toggle(&name) {
                    tracing::debug!(%name, "toggle for unknown series ignored");
                }
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        crate::screens::visualizer::view(&self.collection, &self.ingest, &self.settings.chart)
    }

    pub fn theme(&self) -> Theme {
        self.theme.clone()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        event::listen_with(window_event)
    }

    fn start_batch(&mut self, paths: Vec<PathBuf>) -> Task<Message> {
        if paths.is_empty() {
            return Task::none();
        }

        let plan = plan_batch(paths, |name| self.collection.contains(name));
        if !plan.skipped.is_empty() {
            tracing::info!(skipped = ?plan.skipped, "files already loaded or repeated in batch");
        }

        if plan.to_read.is_empty() {
            self.ingest
                .set_message(format!("Added 0 series, skipped {}", plan.skipped.len()));
            return Task::none();
        }

        let files = plan.to_read.len();
        self.ingest.begin(files);
        tracing::info!(files, "reading batch");

        let rules = self.settings.ingest.row_rules();
        Task::perform(ingest_batch(plan.to_read, rules), Message::BatchIngested)
    }

    fn apply_batch(&mut self, outcome: BatchOutcome) {
        let files = outcome.parsed.len() + outcome.failed.len();
        let failed = outcome.failed.len();
        let summary = self.collection.merge_batch(outcome.parsed);

        tracing::info!(
            added = summary.added.len(),
            skipped = summary.skipped.len(),
            failed,
            global_max = self.collection.global_max().get(),
            "batch merged"
        );

        self.ingest.finish(files, &summary, failed);
    }
}

fn window_event(event: Event, _status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::daily_counts::DailyCounts;
    use crate::data::series::{ParsedFile, Point};

    fn outcome(names: &[&str], failed: &[&str]) -> BatchOutcome {
        BatchOutcome {
            parsed: names
                .iter()
                .map(|name| ParsedFile {
                    name: name.to_string(),
                    counts: DailyCounts {
                        points: vec![Point::new(1, 2)],
                        max_count: 2,
                        accepted_rows: 2,
                        skipped_dates: 0,
                    },
                })
                .collect(),
            failed: failed.iter().map(|name| name.to_string()).collect(),
        }
    }

    #[test]
    fn batch_results_merge_in_one_update() {
        let (mut app, _) = App::new(Settings::default());
        app.ingest.begin(3);

        let _ = app.update(Message::BatchIngested(outcome(&["a.csv", "b.csv"], &["c.csv"])));

        assert_eq!(app.collection.len(), 2);
        assert_eq!(app.ingest.in_flight_files(), 0);
        assert_eq!(app.ingest.status_text(), "Added 2 series, skipped 1");
    }

    #[test]
    fn overlapping_batches_do_not_duplicate_names() {
        let (mut app, _) = App::new(Settings::default());
        app.ingest.begin(2);

        let _ = app.update(Message::BatchIngested(outcome(&["a.csv"], &[])));
        let _ = app.update(Message::BatchIngested(outcome(&["a.csv"], &[])));

        assert_eq!(app.collection.len(), 1);
        assert_eq!(app.collection.global_max().get(), 2);
    }

    #[test]
    fn known_files_are_not_read_again() {
        let (mut app, _) = App::new(Settings::default());
        let _ = app.update(Message::BatchIngested(outcome(&["a.csv"], &[])));

        let _ = app.update(Message::FilesPicked(vec![PathBuf::from("/x/a.csv")]));

        assert_eq!(app.ingest.in_flight_files(), 0);
        assert_eq!(app.ingest.status_text(), "Added 0 series, skipped 1");
    }

    #[test]
    fn legend_click_toggles_series() {
        let (mut app, _) = App::new(Settings::default());
        let _ = app.update(Message::BatchIngested(outcome(&["a.csv", "b.csv"], &[])));

        let _ = app.update(Message::ToggleSeries("b.csv".to_string()));
        assert!(app.collection.series()[1].hidden);

        let _ = app.update(Message::ToggleSeries("missing.csv".to_string()));
        assert_eq!(app.collection.visible().count(), 1);
    }
}
