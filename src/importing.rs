use std::collections::HashSet;
use std::path::{Path, PathBuf};

use csv_async::{AsyncReaderBuilder, ByteRecord};
use futures::io::AsyncRead;
use futures::StreamExt;
use tokio::fs;
use tokio_util::compat::TokioAsyncReadCompatExt;

use crate::data::daily_counts::{aggregate_rows, RowRules};
use crate::data::series::{MergeSummary, ParsedFile};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read rows from {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: csv_async::Error,
    },
}

/// Which dropped paths to read, after removing names already on screen and
/// repeats within the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchPlan {
    pub to_read: Vec<PathBuf>,
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub parsed: Vec<ParsedFile>,
    pub failed: Vec<String>,
}

/// Drop buffering and in-flight bookkeeping shown in the status line.
#[derive(Debug, Clone, Default)]
pub struct IngestState {
    pending_drop: Vec<PathBuf>,
    in_flight_files: usize,
    message: Option<String>,
}

impl IngestState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffers a dropped path. Returns true when it opens a new batch.
    pub fn queue_drop(&mut self, path: PathBuf) -> bool {
        self.pending_drop.push(path);
        self.pending_drop.len() == 1
    }

    pub fn take_drop(&mut self) -> Vec<PathBuf> {
        std::mem::take(&mut self.pending_drop)
    }

    pub fn begin(&mut self, files: usize) {
        self.in_flight_files += files;
    }

    pub fn finish(&mut self, files: usize, summary: &MergeSummary, failed: usize) {
        self.in_flight_files = self.in_flight_files.saturating_sub(files);
        self.set_message(format!(
            "Added {} series, skipped {}",
            summary.added.len(),
            summary.skipped.len() + failed
        ));
    }

    pub fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    pub fn in_flight_files(&self) -> usize {
        self.in_flight_files
    }

    pub fn status_text(&self) -> String {
        let in_flight = self.in_flight_files();
        if in_flight > 0 {
            format!("Reading {in_flight} file(s)...")
        } else {
            self.message
                .clone()
                .unwrap_or_else(|| "No files loaded yet.".to_owned())
        }
    }
}

pub fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

pub fn plan_batch(paths: Vec<PathBuf>, is_known: impl Fn(&str) -> bool) -> BatchPlan {
    let mut seen = HashSet::new();
    let mut plan = BatchPlan::default();

    for path in paths {
        let Some(name) = file_name(&path) else {
            tracing::warn!(path = %path.display(), "dropped path has no file name");
            continue;
        };

        if is_known(&name) || !seen.insert(name.clone()) {
            plan.skipped.push(name);
        } else {
            plan.to_read.push(path);
        }
    }

    plan
}

/// Splits comma-delimited text into rows. Rows may differ in length and no
/// header row is assumed. Fields stay raw bytes; only the columns the
/// aggregation reads are decoded.
pub async fn read_rows<R>(reader: R) -> Result<Vec<ByteRecord>, csv_async::Error>
where
    R: AsyncRead + Unpin + Send,
{
    let mut reader = AsyncReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .create_reader(reader);

    let mut records = reader.byte_records();
    let mut rows = Vec::new();

    while let Some(record) = records.next().await {
        rows.push(record?);
    }

    Ok(rows)
}

pub async fn ingest_file(path: PathBuf, rules: &RowRules) -> Result<ParsedFile, IngestError> {
    let name = file_name(&path).unwrap_or_else(|| path.display().to_string());

    let file = fs::File::open(&path)
        .await
        .map_err(|source| IngestError::Open {
            path: path.clone(),
            source,
        })?;

    let rows = read_rows(file.compat())
        .await
        .map_err(|source| IngestError::Parse {
            path: path.clone(),
            source,
        })?;

    let counts = aggregate_rows(&rows, rules);
    tracing::info!(
        %name,
        rows = rows.len(),
        accepted = counts.accepted_rows,
        skipped_dates = counts.skipped_dates,
        days = counts.points.len(),
        "aggregated file"
    );

    Ok(ParsedFile { name, counts })
}

/// Reads every path concurrently and returns once all of them have finished.
/// Files that fail are logged and left out.
pub async fn ingest_batch(paths: Vec<PathBuf>, rules: RowRules) -> BatchOutcome {
    let reads = paths.into_iter().map(|path| {
        let rules = &rules;
        async move {
            let name = file_name(&path).unwrap_or_else(|| path.display().to_string());
            (name, ingest_file(path, rules).await)
        }
    });

    let mut outcome = BatchOutcome::default();
    for (name, result) in futures::future::join_all(reads).await {
        match result {
            Ok(parsed) => outcome.parsed.push(parsed),
            Err(err) => {
                tracing::warn!(%name, error = %err, "file reading has failed");
                outcome.failed.push(name);
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::series::Point;
    use crate::settings::IngestSettings;

    const TAIL: &str = ",a,b,c,d,e,f,g,h,i,j,k,l,m";

    fn export(rows: &[(&str, &str)]) -> String {
        let mut text = String::from("Revenue report\nTransaction Id,Date,Rest\n");
        for (id, date) in rows {
            text.push_str(&format!("{id},{date}{TAIL}\n"));
        }
        text.push_str("Total,,,\n");
        text
    }

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn plan_skips_known_and_repeated_names() {
        let paths = vec![
            PathBuf::from("/a/jan.csv"),
            PathBuf::from("/b/feb.csv"),
            PathBuf::from("/c/jan.csv"),
            PathBuf::from("/d/mar.csv"),
            PathBuf::from("/"),
        ];

        let plan = plan_batch(paths, |name| name == "feb.csv");

        assert_eq!(
            plan.to_read,
            vec![PathBuf::from("/a/jan.csv"), PathBuf::from("/d/mar.csv")]
        );
        assert_eq!(plan.skipped, vec!["feb.csv", "jan.csv"]);
    }

    #[test]
    fn drops_are_buffered_into_one_batch() {
        let mut state = IngestState::new();

        assert!(state.queue_drop(PathBuf::from("/a.csv")));
        assert!(!state.queue_drop(PathBuf::from("/b.csv")));
        assert_eq!(state.take_drop().len(), 2);
        assert!(state.queue_drop(PathBuf::from("/c.csv")));
    }

    #[test]
    fn status_follows_in_flight_count() {
        let mut state = IngestState::new();
        assert_eq!(state.status_text(), "No files loaded yet.");

        state.begin(3);
        assert_eq!(state.status_text(), "Reading 3 file(s)...");

        let summary = MergeSummary {
            added: vec!["a.csv".to_string(), "b.csv".to_string()],
            skipped: Vec::new(),
        };
        state.finish(3, &summary, 1);
        assert_eq!(state.in_flight_files(), 0);
        assert_eq!(state.status_text(), "Added 2 series, skipped 1");
    }

    #[tokio::test]
    async fn read_rows_accepts_ragged_input() {
        let text = "abc\n1,2020-01-15,x\n\n2,2020-01-16";

        let rows = read_rows(text.as_bytes()).await.unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[1].get(1), Some(&b"2020-01-15"[..]));
    }

    #[tokio::test]
    async fn raw_text_to_points() {
        let text = format!(
            "abc\n1,2020-01-15{TAIL}\n2,2020-01-15{TAIL}\n3,2020-01-16{TAIL}\n"
        );

        let rows = read_rows(text.as_bytes()).await.unwrap();
        let counts = aggregate_rows(&rows, &IngestSettings::default().row_rules());

        assert_eq!(counts.points, vec![Point::new(15, 2), Point::new(16, 1)]);
        assert!(counts.max_count >= 2);
    }

    #[tokio::test]
    async fn ingest_file_names_series_after_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "2020-01.csv",
            &export(&[("10", "2020-01-03"), ("11", "2020-01-03"), ("12", "2020-01-04")]),
        );

        let parsed = ingest_file(path, &IngestSettings::default().row_rules())
            .await
            .unwrap();

        assert_eq!(parsed.name, "2020-01.csv");
        assert_eq!(parsed.counts.points, vec![Point::new(3, 2), Point::new(4, 1)]);
    }

    #[tokio::test]
    async fn missing_file_is_an_open_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = ingest_file(dir.path().join("gone.csv"), &IngestSettings::default().row_rules())
            .await
            .unwrap_err();

        assert!(matches!(err, IngestError::Open { .. }));
    }

    #[tokio::test]
    async fn batch_omits_failed_files() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_file(dir.path(), "good.csv", &export(&[("1", "2020-05-20")]));
        let missing = dir.path().join("missing.csv");

        let outcome = ingest_batch(vec![missing, good], IngestSettings::default().row_rules()).await;

        assert_eq!(outcome.parsed.len(), 1);
        assert_eq!(outcome.parsed[0].name, "good.csv");
        assert_eq!(outcome.parsed[0].counts.points, vec![Point::new(20, 1)]);
        assert_eq!(outcome.failed, vec!["missing.csv"]);
    }

    #[tokio::test]
    async fn invalid_utf8_in_unused_column_keeps_the_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.csv");
        let mut contents = b"Transaction Id,Date\n1,2020-01-15,a,b,Caf\xe9".to_vec();
        contents.extend_from_slice(TAIL.as_bytes());
        contents.extend_from_slice(b"\n2,2020-01-15");
        contents.extend_from_slice(TAIL.as_bytes());
        contents.extend_from_slice(b"\n3,\xff2020-01-16");
        contents.extend_from_slice(TAIL.as_bytes());
        contents.push(b'\n');
        std::fs::write(&path, contents).unwrap();

        let outcome = ingest_batch(vec![path], IngestSettings::default().row_rules()).await;

        assert!(outcome.failed.is_empty());
        assert_eq!(outcome.parsed.len(), 1);
        let counts = &outcome.parsed[0].counts;
        assert_eq!(counts.points, vec![Point::new(15, 2)]);
        assert_eq!(counts.skipped_dates, 1);
    }
}
