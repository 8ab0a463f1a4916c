use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Message {
    FileDropped(PathBuf),
    DropSettled,
    OpenFilePicker,
    FilesPicked(Vec<PathBuf>),
    BatchIngested(crate::importing::BatchOutcome),
    ToggleSeries(String),
}
