use serde::Deserialize;

use crate::data::daily_counts::RowRules;

const CONFIG_FILE: &str = "config/revenue_bars";
const ENV_PREFIX: &str = "REVENUE_BARS";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub ingest: IngestSettings,
    pub chart: ChartSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    pub min_fields: usize,
    pub id_column: usize,
    pub date_column: usize,
    pub date_formats: Vec<String>,
    pub drop_settle_ms: u64,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            min_fields: 15,
            id_column: 0,
            date_column: 1,
            date_formats: [
                "%Y-%m-%dT%H:%M:%S%.f",
                "%Y-%m-%dT%H:%M:%S",
                "%Y-%m-%d %H:%M:%S",
                "%Y-%m-%d %H:%M",
                "%Y-%m-%d",
                "%m/%d/%Y %H:%M:%S",
                "%m/%d/%Y",
                "%d %b %Y",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            drop_settle_ms: 150,
        }
    }
}

impl IngestSettings {
    pub fn row_rules(&self) -> RowRules {
        RowRules {
            min_fields: self.min_fields,
            id_column: self.id_column,
            date_column: self.date_column,
            date_formats: self.date_formats.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub max_day: u32,
    pub value_margin: u64,
    pub height: f32,
    pub grid_lines: usize,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            max_day: 31,
            value_margin: 10,
            height: 320.0,
            grid_lines: 4,
        }
    }
}

/// Loads `config/revenue_bars.*` (optional) and `REVENUE_BARS__*` overrides.
pub fn load_settings() -> anyhow::Result<Settings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(CONFIG_FILE).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
