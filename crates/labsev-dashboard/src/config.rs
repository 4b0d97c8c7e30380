use std::path::{Path, PathBuf};

use labsev_cohort::source::{CohortSource, ColumnConvention};
use labsev_core::models::patient::AdmissionId;
use serde::{Deserialize, Serialize};

use crate::logging::LogFormat;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Precomputed severity table (`.csv` or `.json`).
    pub data_path: PathBuf,
    #[serde(default)]
    pub column_convention: ColumnConvention,
    /// Admission shown first; falls back to the first row when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_admission: Option<AdmissionId>,
    #[serde(default)]
    pub log_format: LogFormat,
    pub created_at: jiff::Timestamp,
}

impl DashboardConfig {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            config_version: CURRENT_VERSION,
            data_path: data_path.into(),
            column_convention: ColumnConvention::Auto,
            selected_admission: None,
            log_format: LogFormat::Pretty,
            created_at: jiff::Timestamp::now(),
        }
    }

    pub fn source(&self) -> CohortSource {
        CohortSource::new(&self.data_path).with_convention(self.column_convention)
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("com.labsev.dashboard"))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Read only `log_format`, without migrations, so the subscriber can be
/// installed before the config is loaded. Missing or unreadable files give
/// the default.
pub fn peek_log_format(path: &Path) -> LogFormat {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|contents| serde_json::from_str::<serde_json::Value>(&contents).ok())
        .and_then(|json| json.get("log_format").cloned())
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default()
}

pub fn load_config_from(path: &Path) -> eyre::Result<DashboardConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: DashboardConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update the dashboard."
        ));
    }

    // v0 → v1: parquet_path became data_path; column_convention and
    // created_at were added.
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        if let Some(path) = obj.remove("parquet_path") {
            obj.entry("data_path").or_insert(path);
        }
        obj.entry("column_convention")
            .or_insert(serde_json::Value::String("auto".to_string()));
        obj.entry("created_at")
            .or_insert(serde_json::Value::String(jiff::Timestamp::now().to_string()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (data_path, column_convention)");
    }

    Ok(json)
}

pub fn save_config_to(path: &Path, config: &DashboardConfig) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
