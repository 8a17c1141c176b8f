use std::path::{Path, PathBuf};

use serde::Deserialize;

/// 個別アップロードファイルのサイズ上限（既定値、バイト単位）。
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// クロップ矩形の最小辺長（既定値、表示ピクセル単位）。
pub const DEFAULT_MIN_CROP_PX: f32 = 20.0;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub max_upload_bytes: u64,
    pub min_crop_px: f32,
    pub figure_count_min: usize,
    pub figure_count_max: usize,
    pub media_dir: PathBuf,
    pub session_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            min_crop_px: DEFAULT_MIN_CROP_PX,
            figure_count_min: 2,
            figure_count_max: 4,
            media_dir: PathBuf::from(".media"),
            session_dir: PathBuf::from(".session"),
        }
    }
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> crate::error::Result<Self> {
        serde_yml::from_str(yaml).map_err(|e| {
            crate::error::WorkflowError::config(format!("Failed to parse settings YAML: {e}"))
        })
    }

    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }
}

/// 作業ディレクトリからsettings.yamlを自動検出して読み込む。
///
/// `settings.yaml` が存在すれば読み込み、存在しなければデフォルト設定を返す。
pub fn load_settings_for(dir: &Path) -> crate::error::Result<Settings> {
    let settings_path = dir.join("settings.yaml");

    if settings_path.exists() {
        Settings::from_file(&settings_path)
    } else {
        Ok(Settings::default())
    }
}
