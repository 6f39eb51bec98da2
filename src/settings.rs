use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::navbar::ControlsConfig;

pub const CURRENT_VERSION: u32 = 1;
const SETTINGS_FILENAME: &str = "config.yaml";
const APP_NAME: &str = "pagebar";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navbar_title: Option<String>,

    /// Start in the compact embedded layout
    #[serde(default)]
    pub embed: bool,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub controls: ControlsConfig,
}

fn default_version() -> u32 {
    CURRENT_VERSION
}

fn default_theme() -> String {
    "Oceanic Next".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            theme: default_theme(),
            navbar_title: None,
            embed: false,
            log_level: default_log_level(),
            controls: ControlsConfig::default(),
        }
    }
}

impl Settings {
    pub fn log_level_filter(&self) -> log::LevelFilter {
        match self.log_level.parse() {
            Ok(level) => level,
            Err(_) => {
                warn!("Unknown log level {:?}, using info", self.log_level);
                log::LevelFilter::Info
            }
        }
    }
}

pub fn preferred_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|config| config.join(APP_NAME).join(SETTINGS_FILENAME))
}

/// Loads settings from `path`, or from the per-user config file when no
/// path is given. A missing file is created with defaults; an unreadable
/// one is reported and defaults are used.
pub fn load_settings(path: Option<&Path>) -> Settings {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let Some(path) = preferred_config_path() else {
                warn!("Could not determine config directory, using default settings");
                return Settings::default();
            };
            path
        }
    };

    if !path.exists() {
        info!("Settings file not found, creating with defaults at {path:?}");
        let settings = Settings::default();
        save_settings_to_file(&settings, &path);
        return settings;
    }

    load_settings_from_path(&path).unwrap_or_default()
}

fn load_settings_from_path(path: &Path) -> Option<Settings> {
    match fs::read_to_string(path) {
        Ok(content) => match serde_yaml::from_str::<Settings>(&content) {
            Ok(mut settings) => {
                debug!("Loaded settings from {path:?}");

                if settings.version < CURRENT_VERSION {
                    migrate_settings(&mut settings);
                    save_settings_to_file(&settings, path);
                }
                Some(settings)
            }
            Err(e) => {
                error!("Failed to parse settings file {path:?}: {e}");
                None
            }
        },
        Err(e) => {
            error!("Failed to read settings file {path:?}: {e}");
            None
        }
    }
}

fn migrate_settings(settings: &mut Settings) {
    info!(
        "Migrating settings from v{} to v{}",
        settings.version, CURRENT_VERSION
    );

    settings.version = CURRENT_VERSION;
}

pub fn save_settings_to_file(settings: &Settings, path: &Path) {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create config directory {parent:?}: {e}");
                return;
            }
        }
    }

    let body = match serde_yaml::to_string(settings) {
        Ok(body) => body,
        Err(e) => {
            error!("Failed to serialize settings: {e}");
            return;
        }
    };
    let content = format!("{SETTINGS_HEADER}{body}");

    match fs::write(path, content) {
        Ok(()) => debug!("Saved settings to {path:?}"),
        Err(e) => error!("Failed to save settings to {path:?}: {e}"),
    }
}

const SETTINGS_HEADER: &str = r#"# pagebar settings
#
# controls:
#   one_page:  { visible: true, label: "One-page view" }
#   two_page:  { visible: true }
#   thumbnail: { visible: false }

"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navbar::NavbarAction;

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let settings = load_settings(Some(&path));
        assert_eq!(settings, Settings::default());
        assert!(path.exists());

        let reloaded = load_settings(Some(&path));
        assert_eq!(reloaded, settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "version: 1\nnavbar_title: My Library\ncontrols:\n  thumbnail:\n    visible: false\n",
        )
        .unwrap();

        let settings = load_settings(Some(&path));
        assert_eq!(settings.navbar_title.as_deref(), Some("My Library"));
        assert_eq!(settings.theme, "Oceanic Next");
        assert!(!settings.controls.is_visible(NavbarAction::Thumbnail));
        assert!(settings.controls.is_visible(NavbarAction::TwoPage));
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "controls: [not, a, map\n").unwrap();

        assert_eq!(load_settings(Some(&path)), Settings::default());
    }

    #[test]
    fn test_old_version_is_migrated_and_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "version: 0\nembed: true\n").unwrap();

        let settings = load_settings(Some(&path));
        assert_eq!(settings.version, CURRENT_VERSION);
        assert!(settings.embed);

        let saved = fs::read_to_string(&path).unwrap();
        assert!(saved.contains(&format!("version: {CURRENT_VERSION}")));
    }

    #[test]
    fn test_log_level_parsing() {
        let mut settings = Settings::default();
        assert_eq!(settings.log_level_filter(), log::LevelFilter::Info);
        settings.log_level = "debug".to_string();
        assert_eq!(settings.log_level_filter(), log::LevelFilter::Debug);
        settings.log_level = "loud".to_string();
        assert_eq!(settings.log_level_filter(), log::LevelFilter::Info);
    }
}
