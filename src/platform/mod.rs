// copyme platform paths
// Config: <config dir>/copyme   (e.g. ~/.config/copyme)
// Data:   <data dir>/copyme     (e.g. ~/.local/share/copyme)
//
// COPYME_DATA_DIR overrides the data directory, e.g. for a UI shell that
// keeps its own profile folder.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "copyme";

/// Environment variable that overrides [`get_data_dir`].
pub const DATA_DIR_ENV: &str = "COPYME_DATA_DIR";

/// Returns the platform configuration directory for copyme.
pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(env::temp_dir)
        .join(APP_DIR)
}

/// Returns the platform data directory for copyme, honouring `COPYME_DATA_DIR`.
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::data_dir().unwrap_or_else(env::temp_dir).join(APP_DIR)
}

/// Default location of the settings file.
pub fn default_settings_path() -> PathBuf {
    get_config_dir().join("settings.json")
}

/// Default location of the SQLite history database.
pub fn default_database_path() -> PathBuf {
    get_data_dir().join("copyme.db")
}
