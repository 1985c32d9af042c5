// Flightmarks Settings Engine
// Loads and saves the user settings object that holds the history and pin lists.
// The file-backed engine stores settings as JSON at the platform-specific config path.

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::UserSettings;

/// Persistence seam for the user settings object.
pub trait SettingsStore {
    fn load(&mut self) -> Result<UserSettings, SettingsError>;
    fn save(&mut self, settings: &UserSettings) -> Result<(), SettingsError>;
}

/// Settings store that persists settings as a JSON file on disk.
pub struct SettingsEngine {
    config_path: String,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses the platform-specific config directory with `settings.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string(),
        };

        Self { config_path }
    }

    /// Returns the path to the config file.
    pub fn get_config_path(&self) -> &str {
        &self.config_path
    }
}

impl SettingsStore for SettingsEngine {
    /// Loads settings from the JSON config file.
    ///
    /// If the file does not exist, returns default settings.
    /// If the file exists but is malformed, returns a serialization error.
    fn load(&mut self) -> Result<UserSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            return Ok(UserSettings::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })
    }

    /// Writes the given settings to the JSON config file, creating parent
    /// directories as needed.
    fn save(&mut self, settings: &UserSettings) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}

/// In-memory settings store for hosts that persist the settings object
/// themselves. Clones share the same backing value.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    inner: Rc<RefCell<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    settings: UserSettings,
    saves: usize,
}

impl MemorySettingsStore {
    pub fn new(settings: UserSettings) -> Self {
        Self {
            inner: Rc::new(RefCell::new(MemoryState { settings, saves: 0 })),
        }
    }

    /// The last successfully saved settings.
    pub fn snapshot(&self) -> UserSettings {
        self.inner.borrow().settings.clone()
    }

    /// Number of saves performed so far.
    pub fn save_count(&self) -> usize {
        self.inner.borrow().saves
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&mut self) -> Result<UserSettings, SettingsError> {
        Ok(self.inner.borrow().settings.clone())
    }

    fn save(&mut self, settings: &UserSettings) -> Result<(), SettingsError> {
        let mut state = self.inner.borrow_mut();
        state.settings = settings.clone();
        state.saves += 1;
        Ok(())
    }
}
