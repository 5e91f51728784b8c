//! Light/dark theme resolution and its persisted preference.

use std::{
    collections::{BTreeMap, HashMap},
    fmt, fs, io,
    path::{Path, PathBuf},
    str::FromStr,
    sync::{Arc, Mutex, PoisonError},
};

use thiserror::Error;

/// Storage key of the theme preference.
pub const THEME_KEY: &str = "theme";

/// Page color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    /// Dark palette.
    Dark,
    /// Light palette.
    Light,
}

impl Theme {
    /// Stored and class-attribute form: `dark` or `light`.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Text of the toggle button while this theme is active.
    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "🖌️ Dark",
            Theme::Light => "🖌️ Light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string that names neither theme.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown theme: {0}")]
pub struct UnknownTheme(String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

/// Failure to read or write stored preferences.
#[derive(Debug, Error)]
pub enum PreferenceError {
    /// The preference file could not be read or written.
    #[error("Failed to access preference file: {0}")]
    Io(#[from] io::Error),
    /// The preference file is not a JSON object of strings.
    #[error("Preference file is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),
}

type Result<T> = std::result::Result<T, PreferenceError>;

/// Durable string key-value storage for user preferences.
pub trait PreferenceStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Preferences kept as a flat JSON object in a single file.
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    /// Store backed by the JSON file at `path`. The file is created on the
    /// first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut prefs = match self.read_all() {
            Ok(prefs) => prefs,
            Err(PreferenceError::Serialization(e)) => {
                tracing::warn!(
                    "Overwriting corrupt preference file {}: {e}",
                    self.path.display()
                );
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        prefs.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&prefs)?)?;
        tracing::debug!("Stored preference {key}={value} in {}", self.path.display());

        Ok(())
    }
}

/// Process-local preferences, lost on exit.
#[derive(Default)]
pub struct MemoryPreferenceStore {
    data: Mutex<HashMap<String, String>>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.data
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Resolves and persists the page theme.
///
/// Any stored value wins over the platform color scheme: `dark` selects the
/// dark theme and every other non-empty value selects light.
pub struct ThemeController {
    store: Arc<dyn PreferenceStore>,
    current: Theme,
}

impl ThemeController {
    /// Applies the stored preference, or `system` when none is stored.
    pub fn new(store: Arc<dyn PreferenceStore>, system: Theme) -> Self {
        let mut controller = Self { store, current: system };
        if let Some(saved) = controller.saved() {
            controller.current = saved.parse().unwrap_or(Theme::Light);
        }
        tracing::debug!("Initial theme: {}", controller.current);
        controller
    }

    /// The theme in effect.
    pub fn current(&self) -> Theme {
        self.current
    }

    /// Switches to the other theme and stores it as the user's choice.
    ///
    /// The switch is applied even if the preference cannot be stored.
    pub fn toggle(&mut self) -> Theme {
        let next = self.current.toggled();
        if let Err(e) = self.store.set(THEME_KEY, next.as_str()) {
            tracing::warn!("Failed to store theme preference: {e}");
        }
        self.current = next;
        next
    }

    /// Follows a platform color-scheme change unless the user has chosen a
    /// theme. Returns whether the theme was applied.
    pub fn on_system_change(&mut self, system: Theme) -> bool {
        if self.saved().is_some() {
            return false;
        }
        self.current = system;
        true
    }

    /// The raw stored choice; empty values count as none.
    fn saved(&self) -> Option<String> {
        match self.store.get(THEME_KEY) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                tracing::warn!("Failed to read theme preference: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_parse_and_display() {
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!(" light ".parse::<Theme>(), Ok(Theme::Light));
        assert!("Dark".parse::<Theme>().is_err());
        assert_eq!(Theme::Dark.to_string(), "dark");
        assert_eq!(Theme::Light.label(), "🖌️ Light");
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn test_initial_theme_falls_back_to_system() {
        let store = Arc::new(MemoryPreferenceStore::default());

        let controller = ThemeController::new(store, Theme::Dark);

        assert_eq!(controller.current(), Theme::Dark);
    }

    #[test]
    fn test_saved_theme_wins_over_system() {
        let store = Arc::new(MemoryPreferenceStore::default());
        store.set(THEME_KEY, "light").unwrap();

        let controller = ThemeController::new(store, Theme::Dark);

        assert_eq!(controller.current(), Theme::Light);
    }

    #[test]
    fn test_unknown_saved_value_selects_light_and_blocks_system() {
        let store = Arc::new(MemoryPreferenceStore::default());
        store.set(THEME_KEY, "sepia").unwrap();

        let mut controller = ThemeController::new(store, Theme::Dark);

        assert_eq!(controller.current(), Theme::Light);
        assert!(!controller.on_system_change(Theme::Dark));
        assert_eq!(controller.current(), Theme::Light);
    }

    #[test]
    fn test_empty_saved_value_follows_system() {
        let store = Arc::new(MemoryPreferenceStore::default());
        store.set(THEME_KEY, "").unwrap();

        let mut controller = ThemeController::new(store, Theme::Dark);

        assert_eq!(controller.current(), Theme::Dark);
        assert!(controller.on_system_change(Theme::Light));
        assert_eq!(controller.current(), Theme::Light);
    }

    #[test]
    fn test_toggle_persists_choice() {
        let store = Arc::new(MemoryPreferenceStore::default());
        let mut controller = ThemeController::new(store.clone(), Theme::Light);

        assert_eq!(controller.toggle(), Theme::Dark);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        assert_eq!(controller.toggle(), Theme::Light);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_system_change_applies_without_saved_choice() {
        let store = Arc::new(MemoryPreferenceStore::default());
        let mut controller = ThemeController::new(store, Theme::Light);

        assert!(controller.on_system_change(Theme::Dark));
        assert_eq!(controller.current(), Theme::Dark);
    }

    #[test]
    fn test_system_change_ignored_after_toggle() {
        let store = Arc::new(MemoryPreferenceStore::default());
        let mut controller = ThemeController::new(store, Theme::Light);
        controller.toggle();

        assert!(!controller.on_system_change(Theme::Light));
        assert_eq!(controller.current(), Theme::Dark);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");
        let store = FilePreferenceStore::new(&path);

        assert_eq!(store.get(THEME_KEY).unwrap(), None);

        store.set(THEME_KEY, "dark").unwrap();
        store.set("other", "value").unwrap();

        let reopened = FilePreferenceStore::new(&path);
        assert_eq!(reopened.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("value"));
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();
        let store = Arc::new(FilePreferenceStore::new(&path));

        assert!(matches!(store.get(THEME_KEY), Err(PreferenceError::Serialization(_))));
        // A corrupt store behaves like an empty one for theme resolution.
        assert_eq!(ThemeController::new(store, Theme::Light).current(), Theme::Light);
    }

    #[test]
    fn test_file_store_overwrites_corrupt_file_on_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();
        let store = Arc::new(FilePreferenceStore::new(&path));
        let mut controller = ThemeController::new(store.clone(), Theme::Light);

        assert_eq!(controller.toggle(), Theme::Dark);

        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        let reopened = Arc::new(FilePreferenceStore::new(&path));
        assert_eq!(ThemeController::new(reopened, Theme::Light).current(), Theme::Dark);
    }
}
