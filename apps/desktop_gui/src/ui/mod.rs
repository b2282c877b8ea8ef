//! UI layer for desktop GUI: app shell, filter bar, employee table, and dialogs.

pub mod app;
pub mod forms;

pub use app::{DesktopGuiApp, PersistedDesktopSettings, StartupConfig, SETTINGS_STORAGE_KEY};
