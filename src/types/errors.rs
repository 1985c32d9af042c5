use thiserror::Error;

// === CanonicalizeError ===

/// Errors raised while projecting a raw saved-search payload onto its identity.
#[derive(Debug, Error)]
pub enum CanonicalizeError {
    /// The payload is not parseable JSON or lacks the required search fields.
    #[error("Malformed search payload: {0}")]
    MalformedPayload(String),
}

// === SettingsError ===

/// Errors related to loading and saving the user settings object.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
}

// === StorageError ===

/// Errors reported by the host page's key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The host environment does not provide a persistent store.
    #[error("Host storage unavailable")]
    Unavailable,
    /// The host store refused the write (quota, security policy, ...).
    #[error("Host storage rejected write to '{key}': {reason}")]
    WriteRejected { key: String, reason: String },
}

// === LocaleError ===

/// Errors related to localization engine operations.
#[derive(Debug, Error)]
pub enum LocaleError {
    /// The requested locale is not supported.
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),
    /// An embedded locale table failed to parse.
    #[error("Invalid locale table '{locale}': {reason}")]
    InvalidTable { locale: String, reason: String },
}

// === HistoryError ===

/// Errors related to history and pin list maintenance.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The payload handed to the list manager could not be canonicalized.
    #[error("History payload rejected: {0}")]
    Malformed(#[from] CanonicalizeError),
    /// The settings store rejected the save that follows every mutation.
    #[error("History persistence failed: {0}")]
    Persist(#[from] SettingsError),
}

// === SidebarError ===

/// Errors surfaced by the sidebar controller.
#[derive(Debug, Error)]
pub enum SidebarError {
    /// A list operation failed.
    #[error("Sidebar history error: {0}")]
    History(#[from] HistoryError),
    /// Loading persisted settings failed during activation.
    #[error("Sidebar settings error: {0}")]
    Settings(#[from] SettingsError),
}
