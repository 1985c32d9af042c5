use flightmarks::types::errors::*;

// === CanonicalizeError Tests ===

#[test]
fn canonicalize_error_display() {
    let err = CanonicalizeError::MalformedPayload("not JSON".to_string());
    assert_eq!(err.to_string(), "Malformed search payload: not JSON");
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("permission denied".to_string()).to_string(),
        "Settings I/O error: permission denied"
    );
    assert_eq!(
        SettingsError::SerializationError("trailing comma".to_string()).to_string(),
        "Settings serialization error: trailing comma"
    );
}

// === StorageError Tests ===

#[test]
fn storage_error_display_variants() {
    assert_eq!(StorageError::Unavailable.to_string(), "Host storage unavailable");
    assert_eq!(
        StorageError::WriteRejected {
            key: "savedSearch.0".to_string(),
            reason: "quota".to_string(),
        }
        .to_string(),
        "Host storage rejected write to 'savedSearch.0': quota"
    );
}

// === LocaleError Tests ===

#[test]
fn locale_error_display_variants() {
    assert_eq!(
        LocaleError::UnsupportedLocale("fr".to_string()).to_string(),
        "Unsupported locale: fr"
    );
    assert_eq!(
        LocaleError::InvalidTable {
            locale: "de".to_string(),
            reason: "EOF".to_string(),
        }
        .to_string(),
        "Invalid locale table 'de': EOF"
    );
}

// === HistoryError / SidebarError Tests ===

#[test]
fn history_error_wraps_malformed_payload() {
    let err: HistoryError = CanonicalizeError::MalformedPayload("x".to_string()).into();
    assert!(matches!(err, HistoryError::Malformed(_)));
    assert_eq!(
        err.to_string(),
        "History payload rejected: Malformed search payload: x"
    );
}

#[test]
fn sidebar_error_chains_sources() {
    let err: SidebarError = HistoryError::Persist(SettingsError::IoError("disk".to_string())).into();
    assert_eq!(
        err.to_string(),
        "Sidebar history error: History persistence failed: Settings I/O error: disk"
    );
    let source = std::error::Error::source(&err).expect("history error is the source");
    assert!(source.to_string().starts_with("History persistence failed"));
}

#[test]
fn errors_implement_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(StorageError::Unavailable);
    assert!(err.source().is_none());
}
