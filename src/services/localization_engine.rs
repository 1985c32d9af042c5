use std::collections::HashMap;

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde_json::Value;

use crate::types::errors::LocaleError;

/// Supported locales with their embedded translation tables.
const LOCALE_TABLES: &[(&str, &str)] = &[
    ("en", include_str!("../../locales/en.json")),
    ("de", include_str!("../../locales/de.json")),
];

/// Default locale when the configured language is not supported.
const DEFAULT_LOCALE: &str = "en";

const MINUTES_IN_DAY: i64 = 1440;
const MINUTES_IN_ALMOST_TWO_DAYS: i64 = 2520;
const MINUTES_IN_MONTH: i64 = 43200;
const MINUTES_IN_TWO_MONTHS: i64 = 86400;

/// Trait defining the localization engine interface.
pub trait LocalizationEngineTrait {
    fn set_locale(&mut self, lang: &str) -> Result<(), LocaleError>;
    fn get_locale(&self) -> &str;
    fn t(&self, key: &str, params: Option<&HashMap<String, String>>) -> String;
    fn plural(&self, key: &str, count: u64, params: Option<&HashMap<String, String>>) -> String;
    fn format_distance(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String;
    fn get_available_locales(&self) -> Vec<String>;
}

/// Localization engine for sidebar strings and relative-time labels.
#[derive(Debug, Clone)]
pub struct LocalizationEngine {
    /// Current active locale (e.g., "en" or "de").
    current_locale: String,
    /// Parsed locale tables keyed by locale name.
    locales: HashMap<String, Value>,
}

impl LocalizationEngine {
    /// Creates an engine with every embedded table loaded and `en` active.
    pub fn new() -> Result<Self, LocaleError> {
        let mut locales = HashMap::new();
        for (locale, source) in LOCALE_TABLES {
            let data: Value =
                serde_json::from_str(source).map_err(|e| LocaleError::InvalidTable {
                    locale: locale.to_string(),
                    reason: e.to_string(),
                })?;
            locales.insert(locale.to_string(), data);
        }

        Ok(Self {
            current_locale: DEFAULT_LOCALE.to_string(),
            locales,
        })
    }

    /// Creates an engine for the user's configured language, falling back to
    /// English when the language is not supported.
    pub fn for_language(lang: &str) -> Result<Self, LocaleError> {
        let mut engine = Self::new()?;
        if let Err(e) = engine.set_locale(lang) {
            tracing::debug!(error = %e, "falling back to {}", DEFAULT_LOCALE);
        }
        Ok(engine)
    }

    /// Looks up a nested key in a JSON value using dot notation.
    /// For example, "sidebar.history" looks up `value["sidebar"]["history"]`.
    fn lookup_key<'a>(data: &'a Value, key: &str) -> Option<&'a Value> {
        let mut current = data;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// Replaces `{param_name}` placeholders in a string with values from the params map.
    fn interpolate(template: &str, params: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in params {
            let placeholder = format!("{{{}}}", key);
            result = result.replace(&placeholder, value);
        }
        result
    }

    /// English and German share the same two plural categories.
    fn plural_form(count: u64) -> &'static str {
        if count == 1 {
            "one"
        } else {
            "other"
        }
    }

    /// Picks the distance token and count for a span of minutes, using the
    /// thresholds of date-fns' `formatDistance`.
    fn distance_token(minutes: i64, months: i64) -> (&'static str, u64) {
        let round_div = |value: i64, unit: i64| ((value as f64) / (unit as f64)).round() as u64;

        if minutes < 2 {
            if minutes == 0 {
                ("less_than_x_minutes", 1)
            } else {
                ("x_minutes", minutes as u64)
            }
        } else if minutes < 45 {
            ("x_minutes", minutes as u64)
        } else if minutes < 90 {
            ("about_x_hours", 1)
        } else if minutes < MINUTES_IN_DAY {
            ("about_x_hours", round_div(minutes, 60))
        } else if minutes < MINUTES_IN_ALMOST_TWO_DAYS {
            ("x_days", 1)
        } else if minutes < MINUTES_IN_MONTH {
            ("x_days", round_div(minutes, MINUTES_IN_DAY))
        } else if minutes < MINUTES_IN_TWO_MONTHS {
            ("about_x_months", round_div(minutes, MINUTES_IN_MONTH))
        } else if months < 12 {
            ("x_months", round_div(minutes, MINUTES_IN_MONTH).max(1))
        } else {
            let years = (months / 12) as u64;
            match months % 12 {
                0..=2 => ("about_x_years", years),
                3..=8 => ("over_x_years", years),
                _ => ("almost_x_years", years + 1),
            }
        }
    }
}

/// Whole calendar months from `earlier` to `later`.
fn calendar_months_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    let mut months = (later.year() as i64 - earlier.year() as i64) * 12
        + (later.month() as i64 - earlier.month() as i64);
    let later_in_month = (later.day(), later.num_seconds_from_midnight());
    let earlier_in_month = (earlier.day(), earlier.num_seconds_from_midnight());
    if months > 0 && later_in_month < earlier_in_month {
        months -= 1;
    }
    months
}

impl LocalizationEngineTrait for LocalizationEngine {
    /// Switches the active locale. Returns an error if the locale is not supported.
    fn set_locale(&mut self, lang: &str) -> Result<(), LocaleError> {
        if !self.locales.contains_key(lang) {
            return Err(LocaleError::UnsupportedLocale(lang.to_string()));
        }
        self.current_locale = lang.to_string();
        Ok(())
    }

    fn get_locale(&self) -> &str {
        &self.current_locale
    }

    /// Looks up a translation key using dot notation and optionally interpolates parameters.
    /// Returns the key itself if the translation is not found.
    fn t(&self, key: &str, params: Option<&HashMap<String, String>>) -> String {
        let text = self
            .locales
            .get(&self.current_locale)
            .and_then(|data| Self::lookup_key(data, key))
            .and_then(Value::as_str);

        match (text, params) {
            (Some(text), Some(p)) => Self::interpolate(text, p),
            (Some(text), None) => text.to_string(),
            (None, _) => key.to_string(),
        }
    }

    /// Looks up a pluralized key (`<key>_one` / `<key>_other`) with `{count}`
    /// filled in. Falls back to `_other`, then to the bare key.
    fn plural(&self, key: &str, count: u64, params: Option<&HashMap<String, String>>) -> String {
        let mut merged_params = params.cloned().unwrap_or_default();
        merged_params
            .entry("count".to_string())
            .or_insert_with(|| count.to_string());

        let plural_key = format!("{}_{}", key, Self::plural_form(count));
        let result = self.t(&plural_key, Some(&merged_params));
        if result != plural_key {
            return result;
        }

        let other_key = format!("{}_other", key);
        let other_result = self.t(&other_key, Some(&merged_params));
        if other_result == other_key {
            key.to_string()
        } else {
            other_result
        }
    }

    /// Human-readable distance between `timestamp` and `now` with a
    /// direction suffix, e.g. "3 hours ago" / "vor etwa 3 Stunden".
    fn format_distance(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
        let (earlier, later, direction) = if timestamp <= now {
            (timestamp, now, "relative.past")
        } else {
            (now, timestamp, "relative.future")
        };

        let seconds = (later - earlier).num_seconds();
        let minutes = ((seconds as f64) / 60.0).round() as i64;
        let months = calendar_months_between(earlier, later);

        let (token, count) = Self::distance_token(minutes, months);
        let distance = self.plural(&format!("distance.{}", token), count, None);

        let mut params = HashMap::new();
        params.insert("distance".to_string(), distance);
        self.t(direction, Some(&params))
    }

    /// Returns a sorted list of all available locales.
    fn get_available_locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = self.locales.keys().cloned().collect();
        locales.sort();
        locales
    }
}
