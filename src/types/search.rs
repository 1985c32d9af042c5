use serde::{Deserialize, Serialize};

/// Wire shape of the host page's saved search, keyed by the numeric field
/// tags the page uses. Only the fields that matter to identity and linking
/// are modelled; everything else in the payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedSearch {
    /// Search key used by the page's `#search:research=` hash route.
    #[serde(rename = "1")]
    pub key: String,
    #[serde(rename = "3")]
    pub params: SavedSearchParams,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedSearchParams {
    #[serde(rename = "7", default)]
    pub legs: Option<Vec<SavedSearchLeg>>,
    /// Cabin class code, e.g. `COACH` or `BUSINESS`.
    #[serde(rename = "8")]
    pub cabin: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedSearchLeg {
    #[serde(rename = "3", default)]
    pub origin: Option<Vec<String>>,
    #[serde(rename = "5", default)]
    pub destination: Option<Vec<String>>,
}

/// One flight leg of a canonical search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteLeg {
    pub origin: Vec<String>,
    pub destination: Vec<String>,
}

/// Canonical identity of a search: route plus cabin, nothing volatile.
///
/// Two raw payloads that differ only in their cache-busting token compare
/// equal here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchRecord {
    pub route: Vec<RouteLeg>,
    pub cabin: String,
}

/// A parsed payload: the canonical identity plus the search key needed to
/// build deep links.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSearch {
    pub key: String,
    pub record: SearchRecord,
}

impl From<SavedSearch> for ParsedSearch {
    fn from(saved: SavedSearch) -> Self {
        let route = saved
            .params
            .legs
            .unwrap_or_default()
            .into_iter()
            .map(|leg| RouteLeg {
                origin: leg.origin.unwrap_or_default(),
                destination: leg.destination.unwrap_or_default(),
            })
            .collect();

        Self {
            key: saved.key,
            record: SearchRecord {
                route,
                cabin: saved.params.cabin,
            },
        }
    }
}
