//! Cabin-name resolver.

/// Maps a cabin class code to a display label.
pub trait CabinNames {
    fn cabin_label(&self, code: &str) -> String;
}

/// Resolver for the ITA Matrix cabin codes the host page stores.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItaCabinNames;

impl CabinNames for ItaCabinNames {
    /// Unknown codes are shown as-is.
    fn cabin_label(&self, code: &str) -> String {
        match code {
            "COACH" => "Economy",
            "PREMIUM-COACH" => "Premium economy",
            "BUSINESS" => "Business",
            "FIRST" => "First",
            other => other,
        }
        .to_string()
    }
}
