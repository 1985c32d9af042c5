// Flightmarks services
// Services provide self-contained functionality: canonicalization, settings, localization, links.

pub mod cabin_names;
pub mod canonicalizer;
pub mod clock;
pub mod localization_engine;
pub mod search_links;
pub mod settings_engine;
