// Flightmarks state managers
// Managers own mutable state: the history and pin lists.

pub mod history_manager;
