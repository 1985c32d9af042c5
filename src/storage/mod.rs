// Flightmarks host storage boundary
// The host page owns its persistent key-value store; this module wraps it so
// writes can be observed without changing what the page sees.

pub mod interceptor;
pub mod observed;
