// Flightmarks UI layer
// Drawing surface abstraction and the time-sliced sidebar renderer.

pub mod renderer;
pub mod surface;
