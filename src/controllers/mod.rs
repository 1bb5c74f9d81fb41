pub mod input_controller;
pub mod orbit_controller;

pub use input_controller::{InputController, PointerEvent, PointerPhase, PrimaryTouch};
pub use orbit_controller::OrbitControls;
