pub mod landmarks;
pub mod scan;
pub mod engine;

pub use engine::{apply_step, ensure_movable, MovementEngine, StepOutcome};
pub use landmarks::Landmarks;
pub use scan::{compute_next_stop, next_stop_for};
