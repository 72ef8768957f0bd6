pub mod clip;
pub mod frame;
pub mod landmark;

pub use frame::FrameAdapter;
pub use landmark::{Landmark, LandmarkIndex, WorldLandmarks};
