pub mod config;
pub mod hand;
pub mod render;
pub mod retarget;
pub mod rig;
