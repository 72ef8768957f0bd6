pub mod apply;
pub mod skeleton;

pub use apply::{apply_pose, BoneUpdate, HandPose};
pub use skeleton::{Bone, BoneDef, RootPose, Skeleton};
