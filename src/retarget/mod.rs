pub mod bone_map;
pub mod math;
pub mod root;
pub mod session;
pub mod smooth;
pub mod solver;

pub use bone_map::{AxisProfile, BoneMap, BoneMapEntry, SplayCorrection};
pub use root::{solve_root, RootBasis};
pub use session::RetargetSession;
pub use solver::solve_bones;
