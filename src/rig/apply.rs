use nalgebra::UnitQuaternion;

use crate::rig::skeleton::{RootPose, Skeleton};

/// 1ボーン分の更新。bone は Skeleton のインデックス
#[derive(Debug, Clone)]
pub struct BoneUpdate {
    pub bone: usize,
    pub rotation: UnitQuaternion<f32>,
}

/// 1フレームの出力: 平滑化済みルート姿勢とボーン回転の疎なリスト
///
/// リストにないボーンは前フレームの回転を保持する
#[derive(Debug, Clone)]
pub struct HandPose {
    pub root: RootPose,
    pub bones: Vec<BoneUpdate>,
}

/// HandPose をスケルトンへ書き込む
///
/// 鏡像インスタンスにも同じ HandPose をそのまま適用する。
/// 反転はスケルトン側の表示スケールが担い、ここでは再計算しない
pub fn apply_pose(skeleton: &mut Skeleton, pose: &HandPose) {
    skeleton.set_root_pose(pose.root.clone());
    for update in &pose.bones {
        skeleton.set_local_rotation(update.bone, update.rotation);
    }
}
