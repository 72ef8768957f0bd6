use crate::config::Config;
use crate::hand::frame::FrameAdapter;
use crate::hand::landmark::Landmark;
use crate::retarget::bone_map::BoneMap;
use crate::retarget::root::solve_root;
use crate::retarget::smooth::{blend_position, blend_rotation};
use crate::retarget::solver::solve_bones;
use crate::rig::apply::HandPose;
use crate::rig::skeleton::{RootPose, Skeleton};

/// 1トラッキングセッション分のリターゲティングパイプライン
///
/// トラッキング開始時に構築し、停止時に破棄する。毎フレーム
/// update を呼び、返った HandPose を apply_pose で書き込む。
/// 平滑化の「前回値」はスケルトンが持つ現在の回転そのものなので、
/// セッション自体は設定以外の状態を持たない
#[derive(Debug, Clone)]
pub struct RetargetSession {
    adapter: FrameAdapter,
    map: BoneMap,
    smooth_position: f32,
    smooth_rotation: f32,
    smooth_bone: f32,
}

impl RetargetSession {
    pub fn new(map: BoneMap, config: &Config) -> Self {
        Self {
            adapter: FrameAdapter::from_config(&config.adapter),
            map,
            smooth_position: config.smooth.position,
            smooth_rotation: config.smooth.rotation,
            smooth_bone: config.smooth.bone,
        }
    }

    /// 1フレーム分のリターゲティング
    ///
    /// 21点未満・検出なし・アンカー縮退は None（このフレームは
    /// 何も適用せず、スケルトンは前回の姿勢を保持する）
    pub fn update(&self, raw: &[Landmark], skeleton: &Skeleton) -> Option<HandPose> {
        let world = self.adapter.adapt(raw)?;
        let basis = solve_root(&world)?;

        // ルートは指より控えめに動かす（係数は別々）
        let prev = skeleton.root_pose();
        let root = RootPose {
            position: blend_position(prev.position, basis.position, self.smooth_position),
            orientation: blend_rotation(
                &prev.orientation,
                &basis.orientation,
                self.smooth_rotation,
            ),
        };

        let bones = solve_bones(
            &world,
            &basis,
            &root.orientation,
            &self.map,
            skeleton,
            self.smooth_bone,
        );

        Some(HandPose { root, bones })
    }
}
