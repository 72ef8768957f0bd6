use nalgebra::{Unit, UnitQuaternion, Vector3};

use crate::hand::landmark::{LandmarkIndex, WorldLandmarks, DEGENERATE_EPS};
use crate::retarget::math::shortest_arc;

/// レスト姿勢でモデルの「長さ」軸（指が伸びる方向）
pub const REST_FORWARD: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);
/// レスト姿勢でモデルの「上」軸（手の甲方向）
pub const REST_UP: Vector3<f32> = Vector3::new(0.0, 0.0, 1.0);

/// 手全体の位置と正規直交基底
#[derive(Debug, Clone)]
pub struct RootBasis {
    /// 手首ランドマークそのもの
    pub position: Vector3<f32>,
    pub orientation: UnitQuaternion<f32>,
    pub forward: Unit<Vector3<f32>>,
    pub right: Unit<Vector3<f32>>,
    pub up: Unit<Vector3<f32>>,
}

/// 4つのアンカーランドマーク (0, 5, 9, 17) から手全体の姿勢を解く
///
/// forward = 中指MCP - 手首、right = 人差し指MCP - 小指MCP、
/// up = forward × right。forward への swing 回転に、up を合わせる
/// twist 補正を前から掛けて最終姿勢とする。
/// アンカーが縮退していれば None（このフレームはスキップ）
pub fn solve_root(world: &WorldLandmarks) -> Option<RootBasis> {
    let forward = world.direction(LandmarkIndex::Wrist, LandmarkIndex::MiddleMcp)?;
    let right = world.direction(LandmarkIndex::PinkyMcp, LandmarkIndex::IndexMcp)?;
    let up = forward
        .cross(&right.into_inner())
        .try_normalize(DEGENERATE_EPS)
        .map(Unit::new_unchecked)?;

    let swing = shortest_arc(&Unit::new_unchecked(REST_FORWARD), &forward);
    let swung_up = Unit::new_unchecked(swing * REST_UP);
    let twist = shortest_arc(&swung_up, &up);
    let orientation = twist * swing;

    Some(RootBasis {
        position: world.get(LandmarkIndex::Wrist),
        orientation,
        forward,
        right,
        up,
    })
}
