use nalgebra::{UnitQuaternion, Vector3};

/// 回転空間での一次ローパスフィルタ
///
/// 前回適用した回転から新しい目標回転へ slerp で近づける。
/// 速度状態を持たないためオーバーシュートしない。
/// alpha = 1.0 で平滑化なし（即座に目標へ）
pub fn blend_rotation(
    prev: &UnitQuaternion<f32>,
    target: &UnitQuaternion<f32>,
    alpha: f32,
) -> UnitQuaternion<f32> {
    let alpha = alpha.clamp(0.0, 1.0);

    // shortest path: 内積が負なら target を反転
    let target = if prev.coords.dot(&target.coords) < 0.0 {
        UnitQuaternion::new_unchecked(-target.into_inner())
    } else {
        *target
    };

    // 反転済みなので対蹠で失敗するのは数値誤差のときだけ
    prev.try_slerp(&target, alpha, 1.0e-6).unwrap_or(target)
}

/// 位置の成分ごと lerp
pub fn blend_position(prev: Vector3<f32>, target: Vector3<f32>, alpha: f32) -> Vector3<f32> {
    let alpha = alpha.clamp(0.0, 1.0);
    prev + (target - prev) * alpha
}
