use nalgebra::Vector3;

use crate::config::AdapterConfig;
use crate::hand::landmark::{Landmark, LandmarkIndex, WorldLandmarks};

/// 推定器座標系 → ワールド座標系の変換
///
/// フロントカメラの鏡像補正として X/Y を反転し、奥行きを前方向へ
/// 変換するため Z も反転する。最後に一様スケールを掛ける。
/// 21 点未満の入力は「検出なし」と同じ扱いで None を返す。
/// ここがパイプライン全体の唯一の完全性ゲート
#[derive(Debug, Clone)]
pub struct FrameAdapter {
    mirror_x: bool,
    world_scale: f32,
}

impl FrameAdapter {
    pub fn new(mirror_x: bool, world_scale: f32) -> Self {
        Self {
            mirror_x,
            world_scale,
        }
    }

    pub fn from_config(config: &AdapterConfig) -> Self {
        Self::new(config.mirror_x, config.world_scale)
    }

    pub fn adapt(&self, raw: &[Landmark]) -> Option<WorldLandmarks> {
        if raw.len() < LandmarkIndex::COUNT {
            return None;
        }

        let sx = if self.mirror_x { -1.0 } else { 1.0 };
        let mut points = [Vector3::zeros(); LandmarkIndex::COUNT];
        for (point, lm) in points.iter_mut().zip(raw.iter()) {
            *point = Vector3::new(sx * lm.x, -lm.y, -lm.z) * self.world_scale;
        }

        Some(WorldLandmarks::new(points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_input() -> Vec<Landmark> {
        (0..LandmarkIndex::COUNT)
            .map(|i| Landmark::new(i as f32 * 0.1, 0.2, 0.3))
            .collect()
    }

    #[test]
    fn test_too_few_points_rejected() {
        let adapter = FrameAdapter::new(true, 1.5);
        let raw: Vec<Landmark> = full_input().into_iter().take(20).collect();
        assert!(adapter.adapt(&raw).is_none());
        assert!(adapter.adapt(&[]).is_none());
    }

    #[test]
    fn test_axis_flip_and_scale() {
        let adapter = FrameAdapter::new(true, 1.5);
        let mut raw = full_input();
        raw[0] = Landmark::new(0.2, 0.4, -0.1);
        let world = adapter.adapt(&raw).unwrap();

        let wrist = world.get(LandmarkIndex::Wrist);
        assert!((wrist.x - (-0.2 * 1.5)).abs() < 1e-6);
        assert!((wrist.y - (-0.4 * 1.5)).abs() < 1e-6);
        assert!((wrist.z - (0.1 * 1.5)).abs() < 1e-6);
    }

    #[test]
    fn test_mirror_off_keeps_x_sign() {
        let adapter = FrameAdapter::new(false, 1.0);
        let mut raw = full_input();
        raw[0] = Landmark::new(0.2, 0.4, -0.1);
        let world = adapter.adapt(&raw).unwrap();

        let wrist = world.get(LandmarkIndex::Wrist);
        assert!((wrist.x - 0.2).abs() < 1e-6);
        assert!((wrist.y - (-0.4)).abs() < 1e-6);
    }

    #[test]
    fn test_order_preserved() {
        let adapter = FrameAdapter::new(false, 1.0);
        let world = adapter.adapt(&full_input()).unwrap();
        // i番目の入力がi番目の出力に対応する
        for i in 0..LandmarkIndex::COUNT {
            let index = LandmarkIndex::from_index(i).unwrap();
            assert!((world.get(index).x - i as f32 * 0.1).abs() < 1e-6);
        }
    }
}
