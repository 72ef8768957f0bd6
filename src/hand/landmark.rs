use nalgebra::{Unit, Vector3};

/// 正規化の下限。これ未満のベクトルは縮退扱い
pub const DEGENERATE_EPS: f32 = 1.0e-6;

/// ハンドランドマークの 21 点インデックス
///
/// 0 が手首、1〜4 が親指、以降は各指 MCP/PIP/DIP/TIP の順
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum LandmarkIndex {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexMcp = 5,
    IndexPip = 6,
    IndexDip = 7,
    IndexTip = 8,
    MiddleMcp = 9,
    MiddlePip = 10,
    MiddleDip = 11,
    MiddleTip = 12,
    RingMcp = 13,
    RingPip = 14,
    RingDip = 15,
    RingTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl LandmarkIndex {
    pub const COUNT: usize = 21;

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Wrist),
            1 => Some(Self::ThumbCmc),
            2 => Some(Self::ThumbMcp),
            3 => Some(Self::ThumbIp),
            4 => Some(Self::ThumbTip),
            5 => Some(Self::IndexMcp),
            6 => Some(Self::IndexPip),
            7 => Some(Self::IndexDip),
            8 => Some(Self::IndexTip),
            9 => Some(Self::MiddleMcp),
            10 => Some(Self::MiddlePip),
            11 => Some(Self::MiddleDip),
            12 => Some(Self::MiddleTip),
            13 => Some(Self::RingMcp),
            14 => Some(Self::RingPip),
            15 => Some(Self::RingDip),
            16 => Some(Self::RingTip),
            17 => Some(Self::PinkyMcp),
            18 => Some(Self::PinkyPip),
            19 => Some(Self::PinkyDip),
            20 => Some(Self::PinkyTip),
            _ => None,
        }
    }

    /// 親指チェーン (1〜4) か
    pub fn is_thumb(self) -> bool {
        matches!(
            self,
            Self::ThumbCmc | Self::ThumbMcp | Self::ThumbIp | Self::ThumbTip
        )
    }
}

/// 推定器が出力する単一ランドマーク（推定器座標系）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// 座標系変換後の 21 点（右手系ワールド座標）
///
/// 順序・個数はランドマークと同一。毎フレーム作り直され、
/// フレームをまたぐ同一性は持たない
#[derive(Debug, Clone, PartialEq)]
pub struct WorldLandmarks {
    points: [Vector3<f32>; LandmarkIndex::COUNT],
}

impl WorldLandmarks {
    pub fn new(points: [Vector3<f32>; LandmarkIndex::COUNT]) -> Self {
        Self { points }
    }

    pub fn get(&self, index: LandmarkIndex) -> Vector3<f32> {
        self.points[index as usize]
    }

    pub fn points(&self) -> &[Vector3<f32>; LandmarkIndex::COUNT] {
        &self.points
    }

    /// start から end へ向かう単位方向ベクトル
    /// 2点が一致（縮退）していれば None
    pub fn direction(
        &self,
        start: LandmarkIndex,
        end: LandmarkIndex,
    ) -> Option<Unit<Vector3<f32>>> {
        let dir = self.get(end) - self.get(start);
        dir.try_normalize(DEGENERATE_EPS).map(Unit::new_unchecked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_index_count() {
        assert_eq!(LandmarkIndex::COUNT, 21);
    }

    #[test]
    fn test_landmark_index_from_index() {
        assert_eq!(LandmarkIndex::from_index(0), Some(LandmarkIndex::Wrist));
        assert_eq!(LandmarkIndex::from_index(9), Some(LandmarkIndex::MiddleMcp));
        assert_eq!(LandmarkIndex::from_index(20), Some(LandmarkIndex::PinkyTip));
        assert_eq!(LandmarkIndex::from_index(21), None);
    }

    #[test]
    fn test_is_thumb() {
        assert!(LandmarkIndex::ThumbCmc.is_thumb());
        assert!(LandmarkIndex::ThumbTip.is_thumb());
        assert!(!LandmarkIndex::Wrist.is_thumb());
        assert!(!LandmarkIndex::IndexMcp.is_thumb());
    }

    #[test]
    fn test_direction_normalized() {
        let mut points = [Vector3::zeros(); LandmarkIndex::COUNT];
        points[LandmarkIndex::MiddleMcp as usize] = Vector3::new(0.0, 3.0, 4.0);
        let world = WorldLandmarks::new(points);

        let dir = world
            .direction(LandmarkIndex::Wrist, LandmarkIndex::MiddleMcp)
            .unwrap();
        assert!((dir.norm() - 1.0).abs() < 1e-6);
        assert!((dir.y - 0.6).abs() < 1e-6);
        assert!((dir.z - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_direction_degenerate() {
        let points = [Vector3::zeros(); LandmarkIndex::COUNT];
        let world = WorldLandmarks::new(points);
        // 全点一致なので方向は定義できない
        assert!(world
            .direction(LandmarkIndex::Wrist, LandmarkIndex::IndexMcp)
            .is_none());
    }
}
