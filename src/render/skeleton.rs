use crate::hand::LandmarkIndex;

/// デバッグ描画用のランドマーク接続定義 (開始, 終了)
pub const HAND_CONNECTIONS: [(LandmarkIndex, LandmarkIndex); 21] = [
    // 親指
    (LandmarkIndex::Wrist, LandmarkIndex::ThumbCmc),
    (LandmarkIndex::ThumbCmc, LandmarkIndex::ThumbMcp),
    (LandmarkIndex::ThumbMcp, LandmarkIndex::ThumbIp),
    (LandmarkIndex::ThumbIp, LandmarkIndex::ThumbTip),
    // 人差し指
    (LandmarkIndex::Wrist, LandmarkIndex::IndexMcp),
    (LandmarkIndex::IndexMcp, LandmarkIndex::IndexPip),
    (LandmarkIndex::IndexPip, LandmarkIndex::IndexDip),
    (LandmarkIndex::IndexDip, LandmarkIndex::IndexTip),
    // 中指
    (LandmarkIndex::IndexMcp, LandmarkIndex::MiddleMcp),
    (LandmarkIndex::MiddleMcp, LandmarkIndex::MiddlePip),
    (LandmarkIndex::MiddlePip, LandmarkIndex::MiddleDip),
    (LandmarkIndex::MiddleDip, LandmarkIndex::MiddleTip),
    // 薬指
    (LandmarkIndex::MiddleMcp, LandmarkIndex::RingMcp),
    (LandmarkIndex::RingMcp, LandmarkIndex::RingPip),
    (LandmarkIndex::RingPip, LandmarkIndex::RingDip),
    (LandmarkIndex::RingDip, LandmarkIndex::RingTip),
    // 小指と手のひら外縁
    (LandmarkIndex::RingMcp, LandmarkIndex::PinkyMcp),
    (LandmarkIndex::Wrist, LandmarkIndex::PinkyMcp),
    (LandmarkIndex::PinkyMcp, LandmarkIndex::PinkyPip),
    (LandmarkIndex::PinkyPip, LandmarkIndex::PinkyDip),
    (LandmarkIndex::PinkyDip, LandmarkIndex::PinkyTip),
];

/// ランドマーク点の色 (RGB)
pub const LANDMARK_COLOR: u32 = 0x00FF00; // 緑

/// ランドマーク接続線の色 (RGB)
pub const CONNECTION_COLOR: u32 = 0xFFFF00; // 黄色

/// リターゲット後スケルトンの色 (RGB)
pub const BONE_COLOR: u32 = 0x00FFFF; // シアン

/// 鏡像スケルトンの色 (RGB)
pub const MIRROR_BONE_COLOR: u32 = 0xFF00FF; // マゼンタ

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connections_cover_all_landmarks() {
        let mut seen = [false; LandmarkIndex::COUNT];
        for (start, end) in HAND_CONNECTIONS.iter() {
            seen[*start as usize] = true;
            seen[*end as usize] = true;
        }
        for (i, covered) in seen.iter().enumerate() {
            assert!(*covered, "landmark {} is not drawn", i);
        }
    }
}
