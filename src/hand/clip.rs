use nalgebra::{UnitQuaternion, Vector3};

use crate::hand::landmark::{Landmark, LandmarkIndex};

/// ワールド座標 → 推定器座標の逆変換に使うスケール
/// （デフォルト設定の FrameAdapter と対になる値）
const WORLD_SCALE: f32 = 1.5;

/// 合成ランドマーククリップ（カメラなしのデモ・検証用）
///
/// 平手をベースに、手首の揺れと握り込みを時間 t (秒) で合成して
/// 推定器座標系の21点を返す。実カメラ+推定器の代わりに
/// デモバイナリへ流し込む
pub fn clip_frame(t: f32) -> Vec<Landmark> {
    // 握り具合 0.0(開)〜1.0(握)
    let grasp = (0.5 - 0.5 * (t * 1.3).cos()).clamp(0.0, 1.0);
    // 手首の横揺れ
    let sway = Vector3::new(0.3 * (t * 0.8).sin(), 0.05 * (t * 1.7).sin(), 0.0);

    let mut points = [Vector3::zeros(); LandmarkIndex::COUNT];
    points[LandmarkIndex::Wrist as usize] = sway;

    let fingers = [
        (LandmarkIndex::IndexMcp as usize, -0.2_f32),
        (LandmarkIndex::MiddleMcp as usize, 0.0),
        (LandmarkIndex::RingMcp as usize, 0.2),
        (LandmarkIndex::PinkyMcp as usize, 0.4),
    ];
    // 関節ごとに曲げ角を累積させる（根元ほど浅く、先ほど深く）
    let bend = grasp * 1.2;
    for (mcp, x) in fingers {
        let knuckle = sway + Vector3::new(x, 1.0, 0.0);
        points[mcp] = knuckle;
        let segments = [(0.4, bend), (0.3, bend * 1.5), (0.2, bend * 1.8)];
        let mut head = knuckle;
        let mut angle = 0.0;
        for (i, (length, segment_bend)) in segments.iter().enumerate() {
            angle += segment_bend;
            // -Z側（手のひら側）へ折る
            let dir = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -angle)
                * Vector3::new(0.0, *length, 0.0);
            head += dir;
            points[mcp + 1 + i] = head;
        }
    }

    // 親指は開閉にあわせて軽く内転させる
    let thumb_in = grasp * 0.5;
    let thumb = [
        Vector3::new(-0.4, 0.4, 0.0),
        Vector3::new(-0.5, 0.8, 0.0),
        Vector3::new(-0.55, 1.1, 0.0),
        Vector3::new(-0.6, 1.3, 0.0),
    ];
    let fold = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), thumb_in);
    for (i, offset) in thumb.iter().enumerate() {
        points[LandmarkIndex::ThumbCmc as usize + i] = sway + fold * *offset;
    }

    // FrameAdapter (mirror + 反転 + スケール) の逆変換で推定器座標へ戻す
    points
        .iter()
        .map(|p| Landmark::new(-p.x / WORLD_SCALE, -p.y / WORLD_SCALE, -p.z / WORLD_SCALE))
        .collect()
}
