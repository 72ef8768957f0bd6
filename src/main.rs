use anyhow::Result;

use kagami_hand::config::Config;
use kagami_hand::hand::clip::clip_frame;
use kagami_hand::retarget::{AxisProfile, BoneMap, RetargetSession};
use kagami_hand::rig::{apply_pose, Skeleton};

const CONFIG_PATH: &str = "config.toml";

/// 合成クリップのフレームレートと長さ
const FPS: f32 = 60.0;
const DURATION_SEC: f32 = 10.0;

fn main() -> Result<()> {
    let config = Config::load_or_default(CONFIG_PATH);

    println!("=== Kagami Hand - Retarget Demo ({}) ===", env!("GIT_VERSION"));
    println!("ミラーX: {}", config.adapter.mirror_x);
    println!("ワールドスケール: {}", config.adapter.world_scale);
    println!(
        "平滑化係数: 位置={} 回転={} ボーン={}",
        config.smooth.position, config.smooth.rotation, config.smooth.bone
    );
    println!();

    let map = BoneMap::from_profile(&AxisProfile::modi(), &config.splay);
    let session = RetargetSession::new(map, &config);

    let mut right_hand = Skeleton::canonical_hand();
    let mut left_hand = right_hand.mirrored();

    println!("合成クリップを {}fps x {}秒 で実行します", FPS, DURATION_SEC);

    let total_frames = (FPS * DURATION_SEC) as u32;
    let mut applied = 0u32;
    let mut held = 0u32;

    for frame in 0..total_frames {
        let t = frame as f32 / FPS;

        // 90〜99フレーム目はトラッキングロストを模擬する
        let raw = if (90..100).contains(&frame) {
            Vec::new()
        } else {
            clip_frame(t)
        };

        match session.update(&raw, &right_hand) {
            Some(pose) => {
                // 1回の計算結果を右手と鏡像の左手の両方に書く
                apply_pose(&mut right_hand, &pose);
                apply_pose(&mut left_hand, &pose);
                applied += 1;
            }
            None => {
                // 検出なし: 前回の姿勢を保持
                held += 1;
            }
        }

        if frame % FPS as u32 == FPS as u32 - 1 {
            let root = right_hand.root_pose();
            let index_pip = right_hand
                .bone_index("index_pip")
                .map(|i| right_hand.bone(i).local_rotation.angle().to_degrees())
                .unwrap_or(0.0);
            println!(
                "t={:>4.1}s 適用={} 保持={} ルート位置=({:+.2}, {:+.2}, {:+.2}) 人差し指PIP={:.0}度",
                t + 1.0 / FPS,
                applied,
                held,
                root.position.x,
                root.position.y,
                root.position.z,
                index_pip
            );
        }
    }

    println!();
    println!(
        "完了: {}フレーム中 {}フレーム適用、{}フレーム保持",
        total_frames, applied, held
    );

    Ok(())
}
