use anyhow::Result;
use std::time::Instant;

use kagami_hand::config::Config;
use kagami_hand::hand::clip::clip_frame;
use kagami_hand::hand::FrameAdapter;
use kagami_hand::render::MinifbRenderer;
use kagami_hand::retarget::{AxisProfile, BoneMap, RetargetSession};
use kagami_hand::rig::{apply_pose, Skeleton};

const CONFIG_PATH: &str = "config.toml";

const WIDTH: usize = 960;
const HEIGHT: usize = 540;

fn main() -> Result<()> {
    println!("Hand Viewer");
    println!("Press ESC to exit");

    let config = Config::load_or_default(CONFIG_PATH);
    let adapter = FrameAdapter::from_config(&config.adapter);
    let map = BoneMap::from_profile(&AxisProfile::modi(), &config.splay);
    let session = RetargetSession::new(map, &config);

    let mut right_hand = Skeleton::canonical_hand();
    let mut left_hand = right_hand.mirrored();

    let mut renderer = MinifbRenderer::new("Hand Viewer", WIDTH, HEIGHT)?;

    // FPS計測用
    let mut frame_count = 0u32;
    let mut fps_timer = Instant::now();
    let start = Instant::now();

    // メインループ
    while renderer.is_open() {
        let t = start.elapsed().as_secs_f32();
        let raw = clip_frame(t);

        if let Some(pose) = session.update(&raw, &right_hand) {
            apply_pose(&mut right_hand, &pose);
            apply_pose(&mut left_hand, &pose);
        }

        renderer.clear();
        if let Some(world) = adapter.adapt(&raw) {
            renderer.draw_landmarks(&world);
        }
        renderer.draw_skeleton(&right_hand);
        renderer.draw_skeleton(&left_hand);
        renderer.update()?;

        // FPS計算
        frame_count += 1;
        let elapsed = fps_timer.elapsed().as_secs_f32();
        if elapsed >= 1.0 {
            println!("FPS: {:.1}", frame_count as f32 / elapsed);
            frame_count = 0;
            fps_timer = Instant::now();
        }
    }

    println!("Shutting down...");
    Ok(())
}
