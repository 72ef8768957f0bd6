use anyhow::Result;
use minifb::{Key, Window, WindowOptions};
use nalgebra::Vector3;

use crate::hand::WorldLandmarks;
use crate::render::skeleton::{
    BONE_COLOR, CONNECTION_COLOR, HAND_CONNECTIONS, LANDMARK_COLOR, MIRROR_BONE_COLOR,
};
use crate::rig::Skeleton;

/// ワールド1単位あたりのピクセル数
const PIXELS_PER_UNIT: f32 = 120.0;

/// minifbを使用したデバッグビューア
///
/// ワールド座標のXY平面を平行投影で描くだけの簡易表示
pub struct MinifbRenderer {
    window: Window,
    buffer: Vec<u32>,
    width: usize,
    height: usize,
}

impl MinifbRenderer {
    /// ウィンドウを作成
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let window = Window::new(
            title,
            width,
            height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )?;

        let buffer = vec![0u32; width * height];

        Ok(Self {
            window,
            buffer,
            width,
            height,
        })
    }

    /// ウィンドウが開いているか
    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    pub fn clear(&mut self) {
        self.buffer.fill(0x111111);
    }

    /// ワールド座標 → ピクセル座標（Y反転の平行投影）
    fn to_pixel(&self, p: &Vector3<f32>) -> (i32, i32) {
        let px = self.width as f32 / 2.0 + p.x * PIXELS_PER_UNIT;
        let py = self.height as f32 * 0.8 - p.y * PIXELS_PER_UNIT;
        (px as i32, py as i32)
    }

    /// 変換後ランドマークと接続線を描画
    pub fn draw_landmarks(&mut self, world: &WorldLandmarks) {
        for (start, end) in HAND_CONNECTIONS.iter() {
            let (x1, y1) = self.to_pixel(&world.get(*start));
            let (x2, y2) = self.to_pixel(&world.get(*end));
            self.draw_line(x1, y1, x2, y2, CONNECTION_COLOR);
        }
        for point in world.points().iter() {
            let (px, py) = self.to_pixel(point);
            self.draw_circle(px, py, 3, LANDMARK_COLOR);
        }
    }

    /// リターゲット後のスケルトンをFKで描画
    pub fn draw_skeleton(&mut self, skeleton: &Skeleton) {
        let color = if skeleton.scale().x < 0.0 {
            MIRROR_BONE_COLOR
        } else {
            BONE_COLOR
        };
        for (head, tail) in skeleton.world_segments() {
            let (x1, y1) = self.to_pixel(&head);
            let (x2, y2) = self.to_pixel(&tail);
            self.draw_line(x1, y1, x2, y2, color);
            let (px, py) = self.to_pixel(&tail);
            self.draw_circle(px, py, 2, color);
        }
    }

    /// バッファをウィンドウに表示
    pub fn update(&mut self) -> Result<()> {
        self.window
            .update_with_buffer(&self.buffer, self.width, self.height)?;
        Ok(())
    }

    /// Bresenhamのアルゴリズムで線を描画
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        let mut x = x0;
        let mut y = y0;

        loop {
            self.set_pixel(x, y, color);

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// 円を描画（塗りつぶし）
    fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, color: u32) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// ピクセルをセット（境界チェック付き）
    fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[y as usize * self.width + x as usize] = color;
        }
    }
}
