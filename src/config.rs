use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub adapter: AdapterConfig,
    #[serde(default)]
    pub smooth: SmoothConfig,
    #[serde(default)]
    pub splay: SplayConfig,
}

/// ランドマーク座標系変換の設定
#[derive(Debug, Deserialize, Clone)]
pub struct AdapterConfig {
    /// X軸ミラー（フロントカメラの鏡像補正）
    #[serde(default = "default_mirror_x")]
    pub mirror_x: bool,
    /// ワールド座標への一様スケール
    #[serde(default = "default_world_scale")]
    pub world_scale: f32,
}

/// 平滑化の混合係数（0.0〜1.0、1.0で平滑化なし）
#[derive(Debug, Deserialize, Clone)]
pub struct SmoothConfig {
    /// ルート位置のlerp係数
    #[serde(default = "default_smooth_position")]
    pub position: f32,
    /// ルート回転のslerp係数
    #[serde(default = "default_smooth_rotation")]
    pub rotation: f32,
    /// 指ボーン回転のslerp係数
    #[serde(default = "default_smooth_bone")]
    pub bone: f32,
}

/// 指の外転（開き）補正の強度、指ごとに設定可能
/// 0.0でその指の補正は無効
#[derive(Debug, Deserialize, Clone)]
pub struct SplayConfig {
    #[serde(default = "default_splay_index")]
    pub index: f32,
    #[serde(default = "default_splay_middle")]
    pub middle: f32,
    #[serde(default = "default_splay_ring")]
    pub ring: f32,
    #[serde(default = "default_splay_pinky")]
    pub pinky: f32,
}

fn default_mirror_x() -> bool { true }
fn default_world_scale() -> f32 { 1.5 }
fn default_smooth_position() -> f32 { 0.6 }
fn default_smooth_rotation() -> f32 { 0.4 }
fn default_smooth_bone() -> f32 { 0.5 }
fn default_splay_index() -> f32 { 0.5 }
fn default_splay_middle() -> f32 { 0.0 }
fn default_splay_ring() -> f32 { 0.0 }
fn default_splay_pinky() -> f32 { 1.0 }

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            mirror_x: default_mirror_x(),
            world_scale: default_world_scale(),
        }
    }
}

impl Default for SmoothConfig {
    fn default() -> Self {
        Self {
            position: default_smooth_position(),
            rotation: default_smooth_rotation(),
            bone: default_smooth_bone(),
        }
    }
}

impl Default for SplayConfig {
    fn default() -> Self {
        Self {
            index: default_splay_index(),
            middle: default_splay_middle(),
            ring: default_splay_ring(),
            pinky: default_splay_pinky(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// 設定ファイルがなければデフォルトで続行
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "設定ファイル {} を読めませんでした ({})。デフォルト設定を使用します",
                    path.as_ref().display(),
                    e
                );
                Config::default()
            }
        }
    }
}
