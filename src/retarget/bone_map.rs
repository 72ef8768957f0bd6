use nalgebra::{Unit, Vector3};

use crate::config::SplayConfig;
use crate::hand::landmark::{LandmarkIndex, WorldLandmarks, DEGENERATE_EPS};
use crate::retarget::math::{project_onto_plane, project_onto_plane_normalized};
use crate::retarget::root::solve_root;

/// 外転（開き）補正の定義
#[derive(Debug, Clone)]
pub struct SplayCorrection {
    /// 隣接指のMCPランドマーク
    pub neighbor: LandmarkIndex,
    /// restローカルでの横方向の基準（隣接指からこの指へ向かう向き）
    pub side: Unit<Vector3<f32>>,
    /// 補正強度 (0.0〜1.0)
    pub strength: f32,
}

/// ボーン1本分のマッピング定義
#[derive(Debug, Clone)]
pub struct BoneMapEntry {
    /// スケルトン側のボーン名
    pub bone: &'static str,
    pub start: LandmarkIndex,
    pub end: LandmarkIndex,
    /// restローカルでボーンが伸びる方向（単位ベクトル）
    pub axis: Unit<Vector3<f32>>,
    /// swing-twist 用の第二基準軸。Some ならtwist補正を行う
    pub secondary: Option<Unit<Vector3<f32>>>,
    pub splay: Option<SplayCorrection>,
}

/// スケルトンアセットごとの基準軸セット
///
/// 軸の向きはアセット依存で、Blender上で確認した値を名前付き定数として
/// 持つ。別のリグは別の AxisProfile を定義すればよく、コードパスは増えない
#[derive(Debug, Clone)]
pub struct AxisProfile {
    /// 指ボーン（人差し指〜小指、palm含む）の長さ軸
    pub finger_axis: Vector3<f32>,
    /// 親指ボーンの長さ軸
    pub thumb_axis: Vector3<f32>,
    /// 親指の第二基準軸（twist用）
    pub thumb_up: Vector3<f32>,
}

impl AxisProfile {
    /// modi.glb 系リグで実測した軸
    pub fn modi() -> Self {
        Self {
            finger_axis: Vector3::new(0.0, 1.0, 0.0),
            thumb_axis: Vector3::new(0.0, 0.0, -1.0),
            thumb_up: Vector3::new(0.0, 1.0, 0.0),
        }
    }
}

/// ボーン名 → ランドマークペア + 基準軸の静的テーブル
///
/// 手のひらの仮想ボーン（手首→各MCP）と指セグメントの両方を持つ。
/// フレームをまたぐ状態はなく、共有読み取りのみ
#[derive(Debug, Clone)]
pub struct BoneMap {
    entries: Vec<BoneMapEntry>,
}

/// (ボーン名, start, end) の固定トポロジー。20本
const BONE_PAIRS: [(&str, LandmarkIndex, LandmarkIndex); 20] = {
    use LandmarkIndex as L;
    [
        ("palm_thumb", L::Wrist, L::ThumbCmc),
        ("palm_index", L::Wrist, L::IndexMcp),
        ("palm_middle", L::Wrist, L::MiddleMcp),
        ("palm_ring", L::Wrist, L::RingMcp),
        ("palm_pinky", L::Wrist, L::PinkyMcp),
        ("thumb_cmc", L::ThumbCmc, L::ThumbMcp),
        ("thumb_mcp", L::ThumbMcp, L::ThumbIp),
        ("thumb_ip", L::ThumbIp, L::ThumbTip),
        ("index_mcp", L::IndexMcp, L::IndexPip),
        ("index_pip", L::IndexPip, L::IndexDip),
        ("index_dip", L::IndexDip, L::IndexTip),
        ("middle_mcp", L::MiddleMcp, L::MiddlePip),
        ("middle_pip", L::MiddlePip, L::MiddleDip),
        ("middle_dip", L::MiddleDip, L::MiddleTip),
        ("ring_mcp", L::RingMcp, L::RingPip),
        ("ring_pip", L::RingPip, L::RingDip),
        ("ring_dip", L::RingDip, L::RingTip),
        ("pinky_mcp", L::PinkyMcp, L::PinkyPip),
        ("pinky_pip", L::PinkyPip, L::PinkyDip),
        ("pinky_dip", L::PinkyDip, L::PinkyTip),
    ]
};

/// MCPボーンと隣接指MCPの対応。外転は隣接指との相対で観測する
const SPLAY_NEIGHBORS: [(&str, LandmarkIndex); 4] = [
    ("index_mcp", LandmarkIndex::MiddleMcp),
    ("middle_mcp", LandmarkIndex::IndexMcp),
    ("ring_mcp", LandmarkIndex::PinkyMcp),
    ("pinky_mcp", LandmarkIndex::RingMcp),
];

fn splay_strength(bone: &str, splay: &SplayConfig) -> f32 {
    match bone {
        "index_mcp" => splay.index,
        "middle_mcp" => splay.middle,
        "ring_mcp" => splay.ring,
        "pinky_mcp" => splay.pinky,
        _ => 0.0,
    }
}

fn splay_neighbor(bone: &str) -> Option<LandmarkIndex> {
    SPLAY_NEIGHBORS
        .iter()
        .find(|(name, _)| *name == bone)
        .map(|(_, neighbor)| *neighbor)
}

impl BoneMap {
    /// 名前付き軸プロファイルからテーブルを構築する
    pub fn from_profile(profile: &AxisProfile, splay: &SplayConfig) -> Self {
        let finger_axis = Unit::new_normalize(profile.finger_axis);
        let thumb_axis = Unit::new_normalize(profile.thumb_axis);
        let thumb_up = Unit::new_normalize(profile.thumb_up);

        let entries = BONE_PAIRS
            .iter()
            .map(|&(bone, start, end)| {
                let is_thumb_segment = bone.starts_with("thumb_");
                let axis = if is_thumb_segment { thumb_axis } else { finger_axis };
                // Blender実測: 人差し指は-X側、中指は+X側…に開く
                let side = match bone {
                    "index_mcp" => Some(Vector3::new(-1.0, 0.0, 0.0)),
                    "middle_mcp" => Some(Vector3::new(1.0, 0.0, 0.0)),
                    "ring_mcp" => Some(Vector3::new(-1.0, 0.0, 0.0)),
                    "pinky_mcp" => Some(Vector3::new(1.0, 0.0, 0.0)),
                    _ => None,
                };
                BoneMapEntry {
                    bone,
                    start,
                    end,
                    axis,
                    secondary: is_thumb_segment.then_some(thumb_up),
                    splay: Self::build_splay(bone, side, splay),
                }
            })
            .collect();

        Self { entries }
    }

    /// 既知のレスト姿勢フィクスチャから基準軸を導出する
    ///
    /// レストでは全ボーンのローカル回転が恒等なので、各ボーンの基準軸は
    /// フィクスチャ上の方向をルート基底へ引き戻したものに一致する。
    /// 軸を推測で決める代わりに、フィクスチャで検証済みの値を使える。
    /// フィクスチャが縮退していれば None
    pub fn from_rest_fixture(world: &WorldLandmarks, splay: &SplayConfig) -> Option<Self> {
        let basis = solve_root(world)?;
        let root_inv = basis.orientation.inverse();

        let mut entries = Vec::with_capacity(BONE_PAIRS.len());
        for &(bone, start, end) in BONE_PAIRS.iter() {
            let world_dir = world.direction(start, end)?;
            let axis = Unit::new_unchecked(root_inv * world_dir.into_inner());

            // 親指のtwist基準: forwardを長さ軸に直交する平面へ射影した向き
            let secondary = if bone.starts_with("thumb_") {
                let forward_rest = root_inv * basis.forward.into_inner();
                Some(project_onto_plane_normalized(forward_rest, &axis)?)
            } else {
                None
            };

            // 外転の横方向基準もフィクスチャの実測から取る
            let side = splay_neighbor(bone).and_then(|neighbor| {
                let observed = world.get(start) - world.get(neighbor);
                let palm = project_onto_plane(observed, &basis.up);
                (root_inv * palm).try_normalize(DEGENERATE_EPS)
            });

            entries.push(BoneMapEntry {
                bone,
                start,
                end,
                axis,
                secondary,
                splay: Self::build_splay(bone, side, splay),
            });
        }

        Some(Self { entries })
    }

    fn build_splay(
        bone: &str,
        side: Option<Vector3<f32>>,
        splay: &SplayConfig,
    ) -> Option<SplayCorrection> {
        let strength = splay_strength(bone, splay);
        if strength <= 0.0 {
            return None;
        }
        let side = side?;
        Some(SplayCorrection {
            neighbor: splay_neighbor(bone)?,
            side: Unit::new_normalize(side),
            strength,
        })
    }

    pub fn get(&self, bone: &str) -> Option<&BoneMapEntry> {
        self.entries.iter().find(|entry| entry.bone == bone)
    }

    pub fn entries(&self) -> &[BoneMapEntry] {
        &self.entries
    }
}
