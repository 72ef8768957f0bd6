use nalgebra::{Unit, UnitQuaternion};

use crate::hand::landmark::WorldLandmarks;
use crate::retarget::bone_map::{BoneMap, BoneMapEntry};
use crate::retarget::math::{project_onto_plane, project_onto_plane_normalized, shortest_arc};
use crate::retarget::root::RootBasis;
use crate::retarget::smooth::blend_rotation;
use crate::rig::apply::BoneUpdate;
use crate::rig::skeleton::Skeleton;

/// 各ボーンのローカル回転を親→子の順で解く
///
/// 親の回転は平滑化適用後の値を使うため、走査しながら平滑化も行う。
/// root_orientation には平滑化済みのルート回転を渡すこと。
///
/// マップにないボーン、親がボーンでないボーン、ランドマークペアが
/// 縮退したボーンは更新せず、前フレームの回転を保持する
pub fn solve_bones(
    world: &WorldLandmarks,
    basis: &RootBasis,
    root_orientation: &UnitQuaternion<f32>,
    map: &BoneMap,
    skeleton: &Skeleton,
    alpha: f32,
) -> Vec<BoneUpdate> {
    let mut world_rot: Vec<UnitQuaternion<f32>> = Vec::with_capacity(skeleton.len());
    let mut updates = Vec::new();

    for (index, bone) in skeleton.bones().iter().enumerate() {
        // 親がボーンでなければ対象外（ルートや補助ボーン）
        let solved = bone.parent.and_then(|parent| {
            let entry = map.get(&bone.name)?;
            let target = solve_entry(world, basis, entry, &world_rot[parent])?;
            Some(blend_rotation(&bone.local_rotation, &target, alpha))
        });

        let local = match solved {
            Some(rotation) => {
                updates.push(BoneUpdate {
                    bone: index,
                    rotation,
                });
                rotation
            }
            None => bone.local_rotation,
        };

        let parent_world = match bone.parent {
            Some(parent) => world_rot[parent],
            None => *root_orientation,
        };
        world_rot.push(parent_world * local);
    }

    updates
}

/// マップエントリ1本分の目標ローカル回転
fn solve_entry(
    world: &WorldLandmarks,
    basis: &RootBasis,
    entry: &BoneMapEntry,
    parent_world: &UnitQuaternion<f32>,
) -> Option<UnitQuaternion<f32>> {
    let world_dir = world.direction(entry.start, entry.end)?;
    let parent_inv = parent_world.inverse();
    let local_dir = Unit::new_unchecked(parent_inv * world_dir.into_inner());

    // 基本則: 基準軸を観測方向へ向ける swing だけで
    // ヒンジ的な関節 (pip/dip/ip) には十分
    let swing = shortest_arc(&entry.axis, &local_dir);
    let mut rotation = swing;

    // 親指則: swing 後の第二軸を forward へ向ける twist を前から掛ける
    if let Some(secondary) = &entry.secondary {
        let reference = swing * secondary.into_inner();
        let forward_local = parent_inv * basis.forward.into_inner();
        // 両方を長さ軸に直交する平面へ射影し、twist を純粋な軸まわり回転にする
        let a = project_onto_plane_normalized(reference, &local_dir);
        let b = project_onto_plane_normalized(forward_local, &local_dir);
        if let (Some(a), Some(b)) = (a, b) {
            rotation = shortest_arc(&a, &b) * rotation;
        }
    }

    // MCP外転則: 手のひら平面上での隣接指との開きを roll で合わせる
    if let Some(splay) = &entry.splay {
        let observed = world.get(entry.start) - world.get(splay.neighbor);
        let palm = project_onto_plane(observed, &basis.up);
        let observed_local = parent_inv * palm;
        let reference = rotation * splay.side.into_inner();
        let a = project_onto_plane_normalized(reference, &local_dir);
        let b = project_onto_plane_normalized(observed_local, &local_dir);
        if let (Some(a), Some(b)) = (a, b) {
            rotation = shortest_arc(&a, &b).powf(splay.strength) * rotation;
        }
    }

    Some(rotation)
}
