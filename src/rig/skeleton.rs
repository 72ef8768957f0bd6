use anyhow::{bail, Result};
use nalgebra::{UnitQuaternion, Vector3};
use std::collections::HashMap;

/// スケルトンのルートノードに適用する位置と姿勢
#[derive(Debug, Clone, PartialEq)]
pub struct RootPose {
    pub position: Vector3<f32>,
    pub orientation: UnitQuaternion<f32>,
}

impl RootPose {
    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            orientation: UnitQuaternion::identity(),
        }
    }
}

/// スケルトン構築用のボーン定義
#[derive(Debug, Clone)]
pub struct BoneDef {
    pub name: String,
    pub parent: Option<String>,
    /// 親ローカルでのボーンの伸長方向（表示用FKに使う）
    pub rest_dir: Vector3<f32>,
    pub length: f32,
}

impl BoneDef {
    pub fn new(
        name: &str,
        parent: Option<&str>,
        rest_dir: Vector3<f32>,
        length: f32,
    ) -> Self {
        Self {
            name: name.to_string(),
            parent: parent.map(str::to_string),
            rest_dir,
            length,
        }
    }
}

/// スケルトン内の1ボーン
#[derive(Debug, Clone)]
pub struct Bone {
    pub name: String,
    /// 親ボーンのインデックス。ルートボーンは None
    pub parent: Option<usize>,
    pub rest_dir: Vector3<f32>,
    pub length: f32,
    /// 親に対するローカル回転。書き込みは Skeleton Applier のみ
    pub local_rotation: UnitQuaternion<f32>,
}

/// 名前付きボーン階層
///
/// ボーン列は親が必ず子より前に並ぶ（from_bones で検証）。
/// scale は表示時の鏡像反転用で、回転の計算には影響しない
#[derive(Debug, Clone)]
pub struct Skeleton {
    bones: Vec<Bone>,
    root: RootPose,
    scale: Vector3<f32>,
}

impl Skeleton {
    /// ボーン定義列からスケルトンを構築する
    ///
    /// 名前の重複、未定義の親、親より前に子が来る並びはエラー
    pub fn from_bones(defs: Vec<BoneDef>) -> Result<Self> {
        let mut indices: HashMap<String, usize> = HashMap::new();
        let mut bones = Vec::with_capacity(defs.len());

        for def in defs {
            if indices.contains_key(&def.name) {
                bail!("duplicate bone name: {}", def.name);
            }
            let parent = match &def.parent {
                Some(parent_name) => match indices.get(parent_name) {
                    Some(&index) => Some(index),
                    None => bail!(
                        "bone {} references parent {} that is not defined before it",
                        def.name,
                        parent_name
                    ),
                },
                None => None,
            };
            indices.insert(def.name.clone(), bones.len());
            bones.push(Bone {
                name: def.name,
                parent,
                rest_dir: def.rest_dir,
                length: def.length,
                local_rotation: UnitQuaternion::identity(),
            });
        }

        Ok(Self {
            bones,
            root: RootPose::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        })
    }

    /// 21ボーンの標準ハンドトポロジー
    ///
    /// ルート "hand" の下に手のひらの仮想ボーン5本、その先に各指の
    /// セグメントが連なる。rest姿勢は指が+Y、親指側が-Xを向く平手
    pub fn canonical_hand() -> Self {
        let up = Vector3::new(0.0, 1.0, 0.0);
        let mut defs = vec![BoneDef::new("hand", None, up, 0.0)];

        let fingers = [
            ("index", -0.2_f32),
            ("middle", 0.0),
            ("ring", 0.2),
            ("pinky", 0.4),
        ];
        for (finger, x) in fingers {
            let palm = format!("palm_{}", finger);
            let mcp = format!("{}_mcp", finger);
            let pip = format!("{}_pip", finger);
            let dip = format!("{}_dip", finger);
            let knuckle = Vector3::new(x, 1.0, 0.0);
            defs.push(BoneDef::new(
                &palm,
                Some("hand"),
                knuckle.normalize(),
                knuckle.norm(),
            ));
            defs.push(BoneDef::new(&mcp, Some(&palm), up, 0.4));
            defs.push(BoneDef::new(&pip, Some(&mcp), up, 0.3));
            defs.push(BoneDef::new(&dip, Some(&pip), up, 0.2));
        }

        let cmc = Vector3::new(-0.4, 0.4, 0.0);
        defs.push(BoneDef::new(
            "palm_thumb",
            Some("hand"),
            cmc.normalize(),
            cmc.norm(),
        ));
        defs.push(BoneDef::new(
            "thumb_cmc",
            Some("palm_thumb"),
            Vector3::new(-0.1, 0.4, 0.0).normalize(),
            0.412,
        ));
        defs.push(BoneDef::new(
            "thumb_mcp",
            Some("thumb_cmc"),
            Vector3::new(-0.05, 0.3, 0.0).normalize(),
            0.304,
        ));
        defs.push(BoneDef::new(
            "thumb_ip",
            Some("thumb_mcp"),
            Vector3::new(-0.05, 0.2, 0.0).normalize(),
            0.206,
        ));

        Self::from_bones(defs).expect("canonical topology is valid")
    }

    /// X軸反転した鏡像インスタンスを返す
    ///
    /// 回転はそのまま共有し、反転は表示時のスケールとしてだけ持つ。
    /// 同じ HandPose を両方に適用すれば鏡像の左手になる
    pub fn mirrored(&self) -> Self {
        let mut mirrored = self.clone();
        mirrored.scale.x = -self.scale.x;
        mirrored
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    pub fn bone(&self, index: usize) -> &Bone {
        &self.bones[index]
    }

    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    pub fn bone_index(&self, name: &str) -> Option<usize> {
        self.bones.iter().position(|bone| bone.name == name)
    }

    pub fn root_pose(&self) -> &RootPose {
        &self.root
    }

    pub fn scale(&self) -> Vector3<f32> {
        self.scale
    }

    pub fn set_root_pose(&mut self, pose: RootPose) {
        self.root = pose;
    }

    pub fn set_local_rotation(&mut self, index: usize, rotation: UnitQuaternion<f32>) {
        self.bones[index].local_rotation = rotation;
    }

    /// ルート姿勢と祖先のローカル回転を合成したワールド回転
    pub fn world_rotation(&self, index: usize) -> UnitQuaternion<f32> {
        let mut rotation = self.bones[index].local_rotation;
        let mut current = self.bones[index].parent;
        while let Some(parent) = current {
            rotation = self.bones[parent].local_rotation * rotation;
            current = self.bones[parent].parent;
        }
        self.root.orientation * rotation
    }

    /// 表示用FK: 各ボーンの (頭位置, 尾位置) を計算する
    ///
    /// 鏡像スケールはルート原点まわりで成分ごとに適用する
    pub fn world_segments(&self) -> Vec<(Vector3<f32>, Vector3<f32>)> {
        let mut world_rot: Vec<UnitQuaternion<f32>> = Vec::with_capacity(self.bones.len());
        // ルート原点からの相対尾位置（スケール適用前）
        let mut tails: Vec<Vector3<f32>> = Vec::with_capacity(self.bones.len());
        let mut segments = Vec::with_capacity(self.bones.len());

        for bone in &self.bones {
            let (parent_rot, head) = match bone.parent {
                Some(parent) => (world_rot[parent], tails[parent]),
                None => (self.root.orientation, Vector3::zeros()),
            };
            let rotation = parent_rot * bone.local_rotation;
            let tail = head + rotation * (bone.rest_dir * bone.length);
            world_rot.push(rotation);
            tails.push(tail);
            segments.push((
                self.root.position + head.component_mul(&self.scale),
                self.root.position + tail.component_mul(&self.scale),
            ));
        }

        segments
    }

    /// 全ローカル回転とルート姿勢をrestに戻す
    /// トラッキング開始し直しのときに呼ぶ
    pub fn reset_to_rest(&mut self) {
        for bone in &mut self.bones {
            bone.local_rotation = UnitQuaternion::identity();
        }
        self.root = RootPose::identity();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_topology() {
        let skeleton = Skeleton::canonical_hand();
        assert_eq!(skeleton.len(), 21);

        let root = skeleton.bone_index("hand").unwrap();
        assert!(skeleton.bone(root).parent.is_none());

        for finger in ["index", "middle", "ring", "pinky"] {
            let palm = skeleton.bone_index(&format!("palm_{}", finger)).unwrap();
            let mcp = skeleton.bone_index(&format!("{}_mcp", finger)).unwrap();
            assert_eq!(skeleton.bone(palm).parent, Some(root));
            assert_eq!(skeleton.bone(mcp).parent, Some(palm));
        }

        let palm_thumb = skeleton.bone_index("palm_thumb").unwrap();
        let thumb_cmc = skeleton.bone_index("thumb_cmc").unwrap();
        assert_eq!(skeleton.bone(palm_thumb).parent, Some(root));
        assert_eq!(skeleton.bone(thumb_cmc).parent, Some(palm_thumb));
    }

    #[test]
    fn test_parents_before_children() {
        let skeleton = Skeleton::canonical_hand();
        for (i, bone) in skeleton.bones().iter().enumerate() {
            if let Some(parent) = bone.parent {
                assert!(parent < i, "bone {} comes before its parent", bone.name);
            }
        }
    }

    #[test]
    fn test_from_bones_rejects_duplicate() {
        let defs = vec![
            BoneDef::new("a", None, Vector3::y(), 1.0),
            BoneDef::new("a", None, Vector3::y(), 1.0),
        ];
        assert!(Skeleton::from_bones(defs).is_err());
    }

    #[test]
    fn test_from_bones_rejects_forward_parent() {
        // 子が親より先に並んでいる
        let defs = vec![
            BoneDef::new("child", Some("parent"), Vector3::y(), 1.0),
            BoneDef::new("parent", None, Vector3::y(), 1.0),
        ];
        assert!(Skeleton::from_bones(defs).is_err());
    }

    #[test]
    fn test_world_rotation_composes() {
        let defs = vec![
            BoneDef::new("a", None, Vector3::y(), 1.0),
            BoneDef::new("b", Some("a"), Vector3::y(), 1.0),
        ];
        let mut skeleton = Skeleton::from_bones(defs).unwrap();
        let qa = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.5);
        let qb = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 0.3);
        skeleton.set_local_rotation(0, qa);
        skeleton.set_local_rotation(1, qb);

        let expected = qa * qb;
        assert!(skeleton.world_rotation(1).angle_to(&expected) < 1e-6);

        // ルート姿勢も合成される
        let root_q = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 1.0);
        skeleton.set_root_pose(RootPose {
            position: Vector3::zeros(),
            orientation: root_q,
        });
        assert!(skeleton.world_rotation(1).angle_to(&(root_q * expected)) < 1e-6);
    }

    #[test]
    fn test_mirrored_flips_scale_only() {
        let skeleton = Skeleton::canonical_hand();
        let mirrored = skeleton.mirrored();
        assert_eq!(mirrored.scale().x, -1.0);
        assert_eq!(mirrored.scale().y, 1.0);
        assert_eq!(mirrored.len(), skeleton.len());
        // 回転は共有される
        for i in 0..skeleton.len() {
            assert_eq!(
                skeleton.bone(i).local_rotation,
                mirrored.bone(i).local_rotation
            );
        }
    }

    #[test]
    fn test_world_segments_rest_pose() {
        let skeleton = Skeleton::canonical_hand();
        let segments = skeleton.world_segments();
        let palm_middle = skeleton.bone_index("palm_middle").unwrap();
        let middle_mcp = skeleton.bone_index("middle_mcp").unwrap();

        // rest では palm_middle の尾がまっすぐ +Y 方向 1.0 にある
        let (_, tail) = segments[palm_middle];
        assert!((tail - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-5);
        // middle_mcp は palm_middle の尾から伸びる
        let (head, _) = segments[middle_mcp];
        assert!((head - tail).norm() < 1e-5);
    }

    #[test]
    fn test_reset_to_rest() {
        let mut skeleton = Skeleton::canonical_hand();
        skeleton.set_local_rotation(3, UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 1.0));
        skeleton.set_root_pose(RootPose {
            position: Vector3::new(1.0, 2.0, 3.0),
            orientation: UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.7),
        });
        skeleton.reset_to_rest();
        assert!(skeleton.bone(3).local_rotation.angle() < 1e-6);
        assert!(skeleton.root_pose().position.norm() < 1e-6);
        assert!(skeleton.root_pose().orientation.angle() < 1e-6);
    }
}
