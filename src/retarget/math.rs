use nalgebra::{Unit, UnitQuaternion, Vector3};

use crate::hand::landmark::DEGENERATE_EPS;

/// 2つの単位ベクトル間の最小角回転（shortest arc）
///
/// from ≈ to なら恒等回転、from ≈ -to なら任意の垂直軸まわりの180度回転
pub fn shortest_arc(
    from: &Unit<Vector3<f32>>,
    to: &Unit<Vector3<f32>>,
) -> UnitQuaternion<f32> {
    if let Some(q) = UnitQuaternion::rotation_between(&from.into_inner(), &to.into_inner()) {
        return q;
    }
    // 反平行: rotation_between では軸が定まらないので垂直軸を選ぶ
    let axis = any_perpendicular(from);
    UnitQuaternion::from_axis_angle(&axis, std::f32::consts::PI)
}

/// v に垂直な適当な単位ベクトル
fn any_perpendicular(v: &Unit<Vector3<f32>>) -> Unit<Vector3<f32>> {
    let candidate = if v.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    Unit::new_normalize(v.cross(&candidate))
}

/// v を法線 normal の平面へ射影する（正規化はしない）
pub fn project_onto_plane(v: Vector3<f32>, normal: &Unit<Vector3<f32>>) -> Vector3<f32> {
    v - normal.into_inner() * v.dot(&normal.into_inner())
}

/// 平面射影して正規化。射影が縮退すれば None
pub fn project_onto_plane_normalized(
    v: Vector3<f32>,
    normal: &Unit<Vector3<f32>>,
) -> Option<Unit<Vector3<f32>>> {
    project_onto_plane(v, normal)
        .try_normalize(DEGENERATE_EPS)
        .map(Unit::new_unchecked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(x: f32, y: f32, z: f32) -> Unit<Vector3<f32>> {
        Unit::new_normalize(Vector3::new(x, y, z))
    }

    #[test]
    fn test_shortest_arc_maps_from_to_to() {
        let cases = [
            (unit(0.0, 1.0, 0.0), unit(1.0, 0.0, 0.0)),
            (unit(0.0, 1.0, 0.0), unit(0.3, 0.8, -0.5)),
            (unit(1.0, 2.0, 3.0), unit(-2.0, 1.0, 0.5)),
        ];
        for (from, to) in cases {
            let q = shortest_arc(&from, &to);
            let mapped = q * from.into_inner();
            assert!(
                (mapped - to.into_inner()).norm() < 1e-5,
                "mapped {:?} != target {:?}",
                mapped,
                to
            );
        }
    }

    #[test]
    fn test_shortest_arc_identity() {
        let a = unit(0.0, 1.0, 0.0);
        let q = shortest_arc(&a, &a);
        assert!(q.angle() < 1e-6);
    }

    #[test]
    fn test_shortest_arc_antiparallel() {
        let a = unit(0.0, 1.0, 0.0);
        let b = unit(0.0, -1.0, 0.0);
        let q = shortest_arc(&a, &b);
        // 180度回転で a が b に移る
        assert!((q.angle() - std::f32::consts::PI).abs() < 1e-5);
        let mapped = q * a.into_inner();
        assert!((mapped - b.into_inner()).norm() < 1e-5);
    }

    #[test]
    fn test_project_onto_plane() {
        let normal = unit(0.0, 0.0, 1.0);
        let v = Vector3::new(1.0, 2.0, 3.0);
        let projected = project_onto_plane(v, &normal);
        assert!(projected.z.abs() < 1e-6);
        assert!((projected.x - 1.0).abs() < 1e-6);
        assert!((projected.y - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_project_degenerate() {
        let normal = unit(0.0, 0.0, 1.0);
        // 法線に平行なベクトルの射影はゼロになる
        assert!(project_onto_plane_normalized(Vector3::new(0.0, 0.0, 5.0), &normal).is_none());
    }
}
