//! Conversions between Bevy's glam math and the nalgebra types used by `shared`.

use bevy::prelude::*;
use nalgebra as na;

pub fn to_point(v: Vec3) -> shared::Point3 {
    na::Point3::new(v.x, v.y, v.z)
}

pub fn to_vector(v: Vec3) -> shared::Vec3 {
    na::Vector3::new(v.x, v.y, v.z)
}

pub fn from_point(p: shared::Point3) -> Vec3 {
    Vec3::new(p.x, p.y, p.z)
}

pub fn from_vector(v: shared::Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

pub fn to_rotation(q: Quat) -> shared::Quat {
    na::UnitQuaternion::from_quaternion(na::Quaternion::new(q.w, q.x, q.y, q.z))
}

pub fn from_rotation(q: shared::Quat) -> Quat {
    let q = q.quaternion();
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_survive_the_trip() {
        let v = Vec3::new(1.0, -2.5, 3.25);
        assert_eq!(from_point(to_point(v)), v);
        assert_eq!(from_vector(to_vector(v)), v);
    }

    #[test]
    fn rotations_rotate_the_same_way() {
        let q = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let rotated = to_rotation(q) * to_vector(Vec3::NEG_Z);
        let expected = q * Vec3::NEG_Z;
        assert!((from_vector(rotated) - expected).length() < 1e-5);
        assert!(from_rotation(to_rotation(q)).angle_between(q) < 1e-5);
    }
}
