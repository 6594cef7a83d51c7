//! Ray casting against oriented boxes and bounded planes.

use glam::{Affine3A, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

/// Nearest intersection of a ray with a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// World-space point.
    pub point: Vec3,
    /// Normal of the face that was hit, in the target's local frame.
    pub normal: Vec3,
    /// Distance from the ray origin.
    pub distance: f32,
}

const EPSILON: f32 = 1e-8;

/// Intersect a cube of half-size `half` centred on the origin of `world`.
/// Only faces the ray enters through count.
pub fn intersect_box(ray: &Ray, world: Affine3A, half: f32) -> Option<Hit> {
    let inverse = world.inverse();
    let origin = inverse.transform_point3(ray.origin);
    let direction = inverse.transform_vector3(ray.direction);

    let mut near = f32::NEG_INFINITY;
    let mut far = f32::INFINITY;
    let mut entry_axis = 0;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        if d.abs() < EPSILON {
            if o.abs() > half {
                return None;
            }
            continue;
        }
        let mut t0 = (-half - o) / d;
        let mut t1 = (half - o) / d;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        if t0 > near {
            near = t0;
            entry_axis = axis;
        }
        far = far.min(t1);
        if near > far {
            return None;
        }
    }

    // Behind the ray, or the origin is inside the box.
    if near < 0.0 || !near.is_finite() {
        return None;
    }

    let mut normal = Vec3::ZERO;
    normal[entry_axis] = -direction[entry_axis].signum();

    let point = world.transform_point3(origin + direction * near);
    Some(Hit {
        point,
        normal,
        distance: (point - ray.origin).length(),
    })
}

/// Intersect the square `[-half, half]²` on the local z = 0 plane of `world`.
/// Both sides count.
pub fn intersect_plane(ray: &Ray, world: Affine3A, half: f32) -> Option<Hit> {
    let inverse = world.inverse();
    let origin = inverse.transform_point3(ray.origin);
    let direction = inverse.transform_vector3(ray.direction);

    if direction.z.abs() < EPSILON {
        return None;
    }
    let t = -origin.z / direction.z;
    if t < 0.0 {
        return None;
    }
    let local = origin + direction * t;
    if local.x.abs() > half || local.y.abs() > half {
        return None;
    }

    let point = world.transform_point3(local);
    Some(Hit {
        point,
        normal: Vec3::Z,
        distance: (point - ray.origin).length(),
    })
}

/// Nearest box hit among `targets`.
pub fn nearest_box<T>(
    ray: &Ray,
    targets: impl IntoIterator<Item = (T, Affine3A)>,
    half: f32,
) -> Option<(T, Hit)> {
    targets
        .into_iter()
        .filter_map(|(target, world)| intersect_box(ray, world, half).map(|hit| (target, hit)))
        .min_by(|(_, a), (_, b)| a.distance.total_cmp(&b.distance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    fn ray(origin: Vec3, toward: Vec3) -> Ray {
        Ray { origin, direction: (toward - origin).normalize() }
    }

    #[test]
    fn box_hit_reports_entry_face() {
        let r = ray(Vec3::new(0.1, 0.2, 5.0), Vec3::new(0.1, 0.2, 0.0));
        let hit = intersect_box(&r, Affine3A::IDENTITY, 0.5).unwrap();
        assert_eq!(hit.normal, Vec3::Z);
        assert!((hit.point.z - 0.5).abs() < 1e-6);
        assert!((hit.distance - 4.5).abs() < 1e-5);
    }

    #[test]
    fn rotated_box_reports_local_normal() {
        let world = Affine3A::from_quat(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        let r = ray(Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO);
        let hit = intersect_box(&r, world, 0.5).unwrap();
        // World +x is local +z after a quarter turn about y.
        assert!((hit.normal - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn box_miss_and_inside() {
        let r = ray(Vec3::new(2.0, 2.0, 5.0), Vec3::new(2.0, 2.0, 0.0));
        assert!(intersect_box(&r, Affine3A::IDENTITY, 0.5).is_none());
        let inside = ray(Vec3::ZERO, Vec3::X);
        assert!(intersect_box(&inside, Affine3A::IDENTITY, 0.5).is_none());
    }

    #[test]
    fn plane_is_bounded_and_double_sided() {
        let front = ray(Vec3::new(1.0, 1.0, 3.0), Vec3::new(1.0, 1.0, 0.0));
        assert!(intersect_plane(&front, Affine3A::IDENTITY, 10.0).is_some());
        let back = ray(Vec3::new(1.0, 1.0, -3.0), Vec3::new(1.0, 1.0, 0.0));
        assert!(intersect_plane(&back, Affine3A::IDENTITY, 10.0).is_some());
        let outside = ray(Vec3::new(11.0, 0.0, 3.0), Vec3::new(11.0, 0.0, 0.0));
        assert!(intersect_plane(&outside, Affine3A::IDENTITY, 10.0).is_none());
        let parallel = Ray { origin: Vec3::Z, direction: Vec3::X };
        assert!(intersect_plane(&parallel, Affine3A::IDENTITY, 10.0).is_none());
    }

    #[test]
    fn nearest_picks_closest_target() {
        let targets = [
            ("far", Affine3A::from_translation(Vec3::new(0.0, 0.0, -1.0))),
            ("near", Affine3A::from_translation(Vec3::new(0.0, 0.0, 1.0))),
        ];
        let r = ray(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let (name, _) = nearest_box(&r, targets, 0.25).unwrap();
        assert_eq!(name, "near");
    }
}
