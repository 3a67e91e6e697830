//! Axis-aligned bounding boxes for overlap testing, placement and picking

use cgmath::{ElementWise, Vector4, Zero};

use super::{Mat4, Ray, Vec3};

/// Axis-aligned bounding box in whichever space its corners were given in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box of the given full `size` centred on `center`
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self::new(center - half, center + half)
    }

    /// Tightest box around a set of points; empty input gives a zero box
    pub fn from_points(points: &[Vec3]) -> Self {
        let Some(first) = points.first() else {
            return Self::new(Vec3::zero(), Vec3::zero());
        };

        let mut min = *first;
        let mut max = *first;
        for p in points.iter().skip(1) {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Self::new(min, max)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb::new(
            Vec3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            Vec3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        )
    }

    /// Union of an iterator of boxes, `None` when the iterator is empty
    pub fn union_all<I>(boxes: I) -> Option<Aabb>
    where
        I: IntoIterator<Item = Aabb>,
    {
        boxes.into_iter().reduce(|acc, b| acc.union(&b))
    }

    /// Grows the box by `padding` on every side
    pub fn expanded(&self, padding: f64) -> Aabb {
        let pad = Vec3::new(padding, padding, padding);
        Aabb::new(self.min - pad, self.max + pad)
    }

    pub fn translated(&self, offset: Vec3) -> Aabb {
        Aabb::new(self.min + offset, self.max + offset)
    }

    /// Inclusive overlap test: boxes that share a face count as intersecting
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Per-axis penetration depth; non-positive components mean no overlap on that axis
    pub fn overlap(&self, other: &Aabb) -> Vec3 {
        Vec3::new(
            self.max.x.min(other.max.x) - self.min.x.max(other.min.x),
            self.max.y.min(other.max.y) - self.min.y.max(other.min.y),
            self.max.z.min(other.max.z) - self.min.z.max(other.min.z),
        )
    }

    /// Applies a transformation matrix to the box
    pub fn transformed(&self, matrix: &Mat4) -> Aabb {
        // Transform all 8 corners of the box and compute new bounds
        let corners = [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ];

        let transformed: Vec<Vec3> = corners
            .iter()
            .map(|c| {
                let h = *matrix * Vector4::new(c.x, c.y, c.z, 1.0);
                Vec3::new(h.x / h.w, h.y / h.w, h.z / h.w)
            })
            .collect();

        Aabb::from_points(&transformed)
    }

    /// Slab test. Returns the distance along the ray to the first hit, or the
    /// exit distance when the origin is inside the box.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f64> {
        let inv_dir = Vec3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let t_min = (self.min - ray.origin).mul_element_wise(inv_dir);
        let t_max = (self.max - ray.origin).mul_element_wise(inv_dir);

        let t1 = Vec3::new(t_min.x.min(t_max.x), t_min.y.min(t_max.y), t_min.z.min(t_max.z));
        let t2 = Vec3::new(t_min.x.max(t_max.x), t_min.y.max(t_max.y), t_min.z.max(t_max.z));

        let t_near = t1.x.max(t1.y.max(t1.z));
        let t_far = t2.x.min(t2.y.min(t2.z));

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }

    /// Outward face normal of the box at a point on (or very near) its surface
    pub fn face_normal_at(&self, point: Vec3) -> Vec3 {
        let candidates = [
            ((point.x - self.min.x).abs(), Vec3::new(-1.0, 0.0, 0.0)),
            ((point.x - self.max.x).abs(), Vec3::new(1.0, 0.0, 0.0)),
            ((point.y - self.min.y).abs(), Vec3::new(0.0, -1.0, 0.0)),
            ((point.y - self.max.y).abs(), Vec3::new(0.0, 1.0, 0.0)),
            ((point.z - self.min.z).abs(), Vec3::new(0.0, 0.0, -1.0)),
            ((point.z - self.max.z).abs(), Vec3::new(0.0, 0.0, 1.0)),
        ];

        candidates
            .iter()
            .fold((f64::INFINITY, Vec3::unit_y()), |best, &(d, n)| {
                if d < best.0 {
                    (d, n)
                } else {
                    best
                }
            })
            .1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Matrix4, Rad};

    fn unit_box() -> Aabb {
        Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_aabb_creation() {
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, -1.0, -1.0),
        ];
        let aabb = Aabb::from_points(&points);

        assert_eq!(aabb, unit_box());
    }

    #[test]
    fn test_touching_faces_intersect() {
        let a = Aabb::from_center_size(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        let b = Aabb::from_center_size(Vec3::new(1.5, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        assert!(a.intersects(&b));

        let c = b.translated(Vec3::new(0.01, 0.0, 0.0));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_overlap_depths() {
        let a = unit_box();
        let b = unit_box().translated(Vec3::new(1.5, 0.5, 0.0));
        let o = a.overlap(&b);
        assert!((o.x - 0.5).abs() < 1e-12);
        assert!((o.y - 1.5).abs() < 1e-12);
        assert!((o.z - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_union_and_padding() {
        let a = unit_box();
        let b = unit_box().translated(Vec3::new(4.0, 0.0, 0.0));
        let u = a.union(&b);
        assert_eq!(u.center(), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(u.size(), Vec3::new(6.0, 2.0, 2.0));

        let padded = a.expanded(0.5);
        assert_eq!(padded.min, Vec3::new(-1.5, -1.5, -1.5));
        assert!(Aabb::union_all(Vec::new()).is_none());
    }

    #[test]
    fn test_rotated_box_grows() {
        let m = Matrix4::from_angle_y(Rad(std::f64::consts::FRAC_PI_4));
        let rotated = unit_box().transformed(&m);
        let expected = 2.0_f64.sqrt();
        assert!((rotated.max.x - expected).abs() < 1e-9);
        assert!((rotated.max.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_ray_aabb_intersection() {
        let aabb = unit_box();

        // Ray hitting the box
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        let hit = aabb.intersect_ray(&ray).unwrap();
        assert!((hit - 4.0).abs() < 1e-12);
        assert_eq!(
            aabb.face_normal_at(ray.point_at(hit)),
            Vec3::new(0.0, 0.0, -1.0)
        );

        // Ray missing the box
        let ray_miss = Ray::new(Vec3::new(5.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(aabb.intersect_ray(&ray_miss).is_none());
    }
}
