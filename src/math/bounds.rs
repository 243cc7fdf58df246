use glam::{Mat4, Vec3};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub fn new(point1: Vec3, point2: Vec3) -> AABB {
        let min = point1.min(point2);
        let max = point1.max(point2);
        AABB { min, max }
    }

    /// Smallest box around `points`, or `None` for an empty slice.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<AABB> {
        points.into_iter().fold(None, |aabb, point| match aabb {
            None => Some(AABB::new(point, point)),
            Some(aabb) => Some(AABB::new(aabb.min.min(point), aabb.max.max(point))),
        })
    }

    pub fn union(&self, other: &AABB) -> AABB {
        AABB::new(self.min.min(other.min), self.max.max(other.max))
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn corners(&self) -> [Vec3; 8] {
        [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ]
    }

    pub fn transformed(&self, transform: &Mat4) -> AABB {
        let corners = self
            .corners()
            .map(|corner| transform.transform_point3(corner));

        // A box always has eight corners.
        AABB::from_points(corners).unwrap_or(*self)
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_encloses_all_points() {
        let aabb = AABB::from_points([
            Vec3::new(1.0, -2.0, 0.0),
            Vec3::new(-1.0, 3.0, 0.5),
            Vec3::new(0.0, 0.0, -4.0),
        ])
        .unwrap();

        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, -4.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 3.0, 0.5));
        assert!(AABB::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn transformed_follows_rotation() {
        let aabb = AABB::new(Vec3::ZERO, Vec3::new(2.0, 1.0, 1.0));
        let rotated = aabb.transformed(&Mat4::from_rotation_z(std::f32::consts::FRAC_PI_2));

        assert!(rotated.size().abs_diff_eq(Vec3::new(1.0, 2.0, 1.0), 1e-5));
        assert!(rotated.contains_point(Vec3::new(-0.5, 1.0, 0.5)));
    }
}
