use glam::{Mat4, Quat, Vec3};
use std::cell::{Cell, Ref, RefCell};

#[derive(Debug, Clone)]
pub struct Transform {
    translation: Vec3,
    rotation: Quat,
    scale: Vec3,

    local_matrix: RefCell<Mat4>,
    world_matrix: RefCell<Mat4>,
    local_dirty: Cell<bool>,
    world_dirty: Cell<bool>,
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self::new(translation, Quat::IDENTITY, Vec3::ONE)
    }

    pub fn new(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
            local_matrix: RefCell::new(Mat4::IDENTITY),
            world_matrix: RefCell::new(Mat4::IDENTITY),
            local_dirty: Cell::new(true),
            world_dirty: Cell::new(true),
        }
    }

    /// Uses `matrix` as the local matrix as is, shear included. The
    /// translation, rotation and scale accessors return its decomposition.
    pub fn from_matrix(matrix: Mat4) -> Self {
        let mut transform = Self::default();
        transform.set_matrix(matrix);
        transform
    }

    pub fn get_local_matrix(&self) -> Ref<Mat4> {
        if self.local_dirty.get() {
            let matrix =
                Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation);

            self.local_matrix.replace(matrix);
            self.local_dirty.set(false);
            self.invalidate_world();
        }

        self.local_matrix.borrow()
    }

    pub fn get_world_matrix(&self) -> Ref<Mat4> {
        self.world_matrix.borrow()
    }

    pub fn set_world_matrix(&self, world_matrix: Mat4) {
        self.world_matrix.replace(world_matrix);
        self.world_dirty.set(false);
    }

    pub fn invalidate_local(&self) {
        self.local_dirty.set(true);
        self.world_dirty.set(true);
    }

    pub fn invalidate_world(&self) {
        self.world_dirty.set(true);
    }

    pub fn is_world_dirty(&self) -> bool {
        self.world_dirty.get()
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
        self.invalidate_local();
    }

    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
        self.invalidate_local();
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.invalidate_local();
    }

    /// Replaces the local matrix. A later TRS setter rebuilds it from the
    /// decomposed components, dropping any shear.
    pub fn set_matrix(&mut self, matrix: Mat4) {
        let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
        self.translation = translation;
        self.rotation = rotation;
        self.scale = scale;

        self.local_matrix.replace(matrix);
        self.local_dirty.set(false);
        self.world_dirty.set(true);
    }

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_translation(Vec3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_matrix_round_trips_trs() {
        let rotation = Quat::from_rotation_y(0.5);
        let matrix = Mat4::from_scale_rotation_translation(
            Vec3::new(1.0, 2.0, 3.0),
            rotation,
            Vec3::new(4.0, 5.0, 6.0),
        );

        let transform = Transform::from_matrix(matrix);

        assert!(transform.translation().abs_diff_eq(Vec3::new(4.0, 5.0, 6.0), 1e-5));
        assert!(transform.scale().abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-5));
        assert!(transform.get_local_matrix().abs_diff_eq(matrix, 1e-5));
    }

    #[test]
    fn sheared_matrices_are_kept_exactly() {
        let matrix = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0))
            * Mat4::from_rotation_z(std::f32::consts::FRAC_PI_4);

        let transform = Transform::from_matrix(matrix);

        assert_eq!(*transform.get_local_matrix(), matrix);
        assert!(transform.is_world_dirty());
    }

    #[test]
    fn setters_mark_world_dirty() {
        let mut transform = Transform::default();
        transform.set_world_matrix(Mat4::IDENTITY);
        assert!(!transform.is_world_dirty());

        transform.set_translation(Vec3::X);
        assert!(transform.is_world_dirty());
        assert!(transform
            .get_local_matrix()
            .abs_diff_eq(Mat4::from_translation(Vec3::X), 1e-6));
    }
}
