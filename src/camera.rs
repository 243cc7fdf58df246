use glam::Mat4;
use id_arena::Id;

pub type CameraId = Id<Camera>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Vertical field of view in radians.
    Perspective {
        yfov: f32,
        aspect_ratio: Option<f32>,
        znear: f32,
        zfar: f32,
    },
    /// Half extents of the view volume.
    Orthographic {
        xmag: f32,
        ymag: f32,
        znear: f32,
        zfar: f32,
    },
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub name: String,
    pub projection: Projection,
}

impl Camera {
    /// Right handed projection. `aspect` is used when the document did not
    /// fix an aspect ratio.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        match self.projection {
            Projection::Perspective {
                yfov,
                aspect_ratio,
                znear,
                zfar,
            } => Mat4::perspective_rh(yfov, aspect_ratio.unwrap_or(aspect), znear, zfar),
            Projection::Orthographic {
                xmag,
                ymag,
                znear,
                zfar,
            } => Mat4::orthographic_rh(-xmag, xmag, -ymag, ymag, znear, zfar),
        }
    }
}
