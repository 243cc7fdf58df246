use log::debug;

use crate::camera::{Camera, CameraId, Projection};
use crate::transcoder::builders::Builder;
use crate::transcoder::context::WriterContext;
use crate::transcoder::fw;

/// Used when a perspective camera gives neither `xfov` nor `yfov`.
const DEFAULT_YFOV_DEGREES: f32 = 45.0;

#[derive(Debug, Clone)]
pub struct CameraBuilder {
    name: String,
    projection: fw::Projection,
}

impl CameraBuilder {
    pub fn new(projection: fw::Projection) -> Self {
        Self {
            name: "Camera".to_owned(),
            projection,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn build_camera(&self) -> Camera {
        let projection = match self.projection {
            fw::Projection::Perspective {
                xfov,
                yfov,
                aspect_ratio,
                znear,
                zfar,
            } => {
                // aspect_ratio = xfov / yfov
                let yfov_degrees = match (xfov, yfov, aspect_ratio) {
                    (_, Some(yfov), _) => yfov,
                    (Some(xfov), None, Some(aspect)) if aspect > 0.0 => xfov / aspect,
                    (Some(xfov), None, _) => xfov,
                    (None, None, _) => DEFAULT_YFOV_DEGREES,
                };
                let aspect_ratio = match (xfov, yfov, aspect_ratio) {
                    (_, _, Some(aspect)) => Some(aspect),
                    (Some(xfov), Some(yfov), None) if yfov > 0.0 => Some(xfov / yfov),
                    _ => None,
                };

                Projection::Perspective {
                    yfov: yfov_degrees.to_radians(),
                    aspect_ratio,
                    znear,
                    zfar,
                }
            }
            fw::Projection::Orthographic {
                xmag,
                ymag,
                aspect_ratio,
                znear,
                zfar,
            } => {
                // aspect_ratio = xmag / ymag
                let (xmag, ymag) = match (xmag, ymag, aspect_ratio) {
                    (Some(xmag), Some(ymag), _) => (xmag, ymag),
                    (Some(xmag), None, Some(aspect)) if aspect > 0.0 => (xmag, xmag / aspect),
                    (None, Some(ymag), Some(aspect)) => (ymag * aspect, ymag),
                    (Some(mag), None, _) | (None, Some(mag), _) => (mag, mag),
                    (None, None, _) => (1.0, 1.0),
                };

                Projection::Orthographic {
                    xmag,
                    ymag,
                    znear,
                    zfar,
                }
            }
        };

        Camera {
            name: self.name.clone(),
            projection,
        }
    }
}

impl Builder for CameraBuilder {
    type Output = CameraId;

    fn build(&self, ctx: &mut WriterContext) -> anyhow::Result<CameraId> {
        let camera = self.build_camera();
        debug!("Built camera {} ({:?})", camera.name, camera.projection);
        Ok(ctx.scene.add_camera(camera))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perspective(xfov: Option<f32>, yfov: Option<f32>, aspect_ratio: Option<f32>) -> Camera {
        CameraBuilder::new(fw::Projection::Perspective {
            xfov,
            yfov,
            aspect_ratio,
            znear: 0.1,
            zfar: 100.0,
        })
        .build_camera()
    }

    #[test]
    fn yfov_derived_from_xfov_and_aspect() {
        let camera = perspective(Some(90.0), None, Some(2.0));

        match camera.projection {
            Projection::Perspective {
                yfov, aspect_ratio, ..
            } => {
                assert!((yfov - 45f32.to_radians()).abs() < 1e-6);
                assert_eq!(aspect_ratio, Some(2.0));
            }
            other => panic!("unexpected projection {other:?}"),
        }
    }

    #[test]
    fn aspect_derived_from_both_fovs() {
        let camera = perspective(Some(60.0), Some(30.0), None);

        match camera.projection {
            Projection::Perspective { aspect_ratio, .. } => assert_eq!(aspect_ratio, Some(2.0)),
            other => panic!("unexpected projection {other:?}"),
        }
    }

    #[test]
    fn orthographic_fills_missing_magnification() {
        let camera = CameraBuilder::new(fw::Projection::Orthographic {
            xmag: None,
            ymag: Some(2.0),
            aspect_ratio: Some(1.5),
            znear: 0.1,
            zfar: 10.0,
        })
        .build_camera();

        match camera.projection {
            Projection::Orthographic { xmag, ymag, .. } => {
                assert_eq!(xmag, 3.0);
                assert_eq!(ymag, 2.0);
            }
            other => panic!("unexpected projection {other:?}"),
        }
    }
}
