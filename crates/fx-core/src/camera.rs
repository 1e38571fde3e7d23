//! Perspective camera looking at the quad.
//!
//! The camera sits on +Z looking at the origin, where the 2x2 quad lies. With
//! the default field of view the quad overfills the view, so the image is
//! cropped rather than letterboxed.

use glam::{Mat4, Vec3};

use crate::constants::CAMERA_Z;
use crate::uniforms::CameraUniforms;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Camera matched to a container of `width` x `height` pixels.
    pub fn for_container(width: f32, height: f32, fovy_deg: f32, znear: f32, zfar: f32) -> Self {
        let aspect = if height > 0.0 && width > 0.0 {
            width / height
        } else {
            1.0
        };
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: fovy_deg.to_radians(),
            znear,
            zfar,
        }
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn uniforms(&self) -> CameraUniforms {
        CameraUniforms {
            view_proj: (self.projection_matrix() * self.view_matrix()).to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn aspect_follows_container() {
        let cam = Camera::for_container(800.0, 400.0, 75.0, 0.1, 1000.0);
        assert!((cam.aspect - 2.0).abs() < 1e-6);
        let degenerate = Camera::for_container(800.0, 0.0, 75.0, 0.1, 1000.0);
        assert_eq!(degenerate.aspect, 1.0);
    }

    #[test]
    fn quad_center_projects_to_screen_center() {
        let cam = Camera::for_container(600.0, 600.0, 80.0, 0.01, 10.0);
        let m = cam.projection_matrix() * cam.view_matrix();
        let clip = m * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn quad_corner_overfills_view() {
        let cam = Camera::for_container(600.0, 600.0, 80.0, 0.01, 10.0);
        let m = cam.projection_matrix() * cam.view_matrix();
        let clip = m * Vec4::new(1.0, 1.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x > 1.0 && ndc.y > 1.0);
    }
}
