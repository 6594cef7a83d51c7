use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec2, Vec3};
use crate::extensions::tween::Properties;
use super::raycast::Ray;

/// World-space rectangle the camera keeps in view, in cube units.
pub const STAGE: Vec2 = Vec2::new(2.0, 3.0);

/// Default vertical field of view in degrees.
pub const DEFAULT_FOV: f32 = 10.0;

/// Perspective camera sitting on the (1, 1, 1) diagonal, looking at the origin.
/// Produces the view-projection matrix and the picking rays for pointer input.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Zoom factor; >1 narrows the view.
    pub zoom: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Viewport size in pixels.
    pub viewport: Vec2,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_projection: [[f32; 4]; 4],
}

impl Camera {
    pub fn new(width: f32, height: f32, fov: f32) -> Self {
        let mut camera = Self {
            fov,
            zoom: 1.0,
            near: 0.1,
            far: 10000.0,
            position: Vec3::ONE,
            target: Vec3::ZERO,
            up: Vec3::Y,
            viewport: Vec2::new(width, height),
        };
        camera.resize(width, height);
        camera
    }

    pub fn aspect(&self) -> f32 {
        if self.viewport.y > 0.0 {
            self.viewport.x / self.viewport.y
        } else {
            1.0
        }
    }

    /// Resize the viewport and back the camera off so the stage fits.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);

        let stage_aspect = STAGE.x / STAGE.y;
        let half_fov = (self.fov.to_radians() / 2.0).tan();
        let distance = if stage_aspect < self.aspect() {
            (STAGE.y / 2.0) / half_fov
        } else {
            (STAGE.x / self.aspect()) / (2.0 * half_fov)
        };

        self.position = Vec3::splat(distance * 0.5);
    }

    /// Camera basis: columns are right, up and backward.
    pub fn rotation(&self) -> Mat3 {
        let z = (self.position - self.target).normalize();
        let x = self.up.cross(z).normalize();
        let y = z.cross(x);
        Mat3::from_cols(x, y, z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        let fov = 2.0 * (self.half_height()).atan();
        Mat4::perspective_rh(fov, self.aspect(), self.near, self.far)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_projection: (self.projection_matrix() * self.view_matrix()).to_cols_array_2d(),
        }
    }

    /// Ray from the eye through a point in normalized device coordinates.
    pub fn ray(&self, ndc: Vec2) -> Ray {
        let half_height = self.half_height();
        let view = Vec3::new(ndc.x * half_height * self.aspect(), ndc.y * half_height, -1.0);
        Ray {
            origin: self.position,
            direction: (self.rotation() * view).normalize(),
        }
    }

    /// Normalized device coordinates of a world point.
    pub fn project(&self, world: Vec3) -> Vec2 {
        let view = self.rotation().transpose() * (world - self.position);
        let half_height = self.half_height();
        Vec2::new(
            view.x / (-view.z * half_height * self.aspect()),
            view.y / (-view.z * half_height),
        )
    }

    /// Tangent of half the vertical field of view, after zoom.
    fn half_height(&self) -> f32 {
        (self.fov.to_radians() / 2.0).tan() / self.zoom
    }
}

impl Properties for Camera {
    fn property(&self, key: &str) -> Option<f32> {
        match key {
            "zoom" => Some(self.zoom),
            "fov" => Some(self.fov),
            _ => None,
        }
    }

    fn set_property(&mut self, key: &str, value: f32) -> bool {
        match key {
            "zoom" => self.zoom = value,
            "fov" => self.fov = value,
            _ => return false,
        }
        true
    }
}
