//! Orbit camera used to turn pointer positions and the view direction into
//! world-space rays.

use cgmath::{perspective, EuclideanSpace, InnerSpace, Matrix4, Point3, Rad, SquareMatrix, Vector4, Zero};

use crate::math::{Mat4, Ray, Vec3};

#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f64,
    pub pitch: f64,
    pub yaw: f64,
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub bounds: OrbitCameraBounds,
    pub aspect: f64,
    pub fovy: Rad<f64>,
    pub znear: f64,
    pub zfar: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f64>,
    pub max_distance: Option<f64>,
    pub min_pitch: f64,
    pub max_pitch: f64,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: Some(1.0),
            max_distance: Some(40.0),
            min_pitch: -std::f64::consts::FRAC_PI_2 + f64::EPSILON,
            max_pitch: std::f64::consts::FRAC_PI_2 - f64::EPSILON,
        }
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(10.0, 0.5, 0.6, Vec3::zero(), 16.0 / 9.0)
    }
}

impl OrbitCamera {
    pub fn new(distance: f64, pitch: f64, yaw: f64, target: Vec3, aspect: f64) -> Self {
        let mut camera = Self {
            distance,
            pitch,
            yaw,
            eye: Vec3::zero(), // Recomputed by `update()`
            target,
            up: Vec3::unit_y(),
            bounds: OrbitCameraBounds::default(),
            aspect,
            fovy: Rad(std::f64::consts::FRAC_PI_4),
            znear: 0.1,
            zfar: 1000.0,
        };
        camera.update();
        camera
    }

    pub fn set_distance(&mut self, distance: f64) {
        self.distance = distance.clamp(
            self.bounds.min_distance.unwrap_or(f64::EPSILON),
            self.bounds.max_distance.unwrap_or(f64::MAX),
        );
        self.update();
    }

    pub fn set_pitch(&mut self, pitch: f64) {
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.update();
    }

    pub fn add_pitch(&mut self, delta: f64) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn set_yaw(&mut self, yaw: f64) {
        self.yaw = yaw;
        self.update();
    }

    pub fn add_yaw(&mut self, delta: f64) {
        self.set_yaw(self.yaw + delta);
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        self.update();
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.aspect = width as f64 / height.max(1) as f64;
    }

    pub fn build_view_projection_matrix(&self) -> Mat4 {
        let view = Matrix4::look_at_rh(Point3::from_vec(self.eye), Point3::from_vec(self.target), self.up);
        let proj = perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }

    /// Ray from the eye through the screen center
    pub fn look_ray(&self) -> Ray {
        Ray::new(self.eye, self.target - self.eye)
    }

    /// Ray from the eye through a pixel; `screen_pos` is measured from the
    /// top-left corner
    pub fn screen_to_ray(&self, screen_pos: (f64, f64), screen_size: (f64, f64)) -> Ray {
        let (mouse_x, mouse_y) = screen_pos;
        let (width, height) = screen_size;

        let ndc_x = (2.0 * mouse_x) / width - 1.0;
        let ndc_y = 1.0 - (2.0 * mouse_y) / height; // Flip Y axis

        let Some(inverse) = self.build_view_projection_matrix().invert() else {
            return self.look_ray();
        };

        let unproject = |ndc_z: f64| {
            let h = inverse * Vector4::new(ndc_x, ndc_y, ndc_z, 1.0);
            Vec3::new(h.x / h.w, h.y / h.w, h.z / h.w)
        };
        let near = unproject(-1.0);
        let far = unproject(1.0);

        let direction = far - near;
        if direction.magnitude2() == 0.0 {
            return self.look_ray();
        }
        Ray::new(near, direction)
    }

    /// Recomputes `eye` after `distance`, `pitch`, `yaw` or `target` change
    fn update(&mut self) {
        self.eye = Vec3::new(
            self.distance * self.yaw.sin() * self.pitch.cos(),
            self.distance * self.pitch.sin(),
            self.distance * self.yaw.cos() * self.pitch.cos(),
        ) + self.target;
    }
}
