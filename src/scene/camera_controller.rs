//! Free-fly camera control
//!
//! WASD movement with QE for up/down, mouse look, and scroll wheel
//! speed adjustment.

use glam::{Vec2, Vec3};

use super::Camera;

/// Input state gathered by the windowing layer each frame
#[derive(Debug, Clone, Default)]
pub struct CameraInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,

    /// Mouse delta since last frame, in pixels
    pub mouse_delta: Vec2,

    /// Scroll delta, positive = scroll up
    pub scroll_delta: f32,

    /// Whether mouse look is active (e.g. right mouse button held)
    pub mouse_look_active: bool,
}

impl CameraInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset per-frame deltas (call after update)
    pub fn reset_deltas(&mut self) {
        self.mouse_delta = Vec2::ZERO;
        self.scroll_delta = 0.0;
    }
}

/// Free-fly camera controller (FPS-style)
pub struct FreeFlyController {
    /// Current yaw angle (horizontal rotation) in radians
    pub yaw: f32,
    /// Current pitch angle (vertical rotation) in radians
    pub pitch: f32,
    /// Movement speed in units per second
    pub move_speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Mouse sensitivity in radians per pixel
    pub mouse_sensitivity: f32,
    /// Speed change per scroll unit
    pub scroll_speed_factor: f32,
}

impl Default for FreeFlyController {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            move_speed: 5.0,
            min_speed: 0.5,
            max_speed: 50.0,
            mouse_sensitivity: 0.003,
            scroll_speed_factor: 1.2,
        }
    }
}

impl FreeFlyController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize yaw/pitch from the camera's current orientation
    pub fn sync_with_camera(&mut self, camera: &Camera) {
        let forward = (camera.target - camera.position).normalize();
        self.yaw = forward.z.atan2(forward.x);
        self.pitch = (-forward.y).asin();
    }

    /// Forward direction from yaw/pitch
    fn forward_direction(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            -self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Right direction, level with the XZ plane
    fn right_direction(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, self.yaw.cos())
    }

    pub fn update(&mut self, camera: &mut Camera, input: &CameraInput, dt: f32) {
        if input.scroll_delta != 0.0 {
            if input.scroll_delta > 0.0 {
                self.move_speed *= self.scroll_speed_factor;
            } else {
                self.move_speed /= self.scroll_speed_factor;
            }
            self.move_speed = self.move_speed.clamp(self.min_speed, self.max_speed);
        }

        if input.mouse_look_active && input.mouse_delta != Vec2::ZERO {
            self.yaw += input.mouse_delta.x * self.mouse_sensitivity;
            self.pitch += input.mouse_delta.y * self.mouse_sensitivity;

            // Clamp pitch to avoid flipping over the pole
            let max_pitch = std::f32::consts::FRAC_PI_2 - 0.01;
            self.pitch = self.pitch.clamp(-max_pitch, max_pitch);
            self.yaw %= 2.0 * std::f32::consts::PI;
        }

        let forward = self.forward_direction();
        let right = self.right_direction();

        let mut velocity = Vec3::ZERO;
        if input.forward {
            velocity += forward;
        }
        if input.backward {
            velocity -= forward;
        }
        if input.right {
            velocity += right;
        }
        if input.left {
            velocity -= right;
        }
        if input.up {
            velocity += Vec3::Y;
        }
        if input.down {
            velocity -= Vec3::Y;
        }
        if velocity.length_squared() > 0.0 {
            velocity = velocity.normalize();
        }

        camera.position += velocity * self.move_speed * dt;
        camera.target = camera.position + forward;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_key_moves_along_view_direction() {
        let mut camera = Camera::new(Vec3::ZERO, Vec3::X);
        let mut controller = FreeFlyController::new();
        controller.sync_with_camera(&camera);

        let input = CameraInput {
            forward: true,
            ..Default::default()
        };
        controller.update(&mut camera, &input, 1.0);

        assert!((camera.position - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-4);
        assert!((camera.target - camera.position - Vec3::X).length() < 1e-4);
    }

    #[test]
    fn scroll_changes_speed_within_bounds() {
        let mut camera = Camera::default();
        let mut controller = FreeFlyController::new();
        let base = controller.move_speed;

        let input = CameraInput {
            scroll_delta: 1.0,
            ..Default::default()
        };
        controller.update(&mut camera, &input, 0.0);
        assert!(controller.move_speed > base);

        for _ in 0..100 {
            controller.update(&mut camera, &input, 0.0);
        }
        assert!(controller.move_speed <= controller.max_speed);
    }

    #[test]
    fn pitch_is_clamped_short_of_vertical() {
        let mut camera = Camera::default();
        let mut controller = FreeFlyController::new();

        let input = CameraInput {
            mouse_look_active: true,
            mouse_delta: Vec2::new(0.0, 100_000.0),
            ..Default::default()
        };
        controller.update(&mut camera, &input, 0.016);

        assert!(controller.pitch < std::f32::consts::FRAC_PI_2);
        assert!(controller.pitch > 0.0);
    }

    #[test]
    fn look_requires_active_flag() {
        let mut camera = Camera::default();
        let mut controller = FreeFlyController::new();

        let input = CameraInput {
            mouse_look_active: false,
            mouse_delta: Vec2::new(500.0, 0.0),
            ..Default::default()
        };
        controller.update(&mut camera, &input, 0.016);

        assert_eq!(controller.yaw, 0.0);
    }
}
