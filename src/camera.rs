use glam::{Mat4, Vec3};
use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

const TURN_STEP_DEGREES: f32 = 1.0;
const MOUSE_SENSITIVITY: f32 = 0.002;
const SPEED_STEP: f32 = 0.01;
const MIN_SPEED: f32 = 0.01;
const PITCH_LIMIT_DEGREES: f32 = 89.0;

const FOV_DEGREES: f32 = 55.0;
const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 200.0;
const ORTHO_HALF_EXTENT: f32 = 2.5;

/// Keys currently held down, applied once per frame in [`Camera::update`].
#[derive(Default)]
struct HeldKeys {
    forward: bool,
    backward: bool,
    strafe_left: bool,
    strafe_right: bool,
    ascend: bool,
    descend: bool,
    turn_left: bool,
    turn_right: bool,
    toggle_projection: bool,
}

/// Free-fly camera driven by held-key polling plus cursor and scroll deltas.
///
/// Yaw and pitch are kept in degrees. Pitch is clamped to ±89° so the view
/// never flips over the up axis; yaw wraps naturally through the trig in
/// [`Camera::front`]. Holding P flips the projection every frame, so the mode
/// flickers while the key is down.
pub struct Camera {
    pub position: Vec3,
    up: Vec3,
    yaw: f32,
    pitch: f32,
    speed: f32,
    aspect: f32,
    perspective: bool,
    held: HeldKeys,
    // last cursor position; None until the first event seeds the baseline
    last_cursor: Option<(f32, f32)>,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.5, 3.0),
            up: Vec3::Y,
            yaw: -90.0,
            pitch: 0.0,
            speed: 0.05,
            aspect,
            perspective: true,
            held: HeldKeys::default(),
            last_cursor: None,
        }
    }

    pub fn front(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize()
    }

    pub fn is_perspective(&self) -> bool {
        self.perspective
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Applies every held key once. Call exactly once per frame.
    pub fn update(&mut self) {
        let front = self.front();
        if self.held.forward {
            self.position += self.speed * front;
        }
        if self.held.backward {
            self.position -= self.speed * front;
        }
        if self.held.strafe_left {
            self.position -= front.cross(self.up).normalize() * self.speed;
        }
        if self.held.strafe_right {
            self.position += front.cross(self.up).normalize() * self.speed;
        }
        if self.held.ascend {
            self.position += self.speed * self.up;
        }
        if self.held.descend {
            self.position -= self.speed * self.up;
        }
        if self.held.turn_right {
            self.yaw += TURN_STEP_DEGREES;
        }
        if self.held.turn_left {
            self.yaw -= TURN_STEP_DEGREES;
        }
        if self.held.toggle_projection {
            self.perspective = !self.perspective;
        }
    }

    pub fn process_key(&mut self, event: &winit::event::KeyEvent) {
        let pressed = event.state == ElementState::Pressed;
        match event.physical_key {
            PhysicalKey::Code(KeyCode::KeyW) => self.held.forward = pressed,
            PhysicalKey::Code(KeyCode::KeyS) => self.held.backward = pressed,
            PhysicalKey::Code(KeyCode::KeyA) => self.held.strafe_left = pressed,
            PhysicalKey::Code(KeyCode::KeyD) => self.held.strafe_right = pressed,
            PhysicalKey::Code(KeyCode::KeyQ) => self.held.ascend = pressed,
            PhysicalKey::Code(KeyCode::KeyE) => self.held.descend = pressed,
            PhysicalKey::Code(KeyCode::ArrowLeft) => self.held.turn_left = pressed,
            PhysicalKey::Code(KeyCode::ArrowRight) => self.held.turn_right = pressed,
            PhysicalKey::Code(KeyCode::KeyP) => self.held.toggle_projection = pressed,
            _ => (),
        }
    }

    /// Turns the view from absolute cursor positions. The first event only
    /// records the baseline so the camera does not jump on focus.
    pub fn process_cursor(&mut self, x: f32, y: f32) {
        let Some((last_x, last_y)) = self.last_cursor else {
            self.last_cursor = Some((x, y));
            return;
        };
        let dx = (x - last_x) * MOUSE_SENSITIVITY;
        let dy = (last_y - y) * MOUSE_SENSITIVITY;
        self.last_cursor = Some((x, y));

        self.yaw += dx;
        self.pitch = (self.pitch + dy).clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);
    }

    /// Scroll adjusts movement speed; there is a floor but no ceiling.
    pub fn process_scroll(&mut self, delta_y: f32) {
        self.speed = (self.speed + delta_y * SPEED_STEP).max(MIN_SPEED);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front(), self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        if self.perspective {
            Mat4::perspective_rh_gl(FOV_DEGREES.to_radians(), self.aspect, NEAR_PLANE, FAR_PLANE)
        } else {
            Mat4::orthographic_rh_gl(
                -ORTHO_HALF_EXTENT,
                ORTHO_HALF_EXTENT,
                -ORTHO_HALF_EXTENT,
                ORTHO_HALF_EXTENT,
                NEAR_PLANE,
                FAR_PLANE,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(1800.0 / 1600.0)
    }

    #[test]
    fn front_is_unit_length_across_orientations() {
        let mut cam = camera();
        for yaw in (-720..=720).step_by(45) {
            for pitch in (-89..=89).step_by(11) {
                cam.yaw = yaw as f32;
                cam.pitch = pitch as f32;
                let len = cam.front().length();
                assert!((len - 1.0).abs() < 1e-5, "|front| = {len} at yaw {yaw}, pitch {pitch}");
            }
        }
    }

    #[test]
    fn first_cursor_event_only_seeds_the_baseline() {
        let mut cam = camera();
        cam.process_cursor(640.0, 360.0);
        assert_eq!(cam.yaw, -90.0);
        assert_eq!(cam.pitch, 0.0);

        cam.process_cursor(740.0, 360.0);
        assert!((cam.yaw - (-90.0 + 100.0 * MOUSE_SENSITIVITY)).abs() < 1e-6);
    }

    #[test]
    fn pitch_stays_clamped_under_wild_cursor_motion() {
        let mut cam = camera();
        cam.process_cursor(0.0, 0.0);
        for step in 1..200 {
            let y = if step % 3 == 0 { 1e5 } else { -1e5 };
            cam.process_cursor(step as f32 * 17.0, y);
            assert!(cam.pitch >= -PITCH_LIMIT_DEGREES && cam.pitch <= PITCH_LIMIT_DEGREES);
        }
    }

    #[test]
    fn scroll_speed_never_drops_below_floor() {
        let mut cam = camera();
        cam.process_scroll(-1000.0);
        assert_eq!(cam.speed(), MIN_SPEED);

        cam.process_scroll(2.0);
        assert!((cam.speed() - (MIN_SPEED + 2.0 * SPEED_STEP)).abs() < 1e-6);

        for _ in 0..50 {
            cam.process_scroll(-3.5);
            assert!(cam.speed() >= MIN_SPEED);
        }
    }

    #[test]
    fn projection_toggle_is_idempotent_under_even_repetitions() {
        let mut cam = camera();
        let original = cam.projection_matrix();

        cam.held.toggle_projection = true;
        cam.update();
        assert!(!cam.is_perspective());
        assert_ne!(cam.projection_matrix(), original);

        cam.update();
        assert!(cam.is_perspective());
        assert_eq!(cam.projection_matrix(), original);
    }

    #[test]
    fn view_matrix_matches_golden_look_at() {
        let cam = camera();
        // defaults: position (0, 0.5, 3), yaw -90°, pitch 0 => front (0, 0, -1)
        assert!((cam.front() - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);

        let expected = Mat4::from_cols_array_2d(&[
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, -0.5, -3.0, 1.0],
        ]);
        let view = cam.view_matrix();
        for col in 0..4 {
            for row in 0..4 {
                let diff = (view.col(col)[row] - expected.col(col)[row]).abs();
                assert!(diff < 1e-6, "mismatch at column {col}, row {row}");
            }
        }
    }

    #[test]
    fn held_keys_move_along_the_expected_axes() {
        let mut cam = camera();
        let start = cam.position;

        cam.held.forward = true;
        cam.update();
        assert!((cam.position.z - (start.z - 0.05)).abs() < 1e-6);

        cam.held = HeldKeys::default();
        cam.held.strafe_right = true;
        cam.update();
        assert!(cam.position.x > start.x);

        cam.held = HeldKeys::default();
        cam.held.turn_right = true;
        cam.update();
        assert_eq!(cam.yaw, -89.0);
    }
}
