//! Top-down vehicle motion model.
//!
//! A semi-implicit kinematic integrator: steering and throttle axes ramp
//! while their keys are held, angular then linear velocity integrate with
//! reciprocal drag, and the bound sprite and camera follow the result. The
//! module is pure CPU state so every phase is unit-testable.

use glam::Vec2;

use crate::camera::Camera;
use crate::input::ControlInput;
use crate::scene::{ObjectHandle, SceneManager};

/// Tuning constants for the motion model.
///
/// `Default` is the baseline handling profile; `boosted` is the profile
/// while the boost key is held (stronger top-end through lower drag, softer
/// initial acceleration).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VehicleTuning {
    /// Speed ceiling in units/s. Enforced by rolling back the acceleration
    /// step, not by rescaling velocity.
    pub max_speed: f32,
    /// Acceleration at full throttle, units/s².
    pub acceleration_rate: f32,
    /// Reciprocal linear drag factor, applied as `v /= 1 + drag·dt`.
    pub linear_drag: f32,
    /// Angular velocity ceiling, deg/s.
    pub max_turn_rate: f32,
    /// Angular acceleration at full steer, deg/s².
    pub turn_rate: f32,
    /// Reciprocal angular drag factor.
    pub angular_drag: f32,
    /// Camera follow responsiveness; the per-frame blend is
    /// `clamp(camera_smoothing·dt, 0, 1)`.
    pub camera_smoothing: f32,
}

impl Default for VehicleTuning {
    fn default() -> Self {
        Self {
            max_speed: 1000.0,
            acceleration_rate: 1000.0,
            linear_drag: 1.5,
            max_turn_rate: 100.0,
            turn_rate: 250.0,
            angular_drag: 2.0,
            camera_smoothing: 10.0,
        }
    }
}

impl VehicleTuning {
    /// Boost profile: same chassis, halved acceleration, a third of the
    /// drag, so the terminal speed rises.
    pub fn boosted() -> Self {
        Self {
            acceleration_rate: 500.0,
            linear_drag: 0.5,
            ..Self::default()
        }
    }
}

/// Mutable motion state. Angles are degrees, angular velocity deg/s.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct VehicleState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub rotation_deg: f32,
    pub angular_velocity: f32,
    /// Steering axis in [−1, 1]; positive turns counter-clockwise.
    pub steer: f32,
    /// Throttle axis in [−1, 1]; negative is reverse.
    pub throttle: f32,
}

impl VehicleState {
    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Drives a scene object like a top-down car and keeps the camera on it.
///
/// Call [`apply_input`](Self::apply_input) then [`update`](Self::update)
/// once per frame with the same `dt`.
#[derive(Debug)]
pub struct VehicleController {
    state: VehicleState,
    normal_tuning: VehicleTuning,
    boost_tuning: VehicleTuning,
    boosting: bool,
    sprite: Option<ObjectHandle>,
}

/// Angular velocities at or below this magnitude are candidates for the
/// snap-to-zero branch instead of drag.
const ANGULAR_DRAG_THRESHOLD: f32 = 10.0;
/// Speeds at or below this magnitude are candidates for the snap-to-zero
/// branch instead of drag.
const LINEAR_DRAG_THRESHOLD: f32 = 10.0;

impl VehicleController {
    pub fn new(tuning: VehicleTuning) -> Self {
        Self {
            state: VehicleState::default(),
            normal_tuning: tuning,
            boost_tuning: VehicleTuning::boosted(),
            boosting: false,
            sprite: None,
        }
    }

    /// Binds the scene object that mirrors the vehicle transform.
    pub fn bind_sprite(&mut self, sprite: ObjectHandle) {
        self.sprite = Some(sprite);
    }

    #[inline]
    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    /// The tuning profile in effect this frame.
    #[inline]
    pub fn tuning(&self) -> &VehicleTuning {
        if self.boosting {
            &self.boost_tuning
        } else {
            &self.normal_tuning
        }
    }

    /// Ramps the steer and throttle axes from the held-key snapshot.
    ///
    /// Each axis is re-derived from scratch every call: releasing both keys
    /// of a pair zeroes the axis immediately, holding ramps it at a fixed
    /// rate (throttle reaches full forward in 1 s, full reverse in 2 s,
    /// steering saturates in a third of a second), then clamps to [−1, 1].
    /// Boost swaps the whole tuning profile while held.
    pub fn apply_input(&mut self, input: &ControlInput, dt: f32) {
        if !input.forward && !input.reverse {
            self.state.throttle = 0.0;
        }
        if input.forward {
            self.state.throttle += 1.0 * dt;
        }
        if input.reverse {
            self.state.throttle -= 0.5 * dt;
        }
        self.state.throttle = self.state.throttle.clamp(-1.0, 1.0);

        if !input.left && !input.right {
            self.state.steer = 0.0;
        }
        if input.left {
            self.state.steer += 3.0 * dt;
        }
        if input.right {
            self.state.steer -= 3.0 * dt;
        }
        self.state.steer = self.state.steer.clamp(-1.0, 1.0);

        self.boosting = input.boost;
    }

    /// Integrates one step and syncs the bound sprite and the camera.
    ///
    /// Phase order matters: angular velocity, rotation, linear velocity,
    /// position, then the follow camera. The speed ceiling rolls back the
    /// acceleration delta rather than rescaling, and both drag branches use
    /// the pre-rollback speed.
    pub fn update(&mut self, dt: f32, scene: &mut SceneManager, camera: &mut Camera) {
        self.integrate(dt);

        if let Some(sprite) = self.sprite {
            let object = scene.object_mut(sprite);
            object.set_position(self.state.position);
            object.set_rotation(self.state.rotation_deg);
        }

        let alpha = (self.tuning().camera_smoothing * dt).clamp(0.0, 1.0);
        let cam = camera.position();
        camera.set_position(cam + (self.state.position - cam) * alpha);
    }

    /// The integrator proper, without scene or camera side effects.
    pub fn integrate(&mut self, dt: f32) {
        let t = *self.tuning();
        let s = &mut self.state;

        s.angular_velocity += s.steer * t.turn_rate * dt;
        s.angular_velocity = s.angular_velocity.clamp(-t.max_turn_rate, t.max_turn_rate);
        if s.angular_velocity.abs() > ANGULAR_DRAG_THRESHOLD {
            s.angular_velocity /= 1.0 + t.angular_drag * dt;
        } else if s.steer == 0.0 {
            s.angular_velocity = 0.0;
        }

        s.rotation_deg += s.angular_velocity * dt;
        // One wrap step per frame; |av·dt| can never exceed a full turn.
        if s.rotation_deg > 360.0 {
            s.rotation_deg -= 360.0;
        }
        if s.rotation_deg < -360.0 {
            s.rotation_deg += 360.0;
        }

        let rot = s.rotation_deg.to_radians();
        let forward = Vec2::new(rot.cos(), rot.sin());
        let accel_delta = forward * (s.throttle * t.acceleration_rate * dt);

        s.velocity += accel_delta;
        let speed = s.velocity.length();
        if speed > t.max_speed {
            s.velocity -= accel_delta;
        }

        if speed > LINEAR_DRAG_THRESHOLD {
            s.velocity /= 1.0 + t.linear_drag * dt;
        } else if s.throttle == 0.0 {
            s.velocity = Vec2::ZERO;
        }

        s.position += s.velocity * dt;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::Vec2;

    use super::*;
    use crate::scene::{MeshHandle, SceneObject};

    const DT: f32 = 0.016;

    fn controller() -> VehicleController {
        VehicleController::new(VehicleTuning::default())
    }

    fn hold(forward: bool, reverse: bool, left: bool, right: bool) -> ControlInput {
        ControlInput {
            forward,
            reverse,
            left,
            right,
            boost: false,
        }
    }

    fn step(c: &mut VehicleController, input: ControlInput, steps: usize) {
        for _ in 0..steps {
            c.apply_input(&input, DT);
            c.integrate(DT);
        }
    }

    // ── input intake ──────────────────────────────────────────────────────

    #[test]
    fn axes_ramp_and_clamp() {
        let mut c = controller();
        // Throttle ramps at 1/s: well past 1 s of holding it saturates.
        step(&mut c, hold(true, false, false, false), 80);
        assert_eq!(c.state().throttle, 1.0);

        // Steering ramps at 3/s: saturates within ~21 frames.
        step(&mut c, hold(true, false, true, false), 30);
        assert_eq!(c.state().steer, 1.0);
    }

    #[test]
    fn releasing_both_keys_resets_the_axis() {
        let mut c = controller();
        step(&mut c, hold(true, false, true, false), 10);
        assert!(c.state().throttle > 0.0);
        assert!(c.state().steer > 0.0);

        c.apply_input(&hold(false, false, false, false), DT);
        assert_eq!(c.state().throttle, 0.0);
        assert_eq!(c.state().steer, 0.0);
    }

    #[test]
    fn opposing_keys_ramp_against_each_other() {
        let mut c = controller();
        // Forward ramps twice as fast as reverse, so both held drifts up.
        step(&mut c, hold(true, true, false, false), 10);
        assert_relative_eq!(c.state().throttle, 0.5 * DT * 10.0, epsilon = 1e-5);
    }

    #[test]
    fn boost_swaps_the_tuning_profile_while_held() {
        let mut c = controller();
        let boosting = ControlInput {
            forward: true,
            boost: true,
            ..ControlInput::default()
        };
        c.apply_input(&boosting, DT);
        assert_eq!(c.tuning().acceleration_rate, 500.0);
        assert_eq!(c.tuning().linear_drag, 0.5);

        c.apply_input(&hold(true, false, false, false), DT);
        assert_eq!(c.tuning().acceleration_rate, 1000.0);
        assert_eq!(c.tuning().linear_drag, 1.5);
    }

    // ── fixed points and ceilings ─────────────────────────────────────────

    #[test]
    fn rest_is_a_fixed_point() {
        let mut c = controller();
        step(&mut c, hold(false, false, false, false), 100);
        assert_eq!(c.state().position, Vec2::ZERO);
        assert_eq!(c.state().velocity, Vec2::ZERO);
        assert_eq!(c.state().rotation_deg, 0.0);
        assert_eq!(c.state().angular_velocity, 0.0);
    }

    #[test]
    fn speed_never_exceeds_max() {
        let mut c = controller();
        step(&mut c, hold(true, false, false, false), 1000);
        assert!(c.state().speed() <= c.tuning().max_speed + 1e-3);
        // And the car is actually moving fast, not drag-stalled.
        assert!(c.state().speed() > 500.0);
    }

    #[test]
    fn straight_throttle_for_a_second() {
        // Full forward, no steering, ~1 s of 16 ms frames.
        let mut c = controller();
        step(&mut c, hold(true, false, false, false), 62);

        let s = c.state();
        assert!(s.position.x > 0.0);
        assert_relative_eq!(s.position.y, 0.0, epsilon = 1e-4);
        assert!(s.speed() < c.tuning().max_speed);
        assert_eq!(s.rotation_deg, 0.0);
        assert_eq!(s.angular_velocity, 0.0);
    }

    #[test]
    fn angular_velocity_respects_max_turn_rate() {
        let mut c = controller();
        step(&mut c, hold(false, false, true, false), 500);
        assert!(c.state().angular_velocity.abs() <= c.tuning().max_turn_rate);
        assert!(c.state().angular_velocity > 0.0);
    }

    // ── snap-to-zero branches ─────────────────────────────────────────────

    #[test]
    fn small_angular_velocity_snaps_to_zero_without_steer() {
        let mut c = controller();
        c.state.angular_velocity = 5.0;
        c.integrate(DT);
        assert_eq!(c.state().angular_velocity, 0.0);
    }

    #[test]
    fn large_angular_velocity_decays_through_drag() {
        let mut c = controller();
        c.state.angular_velocity = 50.0;
        c.integrate(DT);
        let av = c.state().angular_velocity;
        assert!(av > 0.0 && av < 50.0);
    }

    #[test]
    fn slow_coasting_stops_dead() {
        let mut c = controller();
        c.state.velocity = Vec2::new(5.0, 0.0);
        c.integrate(DT);
        assert_eq!(c.state().velocity, Vec2::ZERO);
    }

    #[test]
    fn slow_movement_under_throttle_is_kept() {
        let mut c = controller();
        c.state.velocity = Vec2::new(5.0, 0.0);
        c.state.throttle = 0.1;
        c.integrate(DT);
        assert!(c.state().velocity.x > 5.0);
    }

    // ── rotation wrap ─────────────────────────────────────────────────────

    #[test]
    fn rotation_wraps_one_full_turn_per_step() {
        let mut c = controller();
        c.state.rotation_deg = 359.5;
        c.state.angular_velocity = 100.0;
        c.state.steer = 1.0; // keep the snap branch out of the way
        c.integrate(DT);
        assert!(c.state().rotation_deg < 360.0);
        assert!(c.state().rotation_deg > 0.0);
    }

    #[test]
    fn negative_rotation_wraps_upward() {
        let mut c = controller();
        c.state.rotation_deg = -359.9;
        c.state.angular_velocity = -100.0;
        c.state.steer = -1.0;
        c.integrate(DT);
        assert!(c.state().rotation_deg > -360.0);
    }

    // ── scene and camera sync ─────────────────────────────────────────────

    #[test]
    fn update_syncs_the_bound_sprite() {
        let mut scene = SceneManager::new();
        let sprite = scene.add_object(SceneObject::new(MeshHandle(0), Vec2::ZERO));
        let mut camera = Camera::new(800.0, 600.0);

        let mut c = controller();
        c.bind_sprite(sprite);
        c.state.velocity = Vec2::new(100.0, 0.0);
        c.state.rotation_deg = 30.0;
        c.state.steer = 1.0;
        c.state.throttle = 1.0;

        c.update(DT, &mut scene, &mut camera);

        let object = scene.object(sprite);
        assert_eq!(object.position(), c.state().position);
        assert_eq!(object.rotation_deg(), c.state().rotation_deg);
    }

    #[test]
    fn camera_moves_a_smoothing_fraction_toward_the_car() {
        let mut scene = SceneManager::new();
        let mut camera = Camera::new(800.0, 600.0);

        let mut c = controller();
        c.state.position = Vec2::new(100.0, 0.0);
        c.update(DT, &mut scene, &mut camera);

        // alpha = clamp(10 · 0.016, 0, 1) = 0.16 of the gap per frame.
        let expected = c.state().position.x * 0.16;
        assert_relative_eq!(camera.position().x, expected, epsilon = 1e-3);
    }

    #[test]
    fn huge_dt_clamps_camera_blend_to_exact_follow() {
        let mut scene = SceneManager::new();
        let mut camera = Camera::new(800.0, 600.0);

        let mut c = controller();
        c.state.position = Vec2::new(500.0, -200.0);
        c.update(1.0, &mut scene, &mut camera);

        assert_relative_eq!(camera.position().x, c.state().position.x, epsilon = 1e-3);
        assert_relative_eq!(camera.position().y, c.state().position.y, epsilon = 1e-3);
    }
}
