//! Steering primitive and explicit Euler integration.

use glam::Vec2;

use skirmish_core::config::SimConfig;
use skirmish_core::types::Kinematics;

/// Nudge the velocity toward `target`.
///
/// The desired velocity is the unit direction to the target; the velocity
/// moves toward it by `steering_damping` of the difference, and the angle is
/// re-derived from the result. Within `arrival_distance_sq` of the target
/// nothing changes. Returns whether steering was applied.
pub fn steer(kin: &mut Kinematics, target: Vec2, config: &SimConfig) -> bool {
    let to_target = target - kin.position;
    let distance_sq = to_target.length_squared();
    if distance_sq <= config.arrival_distance_sq || distance_sq == 0.0 {
        return false;
    }

    let desired = to_target / distance_sq.sqrt();
    let steering = desired - kin.velocity;
    kin.velocity += steering * config.steering_damping;
    kin.angle = kin.velocity.y.atan2(kin.velocity.x);
    true
}

/// Rescale the velocity so its length does not exceed `max_speed`.
pub fn limit_speed(kin: &mut Kinematics, max_speed: f32) {
    let speed_sq = kin.velocity.length_squared();
    if speed_sq > max_speed * max_speed {
        kin.velocity *= max_speed / speed_sq.sqrt();
    }
}

/// Clamp speed, then move one tick along the velocity.
pub fn advance(kin: &mut Kinematics, config: &SimConfig) {
    limit_speed(kin, config.max_speed);
    kin.position += kin.velocity;
}
