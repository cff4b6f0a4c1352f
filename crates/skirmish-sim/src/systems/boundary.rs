//! Reflective world boundaries.

use skirmish_core::types::{Kinematics, Rect};

/// Clamp the position into `world` (edges inclusive).
///
/// On each axis that was out of range the velocity component is inverted and
/// scaled by `damping`, so repeated bounces lose energy. Returns whether any
/// axis bounced.
pub fn confine(kin: &mut Kinematics, world: &Rect, damping: f32) -> bool {
    let mut bounced = false;

    if kin.position.x < world.x {
        kin.position.x = world.x;
        kin.velocity.x = -kin.velocity.x * damping;
        bounced = true;
    } else if kin.position.x > world.max_x() {
        kin.position.x = world.max_x();
        kin.velocity.x = -kin.velocity.x * damping;
        bounced = true;
    }

    if kin.position.y < world.y {
        kin.position.y = world.y;
        kin.velocity.y = -kin.velocity.y * damping;
        bounced = true;
    } else if kin.position.y > world.max_y() {
        kin.position.y = world.max_y();
        kin.velocity.y = -kin.velocity.y * damping;
        bounced = true;
    }

    bounced
}
