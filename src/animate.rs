//! Per-frame rotation of the attached field.
//!
//! The yaw is a pure function of elapsed time and the current
//! `rotation_speed` — nothing accumulates, so speed edits take effect on the
//! next frame with no transition, and a freshly attached drawable picks the
//! correct angle back up immediately.

use bevy::{
    ecs::{
        query::With,
        system::{Query, Res},
    },
    math::Quat,
    time::Time,
    transform::components::Transform,
};

use crate::{
    params::GalaxyParams,
    regen::{FIELD_TILT_RADIANS, GalaxyField, LiveField},
};

/// Bevy system — sets the live field's rotation to the fixed tilt composed
/// with `-elapsed * rotation_speed` about the vertical axis.  With no field
/// attached (pre-first-generation, after a failed regeneration, or an
/// externally despawned entity) it is a no-op.
pub fn spin_field(
    time: Res<Time>,
    params: Res<GalaxyParams>,
    live: Res<LiveField>,
    mut fields: Query<&mut Transform, With<GalaxyField>>,
) {
    let Some(handles) = &live.0 else {
        return;
    };
    let Ok(mut transform) = fields.get_mut(handles.entity) else {
        return;
    };
    let yaw = -time.elapsed_secs() * params.rotation_speed;
    transform.rotation = Quat::from_rotation_x(FIELD_TILT_RADIANS) * Quat::from_rotation_y(yaw);
}
