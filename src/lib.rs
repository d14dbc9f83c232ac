//! `bevy_galaxy_field` — procedural spiral-galaxy point fields for Bevy.
//!
//! # Architecture
//! [`GalaxyParams`] describes the field; [`generate`] synthesizes a
//! [`PointBuffer`] (positions + colours) from it; [`points_mesh`] and
//! [`GalaxyPointsMaterial`] turn the buffer into a billboard-sprite drawable.
//! [`GalaxyFieldPlugin`] wires the live path: any change to the params
//! resource is debounced (100 ms quiescence) and then the attached field is
//! disposed and rebuilt from the last snapshot, while [`animate::spin_field`]
//! rotates whatever field is currently attached.
//!
//! Generation is deterministic: the seed lives in the params, so two equal
//! `GalaxyParams` always produce byte-identical buffers.

pub mod animate;
pub mod field;
pub mod params;
pub mod points;
pub mod regen;

#[cfg(feature = "egui")]
pub mod panel;

pub use field::{GenerateError, PointBuffer, generate};
pub use params::{GalaxyParams, MAX_POINTS, ParamError};
pub use points::{GalaxyPointsMaterial, PointsMaterialDescriptor, points_mesh};
pub use regen::{FieldHandles, GalaxyField, LiveField, RegenStatus};

#[cfg(feature = "egui")]
pub use panel::GalaxyPanelPlugin;

use bevy::{asset::embedded_asset, prelude::*};

/// Bevy plugin — registers the point-sprite material, the debounced
/// regeneration systems, and the rotation driver.
///
/// Inserts a default [`GalaxyParams`] only if the host has not already; the
/// insertion itself schedules the first generation.  Removing the resource
/// tears the whole loop down: a pending debounce becomes a silent no-op.
pub struct GalaxyFieldPlugin;

impl Plugin for GalaxyFieldPlugin {
    fn build(&self, app: &mut App) {
        embedded_asset!(app, "points.wgsl");
        app.add_plugins(MaterialPlugin::<GalaxyPointsMaterial>::default())
            .init_resource::<GalaxyParams>()
            .init_resource::<regen::LiveField>()
            .init_resource::<regen::RegenDebounce>()
            .init_resource::<regen::RegenStatus>()
            .add_systems(
                Update,
                (
                    regen::watch_params,
                    regen::regenerate_field,
                    animate::spin_field,
                )
                    .chain()
                    .run_if(resource_exists::<GalaxyParams>),
            );
    }
}
