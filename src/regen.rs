//! Debounced regeneration of the live galaxy field.
//!
//! Any change to the [`GalaxyParams`] resource (host mutation, egui panel
//! commit, or the initial insertion) is snapshotted by [`watch_params`] and,
//! once the quiescence window has elapsed with no further edits,
//! [`regenerate_field`] rebuilds the field from the *last* snapshot —
//! intermediate states from a burst of edits are discarded, never queued.
//!
//! Replacement is dispose-first: the previous mesh, material, and entity are
//! released before the new buffer is generated.  A failed generation therefore
//! leaves the scene without a field (and the failure recorded in
//! [`RegenStatus`]) rather than silently keeping a stale one attached; the
//! next parameter edit is the retry.  Validation failures are the exception —
//! they are rejected before anything is disposed, so the old field survives.

use std::time::Instant;

use bevy::{
    asset::Assets,
    ecs::{
        change_detection::DetectChanges,
        component::Component,
        entity::Entity,
        resource::Resource,
        system::{Commands, Res, ResMut},
    },
    math::Quat,
    pbr::MeshMaterial3d,
    prelude::{Handle, Mesh, Mesh3d},
    time::{Time, Timer, TimerMode},
    transform::components::Transform,
};

use crate::{
    field::generate,
    params::GalaxyParams,
    points::{GalaxyPointsMaterial, PointsMaterialDescriptor, points_mesh},
};

/// Quiescence window: edits arriving faster than this collapse into a single
/// regeneration.
pub const DEBOUNCE_SECS: f32 = 0.1;

/// Default orientation of a freshly attached field: tilted 30° about X so the
/// spiral plane reads as a disc instead of a line.  The animation driver
/// composes its yaw on top of this every frame.
pub const FIELD_TILT_RADIANS: f32 = std::f32::consts::PI / 6.0;

/// Marker on the entity currently drawing the field.
#[derive(Component)]
pub struct GalaxyField;

/// Everything owned by the currently attached field.
///
/// Held so disposal can release the exact assets and entity of the previous
/// generation; `points` is kept for status reporting.
#[derive(Debug)]
pub struct FieldHandles {
    pub entity: Entity,
    pub mesh: Handle<Mesh>,
    pub material: Handle<GalaxyPointsMaterial>,
    pub points: u32,
}

/// The single live-field slot.  `None` before the first generation and after
/// a failed one.
#[derive(Resource, Default)]
pub struct LiveField(pub Option<FieldHandles>);

/// Pending snapshot plus the quiescence timer.
#[derive(Resource)]
pub struct RegenDebounce {
    pub pending: Option<GalaxyParams>,
    quiescence: Timer,
}

impl Default for RegenDebounce {
    fn default() -> Self {
        Self {
            pending: None,
            quiescence: Timer::from_seconds(DEBOUNCE_SECS, TimerMode::Once),
        }
    }
}

/// Host-visible regeneration bookkeeping.
#[derive(Resource, Default)]
pub struct RegenStatus {
    /// Number of completed regenerations since startup.
    pub generations: u64,
    /// Message of the most recent failure; cleared by the next success.
    pub last_error: Option<String>,
}

/// Bevy system — snapshots [`GalaxyParams`] whenever it changes and restarts
/// the quiescence timer.  Resource insertion counts as a change, which is how
/// the startup field schedules itself.
pub fn watch_params(params: Res<GalaxyParams>, mut debounce: ResMut<RegenDebounce>) {
    if params.is_changed() {
        bevy::log::debug!(
            "galaxy parameters changed; regeneration in {DEBOUNCE_SECS}s unless edited again"
        );
        debounce.pending = Some(params.clone());
        debounce.quiescence.reset();
    }
}

/// Bevy system — runs the pending regeneration once the quiescence window has
/// elapsed: validate, dispose the previous field, generate, build, attach.
pub fn regenerate_field(
    mut commands: Commands,
    time: Res<Time>,
    mut debounce: ResMut<RegenDebounce>,
    mut live: ResMut<LiveField>,
    mut status: ResMut<RegenStatus>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<GalaxyPointsMaterial>>,
) {
    if debounce.pending.is_none() {
        return;
    }
    debounce.quiescence.tick(time.delta());
    if !debounce.quiescence.is_finished() {
        return;
    }
    let Some(snapshot) = debounce.pending.take() else {
        return;
    };

    // Invalid parameters never touch the attached field.
    if let Err(e) = snapshot.validate() {
        bevy::log::error!("galaxy parameters rejected: {e}");
        status.last_error = Some(e.to_string());
        return;
    }

    if let Some(old) = live.0.take() {
        meshes.remove(&old.mesh);
        materials.remove(&old.material);
        // The host may have despawned it already (teardown); that is fine.
        if let Ok(mut entity) = commands.get_entity(old.entity) {
            entity.despawn();
        }
    }

    let started = Instant::now();
    let buffer = match generate(&snapshot) {
        Ok(buffer) => buffer,
        Err(e) => {
            bevy::log::error!("galaxy regeneration failed: {e}");
            status.last_error = Some(e.to_string());
            return;
        }
    };

    let points = buffer.len() as u32;
    let mesh = meshes.add(points_mesh(&buffer));
    let material = materials.add(GalaxyPointsMaterial {
        descriptor: PointsMaterialDescriptor {
            point_size: snapshot.point_size,
            size_attenuation: snapshot.size_attenuation,
            ..Default::default()
        },
    });
    let entity = commands
        .spawn((
            GalaxyField,
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_rotation(Quat::from_rotation_x(FIELD_TILT_RADIANS)),
        ))
        .id();

    live.0 = Some(FieldHandles {
        entity,
        mesh,
        material,
        points,
    });
    status.generations += 1;
    status.last_error = None;
    bevy::log::info!(
        "galaxy field regenerated: {points} points in {:.1?}",
        started.elapsed()
    );
}
