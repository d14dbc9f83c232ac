//! `preset_cycle` — steps through a handful of galaxy presets on a timer,
//! exercising the debounced dispose-and-replace path without any UI.
//!
//! Run with:
//!   cargo run --example preset_cycle

use bevy::prelude::*;
use bevy_galaxy_field::{GalaxyFieldPlugin, GalaxyParams};

const PRESET_SECS: f32 = 4.0;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "bevy_galaxy_field — preset cycle".into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(GalaxyFieldPlugin)
        .insert_resource(PresetCycle::default())
        .add_systems(Startup, spawn_camera)
        .add_systems(Update, cycle_presets)
        .run();
}

#[derive(Resource)]
struct PresetCycle {
    timer: Timer,
    index: usize,
}

impl Default for PresetCycle {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(PRESET_SECS, TimerMode::Repeating),
            index: 0,
        }
    }
}

fn presets() -> [GalaxyParams; 3] {
    [
        GalaxyParams::default(),
        // Tight two-armed spiral, cold palette.
        GalaxyParams {
            count: 200_000,
            branches: 2,
            spin: 2.5,
            randomness: 0.1,
            inside_color: [0.8, 0.9, 1.0],
            outside_color: [0.1, 0.1, 0.5],
            seed: 7,
            ..Default::default()
        },
        // Diffuse many-armed cloud, warm palette.
        GalaxyParams {
            count: 80_000,
            branches: 8,
            spin: -0.5,
            randomness: 0.8,
            randomness_power: 2.0,
            radius: 8.0,
            inside_color: [1.0, 0.8, 0.3],
            outside_color: [0.5, 0.1, 0.1],
            seed: 99,
            ..Default::default()
        },
    ]
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 5.0, 11.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn cycle_presets(
    time: Res<Time>,
    mut cycle: ResMut<PresetCycle>,
    mut params: ResMut<GalaxyParams>,
) {
    if !cycle.timer.tick(time.delta()).just_finished() {
        return;
    }
    let next = presets();
    cycle.index = (cycle.index + 1) % next.len();
    *params = next[cycle.index].clone();
}
