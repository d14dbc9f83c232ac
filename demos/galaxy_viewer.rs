//! `galaxy_viewer` — interactive viewer with the egui tweak panel.
//!
//! Run with:
//!   cargo run --example galaxy_viewer --features egui

use bevy::prelude::*;
use bevy_galaxy_field::{GalaxyFieldPlugin, GalaxyPanelPlugin};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "bevy_galaxy_field — viewer".into(),
                resolution: (1280, 800).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins((GalaxyFieldPlugin, GalaxyPanelPlugin))
        .add_systems(Startup, spawn_camera)
        .run();
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 4.0, 9.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
