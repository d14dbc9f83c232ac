//! Live tweak panel for the galaxy parameters (feature `egui`).
//!
//! The panel edits a local copy of [`GalaxyParams`] and writes it back only
//! when a widget actually changed.  Writing through `ResMut` every frame would
//! trip Bevy's change detection on every redraw and keep the debounce timer
//! permanently reset; committing the diffed copy makes the notification fire
//! exactly once per real edit.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin, EguiPrimaryContextPass, egui};

use crate::{params::GalaxyParams, regen::RegenStatus};

/// Adds the tweak window (and [`EguiPlugin`] if the host has not already).
pub struct GalaxyPanelPlugin;

impl Plugin for GalaxyPanelPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<EguiPlugin>() {
            app.add_plugins(EguiPlugin::default());
        }
        app.add_systems(
            EguiPrimaryContextPass,
            galaxy_panel.run_if(resource_exists::<GalaxyParams>),
        );
    }
}

/// Bevy system — draws the panel and commits edits back to the resource.
pub fn galaxy_panel(
    mut contexts: EguiContexts,
    mut params: ResMut<GalaxyParams>,
    status: Res<RegenStatus>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut edited = params.clone();
    let mut changed = false;

    egui::Window::new("Galaxy")
        .default_width(280.0)
        .show(ctx, |ui| {
            changed |= ui
                .add(
                    egui::Slider::new(&mut edited.count, 0..=1_000_000)
                        .logarithmic(true)
                        .text("count"),
                )
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut edited.point_size, 0.001..=0.1).text("point size"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut edited.radius, 0.01..=20.0).text("radius"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut edited.branches, 1..=20).text("branches"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut edited.spin, -5.0..=5.0).text("spin"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut edited.randomness, 0.0..=2.0).text("randomness"))
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(&mut edited.randomness_power, 1.0..=10.0)
                        .text("randomness power"),
                )
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(&mut edited.rotation_speed, -2.0..=2.0)
                        .text("rotation speed"),
                )
                .changed();

            ui.horizontal(|ui| {
                ui.label("inside");
                changed |= ui.color_edit_button_rgb(&mut edited.inside_color).changed();
                ui.label("outside");
                changed |= ui
                    .color_edit_button_rgb(&mut edited.outside_color)
                    .changed();
            });
            changed |= ui
                .checkbox(&mut edited.size_attenuation, "size attenuation")
                .changed();

            if ui.button("Reseed").clicked() {
                edited.seed = edited.seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
                changed = true;
            }

            ui.separator();
            ui.label(format!(
                "generations: {}   seed: {}",
                status.generations, edited.seed
            ));
            if let Some(error) = &status.last_error {
                ui.colored_label(egui::Color32::RED, error);
            }
        });

    if changed && edited != *params {
        *params = edited;
    }
}
