/*
 * UI Module
 *
 * This module contains the egui tuning panel. It lets the steering constants be
 * adjusted while the flock is running, toggles pause, and shows frame statistics.
 * Change detection compares the parameters before and after the panel is drawn.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::{Averaging, SteeringParams};

// Draw the panel and report whether any steering parameter changed
pub fn update_ui(
    egui: &mut Egui,
    steering: &mut SteeringParams,
    paused: &mut bool,
    debug_info: &DebugInfo,
) -> bool {
    let snapshot = steering.clone();

    let ctx = egui.begin_frame();

    egui::Window::new("Steering Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Field of View", |ui| {
                ui.add(egui::Slider::new(&mut steering.align_fov, SteeringParams::get_fov_range()).text("Alignment"));
                ui.add(egui::Slider::new(&mut steering.cohesion_fov, SteeringParams::get_fov_range()).text("Cohesion"));
                ui.add(egui::Slider::new(&mut steering.separation_fov, SteeringParams::get_fov_range()).text("Separation"));
            });

            ui.collapsing("Weights", |ui| {
                ui.add(egui::Slider::new(&mut steering.align_weight, SteeringParams::get_weight_range()).text("Alignment"));
                ui.add(egui::Slider::new(&mut steering.cohesion_weight, SteeringParams::get_weight_range()).text("Cohesion"));
                ui.add(egui::Slider::new(&mut steering.separation_weight, SteeringParams::get_weight_range()).text("Separation"));
            });

            ui.collapsing("Magnitudes", |ui| {
                ui.add(egui::Slider::new(&mut steering.max_mag, SteeringParams::get_max_mag_range()).text("Steering Magnitude"));
                ui.add(egui::Slider::new(&mut steering.max_force, SteeringParams::get_max_force_range()).text("Separation Clamp"));
            });

            ui.collapsing("Averaging", |ui| {
                ui.radio_value(&mut steering.averaging, Averaging::Reference, "Population (alignment, separation)");
                ui.radio_value(&mut steering.averaging, Averaging::Neighbors, "Neighbours only");
            });

            ui.separator();

            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
            ui.label(format!("Agents: {}", debug_info.agents));
            ui.label(format!("Ticks: {}", debug_info.ticks));
            ui.label(format!("Mean speed: {:.1}", debug_info.mean_speed));

            ui.checkbox(paused, "Pause Simulation");
        });

    *steering != snapshot
}
