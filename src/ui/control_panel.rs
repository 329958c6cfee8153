//! Control panel: time controls and display options.
//!
//! The panel reads the controller and only ever writes
//! [`SimulationCommand`]s; nothing here mutates simulation state directly.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::icons;
use crate::input::MAX_TIME_SCALE;
use crate::simulation::{DisplayConfig, SimulationCommand, SimulationController};

/// Range of the minimum display size slider.
pub const MIN_SIZE_RANGE: std::ops::RangeInclusive<f32> = 0.1..=5.0;

/// Colors for the panel.
mod colors {
    use bevy_egui::egui::Color32;

    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(26, 26, 36, 235);
    pub const PLAY_ICON: Color32 = Color32::from_rgb(85, 221, 136);
    pub const PAUSE_ICON: Color32 = Color32::from_rgb(221, 170, 85);
    pub const TEXT: Color32 = Color32::from_rgb(220, 220, 230);
}

/// System that renders the control panel.
pub fn control_panel_system(
    mut contexts: EguiContexts,
    sim: Res<SimulationController>,
    mut commands: MessageWriter<SimulationCommand>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::Window::new("Orrery")
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(12.0, 12.0))
        .resizable(false)
        .frame(
            egui::Frame::NONE
                .fill(colors::PANEL_BG)
                .corner_radius(8)
                .inner_margin(egui::Margin::same(12)),
        )
        .show(ctx, |ui| {
            ui.spacing_mut().item_spacing.y = 8.0;

            render_date(ui, &sim);
            render_time_row(ui, &sim, &mut commands);
            render_time_scale(ui, &sim, &mut commands);

            ui.separator();

            render_display_options(ui, sim.display(), &mut commands);
        });
}

fn render_date(ui: &mut egui::Ui, sim: &SimulationController) {
    ui.label(
        egui::RichText::new(format!("{} {}", icons::CLOCK, sim.current_instant()))
            .monospace()
            .size(15.0)
            .color(colors::TEXT),
    );
}

/// Play/pause, reverse, reset and resample.
fn render_time_row(
    ui: &mut egui::Ui,
    sim: &SimulationController,
    commands: &mut MessageWriter<SimulationCommand>,
) {
    ui.horizontal(|ui| {
        let (icon, color, tooltip) = if sim.is_paused() {
            (icons::PLAY, colors::PLAY_ICON, "Play (Space)")
        } else {
            (icons::PAUSE, colors::PAUSE_ICON, "Pause (Space)")
        };
        let play = egui::Button::new(egui::RichText::new(icon).size(20.0).color(color))
            .min_size(egui::vec2(36.0, 30.0));
        if ui.add(play).on_hover_text(tooltip).clicked() {
            commands.write(SimulationCommand::TogglePause);
        }

        let can_reverse = !sim.is_paused();
        if ui
            .add_enabled(can_reverse, egui::Button::new(icons::REVERSE))
            .on_hover_text("Reverse time (Backspace)")
            .clicked()
        {
            commands.write(SimulationCommand::SetTimeScale(-sim.time_scale()));
        }

        if ui
            .button(icons::RESET)
            .on_hover_text("Back to start date (R)")
            .clicked()
        {
            commands.write(SimulationCommand::Reset);
        }

        if ui
            .button(icons::ORBIT)
            .on_hover_text("Resample orbit paths from now (O)")
            .clicked()
        {
            commands.write(SimulationCommand::ResampleOrbits);
        }
    });
}

/// Signed time-scale slider, in days per second.
fn render_time_scale(
    ui: &mut egui::Ui,
    sim: &SimulationController,
    commands: &mut MessageWriter<SimulationCommand>,
) {
    let mut rate = sim.time_scale();
    let slider = egui::Slider::new(&mut rate, -MAX_TIME_SCALE..=MAX_TIME_SCALE)
        .text("days/s")
        .logarithmic(true)
        .smallest_positive(1.0 / 64.0);
    if ui.add(slider).changed() {
        commands.write(SimulationCommand::SetTimeScale(rate));
    }
}

fn render_display_options(
    ui: &mut egui::Ui,
    display: &DisplayConfig,
    commands: &mut MessageWriter<SimulationCommand>,
) {
    let mut min_size = display.min_size;
    let slider = egui::Slider::new(&mut min_size, MIN_SIZE_RANGE)
        .text(format!("{} min size", icons::SIZE));
    if ui.add(slider).changed() {
        commands.write(SimulationCommand::SetMinSize(min_size));
    }

    let mut labels = display.labels_visible;
    if ui
        .checkbox(&mut labels, format!("{} Labels (L)", icons::LABELS))
        .changed()
    {
        commands.write(SimulationCommand::SetLabelsVisible(labels));
    }

    let mut overlay = display.overlay_visible;
    if ui
        .checkbox(&mut overlay, format!("{} Constellations (C)", icons::CONSTELLATIONS))
        .changed()
    {
        commands.write(SimulationCommand::SetOverlayVisible(overlay));
    }
}
