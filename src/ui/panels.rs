use eframe::egui::{self, Color32, Key, RichText, ScrollArea, TextureHandle, Ui};
use egui_extras::{Size, StripBuilder};

use super::heatmap;
use crate::app::Action;
use crate::state::LabelerSession;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Navigation and save buttons, current file title, status line.
pub fn top_bar(ui: &mut Ui, session: &LabelerSession, actions: &mut Vec<Action>) {
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("◀ Prev (B)").clicked() {
            actions.push(Action::Advance(-1));
        }
        if ui.button("Next (N) ▶").clicked() {
            actions.push(Action::Advance(1));
        }
        if ui
            .button("💾 Save File (S)")
            .on_hover_text(format!("Write JSON to {}", session.output_dir().display()))
            .clicked()
        {
            actions.push(Action::Save);
        }

        ui.separator();

        match session.segments() {
            Some(seg) => {
                ui.strong(&seg.name);
                ui.label(format!(
                    "{}/{}",
                    session.position() + 1,
                    session.catalog().len()
                ));
            }
            None => {
                ui.label("No file loaded.");
            }
        }

        if let Some(status) = &session.status {
            ui.separator();
            let color = if status.is_error {
                Color32::RED
            } else {
                Color32::LIGHT_GREEN
            };
            ui.label(RichText::new(&status.text).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// Label row + spectrogram panels (central panel)
// ---------------------------------------------------------------------------

/// One text field per segment followed by the "Labeling" button.
pub fn label_row(ui: &mut Ui, inputs: &mut [String], actions: &mut Vec<Action>) {
    let n = inputs.len();
    StripBuilder::new(ui)
        .sizes(Size::remainder(), n)
        .size(Size::exact(80.0))
        .horizontal(|mut strip| {
            for (i, text) in inputs.iter_mut().enumerate() {
                strip.cell(|ui: &mut Ui| {
                    let response = ui.add(
                        egui::TextEdit::singleline(text)
                            .hint_text(format!("#{}", i + 1))
                            .desired_width(f32::INFINITY),
                    );
                    if response.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter)) {
                        actions.push(Action::ApplyLabels);
                    }
                });
            }
            strip.cell(|ui: &mut Ui| {
                if ui.button("Labeling").clicked() {
                    actions.push(Action::ApplyLabels);
                }
            });
        });
}

/// The rendered segments, left to right.
pub fn spectrogram_row(ui: &mut Ui, session: &LabelerSession, textures: &[TextureHandle]) {
    if textures.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Nothing to show. Pick a folder containing CSV spectrograms.");
        });
        return;
    }

    StripBuilder::new(ui)
        .sizes(Size::remainder(), textures.len())
        .horizontal(|mut strip| {
            for (i, texture) in textures.iter().enumerate() {
                strip.cell(|ui: &mut Ui| {
                    heatmap::segment_plot(ui, i, texture, &session.config);
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Right side panel – label summary and file list
// ---------------------------------------------------------------------------

pub fn side_panel(ui: &mut Ui, session: &LabelerSession, combined: &str, actions: &mut Vec<Action>) {
    ui.heading("Labels");
    ui.separator();
    if combined.is_empty() {
        ui.weak("Press Labeling to preview.");
    } else {
        ui.label(RichText::new(combined).monospace());
    }

    ui.add_space(8.0);
    ui.heading("Files");
    ui.label(session.catalog().root().display().to_string());
    ui.separator();

    let catalog = session.catalog();
    let current = session.segments().map(|_| session.position());
    let row_height = ui.text_style_height(&egui::TextStyle::Body);
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show_rows(ui, row_height, catalog.len(), |ui: &mut Ui, range| {
            for i in range {
                let name = catalog.display_name(i).unwrap_or_default();
                if ui.selectable_label(current == Some(i), name).clicked() {
                    actions.push(Action::JumpTo(i));
                }
            }
        });
}
