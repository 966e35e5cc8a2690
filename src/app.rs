use eframe::egui::{self, Key, TextureHandle, TextureOptions};
use egui_extras::{Size, StripBuilder};

use crate::state::LabelerSession;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// User actions collected while drawing, applied after the frame's panels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Advance(isize),
    JumpTo(usize),
    ApplyLabels,
    Save,
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct NoiseLabelerApp {
    pub session: LabelerSession,
    /// Text in the per-segment fields.
    label_inputs: Vec<String>,
    /// Summary shown after "Labeling".
    combined: String,
    textures: Vec<TextureHandle>,
    uploaded_generation: Option<u64>,
}

impl NoiseLabelerApp {
    pub fn new(session: LabelerSession) -> Self {
        Self {
            session,
            label_inputs: Vec::new(),
            combined: String::new(),
            textures: Vec::new(),
            uploaded_generation: None,
        }
    }

    /// Upload panels after a new file loaded and clear the label fields.
    fn sync_with_session(&mut self, ctx: &egui::Context) {
        let generation = self.session.generation();
        if self.uploaded_generation == Some(generation) {
            return;
        }
        self.textures = self
            .session
            .panels()
            .iter()
            .enumerate()
            .map(|(i, img)| ctx.load_texture(format!("segment_{i}"), img.clone(), TextureOptions::NEAREST))
            .collect();
        log::debug!("Uploaded {} segment textures", self.textures.len());

        self.label_inputs = self.session.labels().to_vec();
        self.combined.clear();
        self.uploaded_generation = Some(generation);
    }

    fn shortcuts(&self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        // Letters belong to the text fields while one is focused.
        if ctx.memory(|m| m.focused().is_some()) {
            return;
        }
        ctx.input(|i| {
            if i.key_pressed(Key::B) {
                actions.push(Action::Advance(-1));
            }
            if i.key_pressed(Key::N) {
                actions.push(Action::Advance(1));
            }
            if i.key_pressed(Key::S) {
                actions.push(Action::Save);
            }
        });
    }

    fn apply(&mut self, action: Action) {
        // Failures are logged and shown in the status line by the session.
        match action {
            Action::Advance(delta) => {
                let _ = self.session.advance(delta);
            }
            Action::JumpTo(position) => {
                let _ = self.session.jump_to(position);
            }
            Action::ApplyLabels => {
                self.session.set_labels(self.label_inputs.clone());
                self.combined = self.session.combined_labels();
            }
            Action::Save => {
                self.session.set_labels(self.label_inputs.clone());
                let _ = self.session.export();
            }
        }
    }
}

impl eframe::App for NoiseLabelerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_with_session(ctx);

        let mut actions = Vec::new();
        self.shortcuts(ctx, &mut actions);

        // ---- Top panel: navigation ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.session, &mut actions);
        });

        // ---- Right side panel: label summary + file list ----
        egui::SidePanel::right("file_panel")
            .default_width(320.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.session, &self.combined, &mut actions);
            });

        // ---- Central panel: label fields over the spectrogram ----
        egui::CentralPanel::default().show(ctx, |ui| {
            StripBuilder::new(ui)
                .size(Size::exact(28.0))
                .size(Size::remainder())
                .vertical(|mut strip| {
                    strip.cell(|ui| {
                        panels::label_row(ui, &mut self.label_inputs, &mut actions);
                    });
                    strip.cell(|ui| {
                        panels::spectrogram_row(ui, &self.session, &self.textures);
                    });
                });
        });

        if !actions.is_empty() {
            ctx.request_repaint();
        }
        for action in actions {
            self.apply(action);
        }
    }
}
