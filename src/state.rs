use std::path::{Path, PathBuf};

use eframe::egui::ColorImage;

use crate::color::HeatmapScale;
use crate::config::LabelerConfig;
use crate::data::catalog::FileCatalog;
use crate::data::export::{self, ExportRecord};
use crate::data::loader::load_matrix;
use crate::data::model::Segments;
use crate::error::{LabelerError, Result};
use crate::ui::heatmap;

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub text: String,
    pub is_error: bool,
}

// ---------------------------------------------------------------------------
// Labeler session
// ---------------------------------------------------------------------------

/// Everything the labeler knows, independent of rendering.
///
/// The session only changes on a successful load: a failed navigation
/// leaves position, record, panels and labels exactly as they were.
pub struct LabelerSession {
    pub config: LabelerConfig,
    input_dir: PathBuf,
    output_dir: PathBuf,
    catalog: FileCatalog,
    scale: HeatmapScale,

    /// Index into the catalog of the displayed file.
    position: usize,
    /// Current record and its split (None until a file loads).
    segments: Option<Segments>,
    /// One rendered heat-map per segment, left to right.
    panels: Vec<ColorImage>,
    /// Per-segment labels, reset on every load.
    labels: Vec<String>,
    /// Bumped on every successful load so the UI can refresh textures.
    generation: u64,

    pub status: Option<Status>,
}

impl LabelerSession {
    /// An uninitialised session; call [`LabelerSession::initialize`] next.
    pub fn new(input_dir: PathBuf, output_dir: PathBuf, config: LabelerConfig) -> Self {
        let scale = HeatmapScale::new(config.vmin, config.vmax);
        Self {
            config,
            input_dir,
            output_dir,
            catalog: FileCatalog::default(),
            scale,
            position: 0,
            segments: None,
            panels: Vec::new(),
            labels: Vec::new(),
            generation: 0,
            status: None,
        }
    }

    /// Scan the input directory and show the first file.
    pub fn initialize(&mut self) -> Result<()> {
        log::info!(
            "Labeling {} → {} with {:?}",
            self.input_dir.display(),
            self.output_dir.display(),
            self.config
        );
        self.position = 0;
        let result = self.scan_and_load_first();
        self.report(&result);
        result
    }

    fn scan_and_load_first(&mut self) -> Result<()> {
        self.catalog = FileCatalog::scan(&self.input_dir, &self.config)?;
        if self.catalog.is_empty() {
            return Err(LabelerError::EmptyCatalog(self.input_dir.clone()));
        }
        self.load_and_render(0)
    }

    /// Load the file at `position`, split it and render its panels.
    pub fn load_and_render(&mut self, position: usize) -> Result<()> {
        let path = self
            .catalog
            .get(position)
            .ok_or(LabelerError::OutOfRange {
                position: position as isize,
                len: self.catalog.len(),
            })?
            .to_path_buf();

        let record = load_matrix(&path).map_err(|e| LabelerError::Parse {
            path: path.clone(),
            message: format!("{e:#}"),
        })?;
        let parts = record.split_columns(self.config.split_count)?;
        let panels: Vec<ColorImage> = parts
            .iter()
            .map(|p| heatmap::rasterize(p, &self.scale))
            .collect();

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        log::info!(
            "Loaded {name} ({} × {}) into {} segments",
            record.rows(),
            record.cols(),
            parts.len()
        );

        self.labels = vec![String::new(); parts.len()];
        self.segments = Some(Segments { name, record, parts });
        self.panels = panels;
        self.position = position;
        self.generation += 1;
        self.status = None;
        Ok(())
    }

    /// Move by `delta` files and load the file there.
    pub fn advance(&mut self, delta: isize) -> Result<()> {
        let target = (self.position as isize).saturating_add(delta);
        let result = if target < 0 || target as usize >= self.catalog.len() {
            Err(LabelerError::OutOfRange {
                position: target,
                len: self.catalog.len(),
            })
        } else {
            self.load_and_render(target as usize)
        };
        self.report(&result);
        result
    }

    /// Navigate directly to a catalog entry.
    pub fn jump_to(&mut self, position: usize) -> Result<()> {
        self.advance(position as isize - self.position as isize)
    }

    /// Replace the label set. Nothing is validated.
    pub fn set_labels(&mut self, texts: Vec<String>) {
        self.labels = texts;
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// All labels run together, as shown in the summary box.
    pub fn combined_labels(&self) -> String {
        self.labels.concat()
    }

    /// Write the current segments and labels to the output directory.
    pub fn export(&mut self) -> Result<PathBuf> {
        let result = self.write_export();
        match &result {
            Ok(path) => {
                log::info!("Saved {}", path.display());
                self.status = Some(Status {
                    text: format!("Saved {}", path.display()),
                    is_error: false,
                });
            }
            Err(e) => {
                log::error!("Export failed: {e}");
                self.status = Some(Status {
                    text: format!("Error: {e}"),
                    is_error: true,
                });
            }
        }
        result
    }

    fn write_export(&self) -> Result<PathBuf> {
        let segments = self.segments.as_ref().ok_or(LabelerError::NoCurrentRecord)?;
        let path = self.current_path().ok_or(LabelerError::NoCurrentRecord)?;
        let record = ExportRecord::new(&segments.parts, &self.labels)?;
        let base = export::base_name(path);

        let written = export::write_record(&self.output_dir, &base, &record)?;
        if self.config.write_preview {
            // The JSON is already saved; a missing preview is not an export failure.
            let preview = heatmap::panels_to_rgba(&self.panels);
            if let Err(e) = export::write_preview(&self.output_dir, &base, &preview) {
                log::warn!("Preview not written: {e}");
            }
        }
        Ok(written)
    }

    /// Log a failure and put it in the status line.
    fn report(&mut self, result: &Result<()>) {
        if let Err(e) = result {
            log::warn!("{e}");
            self.status = Some(Status {
                text: format!("Error: {e}"),
                is_error: true,
            });
        }
    }

    // -- Accessors for the UI --

    pub fn catalog(&self) -> &FileCatalog {
        &self.catalog
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn segments(&self) -> Option<&Segments> {
        self.segments.as_ref()
    }

    pub fn panels(&self) -> &[ColorImage] {
        &self.panels
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.segments.as_ref()?;
        self.catalog.get(self.position)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use anyhow::Result;
    use tempfile::TempDir;

    use super::*;
    use crate::data::model::Matrix;

    /// Write a CSV with a header row and `rows × cols` values; the value at
    /// (r, c) is `seed + r * cols + c`.
    fn write_csv(path: &Path, rows: usize, cols: usize, seed: f64) -> Result<()> {
        let mut text = (0..cols).map(|c| format!("f{c}")).collect::<Vec<_>>().join(",");
        text.push('\n');
        for r in 0..rows {
            let line = (0..cols)
                .map(|c| (seed + (r * cols + c) as f64).to_string())
                .collect::<Vec<_>>()
                .join(",");
            text.push_str(&line);
            text.push('\n');
        }
        fs::write(path, text)?;
        Ok(())
    }

    struct Fixture {
        _tmp: TempDir,
        input: PathBuf,
        output: PathBuf,
    }

    fn fixture(files: &[(&str, usize, usize)]) -> Result<Fixture> {
        let tmp = TempDir::new()?;
        let input = tmp.path().join("raw");
        let output = tmp.path().join("json");
        fs::create_dir_all(&input)?;
        fs::create_dir_all(&output)?;
        for (i, (name, rows, cols)) in files.iter().enumerate() {
            write_csv(&input.join(name), *rows, *cols, i as f64 * 1000.0)?;
        }
        Ok(Fixture {
            _tmp: tmp,
            input,
            output,
        })
    }

    fn session(fx: &Fixture) -> LabelerSession {
        LabelerSession::new(fx.input.clone(), fx.output.clone(), LabelerConfig::default())
    }

    #[test]
    fn initialize_loads_first_file() -> Result<()> {
        let fx = fixture(&[("b.csv", 4, 20), ("a.csv", 1200, 200)])?;
        let mut s = session(&fx);
        s.initialize()?;

        assert_eq!(s.position(), 0);
        let seg = s.segments().unwrap();
        assert_eq!(seg.name, "a.csv");
        assert_eq!(seg.parts.len(), 10);
        assert!(seg.parts.iter().all(|p| p.shape() == (1200, 20)));
        assert_eq!(Matrix::concat_columns(&seg.parts).as_ref(), Some(&seg.record));
        assert_eq!(s.panels().len(), 10);
        assert_eq!(s.panels()[0].size, [20, 1200]);
        assert_eq!(s.labels(), vec![String::new(); 10]);
        Ok(())
    }

    #[test]
    fn initialize_on_empty_directory() -> Result<()> {
        let fx = fixture(&[])?;
        let mut s = session(&fx);

        let err = s.initialize().unwrap_err();
        assert!(matches!(err, LabelerError::EmptyCatalog(_)));
        assert!(s.segments().is_none());
        assert!(s.status.as_ref().is_some_and(|st| st.is_error));
        Ok(())
    }

    #[test]
    fn advance_forward_and_back_returns_to_same_file() -> Result<()> {
        let fx = fixture(&[("a.csv", 2, 10), ("b.csv", 2, 10), ("c.csv", 2, 10)])?;
        let mut s = session(&fx);
        s.initialize()?;
        s.advance(1)?;
        let before = s.segments().unwrap().record.clone();

        s.advance(1)?;
        assert_eq!(s.position(), 2);
        s.advance(-1)?;
        assert_eq!(s.position(), 1);
        assert_eq!(s.segments().unwrap().name, "b.csv");
        assert_eq!(s.segments().unwrap().record, before);
        Ok(())
    }

    #[test]
    fn advancing_past_the_end_keeps_last_render() -> Result<()> {
        let fx = fixture(&[("a.csv", 2, 10), ("b.csv", 2, 10)])?;
        let mut s = session(&fx);
        s.initialize()?;
        s.advance(1)?;
        let generation = s.generation();

        let err = s.advance(1).unwrap_err();
        assert!(matches!(err, LabelerError::OutOfRange { position: 2, len: 2 }));
        assert_eq!(s.position(), 1);
        assert_eq!(s.segments().unwrap().name, "b.csv");
        assert_eq!(s.generation(), generation);

        assert!(matches!(
            s.advance(-5).unwrap_err(),
            LabelerError::OutOfRange { position: -4, .. }
        ));
        // Still usable afterwards.
        s.advance(-1)?;
        assert_eq!(s.segments().unwrap().name, "a.csv");
        Ok(())
    }

    #[test]
    fn bad_files_are_classified_and_skippable() -> Result<()> {
        let fx = fixture(&[("a.csv", 2, 10), ("b.csv", 2, 11), ("d.csv", 2, 10)])?;
        fs::write(fx.input.join("c.csv"), "x,y\n1,oops\n")?;
        let mut s = session(&fx);
        s.initialize()?;

        assert!(matches!(
            s.advance(1).unwrap_err(),
            LabelerError::ShapeMismatch {
                columns: 11,
                segments: 10
            }
        ));
        assert!(matches!(s.jump_to(2).unwrap_err(), LabelerError::Parse { .. }));
        assert_eq!(s.segments().unwrap().name, "a.csv");

        s.jump_to(3)?;
        assert_eq!(s.segments().unwrap().name, "d.csv");
        assert!(s.status.is_none());
        Ok(())
    }

    #[test]
    fn labels_reset_on_navigation() -> Result<()> {
        let fx = fixture(&[("a.csv", 2, 10), ("b.csv", 2, 10)])?;
        let mut s = session(&fx);
        s.initialize()?;
        s.set_labels(vec!["x".into(); 10]);
        assert_eq!(s.combined_labels(), "xxxxxxxxxx");

        s.advance(1)?;
        assert!(s.labels().iter().all(String::is_empty));
        Ok(())
    }

    #[test]
    fn set_labels_accepts_anything() -> Result<()> {
        let fx = fixture(&[("a.csv", 2, 10)])?;
        let mut s = session(&fx);
        s.initialize()?;

        s.set_labels(vec!["dup".into(), "dup".into(), String::new()]);
        assert_eq!(s.labels().len(), 3);
        Ok(())
    }

    #[test]
    fn export_without_loaded_file_fails() -> Result<()> {
        let fx = fixture(&[("a.csv", 2, 7)])?;
        let mut s = session(&fx);
        assert!(s.initialize().is_err());

        assert!(matches!(s.export().unwrap_err(), LabelerError::NoCurrentRecord));
        assert_eq!(fs::read_dir(&fx.output)?.count(), 0);
        Ok(())
    }

    #[test]
    fn export_writes_labels_and_segments_in_order() -> Result<()> {
        let fx = fixture(&[("rec_01.csv", 3, 20)])?;
        let mut s = session(&fx);
        s.initialize()?;
        let labels: Vec<String> = (0..10).map(|i| format!("noise{i}")).collect();
        s.set_labels(labels.clone());

        let path = s.export()?;
        assert_eq!(path, fx.output.join("rec_01.json"));

        let saved: ExportRecord = serde_json::from_str(&fs::read_to_string(&path)?)?;
        assert_eq!(saved.label, labels);
        let expected: Vec<Vec<Vec<f64>>> = s
            .segments()
            .unwrap()
            .parts
            .iter()
            .map(Matrix::to_nested)
            .collect();
        assert_eq!(saved.data, expected);
        assert_eq!(saved.data[1][0], vec![2.0, 3.0]);
        assert!(s.status.as_ref().is_some_and(|st| !st.is_error));
        Ok(())
    }

    #[test]
    fn export_with_wrong_label_count_writes_nothing() -> Result<()> {
        let fx = fixture(&[("a.csv", 2, 10)])?;
        let mut s = session(&fx);
        s.initialize()?;
        s.set_labels(vec!["only one".into()]);

        assert!(matches!(
            s.export().unwrap_err(),
            LabelerError::LabelCountMismatch {
                labels: 1,
                segments: 10
            }
        ));
        assert!(!fx.output.join("a.json").exists());
        Ok(())
    }

    #[test]
    fn export_to_missing_directory_fails_cleanly() -> Result<()> {
        let fx = fixture(&[("a.csv", 2, 10)])?;
        let missing = fx.output.join("gone");
        let mut s = LabelerSession::new(fx.input.clone(), missing.clone(), LabelerConfig::default());
        s.initialize()?;

        assert!(matches!(s.export().unwrap_err(), LabelerError::Write { .. }));
        assert!(!missing.exists());
        assert!(s.status.as_ref().is_some_and(|st| st.is_error));
        Ok(())
    }

    #[test]
    fn export_writes_preview_when_enabled() -> Result<()> {
        let fx = fixture(&[("a.csv", 5, 10)])?;
        let config = LabelerConfig {
            write_preview: true,
            ..LabelerConfig::default()
        };
        let mut s = LabelerSession::new(fx.input.clone(), fx.output.clone(), config);
        s.initialize()?;
        s.export()?;

        let preview = image::open(fx.output.join("a.png"))?;
        assert_eq!((preview.width(), preview.height()), (10, 5));
        Ok(())
    }

    #[test]
    fn preview_failure_still_saves_json() -> Result<()> {
        let fx = fixture(&[("a.csv", 5, 10)])?;
        fs::create_dir(fx.output.join("a.png"))?;
        let config = LabelerConfig {
            write_preview: true,
            ..LabelerConfig::default()
        };
        let mut s = LabelerSession::new(fx.input.clone(), fx.output.clone(), config);
        s.initialize()?;

        let path = s.export()?;
        assert_eq!(path, fx.output.join("a.json"));
        assert!(path.is_file());
        assert!(s.status.as_ref().is_some_and(|st| !st.is_error));
        Ok(())
    }

    #[test]
    fn non_finite_file_is_parse_error_and_exports_nothing() -> Result<()> {
        let fx = fixture(&[])?;
        let cells = ["nan", "inf", "1", "2", "3", "4", "5", "6", "7", "8"];
        fs::write(fx.input.join("a.csv"), format!("{}\n{}\n", cells.map(|_| "c").join(","), cells.join(",")))?;
        let mut s = session(&fx);

        assert!(matches!(s.initialize().unwrap_err(), LabelerError::Parse { .. }));
        assert!(matches!(s.export().unwrap_err(), LabelerError::NoCurrentRecord));
        assert_eq!(fs::read_dir(&fx.output)?.count(), 0);
        Ok(())
    }
}
