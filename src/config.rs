use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Labeler configuration
// ---------------------------------------------------------------------------

/// Fixed session parameters. There is no config file; everything comes
/// from [`Default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelerConfig {
    /// Number of equal-width column segments per file (one label each).
    pub split_count: usize,
    /// Intensity mapped to the cold end of the colour map.
    pub vmin: f64,
    /// Intensity mapped to the hot end of the colour map.
    pub vmax: f64,
    /// Plot-space width of one panel.
    pub extent_width: f64,
    /// Plot-space height of one panel.
    pub extent_height: f64,
    /// Lower-case extensions accepted into the catalog. Empty = every file.
    pub extensions: Vec<String>,
    /// Also write `<base>.png` with the rendered panels next to the JSON.
    pub write_preview: bool,
    /// Initial window size.
    pub window_size: [f32; 2],
}

impl Default for LabelerConfig {
    fn default() -> Self {
        Self {
            split_count: 10,
            vmin: 60.0,
            vmax: 120.0,
            extent_width: 200.0,
            extent_height: 1200.0,
            extensions: Vec::new(),
            write_preview: false,
            window_size: [1770.0, 730.0],
        }
    }
}

impl LabelerConfig {
    /// Whether `ext` (without dot) passes the catalog extension filter.
    pub fn accepts_extension(&self, ext: Option<&str>) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        let Some(ext) = ext else {
            return false;
        };
        let ext = ext.to_ascii_lowercase();
        self.extensions.iter().any(|e| *e == ext)
    }
}
