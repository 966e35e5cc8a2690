use eframe::egui::{Color32, ColorImage, TextureHandle, Ui, Vec2};
use egui_plot::{Plot, PlotImage, PlotPoint};

use crate::color::HeatmapScale;
use crate::config::LabelerConfig;
use crate::data::model::Matrix;

// ---------------------------------------------------------------------------
// Rasterisation
// ---------------------------------------------------------------------------

/// Render one segment as a false-colour image, one pixel per cell.
///
/// Row 0 of the matrix is the *bottom* pixel row (origin lower-left).
pub fn rasterize(segment: &Matrix, scale: &HeatmapScale) -> ColorImage {
    let (rows, cols) = segment.shape();
    let mut image = ColorImage::new([cols, rows], Color32::BLACK);
    for r in 0..rows {
        let y = rows - 1 - r;
        for c in 0..cols {
            image[(c, y)] = scale.color_for(segment.get(r, c));
        }
    }
    image
}

/// Place panels side by side in one RGBA image (for the preview PNG).
pub fn panels_to_rgba(panels: &[ColorImage]) -> image::RgbaImage {
    let width: usize = panels.iter().map(|p| p.size[0]).sum();
    let height = panels.iter().map(|p| p.size[1]).max().unwrap_or(0);
    let mut out = image::RgbaImage::new(width as u32, height as u32);

    let mut x0 = 0;
    for panel in panels {
        let [w, h] = panel.size;
        for y in 0..h {
            for x in 0..w {
                let px = image::Rgba(panel[(x, y)].to_array());
                out.put_pixel((x0 + x) as u32, y as u32, px);
            }
        }
        x0 += w;
    }
    out
}

// ---------------------------------------------------------------------------
// Segment plot
// ---------------------------------------------------------------------------

/// Draw one panel stretched over the fixed extent `[0, w] × [0, h]`.
pub fn segment_plot(ui: &mut Ui, index: usize, texture: &TextureHandle, config: &LabelerConfig) {
    let (w, h) = (config.extent_width, config.extent_height);

    Plot::new(("segment_plot", index))
        .show_grid(false)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .include_x(0.0)
        .include_x(w)
        .include_y(0.0)
        .include_y(h)
        .set_margin_fraction(Vec2::ZERO)
        .show(ui, |plot_ui| {
            let image = PlotImage::new(
                texture.id(),
                PlotPoint::new(w / 2.0, h / 2.0),
                Vec2::new(w as f32, h as f32),
            );
            plot_ui.image(image);
        });
}
