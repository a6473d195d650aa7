// crates/chironium-ui/src/widgets/spectrogram.rs
//
// Synthetic spectrogram view for the derush module. The image is demo
// visualization only — seeded noise plus FM-sweep call signatures, no FFT,
// no WAV parsing anywhere. Generated once per file and kept as a texture;
// zooming stretches the displayed size, not the image.
//
// Unit contract: x maps linearly to [0, file duration] seconds, y maps
// linearly to [MAX_FREQ_KHZ, 0] kHz (high frequencies on top). A drag
// rectangle is normalized (min < max on both axes) before it leaves this
// widget, so the zone store only ever sees ordered bounds.

use chironium_core::catalog::ActiveFile;
use chironium_core::zones::Zone;
use egui::{Align2, Color32, ColorImage, FontId, Pos2, Rect, Sense, Stroke, StrokeKind, TextureHandle, Ui};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use super::file_seed;
use crate::theme::{ACCENT, DARK_BG_0, DARK_TEXT_DIM, ZONE_ORANGE};

/// Top of the frequency axis. 384 kHz recordings resolve to 192 kHz but the
/// interesting chiroptera bands end well below 150.
pub const MAX_FREQ_KHZ: f32 = 150.0;

const IMG_W: usize = 1024;
const IMG_H: usize = 360;

/// A user-drawn rectangle, converted to audio units and normalized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpectroSelection {
    pub start:     f64,
    pub end:       f64,
    pub freq_low:  f32,
    pub freq_high: f32,
}

pub struct SpectrogramView {
    /// (file id, texture) — regenerated when the active file changes.
    texture:   Option<(String, TextureHandle)>,
    drag_from: Option<Pos2>,
}

impl SpectrogramView {
    pub fn new() -> Self {
        Self { texture: None, drag_from: None }
    }

    /// Draw the spectrogram with zone overlays and the playhead; returns a
    /// normalized selection when the user finishes a drag.
    pub fn ui(
        &mut self,
        ui: &mut Ui,
        file: &ActiveFile,
        zones: &[Zone],
        selected: Option<Uuid>,
        playhead: f64,
        zoom: f32,
    ) -> Option<SpectroSelection> {
        let tex = self.texture_for(ui, &file.id);

        let avail = ui.available_size();
        let size = egui::vec2((avail.x - 40.0).max(200.0) * zoom.max(1.0), avail.y.max(200.0));
        let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        painter.rect_filled(rect, 4.0, DARK_BG_0);
        painter.image(
            tex.id(),
            rect,
            Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
            Color32::WHITE,
        );

        // Frequency gridline labels every 20 kHz.
        let mut khz = 0.0_f32;
        while khz <= MAX_FREQ_KHZ - 10.0 {
            let y = rect.max.y - (khz / MAX_FREQ_KHZ) * rect.height();
            painter.text(
                Pos2::new(rect.max.x - 4.0, y),
                Align2::RIGHT_CENTER,
                format!("{} kHz", khz as i32),
                FontId::monospace(9.0),
                DARK_TEXT_DIM,
            );
            khz += 20.0;
        }

        let duration = file.duration_secs().max(0.001);

        // Zone overlays.
        for zone in zones {
            let zrect = self.zone_rect(rect, zone, duration);
            let is_sel = selected == Some(zone.id);
            let stroke = if is_sel { Stroke::new(2.0, ACCENT) } else { Stroke::new(1.0, ZONE_ORANGE) };
            painter.rect_filled(zrect, 2.0, Color32::from_rgba_unmultiplied(255, 149, 0, 26));
            painter.rect_stroke(zrect, 2.0, stroke, StrokeKind::Outside);
            painter.text(
                zrect.left_top() + egui::vec2(2.0, -2.0),
                Align2::LEFT_BOTTOM,
                &zone.name,
                FontId::proportional(9.0),
                if is_sel { ACCENT } else { ZONE_ORANGE },
            );
        }

        // Playhead.
        let px = rect.min.x + (playhead / duration).clamp(0.0, 1.0) as f32 * rect.width();
        painter.line_segment(
            [Pos2::new(px, rect.min.y), Pos2::new(px, rect.max.y)],
            Stroke::new(1.0, ACCENT),
        );

        painter.text(
            rect.left_top() + egui::vec2(6.0, 6.0),
            Align2::LEFT_TOP,
            "Glissez pour sélectionner une zone",
            FontId::proportional(10.0),
            DARK_TEXT_DIM,
        );

        // ── Drag-rectangle selection ──────────────────────────────────────────
        if response.drag_started() {
            self.drag_from = response.interact_pointer_pos();
        }
        if response.dragged() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Crosshair);
            if let (Some(from), Some(to)) = (self.drag_from, response.interact_pointer_pos()) {
                let live = Rect::from_two_pos(from, to);
                painter.rect_stroke(live, 0.0, Stroke::new(2.0, ACCENT), StrokeKind::Outside);
            }
        } else if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Crosshair);
        }
        if response.drag_stopped() {
            if let (Some(from), Some(to)) = (self.drag_from.take(), response.interact_pointer_pos()) {
                return Some(Self::to_selection(rect, from, to, duration));
            }
        }
        None
    }

    /// Pixel → audio-unit conversion, normalized so min < max on both axes
    /// whenever the drag covered any extent at all. A pure function of the
    /// geometry, so tested directly.
    fn to_selection(rect: Rect, from: Pos2, to: Pos2, duration: f64) -> SpectroSelection {
        let t = |x: f32| -> f64 {
            (((x - rect.min.x) / rect.width()).clamp(0.0, 1.0) as f64) * duration
        };
        let f = |y: f32| -> f32 {
            (1.0 - ((y - rect.min.y) / rect.height()).clamp(0.0, 1.0)) * MAX_FREQ_KHZ
        };
        let (t0, t1) = (t(from.x), t(to.x));
        let (f0, f1) = (f(from.y), f(to.y));
        SpectroSelection {
            start:     t0.min(t1),
            end:       t0.max(t1),
            freq_low:  f0.min(f1),
            freq_high: f0.max(f1),
        }
    }

    fn zone_rect(&self, rect: Rect, zone: &Zone, duration: f64) -> Rect {
        let x0 = rect.min.x + (zone.start / duration).clamp(0.0, 1.0) as f32 * rect.width();
        let x1 = rect.min.x + (zone.end / duration).clamp(0.0, 1.0) as f32 * rect.width();
        let y0 = rect.max.y - (zone.freq_high / MAX_FREQ_KHZ).clamp(0.0, 1.0) * rect.height();
        let y1 = rect.max.y - (zone.freq_low / MAX_FREQ_KHZ).clamp(0.0, 1.0) * rect.height();
        Rect::from_min_max(Pos2::new(x0, y0), Pos2::new(x1, y1))
    }

    fn texture_for(&mut self, ui: &mut Ui, file_id: &str) -> TextureHandle {
        let stale = self.texture.as_ref().map(|(id, _)| id != file_id).unwrap_or(true);
        if stale {
            let image = synth_spectrogram(file_id, IMG_W, IMG_H);
            let tex = ui.ctx().load_texture(
                format!("spectro-{file_id}"),
                image,
                egui::TextureOptions::LINEAR,
            );
            self.texture = Some((file_id.to_owned(), tex));
        }
        self.texture.as_ref().map(|(_, t)| t.clone()).unwrap()
    }
}

/// Build the synthetic spectrogram image: a dim noise floor with a handful
/// of downward FM sweeps in the 40–110 kHz band, intensity mapped through
/// a blue → cyan → amber ramp. Deterministic per file id.
pub fn synth_spectrogram(file_id: &str, width: usize, height: usize) -> ColorImage {
    let mut rng = StdRng::seed_from_u64(file_seed(file_id));
    let mut pixels = vec![Color32::BLACK; width * height];

    for px in pixels.iter_mut() {
        let noise = rng.gen_range(0u8..30);
        *px = Color32::from_rgb(noise, noise, noise);
    }

    let call_count = rng.gen_range(3..=6);
    for _ in 0..call_count {
        // Keep the range non-empty even for tiny images; the sweep loop
        // clamps to `width` anyway.
        let x0 = rng.gen_range(0..width.saturating_sub(60).max(1));
        let w = rng.gen_range(24..52);
        let f_start = rng.gen_range(0.60..0.76); // fraction of height, from the bottom
        let f_end = rng.gen_range(0.38..0.50);
        let intensity = rng.gen_range(160.0_f32..215.0);

        for x in x0..(x0 + w).min(width) {
            let progress = (x - x0) as f32 / w as f32;
            let frac = f_start + (f_end - f_start) * progress;
            let y_center = ((1.0 - frac) * height as f32) as i64;
            for dy in -3_i64..=3 {
                let y = y_center + dy;
                if y < 0 || y >= height as i64 {
                    continue;
                }
                let falloff = 1.0 - dy.unsigned_abs() as f32 / 4.0;
                let level = intensity * falloff;
                pixels[y as usize * width + x] = ramp(level);
            }
        }
    }

    ColorImage::new([width, height], pixels)
}

fn ramp(level: f32) -> Color32 {
    if level > 150.0 {
        Color32::from_rgb((255.0 * (level - 150.0) / 100.0).min(255.0) as u8, 200, 100)
    } else if level > 100.0 {
        Color32::from_rgb(0, (200.0 * level / 150.0) as u8, 255)
    } else {
        Color32::from_rgb(0, (50.0 + 150.0 * level / 100.0) as u8, (100.0 + 155.0 * level / 100.0) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synth_image_is_deterministic_per_file() {
        let a = synth_spectrogram("16", 64, 32);
        let b = synth_spectrogram("16", 64, 32);
        assert_eq!(a.pixels, b.pixels);
        let other = synth_spectrogram("1", 64, 32);
        assert_ne!(a.pixels, other.pixels);
    }

    #[test]
    fn synth_image_handles_tiny_dimensions() {
        for (w, h) in [(1, 1), (8, 4), (60, 16), (61, 16)] {
            let img = synth_spectrogram("16", w, h);
            assert_eq!(img.pixels.len(), w * h);
        }
    }

    #[test]
    fn drag_selection_is_normalized() {
        let rect = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(100.0, 100.0));
        // Drag up-left: raw coords reversed on both axes.
        let sel = SpectrogramView::to_selection(
            rect,
            Pos2::new(80.0, 20.0),
            Pos2::new(40.0, 70.0),
            10.0,
        );
        assert!(sel.start < sel.end);
        assert!(sel.freq_low < sel.freq_high);
        assert!((sel.start - 4.0).abs() < 1e-6);
        assert!((sel.end - 8.0).abs() < 1e-6);
        // y=20 → 80 % of the band, y=70 → 30 %.
        assert!((sel.freq_high - 0.8 * MAX_FREQ_KHZ).abs() < 1e-3);
        assert!((sel.freq_low - 0.3 * MAX_FREQ_KHZ).abs() < 1e-3);
    }

    #[test]
    fn degenerate_drag_yields_zero_extent() {
        let rect = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(100.0, 100.0));
        let sel = SpectrogramView::to_selection(
            rect,
            Pos2::new(50.0, 50.0),
            Pos2::new(50.0, 50.0),
            10.0,
        );
        // The widget passes it through; the zone store rejects it.
        assert_eq!(sel.start, sel.end);
        assert_eq!(sel.freq_low, sel.freq_high);
    }
}
