// src/theme.rs
use egui::{Color32, Context, Stroke, Style, Visuals};

// ── Palette ──────────────────────────────────────────────────────────────────
// Survey-workbench dark palette: near-black spectrogram background, cyan
// accent for selection, orange for zones, violet for analysis.
pub const ACCENT:        Color32 = Color32::from_rgb(  0, 194, 255); // #00C2FF
pub const ACCENT_DIM:    Color32 = Color32::from_rgb(  0, 130, 175);
pub const ACCENT_HOVER:  Color32 = Color32::from_rgb( 80, 214, 255);

pub const ZONE_ORANGE:   Color32 = Color32::from_rgb(255, 149,   0); // #FF9500
pub const ANALYSE_VIOLET: Color32 = Color32::from_rgb(139,  92, 246); // #8B5CF6
pub const OK_GREEN:      Color32 = Color32::from_rgb( 34, 197,  94);
pub const WARN_ORANGE:   Color32 = Color32::from_rgb(249, 115,  22);
pub const ERR_RED:       Color32 = Color32::from_rgb(239,  68,  68);

pub const DARK_BG_0:     Color32 = Color32::from_rgb( 13,  17,  23); // #0D1117
pub const DARK_BG_1:     Color32 = Color32::from_rgb( 22,  27,  34); // #161B22
pub const DARK_BG_2:     Color32 = Color32::from_rgb( 28,  34,  43);
pub const DARK_BG_3:     Color32 = Color32::from_rgb( 38,  46,  58);
pub const DARK_BG_4:     Color32 = Color32::from_rgb( 50,  60,  74);

pub const DARK_TEXT:     Color32 = Color32::from_rgb(220, 224, 230);
pub const DARK_TEXT_DIM: Color32 = Color32::from_rgb(125, 133, 144);
pub const DARK_BORDER:   Color32 = Color32::from_rgb( 48,  54,  61); // #30363D

pub fn configure_style(ctx: &Context) {
    let mut style = Style::default();

    style.spacing.item_spacing     = egui::vec2(6.0, 5.0);
    style.spacing.window_margin    = egui::Margin::same(10);
    style.spacing.button_padding   = egui::vec2(10.0, 5.0);
    style.spacing.scroll.bar_width = 8.0;
    style.spacing.indent           = 14.0;

    let cr = egui::CornerRadius::same(4);

    let mut v = Visuals::dark();
    v.panel_fill       = DARK_BG_1;
    v.window_fill      = DARK_BG_2;
    v.faint_bg_color   = DARK_BG_0;
    v.extreme_bg_color = DARK_BG_0;
    v.window_stroke    = Stroke::new(1.0, DARK_BORDER);

    v.selection.bg_fill = ACCENT_DIM;
    v.selection.stroke  = Stroke::new(1.0, Color32::BLACK);
    v.hyperlink_color   = ACCENT_HOVER;

    v.widgets.noninteractive.bg_fill       = DARK_BG_2;
    v.widgets.noninteractive.bg_stroke     = Stroke::new(1.0, DARK_BORDER);
    v.widgets.noninteractive.fg_stroke     = Stroke::new(1.0, DARK_TEXT_DIM);
    v.widgets.noninteractive.corner_radius = cr;

    v.widgets.inactive.bg_fill       = DARK_BG_3;
    v.widgets.inactive.bg_stroke     = Stroke::new(1.0, DARK_BORDER);
    v.widgets.inactive.fg_stroke     = Stroke::new(1.0, DARK_TEXT);
    v.widgets.inactive.corner_radius = cr;

    v.widgets.hovered.bg_fill       = DARK_BG_4;
    v.widgets.hovered.bg_stroke     = Stroke::new(1.0, ACCENT_DIM);
    v.widgets.hovered.fg_stroke     = Stroke::new(1.5, ACCENT_HOVER);
    v.widgets.hovered.corner_radius = cr;

    v.widgets.active.bg_fill       = ACCENT_DIM;
    v.widgets.active.bg_stroke     = Stroke::new(1.0, ACCENT);
    v.widgets.active.fg_stroke     = Stroke::new(2.0, Color32::WHITE);
    v.widgets.active.corner_radius = cr;

    v.widgets.open.bg_fill       = DARK_BG_4;
    v.widgets.open.bg_stroke     = Stroke::new(1.0, ACCENT_DIM);
    v.widgets.open.fg_stroke     = Stroke::new(1.5, ACCENT_HOVER);
    v.widgets.open.corner_radius = cr;

    v.override_text_color = Some(DARK_TEXT);

    ctx.set_visuals(v);
    ctx.set_style(style);

    ctx.style_mut(|s| {
        s.visuals.window_corner_radius = cr;
        s.visuals.menu_corner_radius   = cr;
    });
}
