//! テーマ設定 - ダークテーマと日本語フォント

use egui::{Color32, CornerRadius, Stroke, Style, Visuals};

/// カラーパレット
pub struct Colors;

impl Colors {
    pub const BG_DARK: Color32 = Color32::from_rgb(16, 20, 28);
    pub const BG_PANEL: Color32 = Color32::from_rgb(24, 30, 42);
    pub const BG_EDITOR: Color32 = Color32::from_rgb(12, 15, 22);
    pub const BG_HOVER: Color32 = Color32::from_rgb(36, 46, 64);
    /// Zenn のブランドカラー
    pub const ZENN: Color32 = Color32::from_rgb(62, 168, 255);
    pub const DEVTO: Color32 = Color32::from_rgb(59, 73, 223);
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(235, 238, 245);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(140, 152, 176);
    pub const BORDER: Color32 = Color32::from_rgb(48, 60, 82);
}

/// ダークテーマのスタイルを作成
pub fn dark_theme() -> Style {
    let mut style = Style::default();
    let mut visuals = Visuals::dark();

    visuals.panel_fill = Colors::BG_DARK;
    visuals.window_fill = Colors::BG_PANEL;
    visuals.extreme_bg_color = Colors::BG_EDITOR;
    visuals.faint_bg_color = Colors::BG_PANEL;

    let radius = CornerRadius::same(6);
    for widget in [
        &mut visuals.widgets.noninteractive,
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
    ] {
        widget.corner_radius = radius;
        widget.fg_stroke = Stroke::new(1.0, Colors::TEXT_PRIMARY);
    }
    visuals.widgets.noninteractive.bg_fill = Colors::BG_PANEL;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, Colors::TEXT_SECONDARY);
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, Colors::BORDER);
    visuals.widgets.inactive.bg_fill = Colors::BG_PANEL;
    visuals.widgets.hovered.bg_fill = Colors::BG_HOVER;
    visuals.widgets.active.bg_fill = Colors::ZENN;

    visuals.selection.bg_fill = Colors::ZENN.gamma_multiply(0.4);
    visuals.selection.stroke = Stroke::new(1.0, Colors::ZENN);

    style.visuals = visuals;
    style
}

/// システムの日本語フォントを登録
pub fn install_japanese_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();

    #[cfg(windows)]
    const CANDIDATES: &[&str] = &[
        "C:\\Windows\\Fonts\\YuGothM.ttc",
        "C:\\Windows\\Fonts\\meiryo.ttc",
    ];
    #[cfg(target_os = "macos")]
    const CANDIDATES: &[&str] = &["/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc"];
    #[cfg(not(any(windows, target_os = "macos")))]
    const CANDIDATES: &[&str] = &[
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    ];

    let Some(font_data) = CANDIDATES.iter().find_map(|path| std::fs::read(path).ok()) else {
        tracing::warn!("日本語フォントが見つかりません");
        return;
    };

    fonts
        .font_data
        .insert("japanese".to_owned(), egui::FontData::from_owned(font_data).into());
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, "japanese".to_owned());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .push("japanese".to_owned());

    ctx.set_fonts(fonts);
}
