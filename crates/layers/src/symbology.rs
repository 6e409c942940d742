/// How one region is drawn on the globe.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RegionStyle {
    /// Straight RGBA in `[0, 1]`.
    pub cap_color: [f32; 4],
    /// Extrusion as a fraction of the globe radius.
    pub altitude: f32,
}

impl RegionStyle {
    pub const fn new(cap_color: [f32; 4], altitude: f32) -> Self {
        Self {
            cap_color,
            altitude,
        }
    }

    /// Selected region: raised, mint green.
    pub const SELECTED: RegionStyle = RegionStyle::new([0.0, 1.0, 180.0 / 255.0, 0.65], 0.08);
    /// Hover preview: same hue as a selection, fainter and lower.
    pub const HOVERED: RegionStyle = RegionStyle::new([0.0, 1.0, 180.0 / 255.0, 0.40], 0.04);
    /// Everything else: flat, translucent blue.
    pub const DEFAULT: RegionStyle =
        RegionStyle::new([30.0 / 255.0, 144.0 / 255.0, 1.0, 0.35], 0.01);

    /// CSS `rgba(...)` string for hosts that style through the DOM.
    pub fn css_color(&self) -> String {
        let [r, g, b, a] = self.cap_color;
        format!(
            "rgba({},{},{},{a})",
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8
        )
    }
}

impl Default for RegionStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}
