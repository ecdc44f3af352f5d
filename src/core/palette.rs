/// Golden-angle step in degrees between consecutive series.
pub const GOLDEN_ANGLE: f64 = 137.5;

const SATURATION: u32 = 70;
const LIGHTNESS: u32 = 60;
const BACKGROUND_ALPHA: f64 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub struct ColorPair {
    pub hue: f64,
    pub background: String,
    pub border: String,
}

pub fn hue_for(index: usize) -> f64 {
    (index as f64 * GOLDEN_ANGLE) % 360.0
}

/// Colors depend only on the dataset index, never on its values.
pub fn color_for(index: usize) -> ColorPair {
    let hue = hue_for(index);
    ColorPair {
        hue,
        background: hsla(hue, BACKGROUND_ALPHA),
        border: hsla(hue, 1.0),
    }
}

fn hsla(hue: f64, alpha: f64) -> String {
    format!("hsla({}, {}%, {}%, {})", hue, SATURATION, LIGHTNESS, alpha)
}
