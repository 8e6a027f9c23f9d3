//! Progress bar colors for quality and rarity scores.

/// Green scale: 0 -> red (hue 0), 100 -> green (hue 120)
pub fn quality_hue(score: i32) -> f64 {
    (score as f64 / 100.0) * 120.0
}

/// Blue for common (hue 240) down to red for rare (hue 0)
pub fn rarity_hue(score: i32) -> f64 {
    240.0 - (score as f64 / 100.0) * 240.0
}

pub fn quality_color(score: i32) -> String {
    hsl(quality_hue(score))
}

pub fn rarity_color(score: i32) -> String {
    hsl(rarity_hue(score))
}

/// CSS color with fixed saturation and lightness
fn hsl(hue: f64) -> String {
    format!("hsl({}, 100%, 40%)", format_hue(hue))
}

/// Integral hues print without a fractional part ("120", not "120.0")
fn format_hue(hue: f64) -> String {
    if hue.fract() == 0.0 {
        format!("{}", hue as i64)
    } else {
        let s = format!("{:.4}", hue);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
