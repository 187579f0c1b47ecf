pub const DEFAULT_BASE_COLOR: &str = "#22c55e";

pub const EMPTY_CELL: &str = "var(--cell-empty)";
pub const WEEKEND_CELL: &str = "var(--cell-weekend)";

// Lightness endpoints for the grid shading: a one-day streak renders light,
// a thirty-day (or longer) streak renders at the dark endpoint.
const SHADE_CAP_STREAK: u32 = 30;
const MAX_LIGHTNESS: f64 = 88.0;
const MIN_LIGHTNESS: f64 = 25.0;

/// Grid-view shading: hue and saturation come from the habit's base color,
/// lightness encodes the streak length ending at the cell's day.
pub fn streak_color(streak: u32, base_hex: &str) -> String {
    if streak == 0 {
        return "transparent".to_string();
    }

    let (h, s, _) = hex_to_hsl(base_hex)
        .or_else(|| hex_to_hsl(DEFAULT_BASE_COLOR))
        .unwrap_or((0.0, 0.0, 0.0));

    let clamped = streak.min(SHADE_CAP_STREAK);
    let progress = (clamped - 1) as f64 / (SHADE_CAP_STREAK - 1) as f64;
    let l = MAX_LIGHTNESS - progress * (MAX_LIGHTNESS - MIN_LIGHTNESS);

    format!("hsl({}, {s:.1}%, {l:.1}%)", h as i32)
}

/// Detail-view shading: the raw day value picks an opacity step over the
/// habit's base color. Kept separate from `streak_color` on purpose; the two
/// encode different surfaces.
pub fn value_color(value: u32, base_hex: &str) -> String {
    if value == 0 {
        return EMPTY_CELL.to_string();
    }

    let Some((r, g, b)) = parse_hex(base_hex) else {
        return base_hex.to_string();
    };

    let alpha = match value {
        1 => "0.4",
        2 => "0.7",
        _ => "1",
    };

    format!("rgba({r}, {g}, {b}, {alpha})")
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    let value = u32::from_str_radix(digits, 16).ok()?;
    match digits.len() {
        3 => {
            let r = ((value >> 8) & 0xf) as u8;
            let g = ((value >> 4) & 0xf) as u8;
            let b = (value & 0xf) as u8;
            Some((r * 17, g * 17, b * 17))
        }
        6 => Some((
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
        )),
        _ => None,
    }
}

fn hex_to_hsl(hex: &str) -> Option<(f64, f64, f64)> {
    let (r, g, b) = parse_hex(hex)?;
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let cmax = r.max(g).max(b);
    let cmin = r.min(g).min(b);
    let delta = cmax - cmin;

    let mut h = if delta == 0.0 {
        0.0
    } else if cmax == r {
        ((g - b) / delta) % 6.0
    } else if cmax == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    h = (h * 60.0).round();
    if h < 0.0 {
        h += 360.0;
    }

    let l = (cmax + cmin) / 2.0;
    let s = if delta == 0.0 {
        0.0
    } else {
        delta / (1.0 - (2.0 * l - 1.0).abs())
    };

    Some((h, s * 100.0, l * 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streak_one_renders_at_the_light_endpoint() {
        assert_eq!(streak_color(1, "#22c55e"), "hsl(142, 70.6%, 88.0%)");
    }

    #[test]
    fn streak_thirty_renders_at_the_dark_endpoint() {
        assert_eq!(streak_color(30, "#22c55e"), "hsl(142, 70.6%, 25.0%)");
    }

    #[test]
    fn streaks_past_thirty_clamp_to_the_dark_endpoint() {
        assert_eq!(streak_color(50, "#22c55e"), streak_color(30, "#22c55e"));
    }

    #[test]
    fn zero_streak_is_transparent() {
        assert_eq!(streak_color(0, "#22c55e"), "transparent");
    }

    #[test]
    fn three_digit_hex_expands_per_nibble() {
        assert_eq!(parse_hex("#fa0"), Some((255, 170, 0)));
        assert_eq!(streak_color(1, "#fff"), "hsl(0, 0.0%, 88.0%)");
    }

    #[test]
    fn hex_parses_with_or_without_hash() {
        assert_eq!(parse_hex("22c55e"), parse_hex("#22c55e"));
    }

    #[test]
    fn malformed_base_falls_back_to_the_default_color() {
        assert_eq!(streak_color(5, "not-a-color"), streak_color(5, "#22c55e"));
        assert_eq!(streak_color(5, ""), streak_color(5, "#22c55e"));
    }

    #[test]
    fn value_color_steps_through_opacities() {
        assert_eq!(value_color(0, "#22c55e"), EMPTY_CELL);
        assert_eq!(value_color(1, "#22c55e"), "rgba(34, 197, 94, 0.4)");
        assert_eq!(value_color(2, "#22c55e"), "rgba(34, 197, 94, 0.7)");
        assert_eq!(value_color(3, "#22c55e"), "rgba(34, 197, 94, 1)");
        assert_eq!(value_color(9, "#22c55e"), "rgba(34, 197, 94, 1)");
    }

    #[test]
    fn value_color_passes_malformed_hex_through() {
        assert_eq!(value_color(2, "springgreen"), "springgreen");
    }

    #[test]
    fn color_output_is_deterministic() {
        assert_eq!(streak_color(7, "#3b82f6"), streak_color(7, "#3b82f6"));
        assert_eq!(value_color(2, "#3b82f6"), value_color(2, "#3b82f6"));
    }
}
