//! CSS color text handling.
//!
//! Strokes and documents keep their colors as the CSS text they were given so
//! that the JSON form round-trips unchanged. Parsing only happens when pixels
//! are produced.

use peniko::Color;

/// An RGBA8 color resolved from CSS text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Whether the color is fully opaque.
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Named colors accepted besides hex and `rgb()` notation.
const NAMED_COLORS: &[(&str, Rgba)] = &[
    ("black", Rgba::new(0, 0, 0, 255)),
    ("white", Rgba::new(255, 255, 255, 255)),
    ("red", Rgba::new(255, 0, 0, 255)),
    ("green", Rgba::new(0, 128, 0, 255)),
    ("blue", Rgba::new(0, 0, 255, 255)),
    ("yellow", Rgba::new(255, 255, 0, 255)),
    ("orange", Rgba::new(255, 165, 0, 255)),
    ("purple", Rgba::new(128, 0, 128, 255)),
    ("gray", Rgba::new(128, 128, 128, 255)),
    ("grey", Rgba::new(128, 128, 128, 255)),
    ("navy", Rgba::new(0, 0, 128, 255)),
    ("transparent", Rgba::new(0, 0, 0, 0)),
];

/// Parse CSS color text.
///
/// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
/// `rgba(r, g, b, a)` with `a` in `[0, 1]`, and a small set of named colors.
pub fn parse_color(text: &str) -> Option<Rgba> {
    let text = text.trim();

    if let Some(hex) = text.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lower = text.to_ascii_lowercase();
    if let Some(args) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_rgb_args(args);
    }

    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, color)| *color)
}

/// Parse CSS color text, falling back to opaque black.
pub fn parse_color_or_black(text: &str) -> Rgba {
    parse_color(text).unwrap_or_else(|| {
        log::warn!("Unrecognized color {:?}, using black", text);
        Rgba::black()
    })
}

/// Resolve CSS color text into a paint color.
pub fn resolve(text: &str) -> Color {
    parse_color_or_black(text).into()
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    let hex = hex.trim();
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some(Rgba::new(nibble(0)?, nibble(1)?, nibble(2)?, 255)),
        4 => Some(Rgba::new(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
        6 => Some(Rgba::new(byte(0)?, byte(2)?, byte(4)?, 255)),
        8 => Some(Rgba::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<Rgba> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }

    let channel = |s: &str| -> Option<u8> {
        let v: f64 = s.parse().ok()?;
        Some(v.round().clamp(0.0, 255.0) as u8)
    };

    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    let a = match parts.get(3) {
        Some(s) => {
            let v: f64 = s.parse().ok()?;
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        None => 255,
    };

    Some(Rgba::new(r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(parse_color("#000000"), Some(Rgba::black()));
        assert_eq!(parse_color("#fff"), Some(Rgba::white()));
        assert_eq!(parse_color("#ff000080"), Some(Rgba::new(255, 0, 0, 128)));
        assert_eq!(parse_color("#0f08"), Some(Rgba::new(0, 255, 0, 136)));
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#zzzzzz"), None);
    }

    #[test]
    fn test_parse_rgb_functions() {
        assert_eq!(parse_color("rgb(10, 20, 30)"), Some(Rgba::new(10, 20, 30, 255)));
        assert_eq!(parse_color("RGBA(10,20,30,0.5)"), Some(Rgba::new(10, 20, 30, 128)));
        assert_eq!(parse_color("rgb(300, -5, 0)"), Some(Rgba::new(255, 0, 0, 255)));
        assert_eq!(parse_color("rgb(1, 2)"), None);
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(parse_color("Blue"), Some(Rgba::new(0, 0, 255, 255)));
        assert_eq!(parse_color("transparent"), Some(Rgba::transparent()));
        assert_eq!(parse_color("chartreuse-ish"), None);
    }

    #[test]
    fn test_unknown_falls_back_to_black() {
        assert_eq!(parse_color_or_black("not a color"), Rgba::black());
    }

    #[test]
    fn test_peniko_round_trip() {
        let color = resolve("#3366cc");
        assert_eq!(Rgba::from(color), Rgba::new(0x33, 0x66, 0xcc, 255));
    }
}
