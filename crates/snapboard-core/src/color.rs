//! CSS color strings as emitted by color pickers and config files.

use peniko::Color;

/// Parse a CSS color string: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` or `transparent`.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("transparent") {
        return Some(Color::from_rgba8(0, 0, 0, 0));
    }
    let hex = s.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize, width: usize| -> Option<u8> {
        let digits = &hex[i * width..(i + 1) * width];
        let value = u8::from_str_radix(digits, 16).ok()?;
        // Short form repeats the nibble: "3" -> 0x33
        Some(if width == 1 { value * 17 } else { value })
    };
    match hex.len() {
        3 => Some(Color::from_rgba8(channel(0, 1)?, channel(1, 1)?, channel(2, 1)?, 255)),
        4 => Some(Color::from_rgba8(
            channel(0, 1)?,
            channel(1, 1)?,
            channel(2, 1)?,
            channel(3, 1)?,
        )),
        6 => Some(Color::from_rgba8(channel(0, 2)?, channel(1, 2)?, channel(2, 2)?, 255)),
        8 => Some(Color::from_rgba8(
            channel(0, 2)?,
            channel(1, 2)?,
            channel(2, 2)?,
            channel(3, 2)?,
        )),
        _ => None,
    }
}

/// Format a color as `#rrggbb`, or `#rrggbbaa` when not opaque.
pub fn to_hex(color: Color) -> String {
    let c = color.to_rgba8();
    if c.a == 255 {
        format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba(color: Color) -> (u8, u8, u8, u8) {
        let c = color.to_rgba8();
        (c.r, c.g, c.b, c.a)
    }

    #[test]
    fn test_parse_long_hex() {
        let color = parse_color("#ff8000").unwrap();
        assert_eq!(rgba(color), (255, 128, 0, 255));
    }

    #[test]
    fn test_parse_short_hex() {
        let color = parse_color("#333").unwrap();
        assert_eq!(rgba(color), (0x33, 0x33, 0x33, 255));
    }

    #[test]
    fn test_parse_alpha_and_transparent() {
        assert_eq!(rgba(parse_color("#00000080").unwrap()), (0, 0, 0, 0x80));
        assert_eq!(rgba(parse_color("transparent").unwrap()).3, 0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_color("red").is_none());
        assert!(parse_color("#12").is_none());
        assert!(parse_color("#gggggg").is_none());
        assert!(parse_color("#ééé").is_none());
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(Color::from_rgba8(0, 0, 0, 255)), "#000000");
        assert_eq!(to_hex(Color::from_rgba8(255, 0, 16, 128)), "#ff001080");
    }
}
