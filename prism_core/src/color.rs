use std::fmt;

/// 24-bit RGB color with canonical `#RRGGBB` rendering.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert from HSL with `hue` in degrees and `saturation`/`lightness`
    /// as percentages in 0..=100.
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let s = saturation / 100.0;
        let l = lightness / 100.0;
        let a = s * l.min(1.0 - l);
        let channel = |n: f64| -> u8 {
            let k = (n + hue / 30.0) % 12.0;
            let value = l - a * (-1.0f64).max((k - 3.0).min((9.0 - k).min(1.0)));
            (255.0 * value).round() as u8
        };
        Self::new(channel(0.0), channel(8.0), channel(4.0))
    }

    /// Canonical upper-case hex form, e.g. `#FFD700`.
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse a `#RRGGBB` string (case-insensitive). Returns `None` for any
    /// other shape.
    pub fn parse(text: &str) -> Option<Self> {
        let digits = text.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
        let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
        let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
        Some(Self::new(r, g, b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rgb({})", self.hex())
    }
}
