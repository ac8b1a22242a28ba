//! Category colors and blending.
//!
//! Registry colors are authored as CSS hex (`#RRGGBB` / `#RGB`) and parsed
//! with a branchless digit decode:
//!   is_digit = (b - '0') < 10, is_lower = (b - 'a') < 6, is_upper = (b - 'A') < 6
//!   value    = is_digit·(b - '0') + is_lower·(b - 'a' + 10) + is_upper·(b - 'A' + 10)
//!
//! `lerp_color` is channel-wise linear interpolation in integer RGB space,
//! rounded half-up, so blended bridge/stream colors are exact and testable.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Opaque RGB triple (0-255 per channel). Serialized as `"#rrggbb"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// RGB plus straight (unmultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgb {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Fallback for items whose category is not in the registry.
    pub const NEUTRAL: Self = Self::new(150, 150, 165);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Attach an alpha in `[0, 1]` (clamped).
    #[inline(always)]
    pub fn alpha(self, a: f32) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a: unit_to_byte(a),
        }
    }
}

impl Rgb {
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Rgba {
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0 };
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_hex_color(&text).ok_or_else(|| de::Error::custom(format!("invalid color '{text}'")))
    }
}

#[inline(always)]
fn unit_to_byte(v: f32) -> u8 {
    round_half_up(v.clamp(0.0, 1.0) * 255.0)
}

#[inline(always)]
fn round_half_up(v: f32) -> u8 {
    (v + 0.5).floor().clamp(0.0, 255.0) as u8
}

/// Channel-wise `a + (b − a)·t`, `t` clamped to `[0, 1]`, rounded half-up.
pub fn lerp_color(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let ch = |x: u8, y: u8| round_half_up(x as f32 + (y as f32 - x as f32) * t);
    Rgb {
        r: ch(a.r, b.r),
        g: ch(a.g, b.g),
        b: ch(a.b, b.b),
    }
}

#[inline(always)]
fn hex_digit_branchless(b: u8) -> Option<u8> {
    let is_digit = (b.wrapping_sub(b'0') < 10) as u8;
    let is_lower = (b.wrapping_sub(b'a') < 6) as u8;
    let is_upper = (b.wrapping_sub(b'A') < 6) as u8;

    let value = is_digit
        .wrapping_mul(b.wrapping_sub(b'0'))
        .wrapping_add(is_lower.wrapping_mul(b.wrapping_sub(b'a').wrapping_add(10)))
        .wrapping_add(is_upper.wrapping_mul(b.wrapping_sub(b'A').wrapping_add(10)));

    // Exactly one class bit is set for a valid hex char.
    ((is_digit | is_lower | is_upper) == 1).then_some(value)
}

/// Parse `#RRGGBB` or `#RGB`. Anything else is `None`.
pub fn parse_hex_color(s: &str) -> Option<Rgb> {
    let bytes = s.trim().as_bytes();
    if bytes.first() != Some(&b'#') {
        return None;
    }
    let mut digits = [0u8; 6];
    let body = &bytes[1..];
    for (slot, &b) in digits.iter_mut().zip(body) {
        *slot = hex_digit_branchless(b)?;
    }
    match body.len() {
        3 => Some(Rgb::new(
            digits[0] << 4 | digits[0],
            digits[1] << 4 | digits[1],
            digits[2] << 4 | digits[2],
        )),
        6 => Some(Rgb::new(
            digits[0] << 4 | digits[1],
            digits[2] << 4 | digits[3],
            digits[4] << 4 | digits[5],
        )),
        _ => None,
    }
}
