use crate::model::ReshapeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn parse_hex(raw: &str) -> Result<Self, ReshapeError> {
        let s = raw.trim();
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| ReshapeError::InvalidColor(s.to_string()))?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ReshapeError::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| ReshapeError::InvalidColor(s.to_string()))
        };
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(
            mix(self.0, other.0),
            mix(self.1, other.1),
            mix(self.2, other.2),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PalettePreset {
    #[value(name = "rdbu")]
    RdBu,
    #[value(name = "brbg")]
    BrBg,
    #[value(name = "puor")]
    PuOr,
}

impl PalettePreset {
    /// (most negative, neutral, most positive)
    fn anchors(self) -> (Rgb, Rgb, Rgb) {
        match self {
            PalettePreset::RdBu => (
                Rgb(0xca, 0x00, 0x20),
                Rgb(0xf7, 0xf7, 0xf7),
                Rgb(0x05, 0x71, 0xb0),
            ),
            PalettePreset::BrBg => (
                Rgb(0xa6, 0x61, 0x1a),
                Rgb(0xf5, 0xf5, 0xf5),
                Rgb(0x01, 0x85, 0x71),
            ),
            PalettePreset::PuOr => (
                Rgb(0xe6, 0x61, 0x01),
                Rgb(0xf7, 0xf7, 0xf7),
                Rgb(0x5e, 0x3c, 0x99),
            ),
        }
    }

    pub fn build(self, n: usize) -> Palette {
        let (neg, mid, pos) = self.anchors();
        Palette::diverging(n, neg, mid, pos)
    }
}

/// Colors indexed like the scale, most negative first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    pub fn from_hex(values: &[String]) -> Result<Self, ReshapeError> {
        let colors = values
            .iter()
            .map(|v| Rgb::parse_hex(v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { colors })
    }

    /// Linear ramp from `neg` through `mid` to `pos`. The neutral color lands
    /// exactly on the center slot when `n` is odd and is skipped otherwise.
    pub fn diverging(n: usize, neg: Rgb, mid: Rgb, pos: Rgb) -> Self {
        if n == 0 {
            return Self { colors: Vec::new() };
        }
        if n == 1 {
            return Self { colors: vec![mid] };
        }
        let center = (n - 1) as f64 / 2.0;
        let colors = (0..n)
            .map(|i| {
                let x = i as f64;
                if x < center {
                    neg.lerp(mid, x / center)
                } else if x > center {
                    mid.lerp(pos, (x - center) / center)
                } else {
                    mid
                }
            })
            .collect();
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn color(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    pub fn ensure_len(&self, expected: usize) -> Result<(), ReshapeError> {
        if self.colors.len() != expected {
            return Err(ReshapeError::PaletteMismatch {
                expected,
                actual: self.colors.len(),
            });
        }
        Ok(())
    }

    pub fn to_hex(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.to_hex()).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/palette.rs"]
mod tests;
