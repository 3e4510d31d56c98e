use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error;

/// A color with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Rgb {
        Rgb { r, g, b }
    }

    /// Read the first three channels of a per-point color entry.
    ///
    /// Entries with fewer than three channels are not colors.
    pub fn from_channels(channels: &[f32]) -> Option<Rgb> {
        match channels {
            [r, g, b, ..] => Some(Rgb::new(*r, *g, *b)),
            _ => None,
        }
    }

    pub fn to_channels(self) -> Vec<f32> {
        vec![self.r, self.g, self.b]
    }

    /// Convert to a 6 digit hex string
    /// # Examples
    ///
    /// ```
    /// # use scattertk::plot::color::Rgb;
    /// assert_eq!(Rgb::new(1.0, 0.5, 0.0).to_hex(), "#ff8000");
    /// ```
    pub fn to_hex(&self) -> String {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

impl From<colorous::Color> for Rgb {
    fn from(color: colorous::Color) -> Self {
        Rgb::new(
            color.r as f32 / 255.0,
            color.g as f32 / 255.0,
            color.b as f32 / 255.0,
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// A parsed point color specification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColorSpec {
    Rgb(Rgb),
    None,
    Flat,
    Interp,
}

impl ColorSpec {
    pub fn parse(spec: &str) -> Result<ColorSpec, error::Error> {
        let trimmed = spec.trim();
        match trimmed {
            "none" => return Ok(ColorSpec::None),
            "flat" => return Ok(ColorSpec::Flat),
            "interp" => return Ok(ColorSpec::Interp),
            _ => (),
        }
        named_color(trimmed)
            .or_else(|| hex_color(trimmed))
            .or_else(|| triple_color(trimmed))
            .map(ColorSpec::Rgb)
            .ok_or_else(|| error::Error::InvalidColorSpec(spec.to_string()))
    }

    /// The uniform color used for points without their own color.
    /// `flat` and `interp` are reserved and draw black, as does `none`.
    pub fn fallback(&self) -> Rgb {
        match self {
            ColorSpec::Rgb(rgb) => *rgb,
            ColorSpec::None | ColorSpec::Flat | ColorSpec::Interp => Rgb::BLACK,
        }
    }
}

/// Resolve a color specification, falling back to black for anything
/// unrecognised.
///
/// # Examples
///
/// ```
/// # use scattertk::plot::color::{resolve_color, Rgb};
/// assert_eq!(resolve_color("b"), Rgb::new(0.0, 0.0, 1.0));
/// assert_eq!(resolve_color("#ff0000"), Rgb::new(1.0, 0.0, 0.0));
/// assert_eq!(resolve_color("none"), Rgb::BLACK);
/// ```
pub fn resolve_color(spec: &str) -> Rgb {
    match ColorSpec::parse(spec) {
        Ok(parsed) => parsed.fallback(),
        Err(_) => {
            tracing::debug!("unrecognised color spec {:?}, using black", spec);
            Rgb::BLACK
        }
    }
}

fn named_color(spec: &str) -> Option<Rgb> {
    let rgb = match spec {
        "y" | "yellow" => Rgb::new(1.0, 1.0, 0.0),
        "m" | "magenta" => Rgb::new(1.0, 0.0, 1.0),
        "c" | "cyan" => Rgb::new(0.0, 1.0, 1.0),
        "r" | "red" => Rgb::new(1.0, 0.0, 0.0),
        "g" | "green" => Rgb::new(0.0, 1.0, 0.0),
        "b" | "blue" => Rgb::new(0.0, 0.0, 1.0),
        "w" | "white" => Rgb::new(1.0, 1.0, 1.0),
        "k" | "black" => Rgb::BLACK,
        _ => return None,
    };
    Some(rgb)
}

fn hex_color(spec: &str) -> Option<Rgb> {
    let hex = spec.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expanded = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => hex.to_string(),
        _ => return None,
    };
    let channel = |i: usize| {
        u8::from_str_radix(&expanded[i..i + 2], 16)
            .ok()
            .map(|v| v as f32 / 255.0)
    };
    Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

fn triple_color(spec: &str) -> Option<Rgb> {
    let inner = spec.strip_prefix('[')?.strip_suffix(']')?;
    let values = inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f32>().ok())
        .collect::<Option<Vec<f32>>>()?;
    match values.as_slice() {
        [r, g, b] if [r, g, b].iter().all(|c| (0.0..=1.0).contains(*c)) => {
            Some(Rgb::new(*r, *g, *b))
        }
        _ => None,
    }
}

/// Color maps for index colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    Gray,
    #[default]
    Jet,
    Hot,
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Cividis,
    Turbo,
}

impl Colormap {
    /// Evaluate the map at `t` in `[0, 1]`.
    pub fn eval(&self, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Colormap::Gray => Rgb::new(t as f32, t as f32, t as f32),
            Colormap::Jet => {
                let channel = |offset: f64| (1.5 - 4.0 * (t - offset).abs()).clamp(0.0, 1.0) as f32;
                Rgb::new(channel(0.75), channel(0.5), channel(0.25))
            }
            Colormap::Hot => {
                let channel = |offset: f64| (3.0 * t - offset).clamp(0.0, 1.0) as f32;
                Rgb::new(channel(0.0), channel(1.0), channel(2.0))
            }
            Colormap::Viridis => colorous::VIRIDIS.eval_continuous(t).into(),
            Colormap::Plasma => colorous::PLASMA.eval_continuous(t).into(),
            Colormap::Inferno => colorous::INFERNO.eval_continuous(t).into(),
            Colormap::Magma => colorous::MAGMA.eval_continuous(t).into(),
            Colormap::Cividis => colorous::CIVIDIS.eval_continuous(t).into(),
            Colormap::Turbo => colorous::TURBO.eval_continuous(t).into(),
        }
    }
}
