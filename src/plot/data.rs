use serde::{Deserialize, Serialize};

use super::color::Rgb;

/// Channels of one per-point color entry. Well formed entries hold at
/// least three values.
pub type Channels = Vec<f32>;

/// Which coordinate arrays of a series are authoritative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScatterKind {
    #[default]
    TwoD,
    ThreeD,
}

/// Coordinates and optional per-point colors of one series.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointData {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub color: Vec<Channels>,
}

impl PointData {
    pub fn clear(&mut self) {
        self.x.clear();
        self.y.clear();
        self.z.clear();
        self.color.clear();
    }

    /// Number of drawable points; surplus entries in longer arrays are
    /// ignored.
    pub fn point_count(&self, kind: ScatterKind) -> usize {
        match kind {
            ScatterKind::TwoD => self.x.len().min(self.y.len()),
            ScatterKind::ThreeD => self.x.len().min(self.y.len()).min(self.z.len()),
        }
    }

    /// Per-point color, if the entry exists and is well formed.
    pub fn color_at(&self, index: usize) -> Option<Rgb> {
        self.color
            .get(index)
            .and_then(|channels| Rgb::from_channels(channels))
    }

    /// Describe any disagreement between array lengths.
    pub fn length_mismatch(&self, kind: ScatterKind) -> Option<String> {
        let mut lengths = vec![("x", self.x.len()), ("y", self.y.len())];
        if kind == ScatterKind::ThreeD {
            lengths.push(("z", self.z.len()));
        }
        if !self.color.is_empty() {
            lengths.push(("color", self.color.len()));
        }
        let expected = lengths[0].1;
        if lengths.iter().all(|(_, len)| *len == expected) {
            return None;
        }
        Some(
            lengths
                .iter()
                .map(|(name, len)| format!("{}={}", name, len))
                .collect::<Vec<String>>()
                .join(", "),
        )
    }
}

/// One row of point input. `c` is an index color; `r`, `g`, `b` form a
/// true color.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: Option<f64>,
    #[serde(default)]
    pub c: Option<f64>,
    #[serde(default)]
    pub r: Option<f32>,
    #[serde(default)]
    pub g: Option<f32>,
    #[serde(default)]
    pub b: Option<f32>,
}

/// Per-point color input gathered from records.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorColumn {
    Uniform,
    Index(Vec<Option<f64>>),
    True(Vec<Channels>),
}

/// Column-wise view of a list of records.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordColumns {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Option<Vec<f64>>,
    pub color: ColorColumn,
}

impl RecordColumns {
    /// Split records into columns. `z` is used only when every record has
    /// one. An index color column wins over a true color one; records
    /// without an index or with missing channels keep a gap.
    pub fn from_records(records: &[PointRecord]) -> RecordColumns {
        let x = records.iter().map(|rec| rec.x).collect();
        let y = records.iter().map(|rec| rec.y).collect();
        let z = records.iter().map(|rec| rec.z).collect::<Option<Vec<f64>>>();
        let z = z.filter(|values| !values.is_empty());
        let color = if records.iter().any(|rec| rec.c.is_some()) {
            ColorColumn::Index(records.iter().map(|rec| rec.c).collect())
        } else if records
            .iter()
            .any(|rec| rec.r.is_some() || rec.g.is_some() || rec.b.is_some())
        {
            ColorColumn::True(
                records
                    .iter()
                    .map(|rec| match (rec.r, rec.g, rec.b) {
                        (Some(r), Some(g), Some(b)) => vec![r, g, b],
                        _ => vec![],
                    })
                    .collect(),
            )
        } else {
            ColorColumn::Uniform
        };
        RecordColumns { x, y, z, color }
    }
}
