//! The decoded data model handed to export and merge layers.

use crate::catalog::{DetectorType, GeometryType, Units};
use crate::error::{BdoError, BdoResult};
use crate::header::{DetectorHeader, HeaderLayout};
use ndarray::ArrayD;
use serde::Serialize;

/// Per-axis extent of the scoring volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisRange {
    /// x/y/z or r/theta/z start and stop positions.
    Spatial { min: [f64; 3], max: [f64; 3] },
    /// Zone scoring: inclusive range of zone numbers along the first axis.
    Zones { first: i32, last: i32 },
}

impl AxisRange {
    /// Flattens both kinds into (min, max) triples. Zone ranges become zone
    /// numbers on the first axis and 0.0 elsewhere.
    pub fn bounds(&self) -> ([f64; 3], [f64; 3]) {
        match *self {
            Self::Spatial { min, max } => (min, max),
            Self::Zones { first, last } => ([first as f64, 0.0, 0.0], [last as f64, 0.0, 0.0]),
        }
    }
}

/// Particle selection requested on the detector card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParticleFilter {
    pub particle_type: i32,
    pub z: i32,
    pub a: i32,
}

/// Differential scoring axis (energy/amu, LET or polar angle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DifferentialAxis {
    pub bins: u32,
    pub logarithmic: bool,
    pub scoring_type: i32,
}

/// A fully decoded detector. Only obtainable from the payload pass, and
/// read-only from then on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectorRecord {
    #[serde(flatten)]
    header: DetectorHeader,
    values: ArrayD<f64>,
}

impl DetectorRecord {
    pub(crate) fn new(header: DetectorHeader, values: ArrayD<f64>) -> Self {
        Self { header, values }
    }

    pub fn header(&self) -> &DetectorHeader {
        &self.header
    }

    pub fn layout(&self) -> HeaderLayout {
        self.header.layout
    }

    pub fn geometry_type(&self) -> GeometryType {
        self.header.geometry_type
    }

    /// Raw tag as found in the file, trimmed.
    pub fn geometry_tag(&self) -> &str {
        &self.header.geometry_tag
    }

    pub fn detector_type(&self) -> DetectorType {
        self.header.detector_type
    }

    pub fn dimensions(&self) -> [usize; 3] {
        self.header.dimensions
    }

    pub fn raw_dimensions(&self) -> [i32; 3] {
        self.header.raw_dimensions
    }

    pub fn dimensionality(&self) -> usize {
        self.header.dimensionality()
    }

    pub fn axis_range(&self) -> AxisRange {
        self.header.axis_range
    }

    pub fn axis_bounds(&self) -> ([f64; 3], [f64; 3]) {
        self.header.axis_range.bounds()
    }

    pub fn particle_filter(&self) -> ParticleFilter {
        self.header.particle_filter
    }

    pub fn detector_material(&self) -> i32 {
        self.header.detector_material
    }

    pub fn differential(&self) -> Option<DifferentialAxis> {
        self.header.differential
    }

    pub fn det(&self) -> &[f64; 8] {
        &self.header.det
    }

    pub fn statistics_count(&self) -> i32 {
        self.header.statistics_count
    }

    pub fn units(&self) -> &Units {
        &self.header.units
    }

    pub fn title(&self) -> &'static str {
        self.header.units.title
    }

    pub fn payload_offset(&self) -> u64 {
        self.header.payload_offset
    }

    pub fn record_stride(&self) -> usize {
        self.header.record_stride
    }

    pub fn trip_dose(&self) -> f64 {
        self.header.trip_dose
    }

    pub fn trip_total(&self) -> i64 {
        self.header.trip_total
    }

    /// Shaped values. Leading unit axes mark scalar detectors and planes.
    pub fn values(&self) -> &ArrayD<f64> {
        &self.values
    }

    /// Values in file order.
    pub fn raw_values(&self) -> &[f64] {
        self.values.as_slice_memory_order().unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Records can be combined bin-by-bin only when they describe the same
    /// scoring setup.
    pub fn check_compatible(&self, other: &DetectorRecord) -> BdoResult<()> {
        let a = &self.header;
        let b = &other.header;

        if a.geometry_type != b.geometry_type {
            return Err(BdoError::Incompatible(format!(
                "geometry {} vs {}",
                a.geometry_type, b.geometry_type
            )));
        }
        if a.detector_type != b.detector_type {
            return Err(BdoError::Incompatible(format!(
                "detector {} vs {}",
                a.detector_type, b.detector_type
            )));
        }
        if a.dimensions != b.dimensions {
            return Err(BdoError::Incompatible(format!(
                "dimensions {:?} vs {:?}",
                a.dimensions, b.dimensions
            )));
        }
        if a.units != b.units {
            return Err(BdoError::Incompatible(format!(
                "units {:?} vs {:?}",
                a.units.as_array(),
                b.units.as_array()
            )));
        }
        if a.axis_range != b.axis_range {
            return Err(BdoError::Incompatible(format!(
                "axis range {:?} vs {:?}",
                a.axis_range, b.axis_range
            )));
        }
        if self.values.shape() != other.values.shape() {
            return Err(BdoError::Incompatible(format!(
                "value shape {:?} vs {:?}",
                self.values.shape(),
                other.values.shape()
            )));
        }
        Ok(())
    }
}
