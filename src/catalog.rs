//! Closed registries of the geometry and detector types a BDO file can carry,
//! and the unit tables derived from them.

use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Placeholder used wherever a geometry/detector combination has no unit.
pub const NO_UNIT: &str = "(nil)";

/// Estimator geometry, as spelled in the 10-byte ASCII tag of the header.
#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum GeometryType {
    Msh,
    Dmsh,
    Cyl,
    Dcyl,
    Zone,
    Dzone,
    Voxscore,
    Geomap,
    Plane,
    Unknown,
}

impl GeometryType {
    /// Resolves a raw header tag. Padding is ignored and case does not matter;
    /// anything unrecognized is `Unknown`.
    pub fn from_tag(tag: &str) -> Self {
        tag.trim().parse().unwrap_or(Self::Unknown)
    }

    /// Zone scoring: the first axis counts zones instead of a length.
    pub fn is_zone(&self) -> bool {
        matches!(self, Self::Zone | Self::Dzone)
    }

    /// Axis units as (x, y, z, differential).
    pub fn axis_units(&self) -> [&'static str; 4] {
        match self {
            Self::Msh | Self::Voxscore | Self::Geomap | Self::Plane => {
                ["cm", "cm", "cm", NO_UNIT]
            }
            Self::Dmsh => ["cm", "cm", "cm", "#/MeV"],
            Self::Cyl => ["cm", "cm", "radians", NO_UNIT],
            Self::Dcyl => ["cm", "cm", "radians", "#/MeV"],
            Self::Zone => ["zone number", NO_UNIT, NO_UNIT, NO_UNIT],
            Self::Dzone | Self::Unknown => [NO_UNIT; 4],
        }
    }
}

/// Scored physical quantity. Discriminants are the codes the simulator writes
/// into IDET(5).
#[derive(Debug, Clone, Copy, EnumIter, Display, PartialEq, Eq, Hash, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DetectorType {
    Unknown = 0,
    Energy = 1,
    Fluence = 2,
    Crossflu = 3,
    Letflu = 4,
    Dose = 5,
    Dlet = 6,
    Tlet = 7,
    AvgEnergy = 8,
    AvgBeta = 9,
    Material = 10,
    Alanine = 13,
    Counter = 14,
    Pet = 15,
    Dletg = 16,
    Tletg = 17,
    Zone = 20,
    Medium = 21,
    Rho = 22,
}

impl DetectorType {
    pub fn from_code(code: i32) -> Option<Self> {
        Self::iter().find(|d| d.code() == code)
    }

    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// Averaged quantities are already per history; everything else is a sum
    /// over `nstat` histories.
    pub fn is_normalized(&self) -> bool {
        !matches!(
            self,
            Self::Dlet | Self::Tlet | Self::AvgEnergy | Self::AvgBeta | Self::Material
        )
    }

    /// Value unit and title. Dose-like quantities scored over zones are
    /// integrated over the zone volume, hence the geometry dependence.
    pub fn value_unit(&self, geometry: GeometryType) -> (&'static str, &'static str) {
        let zone = geometry == GeometryType::Zone;
        match self {
            Self::Unknown => (NO_UNIT, "None"),
            Self::Energy => ("MeV/primary", "Energy"),
            Self::Fluence => (" cm^-2/primary", "Fluence"),
            Self::Crossflu => (" cm^-2/primary", "Planar fluence"),
            Self::Letflu => (" MeV/cm", "LET fluence"),
            Self::Dose if zone => (" MeV/primary", "Dose*volume"),
            Self::Dose => (" MeV/g/primary", "Dose"),
            Self::Dlet | Self::Dletg => ("MeV/cm", "dose-averaged LET"),
            Self::Tlet | Self::Tletg => ("MeV/cm", "track-averaged LET"),
            Self::AvgEnergy => ("MeV", "Average energy"),
            Self::AvgBeta => ("(dimensionless)", "Average beta"),
            Self::Material => (NO_UNIT, "Material number"),
            Self::Alanine if zone => ("MeV/primary", "Alanine RE*Dose*volume"),
            Self::Alanine => ("MeV/g/primary", "Alanine RE*Dose"),
            Self::Counter => ("/primary", "Particle counter"),
            Self::Pet => ("/primary", "PET isotopes"),
            Self::Zone => ("(dimensionless)", "Zone#"),
            Self::Medium => ("(dimensionless)", "Medium#"),
            Self::Rho => ("g/cm^3", "Density"),
        }
    }
}

/// The six labels attached to every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Units {
    pub x: &'static str,
    pub y: &'static str,
    pub z: &'static str,
    pub differential: &'static str,
    pub value: &'static str,
    pub title: &'static str,
}

impl Units {
    pub fn lookup(geometry: GeometryType, detector: DetectorType) -> Self {
        let [x, y, z, differential] = geometry.axis_units();
        let (value, title) = detector.value_unit(geometry);
        Self {
            x,
            y,
            z,
            differential,
            value,
            title,
        }
    }

    /// Ordered as x, y, z, differential, value, title.
    pub fn as_array(&self) -> [&'static str; 6] {
        [
            self.x,
            self.y,
            self.z,
            self.differential,
            self.value,
            self.title,
        ]
    }
}
