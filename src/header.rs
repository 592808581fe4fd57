//! Fixed-size header of a BDO file.
//!
//! Two layouts share the same 14-byte prefix (a 4-byte record marker followed
//! by the 10-byte geometry tag). Files whose tag contains `VOXSCORE` use the
//! extended layout, which inserts the TRIP dose and particle total between
//! NSTAT and the DET block. The layout is chosen from the prefix, then the
//! whole header is re-read from offset 0.

use crate::catalog::{DetectorType, GeometryType, Units};
use crate::config::DecodeConfig;
use crate::error::{BdoError, BdoResult};
use crate::record::{AxisRange, DifferentialAxis, ParticleFilter};
use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;
use std::io::{Read, Seek, SeekFrom};
use tracing::{debug, warn};

/// Marker record + geometry tag.
pub const PREFIX_LEN: usize = 14;

const VOXSCORE_MARKER: &str = "VOXSCORE";
const TAG_LEN: usize = 10;
const DET_LEN: usize = 8;
const IDET_LEN: usize = 11;

/// Byte offsets of the standard layout.
mod offsets_standard {
    pub const TAG: usize = 4;
    pub const NSTAT: usize = 22;
    pub const DET: usize = 34;
    pub const IDET: usize = 106;
    pub const RECLEN: usize = 154;
}

/// Byte offsets of the voxel-score layout.
mod offsets_voxscore {
    pub const TAG: usize = 4;
    pub const NSTAT: usize = 22;
    pub const TRIP_DOSE: usize = 34;
    pub const TRIP_TOTAL: usize = 46;
    pub const DET: usize = 62;
    pub const IDET: usize = 134;
    pub const RECLEN: usize = 182;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderLayout {
    Standard,
    VoxelScore,
}

impl HeaderLayout {
    /// Picks the layout from the raw tag bytes of the prefix.
    pub fn detect(tag: &str) -> Self {
        if tag.contains(VOXSCORE_MARKER) {
            Self::VoxelScore
        } else {
            Self::Standard
        }
    }

    pub const fn header_size(self) -> usize {
        match self {
            Self::Standard => 158,
            Self::VoxelScore => 186,
        }
    }

    /// The payload follows the header directly.
    pub const fn payload_offset(self) -> u64 {
        self.header_size() as u64
    }

    /// Index of DET(1) used for the axis start positions. The voxel-score
    /// layout leaves the first DET slot unused for this purpose.
    pub const fn det_shift(self) -> usize {
        match self {
            Self::Standard => 0,
            Self::VoxelScore => 1,
        }
    }
}

/// The IDET block, 1-indexed in the simulator's documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DetectorAttributes {
    /// IDET(1): bins along x, r or zones
    pub dim_1_bins: i32,
    /// IDET(2): bins along y or theta
    pub dim_2_bins: i32,
    /// IDET(3): bins along z
    pub dim_3_bins: i32,
    /// IDET(4)
    pub particle_type: i32,
    /// IDET(5)
    pub detector_type: i32,
    /// IDET(6)
    pub particle_z: i32,
    /// IDET(7)
    pub particle_a: i32,
    /// IDET(8)
    pub detector_material: i32,
    /// IDET(9): differential bins, negative if logarithmic
    pub differential_bins: i32,
    /// IDET(10): LET, E/amu or polar angle
    pub differential_scoring_type: i32,
    /// IDET(11): first zone for zone scoring
    pub starting_zone: i32,
}

impl DetectorAttributes {
    fn from_idet(idet: [i32; IDET_LEN]) -> Self {
        Self {
            dim_1_bins: idet[0],
            dim_2_bins: idet[1],
            dim_3_bins: idet[2],
            particle_type: idet[3],
            detector_type: idet[4],
            particle_z: idet[5],
            particle_a: idet[6],
            detector_material: idet[7],
            differential_bins: idet[8],
            differential_scoring_type: idet[9],
            starting_zone: idet[10],
        }
    }

    pub fn bins(&self) -> [i32; 3] {
        [self.dim_1_bins, self.dim_2_bins, self.dim_3_bins]
    }
}

/// Fields present in both layouts.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderFields {
    pub tag: String,
    pub nstat: i32,
    pub det: [f64; DET_LEN],
    pub idet: DetectorAttributes,
    pub reclen: i32,
}

/// A header as laid out on disk.
#[derive(Debug, Clone, PartialEq)]
pub enum BinaryHeader {
    Standard(HeaderFields),
    VoxelScore {
        fields: HeaderFields,
        trip_dose: f32,
        trip_total: i64,
    },
}

impl BinaryHeader {
    /// `bytes` must hold at least `layout.header_size()` bytes.
    pub fn parse(layout: HeaderLayout, bytes: &[u8]) -> Self {
        match layout {
            HeaderLayout::Standard => {
                use offsets_standard::*;
                Self::Standard(parse_fields(bytes, TAG, NSTAT, DET, IDET, RECLEN))
            }
            HeaderLayout::VoxelScore => {
                use offsets_voxscore::*;
                Self::VoxelScore {
                    fields: parse_fields(bytes, TAG, NSTAT, DET, IDET, RECLEN),
                    trip_dose: LittleEndian::read_f32(&bytes[TRIP_DOSE..TRIP_DOSE + 4]),
                    trip_total: LittleEndian::read_i64(&bytes[TRIP_TOTAL..TRIP_TOTAL + 8]),
                }
            }
        }
    }

    pub fn layout(&self) -> HeaderLayout {
        match self {
            Self::Standard(_) => HeaderLayout::Standard,
            Self::VoxelScore { .. } => HeaderLayout::VoxelScore,
        }
    }

    pub fn fields(&self) -> &HeaderFields {
        match self {
            Self::Standard(fields) => fields,
            Self::VoxelScore { fields, .. } => fields,
        }
    }

    /// (trip dose, trip total); (0.0, -1) outside the voxel-score layout.
    pub fn trip(&self) -> (f64, i64) {
        match self {
            Self::Standard(_) => (0.0, -1),
            Self::VoxelScore {
                trip_dose,
                trip_total,
                ..
            } => (f64::from(*trip_dose), *trip_total),
        }
    }
}

fn parse_fields(
    bytes: &[u8],
    tag: usize,
    nstat: usize,
    det: usize,
    idet: usize,
    reclen: usize,
) -> HeaderFields {
    let mut det_values = [0.0; DET_LEN];
    LittleEndian::read_f64_into(&bytes[det..det + DET_LEN * 8], &mut det_values);

    let mut idet_values = [0; IDET_LEN];
    LittleEndian::read_i32_into(&bytes[idet..idet + IDET_LEN * 4], &mut idet_values);

    HeaderFields {
        tag: decode_tag(&bytes[tag..tag + TAG_LEN]),
        nstat: LittleEndian::read_i32(&bytes[nstat..nstat + 4]),
        det: det_values,
        idet: DetectorAttributes::from_idet(idet_values),
        reclen: LittleEndian::read_i32(&bytes[reclen..reclen + 4]),
    }
}

/// Fixed-width ASCII, padded with blanks or NULs.
fn decode_tag(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .trim_matches(|c: char| c == '\0' || c.is_whitespace())
        .to_string()
}

/// Everything the header pass resolves: the header part of a
/// [`DetectorRecord`](crate::record::DetectorRecord).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectorHeader {
    pub layout: HeaderLayout,
    pub geometry_tag: String,
    pub geometry_type: GeometryType,
    pub detector_type: DetectorType,
    pub raw_dimensions: [i32; 3],
    pub dimensions: [usize; 3],
    pub axis_range: AxisRange,
    pub particle_filter: ParticleFilter,
    pub detector_material: i32,
    pub differential: Option<DifferentialAxis>,
    pub det: [f64; DET_LEN],
    pub statistics_count: i32,
    pub units: Units,
    pub payload_offset: u64,
    pub record_stride: usize,
    pub trip_dose: f64,
    pub trip_total: i64,
}

impl DetectorHeader {
    /// Number of axes with more than one bin.
    pub fn dimensionality(&self) -> usize {
        self.dimensions.iter().filter(|&&n| n > 1).count()
    }

    /// True when the payload is defined as empty.
    pub fn has_unknown_type(&self) -> bool {
        self.geometry_type == GeometryType::Unknown || self.detector_type == DetectorType::Unknown
    }

    fn resolve(raw: &BinaryHeader, config: &DecodeConfig) -> BdoResult<Self> {
        let layout = raw.layout();
        let fields = raw.fields();
        let idet = &fields.idet;

        let record_stride = record_stride(fields.reclen, config.max_record_bytes)?;

        let geometry_type = GeometryType::from_tag(&fields.tag);
        if geometry_type == GeometryType::Unknown {
            warn!("Unrecognized geometry tag '{}', payload will be empty", fields.tag);
        }

        let detector_type = DetectorType::from_code(idet.detector_type).ok_or_else(|| {
            BdoError::Format(format!("Unknown detector type code {}", idet.detector_type))
        })?;

        let raw_dimensions = idet.bins();
        let dimensions = raw_dimensions.map(|n| n.max(1) as usize);

        let axis_range = if geometry_type.is_zone() {
            AxisRange::Zones {
                first: idet.starting_zone,
                last: idet
                    .starting_zone
                    .saturating_add(idet.dim_1_bins)
                    .saturating_sub(1),
            }
        } else {
            let s = layout.det_shift();
            AxisRange::Spatial {
                min: [fields.det[s], fields.det[s + 1], fields.det[s + 2]],
                max: [fields.det[s + 3], fields.det[s + 4], fields.det[s + 5]],
            }
        };

        let differential = (idet.differential_bins != 0).then(|| DifferentialAxis {
            bins: idet.differential_bins.unsigned_abs(),
            logarithmic: idet.differential_bins < 0,
            scoring_type: idet.differential_scoring_type,
        });

        let (trip_dose, trip_total) = raw.trip();

        Ok(Self {
            layout,
            geometry_tag: fields.tag.clone(),
            geometry_type,
            detector_type,
            raw_dimensions,
            dimensions,
            axis_range,
            particle_filter: ParticleFilter {
                particle_type: idet.particle_type,
                z: idet.particle_z,
                a: idet.particle_a,
            },
            detector_material: idet.detector_material,
            differential,
            det: fields.det,
            statistics_count: fields.nstat,
            units: Units::lookup(geometry_type, detector_type),
            payload_offset: layout.payload_offset(),
            record_stride,
            trip_dose,
            trip_total,
        })
    }
}

/// Payload values are always 8-byte floats.
fn record_stride(reclen: i32, max_record_bytes: u64) -> BdoResult<usize> {
    if reclen < 0 || reclen % 8 != 0 {
        return Err(BdoError::Format(format!(
            "Record length {} is not a non-negative multiple of 8",
            reclen
        )));
    }
    if reclen as u64 > max_record_bytes {
        return Err(BdoError::Format(format!(
            "Record length {} exceeds the limit of {} bytes",
            reclen, max_record_bytes
        )));
    }
    Ok(reclen as usize / 8)
}

/// Peeks the prefix and selects the layout.
pub fn detect_layout<R: Read + Seek>(reader: &mut R) -> BdoResult<HeaderLayout> {
    let mut prefix = [0u8; PREFIX_LEN];
    reader.seek(SeekFrom::Start(0))?;
    reader.read_exact(&mut prefix)?;
    let tag = String::from_utf8_lossy(&prefix[offsets_standard::TAG..]);
    Ok(HeaderLayout::detect(&tag))
}

/// Reads the complete fixed header of the detected layout from offset 0.
pub fn read_binary_header<R: Read + Seek>(reader: &mut R) -> BdoResult<BinaryHeader> {
    let layout = detect_layout(reader)?;
    let mut bytes = vec![0u8; layout.header_size()];
    reader.seek(SeekFrom::Start(0))?;
    reader.read_exact(&mut bytes)?;
    Ok(BinaryHeader::parse(layout, &bytes))
}

/// Header pass: decodes and resolves the header without touching the payload.
pub fn read_header<R: Read + Seek>(
    reader: &mut R,
    config: &DecodeConfig,
) -> BdoResult<DetectorHeader> {
    let raw = read_binary_header(reader)?;
    let header = DetectorHeader::resolve(&raw, config)?;
    debug!(
        "Header: layout={:?} geometry={} detector={} dims={:?} nstat={} stride={}",
        header.layout,
        header.geometry_type,
        header.detector_type,
        header.dimensions,
        header.statistics_count,
        header.record_stride
    );
    Ok(header)
}
