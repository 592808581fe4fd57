use crate::catalog::GeometryType;
use crate::config::DecodeConfig;
use crate::error::{BdoError, BdoResult};
use crate::header::DetectorHeader;
use crate::record::DetectorRecord;
use byteorder::{LittleEndian, ReadBytesExt};
use ndarray::{ArrayD, IxDyn};
use std::io::{self, Read, Seek, SeekFrom};
use tracing::debug;

/// Payload pass. Consumes the header so the finished record cannot be fed
/// through another read.
pub fn read_payload<R: Read + Seek>(
    reader: &mut R,
    header: DetectorHeader,
    config: &DecodeConfig,
) -> BdoResult<DetectorRecord> {
    if header.has_unknown_type() {
        debug!(
            "Skipping payload for geometry={} detector={}",
            header.geometry_type, header.detector_type
        );
        return Ok(DetectorRecord::new(header, ArrayD::zeros(IxDyn(&[0]))));
    }

    let normalize = !config.skip_normalization && header.detector_type.is_normalized();
    if normalize && header.statistics_count <= 0 {
        return Err(BdoError::Format(format!(
            "NSTAT is {} but {} requires normalization",
            header.statistics_count, header.detector_type
        )));
    }

    let stream_len = reader.seek(SeekFrom::End(0))?;
    let needed = header.payload_offset + (header.record_stride as u64) * 8;
    if stream_len < needed {
        return Err(BdoError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!(
                "Payload needs {} bytes but the stream holds {}",
                needed, stream_len
            ),
        )));
    }

    reader.seek(SeekFrom::Start(header.payload_offset))?;
    let mut data = vec![0.0f64; header.record_stride];
    reader.read_f64_into::<LittleEndian>(&mut data)?;
    debug!(
        "Read {} values at offset {}",
        data.len(),
        header.payload_offset
    );

    if normalize {
        let nstat = f64::from(header.statistics_count);
        data.iter_mut().for_each(|v| *v /= nstat);
    }

    let shape = payload_shape(&header);
    let values = ArrayD::from_shape_vec(IxDyn(&shape), data)
        .map_err(|e| BdoError::Format(format!("Cannot shape payload as {:?}: {}", shape, e)))?;

    Ok(DetectorRecord::new(header, values))
}

/// Flat record, with a leading unit axis for scalar detectors and another for
/// planes.
fn payload_shape(header: &DetectorHeader) -> Vec<usize> {
    let mut shape = vec![header.record_stride];
    if header.dimensionality() == 0 {
        shape.insert(0, 1);
    }
    if header.geometry_type == GeometryType::Plane {
        shape.insert(0, 1);
    }
    shape
}
