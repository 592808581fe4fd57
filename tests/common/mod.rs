#![allow(dead_code)]

use byteorder::{ByteOrder, LittleEndian};
use std::fs::File;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

pub const FLUENCE: i32 = 2;
pub const DOSE: i32 = 5;

/// Builder for synthetic BDO files, laid out byte-for-byte like the
/// simulator writes them.
#[derive(Clone, Debug)]
pub struct BdoBuilder {
    tag: String,
    nstat: i32,
    det: [f64; 8],
    idet: [i32; 11],
    reclen: Option<i32>,
    trip_dose: f32,
    trip_total: i64,
    payload: Vec<f64>,
}

impl BdoBuilder {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            nstat: 1,
            det: [0.0; 8],
            idet: [1, 1, 1, -1, FLUENCE, 0, 0, 0, 0, 0, 0],
            reclen: None,
            trip_dose: 0.0,
            trip_total: 0,
            payload: vec![1.0],
        }
    }

    pub fn nstat(mut self, nstat: i32) -> Self {
        self.nstat = nstat;
        self
    }

    pub fn det(mut self, det: [f64; 8]) -> Self {
        self.det = det;
        self
    }

    pub fn bins(mut self, nx: i32, ny: i32, nz: i32) -> Self {
        self.idet[0] = nx;
        self.idet[1] = ny;
        self.idet[2] = nz;
        self
    }

    pub fn particle(mut self, particle_type: i32, z: i32, a: i32) -> Self {
        self.idet[3] = particle_type;
        self.idet[5] = z;
        self.idet[6] = a;
        self
    }

    pub fn detector(mut self, code: i32) -> Self {
        self.idet[4] = code;
        self
    }

    pub fn material(mut self, material: i32) -> Self {
        self.idet[7] = material;
        self
    }

    pub fn differential(mut self, bins: i32, scoring_type: i32) -> Self {
        self.idet[8] = bins;
        self.idet[9] = scoring_type;
        self
    }

    pub fn starting_zone(mut self, zone: i32) -> Self {
        self.idet[10] = zone;
        self
    }

    /// Overrides the record length written into the header.
    pub fn reclen(mut self, reclen: i32) -> Self {
        self.reclen = Some(reclen);
        self
    }

    pub fn trip(mut self, dose: f32, total: i64) -> Self {
        self.trip_dose = dose;
        self.trip_total = total;
        self
    }

    pub fn payload(mut self, values: Vec<f64>) -> Self {
        self.payload = values;
        self
    }

    pub fn is_voxscore(&self) -> bool {
        self.tag.contains("VOXSCORE")
    }

    pub fn header_size(&self) -> usize {
        if self.is_voxscore() {
            186
        } else {
            158
        }
    }

    pub fn build(&self) -> Vec<u8> {
        let (nstat, det, idet, reclen) = if self.is_voxscore() {
            (22, 62, 134, 182)
        } else {
            (22, 34, 106, 154)
        };

        let mut bytes = vec![0u8; self.header_size()];
        LittleEndian::write_i32(&mut bytes[0..4], 10);

        let mut tag = [b' '; 10];
        for (dst, src) in tag.iter_mut().zip(self.tag.bytes()) {
            *dst = src;
        }
        bytes[4..14].copy_from_slice(&tag);

        LittleEndian::write_i32(&mut bytes[nstat..nstat + 4], self.nstat);
        if self.is_voxscore() {
            LittleEndian::write_f32(&mut bytes[34..38], self.trip_dose);
            LittleEndian::write_i64(&mut bytes[46..54], self.trip_total);
        }
        LittleEndian::write_f64_into(&self.det, &mut bytes[det..det + 64]);
        LittleEndian::write_i32_into(&self.idet, &mut bytes[idet..idet + 44]);

        let reclen_value = self
            .reclen
            .unwrap_or((self.payload.len() * 8) as i32);
        LittleEndian::write_i32(&mut bytes[reclen..reclen + 4], reclen_value);

        let mut payload = vec![0u8; self.payload.len() * 8];
        LittleEndian::write_f64_into(&self.payload, &mut payload);
        bytes.extend_from_slice(&payload);
        bytes
    }

    pub fn cursor(&self) -> Cursor<Vec<u8>> {
        Cursor::new(self.build())
    }

    pub fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(&self.build()).unwrap();
        path
    }
}

/// MSH / fluence / 1x1x300 / NSTAT 500, values 1..=300.
pub fn mesh_fluence_300() -> BdoBuilder {
    BdoBuilder::new("MSH")
        .bins(1, 1, 300)
        .nstat(500)
        .det([-5.0, -5.0, 0.0, 5.0, 5.0, 30.0, 0.0, 0.0])
        .detector(FLUENCE)
        .payload((1..=300).map(|i| i as f64).collect())
}
