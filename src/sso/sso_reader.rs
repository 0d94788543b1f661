use std::io::Read;

use camino::Utf8Path;
use nom::{number::complete::le_f64, IResult};
use tracing::{debug, warn};

use crate::constants::{JulianDate, HEADER_SIZE};
use crate::solarpaper_errors::SolarpaperError;

use super::orbit_record::{KindField, OrbitRecord};

/// Streaming decoder over a decompressed `.sso` dataset.
///
/// The stream starts with an 8-byte little-endian `f64` holding the Julian date until
/// which the dataset is valid, followed by [`OrbitRecord`] encodings until the end of
/// input. The reader is an iterator of decoded records, each paired with the byte
/// offset it starts at:
///
/// * `None` once every byte has been consumed (clean end of stream),
/// * `Some(Err(..))` if a record cannot be decoded. Record boundaries cannot be
///   recovered after that point, so the iterator yields nothing afterwards.
#[derive(Debug, Clone)]
pub struct SsoReader<'a> {
    data: &'a [u8],
    rest: &'a [u8],
    valid_until: JulianDate,
    kind_field: KindField,
    failed: bool,
}

fn parse_header(input: &[u8]) -> IResult<&[u8], f64> {
    le_f64(input)
}

impl<'a> SsoReader<'a> {
    /// Read the dataset header and position the reader on the first record.
    ///
    /// Return
    /// ----------
    /// * The reader, or [`SolarpaperError::InvalidHeader`] if `data` is shorter than the header.
    pub fn new(data: &'a [u8], kind_field: KindField) -> Result<Self, SolarpaperError> {
        let (rest, valid_until) =
            parse_header(data).map_err(|_| SolarpaperError::InvalidHeader)?;
        Ok(SsoReader {
            data,
            rest,
            valid_until,
            kind_field,
            failed: false,
        })
    }

    pub fn valid_until(&self) -> JulianDate {
        self.valid_until
    }

    /// Fail with [`SolarpaperError::StaleDataset`] if `now` is past the valid-until date.
    pub fn check_valid_at(&self, now: JulianDate) -> Result<(), SolarpaperError> {
        if now > self.valid_until {
            return Err(SolarpaperError::StaleDataset {
                valid_until: self.valid_until,
                now,
            });
        }
        Ok(())
    }

    /// Byte offset of the next record in the whole stream.
    pub fn offset(&self) -> usize {
        self.data.len() - self.rest.len()
    }
}

impl Iterator for SsoReader<'_> {
    type Item = Result<(usize, OrbitRecord), SolarpaperError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.rest.is_empty() {
            return None;
        }

        let offset = self.offset();
        match OrbitRecord::parse(self.rest, offset, self.kind_field) {
            Ok((rest, record)) => {
                self.rest = rest;
                debug!(
                    spkid = %record.spkid,
                    kind = %record.kind(),
                    samples = record.len(),
                    offset,
                    "decoded orbit record"
                );
                if !record.is_time_sorted() {
                    warn!(spkid = %record.spkid, "sample times are not sorted");
                }
                Some(Ok((offset, record)))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

/// Builder for `.sso` streams.
#[derive(Debug, Clone)]
pub struct SsoWriter {
    buf: Vec<u8>,
    kind_field: KindField,
}

impl SsoWriter {
    pub fn new(valid_until: JulianDate, kind_field: KindField) -> Self {
        let mut buf = Vec::with_capacity(HEADER_SIZE);
        buf.extend_from_slice(&valid_until.to_le_bytes());
        SsoWriter { buf, kind_field }
    }

    pub fn push(&mut self, record: &OrbitRecord) -> &mut Self {
        record.encode(self.kind_field, &mut self.buf);
        self
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Read a whole decompressed dataset from any reader.
pub fn read_sso<R: Read>(mut reader: R) -> Result<Vec<u8>, SolarpaperError> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// Read a whole decompressed dataset from disk.
pub fn read_sso_file(path: &Utf8Path) -> Result<Vec<u8>, SolarpaperError> {
    Ok(std::fs::read(path)?)
}
