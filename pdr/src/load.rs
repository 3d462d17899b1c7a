//! CSV readers for the recorded traces.
//!
//! The phone recordings do not always have a well formed table: some rows
//! carry a trailing separator, others more fields than the header. Only the
//! named columns are read, by their position in the header, and anything
//! past them is ignored.

use std::{fs::File, io::Read, path::Path, str::FromStr};

use acceleration::AccelerationSample;
use csv::{ReaderBuilder, StringRecord, Trim};
use steps::Accelerometer;
use trajectory::ImuSample;
use turns::Gyroscope;

use crate::{Error, Result};

const TIMESTAMP: &str = "timestamp";
const ACCEL: [&str; 3] = ["accel_x", "accel_y", "accel_z"];
const GYRO_Z: &str = "gyro_z";

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to open {}. Reason: {e}", path.display()),
        ))
    })
}

/// Header positions of `names`, in the same order.
fn columns<const N: usize>(headers: &StringRecord, names: [&str; N]) -> Result<[usize; N]> {
    let mut indices = [0; N];

    for (index, name) in indices.iter_mut().zip(names) {
        *index = headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| Error::MissingColumn(name.to_owned()))?;
    }

    Ok(indices)
}

fn field<T: FromStr>(record: &StringRecord, index: usize, column: &str) -> Result<T> {
    let value = record.get(index).unwrap_or_default();

    value.parse().map_err(|_| Error::Parse {
        line: record.position().map(|this| this.line()).unwrap_or_default(),
        column: column.to_owned(),
        value: value.to_owned(),
    })
}

/// Rows of the selected columns, parsed as `f64` except the timestamp.
fn rows<const N: usize>(input: impl Read, names: [&str; N]) -> Result<Vec<(i64, [f64; N])>> {
    let mut rdr = reader(input);
    let headers = rdr.headers()?.clone();

    let timestamp = columns(&headers, [TIMESTAMP])?[0];
    let indices = columns(&headers, names)?;

    rdr.records()
        .map(|record| -> Result<(i64, [f64; N])> {
            let record = record?;
            let mut values = [0.0; N];

            for ((value, index), name) in values.iter_mut().zip(indices).zip(names) {
                *value = field(&record, index, name)?;
            }

            Ok((field(&record, timestamp, TIMESTAMP)?, values))
        })
        .collect()
}

/// `timestamp, acceleration, noisyacceleration` with timestamps in seconds.
pub fn acceleration_from_reader(input: impl Read) -> Result<Vec<AccelerationSample>> {
    reader(input)
        .deserialize()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::from)
}

pub fn acceleration(path: impl AsRef<Path>) -> Result<Vec<AccelerationSample>> {
    acceleration_from_reader(open(path.as_ref())?)
}

/// `timestamp` (ns) with `accel_x`, `accel_y`, `accel_z`.
pub fn accelerometer_from_reader(input: impl Read) -> Result<Vec<Accelerometer>> {
    Ok(rows(input, ACCEL)?
        .into_iter()
        .map(|(timestamp, [x, y, z])| Accelerometer { timestamp, x, y, z })
        .collect())
}

pub fn accelerometer(path: impl AsRef<Path>) -> Result<Vec<Accelerometer>> {
    accelerometer_from_reader(open(path.as_ref())?)
}

/// `timestamp` (ns) with `gyro_z`.
pub fn gyroscope_from_reader(input: impl Read) -> Result<Vec<Gyroscope>> {
    Ok(rows(input, [GYRO_Z])?
        .into_iter()
        .map(|(timestamp, [z])| Gyroscope { timestamp, z })
        .collect())
}

pub fn gyroscope(path: impl AsRef<Path>) -> Result<Vec<Gyroscope>> {
    gyroscope_from_reader(open(path.as_ref())?)
}

/// `timestamp` (ns) with the three accelerometer axes and `gyro_z`.
pub fn imu_from_reader(input: impl Read) -> Result<Vec<ImuSample>> {
    let [accel_x, accel_y, accel_z] = ACCEL;

    Ok(rows(input, [accel_x, accel_y, accel_z, GYRO_Z])?
        .into_iter()
        .map(|(timestamp, [accel_x, accel_y, accel_z, gyro_z])| ImuSample {
            timestamp,
            accel_x,
            accel_y,
            accel_z,
            gyro_z,
        })
        .collect())
}

pub fn imu(path: impl AsRef<Path>) -> Result<Vec<ImuSample>> {
    imu_from_reader(open(path.as_ref())?)
}
