//! Precision-tiered numeric storage for bin scores.
//!

use clap::ValueEnum;
use num_traits::{Bounded, NumCast, ToPrimitive};
use serde::{Deserialize, Serialize};

pub mod operations;

/// The numeric storage tier of a [`BinList`], trading memory for score
/// resolution.
///
/// [`BinList`]: crate::binlist::BinList
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum DataPrecision {
    /// 8-bit signed integers.
    #[value(name = "int8")]
    Int8,
    /// 16-bit signed integers.
    #[value(name = "int16")]
    Int16,
    /// 32-bit signed integers.
    #[value(name = "int32")]
    Int32,
    /// 32-bit floats.
    #[value(name = "float32")]
    Float32,
    /// 64-bit floats.
    #[value(name = "float64")]
    Float64,
}

impl DataPrecision {
    /// Size of one stored value, in bytes.
    pub fn byte_size(&self) -> usize {
        match self {
            DataPrecision::Int8 => 1,
            DataPrecision::Int16 => 2,
            DataPrecision::Int32 | DataPrecision::Float32 => 4,
            DataPrecision::Float64 => 8,
        }
    }
}

/// Bin values of one chromosome, stored at a [`DataPrecision`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BinStorage {
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

/// Convert to an integer tier: round half to even, then clamp.
/// Returns the stored value and whether it was clamped. NaN is stored as zero.
fn to_integer<T: Bounded + NumCast + ToPrimitive + Default>(value: f64) -> (T, bool) {
    if value.is_nan() {
        return (T::default(), true);
    }
    let min = T::min_value().to_f64().unwrap_or(f64::MIN);
    let max = T::max_value().to_f64().unwrap_or(f64::MAX);
    let rounded = value.round_ties_even();
    if rounded < min {
        (T::min_value(), true)
    } else if rounded > max {
        (T::max_value(), true)
    } else {
        // in range, so the cast cannot fail
        (<T as NumCast>::from(rounded).unwrap_or_default(), false)
    }
}

fn to_f32(value: f64) -> (f32, bool) {
    if value.is_finite() && value.abs() > f32::MAX as f64 {
        (value.signum() as f32 * f32::MAX, true)
    } else {
        (value as f32, false)
    }
}

impl BinStorage {
    /// Allocate `len` zeroed bins.
    pub fn zeros(precision: DataPrecision, len: usize) -> Self {
        match precision {
            DataPrecision::Int8 => BinStorage::Int8(vec![0; len]),
            DataPrecision::Int16 => BinStorage::Int16(vec![0; len]),
            DataPrecision::Int32 => BinStorage::Int32(vec![0; len]),
            DataPrecision::Float32 => BinStorage::Float32(vec![0.0; len]),
            DataPrecision::Float64 => BinStorage::Float64(vec![0.0; len]),
        }
    }

    pub fn precision(&self) -> DataPrecision {
        match self {
            BinStorage::Int8(_) => DataPrecision::Int8,
            BinStorage::Int16(_) => DataPrecision::Int16,
            BinStorage::Int32(_) => DataPrecision::Int32,
            BinStorage::Float32(_) => DataPrecision::Float32,
            BinStorage::Float64(_) => DataPrecision::Float64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            BinStorage::Int8(v) => v.len(),
            BinStorage::Int16(v) => v.len(),
            BinStorage::Int32(v) => v.len(),
            BinStorage::Float32(v) => v.len(),
            BinStorage::Float64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get bin `index` as an `f64`.
    pub fn get(&self, index: usize) -> Option<f64> {
        match self {
            BinStorage::Int8(v) => v.get(index).map(|&x| x as f64),
            BinStorage::Int16(v) => v.get(index).map(|&x| x as f64),
            BinStorage::Int32(v) => v.get(index).map(|&x| x as f64),
            BinStorage::Float32(v) => v.get(index).map(|&x| x as f64),
            BinStorage::Float64(v) => v.get(index).copied(),
        }
    }

    /// Set bin `index`, clamping to the representable range of the storage
    /// tier. Returns `true` if the value had to be clamped.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, value: f64) -> bool {
        match self {
            BinStorage::Int8(v) => {
                let (x, clamped) = to_integer::<i8>(value);
                v[index] = x;
                clamped
            }
            BinStorage::Int16(v) => {
                let (x, clamped) = to_integer::<i16>(value);
                v[index] = x;
                clamped
            }
            BinStorage::Int32(v) => {
                let (x, clamped) = to_integer::<i32>(value);
                v[index] = x;
                clamped
            }
            BinStorage::Float32(v) => {
                let (x, clamped) = to_f32(value);
                v[index] = x;
                clamped
            }
            BinStorage::Float64(v) => {
                v[index] = value;
                false
            }
        }
    }

    /// Iterate over all bins as `f64`.
    pub fn iter(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        match self {
            BinStorage::Int8(v) => Box::new(v.iter().map(|&x| x as f64)),
            BinStorage::Int16(v) => Box::new(v.iter().map(|&x| x as f64)),
            BinStorage::Int32(v) => Box::new(v.iter().map(|&x| x as f64)),
            BinStorage::Float32(v) => Box::new(v.iter().map(|&x| x as f64)),
            BinStorage::Float64(v) => Box::new(v.iter().copied()),
        }
    }
}
