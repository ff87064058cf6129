//! Minimal-width integer arrays.
//!
//! Tables are stored in the narrowest unsigned type able to hold their
//! largest value (sentinels included), which keeps the hot tables small.

use serde::{Deserialize, Serialize};

/// Largest value a packed array may hold.
pub const MAX_PACKED_VALUE: usize = 0x7fff_fffe;

/// Element width of a [`PackedVec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    U8,
    U16,
    U32,
}

impl Width {
    /// Narrowest width that can store `max_value`, or `None` past 32 bits.
    pub fn for_max(max_value: usize) -> Option<Self> {
        if max_value < 0x100 {
            Some(Width::U8)
        } else if max_value < 0x1_0000 {
            Some(Width::U16)
        } else if max_value <= MAX_PACKED_VALUE {
            Some(Width::U32)
        } else {
            None
        }
    }
}

/// An array of unsigned integers stored at a fixed width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackedVec {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl PackedVec {
    /// `len` copies of `value`, sized for values up to `max_value`.
    pub fn filled(len: usize, value: usize, max_value: usize) -> Option<Self> {
        debug_assert!(value <= max_value);
        Some(match Width::for_max(max_value)? {
            Width::U8 => PackedVec::U8(vec![value as u8; len]),
            Width::U16 => PackedVec::U16(vec![value as u16; len]),
            Width::U32 => PackedVec::U32(vec![value as u32; len]),
        })
    }

    /// Pack `values`, all of which must be at most `max_value`.
    pub fn from_values(values: &[usize], max_value: usize) -> Option<Self> {
        debug_assert!(values.iter().all(|&v| v <= max_value));
        Some(match Width::for_max(max_value)? {
            Width::U8 => PackedVec::U8(values.iter().map(|&v| v as u8).collect()),
            Width::U16 => PackedVec::U16(values.iter().map(|&v| v as u16).collect()),
            Width::U32 => PackedVec::U32(values.iter().map(|&v| v as u32).collect()),
        })
    }

    #[inline]
    pub fn get(&self, index: usize) -> usize {
        match self {
            PackedVec::U8(v) => v[index] as usize,
            PackedVec::U16(v) => v[index] as usize,
            PackedVec::U32(v) => v[index] as usize,
        }
    }

    pub fn set(&mut self, index: usize, value: usize) {
        match self {
            PackedVec::U8(v) => v[index] = value as u8,
            PackedVec::U16(v) => v[index] = value as u16,
            PackedVec::U32(v) => v[index] = value as u32,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PackedVec::U8(v) => v.len(),
            PackedVec::U16(v) => v.len(),
            PackedVec::U32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn width(&self) -> Width {
        match self {
            PackedVec::U8(_) => Width::U8,
            PackedVec::U16(_) => Width::U16,
            PackedVec::U32(_) => Width::U32,
        }
    }

    /// Bytes occupied by the elements.
    pub fn byte_len(&self) -> usize {
        match self {
            PackedVec::U8(v) => v.len(),
            PackedVec::U16(v) => v.len() * 2,
            PackedVec::U32(v) => v.len() * 4,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }
}
