// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Item codec boundary and shared byte-layout helpers.
//!
//! The sketches treat items as opaque beyond two capabilities supplied here:
//! a canonical byte encoding under which logically equal values encode
//! identically, and an equality contract (`Eq`) consistent with it.

use std::str;

use crate::error::Error;

/// Value type accepted by the sketches.
///
/// Implementations must guarantee that `a == b` holds exactly when the
/// canonical encodings of `a` and `b` are byte-identical.
pub trait SketchItem: Eq + Clone {
    /// Stable one-byte discriminator recorded in serialized images.
    const TYPE_TAG: u8;

    /// Appends the canonical byte encoding of `self` to `out`.
    fn write_canonical(&self, out: &mut Vec<u8>);

    /// Reconstructs a value from its canonical byte encoding.
    fn from_canonical(bytes: &[u8]) -> Result<Self, Error>;
}

impl SketchItem for i64 {
    const TYPE_TAG: u8 = 1;

    fn write_canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    fn from_canonical(bytes: &[u8]) -> Result<Self, Error> {
        let array: [u8; 8] = bytes
            .try_into()
            .map_err(|_| Error::deserial("i64 item payload must be 8 bytes"))?;
        Ok(i64::from_le_bytes(array))
    }
}

impl SketchItem for u64 {
    const TYPE_TAG: u8 = 2;

    fn write_canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    fn from_canonical(bytes: &[u8]) -> Result<Self, Error> {
        let array: [u8; 8] = bytes
            .try_into()
            .map_err(|_| Error::deserial("u64 item payload must be 8 bytes"))?;
        Ok(u64::from_le_bytes(array))
    }
}

impl SketchItem for String {
    const TYPE_TAG: u8 = 3;

    fn write_canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.as_bytes());
    }

    fn from_canonical(bytes: &[u8]) -> Result<Self, Error> {
        match str::from_utf8(bytes) {
            Ok(s) => Ok(s.to_string()),
            Err(_) => Err(Error::deserial("invalid UTF-8 string payload")),
        }
    }
}

impl SketchItem for Vec<u8> {
    const TYPE_TAG: u8 = 4;

    fn write_canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self);
    }

    fn from_canonical(bytes: &[u8]) -> Result<Self, Error> {
        Ok(bytes.to_vec())
    }
}

/// Returns the canonical encoding of `item` as an owned buffer.
pub(crate) fn canonical_bytes<T: SketchItem>(item: &T) -> Vec<u8> {
    let mut out = Vec::new();
    item.write_canonical(&mut out);
    out
}

/// Appends `items` as a length-prefixed sequence (u32 LE length + payload).
pub(crate) fn serialize_items<T: SketchItem>(items: &[T], out: &mut Vec<u8>) {
    for item in items {
        let start = out.len();
        out.extend_from_slice(&0u32.to_le_bytes());
        item.write_canonical(out);
        let len = (out.len() - start - 4) as u32;
        out[start..start + 4].copy_from_slice(&len.to_le_bytes());
    }
}

/// Reads `num_items` length-prefixed items, returning them with the number
/// of bytes consumed.
pub(crate) fn deserialize_items<T: SketchItem>(
    bytes: &[u8],
    num_items: usize,
) -> Result<(Vec<T>, usize), Error> {
    let mut items = Vec::with_capacity(num_items);
    let mut offset = 0usize;
    for _ in 0..num_items {
        if offset + 4 > bytes.len() {
            return Err(Error::insufficient_data("item length"));
        }
        let len = read_u32_le(bytes, offset) as usize;
        offset += 4;
        if offset + len > bytes.len() {
            return Err(Error::insufficient_data("item payload"));
        }
        items.push(T::from_canonical(&bytes[offset..offset + len])?);
        offset += len;
    }
    Ok((items, offset))
}

/// Read an u32 value from bytes at the given offset (little-endian).
#[inline]
pub(crate) fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Read an u64 value from bytes at the given offset (little-endian).
#[inline]
pub(crate) fn read_u64_le(bytes: &[u8], offset: usize) -> u64 {
    u64::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
        bytes[offset + 4],
        bytes[offset + 5],
        bytes[offset + 6],
        bytes[offset + 7],
    ])
}

/// Write a u32 value to bytes at the given offset (little-endian).
#[inline]
pub(crate) fn write_u32_le(bytes: &mut [u8], offset: usize, value: u32) {
    bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

/// Write an u64 value to bytes at the given offset (little-endian).
#[inline]
pub(crate) fn write_u64_le(bytes: &mut [u8], offset: usize, value: u64) {
    bytes[offset..offset + 8].copy_from_slice(&value.to_le_bytes());
}
