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

//! Min-mask sketch with popcount-ordered conservative updates.

use crate::codec;
use crate::codec::SketchItem;
use crate::codec::read_u32_le;
use crate::codec::read_u64_le;
use crate::codec::write_u32_le;
use crate::codec::write_u64_le;
use crate::error::Error;
use crate::matrix::BucketIndexer;
use crate::matrix::PopcountRank;
use crate::matrix::SketchMatrix;
use crate::minmask::serialization::*;

/// Bitmask analog of the count-min sketch.
///
/// Cells accumulate tag bitmasks instead of counts, and population count
/// replaces numeric value everywhere the frequency sketch takes a minimum or
/// a maximum: an estimate is the indexed cell with the fewest set bits (the
/// tightest superset of the item's true mask), and an add overwrites only
/// indexed cells with strictly fewer set bits than the new mask.
///
/// Items are hashed but never stored, so the sketch has no top-n component
/// and is not bound to a single item type.
#[derive(Debug, Clone)]
pub struct MinMaskSketch {
    matrix: SketchMatrix,
}

impl MinMaskSketch {
    /// Creates a sketch with the same sizing rule as the frequency variant.
    ///
    /// Fails with [`crate::error::ErrorKind::InvalidParameter`] unless both
    /// `error_bound` and `confidence` are strictly inside (0, 1).
    pub fn new(error_bound: f64, confidence: f64) -> Result<Self, Error> {
        Ok(Self {
            matrix: SketchMatrix::with_error_bounds(error_bound, confidence)?,
        })
    }

    /// Returns the number of mask rows.
    pub fn depth(&self) -> u32 {
        self.matrix.depth()
    }

    /// Returns the number of masks per row.
    pub fn width(&self) -> u32 {
        self.matrix.width()
    }

    /// Returns the in-memory footprint of the mask grid, in bytes.
    pub fn size_bytes(&self) -> usize {
        self.matrix.size_bytes()
    }

    /// ORs `mask` into the accumulated mask of `item` and returns the new
    /// accumulated mask.
    pub fn add<T: SketchItem>(&mut self, item: &T, mask: u64) -> u64 {
        let indexer = BucketIndexer::new(&codec::canonical_bytes(item));
        let current = self.matrix.min_cell::<PopcountRank>(&indexer);
        let new_mask = current | mask;
        self.matrix.raise_cells::<PopcountRank>(&indexer, new_mask);
        new_mask
    }

    /// Returns the estimated accumulated mask of `item`: a superset of every
    /// mask previously added for it.
    pub fn estimate<T: SketchItem>(&self, item: &T) -> u64 {
        let indexer = BucketIndexer::new(&codec::canonical_bytes(item));
        self.matrix.min_cell::<PopcountRank>(&indexer)
    }

    /// Merges `other` into this sketch by ORing the grids elementwise.
    ///
    /// After the merge every estimate is a superset of the estimates either
    /// input would have produced, mirroring how a single sketch fed both
    /// streams only ever ORs evidence into its cells. Fails with
    /// `DimensionMismatch` when the grids differ in depth or width.
    pub fn merge(&mut self, other: &Self) -> Result<(), Error> {
        if !self.matrix.same_shape(&other.matrix) {
            return Err(Error::dimension_mismatch(
                "cannot merge sketches with different dimensions",
            ));
        }
        self.matrix.merge_or(&other.matrix);
        Ok(())
    }

    /// Returns the number of set bits in `mask`.
    pub fn count_set_bits(mask: u64) -> u32 {
        mask.count_ones()
    }

    /// Serializes this sketch into a byte vector.
    pub fn serialize(&self) -> Vec<u8> {
        let header_bytes = PREAMBLE_LONGS as usize * 8;
        let mut out = vec![0u8; header_bytes + self.matrix.size_bytes()];
        out[PREAMBLE_LONGS_BYTE] = PREAMBLE_LONGS;
        out[SER_VER_BYTE] = SER_VER;
        out[FAMILY_BYTE] = FAMILY_ID;
        write_u32_le(&mut out, DEPTH_INT, self.matrix.depth());
        write_u32_le(&mut out, WIDTH_INT, self.matrix.width());
        let mut offset = header_bytes;
        for &cell in self.matrix.cells() {
            write_u64_le(&mut out, offset, cell);
            offset += 8;
        }
        out
    }

    /// Deserializes a sketch from bytes.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        let header_bytes = PREAMBLE_LONGS as usize * 8;
        if bytes.len() < header_bytes {
            return Err(Error::insufficient_data("preamble"));
        }
        let pre_longs = bytes[PREAMBLE_LONGS_BYTE];
        let ser_ver = bytes[SER_VER_BYTE];
        let family = bytes[FAMILY_BYTE];
        if ser_ver != SER_VER {
            return Err(Error::unsupported_serial_version(SER_VER, ser_ver));
        }
        if family != FAMILY_ID {
            return Err(Error::invalid_family(FAMILY_ID, family, "MinMaskSketch"));
        }
        if pre_longs != PREAMBLE_LONGS {
            return Err(Error::invalid_preamble_longs(PREAMBLE_LONGS, pre_longs));
        }
        let depth = read_u32_le(bytes, DEPTH_INT);
        let width = read_u32_le(bytes, WIDTH_INT);
        let num_cells = (depth as usize)
            .checked_mul(width as usize)
            .ok_or_else(|| Error::deserial("cell count overflow"))?;
        let cells_bytes = num_cells
            .checked_mul(8)
            .ok_or_else(|| Error::deserial("cell region overflow"))?;
        if bytes.len() < header_bytes + cells_bytes {
            return Err(Error::insufficient_data("masks"));
        }
        let mut cells = Vec::with_capacity(num_cells);
        for i in 0..num_cells {
            cells.push(read_u64_le(bytes, header_bytes + i * 8));
        }
        Ok(Self {
            matrix: SketchMatrix::from_parts(depth, width, cells)?,
        })
    }
}
