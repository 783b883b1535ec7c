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

//! Shared counter grid and bucket derivation for both sketch families.
//!
//! The frequency and mask sketches differ only in how cells are ordered:
//! numeric value for counters, population count for bitmasks. [`CellRank`]
//! is that seam; everything else about indexing, conservative updates, and
//! elementwise merging is common.

use crate::error::Error;
use crate::hash::DEFAULT_SKETCH_SEED;
use crate::hash::murmur_hash3_x64_128;

/// Ordering predicate over cell contents.
pub(crate) trait CellRank {
    /// Maps a cell to the value it is ordered by.
    fn rank(cell: u64) -> u64;
}

/// Orders cells by numeric value (frequency counters).
pub(crate) struct NumericRank;

impl CellRank for NumericRank {
    #[inline]
    fn rank(cell: u64) -> u64 {
        cell
    }
}

/// Orders cells by population count (tag bitmasks).
pub(crate) struct PopcountRank;

impl CellRank for PopcountRank {
    #[inline]
    fn rank(cell: u64) -> u64 {
        cell.count_ones() as u64
    }
}

/// Derives one bucket index per row from the two 64-bit lanes of a single
/// 128-bit item hash.
///
/// Row `i` hashes to `(h0 + i * h1) mod width`, the standard two-lane
/// combination that preserves pairwise independence without computing one
/// hash per row.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BucketIndexer {
    h0: u64,
    h1: u64,
}

impl BucketIndexer {
    /// Hashes `item_bytes` with the fixed sketch seed.
    pub fn new(item_bytes: &[u8]) -> Self {
        let (h0, h1) = murmur_hash3_x64_128(item_bytes, DEFAULT_SKETCH_SEED);
        Self { h0, h1 }
    }

    /// Returns the bucket index for `row` in a grid of the given width.
    #[inline]
    pub fn bucket(&self, row: u32, width: u32) -> usize {
        let combined = self.h0.wrapping_add((row as u64).wrapping_mul(self.h1));
        (combined % width as u64) as usize
    }
}

/// Fixed depth-by-width grid of 64-bit cells, row-major.
///
/// Depth and width never change after creation; two matrices are compatible
/// for merging exactly when both dimensions are equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SketchMatrix {
    depth: u32,
    width: u32,
    cells: Vec<u64>,
}

impl SketchMatrix {
    /// Sizes and zero-fills a grid from the requested error bound and
    /// confidence: `width = ceil(e / error_bound)`,
    /// `depth = ceil(ln(1 / (1 - confidence)))`.
    pub fn with_error_bounds(error_bound: f64, confidence: f64) -> Result<Self, Error> {
        if !(error_bound > 0.0 && error_bound < 1.0) {
            return Err(Error::invalid_parameter(
                "error bound has to be between 0 and 1",
            ));
        }
        if !(confidence > 0.0 && confidence < 1.0) {
            return Err(Error::invalid_parameter(
                "confidence has to be between 0 and 1",
            ));
        }
        let width = (std::f64::consts::E / error_bound).ceil() as u32;
        let depth = (1.0 / (1.0 - confidence)).ln().ceil() as u32;
        let depth = depth.max(1);
        Ok(Self {
            depth,
            width,
            cells: vec![0; depth as usize * width as usize],
        })
    }

    /// Rebuilds a grid from its serialized parts.
    pub fn from_parts(depth: u32, width: u32, cells: Vec<u64>) -> Result<Self, Error> {
        if depth == 0 || width == 0 || cells.len() != depth as usize * width as usize {
            return Err(Error::deserial("cell count does not match depth * width"));
        }
        Ok(Self {
            depth,
            width,
            cells,
        })
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn cells(&self) -> &[u64] {
        &self.cells
    }

    /// Returns true when `other` has identical depth and width.
    pub fn same_shape(&self, other: &Self) -> bool {
        self.depth == other.depth && self.width == other.width
    }

    #[inline]
    fn cell_index(&self, row: u32, indexer: &BucketIndexer) -> usize {
        row as usize * self.width as usize + indexer.bucket(row, self.width)
    }

    /// Returns the rank-minimal cell among the indexed cell of every row.
    ///
    /// The first row with the strictly lowest rank wins ties, matching the
    /// read side of the conservative update.
    pub fn min_cell<R: CellRank>(&self, indexer: &BucketIndexer) -> u64 {
        let mut min = self.cells[self.cell_index(0, indexer)];
        for row in 1..self.depth {
            let cell = self.cells[self.cell_index(row, indexer)];
            if R::rank(cell) < R::rank(min) {
                min = cell;
            }
        }
        min
    }

    /// Conservative update: overwrites each indexed cell only when its rank
    /// is strictly below the rank of `new_value`.
    ///
    /// Cells already at or above the new rank were raised by colliding items
    /// and are left untouched, keeping the error one-sided.
    pub fn raise_cells<R: CellRank>(&mut self, indexer: &BucketIndexer, new_value: u64) {
        for row in 0..self.depth {
            let index = self.cell_index(row, indexer);
            if R::rank(new_value) > R::rank(self.cells[index]) {
                self.cells[index] = new_value;
            }
        }
    }

    /// Adds `other`'s cells into this grid elementwise. Shapes must already
    /// be verified equal.
    pub fn merge_sum(&mut self, other: &Self) {
        debug_assert!(self.same_shape(other));
        for (cell, &incoming) in self.cells.iter_mut().zip(other.cells.iter()) {
            *cell = cell.saturating_add(incoming);
        }
    }

    /// ORs `other`'s cells into this grid elementwise. Shapes must already
    /// be verified equal.
    pub fn merge_or(&mut self, other: &Self) {
        debug_assert!(self.same_shape(other));
        for (cell, &incoming) in self.cells.iter_mut().zip(other.cells.iter()) {
            *cell |= incoming;
        }
    }

    /// Size of the cell grid in bytes.
    pub fn size_bytes(&self) -> usize {
        self.cells.len() * size_of::<u64>()
    }
}
