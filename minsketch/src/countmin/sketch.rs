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

//! Count-min sketch with optional bounded top-n tracking.

use crate::codec;
use crate::codec::SketchItem;
use crate::codec::read_u32_le;
use crate::codec::read_u64_le;
use crate::codec::write_u32_le;
use crate::codec::write_u64_le;
use crate::countmin::serialization::*;
use crate::countmin::top_n::TopNTracker;
use crate::error::Error;
use crate::matrix::BucketIndexer;
use crate::matrix::NumericRank;
use crate::matrix::SketchMatrix;

/// Result row for top-n queries: a tracked item with its live estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<T> {
    item: T,
    frequency: u64,
}

impl<T> Row<T> {
    /// Returns the item value.
    pub fn item(&self) -> &T {
        &self.item
    }

    /// Returns the estimated frequency at query time.
    pub fn frequency(&self) -> u64 {
        self.frequency
    }
}

/// Count-min frequency sketch over items of type `T`.
///
/// Counters only grow under [`CountMinSketch::add`], so estimates never fall
/// below an item's true frequency; overestimation is bounded in expectation
/// by `error_bound * total_weight` with the configured confidence.
///
/// With a top-n tracker attached the sketch additionally maintains the at
/// most `n` distinct items whose estimated frequencies are highest, re-ranked
/// live against the counters on every query.
#[derive(Debug, Clone)]
pub struct CountMinSketch<T> {
    matrix: SketchMatrix,
    tracker: Option<TopNTracker<T>>,
}

impl<T: SketchItem> CountMinSketch<T> {
    /// Creates a sketch without top-n tracking.
    ///
    /// Fails with [`crate::error::ErrorKind::InvalidParameter`] unless both
    /// `error_bound` and `confidence` are strictly inside (0, 1).
    pub fn new(error_bound: f64, confidence: f64) -> Result<Self, Error> {
        Ok(Self {
            matrix: SketchMatrix::with_error_bounds(error_bound, confidence)?,
            tracker: None,
        })
    }

    /// Creates a sketch that tracks the `top_n` most frequent items.
    ///
    /// `top_n` must be positive; a capacity of zero is the plain variant and
    /// is constructed with [`CountMinSketch::new`].
    pub fn with_top_n(error_bound: f64, confidence: f64, top_n: u32) -> Result<Self, Error> {
        if top_n == 0 {
            return Err(Error::invalid_parameter(
                "number of top items has to be positive",
            ));
        }
        Ok(Self {
            matrix: SketchMatrix::with_error_bounds(error_bound, confidence)?,
            tracker: Some(TopNTracker::new(top_n)),
        })
    }

    /// Returns the number of counter rows.
    pub fn depth(&self) -> u32 {
        self.matrix.depth()
    }

    /// Returns the number of counters per row.
    pub fn width(&self) -> u32 {
        self.matrix.width()
    }

    /// Returns the top-n capacity, or zero when tracking is disabled.
    pub fn top_n_capacity(&self) -> u32 {
        self.tracker.as_ref().map_or(0, TopNTracker::capacity)
    }

    /// Returns the in-memory footprint of the counter grid and tracked
    /// items, in bytes.
    pub fn size_bytes(&self) -> usize {
        let items = self.tracker.as_ref().map_or(0, |tracker| {
            tracker
                .items()
                .iter()
                .map(|item| codec::canonical_bytes(item).len())
                .sum()
        });
        self.matrix.size_bytes() + items
    }

    /// Adds one occurrence of `item` and returns its new estimated
    /// frequency.
    ///
    /// The update is conservative: only counters below the new estimate are
    /// raised, so counters inflated by colliding items are left untouched.
    pub fn add(&mut self, item: &T) -> u64 {
        let indexer = BucketIndexer::new(&codec::canonical_bytes(item));
        let current = self.matrix.min_cell::<NumericRank>(&indexer);
        let new_frequency = current.saturating_add(1);
        self.matrix
            .raise_cells::<NumericRank>(&indexer, new_frequency);

        let matrix = &self.matrix;
        if let Some(tracker) = self.tracker.as_mut() {
            tracker.offer(item, new_frequency, |tracked| {
                estimate_against(matrix, tracked)
            });
        }
        new_frequency
    }

    /// Returns the estimated frequency of `item` without mutating the
    /// sketch. Never below the true frequency.
    pub fn estimate(&self, item: &T) -> u64 {
        estimate_against(&self.matrix, item)
    }

    /// Merges `other` into this sketch.
    ///
    /// The result is exact: the combined counters equal those of a single
    /// sketch fed both input streams. Fails with `DimensionMismatch` when
    /// the grids differ in depth or width, and `CapacityMismatch` when the
    /// top-n capacities differ (tracker presence included).
    pub fn merge(&mut self, other: &Self) -> Result<(), Error> {
        if !self.matrix.same_shape(&other.matrix) {
            return Err(Error::dimension_mismatch(
                "cannot merge sketches with different dimensions",
            ));
        }
        if self.top_n_capacity() != other.top_n_capacity() {
            return Err(Error::capacity_mismatch(
                "cannot merge sketches with different top-n capacities",
            ));
        }
        self.matrix.merge_sum(&other.matrix);

        // Own tracked items stay consistent against the combined counters;
        // only the other side's candidates are re-offered, in their original
        // order, with frequencies re-estimated against the new grid.
        let matrix = &self.matrix;
        if let (Some(tracker), Some(other_tracker)) =
            (self.tracker.as_mut(), other.tracker.as_ref())
        {
            for item in other_tracker.items() {
                let frequency = estimate_against(matrix, item);
                tracker.offer(item, frequency, |tracked| {
                    estimate_against(matrix, tracked)
                });
            }
        }
        Ok(())
    }

    /// Returns the tracked items with live estimates, ordered by descending
    /// frequency. Empty when tracking is disabled.
    ///
    /// The sort is stable; items with equal frequencies keep their tracker
    /// insertion order.
    pub fn top_n(&self) -> Vec<Row<T>> {
        let Some(tracker) = self.tracker.as_ref() else {
            return Vec::new();
        };
        let mut rows: Vec<Row<T>> = tracker
            .items()
            .iter()
            .map(|item| Row {
                item: item.clone(),
                frequency: estimate_against(&self.matrix, item),
            })
            .collect();
        rows.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        rows
    }

    /// Serializes this sketch into a byte vector.
    pub fn serialize(&self) -> Vec<u8> {
        let preamble_longs = match self.tracker {
            Some(_) => PREAMBLE_LONGS_TOP_N,
            None => PREAMBLE_LONGS_PLAIN,
        };
        let header_bytes = preamble_longs as usize * 8;
        let mut out = vec![0u8; header_bytes + self.matrix.size_bytes()];
        out[PREAMBLE_LONGS_BYTE] = preamble_longs;
        out[SER_VER_BYTE] = SER_VER;
        out[FAMILY_BYTE] = FAMILY_ID;
        out[ITEM_TYPE_BYTE] = T::TYPE_TAG;
        write_u32_le(&mut out, DEPTH_INT, self.matrix.depth());
        write_u32_le(&mut out, WIDTH_INT, self.matrix.width());
        if let Some(tracker) = self.tracker.as_ref() {
            out[FLAGS_BYTE] = TRACKER_FLAG_MASK;
            write_u32_le(&mut out, CAPACITY_INT, tracker.capacity());
            write_u32_le(&mut out, TRACKED_ITEMS_INT, tracker.items().len() as u32);
            write_u64_le(&mut out, MIN_THRESHOLD_LONG, tracker.min_threshold());
        }
        let mut offset = header_bytes;
        for &cell in self.matrix.cells() {
            write_u64_le(&mut out, offset, cell);
            offset += 8;
        }
        if let Some(tracker) = self.tracker.as_ref() {
            codec::serialize_items(tracker.items(), &mut out);
        }
        out
    }

    /// Deserializes a sketch from bytes.
    ///
    /// Fails with `TypeMismatch` when the image was produced for a different
    /// item type than `T`.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() < PREAMBLE_LONGS_PLAIN as usize * 8 {
            return Err(Error::insufficient_data("preamble"));
        }
        let pre_longs = bytes[PREAMBLE_LONGS_BYTE];
        let ser_ver = bytes[SER_VER_BYTE];
        let family = bytes[FAMILY_BYTE];
        let flags = bytes[FLAGS_BYTE];
        let item_type = bytes[ITEM_TYPE_BYTE];
        if ser_ver != SER_VER {
            return Err(Error::unsupported_serial_version(SER_VER, ser_ver));
        }
        if family != FAMILY_ID {
            return Err(Error::invalid_family(FAMILY_ID, family, "CountMinSketch"));
        }
        if item_type != T::TYPE_TAG {
            return Err(Error::type_mismatch(format!(
                "serialized item type {} does not match requested type {}",
                item_type,
                T::TYPE_TAG
            )));
        }
        let has_tracker = flags & TRACKER_FLAG_MASK != 0;
        let expected_pre_longs = if has_tracker {
            PREAMBLE_LONGS_TOP_N
        } else {
            PREAMBLE_LONGS_PLAIN
        };
        if pre_longs != expected_pre_longs {
            return Err(Error::invalid_preamble_longs(expected_pre_longs, pre_longs));
        }
        let header_bytes = pre_longs as usize * 8;
        if bytes.len() < header_bytes {
            return Err(Error::insufficient_data("full preamble"));
        }
        let depth = read_u32_le(bytes, DEPTH_INT);
        let width = read_u32_le(bytes, WIDTH_INT);
        let num_cells = (depth as usize)
            .checked_mul(width as usize)
            .ok_or_else(|| Error::deserial("cell count overflow"))?;
        let cells_bytes = num_cells
            .checked_mul(8)
            .ok_or_else(|| Error::deserial("cell region overflow"))?;
        let items_offset = header_bytes + cells_bytes;
        if bytes.len() < items_offset {
            return Err(Error::insufficient_data("counters"));
        }
        let mut cells = Vec::with_capacity(num_cells);
        for i in 0..num_cells {
            cells.push(read_u64_le(bytes, header_bytes + i * 8));
        }
        let matrix = SketchMatrix::from_parts(depth, width, cells)?;

        let tracker = if has_tracker {
            let capacity = read_u32_le(bytes, CAPACITY_INT);
            let tracked = read_u32_le(bytes, TRACKED_ITEMS_INT) as usize;
            let min_threshold = read_u64_le(bytes, MIN_THRESHOLD_LONG);
            if capacity == 0 {
                return Err(Error::deserial("tracker capacity must be positive"));
            }
            if tracked > capacity as usize {
                return Err(Error::deserial("tracked item count exceeds capacity"));
            }
            let (items, _) = codec::deserialize_items::<T>(&bytes[items_offset..], tracked)?;
            Some(TopNTracker::from_parts(capacity, items, min_threshold))
        } else {
            None
        };
        Ok(Self { matrix, tracker })
    }
}

fn estimate_against<T: SketchItem>(matrix: &SketchMatrix, item: &T) -> u64 {
    let indexer = BucketIndexer::new(&codec::canonical_bytes(item));
    matrix.min_cell::<NumericRank>(&indexer)
}
