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

//! Bounded ranked list of candidate high-frequency items.

use crate::codec::SketchItem;

/// Tracks at most `capacity` unique items alongside a frequency sketch.
///
/// Tracked items never carry a stored frequency; every ranking decision
/// re-derives frequencies from the live sketch through the estimator closure
/// passed to [`TopNTracker::offer`]. `min_threshold` is a stale-tolerant
/// admission gate: the lowest frequency any tracked item had when it last
/// changed the set, or `u64::MAX` while the tracker is below capacity.
#[derive(Debug, Clone)]
pub(super) struct TopNTracker<T> {
    capacity: u32,
    items: Vec<T>,
    min_threshold: u64,
}

impl<T: SketchItem> TopNTracker<T> {
    /// Creates an empty tracker. `capacity` must be positive; the caller
    /// validates.
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            items: Vec::new(),
            min_threshold: u64::MAX,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn min_threshold(&self) -> u64 {
        self.min_threshold
    }

    /// Rebuilds a tracker from its serialized parts.
    pub fn from_parts(capacity: u32, items: Vec<T>, min_threshold: u64) -> Self {
        Self {
            capacity,
            items,
            min_threshold,
        }
    }

    /// Offers a candidate with its current estimated frequency; returns true
    /// when the tracked set changed.
    ///
    /// `estimate` must re-derive the live frequency of a tracked item from
    /// the sketch the tracker is coupled to. Eviction requires the candidate
    /// frequency to strictly exceed the lowest live frequency in a full set;
    /// ties never evict.
    pub fn offer<F>(&mut self, candidate: &T, frequency: u64, estimate: F) -> bool
    where
        F: Fn(&T) -> u64,
    {
        let full = self.items.len() >= self.capacity as usize;
        if full && frequency <= self.min_threshold {
            return false;
        }
        if self.items.iter().any(|tracked| tracked == candidate) {
            return false;
        }
        if !full {
            self.items.push(candidate.clone());
            self.min_threshold = self.min_threshold.min(frequency);
            return true;
        }

        // Rankings shift as the sketch absorbs other items, so the victim is
        // chosen from live estimates; the lowest index wins ties.
        let mut live: Vec<u64> = self.items.iter().map(|tracked| estimate(tracked)).collect();
        let mut min_index = 0usize;
        for (index, &tracked_frequency) in live.iter().enumerate() {
            if tracked_frequency < live[min_index] {
                min_index = index;
            }
        }
        if frequency > live[min_index] {
            self.items[min_index] = candidate.clone();
            live[min_index] = frequency;
            self.min_threshold = live.iter().copied().min().unwrap_or(frequency);
            return true;
        }
        false
    }
}
