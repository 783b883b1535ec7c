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

//! Count-min sketch for frequency estimation, with optional top-n tracking.
//!
//! # Overview
//!
//! The sketch is a fixed depth-by-width grid of counters sized from an error
//! bound `e` and confidence `p`: `width = ceil(E / e)` and
//! `depth = ceil(ln(1 / (1 - p)))`, where `E` is Euler's number. With those
//! dimensions an estimate exceeds the true frequency by more than
//! `e * ||a||` (the total stream weight) with probability at most `1 - p`,
//! per the Cormode–Muthukrishnan analysis. Estimates are one-sided: they
//! never fall below the true frequency.
//!
//! Updates are *conservative*: an add first takes the minimum over the
//! item's indexed counters, then raises only the counters below that minimum
//! plus one. Counters inflated by colliding items are left alone, which
//! limits error amplification compared to incrementing every row.
//!
//! A sketch built with [`CountMinSketch::with_top_n`] also keeps the at most
//! `n` distinct items with the highest estimated frequencies. Tracked items
//! never store a frequency; rankings are re-derived from the live counters,
//! so an offer costs O(n) estimates in the worst case.
//!
//! Merging two sketches of equal geometry (and equal top-n capacity) sums
//! their grids elementwise, which is exact: the result equals a single
//! sketch fed both streams from the start.
//!
//! # Usage
//!
//! ```rust
//! # use minsketch::countmin::CountMinSketch;
//! let mut sketch = CountMinSketch::<i64>::with_top_n(0.01, 0.99, 3).unwrap();
//! for value in [7, 7, 7, 11, 11, 42] {
//!     sketch.add(&value);
//! }
//! assert!(sketch.estimate(&7) >= 3);
//! assert_eq!(*sketch.top_n()[0].item(), 7);
//! ```

mod serialization;
mod sketch;
mod top_n;

pub use self::sketch::CountMinSketch;
pub use self::sketch::Row;
