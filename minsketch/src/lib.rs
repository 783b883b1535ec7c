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

//! Fixed-shape probabilistic summary structures over opaque byte-encodable
//! items.
//!
//! Two sketch families share a single depth-by-width counter grid and a
//! pairwise-independent bucket derivation from one 128-bit hash:
//!
//! * [`countmin::CountMinSketch`] estimates item frequencies with one-sided
//!   error, optionally maintaining a bounded ranked list of the most frequent
//!   items seen so far.
//! * [`minmask::MinMaskSketch`] accumulates a tag bitmask per item instead of
//!   a count, ordering cells by population count rather than numeric value.
//!
//! Items enter the sketches through the [`codec::SketchItem`] boundary, which
//! supplies a canonical byte encoding and an equality contract consistent
//! with it. Beyond those two capabilities the sketches treat items as opaque.
//!
//! # Usage
//!
//! ```rust
//! # use minsketch::countmin::CountMinSketch;
//! let mut sketch = CountMinSketch::<String>::with_top_n(0.01, 0.99, 5).unwrap();
//! sketch.add(&"apple".to_string());
//! sketch.add(&"apple".to_string());
//! assert!(sketch.estimate(&"apple".to_string()) >= 2);
//! ```

pub mod codec;
pub mod countmin;
pub mod error;
pub mod minmask;

mod hash;
mod matrix;
