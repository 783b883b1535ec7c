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

//! Min-mask sketch: tracks an accumulated tag bitmask per item.
//!
//! The structure shares the count-min grid and bucket derivation but stores
//! bitmasks in its cells, ordered by population count rather than numeric
//! value. Adding `(item, mask)` ORs the mask into the item's accumulated
//! evidence; estimating returns the indexed cell with the fewest set bits,
//! which is always a superset of every mask added for the item.
//!
//! # Usage
//!
//! ```rust
//! # use minsketch::minmask::MinMaskSketch;
//! let mut sketch = MinMaskSketch::new(0.01, 0.99).unwrap();
//! sketch.add(&"item".to_string(), 0b01);
//! sketch.add(&"item".to_string(), 0b10);
//! let mask = sketch.estimate(&"item".to_string());
//! assert_eq!(mask & 0b11, 0b11);
//! ```

mod serialization;
mod sketch;

pub use self::sketch::MinMaskSketch;
