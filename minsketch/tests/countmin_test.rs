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

use std::collections::HashMap;

use minsketch::countmin::CountMinSketch;
use minsketch::error::ErrorKind;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_dimensions_from_bounds() {
    // width = ceil(e / 0.01) = 272, depth = ceil(ln(100)) = 5
    let sketch = CountMinSketch::<i64>::new(0.01, 0.99).unwrap();
    assert_eq!(sketch.depth(), 5);
    assert_eq!(sketch.width(), 272);
    assert_eq!(sketch.top_n_capacity(), 0);
    assert_eq!(sketch.size_bytes(), 5 * 272 * 8);
}

#[test]
fn test_invalid_error_bound() {
    for error_bound in [0.0, 1.0, -0.5, 2.0] {
        let result = CountMinSketch::<i64>::new(error_bound, 0.99);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidParameter);
    }
}

#[test]
fn test_invalid_confidence() {
    for confidence in [0.0, 1.0, -0.5, 2.0] {
        let result = CountMinSketch::<i64>::new(0.01, confidence);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidParameter);
    }
}

#[test]
fn test_invalid_top_n_capacity() {
    let result = CountMinSketch::<i64>::with_top_n(0.01, 0.99, 0);
    assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidParameter);
}

#[test]
fn test_empty_estimate() {
    let sketch = CountMinSketch::<String>::new(0.01, 0.99).unwrap();
    assert_eq!(sketch.estimate(&"missing".to_string()), 0);
}

#[test]
fn test_single_key_exact() {
    let mut sketch = CountMinSketch::<String>::new(0.01, 0.99).unwrap();
    for _ in 0..300 {
        sketch.add(&"key".to_string());
    }
    assert_eq!(sketch.estimate(&"key".to_string()), 300);
}

#[test]
fn test_add_returns_new_estimate() {
    let mut sketch = CountMinSketch::<i64>::new(0.01, 0.99).unwrap();
    assert_eq!(sketch.add(&7), 1);
    assert_eq!(sketch.add(&7), 2);
    assert_eq!(sketch.add(&7), 3);
    assert_eq!(sketch.add(&11), 1);
}

#[test]
fn test_never_underestimates() {
    let mut sketch = CountMinSketch::<u64>::new(0.05, 0.9).unwrap();
    let mut truth: HashMap<u64, u64> = HashMap::new();
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..10_000 {
        let key = rng.random_range(0..200u64);
        sketch.add(&key);
        *truth.entry(key).or_insert(0) += 1;
    }
    for (key, &count) in &truth {
        assert!(sketch.estimate(key) >= count);
    }
}

#[test]
fn test_heavy_keys_stay_exact_in_wide_sketch() {
    let mut sketch = CountMinSketch::<u64>::new(0.001, 0.99).unwrap();
    for i in 0..100u64 {
        for _ in 0..=i {
            sketch.add(&i);
        }
    }
    for i in 0..100u64 {
        assert!(sketch.estimate(&i) >= i + 1);
    }
}

#[test]
fn test_merge_sums_counters() {
    let mut left = CountMinSketch::<String>::new(0.01, 0.99).unwrap();
    let mut right = CountMinSketch::<String>::new(0.01, 0.99).unwrap();
    for _ in 0..3 {
        left.add(&"a".to_string());
    }
    for _ in 0..2 {
        right.add(&"a".to_string());
    }
    for _ in 0..4 {
        right.add(&"b".to_string());
    }
    left.merge(&right).unwrap();
    assert_eq!(left.estimate(&"a".to_string()), 5);
    assert_eq!(left.estimate(&"b".to_string()), 4);
}

#[test]
fn test_merge_dimension_mismatch() {
    let mut left = CountMinSketch::<i64>::new(0.01, 0.99).unwrap();
    let right = CountMinSketch::<i64>::new(0.1, 0.99).unwrap();
    let err = left.merge(&right).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
}

#[test]
fn test_merge_capacity_mismatch() {
    let mut left = CountMinSketch::<i64>::with_top_n(0.01, 0.99, 2).unwrap();
    let right = CountMinSketch::<i64>::with_top_n(0.01, 0.99, 3).unwrap();
    let err = left.merge(&right).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CapacityMismatch);

    let plain = CountMinSketch::<i64>::new(0.01, 0.99).unwrap();
    let err = left.merge(&plain).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CapacityMismatch);
}

#[test]
fn test_top_n_empty_without_tracker() {
    let mut sketch = CountMinSketch::<i64>::new(0.01, 0.99).unwrap();
    sketch.add(&7);
    assert!(sketch.top_n().is_empty());
}

#[test]
fn test_top_n_eviction() {
    let mut sketch = CountMinSketch::<String>::with_top_n(0.01, 0.99, 2).unwrap();
    for _ in 0..5 {
        sketch.add(&"a".to_string());
    }
    for _ in 0..3 {
        sketch.add(&"b".to_string());
    }
    // c passes b at its fourth occurrence and evicts it
    for _ in 0..4 {
        sketch.add(&"c".to_string());
    }
    let rows = sketch.top_n();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].item(), &"a".to_string());
    assert_eq!(rows[0].frequency(), 5);
    assert_eq!(rows[1].item(), &"c".to_string());
    assert_eq!(rows[1].frequency(), 4);
}

#[test]
fn test_top_n_tie_never_evicts() {
    let mut sketch = CountMinSketch::<String>::with_top_n(0.01, 0.99, 1).unwrap();
    for _ in 0..5 {
        sketch.add(&"a".to_string());
    }
    for _ in 0..5 {
        sketch.add(&"b".to_string());
    }
    let rows = sketch.top_n();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].item(), &"a".to_string());
    assert_eq!(rows[0].frequency(), 5);
}

#[test]
fn test_top_n_capacity_accessor() {
    let sketch = CountMinSketch::<i64>::with_top_n(0.01, 0.99, 8).unwrap();
    assert_eq!(sketch.top_n_capacity(), 8);
}

#[test]
fn test_merge_reoffers_tracked_items() {
    let mut left = CountMinSketch::<String>::with_top_n(0.01, 0.99, 2).unwrap();
    let mut right = CountMinSketch::<String>::with_top_n(0.01, 0.99, 2).unwrap();
    for _ in 0..5 {
        left.add(&"a".to_string());
    }
    for _ in 0..3 {
        right.add(&"b".to_string());
    }
    right.add(&"c".to_string());
    left.merge(&right).unwrap();

    let rows = left.top_n();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].item(), &"a".to_string());
    assert_eq!(rows[0].frequency(), 5);
    assert_eq!(rows[1].item(), &"b".to_string());
    assert_eq!(rows[1].frequency(), 3);
}

#[test]
fn test_top_n_ranks_against_live_counters() {
    let mut sketch = CountMinSketch::<String>::with_top_n(0.01, 0.99, 3).unwrap();
    sketch.add(&"early".to_string());
    for _ in 0..10 {
        sketch.add(&"late".to_string());
    }
    let rows = sketch.top_n();
    assert_eq!(rows[0].item(), &"late".to_string());
    assert_eq!(rows[0].frequency(), 10);
    assert_eq!(rows[1].item(), &"early".to_string());
    assert_eq!(rows[1].frequency(), 1);
}
