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

use minsketch::countmin::CountMinSketch;
use minsketch::error::ErrorKind;

#[test]
fn test_empty_round_trip() {
    let sketch = CountMinSketch::<i64>::new(0.01, 0.99).unwrap();
    let bytes = sketch.serialize();
    let restored = CountMinSketch::<i64>::deserialize(&bytes).unwrap();
    assert_eq!(restored.depth(), sketch.depth());
    assert_eq!(restored.width(), sketch.width());
    assert_eq!(restored.top_n_capacity(), 0);
    assert_eq!(restored.estimate(&42), 0);
}

#[test]
fn test_plain_round_trip() {
    let mut sketch = CountMinSketch::<i64>::new(0.01, 0.99).unwrap();
    for i in 0..100i64 {
        sketch.add(&(i % 10));
    }
    let bytes = sketch.serialize();
    let restored = CountMinSketch::<i64>::deserialize(&bytes).unwrap();
    for i in 0..10i64 {
        assert_eq!(restored.estimate(&i), sketch.estimate(&i));
    }
}

#[test]
fn test_top_n_round_trip() {
    let mut sketch = CountMinSketch::<String>::with_top_n(0.01, 0.99, 3).unwrap();
    for (word, count) in [("alpha", 7usize), ("beta", 5), ("gamma", 3), ("delta", 1)] {
        for _ in 0..count {
            sketch.add(&word.to_string());
        }
    }
    let bytes = sketch.serialize();
    let restored = CountMinSketch::<String>::deserialize(&bytes).unwrap();
    assert_eq!(restored.top_n_capacity(), 3);

    let before = sketch.top_n();
    let after = restored.top_n();
    assert_eq!(before.len(), after.len());
    for (b, a) in before.iter().zip(after.iter()) {
        assert_eq!(b.item(), a.item());
        assert_eq!(b.frequency(), a.frequency());
    }
    assert_eq!(after[0].item(), &"alpha".to_string());
    assert_eq!(after[0].frequency(), 7);
}

#[test]
fn test_restored_sketch_keeps_counting() {
    let mut sketch = CountMinSketch::<u64>::with_top_n(0.01, 0.99, 2).unwrap();
    for _ in 0..4 {
        sketch.add(&1);
    }
    let bytes = sketch.serialize();
    let mut restored = CountMinSketch::<u64>::deserialize(&bytes).unwrap();
    assert_eq!(restored.add(&1), 5);
    assert_eq!(restored.estimate(&1), 5);
}

#[test]
fn test_item_type_mismatch() {
    let sketch = CountMinSketch::<i64>::with_top_n(0.01, 0.99, 2).unwrap();
    let bytes = sketch.serialize();
    let err = CountMinSketch::<String>::deserialize(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn test_truncated_bytes() {
    let mut sketch = CountMinSketch::<i64>::new(0.01, 0.99).unwrap();
    sketch.add(&7);
    let bytes = sketch.serialize();

    let err = CountMinSketch::<i64>::deserialize(&bytes[..8]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientData);

    let err = CountMinSketch::<i64>::deserialize(&bytes[..bytes.len() / 2]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientData);
}

#[test]
fn test_garbage_bytes() {
    let err = CountMinSketch::<i64>::deserialize(&[0u8; 32]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}

#[test]
fn test_wrong_family() {
    let mask_bytes = minsketch::minmask::MinMaskSketch::new(0.01, 0.99)
        .unwrap()
        .serialize();
    let err = CountMinSketch::<i64>::deserialize(&mask_bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}

#[test]
fn test_tampered_preamble_longs() {
    let sketch = CountMinSketch::<i64>::new(0.01, 0.99).unwrap();
    let mut bytes = sketch.serialize();
    bytes[0] = 7;
    let err = CountMinSketch::<i64>::deserialize(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}
