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

//! Serialization constants for min-mask sketches.

/// Family ID for min-mask sketches.
pub const FAMILY_ID: u8 = 19;
/// Serialization version.
pub const SER_VER: u8 = 1;

/// Preamble longs for a min-mask sketch.
pub const PREAMBLE_LONGS: u8 = 2;

/// Offset of preamble longs byte.
pub const PREAMBLE_LONGS_BYTE: usize = 0;
/// Offset of serialization version byte.
pub const SER_VER_BYTE: usize = 1;
/// Offset of family ID byte.
pub const FAMILY_BYTE: usize = 2;

/// Offset of sketch depth (low half of second pre-long).
pub const DEPTH_INT: usize = 8;
/// Offset of sketch width (high half of second pre-long).
pub const WIDTH_INT: usize = 12;
