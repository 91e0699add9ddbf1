// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Math layer: vectors, quaternions, matrices and transforms
//!
//! These are plain `Copy` value types. Operations never mutate their
//! receiver, so a value computed at one call site can't be clobbered by an
//! unrelated computation elsewhere.

mod matrix;
mod quaternion;
pub mod transform;
mod vector;

pub use matrix::Matrix3;
pub use quaternion::Quaternion;
pub use transform::Transform;
pub use vector::Vector;
