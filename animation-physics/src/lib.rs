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
//! # Animation Physics
//!
//! Particle and rigid-body dynamics for driving animated values: springs
//! that settle a panel into place, walls that bounce a ball, snaps that
//! pull an item onto a grid.
//!
//! ## Features
//!
//! - **Bodies**: point particles plus circle and rectangle rigid bodies
//! - **Forces**: drag, springs, repulsion and vector fields
//! - **Constraints**: distance, snap, walls, collisions, surfaces and curves,
//!   solved as velocity corrections after force integration
//! - **Sleep**: the engine stops integrating once total energy falls below a
//!   tolerance and wakes as soon as anything changes
//!
//! Times are in milliseconds throughout.
//!
//! ## Example
//!
//! ```rust
//! use animation_physics::bodies::Particle;
//! use animation_physics::engine::PhysicsEngine;
//! use animation_physics::forces::Spring;
//! use animation_physics::math::Vector;
//!
//! let mut engine = PhysicsEngine::new();
//! let item = engine.add_particle(
//!     Particle::new(1.0).unwrap().with_position(Vector::new(100.0, 0.0, 0.0)),
//! );
//!
//! let spring = Spring::new()
//!     .with_anchor(Vector::zero())
//!     .with_period(400.0)
//!     .unwrap()
//!     .with_damping_ratio(0.7)
//!     .unwrap();
//! engine.attach(spring, &[item], None).unwrap();
//!
//! for _ in 0..300 {
//!     engine.advance(16.0).unwrap();
//! }
//! assert!(engine.body(item).unwrap().position().norm() < 1.0);
//! ```

#![warn(missing_docs)]

/// Particles, rigid bodies and their storage
pub mod bodies;

/// Velocity-level constraints
pub mod constraints;

/// The engine that owns bodies and agents and steps them
pub mod engine;

/// Error types
pub mod error;

/// Minimal event emitter
pub mod events;

/// Forces
pub mod forces;

/// Numerical integration methods
pub mod integration;

/// Vectors, quaternions, matrices and transforms
pub mod math;

pub use bodies::{Body, BodyId, Particle, Shape, Simulated};
pub use engine::{Agent, AgentId, EngineConfig, EngineEvent, PhysicsEngine};
pub use error::{PhysicsError, Result};
pub use math::{Quaternion, Vector};
