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
//! The physics engine
//!
//! [`PhysicsEngine`] owns every particle, body and agent and advances them
//! once per frame. Each integration pass runs in this order:
//!
//! 1. apply every force
//! 2. integrate velocities and angular momenta
//! 3. run every constraint, `constraint_steps` times
//! 4. integrate orientations and positions
//! 5. emit [`EngineEvent::Update`]
//! 6. fall asleep if total energy is below `sleep_tolerance`
//!
//! # Sleep and wake
//!
//! The engine is either fully awake or fully asleep. It starts asleep and
//! wakes whenever something can change: adding a body, attaching an agent,
//! or mutating state through the engine. While asleep `step` does nothing,
//! so an idle scene costs nothing per frame.

use std::fmt;

use log::{debug, trace, warn};

use crate::bodies::{Body, BodyId, BodySet, Particle, Simulated};
use crate::error::{PhysicsError, Result};
use crate::events::EventEmitter;
use crate::integration::{Integrator, SymplecticEuler};
use crate::math::{Transform, Vector};

mod agent;
mod clock;
mod config;

pub use agent::{Agent, AgentId};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{EngineConfig, MAX_TIME_STEP, MIN_TIME_STEP};

use agent::Binding;

/// Lifecycle notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineEvent {
    /// The engine woke up
    Start,
    /// An integration pass finished
    Update,
    /// The engine fell asleep
    End,
}

/// What the rendering layer receives for one object
#[derive(Debug, Clone, PartialEq)]
pub struct Modifier<T> {
    /// 4×4 column-major affine transform of the object
    pub transform: Transform,
    /// Whatever the caller asked to have carried along
    pub target: T,
}

/// Particle and rigid-body simulation driven once per frame
///
/// # Examples
///
/// ```
/// use animation_physics::bodies::Particle;
/// use animation_physics::constraints::Wall;
/// use animation_physics::engine::PhysicsEngine;
/// use animation_physics::forces::{Field, VectorField};
/// use animation_physics::math::Vector;
///
/// let mut engine = PhysicsEngine::new();
/// let ball = engine.add_particle(Particle::new(1.0).unwrap());
///
/// let gravity = VectorField::new(Field::Constant(Vector::new(0.0, 1.0, 0.0)), 0.001);
/// engine.attach(gravity, &[ball], None).unwrap();
/// engine.attach(Wall::new(Vector::new(0.0, -1.0, 0.0), 300.0), &[ball], None).unwrap();
///
/// for _ in 0..60 {
///     engine.advance(16.0).unwrap();
/// }
/// assert!(engine.body(ball).unwrap().position().y > 0.0);
/// ```
pub struct PhysicsEngine {
    bodies: BodySet,
    forces: Vec<(AgentId, Binding)>,
    constraints: Vec<(AgentId, Binding)>,
    next_agent: u64,
    integrator: SymplecticEuler,
    config: EngineConfig,
    clock: Box<dyn Clock>,
    prev_time: f64,
    sleeping: bool,
    events: EventEmitter<EngineEvent, EngineEvent>,
}

impl PhysicsEngine {
    /// Engine with the default configuration and the system clock
    pub fn new() -> Self {
        let config = EngineConfig::default();
        PhysicsEngine {
            bodies: BodySet::new(),
            forces: Vec::new(),
            constraints: Vec::new(),
            next_agent: 0,
            integrator: integrator_for(&config),
            config,
            clock: Box::new(SystemClock::new()),
            prev_time: 0.0,
            sleeping: true,
            events: EventEmitter::new(),
        }
    }

    /// Engine with a custom configuration
    ///
    /// # Errors
    ///
    /// `InvalidPhysicsConfiguration` if the configuration is rejected by
    /// [`EngineConfig::validate`].
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        let mut engine = PhysicsEngine::new();
        engine.set_options(config)?;
        Ok(engine)
    }

    /// Replace the frame clock
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.prev_time = clock.now_ms();
        self.clock = Box::new(clock);
        self
    }

    /// Current configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the configuration
    pub fn set_options(&mut self, config: EngineConfig) -> Result<()> {
        config.validate()?;
        self.integrator = integrator_for(&config);
        self.config = config;
        Ok(())
    }

    /// Register a lifecycle handler
    pub fn on(&mut self, event: EngineEvent, handler: impl FnMut(&EngineEvent) + 'static) {
        self.events.on(event, handler);
    }

    // ---------------------------------------------------------------------
    // Bodies

    /// Take ownership of a particle or body and wake the engine
    pub fn add_body(&mut self, object: impl Into<Simulated>) -> BodyId {
        let mut object = object.into();
        object.wake();
        let id = self.bodies.insert(object);
        debug!("Added {}", id);
        self.wake();
        id
    }

    /// Take ownership of a particle and wake the engine
    pub fn add_particle(&mut self, particle: Particle) -> BodyId {
        self.add_body(particle)
    }

    /// Remove an object and detach it from every agent
    ///
    /// Agents it was the source of are detached entirely. Unknown ids are
    /// ignored.
    pub fn remove_body(&mut self, id: BodyId) -> Option<Simulated> {
        let removed = self.bodies.remove(id)?;
        for list in [&mut self.forces, &mut self.constraints] {
            list.retain(|(_, binding)| binding.source != Some(id));
            for (_, binding) in list.iter_mut().filter(|(_, b)| b.references(id)) {
                binding.targets.retain(|&target| target != id);
            }
        }
        debug!("Removed {}", id);
        Some(removed)
    }

    /// Borrow an object
    pub fn body(&self, id: BodyId) -> Option<&Simulated> {
        self.bodies.get(id)
    }

    /// Borrow an object for mutation; wakes the engine
    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Simulated> {
        if !self.bodies.contains(id) {
            return None;
        }
        self.wake();
        self.bodies.get_mut(id)
    }

    /// Every owned object in insertion-slot order
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Simulated)> {
        self.bodies.iter()
    }

    /// Point particles
    pub fn particles(&self) -> impl Iterator<Item = (BodyId, &Particle)> {
        self.bodies.iter().filter_map(|(id, object)| match object {
            Simulated::Particle(p) => Some((id, p)),
            Simulated::Body(_) => None,
        })
    }

    /// Rigid bodies
    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies
            .iter()
            .filter_map(|(id, object)| object.as_body().map(|b| (id, b)))
    }

    /// Number of owned objects
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the engine owns no objects
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Set an object's velocity
    pub fn set_velocity(&mut self, id: BodyId, velocity: Vector) -> Result<()> {
        self.known_mut(id)?.set_velocity(velocity);
        Ok(())
    }

    /// Move an object
    pub fn set_position(&mut self, id: BodyId, position: Vector) -> Result<()> {
        self.known_mut(id)?.set_position(position);
        Ok(())
    }

    /// Add a one-off force for the next pass
    pub fn apply_force(&mut self, id: BodyId, force: Vector) -> Result<()> {
        self.known_mut(id)?.apply_force(force);
        Ok(())
    }

    /// Change an object's velocity by `impulse / mass`
    pub fn apply_impulse(&mut self, id: BodyId, impulse: Vector) -> Result<()> {
        self.known_mut(id)?.apply_impulse(impulse);
        Ok(())
    }

    fn known_mut(&mut self, id: BodyId) -> Result<&mut Simulated> {
        self.body_mut(id).ok_or(PhysicsError::UnknownBody(id))
    }

    // ---------------------------------------------------------------------
    // Agents

    /// Attach a force or constraint to `targets`, optionally anchored to
    /// `source`, and wake the engine
    ///
    /// # Errors
    ///
    /// `UnknownBody` if a target or the source is not owned by this engine;
    /// `InvalidPhysicsConfiguration` if the agent needs a source or anchor
    /// it doesn't have.
    pub fn attach(
        &mut self,
        agent: impl Into<Agent>,
        targets: &[BodyId],
        source: Option<BodyId>,
    ) -> Result<AgentId> {
        let agent = agent.into();
        self.check_binding(&agent, targets, source)?;
        Ok(self.bind(agent, targets, source))
    }

    /// Attach several agents to the same bodies
    ///
    /// Either every agent is attached or none is.
    pub fn attach_all(
        &mut self,
        agents: impl IntoIterator<Item = Agent>,
        targets: &[BodyId],
        source: Option<BodyId>,
    ) -> Result<Vec<AgentId>> {
        let agents: Vec<Agent> = agents.into_iter().collect();
        for agent in &agents {
            self.check_binding(agent, targets, source)?;
        }
        Ok(agents
            .into_iter()
            .map(|agent| self.bind(agent, targets, source))
            .collect())
    }

    fn check_binding(&self, agent: &Agent, targets: &[BodyId], source: Option<BodyId>) -> Result<()> {
        if let Some(&unknown) = targets
            .iter()
            .chain(source.iter())
            .find(|&&id| !self.bodies.contains(id))
        {
            return Err(PhysicsError::UnknownBody(unknown));
        }
        match agent {
            Agent::Force(f) => f.validate(source),
            Agent::Constraint(c) => c.validate(source),
        }
    }

    fn bind(&mut self, agent: Agent, targets: &[BodyId], source: Option<BodyId>) -> AgentId {
        let id = AgentId::new(self.next_agent);
        self.next_agent += 1;
        debug!("Attached {} as {} to {} target(s)", agent.name(), id, targets.len());

        let is_force = agent.is_force();
        let binding = Binding {
            agent,
            targets: targets.to_vec(),
            source,
        };
        if is_force {
            self.forces.push((id, binding));
        } else {
            self.constraints.push((id, binding));
        }
        self.wake();
        id
    }

    /// Detach an agent and hand it back
    pub fn detach(&mut self, id: AgentId) -> Result<Agent> {
        for list in [&mut self.forces, &mut self.constraints] {
            if let Some(index) = list.iter().position(|(agent_id, _)| *agent_id == id) {
                let (_, binding) = list.remove(index);
                debug!("Detached {}", id);
                return Ok(binding.agent);
            }
        }
        Err(PhysicsError::UnknownAgent(id))
    }

    /// Stop an agent acting on `body`
    ///
    /// If `body` is the agent's source the whole agent is detached.
    pub fn detach_from(&mut self, id: AgentId, body: BodyId) -> Result<()> {
        let binding = self.binding_mut(id).ok_or(PhysicsError::UnknownAgent(id))?;
        if binding.source == Some(body) {
            self.detach(id)?;
        } else {
            binding.targets.retain(|&target| target != body);
        }
        Ok(())
    }

    /// Detach every agent
    pub fn detach_all(&mut self) {
        self.forces.clear();
        self.constraints.clear();
    }

    /// Borrow an attached agent
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.forces
            .iter()
            .chain(self.constraints.iter())
            .find(|(agent_id, _)| *agent_id == id)
            .map(|(_, binding)| &binding.agent)
    }

    /// Borrow an attached agent for reconfiguration; wakes the engine
    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.binding_mut(id)?;
        self.wake();
        self.binding_mut(id).map(|binding| &mut binding.agent)
    }

    /// Bodies an agent acts on
    pub fn targets(&self, id: AgentId) -> Option<&[BodyId]> {
        self.forces
            .iter()
            .chain(self.constraints.iter())
            .find(|(agent_id, _)| *agent_id == id)
            .map(|(_, binding)| binding.targets.as_slice())
    }

    /// Ids of every attached agent, forces first
    pub fn agents(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.forces
            .iter()
            .chain(self.constraints.iter())
            .map(|(id, _)| *id)
    }

    fn binding_mut(&mut self, id: AgentId) -> Option<&mut Binding> {
        self.forces
            .iter_mut()
            .chain(self.constraints.iter_mut())
            .find(|(agent_id, _)| *agent_id == id)
            .map(|(_, binding)| binding)
    }

    // ---------------------------------------------------------------------
    // Stepping

    /// Advance by the time elapsed on the clock since the last pass
    ///
    /// Does nothing while asleep, or if less than `min_time_step` has
    /// passed. Long frames are clamped to `max_time_step`.
    pub fn step(&mut self) {
        if self.sleeping {
            return;
        }
        let now = self.clock.now_ms();
        let dt_frame = now - self.prev_time;
        if dt_frame <= 0.0 || dt_frame < self.config.min_time_step {
            return;
        }
        self.prev_time = now;
        self.integrate(dt_frame.min(self.config.max_time_step));
    }

    /// Run one pass of exactly `dt` milliseconds
    ///
    /// Does nothing while asleep. Unlike [`step`](Self::step) the clock is
    /// not consulted and `dt` is not clamped.
    ///
    /// # Errors
    ///
    /// `InvalidPhysicsConfiguration` for a negative or non-finite `dt`.
    pub fn advance(&mut self, dt: f64) -> Result<()> {
        self.integrator.validate_timestep(dt)?;
        if self.sleeping || dt == 0.0 {
            return Ok(());
        }
        self.prev_time = self.clock.now_ms();
        self.integrate(dt);
        Ok(())
    }

    fn integrate(&mut self, dt: f64) {
        let integrator = self.integrator;

        for (_, binding) in &self.forces {
            if let Agent::Force(force) = &binding.agent {
                force.apply_force(&binding.targets, binding.source, &mut self.bodies);
            }
        }

        for (_, object) in self.bodies.iter_mut() {
            integrator.integrate_velocity(object.particle_mut(), dt);
            if let Some(body) = object.as_body_mut() {
                integrator.integrate_angular_momentum(body, dt);
            }
        }

        for _ in 0..self.config.constraint_steps {
            for (_, binding) in self.constraints.iter_mut() {
                if let Agent::Constraint(constraint) = &mut binding.agent {
                    constraint.apply_constraint(&binding.targets, binding.source, dt, &mut self.bodies);
                }
            }
        }

        for (id, object) in self.bodies.iter_mut() {
            if let Some(body) = object.as_body_mut() {
                integrator.integrate_orientation(body, dt);
                body.orientation = body.orientation.normalize();
            }
            integrator.integrate_position(object.particle_mut(), dt);
            if !object.particle().is_valid() {
                warn!("{} has non-finite state after integration", id);
            }
        }

        self.events.emit(EngineEvent::Update, &EngineEvent::Update);

        let energy = self.energy();
        trace!("Integrated {:.3} ms, energy {:.3e}", dt, energy);
        if energy < self.config.sleep_tolerance {
            self.sleep();
        }
    }

    /// Kinetic energy of every object plus potential energy of every agent
    pub fn energy(&self) -> f64 {
        let kinetic: f64 = self.bodies.iter().map(|(_, object)| object.energy()).sum();
        let potential: f64 = self
            .forces
            .iter()
            .chain(self.constraints.iter())
            .map(|(_, binding)| match &binding.agent {
                Agent::Force(f) => f.energy(&binding.targets, binding.source, &self.bodies),
                Agent::Constraint(c) => c.energy(&binding.targets, binding.source, &self.bodies),
            })
            .sum();
        kinetic + potential
    }

    /// Whether the engine is asleep
    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    /// Put the engine and every object to sleep
    pub fn sleep(&mut self) {
        if self.sleeping {
            return;
        }
        for (_, object) in self.bodies.iter_mut() {
            object.sleep();
        }
        self.sleeping = true;
        debug!("Physics engine asleep");
        self.events.emit(EngineEvent::End, &EngineEvent::End);
    }

    /// Wake the engine and every object; the next frame is measured from now
    pub fn wake(&mut self) {
        if !self.sleeping {
            return;
        }
        for (_, object) in self.bodies.iter_mut() {
            object.wake();
        }
        self.prev_time = self.clock.now_ms();
        self.sleeping = false;
        debug!("Physics engine awake");
        self.events.emit(EngineEvent::Start, &EngineEvent::Start);
    }

    // ---------------------------------------------------------------------
    // Rendering contract

    /// Position after bringing the simulation up to date
    pub fn position(&mut self, id: BodyId) -> Option<Vector> {
        self.step();
        self.bodies.get(id).map(Simulated::position)
    }

    /// Transform after bringing the simulation up to date
    pub fn transform(&mut self, id: BodyId) -> Option<Transform> {
        self.step();
        self.bodies.get(id).map(Simulated::transform)
    }

    /// Transform paired with a caller-supplied render target
    pub fn modify<T>(&mut self, id: BodyId, target: T) -> Option<Modifier<T>> {
        let transform = self.transform(id)?;
        Some(Modifier { transform, target })
    }
}

fn integrator_for(config: &EngineConfig) -> SymplecticEuler {
    SymplecticEuler::new()
        .with_velocity_cap(config.velocity_cap)
        .with_angular_velocity_cap(config.angular_velocity_cap)
}

impl Default for PhysicsEngine {
    fn default() -> Self {
        PhysicsEngine::new()
    }
}

impl fmt::Debug for PhysicsEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhysicsEngine")
            .field("bodies", &self.bodies.len())
            .field("forces", &self.forces)
            .field("constraints", &self.constraints)
            .field("config", &self.config)
            .field("sleeping", &self.sleeping)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{Collision, Distance};
    use crate::forces::{Drag, Spring};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn moving_particle(vx: f64) -> Particle {
        Particle::new(1.0).unwrap().with_velocity(Vector::new(vx, 0.0, 0.0))
    }

    #[test]
    fn test_starts_asleep_and_wakes_on_add() {
        let mut engine = PhysicsEngine::new();
        assert!(engine.is_sleeping());
        engine.add_particle(moving_particle(1.0));
        assert!(!engine.is_sleeping());
    }

    #[test]
    fn test_step_respects_time_window() {
        let clock = ManualClock::new();
        let mut engine = PhysicsEngine::new().with_clock(clock.clone());
        let id = engine.add_particle(moving_particle(1.0));

        clock.advance(4.0);
        engine.step();
        assert_eq!(engine.body(id).unwrap().position().x, 0.0);

        // Skipped time still counts toward the next frame
        clock.advance(6.0);
        engine.step();
        assert_eq!(engine.body(id).unwrap().position().x, 10.0);

        // Long frames are clamped
        clock.advance(500.0);
        engine.step();
        assert_eq!(engine.body(id).unwrap().position().x, 10.0 + MAX_TIME_STEP);
    }

    #[test]
    fn test_position_steps_first() {
        let clock = ManualClock::new();
        let mut engine = PhysicsEngine::new().with_clock(clock.clone());
        let id = engine.add_particle(moving_particle(2.0));

        clock.advance(10.0);
        assert_eq!(engine.position(id), Some(Vector::new(20.0, 0.0, 0.0)));

        let modifier = engine.modify(id, "node").unwrap();
        assert_eq!(modifier.target, "node");
        assert_eq!(&modifier.transform[12..15], &[20.0, 0.0, 0.0]);
    }

    #[test]
    fn test_repeated_reads_in_one_frame_leave_state_alone() {
        let clock = ManualClock::new();
        let mut engine = PhysicsEngine::new().with_clock(clock.clone());
        let id = engine.add_particle(
            Particle::new(1.0)
                .unwrap()
                .with_position(Vector::new(-1.0, 0.0, 0.0))
                .with_velocity(Vector::new(-5.0, 0.0, 0.0)),
        );
        engine.attach(crate::constraints::Wall::new(Vector::X, 0.0), &[id], None).unwrap();

        let first = engine.position(id).unwrap();
        let second = engine.position(id).unwrap();
        assert_eq!(first, Vector::new(-1.0, 0.0, 0.0));
        assert_eq!(first, second);
        assert_eq!(engine.body(id).unwrap().velocity(), Vector::new(-5.0, 0.0, 0.0));

        // Clock running backwards is ignored too
        clock.set(-50.0);
        assert_eq!(engine.position(id), Some(first));

        clock.set(10.0);
        let moved = engine.position(id).unwrap();
        assert!(moved.is_valid());
        assert_eq!(engine.position(id), Some(moved));
    }

    #[test]
    fn test_events_fire_on_lifecycle() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut engine = PhysicsEngine::new();
        for event in [EngineEvent::Start, EngineEvent::Update, EngineEvent::End] {
            let log = Rc::clone(&seen);
            engine.on(event, move |e| log.borrow_mut().push(*e));
        }

        engine.add_particle(Particle::new(1.0).unwrap());
        engine.advance(16.0).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![EngineEvent::Start, EngineEvent::Update, EngineEvent::End]
        );
        assert!(engine.is_sleeping());
    }

    #[test]
    fn test_attach_checks_bodies_and_sources() {
        let mut engine = PhysicsEngine::new();
        let a = engine.add_particle(moving_particle(0.0));
        let gone = engine.add_particle(moving_particle(0.0));
        engine.remove_body(gone);

        assert_eq!(
            engine.attach(Drag::default(), &[gone], None),
            Err(PhysicsError::UnknownBody(gone))
        );
        assert!(matches!(
            engine.attach(Spring::new(), &[a], None),
            Err(PhysicsError::InvalidPhysicsConfiguration(_))
        ));
        assert!(engine.attach(Collision::new(), &[a], None).is_err());
        assert_eq!(engine.agents().count(), 0);
    }

    #[test]
    fn test_attach_all_is_all_or_nothing() {
        let mut engine = PhysicsEngine::new();
        let a = engine.add_particle(moving_particle(0.0));

        let result = engine.attach_all(
            vec![Agent::from(Drag::default()), Agent::from(Spring::new())],
            &[a],
            None,
        );
        assert!(result.is_err());
        assert_eq!(engine.agents().count(), 0);

        let ids = engine
            .attach_all(vec![Agent::from(Drag::default()), Agent::from(Drag::new(0.5))], &[a], None)
            .unwrap();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_detach_and_detach_from() {
        let mut engine = PhysicsEngine::new();
        let a = engine.add_particle(moving_particle(0.0));
        let b = engine.add_particle(moving_particle(0.0));
        let c = engine.add_particle(moving_particle(0.0));

        let spring = engine.attach(Spring::new(), &[b, c], Some(a)).unwrap();
        engine.detach_from(spring, b).unwrap();
        assert_eq!(engine.targets(spring), Some(&[c][..]));

        // Detaching the source drops the whole agent
        engine.detach_from(spring, a).unwrap();
        assert!(engine.agent(spring).is_none());
        assert_eq!(engine.detach(spring).unwrap_err(), PhysicsError::UnknownAgent(spring));
    }

    #[test]
    fn test_remove_body_detaches_it() {
        let mut engine = PhysicsEngine::new();
        let a = engine.add_particle(moving_particle(0.0));
        let b = engine.add_particle(moving_particle(0.0));

        let drag = engine.attach(Drag::default(), &[a, b], None).unwrap();
        let link = engine.attach(Distance::new(10.0), &[b], Some(a)).unwrap();

        assert!(engine.remove_body(a).is_some());
        assert!(engine.remove_body(a).is_none());
        assert_eq!(engine.targets(drag), Some(&[b][..]));
        assert!(engine.agent(link).is_none());
    }

    #[test]
    fn test_agent_mut_reconfigures() {
        let mut engine = PhysicsEngine::new();
        let a = engine.add_particle(moving_particle(1.0));
        let id = engine.attach(Drag::new(0.1), &[a], None).unwrap();

        engine.agent_mut(id).unwrap().downcast_mut::<Drag>().unwrap().strength = 0.2;
        assert_eq!(engine.agent(id).unwrap().downcast_ref::<Drag>().unwrap().strength, 0.2);
    }

    #[test]
    fn test_advance_rejects_bad_timestep() {
        let mut engine = PhysicsEngine::new();
        assert!(engine.advance(-1.0).is_err());
        assert!(engine.advance(f64::NAN).is_err());
        assert!(engine.advance(16.0).is_ok());
    }

    #[test]
    fn test_set_options_validates() {
        let mut engine = PhysicsEngine::new();
        assert!(engine.set_options(EngineConfig::default().with_constraint_steps(0)).is_err());
        assert_eq!(engine.config().constraint_steps, 1);
        assert!(PhysicsEngine::with_config(EngineConfig::default().with_constraint_steps(4)).is_ok());
    }
}
