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
//! Generational storage for simulated objects
//!
//! Slots are reused after removal; each reuse bumps the slot's generation
//! so stale handles miss. Iteration walks slots in index order, which keeps
//! every pass over the set deterministic.

use super::{BodyId, Simulated};

/// Owner of every particle and body in an engine
#[derive(Debug, Clone, Default)]
pub struct BodySet {
    slots: Vec<Option<Simulated>>,
    generations: Vec<u32>,
    free: Vec<u32>,
    len: usize,
}

impl BodySet {
    /// Create an empty set
    pub fn new() -> Self {
        BodySet::default()
    }

    /// Take ownership of an object and hand back its handle
    pub fn insert(&mut self, object: impl Into<Simulated>) -> BodyId {
        let object = object.into();
        self.len += 1;
        if let Some(index) = self.free.pop() {
            self.slots[index as usize] = Some(object);
            return BodyId::new(index, self.generations[index as usize]);
        }
        let index = self.slots.len() as u32;
        self.slots.push(Some(object));
        self.generations.push(0);
        BodyId::new(index, 0)
    }

    /// Remove an object, returning it if the handle was live
    pub fn remove(&mut self, id: BodyId) -> Option<Simulated> {
        if !self.contains(id) {
            return None;
        }
        let index = id.index() as usize;
        let object = self.slots[index].take();
        self.generations[index] = self.generations[index].wrapping_add(1);
        self.free.push(id.index());
        self.len -= 1;
        object
    }

    /// Whether the handle refers to a live object
    pub fn contains(&self, id: BodyId) -> bool {
        let index = id.index() as usize;
        index < self.slots.len()
            && self.generations[index] == id.generation()
            && self.slots[index].is_some()
    }

    /// Borrow an object
    pub fn get(&self, id: BodyId) -> Option<&Simulated> {
        if !self.contains(id) {
            return None;
        }
        self.slots[id.index() as usize].as_ref()
    }

    /// Borrow an object mutably
    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Simulated> {
        if !self.contains(id) {
            return None;
        }
        self.slots[id.index() as usize].as_mut()
    }

    /// Borrow two distinct objects mutably at once
    ///
    /// Returns `None` if either handle is stale or both name the same object.
    pub fn pair_mut(&mut self, a: BodyId, b: BodyId) -> Option<(&mut Simulated, &mut Simulated)> {
        if a.index() == b.index() || !self.contains(a) || !self.contains(b) {
            return None;
        }
        let (ia, ib) = (a.index() as usize, b.index() as usize);
        if ia < ib {
            let (low, high) = self.slots.split_at_mut(ib);
            Some((low[ia].as_mut()?, high[0].as_mut()?))
        } else {
            let (low, high) = self.slots.split_at_mut(ia);
            Some((high[0].as_mut()?, low[ib].as_mut()?))
        }
    }

    /// Number of live objects
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Handles of every live object, in slot order
    pub fn ids(&self) -> Vec<BodyId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Iterate live objects in slot order
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Simulated)> {
        self.slots
            .iter()
            .zip(&self.generations)
            .enumerate()
            .filter_map(|(index, (slot, generation))| {
                slot.as_ref()
                    .map(|object| (BodyId::new(index as u32, *generation), object))
            })
    }

    /// Iterate live objects mutably in slot order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyId, &mut Simulated)> {
        self.slots
            .iter_mut()
            .zip(&self.generations)
            .enumerate()
            .filter_map(|(index, (slot, generation))| {
                slot.as_mut()
                    .map(|object| (BodyId::new(index as u32, *generation), object))
            })
    }

    /// Drop every object; outstanding handles all become stale
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.take().is_some() {
                self.generations[index] = self.generations[index].wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{Body, Particle};
    use crate::math::Vector;

    fn particle_at(x: f64) -> Particle {
        Particle::new(1.0).unwrap().with_position(Vector::new(x, 0.0, 0.0))
    }

    #[test]
    fn test_insert_and_get() {
        let mut set = BodySet::new();
        let a = set.insert(particle_at(1.0));
        let b = set.insert(Body::circle(1.0, 1.0).unwrap());
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(a).unwrap().position().x, 1.0);
        assert!(set.get(b).unwrap().as_body().is_some());
    }

    #[test]
    fn test_stale_handle_misses_after_reuse() {
        let mut set = BodySet::new();
        let a = set.insert(particle_at(1.0));
        assert!(set.remove(a).is_some());
        assert!(set.remove(a).is_none());

        let b = set.insert(particle_at(2.0));
        assert_eq!(a.index(), b.index());
        assert_ne!(a.generation(), b.generation());
        assert!(set.get(a).is_none());
        assert_eq!(set.get(b).unwrap().position().x, 2.0);
    }

    #[test]
    fn test_pair_mut() {
        let mut set = BodySet::new();
        let a = set.insert(particle_at(1.0));
        let b = set.insert(particle_at(2.0));

        let (pa, pb) = set.pair_mut(b, a).unwrap();
        assert_eq!(pa.position().x, 2.0);
        assert_eq!(pb.position().x, 1.0);

        assert!(set.pair_mut(a, a).is_none());
    }

    #[test]
    fn test_iteration_order_and_clear() {
        let mut set = BodySet::new();
        let ids: Vec<_> = (0..4).map(|i| set.insert(particle_at(i as f64))).collect();
        assert_eq!(set.ids(), ids);

        for (_, object) in set.iter_mut() {
            object.set_velocity(Vector::new(1.0, 0.0, 0.0));
        }
        assert!(set.iter().all(|(_, o)| o.velocity().x == 1.0));

        set.clear();
        assert!(set.is_empty());
        assert!(ids.iter().all(|id| !set.contains(*id)));
    }
}
