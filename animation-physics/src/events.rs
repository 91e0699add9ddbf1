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
//! Synchronous event delivery
//!
//! An [`EventEmitter`] keeps handlers keyed by an event kind and calls them
//! in registration order when that kind is emitted. Delivery happens inside
//! the call to `emit`, on the caller's stack; nothing is queued.

use std::fmt;

/// Handler invoked with the emitted message
pub type Handler<M> = Box<dyn FnMut(&M)>;

/// Handlers for events of kind `K` carrying messages of type `M`
pub struct EventEmitter<K, M> {
    handlers: Vec<(K, Handler<M>)>,
}

impl<K: PartialEq, M> EventEmitter<K, M> {
    /// Create an emitter with no handlers
    pub fn new() -> Self {
        EventEmitter {
            handlers: Vec::new(),
        }
    }

    /// Register `handler` for `kind`
    pub fn on(&mut self, kind: K, handler: impl FnMut(&M) + 'static) {
        self.handlers.push((kind, Box::new(handler)));
    }

    /// Call every handler registered for `kind`
    pub fn emit(&mut self, kind: K, message: &M) {
        for (k, handler) in self.handlers.iter_mut() {
            if *k == kind {
                handler(message);
            }
        }
    }

    /// Whether any handler is registered for `kind`
    pub fn has_handlers(&self, kind: &K) -> bool {
        self.handlers.iter().any(|(k, _)| k == kind)
    }

    /// Number of registered handlers
    pub fn count(&self) -> usize {
        self.handlers.len()
    }

    /// Remove every handler for `kind`
    pub fn remove_all(&mut self, kind: &K) {
        self.handlers.retain(|(k, _)| k != kind);
    }
}

impl<K: PartialEq, M> Default for EventEmitter<K, M> {
    fn default() -> Self {
        EventEmitter::new()
    }
}

impl<K: fmt::Debug, M> fmt::Debug for EventEmitter<K, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.handlers.iter().map(|(k, _)| k))
            .finish()
    }
}
