use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use stellar_common::BodyHandle;

use crate::body::{CelestialBody, SpawnOrigin};

/// An event record produced by every change to registry membership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegistryEvent {
    /// Body was registered at the given position.
    Spawned {
        handle: BodyHandle,
        origin: SpawnOrigin,
        position: Vec2,
        mass: f32,
    },
    /// The host reported the body destroyed. The slot is reclaimed on the next prune.
    DestroyNotified { handle: BodyHandle },
    /// A doomed slot was reclaimed and its generation advanced.
    Pruned { handle: BodyHandle },
}

#[derive(Debug, Clone)]
enum SlotState {
    Vacant,
    Live(CelestialBody),
    Doomed,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    state: SlotState,
}

/// Generational arena of live bodies.
///
/// Slots are stable: a body keeps its index for its whole life. A destruction
/// notice removes the body and decrements the live count at once, but the slot
/// stays reserved until [`BodyRegistry::prune`] reclaims it. Reclaiming bumps
/// the slot generation so outstanding handles to the old body stop resolving.
#[derive(Debug, Clone, Default)]
pub struct BodyRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
    doomed: Vec<u32>,
    live: usize,
    origin_counts: BTreeMap<SpawnOrigin, usize>,
    events: Vec<RegistryEvent>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live bodies.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of live bodies that came from the given origin.
    pub fn count_by_origin(&self, origin: SpawnOrigin) -> usize {
        self.origin_counts.get(&origin).copied().unwrap_or(0)
    }

    /// Live counts per origin, in origin order.
    pub fn census(&self) -> &BTreeMap<SpawnOrigin, usize> {
        &self.origin_counts
    }

    /// Total slots allocated, including vacant and doomed ones.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slots waiting for the next prune.
    pub fn pending_prune(&self) -> usize {
        self.doomed.len()
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[RegistryEvent] {
        &self.events
    }

    /// Register a body and return its handle. Vacant slots are reused first.
    pub fn insert(&mut self, body: CelestialBody) -> BodyHandle {
        let origin = body.origin;
        let position = body.position;
        let mass = body.mass;

        let handle = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.state = SlotState::Live(body);
                BodyHandle::new(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    state: SlotState::Live(body),
                });
                BodyHandle::new(index, 0)
            }
        };

        self.live += 1;
        *self.origin_counts.entry(origin).or_insert(0) += 1;
        self.events.push(RegistryEvent::Spawned {
            handle,
            origin,
            position,
            mass,
        });
        handle
    }

    fn slot(&self, handle: BodyHandle) -> Option<&Slot> {
        self.slots
            .get(handle.index as usize)
            .filter(|s| s.generation == handle.generation)
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&CelestialBody> {
        match &self.slot(handle)?.state {
            SlotState::Live(body) => Some(body),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut CelestialBody> {
        let slot = self
            .slots
            .get_mut(handle.index as usize)
            .filter(|s| s.generation == handle.generation)?;
        match &mut slot.state {
            SlotState::Live(body) => Some(body),
            _ => None,
        }
    }

    /// True while the handle still resolves to a live body.
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Destruction notice from the host simulation.
    ///
    /// Returns the body if the handle was live; stale handles are ignored.
    pub fn notify_destroyed(&mut self, handle: BodyHandle) -> Option<CelestialBody> {
        let slot = self
            .slots
            .get_mut(handle.index as usize)
            .filter(|s| s.generation == handle.generation)?;
        if !matches!(slot.state, SlotState::Live(_)) {
            return None;
        }
        let SlotState::Live(body) = std::mem::replace(&mut slot.state, SlotState::Doomed) else {
            return None;
        };

        self.live -= 1;
        if let Some(count) = self.origin_counts.get_mut(&body.origin) {
            *count = count.saturating_sub(1);
        }
        self.doomed.push(handle.index);
        self.events.push(RegistryEvent::DestroyNotified { handle });
        Some(body)
    }

    /// Reclaim every doomed slot. Returns how many were reclaimed.
    pub fn prune(&mut self) -> usize {
        let doomed = std::mem::take(&mut self.doomed);
        for &index in &doomed {
            let slot = &mut self.slots[index as usize];
            let handle = BodyHandle::new(index, slot.generation);
            slot.generation = slot.generation.wrapping_add(1);
            slot.state = SlotState::Vacant;
            self.free.push(index);
            self.events.push(RegistryEvent::Pruned { handle });
        }
        doomed.len()
    }

    /// Live bodies in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &CelestialBody)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| match &slot.state {
            SlotState::Live(body) => Some((BodyHandle::new(i as u32, slot.generation), body)),
            _ => None,
        })
    }

    /// Handles of all live bodies in slot order.
    pub fn handles(&self) -> Vec<BodyHandle> {
        self.iter().map(|(h, _)| h).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(origin: SpawnOrigin) -> CelestialBody {
        CelestialBody::new(Vec2::ZERO, 1.0, origin)
    }

    #[test]
    fn registry_starts_empty() {
        let r = BodyRegistry::new();
        assert!(r.is_empty());
        assert_eq!(r.capacity(), 0);
    }

    #[test]
    fn insert_and_lookup() {
        let mut r = BodyRegistry::new();
        let h = r.insert(body(SpawnOrigin::Seed));
        assert_eq!(r.len(), 1);
        assert!(r.contains(h));
        assert_eq!(r.get(h).map(|b| b.origin), Some(SpawnOrigin::Seed));
    }

    #[test]
    fn destroy_drops_live_count_before_prune() {
        let mut r = BodyRegistry::new();
        let h = r.insert(body(SpawnOrigin::Ring));
        assert!(r.notify_destroyed(h).is_some());
        assert_eq!(r.len(), 0);
        assert_eq!(r.count_by_origin(SpawnOrigin::Ring), 0);
        assert!(r.get(h).is_none());
        assert_eq!(r.pending_prune(), 1);
        assert_eq!(r.capacity(), 1);
    }

    #[test]
    fn double_destroy_is_ignored() {
        let mut r = BodyRegistry::new();
        let h = r.insert(body(SpawnOrigin::Seed));
        r.notify_destroyed(h);
        assert!(r.notify_destroyed(h).is_none());
        assert_eq!(r.pending_prune(), 1);
    }

    #[test]
    fn prune_reuses_slot_with_new_generation() {
        let mut r = BodyRegistry::new();
        let old = r.insert(body(SpawnOrigin::Seed));
        r.notify_destroyed(old);
        assert_eq!(r.prune(), 1);
        assert_eq!(r.pending_prune(), 0);

        let new = r.insert(body(SpawnOrigin::TopUp));
        assert_eq!(new.index, old.index);
        assert_eq!(new.generation, old.generation + 1);
        assert!(r.get(old).is_none());
        assert!(r.get(new).is_some());
        assert_eq!(r.capacity(), 1);
    }

    #[test]
    fn doomed_slot_is_not_reused_before_prune() {
        let mut r = BodyRegistry::new();
        let old = r.insert(body(SpawnOrigin::Seed));
        r.notify_destroyed(old);
        let new = r.insert(body(SpawnOrigin::Seed));
        assert_ne!(new.index, old.index);
    }

    #[test]
    fn census_counts_by_origin() {
        let mut r = BodyRegistry::new();
        r.insert(body(SpawnOrigin::Player));
        r.insert(body(SpawnOrigin::Ring));
        let ring = r.insert(body(SpawnOrigin::Ring));
        r.insert(body(SpawnOrigin::Seed));
        r.notify_destroyed(ring);
        assert_eq!(r.count_by_origin(SpawnOrigin::Ring), 1);
        assert_eq!(r.count_by_origin(SpawnOrigin::Seed), 1);
        assert_eq!(r.count_by_origin(SpawnOrigin::TopUp), 0);
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn events_are_recorded() {
        let mut r = BodyRegistry::new();
        let h = r.insert(body(SpawnOrigin::Seed));
        r.notify_destroyed(h);
        r.prune();
        // spawn + destroy notice + prune
        assert_eq!(r.events().len(), 3);
        assert!(matches!(r.events()[2], RegistryEvent::Pruned { handle } if handle == h));
    }

    #[test]
    fn drain_events_clears_log() {
        let mut r = BodyRegistry::new();
        r.insert(body(SpawnOrigin::Seed));
        let events = r.drain_events();
        assert_eq!(events.len(), 1);
        assert!(r.events().is_empty());
    }

    #[test]
    fn iter_skips_dead_slots() {
        let mut r = BodyRegistry::new();
        let a = r.insert(body(SpawnOrigin::Seed));
        let b = r.insert(body(SpawnOrigin::Seed));
        let c = r.insert(body(SpawnOrigin::Seed));
        r.notify_destroyed(b);
        assert_eq!(r.handles(), vec![a, c]);
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut r = BodyRegistry::new();
        let h = r.insert(body(SpawnOrigin::Seed));
        if let Some(b) = r.get_mut(h) {
            b.mass = 7.0;
        }
        assert_eq!(r.get(h).map(|b| b.mass), Some(7.0));
    }
}
