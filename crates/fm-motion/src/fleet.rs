//! A keyed collection of motion controllers, one per tracked asset.

use std::collections::BTreeMap;

use fm_core::{AssetId, Haversine, Metric, Timestamp};

use crate::{Frame, MotionController, MotionObserver, MotionResult, NoopObserver, Speed};

/// Holds one [`MotionController`] per [`AssetId`].
///
/// Controllers never share state; the fleet only saves the host from writing
/// the same loop in every frame callback.  Iteration is in ascending
/// `AssetId` order, so frame output is deterministic.
pub struct Fleet<M: Metric = Haversine, O: MotionObserver = NoopObserver> {
    controllers: BTreeMap<AssetId, MotionController<M, O>>,
}

impl<M: Metric, O: MotionObserver> Default for Fleet<M, O> {
    fn default() -> Self {
        Self { controllers: BTreeMap::new() }
    }
}

impl<M: Metric, O: MotionObserver> Fleet<M, O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the controller for `asset`, returning the old one.
    pub fn insert(
        &mut self,
        asset:      AssetId,
        controller: MotionController<M, O>,
    ) -> Option<MotionController<M, O>> {
        self.controllers.insert(asset, controller)
    }

    pub fn remove(&mut self, asset: AssetId) -> Option<MotionController<M, O>> {
        self.controllers.remove(&asset)
    }

    pub fn get(&self, asset: AssetId) -> Option<&MotionController<M, O>> {
        self.controllers.get(&asset)
    }

    pub fn get_mut(&mut self, asset: AssetId) -> Option<&mut MotionController<M, O>> {
        self.controllers.get_mut(&asset)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AssetId, &MotionController<M, O>)> {
        self.controllers.iter().map(|(&id, c)| (id, c))
    }

    /// Tick every controller and collect the frames.
    pub fn tick_all(&mut self, now: Timestamp) -> Vec<(AssetId, Frame)> {
        self.controllers
            .iter_mut()
            .map(|(&id, c)| (id, c.tick(now)))
            .collect()
    }

    pub fn start_all(&mut self, now: Timestamp) {
        for c in self.controllers.values_mut() {
            c.start(now);
        }
    }

    pub fn pause_all(&mut self, now: Timestamp) {
        for c in self.controllers.values_mut() {
            c.pause(now);
        }
    }

    /// Apply one speed to every controller.  The speed is validated once up
    /// front, so on error no controller has changed.
    pub fn set_speed_all(&mut self, speed: Speed, now: Timestamp) -> MotionResult<()> {
        let speed = speed.validate()?;
        for c in self.controllers.values_mut() {
            c.set_speed(speed, now)?;
        }
        Ok(())
    }

    /// Number of controllers currently `Moving`.
    pub fn moving_count(&self) -> usize {
        self.controllers.values().filter(|c| c.is_moving()).count()
    }
}
