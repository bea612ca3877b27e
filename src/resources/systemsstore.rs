//! Registry for state hook systems.
//!
//! Enter/exit systems for each [`GameStates`](crate::resources::gamestate::GameStates)
//! are registered once at startup under string keys (`"setup"`,
//! `"enter_home"`, `"enter_play"`, `"exit_play"`, `"quit_game"`) and run by
//! the state transition observer through their [`SystemId`].

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemId;
use rustc_hash::FxHashMap;

use crate::components::persistent::Persistent;

/// Map of hook names to system IDs.
#[derive(Resource, Default)]
pub struct SystemsStore {
    pub map: FxHashMap<String, SystemId>,
}

impl SystemsStore {
    pub fn new() -> Self {
        SystemsStore {
            map: FxHashMap::default(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, id: SystemId) {
        self.map.insert(name.into(), id);
    }

    pub fn get(&self, name: impl AsRef<str>) -> Option<&SystemId> {
        self.map.get(name.as_ref())
    }

    /// Register `system` in `world` and store its id under `name`.
    ///
    /// Registered systems live on entities; they are tagged [`Persistent`] so
    /// session teardown does not despawn them.
    pub fn register<M>(
        &mut self,
        world: &mut World,
        name: impl Into<String>,
        system: impl IntoSystem<(), (), M> + 'static,
    ) -> SystemId {
        let id = world.register_system(system);
        world.entity_mut(id.entity()).insert(Persistent);
        self.insert(name, id);
        id
    }
}
