use critter_ecs::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg64;

use super::{execute, ActionContext, ActionError, Reply, Request};
use crate::bootstrap::{init_world, WorldHandles};
use crate::config::SimConfig;
use crate::events::EventLog;

/// A world with stocked stores and direct access to the action pipeline.
pub struct Harness {
    pub world: World,
    pub handles: WorldHandles,
    pub config: SimConfig,
    pub rng: Pcg64,
    pub events: EventLog,
    pub tick: u64,
}

impl Harness {
    pub fn new() -> Self {
        let config = SimConfig::default();
        let (world, handles) = init_world(&config).unwrap();
        Self {
            world,
            handles,
            config,
            rng: Pcg64::seed_from_u64(7),
            events: EventLog::new(),
            tick: 0,
        }
    }

    pub fn run(&mut self, persona: &str, request: Request) -> Result<Reply, ActionError> {
        let mut ctx = ActionContext::new(
            &mut self.world,
            self.tick,
            &self.config,
            &self.handles,
            &mut self.rng,
            &mut self.events,
        );
        execute(&mut ctx, persona, &request)
    }

    pub fn player(&mut self, persona: &str) -> EntityId {
        match self.run(persona, Request::CreatePlayer).unwrap() {
            Reply::PlayerCreated { entity } => entity,
            other => panic!("unexpected reply {other:?}"),
        }
    }

    pub fn pet(&mut self, persona: &str, nickname: &str) -> EntityId {
        let request = Request::CreatePet {
            nickname: nickname.to_owned(),
        };
        match self.run(persona, request).unwrap() {
            Reply::PetCreated { entity } => entity,
            other => panic!("unexpected reply {other:?}"),
        }
    }

    pub fn buy(&mut self, persona: &str, item: &str) {
        self.run(
            persona,
            Request::BuyItem {
                item: item.to_owned(),
            },
        )
        .unwrap();
    }

    pub fn component<T: Component>(&self, entity: EntityId) -> T {
        self.world.get_component::<T>(entity).unwrap().clone()
    }
}
