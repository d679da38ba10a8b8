use critter_ecs::component::Component;
use critter_ecs::entity::EntityId;
use serde::{Deserialize, Serialize};

/// An entry in a player's ownership list: the pet entity and the nickname
/// it was registered under. The nickname outlives the entity, so a removed
/// pet can still be named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetRef {
    pub entity: EntityId,
    pub nickname: String,
}

/// A player account.
///
/// `pets` is the authoritative ownership list. `items` holds catalog item
/// entities the player has bought and not yet used; a name may appear more
/// than once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub persona_tag: String,
    pub pets: Vec<PetRef>,
    pub items: Vec<EntityId>,
    pub money: f64,
}

impl Component for Player {
    const NAME: &'static str = "player";
}

impl Player {
    pub fn new(persona_tag: &str, money: f64) -> Self {
        Self {
            persona_tag: persona_tag.to_owned(),
            pets: Vec::new(),
            items: Vec::new(),
            money,
        }
    }

    pub fn owns(&self, pet: EntityId) -> bool {
        self.pets.iter().any(|r| r.entity == pet)
    }

    pub fn adopt(&mut self, pet: EntityId, nickname: &str) {
        self.pets.push(PetRef {
            entity: pet,
            nickname: nickname.to_owned(),
        });
    }

    pub fn pet_ids(&self) -> Vec<EntityId> {
        self.pets.iter().map(|r| r.entity).collect()
    }

    /// Remove the first occurrence of `item`. Returns `false` if absent.
    pub fn take_item(&mut self, item: EntityId) -> bool {
        match self.items.iter().position(|held| *held == item) {
            Some(pos) => {
                self.items.remove(pos);
                true
            }
            None => false,
        }
    }
}
