use critter_ecs::entity::EntityId;
use critter_ecs::EcsError;

use super::ActionKind;
use crate::components::ActivityKind;

/// Broad class of an action failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A referenced player, pet or item does not exist.
    NotFound,
    /// The request is well formed but the world state forbids it.
    Precondition,
    /// The request itself is malformed.
    Validation,
    /// The entity store refused an access the action relied on.
    Store,
}

/// Why an action was rejected. A rejected action leaves the world untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActionError {
    #[error("player not found")]
    PlayerNotFound { persona_tag: String },

    #[error("pet not found")]
    PetNotFound { nickname: String },

    /// The player's pet list still names an entity that has been removed.
    #[error("pet not found: {nickname} resolves to removed entity {entity}")]
    StalePetReference { nickname: String, entity: EntityId },

    #[error("item not found")]
    ItemNotFound { item: String },

    #[error("pet is already engaged in an activity")]
    PetBusy { nickname: String, activity: ActivityKind },

    #[error("pet energy is insufficient")]
    InsufficientEnergy { nickname: String, energy: u32, cost: u32 },

    #[error("no enough balance")]
    InsufficientBalance { balance: f64, price: f64 },

    #[error("nickname already exists")]
    DuplicateNickname { nickname: String },

    #[error("player already exists")]
    DuplicatePlayer { persona_tag: String },

    #[error("pet max level reached, can't grow more")]
    MaxLevel { nickname: String, level: u32 },

    #[error("mother and father have the same gender")]
    SameGender { mother: String, father: String },

    #[error("you are not the owner of {nickname}")]
    NotOwner { nickname: String },

    #[error("item {item} cannot be used to {action}")]
    ItemNotUsable { item: String, action: ActionKind },

    #[error("invalid nickname {nickname:?}: {reason}")]
    InvalidNickname { nickname: String, reason: &'static str },

    #[error("invalid persona tag {persona_tag:?}: {reason}")]
    InvalidPersonaTag { persona_tag: String, reason: &'static str },

    #[error(transparent)]
    Store(#[from] EcsError),
}

impl ActionError {
    pub fn category(&self) -> ErrorCategory {
        use ActionError::*;
        match self {
            PlayerNotFound { .. } | PetNotFound { .. } | StalePetReference { .. } | ItemNotFound { .. } => {
                ErrorCategory::NotFound
            }
            PetBusy { .. }
            | InsufficientEnergy { .. }
            | InsufficientBalance { .. }
            | DuplicateNickname { .. }
            | DuplicatePlayer { .. }
            | MaxLevel { .. }
            | SameGender { .. }
            | NotOwner { .. }
            | ItemNotUsable { .. } => ErrorCategory::Precondition,
            InvalidNickname { .. } | InvalidPersonaTag { .. } => ErrorCategory::Validation,
            Store(_) => ErrorCategory::Store,
        }
    }
}
