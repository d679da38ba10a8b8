use critter_ecs::prelude::*;
use tracing::debug;

use super::lookup::{self, ensure_balance};
use super::{ActionContext, ActionError, ActionKind, Reply};

/// Buy one unit of a catalog item. The store keeps its entry; the buyer
/// gets a reference to the same item entity.
pub(super) fn buy_item(ctx: &mut ActionContext<'_>, persona_tag: &str, item: &str) -> Result<Reply, ActionError> {
    let world: &World = ctx.world;
    let (player_id, player) = lookup::player(world, persona_tag)?;
    let (item_id, listing) = lookup::catalog_item(world, ctx.handles, item)?;
    ensure_balance(player, listing.price)?;

    let mut buyer = player.clone();
    buyer.money -= listing.price;
    buyer.items.push(item_id);
    debug!(persona = %persona_tag, item = %item, price = listing.price, balance = buyer.money, "item bought");

    let kind = ActionKind::BuyItem;
    ctx.cmds.set(
        player_id,
        &buyer,
        kind.system_id(),
        CausalReason::PlayerInput(kind.to_string()),
    )?;
    Ok(Reply::Bought { entity: item_id })
}
