use soroban_sdk::{symbol_short, Address, Env, Symbol};

pub const EVENT_INIT: Symbol = symbol_short!("init");
pub const EVENT_GRANT_ADDED: Symbol = symbol_short!("grant_add");
pub const EVENT_CLAIMED: Symbol = symbol_short!("claimed");
pub const EVENT_GRANT_REVOKED: Symbol = symbol_short!("grant_rev");
pub const EVENT_ADMIN_PROPOSED: Symbol = symbol_short!("adm_prop");
pub const EVENT_ADMIN_ACCEPTED: Symbol = symbol_short!("adm_acc");

pub fn initialized(env: &Env, admin: &Address, token: &Address) {
    env.events()
        .publish((EVENT_INIT, admin.clone()), token.clone());
}

pub fn grant_added(env: &Env, recipient: &Address, amount: i128) {
    env.events()
        .publish((EVENT_GRANT_ADDED, recipient.clone()), amount);
}

pub fn tokens_claimed(env: &Env, recipient: &Address, amount_claimed: i128) {
    env.events()
        .publish((EVENT_CLAIMED, recipient.clone()), amount_claimed);
}

pub fn grant_revoked(
    env: &Env,
    recipient: &Address,
    amount_vested: i128,
    amount_not_vested: i128,
) {
    env.events().publish(
        (EVENT_GRANT_REVOKED, recipient.clone()),
        (amount_vested, amount_not_vested),
    );
}

pub fn admin_proposed(env: &Env, admin: &Address, candidate: &Address) {
    env.events()
        .publish((EVENT_ADMIN_PROPOSED, admin.clone()), candidate.clone());
}

pub fn admin_accepted(env: &Env, new_admin: &Address) {
    env.events()
        .publish((EVENT_ADMIN_ACCEPTED,), new_admin.clone());
}
