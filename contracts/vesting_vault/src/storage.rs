use soroban_sdk::{contracttype, Address, Env};

use crate::error::VaultError;
use crate::vesting::{TokenGrant, VestingPolicy};

const DAY_IN_LEDGERS: u32 = 17_280;
const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
const GRANT_BUMP_AMOUNT: u32 = 120 * DAY_IN_LEDGERS;
const GRANT_LIFETIME_THRESHOLD: u32 = GRANT_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// Vault configuration lives in instance storage, grants in persistent storage.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    PendingAdmin,
    Token,
    Policy,
    Grant(Address),
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn write_config(env: &Env, admin: &Address, token: &Address, policy: &VestingPolicy) {
    let instance = env.storage().instance();
    instance.set(&DataKey::Admin, admin);
    instance.set(&DataKey::Token, token);
    instance.set(&DataKey::Policy, policy);
}

pub fn read_admin(env: &Env) -> Result<Address, VaultError> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(VaultError::NotInitialized)
}

pub fn write_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
}

pub fn read_pending_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::PendingAdmin)
}

pub fn write_pending_admin(env: &Env, candidate: &Address) {
    env.storage().instance().set(&DataKey::PendingAdmin, candidate);
}

pub fn clear_pending_admin(env: &Env) {
    env.storage().instance().remove(&DataKey::PendingAdmin);
}

pub fn read_token(env: &Env) -> Result<Address, VaultError> {
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(VaultError::NotInitialized)
}

pub fn read_policy(env: &Env) -> Result<VestingPolicy, VaultError> {
    env.storage()
        .instance()
        .get(&DataKey::Policy)
        .ok_or(VaultError::NotInitialized)
}

// ---------------------------------------------------------------------------
// Grant registry
// ---------------------------------------------------------------------------

pub fn has_grant(env: &Env, recipient: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Grant(recipient.clone()))
}

pub fn read_grant(env: &Env, recipient: &Address) -> Result<TokenGrant, VaultError> {
    let key = DataKey::Grant(recipient.clone());
    let grant: TokenGrant = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(VaultError::GrantNotFound)?;
    env.storage()
        .persistent()
        .extend_ttl(&key, GRANT_LIFETIME_THRESHOLD, GRANT_BUMP_AMOUNT);
    Ok(grant)
}

pub fn write_grant(env: &Env, grant: &TokenGrant) {
    let key = DataKey::Grant(grant.recipient.clone());
    env.storage().persistent().set(&key, grant);
    env.storage()
        .persistent()
        .extend_ttl(&key, GRANT_LIFETIME_THRESHOLD, GRANT_BUMP_AMOUNT);
}

pub fn remove_grant(env: &Env, recipient: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Grant(recipient.clone()));
}
