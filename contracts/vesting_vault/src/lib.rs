#![no_std]

//! Custodial vesting vault.
//!
//! The administrator locks tokens into the vault as per-recipient grants that
//! vest monthly after an optional lock period. Recipients claim what has vested;
//! the administrator may revoke a grant, paying out the earned share and taking
//! back the rest.

use soroban_sdk::{contract, contractimpl, log, Address, Env, String};

mod custody;
mod error;
mod events;
mod storage;
mod vesting;

pub use error::VaultError;
pub use vesting::{
    GrantStatus, TokenGrant, VestingPolicy, DEFAULT_MAX_CLIFF_MONTHS,
    DEFAULT_MAX_DURATION_MONTHS, DEFAULT_MONTH_LENGTH,
};

#[contract]
pub struct VestingVault;

fn require_admin(env: &Env, caller: &Address) -> Result<(), VaultError> {
    caller.require_auth();
    let admin = storage::read_admin(env)?;
    if *caller != admin {
        log!(env, "rejected: caller is not the administrator", caller.clone());
        return Err(VaultError::Unauthorized);
    }
    Ok(())
}

fn reject<T>(env: &Env, err: VaultError) -> Result<T, VaultError> {
    log!(env, "rejected", String::from_str(env, err.reason()));
    Err(err)
}

#[contractimpl]
impl VestingVault {
    // -----------------------------------------------------------------------
    // Initialisation
    // -----------------------------------------------------------------------

    /// Binds the vault to its administrator and token. `policy` defaults to
    /// 30-day months with 120/300-month caps on cliff and duration.
    pub fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        policy: Option<VestingPolicy>,
    ) -> Result<(), VaultError> {
        if storage::is_initialized(&env) {
            return reject(&env, VaultError::AlreadyInitialized);
        }
        admin.require_auth();

        let policy = policy.unwrap_or_else(VestingPolicy::standard);
        policy.validate()?;

        storage::write_config(&env, &admin, &token, &policy);
        storage::bump_instance(&env);
        events::initialized(&env, &admin, &token);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Grants
    // -----------------------------------------------------------------------

    /// Locks `amount` from the administrator into a new grant for `recipient`.
    /// The administrator must have approved the vault for at least `amount`.
    pub fn add_token_grant(
        env: Env,
        admin: Address,
        recipient: Address,
        amount: i128,
        vesting_duration: u32,
        vesting_cliff: u32,
    ) -> Result<(), VaultError> {
        require_admin(&env, &admin)?;
        storage::bump_instance(&env);

        if storage::has_grant(&env, &recipient) {
            return reject(&env, VaultError::GrantAlreadyExists);
        }
        let policy = storage::read_policy(&env)?;
        if let Err(err) = policy.check_grant(amount, vesting_duration, vesting_cliff) {
            return reject(&env, err);
        }

        let token = storage::read_token(&env)?;
        custody::pull_into_custody(&env, &token, &admin, amount)?;

        let grant = TokenGrant::new(
            recipient.clone(),
            env.ledger().timestamp(),
            amount,
            vesting_duration,
            vesting_cliff,
        );
        storage::write_grant(&env, &grant);

        log!(
            &env,
            "grant added",
            recipient,
            amount,
            vesting_duration,
            vesting_cliff
        );
        events::grant_added(&env, &recipient, amount);
        Ok(())
    }

    /// Pays the recipient everything vested and not yet claimed.
    pub fn claim_vested_tokens(env: Env, recipient: Address) -> Result<i128, VaultError> {
        recipient.require_auth();
        storage::bump_instance(&env);

        let mut grant = storage::read_grant(&env, &recipient)?;
        if grant.is_fully_claimed() {
            return reject(&env, VaultError::GrantFullyClaimed);
        }

        let policy = storage::read_policy(&env)?;
        let now = env.ledger().timestamp();
        let claimable = grant.claimable_amount(&policy, now)?;
        if claimable <= 0 {
            return reject(&env, VaultError::NothingVested);
        }

        let token = storage::read_token(&env)?;
        custody::release_from_custody(&env, &token, &recipient, claimable);

        grant.record_claim(&policy, now, claimable);
        storage::write_grant(&env, &grant);

        log!(&env, "tokens claimed", recipient, claimable, grant.total_claimed);
        events::tokens_claimed(&env, &recipient, claimable);
        Ok(claimable)
    }

    /// Ends a grant early. Returns `(amount_vested, amount_not_vested)`: the
    /// earned-but-unclaimed share paid to the recipient and the remainder
    /// returned to the administrator.
    pub fn revoke_token_grant(
        env: Env,
        admin: Address,
        recipient: Address,
    ) -> Result<(i128, i128), VaultError> {
        require_admin(&env, &admin)?;
        storage::bump_instance(&env);

        let grant = storage::read_grant(&env, &recipient)?;
        let policy = storage::read_policy(&env)?;
        let vested = grant.vested_amount(&policy, env.ledger().timestamp())?;
        let amount_vested = vested - grant.total_claimed;
        let amount_not_vested = grant.amount - vested;

        let token = storage::read_token(&env)?;
        custody::release_from_custody(&env, &token, &recipient, amount_vested);
        custody::release_from_custody(&env, &token, &admin, amount_not_vested);

        storage::remove_grant(&env, &recipient);

        log!(
            &env,
            "grant revoked",
            recipient,
            amount_vested,
            amount_not_vested
        );
        events::grant_revoked(&env, &recipient, amount_vested, amount_not_vested);
        Ok((amount_vested, amount_not_vested))
    }

    // -----------------------------------------------------------------------
    // Administrator hand-over
    // -----------------------------------------------------------------------

    /// First step of a two-step administrator transfer.
    pub fn propose_admin(env: Env, admin: Address, new_admin: Address) -> Result<(), VaultError> {
        require_admin(&env, &admin)?;
        storage::write_pending_admin(&env, &new_admin);
        storage::bump_instance(&env);
        events::admin_proposed(&env, &admin, &new_admin);
        Ok(())
    }

    /// Second step: the proposed administrator takes over.
    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), VaultError> {
        new_admin.require_auth();
        storage::read_admin(&env)?;

        let pending = match storage::read_pending_admin(&env) {
            Some(pending) => pending,
            None => return reject(&env, VaultError::NoPendingAdmin),
        };
        if pending != new_admin {
            return reject(&env, VaultError::Unauthorized);
        }

        storage::write_admin(&env, &new_admin);
        storage::clear_pending_admin(&env);
        storage::bump_instance(&env);
        events::admin_accepted(&env, &new_admin);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // View helpers
    // -----------------------------------------------------------------------

    pub fn get_admin(env: Env) -> Result<Address, VaultError> {
        storage::read_admin(&env)
    }

    pub fn get_pending_admin(env: Env) -> Option<Address> {
        storage::read_pending_admin(&env)
    }

    pub fn get_token(env: Env) -> Result<Address, VaultError> {
        storage::read_token(&env)
    }

    pub fn get_policy(env: Env) -> Result<VestingPolicy, VaultError> {
        storage::read_policy(&env)
    }

    /// Tokens currently held by the vault across all grants.
    pub fn custody_balance(env: Env) -> Result<i128, VaultError> {
        let token = storage::read_token(&env)?;
        Ok(custody::custody_balance(&env, &token))
    }

    pub fn has_grant(env: Env, recipient: Address) -> bool {
        storage::has_grant(&env, &recipient)
    }

    pub fn get_grant(env: Env, recipient: Address) -> Result<TokenGrant, VaultError> {
        storage::read_grant(&env, &recipient)
    }

    pub fn get_grant_amount(env: Env, recipient: Address) -> Result<i128, VaultError> {
        Ok(storage::read_grant(&env, &recipient)?.amount)
    }

    pub fn get_grant_start_time(env: Env, recipient: Address) -> Result<u64, VaultError> {
        Ok(storage::read_grant(&env, &recipient)?.start_time)
    }

    /// Amount vested by instant `at`, claimed or not.
    pub fn vested_amount(env: Env, recipient: Address, at: u64) -> Result<i128, VaultError> {
        let grant = storage::read_grant(&env, &recipient)?;
        grant.vested_amount(&storage::read_policy(&env)?, at)
    }

    pub fn claimable_amount(env: Env, recipient: Address, at: u64) -> Result<i128, VaultError> {
        let grant = storage::read_grant(&env, &recipient)?;
        grant.claimable_amount(&storage::read_policy(&env)?, at)
    }

    /// Amount a revocation at `at` would return to the administrator.
    pub fn unvested_amount(env: Env, recipient: Address, at: u64) -> Result<i128, VaultError> {
        let grant = storage::read_grant(&env, &recipient)?;
        grant.unvested_amount(&storage::read_policy(&env)?, at)
    }

    pub fn grant_status(env: Env, recipient: Address) -> Result<GrantStatus, VaultError> {
        let grant = storage::read_grant(&env, &recipient)?;
        grant.status(&storage::read_policy(&env)?, env.ledger().timestamp())
    }
}
