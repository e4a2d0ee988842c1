//! Token movements in and out of the vault's custody.

use soroban_sdk::{log, token, Address, Env};

use crate::error::VaultError;

/// Pulls `amount` from `from` into the vault using the allowance `from`
/// granted to the vault. Nothing is moved if the token rejects the transfer.
pub fn pull_into_custody(
    env: &Env,
    token: &Address,
    from: &Address,
    amount: i128,
) -> Result<(), VaultError> {
    let vault = env.current_contract_address();
    let client = token::Client::new(env, token);
    match client.try_transfer_from(&vault, from, &vault, &amount) {
        Ok(Ok(_)) => Ok(()),
        _ => {
            log!(env, "custody pull rejected by token", from.clone(), amount);
            Err(VaultError::InsufficientFunds)
        }
    }
}

/// Pays `amount` out of custody. A zero amount is a no-op.
pub fn release_from_custody(env: &Env, token: &Address, to: &Address, amount: i128) {
    if amount <= 0 {
        return;
    }
    token::Client::new(env, token).transfer(&env.current_contract_address(), to, &amount);
}

pub fn custody_balance(env: &Env, token: &Address) -> i128 {
    token::Client::new(env, token).balance(&env.current_contract_address())
}
