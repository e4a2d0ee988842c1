use soroban_sdk::auth::{Context, CustomAccountInterface};
use soroban_sdk::crypto::Hash;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::xdr;
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, Address, Env, IntoVal, Map, Symbol, Val,
    Vec,
};

use vesting_vault::{VestingVault, VestingVaultClient};

#[contract]
struct MultisigAccount;

#[contracttype]
enum MultisigDataKey {
    Signers,
    Threshold,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum MultisigError {
    ThresholdNotMet = 1,
    InvalidContext = 2,
}

#[contractimpl]
impl MultisigAccount {
    pub fn init(env: Env, signers: Vec<Address>, threshold: u32) {
        env.storage()
            .instance()
            .set(&MultisigDataKey::Signers, &signers);
        env.storage()
            .instance()
            .set(&MultisigDataKey::Threshold, &threshold);
    }
}

#[contractimpl]
impl CustomAccountInterface for MultisigAccount {
    type Signature = Vec<Address>;
    type Error = MultisigError;

    fn __check_auth(
        env: Env,
        _signature_payload: Hash<32>,
        signatures: Vec<Address>,
        auth_contexts: Vec<Context>,
    ) -> Result<(), Self::Error> {
        let allowed: Vec<Address> = env
            .storage()
            .instance()
            .get(&MultisigDataKey::Signers)
            .unwrap_or(Vec::new(&env));
        let threshold: u32 = env
            .storage()
            .instance()
            .get(&MultisigDataKey::Threshold)
            .unwrap_or(0);

        let mut allowed_map: Map<Address, bool> = Map::new(&env);
        for addr in allowed.iter() {
            allowed_map.set(addr, true);
        }

        let mut seen: Map<Address, bool> = Map::new(&env);
        let mut approvals: u32 = 0;
        for signer in signatures.iter() {
            if allowed_map.get(signer.clone()).unwrap_or(false)
                && !seen.get(signer.clone()).unwrap_or(false)
            {
                seen.set(signer.clone(), true);
                approvals += 1;
            }
        }
        if approvals < threshold {
            return Err(MultisigError::ThresholdNotMet);
        }

        // Only vault administration calls may be authorized by the treasury.
        let grant_fn = Symbol::new(&env, "add_token_grant");
        let revoke_fn = Symbol::new(&env, "revoke_token_grant");
        for ctx in auth_contexts.iter() {
            match ctx {
                Context::Contract(contract_ctx)
                    if contract_ctx.fn_name == grant_fn || contract_ctx.fn_name == revoke_fn => {}
                _ => return Err(MultisigError::InvalidContext),
            }
        }

        Ok(())
    }
}

fn auth_entry_for_multisig(
    env: &Env,
    authorizer: &Address,
    contract: &Address,
    fn_name: &str,
    args: Vec<Val>,
    signature: xdr::ScVal,
    nonce: i64,
) -> xdr::SorobanAuthorizationEntry {
    let root_invocation = xdr::SorobanAuthorizedInvocation {
        function: xdr::SorobanAuthorizedFunction::ContractFn(xdr::InvokeContractArgs {
            contract_address: contract.clone().try_into().unwrap(),
            function_name: fn_name.try_into().unwrap(),
            args: args.try_into().unwrap(),
        }),
        sub_invocations: std::vec::Vec::<xdr::SorobanAuthorizedInvocation>::new()
            .try_into()
            .unwrap(),
    };

    xdr::SorobanAuthorizationEntry {
        root_invocation,
        credentials: xdr::SorobanCredentials::Address(xdr::SorobanAddressCredentials {
            address: authorizer.try_into().unwrap(),
            nonce,
            signature_expiration_ledger: env.ledger().sequence() + 1000,
            signature,
        }),
    }
}

fn signatures_scval(signers: &[Address]) -> xdr::ScVal {
    let mut sig_vals: std::vec::Vec<xdr::ScVal> = std::vec::Vec::with_capacity(signers.len());
    for signer in signers {
        sig_vals.push(xdr::ScVal::Address(signer.try_into().unwrap()));
    }
    xdr::ScVal::Vec(Some(sig_vals.try_into().unwrap()))
}

struct Treasury {
    multisig_id: Address,
    signers: std::vec::Vec<Address>,
    vault_id: Address,
    vault: VestingVaultClient<'static>,
    token: TokenClient<'static>,
}

/// A vault administered by a `threshold`-of-`signer_count` multisig account
/// that already funded and approved the vault.
fn treasury_vault(env: &Env, signer_count: usize, threshold: u32) -> Treasury {
    env.ledger().set_sequence_number(1);
    env.ledger().set_timestamp(1_000);
    env.mock_all_auths();

    let multisig_id = env.register(MultisigAccount, ());
    let multisig_client = MultisigAccountClient::new(env, &multisig_id);

    let mut signers = std::vec::Vec::new();
    let mut signer_vec = Vec::new(env);
    for _ in 0..signer_count {
        let signer = Address::generate(env);
        signer_vec.push_back(signer.clone());
        signers.push(signer);
    }
    multisig_client.init(&signer_vec, &threshold);

    let token_id = env.register_stellar_asset_contract_v2(Address::generate(env));
    StellarAssetClient::new(env, &token_id.address()).mint(&multisig_id, &1_000_000i128);
    let token = TokenClient::new(env, &token_id.address());

    let vault_id = env.register(VestingVault, ());
    let vault = VestingVaultClient::new(env, &vault_id);
    vault.initialize(&multisig_id, &token_id.address(), &None);
    token.approve(&multisig_id, &vault_id, &1_000_000i128, &10_000u32);

    Treasury {
        multisig_id,
        signers,
        vault_id,
        vault,
        token,
    }
}

fn authorize_grant(
    env: &Env,
    t: &Treasury,
    beneficiary: &Address,
    amount: i128,
    duration: u32,
    cliff: u32,
    signers: &[Address],
) {
    let args: Vec<Val> = (
        t.multisig_id.clone(),
        beneficiary.clone(),
        amount,
        duration,
        cliff,
    )
        .into_val(env);
    let entry = auth_entry_for_multisig(
        env,
        &t.multisig_id,
        &t.vault_id,
        "add_token_grant",
        args,
        signatures_scval(signers),
        1,
    );
    env.set_auths(&[entry]);
}

#[test]
fn add_grant_succeeds_with_multisig_admin_threshold_met() {
    let env = Env::default();
    let t = treasury_vault(&env, 3, 2);

    let beneficiary = Address::generate(&env);
    let (amount, duration, cliff) = (1_000i128, 10u32, 0u32);
    authorize_grant(
        &env,
        &t,
        &beneficiary,
        amount,
        duration,
        cliff,
        &[t.signers[0].clone(), t.signers[1].clone()],
    );

    t.vault
        .add_token_grant(&t.multisig_id, &beneficiary, &amount, &duration, &cliff);
    assert_eq!(t.vault.get_grant_amount(&beneficiary), amount);
    assert_eq!(t.token.balance(&t.vault_id), amount);
}

#[test]
fn add_grant_rejected_when_multisig_threshold_not_met() {
    let env = Env::default();
    let t = treasury_vault(&env, 2, 2);

    let beneficiary = Address::generate(&env);
    let (amount, duration, cliff) = (1_000i128, 10u32, 0u32);

    // Only one signer provided, but threshold is 2.
    authorize_grant(
        &env,
        &t,
        &beneficiary,
        amount,
        duration,
        cliff,
        &[t.signers[0].clone()],
    );

    let result = t
        .vault
        .try_add_token_grant(&t.multisig_id, &beneficiary, &amount, &duration, &cliff);
    assert!(result.is_err());
    assert!(!t.vault.has_grant(&beneficiary));
    assert_eq!(t.token.balance(&t.vault_id), 0);
}

#[test]
fn repeated_signer_counts_once() {
    let env = Env::default();
    let t = treasury_vault(&env, 3, 2);

    let beneficiary = Address::generate(&env);
    let (amount, duration, cliff) = (1_000i128, 10u32, 0u32);
    authorize_grant(
        &env,
        &t,
        &beneficiary,
        amount,
        duration,
        cliff,
        &[t.signers[0].clone(), t.signers[0].clone()],
    );

    let result = t
        .vault
        .try_add_token_grant(&t.multisig_id, &beneficiary, &amount, &duration, &cliff);
    assert!(result.is_err());
    assert!(!t.vault.has_grant(&beneficiary));
    assert_eq!(t.token.balance(&t.vault_id), 0);
}
