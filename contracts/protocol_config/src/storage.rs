//! Instance-storage helpers for the policy store.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::ProtocolParams;

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Address of the role directory used for the governor gate.
    Registry,
    /// The parameter bundle.
    Params,
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Params)
}

pub fn set_registry(env: &Env, registry: &Address) {
    env.storage().instance().set(&DataKey::Registry, registry);
    bump_instance(env);
}

pub fn registry(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Registry)
}

pub fn set_params(env: &Env, params: &ProtocolParams) {
    env.storage().instance().set(&DataKey::Params, params);
    bump_instance(env);
}

pub fn params(env: &Env) -> Option<ProtocolParams> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Params)
}
