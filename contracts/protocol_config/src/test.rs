extern crate std;

use soroban_sdk::{testutils::Address as _, vec, Address, Env};

use crate::{Error, ProtocolConfig, ProtocolConfigClient, ProtocolParams};

fn sample_params() -> ProtocolParams {
    ProtocolParams {
        min_champion_stake: 10_000,
        max_warmup_period: 86_400,
        max_follower_onboard_period: 86_400,
        min_follower_deposit: 1,
        max_follower_deposit: 1_000_000,
        stake_per_ticket: 500,
        asset_utilization_ratio: 1_000_000,
        gas_utilization_ratio: 50_000,
        platform_stake_ratio: 100_000,
        max_usd_allocation_per_ticket: 500_0000_0000,
        reward_token_supply: 1_000_000_000,
        percent_precision: 1_000_000,
    }
}

fn setup() -> (Env, ProtocolConfigClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let registry_id = env.register(access_registry::AccessRegistry, ());
    let registry = access_registry::AccessRegistryClient::new(&env, &registry_id);
    let governor = Address::generate(&env);
    registry.init(&governor, &vec![&env]);

    let config_id = env.register(ProtocolConfig, ());
    let client = ProtocolConfigClient::new(&env, &config_id);
    client.init(&registry_id, &sample_params());
    (env, client, governor)
}

#[test]
fn getters_return_initial_values() {
    let (_env, client, _governor) = setup();
    let params = sample_params();

    assert_eq!(client.params(), params);
    assert_eq!(client.min_champion_stake(), params.min_champion_stake);
    assert_eq!(client.max_warmup_period(), params.max_warmup_period);
    assert_eq!(client.stake_per_ticket(), params.stake_per_ticket);
    assert_eq!(
        client.asset_utilization_ratio(),
        params.asset_utilization_ratio
    );
    assert_eq!(client.gas_utilization_ratio(), params.gas_utilization_ratio);
    assert_eq!(client.reward_token_supply(), params.reward_token_supply);
    assert_eq!(client.percent_precision(), params.percent_precision);
}

#[test]
fn init_twice_fails() {
    let (env, client, _governor) = setup();
    let registry = Address::generate(&env);
    assert_eq!(
        client.try_init(&registry, &sample_params()),
        Err(Ok(Error::AlreadyInitialized.into()))
    );
}

#[test]
fn governor_setters_round_trip() {
    let (_env, client, governor) = setup();

    client.set_min_champion_stake(&governor, &42_000);
    assert_eq!(client.min_champion_stake(), 42_000);

    client.set_max_warmup_period(&governor, &7_200);
    assert_eq!(client.max_warmup_period(), 7_200);

    client.set_max_follower_onboard_period(&governor, &3_600);
    assert_eq!(client.max_follower_onboard_period(), 3_600);

    client.set_min_follower_deposit(&governor, &5);
    assert_eq!(client.min_follower_deposit(), 5);

    client.set_max_follower_deposit(&governor, &9_999);
    assert_eq!(client.max_follower_deposit(), 9_999);

    client.set_stake_per_ticket(&governor, &750);
    assert_eq!(client.stake_per_ticket(), 750);

    client.set_asset_utilization_ratio(&governor, &500_000);
    assert_eq!(client.asset_utilization_ratio(), 500_000);

    client.set_gas_utilization_ratio(&governor, &25_000);
    assert_eq!(client.gas_utilization_ratio(), 25_000);

    client.set_platform_stake_ratio(&governor, &200_000);
    assert_eq!(client.platform_stake_ratio(), 200_000);

    client.set_max_usd_alloc_per_ticket(&governor, &123);
    assert_eq!(client.max_usd_allocation_per_ticket(), 123);

    client.set_reward_token_supply(&governor, &777);
    assert_eq!(client.reward_token_supply(), 777);

    client.set_percent_precision(&governor, &10_000);
    assert_eq!(client.percent_precision(), 10_000);
}

#[test]
fn non_governor_cannot_set() {
    let (env, client, _governor) = setup();
    let outsider = Address::generate(&env);
    assert_eq!(
        client.try_set_min_champion_stake(&outsider, &1),
        Err(Ok(Error::NotAuthorized.into()))
    );
    assert_eq!(
        client.try_set_gas_utilization_ratio(&outsider, &1),
        Err(Ok(Error::NotAuthorized.into()))
    );
}

#[test]
fn percent_precision_must_be_positive() {
    let (_env, client, governor) = setup();
    assert_eq!(
        client.try_set_percent_precision(&governor, &0),
        Err(Ok(Error::InvalidArgument.into()))
    );
}
