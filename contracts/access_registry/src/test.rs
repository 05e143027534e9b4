extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, Env, IntoVal, TryIntoVal,
};

use crate::events::RoleGranted;
use crate::{AccessRegistry, AccessRegistryClient, Error};

fn setup() -> (Env, AccessRegistryClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(AccessRegistry, ());
    let client = AccessRegistryClient::new(&env, &contract_id);
    let governor = Address::generate(&env);
    let operator = Address::generate(&env);
    client.init(&governor, &vec![&env, operator.clone()]);
    (env, client, governor, operator)
}

#[test]
fn init_sets_roles() {
    let (_env, client, governor, operator) = setup();
    assert!(client.is_governor(&governor));
    assert!(client.is_operator(&operator));
    assert!(!client.is_operator(&governor));
    assert_eq!(client.governor(), governor);
}

#[test]
fn init_twice_fails() {
    let (env, client, governor, _operator) = setup();
    let other = Address::generate(&env);
    assert_eq!(
        client.try_init(&governor, &vec![&env, other]),
        Err(Ok(Error::AlreadyInitialized.into()))
    );
}

#[test]
fn only_governor_manages_operators() {
    let (env, client, _governor, operator) = setup();
    let outsider = Address::generate(&env);
    let candidate = Address::generate(&env);

    assert_eq!(
        client.try_add_operator(&outsider, &candidate),
        Err(Ok(Error::NotAuthorized.into()))
    );
    // An operator is not a governor either.
    assert_eq!(
        client.try_add_operator(&operator, &candidate),
        Err(Ok(Error::NotAuthorized.into()))
    );
    assert!(!client.is_operator(&candidate));
}

#[test]
fn add_and_remove_operator() {
    let (env, client, governor, _operator) = setup();
    let candidate = Address::generate(&env);

    client.add_operator(&governor, &candidate);
    let last_event = env.events().all().last().unwrap();
    assert!(client.is_operator(&candidate));

    assert_eq!(last_event.0, client.address);
    assert_eq!(
        last_event.1,
        vec![
            &env,
            symbol_short!("role_set").into_val(&env),
            candidate.clone().into_val(&env),
        ]
    );
    let payload: RoleGranted = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        payload,
        RoleGranted {
            by: governor.clone(),
            target: candidate.clone(),
        }
    );

    client.remove_operator(&governor, &candidate);
    assert!(!client.is_operator(&candidate));
}

#[test]
fn transfer_governor_moves_role() {
    let (env, client, governor, _operator) = setup();
    let successor = Address::generate(&env);

    client.transfer_governor(&governor, &successor);
    assert!(client.is_governor(&successor));
    assert!(!client.is_governor(&governor));

    // The old governor can no longer mutate roles.
    let candidate = Address::generate(&env);
    assert_eq!(
        client.try_add_operator(&governor, &candidate),
        Err(Ok(Error::NotAuthorized.into()))
    );
}

#[test]
fn governor_read_requires_init() {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(AccessRegistry, ());
    let client = AccessRegistryClient::new(&env, &contract_id);
    assert_eq!(client.try_governor(), Err(Ok(Error::NotInitialized.into())));
}
