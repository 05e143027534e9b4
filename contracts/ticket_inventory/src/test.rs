extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, Env, IntoVal, TryIntoVal,
};

use crate::events::TicketMinted;
use crate::{Error, TicketInventory, TicketInventoryClient};

struct Setup {
    env: Env,
    client: TicketInventoryClient<'static>,
    governor: Address,
    operator: Address,
    escrow: Address,
}

fn setup() -> Setup {
    let env = Env::default();
    env.mock_all_auths();

    let registry_id = env.register(access_registry::AccessRegistry, ());
    let registry = access_registry::AccessRegistryClient::new(&env, &registry_id);
    let governor = Address::generate(&env);
    let operator = Address::generate(&env);
    registry.init(&governor, &vec![&env, operator.clone()]);

    let escrow = Address::generate(&env);
    let contract_id = env.register(TicketInventory, ());
    let client = TicketInventoryClient::new(&env, &contract_id);
    client.init(&registry_id, &escrow, &50);

    Setup {
        env,
        client,
        governor,
        operator,
        escrow,
    }
}

#[test]
fn init_twice_fails() {
    let s = setup();
    let registry = Address::generate(&s.env);
    let escrow = Address::generate(&s.env);
    assert_eq!(
        s.client.try_init(&registry, &escrow, &50),
        Err(Ok(Error::AlreadyInitialized.into()))
    );
}

#[test]
fn mint_credits_escrow_and_emits() {
    let s = setup();
    s.client.mint(&s.operator, &1, &20, &7);
    let last_event = s.env.events().all().last().unwrap();

    assert_eq!(s.client.last_minted_id(), 1);
    assert_eq!(s.client.supply(&1), 20);
    assert_eq!(s.client.balance(&s.escrow, &1), 20);
    assert_eq!(s.client.champion_ticket_ids(&7), vec![&s.env, 1]);

    assert_eq!(last_event.0, s.client.address);
    assert_eq!(
        last_event.1,
        vec![
            &s.env,
            symbol_short!("nft_mint").into_val(&s.env),
            1u64.into_val(&s.env),
        ]
    );
    let payload: TicketMinted = last_event.2.try_into_val(&s.env).unwrap();
    assert_eq!(
        payload,
        TicketMinted {
            ticket_id: 1,
            champion_id: 7,
            initial_supply: 20,
        }
    );
}

#[test]
fn mint_enforces_sequential_ids() {
    let s = setup();
    assert_eq!(
        s.client.try_mint(&s.operator, &2, &10, &7),
        Err(Ok(Error::InvalidSequence.into()))
    );
    s.client.mint(&s.operator, &1, &10, &7);
    // Re-minting an issued id is also out of sequence.
    assert_eq!(
        s.client.try_mint(&s.operator, &1, &10, &7),
        Err(Ok(Error::InvalidSequence.into()))
    );
    s.client.mint(&s.operator, &2, &10, &8);
    assert_eq!(s.client.last_minted_id(), 2);
}

#[test]
fn mint_respects_global_cap() {
    let s = setup();
    assert_eq!(
        s.client.try_mint(&s.operator, &1, &51, &7),
        Err(Ok(Error::SupplyExceeded.into()))
    );
    assert_eq!(
        s.client.try_mint(&s.operator, &1, &0, &7),
        Err(Ok(Error::SupplyExceeded.into()))
    );
}

#[test]
fn only_operator_mints() {
    let s = setup();
    let outsider = Address::generate(&s.env);
    assert_eq!(
        s.client.try_mint(&outsider, &1, &10, &7),
        Err(Ok(Error::NotAuthorized.into()))
    );
    // The governor role does not imply the operator role.
    assert_eq!(
        s.client.try_mint(&s.governor, &1, &10, &7),
        Err(Ok(Error::NotAuthorized.into()))
    );
}

#[test]
fn add_supply_grows_within_cap() {
    let s = setup();
    s.client.mint(&s.operator, &1, &20, &7);

    s.client.add_supply(&s.operator, &1, &10);
    assert_eq!(s.client.supply(&1), 30);
    assert_eq!(s.client.balance(&s.escrow, &1), 30);

    // 30 + 21 would exceed the cap of 50.
    assert_eq!(
        s.client.try_add_supply(&s.operator, &1, &21),
        Err(Ok(Error::SupplyExceeded.into()))
    );
    assert_eq!(
        s.client.try_add_supply(&s.operator, &2, &1),
        Err(Ok(Error::NotFound.into()))
    );
}

#[test]
fn ticket_cap_cannot_drop_below_supply() {
    let s = setup();
    s.client.mint(&s.operator, &1, &20, &7);

    s.client.set_ticket_cap(&s.operator, &1, &25);
    assert_eq!(s.client.ticket_cap(&1), 25);
    assert_eq!(
        s.client.try_add_supply(&s.operator, &1, &6),
        Err(Ok(Error::SupplyExceeded.into()))
    );

    assert_eq!(
        s.client.try_set_ticket_cap(&s.operator, &1, &19),
        Err(Ok(Error::SupplyExceeded.into()))
    );
}

#[test]
fn governor_adjusts_global_cap() {
    let s = setup();
    s.client.set_max_supply_per_ticket(&s.governor, &5);
    assert_eq!(s.client.max_supply_per_ticket(), 5);
    assert_eq!(
        s.client.try_mint(&s.operator, &1, &6, &7),
        Err(Ok(Error::SupplyExceeded.into()))
    );

    assert_eq!(
        s.client.try_set_max_supply_per_ticket(&s.operator, &10),
        Err(Ok(Error::NotAuthorized.into()))
    );
    assert_eq!(
        s.client.try_set_max_supply_per_ticket(&s.governor, &0),
        Err(Ok(Error::InvalidArgument.into()))
    );
}

#[test]
fn transfer_moves_balances() {
    let s = setup();
    s.client.mint(&s.operator, &1, &20, &7);

    let holder = Address::generate(&s.env);
    s.client.transfer(&s.escrow, &holder, &1, &8);
    assert_eq!(s.client.balance(&s.escrow, &1), 12);
    assert_eq!(s.client.balance(&holder, &1), 8);

    assert_eq!(
        s.client.try_transfer(&holder, &s.escrow, &1, &9),
        Err(Ok(Error::InsufficientBalance.into()))
    );
    assert_eq!(
        s.client.try_transfer(&holder, &s.escrow, &1, &0),
        Err(Ok(Error::InvalidArgument.into()))
    );
    assert_eq!(
        s.client.try_transfer(&holder, &s.escrow, &2, &1),
        Err(Ok(Error::NotFound.into()))
    );
}

#[test]
fn ticket_read_fails_for_unknown_id() {
    let s = setup();
    assert_eq!(s.client.try_supply(&9), Err(Ok(Error::NotFound.into())));
    assert_eq!(s.client.champion_ticket_ids(&9), vec![&s.env]);
}
