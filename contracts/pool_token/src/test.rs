extern crate std;

use soroban_sdk::{
    contract, contractimpl, symbol_short,
    testutils::{Address as _, Events},
    vec, Address, Env, IntoVal, String, TryIntoVal, Val, Vec,
};

use crate::events::{TokensClaimed, Transfer};
use crate::{Error, PoolToken, PoolTokenClient};

const POOL_ID: u64 = 9;
const SUPPLY: i128 = 1_000_000_000;

/// Minimal stand-in for the pool manager's directory surface.
#[contract]
pub struct MockDirectory;

#[contractimpl]
impl MockDirectory {
    pub fn set_deposit(env: Env, user: Address, amount: i128) {
        env.storage().instance().set(&user, &amount);
    }

    pub fn subscription_amount(env: Env, _pool_id: u64, user: Address) -> i128 {
        env.storage().instance().get(&user).unwrap_or(0)
    }
}

struct Setup {
    env: Env,
    client: PoolTokenClient<'static>,
    directory: MockDirectoryClient<'static>,
}

fn setup(deposit_total: i128) -> Setup {
    let env = Env::default();
    env.mock_all_auths();

    let directory_id = env.register(MockDirectory, ());
    let directory = MockDirectoryClient::new(&env, &directory_id);

    let token_id = env.register(PoolToken, ());
    let client = PoolTokenClient::new(&env, &token_id);
    client.init_token(
        &directory_id,
        &POOL_ID,
        &String::from_str(&env, "Pool Nine"),
        &String::from_str(&env, "PNINE"),
        &SUPPLY,
        &deposit_total,
    );

    Setup {
        env,
        client,
        directory,
    }
}

fn own_events(s: &Setup) -> Vec<(Address, Vec<Val>, Val)> {
    let mut out = Vec::new(&s.env);
    for event in s.env.events().all().iter() {
        if event.0 == s.client.address {
            out.push_back(event);
        }
    }
    out
}

#[test]
fn init_token_mints_once() {
    let s = setup(1_000);
    assert_eq!(s.client.total_supply(), SUPPLY);
    assert_eq!(s.client.balance(&s.client.address), SUPPLY);
    assert_eq!(s.client.name(), String::from_str(&s.env, "Pool Nine"));
    assert_eq!(s.client.symbol(), String::from_str(&s.env, "PNINE"));
    assert_eq!(s.client.decimals(), 18);

    assert_eq!(
        s.client.try_init_token(
            &s.client.address,
            &POOL_ID,
            &String::from_str(&s.env, "Again"),
            &String::from_str(&s.env, "AGN"),
            &SUPPLY,
            &1_000,
        ),
        Err(Ok(Error::AlreadyMinted.into()))
    );
}

#[test]
fn claim_pays_deposit_proportional_share() {
    let s = setup(1_000);
    let follower = Address::generate(&s.env);
    s.directory.set_deposit(&follower, &250);

    // 250 / 1000 of the supply.
    assert_eq!(s.client.claimable(&follower), SUPPLY / 4);
    s.client.claim(&follower);
    // Exactly two events: the payout transfer, then the claim record.
    let events = own_events(&s);
    assert_eq!(s.client.balance(&follower), SUPPLY / 4);
    assert_eq!(s.client.balance(&s.client.address), SUPPLY - SUPPLY / 4);
    assert_eq!(s.client.holders(), vec![&s.env, follower.clone()]);
    assert_eq!(s.client.claimable(&follower), 0);

    assert_eq!(events.len(), 2);
    assert_eq!(
        events.get_unchecked(0).1,
        vec![
            &s.env,
            symbol_short!("transfer").into_val(&s.env),
            s.client.address.clone().into_val(&s.env),
            follower.clone().into_val(&s.env),
        ]
    );
    let payload: Transfer = events.get_unchecked(0).2.try_into_val(&s.env).unwrap();
    assert_eq!(payload.amount, SUPPLY / 4);
    let payload: TokensClaimed = events.get_unchecked(1).2.try_into_val(&s.env).unwrap();
    assert_eq!(
        payload,
        TokensClaimed {
            follower: follower.clone(),
            amount: SUPPLY / 4,
        }
    );

    assert_eq!(s.client.try_claim(&follower), Err(Ok(Error::AlreadyClaimed.into())));
}

#[test]
fn claim_requires_a_recorded_deposit() {
    let s = setup(1_000);
    let stranger = Address::generate(&s.env);
    assert_eq!(s.client.try_claim(&stranger), Err(Ok(Error::NoDeposit.into())));
}

#[test]
fn claim_sum_stays_within_supply() {
    // Awkward denominator so every allocation truncates.
    let s = setup(633);
    let deposits: [i128; 3] = [100, 200, 333];
    let mut followers = std::vec::Vec::new();
    for deposit in deposits {
        let follower = Address::generate(&s.env);
        s.directory.set_deposit(&follower, &deposit);
        s.client.claim(&follower);
        followers.push(follower);
    }

    let mut claimed: i128 = 0;
    for follower in &followers {
        claimed += s.client.balance(follower);
    }
    assert!(claimed <= SUPPLY);
    // Truncation dust is bounded by the follower count.
    assert!(SUPPLY - claimed < deposits.len() as i128);
    assert_eq!(s.client.balance(&s.client.address), SUPPLY - claimed);
}

#[test]
fn transfer_moves_balance_and_emits_once() {
    let s = setup(1_000);
    let follower = Address::generate(&s.env);
    let other = Address::generate(&s.env);
    s.directory.set_deposit(&follower, &1_000);
    s.client.claim(&follower);

    s.client.transfer(&follower, &other, &40);
    let events = own_events(&s);
    assert_eq!(s.client.balance(&other), 40);
    assert_eq!(events.len(), 1);

    assert_eq!(
        s.client.try_transfer(&other, &follower, &41),
        Err(Ok(Error::InsufficientBalance.into()))
    );
    assert_eq!(
        s.client.try_transfer(&other, &follower, &-1),
        Err(Ok(Error::InvalidArgument.into()))
    );
}

#[test]
fn transfer_from_spends_allowance() {
    let s = setup(1_000);
    let owner = Address::generate(&s.env);
    let spender = Address::generate(&s.env);
    let recipient = Address::generate(&s.env);
    s.directory.set_deposit(&owner, &1_000);
    s.client.claim(&owner);

    s.client.approve(&owner, &spender, &100);
    let approve_events = own_events(&s);
    assert_eq!(s.client.allowance(&owner, &spender), 100);
    assert_eq!(approve_events.len(), 1);

    s.client.transfer_from(&spender, &owner, &recipient, &60);
    let transfer_events = own_events(&s);
    assert_eq!(s.client.balance(&recipient), 60);
    assert_eq!(s.client.allowance(&owner, &spender), 40);
    // transfer_from publishes only the transfer.
    assert_eq!(transfer_events.len(), 1);

    assert_eq!(
        s.client.try_transfer_from(&spender, &owner, &recipient, &41),
        Err(Ok(Error::InsufficientAllowance.into()))
    );
}

#[test]
fn burn_shrinks_supply() {
    let s = setup(1_000);
    let follower = Address::generate(&s.env);
    s.directory.set_deposit(&follower, &1_000);
    s.client.claim(&follower);

    s.client.burn(&follower, &(SUPPLY / 2));
    let events = own_events(&s);
    assert_eq!(s.client.balance(&follower), SUPPLY / 2);
    assert_eq!(s.client.total_supply(), SUPPLY / 2);
    assert_eq!(events.len(), 1);

    assert_eq!(
        s.client.try_burn(&follower, &SUPPLY),
        Err(Ok(Error::InsufficientBalance.into()))
    );
}
