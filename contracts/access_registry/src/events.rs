//! Event payloads published by the role directory.

use soroban_sdk::{contracttype, Address};

/// Published under the `role_set` topic when a role is granted or moved.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleGranted {
    pub by: Address,
    pub target: Address,
}

/// Published under the `role_del` topic when the Operator role is revoked.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleRevoked {
    pub by: Address,
    pub target: Address,
}
