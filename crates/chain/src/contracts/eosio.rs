//! Actions on the `eosio` system contract.

use crate::{Action, ActionData, PermissionLevel};
use antelope_abi::Name;
use serde_json::{json, Value};

fn name(literal: &str) -> Name {
    literal.parse().expect("static name literal")
}

fn eosio() -> Name {
    name("eosio")
}

/// Creates a new account controlled by the given authorities.
///
/// `owner` and `active` are node-JSON authority documents (see
/// `antelope-signer` for building one from a public key); `active` defaults
/// to the owner authority.
pub fn newaccount(
    creator: Name,
    account_name: Name,
    owner: Value,
    active: Option<Value>,
    authorization: Vec<PermissionLevel>,
) -> Action {
    let active = active.unwrap_or_else(|| owner.clone());
    Action::new(
        eosio(),
        name("newaccount"),
        authorization,
        ActionData::json(json!({
            "creator": creator,
            "name": account_name,
            "owner": owner,
            "active": active,
        })),
    )
}

/// Buys `bytes` bytes of RAM for `receiver`, paid by `payer`.
pub fn buyrambytes(
    payer: Name,
    receiver: Name,
    bytes: u32,
    authorization: Vec<PermissionLevel>,
) -> Action {
    Action::new(
        eosio(),
        name("buyrambytes"),
        authorization,
        ActionData::json(json!({
            "payer": payer,
            "receiver": receiver,
            "bytes": bytes,
        })),
    )
}

/// Sells `bytes` bytes of `account`'s RAM back to the market.
pub fn sellram(account: Name, bytes: u64, authorization: Vec<PermissionLevel>) -> Action {
    Action::new(
        eosio(),
        name("sellram"),
        authorization,
        ActionData::json(json!({
            "account": account,
            "bytes": bytes,
        })),
    )
}

/// Stakes core tokens for `receiver`'s net and CPU bandwidth.
///
/// Quantities are asset literals such as `"1.0000 EOS"`.
pub fn delegatebw(
    from: Name,
    receiver: Name,
    stake_net_quantity: &str,
    stake_cpu_quantity: &str,
    transfer: bool,
    authorization: Vec<PermissionLevel>,
) -> Action {
    Action::new(
        eosio(),
        name("delegatebw"),
        authorization,
        ActionData::json(json!({
            "from": from,
            "receiver": receiver,
            "stake_net_quantity": stake_net_quantity,
            "stake_cpu_quantity": stake_cpu_quantity,
            "transfer": transfer,
        })),
    )
}

/// Unstakes previously delegated net and CPU bandwidth.
pub fn undelegatebw(
    from: Name,
    receiver: Name,
    unstake_net_quantity: &str,
    unstake_cpu_quantity: &str,
    authorization: Vec<PermissionLevel>,
) -> Action {
    Action::new(
        eosio(),
        name("undelegatebw"),
        authorization,
        ActionData::json(json!({
            "from": from,
            "receiver": receiver,
            "unstake_net_quantity": unstake_net_quantity,
            "unstake_cpu_quantity": unstake_cpu_quantity,
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn contract_account_is_eosio() {
        assert_eq!(eosio().to_string(), "eosio");
    }

    #[test]
    fn newaccount_defaults_active_to_owner() {
        let owner = json!({"threshold": 1, "keys": [], "accounts": [], "waits": []});
        let action = newaccount(
            "eosio".parse().unwrap(),
            "eosio2".parse().unwrap(),
            owner.clone(),
            None,
            vec![],
        );
        assert_eq!(action.account.to_string(), "eosio");
        assert_eq!(action.name.to_string(), "newaccount");
        let ActionData::Json(data) = &action.data else {
            panic!("expected a JSON payload");
        };
        assert_eq!(data["creator"], "eosio");
        assert_eq!(data["name"], "eosio2");
        assert_eq!(data["owner"], owner);
        assert_eq!(data["active"], owner);
    }

    #[test]
    fn buyrambytes_payload_shape() {
        let action =
            buyrambytes("eosio".parse().unwrap(), "eosio2".parse().unwrap(), 2048, vec![]);
        let ActionData::Json(data) = &action.data else {
            panic!("expected a JSON payload");
        };
        assert_eq!(
            data,
            &json!({"payer": "eosio", "receiver": "eosio2", "bytes": 2048})
        );
    }
}
