//! Actions on the `eosio.token` contract.

use crate::{Action, ActionData, PermissionLevel};
use antelope_abi::Name;
use serde_json::json;

fn name(literal: &str) -> Name {
    literal.parse().expect("static name literal")
}

fn eosio_token() -> Name {
    name("eosio.token")
}

/// Transfers `quantity` (an asset literal such as `"1.0000 EOS"`) from one
/// account to another.
pub fn transfer(
    from: Name,
    to: Name,
    quantity: &str,
    memo: &str,
    authorization: Vec<PermissionLevel>,
) -> Action {
    Action::new(
        eosio_token(),
        name("transfer"),
        authorization,
        ActionData::json(json!({
            "from": from,
            "to": to,
            "quantity": quantity,
            "memo": memo,
        })),
    )
}

/// Closes `owner`'s zero-balance row for `symbol`, reclaiming its RAM.
pub fn close(owner: Name, symbol: &str, authorization: Vec<PermissionLevel>) -> Action {
    Action::new(
        eosio_token(),
        name("close"),
        authorization,
        ActionData::json(json!({
            "owner": owner,
            "symbol": symbol,
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_payload_shape() {
        let action = transfer(
            "myaddress".parse().unwrap(),
            "otheraddress".parse().unwrap(),
            "1.0000 EOS",
            "",
            vec![],
        );
        assert_eq!(action.account.to_string(), "eosio.token");
        assert_eq!(action.name.to_string(), "transfer");
        assert!(action.authorization.is_empty());
        let ActionData::Json(data) = &action.data else {
            panic!("expected a JSON payload");
        };
        assert_eq!(
            data,
            &json!({
                "from": "myaddress",
                "to": "otheraddress",
                "quantity": "1.0000 EOS",
                "memo": "",
            })
        );
    }

    #[test]
    fn close_payload_shape() {
        let action = close("myaddress".parse().unwrap(), "EOS", vec![]);
        let ActionData::Json(data) = &action.data else {
            panic!("expected a JSON payload");
        };
        assert_eq!(data, &json!({"owner": "myaddress", "symbol": "EOS"}));
    }
}
