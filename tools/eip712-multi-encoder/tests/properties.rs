//! Property-based tests for chain-id parsing and sign-bytes stability.

use eip712_multi_encoder::{
    parse_chain_id, ChainIdError, SignModeEip712MultiHandler, SignModeError,
};
use eip712_multi_types::{AnyMsg, Coin, Fee, SignMode, SignableMsg, SignerContext, Tip, Tx};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

// ============================================================================
// Strategies
// ============================================================================

fn arb_chain_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}"
}

fn arb_any_msg() -> impl Strategy<Value = AnyMsg> {
    (
        "[a-z]{1,8}",
        "[a-zA-Z0-9 ]{0,16}",
        any::<u64>(),
        any::<bool>(),
    )
        .prop_map(|(name, text, amount, flag)| {
            let mut fields = Map::new();
            fields.insert("text".into(), Value::String(text));
            fields.insert("amount".into(), json!(amount.to_string()));
            fields.insert("flag".into(), Value::Bool(flag));
            fields.insert("nested".into(), json!({ "z": amount, "a": [] }));
            AnyMsg::new(format!("/test.v1.Msg{name}"), fields)
        })
}

fn build_tx(msgs: &[AnyMsg], memo: &str, gas_limit: u64) -> Tx {
    let boxed: Vec<Box<dyn SignableMsg>> = msgs
        .iter()
        .cloned()
        .map(|m| Box::new(m) as Box<dyn SignableMsg>)
        .collect();
    Tx::new(boxed)
        .with_memo(memo)
        .with_fee(Fee {
            amount: vec![Coin::new("atom", 150)],
            gas_limit,
            ..Default::default()
        })
        .with_tip(Some(Tip {
            amount: vec![Coin::new("tip-token", 10)],
            tipper: String::new(),
        }))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_chain_id_suffix_round_trips(name in arb_chain_name(), id in any::<u64>()) {
        let label = format!("{name}-{id}");
        prop_assert_eq!(parse_chain_id(&label).unwrap(), id);
    }

    #[test]
    fn prop_chain_id_rejects_non_decimal_suffix(name in arb_chain_name(), suffix in "[a-z+ ]{1,6}") {
        let label = format!("{name}-{suffix}");
        let is_not_decimal = matches!(
            parse_chain_id(&label),
            Err(SignModeError::InvalidChainId { reason: ChainIdError::NotDecimal(_), .. })
        );
        prop_assert!(is_not_decimal);
    }

    #[test]
    fn prop_sign_bytes_deterministic_and_signature_independent(
        msgs in prop::collection::vec(arb_any_msg(), 1..6),
        memo in "[a-z ]{0,24}",
        gas_limit in any::<u64>(),
        account_number in any::<u64>(),
        sequence in any::<u64>(),
        sig in prop::collection::vec(any::<u8>(), 65),
    ) {
        let handler = SignModeEip712MultiHandler::new();
        let signer = SignerContext::new("greenfield_9000-1", account_number, sequence);

        let mut tx = build_tx(&msgs, &memo, gas_limit);
        let first = handler.get_sign_bytes(SignMode::Eip712, &signer, &tx).unwrap();

        let rebuilt = build_tx(&msgs, &memo, gas_limit);
        let second = handler.get_sign_bytes(SignMode::Eip712, &signer, &rebuilt).unwrap();
        prop_assert_eq!(first, second);

        tx.set_signatures(vec![sig]);
        let after_sig = handler.get_sign_bytes(SignMode::Eip712, &signer, &tx).unwrap();
        prop_assert_eq!(first, after_sig);
    }

    #[test]
    fn prop_typed_data_has_one_field_per_message(msgs in prop::collection::vec(arb_any_msg(), 1..8)) {
        let handler = SignModeEip712MultiHandler::new();
        let signer = SignerContext::new("greenfield_9000-1", 0, 0);
        let tx = build_tx(&msgs, "", 0);

        let typed = handler.typed_data(SignMode::Eip712, &signer, &tx).unwrap();
        let fields = typed.types.tx_fields();
        prop_assert_eq!(fields.len(), msgs.len());
        for (i, field) in fields.iter().enumerate() {
            let expected_name = format!("msg-{}", i + 1);
            prop_assert_eq!(&field.name, &expected_name);
            prop_assert!(typed.message.contains_key(&field.name));
        }
    }
}
