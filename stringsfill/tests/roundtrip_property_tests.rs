use std::collections::BTreeMap;

use proptest::prelude::*;
use stringsfill::{StringsFormat, TextEncoding, encoding};

fn key_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z][A-Za-z0-9_.]{0,20}").expect("valid key regex")
}

// Values may hold quotes and newlines, but never a quote directly followed by
// whitespace and a semicolon, which would end the value early.
fn value_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 _\\-\\.,!\\?%@éü日本\n]{0,30}(\"[A-Za-z]{1,5}\")?")
        .expect("valid value regex")
}

fn table_strategy() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map(key_strategy(), value_strategy(), 0..12)
}

// A table together with its keys in random order.
fn table_with_order_strategy() -> impl Strategy<Value = (BTreeMap<String, String>, Vec<String>)> {
    table_strategy().prop_flat_map(|table| {
        let keys: Vec<String> = table.keys().cloned().collect();
        (Just(table), Just(keys).prop_shuffle())
    })
}

proptest! {
    #[test]
    fn prop_serialize_then_parse_recovers_mapping(table in table_strategy()) {
        let text = StringsFormat::from_map(&table, None).to_string();
        let parsed = StringsFormat::parse(&text);
        prop_assert_eq!(parsed.to_map(), table.clone());
        prop_assert_eq!(parsed.keys(), table.keys().cloned().collect::<Vec<_>>());
    }

    #[test]
    fn prop_explicit_order_is_preserved((table, order) in table_with_order_strategy()) {
        let text = StringsFormat::from_map(&table, Some(&order)).to_string();
        let parsed = StringsFormat::parse(&text);
        prop_assert_eq!(parsed.keys(), order);
        prop_assert_eq!(parsed.to_map(), table);
    }

    #[test]
    fn prop_encoded_text_decodes_back(table in table_strategy(), bom in any::<bool>()) {
        let text = StringsFormat::from_map(&table, None).to_string();
        // A bare UTF-16 BOM has no zero byte and is not valid UTF-8.
        prop_assume!(!text.is_empty());
        let mut targets = vec![TextEncoding::Utf8, TextEncoding::Utf16Le];
        // Without a BOM, big-endian input is read as little-endian first.
        if bom {
            targets.push(TextEncoding::Utf16Be);
        }
        for target in targets {
            let bytes = encoding::encode(&text, target, bom);
            let decoded = encoding::decode(&bytes);
            prop_assert!(decoded.is_some(), "failed to decode {:?}", target);
            if let Some(decoded) = decoded {
                prop_assert_eq!(decoded.text, text.clone());
            }
        }
    }
}
