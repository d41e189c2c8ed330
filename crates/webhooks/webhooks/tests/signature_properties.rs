//! Property tests for webhook verification
//!
//! Tests cover:
//! - Verifying generated headers for arbitrary payloads and secrets
//! - Single hex character flips in the signature
//! - Wrong secrets
//! - Header format/parse round trip

use horuspay_webhooks::*;
use proptest::prelude::*;
use serde_json::json;

const NOW: i64 = 1_700_000_000;

fn json_payload() -> impl Strategy<Value = String> {
    (any::<i64>(), "[a-zA-Z0-9 ._-]{0,40}", any::<bool>()).prop_map(|(id, note, flag)| {
        json!({ "id": id, "note": note, "flag": flag }).to_string()
    })
}

fn flip_hex(c: char) -> char {
    if c == '0' { '1' } else { '0' }
}

proptest! {
    #[test]
    fn generated_header_verifies(payload in json_payload(), secret in "[ -~]{1,32}") {
        let header = generate_test_header(&TestHeaderOptions::new(payload.clone(), secret.clone()));
        let event = construct_event(&payload, &header, &secret, None).unwrap();
        let expected: serde_json::Value = serde_json::from_str(&payload).unwrap();
        prop_assert_eq!(event, expected);
    }

    #[test]
    fn flipped_hex_character_fails(payload in json_payload(), secret in "[a-z0-9]{8,24}", index in 0usize..64) {
        let header = generate_test_header(&TestHeaderOptions::new(payload.clone(), secret.clone()).timestamp(NOW));
        let (prefix, signature) = header.split_once(",s=").unwrap();

        let tampered: String = signature
            .chars()
            .enumerate()
            .map(|(i, c)| if i == index { flip_hex(c) } else { c })
            .collect();
        let tampered_header = format!("{},s={}", prefix, tampered);

        let err = WebhookReceiver::new(secret)
            .verify_at(&payload, &tampered_header, NOW)
            .unwrap_err();
        prop_assert_eq!(err.reason, VerificationFailure::NoMatchingSignature);
    }

    #[test]
    fn wrong_secret_fails(payload in json_payload(), secret in "[a-z]{8,16}", other in "[A-Z]{8,16}") {
        let header = generate_test_header(&TestHeaderOptions::new(payload.clone(), secret).timestamp(NOW));
        let result = WebhookReceiver::new(other).verify_at(&payload, &header, NOW);
        prop_assert!(result.is_err());
    }

    #[test]
    fn format_parse_round_trip(timestamp in any::<i64>(), signature in "[0-9a-f]{64}") {
        let header = SignatureHeader::format(timestamp, EXPECTED_SCHEME, &signature);
        let parsed = SignatureHeader::parse(&header, EXPECTED_SCHEME);
        prop_assert_eq!(parsed.timestamp, Some(timestamp));
        prop_assert_eq!(parsed.signatures, vec![signature]);
    }
}
