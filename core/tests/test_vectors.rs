//! Verify URL and body derivation against JSON test vectors stored in
//! `test-vectors/`.
//!
//! Each case carries a request spec in the persisted document shape, so the
//! vectors double as a check that the serialized field names are honored.

use requestable_core::{generate_url, generated_body, RequestError, RequestSpec};

fn spec_from(case: &serde_json::Value) -> RequestSpec {
    serde_json::from_value(case["spec"].clone()).unwrap()
}

// ---------------------------------------------------------------------------
// URL
// ---------------------------------------------------------------------------

#[test]
fn url_test_vectors() {
    let raw = include_str!("../../test-vectors/url.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let spec = spec_from(case);
        let include_query = case["include_query_params"].as_bool().unwrap();
        let result = generate_url(&spec, include_query);

        if let Some(expected_error) = case.get("expected_error") {
            match expected_error.as_str().unwrap() {
                "InvalidUrl" => assert!(
                    matches!(result, Err(RequestError::InvalidUrl(_))),
                    "{name}: expected InvalidUrl, got {result:?}"
                ),
                other => panic!("{name}: unknown expected_error {other}"),
            }
        } else {
            let url = result.unwrap_or_else(|e| panic!("{name}: {e}"));
            assert_eq!(url.as_str(), case["expected_url"].as_str().unwrap(), "{name}: url");
        }
    }
}

// ---------------------------------------------------------------------------
// Body
// ---------------------------------------------------------------------------

#[test]
fn body_test_vectors() {
    let raw = include_str!("../../test-vectors/body.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let spec = spec_from(case);
        assert_eq!(
            generated_body(&spec),
            case["expected_body"].as_str().unwrap(),
            "{name}: body"
        );
    }
}
