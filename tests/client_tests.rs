//! Control API クライアントのワイヤ形式テスト

use spc_rs::client::{ControlCase, ControlResponse};
use spc_rs::error::Error;

#[test]
fn test_fixture_decodes_with_spanish_wire_names() {
    let response: ControlResponse =
        serde_json::from_str(include_str!("fixtures/control_case.json")).unwrap();

    assert!(response.success);
    assert_eq!(response.data.len(), 1);

    let record = &response.data[0];
    assert_eq!(record.values.len(), 6);
    assert_eq!(record.mean, 5.0);
    assert_eq!(record.upper_limit, 8.0);
    assert_eq!(record.lower_limit, 2.0);
}

#[test]
fn test_fixture_converts_to_control_case() {
    let response: ControlResponse =
        serde_json::from_str(include_str!("fixtures/control_case.json")).unwrap();

    let case = response.into_case("1").unwrap();
    assert_eq!(case.values, vec![5.2, 4.8, 5.1, 7.9, 2.3, 5.0]);
    // 文字列ラベルも数値ラベルも表示用文字列として取り込む
    assert_eq!(case.labels[0], "Muestra 1");
    assert_eq!(case.labels[5], "6");
    assert_eq!(case.params.center, 5.0);
    assert_eq!(case.params.upper_limit, 8.0);
    assert_eq!(case.params.lower_limit, 2.0);
}

#[test]
fn test_api_failure_flag_maps_to_api_error() {
    let body = r#"{ "success": false, "data": [], "messages": ["case not found"] }"#;
    let response: ControlResponse = serde_json::from_str(body).unwrap();

    let err = response.into_case("9").unwrap_err();
    match err {
        Error::Api(msg) => {
            assert!(msg.contains("case 9"));
            assert!(msg.contains("case not found"));
        }
        other => panic!("expected Error::Api, got {:?}", other),
    }
}

#[test]
fn test_empty_data_maps_to_api_error() {
    let body = r#"{ "success": true, "data": [] }"#;
    let response: ControlResponse = serde_json::from_str(body).unwrap();

    let err = response.into_case("2").unwrap_err();
    assert!(matches!(err, Error::Api(_)));
}

#[test]
fn test_missing_optional_fields_use_defaults() {
    // messages が無くてもデコードできる
    let body = r#"{ "success": true, "data": [ { "valores": [], "media": 1.0, "lsc": 2.0, "lic": 0.0 } ] }"#;
    let response: ControlResponse = serde_json::from_str(body).unwrap();
    let case: ControlCase = response.into_case("5").unwrap();
    assert!(case.values.is_empty());
    assert!(case.labels.is_empty());
}
