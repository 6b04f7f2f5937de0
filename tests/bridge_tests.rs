use crdt_grow_counter::*;
use serde_json::json;

#[test]
fn test_bridge_roundtrip() {
    let initial_json = json!({
        "counters": {
            "node1": 10,
            "node2": 20
        }
    });

    let bytes = SerdeBytesBridge::json_to_bytes(initial_json.clone()).unwrap();
    let final_json = SerdeBytesBridge::bytes_to_json(&bytes).unwrap();

    assert_eq!(initial_json, final_json);
}

#[test]
fn test_bridge_rejects_invalid_states() {
    for bad in [
        json!({"counters": {"node1": -1}}),
        json!({"counters": {"": 3}}),
        json!({"counters": {"node1": "ten"}}),
        json!([1, 2, 3]),
    ] {
        assert!(matches!(
            SerdeBytesBridge::validate_json(bad.clone()),
            Err(CrdtError::InvalidInput(_))
        ));
        assert!(SerdeBytesBridge::json_to_bytes(bad).is_err());
    }
    assert!(SerdeBytesBridge::validate_json(json!({"counters": {}})).is_ok());
}

#[test]
fn test_bridge_rejects_corrupt_bytes() {
    assert!(matches!(
        SerdeBytesBridge::bytes_to_json(&[9, 9]),
        Err(CrdtError::Deserialization(_))
    ));
}

#[test]
fn test_merge_json_values() {
    let merged = SerdeBytesBridge::merge_json_values(&[
        json!({"counters": {"R1": 2, "R2": 0}}),
        json!({"counters": {"R1": 1, "R2": 1}}),
    ])
    .unwrap();
    assert_eq!(merged, json!({"counters": {"R1": 2, "R2": 1}}));

    assert_eq!(SerdeBytesBridge::merge_json_values(&[]).unwrap(), serde_json::Value::Null);
    assert!(SerdeBytesBridge::merge_json_values(&[json!({"counters": {"R1": -2}})]).is_err());
}

#[test]
fn test_bridge_output_matches_counter_state() {
    let mut counter = ReplicaCounter::new(ReplicaId::new("node_a").unwrap());
    counter.increment_by(7).unwrap();

    let bytes = counter.state().to_bytes().unwrap();
    let json = SerdeBytesBridge::bytes_to_json(&bytes).unwrap();
    assert_eq!(json, serde_json::to_value(counter.state()).unwrap());
}
