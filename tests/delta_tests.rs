use crdt_grow_counter::*;
use serde_json::json;

#[test]
fn test_json_delta_increments() {
    // 1. New state (0) + 5
    let state = SerdeBytesBridge::apply_json_delta(None, &json!(5), "node_a").unwrap();
    assert_eq!(state, json!({"counters": {"node_a": 5}}));

    // 2. Existing state (5) + 10 = 15
    let state2 =
        SerdeBytesBridge::apply_json_delta(Some(&state), &json!({"increment": 10}), "node_a")
            .unwrap();
    assert_eq!(state2["counters"]["node_a"], json!(15));

    // 3. Different replica
    let state3 = SerdeBytesBridge::apply_json_delta(Some(&state2), &json!(20), "node_b").unwrap();
    assert_eq!(state3, json!({"counters": {"node_a": 15, "node_b": 20}}));
}

#[test]
fn test_json_delta_rejects_bad_amounts() {
    for bad in [json!(-1), json!({"increment": -4}), json!("5"), json!({"add": 1})] {
        assert!(matches!(
            SerdeBytesBridge::apply_json_delta(None, &bad, "node_a"),
            Err(CrdtError::InvalidInput(_))
        ));
    }
    assert!(matches!(
        SerdeBytesBridge::apply_json_delta(None, &json!(0), "node_a"),
        Err(CrdtError::InvalidDelta(_))
    ));
    assert!(matches!(
        SerdeBytesBridge::apply_json_delta(None, &json!(1), " "),
        Err(CrdtError::InvalidReplicaId(_))
    ));
}

#[test]
fn test_json_delta_overflow() {
    let state = json!({"counters": {"node_a": u64::MAX}});
    assert!(matches!(
        SerdeBytesBridge::apply_json_delta(Some(&state), &json!(1), "node_a"),
        Err(CrdtError::Overflow(_))
    ));
}

#[test]
fn test_bytes_delta() {
    let bytes = SerdeBytesBridge::apply_bytes_delta(None, &json!(3), "node_a").unwrap();
    let bytes = SerdeBytesBridge::apply_bytes_delta(Some(&bytes), &json!(4), "node_a").unwrap();
    let bytes = SerdeBytesBridge::apply_bytes_delta(Some(&bytes), &json!(1), "node_b").unwrap();

    let state = ReplicaState::merge_from_readers(&[ReplicaStateReader::new(&bytes)]).unwrap();
    assert_eq!(state.get(&ReplicaId::new("node_a").unwrap()), 7);
    assert_eq!(state.total(), 8);
}

#[test]
fn test_delta_wire_shape() {
    let mut counter = ReplicaCounter::new(ReplicaId::new("R1").unwrap());
    counter.increment();
    let delta = counter.increment_by(2).unwrap();

    let wire = serde_json::to_value(&delta).unwrap();
    assert_eq!(wire, json!({"replica_id": "R1", "delta": 2, "seq": 3}));

    let received: Delta = serde_json::from_value(wire).unwrap();
    assert_eq!(received, delta);

    let mut peer = ReplicaCounter::new(ReplicaId::new("R2").unwrap());
    peer.apply(&received).unwrap();
    assert_eq!(peer.state().get(delta.replica_id()), 2);
}

#[test]
fn test_delta_binary_encoding() {
    let mut counter = ReplicaCounter::new(ReplicaId::new("R1").unwrap());
    let delta = counter.increment();

    let bytes = bincode::serialize(&delta).unwrap();
    let decoded: Delta = bincode::deserialize(&bytes).unwrap();
    assert_eq!(decoded, delta);

    let forged = bincode::serialize(&("R1".to_string(), 0u64, 1u64)).unwrap();
    assert!(bincode::deserialize::<Delta>(&forged).is_err());
}
