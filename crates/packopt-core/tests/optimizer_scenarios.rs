//! # Optimizer Scenario Tests
//!
//! Exercises the public surface of `packopt-core` the way the HTTP and CLI
//! layers use it: raw integers in, a serialized `PackingResult` or a typed
//! error out.

use packopt_core::{solve, solve_validated, OrderQuantity, PackError, PackSizeSet, PackSizeViolation};

const STANDARD: [i64; 5] = [250, 500, 1000, 2000, 5000];

#[test]
fn wire_shape_for_standard_catalog() {
    let result = solve(12001, &STANDARD).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "orderQuantity": 12001,
            "totalItems": 12250,
            "totalPacks": 4,
            "packs": [
                {"packSize": 5000, "quantity": 2},
                {"packSize": 2000, "quantity": 1},
                {"packSize": 250, "quantity": 1}
            ],
            "waste": 249
        })
    );
}

#[test]
fn small_orders_round_up_to_smallest_pack() {
    for order in [1, 100, 249, 250] {
        let result = solve(order, &STANDARD).unwrap();
        assert_eq!(result.total_items, 250, "order {order}");
        assert_eq!(result.total_packs, 1, "order {order}");
    }
}

#[test]
fn one_pack_beats_two_smaller_ones_at_equal_total() {
    // 500 could ship as 2x250; a single 500 wins on pack count.
    let result = solve(251, &STANDARD).unwrap();
    assert_eq!(result.total_items, 500);
    assert_eq!(result.count_of(500), 1);
    assert_eq!(result.count_of(250), 0);
}

#[test]
fn validated_and_raw_entry_points_agree() {
    let set = PackSizeSet::new(STANDARD).unwrap();
    for order in [1, 251, 501, 12001, 99_999] {
        let raw = solve(order, &STANDARD).unwrap();
        let validated = solve_validated(OrderQuantity::new(order).unwrap(), &set).unwrap();
        assert_eq!(raw, validated, "order {order}");
    }
}

#[test]
fn catalog_reconfiguration_changes_result() {
    let before = solve(263, &[23, 31, 53]).unwrap();
    let after = solve(263, &[23, 31, 53, 263]).unwrap();
    assert_eq!(before.total_items, 263);
    assert_eq!(before.total_packs, 9);
    assert_eq!(after.total_packs, 1);
}

#[test]
fn errors_are_typed_and_displayable() {
    let err = solve(-5, &STANDARD).unwrap_err();
    assert!(matches!(err, PackError::InvalidQuantity { quantity: -5, .. }));
    assert!(err.is_input_error());

    let err = solve(5, &[250, 250]).unwrap_err();
    assert_eq!(err, PackError::InvalidPackSizes(PackSizeViolation::Duplicate(250)));
    assert!(err.to_string().contains("unique"));
}

#[test]
fn concurrent_calls_are_independent() {
    let handles: Vec<_> = (1..=8)
        .map(|i| {
            std::thread::spawn(move || {
                let sizes = [250, 500, 1000, 2000, 5000];
                solve(i * 1000 + 1, &sizes).unwrap()
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let result = handle.join().unwrap();
        assert_eq!(result.order_quantity, (i as u64 + 1) * 1000 + 1);
        assert!(result.total_items >= result.order_quantity);
    }
}
