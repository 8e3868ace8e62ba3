// Unit tests for the routing layer's pure pieces: the confidence-floor
// correction and percentage rounding.
//
// The correction is observable API behavior — a borderline verdict in
// either direction flips to its opposite — so the boundary cases here
// pin the exact contract.

use muzzle::classify::router::{adjust_english, round2};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// ============================================================
// Profane raw decisions
// ============================================================

#[test]
fn profane_below_floor_flips_to_non_profane() {
    let (profane, confidence) = adjust_english(true, 0.75);
    assert!(!profane);
    assert_close(confidence, 0.25);
    assert_close(round2(confidence * 100.0), 25.0);
}

#[test]
fn profane_at_floor_stays_profane() {
    let (profane, confidence) = adjust_english(true, 0.8);
    assert!(profane);
    assert_close(confidence, 0.8);
}

#[test]
fn profane_with_high_confidence_stays() {
    let (profane, confidence) = adjust_english(true, 0.97);
    assert!(profane);
    assert_close(confidence, 0.97);
}

#[test]
fn profane_just_below_floor_flips() {
    let (profane, confidence) = adjust_english(true, 0.799);
    assert!(!profane);
    assert_close(confidence, 0.201);
}

// ============================================================
// Non-profane raw decisions
// ============================================================

#[test]
fn non_profane_below_floor_flips_to_profane() {
    // Raw non-profane with max prob 0.30 means confidence 0.70 < 0.80,
    // so the verdict flips to profane at 1 - 0.70 = 0.30.
    let (profane, confidence) = adjust_english(false, 0.30);
    assert!(profane);
    assert_close(confidence, 0.30);
    assert_close(round2(confidence * 100.0), 30.0);
}

#[test]
fn non_profane_at_floor_stays() {
    // max prob 0.20 → confidence exactly 0.80, not below the floor.
    let (profane, confidence) = adjust_english(false, 0.20);
    assert!(!profane);
    assert_close(confidence, 0.80);
}

#[test]
fn confident_non_profane_stays() {
    let (profane, confidence) = adjust_english(false, 0.05);
    assert!(!profane);
    assert_close(confidence, 0.95);
}

#[test]
fn flip_applies_once_never_cascades() {
    // A flipped profane verdict lands at low confidence but must NOT be
    // re-flipped by the non-profane rule.
    let (profane, confidence) = adjust_english(true, 0.75);
    assert!(!profane);
    assert_close(confidence, 0.25);
}

// ============================================================
// round2
// ============================================================

#[test]
fn round2_truncates_to_two_decimals() {
    assert_close(round2(33.333_333), 33.33);
    assert_close(round2(66.666_666), 66.67);
}

#[test]
fn round2_keeps_exact_values() {
    assert_close(round2(25.0), 25.0);
    assert_close(round2(0.0), 0.0);
    assert_close(round2(100.0), 100.0);
}

#[test]
fn round2_carries_into_the_integer_part() {
    assert_close(round2(99.999), 100.0);
}
