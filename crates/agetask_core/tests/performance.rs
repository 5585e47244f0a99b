use agetask_core::{classify, completion_rate_percent, PerformanceTier};

#[test]
fn zero_due_is_black_regardless_of_completed() {
    assert_eq!(classify(0, 0), PerformanceTier::Black);
    assert_eq!(classify(0, 5), PerformanceTier::Black);
}

#[test]
fn documented_thresholds_map_to_expected_tiers() {
    assert_eq!(classify(10, 8), PerformanceTier::Green);
    assert_eq!(classify(10, 5), PerformanceTier::Yellow);
    assert_eq!(classify(10, 2), PerformanceTier::Red);
    assert_eq!(classify(10, 1), PerformanceTier::Black);
}

#[test]
fn just_below_each_threshold_drops_a_tier() {
    assert_eq!(classify(1000, 799), PerformanceTier::Yellow);
    assert_eq!(classify(1000, 499), PerformanceTier::Red);
    assert_eq!(classify(1000, 199), PerformanceTier::Black);
}

#[test]
fn rate_above_one_hundred_is_not_clamped() {
    assert_eq!(classify(10, 12), PerformanceTier::Green);
    assert_eq!(completion_rate_percent(10, 12), 120);
}

#[test]
fn tier_wire_names_and_labels_are_stable() {
    let json = serde_json::to_value(PerformanceTier::Yellow).unwrap();
    assert_eq!(json, "yellow");
    assert_eq!(PerformanceTier::Black.as_str(), "black");
    assert_eq!(PerformanceTier::Green.label(), "Excellent");
}
