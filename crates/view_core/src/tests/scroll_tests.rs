use super::*;

#[test]
fn reports_only_threshold_crossings() {
    let mut tracker = ScrollTracker::new(20.0);

    assert_eq!(tracker.observe(0.0), None);
    assert_eq!(tracker.observe(20.0), None);
    assert_eq!(tracker.observe(21.0), Some(true));
    assert_eq!(tracker.observe(400.0), None);
    assert_eq!(tracker.observe(20.0), Some(false));
    assert_eq!(tracker.observe(5.0), None);
    assert!(!tracker.is_scrolled());
}

#[test]
fn state_matches_offset_for_any_sequence() {
    let offsets = [0.0, 19.9, 20.0, 20.1, 1500.0, 21.0, 3.0, 0.0, 80.0];
    let mut tracker = ScrollTracker::new(20.0);
    let mut crossings = 0;

    for offset in offsets {
        if tracker.observe(offset).is_some() {
            crossings += 1;
        }
        assert_eq!(tracker.is_scrolled(), offset > 20.0, "offset {offset}");
    }

    assert_eq!(crossings, 3);
}

#[test]
fn only_the_newest_generation_is_latest() {
    let mut tracker = ScrollTracker::new(20.0);
    let first = tracker.bump_generation();
    let second = tracker.bump_generation();

    assert!(!tracker.is_latest(first));
    assert!(tracker.is_latest(second));
}
