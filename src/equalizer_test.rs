#![allow(clippy::float_cmp)]

use super::*;

/// In-memory group recording every min-height write.
struct FakeGroup {
    direction: Direction,
    mode: LayoutMode,
    left_height: f64,
    right_height: f64,
    left_min: Option<u32>,
    right_min: Option<u32>,
    writes: Vec<(Side, Option<u32>)>,
}

impl FakeGroup {
    fn new(direction: Direction, mode: LayoutMode, left_height: f64, right_height: f64) -> Self {
        Self { direction, mode, left_height, right_height, left_min: None, right_min: None, writes: Vec::new() }
    }

    fn min(&self, side: Side) -> Option<u32> {
        match side {
            Side::Left => self.left_min,
            Side::Right => self.right_min,
        }
    }

    fn slot(&mut self, side: Side) -> &mut Option<u32> {
        match side {
            Side::Left => &mut self.left_min,
            Side::Right => &mut self.right_min,
        }
    }
}

impl ColumnGroup for FakeGroup {
    fn direction(&self) -> Direction {
        self.direction
    }

    fn mode(&self) -> LayoutMode {
        self.mode
    }

    fn outer_height(&self, side: Side) -> f64 {
        // A min-height grows the rendered box, like the browser would.
        let natural = match side {
            Side::Left => self.left_height,
            Side::Right => self.right_height,
        };
        natural.max(self.min(side).map_or(0.0, f64::from))
    }

    fn clear_min_height(&mut self, side: Side) {
        *self.slot(side) = None;
        self.writes.push((side, None));
    }

    fn set_min_height(&mut self, side: Side, px: u32) {
        *self.slot(side) = Some(px);
        self.writes.push((side, Some(px)));
    }
}

// =============================================================
// Direction
// =============================================================

#[test]
fn direction_defaults_to_measure_right() {
    assert_eq!(Direction::from_attr(None), Direction::MeasureRight);
    assert_eq!(Direction::from_attr(Some("right")), Direction::MeasureRight);
    assert_eq!(Direction::from_attr(Some("sideways")), Direction::MeasureRight);
    assert_eq!(Direction::default(), Direction::MeasureRight);
}

#[test]
fn direction_left_is_case_insensitive() {
    assert_eq!(Direction::from_attr(Some("left")), Direction::MeasureLeft);
    assert_eq!(Direction::from_attr(Some(" LEFT ")), Direction::MeasureLeft);
}

#[test]
fn stretched_is_opposite_of_measured() {
    assert_eq!(Direction::MeasureLeft.measured(), Side::Left);
    assert_eq!(Direction::MeasureLeft.stretched(), Side::Right);
    assert_eq!(Direction::MeasureRight.measured(), Side::Right);
    assert_eq!(Direction::MeasureRight.stretched(), Side::Left);
}

// =============================================================
// equalize
// =============================================================

#[test]
fn two_column_applies_rounded_measured_height() {
    let mut group = FakeGroup::new(Direction::MeasureRight, LayoutMode::TwoColumn, 120.0, 340.6);
    let outcome = equalize(&mut group);
    assert_eq!(outcome, Outcome::Stretched { side: Side::Left, px: 341 });
    assert_eq!(group.left_min, Some(341));
    assert_eq!(group.right_min, None);
}

#[test]
fn measure_left_stretches_right() {
    let mut group = FakeGroup::new(Direction::MeasureLeft, LayoutMode::TwoColumn, 200.4, 90.0);
    assert_eq!(equalize(&mut group), Outcome::Stretched { side: Side::Right, px: 200 });
    assert_eq!(group.right_min, Some(200));
}

#[test]
fn single_column_clears_prior_stretch() {
    let mut group = FakeGroup::new(Direction::MeasureRight, LayoutMode::TwoColumn, 100.0, 300.0);
    equalize(&mut group);
    group.mode = LayoutMode::SingleColumn;
    assert_eq!(equalize(&mut group), Outcome::Stacked);
    assert_eq!(group.left_min, None);
    assert_eq!(group.right_min, None);
}

#[test]
fn measured_column_is_never_written() {
    let mut group = FakeGroup::new(Direction::MeasureRight, LayoutMode::TwoColumn, 500.0, 300.0);
    equalize(&mut group);
    equalize(&mut group);
    assert!(group.writes.iter().all(|(side, _)| *side == Side::Left));
    assert_eq!(group.right_min, None);
}

#[test]
fn repeated_passes_do_not_compound() {
    // The measured column shrinks between passes; a stale stretch must not
    // keep the stretched side at the old height.
    let mut group = FakeGroup::new(Direction::MeasureLeft, LayoutMode::TwoColumn, 400.0, 100.0);
    equalize(&mut group);
    group.left_height = 250.0;
    assert_eq!(equalize(&mut group), Outcome::Stretched { side: Side::Right, px: 250 });
}

#[test]
fn clear_happens_before_measure() {
    let mut group = FakeGroup::new(Direction::MeasureRight, LayoutMode::TwoColumn, 10.0, 80.0);
    equalize(&mut group);
    assert_eq!(group.writes, vec![(Side::Left, None), (Side::Left, Some(80))]);
}

#[test]
fn zero_height_measure_leaves_stretch_cleared() {
    let mut group = FakeGroup::new(Direction::MeasureRight, LayoutMode::TwoColumn, 10.0, 0.2);
    assert_eq!(equalize(&mut group), Outcome::Unmeasured);
    assert_eq!(group.left_min, None);
}

#[test]
fn rounded_px_rejects_non_positive_and_non_finite() {
    assert_eq!(rounded_px(0.0), None);
    assert_eq!(rounded_px(-3.0), None);
    assert_eq!(rounded_px(f64::NAN), None);
    assert_eq!(rounded_px(f64::INFINITY), None);
    assert_eq!(rounded_px(0.5), Some(1));
    assert_eq!(rounded_px(99.49), Some(99));
}

// =============================================================
// SettleTracker
// =============================================================

#[test]
fn empty_tracker_is_complete() {
    assert!(SettleTracker::new(0).is_complete());
}

#[test]
fn last_settle_reports_completion_once() {
    let mut tracker = SettleTracker::new(3);
    assert!(!tracker.settle(0));
    assert!(!tracker.settle(2));
    assert!(tracker.settle(1));
    assert!(tracker.is_complete());
    assert!(!tracker.settle(1));
}

#[test]
fn load_and_error_for_same_image_count_once() {
    let mut tracker = SettleTracker::new(2);
    assert!(!tracker.settle(0));
    assert!(!tracker.settle(0));
    assert!(!tracker.is_complete());
    assert!(tracker.settle(1));
}

#[test]
fn out_of_range_settle_is_ignored() {
    let mut tracker = SettleTracker::new(1);
    assert!(!tracker.settle(4));
    assert!(tracker.settle(0));
}
