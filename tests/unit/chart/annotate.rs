use super::*;
use crate::series::calc::compute;

#[test]
fn step_is_a_tenth_with_floor_of_one() {
    assert_eq!(annotation_step(1), 1);
    assert_eq!(annotation_step(9), 1);
    assert_eq!(annotation_step(10), 1);
    assert_eq!(annotation_step(30), 3);
    assert_eq!(annotation_step(50), 5);
}

#[test]
fn indices_start_at_zero_and_stay_in_range() {
    let idx: Vec<_> = annotation_indices(30).collect();
    assert_eq!(idx, vec![0, 3, 6, 9, 12, 15, 18, 21, 24, 27]);

    let idx: Vec<_> = annotation_indices(25).collect();
    assert_eq!(idx, vec![0, 2, 4, 6, 8, 10, 12, 14, 16, 18, 20, 22, 24]);

    assert_eq!(annotation_indices(3).count(), 3);
    assert_eq!(annotation_indices(0).count(), 0);
}

#[test]
fn labels_use_display_precision() {
    assert_eq!(value_label(90.4), "90.4");
    assert_eq!(value_label(40.0), "40.0");
    assert_eq!(cagr_label(0.5), "0.5000");
    assert_eq!(cagr_label(0.123456), "0.1235");
    assert_eq!(cagr_label(f64::NAN), "NaN");
}

#[test]
fn annotations_pair_with_above_and_without_below() {
    let s = compute(20.0, 20.0, 3, 0.1).unwrap();
    let a = value_annotations(&s);
    assert_eq!(a.len(), 6);
    assert_eq!(a[0].placement, Placement::Above);
    assert_eq!(a[1].placement, Placement::Below);
    assert_eq!(a[4].year, 3);
    assert_eq!(a[4].label, "90.4");
    assert_eq!(a[5].label, "80.0");

    let c = cagr_annotations(&s);
    assert_eq!(c.len(), 6);
    assert_eq!(c[1].label, "1.0000");
}
