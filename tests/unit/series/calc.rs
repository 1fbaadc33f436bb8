use super::*;

fn assert_close(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() <= tol, "{a} != {b} (tol {tol})");
}

#[test]
fn year_indices_are_one_based_and_inclusive() {
    assert_eq!(year_indices(1), vec![1]);
    assert_eq!(year_indices(4), vec![1, 2, 3, 4]);
    assert!(year_indices(0).is_empty());
}

#[test]
fn zero_rate_leaves_series_untouched() {
    let s = compute(20.0, 20.0, 3, 0.0).unwrap();
    assert_eq!(s.without_interest, vec![40.0, 60.0, 80.0]);
    assert_eq!(s.with_interest, vec![40.0, 60.0, 80.0]);
    assert_eq!(s.with_interest_cagr, s.without_interest_cagr);
}

#[test]
fn interest_carries_forward_in_order() {
    let s = compute(20.0, 20.0, 3, 0.1).unwrap();
    assert_eq!(s.without_interest, vec![40.0, 60.0, 80.0]);
    assert_close(f64::from(s.with_interest[0]), 40.0, 1e-6);
    assert_close(f64::from(s.with_interest[1]), 64.0, 1e-4);
    assert_close(f64::from(s.with_interest[2]), 90.4, 1e-4);
}

#[test]
fn forward_interest_reads_updated_values() {
    let mut v = vec![10.0_f32, 10.0, 10.0, 10.0];
    apply_forward_interest(&mut v, 0.5);
    // 10 -> +5 everywhere after; 15 -> +7.5; 22.5 -> +11.25
    assert_eq!(v, vec![10.0, 15.0, 22.5, 33.75]);
}

#[test]
fn forward_interest_on_short_slices_is_a_no_op() {
    let mut empty: Vec<f32> = vec![];
    apply_forward_interest(&mut empty, 0.3);
    assert!(empty.is_empty());

    let mut one = vec![7.0_f32];
    apply_forward_interest(&mut one, 0.3);
    assert_eq!(one, vec![7.0]);
}

#[test]
fn single_year_cagr_is_simple_return() {
    let s = compute(50.0, 10.0, 1, 0.2).unwrap();
    assert_eq!(s.len(), 1);
    assert_eq!(s.with_interest, vec![60.0]);
    assert_close(s.without_interest_cagr[0], 0.2, 1e-6);
    assert_close(s.with_interest_cagr[0], 0.2, 1e-6);
}

#[test]
fn cagr_round_trips_to_values() {
    let s = compute(12.5, 3.25, 25, 0.07).unwrap();
    for (i, &year) in s.years.iter().enumerate() {
        for (v, c) in [
            (s.without_interest[i], s.without_interest_cagr[i]),
            (s.with_interest[i], s.with_interest_cagr[i]),
        ] {
            let back = (1.0 + c).powi(year as i32) * s.beginning_value;
            let v = f64::from(v);
            assert!(
                ((back - v) / v).abs() < 1e-5,
                "year {year}: {back} vs {v}"
            );
        }
    }
}

#[test]
fn with_interest_dominates_for_non_negative_inputs() {
    let s = compute(5.0, 2.0, 40, 0.15).unwrap();
    for (w, wo) in s.with_interest.iter().zip(&s.without_interest) {
        assert!(w >= wo);
    }
}

#[test]
fn without_interest_is_linear() {
    let s = compute(7.0, 1.5, 10, 0.1).unwrap();
    for (i, v) in s.without_interest.iter().enumerate() {
        assert_eq!(*v, (7.0 + 1.5 * (i as f64 + 1.0)) as f32);
    }
}

#[test]
fn negative_ratio_yields_nan_not_error() {
    let s = compute(10.0, -8.0, 3, 0.0).unwrap();
    // year 2: 10 - 16 = -6 -> ratio -0.6 under a square root
    assert!(s.without_interest_cagr[1].is_nan());
    // year 1 has exponent 1, so the ratio passes through
    assert_close(s.without_interest_cagr[0], 0.2 - 1.0, 1e-6);
}

#[test]
fn invalid_inputs_are_rejected() {
    assert!(compute(0.0, 20.0, 3, 0.1).unwrap_err().is_invalid_input());
    assert!(compute(20.0, 20.0, 0, 0.1).unwrap_err().is_invalid_input());
    assert!(
        compute(20.0, f64::NAN, 3, 0.1)
            .unwrap_err()
            .is_invalid_input()
    );
}

#[test]
fn cagr_series_checks_its_arguments() {
    assert!(cagr_series(&[1.0, 2.0], 1.0, &[1]).is_err());
    assert!(cagr_series(&[1.0], 0.0, &[1]).is_err());
    assert!(cagr_series(&[1.0], 1.0, &[0]).is_err());
    let c = cagr_series(&[4.0], 1.0, &[2]).unwrap();
    assert_close(c[0], 1.0, 1e-12);
}

#[test]
fn rows_follow_series_order() {
    let s = GrowthParams::new(20.0, 20.0, 3, 0.1).compute().unwrap();
    let rows: Vec<_> = s.rows().collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].year, 3);
    assert_eq!(rows[2].without_interest, 80.0);
    assert_eq!(rows[2].with_interest, s.with_interest[2]);
}

#[test]
fn nan_cagr_serializes_as_null() {
    let s = compute(10.0, -8.0, 2, 0.0).unwrap();
    let json = serde_json::to_value(&s).unwrap();
    assert!(json["without_interest_cagr"][1].is_null());
    assert_eq!(json["years"], serde_json::json!([1, 2]));
}

#[test]
fn validate_and_rows_tolerate_mismatched_vectors() {
    let s = compute(20.0, 20.0, 3, 0.1).unwrap();
    assert!(s.validate().is_ok());

    let mut bad = s.clone();
    bad.with_interest.truncate(1);
    assert!(bad.validate().unwrap_err().is_invalid_input());
    assert_eq!(bad.rows().count(), 1);
}

// Reference values: f32 base series, f32 carry `value * (rate as f32)`, CAGR ratio taken as
// `value / (beginning_value as f32)` in f32 and rooted in f64.
#[test]
fn precision_matches_float32_reference() {
    let s = compute(12.5, 3.25, 25, 0.07).unwrap();
    let cases: [(usize, u32, u32, f64, f64); 5] = [
        (0, 0x417c_0000, 0x417c_0000, 0.25999999046325684, 0.25999999046325684),
        (1, 0x4198_0000, 0x41a0_d1ec, 0.23288279285847513, 0.26814828519467215),
        (4, 0x41e6_0000, 0x420c_4ca7, 0.18126018314511927, 0.22918479361799182),
        (9, 0x4234_0000, 0x4287_c4b5, 0.1366591411282463, 0.18436582104656818),
        (24, 0x42bb_8000, 0x4386_7b63, 0.08393303016858478, 0.13060620047030191),
    ];
    for (i, without_bits, with_bits, without_cagr, with_cagr) in cases {
        assert_eq!(s.without_interest[i].to_bits(), without_bits, "without[{i}]");
        assert_eq!(s.with_interest[i].to_bits(), with_bits, "with[{i}]");
        assert_eq!(s.without_interest_cagr[i], without_cagr, "without_cagr[{i}]");
        assert_eq!(s.with_interest_cagr[i], with_cagr, "with_cagr[{i}]");
    }
}

#[test]
fn base_below_f32_range_gives_infinite_cagr() {
    let s = compute(1e-46, 1.0, 2, 0.0).unwrap();
    assert!(s.without_interest_cagr.iter().all(|c| c.is_infinite()));
}
