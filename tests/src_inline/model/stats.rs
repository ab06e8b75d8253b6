use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_mean_median_odd_even() {
    assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
    assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
    assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), Some(2.5));
}

#[test]
fn test_sample_std_dev() {
    let sd = sample_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
    assert!(approx(sd, (32.0f64 / 7.0).sqrt()));
    assert_eq!(sample_std_dev(&[5.0]), None);
}

#[test]
fn test_empty_is_undefined() {
    let stats = DescriptiveStats::from_values(&[]);
    assert_eq!(stats, DescriptiveStats::default());
    assert!(stats.mean.is_none());
    assert!(stats.median.is_none());
    assert!(stats.std_dev.is_none());
    assert!(stats.min.is_none());
    assert!(stats.max.is_none());
}

#[test]
fn test_single_value_has_no_std() {
    let stats = DescriptiveStats::from_values(&[4.0]);
    assert_eq!(stats.mean, Some(4.0));
    assert_eq!(stats.median, Some(4.0));
    assert_eq!(stats.std_dev, None);
    assert_eq!(stats.min, Some(4.0));
    assert_eq!(stats.max, Some(4.0));
}

#[test]
fn test_entries_names_and_order() {
    let summary = SummaryStatistics {
        gene: "CHRM3".to_string(),
        total_samples: 3,
        found_samples: 2,
        absent_samples: 1,
        tpm: DescriptiveStats::from_values(&[1.0, 3.0]),
        fpkm: DescriptiveStats::default(),
        fpkm_uq: DescriptiveStats::default(),
    };
    let entries = summary.entries();
    let names: Vec<&str> = entries.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        &names[..8],
        &[
            "Total samples",
            "Samples with CHRM3",
            "Samples without CHRM3",
            "Mean TPM",
            "Median TPM",
            "Std TPM",
            "Min TPM",
            "Max TPM",
        ]
    );
    assert_eq!(entries.len(), 3 + 3 * 5);
    assert_eq!(entries[1].1, StatValue::Count(2));
    assert_eq!(entries[3].1, StatValue::Value(Some(2.0)));
    assert_eq!(entries[8].1, StatValue::Value(None));
}

#[test]
fn test_huge_values_do_not_overflow_mean() {
    assert_eq!(mean(&[f64::MAX, f64::MAX]), Some(f64::MAX));
    assert_eq!(mean(&[f64::MAX, 0.0]), Some(f64::MAX / 2.0));
    assert_eq!(median(&[f64::MAX, f64::MAX]), Some(f64::MAX));
}

#[test]
fn test_non_finite_std_is_undefined() {
    assert_eq!(sample_std_dev(&[f64::MAX, 0.0]), None);
    let stats = DescriptiveStats::from_values(&[f64::MAX, 0.0]);
    assert!(stats.mean.is_some());
    assert_eq!(stats.std_dev, None);
}
