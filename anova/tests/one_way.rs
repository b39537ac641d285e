//! End-to-end scenarios for a one-way analysis: the worked example, pair
//! queries, degenerate layouts, significance changes and the JSON report.

use std::borrow::Cow;

use anova::{
    AnovaConfig, AnovaError, ComparisonMode, Decimal, GroupDataset, NumericPath, OneWayAnova, PrecisionMode,
    SignificanceLevel, Source, ALL_GROUPS,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn abc_decimal() -> GroupDataset {
    GroupDataset::parse_decimals([
        ("A", vec!["1", "2", "3"]),
        ("B", vec!["4", "5", "6"]),
        ("C", vec!["7", "8", "9"]),
    ])
    .unwrap()
}

fn abc_float() -> GroupDataset {
    GroupDataset::from_floats([
        ("A", vec![1.0, 2.0, 3.0]),
        ("B", vec![4.0, 5.0, 6.0]),
        ("C", vec![7.0, 8.0, 9.0]),
    ])
    .unwrap()
}

fn run(dataset: GroupDataset, config: AnovaConfig) -> anova::AnovaReport {
    init_tracing();
    OneWayAnova::new(dataset, config).unwrap().run().unwrap()
}

// ============ Worked example ============

#[test]
fn test_worked_example_decimal_path() {
    let report = run(abc_decimal(), AnovaConfig::default());
    let d = &report.decomposition;

    assert_eq!(report.path, NumericPath::Decimal);
    assert_eq!((d.dof.total, d.dof.between, d.dof.within), (8, 2, 6));
    assert_eq!(d.grand_mean.decimal, Some(Decimal::from_i64(5)));
    assert_eq!(d.ss_between.decimal, Some(Decimal::from_i64(54)));
    assert_eq!(d.ss_within.decimal, Some(Decimal::from_i64(6)));
    assert_eq!(d.ss_total.decimal, Some(Decimal::from_i64(60)));
    assert_eq!(d.ms_between.decimal, Some(Decimal::from_i64(27)));
    assert_eq!(d.ms_within.decimal, Some(Decimal::from_i64(1)));
    assert_eq!(d.f_ratio.decimal, Some(Decimal::from_i64(27)));
    assert_eq!(d.f_ratio.float, 27.0);
    assert!((d.p_value() - 0.001).abs() < 1e-12);
    assert!((d.critical_f() - 5.143252849784720).abs() < 1e-8);
    assert!(d.significance.is_significant());
}

#[test]
fn test_worked_example_float_path() {
    let report = run(abc_float(), AnovaConfig::default());
    let d = &report.decomposition;

    assert_eq!(report.path, NumericPath::Float);
    assert_eq!(d.ss_between.float, 54.0);
    assert_eq!(d.ss_within.float, 6.0);
    assert_eq!(d.ss_total.float, 60.0);
    assert_eq!(d.ms_between.float, 27.0);
    assert_eq!(d.ms_within.float, 1.0);
    assert_eq!(d.f_ratio.float, 27.0);
    // Widened forms
    assert_eq!(d.ss_total.decimal, Some(Decimal::from_i64(60)));
}

#[test]
fn test_forced_float_on_decimal_input() {
    let config = AnovaConfig::default().with_precision(PrecisionMode::Float);
    let report = run(abc_decimal(), config);
    assert_eq!(report.path, NumericPath::Float);
    assert_eq!(report.decomposition.f_ratio.float, 27.0);
}

// ============ Pair queries ============

#[test]
fn test_on_demand_pair_leaves_report_untouched() {
    let report = run(abc_decimal(), AnovaConfig::default());
    let before = report.decomposition.clone();

    let first = report.pair(1, 3).unwrap();
    assert!(matches!(first, Cow::Owned(_)));
    assert_eq!(first.names, ("A".to_string(), "C".to_string()));
    // A and C only: means 2 and 8, grand mean 5
    assert_eq!(first.result.ss_between.decimal, Some(Decimal::from_i64(54)));
    assert_eq!(first.result.ss_within.decimal, Some(Decimal::from_i64(4)));
    assert_eq!(first.result.dof.within, 4);
    assert_eq!(first.result.f_ratio.float, 54.0);

    let again = report.pair(3, 1).unwrap();
    assert_eq!(again.result, first.result);
    assert!(report.pairs.is_empty());
    assert_eq!(report.decomposition, before);
}

#[test]
fn test_requested_pairs_come_from_cache() {
    let config = AnovaConfig::default().with_comparison(ComparisonMode::AllPairs);
    let report = run(abc_decimal(), config);
    assert_eq!(report.pairs.len(), 3);

    let bc = report.pair(3, 2).unwrap();
    assert!(matches!(bc, Cow::Borrowed(_)));
    assert_eq!(bc.pair.first(), 2);
    assert_eq!(bc.pair.second(), 3);
    assert_eq!(bc.names, ("B".to_string(), "C".to_string()));
}

#[test]
fn test_pair_outside_subset_is_computed() {
    let config = AnovaConfig::default().with_comparison(ComparisonMode::Subset { groups: vec![1, 2] });
    let report = run(abc_float(), config);
    assert_eq!(report.pairs.len(), 1);
    assert!(matches!(report.pair(2, 1).unwrap(), Cow::Borrowed(_)));
    assert!(matches!(report.pair(2, 3).unwrap(), Cow::Owned(_)));
    assert_eq!(report.pairs.len(), 1);
}

#[test]
fn test_two_groups_pair_is_the_whole_analysis() {
    let data = GroupDataset::from_floats([("x", vec![1.0, 2.5, 3.0]), ("y", vec![2.0, 4.0, 4.5, 6.0])]).unwrap();
    let config = AnovaConfig::default().with_comparison(ComparisonMode::AllPairs);
    let report = run(data, config);

    assert!(report.pairs.is_empty());
    let pair = report.pair(2, 1).unwrap();
    assert_eq!(pair.result, report.decomposition);
    assert_eq!(pair.names, ("x".to_string(), "y".to_string()));
}

#[test]
fn test_invalid_pair_queries() {
    let report = run(abc_float(), AnovaConfig::default());
    assert_eq!(report.pair(2, 2).unwrap_err(), AnovaError::SameGroup(2));

    let err = report.pair(0, 1).unwrap_err();
    assert_eq!(err, AnovaError::GroupIndexOutOfRange { index: 0, groups: 3 });

    let err = report.pair(1, 4).unwrap_err();
    assert_eq!(err.to_string(), "group index 4 must be greater than 0 and less than 4");
    assert_eq!(err.code(), anova::codes::GROUP_INDEX);
}

// ============ Degenerate layouts ============

#[test]
fn test_one_observation_per_group() {
    let data = GroupDataset::parse_decimals([("A", vec!["1"]), ("B", vec!["2"]), ("C", vec!["4"])]).unwrap();
    let report = run(data, AnovaConfig::default());
    let d = &report.decomposition;

    assert_eq!(d.dof.within, 0);
    assert_eq!(d.dof.total, d.dof.between);
    assert!(d.f_ratio.decimal.is_none());
    assert!(!d.f_ratio.is_finite());
    assert!(d.p_value().is_nan());
    assert!(d.critical_f().is_nan());
}

#[test]
fn test_no_within_group_variation() {
    let data = GroupDataset::parse_decimals([("A", vec!["1.5", "1.5"]), ("B", vec!["2.5", "2.5"])]).unwrap();
    let report = run(data, AnovaConfig::default());
    let d = &report.decomposition;

    assert_eq!(d.ms_within.decimal, Some(Decimal::zero()));
    assert!(d.f_ratio.decimal.is_none());
    assert_eq!(d.f_ratio.float, f64::INFINITY);
    assert_eq!(d.p_value(), 0.0);
}

#[test]
fn test_distant_groups_on_float_path() {
    let data = GroupDataset::from_floats([
        ("A", vec![1.0, 2.0, 3.0]),
        ("B", vec![1e9 + 1.0, 1e9 + 2.0, 1e9 + 3.0]),
        ("C", vec![2e9 + 1.0, 2e9 + 2.0, 2e9 + 3.0]),
    ])
    .unwrap();
    let report = run(data, AnovaConfig::default());
    let d = &report.decomposition;

    assert_eq!(d.path, NumericPath::Float);
    assert_eq!(d.ss_within.float, 6.0);
    assert_eq!(d.ms_within.float, 1.0);
    assert_eq!(d.f_ratio.float, 3e18);
    assert_eq!(d.p_value(), 0.0);
    let pooled = report.statistics.grand.sum_of_squares.float;
    assert!((d.ss_total.float - pooled).abs() <= 1e-12 * pooled);
}

#[test]
fn test_comparison_needs_two_groups() {
    let data = GroupDataset::from_floats([("only", vec![1.0, 2.0])]).unwrap();
    let config = AnovaConfig::default().with_comparison(ComparisonMode::AllPairs);
    let err = OneWayAnova::new(data, config).unwrap_err();
    assert_eq!(err.code(), anova::codes::TOO_FEW_GROUPS);
}

// ============ Significance level ============

#[test]
fn test_with_significance_recomputes_only_critical_values() {
    let config = AnovaConfig::default().with_comparison(ComparisonMode::AllPairs);
    let report = run(abc_float(), config);
    let strict = report.with_significance(SignificanceLevel::from_confidence(0.99).unwrap());

    assert!((strict.config.significance.confidence() - 0.99).abs() < 1e-15);
    assert_eq!(strict.decomposition.f_ratio, report.decomposition.f_ratio);
    assert_eq!(strict.decomposition.p_value(), report.decomposition.p_value());
    assert!(strict.decomposition.critical_f() > report.decomposition.critical_f());

    let (old, new) = (&report.statistics.groups[0], &strict.statistics.groups[0]);
    assert_eq!(new.moments, old.moments);
    assert!(new.confidence_interval.upper > old.confidence_interval.upper);

    for (old, new) in report.pairs.iter().zip(strict.pairs.iter()) {
        assert_eq!(new.result.ss_between, old.result.ss_between);
        assert!(new.result.critical_f() > old.result.critical_f());
    }
}

// ============ Report ============

#[test]
fn test_tables() {
    let config = AnovaConfig::default().with_comparison(ComparisonMode::SinglePair { first: 1, second: 3 });
    let report = run(abc_float(), config);
    let tables = report.tables();

    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].label, ALL_GROUPS);
    assert_eq!(tables[1].label, "A vs C");

    let rows = &tables[0].rows;
    assert_eq!(rows.iter().map(|r| r.source).collect::<Vec<_>>(), vec![Source::Between, Source::Within, Source::Total]);
    assert_eq!(rows[0].dof, 2);
    assert_eq!(rows[1].mean_square.float, 1.0);
    assert_eq!(rows[2].sum_of_squares.float, 60.0);
    assert_eq!(tables[0].f_ratio.float, 27.0);
}

#[test]
fn test_json_report() {
    let config = AnovaConfig::from_json(r#"{ "comparison": { "mode": "all_pairs" } }"#).unwrap();
    let report = run(abc_decimal(), config);
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(json["path"], "decimal");
    assert_eq!(json["config"]["significance"], 0.95);
    assert_eq!(json["config"]["denominator"], "n-1");
    assert_eq!(json["decomposition"]["ss_between"]["decimal"], "54");
    assert_eq!(json["decomposition"]["dof"]["within"], 6);
    assert_eq!(json["statistics"]["groups"].as_array().unwrap().len(), 3);
    assert_eq!(json["statistics"]["grand"]["name"], "grand");
    assert_eq!(json["pairs"].as_array().unwrap().len(), 3);
    assert_eq!(json["pairs"][0]["names"][0], "A");
}
