use adkpi_core::{
    KpiError, aggregate, breakdown_by, daily_series, filter_by_date, group_kpis, run_pipeline,
};
use adkpi_map::HeaderAliases;
use adkpi_model::{
    CanonicalField, CellValue, DiagnosticKind, Kpi, NormalizationOptions, RawColumn, RawTable,
};
use adkpi_transform::TableNormalizer;
use chrono::NaiveDate;
use proptest::prelude::*;

fn table(columns: Vec<(&str, Vec<&str>)>) -> RawTable {
    RawTable::from_columns(
        columns
            .into_iter()
            .map(|(name, cells)| {
                RawColumn::new(name, cells.into_iter().map(CellValue::text).collect())
            })
            .collect(),
    )
    .expect("equal column lengths")
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
}

#[test]
fn two_rows_of_one_campaign() {
    let raw = table(vec![
        ("campaign", vec!["A", "A"]),
        ("cost", vec!["R$ 1.000,00", "R$ 500,00"]),
        ("clicks", vec!["100", "50"]),
        ("impressions", vec!["1000", "500"]),
    ]);
    let output = run_pipeline(&raw, HeaderAliases::builtin(), NormalizationOptions::default())
        .expect("pipeline");

    assert_eq!(output.kpis.get(Kpi::TotalCost), Some(1500.0));
    assert_eq!(output.kpis.get(Kpi::Clicks), Some(150.0));
    assert_eq!(output.kpis.get(Kpi::Impressions), Some(1500.0));
    assert_eq!(output.kpis.get(Kpi::Ctr), Some(10.0));
    assert_eq!(output.kpis.get(Kpi::AverageCpc), Some(10.0));
    assert_eq!(output.kpis.get(Kpi::Roas), Some(0.0));
}

#[test]
fn zero_denominators_yield_zero() {
    let raw = table(vec![
        ("campaign", vec!["A", "B"]),
        ("cost", vec!["0", "0"]),
        ("clicks", vec!["0", "0"]),
        ("impressions", vec!["0", "0"]),
        ("conversion_value", vec!["120", "30"]),
    ]);
    let output = run_pipeline(&raw, HeaderAliases::builtin(), NormalizationOptions::default())
        .expect("pipeline");
    for kpi in [
        Kpi::Ctr,
        Kpi::AverageCpc,
        Kpi::Roas,
        Kpi::ConversionRate,
        Kpi::CostPerAcquisition,
    ] {
        assert_eq!(output.kpis.get(kpi), Some(0.0), "{kpi}");
    }
}

#[test]
fn missing_conversions_default_to_zero_with_diagnostic() {
    let raw = table(vec![("campaign", vec!["A"]), ("clicks", vec!["10"])]);
    let output = run_pipeline(&raw, HeaderAliases::builtin(), NormalizationOptions::default())
        .expect("pipeline");
    assert_eq!(output.kpis.get(Kpi::Conversions), Some(0.0));
    assert!(
        output
            .diagnostics
            .of_kind(DiagnosticKind::FieldDefaulted)
            .any(|d| d.column == "conversions" && d.message.contains("absent"))
    );
}

#[test]
fn conditional_kpis_follow_source_columns() {
    let bare = table(vec![("campaign", vec!["A"]), ("cost", vec!["10"])]);
    let output = run_pipeline(&bare, HeaderAliases::builtin(), NormalizationOptions::default())
        .expect("pipeline");
    assert!(!output.kpis.contains(Kpi::AverageFrequency));
    assert!(!output.kpis.contains(Kpi::AverageCpm));
    assert!(!output.kpis.contains(Kpi::AverageCostPerConversion));

    let full = table(vec![
        ("campaign", vec!["A", "A", "B"]),
        ("frequency", vec!["1,5", "0,5", "3"]),
        ("cpm", vec!["10", "20", "40"]),
        ("cost_per_conversion", vec!["0", "0", "0"]),
    ]);
    let output = run_pipeline(&full, HeaderAliases::builtin(), NormalizationOptions::default())
        .expect("pipeline");
    // Means are taken over per-campaign sums: A = (2, 30), B = (3, 40).
    assert_eq!(output.kpis.get(Kpi::AverageFrequency), Some(2.5));
    assert_eq!(output.kpis.get(Kpi::AverageCpm), Some(35.0));
    assert!(!output.kpis.contains(Kpi::AverageCostPerConversion));
}

#[test]
fn kpi_order_matches_dashboard_cards() {
    let raw = table(vec![
        ("campaign", vec!["A"]),
        ("frequency", vec!["2"]),
        ("clicks", vec!["4"]),
        ("conversions", vec!["1"]),
        ("cost", vec!["8"]),
    ]);
    let output = run_pipeline(&raw, HeaderAliases::builtin(), NormalizationOptions::default())
        .expect("pipeline");
    let labels: Vec<&str> = output.kpis.iter().map(|(kpi, _)| kpi.label()).collect();
    assert_eq!(
        labels,
        vec![
            "Impressions",
            "Clicks",
            "CTR (%)",
            "Average CPC",
            "Conversions",
            "Total Cost",
            "ROAS",
            "Average Frequency",
            "Conversion Rate (%)",
            "Cost per Acquisition",
        ]
    );
    assert_eq!(output.kpis.get(Kpi::ConversionRate), Some(25.0));
    assert_eq!(output.kpis.get(Kpi::CostPerAcquisition), Some(8.0));

    let json = serde_json::to_value(&output.kpis).expect("serialize");
    assert_eq!(json["Average CPC"], 2.0);
}

#[test]
fn missing_campaign_is_an_error() {
    let raw = table(vec![("cost", vec!["1"])]);
    let err = run_pipeline(&raw, HeaderAliases::builtin(), NormalizationOptions::default())
        .unwrap_err();
    assert!(matches!(err, KpiError::Normalize(_)));
}

#[test]
fn breakdown_by_passthrough_platform() {
    let raw = table(vec![
        ("campaign", vec!["A", "B", "C"]),
        ("platform", vec!["google_ads", "facebook", "google_ads"]),
        ("cost", vec!["10", "20", "30"]),
        ("clicks", vec!["1", "4", "3"]),
    ]);
    let (normalized, _) = TableNormalizer::new(HeaderAliases::builtin())
        .normalize(&raw)
        .expect("normalize");
    let groups = breakdown_by(&normalized, "platform").expect("breakdown");
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].group.as_deref(), Some("google_ads"));
    assert_eq!(groups[0].rows, 2);
    assert_eq!(groups[0].totals.get(CanonicalField::Cost), 40.0);
    assert_eq!(group_kpis(&groups[0]).get(Kpi::AverageCpc), Some(10.0));
    assert_eq!(groups[1].totals.get(CanonicalField::Clicks), 4.0);

    assert!(matches!(
        breakdown_by(&normalized, "nope"),
        Err(KpiError::NotGroupable { .. })
    ));
}

#[test]
fn daily_series_and_period_filter() {
    let raw = table(vec![
        ("campaign", vec!["A", "B", "A", "A"]),
        ("date", vec!["2024-05-02", "2024-05-01", "2024-05-02", ""]),
        ("cost", vec!["1", "2", "3", "100"]),
    ]);
    let (normalized, _) = TableNormalizer::new(HeaderAliases::builtin())
        .normalize(&raw)
        .expect("normalize");

    let series = daily_series(&normalized, CanonicalField::Cost).expect("series");
    assert_eq!(series, vec![(day(1), 2.0), (day(2), 4.0)]);

    let filtered = filter_by_date(&normalized, Some(day(2)), Some(day(2))).expect("filter");
    assert_eq!(filtered.row_count(), 2);
    assert_eq!(aggregate(&filtered).unwrap().get(Kpi::TotalCost), Some(4.0));

    let unbounded = filter_by_date(&normalized, None, None).expect("filter");
    assert_eq!(unbounded.row_count(), 4);

    assert!(matches!(
        daily_series(&normalized, CanonicalField::Campaign),
        Err(KpiError::NotNumeric(CanonicalField::Campaign))
    ));
}

#[test]
fn time_operations_need_dates() {
    let raw = table(vec![("campaign", vec!["A"]), ("date", vec!["sometime"])]);
    let (normalized, _) = TableNormalizer::new(HeaderAliases::builtin())
        .normalize(&raw)
        .expect("normalize");
    assert!(matches!(
        daily_series(&normalized, CanonicalField::Cost),
        Err(KpiError::DateUnavailable)
    ));
    assert!(matches!(
        filter_by_date(&normalized, Some(day(1)), None),
        Err(KpiError::DateUnavailable)
    ));
}

#[test]
fn empty_table_aggregates_to_zero() {
    let raw = table(vec![("campaign", vec![]), ("cost", vec![])]);
    let output = run_pipeline(&raw, HeaderAliases::builtin(), NormalizationOptions::default())
        .expect("pipeline");
    assert!(output.kpis.iter().all(|(_, value)| value == 0.0));
}

proptest! {
    #[test]
    fn kpis_are_always_finite(
        rows in prop::collection::vec(
            ("[AB]", 0_u32..1_000, 0_u32..100, 0_u32..10, 0_u32..500),
            0..12,
        )
    ) {
        let campaigns: Vec<String> = rows.iter().map(|r| r.0.clone()).collect();
        let column = |f: fn(&(String, u32, u32, u32, u32)) -> u32| -> Vec<CellValue> {
            rows.iter().map(|r| CellValue::Number(f64::from(f(r)))).collect()
        };
        let raw = RawTable::from_columns(vec![
            RawColumn::new("campaign", campaigns.into_iter().map(CellValue::Text).collect()),
            RawColumn::new("impressions", column(|r| r.1)),
            RawColumn::new("clicks", column(|r| r.2)),
            RawColumn::new("conversions", column(|r| r.3)),
            RawColumn::new("cost", column(|r| r.4)),
        ])
        .unwrap();
        let output = run_pipeline(&raw, HeaderAliases::builtin(), NormalizationOptions::default())
            .unwrap();
        for (kpi, value) in output.kpis.iter() {
            prop_assert!(value.is_finite(), "{kpi} = {value}");
        }
    }
}
