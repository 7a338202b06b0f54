use adkpi_map::HeaderAliases;
use adkpi_model::{
    CanonicalField, CellValue, ColumnData, ColumnOrigin, DateColumn, DiagnosticKind,
    NormalizationOptions, NumberLocale, RawColumn, RawTable,
};
use adkpi_transform::TableNormalizer;
use chrono::NaiveDate;

fn table(columns: Vec<(&str, Vec<CellValue>)>) -> RawTable {
    RawTable::from_columns(
        columns
            .into_iter()
            .map(|(name, cells)| RawColumn::new(name, cells))
            .collect(),
    )
    .expect("equal column lengths")
}

fn texts(values: &[&str]) -> Vec<CellValue> {
    values.iter().map(|v| CellValue::text(*v)).collect()
}

fn export_sample() -> RawTable {
    table(vec![
        ("Nome da campanha", texts(&["Verão", "Verão", "Inverno"])),
        ("Dia", texts(&["01/03/2024", "02/03/2024", ""])),
        ("Valor usado (BRL)", texts(&["R$ 1.000,00", "R$ 500,00", "-"])),
        ("Cliques no link", texts(&["100", "50", "nan"])),
        ("Impressões", texts(&["1.000", "500", "0"])),
        ("CTR (todos)", texts(&["10,0%", "10%", ""])),
        ("Custom Field", texts(&["a", " b ", ""])),
    ])
}

#[test]
fn normalizes_localized_export() {
    let (normalized, diagnostics) = TableNormalizer::new(HeaderAliases::builtin())
        .normalize(&export_sample())
        .expect("normalize");

    assert_eq!(normalized.row_count(), 3);
    assert_eq!(
        normalized.numeric(CanonicalField::Cost),
        Some(&[1000.0, 500.0, 0.0][..])
    );
    assert_eq!(
        normalized.numeric(CanonicalField::Clicks),
        Some(&[100.0, 50.0, 0.0][..])
    );
    assert_eq!(
        normalized.numeric(CanonicalField::Impressions),
        Some(&[1.0, 500.0, 0.0][..]),
        "`1.000` has a lone dot and is read as a decimal"
    );
    assert_eq!(
        normalized.numeric(CanonicalField::Ctr),
        Some(&[0.1, 0.1, 0.0][..])
    );
    assert_eq!(
        normalized.dates(),
        Some(&DateColumn::Parsed(vec![
            NaiveDate::from_ymd_opt(2024, 3, 1),
            NaiveDate::from_ymd_opt(2024, 3, 2),
            None,
        ]))
    );
    assert_eq!(
        normalized.text("Custom Field"),
        Some(&[Some("a".to_string()), Some(" b ".to_string()), Some(String::new())][..])
    );
    assert_eq!(
        normalized.column("Custom Field").map(|c| c.origin),
        Some(ColumnOrigin::Passthrough)
    );

    assert!(diagnostics.unmapped_headers().contains("Custom Field"));
    assert!(diagnostics.mentions("conversions"));
    assert_eq!(diagnostics.of_kind(DiagnosticKind::ValuesDefaulted).count(), 0);
}

#[test]
fn column_order_is_schema_then_passthrough() {
    let (normalized, _) = TableNormalizer::new(HeaderAliases::builtin())
        .normalize(&export_sample())
        .expect("normalize");
    assert_eq!(
        normalized.column_names(),
        vec![
            "campaign",
            "date",
            "cost",
            "clicks",
            "impressions",
            "conversions",
            "conversion_value",
            "cpc",
            "cpm",
            "ctr",
            "frequency",
            "cost_per_conversion",
            "Custom Field",
        ]
    );
}

#[test]
fn normalization_is_idempotent() {
    let normalizer = TableNormalizer::new(HeaderAliases::builtin());
    let (once, _) = normalizer.normalize(&export_sample()).expect("first pass");
    let (twice, _) = normalizer.normalize(&once.to_raw()).expect("second pass");
    assert_eq!(once, twice);
}

#[test]
fn idempotent_with_missing_dates() {
    let raw = table(vec![
        ("campaign", texts(&["A", "B"])),
        ("date", texts(&["ontem", "hoje"])),
        ("cost", texts(&["1,5", "2"])),
    ]);
    let normalizer = TableNormalizer::new(HeaderAliases::builtin());
    let (once, first) = normalizer.normalize(&raw).expect("first pass");
    assert_eq!(once.dates(), Some(&DateColumn::Missing));
    assert_eq!(first.of_kind(DiagnosticKind::DateColumnUnparseable).count(), 1);

    let (twice, second) = normalizer.normalize(&once.to_raw()).expect("second pass");
    assert_eq!(once, twice);
    assert_eq!(second.of_kind(DiagnosticKind::DateColumnEmpty).count(), 1);
}

#[test]
fn typed_ctr_is_read_in_percent() {
    let raw = table(vec![
        ("campaign", texts(&["A", "B"])),
        ("CTR (todos)", vec![CellValue::Number(45.2), CellValue::text("45,2%")]),
    ]);
    let normalizer = TableNormalizer::new(HeaderAliases::builtin());
    let (once, _) = normalizer.normalize(&raw).expect("first pass");
    let ctr = once.numeric(CanonicalField::Ctr).expect("ctr column");
    assert!((ctr[0] - 0.452).abs() < 1e-12);
    assert!((ctr[1] - 0.452).abs() < 1e-12);

    let (twice, _) = normalizer.normalize(&once.to_raw()).expect("second pass");
    assert_eq!(once, twice);
}

#[test]
fn passthrough_text_is_kept_verbatim() {
    let raw = table(vec![
        ("campaign", texts(&["A", "B"])),
        ("Notes", vec![CellValue::text("  padded value "), CellValue::Missing]),
    ]);
    let normalizer = TableNormalizer::new(HeaderAliases::builtin());
    let (once, _) = normalizer.normalize(&raw).expect("first pass");
    assert_eq!(
        once.text("Notes"),
        Some(&[Some("  padded value ".to_string()), None][..])
    );
    assert_eq!(once.campaigns(), Some(&[Some("A".to_string()), Some("B".to_string())][..]));

    let (twice, _) = normalizer.normalize(&once.to_raw()).expect("second pass");
    assert_eq!(once, twice);
}

#[test]
fn required_numeric_columns_never_contain_nan() {
    let raw = table(vec![
        ("campaign", texts(&["A", "A", "A"])),
        ("frequency", vec![CellValue::Number(f64::NAN), CellValue::Missing, CellValue::Number(f64::INFINITY)]),
        ("cpm", texts(&["NaN", "inf", "12"])),
    ]);
    let (normalized, diagnostics) = TableNormalizer::new(HeaderAliases::builtin())
        .normalize(&raw)
        .expect("normalize");
    for column in normalized.columns() {
        if let ColumnData::Numeric(values) = &column.data {
            assert!(values.iter().all(|v| v.is_finite()), "{}", column.name);
        }
    }
    assert_eq!(normalized.numeric(CanonicalField::Frequency), Some(&[0.0, 0.0, 0.0][..]));
    let defaulted: Vec<_> = diagnostics.of_kind(DiagnosticKind::ValuesDefaulted).collect();
    assert_eq!(defaulted.len(), 2);
}

#[test]
fn locale_option_changes_separator_reading() {
    let raw = table(vec![
        ("campaign", texts(&["A"])),
        ("cost", texts(&["$1,234.56"])),
    ]);
    let options = NormalizationOptions::default().with_number_locale(NumberLocale::English);
    let (normalized, _) = TableNormalizer::with_options(HeaderAliases::builtin(), options)
        .normalize(&raw)
        .expect("normalize");
    assert_eq!(normalized.numeric(CanonicalField::Cost), Some(&[1234.56][..]));
}

#[test]
fn diagnostics_render_for_end_users() {
    let raw = table(vec![
        ("Campanha", texts(&["A"])),
        ("Custo", texts(&["R$ 10,00"])),
        ("Impresions", texts(&["100"])),
        ("Data", texts(&["ontem"])),
        ("Custom Field", texts(&["x"])),
    ]);
    let (_, diagnostics) = TableNormalizer::new(HeaderAliases::builtin())
        .normalize(&raw)
        .expect("normalize");
    let rendered = diagnostics
        .iter()
        .filter(|d| d.kind != DiagnosticKind::FieldDefaulted)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(rendered, @r"
    column `Impresions` not recognised; kept as text (did you mean `impressions`?)
    column `Custom Field` not recognised; kept as text
    date column unparseable: no single format reads all values (1 rejected under the best format); dates marked missing
    ");
}
