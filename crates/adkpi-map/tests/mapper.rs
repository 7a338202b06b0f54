use std::fs;

use adkpi_map::{ColumnMapper, HeaderAliases, MappingError};
use adkpi_model::{CanonicalField, CollisionPolicy, DiagnosticKind, NormalizationOptions};

#[test]
fn maps_portuguese_export_headers() {
    let mapper = ColumnMapper::new(HeaderAliases::builtin());
    let headers = [
        "Nome da campanha",
        "Dia",
        "Impressões",
        "Cliques no link",
        "Valor usado (BRL)",
        "CTR (todos)",
        "Custom Field",
    ];
    let result = mapper.map_headers(&headers).expect("map headers");
    assert_eq!(
        result.renamed,
        vec![
            "campaign",
            "date",
            "impressions",
            "clicks",
            "cost",
            "ctr",
            "Custom Field"
        ]
    );
    assert_eq!(result.unmapped.len(), 1);
    assert!(result.unmapped.contains("Custom Field"));
    assert!(result.suggestions.is_empty());

    let diagnostics = result.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::UnmappedHeader);
    assert_eq!(diagnostics[0].column, "Custom Field");
}

#[test]
fn canonical_names_map_to_themselves() {
    let mapper = ColumnMapper::new(HeaderAliases::builtin());
    let headers: Vec<&str> = adkpi_model::CANONICAL_SCHEMA
        .iter()
        .map(|f| f.as_str())
        .collect();
    let result = mapper.map_headers(&headers).expect("map headers");
    assert_eq!(result.renamed, headers);
    assert!(result.unmapped.is_empty());
    assert!(result.collisions.is_empty());
}

#[test]
fn misspelled_header_gets_hint_but_stays_unmapped() {
    let mapper = ColumnMapper::new(HeaderAliases::builtin());
    let result = mapper.map_headers(&["Impresions"]).expect("map headers");
    assert_eq!(result.renamed, vec!["Impresions"]);
    assert_eq!(result.targets, vec![None]);
    assert_eq!(
        result.suggestions.get("Impresions"),
        Some(&CanonicalField::Impressions)
    );
    let diagnostics = result.diagnostics();
    assert_eq!(diagnostics[0].suggestion.as_deref(), Some("impressions"));
}

#[test]
fn collision_policy_controls_duplicates() {
    let headers = ["Gasto", "Investimento"];

    let lenient = ColumnMapper::new(HeaderAliases::builtin())
        .map_headers(&headers)
        .expect("last write wins");
    assert_eq!(lenient.source_position(CanonicalField::Cost), Some(1));
    assert_eq!(
        lenient.diagnostics()[0].kind,
        DiagnosticKind::HeaderCollision
    );

    let options = NormalizationOptions::default().with_collision_policy(CollisionPolicy::Reject);
    let strict = ColumnMapper::with_options(HeaderAliases::builtin(), &options);
    let err = strict.map_headers(&headers).unwrap_err();
    assert_eq!(
        err.to_string(),
        "columns `Gasto` and `Investimento` both map to `cost`"
    );
}

#[test]
fn toml_overlay_extends_builtin_table() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("aliases.toml");
    fs::write(
        &path,
        "[aliases]\n\"Investimento Total\" = \"cost\"\n\"Vendas\" = \"conversion_value\"\n",
    )
    .expect("write overlay");

    let aliases = HeaderAliases::builtin()
        .extend_from_file(&path)
        .expect("load overlay");
    assert_eq!(aliases.len(), HeaderAliases::builtin().len() + 2);

    let mapper = ColumnMapper::new(&aliases);
    let result = mapper
        .map_headers(&["INVESTIMENTO TOTAL", "vendas"])
        .expect("map headers");
    assert_eq!(result.renamed, vec!["cost", "conversion_value"]);
}

#[test]
fn toml_overlay_rejects_unknown_target() {
    let err = HeaderAliases::builtin()
        .extend_from_toml("[aliases]\n\"Foo\" = \"bogus\"\n")
        .unwrap_err();
    assert!(matches!(err, MappingError::UnknownTarget { .. }));
}

#[test]
fn missing_overlay_file_reports_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing.toml");
    let err = HeaderAliases::builtin().extend_from_file(&path).unwrap_err();
    assert!(matches!(err, MappingError::Read { .. }));
    assert!(err.to_string().contains("missing.toml"));
}
