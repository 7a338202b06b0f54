use std::io::Write;

use adkpi_ingest::{IngestError, Platform, read_delimited, tag_platform};
use adkpi_model::CellValue;

#[test]
fn reads_latin1_tab_export_from_disk() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    // "Campanha\tImpressões\n" with a Latin-1 `õ`.
    file.write_all(b"Campanha\tImpress\xf5es\nVer\xe3o\t1.200\n")
        .expect("write");

    let table = read_delimited(file.path()).expect("read");
    assert_eq!(table.column_count(), 2);
    assert_eq!(table.row_count(), 1);
    assert_eq!(table.headers()[0], "Campanha");
    assert_eq!(table.columns()[1].cells[0], CellValue::text("1.200"));
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.csv");
    let err = read_delimited(&path).unwrap_err();
    assert!(matches!(err, IngestError::Io { .. }));
    assert!(err.to_string().contains("absent.csv"));
}

#[test]
fn facebook_payload_in_data_envelope() {
    let json = r#"{"data": [
        {"campaign_name": "A", "spend": "10.5", "impressions": "100", "clicks": "5",
         "date_start": "2024-05-01", "actions": [{"action_type": "lead", "value": "1"}]},
        {"campaign_name": "B", "spend": 4, "impressions": 50, "clicks": 0}
    ]}"#;
    let table = Platform::Facebook.load_json(json).expect("decode");
    assert_eq!(table.row_count(), 2);
    assert_eq!(
        table.column("conversions").unwrap().cells,
        vec![CellValue::Number(1.0), CellValue::Missing]
    );
    assert_eq!(
        table.column("date").unwrap().cells,
        vec![CellValue::text("2024-05-01"), CellValue::Missing]
    );
}

#[test]
fn google_payload_as_results_or_list() {
    let row = r#"{"campaign": {"name": "S"}, "metrics": {"costMicros": "2000000"}}"#;
    for json in [format!("{{\"results\": [{row}]}}"), format!("[{row}]")] {
        let table = Platform::GoogleAds.load_json(&json).expect("decode");
        assert_eq!(table.column("cost").unwrap().cells[0], CellValue::Number(2.0));
        assert_eq!(table.column("clicks").unwrap().cells[0], CellValue::Missing);
    }
}

#[test]
fn malformed_payload_names_platform() {
    let err = Platform::GoogleAds.load_json(r#"{"rows": 3}"#).unwrap_err();
    assert!(matches!(err, IngestError::Decode { platform: "Google", .. }));
}

#[test]
fn csv_export_can_be_tagged() {
    let table = adkpi_ingest::read_delimited_str("campaign;cost\nA;1\nB;2\n").expect("read");
    let tagged = tag_platform(table, "Facebook").expect("tag");
    assert_eq!(tagged.headers(), vec!["campaign", "cost", "platform"]);
    assert_eq!(tagged.column("platform").unwrap().cells.len(), 2);
}
