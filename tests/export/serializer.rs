//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zi.
//! The Zi project belongs to the Dunimd project team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

use proptest::prelude::*;
use serde_json::json;
use zicsv::config::{ZiAdditionalHeader, ZiCsvConfig};
use zicsv::export::ZiCsvExporter;
use zicsv::record::ZiRecord;
use zicsv::ZiError;

fn mock_data() -> Vec<ZiRecord> {
    [
        json!({"name": "Test 1", "age": 13, "average": 8.2, "approved": true, "description": "Test 1 description"}),
        json!({"name": "Test 2", "age": 11, "average": 8.2, "approved": true, "description": "Test 2 description"}),
        json!({"name": "Test 4", "age": 10, "average": 8.2, "approved": true, "description": "Test 3 description"}),
    ]
    .into_iter()
    .map(|value| ZiRecord::from_value(value).expect("object"))
    .collect()
}

fn headed_config() -> ZiCsvConfig {
    ZiCsvConfig {
        title: Some("Test Csv".into()),
        use_bom: true,
        use_keys_as_headers: true,
        ..Default::default()
    }
}

fn generate(config: ZiCsvConfig, records: &[ZiRecord]) -> String {
    ZiCsvExporter::new(config)
        .expect("valid config")
        .generate(records, true)
        .expect("generate")
}

fn lines(csv: &str) -> Vec<&str> {
    csv.split('\n').collect()
}

fn additional(blocks: Vec<Vec<&str>>) -> Vec<ZiAdditionalHeader> {
    blocks.into_iter().map(ZiAdditionalHeader::new).collect()
}

#[test]
fn first_record_keys_become_header_row() {
    let csv = generate(headed_config(), &mock_data());
    let lines = lines(&csv);

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "name,age,average,approved,description");
    assert_eq!(lines[1], "Test 1,13,8.2,true,Test 1 description");
    assert_eq!(lines[3], "Test 4,10,8.2,true,Test 3 description");
    assert!(!csv.ends_with('\n'));
}

#[test]
fn single_record_example() {
    let records = vec![ZiRecord::new().with_field("name", "Test 1").with_field("age", 13)];
    let csv = generate(headed_config(), &records);
    assert_eq!(csv, "name,age\nTest 1,13");
}

#[test]
fn header_row_is_omitted_when_disabled() {
    let config = ZiCsvConfig::default();
    let csv = generate(config, &mock_data());
    assert_eq!(lines(&csv)[0], "Test 1,13,8.2,true,Test 1 description");
}

#[test]
fn explicit_headers_set_column_order_and_blank_missing_fields() {
    let config = ZiCsvConfig {
        use_keys_as_headers: true,
        headers: Some(vec!["age".into(), "name".into(), "grade".into()]),
        ..Default::default()
    };
    let csv = generate(config, &mock_data());
    let lines = lines(&csv);

    assert_eq!(lines[0], "age,name,grade");
    assert_eq!(lines[1], "13,Test 1,");
    assert_eq!(lines[2], "11,Test 2,");
}

#[test]
fn later_records_align_by_field_name() {
    let records = vec![
        ZiRecord::new().with_field("name", "Ann").with_field("age", 30),
        ZiRecord::new().with_field("age", 40).with_field("name", "Bob"),
    ];
    let csv = generate(headed_config(), &records);
    assert_eq!(csv, "name,age\nAnn,30\nBob,40");
}

#[test]
fn inconsistent_field_sets_keep_full_width_rows() {
    let records = vec![
        ZiRecord::new().with_field("a", 1).with_field("b", 2).with_field("c", 3),
        ZiRecord::new().with_field("c", 6),
        ZiRecord::new().with_field("a", 7).with_field("d", "ignored"),
    ];
    let csv = generate(headed_config(), &records);
    assert_eq!(csv, "a,b,c\n1,2,3\n,,6\n7,,");
}

#[test]
fn null_renders_as_empty_cell() {
    let records = vec![ZiRecord::new().with_field("name", "Test 1").with_field("age", json!(null))];
    let csv = generate(headed_config(), &records);
    assert_eq!(lines(&csv)[1], "Test 1,");
    assert!(!csv.contains("null"));
}

#[test]
fn additional_header_with_separator_is_quoted() {
    let config = ZiCsvConfig {
        additional_headers: additional(vec![vec!["MyAdditional,Header"]]),
        ..headed_config()
    };
    let csv = generate(config, &mock_data());
    assert_eq!(lines(&csv)[0], "\"MyAdditional,Header\"");
    assert_eq!(lines(&csv)[1], "name,age,average,approved,description");
}

#[test]
fn additional_header_blocks_are_individual_rows() {
    let config = ZiCsvConfig {
        additional_headers: additional(vec![vec!["MyAdditionalHeader"], vec!["MySecondaryAdditionalHeader"]]),
        ..headed_config()
    };
    let csv = generate(config, &mock_data());
    let lines = lines(&csv);

    assert_eq!(lines[0], "MyAdditionalHeader");
    assert_eq!(lines[1], "MySecondaryAdditionalHeader");
    assert!(!lines[1].contains("MyAdditionalHeader"));
    assert_eq!(lines[2], "name,age,average,approved,description");
    assert_eq!(lines.len(), 6);
}

#[test]
fn additional_header_block_columns_share_one_row() {
    let config = ZiCsvConfig {
        additional_headers: additional(vec![vec!["MyAdditionalHeader", "MySecondaryAdditionalHeader"]]),
        ..headed_config()
    };
    let csv = generate(config, &mock_data());
    assert_eq!(lines(&csv)[0], "MyAdditionalHeader,MySecondaryAdditionalHeader");
}

#[test]
fn identical_labels_in_separate_blocks_are_both_emitted() {
    let config = ZiCsvConfig {
        additional_headers: additional(vec![vec!["Q1"], vec!["Q1"], vec![]]),
        use_keys_as_headers: false,
        ..Default::default()
    };
    let records = vec![ZiRecord::new().with_field("v", 1)];
    let csv = generate(config, &records);
    assert_eq!(csv, "Q1\nQ1\n\n1");
}

#[test]
fn title_row_precedes_additional_headers() {
    let config = ZiCsvConfig {
        show_title: true,
        title: Some("Quarterly, final".into()),
        additional_headers: additional(vec![vec!["Group"]]),
        ..headed_config()
    };
    let records = vec![ZiRecord::new().with_field("v", 1)];
    let csv = generate(config, &records);
    assert_eq!(csv, "\"Quarterly, final\"\nGroup\nv\n1");
}

#[test]
fn data_cells_are_escaped() {
    let records = vec![ZiRecord::new()
        .with_field("text", "say \"hi\", then\nleave")
        .with_field("plain", "ok")];
    let csv = generate(headed_config(), &records);
    assert_eq!(csv, "text,plain\n\"say \"\"hi\"\", then\nleave\",ok");
}

#[test]
fn header_cells_are_escaped() {
    let records = vec![ZiRecord::new().with_field("last, first", "Doe, Jane")];
    let csv = generate(headed_config(), &records);
    assert_eq!(csv, "\"last, first\"\n\"Doe, Jane\"");
}

#[test]
fn custom_separator_drives_joining_and_quoting() {
    let config = ZiCsvConfig {
        field_separator: ";".into(),
        ..headed_config()
    };
    let records = vec![ZiRecord::new().with_field("a", "x;y").with_field("b", "x,y")];
    let csv = generate(config, &records);
    assert_eq!(csv, "a;b\n\"x;y\";x,y");
}

#[test]
fn decimal_separator_rewrites_fractional_numbers() {
    let config = ZiCsvConfig {
        field_separator: ";".into(),
        decimal_separator: ",".into(),
        ..headed_config()
    };
    let records = vec![ZiRecord::new().with_field("avg", 8.2).with_field("n", 3)];
    let csv = generate(config, &records);
    assert_eq!(csv, "avg;n\n8,2;3");
}

#[test]
fn whole_floats_render_without_fraction() {
    let records = vec![ZiRecord::new()
        .with_field("avg", 8.0)
        .with_field("big", 1e21)
        .with_field("small", 1e-7)];
    assert_eq!(generate(ZiCsvConfig::default(), &records), "8,1e+21,1e-7");

    let config = ZiCsvConfig {
        field_separator: ";".into(),
        decimal_separator: ",".into(),
        ..Default::default()
    };
    let records = vec![ZiRecord::new().with_field("avg", 8.0).with_field("mean", 8.5)];
    assert_eq!(generate(config, &records), "8;8,5");
}

#[test]
fn quote_strings_quotes_every_string_cell() {
    let config = ZiCsvConfig {
        quote_strings: true,
        ..headed_config()
    };
    let records = vec![ZiRecord::new().with_field("name", "Ann").with_field("age", 30)];
    let csv = generate(config, &records);
    assert_eq!(csv, "name,age\n\"Ann\",30");
}

#[test]
fn empty_input_with_derived_headers_is_empty_header_line() {
    assert_eq!(generate(headed_config(), &[]), "");

    let config = ZiCsvConfig {
        additional_headers: additional(vec![vec!["Only"]]),
        ..headed_config()
    };
    assert_eq!(generate(config, &[]), "Only\n");
}

#[test]
fn empty_input_with_explicit_headers_keeps_header_row() {
    let config = ZiCsvConfig {
        headers: Some(vec!["a".into(), "b".into()]),
        ..headed_config()
    };
    assert_eq!(generate(config, &[]), "a,b");
}

#[test]
fn nested_value_is_invalid_record_shape() {
    let exporter = ZiCsvExporter::new(headed_config()).expect("config");
    let records = vec![
        ZiRecord::new().with_field("name", "ok"),
        ZiRecord::new().with_field("name", json!({"first": "A"})),
    ];
    match exporter.generate(&records, true) {
        Err(ZiError::InvalidRecordShape { field, kind }) => {
            assert_eq!(field, "name");
            assert_eq!(kind, "object");
        }
        other => panic!("expected InvalidRecordShape, got {other:?}"),
    }
}

#[test]
fn nested_value_outside_field_order_is_ignored() {
    let config = ZiCsvConfig {
        headers: Some(vec!["name".into()]),
        ..headed_config()
    };
    let records = vec![ZiRecord::new()
        .with_field("name", "ok")
        .with_field("tags", json!(["a", "b"]))];
    assert_eq!(generate(config, &records), "name\nok");
}

#[test]
fn returned_string_has_no_bom_but_encoded_bytes_do() {
    let exporter = ZiCsvExporter::new(headed_config()).expect("config");
    let csv = exporter.generate(&mock_data(), true).expect("generate");

    assert!(!csv.starts_with('\u{feff}'));
    let bytes = exporter.encode(&csv);
    assert_eq!(&bytes[..3], b"\xEF\xBB\xBF");
    assert_eq!(&bytes[3..], csv.as_bytes());

    let plain = ZiCsvExporter::new(ZiCsvConfig::default()).expect("config");
    assert_eq!(plain.encode(&csv), csv.as_bytes());
}

#[test]
fn generate_is_idempotent() {
    let exporter = ZiCsvExporter::new(ZiCsvConfig {
        additional_headers: additional(vec![vec!["A", "B"]]),
        ..headed_config()
    })
    .expect("config");
    let data = mock_data();
    let first = exporter.generate(&data, true).expect("first");
    let second = exporter.generate(&data, true).expect("second");
    assert_eq!(first, second);
}

#[test]
fn field_order_prefers_explicit_headers() {
    let exporter = ZiCsvExporter::new(ZiCsvConfig {
        headers: Some(vec!["z".into()]),
        ..Default::default()
    })
    .expect("config");
    assert_eq!(exporter.field_order(&mock_data()), vec!["z".to_string()]);

    let exporter = ZiCsvExporter::new(ZiCsvConfig::default()).expect("config");
    assert_eq!(
        exporter.field_order(&mock_data()),
        vec!["name", "age", "average", "approved", "description"]
    );
    assert!(exporter.field_order(&[]).is_empty());
}

#[test]
fn invalid_config_is_rejected_on_construction() {
    let err = ZiCsvExporter::new(ZiCsvConfig {
        field_separator: String::new(),
        ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(err, ZiError::Validation { .. }));
}

fn read_back(csv: &str) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(csv.as_bytes());
    reader
        .records()
        .map(|row| row.expect("csv row").iter().map(str::to_string).collect())
        .collect()
}

#[test]
fn quote_aware_reader_restores_mock_data() {
    let csv = generate(headed_config(), &mock_data());
    let rows = read_back(&csv);
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[2], vec!["Test 2", "11", "8.2", "true", "Test 2 description"]);
}

proptest! {
    #[test]
    fn escaped_cells_survive_quote_aware_parsing(
        value in "[a-z ,\"\r\n]{1,16}",
        other in "[a-z]{1,8}",
    ) {
        let records = vec![ZiRecord::new()
            .with_field("value", value.clone())
            .with_field("other", other.clone())];
        let csv = generate(ZiCsvConfig::default(), &records);

        let rows = read_back(&csv);
        prop_assert_eq!(rows.len(), 1);
        prop_assert_eq!(&rows[0], &vec![value.clone(), other]);

        if value.contains(|c: char| c == ',' || c == '"' || c == '\r' || c == '\n') {
            prop_assert!(csv.starts_with('"'));
            let naive_first = csv.split(',').next().unwrap_or_default();
            prop_assert_ne!(naive_first, value.as_str());
        } else {
            prop_assert!(csv.starts_with(value.as_str()));
        }
    }
}
