//! End-to-end tests for reading and writing `PeakList.xml` documents.

use std::fs;

use bruker_peaklist::xml::{self, WriteOptions};
use bruker_peaklist::{
    parse, parse_file, parse_str, to_string, write_file, Peak1D, PeakList, PeakList1D,
    PeakList1DHeader, PeakListError, PeakPickDetails,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use tempfile::tempdir;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/peaklist.xml");

const SCENARIO: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<PeakList modified="2020-01-01T00:00:00">
  <PeakList1D>
    <PeakList1DHeader creator="Bob" expNo="5">
      <PeakPickDetails>F1=1.0ppm, F2=2.0ppm, MI=3.0cm, MAXI=4.0cm, PC=5.0</PeakPickDetails>
    </PeakList1DHeader>
    <Peak1D F1="1.5" intensity="100.0" type="1"/>
    <Peak1D F1="2.5" intensity="50.0" type="2"/>
  </PeakList1D>
</PeakList>"#;

#[test]
fn test_scenario_document() {
    let peak_list = parse_str(SCENARIO).unwrap().unwrap();

    let modified = NaiveDate::from_ymd_opt(2020, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(peak_list.modified, Some(modified));
    assert_eq!(peak_list.children.len(), 1);

    let list = &peak_list.children[0];
    assert_eq!(list.header.creator.as_deref(), Some("Bob"));
    assert_eq!(list.header.exp_no, Some(5));
    assert_eq!(list.header.proc_no, None);
    assert_eq!(list.header.details.unwrap().pc, 5.0);

    assert_eq!(list.peaks.len(), 2);
    assert_eq!(list.peaks[0].f1, Some(1.5));
    assert_eq!(list.peaks[0].intensity, Some(100.0));
    assert_eq!(list.peaks[0].peak_type, Some(1));
    assert_eq!(list.peaks[1].f1, Some(2.5));
    assert_eq!(list.peaks[1].intensity, Some(50.0));
    assert_eq!(list.peaks[1].peak_type, Some(2));
}

#[test]
fn test_fixture_file() {
    let peak_list = parse_file(FIXTURE).unwrap().unwrap();
    assert_eq!(peak_list.children.len(), 2);
    assert_eq!(peak_list.peak_count(), 2);

    let header = &peak_list.children[0].header;
    assert_eq!(header.name.as_deref(), Some("sucrose_1H"));
    assert_eq!(header.owner.as_deref(), Some("nmr"));
    assert_eq!(header.source.as_deref(), Some("/opt/data/sucrose/5/pdata/1"));
    assert_eq!(header.proc_no, Some(1));
    assert_eq!(
        header.details,
        Some(PeakPickDetails {
            f1: 10.5,
            f2: -0.5,
            mi: 0.02,
            maxi: 10000.0,
            pc: 1.4,
        })
    );

    // Truncated pick details leave the header intact
    let blank = &peak_list.children[1];
    assert_eq!(blank.header.name.as_deref(), Some("blank"));
    assert_eq!(blank.header.details, None);
    assert!(blank.peaks.is_empty());
}

#[test]
fn test_file_round_trip() {
    let original = parse_file(FIXTURE).unwrap().unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("PeakList.xml");
    write_file(&original, &path, &WriteOptions::default()).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("<?xml"));

    let restored = parse_file(&path).unwrap().unwrap();
    assert_eq!(restored, original);
}

#[test]
fn test_serialization_preserves_order() {
    let original = parse_str(SCENARIO).unwrap().unwrap();
    let compact = WriteOptions {
        declaration: false,
        indent: None,
    };
    let xml_text = to_string(&original, &compact).unwrap();

    let first = xml_text.find(r#"F1="1.5""#).unwrap();
    let second = xml_text.find(r#"F1="2.5""#).unwrap();
    let header = xml_text.find("<PeakList1DHeader").unwrap();
    assert!(header < first && first < second);

    let tree = xml::parse_str(&xml_text).unwrap();
    assert_eq!(parse(Some(&tree)).unwrap().unwrap(), original);
}

#[test]
fn test_missing_modified_is_absent() {
    let peak_list = parse_str("<PeakList/>").unwrap().unwrap();
    assert_eq!(peak_list.modified, None);

    let xml_text = to_string(&peak_list, &WriteOptions::default()).unwrap();
    assert!(!xml_text.contains("modified"));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let result = parse_file(dir.path().join("missing.xml"));
    assert!(matches!(result, Err(PeakListError::Io(_))));
}

#[test]
fn test_document_without_peak_list() {
    assert_eq!(parse_str("<Spectrum/>").unwrap(), None);
}

proptest! {
    /// Rendered pick details always match the template they are parsed with
    #[test]
    fn test_pick_details_template(
        f1 in -1.0e6f64..1.0e6,
        f2 in -1.0e6f64..1.0e6,
        mi in 0.0f64..1.0e4,
        maxi in 0.0f64..1.0e6,
        pc in 0.0f64..100.0,
    ) {
        let details = PeakPickDetails { f1, f2, mi, maxi, pc };
        prop_assert_eq!(PeakPickDetails::parse_content(&details.to_content()), Some(details));
    }
}

fn attribute_text() -> impl Strategy<Value = String> {
    "[ a-zA-Z0-9&<>\"'/_.-]{0,12}"
}

fn timestamp() -> impl Strategy<Value = NaiveDateTime> {
    (0i64..4_102_444_800).prop_map(|secs| {
        DateTime::from_timestamp(secs, 0)
            .expect("seconds are within chrono's range")
            .naive_utc()
    })
}

fn pick_details() -> impl Strategy<Value = PeakPickDetails> {
    (
        -1.0e6f64..1.0e6,
        -1.0e6f64..1.0e6,
        0.0f64..1.0e4,
        0.0f64..1.0e6,
        0.0f64..100.0,
    )
        .prop_map(|(f1, f2, mi, maxi, pc)| PeakPickDetails { f1, f2, mi, maxi, pc })
}

fn header() -> impl Strategy<Value = PeakList1DHeader> {
    (
        prop::option::of(attribute_text()),
        prop::option::of(timestamp()),
        prop::option::of(any::<i64>()),
        prop::option::of(attribute_text()),
        prop::option::of(attribute_text()),
        prop::option::of(any::<i64>()),
        prop::option::of(attribute_text()),
        prop::option::of(pick_details()),
    )
        .prop_map(
            |(creator, date, exp_no, name, owner, proc_no, source, details)| PeakList1DHeader {
                creator,
                date,
                exp_no,
                name,
                owner,
                proc_no,
                source,
                details,
            },
        )
}

fn peak() -> impl Strategy<Value = Peak1D> {
    (
        prop::option::of(-1.0e3f64..1.0e3),
        prop::option::of(-1.0e9f64..1.0e9),
        prop::option::of(any::<i64>()),
    )
        .prop_map(|(f1, intensity, peak_type)| Peak1D {
            f1,
            intensity,
            peak_type,
        })
}

fn peak_list() -> impl Strategy<Value = PeakList> {
    let list = (header(), prop::collection::vec(peak(), 0..6))
        .prop_map(|(header, peaks)| PeakList1D { header, peaks });
    (prop::option::of(timestamp()), prop::collection::vec(list, 0..4))
        .prop_map(|(modified, children)| PeakList { modified, children })
}

proptest! {
    /// Any peak list survives serialization and parsing unchanged
    #[test]
    fn test_peak_list_round_trip(original in peak_list(), indent in prop::option::of(0usize..4)) {
        for options in [
            WriteOptions::default(),
            WriteOptions { declaration: false, indent },
        ] {
            let xml_text = to_string(&original, &options).unwrap();
            let restored = parse_str(&xml_text).unwrap();
            prop_assert_eq!(restored, Some(original.clone()));
        }
    }
}
