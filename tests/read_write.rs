use std::path::PathBuf;

use projfields::ProjfieldsError;
use projfields::catalog::FieldCatalog;
use projfields::datatype::{DeclaredType, Value};
use projfields::present::ValuePresenter;
use projfields::reader::{load_project, parse_project};
use projfields::report::{field_listing, populated_listing, project_report, raw_listing, typed_listing};
use projfields::writer::{Charset, write_collection, write_project};

const SCHEDULE: &str = r#"{
    "tasks": [
        {"ID": 1, "Unique ID": 1, "Name": "Task A", "Start": "2024-01-05T08:00:00",
         "Duration": "5d", "Cost": 1234.5, "Milestone": false, "Priority": 500, "Notes": null},
        {"ID": 2, "Name": "Task B"}
    ],
    "resources": [
        {"ID": 1, "Name": "Zoë"}
    ]
}"#;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("projfields_{}_{}", std::process::id(), name))
}

#[test]
fn parses_entities_against_built_in_catalogs() {
    let project = parse_project(SCHEDULE).expect("project");
    assert_eq!(project.tasks().len(), 2);
    assert_eq!(project.resources().len(), 1);

    let tasks = FieldCatalog::tasks();
    let first = project.tasks().find(1).expect("task 1");
    assert_eq!(first.name(), Some("Task A"));
    assert_eq!(first.get(tasks.field("Cost").unwrap()), Some(&Value::currency(1234.5).unwrap()));
    assert_eq!(first.get(tasks.field("Priority").unwrap()).map(|v| v.declared_type()), Some(DeclaredType::Opaque));
    // null is the same as absent
    assert!(first.get(tasks.field("Notes").unwrap()).is_none());
    assert!(!project.tasks().populated_fields().contains(tasks.field("Notes").unwrap()));
}

#[test]
fn plain_dates_are_midnight() {
    let project = parse_project(r#"{"tasks": [{"ID": 1, "Start": "2024-03-01"}]}"#).unwrap();
    let start = FieldCatalog::tasks().field("Start").unwrap();
    assert_eq!(project.tasks().records()[0].get(start).unwrap().to_string(), "2024-03-01 00:00:00");
}

#[test]
fn unknown_fields_are_unreadable() {
    let err = parse_project(r#"{"tasks": [{"ID": 1, "Colour": "red"}]}"#).unwrap_err();
    match err {
        ProjfieldsError::UnreadableFormat { message } => assert!(message.contains("Colour")),
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn unconvertible_values_are_unreadable() {
    let err = parse_project(r#"{"tasks": [{"ID": 1, "Start": "next tuesday"}]}"#).unwrap_err();
    assert!(matches!(err, ProjfieldsError::UnreadableFormat { .. }));
    let err = parse_project(r#"{"tasks": [{"ID": "one"}]}"#).unwrap_err();
    assert!(matches!(err, ProjfieldsError::UnreadableFormat { .. }));
    let err = parse_project("not json").unwrap_err();
    assert!(matches!(err, ProjfieldsError::UnreadableFormat { .. }));
}

#[test]
fn missing_file_is_reported() {
    let err = load_project(temp_path("does_not_exist.json")).unwrap_err();
    assert!(matches!(err, ProjfieldsError::FileNotFound(_)));
}

#[test]
fn loads_from_disk() {
    let path = temp_path("schedule.json");
    std::fs::write(&path, SCHEDULE).unwrap();
    let project = load_project(&path).expect("project");
    assert_eq!(project.tasks().len(), 2);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn listings_follow_the_record_layout() {
    let project = parse_project(SCHEDULE).unwrap();
    let presenter = ValuePresenter::default();
    let tasks = project.tasks();

    assert_eq!(field_listing(tasks.catalog()).len(), tasks.catalog().len());

    let raw = raw_listing(tasks);
    assert_eq!(raw[0], "1:\tTask A");
    assert!(raw.contains(&"\tCost:\t1234.5".to_string()));
    assert!(raw.contains(&"\tPriority:\t500".to_string()));
    assert!(raw.contains(&"2:\tTask B".to_string()));

    let typed = typed_listing(tasks, &presenter).unwrap();
    assert!(typed.contains(&"\tCost:\t$1,234.50".to_string()));
    assert!(typed.contains(&"\tStart:\t1/5/2024 8:00:00 AM".to_string()));
    assert!(typed.contains(&"\tMilestone:\tFalse".to_string()));
    assert!(!typed.iter().any(|l| l.starts_with("\tPriority:")));

    // Task B only has ID and Name, so nothing else follows its header
    let populated = populated_listing(tasks);
    let b = populated.iter().position(|l| l == "2:\tTask B").unwrap();
    assert_eq!(&populated[b + 1..], &["\tID:\t2".to_string(), "\tName:\tTask B".to_string()]);
}

#[test]
fn report_combines_all_listings() {
    let project = parse_project(SCHEDULE).unwrap();
    let lines = project_report(&project, &ValuePresenter::default()).unwrap();
    // raw and populated listings show the opaque value, the typed one skips it
    assert_eq!(lines.iter().filter(|l| *l == "\tPriority:\t500").count(), 2);
    assert!(lines.contains(&"1:\tZoë".to_string()));
}

#[test]
fn charset_names() {
    assert_eq!(Charset::for_name("UTF8").unwrap(), Charset::Utf8);
    assert_eq!(Charset::for_name("utf-8").unwrap(), Charset::Utf8);
    assert_eq!(Charset::for_name("US-ASCII").unwrap(), Charset::UsAscii);
    assert_eq!(Charset::for_name("iso-8859-1").unwrap(), Charset::Latin1);
    assert_eq!(Charset::for_name("UTF-16LE").unwrap(), Charset::Utf16Le);
    assert!(matches!(Charset::for_name("EBCDIC"), Err(ProjfieldsError::UnsupportedEncoding(_))));
}

#[test]
fn charset_encoding() {
    assert_eq!(Charset::UsAscii.encode("Zoë"), b"Zo?".to_vec());
    assert_eq!(Charset::Latin1.encode("Zoë"), vec![b'Z', b'o', 0xEB]);
    assert_eq!(Charset::Latin1.encode("€"), b"?".to_vec());
    assert_eq!(Charset::Utf16Le.encode("A"), vec![0x41, 0x00]);
    assert_eq!(Charset::Utf16.encode("A"), vec![0xFE, 0xFF, 0x00, 0x41]);
}

#[test]
fn writes_report_in_named_charset() {
    let project = parse_project(SCHEDULE).unwrap();
    let presenter = ValuePresenter::default();

    let utf8 = temp_path("report_utf8.txt");
    write_project(&project, &utf8, "UTF8", &presenter).expect("write");
    let text = std::fs::read_to_string(&utf8).unwrap();
    assert!(text.contains("1:\tZoë\n"));
    assert!(text.contains("\tCost:\t$1,234.50\n"));
    let _ = std::fs::remove_file(&utf8);

    let ascii = temp_path("report_ascii.txt");
    write_project(&project, &ascii, "US-ASCII", &presenter).expect("write");
    let bytes = std::fs::read(&ascii).unwrap();
    assert!(bytes.is_ascii());
    assert!(String::from_utf8(bytes).unwrap().contains("1:\tZo?\n"));
    let _ = std::fs::remove_file(&ascii);
}

#[test]
fn writes_a_single_collection() {
    let project = parse_project(SCHEDULE).unwrap();
    let path = temp_path("tasks.txt");
    write_collection(project.tasks(), &path, "UTF8").expect("write");
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("1:\tTask A\n"));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn write_errors_surface() {
    let project = parse_project(SCHEDULE).unwrap();
    let presenter = ValuePresenter::default();
    let err = write_project(&project, temp_path("never.txt"), "EBCDIC", &presenter).unwrap_err();
    assert!(matches!(err, ProjfieldsError::UnsupportedEncoding(_)));
    // a directory cannot be written as a file
    let err = write_project(&project, std::env::temp_dir(), "UTF8", &presenter).unwrap_err();
    assert!(matches!(err, ProjfieldsError::WriteFailure(_)));
}
