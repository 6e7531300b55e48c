use std::io::Write;
use std::path::PathBuf;

use morph_dict::{Dictionary, LoadMode};
use tempfile::NamedTempFile;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("dict_opcorpora.txt")
}

#[test]
fn loads_fixture_in_both_modes() {
    for mode in [LoadMode::Mmap, LoadMode::Owned] {
        let dict = Dictionary::load_with_mode(fixture_path(), mode).expect("load fixture");
        assert_eq!(dict.entry_count(), 10);
        let reading = dict.analyses_for("РАЗРАБОТКИ").next().expect("form present");
        assert_eq!(reading.normalized_form, "РАЗРАБОТКА");
        assert_eq!(reading.part_of_speech, "NOUN");
    }
}

#[test]
fn keeps_homograph_readings_in_file_order() {
    let dict = Dictionary::load(fixture_path()).expect("load fixture");
    let lemmas: Vec<_> = dict
        .analyses_for("СТАЛИ")
        .map(|a| a.normalized_form.clone())
        .collect();
    assert_eq!(lemmas, vec!["СТАЛЬ".to_string(), "СТАТЬ".to_string()]);
}

#[test]
fn missing_file_is_an_error() {
    let err = Dictionary::load("/definitely/not/here.txt").unwrap_err();
    assert!(err.to_string().contains("open"));
}

#[test]
fn malformed_file_reports_path_and_line() {
    let mut file = NamedTempFile::new().expect("temp file");
    writeln!(file, "1\nКОТ\tNOUN\n\nПЁС\tNOUN").unwrap();
    let err = Dictionary::load_with_mode(file.path(), LoadMode::Owned).unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("parse dictionary"));
    assert!(chain.contains("line 4"));
}
