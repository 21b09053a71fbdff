use std::fs;
use tempfile::TempDir;

use std::path::Path;

use newslens_core::corpus::{load_corpus, load_document, same_file};
use newslens_core::Error;

#[test]
fn load_corpus_reads_txt_files_in_path_order() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(dir.join("b.txt"), "second body").unwrap();
    fs::write(dir.join("a.txt"), "first body").unwrap();
    fs::write(dir.join("notes.md"), "ignored").unwrap();
    fs::create_dir(dir.join("nested")).unwrap();
    fs::write(dir.join("nested").join("c.txt"), "third body").unwrap();

    let docs = load_corpus(dir).expect("load corpus");

    let titles: Vec<&str> = docs.iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, ["a", "b", "c"], "sorted by path, markdown skipped");
    assert_eq!(docs[0].text, "first body");
    assert!(docs[2].url.ends_with("c.txt"));
}

#[test]
fn load_document_decodes_invalid_utf8_lossily() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("latin1.txt");
    fs::write(&path, [b'c', b'a', b'f', 0xE9]).unwrap();

    let doc = load_document(&path).expect("lossy read");
    assert!(doc.text.starts_with("caf"));
    assert_eq!(doc.title, "latin1");
}

#[test]
fn load_corpus_missing_directory_is_input_error() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope");
    assert!(matches!(load_corpus(&missing), Err(Error::Input(_))));
}

#[test]
fn load_corpus_empty_directory_returns_empty() {
    let tmp = TempDir::new().unwrap();
    let docs = load_corpus(tmp.path()).expect("empty dir is fine");
    assert!(docs.is_empty());
}

#[test]
fn same_file_sees_through_path_spelling() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("corpus");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("q.txt"), "query body").unwrap();
    fs::write(dir.join("a.txt"), "other body").unwrap();

    let query = load_document(&dir.join(".").join("q.txt")).unwrap();
    let docs = load_corpus(&dir).unwrap();
    let remaining: Vec<&str> = docs
        .iter()
        .filter(|d| !same_file(Path::new(&d.url), Path::new(&query.url)))
        .map(|d| d.title.as_str())
        .collect();
    assert_eq!(remaining, ["a"], "query file excluded from its own candidates");
}

#[test]
fn same_file_falls_back_to_raw_paths() {
    assert!(same_file(Path::new("/nonexistent/x.txt"), Path::new("/nonexistent/x.txt")));
    assert!(!same_file(Path::new("/nonexistent/x.txt"), Path::new("/nonexistent/y.txt")));
}
