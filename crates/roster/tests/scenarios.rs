//! End-to-end sessions: scripted input through the menu, checked against the
//! backing file.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use roster::{Choice, Menu, Outcome, Roster, Store, Student};
use tempfile::{tempdir, TempDir};

type ScriptedMenu = Menu<Cursor<Vec<u8>>, Vec<u8>>;

fn data_file(dir: &TempDir) -> PathBuf {
    dir.path().join("data").join("students.json")
}

fn open(path: &Path, input: &str) -> ScriptedMenu {
    Menu::open(
        Store::new(path),
        Cursor::new(input.as_bytes().to_vec()),
        Vec::new(),
    )
    .unwrap()
}

fn seeded(dir: &TempDir, students: Vec<Student>) -> PathBuf {
    let path = data_file(dir);
    let store = Store::new(&path);
    store.ensure_ready().unwrap();
    store.save(&Roster::from(students)).unwrap();
    path
}

fn ada() -> Student {
    Student::new("S1", "Ada", "Lovelace", 28)
}

#[test]
fn add_to_empty_store_then_view() {
    let dir = tempdir().unwrap();
    let path = data_file(&dir);
    let mut menu = open(&path, "1\nS1\nAda\nLovelace\n28\n2\n0\n");

    menu.run().unwrap();

    let out = String::from_utf8(menu.into_output()).unwrap();
    let row = format!("{:<12}{:<16}{:<16}{:<4}", "S1", "Ada", "Lovelace", 28);
    assert_eq!(out.matches(&row).count(), 1);
    assert_eq!(Store::new(&path).load().unwrap().students(), [ada()]);
}

#[test]
fn duplicate_add_is_refused() {
    let dir = tempdir().unwrap();
    let path = seeded(&dir, vec![ada()]);
    let mut menu = open(&path, "S1\n");

    assert_eq!(menu.dispatch(Choice::Add).unwrap(), Outcome::Duplicate);
    assert_eq!(menu.roster().len(), 1);
    assert_eq!(Store::new(&path).load().unwrap().len(), 1);
}

#[test]
fn find_hit_and_miss() {
    let dir = tempdir().unwrap();
    let path = seeded(&dir, vec![ada()]);
    let mut menu = open(&path, "S1\nS9\n");

    assert_eq!(menu.dispatch(Choice::Find).unwrap(), Outcome::Found(ada()));
    assert_eq!(menu.dispatch(Choice::Find).unwrap(), Outcome::NotFound);
}

#[test]
fn update_age_only() {
    let dir = tempdir().unwrap();
    let path = seeded(&dir, vec![ada()]);
    let mut menu = open(&path, "S1\n\n\n29\n");

    assert_eq!(menu.dispatch(Choice::Update).unwrap(), Outcome::Updated);

    let reloaded = Store::new(&path).load().unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.students()[0], Student::new("S1", "Ada", "Lovelace", 29));
}

#[test]
fn delete_cancel_then_confirm() {
    let dir = tempdir().unwrap();
    let path = seeded(&dir, vec![ada()]);
    let mut menu = open(&path, "S1\nn\nS1\ny\n");

    assert_eq!(menu.dispatch(Choice::Delete).unwrap(), Outcome::Cancelled);
    assert!(Store::new(&path).load().unwrap().contains_id("S1"));

    assert_eq!(menu.dispatch(Choice::Delete).unwrap(), Outcome::Deleted);
    assert!(Store::new(&path).load().unwrap().is_empty());
}

#[test]
fn corrupt_store_loads_empty() {
    let dir = tempdir().unwrap();
    let path = data_file(&dir);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "[{ this is not json").unwrap();

    let menu = open(&path, "");

    assert!(menu.roster().is_empty());
}

#[test]
fn session_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = data_file(&dir);

    let mut first = open(
        &path,
        "1\nS1\nAda\nLovelace\n28\n1\nS2\nAlan\nTuring\n41\n0\n",
    );
    first.run().unwrap();

    let mut second = open(&path, "4\nS1\ny\n3\nS2\nAlan M.\n\n42\n0\n");
    second.run().unwrap();

    assert_eq!(
        Store::new(&path).load().unwrap().students(),
        [Student::new("S2", "Alan M.", "Turing", 42)]
    );
}
