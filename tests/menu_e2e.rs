use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

use pendata::codec::positional;
use pendata::model::{Contact, Date, Nisn, Sex, Student};

fn pendata_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pendata").unwrap();
    // Keep config and logs inside the test sandbox
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("XDG_DATA_HOME", home.path().join(".local/share"))
        .current_dir(home.path());
    cmd
}

fn ana() -> Student {
    Student {
        nisn: Nisn::parse("1234567890").unwrap(),
        name: "Ana".to_string(),
        sex: Sex::Female,
        birth_place: "Jakarta".to_string(),
        birth_date: Date::new(1, 1, 2005).unwrap(),
        address: "Jl. A".to_string(),
        phone: None,
        father: Some(Contact {
            name: "Pak Budi".to_string(),
            phone: Some("081234".to_string()),
        }),
        mother: None,
        guardian: None,
    }
}

fn write_data_file(home: &TempDir, name: &str, records: &[Student]) -> std::path::PathBuf {
    let mut buf = Vec::new();
    positional::encode(&mut buf, records).unwrap();
    let path = home.path().join(name);
    fs::write(&path, buf).unwrap();
    path
}

#[test]
fn add_save_exit_writes_a_positional_file() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("siswa.irf");

    let script = format!(
        "1\n1234567890\nAna\nP\nJakarta\n1-1-2005\nJl. A\n\n\n\n\n5\n{}\n6\n",
        out.display()
    );

    pendata_cmd(&home)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Student 1234567890 added"))
        .stdout(predicate::str::contains("Saved 1 student"));

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("PDSiswa1\n"));
    assert!(text.contains("Ana"));
    assert!(text.contains("1-1-2005"));
}

#[test]
fn startup_argument_loads_before_the_menu() {
    let home = TempDir::new().unwrap();
    let path = write_data_file(&home, "term1.irf", &[ana()]);

    pendata_cmd(&home)
        .arg(&path)
        .write_stdin("3\n1234567890\n6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded 1 student"))
        .stdout(predicate::str::contains("Ana"))
        .stdout(predicate::str::contains("Jakarta"))
        .stdout(predicate::str::contains("Pak Budi"));
}

#[test]
fn wrong_header_warns_but_still_loads() {
    let home = TempDir::new().unwrap();
    let path = write_data_file(&home, "odd.irf", &[ana()]);
    let text = fs::read_to_string(&path)
        .unwrap()
        .replacen("PDSiswa1", "WRONGHEADER", 1);
    fs::write(&path, text).unwrap();

    pendata_cmd(&home)
        .arg(&path)
        .write_stdin("6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("unrecognized header"))
        .stdout(predicate::str::contains("Loaded 1 student"));
}

#[test]
fn rejected_duplicate_keeps_the_menu_alive() {
    let home = TempDir::new().unwrap();
    let path = write_data_file(&home, "term1.irf", &[ana()]);

    // Adding the NISN that was just loaded is refused immediately
    pendata_cmd(&home)
        .arg(&path)
        .write_stdin("1\n1234567890\n6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("already registered"))
        .stdout(predicate::str::contains("Goodbye"));
}

#[test]
fn delete_via_edit_menu_removes_the_record() {
    let home = TempDir::new().unwrap();
    let path = write_data_file(&home, "term1.irf", &[ana()]);

    // edit -> [12] delete, then view shows nothing for that NISN
    pendata_cmd(&home)
        .arg(&path)
        .write_stdin("2\n1234567890\n12\n3\n1234567890\n6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted"))
        .stdout(predicate::str::contains("No student with NISN 1234567890"));
}

#[test]
fn garbage_menu_input_reprompts_instead_of_crashing() {
    let home = TempDir::new().unwrap();

    pendata_cmd(&home)
        .write_stdin("\nabc\n99\n6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid choice"))
        .stdout(predicate::str::contains("Goodbye"));
}
