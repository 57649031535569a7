//! Integration tests for the neo-rom CLI binary.
//!
//! Builds a small ROM directory on disk, converts it with the `neo-rom`
//! binary and inspects the result with `dump`.

use std::path::Path;

use assert_cmd::Command;
use byteorder::{ByteOrder, LittleEndian};
use predicates::prelude::*;
use tempfile::TempDir;

// ──────────────────────── helpers ────────────────────────

/// Write a minimal cartridge: one P, S, M, V ROM and a C pair.
fn write_rom_dir(dir: &Path) {
    let files: [(&str, u8, usize); 6] = [
        ("055-p1.p1", 0x11, 0x1_0000),
        ("055-s1.s1", 0x22, 0x2_0000),
        ("055-m1.m1", 0x33, 0x1_0000),
        ("055-v1.v1", 0x44, 0x2_0000),
        ("055-c1.c1", 0x55, 0x2_0000),
        ("055-c2.c2", 0x66, 0x2_0000),
    ];
    for (name, fill, len) in files {
        std::fs::write(dir.join(name), vec![fill; len]).expect("Failed to write ROM");
    }
    std::fs::write(dir.join("readme.html"), b"<html></html>").expect("Failed to write html");
}

/// Get a `Command` for the `neo-rom` CLI binary.
#[allow(deprecated)]
fn neo_rom_cmd() -> Command {
    Command::cargo_bin("neo-rom").expect("Failed to find `neo-rom` binary")
}

/// Create a ROM directory and convert it into `<tmp>/kof94.neo`.
fn convert_fixture(extra_args: &[&str]) -> (TempDir, std::path::PathBuf) {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let roms = tmp.path().join("roms");
    std::fs::create_dir(&roms).expect("Failed to create ROM dir");
    write_rom_dir(&roms);

    let out = tmp.path().join("kof94.neo");
    neo_rom_cmd()
        .arg("convert")
        .arg("-i")
        .arg(&roms)
        .arg("-o")
        .arg(&out)
        .args(extra_args)
        .assert()
        .success()
        .stdout(predicate::str::contains("built to"));

    (tmp, out)
}

// ──────────────────────── tests ─────────────────────────

#[test]
fn test_convert_writes_container() {
    let (_tmp, out) = convert_fixture(&["-n", "King of Fighters 94", "-g", "fighting", "-y", "1994", "--ngh", "55"]);

    let bytes = std::fs::read(&out).expect("Failed to read output");
    assert_eq!(&bytes[..4], b"NEO\x01");

    let sizes: Vec<u32> = (0..6)
        .map(|i| LittleEndian::read_u32(&bytes[4 + i * 4..8 + i * 4]))
        .collect();
    assert_eq!(sizes, vec![0x1_0000, 0x2_0000, 0x1_0000, 0x2_0000, 0, 0x4_0000]);
    assert_eq!(bytes.len(), 4096 + sizes.iter().sum::<u32>() as usize);

    assert_eq!(LittleEndian::read_u32(&bytes[0x1C..0x20]), 1994);
    assert_eq!(LittleEndian::read_u32(&bytes[0x20..0x24]), 9);
    assert_eq!(LittleEndian::read_u32(&bytes[0x28..0x2C]), 0x55);

    // C1 and C2 are interleaved byte by byte.
    let c_offset = bytes.len() - 0x4_0000;
    assert_eq!(&bytes[c_offset..c_offset + 4], &[0x55, 0x66, 0x55, 0x66]);
}

#[test]
fn test_convert_defaults() {
    let (_tmp, out) = convert_fixture(&[]);

    neo_rom_cmd()
        .arg("dump")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Name:         kof94"))
        .stdout(predicate::str::contains("Manufacturer: SNK"))
        .stdout(predicate::str::contains("Genre:        Other"))
        .stdout(predicate::str::contains("NGH:          (none)"));
}

#[test]
fn test_dump_human_output() {
    let (_tmp, out) = convert_fixture(&["-n", "KOF94", "-g", "Fighting", "-y", "1994", "--ngh", "55", "--screenshot", "3"]);

    neo_rom_cmd()
        .arg("dump")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Name:         KOF94"))
        .stdout(predicate::str::contains("Year:         1994"))
        .stdout(predicate::str::contains("Genre:        Fighting"))
        .stdout(predicate::str::contains("NGH:          55"))
        .stdout(predicate::str::contains("Screenshot:   3"))
        .stdout(predicate::str::contains("0x00040000"))
        .stdout(predicate::str::contains("262144"));
}

#[test]
fn test_dump_json() {
    let (_tmp, out) = convert_fixture(&["-n", "KOF94", "-g", "Fighting", "-y", "1994", "--ngh", "55"]);

    let output = neo_rom_cmd()
        .arg("dump")
        .arg(&out)
        .arg("--json")
        .output()
        .expect("Failed to run dump");
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("dump --json is not valid JSON");
    assert_eq!(json["version"], 1);
    assert_eq!(json["metadata"]["name"], "KOF94");
    assert_eq!(json["metadata"]["year"], 1994);
    assert_eq!(json["metadata"]["genre"], "Fighting");
    assert_eq!(json["metadata"]["ngh"], "55");
    assert_eq!(json["sizes"]["color_tile"], 0x4_0000);
    assert_eq!(json["sizes"]["voice2"], 0);
}

#[test]
fn test_convert_missing_input_dir() {
    let tmp = TempDir::new().unwrap();

    neo_rom_cmd()
        .arg("convert")
        .arg("-i")
        .arg(tmp.path().join("nope"))
        .arg("-o")
        .arg(tmp.path().join("out.neo"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_convert_missing_output_dir() {
    let tmp = TempDir::new().unwrap();

    neo_rom_cmd()
        .arg("convert")
        .arg("-i")
        .arg(tmp.path())
        .arg("-o")
        .arg(tmp.path().join("missing").join("out.neo"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Output directory does not exist"));
}

#[test]
fn test_convert_unknown_genre() {
    let tmp = TempDir::new().unwrap();

    neo_rom_cmd()
        .arg("convert")
        .arg("-i")
        .arg(tmp.path())
        .arg("-o")
        .arg(tmp.path().join("out.neo"))
        .arg("-g")
        .arg("racing")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Fighting"));
}

#[test]
fn test_convert_rejects_long_fields() {
    let tmp = TempDir::new().unwrap();

    neo_rom_cmd()
        .arg("convert")
        .arg("-i")
        .arg(tmp.path())
        .arg("-o")
        .arg(tmp.path().join("out.neo"))
        .arg("-n")
        .arg("A".repeat(34))
        .assert()
        .failure()
        .stderr(predicate::str::contains("limit is 33 bytes"));

    neo_rom_cmd()
        .arg("convert")
        .arg("-i")
        .arg(tmp.path())
        .arg("-o")
        .arg(tmp.path().join("out.neo"))
        .arg("-m")
        .arg("B".repeat(18))
        .assert()
        .failure()
        .stderr(predicate::str::contains("limit is 17 bytes"));
}

#[test]
fn test_dump_rejects_non_neo_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("garbage.neo");
    std::fs::write(&path, vec![0u8; 200]).unwrap();

    neo_rom_cmd()
        .arg("dump")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read NEO header"));
}
