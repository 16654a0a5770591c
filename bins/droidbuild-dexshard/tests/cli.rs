//! End-to-end tests for the dex-sharding action binary.
//!
//! These exercise the paths that run without the external desugarer and
//! dex compiler: option validation, flag-file expansion, and the
//! empty-input shortcut that writes valid empty shard archives.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

fn action() -> Command {
    Command::cargo_bin("droidbuild-dexshard").unwrap()
}

/// Write a zip with the given entries (a resources-only jar by default).
fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    let file = File::create(path).unwrap();
    let mut writer = ZipWriter::new(file);
    for (name, data) in entries {
        writer.start_file(*name, FileOptions::default()).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap();
}

struct Fixture {
    _dir: tempfile::TempDir,
    android_jar: PathBuf,
    input_jar: PathBuf,
    root: PathBuf,
}

/// An input jar with no class or dex entries, plus a stand-in android.jar.
fn codeless_fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_path_buf();

    let android_jar = root.join("android.jar");
    File::create(&android_jar).unwrap();

    let input_jar = root.join("input.jar");
    write_zip(
        &input_jar,
        &[("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0\n")],
    );

    Fixture {
        _dir: dir,
        android_jar,
        input_jar,
        root,
    }
}

fn assert_empty_zip(path: &Path) {
    let archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    assert_eq!(archive.len(), 0, "{} should be a zero-entry zip", path.display());
}

#[test]
fn missing_required_flags_fails() {
    action()
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn missing_input_jar_reports_path() {
    let fixture = codeless_fixture();
    let absent = fixture.root.join("no-such-input.jar");

    action()
        .arg(format!("-android_jar={}", fixture.android_jar.display()))
        .arg(format!("-in={}", absent.display()))
        .arg(format!("-out={}", fixture.root.join("out.zip").display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such-input.jar"));
}

#[test]
fn shard_count_above_limit_rejected() {
    let fixture = codeless_fixture();
    let outs: Vec<String> = (0..257)
        .map(|i| fixture.root.join(format!("out{i}.zip")).display().to_string())
        .collect();

    action()
        .arg(format!("-android_jar={}", fixture.android_jar.display()))
        .arg(format!("-in={}", fixture.input_jar.display()))
        .arg(format!("-out={}", outs.join(",")))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unreasonable shard count"));
}

#[test]
fn codeless_input_writes_empty_shards() {
    let fixture = codeless_fixture();
    let outs: Vec<PathBuf> = (0..3).map(|i| fixture.root.join(format!("out{i}.zip"))).collect();
    let out_flag: Vec<String> = outs.iter().map(|p| p.display().to_string()).collect();

    action()
        .arg(format!("-android_jar={}", fixture.android_jar.display()))
        .arg(format!("-in={}", fixture.input_jar.display()))
        .arg(format!("-out={}", out_flag.join(",")))
        .assert()
        .success();

    for out in &outs {
        assert!(out.is_file(), "{} missing", out.display());
        assert!(std::fs::metadata(out).unwrap().len() > 0);
        assert_empty_zip(out);
    }
}

#[test]
fn space_separated_flag_values_accepted() {
    let fixture = codeless_fixture();
    let out = fixture.root.join("out.zip");

    action()
        .args(["-android_jar", &fixture.android_jar.display().to_string()])
        .args(["-in", &fixture.input_jar.display().to_string()])
        .args(["-out", &out.display().to_string()])
        .args(["-min_sdk_version", "24"])
        .args(["--persistent_worker", "true"])
        .assert()
        .success();

    assert_empty_zip(&out);
}

#[test]
fn flagfile_replaces_argument_list() {
    let fixture = codeless_fixture();
    let out_a = fixture.root.join("a.zip");
    let out_b = fixture.root.join("b.zip");

    let flagfile = fixture.root.join("params");
    let mut file = File::create(&flagfile).unwrap();
    writeln!(file, "-android_jar={}", fixture.android_jar.display()).unwrap();
    writeln!(file, "-in={}", fixture.input_jar.display()).unwrap();
    writeln!(file, "-out={},{}", out_a.display(), out_b.display()).unwrap();
    drop(file);

    action()
        .arg(format!("-flagfile={}", flagfile.display()))
        .assert()
        .success();

    assert_empty_zip(&out_a);
    assert_empty_zip(&out_b);
}

#[test]
fn missing_flagfile_fails() {
    action()
        .arg("-flagfile=/nonexistent/params")
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/params"));
}
