use std::fs;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::tempdir;

fn bin() -> Command {
    Command::cargo_bin("hdrgen").unwrap()
}

#[test]
fn no_arguments_prints_help_and_exits_zero() {
    bin().assert().success().stdout(contains("Usage"));
}

#[test]
fn flags_without_source_files_is_a_configuration_error() {
    bin().args(["--verbose"]).assert().failure().stderr(contains("no source files provided"));
}

#[test]
fn per_file_header_mode_writes_sibling_h_file() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("widget.c");
    fs::write(&source, "@ int widget_make(void);\n").unwrap();

    bin().current_dir(dir.path()).arg("widget.c").assert().success();

    let header = fs::read_to_string(dir.path().join("widget.h")).unwrap();
    assert!(header.contains("int widget_make(void);"));
}

#[test]
fn strip_mode_overwrites_source_in_place() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("widget.c");
    fs::write(&source, "@ int widget_make(void);\nint other(void) { return 0; }\n").unwrap();

    bin().current_dir(dir.path()).args(["--strip", "widget.c"]).assert().success();

    let stripped = fs::read_to_string(&source).unwrap();
    assert!(!stripped.contains('@'));
    assert!(stripped.contains("int other(void)"));
}

#[test]
fn header_dir_with_root_dir_mirrors_tree() {
    let dir = tempdir().unwrap();
    let src_dir = dir.path().join("src");
    fs::create_dir_all(src_dir.join("nested")).unwrap();
    fs::write(src_dir.join("nested/widget.c"), "@ int widget_make(void);\n").unwrap();

    bin()
        .current_dir(dir.path())
        .args(["-r", "src", "-d", "include", "src/nested/widget.c"])
        .assert()
        .success();

    let header = fs::read_to_string(dir.path().join("include/nested/widget.h")).unwrap();
    assert!(header.contains("widget_make"));
}

#[test]
fn single_output_merges_multiple_sources() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.c"), "@ int a_fn(void);\n").unwrap();
    fs::write(dir.path().join("b.c"), "@ int b_fn(void);\n").unwrap();

    bin()
        .current_dir(dir.path())
        .args(["-s", "merged.h", "a.c", "b.c"])
        .assert()
        .success();

    let merged = fs::read_to_string(dir.path().join("merged.h")).unwrap();
    assert!(merged.contains("a_fn"));
    assert!(merged.contains("b_fn"));
}

#[test]
fn include_guards_wrap_the_header() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("widget.c"), "@ int widget_make(void);\n").unwrap();

    bin().current_dir(dir.path()).args(["-G", "widget.c"]).assert().success();

    let header = fs::read_to_string(dir.path().join("widget.h")).unwrap();
    assert!(header.starts_with("#ifndef gen_"));
    assert!(header.contains("#endif /*"));
}

#[test]
fn root_dir_without_header_dir_is_a_configuration_error() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("widget.c"), "@ int widget_make(void);\n").unwrap();

    bin()
        .current_dir(dir.path())
        .args(["-r", ".", "widget.c"])
        .assert()
        .failure()
        .stderr(contains("--root-dir requires --header-dir"));
}
