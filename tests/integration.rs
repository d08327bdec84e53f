#[macro_use]
extern crate assert_matches;

use std::fs;
use std::path::Path;
use std::process::Command;
use std::sync::Once;

use tempfile::{tempdir, TempDir};

use hocon_json::{HoconConfig, HoconError};

static INIT: Once = Once::new();

fn setup() {
    INIT.call_once(|| {
        stderrlog::new().verbosity(2).quiet(false).init().unwrap();
    });
}

/// Write `files` into a fresh directory; the first one is the root file.
fn fixture(files: &[(&str, &str)]) -> TempDir {
    let dir = tempdir().unwrap();
    for (name, content) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
    dir
}

fn convert(root: &Path) -> Result<String, HoconError> {
    HoconConfig::from_file(root)?.to_json_string()
}

#[test]
fn converts_nested_object() {
    setup();
    let dir = fixture(&[("main.conf", "{a: 1, b: {c: 2}}")]);
    assert_eq!(
        convert(&dir.path().join("main.conf")).unwrap(),
        r#"{"a":"1","b":{"c":"2"}}"#
    );
}

#[test]
fn converts_array_with_object() {
    setup();
    let dir = fixture(&[("main.conf", "a: [1, 2, {b: 3}]")]);
    assert_eq!(
        convert(&dir.path().join("main.conf")).unwrap(),
        r#"{"a":["1","2",{"b":"3"}]}"#
    );
}

#[test]
fn later_field_overrides_include() {
    setup();
    let dir = fixture(&[
        ("main.conf", "include \"other.conf\"\nx: 2"),
        ("other.conf", "{x: 1}"),
    ]);
    assert_eq!(convert(&dir.path().join("main.conf")).unwrap(), r#"{"x":"2"}"#);
}

#[test]
fn later_include_overrides_field() {
    setup();
    let dir = fixture(&[
        ("main.conf", "x: 2\ninclude \"other.conf\""),
        ("other.conf", "{x: 1}"),
    ]);
    assert_eq!(convert(&dir.path().join("main.conf")).unwrap(), r#"{"x":"1"}"#);
}

#[test]
fn include_matching_nothing_still_loads() {
    setup();
    let dir = fixture(&[("main.conf", "include \"missing-*.conf\"\nok = yes")]);
    assert_eq!(convert(&dir.path().join("main.conf")).unwrap(), r#"{"ok":"yes"}"#);
}

#[test]
fn glob_include_merges_in_name_order() {
    setup();
    let dir = fixture(&[
        ("main.conf", "include \"conf.d/*.conf\""),
        ("conf.d/20-override.conf", "server { port = 9090 }"),
        ("conf.d/10-base.conf", "server { host = localhost, port = 8080 }"),
    ]);
    assert_eq!(
        convert(&dir.path().join("main.conf")).unwrap(),
        r#"{"server":{"host":"localhost","port":"9090"}}"#
    );
}

#[test]
fn substitutions_cross_included_files() {
    setup();
    let dir = fixture(&[
        ("main.conf", "include \"defaults.conf\"\nname = svc\nurl = \"http://\"${host}\"/\"${name}"),
        ("defaults.conf", "host = example.org\nalias = ${name}"),
    ]);
    assert_eq!(
        convert(&dir.path().join("main.conf")).unwrap(),
        r#"{"host":"example.org","alias":"svc","name":"svc","url":"http://example.org/svc"}"#
    );
}

#[test]
fn nested_includes_resolve_next_to_their_file() {
    setup();
    let dir = fixture(&[
        ("main.conf", "include \"a/outer.conf\""),
        ("a/outer.conf", "include \"b/inner.conf\"\nouter = 1"),
        ("a/b/inner.conf", "inner = 2"),
    ]);
    assert_eq!(
        convert(&dir.path().join("main.conf")).unwrap(),
        r#"{"inner":"2","outer":"1"}"#
    );
}

#[test]
fn optional_substitution_removes_field() {
    setup();
    let dir = fixture(&[(
        "main.conf",
        "a = ${?HOCON_JSON_INTEGRATION_UNSET}\nb = keep",
    )]);
    assert_eq!(convert(&dir.path().join("main.conf")).unwrap(), r#"{"b":"keep"}"#);
}

#[test]
fn unresolved_substitution_is_fatal() {
    setup();
    let dir = fixture(&[("main.conf", "a = ${HOCON_JSON_INTEGRATION_UNSET}")]);
    let result = convert(&dir.path().join("main.conf"));
    assert_matches!(result, Err(HoconError::UnresolvedSubstitution { line: 1, column: 5, .. }));
}

#[test]
fn required_include_must_match() {
    setup();
    let dir = fixture(&[("main.conf", "include required(\"missing.conf\")")]);
    let result = convert(&dir.path().join("main.conf"));
    assert_matches!(result, Err(HoconError::FileError { code: Some(303), .. }));
}

#[test]
fn include_cycle_is_fatal() {
    setup();
    let dir = fixture(&[("main.conf", "include \"main.conf\"\na = 1")]);
    let result = convert(&dir.path().join("main.conf"));
    assert_matches!(result, Err(HoconError::IncludeCycle { .. }));
}

#[test]
fn syntax_error_in_include_is_fatal() {
    setup();
    let dir = fixture(&[
        ("main.conf", "include \"broken.conf\""),
        ("broken.conf", "a = [1, 2"),
    ]);
    let result = convert(&dir.path().join("main.conf"));
    assert_matches!(result, Err(HoconError::UnexpectedEof { code: Some(209), .. }));
}

#[test]
fn binary_prints_json_on_stdout() {
    let dir = fixture(&[("main.conf", "{a: 1, b: {c: 2}}")]);
    let output = Command::new(env!("CARGO_BIN_EXE_hocon2json"))
        .arg("--hocon")
        .arg(dir.path().join("main.conf"))
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "{\"a\":\"1\",\"b\":{\"c\":\"2\"}}\n"
    );
}

#[test]
fn binary_warns_about_unmatched_include() {
    let dir = fixture(&[("main.conf", "include \"missing-*.conf\"\na = 1")]);
    let output = Command::new(env!("CARGO_BIN_EXE_hocon2json"))
        .arg("--hocon")
        .arg(dir.path().join("main.conf"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not match any file"));
}

#[test]
fn binary_fails_with_status_one() {
    let dir = fixture(&[("main.conf", "a = ${HOCON_JSON_INTEGRATION_UNSET}")]);
    let output = Command::new(env!("CARGO_BIN_EXE_hocon2json"))
        .arg("--hocon")
        .arg(dir.path().join("main.conf"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Error: "));
}

#[test]
fn unreadable_include_is_fatal() {
    setup();
    let dir = fixture(&[("main.conf", "include \"bad.conf\"\na = 1")]);
    fs::write(dir.path().join("bad.conf"), [0xffu8, 0xfe, 0x00]).unwrap();
    let result = convert(&dir.path().join("main.conf"));
    assert_matches!(result, Err(HoconError::FileError { code: Some(302), .. }));
}

#[test]
fn binary_fails_on_unreadable_include() {
    let dir = fixture(&[("main.conf", "include \"bad.conf\"")]);
    fs::write(dir.path().join("bad.conf"), [0xffu8, 0xfe, 0x00]).unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_hocon2json"))
        .arg("--hocon")
        .arg(dir.path().join("main.conf"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Code: 302"));
}
