// Copyright (c) The pspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests that run the `cargo-pspec` binary.

use camino_tempfile::Utf8TempDir;
use indoc::indoc;
use pretty_assertions::assert_eq;
use pspec_cli::CargoPspecCli;

mod pspec_cli;

const SINGLE_PASSING: &str = indoc! {r#"
    {"type": "run-started"}
    {"type": "result", "identifier": ["test_module", "test_a_feature_is_working"], "outcome": "passed"}
    {"type": "run-finished"}
"#};

const TWO_TESTS: &str = indoc! {r#"
    {"type": "result", "nodeid": "test_two_tests.py::test_01", "outcome": "passed"}
    {"type": "result", "nodeid": "test_two_tests.py::test_02", "outcome": "passed"}
"#};

fn temp_dir() -> Utf8TempDir {
    Utf8TempDir::new().expect("created temp dir")
}

#[test]
fn compact_single_passing_test() {
    let dir = temp_dir();
    let output = CargoPspecCli::new()
        .args(["--pspec"])
        .cwd(dir.path())
        .stdin(SINGLE_PASSING)
        .output();
    assert_eq!(output.stdout_as_str(), "test_module.py ✓\n\n1 passed\n");
}

#[test]
fn expanded_single_passing_test() {
    let dir = temp_dir();
    let output = CargoPspecCli::new()
        .args(["--pspec", "--verbose"])
        .cwd(dir.path())
        .stdin(SINGLE_PASSING)
        .output();
    assert_eq!(
        output.stdout_as_str(),
        indoc! {"
            test_module.py
              ✓ a feature is working

            1 passed
        "}
    );
}

#[test]
fn expanded_overrides_from_config_file() {
    let dir = temp_dir();
    std::fs::write(
        dir.path().join("pspec.toml"),
        indoc! {r#"
            [pspec]
            passed = "☂"
            failed = "⚡"
            skipped = "🥑"
        "#},
    )
    .expect("wrote config");

    let output = CargoPspecCli::new()
        .args(["--pspec"])
        .env("PSPEC_VERBOSE", "1")
        .cwd(dir.path())
        .stdin(
            r#"{"type": "result", "identifier": ["test_module", "test_failed_char"], "outcome": "failed"}"#,
        )
        .unchecked(true)
        .output();
    assert_eq!(output.exit_code(), Some(1), "{output}");
    assert_eq!(
        output.stdout_as_str(),
        indoc! {"
            test_module.py
              ⚡ failed char

            1 failed
        "}
    );
}

#[test]
fn verbose_env_falsey_keeps_compact() {
    let dir = temp_dir();
    let output = CargoPspecCli::new()
        .args(["--pspec"])
        .env("PSPEC_VERBOSE", "0")
        .cwd(dir.path())
        .stdin(SINGLE_PASSING)
        .output();
    assert_eq!(output.stdout_as_str(), "test_module.py ✓\n\n1 passed\n");
}

#[test]
fn compact_two_tests_one_line() {
    let dir = temp_dir();
    let output = CargoPspecCli::new()
        .args(["--pspec"])
        .cwd(dir.path())
        .stdin(TWO_TESTS)
        .output();
    assert_eq!(output.stdout_as_str(), "test_two_tests.py ✓✓\n\n2 passed\n");
}

#[test]
fn class_description_header() {
    let dir = temp_dir();
    let output = CargoPspecCli::new()
        .args(["--pspec", "--verbose"])
        .cwd(dir.path())
        .stdin(indoc! {r#"
            {"type": "result", "identifier": ["test_module", {"name": "TestFoo", "description": "A foo"}, "test_bar"], "outcome": "passed", "description": "does a thing"}
            {"type": "result", "identifier": ["test_module", {"name": "TestFoo", "description": "A foo"}, "test_baz"], "outcome": "skipped"}
        "#})
        .output();
    assert_eq!(
        output.stdout_as_str(),
        indoc! {"
            test_module.py
              A foo
                ✓ does a thing
                » baz

            1 passed, 1 skipped
        "}
    );
}

#[test]
fn missing_template_parameter() {
    let dir = temp_dir();
    let output = CargoPspecCli::new()
        .args(["--pspec", "--verbose"])
        .cwd(dir.path())
        .stdin(indoc! {r#"
            {"type": "result", "nodeid": "test_mod.py::test_ok", "outcome": "passed"}
            {"type": "result", "nodeid": "test_mod.py::test_add[1]", "outcome": "passed", "description-template": "adds {a} and {b}", "parameters": {"a": 1}}
        "#})
        .unchecked(true)
        .output();

    assert_eq!(output.exit_code(), Some(3), "{output}");
    assert_eq!(
        output.stdout_as_str(),
        indoc! {"
            test_mod.py
              ✓ ok

            1 passed
        "},
        "completed results are still reported"
    );
    let stderr = output.stderr_as_str();
    assert!(
        stderr.contains("error: failed to resolve description for `test_mod.py::test_add[1]`"),
        "{output}"
    );
    assert!(stderr.contains("undefined parameter `b`"), "{output}");
}

#[test]
fn classic_output_without_pspec() {
    let dir = temp_dir();
    let output = CargoPspecCli::new()
        .cwd(dir.path())
        .stdin(TWO_TESTS)
        .output();
    assert_eq!(output.stdout_as_str(), "test_two_tests.py ..\n\n2 passed\n");

    let output = CargoPspecCli::new()
        .args(["-v"])
        .cwd(dir.path())
        .stdin(TWO_TESTS)
        .output();
    assert_eq!(
        output.stdout_as_str(),
        indoc! {"
            test_two_tests.py::test_01 PASSED
            test_two_tests.py::test_02 PASSED

            2 passed
        "}
    );
}

#[test]
fn no_tests_reported() {
    let dir = temp_dir();
    let output = CargoPspecCli::new()
        .args(["--pspec"])
        .cwd(dir.path())
        .stdin("{\"type\": \"run-started\"}\n{\"type\": \"run-finished\"}\n")
        .unchecked(true)
        .output();
    assert_eq!(output.exit_code(), Some(5), "{output}");
    assert_eq!(output.stdout_as_str(), "\nno tests reported\n");
}

#[test]
fn plaintext_and_unknown_config_keys() {
    let dir = temp_dir();
    std::fs::create_dir(dir.path().join(".config")).expect("created .config");
    std::fs::write(
        dir.path().join(".config/pspec.toml"),
        indoc! {r#"
            [pspec]
            short-passed = 42
            bogus-key = true
        "#},
    )
    .expect("wrote config");

    let output = CargoPspecCli::new()
        .args(["--pspec", "--plaintext"])
        .cwd(dir.path())
        .stdin(TWO_TESTS)
        .output();
    assert_eq!(
        output.stdout_as_str(),
        "test_two_tests.py ..\n\n2 passed\n",
        "non-string glyphs fall back to the profile default"
    );
    let stderr = output.stderr_as_str();
    assert!(stderr.contains("warning: in config file"), "{output}");
    assert!(stderr.contains("bogus-key"), "{output}");
}

#[test]
fn config_file_none_skips_discovery() {
    let dir = temp_dir();
    std::fs::write(
        dir.path().join("pspec.toml"),
        "[pspec]\nshort-passed = \"P\"\n",
    )
    .expect("wrote config");

    let output = CargoPspecCli::new()
        .args(["--pspec"])
        .cwd(dir.path())
        .stdin(TWO_TESTS)
        .output();
    assert_eq!(output.stdout_as_str(), "test_two_tests.py PP\n\n2 passed\n");

    let output = CargoPspecCli::new()
        .args(["--pspec", "--config-file", "none"])
        .cwd(dir.path())
        .stdin(TWO_TESTS)
        .output();
    assert_eq!(output.stdout_as_str(), "test_two_tests.py ✓✓\n\n2 passed\n");
}

#[test]
fn invalid_config_file() {
    let dir = temp_dir();
    std::fs::write(dir.path().join("pspec.toml"), "[pspec\n").expect("wrote config");

    let output = CargoPspecCli::new()
        .args(["--pspec"])
        .cwd(dir.path())
        .stdin(TWO_TESTS)
        .unchecked(true)
        .output();
    assert_eq!(output.exit_code(), Some(4), "{output}");
    assert!(
        output
            .stderr_as_str()
            .contains("error: failed to load pspec config"),
        "{output}"
    );

    let output = CargoPspecCli::new()
        .args(["--pspec", "--config-file", "missing.toml"])
        .cwd(dir.path())
        .stdin(TWO_TESTS)
        .unchecked(true)
        .output();
    assert_eq!(output.exit_code(), Some(4), "{output}");
}

#[test]
fn libtest_dialect() {
    let dir = temp_dir();
    let output = CargoPspecCli::new()
        .args(["--pspec", "--input-format", "libtest"])
        .cwd(dir.path())
        .stdin(indoc! {r#"
            { "type": "suite", "event": "started", "test_count": 3 }
            { "type": "test", "event": "started", "name": "lexer::tests::test_tokens" }
            { "type": "test", "name": "lexer::tests::test_tokens", "event": "ok" }
            { "type": "test", "name": "lexer::tests::test_spans", "event": "failed", "stdout": "boom" }
            { "type": "test", "name": "parser::test_exprs", "event": "ignored" }
            { "type": "suite", "event": "failed", "passed": 1, "failed": 1, "ignored": 1 }
        "#})
        .unchecked(true)
        .output();
    assert_eq!(output.exit_code(), Some(1), "{output}");
    assert_eq!(
        output.stdout_as_str(),
        indoc! {"
            lexer ✓✗
            parser »

            1 passed, 1 failed, 1 skipped
        "}
    );
}
