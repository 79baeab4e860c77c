//! End-to-end tests that run the `literate` binary.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn fixture(name: &str, contents: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("e2e");
    fs::create_dir_all(&dir).expect("create fixture dir");
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_literate"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run literate")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("utf-8 stdout")
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).expect("utf-8 stderr")
}

#[test]
fn prints_transcript_with_trailing_newline() {
    let path = fixture("hello.js", "/* hello */\nvar x = 1;\n");
    let output = run(&[path.to_str().expect("path")]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), " hello \n```js\n\nvar x = 1;\n```\n");
}

#[test]
fn code_only_file() {
    let path = fixture("code.js", "var x = 1;");
    let output = run(&[path.to_str().expect("path")]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "```js\nvar x = 1;\n```\n");
}

#[test]
fn fence_tag_follows_extension() {
    let path = fixture("view.jsx", "render();");
    let output = run(&[path.to_str().expect("path")]);

    assert_eq!(stdout(&output), "```jsx\nrender();\n```\n");
}

#[test]
fn lang_flag_overrides_extension() {
    let path = fixture("lang.js", "f();");
    let output = run(&["--lang", "javascript", path.to_str().expect("path")]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "```javascript\nf();\n```\n");
}

#[test]
fn missing_file_fails() {
    let path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("e2e/does-not-exist.js");
    let output = run(&[path.to_str().expect("path")]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("does-not-exist.js"));
}

#[test]
fn lex_error_fails_without_partial_output() {
    let path = fixture("broken.js", "/* fine */\nlet s = 'unterminated;\n");
    let output = run(&[path.to_str().expect("path")]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("unterminated string literal at line 2, column 8"));
}

#[test]
fn no_arguments_prints_usage() {
    let output = run(&[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Usage: literate"));
}

#[test]
fn help_flag_prints_usage() {
    let output = run(&["--help"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--lang <tag>"));
}

#[test]
fn lang_flag_without_value() {
    let output = run(&["--lang"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--lang requires a value"));
}

#[test]
fn extra_argument_is_rejected() {
    let output = run(&["a.js", "b.js"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("unexpected argument: b.js"));
}
