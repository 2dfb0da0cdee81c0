//! Tests for the Go style linter

use golintfile_core::{GoLinter, LintError, Problem, StyleLinter};
use std::collections::BTreeMap;
use std::path::PathBuf;

fn lint(files: &[(&str, &str)]) -> Result<Vec<Problem>, LintError> {
    let map: BTreeMap<PathBuf, Vec<u8>> = files
        .iter()
        .map(|(name, source)| (PathBuf::from(name), source.as_bytes().to_vec()))
        .collect();
    GoLinter::new().lint_files(&map)
}

fn lint_one(source: &str) -> Vec<Problem> {
    lint(&[("demo.go", source)]).unwrap()
}

fn texts(problems: &[Problem]) -> Vec<&str> {
    problems.iter().map(|p| p.text.as_str()).collect()
}

fn find<'a>(problems: &'a [Problem], text: &str) -> &'a Problem {
    problems
        .iter()
        .find(|p| p.text == text)
        .unwrap_or_else(|| panic!("no problem {:?} in {:?}", text, texts(problems)))
}

// ── Package comments ─────────────────────────────────────────────

#[test]
fn test_missing_package_comment() {
    let problems = lint_one("package demo\n");
    assert_eq!(problems.len(), 1);
    let p = &problems[0];
    assert_eq!(
        p.text,
        "should have a package comment, unless it's in another file for this package"
    );
    assert_eq!(p.confidence, 0.2);
    assert_eq!((p.position.line, p.position.column), (1, 1));
    assert_eq!(p.position.filename, PathBuf::from("demo.go"));
}

#[test]
fn test_package_comment_form() {
    let problems = lint_one("// This package does things.\npackage demo\n");
    assert_eq!(
        texts(&problems),
        vec!["package comment should be of the form \"Package demo ...\""]
    );
    assert_eq!(problems[0].confidence, 1.0);
}

#[test]
fn test_main_package_comment_is_free_form() {
    let problems = lint_one("// Command demo runs things.\npackage main\n");
    assert!(problems.is_empty(), "{:?}", texts(&problems));
}

#[test]
fn test_detached_package_comment() {
    let problems = lint_one("// Package demo does things.\n\npackage demo\n");
    assert_eq!(problems.len(), 1);
    assert!(problems[0].text.starts_with("package comment is detached"));
    assert_eq!(problems[0].confidence, 0.9);
    assert_eq!(problems[0].position.line, 1);
}

#[test]
fn test_one_package_comment_per_package_is_enough_elsewhere() {
    let problems = lint(&[
        ("a.go", "// Package demo does things.\npackage demo\n"),
        ("b.go", "package demo\n"),
    ])
    .unwrap();
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].position.filename, PathBuf::from("b.go"));
    assert_eq!(problems[0].confidence, 0.2);
}

// ── Doc comments ─────────────────────────────────────────────────

#[test]
fn test_exported_function_without_comment() {
    let problems = lint_one("// Package demo does things.\npackage demo\n\nfunc Run() {}\n");
    assert_eq!(problems.len(), 1);
    let p = &problems[0];
    assert_eq!(
        p.text,
        "exported function Run should have comment or be unexported"
    );
    assert_eq!(p.confidence, 1.0);
    assert_eq!((p.position.line, p.position.column), (4, 1));
}

#[test]
fn test_exported_function_comment_form() {
    let source = "// Package demo does things.\npackage demo\n\n// starts the thing\nfunc Run() {}\n";
    let problems = lint_one(source);
    assert_eq!(
        texts(&problems),
        vec!["comment on exported function Run should be of the form \"Run ...\""]
    );
    assert_eq!(problems[0].position.line, 4);
}

#[test]
fn test_documented_function_is_clean() {
    let source = "// Package demo does things.\npackage demo\n\n// Run starts the thing.\n// It blocks.\nfunc Run() {}\n\nfunc helper() {}\n";
    assert!(lint_one(source).is_empty());
}

#[test]
fn test_exported_methods() {
    let source = "// Package demo does things.
package demo

// Server serves.
type Server struct{}

func (s *Server) Start() {}

type inner struct{}

func (i inner) Stop() {}

func (s *Server) String() string { return \"\" }
";
    let problems = lint_one(source);
    assert_eq!(
        texts(&problems),
        vec!["exported method Server.Start should have comment or be unexported"]
    );
    assert_eq!(problems[0].position.line, 7);
}

#[test]
fn test_exported_types() {
    let source = "// Package demo does things.
package demo

// A Widget is a thing.
type Widget struct{}

// gadget thing
type Gadget struct{}

type (
	// Alpha is first.
	Alpha int
	Beta  int
)
";
    let problems = lint_one(source);
    assert_eq!(problems.len(), 2, "{:?}", texts(&problems));

    let form = find(
        &problems,
        "comment on exported type Gadget should be of the form \"Gadget ...\" (with optional leading article)",
    );
    assert_eq!(form.position.line, 7);

    let missing = find(
        &problems,
        "exported type Beta should have comment or be unexported",
    );
    assert_eq!((missing.position.line, missing.position.column), (13, 2));
}

// ── Names ────────────────────────────────────────────────────────

#[test]
fn test_underscore_function_name() {
    let problems =
        lint_one("// Package demo does things.\npackage demo\n\nfunc get_value() int { return 1 }\n");
    let p = find(
        &problems,
        "don't use underscores in Go names; func get_value should be getValue",
    );
    assert_eq!(p.confidence, 0.9);
    assert_eq!((p.position.line, p.position.column), (4, 6));
}

#[test]
fn test_initialism_and_all_caps() {
    let source = "// Package demo does things.
package demo

var userId = 1

const MAX_SIZE = 10
";
    let problems = lint_one(source);

    let initialism = find(&problems, "var userId should be userID");
    assert_eq!(initialism.confidence, 0.8);
    assert_eq!((initialism.position.line, initialism.position.column), (4, 5));

    let caps = find(&problems, "don't use ALL_CAPS in Go names; use CamelCase");
    assert_eq!(caps.confidence, 0.8);
    assert_eq!(caps.position.line, 6);
}

// ── Receivers ────────────────────────────────────────────────────

#[test]
fn test_receiver_names() {
    let source = "// Package demo does things.
package demo

type counter struct{ n int }

func (this *counter) inc() { this.n++ }

func (_ counter) get() int { return 0 }

func (c *counter) reset() {}

func (k *counter) zero() {}
";
    let problems = lint_one(source);
    assert_eq!(problems.len(), 3, "{:?}", texts(&problems));

    assert_eq!(problems[0].position.line, 6);
    assert!(problems[0].text.contains("don't use generic names"));
    assert_eq!(
        problems[1].text,
        "receiver name should not be an underscore, omit the name if it is unused"
    );
    assert_eq!(problems[1].position.line, 8);
    assert_eq!(
        problems[2].text,
        "receiver name k should be consistent with previous receiver name c for counter"
    );
    assert_eq!(problems[2].position.line, 12);
}

// ── Error strings ────────────────────────────────────────────────

#[test]
fn test_error_strings() {
    let source = "// Package demo does things.
package demo

import (
	\"errors\"
	\"fmt\"
)

var errA = errors.New(\"Something failed\")
var errB = fmt.Errorf(\"failed: %d.\", 1)
var errC = errors.New(\"URL is invalid\")
var errD = errors.New(\"ok here\")
";
    let problems = lint_one(source);
    assert_eq!(problems.len(), 2, "{:?}", texts(&problems));
    for p in &problems {
        assert_eq!(
            p.text,
            "error strings should not be capitalized or end with punctuation or a newline"
        );
    }
    assert_eq!(problems[0].position.line, 9);
    assert_eq!(problems[0].confidence, 0.6);
    assert_eq!(problems[1].position.line, 10);
    assert_eq!(problems[1].confidence, 0.8);
}

// ── Statements ───────────────────────────────────────────────────

#[test]
fn test_increment_by_one() {
    let source = "// Package demo does things.
package demo

func bump(x int) int {
	x += 1
	x -= 1
	x += 2
	return x
}
";
    let problems = lint_one(source);
    assert_eq!(
        texts(&problems),
        vec![
            "should replace x += 1 with x++",
            "should replace x -= 1 with x--"
        ]
    );
    assert_eq!((problems[0].position.line, problems[0].position.column), (5, 2));
    assert_eq!(problems[1].position.line, 6);
}

#[test]
fn test_else_after_return() {
    let source = "// Package demo does things.
package demo

func sign(x int) int {
	if x < 0 {
		return -1
	} else {
		return 1
	}
}

func chain(x int) int {
	if x < 0 {
		return -1
	} else if x > 0 {
		return 1
	} else {
		return 0
	}
}

func decl() int {
	if v := 3; v > 2 {
		return v
	} else {
		return 0
	}
}
";
    let problems = lint_one(source);
    assert_eq!(problems.len(), 2, "{:?}", texts(&problems));
    assert_eq!(problems[0].position.line, 7);
    assert_eq!(
        problems[0].text,
        "if block ends with a return statement, so drop this else and outdent its block"
    );
    assert_eq!(problems[1].position.line, 25);
    assert!(problems[1]
        .text
        .ends_with("(move short variable declaration to its own line if necessary)"));
}

#[test]
fn test_error_not_last_result() {
    let source = "// Package demo does things.
package demo

func load() (error, int) { return nil, 0 }

func save() (int, error) { return 0, nil }
";
    let problems = lint_one(source);
    assert_eq!(
        texts(&problems),
        vec!["error should be the last type when returning multiple items"]
    );
    assert_eq!(problems[0].confidence, 0.9);
    assert_eq!(problems[0].position.line, 4);
}

// ── Test files ───────────────────────────────────────────────────

#[test]
fn test_test_files_skip_doc_checks() {
    let source = "package demo

import \"testing\"

func TestRun(t *testing.T) {}

func Helper() {}
";
    let problems = lint(&[("demo_test.go", source)]).unwrap();
    assert!(problems.is_empty(), "{:?}", texts(&problems));
}

// ── Whole-set failures ───────────────────────────────────────────

#[test]
fn test_syntax_error() {
    let err = lint(&[("broken.go", "package demo\n\nfunc {\n")]).unwrap_err();
    match err {
        LintError::Parse { file, line, .. } => {
            assert_eq!(file, PathBuf::from("broken.go"));
            assert!(line >= 1);
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_multiple_packages() {
    let err = lint(&[("a.go", "package a\n"), ("b.go", "package b\n")]).unwrap_err();
    match err {
        LintError::MultiplePackages {
            file,
            found,
            expected,
        } => {
            assert_eq!(file, PathBuf::from("b.go"));
            assert_eq!(found, "b");
            assert_eq!(expected, "a");
        }
        other => panic!("expected package mismatch, got {:?}", other),
    }
}

#[test]
fn test_empty_set() {
    assert!(lint(&[]).unwrap().is_empty());
}

#[test]
fn test_problems_sorted_by_position() {
    let problems = lint(&[
        ("b.go", "package demo\n\nfunc Later() {}\n"),
        ("a.go", "// Package demo does things.\npackage demo\n\nfunc Early() {}\n"),
    ])
    .unwrap();
    let positions: Vec<(String, usize)> = problems
        .iter()
        .map(|p| (p.position.filename.display().to_string(), p.position.line))
        .collect();
    assert_eq!(
        positions,
        vec![
            ("a.go".to_string(), 4),
            ("b.go".to_string(), 1),
            ("b.go".to_string(), 3),
        ]
    );
}

#[test]
fn test_non_ascii_name_with_initialism() {
    let problems = lint_one("// Package demo does things.\npackage demo\n\nvar a_ßh int\n");
    assert_eq!(
        texts(&problems),
        vec!["don't use underscores in Go names; var a_ßh should be aSSH"]
    );
    assert_eq!(problems[0].confidence, 0.9);
    assert_eq!((problems[0].position.line, problems[0].position.column), (4, 5));
}
