use clap::Parser;
use scaffold::cli::{build_context, Args, DEFAULT_PROJECT_NAME};
use scaffold::context::Context;
use scaffold::error::{Error, Result};
use scaffold::prompt::{NoInputPrompter, Prompter};
use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("scaffold")];
    res.extend(args.iter().map(OsString::from));
    res
}

fn parse(args: &[&str]) -> Args {
    Args::try_parse_from(make_args(args)).unwrap()
}

/// Records the questions asked and answers with the offered default.
#[derive(Default)]
struct RecordingPrompter {
    questions: RefCell<Vec<(String, String)>>,
}

impl Prompter for RecordingPrompter {
    fn confirm(&self, skip: bool, _prompt: String) -> Result<bool> {
        Ok(skip)
    }

    fn input(&self, prompt: String, default: String) -> Result<String> {
        self.questions.borrow_mut().push((prompt, default.clone()));
        Ok(default)
    }
}

#[test]
fn test_default_args() {
    let parsed = parse(&[]);

    assert_eq!(parsed.template_dir, PathBuf::from("./template"));
    assert_eq!(parsed.output_dir, PathBuf::from("./output"));
    assert!(!parsed.force_delete);
    assert!(!parsed.verbose);
    assert!(!parsed.no_input);
    assert!(parsed.project_name.is_none());
}

#[test]
fn test_all_flags() {
    let parsed = parse(&[
        "--force-delete",
        "--verbose",
        "--skip-binary",
        "--no-input",
        "--project-name",
        "My App",
        "--var",
        "license=MIT",
        "--var",
        "author=Jane",
        "./tpl",
        "./out",
    ]);

    assert!(parsed.force_delete);
    assert!(parsed.verbose);
    assert!(parsed.skip_binary);
    assert!(parsed.no_input);
    assert_eq!(parsed.project_name.as_deref(), Some("My App"));
    assert_eq!(parsed.vars, vec!["license=MIT", "author=Jane"]);
    assert_eq!(parsed.template_dir, PathBuf::from("./tpl"));
    assert_eq!(parsed.output_dir, PathBuf::from("./out"));
}

#[test]
fn test_short_flags_and_alias() {
    let parsed = parse(&["-f", "-v"]);
    assert!(parsed.force_delete);
    assert!(parsed.verbose);

    let parsed = parse(&["--force"]);
    assert!(parsed.force_delete);
}

#[test]
fn test_too_many_args() {
    assert!(Args::try_parse_from(make_args(&["./template", "./output", "extra"])).is_err());
}

#[test]
fn test_build_context_prompts_missing_values() {
    let args = parse(&["--project-name", "Crème Brûlée", "tpl", "../out/"]);
    let prompt = RecordingPrompter::default();

    let context = build_context(&args, Path::new("/work/dir"), &prompt).unwrap();

    assert_eq!(context.template_dir(), Path::new("/work/dir/tpl"));
    assert_eq!(context.output_dir(), Path::new("/work/out"));
    assert_eq!(context.get("project_name"), Some("Crème Brûlée"));
    assert_eq!(context.get("project_slug"), Some("creme-brulee"));
    assert_eq!(context.get("project_version"), Some("1.0.0"));
    assert_eq!(context.get("project_description"), Some(""));
    assert_eq!(
        *prompt.questions.borrow(),
        vec![
            ("Project slug".to_string(), "creme-brulee".to_string()),
            ("Project version".to_string(), "1.0.0".to_string()),
            ("Project description".to_string(), String::new()),
        ]
    );
}

#[test]
fn test_build_context_defaults_without_input() {
    let args = parse(&["--no-input"]);

    let context = build_context(&args, Path::new("/work"), &NoInputPrompter).unwrap();

    let expected =
        Context::builder("/work/template", "/work/output", DEFAULT_PROJECT_NAME, "project-name")
            .with("project_version", "1.0.0")
            .with("project_description", "")
            .build();
    assert_eq!(context, expected);
}

#[test]
fn test_build_context_extra_variables() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("vars.yml"), "license: Apache-2.0\nauthor: Jane\n").unwrap();
    let args = parse(&[
        "--project-name",
        "Demo",
        "--context-file",
        "vars.yml",
        "--var",
        "license=MIT",
        "--var",
        "project_slug=ignored",
    ]);

    let context = build_context(&args, temp_dir.path(), &NoInputPrompter).unwrap();

    assert_eq!(context.get("license"), Some("MIT"));
    assert_eq!(context.get("author"), Some("Jane"));
    assert_eq!(context.get("project_slug"), Some("demo"));
}

#[test]
fn test_build_context_invalid_variable() {
    let args = parse(&["--no-input", "--var", "missing-equals"]);
    let err = build_context(&args, Path::new("/work"), &NoInputPrompter).unwrap_err();
    assert!(matches!(err, Error::ContextError(_)));
}
