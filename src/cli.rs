//! Command-line interface implementation for scaffold.
//! Provides argument parsing and the construction of the template context
//! from the parsed arguments.

use clap::Parser;
use std::path::{Path, PathBuf};

use crate::context::{absolutize, load_context_file, parse_var, Context};
use crate::error::Result;
use crate::prompt::Prompter;
use crate::slug::slugify;

/// Command-line arguments structure for scaffold.
#[derive(Parser, Debug)]
#[command(author, version, about = "scaffold: render a template directory into a new project", long_about = None)]
pub struct Args {
    /// Template directory
    #[arg(value_name = "TEMPLATE_DIR", default_value = "./template")]
    pub template_dir: PathBuf,

    /// Output directory
    #[arg(value_name = "OUTPUT_DIR", default_value = "./output")]
    pub output_dir: PathBuf,

    /// Human readable project name, used for titles and docs
    #[arg(long)]
    pub project_name: Option<String>,

    /// Project slug, used in paths, filenames, etc.
    #[arg(long)]
    pub project_slug: Option<String>,

    /// Project version
    #[arg(long)]
    pub project_version: Option<String>,

    /// Project description
    #[arg(long)]
    pub project_description: Option<String>,

    /// Extra template variable, may be repeated
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,

    /// JSON or YAML file with extra template variables
    #[arg(long, value_name = "FILE")]
    pub context_file: Option<PathBuf>,

    /// Force delete the output directory
    #[arg(short, long, alias = "force")]
    pub force_delete: bool,

    /// Leave files that are not UTF-8 text unrendered
    #[arg(long)]
    pub skip_binary: bool,

    /// Never prompt, use default values for missing answers
    #[arg(long)]
    pub no_input: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

pub const DEFAULT_PROJECT_NAME: &str = "Project name";
pub const DEFAULT_PROJECT_VERSION: &str = "1.0.0";

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling on invalid arguments
pub fn get_args() -> Args {
    Args::parse()
}

fn answer(
    prompt: &dyn Prompter,
    given: Option<&str>,
    question: &str,
    default: String,
) -> Result<String> {
    match given {
        Some(value) => Ok(value.to_string()),
        None => prompt.input(question.to_string(), default),
    }
}

/// Builds the template context from parsed arguments.
///
/// Relative directories are resolved against `working_dir`. Project values
/// missing from the arguments are asked through `prompt`; the slug defaults to
/// the slug of the project name. Variables from `--var` override the ones
/// loaded from `--context-file`.
pub fn build_context(args: &Args, working_dir: &Path, prompt: &dyn Prompter) -> Result<Context> {
    let template_dir = absolutize(&args.template_dir, working_dir);
    let output_dir = absolutize(&args.output_dir, working_dir);

    let project_name = answer(
        prompt,
        args.project_name.as_deref(),
        "Project name",
        DEFAULT_PROJECT_NAME.to_string(),
    )?;
    let project_slug =
        answer(prompt, args.project_slug.as_deref(), "Project slug", slugify(&project_name))?;
    let project_version = answer(
        prompt,
        args.project_version.as_deref(),
        "Project version",
        DEFAULT_PROJECT_VERSION.to_string(),
    )?;
    let project_description =
        answer(prompt, args.project_description.as_deref(), "Project description", String::new())?;

    let mut builder = Context::builder(template_dir, output_dir, project_name, project_slug)
        .with("project_version", project_version)
        .with("project_description", project_description);

    if let Some(context_file) = &args.context_file {
        let context_file = absolutize(context_file, working_dir);
        builder = builder.extend(load_context_file(context_file)?);
    }
    for raw in &args.vars {
        let (key, value) = parse_var(raw)?;
        builder = builder.with(key, value);
    }

    Ok(builder.build())
}
