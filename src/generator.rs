//! Generation orchestration.
//! Validates the template directory, applies the overwrite guard on the
//! output directory and runs the two rendering phases in order.

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::ContentRenderer;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::materializer::{Materializer, Summary};
use crate::prompt::Prompter;
use crate::renderer::TemplateRenderer;

/// Question asked before an existing output directory is deleted.
pub const DELETE_OUTPUT_PROMPT: &str = "The output directory will be deleted. Are you sure?";

/// Switches controlling a generation run.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenerateOptions {
    /// Delete an existing output directory without asking.
    pub force: bool,
    /// Leave non UTF-8 files unrendered instead of failing.
    pub skip_non_text: bool,
}

/// Returns the template directory if it exists and is a directory.
pub fn ensure_template_dir<P: AsRef<Path>>(template_dir: P) -> Result<PathBuf> {
    let template_dir = template_dir.as_ref();
    if !template_dir.is_dir() {
        return Err(Error::TemplateNotFound { template_dir: template_dir.to_path_buf() });
    }
    Ok(template_dir.to_path_buf())
}

/// Makes sure the output directory can be created from scratch.
///
/// An existing output directory is deleted once `prompt` agrees, or right
/// away when `force` is set. On refusal nothing on disk is touched.
pub fn prepare_output_dir<P: AsRef<Path>>(
    output_dir: P,
    force: bool,
    prompt: &dyn Prompter,
) -> Result<()> {
    let output_dir = output_dir.as_ref();
    let metadata = match fs::symlink_metadata(output_dir) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(Error::io(output_dir, output_dir, e)),
    };

    if !prompt.confirm(force, DELETE_OUTPUT_PROMPT.to_string())? {
        return Err(Error::ConfirmationAborted { output_dir: output_dir.to_path_buf() });
    }

    debug!("Deleting existing output '{}'", output_dir.display());
    let removed = if metadata.is_dir() {
        fs::remove_dir_all(output_dir)
    } else {
        fs::remove_file(output_dir)
    };
    removed.map_err(|e| Error::io(output_dir, output_dir, e))
}

/// Rejects runs where deleting or filling the output would touch the template.
fn ensure_disjoint(template_dir: &Path, output_dir: &Path) -> Result<()> {
    if output_dir.starts_with(template_dir) || template_dir.starts_with(output_dir) {
        return Err(Error::OverlappingDirectories {
            template_dir: template_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
        });
    }
    Ok(())
}

/// Renders the template tree named by the context into its output directory.
pub struct Generator<'a> {
    engine: &'a dyn TemplateRenderer,
    prompt: &'a dyn Prompter,
    options: GenerateOptions,
}

impl<'a> Generator<'a> {
    pub fn new(
        engine: &'a dyn TemplateRenderer,
        prompt: &'a dyn Prompter,
        options: GenerateOptions,
    ) -> Self {
        Self { engine, prompt, options }
    }

    /// Runs a full generation.
    ///
    /// # Flow
    /// 1. Checks that the template directory exists
    /// 2. Deletes an existing output directory, if allowed
    /// 3. Recreates the tree with rendered paths
    /// 4. Renders every file of the new tree in place
    ///
    /// # Errors
    /// The first failure ends the run. Output written before it is kept.
    pub fn generate(&self, context: &Context) -> Result<Summary> {
        let template_root = ensure_template_dir(context.template_dir())?;
        let output_root = context.output_dir().to_path_buf();
        ensure_disjoint(&template_root, &output_root)?;

        prepare_output_dir(&output_root, self.options.force, self.prompt)?;

        let summary =
            Materializer::new(self.engine, context, &template_root, &output_root).run()?;
        debug!(
            "Created {} directories and {} files",
            summary.directories, summary.files
        );

        let rendered = ContentRenderer::new(self.engine, context, &output_root)
            .skip_non_text(self.options.skip_non_text)
            .run()?;
        debug!("Rendered {rendered} files");

        Ok(summary)
    }
}
