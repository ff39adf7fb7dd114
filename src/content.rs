//! Content rendering: the second generation phase.
//! Every regular file already placed in the output tree is rendered in place.

use log::{debug, warn};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::materializer::template_key;
use crate::metadata::{copy_metadata, ensure_writable};
use crate::renderer::TemplateRenderer;

/// Restores a trailing newline removed while rendering, for instance by a
/// whitespace-trimming final tag.
///
/// If `original` ended with a newline and `rendered` does not, exactly one
/// newline is appended, `\r\n` when the original used it.
pub fn restore_trailing_newline(original: &str, mut rendered: String) -> String {
    if original.ends_with('\n') && !rendered.ends_with('\n') {
        if original.ends_with("\r\n") {
            rendered.push('\r');
        }
        rendered.push('\n');
    }
    rendered
}

/// Renders the contents of every file under an output directory.
pub struct ContentRenderer<'a> {
    engine: &'a dyn TemplateRenderer,
    context: &'a Context,
    output_root: &'a Path,
    skip_non_text: bool,
}

impl<'a> ContentRenderer<'a> {
    pub fn new(
        engine: &'a dyn TemplateRenderer,
        context: &'a Context,
        output_root: &'a Path,
    ) -> Self {
        Self { engine, context, output_root, skip_non_text: false }
    }

    /// Leave files that are not UTF-8 untouched instead of failing.
    pub fn skip_non_text(mut self, skip: bool) -> Self {
        self.skip_non_text = skip;
        self
    }

    /// Renders every regular file, stopping at the first failure.
    ///
    /// Returns the number of files rendered.
    pub fn run(&self) -> Result<usize> {
        debug!("Rendering file contents in '{}'", self.output_root.display());

        let mut rendered = 0;
        for entry in WalkDir::new(self.output_root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if self.render_file(entry.path())? {
                rendered += 1;
            }
        }
        Ok(rendered)
    }

    /// Renders one file in place. Returns `false` if it was skipped.
    pub fn render_file(&self, path: &Path) -> Result<bool> {
        let relative = path.strip_prefix(self.output_root).unwrap_or(path);
        let key = template_key(relative).map_err(|e| Error::io(path, path, e))?;

        let metadata = fs::metadata(path).map_err(|e| Error::io(path, path, e))?;
        let bytes = fs::read(path).map_err(|e| Error::io(path, path, e))?;
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(_) if self.skip_non_text => {
                warn!("Skipping '{}': content is not valid UTF-8", path.display());
                return Ok(false);
            }
            Err(_) => return Err(Error::NonTextContent { path: path.to_path_buf() }),
        };

        debug!("Rendering file: {key}");
        let output = self
            .engine
            .render(&key, &text, self.context)
            .map_err(|e| Error::RenderSyntaxError { path: path.to_path_buf(), source: e })?;
        let output = restore_trailing_newline(&text, output);

        ensure_writable(path, &metadata).map_err(|e| Error::io(path, path, e))?;
        fs::write(path, output).map_err(|e| Error::io(path, path, e))?;
        copy_metadata(&metadata, path).map_err(|e| Error::io(path, path, e))?;
        Ok(true)
    }
}
