//! Tree materialization: the first generation phase.
//! Walks the template tree parent-first, renders every path through the
//! template engine and recreates the tree under the output directory. File
//! bodies are copied verbatim; they are rendered by [`crate::content`].

use log::{debug, warn};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::metadata::copy_metadata;
use crate::renderer::TemplateRenderer;

/// Joins the components of a relative path with `/` so template keys are the
/// same on every platform.
pub fn template_key(relative: &Path) -> io::Result<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        let part = component.as_os_str().to_str().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidData, "path is not valid UTF-8")
        })?;
        parts.push(part);
    }
    Ok(parts.join("/"))
}

/// Checks a rendered relative path and returns its components.
///
/// Rejects empty paths, absolute paths, empty components and `.`/`..`
/// components, so a rendered path can never leave the output directory. On
/// Windows a backslash is a separator and is rejected inside a component.
pub fn rendered_components(rendered: &str) -> Option<Vec<&str>> {
    let parts: Vec<&str> = rendered.split('/').collect();
    let valid = parts.iter().all(|part| {
        !part.is_empty() && *part != "." && *part != ".." && !has_separator(part)
    });
    valid.then_some(parts)
}

#[cfg(windows)]
fn has_separator(part: &str) -> bool {
    part.contains('\\')
}

#[cfg(not(windows))]
fn has_separator(_part: &str) -> bool {
    false
}

/// Counts of what a phase touched.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub directories: usize,
    pub files: usize,
}

/// Recreates a template tree under an output directory.
pub struct Materializer<'a> {
    engine: &'a dyn TemplateRenderer,
    context: &'a Context,
    template_root: &'a Path,
    output_root: &'a Path,
}

impl<'a> Materializer<'a> {
    pub fn new(
        engine: &'a dyn TemplateRenderer,
        context: &'a Context,
        template_root: &'a Path,
        output_root: &'a Path,
    ) -> Self {
        Self { engine, context, template_root, output_root }
    }

    /// Maps a path inside the template tree to its path in the output tree.
    ///
    /// The template root itself maps to the output root.
    pub fn translate(&self, template_path: &Path) -> Result<PathBuf> {
        let relative = template_path.strip_prefix(self.template_root).map_err(|_| {
            Error::io(
                template_path,
                self.output_root,
                io::Error::new(io::ErrorKind::InvalidInput, "path is outside the template"),
            )
        })?;
        if relative.as_os_str().is_empty() {
            return Ok(self.output_root.to_path_buf());
        }

        let key = template_key(relative)
            .map_err(|e| Error::io(template_path, self.output_root, e))?;
        let rendered = self.engine.render(&key, &key, self.context).map_err(|e| {
            Error::RenderSyntaxError { path: template_path.to_path_buf(), source: e }
        })?;

        let components =
            rendered_components(&rendered).ok_or_else(|| Error::InvalidRenderedPath {
                path: template_path.to_path_buf(),
                rendered: rendered.clone(),
            })?;
        Ok(components.iter().fold(self.output_root.to_path_buf(), |path, part| path.join(part)))
    }

    /// Runs the phase over the whole template tree.
    ///
    /// Stops at the first failure. Entries written before the failure stay on
    /// disk.
    pub fn run(&self) -> Result<Summary> {
        debug!(
            "Materializing '{}' into '{}'",
            self.template_root.display(),
            self.output_root.display()
        );

        let mut summary = Summary::default();
        let mut sources: HashMap<PathBuf, PathBuf> = HashMap::new();
        let mut directories: Vec<(PathBuf, PathBuf)> = Vec::new();

        // Linked directories are created but not descended into; linked files
        // are copied from their target.
        let walker = WalkDir::new(self.template_root).sort_by_file_name();
        for entry in walker {
            let entry = entry?;
            let source = entry.path();
            let target = self.translate(source)?;

            if let Some(first) = sources.get(&target) {
                return Err(Error::PathCollision {
                    target,
                    first: first.clone(),
                    second: source.to_path_buf(),
                });
            }
            sources.insert(target.clone(), source.to_path_buf());

            let file_type = if entry.path_is_symlink() {
                fs::metadata(source).map_err(|e| Error::io(source, &target, e))?.file_type()
            } else {
                entry.file_type()
            };
            if file_type.is_dir() {
                debug!("Creating directory: {}", target.display());
                if !target.is_dir() {
                    fs::create_dir_all(&target).map_err(|e| Error::io(source, &target, e))?;
                }
                directories.push((source.to_path_buf(), target));
                summary.directories += 1;
            } else if file_type.is_file() {
                debug!("Copying file: {} -> {}", source.display(), target.display());
                self.copy_file(source, &target)?;
                summary.files += 1;
            } else {
                warn!("Skipping '{}': not a regular file or directory", source.display());
            }
        }

        // Children are done, so setting directory metadata deepest-first keeps
        // the copied timestamps and lets read-only directories be filled.
        for (source, target) in directories.iter().rev() {
            let metadata = fs::metadata(source).map_err(|e| Error::io(source, target, e))?;
            copy_metadata(&metadata, target).map_err(|e| Error::io(source, target, e))?;
        }

        Ok(summary)
    }

    fn copy_file(&self, source: &Path, target: &Path) -> Result<()> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(source, target, e))?;
        }
        fs::copy(source, target).map_err(|e| Error::io(source, target, e))?;
        let metadata = fs::metadata(source).map_err(|e| Error::io(source, target, e))?;
        copy_metadata(&metadata, target).map_err(|e| Error::io(source, target, e))
    }
}
