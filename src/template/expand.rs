//! Stage, rewrite and promote a template copy
//!
//! Expansion of one variant is three steps:
//!
//! 1. [`stage`] copies the template into the staging directory under the
//!    variant's bare artifact name.
//! 2. [`rewrite`] substitutes placeholders in the staged copy, in place.
//! 3. [`promote`] moves the rewritten copy to its destination.
//!
//! The destination is only ever replaced by a fully rewritten file. When
//! rewriting fails the staged copy is removed.

use std::fs::{self, Permissions};
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use super::{SubstitutionMap, Template};
use crate::error::BuildError;

/// Run all three expansion steps for one variant
pub fn expand(
    template: &Path,
    staged: &Path,
    destination: &Path,
    substitutions: &SubstitutionMap,
) -> Result<(), BuildError> {
    stage(template, staged)?;
    rewrite(staged, substitutions).inspect_err(|_| discard(staged))?;
    promote(staged, destination)
}

/// Copy the template to `staged`, creating the staging directory if needed
pub fn stage(template: &Path, staged: &Path) -> Result<(), BuildError> {
    if !template.is_file() {
        return Err(BuildError::TemplateMissing {
            path: template.to_path_buf(),
        });
    }
    if let Some(dir) = staged.parent() {
        fs::create_dir_all(dir).map_err(BuildError::io("create", dir))?;
    }
    fs::copy(template, staged).map_err(BuildError::io("copy template to", staged))?;
    debug!(from = %template.display(), to = %staged.display(), "staged template");
    Ok(())
}

/// Substitute every placeholder in the staged file and overwrite it
pub fn rewrite(staged: &Path, substitutions: &SubstitutionMap) -> Result<(), BuildError> {
    let text = fs::read_to_string(staged).map_err(BuildError::io("read", staged))?;
    let template = Template::parse(text);

    let rendered = template
        .render(substitutions)
        .map_err(|unresolved| BuildError::UnresolvedPlaceholder {
            template: staged.to_path_buf(),
            token: unresolved.token,
            span: unresolved.span,
            text: template.source().to_string(),
        })?;

    let permissions = fs::metadata(staged)
        .map_err(BuildError::io("read", staged))?
        .permissions();
    write_atomic(staged, rendered.as_bytes(), permissions)?;
    debug!(path = %staged.display(), "rewrote staged copy");
    Ok(())
}

/// Move the staged file to `destination`, replacing any previous file
pub fn promote(staged: &Path, destination: &Path) -> Result<(), BuildError> {
    if let Some(dir) = destination.parent() {
        fs::create_dir_all(dir).map_err(BuildError::io("create", dir))?;
    }
    if fs::rename(staged, destination).is_err() {
        // Staging and output may live on different filesystems
        let bytes = fs::read(staged).map_err(BuildError::io("read", staged))?;
        let permissions = fs::metadata(staged)
            .map_err(BuildError::io("read", staged))?
            .permissions();
        write_atomic(destination, &bytes, permissions)?;
        fs::remove_file(staged).map_err(BuildError::io("remove", staged))?;
    }
    debug!(path = %destination.display(), "wrote theme file");
    Ok(())
}

/// Write `bytes` to `path` through a temporary file in the same directory.
///
/// Temporary files are created owner-only, so `permissions` is applied
/// before the file is moved into place.
fn write_atomic(path: &Path, bytes: &[u8], permissions: Permissions) -> Result<(), BuildError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp =
        NamedTempFile::new_in(dir).map_err(BuildError::io("create temporary file in", dir))?;
    tmp.write_all(bytes).map_err(BuildError::io("write", path))?;
    tmp.as_file()
        .set_permissions(permissions)
        .map_err(BuildError::io("set permissions on", path))?;
    tmp.persist(path)
        .map_err(|e| BuildError::fs("write", path, e.error))?;
    Ok(())
}

fn discard(staged: &Path) {
    if let Err(e) = fs::remove_file(staged) {
        debug!(path = %staged.display(), error = %e, "could not remove staged copy");
    }
}
