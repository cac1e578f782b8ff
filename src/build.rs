//! Variant orchestration: plan, clean and expand every catalog entry

use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};

use crate::catalog::{Catalog, Variant};
use crate::config::{BuildLayout, ProductIdentity};
use crate::error::BuildError;
use crate::naming;
use crate::report::Reporter;
use crate::template::{self, SubstitutionMap};

/// Everything needed to expand one variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantPlan {
    pub variant: Variant,
    /// Artifact name without extension
    pub artifact: String,
    /// Where the template copy is staged and rewritten
    pub staged: PathBuf,
    /// Final theme file
    pub destination: PathBuf,
    pub substitutions: SubstitutionMap,
}

/// Outcome of a successful run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    /// Stale artifacts removed before building
    pub removed: Vec<PathBuf>,
    /// Theme files written, in catalog order
    pub written: Vec<PathBuf>,
}

/// Compute names, paths and bindings for every variant without touching disk.
///
/// Fails when two variants would produce the same artifact, which can happen
/// for names differing only in the case of their first letter, or when an
/// artifact name is not a plain file name.
pub fn plan(
    catalog: &Catalog,
    identity: &ProductIdentity,
    layout: &BuildLayout,
) -> Result<Vec<VariantPlan>, BuildError> {
    layout
        .validate()
        .map_err(|message| BuildError::config(layout.origin(), message))?;

    let mut seen: HashMap<String, &str> = HashMap::new();
    let mut plans = Vec::with_capacity(catalog.len());

    for variant in catalog {
        let artifact = naming::resolve(&variant.name, &identity.humanized, "");
        if let Some(other) = seen.insert(artifact.clone(), &variant.name) {
            return Err(BuildError::config(
                &layout.catalog,
                format!(
                    "variants '{}' and '{}' both produce '{}'",
                    other, variant.name, artifact
                ),
            ));
        }

        let file_name =
            naming::resolve(&variant.name, &identity.humanized, &layout.extension);
        if !is_file_name(&artifact) || !is_file_name(&file_name) {
            return Err(BuildError::config(
                &layout.catalog,
                format!(
                    "variant '{}' produces '{}', which is not a plain file name",
                    variant.name, file_name
                ),
            ));
        }
        plans.push(VariantPlan {
            variant: variant.clone(),
            staged: layout.staging_dir.join(&artifact),
            destination: layout.output_dir.join(file_name),
            substitutions: template::bind(variant, identity),
            artifact,
        });
    }

    Ok(plans)
}

// Exactly one normal component, so joining it cannot leave the directory
fn is_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Remove files in the output directory that carry the theme extension.
///
/// The template is never removed, even when it carries the extension.
pub fn clean(layout: &BuildLayout) -> Result<Vec<PathBuf>, BuildError> {
    let dir = &layout.output_dir;
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let template = layout.template_path();
    let mut removed = Vec::new();
    let entries = fs::read_dir(dir).map_err(BuildError::io("list", dir))?;
    for entry in entries {
        let entry = entry.map_err(BuildError::io("list", dir))?;
        let path = entry.path();
        if path == template {
            continue;
        }
        if path.is_file() && has_extension(&path, &layout.extension) {
            fs::remove_file(&path).map_err(BuildError::io("remove", &path))?;
            debug!(path = %path.display(), "removed stale artifact");
            removed.push(path);
        }
    }
    removed.sort();
    Ok(removed)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.len() > extension.len() && n.ends_with(extension))
}

/// Build every variant in catalog order.
///
/// Stale artifacts are cleaned first. The first failing variant aborts the
/// run; theme files written for earlier variants stay on disk.
pub fn run(
    catalog: &Catalog,
    identity: &ProductIdentity,
    layout: &BuildLayout,
    reporter: &mut dyn Reporter,
) -> Result<BuildSummary, BuildError> {
    let plans = plan(catalog, identity, layout)?;

    reporter.header(
        Some(&format!("{} Builder", identity.humanized)),
        &format!(
            "Current version: {}\nGithub repository: {}",
            identity.version, identity.repository
        ),
    );

    let removed = clean(layout)?;
    for path in &removed {
        reporter.cleaned(path);
    }

    reporter.header(None, "Building theme files");

    let template_path = layout.template_path();
    let mut written = Vec::with_capacity(plans.len());

    for plan in &plans {
        reporter.generating(&format!("{} variation", plan.variant.name));
        template::expand(
            &template_path,
            &plan.staged,
            &plan.destination,
            &plan.substitutions,
        )?;
        info!(variant = %plan.variant.name, artifact = %plan.artifact, "generated theme");
        reporter.written(&plan.destination);
        written.push(plan.destination.clone());
    }

    remove_empty_dir(&layout.staging_dir);

    Ok(BuildSummary { removed, written })
}

// Leave the staging directory behind only if something else lives there
fn remove_empty_dir(dir: &Path) {
    if fs::remove_dir(dir).is_ok() {
        debug!(path = %dir.display(), "removed staging directory");
    }
}
