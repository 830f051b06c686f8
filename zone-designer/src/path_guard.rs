use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Refuse to write generated output over one of the input lists.
pub fn ensure_output_not_input(output: &Path, inputs: &[&Path]) -> Result<()> {
    let out_norm = resolve(output)
        .with_context(|| format!("failed to resolve output path {}", output.display()))?;

    for input in inputs {
        let in_norm = resolve(input)
            .with_context(|| format!("failed to resolve input path {}", input.display()))?;
        if out_norm == in_norm {
            bail!(
                "refusing to overwrite input file: output {} matches input {}",
                output.display(),
                input.display()
            );
        }
    }
    Ok(())
}

/// Absolute form of `path` for comparison. Existing paths are canonicalized.
/// For a path that is not on disk yet, `.` and `..` are folded lexically and
/// the deepest existing ancestor is canonicalized, so `out/new/../hosts.txt`
/// still matches `out/hosts.txt`.
fn resolve(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return path
            .canonicalize()
            .with_context(|| format!("canonicalize {}", path.display()));
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().context("current_dir")?.join(path)
    };
    let folded = fold_dots(&absolute);

    let mut ancestor = folded.as_path();
    let mut missing = Vec::new();
    while !ancestor.exists() {
        match (ancestor.parent(), ancestor.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                ancestor = parent;
            }
            _ => return Ok(folded),
        }
    }

    let mut resolved = ancestor
        .canonicalize()
        .with_context(|| format!("canonicalize {}", ancestor.display()))?;
    resolved.extend(missing.iter().rev());
    Ok(resolved)
}

fn fold_dots(path: &Path) -> PathBuf {
    let mut folded = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                folded.pop();
            }
            other => folded.push(other.as_os_str()),
        }
    }
    folded
}
