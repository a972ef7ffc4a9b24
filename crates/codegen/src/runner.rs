//! Generation runner
//!
//! Discovers artifact files, feeds them through a target and writes whatever
//! the target emits.

use hooks_core::{CodegenConfig, EmittedFile, Error, InputFile, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::target::{CodegenTarget, ReactQueryTarget};

/// Extensions of the artifacts the generator understands
pub const INPUT_EXTENSIONS: &[&str] = &["json", "abi", "bin"];

/// Counters for a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Input files handed to the target
    pub processed: usize,
    /// Input files with neither ABI entries nor bytecode
    pub skipped: usize,
    /// Files written, or printed on a dry run
    pub written: usize,
}

fn has_input_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| INPUT_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

/// Expand files and directories into a sorted list of artifact files
pub async fn discover_input_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending: Vec<PathBuf> = inputs.to_vec();

    while let Some(path) = pending.pop() {
        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| Error::io(format!("Failed to read {}: {}", path.display(), e)))?;

        if metadata.is_dir() {
            let mut entries = tokio::fs::read_dir(&path)
                .await
                .map_err(|e| Error::io(format!("Failed to list directory {}: {}", path.display(), e)))?;
            while let Some(entry) = entries.next_entry().await? {
                pending.push(entry.path());
            }
        } else if has_input_extension(&path) {
            files.push(path);
        } else {
            debug!(path = %path.display(), "ignoring file with unknown extension");
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Write a generated file, or print it on a dry run
pub async fn write_file(file: &EmittedFile, dry_run: bool) -> Result<()> {
    if dry_run {
        println!("\n--- {} ---", file.path.display());
        println!("{}", file.contents);
        return Ok(());
    }

    if let Some(parent) = file.path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::io(format!("Failed to create directory {}: {}", parent.display(), e)))?;
    }
    tokio::fs::write(&file.path, &file.contents)
        .await
        .map_err(|e| Error::io(format!("Failed to write file {}: {}", file.path.display(), e)))?;

    debug!(path = %file.path.display(), "wrote file");
    Ok(())
}

/// Drive `target` over every discovered file
pub async fn run_target<T: CodegenTarget>(target: &mut T, files: &[PathBuf], dry_run: bool) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for path in files {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::io(format!("Failed to read {}: {}", path.display(), e)))?;
        let input = InputFile {
            path: path.clone(),
            contents,
        };

        summary.processed += 1;
        let Some(outputs) = target.transform_file(&input)? else {
            summary.skipped += 1;
            continue;
        };

        for output in &outputs {
            write_file(output, dry_run).await?;
            summary.written += 1;
        }
    }

    for output in target.after_run()? {
        write_file(&output, dry_run).await?;
        summary.written += 1;
    }

    Ok(summary)
}

/// Generate hooks for `inputs` (files or directories) with `config`
pub async fn run(config: CodegenConfig, inputs: &[PathBuf]) -> Result<RunSummary> {
    let files = discover_input_files(inputs).await?;
    info!(files = files.len(), "discovered input files");

    let dry_run = config.dry_run;
    let mut target = ReactQueryTarget::new(config, &files)?;
    let summary = run_target(&mut target, &files, dry_run).await?;

    info!(
        processed = summary.processed,
        skipped = summary.skipped,
        written = summary.written,
        out_dir = %target.out_dir().display(),
        "generation finished"
    );

    Ok(summary)
}
