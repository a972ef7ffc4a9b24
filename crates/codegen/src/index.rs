//! Cross-file index builder
//!
//! Aggregates the discovered contract paths into barrel files: one
//! `index.ts` per directory plus a root index that re-exports every
//! contract's queries class by name.

use convert_case::{Case, Casing};
use hooks_core::{EmittedFile, Result};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

use crate::contract::QUERIES_POSTFIX;
use crate::naming::{file_stem, normalize_name, parse_contract_path};

/// Prefix of the parallel barrel set for contract factories
pub const FACTORIES_PREFIX: &str = "factories/";

/// Postfix of contract factory modules
pub const FACTORY_POSTFIX: &str = "__factory";

/// How a barrel re-exports the modules of its directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStyle {
    /// `export { default as XQueries } from './XQueries';`
    Default,
    /// `export { X__factory } from './X__factory';`
    Named,
}

#[derive(Debug, Clone, Copy)]
pub struct BarrelOptions<'a> {
    pub postfix: &'a str,
    pub style: ExportStyle,
}

/// A barrel file, `path` relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarrelFile {
    pub path: String,
    pub contents: String,
}

/// Root index: one re-export per distinct contract name, first occurrence wins
pub fn create_root_index_content(paths: &[String]) -> Result<String> {
    let mut seen = HashSet::new();
    let mut lines = Vec::new();

    for path in paths {
        let contract = parse_contract_path(path)?;
        if !seen.insert(contract.name.clone()) {
            continue;
        }
        let module = if contract.path.is_empty() {
            contract.name.clone()
        } else {
            format!("{}/{}", contract.path.join("/"), contract.name)
        };
        let line = format!(
            "export {{ default as {name}{postfix} }} from './{module}{postfix}';",
            name = contract.name,
            module = module,
            postfix = QUERIES_POSTFIX,
        );
        if !lines.contains(&line) {
            lines.push(line);
        }
    }

    Ok(lines.join("\n"))
}

/// One barrel per directory that holds contracts or nested directories
pub fn create_barrel_files(paths: &[String], options: BarrelOptions<'_>) -> Result<Vec<BarrelFile>> {
    let mut file_reexports: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut directory_reexports: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for path in paths {
        let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty() && *s != ".").collect();
        let file_name = match segments.pop() {
            Some(file_name) => file_name,
            None => continue,
        };

        let dir = segments.join("/");
        file_reexports
            .entry(dir)
            .or_default()
            .insert(normalize_name(file_stem(file_name))?);

        for depth in 0..segments.len() {
            let parent = segments[..depth].join("/");
            directory_reexports
                .entry(parent)
                .or_default()
                .insert(segments[depth].to_string());
        }
    }

    let barrel_dirs: BTreeSet<&String> = file_reexports.keys().chain(directory_reexports.keys()).collect();

    let barrels = barrel_dirs
        .into_iter()
        .map(|dir| {
            let mut lines: Vec<String> = directory_reexports
                .get(dir)
                .into_iter()
                .flatten()
                .map(|nested| format!("export * as {} from './{}';", nested.to_case(Case::Camel), nested))
                .collect();

            lines.extend(file_reexports.get(dir).into_iter().flatten().map(|name| {
                let module = format!("{}{}", name, options.postfix);
                match options.style {
                    ExportStyle::Default => format!("export {{ default as {0} }} from './{0}';", module),
                    ExportStyle::Named => format!("export {{ {0} }} from './{0}';", module),
                }
            }));

            let path = if dir.is_empty() {
                "index.ts".to_string()
            } else {
                format!("{}/index.ts", dir)
            };

            BarrelFile {
                path,
                contents: lines.join("\n"),
            }
        })
        .collect();

    Ok(barrels)
}

/// Build every index file for a run.
///
/// The root barrel of each set is replaced by the root index; the
/// `factories/` set is only produced when `factory_barrels` is set.
pub fn build_index_files(out_dir: &Path, paths: &[String], factory_barrels: bool) -> Result<Vec<EmittedFile>> {
    let mut barrels = create_barrel_files(
        paths,
        BarrelOptions {
            postfix: QUERIES_POSTFIX,
            style: ExportStyle::Default,
        },
    )?;

    if factory_barrels {
        let factory_paths: Vec<String> = paths.iter().map(|p| format!("{}{}", FACTORIES_PREFIX, p)).collect();
        barrels.extend(create_barrel_files(
            &factory_paths,
            BarrelOptions {
                postfix: FACTORY_POSTFIX,
                style: ExportStyle::Named,
            },
        )?);
    }

    let mut files = vec![EmittedFile {
        path: out_dir.join("index.ts"),
        contents: format!("{}\n", create_root_index_content(paths)?),
    }];

    files.extend(
        barrels
            .into_iter()
            .filter(|barrel| barrel.path != "index.ts")
            .map(|barrel| EmittedFile {
                path: barrel.path.split('/').fold(out_dir.to_path_buf(), |acc, part| acc.join(part)),
                contents: format!("{}\n", barrel.contents),
            }),
    );

    Ok(files)
}
