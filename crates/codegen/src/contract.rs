//! Contract emitter
//!
//! Produces the `<Name>Queries` wrapper class for one contract together with
//! its import header.

use hooks_core::{ContractDescriptor, EmittedFile, GenerateOptions, Result};
use serde_json::json;
use std::path::Path;
use tracing::debug;

use crate::function::FunctionEmitter;
use crate::imports::{create_imports_for_used_identifiers, fixed_imports, POSSIBLE_IMPORTS};
use crate::naming::normalize_name;
use crate::templates::TemplateManager;

/// Suffix of every generated wrapper class and file
pub const QUERIES_POSTFIX: &str = "Queries";

pub struct ContractEmitter {
    templates: TemplateManager,
}

impl ContractEmitter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            templates: TemplateManager::new()?,
        })
    }

    /// Generate the full file contents for a contract
    pub fn codegen_contract(&self, contract: &ContractDescriptor, options: &GenerateOptions) -> Result<String> {
        let functions = FunctionEmitter::new(&self.templates, options);

        let mut body = String::new();
        for group in &contract.groups {
            body.push('\n');
            body.push_str(&functions.emit_group(group)?);
        }

        let class_name = format!("{}{}", normalize_name(&contract.name)?, QUERIES_POSTFIX);
        let source = self.templates.render(
            "contract",
            &json!({
                "class_name": class_name,
                "body": body,
            }),
        )?;

        let mut imports = create_imports_for_used_identifiers(POSSIBLE_IMPORTS, &source);
        imports.extend(fixed_imports(&options.contract_name, &options.factory_module));

        debug!(
            contract = %contract.name,
            groups = contract.groups.len(),
            "generated queries class"
        );

        Ok(format!("{}\n\n{}", imports.join("\n"), source))
    }

    /// Generate the file for a contract below `out_dir`
    pub fn emit(&self, contract: &ContractDescriptor, options: &GenerateOptions, out_dir: &Path) -> Result<EmittedFile> {
        Ok(EmittedFile {
            path: output_path(out_dir, contract),
            contents: self.codegen_contract(contract, options)?,
        })
    }
}

/// `<out_dir>/<contract path>/<Name>Queries.ts`
pub fn output_path(out_dir: &Path, contract: &ContractDescriptor) -> std::path::PathBuf {
    let mut path = out_dir.to_path_buf();
    for segment in &contract.path {
        path.push(segment);
    }
    path.push(format!("{}{}.ts", contract.name, QUERIES_POSTFIX));
    path
}
