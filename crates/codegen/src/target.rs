//! Codegen target adapter
//!
//! A target receives every discovered artifact once and returns the files to
//! write for it, then gets a final `after_run` call for cross-file outputs.

use hooks_core::{Bytecode, CodegenConfig, ContractDescriptor, EmittedFile, GenerateOptions, InputFile, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::contract::ContractEmitter;
use crate::index::build_index_files;
use crate::naming::{normalize_slashes, relative_to, shorten_full_json_file_path, strip_extension};
use crate::parser::AbiParser;

/// A code generation target driven by the runner
pub trait CodegenTarget {
    /// Human readable target name
    fn name(&self) -> &str;

    /// Generate the outputs for one input file.
    ///
    /// `None` means the file held nothing usable. `Some` with an empty list
    /// means it was consumed without output of its own, e.g. cached bytecode.
    fn transform_file(&mut self, file: &InputFile) -> Result<Option<Vec<EmittedFile>>>;

    /// Generate outputs that depend on every input
    fn after_run(&mut self) -> Result<Vec<EmittedFile>>;
}

/// Generates one `<Name>Queries.ts` per contract plus the barrel files
pub struct ReactQueryTarget {
    config: CodegenConfig,
    parser: AbiParser,
    emitter: ContractEmitter,
    out_dir: PathBuf,
    /// Discovered paths relative to the input directory, before shortening
    relative_files: Vec<String>,
    /// Shortened relative paths of the contracts emitted so far, in input order
    emitted_paths: Vec<String>,
    contracts_without_bytecode: HashMap<String, ContractDescriptor>,
    bytecode_cache: HashMap<String, Bytecode>,
}

impl ReactQueryTarget {
    pub fn new(config: CodegenConfig, discovered: &[PathBuf]) -> Result<Self> {
        config.validate()?;

        let out_dir = std::env::current_dir()?.join(config.out_dir());

        let relative_files: Vec<String> = discovered
            .iter()
            .map(|path| relative_to(path, &config.input_dir))
            .collect();

        Ok(Self {
            config,
            parser: AbiParser::new(),
            emitter: ContractEmitter::new()?,
            out_dir,
            relative_files,
            emitted_paths: Vec::new(),
            contracts_without_bytecode: HashMap::new(),
            bytecode_cache: HashMap::new(),
        })
    }

    /// Absolute output directory
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Paths the index files are built from
    pub fn emitted_paths(&self) -> &[String] {
        &self.emitted_paths
    }

    fn relative_path(&self, path: &Path) -> String {
        let relative = relative_to(path, &self.config.input_dir);
        shorten_full_json_file_path(&relative, &self.relative_files)
    }

    fn generate_options(&self, contract: &ContractDescriptor) -> GenerateOptions {
        let flags = &self.config.flags;
        GenerateOptions {
            force_static_call: flags.force_static_calls,
            always_generate_overloads: flags.always_generate_overloads,
            use_structs: flags.use_structs,
            contract_name: contract.name.clone(),
            factory_module: self.config.factory_module.clone(),
        }
    }

    fn transform_bin_file(&mut self, file: &InputFile, relative: &str) -> Result<Option<Vec<EmittedFile>>> {
        let key = strip_extension(relative).to_string();

        let bytecode = match self.parser.extract_bytecode(&file.contents) {
            Some(bytecode) => bytecode,
            None => {
                debug!(path = %normalize_slashes(&file.path), "no bytecode found, skipping");
                return Ok(None);
            }
        };

        // the hooks file for a pending contract is already out, it only stops waiting
        match self.contracts_without_bytecode.remove(&key) {
            Some(contract) => debug!(contract = %contract.name, "bytecode found for pending contract"),
            None => {
                self.bytecode_cache.insert(key, bytecode);
            }
        }

        Ok(Some(Vec::new()))
    }

    fn transform_abi_file(&mut self, file: &InputFile, relative: &str) -> Result<Option<Vec<EmittedFile>>> {
        let abi = self.parser.extract_abi(&file.contents)?;
        if abi.is_empty() {
            debug!(path = %normalize_slashes(&file.path), "no ABI entries found, skipping");
            return Ok(None);
        }

        let documentation = self.parser.extract_documentation(&file.contents)?;
        let mut contract = self.parser.parse_contract(&abi, relative, &documentation)?;

        let key = strip_extension(relative).to_string();
        contract.bytecode = self
            .parser
            .extract_bytecode(&file.contents)
            .or_else(|| self.bytecode_cache.get(&key).cloned());

        let options = self.generate_options(&contract);
        let emitted = self.emitter.emit(&contract, &options, &self.out_dir)?;
        self.emitted_paths.push(relative.to_string());

        if contract.bytecode.is_none() {
            self.contracts_without_bytecode.insert(key, contract);
        }

        Ok(Some(vec![emitted]))
    }
}

impl CodegenTarget for ReactQueryTarget {
    fn name(&self) -> &str {
        "react-query"
    }

    fn transform_file(&mut self, file: &InputFile) -> Result<Option<Vec<EmittedFile>>> {
        let relative = self.relative_path(&file.path);

        match file.path.extension().and_then(|e| e.to_str()) {
            Some("bin") => self.transform_bin_file(file, &relative),
            _ => self.transform_abi_file(file, &relative),
        }
    }

    fn after_run(&mut self) -> Result<Vec<EmittedFile>> {
        let mut pending: Vec<&String> = self.contracts_without_bytecode.keys().collect();
        pending.sort();
        for path in pending {
            debug!(path = %path, "contract has no bytecode");
        }

        self.contracts_without_bytecode.clear();
        self.bytecode_cache.clear();

        let files = build_index_files(&self.out_dir, &self.emitted_paths, self.config.flags.factory_barrels)?;
        info!(generator = self.name(), index_files = files.len(), "built index files");
        Ok(files)
    }
}
