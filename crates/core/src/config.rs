//! Configuration for hook generation
//!
//! Values are layered: defaults, then an optional `.toml`/`.json` file, then
//! `HOOKS_*` environment variables. The CLI applies its own flags last.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Output directory used when none is configured
pub const DEFAULT_OUT_PATH: &str = "./types/ethers-contracts/";

/// Module the generated files import `<Contract>__factory` from
pub const DEFAULT_FACTORY_MODULE: &str = "../index.ts";

/// Flags passed through to the emitters unchanged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenFlags {
    /// Emit signature-keyed hooks even when a name is not overloaded
    pub always_generate_overloads: bool,
    /// Render tuple parameters as named object types
    pub use_structs: bool,
    /// Generate read hooks for every function regardless of mutability
    pub force_static_calls: bool,
    /// Also emit the `factories/` barrel set
    pub factory_barrels: bool,
}

impl Default for CodegenFlags {
    fn default() -> Self {
        Self {
            always_generate_overloads: false,
            use_structs: true,
            force_static_calls: false,
            factory_barrels: false,
        }
    }
}

/// Main configuration for a generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// Directory input paths are made relative to
    pub input_dir: PathBuf,
    /// Output directory, `DEFAULT_OUT_PATH` when unset
    pub out_dir: Option<PathBuf>,
    pub flags: CodegenFlags,
    pub factory_module: String,
    /// Print generated files instead of writing them
    pub dry_run: bool,
    /// Do not query the TypeScript toolchain before generating
    pub skip_version_check: bool,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            out_dir: None,
            flags: CodegenFlags::default(),
            factory_module: DEFAULT_FACTORY_MODULE.to_string(),
            dry_run: false,
            skip_version_check: false,
        }
    }
}

impl CodegenConfig {
    /// Load configuration from a `.toml` or `.json` file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config = match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML configuration file: {}", path.display()))?,
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON configuration file: {}", path.display()))?,
            _ => return Err(anyhow::anyhow!("Unsupported configuration file format. Supported formats: .toml, .json")),
        };

        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_environment_overrides(&mut self) -> anyhow::Result<()> {
        if let Ok(input_dir) = env::var("HOOKS_INPUT_DIR") {
            self.input_dir = PathBuf::from(input_dir);
        }
        if let Ok(out_dir) = env::var("HOOKS_OUT_DIR") {
            self.out_dir = Some(PathBuf::from(out_dir));
        }
        if let Ok(module) = env::var("HOOKS_FACTORY_MODULE") {
            self.factory_module = module;
        }
        if let Ok(value) = env::var("HOOKS_ALWAYS_GENERATE_OVERLOADS") {
            self.flags.always_generate_overloads = parse_bool("HOOKS_ALWAYS_GENERATE_OVERLOADS", &value)?;
        }
        if let Ok(value) = env::var("HOOKS_USE_STRUCTS") {
            self.flags.use_structs = parse_bool("HOOKS_USE_STRUCTS", &value)?;
        }
        if let Ok(value) = env::var("HOOKS_SKIP_VERSION_CHECK") {
            self.skip_version_check = parse_bool("HOOKS_SKIP_VERSION_CHECK", &value)?;
        }

        Ok(())
    }

    /// Output directory with the default applied
    pub fn out_dir(&self) -> PathBuf {
        self.out_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_PATH))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.factory_module.trim().is_empty() {
            return Err(ConfigError::EmptyFactoryModule);
        }

        if let Some(out_dir) = &self.out_dir {
            if out_dir.as_os_str().is_empty() {
                return Err(ConfigError::EmptyOutDir);
            }
        }

        if self.input_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyInputDir);
        }

        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow::anyhow!("Invalid {} value: {}", key, other)),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Factory module path cannot be empty")]
    EmptyFactoryModule,
    #[error("Output directory cannot be empty")]
    EmptyOutDir,
    #[error("Input directory cannot be empty")]
    EmptyInputDir,
}

impl From<ConfigError> for crate::Error {
    fn from(err: ConfigError) -> Self {
        crate::Error::Config(err.to_string())
    }
}
