/// Core types, errors and configuration for typechain-hooks
pub mod config;
pub mod error;
pub mod types;

pub use config::{CodegenConfig, CodegenFlags, ConfigError};
pub use error::{Error, Result};
pub use types::{
    AbiParameter, Bytecode, ContractDescriptor, EmittedFile, EvmType, FunctionDeclaration,
    FunctionDocumentation, FunctionGroup, GenerateOptions, InputFile, StateMutability,
};
