//! React query/mutation hook generation for smart contracts
//!
//! Reads contract ABIs and emits one TypeScript queries class per contract,
//! with a `useQuery` hook for every read function and a `useMutation` hook for
//! every state-changing one, plus barrel files tying them together.

pub mod cli;
pub mod contract;
pub mod function;
pub mod imports;
pub mod index;
pub mod ir;
pub mod naming;
pub mod parser;
pub mod preflight;
pub mod resolver;
pub mod runner;
pub mod selector;
pub mod target;
pub mod templates;
pub mod ts_types;

#[cfg(test)]
mod tests;

pub use contract::ContractEmitter;
pub use parser::AbiParser;
pub use preflight::ensure_supported_toolchain;
pub use runner::{run, RunSummary};
pub use target::{CodegenTarget, ReactQueryTarget};
