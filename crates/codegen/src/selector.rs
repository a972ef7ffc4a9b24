//! Template selection by state mutability

use hooks_core::{FunctionDeclaration, GenerateOptions, StateMutability};
use serde::Serialize;

/// Shape of a generated hook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HookKind {
    /// `useQuery` wrapper, no signer
    Read,
    /// `useMutation` wrapper for non-payable calls
    Write,
    /// `useMutation` wrapper whose overrides may carry `value`
    PayableWrite,
}

impl HookKind {
    /// TypeScript type of the trailing `overrides` parameter
    pub fn overrides_type(&self) -> &'static str {
        match self {
            HookKind::Read => "CallOverrides",
            HookKind::Write => "Overrides & { from?: string }",
            HookKind::PayableWrite => "PayableOverrides & { from?: string }",
        }
    }

    /// Suffix of the hook name
    pub fn suffix(&self) -> &'static str {
        match self {
            HookKind::Read => "Query",
            HookKind::Write | HookKind::PayableWrite => "Mutation",
        }
    }

    pub fn template_name(&self) -> &'static str {
        match self {
            HookKind::Read => "read_hook",
            HookKind::Write | HookKind::PayableWrite => "write_hook",
        }
    }
}

pub fn select(function: &FunctionDeclaration, options: &GenerateOptions) -> HookKind {
    if options.force_static_call || function.state_mutability.is_read_only() {
        return HookKind::Read;
    }

    match function.state_mutability {
        StateMutability::Payable => HookKind::PayableWrite,
        _ => HookKind::Write,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn function(state_mutability: StateMutability) -> FunctionDeclaration {
        FunctionDeclaration {
            name: "f".to_string(),
            inputs: vec![],
            outputs: vec![],
            state_mutability,
            documentation: None,
        }
    }

    #[test]
    fn test_select_by_mutability() {
        let options = GenerateOptions::new("C");
        assert_eq!(select(&function(StateMutability::Pure), &options), HookKind::Read);
        assert_eq!(select(&function(StateMutability::View), &options), HookKind::Read);
        assert_eq!(select(&function(StateMutability::NonPayable), &options), HookKind::Write);
        assert_eq!(select(&function(StateMutability::Payable), &options), HookKind::PayableWrite);
    }

    #[test]
    fn test_force_static_call() {
        let options = GenerateOptions {
            force_static_call: true,
            ..GenerateOptions::new("C")
        };
        assert_eq!(select(&function(StateMutability::Payable), &options), HookKind::Read);
        assert_eq!(select(&function(StateMutability::NonPayable), &options), HookKind::Read);
    }

    #[test]
    fn test_payable_overrides_differ() {
        assert_ne!(HookKind::Write.overrides_type(), HookKind::PayableWrite.overrides_type());
        assert!(HookKind::PayableWrite.overrides_type().starts_with("PayableOverrides"));
        assert_eq!(HookKind::Read.suffix(), "Query");
        assert_eq!(HookKind::PayableWrite.suffix(), "Mutation");
    }
}
