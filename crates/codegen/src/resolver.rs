//! Overload resolution
//!
//! Decides, per function-name group, which hooks are generated and whether
//! they are keyed by the bare name or by the full signature.

use hooks_core::{FunctionDeclaration, FunctionGroup, GenerateOptions};

/// How a hook for one function is identified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookVariant {
    /// Keyed by the bare function name
    Plain,
    /// Keyed by the full signature, e.g. `mint(address,uint256)`
    Signature(String),
}

impl HookVariant {
    pub fn signature(&self) -> Option<&str> {
        match self {
            HookVariant::Plain => None,
            HookVariant::Signature(signature) => Some(signature),
        }
    }
}

/// One hook to generate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHook<'a> {
    pub function: &'a FunctionDeclaration,
    pub variant: HookVariant,
}

/// Resolve the hooks for a group.
///
/// A single function gets a bare-name hook, plus a signature hook when
/// `always_generate_overloads` is set. Overloaded names only get signature
/// hooks.
pub fn resolve<'a>(group: &'a FunctionGroup, options: &GenerateOptions) -> Vec<ResolvedHook<'a>> {
    match group.functions.as_slice() {
        [function] => {
            let mut hooks = vec![ResolvedHook {
                function,
                variant: HookVariant::Plain,
            }];
            if options.always_generate_overloads {
                hooks.push(ResolvedHook {
                    function,
                    variant: HookVariant::Signature(function.signature()),
                });
            }
            hooks
        }
        functions => functions
            .iter()
            .map(|function| ResolvedHook {
                function,
                variant: HookVariant::Signature(function.signature()),
            })
            .collect(),
    }
}
