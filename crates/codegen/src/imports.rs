//! Import header computation for generated files

use regex::Regex;
use std::collections::HashSet;

/// Identifiers a module may provide to generated code
#[derive(Debug, Clone, Copy)]
pub struct ModuleImports {
    pub module: &'static str,
    pub type_only: bool,
    pub identifiers: &'static [&'static str],
}

/// Type-only imports, included only when the body references them
pub const POSSIBLE_IMPORTS: &[ModuleImports] = &[
    ModuleImports {
        module: "ethers",
        type_only: true,
        identifiers: &[
            "BaseContract",
            "BigNumber",
            "BigNumberish",
            "BytesLike",
            "CallOverrides",
            "ContractTransaction",
            "Overrides",
            "PayableOverrides",
            "PopulatedTransaction",
            "utils",
            "ContractReceipt",
        ],
    },
    ModuleImports {
        module: "@ethersproject/abi",
        type_only: true,
        identifiers: &["FunctionFragment", "Result", "EventFragment"],
    },
    ModuleImports {
        module: "@ethersproject/providers",
        type_only: true,
        identifiers: &["Listener", "Provider"],
    },
];

/// Identifiers of `modules` that appear in `source` as whole words
fn used_identifiers<'a>(modules: &[ModuleImports], source: &'a str) -> HashSet<&'a str> {
    let alternatives: Vec<String> = modules
        .iter()
        .flat_map(|imports| imports.identifiers.iter())
        .map(|identifier| regex::escape(identifier))
        .collect();
    if alternatives.is_empty() {
        return HashSet::new();
    }

    match Regex::new(&format!(r"\b(?:{})\b", alternatives.join("|"))) {
        Ok(re) => re.find_iter(source).map(|m| m.as_str()).collect(),
        Err(_) => HashSet::new(),
    }
}

/// One import declaration per module for the identifiers `source` uses.
/// Modules with no used identifier are left out.
pub fn create_imports_for_used_identifiers(modules: &[ModuleImports], source: &str) -> Vec<String> {
    let found = used_identifiers(modules, source);
    modules
        .iter()
        .filter_map(|imports| {
            let used: Vec<&str> = imports
                .identifiers
                .iter()
                .copied()
                .filter(|identifier| found.contains(identifier))
                .collect();
            if used.is_empty() {
                return None;
            }
            let keyword = if imports.type_only { "import type" } else { "import" };
            Some(format!("{} {{ {} }} from \"{}\";", keyword, used.join(", "), imports.module))
        })
        .collect()
}

/// Imports every generated file carries: the contract factory and the hook providers
pub fn fixed_imports(contract_name: &str, factory_module: &str) -> Vec<String> {
    vec![
        format!("import {{ {}__factory }} from \"{}\";", contract_name, factory_module),
        "import { useProvider, useSigner } from \"wagmi\";".to_string(),
        "import { useQuery, useMutation } from \"@tanstack/react-query\";".to_string(),
    ]
}
