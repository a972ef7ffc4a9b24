use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// State mutability of a contract function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    /// Does not read or write chain state
    Pure,

    /// Reads chain state only
    View,

    /// May write chain state, rejects attached value
    NonPayable,

    /// May write chain state and accept attached value
    Payable,
}

impl StateMutability {
    /// Whether a call never alters persistent state
    pub fn is_read_only(&self) -> bool {
        matches!(self, StateMutability::Pure | StateMutability::View)
    }
}

impl From<&str> for StateMutability {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pure" => StateMutability::Pure,
            "view" | "constant" => StateMutability::View,
            "payable" => StateMutability::Payable,
            _ => StateMutability::NonPayable,
        }
    }
}

/// Solidity type of a function parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvmType {
    Uint(u16),
    Int(u16),
    Address,
    Bool,
    String,
    Bytes,
    FixedBytes(u8),
    Array {
        item: Box<EvmType>,
        size: Option<usize>,
    },
    Tuple {
        components: Vec<AbiParameter>,
    },
    /// Anything we do not map (`function`, `fixed`, ...)
    Unknown(String),
}

impl EvmType {
    /// Parse a solidity type string.
    ///
    /// `components` carries the tuple members for `tuple`, `tuple[]`, ...
    pub fn parse(raw: &str, components: &[AbiParameter]) -> EvmType {
        let raw = raw.trim();

        if raw.ends_with(']') {
            if let Some(open) = raw.rfind('[') {
                let size = raw[open + 1..raw.len() - 1].parse::<usize>().ok();
                let item = EvmType::parse(&raw[..open], components);
                return EvmType::Array {
                    item: Box::new(item),
                    size,
                };
            }
        }

        if raw == "tuple" {
            return EvmType::Tuple {
                components: components.to_vec(),
            };
        }

        match raw {
            "address" => return EvmType::Address,
            "bool" => return EvmType::Bool,
            "string" => return EvmType::String,
            "bytes" => return EvmType::Bytes,
            _ => {}
        }

        if let Some(bits) = raw.strip_prefix("uint") {
            if let Some(bits) = parse_bits(bits) {
                return EvmType::Uint(bits);
            }
        }
        if let Some(bits) = raw.strip_prefix("int") {
            if let Some(bits) = parse_bits(bits) {
                return EvmType::Int(bits);
            }
        }
        if let Some(size) = raw.strip_prefix("bytes") {
            if let Ok(size) = size.parse::<u8>() {
                if (1..=32).contains(&size) {
                    return EvmType::FixedBytes(size);
                }
            }
        }

        EvmType::Unknown(raw.to_string())
    }

    /// Canonical type as used in function signatures, tuples expanded
    pub fn canonical(&self) -> String {
        match self {
            EvmType::Uint(bits) => format!("uint{}", bits),
            EvmType::Int(bits) => format!("int{}", bits),
            EvmType::Address => "address".to_string(),
            EvmType::Bool => "bool".to_string(),
            EvmType::String => "string".to_string(),
            EvmType::Bytes => "bytes".to_string(),
            EvmType::FixedBytes(size) => format!("bytes{}", size),
            EvmType::Array { item, size } => match size {
                Some(size) => format!("{}[{}]", item.canonical(), size),
                None => format!("{}[]", item.canonical()),
            },
            EvmType::Tuple { components, .. } => {
                let types: Vec<String> = components.iter().map(|c| c.ty.canonical()).collect();
                format!("({})", types.join(","))
            }
            EvmType::Unknown(raw) => raw.clone(),
        }
    }
}

fn parse_bits(bits: &str) -> Option<u16> {
    if bits.is_empty() {
        return Some(256);
    }
    bits.parse::<u16>()
        .ok()
        .filter(|b| *b > 0 && *b <= 256 && b % 8 == 0)
}

/// A function input or output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiParameter {
    /// Parameter name, may be empty
    pub name: String,
    /// Parsed parameter type
    pub ty: EvmType,
}

/// NatSpec documentation attached to a function
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDocumentation {
    pub details: Option<String>,
    pub notice: Option<String>,
    /// `(parameter name, description)` in documentation order
    pub params: Vec<(String, String)>,
    pub returns: Option<String>,
}

impl FunctionDocumentation {
    pub fn is_empty(&self) -> bool {
        self.details.is_none() && self.notice.is_none() && self.params.is_empty() && self.returns.is_none()
    }
}

/// One callable function of a contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub inputs: Vec<AbiParameter>,
    pub outputs: Vec<AbiParameter>,
    pub state_mutability: StateMutability,
    pub documentation: Option<FunctionDocumentation>,
}

impl FunctionDeclaration {
    /// Full signature, e.g. `transfer(address,uint256)`
    pub fn signature(&self) -> String {
        let types: Vec<String> = self.inputs.iter().map(|i| i.ty.canonical()).collect();
        format!("{}({})", self.name, types.join(","))
    }
}

/// All functions sharing one name within a contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionGroup {
    pub name: String,
    pub functions: Vec<FunctionDeclaration>,
}

impl FunctionGroup {
    /// Group functions by name, keeping the order in which names first appear
    pub fn group(functions: Vec<FunctionDeclaration>) -> Vec<FunctionGroup> {
        let mut groups: Vec<FunctionGroup> = Vec::new();

        for function in functions {
            match groups.iter_mut().find(|g| g.name == function.name) {
                Some(group) => group.functions.push(function),
                None => groups.push(FunctionGroup {
                    name: function.name.clone(),
                    functions: vec![function],
                }),
            }
        }

        groups
    }
}

/// Deployment bytecode of a contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bytecode {
    /// Hex string with the `0x` prefix, library placeholders left in place
    pub bytecode: String,
}

/// Everything the emitters need to know about one contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractDescriptor {
    /// Normalized contract name
    pub name: String,
    /// Directory segments relative to the input directory
    pub path: Vec<String>,
    pub groups: Vec<FunctionGroup>,
    pub bytecode: Option<Bytecode>,
}

/// Options for one contract's generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Treat every function as a read call
    pub force_static_call: bool,
    /// Emit signature-keyed hooks even for functions that are not overloaded
    pub always_generate_overloads: bool,
    /// Render tuples as named object types instead of positional tuples
    pub use_structs: bool,
    pub contract_name: String,
    /// Module the `<Contract>__factory` import is taken from
    pub factory_module: String,
}

impl GenerateOptions {
    pub fn new(contract_name: impl Into<String>) -> Self {
        Self {
            force_static_call: false,
            always_generate_overloads: false,
            use_structs: true,
            contract_name: contract_name.into(),
            factory_module: crate::config::DEFAULT_FACTORY_MODULE.to_string(),
        }
    }
}

/// Input artifact handed to a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Generated file ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFile {
    pub path: PathBuf,
    pub contents: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(name: &str, ty: &str) -> AbiParameter {
        AbiParameter {
            name: name.to_string(),
            ty: EvmType::parse(ty, &[]),
        }
    }

    #[test]
    fn test_parse_elementary_types() {
        assert_eq!(EvmType::parse("uint", &[]), EvmType::Uint(256));
        assert_eq!(EvmType::parse("uint8", &[]), EvmType::Uint(8));
        assert_eq!(EvmType::parse("int128", &[]), EvmType::Int(128));
        assert_eq!(EvmType::parse("bytes32", &[]), EvmType::FixedBytes(32));
        assert_eq!(EvmType::parse("bytes", &[]), EvmType::Bytes);
        assert_eq!(EvmType::parse("function", &[]), EvmType::Unknown("function".to_string()));
    }

    #[test]
    fn test_parse_nested_arrays() {
        let ty = EvmType::parse("uint256[2][]", &[]);
        assert_eq!(ty.canonical(), "uint256[2][]");
        match ty {
            EvmType::Array { item, size: None } => {
                assert_eq!(*item, EvmType::Array { item: Box::new(EvmType::Uint(256)), size: Some(2) });
            }
            other => panic!("unexpected type {:?}", other),
        }
    }

    #[test]
    fn test_tuple_array_signature() {
        let components = vec![param("id", "uint256"), param("owner", "address")];
        let ty = EvmType::parse("tuple[]", &components);

        assert_eq!(ty.canonical(), "(uint256,address)[]");
        match ty {
            EvmType::Array { item, .. } => match *item {
                EvmType::Tuple { components } => assert_eq!(components.len(), 2),
                other => panic!("unexpected item {:?}", other),
            },
            other => panic!("unexpected type {:?}", other),
        }
    }

    #[test]
    fn test_function_signature() {
        let function = FunctionDeclaration {
            name: "transfer".to_string(),
            inputs: vec![param("to", "address"), param("amount", "uint256")],
            outputs: vec![param("", "bool")],
            state_mutability: StateMutability::NonPayable,
            documentation: None,
        };
        assert_eq!(function.signature(), "transfer(address,uint256)");
    }

    #[test]
    fn test_group_keeps_first_appearance_order() {
        let make = |name: &str, ty: &str| FunctionDeclaration {
            name: name.to_string(),
            inputs: vec![param("x", ty)],
            outputs: vec![],
            state_mutability: StateMutability::View,
            documentation: None,
        };
        let groups = FunctionGroup::group(vec![
            make("mint", "uint256"),
            make("burn", "uint256"),
            make("mint", "address"),
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "mint");
        assert_eq!(groups[0].functions.len(), 2);
        assert_eq!(groups[1].name, "burn");
    }

    #[test]
    fn test_state_mutability_from_str() {
        assert_eq!(StateMutability::from("view"), StateMutability::View);
        assert_eq!(StateMutability::from("payable"), StateMutability::Payable);
        assert_eq!(StateMutability::from("nonpayable"), StateMutability::NonPayable);
        assert!(StateMutability::Pure.is_read_only());
        assert!(!StateMutability::Payable.is_read_only());
    }
}
