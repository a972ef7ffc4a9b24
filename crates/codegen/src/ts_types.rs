//! Mapping of solidity types to the TypeScript types ethers v5 expects

use hooks_core::{AbiParameter, EvmType};

/// Longest fixed-size array rendered as a tuple type, larger ones become `T[]`
pub const MAX_FIXED_ARRAY_TUPLE: usize = 32;

/// Identifiers the hook templates declare next to the arguments
pub const RESERVED_INPUT_NAMES: &[&str] = &["contract", "overrides", "provider", "signer", "transaction"];

/// Type accepted for an input argument
pub fn input_type(ty: &EvmType, use_structs: bool) -> String {
    match ty {
        EvmType::Uint(_) | EvmType::Int(_) => "BigNumberish".to_string(),
        EvmType::Address | EvmType::String => "string".to_string(),
        EvmType::Bytes | EvmType::FixedBytes(_) => "BytesLike".to_string(),
        EvmType::Bool => "boolean".to_string(),
        EvmType::Array { item, size } => {
            let item = input_type(item, use_structs);
            match size {
                Some(size) if *size <= MAX_FIXED_ARRAY_TUPLE => fixed_array(&item, *size),
                _ => format!("{}[]", item),
            }
        }
        EvmType::Tuple { components, .. } => {
            let types: Vec<String> = components
                .iter()
                .map(|c| input_type(&c.ty, use_structs))
                .collect();
            if use_structs && all_named(components) {
                named_object(components, &types)
            } else {
                format!("[{}]", types.join(", "))
            }
        }
        EvmType::Unknown(_) => "any".to_string(),
    }
}

/// Type returned for an output value
pub fn output_type(ty: &EvmType, use_structs: bool) -> String {
    match ty {
        EvmType::Uint(bits) | EvmType::Int(bits) => {
            if *bits <= 48 {
                "number".to_string()
            } else {
                "BigNumber".to_string()
            }
        }
        EvmType::Address | EvmType::String => "string".to_string(),
        EvmType::Bytes | EvmType::FixedBytes(_) => "string".to_string(),
        EvmType::Bool => "boolean".to_string(),
        EvmType::Array { item, size } => {
            let item = output_type(item, use_structs);
            match size {
                Some(size) if *size <= MAX_FIXED_ARRAY_TUPLE => fixed_array(&item, *size),
                _ if item.contains(" & ") => format!("({})[]", item),
                _ => format!("{}[]", item),
            }
        }
        EvmType::Tuple { components, .. } => output_tuple(components, use_structs),
        EvmType::Unknown(_) => "any".to_string(),
    }
}

/// Result type of a read call: `void` for no outputs, the bare type for one
/// output and a tuple for several.
pub fn output_types(outputs: &[AbiParameter], use_structs: bool) -> String {
    match outputs {
        [] => "void".to_string(),
        [single] => output_type(&single.ty, use_structs),
        many => output_tuple(many, use_structs),
    }
}

/// Argument name, `arg<index>` for unnamed inputs.
///
/// Names taken by the hook templates get a trailing `_`.
pub fn input_name(param: &AbiParameter, index: usize) -> String {
    if param.name.is_empty() {
        format!("arg{}", index)
    } else if RESERVED_INPUT_NAMES.contains(&param.name.as_str()) {
        format!("{}_", param.name)
    } else {
        param.name.clone()
    }
}

fn output_tuple(components: &[AbiParameter], use_structs: bool) -> String {
    let types: Vec<String> = components
        .iter()
        .map(|c| output_type(&c.ty, use_structs))
        .collect();
    let positional = format!("[{}]", types.join(", "));

    let named: Vec<usize> = components
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.name.is_empty())
        .map(|(i, _)| i)
        .collect();
    if !use_structs || named.is_empty() {
        return positional;
    }

    let fields: Vec<String> = named
        .into_iter()
        .map(|i| format!("{}: {}", components[i].name, types[i]))
        .collect();
    format!("{} & {{ {} }}", positional, fields.join("; "))
}

fn named_object(components: &[AbiParameter], types: &[String]) -> String {
    if components.is_empty() {
        return "{}".to_string();
    }
    let fields: Vec<String> = components
        .iter()
        .zip(types)
        .map(|(c, ty)| format!("{}: {}", c.name, ty))
        .collect();
    format!("{{ {} }}", fields.join("; "))
}

fn all_named(components: &[AbiParameter]) -> bool {
    components.iter().all(|c| !c.name.is_empty())
}

fn fixed_array(item: &str, size: usize) -> String {
    format!("[{}]", vec![item; size].join(", "))
}
