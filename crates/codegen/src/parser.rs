//! Contract artifact parser
//!
//! Reads ABI, NatSpec documentation and bytecode out of compiler artifacts
//! (`.json` full artifacts, `.abi` plain ABI arrays and `.bin` bytecode files)
//! and builds the `ContractDescriptor` the emitters work on.

use hooks_core::{
    AbiParameter, Bytecode, ContractDescriptor, Error, EvmType, FunctionDeclaration,
    FunctionDocumentation, FunctionGroup, Result, StateMutability,
};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

use crate::naming::{file_stem, normalize_name};

/// NatSpec documentation keyed by function signature
pub type DocumentationMap = HashMap<String, FunctionDocumentation>;

/// Contract artifact parser
pub struct AbiParser;

impl AbiParser {
    /// Create a new parser instance
    pub fn new() -> Self {
        Self
    }

    /// Extract the ABI entries from an artifact.
    ///
    /// Accepts a bare ABI array, an object with an `abi` field, or a
    /// `compilerOutput.abi` field.
    pub fn extract_abi(&self, contents: &str) -> Result<Vec<Value>> {
        let value: Value = serde_json::from_str(contents)
            .map_err(|e| Error::parse(format!("Not a valid JSON artifact: {}", e)))?;

        let abi = match &value {
            Value::Array(_) => Some(&value),
            Value::Object(_) => value
                .get("abi")
                .or_else(|| value.get("compilerOutput").and_then(|c| c.get("abi"))),
            _ => None,
        };

        match abi {
            Some(Value::Array(entries)) => Ok(entries.clone()),
            Some(_) => Err(Error::parse("ABI must be an array")),
            None => Ok(Vec::new()),
        }
    }

    /// Extract `devdoc`/`userdoc` method documentation keyed by signature
    pub fn extract_documentation(&self, contents: &str) -> Result<DocumentationMap> {
        let value: Value = serde_json::from_str(contents)?;
        let mut docs = DocumentationMap::new();

        let devdoc_methods = value
            .get("devdoc")
            .and_then(|d| d.get("methods"))
            .and_then(|m| m.as_object());
        if let Some(methods) = devdoc_methods {
            for (signature, method) in methods {
                let doc = docs.entry(signature.clone()).or_default();
                doc.details = method
                    .get("details")
                    .and_then(|v| v.as_str())
                    .map(str::to_string);
                if let Some(params) = method.get("params").and_then(|p| p.as_object()) {
                    doc.params = params
                        .iter()
                        .filter_map(|(name, desc)| desc.as_str().map(|d| (name.clone(), d.to_string())))
                        .collect();
                }
                doc.returns = Self::parse_return_doc(method);
            }
        }

        let userdoc_methods = value
            .get("userdoc")
            .and_then(|d| d.get("methods"))
            .and_then(|m| m.as_object());
        if let Some(methods) = userdoc_methods {
            for (signature, method) in methods {
                if let Some(notice) = method.get("notice").and_then(|v| v.as_str()) {
                    docs.entry(signature.clone()).or_default().notice = Some(notice.to_string());
                }
            }
        }

        docs.retain(|_, doc| !doc.is_empty());
        Ok(docs)
    }

    /// `return` is a single string in older compilers, newer ones emit a
    /// `returns` object keyed by output name.
    fn parse_return_doc(method: &Value) -> Option<String> {
        if let Some(ret) = method.get("return").and_then(|v| v.as_str()) {
            return Some(ret.to_string());
        }

        let returns = method.get("returns")?.as_object()?;
        let descriptions: Vec<&str> = returns.values().filter_map(|v| v.as_str()).collect();
        if descriptions.is_empty() {
            None
        } else {
            Some(descriptions.join(", "))
        }
    }

    /// Extract deployment bytecode from a `.bin` file or a full artifact.
    ///
    /// Returns `None` when no usable bytecode is present.
    pub fn extract_bytecode(&self, contents: &str) -> Option<Bytecode> {
        let trimmed = contents.trim();

        let raw = if trimmed.starts_with('{') {
            let value: Value = serde_json::from_str(trimmed).ok()?;
            Self::bytecode_from_artifact(&value)?
        } else {
            trimmed.to_string()
        };

        let body = raw.strip_prefix("0x").unwrap_or(&raw);
        if body.is_empty() {
            return None;
        }

        // library placeholders like `__$abc$__` are not hex
        let linked = body.contains("__");
        let placeholder_chars = body.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
        if !placeholder_chars || (!linked && hex::decode(body).is_err()) {
            debug!("ignoring malformed bytecode");
            return None;
        }

        Some(Bytecode {
            bytecode: format!("0x{}", body),
        })
    }

    fn bytecode_from_artifact(value: &Value) -> Option<String> {
        let candidates = [
            value.get("bytecode"),
            value.get("evm").and_then(|e| e.get("bytecode")),
            value
                .get("compilerOutput")
                .and_then(|c| c.get("evm"))
                .and_then(|e| e.get("bytecode")),
        ];

        candidates.into_iter().flatten().find_map(|candidate| match candidate {
            Value::String(s) => Some(s.clone()),
            Value::Object(_) => candidate
                .get("object")
                .and_then(|o| o.as_str())
                .map(str::to_string),
            _ => None,
        })
    }

    /// Build a contract descriptor from ABI entries.
    ///
    /// `path` is the artifact path relative to the input directory, with
    /// forward slashes; its directories become the contract path and its file
    /// stem the contract name.
    pub fn parse_contract(
        &self,
        abi: &[Value],
        path: &str,
        documentation: &DocumentationMap,
    ) -> Result<ContractDescriptor> {
        let mut segments: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .map(str::to_string)
            .collect();
        let file_name = segments
            .pop()
            .ok_or_else(|| Error::parse(format!("Empty artifact path: {:?}", path)))?;
        let stem = file_stem(&file_name);

        let mut functions = Vec::new();
        for item in abi {
            let item_type = item.get("type").and_then(|v| v.as_str()).unwrap_or("function");
            if item_type != "function" {
                continue;
            }
            let mut function = self.parse_function(item)?;
            function.documentation = documentation.get(&function.signature()).cloned();
            functions.push(function);
        }

        Ok(ContractDescriptor {
            name: normalize_name(stem)?,
            path: segments,
            groups: FunctionGroup::group(functions),
            bytecode: None,
        })
    }

    /// Parse a function from ABI
    fn parse_function(&self, value: &Value) -> Result<FunctionDeclaration> {
        let name = value
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::parse("Function must have a name"))?
            .to_string();

        let inputs = value
            .get("inputs")
            .and_then(|v| v.as_array())
            .map(|arr| Self::parse_parameters(arr))
            .transpose()?
            .unwrap_or_default();

        let outputs = value
            .get("outputs")
            .and_then(|v| v.as_array())
            .map(|arr| Self::parse_parameters(arr))
            .transpose()?
            .unwrap_or_default();

        let state_mutability = match value.get("stateMutability").and_then(|v| v.as_str()) {
            Some(mutability) => StateMutability::from(mutability),
            // Legacy support
            None if value.get("constant").and_then(|v| v.as_bool()).unwrap_or(false) => StateMutability::View,
            None if value.get("payable").and_then(|v| v.as_bool()).unwrap_or(false) => StateMutability::Payable,
            None => StateMutability::NonPayable,
        };

        Ok(FunctionDeclaration {
            name,
            inputs,
            outputs,
            state_mutability,
            documentation: None,
        })
    }

    /// Parse function parameters, recursing into tuple components
    fn parse_parameters(array: &[Value]) -> Result<Vec<AbiParameter>> {
        let mut parameters = Vec::new();

        for param in array {
            let name = param
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();

            let param_type = param
                .get("type")
                .and_then(|v| v.as_str())
                .ok_or_else(|| Error::parse("Parameter must have a type"))?;

            let components = if param_type.starts_with("tuple") {
                param
                    .get("components")
                    .and_then(|v| v.as_array())
                    .map(|arr| Self::parse_parameters(arr))
                    .transpose()?
                    .unwrap_or_default()
            } else {
                Vec::new()
            };

            parameters.push(AbiParameter {
                name,
                ty: EvmType::parse(param_type, &components),
            });
        }

        Ok(parameters)
    }
}

impl Default for AbiParser {
    fn default() -> Self {
        Self::new()
    }
}
