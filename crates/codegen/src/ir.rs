//! Intermediate representation of a generated hook
//!
//! The function emitter fills a `HookIr`; templates only ever see the flat
//! render context built by `HookIr::context`.

use serde::Serialize;
use serde_json::{json, Value};

use crate::selector::HookKind;

/// Property key of a hook on the generated class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum HookName {
    /// Plain identifier, e.g. `useBalanceOfQuery`
    Identifier(String),
    /// Quoted key for signature hooks, e.g. `"useBalanceOf(address)Query"`
    Quoted(String),
}

impl HookName {
    pub fn render(&self) -> String {
        match self {
            HookName::Identifier(name) => name.clone(),
            HookName::Quoted(name) => format!("\"{}\"", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamIr {
    pub name: String,
    pub ty: String,
}

/// How the contract member is reached: `.transfer` or `["transfer(address,uint256)"]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallIr {
    pub accessor: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookIr {
    pub kind: HookKind,
    pub name: HookName,
    pub params: Vec<ParamIr>,
    pub overrides_type: String,
    /// Result type of read hooks
    pub output_type: String,
    /// Query key elements, already rendered as TypeScript expressions
    pub cache_key: Vec<String>,
    pub call: CallIr,
    /// Documentation comment, empty or ending with a newline
    pub doc: String,
    pub factory: String,
}

impl HookIr {
    /// Flatten into the context the hook templates render
    pub fn context(&self) -> Value {
        let params: String = self
            .params
            .iter()
            .map(|p| format!("{}: {}, ", p.name, p.ty))
            .collect();
        let fields: String = self
            .params
            .iter()
            .map(|p| format!("{}: {}; ", p.name, p.ty))
            .collect();
        let names: String = self.params.iter().map(|p| format!("{}, ", p.name)).collect();
        let args: String = self.call.args.iter().map(|a| format!("{}, ", a)).collect();

        json!({
            "doc": self.doc,
            "hook_name": self.name.render(),
            "params": params,
            "fields": fields,
            "names": names,
            "overrides_type": self.overrides_type,
            "output_type": self.output_type,
            "cache_key": self.cache_key.join(", "),
            "factory": self.factory,
            "accessor": self.call.accessor,
            "args": args,
        })
    }
}
