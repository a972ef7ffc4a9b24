//! Function emitter
//!
//! Builds the hook IR for a single function and renders it.

use hooks_core::{FunctionDeclaration, FunctionDocumentation, FunctionGroup, GenerateOptions, Result};

use crate::ir::{CallIr, HookIr, HookName, ParamIr};
use crate::naming::upper_first;
use crate::resolver::{resolve, HookVariant};
use crate::selector::{select, HookKind};
use crate::templates::TemplateManager;
use crate::ts_types::{input_name, input_type, output_types};

pub struct FunctionEmitter<'a> {
    templates: &'a TemplateManager,
    options: &'a GenerateOptions,
}

impl<'a> FunctionEmitter<'a> {
    pub fn new(templates: &'a TemplateManager, options: &'a GenerateOptions) -> Self {
        Self { templates, options }
    }

    /// Render every hook of a name group, separated by blank lines
    pub fn emit_group(&self, group: &FunctionGroup) -> Result<String> {
        let fragments = resolve(group, self.options)
            .into_iter()
            .map(|hook| self.emit(hook.function, &hook.variant))
            .collect::<Result<Vec<_>>>()?;
        Ok(fragments.join("\n"))
    }

    pub fn emit(&self, function: &FunctionDeclaration, variant: &HookVariant) -> Result<String> {
        let ir = self.build_ir(function, variant);
        self.templates.render(ir.kind.template_name(), &ir.context())
    }

    pub fn build_ir(&self, function: &FunctionDeclaration, variant: &HookVariant) -> HookIr {
        let kind = select(function, self.options);

        let params: Vec<ParamIr> = function
            .inputs
            .iter()
            .enumerate()
            .map(|(i, input)| ParamIr {
                name: input_name(input, i),
                ty: input_type(&input.ty, self.options.use_structs),
            })
            .collect();
        let args: Vec<String> = params.iter().map(|p| p.name.clone()).collect();

        let (name, accessor, key) = match variant {
            HookVariant::Plain => (
                HookName::Identifier(format!("use{}{}", upper_first(&function.name), kind.suffix())),
                format!(".{}", function.name),
                function.name.clone(),
            ),
            HookVariant::Signature(signature) => (
                HookName::Quoted(format!("use{}{}", upper_first(signature), kind.suffix())),
                format!("[\"{}\"]", signature),
                signature.clone(),
            ),
        };

        let mut cache_key = vec![
            format!("\"{}\"", key),
            format!("\"{}\"", self.options.contract_name),
        ];
        cache_key.extend(args.iter().cloned());

        let output_type = match kind {
            HookKind::Read => output_types(&function.outputs, self.options.use_structs),
            HookKind::Write | HookKind::PayableWrite => "ContractReceipt".to_string(),
        };

        HookIr {
            kind,
            name,
            params,
            overrides_type: kind.overrides_type().to_string(),
            output_type,
            cache_key,
            call: CallIr { accessor, args },
            doc: render_documentation(function.documentation.as_ref()),
            factory: format!("{}__factory", self.options.contract_name),
        }
    }
}

/// Render a JSDoc block for a hook, or an empty string without documentation
pub fn render_documentation(doc: Option<&FunctionDocumentation>) -> String {
    let doc = match doc {
        Some(doc) => doc,
        None => return String::new(),
    };

    let mut lines = vec!["/**".to_string()];
    if let Some(details) = &doc.details {
        lines.push(format!(" * {}", details));
    }
    if let Some(notice) = &doc.notice {
        lines.push(format!(" * {}", notice));
    }
    for (name, description) in &doc.params {
        lines.push(format!(" * @param {} {}", name, description));
    }
    if let Some(returns) = &doc.returns {
        lines.push(format!(" * @returns {}", returns));
    }
    lines.push(" */".to_string());

    lines.iter().map(|line| format!("  {}\n", line)).collect()
}
