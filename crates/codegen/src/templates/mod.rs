//! Template system for hook code generation
//!
//! Contains the Handlebars templates for hooks and the wrapper class.

use handlebars::Handlebars;
use hooks_core::{Error, Result};
use serde::Serialize;

const TEMPLATES: &[(&str, &str)] = &[
    ("read_hook", include_str!("read_hook.hbs")),
    ("write_hook", include_str!("write_hook.hbs")),
    ("contract", include_str!("contract.hbs")),
];

/// Template manager for hook code generation
pub struct TemplateManager {
    handlebars: Handlebars<'static>,
}

impl TemplateManager {
    /// Create a new template manager and register all templates
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        // generated TypeScript must come out verbatim
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);

        Self::register_templates(&mut handlebars)?;

        Ok(Self { handlebars })
    }

    /// Register all built-in templates
    fn register_templates(handlebars: &mut Handlebars) -> Result<()> {
        for (name, source) in TEMPLATES {
            handlebars
                .register_template_string(name, source)
                .map_err(|e| Error::template(format!("Failed to register {} template: {}", name, e)))?;
        }
        Ok(())
    }

    /// Render a template with the given data
    pub fn render<T: Serialize>(&self, template_name: &str, data: &T) -> Result<String> {
        self.handlebars
            .render(template_name, data)
            .map_err(|e| Error::template(format!("Failed to render template {}: {}", template_name, e)))
    }

    /// Get list of available templates
    pub fn available_templates(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlebars.get_templates().keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_templates_registered() {
        let manager = TemplateManager::new().unwrap();
        assert_eq!(manager.available_templates(), vec!["contract", "read_hook", "write_hook"]);
    }

    #[test]
    fn test_render_does_not_escape() {
        let manager = TemplateManager::new().unwrap();
        let rendered = manager
            .render("contract", &json!({"class_name": "TokenQueries", "body": "\n  x = \"<a & b>\";\n"}))
            .unwrap();

        assert!(rendered.starts_with("export default class TokenQueries {"));
        assert!(rendered.contains("x = \"<a & b>\";"));
        assert!(rendered.ends_with("}\n"));
    }

    #[test]
    fn test_strict_mode_rejects_missing_fields() {
        let manager = TemplateManager::new().unwrap();
        assert!(manager.render("contract", &json!({"class_name": "X"})).is_err());
    }
}
