//! Template rendering the resource href builders.

use eyre::Result;

use crate::{
    ast::{Func, Param},
    data::ResourceData,
    go_file::{RenderScope, Template},
};

/// `<Resource>Href` formatting the canonical path of a resource.
pub struct HrefTemplate;

impl Template<ResourceData> for HrefTemplate {
    fn name(&self) -> &'static str {
        "resource"
    }

    fn render(&self, data: &ResourceData, scope: &mut RenderScope<'_>) -> Result<()> {
        let Some(template) = &data.canonical_template else {
            return Ok(());
        };
        let mut href = Func::new(format!("{}Href", data.name))
            .doc(format!("{}Href returns the resource href.", data.name))
            .returns("string");
        let call = if data.canonical_params.is_empty() {
            format!("return fmt.Sprintf({:?})", template)
        } else {
            let params = data.canonical_params.join(", ");
            href = href.param(Param::new(&params, "interface{}"));
            format!("return fmt.Sprintf({:?}, {})", template, params)
        };
        scope.import("fmt");
        scope.code.emit(&href.body_line(call));
        Ok(())
    }
}
