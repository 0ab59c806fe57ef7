use apigen_design::ApiVersionDefinition;
use eyre::Result;

use super::Emitter;
use crate::{
    data::ContextData,
    go_file::{GoFile, RenderHelpers},
    templates::{ContextTemplate, NewContextTemplate, PayloadTemplate, ResponsesTemplate},
};

/// `contexts.go`: one context, factory and response set per action.
pub struct ContextsGo<'a> {
    version: &'a ApiVersionDefinition,
}

impl<'a> ContextsGo<'a> {
    pub fn new(version: &'a ApiVersionDefinition) -> Self {
        Self { version }
    }
}

impl Emitter for ContextsGo<'_> {
    fn file_name(&self) -> &'static str {
        "contexts.go"
    }

    fn emit(&self, file: &mut GoFile, helpers: &RenderHelpers<'_>) -> Result<()> {
        let api = helpers.api;
        for resource in api.resources_for(self.version) {
            for action in resource.actions.values() {
                let data = ContextData::new(api, resource, action, self.version);
                file.execute(&ContextTemplate, &data, helpers)?;
                file.execute(&NewContextTemplate, &data, helpers)?;
                if data.payload.is_some() {
                    file.execute(&PayloadTemplate, &data, helpers)?;
                }
                if !data.responses.is_empty() {
                    file.execute(&ResponsesTemplate, &data, helpers)?;
                }
            }
        }
        Ok(())
    }
}
