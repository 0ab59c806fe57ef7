use apigen_design::ApiVersionDefinition;
use eyre::Result;

use super::Emitter;
use crate::{
    data::ResourceData,
    go_file::{GoFile, RenderHelpers},
    templates::HrefTemplate,
};

/// `hrefs.go`: href builders of the resources with a canonical action.
pub struct HrefsGo<'a> {
    version: &'a ApiVersionDefinition,
}

impl<'a> HrefsGo<'a> {
    pub fn new(version: &'a ApiVersionDefinition) -> Self {
        Self { version }
    }
}

impl Emitter for HrefsGo<'_> {
    fn file_name(&self) -> &'static str {
        "hrefs.go"
    }

    fn emit(&self, file: &mut GoFile, helpers: &RenderHelpers<'_>) -> Result<()> {
        let api = helpers.api;
        for resource in api.resources_for(self.version) {
            let data = ResourceData::new(api, resource, self.version);
            file.execute(&HrefTemplate, &data, helpers)?;
        }
        Ok(())
    }
}
