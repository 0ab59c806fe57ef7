use apigen_design::ApiVersionDefinition;
use eyre::Result;

use super::Emitter;
use crate::{
    data::ControllerData,
    go_file::{GoFile, RenderHelpers},
    templates::{ControllerTemplate, MountTemplate, UnmarshalTemplate},
};

/// `controllers.go`: controller interfaces, mount functions and payload
/// decoders of every resource.
pub struct ControllersGo<'a> {
    version: &'a ApiVersionDefinition,
}

impl<'a> ControllersGo<'a> {
    pub fn new(version: &'a ApiVersionDefinition) -> Self {
        Self { version }
    }
}

impl Emitter for ControllersGo<'_> {
    fn file_name(&self) -> &'static str {
        "controllers.go"
    }

    fn emit(&self, file: &mut GoFile, helpers: &RenderHelpers<'_>) -> Result<()> {
        let api = helpers.api;
        for resource in api.resources_for(self.version) {
            let data = ControllerData::new(api, resource, self.version);
            file.execute(&ControllerTemplate, &data, helpers)?;
            file.execute(&MountTemplate, &data, helpers)?;
            if data.has_payloads() {
                file.execute(&UnmarshalTemplate, &data, helpers)?;
            }
        }
        Ok(())
    }
}
