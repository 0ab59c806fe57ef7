//! Semantic checks run after a design is parsed.

use std::collections::HashSet;

use crate::{ApiDefinition, AttributeDefinition, DataType, Result, error::SourceContext};

/// Validates references between the definitions of a design.
pub struct DesignValidator {
    ctx: SourceContext,
}

impl DesignValidator {
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            ctx: SourceContext::new(src, filename),
        }
    }

    pub fn validate(&self, api: &ApiDefinition) -> Result<()> {
        self.check_type_names(api)?;

        for ut in api.types.values() {
            self.check_attribute(api, &ut.attribute, &format!("type '{}'", ut.type_name))?;
        }
        for mt in api.media_types.values() {
            let context = format!("media type '{}'", mt.identifier);
            self.check_attribute(api, &mt.attribute, &context)?;
            if let Some(elem) = mt.collection_of()
                && api.media_type_by_name(elem).is_none_or(|e| e.collection_of().is_some())
            {
                return Err(self.ctx.validation_error(format!(
                    "{} must be a collection of a non-collection media type",
                    context
                )));
            }
            for view in mt.views.keys() {
                mt.project(api, view)
                    .map_err(|e| self.ctx.projection(&mt.identifier, e))?;
            }
        }

        for resource in api.resources.values() {
            self.check_resource(api, &resource.name)?;
        }
        Ok(())
    }

    fn check_type_names(&self, api: &ApiDefinition) -> Result<()> {
        let mut seen = HashSet::new();
        let names = api
            .types
            .values()
            .map(|ut| ut.type_name.as_str())
            .chain(api.media_types.values().map(|mt| mt.type_name.as_str()));
        for name in names {
            if !seen.insert(name) {
                return Err(self.ctx.duplicate_type(name));
            }
        }
        Ok(())
    }

    fn check_resource(&self, api: &ApiDefinition, name: &str) -> Result<()> {
        let Some(resource) = api.resource(name) else {
            return Ok(());
        };
        let context = format!("resource '{}'", resource.name);

        let mut visited = HashSet::from([resource.name.as_str()]);
        let mut parent = resource.parent.as_deref();
        while let Some(parent_name) = parent {
            let parent_resource = api
                .resource(parent_name)
                .ok_or_else(|| self.ctx.unknown_reference(&context, "resource", parent_name))?;
            if !visited.insert(parent_name) {
                return Err(self.ctx.parent_cycle(&resource.name));
            }
            if parent_resource.canonical().is_none() {
                return Err(self.ctx.validation_error(format!(
                    "parent resource '{}' of '{}' has no canonical action",
                    parent_name, resource.name
                )));
            }
            parent = parent_resource.parent.as_deref();
        }

        if let Some(canonical) = &resource.canonical_action
            && !resource.actions.contains_key(canonical)
        {
            return Err(self.ctx.unknown_reference(&context, "action", canonical));
        }
        if let Some(identifier) = &resource.media_type
            && api.media_type_with_identifier(identifier).is_none()
        {
            return Err(self.ctx.unknown_reference(&context, "media type", identifier));
        }
        if let Some(version) = &resource.version
            && api.version(version).is_none()
        {
            return Err(self.ctx.unknown_reference(&context, "version", version));
        }

        for action in resource.actions.values() {
            let context = format!("action '{}' of resource '{}'", action.name, resource.name);
            if let Some(params) = &action.params {
                self.check_object(params, &context, "params")?;
                self.check_attribute(api, params, &context)?;
            }
            if let Some(headers) = &action.headers {
                self.check_object(headers, &context, "headers")?;
            }
            if let Some(payload) = &action.payload {
                self.check_attribute(api, payload, &context)?;
            }
            for route in &action.routes {
                if route.verb.trim().is_empty() {
                    return Err(self
                        .ctx
                        .validation_error(format!("{} declares a route without verb", context)));
                }
            }
            for response in action.responses.values() {
                if let Some(identifier) = &response.media_type
                    && api.media_type_with_identifier(identifier).is_none()
                {
                    return Err(self.ctx.unknown_reference(&context, "media type", identifier));
                }
            }
        }
        Ok(())
    }

    fn check_object(&self, att: &AttributeDefinition, context: &str, what: &str) -> Result<()> {
        if att.data_type.is_object() {
            Ok(())
        } else {
            Err(self
                .ctx
                .validation_error(format!("{} {} must be an object", context, what)))
        }
    }

    fn check_attribute(&self, api: &ApiDefinition, att: &AttributeDefinition, context: &str) -> Result<()> {
        match &att.data_type {
            DataType::Named(name) => {
                if api.named_type(name).is_none() {
                    return Err(self.ctx.unknown_reference(context, "type", name));
                }
            }
            DataType::Array(elem) => self.check_attribute(api, elem, context)?,
            DataType::Object(fields) => {
                for field in fields.values() {
                    self.check_attribute(api, field, context)?;
                }
            }
            _ => {}
        }
        Ok(())
    }
}
