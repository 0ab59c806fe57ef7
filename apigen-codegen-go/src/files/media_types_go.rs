use eyre::Result;
use tracing::debug;

use super::Emitter;
use crate::{
    go_file::{GoFile, RenderHelpers},
    projector::project_views,
    templates::{MediaTypeTemplate, UserTypeTemplate},
};

/// `media_types.go`: every view of every media type, followed by its links
/// type.
pub struct MediaTypesGo;

impl Emitter for MediaTypesGo {
    fn file_name(&self) -> &'static str {
        "media_types.go"
    }

    fn emit(&self, file: &mut GoFile, helpers: &RenderHelpers<'_>) -> Result<()> {
        for media_type in helpers.api.media_types.values() {
            let projections = project_views(helpers.api, media_type)?;
            debug!(
                identifier = %media_type.identifier,
                views = projections.views.len(),
                links = projections.links.is_some(),
                "projected media type"
            );
            for view in &projections.views {
                file.execute(&MediaTypeTemplate, view, helpers)?;
            }
            if let Some(links) = &projections.links {
                file.execute(&UserTypeTemplate, links, helpers)?;
            }
        }
        Ok(())
    }
}
