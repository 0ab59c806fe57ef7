//! Expansion of media types into their rendered projections.

use apigen_design::{ApiDefinition, MediaTypeDefinition, UserTypeDefinition};
use eyre::{Result, WrapErr};

/// The projections of a media type and the links type they share.
#[derive(Debug, Clone)]
pub struct Projections {
    /// One projected media type per rendered view, in view order.
    pub views: Vec<MediaTypeDefinition>,
    /// The links type, present when a view renders links.
    pub links: Option<UserTypeDefinition>,
}

/// Project a media type onto every view except `link`.
///
/// The first links type produced is kept; later views of the same media type
/// produce the same type and are not reported twice. A view that cannot be
/// projected fails the whole media type.
pub fn project_views(api: &ApiDefinition, media_type: &MediaTypeDefinition) -> Result<Projections> {
    let mut views = Vec::new();
    let mut links = None;
    for view in media_type.rendered_views(api) {
        let (projected, view_links) = media_type
            .project(api, &view)
            .wrap_err_with(|| format!("failed to project media type {} on view '{}'", media_type.identifier, view))?;
        if links.is_none() {
            links = view_links;
        }
        views.push(projected);
    }
    Ok(Projections { views, links })
}
