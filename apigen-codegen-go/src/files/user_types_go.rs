use eyre::Result;

use super::Emitter;
use crate::{
    go_file::{GoFile, RenderHelpers},
    templates::UserTypeTemplate,
};

/// `user_types.go`: the user types of the design.
pub struct UserTypesGo;

impl Emitter for UserTypesGo {
    fn file_name(&self) -> &'static str {
        "user_types.go"
    }

    fn emit(&self, file: &mut GoFile, helpers: &RenderHelpers<'_>) -> Result<()> {
        for user_type in helpers.api.types.values() {
            file.execute(&UserTypeTemplate, user_type, helpers)?;
        }
        Ok(())
    }
}
