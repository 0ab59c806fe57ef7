//! Built-in design lints.

mod empty_description;
mod path_params;
mod unmounted_action;

pub use empty_description::EmptyDescriptionLint;
pub use path_params::PathParamsLint;
pub use unmounted_action::UnmountedActionLint;
