// Library exports for floatbar

pub mod commands;
pub mod document;
pub mod selection;
pub mod session;
pub mod toolbar;
