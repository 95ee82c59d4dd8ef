pub mod filters;
pub mod lifecycle;
pub mod manifest;
pub mod registry;
pub mod resolver;
pub mod types;
