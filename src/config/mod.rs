//! Container configuration: schema, validation, and loading

pub mod loader;
pub mod name;
pub mod schema;
pub mod yaml;

pub use loader::{load, ContainerMap};
pub use name::is_valid_name;
pub use schema::ContainerConfig;
