pub mod model;
pub use self::model::*;

pub mod fixtures;
pub mod solomon;
