pub mod entities;
pub mod repositories;
pub mod utils;
pub mod value_objects;
