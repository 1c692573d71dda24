pub mod entry;
pub mod field;
pub mod schema;
pub mod template;
pub mod value_bag;
