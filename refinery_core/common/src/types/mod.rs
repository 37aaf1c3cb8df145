pub mod schema;

pub use schema::{Row, RowSchema, ValueMeta, ValueType};
