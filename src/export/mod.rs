//! Aggregation and projection of a run into a holder table

pub mod csv;
pub mod render;
pub mod table;

pub use self::csv::{to_csv, write_csv};
pub use render::render_table;
pub use table::{ResultRow, ResultTable, TableStatus};
