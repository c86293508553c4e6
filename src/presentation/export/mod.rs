mod downloads;
mod quiz_table;

pub use downloads::ExportFormat;
pub use quiz_table::{ExportError, QuizTable, export_json};
