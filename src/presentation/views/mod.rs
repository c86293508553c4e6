mod layout;
mod quiz;

pub use layout::page;
pub use quiz::{FormOptions, error_panel, quiz_table, results, tips, upload_form};
