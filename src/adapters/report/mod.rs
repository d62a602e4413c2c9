//! Report Adapters - Presentation of Analysis Records
//!
//! Text rendering for the terminal and CSV export of session history.

pub mod export;
pub mod render;

pub use export::{export_csv, write_csv_file};
pub use render::{render_history, render_record};
