//! Output generation for fetched calendar data.
//!
//! # Submodules
//!
//! - [`json`]: writes any result record to a JSON file
//! - [`markdown`]: renders a [`crate::models::CalendarResult`] as Markdown tables
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! ├── calendar_2025-01-05_2025-01-11.json
//! ├── detail_131001.json
//! └── articles.json
//! ```

pub mod json;
pub mod markdown;
