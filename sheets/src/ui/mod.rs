//! View models for the sheet editor, rendered as plain text.

pub mod config;
pub mod grid;
pub mod list;
pub mod widget;

pub use config::{ColumnDraft, ConfigView};
pub use grid::GridView;
pub use list::ListView;
pub use widget::{CellWidget, Commit, Edit};
