//! Leaderboard aggregation, ordering and rendering
//!
//! The table joins players with a run's outputs, the view orders and formats
//! rows, and the renderers turn a view into text or HTML.

pub mod labels;
pub mod render;
pub mod table;
pub mod view;

// Re-export commonly used types
pub use labels::{LabelBundle, LabelResolver};
pub use render::{render, render_html, render_text, OutputFormat};
pub use table::{merge_ratings, EloRatingTable};
pub use view::{Cell, CellValue, LeaderboardView, Row, RowKind};
