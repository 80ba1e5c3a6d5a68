// Print layout: font metrics, line wrapping and A4 pagination.
// Pagination is CPU-bound and runs inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod paginate;

pub use font_metrics::a4_page_config;
pub use paginate::{fill_summary, paginate_resume, Page};
