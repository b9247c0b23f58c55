// Request-shaping logic shared by the services
pub mod label;
pub mod prompt;

pub use label::{parse_star_rating, top_label};
pub use prompt::{build_summary_prompt, join_messages};
