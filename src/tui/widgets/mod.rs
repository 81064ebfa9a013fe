pub mod rate;
pub mod sparkline;

pub use rate::{format_bytes, format_rate, per_second};
pub use sparkline::sparkline_rows;
