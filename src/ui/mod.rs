pub mod output;
pub mod table;
pub mod theme;

pub use output::{dim, error, format_timestamp, header, success, time_since, warn};
pub use table::{ThreadRow, thread_table};
pub use theme::{Theme, theme};
