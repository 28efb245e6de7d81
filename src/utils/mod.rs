pub mod time;

pub use time::format_quote_date;
