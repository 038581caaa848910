pub(crate) mod date;

pub(crate) use date::{display_date, parse_date};
