pub mod number_utils;
pub mod time_utils;

pub use number_utils::{format_plain, format_whole, percentage_of};
pub use time_utils::{day_window, local_to_utc, month_window, Period, DEFAULT_TZ};
