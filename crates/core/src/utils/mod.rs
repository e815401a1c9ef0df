pub mod format;
pub mod time_utils;
