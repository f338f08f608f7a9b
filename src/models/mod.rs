pub mod calendar;
pub mod date_utils;
pub mod epi_week;
pub mod week_table;


pub use calendar::*;
pub use date_utils::*;
pub use epi_week::*;
pub use week_table::*;
