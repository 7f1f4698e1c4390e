//! Constant catalog: schema mapping tables and the season table.

pub mod schema;
pub mod season;

pub use schema::{base_table, column_name, full_name, is_stat_column, required_join};
pub use season::{is_valid_season, season_containing, season_dates, season_names, SeasonDates};
