pub mod color;
pub mod daily_counts;
pub mod series;
