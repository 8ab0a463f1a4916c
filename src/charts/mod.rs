pub mod bar;
pub mod legend;
pub mod model;

pub use bar::GroupedBarChart;
pub use legend::legend;
pub use model::{BarPoint, BarSeries, ChartConfig, Domain};
