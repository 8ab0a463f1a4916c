use iced::Color;

#[derive(Debug, Clone)]
pub struct BarPoint {
    pub x: f32,
    pub value: f32,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct BarSeries {
    pub name: String,
    pub color: Color,
    pub values: Vec<BarPoint>,
}

#[derive(Debug, Clone, Copy)]
pub struct ChartConfig {
    pub padding: f32,
    pub grid_lines: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            padding: 40.0,
            grid_lines: 4,
        }
    }
}

/// Axis ranges in data units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub x: (f32, f32),
    pub y: (f32, f32),
}

/// A bar placed in plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedBar {
    pub series: usize,
    pub point: usize,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl PlacedBar {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left
            && x <= self.left + self.width
            && y >= self.top
            && y <= self.top + self.height
    }
}
