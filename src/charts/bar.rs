use iced::mouse;
use iced::widget::canvas::{self, Cache, Frame, Geometry, Path, Stroke, Text};
use iced::{Point, Rectangle, Renderer, Size, Theme};

use super::model::{BarSeries, ChartConfig, Domain, PlacedBar};
use crate::data::series::{BarLayout, DAY_SLOT_UNITS};

/// Bars grouped per x position, one bar per series.
pub struct GroupedBarChart {
    cache: Cache,
    series: Vec<BarSeries>,
    layout: BarLayout,
    domain: Domain,
    config: ChartConfig,
}

impl GroupedBarChart {
    pub fn new(series: Vec<BarSeries>, layout: BarLayout, domain: Domain) -> Self {
        Self {
            cache: Cache::new(),
            series,
            layout,
            domain,
            config: ChartConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ChartConfig) -> Self {
        self.config = config;
        self
    }

    /// Places every bar inside `plot`. Group members are centred on their x
    /// value and spaced by `layout.offset`.
    pub fn place_bars(&self, plot: Rectangle) -> Vec<PlacedBar> {
        let (x_min, x_max) = self.domain.x;
        let (y_min, y_max) = self.domain.y;
        let x_span = (x_max - x_min).max(1.0);
        let y_span = (y_max - y_min).max(1.0);

        let unit = plot.width / x_span / DAY_SLOT_UNITS;
        let bar_width = (self.layout.width * unit).max(1.0);
        let center_index = (self.series.len() as f32 - 1.0) / 2.0;

        let mut bars = Vec::new();
        for (series_index, series) in self.series.iter().enumerate() {
            let shift = (series_index as f32 - center_index) * self.layout.offset * unit;

            for (point_index, point) in series.values.iter().enumerate() {
                let center = plot.x + (point.x - x_min) / x_span * plot.width + shift;
                let height = ((point.value - y_min) / y_span).clamp(0.0, 1.0) * plot.height;
                bars.push(PlacedBar {
                    series: series_index,
                    point: point_index,
                    left: center - bar_width / 2.0,
                    top: plot.y + plot.height - height,
                    width: bar_width,
                    height,
                });
            }
        }

        bars
    }

    fn plot_area(&self, size: Size) -> Option<Rectangle> {
        let padding = self.config.padding;
        if size.width <= padding * 2.0 || size.height <= padding * 2.0 {
            return None;
        }

        Some(Rectangle::new(
            Point::new(padding, padding),
            Size::new(size.width - padding * 2.0, size.height - padding * 2.0),
        ))
    }
}

impl canvas::Program<crate::message::Message> for GroupedBarChart {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &canvas::Event,
        _bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Option<canvas::Action<crate::message::Message>> {
        match event {
            canvas::Event::Mouse(mouse::Event::CursorMoved { .. })
            | canvas::Event::Mouse(mouse::Event::CursorEntered)
            | canvas::Event::Mouse(mouse::Event::CursorLeft) => {
                Some(canvas::Action::request_redraw())
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut geometries = Vec::new();
        let Some(plot) = self.plot_area(bounds.size()) else {
            return geometries;
        };
        let bars = self.place_bars(plot);

        let geometry = self.cache.draw(renderer, bounds.size(), |frame| {
            let palette = theme.extended_palette();
            let left = plot.x;
            let top = plot.y;
            let right = plot.x + plot.width;
            let bottom = plot.y + plot.height;
            let axis_stroke = || {
                Stroke::default()
                    .with_width(1.0)
                    .with_color(palette.background.weak.color)
            };

            frame.stroke(
                &Path::line(Point::new(left, bottom), Point::new(right, bottom)),
                axis_stroke(),
            );
            frame.stroke(
                &Path::line(Point::new(left, bottom), Point::new(left, top)),
                axis_stroke(),
            );

            let (y_min, y_max) = self.domain.y;
            let grid_lines = self.config.grid_lines.max(1);
            for i in 1..=grid_lines {
                let t = i as f32 / grid_lines as f32;
                let y = bottom - t * (bottom - top);
                frame.stroke(
                    &Path::line(Point::new(left, y), Point::new(right, y)),
                    axis_stroke(),
                );

                let value = y_min + t * (y_max - y_min);
                frame.fill_text(Text {
                    content: format!("{value:.0}"),
                    position: Point::new(left - 8.0, y - 6.0),
                    color: palette.background.base.text,
                    size: 11.0.into(),
                    align_x: iced::alignment::Horizontal::Right.into(),
                    ..Text::default()
                });
            }

            let (x_min, x_max) = self.domain.x;
            let x_span = (x_max - x_min).max(1.0);
            let mut day = x_min.ceil();
            while day <= x_max {
                if day as u32 % 5 == 0 || day == x_min {
                    let x = left + (day - x_min) / x_span * (right - left);
                    frame.fill_text(Text {
                        content: format!("{day:.0}"),
                        position: Point::new(x, bottom + 6.0),
                        color: palette.background.base.text,
                        size: 11.0.into(),
                        align_x: iced::alignment::Horizontal::Center.into(),
                        ..Text::default()
                    });
                }
                day += 1.0;
            }

            for bar in &bars {
                if bar.height <= 0.0 {
                    continue;
                }
                let rect = Path::rectangle(
                    Point::new(bar.left, bar.top),
                    Size::new(bar.width, bar.height),
                );
                frame.fill(&rect, self.series[bar.series].color);
            }
        });

        geometries.push(geometry);

        if let Some(cursor_pos) = cursor.position_in(bounds) {
            let hovered = bars
                .iter()
                .find(|bar| bar.contains(cursor_pos.x, cursor_pos.y));

            if let Some(bar) = hovered {
                let palette = theme.extended_palette();
                let series = &self.series[bar.series];
                let point = &series.values[bar.point];
                let mut overlay = Frame::new(renderer, bounds.size());

                overlay.stroke(
                    &Path::rectangle(
                        Point::new(bar.left, bar.top),
                        Size::new(bar.width, bar.height.max(1.0)),
                    ),
                    Stroke::default()
                        .with_width(1.0)
                        .with_color(palette.primary.strong.color),
                );
                overlay.fill_text(Text {
                    content: format!("{} · day {}: {}", series.name, point.x, point.label),
                    position: Point::new(cursor_pos.x + 8.0, cursor_pos.y - 8.0),
                    color: palette.background.base.text,
                    size: 12.0.into(),
                    ..Text::default()
                });

                geometries.push(overlay.into_geometry());
            }
        }

        geometries
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if cursor.position_in(bounds).is_some() {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }
}
