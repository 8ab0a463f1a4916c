use iced::widget::canvas::Canvas;
use iced::widget::{button, column, container, row, scrollable, text};
use iced::{Alignment, Background, Element, Fill, FillPortion, Length};
use lucide_icons::iced::icon_file_plus;

use crate::charts::legend;
use crate::data::series::SeriesCollection;
use crate::importing::IngestState;
use crate::message::Message;
use crate::reports::daily_transactions::DailyTransactionsReport;
use crate::settings::ChartSettings;
use crate::theme::{drop_zone_style, DRAWER_TEXT_INACTIVE, PANEL_BG};

pub const TITLE: &str = "Yet Another Revenue Visualizer for Udemy Teachers";

pub fn view<'a>(
    collection: &SeriesCollection,
    ingest: &IngestState,
    chart_settings: &ChartSettings,
) -> Element<'a, Message> {
    let drop_zone = button(
        row![
            icon_file_plus().size(18),
            text("Drag 'n' drop some csv files here, or click to select them.").size(14)
        ]
        .spacing(10)
        .align_y(Alignment::Center),
    )
    .on_press(Message::OpenFilePicker)
    .width(Fill)
    .padding(20)
    .style(drop_zone_style);

    let status = text(ingest.status_text())
        .size(13)
        .style(|_| text::Style {
            color: Some(DRAWER_TEXT_INACTIVE),
        });

    let chart = DailyTransactionsReport::chart(collection, chart_settings);
    let mut chart_section = column![
        text(DailyTransactionsReport::title()).size(18),
        text(DailyTransactionsReport::subtitle()).size(14),
        Canvas::new(chart).width(Fill).height(chart_settings.height),
    ]
    .spacing(8);

    if collection.is_empty() {
        chart_section = chart_section.push(text("No data available yet.").size(14));
    } else if collection.visible().next().is_none() {
        chart_section =
            chart_section.push(text("All series are hidden. Click a legend entry to show it.").size(14));
    }

    let legend_section = column![
        text(format!("Files ({})", collection.len())).size(16),
        scrollable(legend(&collection.legend())).height(Length::Fixed(chart_settings.height)),
    ]
    .spacing(8);

    let body = row![
        container(chart_section)
            .padding(16)
            .width(FillPortion(3))
            .style(|theme| container::bordered_box(theme)),
        container(legend_section)
            .padding(16)
            .width(FillPortion(1))
            .style(|theme| container::bordered_box(theme)),
    ]
    .spacing(16);

    let content = column![text(TITLE).size(24), drop_zone, status, body]
        .spacing(16)
        .max_width(1400);

    container(content)
        .padding(24)
        .center_x(Fill)
        .height(Fill)
        .style(|_| container::background(Background::Color(PANEL_BG)))
        .into()
}
