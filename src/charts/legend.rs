use iced::widget::{button, column, container, row, text, Space};
use iced::{Alignment, Background, Color, Element, Length};
use lucide_icons::iced::{icon_eye, icon_eye_off};

use crate::data::series::LegendEntry;
use crate::message::Message;
use crate::theme::{DRAWER_ITEM_BG, DRAWER_TEXT_ACTIVE, DRAWER_TEXT_INACTIVE};

const HIDDEN_ALPHA: f32 = 0.35;

/// Vertical legend; clicking an entry toggles its series.
pub fn legend<'a>(entries: &[LegendEntry]) -> Element<'a, Message> {
    let items = entries.iter().map(legend_item);

    column(items).spacing(4).into()
}

fn legend_item<'a>(entry: &LegendEntry) -> Element<'a, Message> {
    let mut swatch_color: Color = entry.color.into();
    let label_color = if entry.hidden {
        swatch_color.a = HIDDEN_ALPHA;
        DRAWER_TEXT_INACTIVE
    } else {
        DRAWER_TEXT_ACTIVE
    };

    let swatch = container(Space::new().width(Length::Fixed(12.0)).height(Length::Fixed(12.0)))
        .style(move |_| container::background(swatch_color));

    let visibility = if entry.hidden { icon_eye_off() } else { icon_eye() }
        .size(14)
        .style(move |_| text::Style {
            color: Some(label_color),
        });

    let label = text(entry.name.clone())
        .size(13)
        .style(move |_| text::Style {
            color: Some(label_color),
        });

    button(
        row![swatch, label, Space::new().width(Length::Fill), visibility]
            .spacing(8)
            .align_y(Alignment::Center),
    )
    .on_press(Message::ToggleSeries(entry.name.clone()))
    .width(Length::Fill)
    .padding(6)
    .style(|_, status| {
        let mut background = DRAWER_ITEM_BG;
        if matches!(status, button::Status::Hovered) {
            background.a = 0.85;
        }
        if matches!(status, button::Status::Pressed) {
            background.a = 0.7;
        }

        button::Style {
            background: Some(Background::Color(background)),
            ..Default::default()
        }
    })
    .into()
}
