use iced::{widget::button, Background, Border, Color, Theme};

pub const ACCENT: Color = Color::from_rgb8(0x06, 0x5f, 0x46);
pub const PANEL_BG: Color = Color::from_rgb8(0x0b, 0x14, 0x12);
pub const DRAWER_ITEM_BG: Color = Color::from_rgb8(0x0f, 0x1f, 0x1a);
pub const DRAWER_TEXT_ACTIVE: Color = Color::from_rgb8(0xe6, 0xf4, 0xf1);
pub const DRAWER_TEXT_INACTIVE: Color = Color::from_rgb8(0xa5, 0xb3, 0xad);

pub fn drop_zone_style(_theme: &Theme, status: button::Status) -> button::Style {
    let mut background = DRAWER_ITEM_BG;
    let mut border_color = DRAWER_TEXT_INACTIVE;

    if matches!(status, button::Status::Hovered) {
        background.a = 0.85;
        border_color = ACCENT;
    }

    if matches!(status, button::Status::Pressed) {
        background.a = 0.7;
        border_color = ACCENT;
    }

    button::Style {
        background: Some(Background::Color(background)),
        text_color: DRAWER_TEXT_ACTIVE,
        border: Border {
            color: border_color,
            width: 1.0,
            radius: 6.0.into(),
        },
        ..Default::default()
    }
}
