use iced::widget::{column, container, row, text, Space};
use iced::{Element, Length, Theme};

use astrasafe_core::shared::registry::{ObjectStatus, SAFETY_OBJECTS};

use crate::app::{scaled, Message};

/// Static registry list: icon, category name, and a status dot per entry.
pub fn view<'a>(fs: f32, theme: &Theme) -> Element<'a, Message> {
    let palette = theme.palette();

    let rows = SAFETY_OBJECTS.iter().map(|obj| {
        let dot_color = match obj.status {
            ObjectStatus::Normal => palette.success,
            ObjectStatus::Critical => palette.danger,
        };

        let dot = container(Space::new())
            .width(10)
            .height(10)
            .style(move |_theme: &Theme| container::Style {
                background: Some(iced::Background::Color(dot_color)),
                border: iced::border::Border {
                    radius: 5.0.into(),
                    ..iced::border::Border::default()
                },
                ..container::Style::default()
            });

        row![
            text(obj.icon).size(scaled(15.0, fs)),
            text(obj.name).size(scaled(12.0, fs)).width(Length::Fill),
            dot,
        ]
        .spacing(10)
        .align_y(iced::Alignment::Center)
        .padding([4, 2])
        .into()
    });

    column![
        text("Safety Objects")
            .size(scaled(14.0, fs))
            .font(iced::Font {
                weight: iced::font::Weight::Semibold,
                ..iced::Font::DEFAULT
            }),
        Space::new().height(8),
        column(rows.collect::<Vec<_>>()).spacing(2),
    ]
    .into()
}
