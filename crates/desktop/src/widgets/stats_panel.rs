use iced::widget::{column, progress_bar, row, text, Space};
use iced::{Color, Element, Theme};

use crate::app::{scaled, Message};
use crate::theme::tertiary_color;

// Mission-to-date figures shown in the sidebar. Reference data, not
// derived from this session's detections.
const TOTAL_OBJECTS: u32 = 247;
const CRITICAL: u32 = 3;
const NORMAL: u32 = 244;

pub fn view<'a>(fs: f32, theme: &Theme) -> Element<'a, Message> {
    let palette = theme.palette();
    let tertiary = tertiary_color(theme);

    column![
        text("Detection Stats").size(scaled(14.0, fs)).font(iced::Font {
            weight: iced::font::Weight::Semibold,
            ..iced::Font::DEFAULT
        }),
        Space::new().height(10),
        stat_bar(
            fs,
            "Total Objects",
            TOTAL_OBJECTS,
            100.0,
            palette.primary,
            tertiary,
        ),
        Space::new().height(8),
        stat_bar(
            fs,
            "Critical",
            CRITICAL,
            CRITICAL as f32 / TOTAL_OBJECTS as f32 * 100.0,
            palette.danger,
            tertiary,
        ),
        Space::new().height(8),
        stat_bar(
            fs,
            "Normal",
            NORMAL,
            NORMAL as f32 / TOTAL_OBJECTS as f32 * 100.0,
            palette.success,
            tertiary,
        ),
    ]
    .into()
}

fn stat_bar<'a>(
    fs: f32,
    label: &'a str,
    value: u32,
    pct: f32,
    color: Color,
    tertiary: Color,
) -> Element<'a, Message> {
    column![
        row![
            text(label)
                .size(scaled(12.0, fs))
                .color(tertiary)
                .width(iced::Length::Fill),
            text(value.to_string()).size(scaled(12.0, fs)),
        ],
        Space::new().height(3),
        progress_bar(0.0..=100.0, pct).style(move |_theme: &Theme| progress_bar::Style {
            background: iced::Background::Color(Color {
                a: 0.15,
                ..tertiary
            }),
            bar: iced::Background::Color(color),
            border: iced::border::Border {
                radius: 4.0.into(),
                ..iced::border::Border::default()
            },
        }),
    ]
    .into()
}
