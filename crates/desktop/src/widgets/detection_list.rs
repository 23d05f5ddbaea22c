use iced::widget::{column, container, progress_bar, row, text, Space};
use iced::{Element, Length, Theme};

use astrasafe_core::overlay::format_confidence;
use astrasafe_core::shared::detection::Detection;

use crate::app::{scaled, Message};
use crate::theme::{border_color, surface_color, tertiary_color};

/// Results panel: one card per detection with class name, confidence
/// percentage, and a proportion bar. `None` and an empty list both render
/// the explicit empty placeholder.
pub fn view<'a>(
    fs: f32,
    detections: Option<&'a [Detection]>,
    empty_text: &'a str,
    theme: &Theme,
) -> Element<'a, Message> {
    let tertiary = tertiary_color(theme);

    match detections {
        Some(items) if !items.is_empty() => column(
            items
                .iter()
                .map(|det| card(fs, det, theme))
                .collect::<Vec<_>>(),
        )
        .spacing(8)
        .into(),
        _ => container(text(empty_text).size(scaled(13.0, fs)).color(tertiary))
            .width(Length::Fill)
            .center_x(Length::Fill)
            .padding([24, 8])
            .into(),
    }
}

fn card<'a>(fs: f32, detection: &Detection, theme: &Theme) -> Element<'a, Message> {
    let tertiary = tertiary_color(theme);
    let success = theme.palette().success;
    let surface = surface_color(theme);
    let border = border_color(theme);

    let percent = format_confidence(detection.confidence);

    let content = column![
        row![
            text(detection.class.clone())
                .size(scaled(13.0, fs))
                .font(iced::Font {
                    weight: iced::font::Weight::Semibold,
                    ..iced::Font::DEFAULT
                })
                .width(Length::Fill),
            text("Just now").size(scaled(11.0, fs)).color(tertiary),
        ]
        .align_y(iced::Alignment::Center),
        Space::new().height(4),
        row![
            text("Confidence")
                .size(scaled(11.0, fs))
                .color(tertiary)
                .width(Length::Fill),
            text(format!("{percent}%"))
                .size(scaled(11.0, fs))
                .color(success),
        ],
        Space::new().height(4),
        progress_bar(0.0..=100.0, detection.confidence * 100.0).style(progress_bar::success),
    ];

    container(content)
        .padding([10, 12])
        .width(Length::Fill)
        .style(move |_theme: &Theme| container::Style {
            background: Some(iced::Background::Color(surface)),
            border: iced::border::Border {
                color: border,
                width: 1.0,
                radius: 10.0.into(),
            },
            ..container::Style::default()
        })
        .into()
}
