use iced::widget::{
    button, center, checkbox, column, container, mouse_area, opaque, pick_list, row, slider, stack,
    text, text_input, Space,
};
use iced::{Color, Element, Length, Theme};

use crate::app::{scaled, Message};
use crate::settings::{Appearance, Settings};
use crate::theme::tertiary_color;

const CAMERA_INDICES: [u32; 4] = [0, 1, 2, 3];

/// Overlay `card` on top of `base` behind a dimmed backdrop.
///
/// Clicking the backdrop closes the dialog; clicks on the card itself are
/// swallowed by the inner `opaque`. While open, the backdrop blocks all
/// interaction with the page underneath. Only one dialog exists at a time.
pub fn overlay<'a>(
    base: Element<'a, Message>,
    card: Element<'a, Message>,
) -> Element<'a, Message> {
    let backdrop = mouse_area(
        center(opaque(card)).style(|_theme: &Theme| container::Style {
            background: Some(iced::Background::Color(Color {
                a: 0.65,
                ..Color::BLACK
            })),
            ..container::Style::default()
        }),
    )
    .on_press(Message::CloseModal);

    stack![base, opaque(backdrop)].into()
}

fn card<'a>(fs: f32, title: &'a str, body: Element<'a, Message>) -> Element<'a, Message> {
    let header = row![
        text(title).size(scaled(16.0, fs)).font(iced::Font {
            weight: iced::font::Weight::Bold,
            ..iced::Font::DEFAULT
        }),
        Space::new().width(Length::Fill),
        button(text("\u{2715}").size(scaled(13.0, fs)))
            .on_press(Message::CloseModal)
            .style(button::text),
    ]
    .align_y(iced::Alignment::Center);

    container(column![header, Space::new().height(12), body])
        .padding(20)
        .width(440)
        .style(container::rounded_box)
        .into()
}

pub fn settings_card<'a>(fs: f32, settings: &Settings, theme: &Theme) -> Element<'a, Message> {
    let tertiary = tertiary_color(theme);
    let interval_s = settings.poll_interval_ms as f32 / 1000.0;

    let body = column![
        text("Backend URL").size(scaled(12.0, fs)).color(tertiary),
        Space::new().height(4),
        text_input("http://127.0.0.1:5000", &settings.backend_url)
            .on_input(Message::BackendUrlChanged)
            .size(scaled(13.0, fs)),
        Space::new().height(14),
        text("Live sampling period")
            .size(scaled(12.0, fs))
            .color(tertiary),
        Space::new().height(4),
        row![
            slider(0.25..=3.0, interval_s, |v: f32| {
                Message::PollIntervalChanged((v * 1000.0).round() as u64)
            })
            .step(0.25),
            text(format!("{interval_s:.2} s")).size(scaled(12.0, fs)),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center),
        Space::new().height(14),
        row![
            text("Camera").size(scaled(12.0, fs)).color(tertiary),
            pick_list(
                CAMERA_INDICES,
                Some(settings.camera_index),
                Message::CameraIndexChanged,
            )
            .text_size(scaled(12.0, fs)),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center),
        Space::new().height(18),
        text("Appearance").size(scaled(12.0, fs)).color(tertiary),
        Space::new().height(4),
        row![
            pick_list(Appearance::ALL, Some(settings.appearance), |a| {
                Message::AppearanceChanged(a)
            })
            .text_size(scaled(12.0, fs)),
            checkbox(settings.high_contrast)
                .label("High contrast")
                .on_toggle(Message::HighContrastChanged)
                .text_size(scaled(12.0, fs)),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center),
        Space::new().height(14),
        row![
            text("Font size").size(scaled(12.0, fs)).color(tertiary),
            slider(0.8..=1.5, settings.font_scale, Message::FontScaleChanged).step(0.05),
            text(format!("{:.0}%", settings.font_scale * 100.0)).size(scaled(12.0, fs)),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center),
    ];

    card(fs, "Settings", body.into())
}

pub fn about_card<'a>(fs: f32, theme: &Theme) -> Element<'a, Message> {
    let tertiary = tertiary_color(theme);
    let version = env!("CARGO_PKG_VERSION");

    let body = column![
        text("AstraSafe AI").size(scaled(18.0, fs)),
        Space::new().height(4),
        text(format!("Version {version}"))
            .size(scaled(12.0, fs))
            .color(tertiary),
        Space::new().height(12),
        text(
            "Space station safety monitor: live camera and uploaded images \
             are checked for the seven critical safety objects by an \
             external Falcon inference service."
        )
        .size(scaled(13.0, fs)),
        Space::new().height(12),
        text("GenIgnite 2025 hackathon demo.")
            .size(scaled(12.0, fs))
            .color(tertiary),
    ];

    card(fs, "About", body.into())
}
