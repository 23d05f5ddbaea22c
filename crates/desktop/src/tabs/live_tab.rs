use iced::widget::{button, column, container, row, scrollable, stack, text, Space};
use iced::{ContentFit, Element, Length, Theme};

use crate::app::{scaled, LiveState, Message};
use crate::theme::{border_color, overlay_accent, tertiary_color};
use crate::widgets::{detection_list, overlay};

pub fn view<'a>(fs: f32, live: &'a LiveState, theme: &Theme) -> Element<'a, Message> {
    let tertiary = tertiary_color(theme);
    let border = border_color(theme);

    // Feed surface: latest frame under the bounding-box layer. Overlays
    // are laid out against this container's rendered bounds each draw.
    let surface: Element<'a, Message> = if let Some(handle) = &live.frame {
        stack![
            iced::widget::image(handle.clone())
                .content_fit(ContentFit::Fill)
                .width(Length::Fill)
                .height(Length::Fill),
            overlay::view(
                live.detections.as_deref().unwrap_or(&[]),
                overlay_accent()
            ),
        ]
        .into()
    } else {
        let caption = if live.is_active() {
            "Waiting for the first frame\u{2026}"
        } else {
            "Camera feed offline"
        };
        container(text(caption).size(scaled(14.0, fs)).color(tertiary))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    };

    let feed = container(surface)
        .width(Length::Fill)
        .height(400)
        .style(move |_theme: &Theme| container::Style {
            background: Some(iced::Background::Color(iced::Color {
                a: 0.85,
                ..iced::Color::BLACK
            })),
            border: iced::border::Border {
                color: border,
                width: 1.0,
                radius: 12.0.into(),
            },
            ..container::Style::default()
        });

    let toggle = if live.is_active() {
        button(text("Stop Live Feed").size(scaled(14.0, fs)))
            .on_press(Message::ToggleLiveFeed)
            .padding([10, 22])
            .style(button::danger)
    } else {
        button(text("Start Live Feed").size(scaled(14.0, fs)))
            .on_press(Message::ToggleLiveFeed)
            .padding([10, 22])
            .style(button::primary)
    };

    let mut controls = row![toggle].spacing(12).align_y(iced::Alignment::Center);
    if let Some(error) = &live.error {
        controls = controls.push(
            text(error.clone())
                .size(scaled(12.0, fs))
                .color(theme.palette().danger),
        );
    }

    let results = column![
        text("Recent Detections")
            .size(scaled(14.0, fs))
            .font(iced::Font {
                weight: iced::font::Weight::Semibold,
                ..iced::Font::DEFAULT
            }),
        Space::new().height(8),
        scrollable(detection_list::view(
            fs,
            live.detections.as_deref(),
            "No recent detections",
            theme,
        ))
        .height(Length::Fill),
    ]
    .width(280);

    row![
        column![feed, Space::new().height(12), controls].width(Length::Fill),
        results,
    ]
    .spacing(16)
    .into()
}
