use iced::widget::{button, column, container, row, scrollable, stack, text, Space};
use iced::{ContentFit, Element, Length, Theme};

use astrasafe_core::shared::constants::IMAGE_EXTENSIONS;

use crate::app::{scaled, Message, UploadState};
use crate::theme::{border_color, overlay_accent, surface_color, tertiary_color};
use crate::widgets::{detection_list, overlay};

pub fn view<'a>(fs: f32, upload: &'a UploadState, theme: &Theme) -> Element<'a, Message> {
    if upload.preview.is_none() {
        return drop_zone(fs, theme);
    }

    result_view(fs, upload, theme)
}

fn drop_zone<'a>(fs: f32, theme: &Theme) -> Element<'a, Message> {
    let tertiary = tertiary_color(theme);
    let border = border_color(theme);
    let surface = surface_color(theme);

    let formats = IMAGE_EXTENSIONS
        .iter()
        .map(|e| e.to_uppercase())
        .collect::<Vec<_>>()
        .join(", ");

    let inner = column![
        text("\u{1F6F0}").size(scaled(30.0, fs)),
        Space::new().height(12),
        text("Drop an image here to scan it")
            .size(scaled(16.0, fs))
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..iced::Font::DEFAULT
            }),
        Space::new().height(6),
        text("or click to browse your computer")
            .size(scaled(13.0, fs))
            .color(tertiary),
        Space::new().height(16),
        button(text("Browse Files").size(scaled(14.0, fs)))
            .on_press(Message::SelectImage)
            .padding([10, 24]),
        Space::new().height(14),
        text(formats).size(scaled(11.0, fs)).color(tertiary),
    ]
    .align_x(iced::Alignment::Center);

    container(
        container(inner)
            .padding([48, 40])
            .width(Length::Fill)
            .center_x(Length::Fill)
            .style(move |_theme: &Theme| container::Style {
                background: Some(iced::Background::Color(surface)),
                border: iced::border::Border {
                    color: border,
                    width: 2.0,
                    radius: 16.0.into(),
                },
                ..container::Style::default()
            }),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .center_y(Length::Fill)
    .into()
}

fn result_view<'a>(fs: f32, upload: &'a UploadState, theme: &Theme) -> Element<'a, Message> {
    let border = border_color(theme);

    let preview: Element<'a, Message> = if let Some(handle) = &upload.preview {
        stack![
            iced::widget::image(handle.clone())
                .content_fit(ContentFit::Fill)
                .width(Length::Fill)
                .height(Length::Fill),
            overlay::view(
                upload.detections.as_deref().unwrap_or(&[]),
                overlay_accent()
            ),
        ]
        .into()
    } else {
        Space::new().into()
    };

    let preview = container(preview)
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

    let mut controls = row![button(text("Scan Another Image").size(scaled(14.0, fs)))
        .on_press(Message::SelectImage)
        .padding([10, 22])
        .style(button::secondary)]
    .spacing(12)
    .align_y(iced::Alignment::Center);
    if let Some(error) = &upload.error {
        controls = controls.push(
            text(error.clone())
                .size(scaled(12.0, fs))
                .color(theme.palette().danger),
        );
    }

    // None = request still in flight; Some(empty) = explicit empty state.
    let empty_text = if upload.detections.is_none() && upload.error.is_none() {
        "Analyzing\u{2026}"
    } else {
        "No objects detected."
    };

    let results = column![
        text("Detected Objects").size(scaled(14.0, fs)).font(iced::Font {
            weight: iced::font::Weight::Semibold,
            ..iced::Font::DEFAULT
        }),
        Space::new().height(8),
        scrollable(detection_list::view(
            fs,
            upload.detections.as_deref(),
            empty_text,
            theme,
        ))
        .height(Length::Fill),
    ]
    .width(280);

    row![
        column![preview, Space::new().height(12), controls].width(Length::Fill),
        results,
    ]
    .spacing(16)
    .into()
}
