use iced::widget::{column, text, Space};
use iced::{Element, Theme};

use astrasafe_core::shared::registry::SAFETY_OBJECTS;

use crate::app::{scaled, Message};
use crate::theme::tertiary_color;

pub fn view<'a>(fs: f32, theme: &Theme) -> Element<'a, Message> {
    let tertiary = tertiary_color(theme);

    let classes = SAFETY_OBJECTS
        .iter()
        .map(|o| o.name)
        .collect::<Vec<_>>()
        .join(", ");

    column![
        text("Falcon Detection Model").size(scaled(16.0, fs)),
        Space::new().height(8),
        text(
            "Detection runs on an external inference service operated by the \
             mission systems team. This dashboard posts camera frames and \
             uploaded images to it and renders whatever comes back; no model \
             runs on this machine."
        )
        .size(scaled(13.0, fs)),
        Space::new().height(20),
        text("Trained categories").size(scaled(16.0, fs)),
        Space::new().height(8),
        text(classes).size(scaled(13.0, fs)),
        Space::new().height(20),
        text("Endpoints").size(scaled(16.0, fs)),
        Space::new().height(8),
        text(
            "POST /predict-image \u{2014} multipart field `image`\n\
             POST /predict-frame \u{2014} multipart field `frame` (JPEG)\n\n\
             Both return a JSON array of {class, confidence, box} records \
             with box coordinates normalized to the source image."
        )
        .size(scaled(12.0, fs))
        .color(tertiary),
    ]
    .spacing(0)
    .into()
}
