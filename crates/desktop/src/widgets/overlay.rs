use iced::mouse;
use iced::widget::canvas;
use iced::{Color, Element, Length, Point, Rectangle, Renderer, Size, Theme};

use astrasafe_core::overlay;
use astrasafe_core::shared::detection::Detection;

use crate::app::Message;

/// Canvas layer drawing one rectangle + label chip per detection.
///
/// Geometry is recomputed from the canvas bounds on every draw, so boxes
/// track the rendered size of the feed under window resize. Stacked over
/// the media widget at identical bounds.
struct DetectionOverlay<'a> {
    detections: &'a [Detection],
    accent: Color,
}

const LABEL_HEIGHT: f32 = 15.0;
const LABEL_TEXT_SIZE: f32 = 10.0;

impl canvas::Program<Message> for DetectionOverlay<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        for item in overlay::layout(self.detections, (bounds.width, bounds.height)) {
            let top_left = Point::new(item.x, item.y);
            let size = Size::new(item.width, item.height);
            frame.stroke(
                &canvas::Path::rectangle(top_left, size),
                canvas::Stroke::default()
                    .with_color(self.accent)
                    .with_width(2.0),
            );

            // Label chip above the box, clamped so it never leaves the canvas.
            let chip_y = (item.y - LABEL_HEIGHT - 2.0).max(0.0);
            let chip_width = estimate_text_width(&item.label) + 8.0;
            frame.fill_rectangle(
                Point::new(item.x - 2.0, chip_y),
                Size::new(chip_width, LABEL_HEIGHT),
                self.accent,
            );
            frame.fill_text(canvas::Text {
                content: item.label,
                position: Point::new(item.x + 2.0, chip_y + 2.0),
                color: Color::WHITE,
                size: LABEL_TEXT_SIZE.into(),
                ..canvas::Text::default()
            });
        }

        vec![frame.into_geometry()]
    }
}

/// Canvas text has no measured layout at draw time; estimate instead.
fn estimate_text_width(label: &str) -> f32 {
    label.len() as f32 * LABEL_TEXT_SIZE * 0.6
}

pub fn view<'a>(detections: &'a [Detection], accent: Color) -> Element<'a, Message> {
    canvas::Canvas::new(DetectionOverlay { detections, accent })
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
