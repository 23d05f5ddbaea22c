use iced::mouse;
use iced::widget::canvas;
use iced::{Color, Element, Length, Point, Rectangle, Renderer, Theme};

use crate::app::Message;

/// Decorative background: a slowly tumbling space-station wireframe.
/// Purely cosmetic; nothing else reads this state.
#[derive(Debug, Clone, Copy)]
pub struct SceneState {
    yaw: f32,
    pitch: f32,
}

impl SceneState {
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn tick(&mut self) {
        self.yaw += 0.008;
        self.pitch += 0.002;
    }
}

pub fn view<'a>(state: &SceneState) -> Element<'a, Message> {
    canvas::Canvas::new(StationScene {
        yaw: state.yaw,
        pitch: state.pitch,
    })
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

struct StationScene {
    yaw: f32,
    pitch: f32,
}

// Station geometry in model units: a central core with a solar panel
// cantilevered off each side.
const CORE: Cuboid = Cuboid {
    center: [0.0, 0.0, 0.0],
    half: [0.5, 3.0, 0.5],
};
const PANEL_LEFT: Cuboid = Cuboid {
    center: [-3.0, 0.0, 0.0],
    half: [2.5, 1.0, 0.05],
};
const PANEL_RIGHT: Cuboid = Cuboid {
    center: [3.0, 0.0, 0.0],
    half: [2.5, 1.0, 0.05],
};

struct Cuboid {
    center: [f32; 3],
    half: [f32; 3],
}

impl Cuboid {
    fn vertices(&self) -> [[f32; 3]; 8] {
        let [cx, cy, cz] = self.center;
        let [hx, hy, hz] = self.half;
        let mut out = [[0.0; 3]; 8];
        for (i, v) in out.iter_mut().enumerate() {
            let sx = if i & 1 == 0 { -1.0 } else { 1.0 };
            let sy = if i & 2 == 0 { -1.0 } else { 1.0 };
            let sz = if i & 4 == 0 { -1.0 } else { 1.0 };
            *v = [cx + sx * hx, cy + sy * hy, cz + sz * hz];
        }
        out
    }
}

// Edge index pairs of a cuboid whose vertices are bit-coded x/y/z.
const EDGES: [(usize, usize); 12] = [
    (0, 1),
    (2, 3),
    (4, 5),
    (6, 7),
    (0, 2),
    (1, 3),
    (4, 6),
    (5, 7),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

impl canvas::Program<Message> for StationScene {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        let accent = theme.palette().primary;
        let stroke = canvas::Stroke::default()
            .with_color(Color { a: 0.18, ..accent })
            .with_width(1.0);

        let center = Point::new(bounds.width / 2.0, bounds.height / 2.0);
        let scale = bounds.width.min(bounds.height) / 9.0;

        for cuboid in [&CORE, &PANEL_LEFT, &PANEL_RIGHT] {
            let projected: Vec<Point> = cuboid
                .vertices()
                .iter()
                .map(|v| self.project(*v, center, scale))
                .collect();
            for (a, b) in EDGES {
                frame.stroke(
                    &canvas::Path::line(projected[a], projected[b]),
                    stroke.clone(),
                );
            }
        }

        vec![frame.into_geometry()]
    }
}

impl StationScene {
    /// Rotate about Y then X, drop Z (orthographic projection).
    fn project(&self, [x, y, z]: [f32; 3], center: Point, scale: f32) -> Point {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();

        let x1 = x * cy + z * sy;
        let z1 = -x * sy + z * cy;
        let y1 = y * cp - z1 * sp;

        Point::new(center.x + x1 * scale, center.y + y1 * scale)
    }
}
