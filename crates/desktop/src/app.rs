use std::path::PathBuf;
use std::time::Duration;

use crossbeam_channel::Receiver;
use iced::keyboard;
use iced::widget::{
    button, column, container, image as iced_image, row, scrollable, stack, text, Space,
};
use iced::{Element, Event, Length, Subscription, Task, Theme};

use astrasafe_core::capture::infrastructure::nokhwa_frame_source::NokhwaFrameSource;
use astrasafe_core::client::infrastructure::http_inference_client::HttpInferenceClient;
use astrasafe_core::live::frame_poller::LiveEvent;
use astrasafe_core::live::live_session::LiveSession;
use astrasafe_core::shared::constants::{is_image_path, IMAGE_EXTENSIONS};
use astrasafe_core::shared::detection::Detection;

use crate::settings::{Appearance, Settings};
use crate::tabs;
use crate::theme;
use crate::widgets::scene::SceneState;
use crate::widgets::{modal, safety_sidebar, scene, stats_panel};
use crate::workers::upload_worker::{self, UploadEvent};

/// How often the UI drains worker channels while work is in flight.
const PUMP_INTERVAL: Duration = Duration::from_millis(100);
const SCENE_TICK: Duration = Duration::from_millis(40);

// ---------------------------------------------------------------------------
// Tab and modal identifiers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Live,
    Upload,
    Falcon,
}

impl Tab {
    const ALL: &[Tab] = &[Tab::Live, Tab::Upload, Tab::Falcon];

    fn label(self) -> &'static str {
        match self {
            Tab::Live => "Live Feed",
            Tab::Upload => "Upload",
            Tab::Falcon => "Falcon",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    Settings,
    About,
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum Message {
    TabSelected(Tab),
    OpenModal(Modal),
    CloseModal,
    ToggleLiveFeed,
    PumpWorkers,
    SceneTick,
    SelectImage,
    ImageSelected(Option<PathBuf>),
    FileDropped(PathBuf),
    BackendUrlChanged(String),
    PollIntervalChanged(u64),
    CameraIndexChanged(u32),
    AppearanceChanged(Appearance),
    HighContrastChanged(bool),
    FontScaleChanged(f32),
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Live tab state. The session owns the single polling thread; everything
/// else here is the latest data it published.
pub struct LiveState {
    session: LiveSession,
    rx: Option<Receiver<LiveEvent>>,
    pub frame: Option<iced_image::Handle>,
    /// `None` before the first response; `Some(empty)` renders the
    /// explicit "no detections" state.
    pub detections: Option<Vec<Detection>>,
    pub error: Option<String>,
}

impl LiveState {
    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }
}

pub struct UploadState {
    rx: Option<Receiver<UploadEvent>>,
    pub preview: Option<iced_image::Handle>,
    pub detections: Option<Vec<Detection>>,
    pub error: Option<String>,
}

pub struct App {
    active_tab: Tab,
    modal: Option<Modal>,
    pub settings: Settings,
    scene: SceneState,
    pub live: LiveState,
    pub upload: UploadState,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        (
            Self {
                active_tab: Tab::Live,
                modal: None,
                settings: Settings::load(),
                scene: SceneState::new(),
                live: LiveState {
                    session: LiveSession::new(),
                    rx: None,
                    frame: None,
                    detections: None,
                    error: None,
                },
                upload: UploadState {
                    rx: None,
                    preview: None,
                    detections: None,
                    error: None,
                },
            },
            Task::none(),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TabSelected(tab) => {
                self.active_tab = tab;
            }
            Message::OpenModal(modal) => {
                self.modal = Some(modal);
            }
            Message::CloseModal => {
                self.modal = None;
            }
            Message::ToggleLiveFeed => {
                if self.live.is_active() {
                    self.stop_live();
                } else {
                    self.start_live();
                }
            }
            Message::PumpWorkers => {
                self.pump_workers();
            }
            Message::SceneTick => {
                self.scene.tick();
            }
            Message::SelectImage => {
                return Task::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .set_title("Select an image to scan")
                            .add_filter("Images", IMAGE_EXTENSIONS)
                            .pick_file()
                            .await
                            .map(|h| h.path().to_path_buf())
                    },
                    Message::ImageSelected,
                );
            }
            Message::ImageSelected(Some(path)) => {
                self.handle_file(path);
            }
            Message::ImageSelected(None) => {}
            Message::FileDropped(path) => {
                // Drops only land on the upload surface.
                if self.active_tab == Tab::Upload {
                    self.handle_file(path);
                }
            }
            Message::BackendUrlChanged(url) => {
                self.settings.backend_url = url;
                self.settings.save();
            }
            Message::PollIntervalChanged(ms) => {
                self.settings.poll_interval_ms = ms.max(250);
                self.settings.save();
            }
            Message::CameraIndexChanged(index) => {
                self.settings.camera_index = index;
                self.settings.save();
            }
            Message::AppearanceChanged(appearance) => {
                self.settings.appearance = appearance;
                self.settings.save();
            }
            Message::HighContrastChanged(enabled) => {
                self.settings.high_contrast = enabled;
                self.settings.save();
            }
            Message::FontScaleChanged(scale) => {
                self.settings.font_scale = scale;
                self.settings.save();
            }
        }
        Task::none()
    }

    /// Toggle-on half: acquire the camera, then start the one session.
    /// On camera or client failure the error is surfaced inline and the
    /// session stays idle; no timer is scheduled.
    fn start_live(&mut self) {
        let source = match NokhwaFrameSource::open(self.settings.camera_index) {
            Ok(source) => source,
            Err(e) => {
                log::error!("camera open failed: {e}");
                self.live.error = Some(e.to_string());
                return;
            }
        };
        let client = match HttpInferenceClient::new(self.settings.backend_url.clone()) {
            Ok(client) => client,
            Err(e) => {
                log::error!("{e}");
                self.live.error = Some(e.to_string());
                return;
            }
        };

        let (tx, rx) = crossbeam_channel::unbounded();
        self.live.session.start(
            Box::new(source),
            Box::new(client),
            Duration::from_millis(self.settings.poll_interval_ms),
            tx,
        );
        self.live.rx = Some(rx);
        self.live.error = None;
    }

    /// Toggle-off half: cancel the cycle, detach the feed, clear overlays
    /// and reset the results panel.
    fn stop_live(&mut self) {
        self.live.session.stop();
        self.live.rx = None;
        self.live.frame = None;
        self.live.detections = None;
        self.live.error = None;
    }

    fn pump_workers(&mut self) {
        let live_events: Vec<LiveEvent> = self
            .live
            .rx
            .as_ref()
            .map(|rx| rx.try_iter().collect())
            .unwrap_or_default();
        for event in live_events {
            match event {
                LiveEvent::Frame(frame) => {
                    self.live.frame = Some(iced_image::Handle::from_rgba(
                        frame.width(),
                        frame.height(),
                        frame.to_rgba(),
                    ));
                }
                LiveEvent::Detections(detections) => {
                    self.live.detections = Some(detections);
                    self.live.error = None;
                }
                LiveEvent::CycleError(e) => {
                    // Non-fatal: keep the last rendered results on screen.
                    self.live.error = Some(e);
                }
            }
        }

        let upload_events: Vec<UploadEvent> = self
            .upload
            .rx
            .as_ref()
            .map(|rx| rx.try_iter().collect())
            .unwrap_or_default();
        let mut upload_done = false;
        for event in upload_events {
            match event {
                UploadEvent::Preview {
                    width,
                    height,
                    rgba,
                } => {
                    self.upload.preview =
                        Some(iced_image::Handle::from_rgba(width, height, rgba));
                    self.upload.detections = None;
                    self.upload.error = None;
                }
                UploadEvent::Detections(detections) => {
                    self.upload.detections = Some(detections);
                    upload_done = true;
                }
                UploadEvent::Error(e) => {
                    self.upload.error = Some(e);
                    upload_done = true;
                }
            }
        }
        if upload_done {
            self.upload.rx = None;
        }
    }

    /// Route a picked or dropped file into the upload flow. Files without
    /// an image extension are ignored with no error surfaced.
    fn handle_file(&mut self, path: PathBuf) {
        if !is_image_path(&path) {
            log::debug!("ignoring non-image file: {}", path.display());
            return;
        }

        self.upload.rx = Some(upload_worker::spawn(
            path,
            self.settings.backend_url.clone(),
        ));
        self.upload.error = None;
    }

    pub fn view(&self) -> Element<'_, Message> {
        let fs = self.settings.font_scale;
        let th = self.theme();

        let header = row![
            text("AstraSafe AI").size(scaled(19.0, fs)).font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..iced::Font::DEFAULT
            }),
            text("Station Safety Monitor")
                .size(scaled(12.0, fs))
                .color(theme::tertiary_color(&th)),
            Space::new().width(Length::Fill),
            button(text("Settings").size(scaled(12.0, fs)))
                .on_press(Message::OpenModal(Modal::Settings))
                .style(button::text),
            button(text("About").size(scaled(12.0, fs)))
                .on_press(Message::OpenModal(Modal::About))
                .style(button::text),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center)
        .padding([10, 16]);

        // Tab bar: exactly one tab's content is visible at a time.
        let tab_bar = row(Tab::ALL
            .iter()
            .map(|&tab| {
                let label = text(tab.label()).size(scaled(13.0, fs));
                let btn = button(label)
                    .on_press(Message::TabSelected(tab))
                    .padding([6, 14]);
                if tab == self.active_tab {
                    btn.style(button::primary).into()
                } else {
                    btn.style(button::text).into()
                }
            })
            .collect::<Vec<_>>())
        .spacing(2)
        .padding([0, 16]);

        let content: Element<'_, Message> = match self.active_tab {
            Tab::Live => tabs::live_tab::view(fs, &self.live, &th),
            Tab::Upload => tabs::upload_tab::view(fs, &self.upload, &th),
            Tab::Falcon => tabs::falcon_tab::view(fs, &th),
        };

        let sidebar = container(scrollable(
            column![
                stats_panel::view(fs, &th),
                Space::new().height(20),
                safety_sidebar::view(fs, &th),
            ]
            .padding([0, 4]),
        ))
        .width(250)
        .padding(12)
        .style(container::rounded_box);

        let body = row![sidebar, container(content).padding([0, 12]).width(Length::Fill)]
            .spacing(4)
            .padding([8, 16])
            .height(Length::Fill);

        let base = column![header, tab_bar, body].height(Length::Fill);
        let base: Element<'_, Message> = stack![scene::view(&self.scene), base].into();

        match self.modal {
            Some(Modal::Settings) => {
                modal::overlay(base, modal::settings_card(fs, &self.settings, &th))
            }
            Some(Modal::About) => modal::overlay(base, modal::about_card(fs, &th)),
            None => base,
        }
    }

    pub fn theme(&self) -> Theme {
        theme::resolve_theme(self.settings.appearance, self.settings.high_contrast)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let mut subs = vec![
            iced::time::every(SCENE_TICK).map(|_| Message::SceneTick),
            keyboard::listen().filter_map(|event| match event {
                keyboard::Event::KeyPressed {
                    key: keyboard::Key::Named(keyboard::key::Named::Escape),
                    ..
                } => Some(Message::CloseModal),
                _ => None,
            }),
            iced::event::listen_with(|event, _status, _window| match event {
                Event::Window(iced::window::Event::FileDropped(path)) => {
                    Some(Message::FileDropped(path))
                }
                _ => None,
            }),
        ];

        if self.live.rx.is_some() || self.upload.rx.is_some() {
            subs.push(iced::time::every(PUMP_INTERVAL).map(|_| Message::PumpWorkers));
        }

        Subscription::batch(subs)
    }
}

/// Scale a base font size by the user's font_scale setting.
pub fn scaled(base: f32, font_scale: f32) -> f32 {
    (base * font_scale).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_image_file_spawns_no_upload_worker() {
        let (mut app, _) = App::new();
        app.handle_file(PathBuf::from("notes.txt"));
        app.handle_file(PathBuf::from("clip.mp4"));
        app.handle_file(PathBuf::from("README"));

        // No worker means no preview change and no network call.
        assert!(app.upload.rx.is_none());
        assert!(app.upload.preview.is_none());
        assert!(app.upload.detections.is_none());
        assert!(app.upload.error.is_none());
    }

    #[test]
    fn test_subscription_builds_while_idle() {
        let (app, _) = App::new();
        let _ = app.subscription();
    }
}
