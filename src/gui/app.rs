use std::path::PathBuf;

use iced::{
    Alignment::Center,
    Color, Element, Length, Task,
    widget::{button, column, container, pick_list, text},
};
use rfd::AsyncFileDialog;

use super::{AppState, Message, StatusTone};
use crate::enhancer::Enhancer;
use crate::error::EnhanceError;
use crate::models::{EnhancedArtifacts, Mode};

pub struct EnhancerApp {
    state: AppState,
}

impl EnhancerApp {
    pub const TITLE: &'static str = "Image Enhancer";

    pub fn new() -> (Self, Task<Message>) {
        (
            Self {
                state: AppState::default(),
            },
            Task::none(),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ModeSelected(mode) => {
                self.state.mode = mode;
                Task::none()
            }
            Message::SelectImage => {
                self.state.reset();
                Task::perform(
                    AsyncFileDialog::new()
                        .set_title("Select Image")
                        .add_filter("Image files", &["jpg", "jpeg", "png"])
                        .pick_file(),
                    |handle| Message::ImageChosen(handle.map(|h| h.path().to_path_buf())),
                )
            }
            Message::ImageChosen(None) => Task::none(),
            Message::ImageChosen(Some(path)) => {
                // The label switches to "Processing..." on this frame; the
                // pipeline itself runs off the UI thread.
                if !self.state.begin(path.clone()) {
                    log::warn!("Ignoring {}: a run is already in progress", path.display());
                    return Task::none();
                }
                Task::perform(run_enhancement(path, self.state.mode), Message::Finished)
            }
            Message::Finished(result) => {
                if let Err(e) = &result {
                    log::error!("Enhancement failed: {}", e);
                }
                self.state.finish(result);
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let select = button("Select Image")
            .padding(10)
            .on_press_maybe((!self.state.is_processing()).then_some(Message::SelectImage));

        let content = column![
            text("Choose Editing Style").size(24),
            pick_list(Mode::ALL, Some(self.state.mode), Message::ModeSelected),
            select,
            text(self.state.status_text())
                .size(16)
                .color(tone_color(self.state.tone())),
        ]
        .spacing(20)
        .padding(40)
        .align_x(Center);

        container(content)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }
}

async fn run_enhancement(path: PathBuf, mode: Mode) -> Result<EnhancedArtifacts, EnhanceError> {
    tokio::task::spawn_blocking(move || Enhancer::new().enhance(&path, mode))
        .await
        .map_err(|e| EnhanceError::Worker {
            reason: e.to_string(),
        })?
}

fn tone_color(tone: StatusTone) -> Color {
    match tone {
        StatusTone::Neutral => Color::from_rgb(0.5, 0.5, 0.5),
        StatusTone::Info => Color::from_rgb(0.25, 0.5, 1.0),
        StatusTone::Success => Color::from_rgb(0.2, 0.8, 0.3),
        StatusTone::Error => Color::from_rgb(0.9, 0.2, 0.2),
    }
}
