mod app;
mod message;
mod state;

pub use app::EnhancerApp;
pub use message::Message;
pub use state::{AppState, Status, StatusTone};

/// Open the enhancer window and block until it is closed
pub fn run() -> iced::Result {
    iced::application(EnhancerApp::new, EnhancerApp::update, EnhancerApp::view)
        .title(EnhancerApp::TITLE)
        .window_size((600.0, 600.0))
        .resizable(false)
        .run()
}
