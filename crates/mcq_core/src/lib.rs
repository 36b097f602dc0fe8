//! MCQ core: pure processing state machine, screenshot mirror and view-model helpers.
mod effect;
mod messages;
mod mirror;
mod model;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{AppView, Effect, Notification, NotificationVariant};
pub use messages::Messages;
pub use mirror::{Generation, ScreenshotMirror};
pub use model::{McqOption, McqResponse, Question, ScreenshotPreview, ScreenshotRef};
pub use msg::Msg;
pub use state::{McqState, ProcessingPhase};
pub use update::update;
pub use view_model::{McqViewModel, OptionView, QuestionView, ScreenshotView};
