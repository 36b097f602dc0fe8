pub mod config;
mod effects;
pub mod logging;
pub mod shell;
mod view;

pub use view::{activate, ActiveView, ViewDeps};
