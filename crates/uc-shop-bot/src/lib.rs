//! UC shop bot: package menu, order creation and payment webhook.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod order;

pub use dispatch::{handle_event, run_listener, Dispatcher, UserLanes};
pub use error::{AppError, AppResult};
