pub mod controller;
pub mod log;

pub use controller::{RecordListController, ScreenPresenter, ScreenState};
