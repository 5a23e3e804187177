// Session state shared by every component
pub mod app_state;

pub use app_state::{AppState, ProductItem, RowDetail, Status, Theme};
