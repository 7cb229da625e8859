mod image_ops;
mod ratatui;
mod terminal_cell;
mod traits;

pub use ratatui::RatatuiImagePresenter;
pub use traits::ImagePresenter;
