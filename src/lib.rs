pub mod app;
pub mod backend;
pub mod config;
pub mod error;
pub mod event;
pub mod fields;
pub mod input;
pub mod logging;
pub mod presenter;
pub mod store;
pub mod ui;
pub mod viewer;
pub mod workflow;

#[cfg(test)]
pub(crate) mod test_support;
