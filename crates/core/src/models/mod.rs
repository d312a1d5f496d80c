pub mod catalog;
pub mod holding;
pub mod portfolio;
pub mod settings;
pub mod summary;
