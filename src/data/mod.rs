//! Data module - CSV loading, selection state and filtering

mod loader;
mod processor;
mod selection;
mod view;

pub use loader::{DataLoader, DataSource, LoaderError};
pub use processor::{DataProcessor, ProcessorError};
pub use selection::Selection;
pub use view::TableView;
