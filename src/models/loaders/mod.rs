pub mod json_loader;

pub use json_loader::{derive_categories, load_categories, load_questions};
