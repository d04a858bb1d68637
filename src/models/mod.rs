pub mod category;
pub mod loaders;
pub mod question;

pub use category::Category;
pub use loaders::{derive_categories, load_categories, load_questions};
pub use question::{Question, QuestionStyle, QuestionType, OPTION_LETTERS};
