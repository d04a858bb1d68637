pub mod document_service;
pub mod question_bank;
pub mod speaker;

pub use document_service::{DocumentReader, DocumentService, PdfTextReader};
pub use question_bank::{QuestionBank, QuestionBankService};
pub use speaker::{LogSpeaker, Speaker};
