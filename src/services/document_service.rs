//! 文档服务 - 业务能力层
//!
//! 只负责"PDF → 题目列表"能力：读出每页文本、按页拼接、交给提取器

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{AppResult, DocumentError, ExtractionError};
use crate::extractor::{Extraction, ExtractorConfig, QuestionExtractor};

/// 读取文档中每一页的文本
///
/// 实现方只负责文本抽取，不认识题目
pub trait DocumentReader: Send + Sync {
    fn read_pages(&self, path: &Path) -> AppResult<Vec<String>>;
}

/// 基于 `pdf_oxide` 的 PDF 文本读取
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextReader;

impl DocumentReader for PdfTextReader {
    fn read_pages(&self, path: &Path) -> AppResult<Vec<String>> {
        if !path.exists() {
            return Err(DocumentError::NotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let read_failed = |e: pdf_oxide::Error| DocumentError::ReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        let mut document = pdf_oxide::PdfDocument::open(path).map_err(read_failed)?;
        let page_count = document.page_count().map_err(read_failed)?;
        debug!("PDF 共 {} 页: {}", page_count, path.display());

        let mut pages = Vec::with_capacity(page_count);
        for page_index in 0..page_count {
            pages.push(document.extract_text(page_index).map_err(read_failed)?);
        }
        Ok(pages)
    }
}

/// 文档服务
///
/// 职责：
/// - 在阻塞线程池中读取 PDF
/// - 按页序拼接文本并提取题目
/// - 区分"读不出文件"和"读出来但没有题目"
pub struct DocumentService<R: DocumentReader = PdfTextReader> {
    reader: std::sync::Arc<R>,
    extractor: QuestionExtractor,
}

impl DocumentService<PdfTextReader> {
    pub fn new(config: &ExtractorConfig) -> AppResult<Self> {
        Self::with_reader(PdfTextReader, config)
    }
}

impl<R: DocumentReader + 'static> DocumentService<R> {
    pub fn with_reader(reader: R, config: &ExtractorConfig) -> AppResult<Self> {
        Ok(Self {
            reader: std::sync::Arc::new(reader),
            extractor: QuestionExtractor::new(config)?,
        })
    }

    /// 读取文档并提取题目（附带丢弃题块的报告）
    ///
    /// 没有可识别题目时返回 [`ExtractionError::Empty`]
    pub async fn load_questions(&self, path: &Path) -> AppResult<Extraction> {
        info!("📄 正在读取文档: {}", path.display());
        let text = self.read_text(path.to_path_buf()).await?;
        self.extract_from_text(&text)
    }

    /// 直接对已抽取的文本做提取
    pub fn extract_from_text(&self, text: &str) -> AppResult<Extraction> {
        let extraction = self.extractor.extract_with_report(text);
        if extraction.questions.is_empty() {
            warn!(
                "⚠️ 文档中没有找到可识别的题目（丢弃 {} 个题块）",
                extraction.discarded.len()
            );
            return Err(ExtractionError::Empty.into());
        }
        Ok(extraction)
    }

    async fn read_text(&self, path: PathBuf) -> AppResult<String> {
        let reader = self.reader.clone();
        let pages = tokio::task::spawn_blocking(move || reader.read_pages(&path))
            .await
            .map_err(|e| DocumentError::TaskFailed(e.to_string()))??;
        Ok(pages.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPages(Vec<&'static str>);

    impl DocumentReader for FixedPages {
        fn read_pages(&self, _path: &Path) -> AppResult<Vec<String>> {
            Ok(self.0.iter().map(|p| p.to_string()).collect())
        }
    }

    struct Unreadable;

    impl DocumentReader for Unreadable {
        fn read_pages(&self, path: &Path) -> AppResult<Vec<String>> {
            Err(DocumentError::ReadFailed {
                path: path.display().to_string(),
                message: "corrupt".to_string(),
            }
            .into())
        }
    }

    #[tokio::test]
    async fn test_pages_joined_in_order() {
        let reader = FixedPages(vec![
            "TOSS UP 1) MATH Short Answer What is",
            "1+1? ANSWER: 2 MIT Science Bowl 2024 Page 1",
        ]);
        let service = DocumentService::with_reader(reader, &ExtractorConfig::default()).unwrap();
        let extraction = service.load_questions(Path::new("round.pdf")).await.unwrap();
        let questions = extraction.questions;

        assert_eq!(questions.len(), 1);
        assert!(extraction.discarded.is_empty());
        assert_eq!(questions[0].question, "What is 1+1?");
        assert_eq!(questions[0].answer, "2");
    }

    #[tokio::test]
    async fn test_no_questions_is_distinct_error() {
        let reader = FixedPages(vec!["cover page", "rules"]);
        let service = DocumentService::with_reader(reader, &ExtractorConfig::default()).unwrap();
        let err = service.load_questions(Path::new("round.pdf")).await.unwrap_err();
        assert!(err.is_empty_extraction());
    }

    #[tokio::test]
    async fn test_read_failure_is_document_error() {
        let service = DocumentService::with_reader(Unreadable, &ExtractorConfig::default()).unwrap();
        let err = service.load_questions(Path::new("round.pdf")).await.unwrap_err();
        assert!(matches!(err, crate::error::AppError::Document(_)));
        assert!(!err.is_empty_extraction());
    }

    #[test]
    fn test_missing_pdf_not_found() {
        let err = PdfTextReader
            .read_pages(Path::new("no/such/round.pdf"))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::AppError::Document(DocumentError::NotFound { .. })
        ));
    }
}
