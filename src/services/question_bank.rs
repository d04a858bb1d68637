//! 题库服务 - 业务能力层
//!
//! 负责加载题库 JSON 和分类列表；分类列表缺失时从题目中提取

use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::models::{derive_categories, load_categories, load_questions, Question};

/// 加载好的题库
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    pub questions: Vec<Question>,
    pub categories: Vec<String>,
}

/// 题库服务
pub struct QuestionBankService {
    questions_source: String,
    categories_source: Option<String>,
}

impl QuestionBankService {
    pub fn new(config: &Config) -> Self {
        Self {
            questions_source: config.questions_source.clone(),
            categories_source: config.categories_source.clone(),
        }
    }

    pub fn questions_source(&self) -> &str {
        &self.questions_source
    }

    /// 加载题库；题库失败返回错误，分类失败只记录警告
    pub async fn load(&self) -> AppResult<QuestionBank> {
        let questions = load_questions(&self.questions_source).await?;
        let categories = self.load_categories_or_derive(&questions).await;
        Ok(QuestionBank {
            questions,
            categories,
        })
    }

    async fn load_categories_or_derive(&self, questions: &[Question]) -> Vec<String> {
        if let Some(source) = &self.categories_source {
            match load_categories(source).await {
                Ok(categories) if !categories.is_empty() => return categories,
                Ok(_) => warn!("分类列表为空，从题目中提取"),
                Err(e) => warn!("加载分类失败，从题目中提取: {}", e),
            }
        } else {
            info!("未配置分类列表，从题目中提取");
        }
        derive_categories(questions)
    }
}
