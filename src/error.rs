use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 题库 / 分类加载错误
    #[error("题库加载错误: {0}")]
    Source(#[from] SourceError),
    /// PDF 文档读取错误
    #[error("文档错误: {0}")]
    Document(#[from] DocumentError),
    /// 题目提取错误
    #[error("提取错误: {0}")]
    Extraction(#[from] ExtractionError),
    /// 会话状态错误
    #[error("会话错误: {0}")]
    Session(#[from] SessionError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 终端输出错误
    #[error("输出错误: {0}")]
    Io(#[from] std::io::Error),
}

/// 题库 JSON 加载错误
#[derive(Debug, Error)]
pub enum SourceError {
    /// 读取本地文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 网络请求失败
    #[error("请求失败 ({url}): {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务端返回非成功状态
    #[error("请求返回错误状态 ({url}): {status}")]
    BadStatus {
        url: String,
        status: reqwest::StatusCode,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({location}): {source}")]
    JsonParseFailed {
        location: String,
        #[source]
        source: serde_json::Error,
    },
}

/// PDF 文档读取错误
#[derive(Debug, Error)]
pub enum DocumentError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 打开或解析 PDF 失败
    #[error("无法读取PDF ({path}): {message}")]
    ReadFailed { path: String, message: String },
    /// 后台读取任务异常退出
    #[error("读取任务异常终止: {0}")]
    TaskFailed(String),
}

/// 题目提取错误
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// 文档中没有可识别的题目
    #[error("文档中没有可识别的题目")]
    Empty,
    /// 正则表达式编译失败
    #[error("正则表达式编译失败: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// 会话状态错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// 当前没有题目
    #[error("当前没有可用题目")]
    NoActiveQuestion,
    /// 当前阶段不允许该操作
    #[error("当前阶段 {phase} 不允许执行 {operation}")]
    InvalidPhase {
        phase: &'static str,
        operation: &'static str,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败: {0}")]
    TomlParseFailed(#[from] toml::de::Error),
    /// 配置值非法
    #[error("配置项 {key} 的值 '{value}' 非法")]
    InvalidValue { key: String, value: String },
}

impl AppError {
    /// 是否为"没有题目"这类提示性错误（非故障）
    pub fn is_empty_extraction(&self) -> bool {
        matches!(self, AppError::Extraction(ExtractionError::Empty))
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
