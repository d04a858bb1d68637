use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 日志输出到 stderr，stdout 留给题目显示。
/// 级别优先取 `RUST_LOG`，否则按 `verbose_logging` 选择 info / debug
pub fn init(verbose_logging: bool) {
    let default_filter = if verbose_logging {
        "science_bowl_reader=debug"
    } else {
        "science_bowl_reader=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
