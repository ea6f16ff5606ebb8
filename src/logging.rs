// ==========================================
// 港口理货录入系统 - 日志系统
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 级别: RUST_LOG（默认 info）
// 格式: PORT_TALLY_LOG_FORMAT=text|json（默认 text，json 供班次日志采集）
// ==========================================

use std::fmt;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// 日志格式环境变量
pub const LOG_FORMAT_ENV: &str = "PORT_TALLY_LOG_FORMAT";

const DEFAULT_FILTER: &str = "info";

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("未知日志格式: {}", other)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// 初始化日志系统
///
/// 格式取自 PORT_TALLY_LOG_FORMAT；取值无效时回退到文本格式并记录警告
///
/// # 示例
/// ```no_run
/// use port_tally::logging;
/// logging::init();
/// ```
pub fn init() {
    let parsed = std::env::var(LOG_FORMAT_ENV)
        .ok()
        .map(|raw| raw.parse::<LogFormat>());
    let format = match &parsed {
        Some(Ok(format)) => *format,
        _ => LogFormat::Text,
    };

    init_with_format(format);

    if let Some(Err(e)) = parsed {
        tracing::warn!(error = %e, env = LOG_FORMAT_ENV, "日志格式无效，使用文本格式");
    }
}

/// 按指定格式初始化日志系统
pub fn init_with_format(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true);

    match format {
        LogFormat::Text => builder.with_thread_ids(false).init(),
        // 事件字段（record_id / net_t 等）平铺到顶层
        LogFormat::Json => builder.json().flatten_event(true).init(),
    }
}

/// 初始化测试环境的日志系统（可重复调用）
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("port_tally=debug"))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!(" JSON ".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("text".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert_eq!("".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert!("xml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::default(), LogFormat::Text);
        assert_eq!(LogFormat::Json.to_string(), "json");
    }
}
