// 鹅语转码库
//
// - goose: 转码引擎（简繁转换、代码页错配、迭代控制）
// - sanitizer: 外部审核服务接口及内置实现
// - commands: 五个鹅语指令的处理逻辑
// - config: 配置加载与保存

pub mod commands;
pub mod config;
pub mod goose;
pub mod sanitizer;

pub use commands::{parse_command_line, GooseCommand, GooseCommands};
pub use config::GooseConfig;
pub use goose::{transcode, Direction, IterationPolicy};
pub use sanitizer::{KeywordScanService, PassThroughScanService, ScanEntry, SensitiveScanService};

/// 初始化日志
///
/// 重复调用时忽略（测试中可能多次初始化）
pub fn init_logging(level: tracing::Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}
