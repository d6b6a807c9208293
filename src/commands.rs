// 鹅语指令
//
// 宿主框架负责消息分发，这里只实现五个指令的处理逻辑：
// - goose: 中文转鹅语（可带阶数前缀，如 "/goose 3 原文"）
// - goose2: 鹅语转中文
// - goose3: 中文转特征鹅语（转到不动点）
// - goose4: 鹅语转特征中文（转到不动点）
// - goose5: 中文转乱码鹅语（加噪后反复反向转码）
//
// 所有结果都会交给审核服务，审核后为空则不回复

use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::config::GooseConfig;
use crate::goose::{self, Direction};
use crate::sanitizer::{ScanEntry, SensitiveScanService};

/// 鹅语指令
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GooseCommand {
    /// 中文转鹅语
    Goose,
    /// 鹅语转中文
    Goose2,
    /// 中文转特征鹅语
    Goose3,
    /// 鹅语转特征中文
    Goose4,
    /// 中文转乱码鹅语
    Goose5,
}

impl GooseCommand {
    /// 所有指令
    pub const ALL: [GooseCommand; 5] = [
        GooseCommand::Goose,
        GooseCommand::Goose2,
        GooseCommand::Goose3,
        GooseCommand::Goose4,
        GooseCommand::Goose5,
    ];

    /// 指令名
    pub fn name(&self) -> &'static str {
        match self {
            GooseCommand::Goose => "goose",
            GooseCommand::Goose2 => "goose2",
            GooseCommand::Goose3 => "goose3",
            GooseCommand::Goose4 => "goose4",
            GooseCommand::Goose5 => "goose5",
        }
    }

    /// 指令说明
    pub fn description(&self) -> &'static str {
        match self {
            GooseCommand::Goose => "中文转鹅语指令 /goose {阶数} [原文]",
            GooseCommand::Goose2 => "鹅语转一阶中文指令",
            GooseCommand::Goose3 => "中文转特征鹅语指令",
            GooseCommand::Goose4 => "鹅语转特征中文指令",
            GooseCommand::Goose5 => "中文转乱码鹅语指令（尽量别用）",
        }
    }
}

impl FromStr for GooseCommand {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().trim_start_matches('/').to_lowercase().as_str() {
            "goose" | "forward" => Ok(GooseCommand::Goose),
            "goose2" | "inverse" => Ok(GooseCommand::Goose2),
            "goose3" | "forward-fixed" => Ok(GooseCommand::Goose3),
            "goose4" | "inverse-fixed" => Ok(GooseCommand::Goose4),
            "goose5" | "noise" => Ok(GooseCommand::Goose5),
            other => anyhow::bail!("未知指令: {}", other),
        }
    }
}

/// 解析聊天消息中的指令
///
/// `"/goose3 原文"` → `(Goose3, Some("原文"))`，不是鹅语指令时返回 None
pub fn parse_command_line(line: &str) -> Option<(GooseCommand, Option<&str>)> {
    let line = line.trim_start();
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, Some(rest)),
        None => (line, None),
    };

    let command = name.parse::<GooseCommand>().ok()?;
    let argument = rest.filter(|r| !r.is_empty());
    Some((command, argument))
}

/// 拆分阶数前缀
///
/// `"3 原文"` → `Some((3, "原文"))`；负数按 0 处理
fn split_repeat_count(argument: &str) -> Option<(usize, &str)> {
    let (head, rest) = argument.split_once(' ')?;
    let count: i64 = head.trim().parse().ok()?;
    if rest.is_empty() {
        return None;
    }
    Some((count.max(0) as usize, rest))
}

/// 鹅语指令处理器
///
/// 审核服务在构造时注入
pub struct GooseCommands<S: SensitiveScanService> {
    scan_service: S,
    config: GooseConfig,
}

impl<S: SensitiveScanService> GooseCommands<S> {
    pub fn new(scan_service: S, config: GooseConfig) -> Self {
        Self {
            scan_service,
            config,
        }
    }

    /// 当前配置
    pub fn config(&self) -> &GooseConfig {
        &self.config
    }

    /// 处理指令
    ///
    /// 返回 None 表示不回复
    pub async fn handle(
        &self,
        command: GooseCommand,
        argument: Option<&str>,
    ) -> Result<Option<String>> {
        let Some(param) = argument.filter(|a| !a.is_empty()) else {
            tracing::debug!("{}: 参数为空，不回复", command.name());
            return Ok(None);
        };

        tracing::info!(
            "处理指令 {}: 参数 {} 字",
            command.name(),
            param.chars().count()
        );

        let result = match command {
            GooseCommand::Goose => self.forward(param),
            GooseCommand::Goose2 => goose::single(param, Direction::GooseToChinese),
            GooseCommand::Goose3 => {
                goose::until_fixed_point(param, Direction::ChineseToGoose, self.config.max_loop_count)
                    .text
            }
            GooseCommand::Goose4 => {
                goose::until_fixed_point(param, Direction::GooseToChinese, self.config.max_loop_count)
                    .text
            }
            GooseCommand::Goose5 => goose::noise_then_invert(
                param,
                self.config.noise_padding,
                self.config.noise_passes,
            ),
        };

        self.sanitize(result).await
    }

    /// 按指令名处理（供宿主按字符串分发）
    pub async fn handle_named(&self, name: &str, argument: Option<&str>) -> Result<Option<String>> {
        let command: GooseCommand = name.parse()?;
        self.handle(command, argument).await
    }

    /// 中文转鹅语，带阶数前缀时输出逐阶过程
    fn forward(&self, param: &str) -> String {
        match split_repeat_count(param) {
            Some((count, origin)) => {
                // 阶数过大时以迭代上限为准
                let count = count.min(self.config.max_loop_count);
                goose::repeat_with_trace(origin, count).render(&self.config.trace_separator)
            }
            None => goose::single(param, Direction::ChineseToGoose),
        }
    }

    /// 交给审核服务，空白结果视为不回复
    async fn sanitize(&self, message: String) -> Result<Option<String>> {
        let candidates = [message];
        let entries = self.scan_service.scan(&candidates).await?;
        let [message] = candidates;

        let entry = entries.into_iter().next().unwrap_or_else(|| {
            tracing::warn!("审核服务未返回扫描结果，按无命中处理");
            ScanEntry::default()
        });

        let sanitized = self.scan_service.sanitize(&message, &entry);
        match sanitized {
            Some(text) if !text.trim().is_empty() => Ok(Some(text)),
            _ => {
                tracing::debug!("审核后结果为空，不回复");
                Ok(None)
            }
        }
    }
}
