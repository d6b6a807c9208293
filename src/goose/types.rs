//! 鹅语类型定义

use serde::{Deserialize, Serialize};

use crate::goose::codepage::{CodePage, EUC_JP_PAGE, GBK_PAGE};
use crate::goose::rules::{FORWARD_MARKERS, INVERSE_MARKERS};
use crate::goose::script::ScriptDirection;

/// 最大循环次数（不动点迭代上限）
pub const MAX_LOOP_COUNT: usize = 1000;

/// 转码方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// 中文 → 鹅语
    ChineseToGoose,
    /// 鹅语 → 中文
    GooseToChinese,
}

impl Direction {
    /// 编码使用的代码页
    pub fn source_page(&self) -> &'static CodePage {
        match self {
            Direction::ChineseToGoose => &EUC_JP_PAGE,
            Direction::GooseToChinese => &GBK_PAGE,
        }
    }

    /// 解码使用的（故意错配的）代码页
    pub fn target_page(&self) -> &'static CodePage {
        match self {
            Direction::ChineseToGoose => &GBK_PAGE,
            Direction::GooseToChinese => &EUC_JP_PAGE,
        }
    }

    /// 合并时视为“替换标记”的字符
    pub fn markers(&self) -> &'static [char] {
        match self {
            Direction::ChineseToGoose => FORWARD_MARKERS,
            Direction::GooseToChinese => INVERSE_MARKERS,
        }
    }

    /// 字节往返之前的简繁转换
    pub fn pre_normalization(&self) -> Option<ScriptDirection> {
        match self {
            Direction::ChineseToGoose => Some(ScriptDirection::SimplifiedToTraditional),
            Direction::GooseToChinese => None,
        }
    }

    /// 字节往返之后的简繁转换
    pub fn post_normalization(&self) -> Option<ScriptDirection> {
        match self {
            Direction::ChineseToGoose => None,
            Direction::GooseToChinese => Some(ScriptDirection::TraditionalToSimplified),
        }
    }

    /// 反方向
    pub fn inverse(&self) -> Self {
        match self {
            Direction::ChineseToGoose => Direction::GooseToChinese,
            Direction::GooseToChinese => Direction::ChineseToGoose,
        }
    }

    /// 获取方向的显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            Direction::ChineseToGoose => "中文转鹅语",
            Direction::GooseToChinese => "鹅语转中文",
        }
    }
}

/// 迭代策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IterationPolicy {
    /// 只转一次
    #[default]
    SingleApply,
    /// 最多转 n 次，遇到不动点提前停止，输出全部过程
    RepeatCount(usize),
    /// 转到不动点为止，带迭代上限
    RepeatUntilFixedPoint(usize),
}

/// 逐次转换的过程记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    /// 每一阶的结果
    pub segments: Vec<String>,
    /// 是否因到达不动点而提前停止
    pub reached_fixed_point: bool,
}

impl Trace {
    /// 用分隔符拼接所有阶段
    pub fn render(&self, separator: &str) -> String {
        self.segments.join(separator)
    }

    /// 最后一阶的结果
    pub fn last(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }
}

/// 不动点迭代结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedPoint {
    /// 最终文本
    pub text: String,
    /// 实际执行的转换次数
    pub passes: usize,
    /// 是否在上限内收敛
    pub converged: bool,
}
