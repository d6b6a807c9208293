//! 鹅语规则定义
//!
//! 包含受保护标点集合、各方向的替换标记

use std::collections::HashSet;

use lazy_static::lazy_static;

lazy_static! {
    /// 全局受保护标点集合（只读）
    pub static ref PROTECTED_CHARS: ProtectedChars = ProtectedChars::new();
}

/// 受保护标点
///
/// 这些全角标点永远保留原字符，保证句子结构可读
pub struct ProtectedChars {
    chars: HashSet<char>,
}

impl ProtectedChars {
    pub fn new() -> Self {
        let chars: HashSet<char> = [
            '，', '《', '》', '！', '？', '“', '”', '：', '；', '‘', '’', '【', '】', '…', '（',
            '）',
        ]
        .into_iter()
        .collect();

        Self { chars }
    }

    /// 是否为受保护标点
    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    /// 获取所有受保护标点
    pub fn all(&self) -> &HashSet<char> {
        &self.chars
    }
}

impl Default for ProtectedChars {
    fn default() -> Self {
        Self::new()
    }
}

/// 中文转鹅语时的替换标记
pub const FORWARD_MARKERS: &[char] = &['?'];

/// 鹅语转中文时的替换标记
///
/// `・` 是 EUC-JP 解出无意义字节对时常见的中点
pub const INVERSE_MARKERS: &[char] = &['・', '?'];
