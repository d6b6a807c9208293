//! 简繁转换
//!
//! 基于 OpenCC 词库的纯函数转换，简转繁后额外修正一个异体字

use lazy_static::lazy_static;
use opencc_fmmseg::OpenCC;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// OpenCC 转换器（加载词库较慢，全局只初始化一次）
    static ref CONVERTER: OpenCC = OpenCC::new();
}

/// 异体字修正：OpenCC 标准繁体使用“爲”，EUC-JP 中对应的常用字是“為”
const VARIANT_FIXUP: (char, char) = ('爲', '為');

/// 简繁转换方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptDirection {
    /// 简体 → 繁体
    SimplifiedToTraditional,
    /// 繁体 → 简体
    TraditionalToSimplified,
}

impl ScriptDirection {
    /// OpenCC 配置名
    fn opencc_config(&self) -> &'static str {
        match self {
            ScriptDirection::SimplifiedToTraditional => "s2t",
            ScriptDirection::TraditionalToSimplified => "t2s",
        }
    }
}

/// 简繁转换
///
/// 纯函数，不可失败
pub fn normalize(text: &str, direction: ScriptDirection) -> String {
    if text.is_empty() {
        return String::new();
    }

    let converted = CONVERTER.convert(text, direction.opencc_config(), false);

    match direction {
        ScriptDirection::SimplifiedToTraditional => {
            let (from, to) = VARIANT_FIXUP;
            converted.replace(from, &to.to_string())
        }
        ScriptDirection::TraditionalToSimplified => converted,
    }
}
