//! Goose - 鹅语转码引擎
//!
//! 用错配的旧式代码页重新解释中文，得到字形相近但错乱的“鹅语”，
//! 并提供近似还原的反向转换。
//!
//! ## 处理流程
//! 1. 简繁转换（中文转鹅语时先转繁体）
//! 2. 源代码页编码（EUC-JP / GBK）
//! 3. 错配代码页解码（GBK / EUC-JP）
//! 4. 与原文逐字合并（保护标点、回退替换标记）
//! 5. 迭代控制（多阶、不动点、加噪反转）

mod codepage;
mod iteration;
mod rules;
mod script;
mod transcoder;
mod types;

pub use codepage::{CodePage, EUC_JP_PAGE, GBK_PAGE};
pub use iteration::{
    noise_then_invert, repeat_with_trace, single, until_fixed_point, NOISE_PADDING, NOISE_PASSES,
    TRACE_SEPARATOR,
};
pub use rules::{ProtectedChars, PROTECTED_CHARS};
pub use script::{normalize, ScriptDirection};
pub use transcoder::transcode;
pub use types::{Direction, FixedPoint, IterationPolicy, Trace, MAX_LOOP_COUNT};
