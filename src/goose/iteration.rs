//! 迭代控制
//!
//! 在单次转码之上组合出多阶、不动点、加噪反转等策略

use crate::goose::transcoder::transcode;
use crate::goose::types::{Direction, FixedPoint, IterationPolicy, Trace};

/// 默认阶段分隔符
pub const TRACE_SEPARATOR: &str = "\r\n↓\r\n";

/// 加噪时追加的空格数
pub const NOISE_PADDING: usize = 10;

/// 加噪后反向转码的次数
pub const NOISE_PASSES: usize = 10;

/// 单次转码
pub fn single(text: &str, direction: Direction) -> String {
    transcode(text, direction)
}

/// 多阶鹅语（带提前停止）
///
/// 第一阶为一次正向转码，之后最多再转 `count - 1` 次；
/// 下一次转码不再改变结果时立即停止。
pub fn repeat_with_trace(text: &str, count: usize) -> Trace {
    let mut result = transcode(text, Direction::ChineseToGoose);
    let mut segments = vec![result.clone()];
    let mut reached_fixed_point = false;

    for _ in 1..count {
        let next = transcode(&result, Direction::ChineseToGoose);
        if next == result {
            reached_fixed_point = true;
            break;
        }
        segments.push(next.clone());
        result = next;
    }

    tracing::debug!(
        "多阶鹅语: 请求 {} 阶, 实际 {} 阶, 提前停止: {}",
        count,
        segments.len(),
        reached_fixed_point
    );

    Trace {
        segments,
        reached_fixed_point,
    }
}

/// 转到不动点
///
/// 最多转 `max_passes` 次，不收敛时返回最后一次结果
pub fn until_fixed_point(text: &str, direction: Direction, max_passes: usize) -> FixedPoint {
    let mut result = text.to_string();
    let mut passes = 0;

    while passes < max_passes {
        let next = transcode(&result, direction);
        if next == result {
            tracing::debug!("{}: {} 次后到达不动点", direction.display_name(), passes);
            return FixedPoint {
                text: result,
                passes,
                converged: true,
            };
        }
        result = next;
        passes += 1;
    }

    // 达到上限时再确认一次是否恰好收敛
    let converged = transcode(&result, direction) == result;
    if !converged {
        tracing::warn!(
            "{}: {} 次后仍未收敛，返回最后一次结果",
            direction.display_name(),
            max_passes
        );
    }

    FixedPoint {
        text: result,
        passes,
        converged,
    }
}

/// 加噪后反复反向转码
///
/// 追加 `padding` 个空格，再无条件反向转码 `passes` 次
pub fn noise_then_invert(text: &str, padding: usize, passes: usize) -> String {
    let mut result = String::with_capacity(text.len() + padding);
    result.push_str(text);
    result.extend(std::iter::repeat(' ').take(padding));

    for _ in 0..passes {
        result = transcode(&result, Direction::GooseToChinese);
    }

    result
}

impl IterationPolicy {
    /// 按策略执行，返回最终文本
    ///
    /// `RepeatCount` 仅用于正向，返回用默认分隔符拼接的全部过程
    pub fn apply(&self, text: &str, direction: Direction) -> String {
        match *self {
            IterationPolicy::SingleApply => single(text, direction),
            IterationPolicy::RepeatCount(count) => {
                repeat_with_trace(text, count).render(TRACE_SEPARATOR)
            }
            IterationPolicy::RepeatUntilFixedPoint(max_passes) => {
                until_fixed_point(text, direction, max_passes).text
            }
        }
    }
}
