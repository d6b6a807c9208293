//! 鹅语转码器
//!
//! 简繁转换 → 源代码页编码 → 错配代码页解码 → 与原文逐字合并

use crate::goose::rules::PROTECTED_CHARS;
use crate::goose::script;
use crate::goose::types::Direction;

/// 单次转码
///
/// 纯函数，不可失败。合并长度以原文和解码结果中较短者为上限，
/// 超出部分直接丢弃。
pub fn transcode(text: &str, direction: Direction) -> String {
    if text.is_empty() {
        return String::new();
    }

    // 1. 字节往返前的简繁转换（仅中文转鹅语）
    let prepared = match direction.pre_normalization() {
        Some(script_direction) => script::normalize(text, script_direction),
        None => text.to_string(),
    };

    // 2. 源代码页编码，3. 错配代码页解码
    let bytes = direction.source_page().encode(&prepared);
    let decoded = direction.target_page().decode(&bytes);

    // 字节往返后的简繁转换（仅鹅语转中文）
    let glitched = match direction.post_normalization() {
        Some(script_direction) => script::normalize(&decoded, script_direction),
        None => decoded,
    };

    // 4. 合并
    let merged = merge(text, &glitched, direction.markers());

    tracing::trace!(
        "{}: 原文 {} 字, 解码 {} 字, 输出 {} 字",
        direction.display_name(),
        text.chars().count(),
        glitched.chars().count(),
        merged.chars().count()
    );

    merged
}

/// 逐字合并
///
/// 解码字符为替换标记，或原文字符为受保护标点时保留原文字符
fn merge(original: &str, glitched: &str, markers: &[char]) -> String {
    let mut result = String::with_capacity(glitched.len());

    for (original_char, glitched_char) in original.chars().zip(glitched.chars()) {
        if markers.contains(&glitched_char) || PROTECTED_CHARS.contains(original_char) {
            result.push(original_char);
        } else {
            result.push(glitched_char);
        }
    }

    result
}
