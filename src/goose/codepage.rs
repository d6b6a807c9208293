//! 旧式代码页
//!
//! 对 encoding_rs 的薄封装：不可表示的字符编码为替换字节 `?`，
//! 非法字节序列解码为替换字符 `?`，两个方向都不会失败。

use std::ops::RangeInclusive;

use encoding_rs::{Decoder, DecoderResult, Encoding, EUC_JP_INIT, GBK_INIT};

/// 默认替换字节
pub const SUBSTITUTION_BYTE: u8 = b'?';

/// 默认替换字符
pub const SUBSTITUTION_CHAR: char = '?';

/// 日文旧式代码页（EUC-JP，对应 Windows 代码页 51932）
pub static EUC_JP_PAGE: CodePage = CodePage::new("euc-jp", &EUC_JP_INIT);

/// 简体中文旧式代码页（GBK，对应 Windows 代码页 936）
pub static GBK_PAGE: CodePage = CodePage::new("gbk", &GBK_INIT);

/// 双字节前导字节范围
const LEAD_BYTES: RangeInclusive<u8> = 0x81..=0xFE;

/// 落在 ASCII 区间的尾字节范围（GBK 双字节的低位尾字节）
const ASCII_TRAIL_BYTES: RangeInclusive<u8> = 0x40..=0x7E;

/// 代码页（不可变）
#[derive(Debug)]
pub struct CodePage {
    name: &'static str,
    encoding: &'static Encoding,
    substitution: u8,
    marker: char,
}

impl CodePage {
    const fn new(name: &'static str, encoding: &'static Encoding) -> Self {
        Self {
            name,
            encoding,
            substitution: SUBSTITUTION_BYTE,
            marker: SUBSTITUTION_CHAR,
        }
    }

    /// 代码页名称
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 替换字符（解码失败时输出）
    pub fn substitution_char(&self) -> char {
        self.marker
    }

    /// 编码
    ///
    /// encoding_rs 默认把不可表示字符写成 `&#NNNN;`，这里逐字符编码，
    /// 遇到不可表示字符时改为写入替换字节。
    pub fn encode(&self, text: &str) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(text.len() * 2);
        let mut buf = [0u8; 4];

        for ch in text.chars() {
            let (encoded, _, had_errors) = self.encoding.encode(ch.encode_utf8(&mut buf));
            if had_errors {
                bytes.push(self.substitution);
            } else {
                bytes.extend_from_slice(&encoded);
            }
        }

        bytes
    }

    /// 解码
    ///
    /// 每个非法字节序列替换为一个替换字符。
    ///
    /// encoding_rs 遇到“前导字节 + ASCII 尾字节”时只丢弃前导字节，
    /// ASCII 字节会被单独解码出来；这里把尾字节一并吞掉，
    /// 保证一个双字节对只产出一个替换字符，解码结果与原文逐字对齐。
    pub fn decode(&self, bytes: &[u8]) -> String {
        let mut decoder = self.encoding.new_decoder_without_bom_handling();
        let mut out = String::with_capacity(Self::worst_case_len(&decoder, bytes.len()));
        let mut consumed = 0;

        loop {
            let (result, read) =
                decoder.decode_to_string_without_replacement(&bytes[consumed..], &mut out, true);
            consumed += read;

            match result {
                DecoderResult::InputEmpty => break,
                DecoderResult::Malformed(1, 0) if Self::orphaned_pair(bytes, consumed) => {
                    out.push(self.marker);
                    consumed += 1;
                }
                DecoderResult::Malformed(_, _) => out.push(self.marker),
                DecoderResult::OutputFull => {
                    let extra = Self::worst_case_len(&decoder, bytes.len() - consumed);
                    out.reserve(extra);
                }
            }
        }

        out
    }

    /// 刚被判为非法的单个前导字节后面紧跟 ASCII 尾字节
    fn orphaned_pair(bytes: &[u8], consumed: usize) -> bool {
        let lead = consumed.checked_sub(1).and_then(|i| bytes.get(i));
        let trail = bytes.get(consumed);

        match (lead, trail) {
            (Some(lead), Some(trail)) => {
                LEAD_BYTES.contains(lead) && ASCII_TRAIL_BYTES.contains(trail)
            }
            _ => false,
        }
    }

    fn worst_case_len(decoder: &Decoder, byte_len: usize) -> usize {
        decoder
            .max_utf8_buffer_length_without_replacement(byte_len)
            .unwrap_or(byte_len * 3)
            .max(4)
    }
}
