// 敏感词审核接口
//
// 转码结果在回复前必须经过外部审核服务：
// - scan: 批量扫描候选文本（引擎每次只传一条）
// - sanitize: 根据扫描结果清洗文本，返回 None 表示不回复
//
// 内置两个实现：
// - PassThroughScanService: 不做任何处理（测试/本地使用）
// - KeywordScanService: 基于 Aho-Corasick 的关键词屏蔽

use aho_corasick::{AhoCorasick, MatchKind};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// 命中的敏感词
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitiveHit {
    /// 命中的词
    pub word: String,
    /// 起始位置（字节索引）
    pub start: usize,
    /// 结束位置（字节索引，不含）
    pub end: usize,
}

/// 单条候选文本的扫描结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanEntry {
    pub hits: Vec<SensitiveHit>,
}

impl ScanEntry {
    /// 是否未命中任何敏感词
    pub fn is_clean(&self) -> bool {
        self.hits.is_empty()
    }
}

/// 敏感词审核服务
///
/// 由宿主在构造命令处理器时注入
#[async_trait]
pub trait SensitiveScanService: Send + Sync {
    /// 扫描候选文本，每条候选返回一个结果
    async fn scan(&self, candidates: &[String]) -> Result<Vec<ScanEntry>>;

    /// 按扫描结果清洗文本，None 表示屏蔽整条回复
    fn sanitize(&self, text: &str, entry: &ScanEntry) -> Option<String>;
}

/// 直通审核服务（不做任何处理）
#[derive(Debug, Clone, Default)]
pub struct PassThroughScanService;

#[async_trait]
impl SensitiveScanService for PassThroughScanService {
    async fn scan(&self, candidates: &[String]) -> Result<Vec<ScanEntry>> {
        Ok(candidates.iter().map(|_| ScanEntry::default()).collect())
    }

    fn sanitize(&self, text: &str, _entry: &ScanEntry) -> Option<String> {
        Some(text.to_string())
    }
}

/// 关键词屏蔽审核服务
///
/// 命中的每个字符替换为 `*`
pub struct KeywordScanService {
    matcher: AhoCorasick,
    words: Vec<String>,
    /// 全部被屏蔽时是否直接不回复
    suppress_fully_masked: bool,
}

impl KeywordScanService {
    /// 创建关键词审核服务
    ///
    /// # Arguments
    /// * `words` - 敏感词列表（空白词会被忽略）
    pub fn new(words: Vec<String>) -> Result<Self> {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(&words)?;

        tracing::info!("敏感词审核服务已加载 {} 个词", words.len());

        Ok(Self {
            matcher,
            words,
            suppress_fully_masked: true,
        })
    }

    /// 设置全部屏蔽时是否不回复
    pub fn with_suppress_fully_masked(mut self, suppress: bool) -> Self {
        self.suppress_fully_masked = suppress;
        self
    }

    fn scan_one(&self, text: &str) -> ScanEntry {
        let hits = self
            .matcher
            .find_iter(text)
            .map(|m| SensitiveHit {
                word: self.words[m.pattern().as_usize()].clone(),
                start: m.start(),
                end: m.end(),
            })
            .collect();

        ScanEntry { hits }
    }
}

#[async_trait]
impl SensitiveScanService for KeywordScanService {
    async fn scan(&self, candidates: &[String]) -> Result<Vec<ScanEntry>> {
        Ok(candidates.iter().map(|text| self.scan_one(text)).collect())
    }

    fn sanitize(&self, text: &str, entry: &ScanEntry) -> Option<String> {
        if entry.is_clean() {
            return Some(text.to_string());
        }

        let mut result = String::with_capacity(text.len());
        let mut last_end = 0;

        for hit in &entry.hits {
            // 扫描结果与文本不匹配时跳过该命中
            if hit.start < last_end
                || hit.end > text.len()
                || !text.is_char_boundary(hit.start)
                || !text.is_char_boundary(hit.end)
            {
                continue;
            }

            result.push_str(&text[last_end..hit.start]);
            let masked = text[hit.start..hit.end].chars().count();
            result.extend(std::iter::repeat('*').take(masked));
            last_end = hit.end;
        }
        result.push_str(&text[last_end..]);

        tracing::debug!("敏感词屏蔽: 命中 {} 处", entry.hits.len());

        let fully_masked = result.chars().all(|c| c == '*' || c.is_whitespace());
        if fully_masked && self.suppress_fully_masked {
            return None;
        }

        Some(result)
    }
}
