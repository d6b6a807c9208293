// src/config.rs

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::goose::{MAX_LOOP_COUNT, NOISE_PADDING, NOISE_PASSES, TRACE_SEPARATOR};

// ============================================================================
// 全局配置操作锁
// ============================================================================

lazy_static::lazy_static! {
    /// 全局配置操作锁
    ///
    /// 保护所有 config 的读写操作，首次运行时防止并发写出默认配置
    ///
    /// 使用方式：
    /// ```ignore
    /// let _guard = CONFIG_LOCK.lock().unwrap();
    /// let config = GooseConfig::load()?;
    /// ```
    pub static ref CONFIG_LOCK: Mutex<()> = Mutex::new(());
}

// ============================================================================
// 鹅语配置
// ============================================================================

/// 鹅语配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GooseConfig {
    /// 不动点迭代上限
    #[serde(default = "default_max_loop_count")]
    pub max_loop_count: usize,
    /// 乱码鹅语追加的空格数
    #[serde(default = "default_noise_padding")]
    pub noise_padding: usize,
    /// 乱码鹅语反向转码次数
    #[serde(default = "default_noise_passes")]
    pub noise_passes: usize,
    /// 多阶鹅语的阶段分隔符
    #[serde(default = "default_trace_separator")]
    pub trace_separator: String,
    /// 日志级别（trace/debug/info/warn/error）
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 本地敏感词（为空时不做屏蔽）
    #[serde(default)]
    pub sensitive_words: Vec<String>,
}

fn default_max_loop_count() -> usize {
    MAX_LOOP_COUNT
}

fn default_noise_padding() -> usize {
    NOISE_PADDING
}

fn default_noise_passes() -> usize {
    NOISE_PASSES
}

fn default_trace_separator() -> String {
    TRACE_SEPARATOR.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GooseConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GooseConfig {
    pub fn new() -> Self {
        Self {
            max_loop_count: default_max_loop_count(),
            noise_padding: default_noise_padding(),
            noise_passes: default_noise_passes(),
            trace_separator: default_trace_separator(),
            log_level: default_log_level(),
            sensitive_words: Vec::new(),
        }
    }

    /// 解析日志级别，无法识别时回退到 INFO
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level
            .trim()
            .parse()
            .unwrap_or(tracing::Level::INFO)
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| anyhow::anyhow!("无法获取配置目录"))?;
        let app_dir = config_dir.join("Goose");
        std::fs::create_dir_all(&app_dir)?;
        Ok(app_dir.join("config.json"))
    }

    /// 从默认路径加载配置
    ///
    /// 首次运行时写出一份默认配置，便于用户直接编辑
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_or_init(&path)
    }

    /// 从指定路径加载配置，文件不存在时返回默认配置
    pub fn load_from(path: &Path) -> Result<Self> {
        tracing::info!("尝试从以下路径加载配置: {:?}", path);

        if !path.exists() {
            tracing::info!("配置文件不存在，使用默认配置");
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path)?;
        let config: GooseConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 加载配置，文件不存在时写出默认配置再返回
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load_from(path);
        }

        let config = Self::new();
        config.save_to(path)?;
        Ok(config)
    }

    /// 保存到指定路径
    ///
    /// 先写同目录临时文件再 rename，读者不会看到写了一半的配置
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        let temp_path = path.with_extension("json.tmp");

        std::fs::write(&temp_path, &content).map_err(|e| {
            tracing::error!("写入临时配置失败: {}", e);
            e
        })?;
        std::fs::rename(&temp_path, path)?;

        tracing::info!("已写出配置: {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GooseConfig::default();
        assert_eq!(config.max_loop_count, 1000);
        assert_eq!(config.noise_padding, 10);
        assert_eq!(config.noise_passes, 10);
        assert_eq!(config.trace_separator, "\r\n↓\r\n");
        assert!(config.sensitive_words.is_empty());
        assert_eq!(config.tracing_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GooseConfig = serde_json::from_str(r#"{"noise_passes": 3}"#).unwrap();
        assert_eq!(config.noise_passes, 3);
        assert_eq!(config.max_loop_count, 1000);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_tracing_level_fallback() {
        let mut config = GooseConfig::new();
        config.log_level = "debug".to_string();
        assert_eq!(config.tracing_level(), tracing::Level::DEBUG);
        config.log_level = "nonsense".to_string();
        assert_eq!(config.tracing_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let missing = GooseConfig::load_from(&path).unwrap();
        assert_eq!(missing, GooseConfig::new());

        let mut config = GooseConfig::new();
        config.max_loop_count = 42;
        config.sensitive_words = vec!["坏话".to_string()];
        config.save_to(&path).unwrap();

        // 覆盖保存
        config.noise_padding = 4;
        config.save_to(&path).unwrap();

        let loaded = GooseConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_load_or_init_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = GooseConfig::load_or_init(&path).unwrap();
        assert_eq!(config, GooseConfig::new());
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let written: GooseConfig =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, GooseConfig::new());
    }

    #[test]
    fn test_load_or_init_keeps_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"noise_passes": 3, "log_level": "debug"}"#).unwrap();

        let config = GooseConfig::load_or_init(&path).unwrap();
        assert_eq!(config.noise_passes, 3);
        assert_eq!(config.tracing_level(), tracing::Level::DEBUG);
        // 已有文件不被改写
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            r#"{"noise_passes": 3, "log_level": "debug"}"#
        );
    }
}
