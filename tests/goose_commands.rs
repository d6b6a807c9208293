// 鹅语指令端到端测试

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use goose_speak_lib::goose::{self, Direction, MAX_LOOP_COUNT, PROTECTED_CHARS};
use goose_speak_lib::{
    parse_command_line, GooseCommand, GooseCommands, GooseConfig, PassThroughScanService,
    ScanEntry, SensitiveScanService,
};

/// 记录每次扫描候选数量的审核服务
#[derive(Default, Clone)]
struct RecordingScanService {
    batches: Arc<Mutex<Vec<Vec<String>>>>,
}

#[async_trait]
impl SensitiveScanService for RecordingScanService {
    async fn scan(&self, candidates: &[String]) -> Result<Vec<ScanEntry>> {
        self.batches.lock().unwrap().push(candidates.to_vec());
        Ok(candidates.iter().map(|_| ScanEntry::default()).collect())
    }

    fn sanitize(&self, text: &str, _entry: &ScanEntry) -> Option<String> {
        Some(text.to_string())
    }
}

/// 扫描失败的审核服务
struct FailingScanService;

#[async_trait]
impl SensitiveScanService for FailingScanService {
    async fn scan(&self, _candidates: &[String]) -> Result<Vec<ScanEntry>> {
        anyhow::bail!("审核服务不可用")
    }

    fn sanitize(&self, text: &str, _entry: &ScanEntry) -> Option<String> {
        Some(text.to_string())
    }
}

/// 扫描结果为空列表的审核服务
struct EmptyScanService;

#[async_trait]
impl SensitiveScanService for EmptyScanService {
    async fn scan(&self, _candidates: &[String]) -> Result<Vec<ScanEntry>> {
        Ok(Vec::new())
    }

    fn sanitize(&self, text: &str, _entry: &ScanEntry) -> Option<String> {
        Some(text.to_string())
    }
}

#[tokio::test]
async fn test_goose_input_output() {
    let commands = GooseCommands::new(PassThroughScanService, GooseConfig::default());
    let (command, argument) = parse_command_line("/goose 以一星期为一期").unwrap();
    let reply = commands.handle(command, argument).await.unwrap();
    assert_eq!(reply.as_deref(), Some("笆办辣袋百办袋"));
}

#[tokio::test]
async fn test_goose_empty_no_reply() {
    let service = RecordingScanService::default();
    let batches = service.batches.clone();
    let commands = GooseCommands::new(service, GooseConfig::default());
    let reply = commands.handle(GooseCommand::Goose, Some("")).await.unwrap();
    assert_eq!(reply, None);
    // 参数为空时不调用审核服务
    assert!(batches.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_scan_called_with_single_candidate() {
    let service = RecordingScanService::default();
    let batches = service.batches.clone();
    let commands = GooseCommands::new(service, GooseConfig::default());

    for command in GooseCommand::ALL {
        commands.handle(command, Some("测试文本")).await.unwrap();
    }

    let batches = batches.lock().unwrap();
    assert_eq!(batches.len(), GooseCommand::ALL.len());
    assert!(batches.iter().all(|batch| batch.len() == 1));
}

#[tokio::test]
async fn test_scan_error_propagates() {
    let commands = GooseCommands::new(FailingScanService, GooseConfig::default());
    let result = commands.handle(GooseCommand::Goose, Some("测试")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_missing_entry_treated_as_clean() {
    let commands = GooseCommands::new(EmptyScanService, GooseConfig::default());
    let reply = commands
        .handle(GooseCommand::Goose, Some("以一星期为一期"))
        .await
        .unwrap();
    assert_eq!(reply.as_deref(), Some("笆办辣袋百办袋"));
}

#[tokio::test]
async fn test_goose_trace_reply() {
    let mut config = GooseConfig::default();
    config.trace_separator = " | ".to_string();
    let commands = GooseCommands::new(PassThroughScanService, config);

    let reply = commands
        .handle(GooseCommand::Goose, Some("2 以一星期为一期"))
        .await
        .unwrap()
        .unwrap();
    let trace = goose::repeat_with_trace("以一星期为一期", 2);
    assert_eq!(reply, trace.render(" | "));
    assert!(reply.starts_with("笆办辣袋百办袋"));
}

#[tokio::test]
async fn test_goose3_matches_fixed_point() {
    let commands = GooseCommands::new(PassThroughScanService, GooseConfig::default());
    let reply = commands
        .handle(GooseCommand::Goose3, Some("以一星期为一期"))
        .await
        .unwrap();
    let fixed = goose::until_fixed_point("以一星期为一期", Direction::ChineseToGoose, MAX_LOOP_COUNT);
    assert_eq!(reply, Some(fixed.text));
}

#[tokio::test]
async fn test_goose5_distinct_from_goose2() {
    let commands = GooseCommands::new(PassThroughScanService, GooseConfig::default());
    let noisy = commands.handle(GooseCommand::Goose5, Some("测试")).await.unwrap();
    let inverse = commands.handle(GooseCommand::Goose2, Some("测试")).await.unwrap();
    assert_ne!(noisy, inverse);
}

#[test]
fn test_protected_chars_survive_both_directions() {
    let text = "，《》！？“”：；‘’【】…（）";
    for direction in [Direction::ChineseToGoose, Direction::GooseToChinese] {
        let output = goose::transcode(text, direction);
        for (original, produced) in text.chars().zip(output.chars()) {
            assert!(PROTECTED_CHARS.contains(original));
            assert_eq!(original, produced, "{:?}", direction);
        }
    }
}
