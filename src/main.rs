// 鹅语命令行工具
//
// 用法：goose <指令> [原文...]
// 未提供原文时从标准输入读取

use anyhow::Result;
use std::io::Read;

use goose_speak_lib::config::CONFIG_LOCK;
use goose_speak_lib::{
    init_logging, GooseCommand, GooseCommands, GooseConfig, KeywordScanService,
    PassThroughScanService, SensitiveScanService,
};

fn print_usage() {
    eprintln!("用法: goose <指令> [原文...]");
    for command in GooseCommand::ALL {
        eprintln!("  {:<8} {}", command.name(), command.description());
    }
}

async fn run<S: SensitiveScanService>(
    commands: GooseCommands<S>,
    command: GooseCommand,
    argument: &str,
) -> Result<()> {
    match commands.handle(command, Some(argument)).await? {
        Some(reply) => println!("{}", reply),
        None => tracing::info!("无回复"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = {
        let _guard = CONFIG_LOCK
            .lock()
            .map_err(|e| anyhow::anyhow!("配置锁已损坏: {}", e))?;
        GooseConfig::load()?
    };
    init_logging(config.tracing_level());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(name) = args.first() else {
        print_usage();
        anyhow::bail!("缺少指令");
    };

    let command: GooseCommand = match name.parse() {
        Ok(command) => command,
        Err(e) => {
            print_usage();
            return Err(e);
        }
    };

    let argument = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        input.trim_end_matches(['\r', '\n']).to_string()
    };

    if config.sensitive_words.is_empty() {
        let commands = GooseCommands::new(PassThroughScanService, config);
        run(commands, command, &argument).await
    } else {
        let service = KeywordScanService::new(config.sensitive_words.clone())?;
        let commands = GooseCommands::new(service, config);
        run(commands, command, &argument).await
    }
}
