//! # 邮件签名工具 — 命令行入口
//!
//! 本文件仅负责日志初始化与参数解析。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

mod cli;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("❌ {}", err);
            ExitCode::FAILURE
        }
    }
}
