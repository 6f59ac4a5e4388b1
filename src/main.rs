use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use rideguard::{app::Application, shutdown::ShutdownManager};
use rideguard_config::{AppConfig, LogFormat};
use rideguard_domain::IncidentType;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();

    let config_path = global_arg(&matches, "config").map(String::as_str);
    let config = AppConfig::load(config_path).context("加载配置失败")?;

    let log_level = global_arg(&matches, "log-level")
        .cloned()
        .unwrap_or_else(|| config.observability.log_level.clone());
    let log_format = match global_arg(&matches, "log-format") {
        Some(raw) => raw.parse::<LogFormat>().map_err(anyhow::Error::msg)?,
        None => config.observability.log_format,
    };
    init_logging(&log_level, log_format)?;

    for warning in config.credential_warnings() {
        warn!("{}", warning);
    }

    match matches.subcommand() {
        Some(("trigger", sub)) => run_trigger(config, sub).await,
        _ => run_server(config).await,
    }
}

/// 全局参数既可写在子命令之前也可写在之后，子命令中的值优先
fn global_arg<'a>(matches: &'a ArgMatches, id: &str) -> Option<&'a String> {
    matches
        .subcommand()
        .and_then(|(_, sub)| sub.get_one::<String>(id))
        .or_else(|| matches.get_one::<String>(id))
}

fn cli() -> Command {
    Command::new("rideguard")
        .version(env!("CARGO_PKG_VERSION"))
        .about("RideGuard 紧急呼叫中继服务")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("配置文件路径")
                .global(true),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("日志级别，默认取配置文件")
                .value_parser(["trace", "debug", "info", "warn", "error"])
                .global(true),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .value_name("FORMAT")
                .help("日志格式，默认取配置文件")
                .value_parser(["json", "pretty"])
                .global(true),
        )
        .subcommand(Command::new("serve").about("启动HTTP服务（默认）"))
        .subcommand(
            Command::new("trigger")
                .about("读取事故数据并立即派发一次紧急呼叫")
                .arg(
                    Arg::new("incident-type")
                        .short('t')
                        .long("incident-type")
                        .value_name("TYPE")
                        .help("事故类型")
                        .default_value("medical_emergency"),
                ),
        )
}

async fn run_server(config: AppConfig) -> Result<()> {
    info!("启动 RideGuard 紧急呼叫中继服务");

    let app = Application::new(config);
    let shutdown = ShutdownManager::new();

    let mut app_handle = {
        let signal = shutdown.signal();
        tokio::spawn(async move { app.run(signal).await })
    };

    tokio::select! {
        _ = shutdown.listen_for_os_signals() => {
            info!("开始优雅关闭...");
        }
        result = &mut app_handle => {
            // 服务自行退出，例如端口绑定失败
            return result.context("应用任务异常终止")?;
        }
    }

    match tokio::time::timeout(Duration::from_secs(30), app_handle).await {
        Ok(Ok(Ok(()))) => info!("应用已优雅关闭"),
        Ok(Ok(Err(e))) => error!("应用运行失败: {e:#}"),
        Ok(Err(e)) => error!("应用关闭时发生错误: {e}"),
        Err(_) => warn!("应用关闭超时，强制退出"),
    }

    info!("RideGuard 已退出");
    Ok(())
}

async fn run_trigger(config: AppConfig, matches: &ArgMatches) -> Result<()> {
    let incident_type = matches
        .get_one::<String>("incident-type")
        .map(|raw| IncidentType::new(raw.as_str()))
        .unwrap_or_default();

    let app = Application::new(config);
    let response = match app.trigger(&incident_type).await {
        Ok(response) => response,
        Err(e) => {
            error!("{}", e.user_message());
            return Err(e).context("派发紧急呼叫失败");
        }
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&response).context("序列化派发结果失败")?
    );

    if !response.success {
        error!("所有呼叫服务商均失败");
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging(log_level: &str, log_format: LogFormat) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .context("初始化JSON日志格式失败")?,
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init()
            .context("初始化Pretty日志格式失败")?,
    }

    Ok(())
}
