use crate::error::AppError;
use crate::r#const::STDIO_PLACEHOLDER;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

// 输出格式
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Yaml,
    Json,
}

// Clash 配置改写工具
#[derive(Parser, Debug, Clone)]
#[command(
    name = "clash-overwrite",
    author,
    version,
    about = "A Clash/Mihomo profile overwriter\n\n\
             Key Features:\n\
             - Region Groups: Categorizes proxies by name into HK/TW/SG/JP/US/KR/DE and AI groups\n\
             - Selection Policies: Manual select, latency url-test and load-balance groups\n\
             - Routing Rules: Loyalsoldier rule-set providers with direct-domain shortcuts\n\
             - DNS: Split domestic/trusted DoH resolvers with fallback filtering\n\
             - Usability: Overridable YAML policy tables, configuration validation, YAML/JSON output"
)]
pub struct Args {
    // 输入配置文件，"-" 表示标准输入
    #[arg(
        short,
        long,
        default_value = STDIO_PLACEHOLDER,
        help = "Input profile (YAML or JSON), '-' reads from stdin"
    )]
    pub input: PathBuf,

    // 输出文件，缺省时写到标准输出
    #[arg(short, long, help = "Output file, defaults to stdout")]
    pub output: Option<PathBuf>,

    // 策略配置文件
    #[arg(
        short,
        long,
        help = "Policy file overriding the built-in regions, rules and DNS tables"
    )]
    pub config: Option<PathBuf>,

    // 输出格式
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,

    // 额外的自定义规则
    #[arg(
        short = 'r',
        long = "rule",
        action = ArgAction::Append,
        help = "Extra rule inserted after the direct-domain rules, may be repeated"
    )]
    pub rules: Vec<String>,

    // 测试配置
    #[arg(
        short = 't',
        long = "test",
        action = ArgAction::SetTrue,
        help = "Test policy file for validity and exit"
    )]
    pub test_config: bool,

    // 启用调试日志
    #[arg(
        short = 'd',
        long = "debug",
        action = ArgAction::SetTrue,
        help = "Enable debug level logging for detailed output"
    )]
    pub debug: bool,
}

impl Args {
    // 解析命令行参数
    pub fn parse_args() -> Self {
        Args::parse()
    }

    // 是否从标准输入读取
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == STDIO_PLACEHOLDER
    }

    // 验证参数
    pub fn validation(&self) -> Result<(), AppError> {
        if self.test_config && self.config.is_none() {
            return Err(AppError::InvalidArgument(
                "--test requires --config".to_string(),
            ));
        }

        if let Some(rule) = self.rules.iter().find(|r| r.trim().is_empty() || !r.contains(',')) {
            return Err(AppError::InvalidArgument(format!(
                "rule '{}' must be a comma separated Clash rule",
                rule
            )));
        }

        if let (Some(output), false) = (&self.output, self.reads_stdin()) {
            if output == &self.input {
                return Err(AppError::InvalidArgument(
                    "output must differ from input".to_string(),
                ));
            }
        }

        Ok(())
    }
}
