use clash_overwrite::{
    args::OutputFormat, config::DEFAULT_CONFIG, AppError, Args, Config, Overwriter, Profile,
};
use mimalloc::MiMalloc;
use std::fs;
use std::io::{self, Read, Write};
use std::process;
use tracing::{error, info};

// 使用 mimalloc 分配器提高内存效率
#[global_allocator]
static GLOBAL: MiMalloc = mimalloc::MiMalloc;

fn init_logging(args: &Args) {
    // 日志写到标准错误，标准输出留给生成的配置
    let builder = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_line_number(false)
        .with_writer(io::stderr);

    // 如果启用调试模式，输出调试信息，否则只输出 info 及以上级别
    if args.debug {
        builder.with_max_level(tracing::Level::DEBUG)
    } else {
        builder.with_max_level(tracing::Level::INFO)
    }
    .init();
}

// 程序入口
fn main() {
    // 解析命令行参数
    let args = Args::parse_args();

    // 初始化日志
    init_logging(&args);

    // 验证参数
    if let Err(e) = args.validation() {
        error!("Invalid command line arguments: {}", e);
        process::exit(1);
    }

    // 加载策略配置
    let config = match &args.config {
        Some(path) => match Config::from_file(path) {
            Ok(config) => {
                info!("Successfully loaded configuration: {:?}", path);
                config
            }
            Err(e) => {
                error!("Failed to load configuration file: {}", e);
                process::exit(1);
            }
        },
        None => DEFAULT_CONFIG.clone(),
    };

    // 如果是测试模式，成功验证配置后退出
    if args.test_config {
        info!("Configuration file validation successful");
        return;
    }

    if let Err(e) = run(&args, &config) {
        error!("Failed to overwrite profile: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args, config: &Config) -> Result<(), AppError> {
    let overwriter = Overwriter::new(config)?;

    let profile = Profile::from_yaml_str(&read_input(args)?)?;
    let output = overwriter.apply_with_rules(&profile, &args.rules);

    let rendered = match args.format {
        OutputFormat::Yaml => output.to_yaml_string()?,
        OutputFormat::Json => output.to_json_string()?,
    };

    write_output(args, &rendered)
}

// 读取输入配置
fn read_input(args: &Args) -> Result<String, AppError> {
    if args.reads_stdin() {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content)?;
        Ok(content)
    } else {
        info!("Reading profile: {:?}", args.input);
        Ok(fs::read_to_string(&args.input)?)
    }
}

// 写出改写后的配置
fn write_output(args: &Args, rendered: &str) -> Result<(), AppError> {
    match &args.output {
        Some(path) => {
            fs::write(path, rendered)?;
            info!("Profile written to {:?}", path);
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
        }
    }
    Ok(())
}
