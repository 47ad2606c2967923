use crate::error::ConfigError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs, path::Path};
use tracing::debug;
use validator::{Validate, ValidationError, ValidationErrors};

pub mod common;
pub mod dns;
pub mod region;
pub mod rule;

pub use common::*;
pub use dns::*;
pub use region::*;
pub use rule::*;

// 配置结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;

// 内置策略表，进程内只初始化一次
pub static DEFAULT_CONFIG: Lazy<Config> = Lazy::new(Config::default);

// 自定义验证函数 - 验证区域代码唯一性
pub fn validate_unique_region_codes(config: &Config) -> Result<(), ValidationError> {
    let mut codes = HashSet::with_capacity(config.regions.len());
    for region in &config.regions {
        if !codes.insert(region.code.as_str()) {
            return Err(ValidationError::new("duplicate_region_code"));
        }
    }
    Ok(())
}

// 自定义验证函数 - 验证规则集名称唯一性
pub fn validate_unique_provider_names(config: &Config) -> Result<(), ValidationError> {
    let mut names = HashSet::with_capacity(config.rule_providers.len());
    for provider in &config.rule_providers {
        if !names.insert(provider.name.as_str()) {
            return Err(ValidationError::new("duplicate_rule_provider_name"));
        }
    }
    Ok(())
}

// 自定义验证函数 - 验证规则非空
pub fn validate_rules_not_blank(config: &Config) -> Result<(), ValidationError> {
    let blank = config
        .rules
        .iter()
        .chain(config.direct_domains.iter())
        .any(|r| r.trim().is_empty());
    if blank {
        return Err(ValidationError::new("blank_rule_entry"));
    }
    Ok(())
}

// 策略配置
//
// 所有字段都可省略，省略时使用内置表
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Validate)]
#[validate(schema(
    function = "validate_unique_region_codes",
    message = "Region codes must be unique"
))]
#[validate(schema(
    function = "validate_unique_provider_names",
    message = "Rule provider names must be unique"
))]
#[validate(schema(
    function = "validate_rules_not_blank",
    message = "Rules and direct domains cannot contain blank entries"
))]
#[serde(default)]
pub struct Config {
    // 区域分类
    #[validate(length(min = 1, message = "At least one region is required"), nested)]
    pub regions: Vec<RegionConfig>,
    // 直连域名
    pub direct_domains: Vec<String>,
    // 分流规则
    pub rules: Vec<String>,
    // 规则集
    #[validate(nested)]
    pub rule_providers: Vec<RuleProviderConfig>,
    // 规则集来源
    #[validate(nested)]
    pub rule_provider_source: RuleProviderSourceConfig,
    // 健康检查
    #[validate(nested)]
    pub health_check: HealthCheckConfig,
    // DNS 策略
    #[validate(nested)]
    pub dns: DnsPolicyConfig,
    // GeoX 地址
    #[validate(nested)]
    pub geox: GeoxConfig,
    // 图标
    pub icons: IconConfig,
}

impl Config {
    // 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        debug!("Loading configuration file: {:?}", path.as_ref());
        let content = fs::read_to_string(path).map_err(ConfigError::LoadError)?;
        Self::from_yaml(&content)
    }

    // 从 YAML 文本加载配置
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    // 验证配置有效性
    pub fn validate(&self) -> ConfigResult<()> {
        if let Err(errors) = Validate::validate(self) {
            return Err(ConfigError::ValidationError(format_validation_errors(
                &errors,
            )));
        }
        Ok(())
    }

    // 按名称查找区域
    pub fn region(&self, code: &str) -> Option<&RegionConfig> {
        self.regions.iter().find(|r| r.code == code)
    }
}

// 将 ValidationErrors 转换为友好的错误信息
fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();

    for (field, error_kind) in errors.errors() {
        match error_kind {
            validator::ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    messages.push(format!("Field '{}': {}", field, message));
                }
            }
            validator::ValidationErrorsKind::Struct(struct_errors) => {
                messages.push(format!(
                    "Section '{}': {}",
                    field,
                    format_validation_errors(struct_errors)
                ));
            }
            validator::ValidationErrorsKind::List(list_errors) => {
                for (index, err) in list_errors {
                    messages.push(format!(
                        "List '{}' at index {}: {}",
                        field,
                        index,
                        format_validation_errors(err)
                    ));
                }
            }
        }
    }

    if messages.is_empty() {
        "Unknown validation error".to_string()
    } else {
        messages.join("\n")
    }
}

// 默认配置实现
impl Default for Config {
    fn default() -> Self {
        Config {
            regions: default_regions(),
            direct_domains: default_direct_domains(),
            rules: default_rules(),
            rule_providers: default_rule_providers(),
            rule_provider_source: RuleProviderSourceConfig::default(),
            health_check: HealthCheckConfig::default(),
            dns: DnsPolicyConfig::default(),
            geox: GeoxConfig::default(),
            icons: IconConfig::default(),
        }
    }
}
