use crate::r#const::{group_names, rule_defaults, rule_provider_defaults, rule_provider_limits};
use serde::{Deserialize, Serialize};
use url::Url;
use validator::{Validate, ValidationError};

// 规则集匹配行为
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RuleBehavior {
    // 域名列表
    Domain,
    // IP 段列表
    Ipcidr,
    // 经典规则
    Classical,
}

// 规则提供者配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Validate)]
pub struct RuleProviderConfig {
    // 规则集名称（在 RULE-SET 规则中引用）
    #[validate(length(min = 1, message = "Rule provider name cannot be empty"))]
    pub name: String,
    // 匹配行为
    pub behavior: RuleBehavior,
    // 文件名（不含扩展名）
    #[validate(length(min = 1, message = "Rule provider file cannot be empty"))]
    pub file: String,
}

// 自定义验证函数 - 验证规则集下载地址
fn validate_provider_source(source: &RuleProviderSourceConfig) -> Result<(), ValidationError> {
    match Url::parse(&source.base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(()),
        _ => Err(ValidationError::new("invalid_rule_provider_base_url")),
    }
}

// 规则集来源配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Validate)]
#[validate(schema(
    function = "validate_provider_source",
    message = "Rule provider base_url must be a valid http(s) URL"
))]
#[serde(default)]
pub struct RuleProviderSourceConfig {
    // 下载地址前缀
    pub base_url: String,
    // 本地存储目录
    #[validate(length(min = 1, message = "Rule provider path_prefix cannot be empty"))]
    pub path_prefix: String,
    // 更新间隔（秒）
    #[validate(range(
        min = rule_provider_limits::MIN_INTERVAL,
        max = rule_provider_limits::MAX_INTERVAL,
        message = "Rule provider interval out of range"
    ))]
    pub interval: u32,
    // 是否延迟加载
    pub lazy: bool,
}

impl RuleProviderSourceConfig {
    // 远程规则集地址
    pub fn url_for(&self, file: &str) -> String {
        format!(
            "{}/{}.{}",
            self.base_url.trim_end_matches('/'),
            file,
            rule_provider_defaults::REMOTE_EXTENSION
        )
    }

    // 本地缓存路径
    pub fn path_for(&self, file: &str) -> String {
        format!(
            "{}/{}.{}",
            self.path_prefix.trim_end_matches('/'),
            file,
            rule_provider_defaults::LOCAL_EXTENSION
        )
    }
}

impl Default for RuleProviderSourceConfig {
    fn default() -> Self {
        Self {
            base_url: rule_provider_defaults::DEFAULT_BASE_URL.to_string(),
            path_prefix: rule_provider_defaults::DEFAULT_PATH_PREFIX.to_string(),
            interval: rule_provider_limits::DEFAULT_INTERVAL,
            lazy: true,
        }
    }
}

// 内置规则集表
pub fn default_rule_providers() -> Vec<RuleProviderConfig> {
    rule_defaults::PROVIDERS
        .iter()
        .map(|(name, behavior, file)| RuleProviderConfig {
            name: name.to_string(),
            behavior: *behavior,
            file: file.to_string(),
        })
        .collect()
}

// 内置直连域名
pub fn default_direct_domains() -> Vec<String> {
    rule_defaults::DIRECT_DOMAINS
        .iter()
        .map(|d| d.to_string())
        .collect()
}

// 内置分流规则表
pub fn default_rules() -> Vec<String> {
    let proxy = group_names::PROXY_MODE;
    let direct = group_names::DIRECT;
    vec![
        format!("RULE-SET,reject,{}", group_names::AD_BLOCK),
        format!("RULE-SET,direct,{}", direct),
        format!("RULE-SET,cncidr,{}", direct),
        format!("RULE-SET,private,{}", direct),
        format!("RULE-SET,lancidr,{}", direct),
        format!("GEOIP,LAN,{},no-resolve", direct),
        format!("GEOIP,CN,{},no-resolve", direct),
        format!("RULE-SET,applications,{}", direct),
        format!("RULE-SET,tld-not-cn,{}", proxy),
        format!("RULE-SET,google,{}", proxy),
        format!("RULE-SET,icloud,{}", proxy),
        format!("RULE-SET,apple,{}", proxy),
        format!("RULE-SET,gfw,{}", proxy),
        format!("RULE-SET,greatfire,{}", proxy),
        format!("RULE-SET,telegramcidr,{}", proxy),
        format!("RULE-SET,proxy,{}", proxy),
        format!("MATCH,{}", group_names::FINAL),
    ]
}
