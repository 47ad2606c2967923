use crate::r#const::dns_defaults;
use serde::{Deserialize, Serialize};
use url::Url;
use validator::{Validate, ValidationError};

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// 自定义验证函数 - 验证解析器列表均为合法 URL
fn validate_resolvers(dns: &DnsPolicyConfig) -> Result<(), ValidationError> {
    for server in dns.cn.iter().chain(dns.trust.iter()) {
        if Url::parse(server).is_err() {
            return Err(ValidationError::new("invalid_resolver_url"));
        }
    }
    Ok(())
}

// fallback-filter 配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FallbackFilterConfig {
    pub geoip: bool,
    pub geoip_code: String,
    pub geosite: Vec<String>,
    pub ipcidr: Vec<String>,
    pub domain: Vec<String>,
}

impl Default for FallbackFilterConfig {
    fn default() -> Self {
        Self {
            geoip: true,
            geoip_code: dns_defaults::FALLBACK_GEOIP_CODE.to_string(),
            geosite: to_strings(&dns_defaults::FALLBACK_GEOSITE),
            ipcidr: to_strings(&dns_defaults::FALLBACK_IPCIDR),
            domain: to_strings(&dns_defaults::FALLBACK_DOMAIN),
        }
    }
}

// DNS 策略配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Validate)]
#[validate(schema(
    function = "validate_resolvers",
    message = "DNS resolvers must be valid URLs"
))]
#[serde(default)]
pub struct DnsPolicyConfig {
    // 国内解析器
    #[validate(length(min = 1, message = "At least one domestic resolver is required"))]
    pub cn: Vec<String>,
    // 可信解析器
    #[validate(length(min = 1, message = "At least one trusted resolver is required"))]
    pub trust: Vec<String>,
    // fallback 过滤策略
    pub fallback_filter: FallbackFilterConfig,
}

impl Default for DnsPolicyConfig {
    fn default() -> Self {
        Self {
            cn: to_strings(&dns_defaults::CN),
            trust: to_strings(&dns_defaults::TRUST),
            fallback_filter: FallbackFilterConfig::default(),
        }
    }
}
