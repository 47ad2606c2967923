use crate::r#const::{geox_defaults, health_check_defaults, health_check_limits, icon_defaults};
use serde::{Deserialize, Serialize};
use url::Url;
use validator::{Validate, ValidationError};

// 自定义验证函数 - 验证测速地址
fn validate_health_check_url(health: &HealthCheckConfig) -> Result<(), ValidationError> {
    match Url::parse(&health.url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(()),
        _ => Err(ValidationError::new("invalid_health_check_url")),
    }
}

// 健康检查配置（url-test / load-balance 组共用）
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Validate)]
#[validate(schema(
    function = "validate_health_check_url",
    message = "Health check url must be a valid http(s) URL"
))]
#[serde(default)]
pub struct HealthCheckConfig {
    // 测速地址
    pub url: String,
    // 测速间隔（秒）
    #[validate(range(
        min = health_check_limits::MIN_INTERVAL,
        max = health_check_limits::MAX_INTERVAL,
        message = "Health check interval out of range"
    ))]
    pub interval: u32,
    // 容差（毫秒）
    #[validate(range(
        max = health_check_limits::MAX_TOLERANCE,
        message = "Health check tolerance out of range"
    ))]
    pub tolerance: u32,
    // 负载均衡组最大失败次数
    #[validate(range(
        min = health_check_limits::MIN_MAX_FAILED_TIMES,
        max = health_check_limits::MAX_MAX_FAILED_TIMES,
        message = "Health check max_failed_times out of range"
    ))]
    pub max_failed_times: u32,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            url: health_check_defaults::DEFAULT_URL.to_string(),
            interval: health_check_limits::DEFAULT_INTERVAL,
            tolerance: health_check_limits::DEFAULT_TOLERANCE,
            max_failed_times: health_check_limits::DEFAULT_MAX_FAILED_TIMES,
        }
    }
}

// 自定义验证函数 - 验证 GeoX 地址
fn validate_geox(geox: &GeoxConfig) -> Result<(), ValidationError> {
    let urls = [&geox.geoip, &geox.geosite, &geox.mmdb];
    if urls.iter().any(|u| Url::parse(u).is_err()) {
        return Err(ValidationError::new("invalid_geox_url"));
    }
    if let Some(accelerator) = &geox.accelerator {
        if !accelerator.is_empty() && Url::parse(accelerator).is_err() {
            return Err(ValidationError::new("invalid_geox_accelerator"));
        }
    }
    Ok(())
}

// GeoX 数据库地址配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Validate)]
#[validate(schema(
    function = "validate_geox",
    message = "GeoX urls and accelerator must be valid URLs"
))]
#[serde(default)]
pub struct GeoxConfig {
    pub geoip: String,
    pub geosite: String,
    pub mmdb: String,
    // 加速前缀（可选），直接拼接在原地址之前
    pub accelerator: Option<String>,
}

impl GeoxConfig {
    // 加速后的地址
    pub fn accelerated(&self, url: &str) -> String {
        match self.accelerator.as_deref() {
            Some(prefix) if !prefix.is_empty() => format!("{}{}", prefix, url),
            _ => url.to_string(),
        }
    }
}

impl Default for GeoxConfig {
    fn default() -> Self {
        Self {
            geoip: geox_defaults::GEOIP.to_string(),
            geosite: geox_defaults::GEOSITE.to_string(),
            mmdb: geox_defaults::MMDB.to_string(),
            accelerator: Some(geox_defaults::ACCELERATOR.to_string()),
        }
    }
}

// 代理组图标配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct IconConfig {
    pub proxy: String,
    pub manual: String,
    pub auto: String,
    pub load_balance_hash: String,
    pub load_balance_round: String,
    pub chatgpt: String,
    pub claude: String,
    pub gemini: String,
    pub fish: String,
    pub block: String,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            proxy: icon_defaults::url("adjust"),
            manual: icon_defaults::url("link"),
            auto: icon_defaults::url("speed"),
            load_balance_hash: icon_defaults::url("balance"),
            load_balance_round: icon_defaults::url("merry_go"),
            chatgpt: icon_defaults::url("chatgpt"),
            claude: icon_defaults::url("claude"),
            gemini: icon_defaults::url("google"),
            fish: icon_defaults::url("fish"),
            block: icon_defaults::url("block"),
        }
    }
}
