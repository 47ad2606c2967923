use crate::r#const::{group_names, icon_defaults, region_defaults};
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// 默认大小写不敏感
fn default_case_insensitive() -> bool {
    true
}

// 节点名称匹配方式
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MatcherConfig {
    // 正则表达式匹配（区分大小写）
    Regex { pattern: String },
    // 关键词排除：名称不包含任何关键词时匹配
    Exclude {
        keywords: Vec<String>,
        #[serde(default = "default_case_insensitive")]
        case_insensitive: bool,
    },
}

// 自定义验证函数 - 验证匹配器可以被构建
fn validate_region_matcher(region: &RegionConfig) -> Result<(), ValidationError> {
    match &region.matcher {
        MatcherConfig::Regex { pattern } => {
            if pattern.is_empty() {
                return Err(ValidationError::new("empty_region_pattern"));
            }
            if Regex::new(pattern).is_err() {
                return Err(ValidationError::new("invalid_region_pattern"));
            }
        }
        MatcherConfig::Exclude { keywords, .. } => {
            if keywords.iter().all(|k| k.trim().is_empty()) {
                return Err(ValidationError::new("empty_exclusion_keywords"));
            }
        }
    }
    Ok(())
}

// 区域分类配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Validate)]
#[validate(schema(
    function = "validate_region_matcher",
    message = "Region matcher must be a valid regex or a non-empty keyword list"
))]
pub struct RegionConfig {
    // 区域代码，例如 HK、US
    #[validate(length(min = 1, message = "Region code cannot be empty"))]
    pub code: String,
    // 节点名称匹配方式
    pub matcher: MatcherConfig,
    // 是否额外生成手工选择组
    #[serde(default)]
    pub manual: bool,
    // 手工选择组图标（可选）
    #[serde(default)]
    pub icon: Option<String>,
}

impl RegionConfig {
    // 正则区域
    pub fn regex(code: &str, pattern: &str) -> Self {
        Self {
            code: code.to_string(),
            matcher: MatcherConfig::Regex {
                pattern: pattern.to_string(),
            },
            manual: false,
            icon: None,
        }
    }

    // 自动选择组名称，例如 HK-自动选择
    pub fn auto_group_name(&self) -> String {
        format!("{}{}", self.code, group_names::AUTO_SUFFIX)
    }

    // 手工选择组名称，例如 AI-手工选择
    pub fn manual_group_name(&self) -> String {
        format!("{}{}", self.code, group_names::MANUAL_SUFFIX)
    }
}

// 内置区域表：七个地区加上兜底的 AI 分类
pub fn default_regions() -> Vec<RegionConfig> {
    let mut regions: Vec<RegionConfig> = region_defaults::PATTERNS
        .iter()
        .map(|(code, pattern)| RegionConfig::regex(code, pattern))
        .collect();

    regions.push(RegionConfig {
        code: region_defaults::CATCH_ALL_CODE.to_string(),
        matcher: MatcherConfig::Exclude {
            keywords: region_defaults::EXCLUDED_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            case_insensitive: true,
        },
        manual: true,
        icon: Some(icon_defaults::url("chatgpt")),
    });

    regions
}
