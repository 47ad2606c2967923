use crate::config::MatcherConfig;
use crate::error::ConfigError;
use regex::{Regex, RegexBuilder};
use std::fmt;

/// 节点名称匹配器
pub trait NameMatcher: Send + Sync {
    /// 判断节点名称是否属于该分类
    fn matches(&self, name: &str) -> bool;
}

// 闭包也可以直接作为匹配器使用
impl<F> NameMatcher for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn matches(&self, name: &str) -> bool {
        self(name)
    }
}

// 正则表达式匹配器
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl NameMatcher for RegexMatcher {
    #[inline]
    fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

impl fmt::Debug for RegexMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RegexMatcher").field(&self.as_str()).finish()
    }
}

// 关键词排除匹配器
// 名称中不包含任何排除关键词时视为匹配，用于把订阅信息行（剩余流量、到期时间等）
// 与真实节点区分开
pub struct KeywordExclusionMatcher {
    keywords: Vec<String>,
    // 所有关键词合并后的正则
    excluded: Regex,
}

impl KeywordExclusionMatcher {
    pub fn new<S: AsRef<str>>(keywords: &[S], case_insensitive: bool) -> Result<Self, ConfigError> {
        let keywords: Vec<String> = keywords
            .iter()
            .map(|k| k.as_ref().trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();

        if keywords.is_empty() {
            return Err(ConfigError::ValidationError(
                "keyword exclusion matcher requires at least one keyword".to_string(),
            ));
        }

        let alternation = keywords
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        let excluded = RegexBuilder::new(&alternation)
            .case_insensitive(case_insensitive)
            .build()?;

        Ok(Self { keywords, excluded })
    }
}

impl NameMatcher for KeywordExclusionMatcher {
    #[inline]
    fn matches(&self, name: &str) -> bool {
        !self.excluded.is_match(name)
    }
}

impl fmt::Debug for KeywordExclusionMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("KeywordExclusionMatcher")
            .field(&self.keywords)
            .finish()
    }
}

// 根据配置构建匹配器
pub fn build_matcher(config: &MatcherConfig) -> Result<Box<dyn NameMatcher>, ConfigError> {
    match config {
        MatcherConfig::Regex { pattern } => Ok(Box::new(RegexMatcher::new(pattern)?)),
        MatcherConfig::Exclude {
            keywords,
            case_insensitive,
        } => Ok(Box::new(KeywordExclusionMatcher::new(
            keywords.as_slice(),
            *case_insensitive,
        )?)),
    }
}
