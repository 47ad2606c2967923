use crate::categorizer::{categorize, matching_names};
use crate::config::{Config, HealthCheckConfig, RegionConfig};
use crate::error::ConfigError;
use crate::matcher::{build_matcher, NameMatcher};
use crate::profile::ProxyDescriptor;
use crate::r#const::{group_names, region_defaults};
use serde::{Deserialize, Serialize};
use tracing::debug;

// 代理组类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum GroupType {
    // 手动选择
    Select,
    // 延迟测速自动选择
    UrlTest,
    // 负载均衡
    LoadBalance,
}

// 负载均衡策略
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LoadBalanceStrategy {
    // 一致性散列
    ConsistentHashing,
    // 轮询
    RoundRobin,
}

// 代理组
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ProxyGroup {
    pub name: String,
    #[serde(rename = "type")]
    pub group_type: GroupType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<LoadBalanceStrategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_failed_times: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lazy: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub proxies: Vec<String>,
}

impl ProxyGroup {
    fn new(name: impl Into<String>, group_type: GroupType, proxies: Vec<String>) -> Self {
        Self {
            name: name.into(),
            group_type,
            url: None,
            interval: None,
            tolerance: None,
            strategy: None,
            max_failed_times: None,
            lazy: None,
            hidden: None,
            icon: None,
            proxies,
        }
    }

    pub fn select(name: impl Into<String>, proxies: Vec<String>) -> Self {
        Self::new(name, GroupType::Select, proxies)
    }

    pub fn url_test(
        name: impl Into<String>,
        proxies: Vec<String>,
        health: &HealthCheckConfig,
    ) -> Self {
        Self {
            url: Some(health.url.clone()),
            interval: Some(health.interval),
            tolerance: Some(health.tolerance),
            ..Self::new(name, GroupType::UrlTest, proxies)
        }
    }

    pub fn load_balance(
        name: impl Into<String>,
        strategy: LoadBalanceStrategy,
        proxies: Vec<String>,
        health: &HealthCheckConfig,
    ) -> Self {
        Self {
            url: Some(health.url.clone()),
            interval: Some(health.interval),
            strategy: Some(strategy),
            max_failed_times: Some(health.max_failed_times),
            lazy: Some(true),
            ..Self::new(name, GroupType::LoadBalance, proxies)
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = Some(hidden);
        self
    }
}

// 已编译的区域分类
pub struct RegionCategory {
    pub code: String,
    pub auto_group: String,
    // 需要手工选择组时为 Some
    pub manual_group: Option<String>,
    pub icon: Option<String>,
    matcher: Box<dyn NameMatcher>,
}

impl RegionCategory {
    pub fn compile(region: &RegionConfig) -> Result<Self, ConfigError> {
        let matcher = build_matcher(&region.matcher)
            .map_err(|e| ConfigError::InvalidMatcher(region.code.clone(), e.to_string()))?;

        Ok(Self {
            code: region.code.clone(),
            auto_group: region.auto_group_name(),
            manual_group: region.manual.then(|| region.manual_group_name()),
            icon: region.icon.clone(),
            matcher,
        })
    }

    pub fn matcher(&self) -> &dyn NameMatcher {
        self.matcher.as_ref()
    }
}

// 手工选择组在没有匹配节点时的后备列表
pub fn manual_fallback() -> Vec<String> {
    vec![
        group_names::DIRECT.to_string(),
        group_names::MANUAL.to_string(),
        group_names::PROXY_MODE.to_string(),
    ]
}

// 区域自动选择组，没有匹配节点的区域被省略
pub fn build_auto_groups(
    proxies: &[ProxyDescriptor],
    regions: &[RegionCategory],
    health: &HealthCheckConfig,
) -> Vec<ProxyGroup> {
    regions
        .iter()
        .filter_map(|region| {
            let members = matching_names(proxies, region.matcher());
            if members.is_empty() {
                debug!("Region {} has no matching proxies, skipping auto group", region.code);
                return None;
            }
            debug!(
                "Region {} matched {} proxies -> {}",
                region.code,
                members.len(),
                region.auto_group
            );
            Some(ProxyGroup::url_test(&region.auto_group, members, health).with_hidden(true))
        })
        .collect()
}

// 区域手工选择组，没有匹配节点时使用后备列表
pub fn build_manual_groups(
    proxies: &[ProxyDescriptor],
    regions: &[RegionCategory],
) -> Vec<ProxyGroup> {
    let fallback = manual_fallback();
    regions
        .iter()
        .filter_map(|region| {
            let name = region.manual_group.as_ref()?;
            let members = categorize(proxies, region.matcher(), &fallback);
            let mut group = ProxyGroup::select(name, members).with_hidden(false);
            if let Some(icon) = &region.icon {
                group = group.with_icon(icon);
            }
            Some(group)
        })
        .collect()
}

// AI 服务选择组引用的候选：只引用实际生成的分组
fn ai_service_members(auto_groups: &[ProxyGroup], manual_groups: &[ProxyGroup]) -> Vec<String> {
    let auto = format!("{}{}", region_defaults::CATCH_ALL_CODE, group_names::AUTO_SUFFIX);
    let manual = format!("{}{}", region_defaults::CATCH_ALL_CODE, group_names::MANUAL_SUFFIX);

    let mut members = Vec::with_capacity(3);
    if auto_groups.iter().any(|g| g.name == auto) {
        members.push(auto);
    }
    members.push(group_names::PROXY_MODE.to_string());
    if manual_groups.iter().any(|g| g.name == manual) {
        members.push(manual);
    }
    members
}

// 固定代理组
fn fixed_groups(
    all: &[String],
    auto_groups: &[ProxyGroup],
    manual_groups: &[ProxyGroup],
    config: &Config,
) -> Vec<ProxyGroup> {
    let icons = &config.icons;
    let health = &config.health_check;

    let mut auto_members = Vec::with_capacity(auto_groups.len() + 1);
    auto_members.push(group_names::ALL_AUTO.to_string());
    auto_members.extend(auto_groups.iter().map(|g| g.name.clone()));

    let ai_members = ai_service_members(auto_groups, manual_groups);

    vec![
        ProxyGroup::select(
            group_names::PROXY_MODE,
            vec![
                group_names::AUTO.to_string(),
                group_names::MANUAL.to_string(),
                group_names::LOAD_BALANCE_HASH.to_string(),
                group_names::LOAD_BALANCE_ROUND.to_string(),
                group_names::DIRECT.to_string(),
            ],
        )
        .with_url(&health.url)
        .with_icon(&icons.proxy),
        ProxyGroup::select(group_names::MANUAL, all.to_vec()).with_icon(&icons.manual),
        ProxyGroup::select(group_names::AUTO, auto_members).with_icon(&icons.auto),
        ProxyGroup::load_balance(
            group_names::LOAD_BALANCE_HASH,
            LoadBalanceStrategy::ConsistentHashing,
            all.to_vec(),
            health,
        )
        .with_icon(&icons.load_balance_hash),
        ProxyGroup::load_balance(
            group_names::LOAD_BALANCE_ROUND,
            LoadBalanceStrategy::RoundRobin,
            all.to_vec(),
            health,
        )
        .with_icon(&icons.load_balance_round),
        ProxyGroup::url_test(group_names::ALL_AUTO, all.to_vec(), health).with_hidden(true),
        ProxyGroup::select(group_names::CHATGPT, ai_members.clone()).with_icon(&icons.chatgpt),
        ProxyGroup::select(group_names::CLAUDE, ai_members.clone()).with_icon(&icons.claude),
        ProxyGroup::select(group_names::GEMINI, ai_members).with_icon(&icons.gemini),
        ProxyGroup::select(
            group_names::FINAL,
            vec![
                group_names::DIRECT.to_string(),
                group_names::PROXY_MODE.to_string(),
            ],
        )
        .with_icon(&icons.fish),
        ProxyGroup::select(
            group_names::AD_BLOCK,
            vec![
                group_names::REJECT.to_string(),
                group_names::DIRECT.to_string(),
                group_names::PROXY_MODE.to_string(),
            ],
        )
        .with_icon(&icons.block),
    ]
}

// 组装全部代理组：固定组 -> 区域自动选择组 -> 区域手工选择组
pub fn build_proxy_groups(
    proxies: &[ProxyDescriptor],
    regions: &[RegionCategory],
    config: &Config,
) -> Vec<ProxyGroup> {
    let all: Vec<String> = proxies.iter().map(|p| p.name.clone()).collect();

    let auto_groups = build_auto_groups(proxies, regions, &config.health_check);
    let manual_groups = build_manual_groups(proxies, regions);

    let mut groups = fixed_groups(&all, &auto_groups, &manual_groups, config);
    groups.reserve(auto_groups.len() + manual_groups.len());
    groups.extend(auto_groups);
    groups.extend(manual_groups);
    groups
}
