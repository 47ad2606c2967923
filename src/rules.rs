use crate::config::{Config, RuleBehavior};
use crate::r#const::{group_names, rule_provider_defaults};
use serde::ser::{Serialize, SerializeMap, Serializer};

// 规则提供者
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RuleProvider {
    #[serde(rename = "type")]
    pub provider_type: &'static str,
    pub behavior: RuleBehavior,
    pub url: String,
    pub path: String,
    pub interval: u32,
    pub lazy: bool,
}

// 有序的规则提供者表，序列化为映射
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleProviders(Vec<(String, RuleProvider)>);

impl RuleProviders {
    pub fn get(&self, name: &str) -> Option<&RuleProvider> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, p)| p)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for RuleProviders {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, provider) in &self.0 {
            map.serialize_entry(name, provider)?;
        }
        map.end()
    }
}

// 直连域名规则
fn direct_domain_rule(domain: &str) -> String {
    format!("DOMAIN-SUFFIX,{},{}", domain, group_names::DIRECT)
}

// 组装分流规则：直连域名 -> 额外自定义规则 -> 内置规则表
pub fn build_rules(config: &Config, extra_rules: &[String]) -> Vec<String> {
    let mut rules =
        Vec::with_capacity(config.direct_domains.len() + extra_rules.len() + config.rules.len());

    rules.extend(config.direct_domains.iter().map(|d| direct_domain_rule(d)));
    rules.extend(extra_rules.iter().cloned());
    rules.extend(config.rules.iter().cloned());

    rules
}

// 组装规则提供者表
pub fn build_rule_providers(config: &Config) -> RuleProviders {
    let source = &config.rule_provider_source;
    let providers = config
        .rule_providers
        .iter()
        .map(|p| {
            (
                p.name.clone(),
                RuleProvider {
                    provider_type: rule_provider_defaults::PROVIDER_TYPE,
                    behavior: p.behavior,
                    url: source.url_for(&p.file),
                    path: source.path_for(&p.file),
                    interval: source.interval,
                    lazy: source.lazy,
                },
            )
        })
        .collect();

    RuleProviders(providers)
}
