use crate::config::{Config, DEFAULT_CONFIG};
use crate::dns::{DnsConfig, GeoxUrls, ProfileStore, SnifferConfig};
use crate::error::ConfigError;
use crate::group::{build_proxy_groups, RegionCategory};
use crate::profile::{Profile, ProfileBuilder};
use crate::r#const::profile_keys;
use crate::rules::{build_rule_providers, build_rules};
use tracing::{debug, info, warn};

// 配置改写器
//
// 构造时编译所有区域匹配器，之后可被任意多次调用，且调用之间不共享可变状态
pub struct Overwriter {
    config: Config,
    regions: Vec<RegionCategory>,
}

impl Overwriter {
    // 根据策略配置创建改写器
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let regions = config
            .regions
            .iter()
            .map(RegionCategory::compile)
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Compiled {} region categories", regions.len());

        Ok(Self {
            config: config.clone(),
            regions,
        })
    }

    // 使用内置策略表创建改写器
    pub fn with_defaults() -> Result<Self, ConfigError> {
        Self::new(&DEFAULT_CONFIG)
    }

    // 改写配置
    pub fn apply(&self, profile: &Profile) -> Profile {
        self.apply_with_rules(profile, &[])
    }

    // 改写配置，额外的自定义规则插入在直连域名规则之后
    //
    // 节点列表缺失或为空时不做任何改写，原样返回输入
    pub fn apply_with_rules(&self, profile: &Profile, extra_rules: &[String]) -> Profile {
        let proxies = profile.proxies();
        if proxies.is_empty() {
            warn!("No valid proxies provided, profile left unchanged");
            return profile.clone();
        }

        info!("Overwriting profile with {} proxies", proxies.len());

        let rules = build_rules(&self.config, extra_rules);
        let rule_providers = build_rule_providers(&self.config);
        let proxy_groups = build_proxy_groups(&proxies, &self.regions, &self.config);
        let dns = DnsConfig::from_policy(&self.config.dns);

        info!(
            "Generated {} rules, {} rule providers, {} proxy groups",
            rules.len(),
            rule_providers.len(),
            proxy_groups.len()
        );

        ProfileBuilder::new(profile)
            .set(profile_keys::RULES, &rules)
            .set(profile_keys::RULE_PROVIDERS, &rule_providers)
            .set(profile_keys::PROXY_GROUPS, &proxy_groups)
            .merge(profile_keys::DNS, &dns)
            .set(profile_keys::UNIFIED_DELAY, &true)
            .set(profile_keys::TCP_CONCURRENT, &true)
            .set(profile_keys::PROFILE, &ProfileStore::default())
            .set(profile_keys::SNIFFER, &SnifferConfig::default())
            .set(profile_keys::GEODATA_MODE, &true)
            .set(
                profile_keys::GEOX_URL,
                &GeoxUrls::from_config(&self.config.geox),
            )
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;

    #[test]
    fn test_overwriter_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Overwriter>();
    }

    #[test]
    fn test_empty_proxies_returns_input() {
        let overwriter = Overwriter::with_defaults().unwrap();
        let profile = Profile::from_yaml_str("mode: rule\nproxies: []\n").unwrap();
        let output = overwriter.apply(&profile);
        assert_eq!(output, profile);
        assert!(!output.contains_key("rules"));
    }

    #[test]
    fn test_operational_options_are_set() {
        let overwriter = Overwriter::with_defaults().unwrap();
        let profile = Profile::from_yaml_str("proxies:\n  - name: SG-01\n").unwrap();
        let output = overwriter.apply(&profile);

        assert_eq!(output.get("unified-delay"), Some(&Value::from(true)));
        assert_eq!(output.get("tcp-concurrent"), Some(&Value::from(true)));
        assert_eq!(output.get("geodata-mode"), Some(&Value::from(true)));
        assert_eq!(
            output.get("profile").unwrap()["store-fake-ip"],
            Value::from(true)
        );
        assert!(output.get("geox-url").unwrap()["geosite"]
            .as_str()
            .unwrap()
            .starts_with("https://fastgh.lainbo.com/"));
    }
}
