use crate::config::{DnsPolicyConfig, GeoxConfig};
use crate::r#const::{dns_defaults, sniffer_defaults};
use serde::Serialize;
use std::collections::BTreeMap;

// fallback-filter
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct FallbackFilter {
    pub geoip: bool,
    pub geoip_code: String,
    pub geosite: Vec<String>,
    pub ipcidr: Vec<String>,
    pub domain: Vec<String>,
}

// DNS 配置块，合并到输入配置已有的 dns 字段之上
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct DnsConfig {
    pub enable: bool,
    pub prefer_h3: bool,
    pub default_nameserver: Vec<String>,
    pub nameserver: Vec<String>,
    pub nameserver_policy: BTreeMap<String, Vec<String>>,
    pub fallback: Vec<String>,
    pub fallback_filter: FallbackFilter,
}

impl DnsConfig {
    pub fn from_policy(policy: &DnsPolicyConfig) -> Self {
        let mut nameserver_policy = BTreeMap::new();
        nameserver_policy.insert(dns_defaults::POLICY_CN.to_string(), policy.cn.clone());
        nameserver_policy.insert(
            dns_defaults::POLICY_NOT_CN.to_string(),
            policy.trust.clone(),
        );

        let filter = &policy.fallback_filter;
        Self {
            enable: true,
            prefer_h3: true,
            default_nameserver: policy.cn.clone(),
            nameserver: policy.trust.clone(),
            nameserver_policy,
            fallback: policy.trust.clone(),
            fallback_filter: FallbackFilter {
                geoip: filter.geoip,
                geoip_code: filter.geoip_code.clone(),
                geosite: filter.geosite.clone(),
                ipcidr: filter.ipcidr.clone(),
                domain: filter.domain.clone(),
            },
        }
    }
}

// profile 字段：保存选择结果与 fake-ip 映射
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ProfileStore {
    pub store_selected: bool,
    pub store_fake_ip: bool,
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self {
            store_selected: true,
            store_fake_ip: true,
        }
    }
}

// 嗅探端口：单个端口或端口范围
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PortSpec {
    Single(u16),
    Range(String),
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct SniffProtocol {
    pub ports: Vec<PortSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_destination: Option<bool>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Sniff {
    #[serde(rename = "TLS")]
    pub tls: SniffProtocol,
    #[serde(rename = "HTTP")]
    pub http: SniffProtocol,
}

// 域名嗅探配置
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SnifferConfig {
    pub enable: bool,
    pub sniff: Sniff,
}

impl Default for SnifferConfig {
    fn default() -> Self {
        Self {
            enable: true,
            sniff: Sniff {
                tls: SniffProtocol {
                    ports: sniffer_defaults::TLS_PORTS
                        .iter()
                        .map(|p| PortSpec::Single(*p))
                        .collect(),
                    override_destination: None,
                },
                http: SniffProtocol {
                    ports: vec![
                        PortSpec::Single(sniffer_defaults::HTTP_PORT),
                        PortSpec::Range(sniffer_defaults::HTTP_PORT_RANGE.to_string()),
                    ],
                    override_destination: Some(true),
                },
            },
        }
    }
}

// geox-url：经过加速前缀处理的 GeoX 数据库地址
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GeoxUrls {
    pub geoip: String,
    pub geosite: String,
    pub mmdb: String,
}

impl GeoxUrls {
    pub fn from_config(geox: &GeoxConfig) -> Self {
        Self {
            geoip: geox.accelerated(&geox.geoip),
            geosite: geox.accelerated(&geox.geosite),
            mmdb: geox.accelerated(&geox.mmdb),
        }
    }
}
