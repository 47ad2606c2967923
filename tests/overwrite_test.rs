use clash_overwrite::config::{Config, MatcherConfig, RegionConfig};
use clash_overwrite::{Overwriter, Profile};
use serde_yaml::Value;

// 测试用配置：三个节点，其中一个是订阅信息行
const SAMPLE_PROFILE: &str = r#"
mixed-port: 7890
mode: rule
proxies:
  - { name: "HK-01", type: ss, server: hk.example.com, port: 443, cipher: aes-128-gcm, password: x }
  - { name: "US-01", type: ss, server: us.example.com, port: 443, cipher: aes-128-gcm, password: x }
  - { name: "剩余流量:100GB", type: ss, server: 127.0.0.1, port: 1, cipher: aes-128-gcm, password: x }
dns:
  listen: "0.0.0.0:1053"
  enable: false
rules:
  - "MATCH,DIRECT"
"#;

fn group<'a>(profile: &'a Profile, name: &str) -> Option<&'a Value> {
    profile
        .get("proxy-groups")?
        .as_sequence()?
        .iter()
        .find(|g| g["name"].as_str() == Some(name))
}

fn members(profile: &Profile, name: &str) -> Vec<String> {
    group(profile, name)
        .and_then(|g| g["proxies"].as_sequence())
        .map(|seq| {
            seq.iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn group_names(profile: &Profile) -> Vec<String> {
    profile
        .get("proxy-groups")
        .and_then(Value::as_sequence)
        .map(|seq| {
            seq.iter()
                .filter_map(|g| g["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn test_region_categorization_scenario() {
    let overwriter = Overwriter::with_defaults().unwrap();
    let profile = Profile::from_yaml_str(SAMPLE_PROFILE).unwrap();
    let output = overwriter.apply(&profile);

    assert_eq!(members(&output, "HK-自动选择"), vec!["HK-01"]);
    assert_eq!(members(&output, "US-自动选择"), vec!["US-01"]);
    // 兜底分类排除订阅信息行
    assert_eq!(members(&output, "AI-自动选择"), vec!["HK-01", "US-01"]);
    assert_eq!(members(&output, "AI-手工选择"), vec!["HK-01", "US-01"]);

    // 没有德国节点，自动组被省略
    assert!(group(&output, "DE-自动选择").is_none());
    assert!(group(&output, "JP-自动选择").is_none());

    // 手动选择与负载均衡组包含全部节点
    let all = vec!["HK-01", "US-01", "剩余流量:100GB"];
    assert_eq!(members(&output, "手动选择"), all);
    assert_eq!(members(&output, "负载均衡(散列)"), all);
    assert_eq!(members(&output, "负载均衡(轮询)"), all);
    assert_eq!(members(&output, "ALL-自动选择"), all);

    assert_eq!(
        members(&output, "自动选择"),
        vec!["ALL-自动选择", "HK-自动选择", "US-自动选择", "AI-自动选择"]
    );
}

#[test]
fn test_group_order() {
    let overwriter = Overwriter::with_defaults().unwrap();
    let output = overwriter.apply(&Profile::from_yaml_str(SAMPLE_PROFILE).unwrap());

    let names = group_names(&output);
    assert_eq!(names.len(), 11 + 3 + 1);
    assert_eq!(names[0], "代理模式");
    assert_eq!(names[10], "广告拦截");
    assert_eq!(names[11], "HK-自动选择");
    assert_eq!(names.last().unwrap(), "AI-手工选择");
}

#[test]
fn test_group_fields() {
    let overwriter = Overwriter::with_defaults().unwrap();
    let output = overwriter.apply(&Profile::from_yaml_str(SAMPLE_PROFILE).unwrap());

    let hash = group(&output, "负载均衡(散列)").unwrap();
    assert_eq!(hash["type"], Value::from("load-balance"));
    assert_eq!(hash["strategy"], Value::from("consistent-hashing"));
    assert_eq!(hash["lazy"], Value::from(true));
    assert_eq!(hash["max-failed-times"], Value::from(3));

    let round = group(&output, "负载均衡(轮询)").unwrap();
    assert_eq!(round["strategy"], Value::from("round-robin"));

    let hk = group(&output, "HK-自动选择").unwrap();
    assert_eq!(hk["type"], Value::from("url-test"));
    assert_eq!(hk["hidden"], Value::from(true));

    let manual = group(&output, "AI-手工选择").unwrap();
    assert_eq!(manual["type"], Value::from("select"));
    assert_eq!(manual["hidden"], Value::from(false));
    assert!(manual["icon"].as_str().unwrap().ends_with("chatgpt.svg"));

    let proxy_mode = group(&output, "代理模式").unwrap();
    assert_eq!(
        proxy_mode["url"],
        Value::from("http://www.gstatic.com/generate_204")
    );
}

#[test]
fn test_rules_and_providers_replaced() {
    let overwriter = Overwriter::with_defaults().unwrap();
    let output = overwriter.apply(&Profile::from_yaml_str(SAMPLE_PROFILE).unwrap());

    let rules = output.get("rules").unwrap().as_sequence().unwrap();
    assert_eq!(rules.len(), 13 + 17);
    assert!(!rules.contains(&Value::from("MATCH,DIRECT")));
    assert_eq!(rules.last().unwrap(), &Value::from("MATCH,漏网之鱼"));

    let providers = output.get("rule-providers").unwrap();
    assert_eq!(providers.as_mapping().unwrap().len(), 14);
    assert_eq!(
        providers["cncidr"]["path"],
        Value::from("./ruleset/cncidr.yaml")
    );
}

#[test]
fn test_extra_rules_follow_direct_domains() {
    let overwriter = Overwriter::with_defaults().unwrap();
    let profile = Profile::from_yaml_str(SAMPLE_PROFILE).unwrap();
    let extra = vec![
        "DOMAIN-SUFFIX,corp.internal,DIRECT".to_string(),
        "DOMAIN,ads.example.com,REJECT".to_string(),
    ];
    let output = overwriter.apply_with_rules(&profile, &extra);

    let rules = output.get("rules").unwrap().as_sequence().unwrap();
    assert_eq!(rules[12], Value::from("DOMAIN-SUFFIX,live.com,DIRECT"));
    assert_eq!(rules[13], Value::from("DOMAIN-SUFFIX,corp.internal,DIRECT"));
    assert_eq!(rules[14], Value::from("DOMAIN,ads.example.com,REJECT"));
    assert_eq!(rules[15], Value::from("RULE-SET,reject,广告拦截"));
}

#[test]
fn test_dns_is_merged_over_existing_block() {
    let overwriter = Overwriter::with_defaults().unwrap();
    let output = overwriter.apply(&Profile::from_yaml_str(SAMPLE_PROFILE).unwrap());

    let dns = output.get("dns").unwrap();
    // 原有字段保留，同名字段被覆盖
    assert_eq!(dns["listen"], Value::from("0.0.0.0:1053"));
    assert_eq!(dns["enable"], Value::from(true));
    assert_eq!(dns["prefer-h3"], Value::from(true));
    assert_eq!(
        dns["default-nameserver"][0],
        Value::from("https://1.12.12.12/dns-query")
    );
    assert_eq!(
        dns["nameserver-policy"]["geosite:geolocation-!cn"][0],
        Value::from("https://1.1.1.1/dns-query")
    );
    assert_eq!(dns["fallback-filter"]["geosite"][0], Value::from("gfw"));
}

#[test]
fn test_unrelated_fields_and_input_preserved() {
    let overwriter = Overwriter::with_defaults().unwrap();
    let profile = Profile::from_yaml_str(SAMPLE_PROFILE).unwrap();
    let before = profile.clone();
    let output = overwriter.apply(&profile);

    // 输入未被修改
    assert_eq!(profile, before);

    assert_eq!(output.get("mixed-port"), Some(&Value::from(7890)));
    assert_eq!(output.get("mode"), Some(&Value::from("rule")));
    assert_eq!(output.get("proxies"), profile.get("proxies"));

    let keys: Vec<&str> = output
        .as_mapping()
        .keys()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(&keys[..5], &["mixed-port", "mode", "proxies", "dns", "rules"]);
}

#[test]
fn test_empty_or_missing_proxies_is_noop() {
    let overwriter = Overwriter::with_defaults().unwrap();

    let empty = Profile::from_yaml_str("mode: rule\nproxies: []\n").unwrap();
    let output = overwriter.apply(&empty);
    assert_eq!(output, empty);
    assert!(output.get("rules").is_none());

    let missing = Profile::from_yaml_str("mode: rule\n").unwrap();
    assert_eq!(overwriter.apply(&missing), missing);

    let blank = Profile::from_yaml_str("").unwrap();
    assert_eq!(overwriter.apply(&blank), Profile::default());
}

#[test]
fn test_idempotence() {
    let overwriter = Overwriter::with_defaults().unwrap();
    let first = overwriter.apply(&Profile::from_yaml_str(SAMPLE_PROFILE).unwrap());
    let second = overwriter.apply(&first);

    for key in ["rules", "rule-providers", "dns", "proxy-groups", "geox-url", "sniffer"] {
        assert_eq!(first.get(key), second.get(key), "field {} changed", key);
    }
    assert_eq!(first, second);
}

#[test]
fn test_custom_policy_regions() {
    let mut config = Config::default();
    config.regions = vec![
        RegionConfig::regex("UK", "英国|UK"),
        RegionConfig {
            code: "AI".to_string(),
            matcher: MatcherConfig::Exclude {
                keywords: vec!["剩余".to_string()],
                case_insensitive: true,
            },
            manual: true,
            icon: None,
        },
    ];
    let overwriter = Overwriter::new(&config).unwrap();
    let profile = Profile::from_yaml_str(
        "proxies:\n  - name: 英国 01\n  - name: HK-01\n  - name: 剩余流量\n",
    )
    .unwrap();
    let output = overwriter.apply(&profile);

    assert_eq!(members(&output, "UK-自动选择"), vec!["英国 01"]);
    assert!(group(&output, "HK-自动选择").is_none());
    assert_eq!(members(&output, "AI-自动选择"), vec!["英国 01", "HK-01"]);
    assert!(group(&output, "AI-手工选择").unwrap().get("icon").is_none());
}

#[test]
fn test_json_round_trip_output() {
    let overwriter = Overwriter::with_defaults().unwrap();
    let json_input = r#"{"proxies": [{"name": "🇯🇵 Tokyo 01", "type": "trojan"}]}"#;
    let output = overwriter.apply(&Profile::from_yaml_str(json_input).unwrap());

    assert_eq!(members(&output, "JP-自动选择"), vec!["🇯🇵 Tokyo 01"]);

    let rendered = output.to_json_string().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(parsed["sniffer"]["sniff"]["HTTP"]["ports"][1], "8080-8880");
    assert_eq!(parsed["sniffer"]["sniff"]["TLS"]["ports"][0], 443);
}

#[test]
fn test_numeric_proxy_names_are_grouped() {
    let overwriter = Overwriter::with_defaults().unwrap();
    let mixed = Profile::from_yaml_str("proxies:\n  - { name: HK-01 }\n  - { name: 2024 }\n").unwrap();
    let output = overwriter.apply(&mixed);

    let all = vec!["HK-01", "2024"];
    assert_eq!(members(&output, "手动选择"), all);
    assert_eq!(members(&output, "负载均衡(散列)"), all);
    assert_eq!(members(&output, "ALL-自动选择"), all);
    assert_eq!(members(&output, "AI-自动选择"), all);

    // 仅有数字名称的节点时同样执行改写
    let numeric_only = Profile::from_yaml_str("proxies:\n  - { name: 2024 }\n").unwrap();
    let output = overwriter.apply(&numeric_only);
    assert!(output.contains_key("rules"));
    assert_eq!(members(&output, "手动选择"), vec!["2024"]);
}
