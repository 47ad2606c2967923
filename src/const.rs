// 应用常量定义

//
// 配置参数限制常量
//

// 健康检查配置限制
pub mod health_check_limits {
    // 默认测速间隔（秒）
    pub const DEFAULT_INTERVAL: u32 = 300;
    // 最小测速间隔（秒）
    pub const MIN_INTERVAL: u32 = 10;
    // 最大测速间隔（秒）
    pub const MAX_INTERVAL: u32 = 86400;
    // 默认容差（毫秒）
    pub const DEFAULT_TOLERANCE: u32 = 50;
    // 最大容差（毫秒）
    pub const MAX_TOLERANCE: u32 = 10000;
    // 默认最大失败次数
    pub const DEFAULT_MAX_FAILED_TIMES: u32 = 3;
    // 最小失败次数
    pub const MIN_MAX_FAILED_TIMES: u32 = 1;
    // 最大失败次数
    pub const MAX_MAX_FAILED_TIMES: u32 = 100;
}

// 规则提供者配置限制
pub mod rule_provider_limits {
    // 默认更新间隔（秒）
    pub const DEFAULT_INTERVAL: u32 = 86400;
    // 最小更新间隔（秒）
    pub const MIN_INTERVAL: u32 = 60;
    // 最大更新间隔（秒）
    pub const MAX_INTERVAL: u32 = 604800;
}

//
// 代理组名称常量
//

pub mod group_names {
    // 代理模式（总入口）
    pub const PROXY_MODE: &str = "代理模式";
    // 手动选择
    pub const MANUAL: &str = "手动选择";
    // 自动选择
    pub const AUTO: &str = "自动选择";
    // 负载均衡(散列)
    pub const LOAD_BALANCE_HASH: &str = "负载均衡(散列)";
    // 负载均衡(轮询)
    pub const LOAD_BALANCE_ROUND: &str = "负载均衡(轮询)";
    // 全部节点自动选择
    pub const ALL_AUTO: &str = "ALL-自动选择";
    pub const CHATGPT: &str = "ChatGPT";
    pub const CLAUDE: &str = "Claude";
    pub const GEMINI: &str = "Gemini";
    // 漏网之鱼（兜底规则）
    pub const FINAL: &str = "漏网之鱼";
    // 广告拦截
    pub const AD_BLOCK: &str = "广告拦截";
    // 区域自动选择组后缀
    pub const AUTO_SUFFIX: &str = "-自动选择";
    // 区域手工选择组后缀
    pub const MANUAL_SUFFIX: &str = "-手工选择";
    // 内置直连出站
    pub const DIRECT: &str = "DIRECT";
    // 内置拒绝出站
    pub const REJECT: &str = "REJECT";
}

//
// 默认值常量
//

// 健康检查默认值
pub mod health_check_defaults {
    // 默认测速地址
    pub const DEFAULT_URL: &str = "http://www.gstatic.com/generate_204";
}

// 规则提供者默认值
pub mod rule_provider_defaults {
    // 规则集下载地址前缀
    pub const DEFAULT_BASE_URL: &str =
        "https://cdn.jsdelivr.net/gh/Loyalsoldier/clash-rules@release";
    // 规则集本地存储目录
    pub const DEFAULT_PATH_PREFIX: &str = "./ruleset";
    // 规则集文件扩展名（远程）
    pub const REMOTE_EXTENSION: &str = "txt";
    // 规则集文件扩展名（本地）
    pub const LOCAL_EXTENSION: &str = "yaml";
    // 规则提供者类型
    pub const PROVIDER_TYPE: &str = "http";
}

// GeoX 默认值
pub mod geox_defaults {
    pub const GEOIP: &str =
        "https://github.com/MetaCubeX/meta-rules-dat/releases/download/latest/geoip-lite.dat";
    pub const GEOSITE: &str =
        "https://github.com/MetaCubeX/meta-rules-dat/releases/download/latest/geosite.dat";
    pub const MMDB: &str =
        "https://github.com/MetaCubeX/meta-rules-dat/releases/download/latest/country-lite.mmdb";
    // GitHub 加速前缀
    pub const ACCELERATOR: &str = "https://fastgh.lainbo.com/";
}

// 图标默认值
pub mod icon_defaults {
    // 图标地址前缀
    const BASE: &str =
        "https://fastly.jsdelivr.net/gh/clash-verge-rev/clash-verge-rev.github.io@main/docs/assets/icons";

    // 拼接完整图标地址
    pub fn url(file: &str) -> String {
        format!("{}/{}.svg", BASE, file)
    }
}

// DNS 默认值
pub mod dns_defaults {
    // 国内 DoH 服务器
    pub const CN: [&str; 4] = [
        "https://1.12.12.12/dns-query",
        "https://120.53.53.53/dns-query",
        "https://223.5.5.5/dns-query",
        "https://223.6.6.6/dns-query",
    ];
    // 可信 DoH 服务器
    pub const TRUST: [&str; 8] = [
        "https://1.1.1.1/dns-query",
        "https://1.0.0.1/dns-query",
        "https://77.88.8.8/dns-query",
        "https://77.88.8.1/dns-query",
        "https://94.140.14.14/dns-query",
        "https://94.140.15.15/dns-query",
        "https://208.67.222.222/dns-query",
        "https://208.67.220.220/dns-query",
    ];
    // fallback-filter 默认值
    pub const FALLBACK_GEOIP_CODE: &str = "CN";
    pub const FALLBACK_GEOSITE: [&str; 1] = ["gfw"];
    pub const FALLBACK_IPCIDR: [&str; 1] = ["240.0.0.0/4"];
    pub const FALLBACK_DOMAIN: [&str; 3] = ["+.google.com", "+.facebook.com", "+.youtube.com"];
    // nameserver-policy 键
    pub const POLICY_CN: &str = "geosite:cn";
    pub const POLICY_NOT_CN: &str = "geosite:geolocation-!cn";
}

// 区域默认值
pub mod region_defaults {
    // 区域代码及匹配表达式
    pub const PATTERNS: [(&str, &str); 7] = [
        ("HK", "香港|HK|Hong|🇭🇰"),
        ("TW", "台湾|TW|Taiwan|Wan|🇨🇳|🇹🇼"),
        ("SG", "新加坡|狮城|SG|Singapore|🇸🇬"),
        ("JP", "日本|JP|Japan|🇯🇵"),
        ("US", "美国|US|United States|America|🇺🇸"),
        ("KR", "韩国|韩亚|KOR|KR|Korea|🇰🇷"),
        ("DE", "德国|DE|Germany|🇩🇪"),
    ];
    // 兜底分类代码
    pub const CATCH_ALL_CODE: &str = "AI";
    // 兜底分类排除的关键词（订阅信息行）
    pub const EXCLUDED_KEYWORDS: [&str; 9] = [
        "剩余", "到期", "主页", "官网", "游戏", "关注", "订阅", "CN", "中国",
    ];
}

// 规则默认值
pub mod rule_defaults {
    use crate::config::RuleBehavior;

    // 直连域名
    pub const DIRECT_DOMAINS: [&str; 13] = [
        "bing.com",
        "msn.com",
        "microsoft.com",
        "microsoftonline.com",
        "bing.net",
        "akamaized.net",
        "office.net",
        "azureedge.net",
        "nelreports.net",
        "azure.com",
        "windows.net",
        "office365.com",
        "live.com",
    ];
    // 规则集名称、匹配行为、文件名
    pub const PROVIDERS: [(&str, RuleBehavior, &str); 14] = [
        ("reject", RuleBehavior::Domain, "reject"),
        ("icloud", RuleBehavior::Domain, "icloud"),
        ("apple", RuleBehavior::Domain, "apple"),
        ("google", RuleBehavior::Domain, "google"),
        ("proxy", RuleBehavior::Domain, "proxy"),
        ("direct", RuleBehavior::Domain, "direct"),
        ("private", RuleBehavior::Domain, "private"),
        ("gfw", RuleBehavior::Domain, "gfw"),
        ("greatfire", RuleBehavior::Domain, "greatfire"),
        ("tld-not-cn", RuleBehavior::Domain, "tld-not-cn"),
        ("telegramcidr", RuleBehavior::Ipcidr, "telegramcidr"),
        ("cncidr", RuleBehavior::Ipcidr, "cncidr"),
        ("lancidr", RuleBehavior::Ipcidr, "lancidr"),
        ("applications", RuleBehavior::Classical, "applications"),
    ];
}

// 嗅探默认值
pub mod sniffer_defaults {
    pub const TLS_PORTS: [u16; 2] = [443, 8443];
    pub const HTTP_PORT: u16 = 80;
    pub const HTTP_PORT_RANGE: &str = "8080-8880";
}

// 输出配置字段名
pub mod profile_keys {
    pub const PROXIES: &str = "proxies";
    pub const RULES: &str = "rules";
    pub const RULE_PROVIDERS: &str = "rule-providers";
    pub const PROXY_GROUPS: &str = "proxy-groups";
    pub const DNS: &str = "dns";
    pub const UNIFIED_DELAY: &str = "unified-delay";
    pub const TCP_CONCURRENT: &str = "tcp-concurrent";
    pub const PROFILE: &str = "profile";
    pub const SNIFFER: &str = "sniffer";
    pub const GEODATA_MODE: &str = "geodata-mode";
    pub const GEOX_URL: &str = "geox-url";
}

// 标准输入输出占位符
pub const STDIO_PLACEHOLDER: &str = "-";
