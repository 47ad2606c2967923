use crate::error::AppError;
use crate::r#const::profile_keys;
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use tracing::{debug, error};

// 代理节点描述，分类器只关心名称，其余字段保留在原始配置中
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyDescriptor {
    pub name: String,
}

impl ProxyDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

// 客户端配置对象
//
// 保持原始键顺序，未被改写的字段原样输出
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Profile {
    root: Mapping,
}

impl Profile {
    // 从 YAML 值构建，空文档视为空对象
    pub fn from_value(value: Value) -> Result<Self, AppError> {
        match value {
            Value::Mapping(root) => Ok(Self { root }),
            Value::Null => Ok(Self::default()),
            other => Err(AppError::InvalidProfile(format!(
                "profile root must be a mapping, got {}",
                value_kind(&other)
            ))),
        }
    }

    // 解析 YAML 或 JSON 文本（JSON 是 YAML 的子集）
    pub fn from_yaml_str(content: &str) -> Result<Self, AppError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: Value = serde_yaml::from_str(content)?;
        Self::from_value(value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.root.contains_key(key)
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.root
    }

    // 提取节点列表，缺失或类型不符时返回空列表；没有名称的条目被忽略
    // 数字或布尔类型的名称按其文本形式处理
    pub fn proxies(&self) -> Vec<ProxyDescriptor> {
        let Some(Value::Sequence(items)) = self.root.get(profile_keys::PROXIES) else {
            return Vec::new();
        };

        let mut proxies = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            match item.get("name").and_then(scalar_name) {
                Some(name) => proxies.push(ProxyDescriptor::new(name)),
                None => debug!("Skipping proxy #{} without a name", i + 1),
            }
        }
        proxies
    }

    pub fn to_yaml_string(&self) -> Result<String, AppError> {
        Ok(serde_yaml::to_string(&self.root)?)
    }

    pub fn to_json_string(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }
}

impl Serialize for Profile {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}

// 标量名称转换为文本
fn scalar_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

// 配置构建器：以输入配置的副本为基础叠加计算结果，不修改输入
pub struct ProfileBuilder {
    root: Mapping,
}

impl ProfileBuilder {
    pub fn new(base: &Profile) -> Self {
        Self {
            root: base.root.clone(),
        }
    }

    // 设置（替换）字段；已存在的键保持原位置
    pub fn set<T: Serialize + ?Sized>(mut self, key: &str, value: &T) -> Self {
        match serde_yaml::to_value(value) {
            Ok(value) => {
                self.root.insert(Value::String(key.to_string()), value);
            }
            Err(e) => error!("Failed to serialize field '{}': {}", key, e),
        }
        self
    }

    // 合并字段：在原有映射上逐键覆盖，原有的其他键保留
    // 原值不是映射时直接替换
    pub fn merge<T: Serialize + ?Sized>(mut self, key: &str, value: &T) -> Self {
        let overlay = match serde_yaml::to_value(value) {
            Ok(Value::Mapping(overlay)) => overlay,
            Ok(other) => return self.set(key, &other),
            Err(e) => {
                error!("Failed to serialize field '{}': {}", key, e);
                return self;
            }
        };

        let mut merged = match self.root.get(key) {
            Some(Value::Mapping(existing)) => existing.clone(),
            _ => Mapping::new(),
        };
        for (k, v) in overlay {
            merged.insert(k, v);
        }

        self.root
            .insert(Value::String(key.to_string()), Value::Mapping(merged));
        self
    }

    pub fn build(self) -> Profile {
        Profile { root: self.root }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxies_extraction() {
        let profile = Profile::from_yaml_str(
            r#"
proxies:
  - { name: "HK-01", type: ss, server: 1.1.1.1, port: 443 }
  - { type: ss }
  - { name: "US-01", type: trojan }
"#,
        )
        .unwrap();
        assert_eq!(
            profile.proxies(),
            vec![ProxyDescriptor::new("HK-01"), ProxyDescriptor::new("US-01")]
        );
    }

    #[test]
    fn test_scalar_names_are_kept() {
        let profile = Profile::from_yaml_str(
            r#"
proxies:
  - { name: "HK-01" }
  - { name: 2024 }
  - { name: true }
  - { name: [nested] }
  - plain-string
"#,
        )
        .unwrap();
        assert_eq!(
            profile.proxies(),
            vec![
                ProxyDescriptor::new("HK-01"),
                ProxyDescriptor::new("2024"),
                ProxyDescriptor::new("true"),
            ]
        );
    }

    #[test]
    fn test_missing_or_malformed_proxies_are_empty() {
        assert!(Profile::default().proxies().is_empty());
        let profile = Profile::from_yaml_str("proxies: not-a-list").unwrap();
        assert!(profile.proxies().is_empty());
    }

    #[test]
    fn test_json_input_is_accepted() {
        let profile = Profile::from_yaml_str(r#"{"proxies": [{"name": "JP-01"}]}"#).unwrap();
        assert_eq!(profile.proxies(), vec![ProxyDescriptor::new("JP-01")]);
    }

    #[test]
    fn test_non_mapping_root_is_rejected() {
        assert!(matches!(
            Profile::from_yaml_str("- a\n- b\n"),
            Err(AppError::InvalidProfile(_))
        ));
        assert_eq!(Profile::from_yaml_str("").unwrap(), Profile::default());
    }

    #[test]
    fn test_builder_set_keeps_key_position() {
        let base = Profile::from_yaml_str("a: 1\nrules: [x]\nb: 2\n").unwrap();
        let built = ProfileBuilder::new(&base)
            .set("rules", &vec!["y".to_string()])
            .set("c", &true)
            .build();

        let keys: Vec<&str> = built
            .as_mapping()
            .keys()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(keys, vec!["a", "rules", "b", "c"]);
        // 输入不被修改
        assert_eq!(base.get("rules").unwrap()[0], Value::from("x"));
    }

    #[test]
    fn test_builder_merge_overlays_existing_mapping() {
        let base = Profile::from_yaml_str("dns:\n  ipv6: false\n  enable: false\n").unwrap();
        let mut overlay = Mapping::new();
        overlay.insert(Value::from("enable"), Value::from(true));
        overlay.insert(Value::from("listen"), Value::from(":53"));

        let built = ProfileBuilder::new(&base).merge("dns", &overlay).build();
        let dns = built.get("dns").unwrap().as_mapping().unwrap();
        let keys: Vec<&str> = dns.keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, vec!["ipv6", "enable", "listen"]);
        assert_eq!(dns.get("enable"), Some(&Value::from(true)));
        assert_eq!(dns.get("ipv6"), Some(&Value::from(false)));
    }
}
