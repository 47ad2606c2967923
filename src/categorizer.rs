use crate::matcher::NameMatcher;
use crate::profile::ProxyDescriptor;

/// 按输入顺序返回所有名称满足匹配器的节点名（保留重复项），可能为空
pub fn matching_names<M>(proxies: &[ProxyDescriptor], matcher: &M) -> Vec<String>
where
    M: NameMatcher + ?Sized,
{
    proxies
        .iter()
        .filter(|proxy| matcher.matches(&proxy.name))
        .map(|proxy| proxy.name.clone())
        .collect()
}

/// 节点分类
///
/// 返回满足匹配器的节点名；节点列表为空或没有任何节点匹配时返回 `fallback` 的副本。
/// 该操作不会失败。缺失的节点列表由调用方以空切片传入。
pub fn categorize<M>(proxies: &[ProxyDescriptor], matcher: &M, fallback: &[String]) -> Vec<String>
where
    M: NameMatcher + ?Sized,
{
    if proxies.is_empty() {
        return fallback.to_vec();
    }

    let matched = matching_names(proxies, matcher);
    if matched.is_empty() {
        fallback.to_vec()
    } else {
        matched
    }
}
