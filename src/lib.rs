pub mod args;
pub mod categorizer;
pub mod config;
pub mod r#const;
pub mod dns;
pub mod error;
pub mod group;
pub mod matcher;
pub mod overwrite;
pub mod profile;
pub mod rules;

// 重导出常用组件
pub use args::Args;
pub use categorizer::{categorize, matching_names};
pub use config::Config;
pub use error::{AppError, ConfigError};
pub use group::{GroupType, LoadBalanceStrategy, ProxyGroup, RegionCategory};
pub use matcher::{KeywordExclusionMatcher, NameMatcher, RegexMatcher};
pub use overwrite::Overwriter;
pub use profile::{Profile, ProfileBuilder, ProxyDescriptor};
pub use rules::{RuleProvider, RuleProviders};
