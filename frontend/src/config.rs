//! 应用配置
//!
//! 两个必需的后端配置在构建时通过环境变量注入（Trunk 构建脚本里导出）。
//! 缺少任何一个时应用拒绝启动，只渲染一个错误页面。

/// 托管后端的连接配置
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

const SUPABASE_URL: Option<&str> = option_env!("FOODBRIDGE_SUPABASE_URL");
const SUPABASE_ANON_KEY: Option<&str> = option_env!("FOODBRIDGE_SUPABASE_ANON_KEY");

impl Config {
    /// 从构建时环境变量加载配置
    pub fn from_build_env() -> Result<Self, String> {
        match (SUPABASE_URL, SUPABASE_ANON_KEY) {
            (Some(url), Some(key)) if !url.is_empty() && !key.is_empty() => Ok(Self {
                supabase_url: url.trim_end_matches('/').to_string(),
                supabase_anon_key: key.to_string(),
            }),
            _ => Err(
                "Missing Supabase environment variables: set FOODBRIDGE_SUPABASE_URL \
                 and FOODBRIDGE_SUPABASE_ANON_KEY at build time"
                    .to_string(),
            ),
        }
    }
}
