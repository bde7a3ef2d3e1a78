//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 登录 / 注册 / 找回密码是公开页面；工作台只对已登录用户开放。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录首页：捐赠 / 接收双面板 (默认路由)
    #[default]
    Home,
    /// 注册页面
    Register,
    /// 找回密码页面
    PasswordRecovery,
    /// 工作台：捐赠提交与请求流程 (需要认证)
    Welcome,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" => Self::Home,
            "/register" => Self::Register,
            "/password-recovery" => Self::PasswordRecovery,
            "/welcome" => Self::Welcome,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Register => "/register",
            Self::PasswordRecovery => "/password-recovery",
            Self::Welcome => "/welcome",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Welcome)
    }

    /// 已认证用户是否应该离开此路由（登录 / 注册 / 找回密码）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Home | Self::Register | Self::PasswordRecovery)
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Home
    }

    /// 认证成功时的重定向目标
    pub fn auth_success_redirect() -> Self {
        Self::Welcome
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 守卫裁决：导航请求经过认证检查后的落点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// 目标路由允许访问
    Allow(AppRoute),
    /// 重定向到其他路由
    Redirect(AppRoute),
}

impl Resolution {
    pub fn route(&self) -> AppRoute {
        match self {
            Resolution::Allow(r) | Resolution::Redirect(r) => *r,
        }
    }
}

/// 对目标路由执行守卫检查
///
/// 未认证访问受保护页面 → 登录首页；已认证访问公开页面 → 工作台。
pub fn resolve(target: AppRoute, is_authenticated: bool) -> Resolution {
    if target.requires_auth() && !is_authenticated {
        return Resolution::Redirect(AppRoute::auth_failure_redirect());
    }
    if target.should_redirect_when_authenticated() && is_authenticated {
        return Resolution::Redirect(AppRoute::auth_success_redirect());
    }
    Resolution::Allow(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_entry_points() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/register"), AppRoute::Register);
        assert_eq!(
            AppRoute::from_path("/password-recovery"),
            AppRoute::PasswordRecovery
        );
        assert_eq!(AppRoute::from_path("/welcome"), AppRoute::Welcome);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
    }

    #[test]
    fn path_round_trips() {
        for route in [
            AppRoute::Home,
            AppRoute::Register,
            AppRoute::PasswordRecovery,
            AppRoute::Welcome,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }

    #[test]
    fn guest_is_kept_off_the_welcome_page() {
        assert_eq!(
            resolve(AppRoute::Welcome, false),
            Resolution::Redirect(AppRoute::Home)
        );
    }

    #[test]
    fn authenticated_user_skips_public_pages() {
        for route in [
            AppRoute::Home,
            AppRoute::Register,
            AppRoute::PasswordRecovery,
        ] {
            assert_eq!(
                resolve(route, true),
                Resolution::Redirect(AppRoute::Welcome)
            );
        }
    }

    #[test]
    fn public_pages_are_open_to_guests() {
        assert_eq!(
            resolve(AppRoute::Register, false),
            Resolution::Allow(AppRoute::Register)
        );
        assert_eq!(
            resolve(AppRoute::NotFound, false),
            Resolution::Allow(AppRoute::NotFound)
        );
    }
}
