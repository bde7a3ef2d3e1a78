//! 认证模块
//!
//! 进程内唯一的会话持有者，与路由系统解耦：路由服务通过注入的认证信号
//! 检查认证状态。启动时从 LocalStorage 恢复上次会话，之后由周期性的
//! 刷新定时器保活（定时器被 drop 时即注销监听）。

use crate::supabase::{SessionError, SupabaseClient};
use crate::web::{Interval, LocalStorage};
use foodbridge_shared::{AuthUser, NewProfile, Profile, SignUpAttrs, UserType};
use leptos::prelude::*;

const STORAGE_ACCESS_TOKEN_KEY: &str = "foodbridge_access_token";
const STORAGE_REFRESH_TOKEN_KEY: &str = "foodbridge_refresh_token";

/// 会话刷新间隔：45 分钟（访问令牌默认一小时过期）
const SESSION_REFRESH_MILLIS: u32 = 45 * 60 * 1000;

/// 认证状态
#[derive(Clone)]
pub struct AuthState {
    /// 后端客户端；登录后携带访问令牌
    pub client: SupabaseClient,
    /// 当前用户（无会话时为 None）
    pub user: Option<AuthUser>,
    /// 当前用户的档案（可能尚未建立）
    pub profile: Option<Profile>,
    /// 启动时的会话恢复是否还在进行
    pub is_loading: bool,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    /// 创建新的认证上下文（尚未认证，等待 `init_auth` 恢复会话）
    pub fn new(client: SupabaseClient) -> Self {
        let (state, set_state) = signal(AuthState {
            client,
            user: None,
            profile: None,
            is_loading: true,
        });
        Self { state, set_state }
    }

    /// 认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated())
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

fn persist_session(access_token: &str, refresh_token: &str) {
    LocalStorage::set(STORAGE_ACCESS_TOKEN_KEY, access_token);
    LocalStorage::set(STORAGE_REFRESH_TOKEN_KEY, refresh_token);
}

fn clear_session() {
    LocalStorage::delete(STORAGE_ACCESS_TOKEN_KEY);
    LocalStorage::delete(STORAGE_REFRESH_TOKEN_KEY);
}

/// 只有后端明确拒绝才丢弃持久化令牌，网络抖动留着下次重试
fn should_discard_tokens(err: &SessionError) -> bool {
    matches!(err, SessionError::Rejected(_))
}

/// 把认证成功的会话写入状态并持久化令牌
fn install_session(
    ctx: &AuthContext,
    client: SupabaseClient,
    user: AuthUser,
    profile: Option<Profile>,
) {
    ctx.set_state.update(|state| {
        state.client = client;
        state.user = Some(user);
        state.profile = profile;
        state.is_loading = false;
    });
}

async fn load_profile(client: &SupabaseClient, user_id: &str) -> Option<Profile> {
    // 档案可能尚未建立，取不到不算错误
    client.get_profile(user_id).await.ok()
}

/// 初始化认证状态
///
/// 用持久化的令牌询问后端是否还有有效会话；访问令牌过期时尝试用
/// refresh token 换新，两者都失效则回到未登录状态。
pub fn init_auth(ctx: &AuthContext) {
    let ctx = *ctx;
    leptos::task::spawn_local(async move {
        let anon = ctx.state.get_untracked().client.clone();

        let Some(access_token) = LocalStorage::get(STORAGE_ACCESS_TOKEN_KEY) else {
            ctx.set_state.update(|state| state.is_loading = false);
            return;
        };

        let client = anon.with_token(&access_token);
        match client.get_current_user().await {
            Ok(user) => {
                web_sys::console::log_1(&"[Auth] session restored".into());
                let profile = load_profile(&client, &user.id).await;
                install_session(&ctx, client, user, profile);
            }
            Err(err) if !should_discard_tokens(&err) => {
                // 网络抖动：令牌留着，下次启动或保活定时器再试
                web_sys::console::log_1(&"[Auth] session check unreachable, keeping tokens".into());
                ctx.set_state.update(|state| state.is_loading = false);
            }
            Err(_) => match try_refresh(&anon).await {
                Ok((client, user)) => {
                    web_sys::console::log_1(&"[Auth] session refreshed on startup".into());
                    let profile = load_profile(&client, &user.id).await;
                    install_session(&ctx, client, user, profile);
                }
                Err(err) => {
                    if should_discard_tokens(&err) {
                        clear_session();
                    }
                    ctx.set_state.update(|state| state.is_loading = false);
                }
            },
        }
    });
}

async fn try_refresh(anon: &SupabaseClient) -> Result<(SupabaseClient, AuthUser), SessionError> {
    let refresh_token = LocalStorage::get(STORAGE_REFRESH_TOKEN_KEY)
        .ok_or_else(|| SessionError::Rejected("no refresh token stored".to_string()))?;
    let session = anon.refresh_session(&refresh_token).await?;
    persist_session(&session.access_token, &session.refresh_token);
    Ok((anon.with_token(&session.access_token), session.user))
}

/// 启动会话保活定时器
///
/// 返回的 `Interval` 决定订阅的生命周期，调用方应在应用退出时 drop 它
/// （组件内用 `on_cleanup`）。
pub fn start_session_keepalive(ctx: &AuthContext) -> Interval {
    let ctx = *ctx;
    Interval::new(SESSION_REFRESH_MILLIS, move || {
        leptos::task::spawn_local(async move {
            let state = ctx.state.get_untracked();
            if !state.is_authenticated() {
                return;
            }

            let anon = state.client.clone();
            match try_refresh(&anon).await {
                Ok((client, user)) => {
                    web_sys::console::log_1(&"[Auth] session refreshed".into());
                    let profile = load_profile(&client, &user.id).await;
                    install_session(&ctx, client, user, profile);
                }
                Err(err) if should_discard_tokens(&err) => {
                    // 后端拒绝刷新：会话已失效，回到未登录状态
                    web_sys::console::log_1(&"[Auth] session expired, signing out".into());
                    clear_session();
                    ctx.set_state.update(|state| {
                        state.user = None;
                        state.profile = None;
                        state.is_loading = false;
                    });
                }
                Err(_) => {
                    // 网络抖动：保持当前会话，下个周期再试
                    web_sys::console::log_1(&"[Auth] session refresh unreachable, will retry".into());
                }
            }
        });
    })
}

/// 登录并保存会话
pub async fn sign_in(ctx: &AuthContext, email: String, password: String) -> Result<(), String> {
    let anon = ctx.state.get_untracked().client.clone();
    let session = anon.sign_in(&email, &password).await?;

    persist_session(&session.access_token, &session.refresh_token);
    let client = anon.with_token(&session.access_token);
    let profile = load_profile(&client, &session.user.id).await;
    install_session(ctx, client, session.user, profile);
    Ok(())
}

/// 注册账号并建立档案
pub async fn sign_up(
    ctx: &AuthContext,
    username: String,
    email: String,
    password: String,
) -> Result<(), String> {
    let anon = ctx.state.get_untracked().client.clone();

    let attrs = SignUpAttrs {
        full_name: Some(username.clone()),
        user_type: Some(UserType::Both),
    };
    let session = anon.sign_up(&email, &password, &attrs).await?;

    persist_session(&session.access_token, &session.refresh_token);
    let client = anon.with_token(&session.access_token);

    let new_profile = NewProfile {
        id: session.user.id.clone(),
        email: email.clone(),
        full_name: Some(username),
        phone: None,
        address: None,
        user_type: Some(UserType::Both),
    };
    // 数据库触发器可能已经建好档案，插入失败就改读
    let profile = match client.create_profile(&new_profile).await {
        Ok(profile) => Some(profile),
        Err(_) => load_profile(&client, &session.user.id).await,
    };

    install_session(ctx, client, session.user, profile);
    Ok(())
}

/// 注销并清除状态
///
/// 导航由路由服务的认证状态监听自动处理。
pub async fn sign_out(ctx: &AuthContext) {
    let client = ctx.state.get_untracked().client.clone();
    // 后端注销失败也照常清理本地会话
    let _ = client.sign_out().await;

    clear_session();
    ctx.set_state.update(|state| {
        state.user = None;
        state.profile = None;
        state.is_loading = false;
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_tokens_are_discarded() {
        let err = SessionError::Rejected("Invalid token".to_string());
        assert!(should_discard_tokens(&err));
    }

    #[test]
    fn network_failures_keep_the_stored_tokens() {
        let err = SessionError::Unreachable("fetch failed".to_string());
        assert!(!should_discard_tokens(&err));
    }
}
