//! FoodBridge 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `supabase`: 托管后端适配器
//! - `auth`: 认证状态管理
//! - `hooks`: 表数据钩子
//! - `workflow`: 捐赠 / 领取流程状态机
//! - `components`: UI 组件层

mod auth;
mod components {
    mod background_circles;
    pub mod home;
    mod icons;
    mod login_panel;
    pub mod password_recovery;
    pub mod register;
    pub mod welcome;
}
mod config;
mod hooks;
mod supabase;
mod workflow;

use crate::auth::{AuthContext, init_auth, start_session_keepalive};
use crate::components::home::HomePage;
use crate::components::password_recovery::PasswordRecoveryPage;
use crate::components::register::RegisterPage;
use crate::components::welcome::WelcomePage;
use crate::config::Config;
use crate::supabase::SupabaseClient;

use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod http;
    pub mod route;
    pub mod router;
    mod storage;
    mod timer;

    pub use http::{HttpClient, HttpRequestBuilder};
    pub use storage::LocalStorage;
    pub use timer::Interval;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::PasswordRecovery => view! { <PasswordRecoveryPage /> }.into_any(),
        AppRoute::Welcome => view! { <WelcomePage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-[#0B0B39] text-white">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-orange-500">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 后端配置缺失时拒绝启动，只渲染错误页面
    let config = match Config::from_build_env() {
        Ok(config) => config,
        Err(message) => {
            return view! {
                <div class="flex items-center justify-center min-h-screen bg-[#0B0B39] text-white">
                    <div class="text-center max-w-xl px-8">
                        <h1 class="text-3xl font-bold text-red-400 mb-4">"Configuration error"</h1>
                        <p class="text-gray-300">{message}</p>
                    </div>
                </div>
            }
            .into_any();
        }
    };

    // 1. 创建认证上下文
    let client = SupabaseClient::new(config.supabase_url, config.supabase_anon_key);
    let auth_ctx = AuthContext::new(client);
    provide_context(auth_ctx);

    // 2. 初始化认证状态（从 LocalStorage 恢复会话）
    init_auth(&auth_ctx);

    // 3. 会话保活定时器，应用卸载时注销
    let keepalive = send_wrapper::SendWrapper::new(start_session_keepalive(&auth_ctx));
    on_cleanup(move || drop(keepalive));

    // 4. 获取认证状态信号，用于注入路由服务（解耦！）
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        // 路由器组件：注入认证信号实现守卫
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
    .into_any()
}
