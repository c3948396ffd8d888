//! GpuFarm 前端应用
//!
//! GPU 作业提交平台的浏览器端控制台，采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎，注入会话信号实现守卫）
//! - `auth`: 会话状态管理（凭据持久化、身份校验、登出）
//! - `api`: 类型化的 REST 客户端
//! - `components`: 页面组件层（登录 / 注册 / 用户面板 / 管理面板）

mod api;
mod auth;
mod components {
    pub mod admin;
    pub mod dashboard;
    mod icons;
    mod job_form;
    pub mod login;
    pub mod register;
    mod status_badge;
}

use crate::auth::{AuthContext, init_auth};
use crate::components::admin::AdminPage;
use crate::components::dashboard::DashboardPage;
use crate::components::login::LoginPage;
use crate::components::register::RegisterPage;

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

    pub use http::{HttpClient, HttpResponse};
    pub use storage::LocalStorage;
    pub use timer::{Interval, PollGuard, PollTicket};
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Admin => view! { <AdminPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"页面未找到"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建会话上下文
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. 初始化会话状态（从 LocalStorage 恢复凭据并向身份端点校验）
    init_auth(&auth_ctx);

    // 3. 提取会话信号，注入路由服务（解耦！）
    let session = auth_ctx.session_signals();

    view! {
        // 4. 路由器组件：注入会话信号实现守卫
        <Router session=session>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
