//! 会话模块
//!
//! 管理当前浏览器会话的凭据与身份，与路由系统解耦：
//! 路由服务通过注入的会话信号执行守卫。
//!
//! 凭据是唯一的持久化状态，保存在 LocalStorage 的单一键下，
//! 登录时覆写、登出或任一接口返回 401 时删除。

use leptos::prelude::*;
use leptos::task::spawn_local;

use gpufarm_shared::{STORAGE_TOKEN_KEY, UserInfo};

use crate::api::{ApiError, GpuFarmApi};
use crate::web::LocalStorage;
use crate::web::route::AppRoute;
use crate::web::router::SessionSignals;

/// 会话状态
#[derive(Clone, Default)]
pub struct AuthState {
    /// API 客户端实例（仅在认证成功后存在）
    pub api: Option<GpuFarmApi>,
    /// 当前用户身份（与 api 同生命周期）
    pub user: Option<UserInfo>,
    /// 是否已认证
    pub is_authenticated: bool,
    /// 是否正在校验恢复的凭据
    pub is_loading: bool,
}

/// 会话上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
/// 页面进入时创建、离开时随组件树一同丢弃，取代模块级全局状态。
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self { state, set_state }
    }

    /// 供路由服务注入的会话信号组
    pub fn session_signals(&self) -> SessionSignals {
        let state = self.state;
        SessionSignals {
            is_ready: Signal::derive(move || !state.get().is_loading),
            is_authenticated: Signal::derive(move || state.get().is_authenticated),
            is_admin: Signal::derive(move || {
                state.get().user.as_ref().is_some_and(|u| u.is_admin)
            }),
        }
    }
}

/// 从 Context 获取会话上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化会话状态
///
/// 从 LocalStorage 恢复凭据，并向身份端点校验其有效性；
/// 校验失败（包括 401）时丢弃凭据。
pub fn init_auth(ctx: &AuthContext) {
    let Some(token) = LocalStorage::get(STORAGE_TOKEN_KEY) else {
        ctx.set_state.update(|state| state.is_loading = false);
        return;
    };

    ctx.set_state.update(|state| state.is_loading = true);
    let set_state = ctx.set_state;

    spawn_local(async move {
        let api = GpuFarmApi::new(token);
        match api.me().await {
            Ok(user) => set_state.update(|state| {
                state.api = Some(api);
                state.user = Some(user);
                state.is_authenticated = true;
                state.is_loading = false;
            }),
            Err(_) => {
                LocalStorage::delete(STORAGE_TOKEN_KEY);
                set_state.update(|state| *state = AuthState::default());
            }
        }
    });
}

/// 登录并建立会话
///
/// 成功返回按角色分流的落地路由。身份端点在拿到凭据后
/// 仍然失败时，整个登录按失败处理并丢弃凭据（fail-closed），
/// 不再静默退回普通面板。
pub async fn login(ctx: &AuthContext, email: String, password: String) -> Result<AppRoute, String> {
    let token = GpuFarmApi::login(&email, &password)
        .await
        .map_err(|err| match err {
            ApiError::Network(_) => "无法连接到服务器，请稍后重试".to_string(),
            other => other
                .detail()
                .map(str::to_string)
                .unwrap_or_else(|| "邮箱或密码错误".to_string()),
        })?;

    let api = GpuFarmApi::new(token.access_token.clone());
    match api.me().await {
        Ok(user) => {
            LocalStorage::set(STORAGE_TOKEN_KEY, &token.access_token);
            let target = AppRoute::post_login(user.is_admin);
            ctx.set_state.update(|state| {
                state.api = Some(api);
                state.user = Some(user);
                state.is_authenticated = true;
                state.is_loading = false;
            });
            Ok(target)
        }
        Err(_) => {
            LocalStorage::delete(STORAGE_TOKEN_KEY);
            Err("无法获取用户信息，请重试".to_string())
        }
    }
}

/// 注销并清除状态
///
/// 任一接口观察到 401 时也走这条路径：凭据对本会话余下的
/// 时间视为无效。导航由路由服务的会话监听自动处理。
pub fn logout(ctx: &AuthContext) {
    LocalStorage::delete(STORAGE_TOKEN_KEY);
    ctx.set_state.update(|state| *state = AuthState::default());
}

/// 统一的接口错误处理：401 强制登出，其余返回展示消息
pub fn handle_api_error(ctx: &AuthContext, err: &ApiError) -> String {
    if *err == ApiError::Unauthorized {
        logout(ctx);
    }
    err.user_message()
}
