//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程。
//! 守卫所需的会话状态以信号形式注入，与认证系统解耦。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 注入路由服务的会话信号组
///
/// `is_ready` 为 false 表示凭据校验仍在进行，守卫暂缓判定，
/// 校验完成后由会话监听 Effect 统一纠正当前路由。
#[derive(Clone, Copy)]
pub struct SessionSignals {
    pub is_ready: Signal<bool>,
    pub is_authenticated: Signal<bool>,
    pub is_admin: Signal<bool>,
}

/// **守卫裁决：目标路由在当前会话下应跳转到哪里**
///
/// 返回 None 表示放行。纯函数，便于单独测试。
fn redirect_target(route: AppRoute, is_auth: bool, is_admin: bool) -> Option<AppRoute> {
    if route.requires_auth() && !is_auth {
        return Some(AppRoute::auth_failure_redirect());
    }
    if is_auth && route.requires_admin() && !is_admin {
        return Some(AppRoute::Dashboard);
    }
    if is_auth && route.should_redirect_when_authenticated() {
        return Some(AppRoute::post_login(is_admin));
    }
    None
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 会话状态（注入的信号，实现解耦）
    session: SessionSignals,
}

impl RouterService {
    fn new(session: SessionSignals) -> Self {
        // 初始化当前路由（从 URL 解析）
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            session,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    pub fn navigate(&self, path: &str) {
        let target_route = AppRoute::from_path(path);
        self.navigate_to_route(target_route, true);
    }

    /// 导航到指定路由
    ///
    /// # Arguments
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        // 会话尚未就绪：先加载目标，就绪后由监听 Effect 纠正
        let resolved = if self.session.is_ready.get_untracked() {
            let is_auth = self.session.is_authenticated.get_untracked();
            let is_admin = self.session.is_admin.get_untracked();
            match redirect_target(target_route, is_auth, is_admin) {
                Some(redirect) => {
                    web_sys::console::log_1(
                        &format!("[Router] Guard redirect: {} -> {}", target_route, redirect)
                            .into(),
                    );
                    redirect
                }
                None => target_route,
            }
        } else {
            target_route
        };

        if use_push {
            push_history_state(resolved.to_path());
        } else {
            replace_history_state(resolved.to_path());
        }
        self.set_route.set(resolved);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let session = self.session;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());

            // popstate 时也执行守卫逻辑
            if session.is_ready.get_untracked() {
                let is_auth = session.is_authenticated.get_untracked();
                let is_admin = session.is_admin.get_untracked();
                if let Some(redirect) = redirect_target(target_route, is_auth, is_admin) {
                    replace_history_state(redirect.to_path());
                    set_route.set(redirect);
                    return;
                }
            }
            set_route.set(target_route);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置会话状态变化时的自动重定向
    ///
    /// 覆盖三种时机：凭据校验完成、登录成功、登出/会话失效。
    fn setup_session_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let session = self.session;

        Effect::new(move |_| {
            if !session.is_ready.get() {
                return;
            }
            let is_auth = session.is_authenticated.get();
            let is_admin = session.is_admin.get();
            let route = current_route.get_untracked();

            if let Some(redirect) = redirect_target(route, is_auth, is_admin) {
                web_sys::console::log_1(
                    &format!("[Router] Session changed, redirecting to {}", redirect).into(),
                );
                push_history_state(redirect.to_path());
                set_route.set(redirect);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(session: SessionSignals) -> RouterService {
    let router = RouterService::new(session);

    router.init_popstate_listener();
    router.setup_session_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

/// 导航函数（返回一个可调用的闭包）
pub fn use_navigate() -> impl Fn(&str) + Clone {
    let router = use_router();
    move |to: &str| {
        router.navigate(to);
    }
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 会话信号组
    session: SessionSignals,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(session);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthenticated_cannot_reach_protected_routes() {
        assert_eq!(
            redirect_target(AppRoute::Dashboard, false, false),
            Some(AppRoute::Login)
        );
        assert_eq!(
            redirect_target(AppRoute::Admin, false, false),
            Some(AppRoute::Login)
        );
        assert_eq!(redirect_target(AppRoute::Login, false, false), None);
        assert_eq!(redirect_target(AppRoute::Register, false, false), None);
    }

    #[test]
    fn test_non_admin_is_sent_to_dashboard() {
        assert_eq!(
            redirect_target(AppRoute::Admin, true, false),
            Some(AppRoute::Dashboard)
        );
        assert_eq!(redirect_target(AppRoute::Admin, true, true), None);
    }

    #[test]
    fn test_authenticated_leaves_entry_pages() {
        assert_eq!(
            redirect_target(AppRoute::Login, true, false),
            Some(AppRoute::Dashboard)
        );
        assert_eq!(
            redirect_target(AppRoute::Login, true, true),
            Some(AppRoute::Admin)
        );
        assert_eq!(
            redirect_target(AppRoute::Register, true, false),
            Some(AppRoute::Dashboard)
        );
    }

    #[test]
    fn test_protected_routes_pass_for_matching_role() {
        assert_eq!(redirect_target(AppRoute::Dashboard, true, false), None);
        assert_eq!(redirect_target(AppRoute::Dashboard, true, true), None);
        assert_eq!(redirect_target(AppRoute::NotFound, false, false), None);
    }
}
