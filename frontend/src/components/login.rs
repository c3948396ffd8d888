use crate::auth::{login, use_auth};
use crate::components::icons::ShieldCheck;
use crate::web::router::use_navigate;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 提示消息的自动消失时长
const ALERT_DISMISS_SECS: u64 = 5;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth_ctx = use_auth();
    let auth_state = auth_ctx.state;
    let navigate = use_navigate();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 错误提示 5 秒后自动消失
    Effect::new(move |_| {
        if error_msg.get().is_some() {
            set_timeout(
                move || set_error_msg.set(None),
                std::time::Duration::from_secs(ALERT_DISMISS_SECS),
            );
        }
    });

    let is_loading = move || auth_state.get().is_loading;

    view! {
        <Show when=move || !is_loading() fallback=|| view! { <div class="flex items-center justify-center min-h-screen"><span class="loading loading-spinner loading-lg text-primary"></span></div> }>
            {
                let navigate = navigate.clone();
                let goto_register = {
                    let navigate = navigate.clone();
                    move |ev: leptos::web_sys::MouseEvent| {
                        ev.prevent_default();
                        navigate("/register");
                    }
                };
                let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
                    ev.prevent_default();
                    if email.get().is_empty() || password.get().is_empty() {
                        set_error_msg.set(Some("请填写所有字段".to_string()));
                        return;
                    }

                    set_is_submitting.set(true);
                    set_error_msg.set(None);

                    let navigate = navigate.clone();
                    spawn_local(async move {
                        match login(&auth_ctx, email.get_untracked(), password.get_untracked())
                            .await
                        {
                            Ok(target) => navigate(target.to_path()),
                            Err(message) => set_error_msg.set(Some(message)),
                        }
                        set_is_submitting.set(false);
                    });
                };

                view! {
                    <div class="hero min-h-screen bg-base-200">
                        <div class="hero-content flex-col w-full max-w-md">
                            <div class="text-center mb-4">
                                <div class="flex flex-col items-center gap-2">
                                    <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                                        <ShieldCheck attr:class="h-8 w-8" />
                                    </div>
                                    <h1 class="text-3xl font-bold">"GpuFarm 控制台"</h1>
                                    <p class="text-base-content/70">
                                        "登录以提交和管理 GPU 作业"
                                    </p>
                                </div>
                            </div>

                            <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                                <form class="card-body" on:submit=on_submit>
                                    <Show when=move || error_msg.get().is_some()>
                                        <div role="alert" class="alert alert-error text-sm py-2">
                                            <span>{move || error_msg.get().unwrap_or_default()}</span>
                                        </div>
                                    </Show>

                                    <div class="form-control">
                                        <label class="label" for="email">
                                            <span class="label-text">"邮箱"</span>
                                        </label>
                                        <input
                                            id="email"
                                            type="email"
                                            placeholder="you@example.com"
                                            on:input=move |ev| set_email.set(event_target_value(&ev))
                                            prop:value=email
                                            class="input input-bordered"
                                            required
                                        />
                                    </div>
                                    <div class="form-control">
                                        <label class="label" for="password">
                                            <span class="label-text">"密码"</span>
                                        </label>
                                        <input
                                            id="password"
                                            type="password"
                                            placeholder="••••••••"
                                            on:input=move |ev| set_password.set(event_target_value(&ev))
                                            prop:value=password
                                            class="input input-bordered"
                                            required
                                        />
                                    </div>
                                    <div class="form-control mt-6">
                                        <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                            {move || if is_submitting.get() {
                                                view! { <span class="loading loading-spinner"></span> "登录中..." }.into_any()
                                            } else {
                                                "登录".into_any()
                                            }}
                                        </button>
                                    </div>
                                    <p class="text-center text-sm text-base-content/70 mt-2">
                                        "还没有账号？"
                                        <a href="/register" class="link link-primary" on:click=goto_register>
                                            "立即注册"
                                        </a>
                                    </p>
                                </form>
                            </div>
                        </div>
                    </div>
                }
            }
        </Show>
    }
}
