use crate::api::{ApiError, GpuFarmApi};
use crate::components::icons::ShieldCheck;
use crate::web::router::use_navigate;
use gpufarm_shared::RegisterRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

mod validate;

use validate::{RegisterInput, password_score, password_strength, validate};

/// 提示消息的自动消失时长
const ALERT_DISMISS_SECS: u64 = 5;
/// 注册成功后跳转登录页前的停留时长
const REDIRECT_DELAY_SECS: u64 = 2;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let navigate = use_navigate();

    let (full_name, set_full_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (accept_terms, set_accept_terms) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (success_msg, set_success_msg) = signal(Option::<String>::None);

    // 错误提示 5 秒后自动消失；成功提示保留到跳转
    Effect::new(move |_| {
        if error_msg.get().is_some() {
            set_timeout(
                move || set_error_msg.set(None),
                std::time::Duration::from_secs(ALERT_DISMISS_SECS),
            );
        }
    });

    let on_submit = {
        let navigate = navigate.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();

            let input_email = email.get();
            let input_password = password.get();
            let input_confirm = confirm.get();
            if let Err(field_error) = validate(&RegisterInput {
                email: input_email.trim(),
                password: &input_password,
                confirm_password: &input_confirm,
                accept_terms: accept_terms.get(),
            }) {
                set_error_msg.set(Some(field_error.message().to_string()));
                return;
            }

            set_is_submitting.set(true);
            set_error_msg.set(None);

            let request = RegisterRequest {
                email: input_email.trim().to_string(),
                full_name: full_name.get().trim().to_string(),
                password: input_password,
            };

            let navigate = navigate.clone();
            spawn_local(async move {
                match GpuFarmApi::register(&request).await {
                    Ok(_) => {
                        set_success_msg
                            .set(Some("注册成功！正在跳转到登录页...".to_string()));
                        set_full_name.set(String::new());
                        set_email.set(String::new());
                        set_password.set(String::new());
                        set_confirm.set(String::new());
                        set_accept_terms.set(false);
                        set_timeout(
                            move || navigate("/"),
                            std::time::Duration::from_secs(REDIRECT_DELAY_SECS),
                        );
                    }
                    Err(ApiError::Api {
                        status: 400,
                        detail: Some(detail),
                    }) if detail == "Email already registered" => {
                        set_error_msg.set(Some("该邮箱已注册，请直接登录".to_string()));
                    }
                    Err(ApiError::Network(_)) => {
                        set_error_msg.set(Some("无法连接到服务器，请稍后重试".to_string()));
                    }
                    Err(err) => {
                        let message = err
                            .detail()
                            .map(str::to_string)
                            .unwrap_or_else(|| "注册失败，请重试".to_string());
                        set_error_msg.set(Some(message));
                    }
                }
                set_is_submitting.set(false);
            });
        }
    };

    let goto_login = {
        let navigate = navigate.clone();
        move |ev: leptos::web_sys::MouseEvent| {
            ev.prevent_default();
            navigate("/");
        }
    };

    // 口令强度仅作提示，从不阻止提交
    let strength = move || password_strength(&password.get());
    let score = move || password_score(&password.get());
    let passwords_match = move || password.get() == confirm.get();

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <ShieldCheck attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"注册 GpuFarm 账号"</h1>
                        <p class="text-base-content/70">"创建账号以提交 GPU 作业"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>
                        <Show when=move || success_msg.get().is_some()>
                            <div role="alert" class="alert alert-success text-sm py-2">
                                <span>{move || success_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="full-name">
                                <span class="label-text">"姓名"</span>
                            </label>
                            <input
                                id="full-name"
                                type="text"
                                placeholder="张三"
                                on:input=move |ev| set_full_name.set(event_target_value(&ev))
                                prop:value=full_name
                                class="input input-bordered"
                                required
                            />
                        </div>
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
                                placeholder="至少 6 个字符"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                            // 强度条：仅在开始输入后出现
                            <Show when=move || !password.get().is_empty()>
                                <div class="flex items-center gap-2 mt-2">
                                    <progress
                                        class=move || format!("progress w-full {}", strength().meter_class())
                                        prop:value=move || score().to_string()
                                        max="5"
                                    ></progress>
                                    <span class="text-xs text-base-content/70 whitespace-nowrap">
                                        {move || strength().label()}
                                    </span>
                                </div>
                            </Show>
                        </div>
                        <div class="form-control">
                            <label class="label" for="confirm-password">
                                <span class="label-text">"确认密码"</span>
                            </label>
                            <input
                                id="confirm-password"
                                type="password"
                                placeholder="再次输入密码"
                                on:input=move |ev| set_confirm.set(event_target_value(&ev))
                                prop:value=confirm
                                class="input input-bordered"
                                required
                            />
                            <Show when=move || !confirm.get().is_empty()>
                                {move || if passwords_match() {
                                    view! { <span class="label-text-alt text-success mt-1">"✓ 两次密码一致"</span> }.into_any()
                                } else {
                                    view! { <span class="label-text-alt text-error mt-1">"✗ 两次密码不一致"</span> }.into_any()
                                }}
                            </Show>
                        </div>
                        <div class="form-control mt-2">
                            <label class="label cursor-pointer justify-start gap-3">
                                <input
                                    type="checkbox"
                                    class="checkbox checkbox-primary"
                                    prop:checked=accept_terms
                                    on:change=move |ev| set_accept_terms.set(event_target_checked(&ev))
                                />
                                <span class="label-text">"我已阅读并同意服务条款"</span>
                            </label>
                        </div>
                        <div class="form-control mt-4">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "注册中..." }.into_any()
                                } else {
                                    "注册".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm text-base-content/70 mt-2">
                            "已有账号？"
                            <a href="/" class="link link-primary" on:click=goto_login>
                                "直接登录"
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
