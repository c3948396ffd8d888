//! 新建作业表单组件
//!
//! 提交成功后重置表单并通知父组件刷新列表；
//! 失败时内联展示服务端消息，保留用户输入以便修改后重试。

use leptos::prelude::*;
use leptos::task::spawn_local;

use gpufarm_shared::Job;

use crate::auth::{handle_api_error, use_auth};

mod form_state;

use form_state::JobFormState;

/// 可选的 GPU 型号（权威校验在服务端）
const GPU_TYPES: [&str; 4] = ["A100", "H100", "V100", "T4"];

#[component]
pub fn JobForm(#[prop(into)] on_created: Callback<Job>) -> impl IntoView {
    let auth_ctx = use_auth();
    let auth_state = auth_ctx.state;

    let state = JobFormState::new();
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        let Some(api) = auth_state.get_untracked().api else {
            return;
        };
        let request = state.to_request();

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            match api.create_job(&request).await {
                Ok(job) => {
                    state.reset();
                    on_created.run(job);
                }
                Err(err) => {
                    // 失败不重置表单，保留输入供修正
                    set_error_msg.set(Some(handle_api_error(&auth_ctx, &err)));
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h3 class="card-title">"提交新作业"</h3>

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error text-sm py-2">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <form on:submit=on_submit class="space-y-4">
                    <div class="form-control">
                        <label for="job-name" class="label">
                            <span class="label-text">"作业名称"</span>
                        </label>
                        <input id="job-name" required
                            type="text"
                            placeholder="bert-finetune"
                            on:input=move |ev| state.name.set(event_target_value(&ev))
                            prop:value=move || state.name.get()
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="grid grid-cols-3 gap-4">
                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"GPU 型号"</span>
                            </label>
                            <select
                                class="select select-bordered w-full"
                                on:change=move |ev| state.gpu_type.set(event_target_value(&ev))
                            >
                                {GPU_TYPES
                                    .iter()
                                    .map(|gpu| {
                                        view! {
                                            <option
                                                value=*gpu
                                                selected=move || state.gpu_type.get() == *gpu
                                            >
                                                {*gpu}
                                            </option>
                                        }
                                    })
                                    .collect_view()}
                            </select>
                        </div>
                        <div class="form-control">
                            <label for="num-gpus" class="label">
                                <span class="label-text">"GPU 数量"</span>
                            </label>
                            <input id="num-gpus" required
                                type="number" min="1"
                                class="input input-bordered w-full"
                                prop:value=move || state.num_gpus.get().to_string()
                                on:input=move |ev| {
                                    if let Ok(val) = event_target_value(&ev).parse::<u32>() {
                                        state.num_gpus.set(val);
                                    }
                                }
                            />
                        </div>
                        <div class="form-control">
                            <label for="estimated-hours" class="label">
                                <span class="label-text">"预估时长 (小时)"</span>
                            </label>
                            <input id="estimated-hours" required
                                type="number" min="0.5" step="0.5"
                                class="input input-bordered w-full"
                                prop:value=move || state.estimated_hours.get().to_string()
                                on:input=move |ev| {
                                    if let Ok(val) = event_target_value(&ev).parse::<f64>() {
                                        state.estimated_hours.set(val);
                                    }
                                }
                            />
                        </div>
                    </div>

                    <div class="form-control">
                        <label for="command" class="label">
                            <span class="label-text">"运行命令"</span>
                        </label>
                        <textarea id="command" required
                            placeholder="python train.py --epochs 3"
                            class="textarea textarea-bordered w-full font-mono"
                            on:input=move |ev| state.command.set(event_target_value(&ev))
                            prop:value=move || state.command.get()
                        ></textarea>
                    </div>

                    <div class="form-control">
                        <label for="data-location" class="label">
                            <span class="label-text">"数据位置 (可选)"</span>
                        </label>
                        <input id="data-location"
                            type="text"
                            placeholder="s3://bucket/dataset"
                            on:input=move |ev| state.data_location.set(event_target_value(&ev))
                            prop:value=move || state.data_location.get()
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="form-control">
                        <label class="label cursor-pointer">
                            <span class="label-text">"包含敏感数据"</span>
                            <input type="checkbox" class="toggle toggle-warning"
                                prop:checked=move || state.is_sensitive.get()
                                on:change=move |ev| state.is_sensitive.set(event_target_checked(&ev))
                            />
                        </label>
                    </div>

                    <div class="form-control mt-2">
                        <button type="submit" disabled=move || is_submitting.get() class="btn btn-primary">
                            {move || if is_submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "提交中..." }.into_any()
                            } else {
                                "提交作业".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
