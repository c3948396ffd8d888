use crate::auth::{handle_api_error, logout, use_auth};
use crate::components::icons::{Check, Cpu, Eye, LogOut, Play, RefreshCw, Search, TriangleAlert, X};
use crate::components::status_badge::StatusBadge;
use crate::web::router::use_navigate;
use crate::web::{Interval, PollGuard, PollTicket};
use gpufarm_shared::Job;
use gpufarm_shared::date::{format_date, format_hours};
use gpufarm_shared::query::{JobStats, filter_jobs};
use gpufarm_shared::status::{JobAction, JobStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;

mod actions;
mod job_detail_dialog;

use actions::{AdminButton, action_buttons, normalize_fail_reason};
use job_detail_dialog::JobDetailDialog;

/// 作业列表的轮询周期
const POLL_INTERVAL_MS: u32 = 30_000;
/// 提示消息的自动消失时长
const ALERT_DISMISS_SECS: u64 = 5;

fn action_icon(action: JobAction) -> AnyView {
    match action {
        JobAction::Approve => view! { <Check attr:class="h-4 w-4" /> }.into_any(),
        JobAction::Reject => view! { <X attr:class="h-4 w-4" /> }.into_any(),
        JobAction::Start => view! { <Play attr:class="h-4 w-4" /> }.into_any(),
        JobAction::Complete => view! { <Check attr:class="h-4 w-4" /> }.into_any(),
        JobAction::Fail => view! { <TriangleAlert attr:class="h-4 w-4" /> }.into_any(),
    }
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let auth_ctx = use_auth();
    let auth_state = auth_ctx.state;
    let navigate = use_navigate();

    let (jobs, set_jobs) = signal(Vec::<Job>::new());
    let (loading_jobs, set_loading_jobs) = signal(true);
    let (notification, set_notification) = signal(Option::<(String, bool)>::None); // 消息内容, 是否出错
    let (search_term, set_search_term) = signal(String::new());
    let status_filter = RwSignal::new(Option::<JobStatus>::None);
    let detail_job = RwSignal::new(Option::<Job>::None);

    // 未认证或非管理员都不应停留在此页（路由服务也会兜底处理）
    Effect::new({
        let navigate = navigate.clone();
        move |_| {
            let state = auth_state.get();
            if state.is_loading {
                return;
            }
            if !state.is_authenticated {
                navigate("/");
            } else if !state.user.as_ref().is_some_and(|u| u.is_admin) {
                navigate("/dashboard");
            }
        }
    });

    // 整体替换作业缓存并重新推导表格与计数；
    // ticket 仅由轮询传入，持有到响应处理结束
    let load_all_jobs = move |ticket: Option<PollTicket>| {
        let state = auth_state.get_untracked();
        let Some(api) = state.api else {
            return;
        };
        set_loading_jobs.set(true);
        spawn_local(async move {
            let _ticket = ticket;
            match api.list_all_jobs(status_filter.get_untracked()).await {
                Ok(list) => set_jobs.set(list),
                Err(err) => {
                    let message = handle_api_error(&auth_ctx, &err);
                    set_notification.set(Some((format!("加载作业列表失败：{}", message), true)));
                }
            }
            set_loading_jobs.set(false);
        });
    };

    // 初始加载
    Effect::new(move |_| {
        let state = auth_state.get();
        let is_admin = state.user.as_ref().is_some_and(|u| u.is_admin);
        if state.is_authenticated && !state.is_loading && is_admin {
            load_all_jobs(None);
        }
    });

    // 30 秒轮询：句柄存入当前 Owner，视图销毁时一并丢弃（drop 即取消定时器）；
    // 上一次请求未返回时跳过本次触发
    let poll_guard = PollGuard::new();
    let _poll = StoredValue::new_local(Interval::new(POLL_INTERVAL_MS, {
        let poll_guard = poll_guard.clone();
        move || match poll_guard.try_begin() {
            Some(ticket) => load_all_jobs(Some(ticket)),
            None => web_sys::console::log_1(&"[Admin] Poll skipped, request in flight".into()),
        }
    }));

    // 提示 5 秒后自动清除
    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || set_notification.set(None),
                std::time::Duration::from_secs(ALERT_DISMISS_SECS),
            );
        }
    });

    // 生命周期操作：确认 -> (fail 额外要求原因) -> 请求 -> 整体刷新。
    // 不做乐观更新，成功后从服务端重新拉取真值；
    // 失败时表格保持上一次成功拉取的状态。
    let run_action = move |job_id: i64, action: JobAction| {
        let Some(window) = web_sys::window() else {
            return;
        };
        if !window
            .confirm_with_message(action.confirm_message())
            .unwrap_or(false)
        {
            return;
        }
        let reason = if action.requires_reason() {
            let input = window
                .prompt_with_message("请输入作业失败的原因：")
                .ok()
                .flatten();
            match normalize_fail_reason(input) {
                Some(reason) => Some(reason),
                // 取消或空白输入：放弃，不发请求
                None => return,
            }
        } else {
            None
        };

        let Some(api) = auth_state.get_untracked().api else {
            return;
        };
        spawn_local(async move {
            match api.job_action(job_id, action, reason).await {
                Ok(_) => {
                    set_notification.set(Some((action.success_message().to_string(), false)));
                    load_all_jobs(None);
                }
                Err(err) => {
                    let message = handle_api_error(&auth_ctx, &err);
                    set_notification.set(Some((message, true)));
                }
            }
        });
    };

    let on_logout = move |_| logout(&auth_ctx);

    // 计数永远来自本次拉取的完整缓存，搜索只影响表格
    let stats = move || jobs.with(|list| JobStats::from_jobs(list));
    let displayed_jobs = move || {
        jobs.with(|list| {
            filter_jobs(list, &search_term.get())
                .into_iter()
                .cloned()
                .collect::<Vec<Job>>()
        })
    };
    let admin_name = move || {
        auth_state
            .get()
            .user
            .map(|u| u.full_name)
            .unwrap_or_default()
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                // 通知提示框
                <Show when=move || notification.get().is_some()>
                    <div class="toast toast-top toast-end z-50">
                        <div class=move || {
                            let (_, is_err) = notification.get().unwrap_or_default();
                            if is_err {
                                "alert alert-error shadow-lg"
                            } else {
                                "alert alert-success shadow-lg"
                            }
                        }>
                            <span>{move || notification.get().unwrap_or_default().0}</span>
                        </div>
                    </div>
                </Show>

                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-1 gap-2">
                        <Cpu attr:class="text-primary h-6 w-6" />
                        <a class="btn btn-ghost text-xl">"GpuFarm 管理控制台"</a>
                        <span class="badge badge-neutral hidden md:inline-flex">
                            {admin_name}
                        </span>
                    </div>
                    <div class="flex-none gap-2">
                        <button on:click=on_logout class="btn btn-outline btn-error gap-2">
                            <LogOut attr:class="h-4 w-4" /> "退出登录"
                        </button>
                    </div>
                </div>

                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <div class="stat">
                        <div class="stat-title">"作业总数"</div>
                        <div class="stat-value text-primary">{move || stats().total}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"待审核"</div>
                        <div class="stat-value text-warning">{move || stats().pending}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"运行中"</div>
                        <div class="stat-value text-info">{move || stats().running}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"已完成"</div>
                        <div class="stat-value text-success">{move || stats().completed}</div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="flex flex-col md:flex-row md:items-center justify-between gap-4 p-6 pb-2">
                            <div>
                                <h3 class="card-title">"全部作业"</h3>
                                <p class="text-base-content/70 text-sm">"所有用户的作业，每 30 秒自动刷新。"</p>
                            </div>
                            <div class="flex items-center gap-2">
                                // 服务端状态筛选
                                <select
                                    class="select select-bordered select-sm"
                                    on:change=move |ev| {
                                        status_filter.set(JobStatus::from_wire(&event_target_value(&ev)));
                                        load_all_jobs(None);
                                    }
                                >
                                    <option value="" selected=move || status_filter.get().is_none()>
                                        "全部状态"
                                    </option>
                                    {JobStatus::ALL
                                        .iter()
                                        .map(|status| {
                                            let status = *status;
                                            view! {
                                                <option
                                                    value=status.as_wire()
                                                    selected=move || status_filter.get() == Some(status)
                                                >
                                                    {status.label()}
                                                </option>
                                            }
                                        })
                                        .collect_view()}
                                </select>
                                // 客户端搜索：名称 / 命令 / 提交者邮箱
                                <label class="input input-bordered input-sm flex items-center gap-2">
                                    <Search attr:class="h-4 w-4 opacity-50" />
                                    <input
                                        type="text"
                                        class="grow"
                                        placeholder="搜索作业..."
                                        on:input=move |ev| set_search_term.set(event_target_value(&ev))
                                        prop:value=search_term
                                    />
                                </label>
                                <button on:click=move |_| load_all_jobs(None) disabled=move || loading_jobs.get() class="btn btn-ghost btn-circle btn-sm">
                                    <RefreshCw attr:class=move || if loading_jobs.get() { "h-4 w-4 animate-spin" } else { "h-4 w-4" } />
                                </button>
                            </div>
                        </div>

                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"ID"</th>
                                        <th>"作业"</th>
                                        <th class="hidden md:table-cell">"提交者"</th>
                                        <th class="hidden md:table-cell">"GPU"</th>
                                        <th class="hidden md:table-cell">"数量"</th>
                                        <th class="hidden md:table-cell">"预估时长"</th>
                                        <th>"状态"</th>
                                        <th class="hidden md:table-cell">"创建日期"</th>
                                        <th>"操作"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {move || {
                                        let list = displayed_jobs();
                                        if list.is_empty() {
                                            if loading_jobs.get() {
                                                view! {
                                                    <tr>
                                                        <td colspan="9" class="text-center py-8 text-base-content/50">
                                                            <span class="loading loading-spinner loading-md"></span> " 加载中..."
                                                        </td>
                                                    </tr>
                                                }
                                                .into_any()
                                            } else {
                                                view! {
                                                    <tr>
                                                        <td colspan="9" class="text-center py-8 text-base-content/50">
                                                            "没有找到符合条件的作业"
                                                        </td>
                                                    </tr>
                                                }
                                                .into_any()
                                            }
                                        } else {
                                            list.into_iter()
                                                .map(|job| {
                                                    let job_id = job.id;
                                                    let job_for_detail = job.clone();
                                                    let buttons = action_buttons(job.status)
                                                        .into_iter()
                                                        .map(|button| match button {
                                                            AdminButton::View => {
                                                                let job_for_detail = job_for_detail.clone();
                                                                view! {
                                                                    <button
                                                                        class="btn btn-xs btn-info"
                                                                        title="详情"
                                                                        on:click=move |_| detail_job.set(Some(job_for_detail.clone()))
                                                                    >
                                                                        <Eye attr:class="h-4 w-4" />
                                                                    </button>
                                                                }
                                                                .into_any()
                                                            }
                                                            AdminButton::Action(action) => view! {
                                                                <button
                                                                    class=format!("btn btn-xs {}", action.button_class())
                                                                    title=action.label()
                                                                    on:click=move |_| run_action(job_id, action)
                                                                >
                                                                    {action_icon(action)}
                                                                </button>
                                                            }
                                                            .into_any(),
                                                        })
                                                        .collect_view();
                                                    view! {
                                                        <tr>
                                                            <td>{job.id}</td>
                                                            <td>
                                                                <div class="font-bold">{job.name.clone()}</div>
                                                                <div class="text-xs text-base-content/50 font-mono truncate max-w-48">
                                                                    {job.command.clone()}
                                                                </div>
                                                            </td>
                                                            <td class="hidden md:table-cell text-sm">
                                                                {job.user_email.clone().unwrap_or_else(|| "N/A".to_string())}
                                                            </td>
                                                            <td class="hidden md:table-cell font-mono text-sm">{job.gpu_type.clone()}</td>
                                                            <td class="hidden md:table-cell">{job.num_gpus}</td>
                                                            <td class="hidden md:table-cell">{format_hours(job.estimated_hours)}</td>
                                                            <td><StatusBadge status=job.status /></td>
                                                            <td class="hidden md:table-cell text-sm">{format_date(&job.created_at)}</td>
                                                            <td>
                                                                <div class="flex gap-1">{buttons}</div>
                                                            </td>
                                                        </tr>
                                                    }
                                                })
                                                .collect_view()
                                                .into_any()
                                        }
                                    }}
                                </tbody>
                            </table>
                        </div>
                    </div>
                </div>

                <JobDetailDialog job=detail_job />
            </div>
        </div>
    }
}
