use crate::auth::{handle_api_error, logout, use_auth};
use crate::components::icons::{Cpu, LogOut, RefreshCw, UserRound};
use crate::components::job_form::JobForm;
use crate::components::status_badge::StatusBadge;
use crate::web::router::use_navigate;
use crate::web::{Interval, PollGuard, PollTicket};
use gpufarm_shared::Job;
use gpufarm_shared::date::{format_date, format_hours};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 作业列表的轮询周期
const POLL_INTERVAL_MS: u32 = 30_000;
/// 提示消息的自动消失时长
const ALERT_DISMISS_SECS: u64 = 5;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth_ctx = use_auth();
    let auth_state = auth_ctx.state;
    let navigate = use_navigate();

    let (jobs, set_jobs) = signal(Vec::<Job>::new());
    let (loading_jobs, set_loading_jobs) = signal(true);
    let (notification, set_notification) = signal(Option::<(String, bool)>::None); // 消息内容, 是否出错

    // 如果未认证则重定向（路由服务也会兜底处理）
    Effect::new({
        let navigate = navigate.clone();
        move |_| {
            let state = auth_state.get();
            if !state.is_loading && !state.is_authenticated {
                navigate("/");
            }
        }
    });

    // 刷新自己的作业列表；ticket 仅由轮询传入，持有到响应处理结束
    let load_jobs = move |ticket: Option<PollTicket>| {
        let state = auth_state.get_untracked();
        let Some(api) = state.api else {
            return;
        };
        set_loading_jobs.set(true);
        spawn_local(async move {
            let _ticket = ticket;
            match api.list_my_jobs().await {
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
        if state.is_authenticated && !state.is_loading {
            load_jobs(None);
        }
    });

    // 30 秒轮询：句柄存入当前 Owner，视图销毁时一并丢弃（drop 即取消定时器）；
    // 上一次请求未返回时跳过本次触发
    let poll_guard = PollGuard::new();
    let _poll = StoredValue::new_local(Interval::new(POLL_INTERVAL_MS, {
        let poll_guard = poll_guard.clone();
        move || match poll_guard.try_begin() {
            Some(ticket) => load_jobs(Some(ticket)),
            None => web_sys::console::log_1(&"[Dashboard] Poll skipped, request in flight".into()),
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

    let handle_created = move |job: Job| {
        set_notification.set(Some((format!("作业 \"{}\" 创建成功！", job.name), false)));
        load_jobs(None);
    };

    let on_logout = move |_| logout(&auth_ctx);

    let job_count = move || jobs.with(|list| list.len());
    let user_name = move || {
        auth_state
            .get()
            .user
            .map(|u| u.full_name)
            .unwrap_or_default()
    };
    let user_email = move || auth_state.get().user.map(|u| u.email).unwrap_or_default();

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-5xl mx-auto space-y-8">
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
                        <a class="btn btn-ghost text-xl">"GpuFarm 作业面板"</a>
                    </div>
                    <div class="flex-none gap-2">
                        <button on:click=on_logout class="btn btn-outline btn-error gap-2">
                            <LogOut attr:class="h-4 w-4" /> "退出登录"
                        </button>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body flex-row items-center gap-4">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <UserRound attr:class="h-6 w-6" />
                        </div>
                        <div>
                            <p class="font-bold">{user_name}</p>
                            <p class="text-sm text-base-content/70">{user_email}</p>
                        </div>
                    </div>
                </div>

                <JobForm on_created=handle_created />

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="flex items-center justify-between p-6 pb-2">
                            <div>
                                <h3 class="card-title">"我的作业"</h3>
                                <p class="text-base-content/70 text-sm">"列表每 30 秒自动刷新。"</p>
                            </div>
                            <button on:click=move |_| load_jobs(None) disabled=move || loading_jobs.get() class="btn btn-ghost btn-circle">
                                <RefreshCw attr:class=move || if loading_jobs.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                            </button>
                        </div>

                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"ID"</th>
                                        <th>"名称"</th>
                                        <th class="hidden md:table-cell">"GPU 型号"</th>
                                        <th class="hidden md:table-cell">"数量"</th>
                                        <th class="hidden md:table-cell">"预估时长"</th>
                                        <th>"状态"</th>
                                        <th class="hidden md:table-cell">"创建日期"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {move || {
                                        let list = jobs.get();
                                        if list.is_empty() {
                                            if loading_jobs.get() {
                                                view! {
                                                    <tr>
                                                        <td colspan="7" class="text-center py-8 text-base-content/50">
                                                            <span class="loading loading-spinner loading-md"></span> " 加载中..."
                                                        </td>
                                                    </tr>
                                                }
                                                .into_any()
                                            } else {
                                                view! {
                                                    <tr>
                                                        <td colspan="7" class="text-center py-8 text-base-content/50">
                                                            "还没有提交过作业"
                                                        </td>
                                                    </tr>
                                                }
                                                .into_any()
                                            }
                                        } else {
                                            list.into_iter()
                                                .map(|job| {
                                                    view! {
                                                        <tr>
                                                            <td>{job.id}</td>
                                                            <td class="font-bold">{job.name.clone()}</td>
                                                            <td class="hidden md:table-cell font-mono text-sm">{job.gpu_type.clone()}</td>
                                                            <td class="hidden md:table-cell">{job.num_gpus}</td>
                                                            <td class="hidden md:table-cell">{format_hours(job.estimated_hours)}</td>
                                                            <td><StatusBadge status=job.status /></td>
                                                            <td class="hidden md:table-cell text-sm">{format_date(&job.created_at)}</td>
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
                        <div class="p-4 text-right text-xs text-base-content/50">
                            {move || format!("共 {} 个作业", job_count())}
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
