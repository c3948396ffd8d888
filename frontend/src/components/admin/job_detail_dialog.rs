//! 作业详情弹窗组件
//!
//! 只读取本地缓存，不重新拉取：新鲜度窗口是一个轮询周期
//! （或上一次操作触发的整体刷新），这是有意的取舍。

use gpufarm_shared::Job;
use gpufarm_shared::date::{format_datetime, format_hours};
use leptos::prelude::*;

use crate::components::status_badge::StatusBadge;

#[component]
pub fn JobDetailDialog(
    /// 待展示的作业，None 表示弹窗关闭
    job: RwSignal<Option<Job>>,
) -> impl IntoView {
    view! {
        <Show when=move || job.get().is_some()>
            <div class="modal modal-open">
                <div class="modal-box w-11/12 max-w-3xl">
                    {move || {
                        job.get()
                            .map(|job| {
                                view! {
                                    <h3 class="font-bold text-lg mb-4">
                                        "作业详情 #" {job.id}
                                    </h3>
                                    <div class="grid grid-cols-1 md:grid-cols-2 gap-2 text-sm">
                                        <div class="space-y-1">
                                            <p><strong>"名称："</strong> {job.name.clone()}</p>
                                            <p><strong>"GPU 型号："</strong> {job.gpu_type.clone()}</p>
                                            <p><strong>"GPU 数量："</strong> {job.num_gpus}</p>
                                            <p><strong>"预估时长："</strong> {format_hours(job.estimated_hours)}</p>
                                            {job.user_email.clone().map(|email| view! {
                                                <p><strong>"提交者："</strong> {email}</p>
                                            })}
                                        </div>
                                        <div class="space-y-1">
                                            <p>
                                                <strong>"状态："</strong>
                                                <StatusBadge status=job.status />
                                            </p>
                                            <p><strong>"创建时间："</strong> {format_datetime(&job.created_at)}</p>
                                            {job.started_at.as_ref().map(|ts| view! {
                                                <p><strong>"开始时间："</strong> {format_datetime(ts)}</p>
                                            })}
                                            {job.finished_at.as_ref().map(|ts| view! {
                                                <p><strong>"结束时间："</strong> {format_datetime(ts)}</p>
                                            })}
                                        </div>
                                    </div>
                                    <div class="divider my-2"></div>
                                    <p class="text-sm"><strong>"运行命令："</strong></p>
                                    <pre class="bg-base-200 p-3 rounded-lg text-sm overflow-x-auto">{job.command.clone()}</pre>
                                    {job.data_location.clone().map(|location| view! {
                                        <p class="text-sm mt-2"><strong>"数据位置："</strong> {location}</p>
                                    })}
                                    {job.is_sensitive.then(|| view! {
                                        <div class="badge badge-warning gap-1 mt-2">"包含敏感数据"</div>
                                    })}
                                    {job.error_message.clone().map(|message| view! {
                                        <div role="alert" class="alert alert-error mt-3 text-sm">
                                            <span><strong>"错误信息："</strong> {message}</span>
                                        </div>
                                    })}
                                }
                            })
                    }}
                    <div class="modal-action">
                        <button class="btn" on:click=move |_| job.set(None)>"关闭"</button>
                    </div>
                </div>
                <div class="modal-backdrop bg-black/40" on:click=move |_| job.set(None)></div>
            </div>
        </Show>
    }
}
