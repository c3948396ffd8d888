//! 状态徽章组件
//!
//! 本地化文案与样式类都来自 `JobStatus` 的完备映射。

use gpufarm_shared::status::JobStatus;
use leptos::prelude::*;

#[component]
pub fn StatusBadge(status: JobStatus) -> impl IntoView {
    view! {
        <span class=format!("job-status badge badge-outline {}", status.badge_class())>
            {status.label()}
        </span>
    }
}
