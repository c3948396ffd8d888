//! 作业提交表单的状态模块
//!
//! 将零散的 signal 整合为 `JobFormState` 结构体，负责：
//! - 数据的持有
//! - 数据的重置（仅在提交成功后调用，失败时保留用户输入）
//! - 数据到请求对象的转换

use gpufarm_shared::JobCreateRequest;
use leptos::prelude::*;

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，适合在组件与回调间传递。
#[derive(Clone, Copy)]
pub struct JobFormState {
    pub name: RwSignal<String>,
    pub gpu_type: RwSignal<String>,
    pub num_gpus: RwSignal<u32>,
    pub estimated_hours: RwSignal<f64>,
    pub command: RwSignal<String>,
    pub data_location: RwSignal<String>,
    pub is_sensitive: RwSignal<bool>,
}

impl JobFormState {
    pub fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            gpu_type: RwSignal::new(super::GPU_TYPES[0].to_string()),
            num_gpus: RwSignal::new(1),
            estimated_hours: RwSignal::new(1.0),
            command: RwSignal::new(String::new()),
            data_location: RwSignal::new(String::new()),
            is_sensitive: RwSignal::new(false),
        }
    }

    /// 重置表单到初始状态
    pub fn reset(&self) {
        self.name.set(String::new());
        self.gpu_type.set(super::GPU_TYPES[0].to_string());
        self.num_gpus.set(1);
        self.estimated_hours.set(1.0);
        self.command.set(String::new());
        self.data_location.set(String::new());
        self.is_sensitive.set(false);
    }

    /// 将表单状态转换为 API 请求对象
    ///
    /// 只做类型归一（空的数据位置归为 None），语义校验交给服务端。
    pub fn to_request(&self) -> JobCreateRequest {
        let location = self.data_location.get();
        let location_opt = if location.trim().is_empty() {
            None
        } else {
            Some(location)
        };

        JobCreateRequest {
            name: self.name.get(),
            gpu_type: self.gpu_type.get(),
            num_gpus: self.num_gpus.get(),
            estimated_hours: self.estimated_hours.get(),
            command: self.command.get(),
            data_location: location_opt,
            is_sensitive: self.is_sensitive.get(),
        }
    }
}

impl Default for JobFormState {
    fn default() -> Self {
        Self::new()
    }
}
