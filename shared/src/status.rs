//! 作业生命周期模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了作业的全部状态、每个状态下合法的管理操作，
//! 以及状态到本地化文案与样式类的完备映射。

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// 作业状态枚举
///
/// 封闭集合，权威取值由后端定义（线上格式为全大写）。
/// 所有映射都是编译期穷尽的 `match`，新增状态时编译器会
/// 强制补全每一处分支，不存在未识别值的静默兜底。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobStatus {
    /// 已提交，等待管理员审核
    Pending,
    /// 审核通过，等待启动
    Approved,
    /// 被管理员拒绝（终态）
    Rejected,
    /// 正在执行
    Running,
    /// 成功结束（终态）
    Completed,
    /// 以错误结束（终态）
    Failed,
}

impl JobStatus {
    /// 全部状态，按审核流程顺序排列（用于筛选下拉框等场景）
    pub const ALL: [JobStatus; 6] = [
        JobStatus::Pending,
        JobStatus::Approved,
        JobStatus::Running,
        JobStatus::Completed,
        JobStatus::Failed,
        JobStatus::Rejected,
    ];

    /// 线上格式（也是 `status_filter` 查询参数的取值）
    pub fn as_wire(&self) -> &'static str {
        match self {
            JobStatus::Pending => "PENDING",
            JobStatus::Approved => "APPROVED",
            JobStatus::Rejected => "REJECTED",
            JobStatus::Running => "RUNNING",
            JobStatus::Completed => "COMPLETED",
            JobStatus::Failed => "FAILED",
        }
    }

    /// 从线上格式解析，未知取值返回 None
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(JobStatus::Pending),
            "APPROVED" => Some(JobStatus::Approved),
            "REJECTED" => Some(JobStatus::Rejected),
            "RUNNING" => Some(JobStatus::Running),
            "COMPLETED" => Some(JobStatus::Completed),
            "FAILED" => Some(JobStatus::Failed),
            _ => None,
        }
    }

    /// 本地化的状态文案
    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Pending => "待审核",
            JobStatus::Approved => "已批准",
            JobStatus::Rejected => "已拒绝",
            JobStatus::Running => "运行中",
            JobStatus::Completed => "已完成",
            JobStatus::Failed => "失败",
        }
    }

    /// 状态徽章的 CSS 类
    pub fn badge_class(&self) -> &'static str {
        match self {
            JobStatus::Pending => "status-pending",
            JobStatus::Approved => "status-approved",
            JobStatus::Rejected => "status-rejected",
            JobStatus::Running => "status-running",
            JobStatus::Completed => "status-completed",
            JobStatus::Failed => "status-failed",
        }
    }

    /// **核心状态机：当前状态下合法的管理操作**
    ///
    /// 后端是唯一的裁决者，客户端只负责不提供非法入口。
    pub fn legal_actions(&self) -> &'static [JobAction] {
        match self {
            JobStatus::Pending => &[JobAction::Approve, JobAction::Reject],
            JobStatus::Approved => &[JobAction::Start],
            JobStatus::Running => &[JobAction::Complete, JobAction::Fail],
            JobStatus::Rejected | JobStatus::Completed | JobStatus::Failed => &[],
        }
    }

    /// 是否为终态（不再有任何合法操作）
    pub fn is_terminal(&self) -> bool {
        self.legal_actions().is_empty()
    }
}

impl Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_wire())
    }
}

/// 管理员生命周期操作
///
/// 每个操作携带自己的端点片段、确认文案与成功提示，
/// 按钮渲染和请求派发都从这里取值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobAction {
    Approve,
    Reject,
    Start,
    Complete,
    Fail,
}

impl JobAction {
    /// 端点片段：`POST /admin/jobs/{id}/<segment>`
    pub fn endpoint_segment(&self) -> &'static str {
        match self {
            JobAction::Approve => "approve",
            JobAction::Reject => "reject",
            JobAction::Start => "start",
            JobAction::Complete => "complete",
            JobAction::Fail => "fail",
        }
    }

    /// 按钮文案
    pub fn label(&self) -> &'static str {
        match self {
            JobAction::Approve => "批准",
            JobAction::Reject => "拒绝",
            JobAction::Start => "启动",
            JobAction::Complete => "标记完成",
            JobAction::Fail => "标记失败",
        }
    }

    /// 执行前的交互式确认文案
    pub fn confirm_message(&self) -> &'static str {
        match self {
            JobAction::Approve => "确定要批准这个作业吗？",
            JobAction::Reject => "确定要拒绝这个作业吗？",
            JobAction::Start => "要启动这个作业吗？",
            JobAction::Complete => "这个作业已成功完成吗？",
            JobAction::Fail => "要将这个作业标记为失败吗？",
        }
    }

    /// 执行成功后的提示文案
    pub fn success_message(&self) -> &'static str {
        match self {
            JobAction::Approve => "作业已批准",
            JobAction::Reject => "作业已拒绝",
            JobAction::Start => "作业已开始运行",
            JobAction::Complete => "作业已标记为完成",
            JobAction::Fail => "作业已标记为失败",
        }
    }

    /// 操作按钮的样式类
    pub fn button_class(&self) -> &'static str {
        match self {
            JobAction::Approve => "btn-success",
            JobAction::Reject => "btn-error",
            JobAction::Start => "btn-primary",
            JobAction::Complete => "btn-success",
            JobAction::Fail => "btn-warning",
        }
    }

    /// 该操作是否要求操作者提供一个非空原因（仅 Fail）
    pub fn requires_reason(&self) -> bool {
        matches!(self, JobAction::Fail)
    }
}

#[cfg(test)]
mod tests;
