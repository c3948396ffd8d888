//! 管理操作的纯逻辑部分
//!
//! 按钮集合的推导与 fail 原因的归一化不触碰 DOM，
//! 单独放在这里以便在宿主机上测试。

use gpufarm_shared::status::{JobAction, JobStatus};

/// 操作列中的一个按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminButton {
    /// 查看详情，任何状态下都存在
    View,
    /// 生命周期操作，由状态机给出
    Action(JobAction),
}

/// 当前状态下应渲染的按钮集合，详情按钮永远在第一位
pub fn action_buttons(status: JobStatus) -> Vec<AdminButton> {
    let mut buttons = vec![AdminButton::View];
    buttons.extend(
        status
            .legal_actions()
            .iter()
            .copied()
            .map(AdminButton::Action),
    );
    buttons
}

/// fail 操作的原因输入归一化
///
/// 取消弹窗（None）或纯空白输入都视为放弃，不发起网络请求。
pub fn normalize_fail_reason(input: Option<String>) -> Option<String> {
    let reason = input?.trim().to_string();
    if reason.is_empty() { None } else { Some(reason) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_buttons() {
        assert_eq!(
            action_buttons(JobStatus::Pending),
            vec![
                AdminButton::View,
                AdminButton::Action(JobAction::Approve),
                AdminButton::Action(JobAction::Reject),
            ]
        );
    }

    #[test]
    fn test_approved_buttons() {
        assert_eq!(
            action_buttons(JobStatus::Approved),
            vec![AdminButton::View, AdminButton::Action(JobAction::Start)]
        );
    }

    #[test]
    fn test_running_buttons() {
        assert_eq!(
            action_buttons(JobStatus::Running),
            vec![
                AdminButton::View,
                AdminButton::Action(JobAction::Complete),
                AdminButton::Action(JobAction::Fail),
            ]
        );
    }

    #[test]
    fn test_terminal_statuses_only_offer_view() {
        for status in [JobStatus::Completed, JobStatus::Failed, JobStatus::Rejected] {
            assert_eq!(action_buttons(status), vec![AdminButton::View]);
        }
    }

    #[test]
    fn test_fail_reason_normalization() {
        // 取消弹窗或空白输入都放弃提交
        assert_eq!(normalize_fail_reason(None), None);
        assert_eq!(normalize_fail_reason(Some(String::new())), None);
        assert_eq!(normalize_fail_reason(Some("   ".to_string())), None);
        assert_eq!(
            normalize_fail_reason(Some("  CUDA OOM ".to_string())),
            Some("CUDA OOM".to_string())
        );
    }
}
