use super::*;

#[test]
fn test_every_status_has_presentation() {
    for status in JobStatus::ALL {
        assert!(!status.label().is_empty());
        assert!(status.badge_class().starts_with("status-"));
        // 徽章类由线上格式确定性推导
        assert_eq!(
            status.badge_class(),
            format!("status-{}", status.as_wire().to_lowercase())
        );
    }
}

#[test]
fn test_wire_round_trip() {
    for status in JobStatus::ALL {
        assert_eq!(JobStatus::from_wire(status.as_wire()), Some(status));
    }
    assert_eq!(JobStatus::from_wire("CANCELLED"), None);
    assert_eq!(JobStatus::from_wire("pending"), None);
    assert_eq!(JobStatus::from_wire(""), None);
}

#[test]
fn test_serde_uses_uppercase_wire_values() {
    let json = serde_json::to_string(&JobStatus::Pending).unwrap();
    assert_eq!(json, "\"PENDING\"");

    let parsed: JobStatus = serde_json::from_str("\"RUNNING\"").unwrap();
    assert_eq!(parsed, JobStatus::Running);

    // 封闭枚举：未知状态是解码错误，而不是静默兜底
    assert!(serde_json::from_str::<JobStatus>("\"ARCHIVED\"").is_err());
}

#[test]
fn test_legal_actions_per_status() {
    assert_eq!(
        JobStatus::Pending.legal_actions(),
        &[JobAction::Approve, JobAction::Reject]
    );
    assert_eq!(JobStatus::Approved.legal_actions(), &[JobAction::Start]);
    assert_eq!(
        JobStatus::Running.legal_actions(),
        &[JobAction::Complete, JobAction::Fail]
    );
    assert_eq!(JobStatus::Completed.legal_actions(), &[] as &[JobAction]);
    assert_eq!(JobStatus::Failed.legal_actions(), &[] as &[JobAction]);
    assert_eq!(JobStatus::Rejected.legal_actions(), &[] as &[JobAction]);
}

#[test]
fn test_terminal_statuses() {
    assert!(!JobStatus::Pending.is_terminal());
    assert!(!JobStatus::Approved.is_terminal());
    assert!(!JobStatus::Running.is_terminal());
    assert!(JobStatus::Completed.is_terminal());
    assert!(JobStatus::Failed.is_terminal());
    assert!(JobStatus::Rejected.is_terminal());
}

#[test]
fn test_only_fail_requires_reason() {
    for status in JobStatus::ALL {
        for action in status.legal_actions() {
            assert_eq!(action.requires_reason(), *action == JobAction::Fail);
        }
    }
}

#[test]
fn test_action_endpoint_segments() {
    assert_eq!(JobAction::Approve.endpoint_segment(), "approve");
    assert_eq!(JobAction::Reject.endpoint_segment(), "reject");
    assert_eq!(JobAction::Start.endpoint_segment(), "start");
    assert_eq!(JobAction::Complete.endpoint_segment(), "complete");
    assert_eq!(JobAction::Fail.endpoint_segment(), "fail");
}
