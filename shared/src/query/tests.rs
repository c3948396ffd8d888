use super::*;
use chrono::NaiveDate;

fn make_job(id: i64, name: &str, command: &str, email: Option<&str>, status: JobStatus) -> Job {
    let ts = NaiveDate::from_ymd_opt(2025, 8, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    Job {
        id,
        name: name.to_string(),
        gpu_type: "A100".to_string(),
        num_gpus: 1,
        estimated_hours: 2.5,
        command: command.to_string(),
        data_location: None,
        is_sensitive: false,
        status,
        created_at: ts,
        updated_at: ts,
        started_at: None,
        finished_at: None,
        error_message: None,
        user_email: email.map(str::to_string),
    }
}

fn sample_jobs() -> Vec<Job> {
    vec![
        make_job(
            1,
            "bert-finetune",
            "python train.py --epochs 3",
            Some("alice@lab.example"),
            JobStatus::Pending,
        ),
        make_job(
            2,
            "llama-eval",
            "torchrun eval.py",
            Some("bob@lab.example"),
            JobStatus::Running,
        ),
        make_job(
            3,
            "resnet-sweep",
            "python sweep.py --lr 1e-4",
            None,
            JobStatus::Completed,
        ),
    ]
}

#[test]
fn test_empty_term_returns_full_list() {
    let jobs = sample_jobs();
    assert_eq!(filter_jobs(&jobs, "").len(), jobs.len());
    assert_eq!(filter_jobs(&jobs, "   ").len(), jobs.len());
}

#[test]
fn test_filter_matches_name_case_insensitive() {
    let jobs = sample_jobs();
    let hits = filter_jobs(&jobs, "BERT");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 1);
}

#[test]
fn test_filter_matches_command() {
    let jobs = sample_jobs();
    let hits = filter_jobs(&jobs, "torchrun");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 2);
}

#[test]
fn test_filter_matches_submitter_email() {
    let jobs = sample_jobs();
    let hits = filter_jobs(&jobs, "alice@");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 1);

    // 没有邮箱的行不参与邮箱匹配，也不会 panic
    assert!(filter_jobs(&jobs, "charlie@").is_empty());
}

#[test]
fn test_filter_no_match() {
    let jobs = sample_jobs();
    assert!(filter_jobs(&jobs, "does-not-exist").is_empty());
}

#[test]
fn test_filter_is_stable_without_mutation() {
    // 同一缓存上重复过滤得到相同结果
    let jobs = sample_jobs();
    let first: Vec<i64> = filter_jobs(&jobs, "py").iter().map(|j| j.id).collect();
    let second: Vec<i64> = filter_jobs(&jobs, "py").iter().map(|j| j.id).collect();
    assert_eq!(first, second);
}

#[test]
fn test_stats_counts_tracked_statuses() {
    let mut jobs = sample_jobs();
    jobs.push(make_job(4, "extra", "sleep 1", None, JobStatus::Pending));
    jobs.push(make_job(5, "failed-one", "exit 1", None, JobStatus::Failed));

    let stats = JobStats::from_jobs(&jobs);
    assert_eq!(stats.total, 5);
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.running, 1);
    assert_eq!(stats.completed, 1);
}

#[test]
fn test_stats_empty_cache() {
    assert_eq!(JobStats::from_jobs(&[]), JobStats::default());
}
