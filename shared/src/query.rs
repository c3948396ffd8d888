//! 作业缓存的本地查询模块
//!
//! 管理页的搜索与统计都只作用于已缓存的作业列表，不发起网络请求。
//! 缓存在每次轮询时被整体替换，这里的函数保持纯函数以便在宿主机上测试。

use crate::Job;
use crate::status::JobStatus;

/// 按搜索词过滤作业列表
///
/// 大小写不敏感的子串匹配，命中字段：作业名、命令文本、提交者邮箱。
/// 空搜索词返回完整列表。
pub fn filter_jobs<'a>(jobs: &'a [Job], term: &str) -> Vec<&'a Job> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return jobs.iter().collect();
    }

    jobs.iter().filter(|job| matches_term(job, &term)).collect()
}

fn matches_term(job: &Job, lowered: &str) -> bool {
    job.name.to_lowercase().contains(lowered)
        || job.command.to_lowercase().contains(lowered)
        || job
            .user_email
            .as_deref()
            .is_some_and(|email| email.to_lowercase().contains(lowered))
}

/// 管理页顶部的聚合计数
///
/// 始终从本次拉取到的完整缓存推导（服务端状态筛选之后、
/// 客户端搜索框之前），搜索只影响表格，不影响计数。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JobStats {
    pub total: usize,
    pub pending: usize,
    pub running: usize,
    pub completed: usize,
}

impl JobStats {
    pub fn from_jobs(jobs: &[Job]) -> Self {
        let count = |status: JobStatus| jobs.iter().filter(|j| j.status == status).count();
        Self {
            total: jobs.len(),
            pending: count(JobStatus::Pending),
            running: count(JobStatus::Running),
            completed: count(JobStatus::Completed),
        }
    }
}

#[cfg(test)]
mod tests;
