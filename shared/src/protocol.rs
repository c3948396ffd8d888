use serde::{Serialize, de::DeserializeOwned};

use crate::status::{JobAction, JobStatus};
use crate::{Job, JobCreateRequest, RegisterRequest, UserInfo};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// `path()` is instance-level because the admin lifecycle endpoints embed the job id
/// in the URL. The request value itself serializes into the JSON body (GET requests
/// ignore it).
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path relative to the API base.
    fn path(&self) -> String;
}

// =========================================================
// Request Definitions
// =========================================================

/// 查询当前登录用户的身份（会话校验也复用这个请求）
#[derive(Debug, Serialize)]
pub struct MeRequest;

impl ApiRequest for MeRequest {
    type Response = UserInfo;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/auth/me".to_string()
    }
}

impl ApiRequest for RegisterRequest {
    type Response = UserInfo;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/auth/register".to_string()
    }
}

/// 当前用户自己的作业列表（服务端按身份过滤）
#[derive(Debug, Serialize)]
pub struct ListMyJobsRequest;

impl ApiRequest for ListMyJobsRequest {
    type Response = Vec<Job>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/jobs".to_string()
    }
}

impl ApiRequest for JobCreateRequest {
    type Response = Job;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/jobs".to_string()
    }
}

/// 管理员视角的全量作业列表，可选的服务端状态筛选
#[derive(Debug, Serialize)]
pub struct ListAllJobsRequest {
    #[serde(skip)]
    pub status_filter: Option<JobStatus>,
}

impl ApiRequest for ListAllJobsRequest {
    type Response = Vec<Job>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        match self.status_filter {
            Some(status) => format!("/admin/jobs?status_filter={}", status.as_wire()),
            None => "/admin/jobs".to_string(),
        }
    }
}

/// 管理员生命周期操作
///
/// 除 `fail` 外请求体为空对象；`fail` 附带操作者提供的原因。
#[derive(Debug, Serialize)]
pub struct JobActionRequest {
    #[serde(skip)]
    pub id: i64,
    #[serde(skip)]
    pub action: JobAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ApiRequest for JobActionRequest {
    type Response = Job;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/admin/jobs/{}/{}", self.id, self.action.endpoint_segment())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_all_jobs_path_appends_uppercase_filter() {
        let unfiltered = ListAllJobsRequest {
            status_filter: None,
        };
        assert_eq!(unfiltered.path(), "/admin/jobs");

        let filtered = ListAllJobsRequest {
            status_filter: Some(JobStatus::Pending),
        };
        assert_eq!(filtered.path(), "/admin/jobs?status_filter=PENDING");
    }

    #[test]
    fn test_action_path_embeds_id_and_segment() {
        let req = JobActionRequest {
            id: 7,
            action: JobAction::Approve,
            error_message: None,
        };
        assert_eq!(req.path(), "/admin/jobs/7/approve");
    }

    #[test]
    fn test_action_body_is_empty_object_without_reason() {
        let req = JobActionRequest {
            id: 7,
            action: JobAction::Start,
            error_message: None,
        };
        assert_eq!(serde_json::to_string(&req).unwrap(), "{}");
    }

    #[test]
    fn test_fail_body_carries_reason() {
        let req = JobActionRequest {
            id: 3,
            action: JobAction::Fail,
            error_message: Some("CUDA OOM".to_string()),
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            "{\"error_message\":\"CUDA OOM\"}"
        );
    }
}
