use serde::{Deserialize, Serialize};

use crate::status::JobStatus;

pub mod date;
pub mod protocol;
pub mod query;
pub mod status;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 后端 REST API 的基础路径（同源部署）
pub const API_BASE: &str = "/api/v1";
/// Bearer 凭据的请求头名称
pub const HEADER_AUTHORIZATION: &str = "Authorization";
/// LocalStorage 中保存会话凭据的唯一键
pub const STORAGE_TOKEN_KEY: &str = "gpufarm_token";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 登录成功后返回的会话凭据
///
/// 凭据是不透明的 Bearer Token，由后端签发，客户端只负责保存与携带。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// 当前登录用户的身份信息（`GET /auth/me`）
///
/// 客户端只读；`is_admin` 决定登录后的落地页面以及管理页的访问权限。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub is_admin: bool,
}

/// 注册请求体（`POST /auth/register`）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub full_name: String,
    pub password: String,
}

/// 一个 GPU 计算作业
///
/// 生命周期状态由后端独占管理。客户端持有的作业列表只是
/// 每次轮询整体重建的非权威缓存，不做增量合并。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub name: String,
    pub gpu_type: String,
    pub num_gpus: u32,
    pub estimated_hours: f64,
    pub command: String,
    pub data_location: Option<String>,
    pub is_sensitive: bool,
    pub status: JobStatus,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
    pub started_at: Option<chrono::NaiveDateTime>,
    pub finished_at: Option<chrono::NaiveDateTime>,
    pub error_message: Option<String>,
    /// 提交者邮箱，仅在管理员视图的响应中出现
    #[serde(default)]
    pub user_email: Option<String>,
}

/// 创建作业的请求体（`POST /jobs`）
///
/// 除类型转换外不做客户端校验，语义校验由后端负责。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCreateRequest {
    pub name: String,
    pub gpu_type: String,
    pub num_gpus: u32,
    pub estimated_hours: f64,
    pub command: String,
    pub data_location: Option<String>,
    pub is_sensitive: bool,
}

/// 错误响应体
///
/// 后端在失败时返回 `detail` 字段，客户端在存在时原样展示给操作者。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<String>,
}
