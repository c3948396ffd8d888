//! 类型化的 REST 客户端
//!
//! 端点的路径 / 方法 / 响应类型由 `gpufarm_shared::protocol` 的
//! `ApiRequest` 实现描述，这里只负责携带凭据、编解码与错误归类。
//! 登录是唯一的例外：后端要求表单编码，不走 JSON 通道。

use serde::de::DeserializeOwned;

use gpufarm_shared::protocol::{
    ApiRequest, HttpMethod, JobActionRequest, ListAllJobsRequest, ListMyJobsRequest, MeRequest,
};
use gpufarm_shared::status::{JobAction, JobStatus};
use gpufarm_shared::{
    API_BASE, ErrorBody, HEADER_AUTHORIZATION, Job, JobCreateRequest, RegisterRequest,
    TokenResponse, UserInfo,
};

use crate::web::{HttpClient, HttpResponse};

/// 客户端侧的错误分类
///
/// 对应四类处理路径：401 强制登出、4xx/5xx 展示服务端 detail、
/// 传输失败提示连接问题、响应不可解析提示服务异常。
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 401：当前会话凭据已失效
    Unauthorized,
    /// 其他非 2xx 响应；detail 为服务端提供的说明（若有）
    Api { status: u16, detail: Option<String> },
    /// fetch 被拒绝，网络或跨域问题
    Network(String),
    /// 响应体无法解析为预期类型
    Decode(String),
}

impl ApiError {
    /// 展示给操作者的本地化消息；服务端 detail 存在时原样透出
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized => "登录状态已失效，请重新登录".to_string(),
            ApiError::Api {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ApiError::Api { status, .. } => format!("请求失败 (HTTP {})", status),
            ApiError::Network(_) => "无法连接到服务器，请稍后重试".to_string(),
            ApiError::Decode(_) => "服务器响应异常".to_string(),
        }
    }

    /// 服务端提供的原始 detail（登录等场景需要区分有无）
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ApiError::Unauthorized => write!(f, "unauthorized"),
            ApiError::Api { status, detail } => {
                write!(f, "http {}: {}", status, detail.as_deref().unwrap_or("-"))
            }
            ApiError::Network(msg) => write!(f, "network: {}", msg),
            ApiError::Decode(msg) => write!(f, "decode: {}", msg),
        }
    }
}

/// GpuFarm REST 客户端，持有当前会话的 Bearer 凭据
#[derive(Clone, Debug, PartialEq)]
pub struct GpuFarmApi {
    token: String,
}

impl GpuFarmApi {
    pub fn new(token: String) -> Self {
        Self { token }
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// 登录（表单编码，无凭据）：`POST /auth/login`
    pub async fn login(email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let params = web_sys::UrlSearchParams::new()
            .map_err(|e| ApiError::Network(format!("{:?}", e)))?;
        // 后端的 OAuth2 表单把邮箱放在 username 字段里
        params.append("username", email);
        params.append("password", password);
        let body: String = params.to_string().into();

        let response = HttpClient::post(&format!("{}/auth/login", API_BASE))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        read_json(response).await
    }

    /// 注册（无凭据）：`POST /auth/register`
    pub async fn register(request: &RegisterRequest) -> Result<UserInfo, ApiError> {
        dispatch(request, None).await
    }

    /// 当前用户身份：`GET /auth/me`
    pub async fn me(&self) -> Result<UserInfo, ApiError> {
        self.send(&MeRequest).await
    }

    /// 当前用户自己的作业列表：`GET /jobs`
    pub async fn list_my_jobs(&self) -> Result<Vec<Job>, ApiError> {
        self.send(&ListMyJobsRequest).await
    }

    /// 提交新作业：`POST /jobs`
    pub async fn create_job(&self, request: &JobCreateRequest) -> Result<Job, ApiError> {
        self.send(request).await
    }

    /// 管理员全量作业列表，可选服务端状态筛选：`GET /admin/jobs`
    pub async fn list_all_jobs(
        &self,
        status_filter: Option<JobStatus>,
    ) -> Result<Vec<Job>, ApiError> {
        self.send(&ListAllJobsRequest { status_filter }).await
    }

    /// 管理员生命周期操作：`POST /admin/jobs/{id}/{action}`
    pub async fn job_action(
        &self,
        id: i64,
        action: JobAction,
        error_message: Option<String>,
    ) -> Result<Job, ApiError> {
        self.send(&JobActionRequest {
            id,
            action,
            error_message,
        })
        .await
    }

    async fn send<R: ApiRequest>(&self, request: &R) -> Result<R::Response, ApiError> {
        dispatch(request, Some(&self.bearer())).await
    }
}

/// 按协议描述派发一个请求
async fn dispatch<R: ApiRequest>(
    request: &R,
    bearer: Option<&str>,
) -> Result<R::Response, ApiError> {
    let url = format!("{}{}", API_BASE, request.path());

    let mut builder = match R::METHOD {
        HttpMethod::Get => HttpClient::get(&url),
        HttpMethod::Post => {
            let body = serde_json_wasm::to_string(request)
                .map_err(|e| ApiError::Decode(e.to_string()))?;
            HttpClient::post(&url)
                .header("Content-Type", "application/json")
                .body(body)
        }
    };
    if let Some(value) = bearer {
        builder = builder.header(HEADER_AUTHORIZATION, value);
    }

    let response = builder
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    read_json(response).await
}

/// 统一的响应处理：401 归类为会话失效，其余失败提取 detail
async fn read_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    let status = response.status();
    let ok = response.ok();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if status == 401 {
        return Err(ApiError::Unauthorized);
    }
    if !ok {
        let detail = serde_json_wasm::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.detail);
        return Err(ApiError::Api { status, detail });
    }

    serde_json_wasm::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}
