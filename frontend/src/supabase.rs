//! 托管后端适配器
//!
//! 对 Supabase 的认证 (GoTrue)、行存储 (PostgREST) 和对象存储暴露类型化的
//! 异步调用。每个调用要么返回结果值要么返回错误字符串，错误原样传给调用
//! 方，适配器本身不持有业务状态。

use crate::web::{HttpClient, HttpRequestBuilder};
use foodbridge_shared::{
    AuthSession, AuthUser, Donation, DonationWithDonor, FoodRequest, NewDonation, NewProfile,
    NewRequest, Profile, RequestStatus, RequestWithDonation, SignUpAttrs,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use web_sys::{Blob, File};

/// PostgREST 的单对象响应格式
const ACCEPT_SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// 会话接口的失败分类
///
/// 只有后端明确拒绝令牌才意味着会话失效，网络故障不算。
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// 后端拒绝了令牌（过期、吊销）
    Rejected(String),
    /// 请求没有到达后端，或响应不可读
    Unreachable(String),
}

impl core::fmt::Display for SessionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SessionError::Rejected(msg) | SessionError::Unreachable(msg) => write!(f, "{}", msg),
        }
    }
}

/// 上传成功后文件的存储路径与公开访问地址
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub path: String,
    pub public_url: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SupabaseClient {
    base_url: String,
    anon_key: String,
    /// 登录后的访问令牌；未登录时以 anon key 作为 Bearer
    access_token: Option<String>,
}

impl SupabaseClient {
    pub fn new(base_url: String, anon_key: String) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            anon_key,
            access_token: None,
        }
    }

    /// 携带访问令牌的副本（登录 / 会话恢复后使用）
    pub fn with_token(&self, access_token: &str) -> Self {
        Self {
            access_token: Some(access_token.to_string()),
            ..self.clone()
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.base_url, path)
    }

    fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/v1{}", self.base_url, path)
    }

    fn bearer(&self) -> String {
        let token = self.access_token.as_deref().unwrap_or(&self.anon_key);
        format!("Bearer {}", token)
    }

    fn authed(&self, builder: HttpRequestBuilder) -> HttpRequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .header("Authorization", &self.bearer())
    }

    /// 从错误响应体中提取后端给出的消息
    fn error_message(status: u16, body: &str) -> String {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
            for key in ["message", "msg", "error_description", "error"] {
                if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                    return message.to_string();
                }
            }
        }
        format!("Request failed with status {}", status)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: HttpRequestBuilder,
    ) -> Result<T, String> {
        let response = self.authed(builder).send().await.map_err(|e| e.to_string())?;
        let status = response.status();
        let body = response.text().await.map_err(|e| e.to_string())?;

        if !(200..300).contains(&status) {
            return Err(Self::error_message(status, &body));
        }
        serde_json::from_str(&body).map_err(|e| e.to_string())
    }

    /// 与 `send_json` 相同，但把传输层故障和后端拒绝区分开
    async fn send_session<T: DeserializeOwned>(
        &self,
        builder: HttpRequestBuilder,
    ) -> Result<T, SessionError> {
        let response = self
            .authed(builder)
            .send()
            .await
            .map_err(|e| SessionError::Unreachable(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SessionError::Unreachable(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(SessionError::Rejected(Self::error_message(status, &body)));
        }
        serde_json::from_str(&body).map_err(|e| SessionError::Unreachable(e.to_string()))
    }

    async fn send_no_content(
        &self,
        builder: HttpRequestBuilder,
    ) -> Result<(), String> {
        let response = self.authed(builder).send().await.map_err(|e| e.to_string())?;
        let status = response.status();
        if !(200..300).contains(&status) {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::error_message(status, &body));
        }
        Ok(())
    }

    fn json_body<B: Serialize>(body: &B) -> Result<String, String> {
        serde_json::to_string(body).map_err(|e| e.to_string())
    }

    // =========================================================
    // 认证 (Auth)
    // =========================================================

    /// 注册新账号
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        attrs: &SignUpAttrs,
    ) -> Result<AuthSession, String> {
        let body = Self::json_body(&serde_json::json!({
            "email": email,
            "password": password,
            "data": attrs,
        }))?;

        let response = self
            .authed(HttpClient::post(&self.auth_url("/signup")))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        let text = response.text().await.map_err(|e| e.to_string())?;
        if !(200..300).contains(&status) {
            return Err(Self::error_message(status, &text));
        }

        // 开启邮箱验证的项目此处只返回用户对象，没有会话
        serde_json::from_str::<AuthSession>(&text).map_err(|_| {
            "Sign-up succeeded but no session was returned. Confirm your email, then sign in."
                .to_string()
        })
    }

    /// 邮箱 + 密码登录
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, String> {
        let body = Self::json_body(&serde_json::json!({
            "email": email,
            "password": password,
        }))?;

        self.send_json(
            HttpClient::post(&self.auth_url("/token?grant_type=password"))
                .header("Content-Type", "application/json")
                .body(body),
        )
        .await
    }

    /// 用 refresh token 换取新会话
    pub async fn refresh_session(
        &self,
        refresh_token: &str,
    ) -> Result<AuthSession, SessionError> {
        let body = Self::json_body(&serde_json::json!({ "refresh_token": refresh_token }))
            .map_err(SessionError::Unreachable)?;

        self.send_session(
            HttpClient::post(&self.auth_url("/token?grant_type=refresh_token"))
                .header("Content-Type", "application/json")
                .body(body),
        )
        .await
    }

    /// 注销当前会话
    pub async fn sign_out(&self) -> Result<(), String> {
        self.send_no_content(HttpClient::post(&self.auth_url("/logout")))
            .await
    }

    /// 获取当前令牌对应的用户
    pub async fn get_current_user(&self) -> Result<AuthUser, SessionError> {
        self.send_session(HttpClient::get(&self.auth_url("/user")))
            .await
    }

    /// 发送密码找回邮件
    pub async fn recover_password(&self, email: &str) -> Result<(), String> {
        let body = Self::json_body(&serde_json::json!({ "email": email }))?;

        self.send_no_content(
            HttpClient::post(&self.auth_url("/recover"))
                .header("Content-Type", "application/json")
                .body(body),
        )
        .await
    }

    // =========================================================
    // 行存储 (Rows)
    // =========================================================

    /// 创建用户档案
    pub async fn create_profile(&self, profile: &NewProfile) -> Result<Profile, String> {
        self.send_json(
            HttpClient::post(&self.rest_url("/profiles"))
                .header("Content-Type", "application/json")
                .header("Prefer", "return=representation")
                .header("Accept", ACCEPT_SINGLE_OBJECT)
                .body(Self::json_body(profile)?),
        )
        .await
    }

    /// 按用户 ID 读取档案
    pub async fn get_profile(&self, user_id: &str) -> Result<Profile, String> {
        let url = self.rest_url(&format!("/profiles?select=*&id=eq.{}", user_id));
        self.send_json(HttpClient::get(&url).header("Accept", ACCEPT_SINGLE_OBJECT))
            .await
    }

    /// 创建捐赠记录
    pub async fn create_donation(&self, donation: &NewDonation) -> Result<Donation, String> {
        self.send_json(
            HttpClient::post(&self.rest_url("/donations"))
                .header("Content-Type", "application/json")
                .header("Prefer", "return=representation")
                .header("Accept", ACCEPT_SINGLE_OBJECT)
                .body(Self::json_body(donation)?),
        )
        .await
    }

    /// 列出可领取的捐赠（最新在前，联表带回捐赠者姓名和电话）
    pub async fn get_donations(&self) -> Result<Vec<DonationWithDonor>, String> {
        let url = self.rest_url(
            "/donations?select=*,profiles:donor_id(full_name,phone)\
             &status=eq.available&order=created_at.desc",
        );
        self.send_json(HttpClient::get(&url)).await
    }

    /// 创建食品请求
    pub async fn create_request(&self, request: &NewRequest) -> Result<FoodRequest, String> {
        self.send_json(
            HttpClient::post(&self.rest_url("/requests"))
                .header("Content-Type", "application/json")
                .header("Prefer", "return=representation")
                .header("Accept", ACCEPT_SINGLE_OBJECT)
                .body(Self::json_body(request)?),
        )
        .await
    }

    /// 列出某接收者的请求（最新在前，联表带回捐赠摘要）
    pub async fn get_user_requests(
        &self,
        receiver_id: &str,
    ) -> Result<Vec<RequestWithDonation>, String> {
        let url = self.rest_url(&format!(
            "/requests?select=*,donations(title,food_type,pickup_address)\
             &receiver_id=eq.{}&order=created_at.desc",
            receiver_id
        ));
        self.send_json(HttpClient::get(&url)).await
    }

    /// 更新请求状态
    pub async fn update_request_status(
        &self,
        request_id: &str,
        status: RequestStatus,
    ) -> Result<FoodRequest, String> {
        let url = self.rest_url(&format!("/requests?id=eq.{}", request_id));
        self.send_json(
            HttpClient::patch(&url)
                .header("Content-Type", "application/json")
                .header("Prefer", "return=representation")
                .header("Accept", ACCEPT_SINGLE_OBJECT)
                .body(Self::json_body(&serde_json::json!({ "status": status }))?),
        )
        .await
    }

    // =========================================================
    // 对象存储 (Storage)
    // =========================================================

    /// 上传文件并返回其存储路径与公开访问地址
    pub async fn upload_file(
        &self,
        file: &File,
        bucket: &str,
        path: &str,
    ) -> Result<UploadedFile, String> {
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, path);

        let content_type = file.type_();
        let content_type = if content_type.is_empty() {
            "application/octet-stream".to_string()
        } else {
            content_type
        };

        self.send_no_content(
            HttpClient::post(&url)
                .header("Content-Type", &content_type)
                .body_blob(Blob::from(file.clone())),
        )
        .await?;

        Ok(UploadedFile {
            path: format!("{}/{}", bucket, path),
            public_url: format!(
                "{}/storage/v1/object/public/{}/{}",
                self.base_url, bucket, path
            ),
        })
    }
}
