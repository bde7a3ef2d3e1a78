use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod fee;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 存储桶：捐赠食品的凭证图片
pub const BUCKET_FOOD_IMAGES: &str = "food-images";

/// 自提模式下没有档案地址时的占位配送地址
pub const SELF_PICKUP_ADDRESS: &str = "Self pickup";

// =========================================================
// 领域枚举 (Domain Enums)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Donor,
    Receiver,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonationStatus {
    Available,
    Reserved,
    PickedUp,
    Completed,
    Cancelled,
}

impl DonationStatus {
    /// 过滤查询时使用的字面值
    pub fn as_str(&self) -> &'static str {
        match self {
            DonationStatus::Available => "available",
            DonationStatus::Reserved => "reserved",
            DonationStatus::PickedUp => "picked_up",
            DonationStatus::Completed => "completed",
            DonationStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    InTransit,
    Delivered,
    Cancelled,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::InTransit => "in_transit",
            RequestStatus::Delivered => "delivered",
            RequestStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    SelfService,
    PlatformService,
}

// =========================================================
// 认证模型 (Auth Models)
// =========================================================

/// 后端会话中的当前用户
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// 登录 / 注册 / 刷新成功后返回的会话
///
/// 后端返回的字段远不止这些，未列出的字段在反序列化时被忽略。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub user: AuthUser,
}

/// 注册时附带的用户元数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpAttrs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<UserType>,
}

// =========================================================
// 行模型 (Row Models)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub user_type: Option<UserType>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// profiles 表的插入形状，时间戳由数据库默认值填充
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProfile {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<UserType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub id: String,
    pub donor_id: String,
    pub title: String,
    pub description: Option<String>,
    pub food_type: String,
    pub quantity: String,
    pub pickup_address: String,
    pub image_url: Option<String>,
    pub status: DonationStatus,
    pub expiry_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// donations 表的插入形状
///
/// `donor_id` 由数据钩子按当前会话注入，表单层不填。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDonation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donor_id: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub food_type: String,
    pub quantity: String,
    pub pickup_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub status: DonationStatus,
}

/// 查询 donations 时联表带回的捐赠者联系方式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonorContact {
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationWithDonor {
    #[serde(flatten)]
    pub donation: Donation,
    #[serde(rename = "profiles")]
    pub donor: Option<DonorContact>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRequest {
    pub id: String,
    pub receiver_id: String,
    pub donation_id: Option<String>,
    pub requested_items: Vec<String>,
    pub delivery_address: String,
    pub service_type: ServiceType,
    pub status: RequestStatus,
    pub payment_status: PaymentStatus,
    pub payment_amount: Option<f64>,
    pub delivery_boy_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// requests 表的插入形状
///
/// `receiver_id` 由数据钩子按当前会话注入。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donation_id: Option<String>,
    pub requested_items: Vec<String>,
    pub delivery_address: String,
    pub service_type: ServiceType,
    pub payment_status: PaymentStatus,
    pub payment_amount: f64,
}

/// 查询用户请求时联表带回的捐赠摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationSummary {
    pub title: String,
    pub food_type: String,
    pub pickup_address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestWithDonation {
    #[serde(flatten)]
    pub request: FoodRequest,
    #[serde(rename = "donations")]
    pub donation: Option<DonationSummary>,
}
