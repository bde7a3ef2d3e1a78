//! 工作流的外设适配层
//!
//! 流程状态机只面向这里的 trait 说话：请求提交、凭证上传、派送信息
//! 各走一个出口。生产环境把它们接到托管后端和演示派送台，测试里换成
//! 内存 Mock，状态机代码一行不改。

use crate::hooks::{UseDonations, UseRequests};
use crate::supabase::{SupabaseClient, UploadedFile};
use async_trait::async_trait;
use foodbridge_shared::{FoodRequest, NewDonation, NewRequest};

// =========================================================
// 请求出口 (Request Gateway)
// =========================================================

#[async_trait(?Send)]
pub trait RequestGateway {
    /// 以当前用户身份创建食品请求
    async fn submit(&self, request: NewRequest) -> Result<FoodRequest, String>;
}

/// 生产实现：走请求钩子，创建后自动刷新列表
pub struct LiveRequestGateway {
    pub requests: UseRequests,
}

#[async_trait(?Send)]
impl RequestGateway for LiveRequestGateway {
    async fn submit(&self, request: NewRequest) -> Result<FoodRequest, String> {
        self.requests.add(request).await
    }
}

// =========================================================
// 捐赠出口 (Donation Gateway)
// =========================================================

#[async_trait(?Send)]
pub trait DonationGateway {
    /// 凭证图片的载体类型（生产环境是浏览器 File，测试里随意）
    type Proof;

    /// 把凭证上传到指定桶并返回公开地址
    async fn upload_proof(
        &self,
        proof: &Self::Proof,
        bucket: &str,
        path: &str,
    ) -> Result<UploadedFile, String>;

    /// 以当前用户身份创建捐赠记录
    async fn submit(&self, donation: NewDonation) -> Result<(), String>;
}

/// 生产实现：上传直连存储端点，记录创建走捐赠钩子
pub struct LiveDonationGateway {
    pub client: SupabaseClient,
    pub donations: UseDonations,
}

#[async_trait(?Send)]
impl DonationGateway for LiveDonationGateway {
    type Proof = web_sys::File;

    async fn upload_proof(
        &self,
        proof: &Self::Proof,
        bucket: &str,
        path: &str,
    ) -> Result<UploadedFile, String> {
        self.client.upload_file(proof, bucket, path).await
    }

    async fn submit(&self, donation: NewDonation) -> Result<(), String> {
        self.donations.add(donation).await
    }
}

// =========================================================
// 派送出口 (Dispatch Gateway)
// =========================================================

/// 自提时展示的取货点信息
#[derive(Debug, Clone, PartialEq)]
pub struct PickupPoint {
    pub location: String,
    pub contact: String,
    pub window: String,
}

/// 平台配送的追踪快照
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingSnapshot {
    pub courier_name: String,
    pub courier_phone: String,
    pub distance_km: f64,
    pub pickup_eta_minutes: u32,
    pub delivery_eta_minutes: u32,
}

/// 派送信息的来源
///
/// 真实的派送调度还没接入，取货点和追踪数据由实现方决定。
pub trait DispatchGateway {
    fn pickup_point(&self) -> PickupPoint;
    fn tracking_snapshot(&self) -> TrackingSnapshot;
}

/// 演示派送台：固定的取货点和配送员
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoDispatch;

impl DispatchGateway for DemoDispatch {
    fn pickup_point(&self) -> PickupPoint {
        PickupPoint {
            location: "123 Main Street, Downtown".to_string(),
            contact: "John Doe - 9876543210".to_string(),
            window: "2:00 PM - 6:00 PM".to_string(),
        }
    }

    fn tracking_snapshot(&self) -> TrackingSnapshot {
        TrackingSnapshot {
            courier_name: "Rajesh Kumar".to_string(),
            courier_phone: "+91 9876543210".to_string(),
            distance_km: 2.3,
            pickup_eta_minutes: 15,
            delivery_eta_minutes: 45,
        }
    }
}
