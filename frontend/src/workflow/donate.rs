//! 捐赠提交流程
//!
//! 单步流程：校验 → 上传凭证图片 → 创建捐赠记录。凭证上传失败时
//! 不会留下没有图片的捐赠行。

use super::adapter::DonationGateway;
use foodbridge_shared::{BUCKET_FOOD_IMAGES, DonationStatus, NewDonation};

/// 捐赠表单的提交载荷
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DonationFormData {
    pub title: String,
    pub food_type: String,
    pub quantity: String,
    pub address: String,
    pub description: String,
}

impl DonationFormData {
    fn is_complete(&self) -> bool {
        !self.title.is_empty()
            && !self.food_type.is_empty()
            && !self.quantity.is_empty()
            && !self.address.is_empty()
    }
}

/// 待上传的凭证图片及其原始文件名
#[derive(Debug, Clone)]
pub struct ProofImage<P> {
    pub data: P,
    pub file_name: String,
}

/// 凭证在存储桶内的路径：按用户分目录，时间戳前缀避免重名
pub fn proof_path(user_id: &str, now_ms: u64, file_name: &str) -> String {
    format!("{}/{}_{}", user_id, now_ms, file_name)
}

/// 提交一笔捐赠
///
/// 错误值即给用户看的提示文案。凭证上传成功后才会创建捐赠行，
/// 行里带上传文件的公开地址，状态固定为可领取。
pub async fn submit_donation<G: DonationGateway>(
    gateway: &G,
    user_id: Option<&str>,
    form: &DonationFormData,
    proof: Option<&ProofImage<G::Proof>>,
    now_ms: u64,
) -> Result<(), String> {
    let Some(user_id) = user_id else {
        return Err("Please login to submit a donation".to_string());
    };
    if !form.is_complete() {
        return Err("Please fill all required fields".to_string());
    }
    let Some(proof) = proof else {
        return Err("Please upload an image of the food".to_string());
    };

    let path = proof_path(user_id, now_ms, &proof.file_name);
    let uploaded = gateway
        .upload_proof(&proof.data, BUCKET_FOOD_IMAGES, &path)
        .await
        .map_err(|_| "Error submitting donation: Failed to upload image".to_string())?;

    let donation = NewDonation {
        donor_id: None,
        title: form.title.clone(),
        description: (!form.description.is_empty()).then(|| form.description.clone()),
        food_type: form.food_type.clone(),
        quantity: form.quantity.clone(),
        pickup_address: form.address.clone(),
        image_url: Some(uploaded.public_url),
        status: DonationStatus::Available,
    };

    gateway
        .submit(donation)
        .await
        .map_err(|e| format!("Error submitting donation: {}", e))
}

#[cfg(test)]
mod tests;
