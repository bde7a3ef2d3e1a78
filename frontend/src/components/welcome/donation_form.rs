//! 捐赠表单状态
//!
//! 将零散的 signal 整合为 `DonationFormState`，负责数据持有、重置，
//! 以及到提交载荷的转换。凭证文件与其预览地址一并在此管理。

use crate::workflow::donate::{DonationFormData, ProofImage};
use leptos::prelude::*;
use web_sys::File;

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy`，适合在组件间直接传递。
#[derive(Clone, Copy)]
pub struct DonationFormState {
    pub title: RwSignal<String>,
    pub food_type: RwSignal<String>,
    pub quantity: RwSignal<String>,
    pub address: RwSignal<String>,
    pub description: RwSignal<String>,

    /// 待上传的凭证文件（`File` 不是 Send，只能放线程本地信号）
    pub proof: RwSignal<Option<File>, LocalStorage>,
    /// 凭证的本地预览地址 (object URL)
    pub preview_url: RwSignal<Option<String>>,
}

impl DonationFormState {
    pub fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            food_type: RwSignal::new(String::new()),
            quantity: RwSignal::new(String::new()),
            address: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            proof: RwSignal::new_local(None),
            preview_url: RwSignal::new(None),
        }
    }

    /// 选中新的凭证文件，替换预览并回收旧的 object URL
    pub fn set_proof(&self, file: File) {
        if let Some(old) = self.preview_url.get_untracked() {
            let _ = web_sys::Url::revoke_object_url(&old);
        }
        if let Ok(url) = web_sys::Url::create_object_url_with_blob(&file) {
            self.preview_url.set(Some(url));
        }
        self.proof.set(Some(file));
    }

    /// 重置表单到初始状态
    pub fn reset(&self) {
        self.title.set(String::new());
        self.food_type.set(String::new());
        self.quantity.set(String::new());
        self.address.set(String::new());
        self.description.set(String::new());
        if let Some(old) = self.preview_url.get_untracked() {
            let _ = web_sys::Url::revoke_object_url(&old);
        }
        self.preview_url.set(None);
        self.proof.set(None);
    }

    /// 转换为提交载荷
    pub fn to_form_data(&self) -> DonationFormData {
        DonationFormData {
            title: self.title.get_untracked(),
            food_type: self.food_type.get_untracked(),
            quantity: self.quantity.get_untracked(),
            address: self.address.get_untracked(),
            description: self.description.get_untracked(),
        }
    }

    /// 取出凭证图片（文件名随载荷走）
    pub fn to_proof(&self) -> Option<ProofImage<File>> {
        self.proof.get_untracked().map(|file| ProofImage {
            file_name: file.name(),
            data: file,
        })
    }
}

impl Default for DonationFormState {
    fn default() -> Self {
        Self::new()
    }
}
