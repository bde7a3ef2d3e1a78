//! 领取流程状态机
//!
//! 空闲 → 服务选择 → (自提直接提交 | 填写收货信息 → 支付 → 追踪) → 空闲。
//! 提交失败停留在当前步骤，用户修正后可以重试；成功才推进或收尾。

use super::adapter::{DispatchGateway, RequestGateway};
use foodbridge_shared::{
    NewRequest, PaymentStatus, SELF_PICKUP_ADDRESS, ServiceType, fee,
};

/// 领取流程当前所处的步骤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReceiveStep {
    /// 未进入流程，停留在食品勾选列表
    #[default]
    Idle,
    /// 选择自提还是平台配送
    ServiceChoice,
    /// 平台配送：填写收货信息
    DetailsForm,
    /// 平台配送：确认支付
    Payment,
    /// 平台配送：查看配送追踪
    Tracking,
}

/// 平台配送的收货信息
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReceiverDetails {
    pub name: String,
    pub mobile: String,
    pub address: String,
}

impl ReceiverDetails {
    fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.mobile.is_empty() && !self.address.is_empty()
    }
}

/// 领取流程状态机
///
/// 自身不做任何 IO，网络调用经由传入的 gateway 出口。
#[derive(Debug, Clone, Default)]
pub struct ReceiveFlow {
    step: ReceiveStep,
    selected_items: Vec<String>,
    details: ReceiverDetails,
    /// 待展示的提示消息，UI 取走后清空
    notice: Option<String>,
}

impl ReceiveFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> ReceiveStep {
        self.step
    }

    pub fn selected_items(&self) -> &[String] {
        &self.selected_items
    }

    pub fn is_selected(&self, item: &str) -> bool {
        self.selected_items.iter().any(|i| i == item)
    }

    pub fn details(&self) -> &ReceiverDetails {
        &self.details
    }

    pub fn has_notice(&self) -> bool {
        self.notice.is_some()
    }

    /// 取走待展示的提示消息
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// 勾选 / 取消勾选一个食品条目
    pub fn toggle_item(&mut self, item: &str) {
        if let Some(pos) = self.selected_items.iter().position(|i| i == item) {
            self.selected_items.remove(pos);
        } else {
            self.selected_items.push(item.to_string());
        }
    }

    /// 发起领取：校验登录与勾选，通过后进入服务选择
    pub fn begin(&mut self, signed_in: bool) {
        if !signed_in {
            self.notice = Some("Please login to request food".to_string());
            return;
        }
        if self.selected_items.is_empty() {
            self.notice = Some("Please select at least one food item".to_string());
            return;
        }
        self.step = ReceiveStep::ServiceChoice;
    }

    /// 自提：免费请求，配送地址取档案地址，没有则用自提占位
    ///
    /// 成功后流程收尾并展示取货点信息；失败停留在服务选择。
    pub async fn choose_self_service<G, D>(
        &mut self,
        gateway: &G,
        dispatch: &D,
        profile_address: Option<&str>,
    ) where
        G: RequestGateway,
        D: DispatchGateway,
    {
        let quote = fee::self_service_quote();
        let request = NewRequest {
            receiver_id: None,
            donation_id: None,
            requested_items: self.selected_items.clone(),
            delivery_address: profile_address
                .filter(|a| !a.is_empty())
                .unwrap_or(SELF_PICKUP_ADDRESS)
                .to_string(),
            service_type: ServiceType::SelfService,
            payment_status: PaymentStatus::Paid,
            payment_amount: quote.total,
        };

        match gateway.submit(request).await {
            Ok(_) => {
                let point = dispatch.pickup_point();
                self.notice = Some(format!(
                    "Request submitted successfully!\n\nLocation: {}\nContact: {}\nAvailable Items: {}\nPickup Time: {}",
                    point.location,
                    point.contact,
                    self.selected_items.join(", "),
                    point.window,
                ));
                self.selected_items.clear();
                self.step = ReceiveStep::Idle;
            }
            Err(e) => {
                self.notice = Some(format!("Error submitting request: {}", e));
            }
        }
    }

    /// 平台配送：进入收货信息表单
    pub fn choose_platform_service(&mut self) {
        self.step = ReceiveStep::DetailsForm;
    }

    /// 提交收货信息：三项必填，通过后进入支付
    pub fn submit_details(&mut self, details: ReceiverDetails) {
        if !details.is_complete() {
            self.notice = Some("Please fill all required fields".to_string());
            return;
        }
        self.details = details;
        self.step = ReceiveStep::Payment;
    }

    /// 确认支付：按平台报价创建已支付的配送请求
    ///
    /// 成功进入追踪；失败停留在支付步骤。
    pub async fn confirm_payment<G: RequestGateway>(&mut self, gateway: &G) {
        let quote = fee::platform_quote();
        let request = NewRequest {
            receiver_id: None,
            donation_id: None,
            requested_items: self.selected_items.clone(),
            delivery_address: self.details.address.clone(),
            service_type: ServiceType::PlatformService,
            payment_status: PaymentStatus::Paid,
            payment_amount: quote.total,
        };

        match gateway.submit(request).await {
            Ok(_) => {
                self.selected_items.clear();
                self.details = ReceiverDetails::default();
                self.step = ReceiveStep::Tracking;
            }
            Err(e) => {
                self.notice = Some(format!("Error processing payment: {}", e));
            }
        }
    }

    /// 关闭追踪弹窗，回到空闲
    pub fn close_tracking(&mut self) {
        self.step = ReceiveStep::Idle;
    }

    /// 中途取消，勾选保留以便重来
    pub fn cancel(&mut self) {
        self.step = ReceiveStep::Idle;
    }
}

#[cfg(test)]
mod tests;
