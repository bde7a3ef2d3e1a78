//! 配送费报价
//!
//! 演示环境里报价是客户端计算的固定值；接口保持和真正的定价服务
//! 一致，后续换成服务端报价时调用方不需要改动。

use serde::{Deserialize, Serialize};

/// 平台配送的基础服务费
pub const PLATFORM_BASE_FEE: f64 = 50.0;

/// 商品及服务税率 (GST)
pub const GST_RATE: f64 = 0.18;

/// 一次配送的费用拆分
///
/// 持久化时只存 `total`，拆分项用于支付界面展示。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeQuote {
    pub base_fee: f64,
    pub gst: f64,
    pub total: f64,
}

impl FeeQuote {
    /// 免费报价（自提）
    pub fn free() -> Self {
        Self {
            base_fee: 0.0,
            gst: 0.0,
            total: 0.0,
        }
    }
}

/// 平台配送的固定报价
pub fn platform_quote() -> FeeQuote {
    let base_fee = PLATFORM_BASE_FEE;
    let gst = round_paise(base_fee * GST_RATE);
    FeeQuote {
        base_fee,
        gst,
        total: round_paise(base_fee + gst),
    }
}

/// 自提报价：无费用
pub fn self_service_quote() -> FeeQuote {
    FeeQuote::free()
}

fn round_paise(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_quote_totals_fifty_nine() {
        let quote = platform_quote();
        assert_eq!(quote.base_fee, 50.0);
        assert_eq!(quote.gst, 9.0);
        assert_eq!(quote.total, 59.0);
    }

    #[test]
    fn platform_quote_breakdown_adds_up() {
        let quote = platform_quote();
        assert_eq!(quote.base_fee + quote.gst, quote.total);
    }

    #[test]
    fn self_service_is_free() {
        let quote = self_service_quote();
        assert_eq!(quote.total, 0.0);
        assert_eq!(quote.base_fee, 0.0);
        assert_eq!(quote.gst, 0.0);
    }
}
