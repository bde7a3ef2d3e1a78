//! 数据钩子模块
//!
//! 每个钩子对一张表：持有列表 / 加载中 / 错误三个信号，写操作
//! 先经过认证守卫打上当前用户 ID，成功后整表重取保持与后端一致。

mod donations;
mod requests;

pub use donations::{UseDonations, use_donations};
pub use requests::{UseRequests, use_requests};
