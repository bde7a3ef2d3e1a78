//! 业务工作流模块
//!
//! 领取与捐赠两条流程的状态机。所有外部副作用都经由 `adapter` 的
//! trait 出口，状态机本身可以在原生环境下直接跑测试。

pub mod adapter;
pub mod donate;
pub mod receive;
