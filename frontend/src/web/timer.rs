//! 定时器封装模块
//!
//! 使用 `web_sys` 的原生定时器 API 替代 `gloo-timers`。

use wasm_bindgen::prelude::*;

/// 周期性定时器
///
/// 封装 `setInterval`。句柄被 drop 时自动清除定时器，回调不会在持有者
/// 卸载后继续触发。浏览器环境异常（如拿不到 window）时定时器静默不
/// 启动，持有者无需区分这种情况。
pub struct Interval {
    handle: Option<i32>,
    #[allow(dead_code)]
    closure: Closure<dyn Fn()>,
}

impl Interval {
    /// 创建并立即启动周期性定时器
    pub fn new<F>(millis: u32, callback: F) -> Self
    where
        F: Fn() + 'static,
    {
        let closure = Closure::new(callback);
        let handle = web_sys::window().and_then(|window| {
            window
                .set_interval_with_callback_and_timeout_and_arguments_0(
                    closure.as_ref().unchecked_ref(),
                    millis as i32,
                )
                .ok()
        });

        if handle.is_none() {
            web_sys::console::log_1(&"[Timer] failed to start interval".into());
        }

        Self { handle, closure }
    }

    /// 取消定时器，重复调用无害
    pub fn cancel(&mut self) {
        if let (Some(window), Some(handle)) = (web_sys::window(), self.handle.take()) {
            window.clear_interval_with_handle(handle);
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}
