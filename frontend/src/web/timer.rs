//! 定时器封装模块
//!
//! `Interval` 封装 `setInterval`，随视图一同销毁（drop 即取消），
//! 避免页面切换后回调泄漏。`PollGuard` 为轮询提供在途去重：
//! 上一次轮询尚未返回时跳过本次触发，消除"最后响应获胜"的覆盖竞争。

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

/// 周期性定时器
///
/// 封装 `setInterval` API。当 `Interval` 被 drop 时，自动清除定时器。
pub struct Interval {
    handle: i32,
    #[allow(dead_code)]
    closure: Closure<dyn Fn()>,
}

impl Interval {
    /// 创建新的周期性定时器
    ///
    /// # Panics
    /// 如果无法获取 window 对象或设置定时器失败
    pub fn new<F>(millis: u32, callback: F) -> Self
    where
        F: Fn() + 'static,
    {
        let closure = Closure::new(callback);
        let window = web_sys::window().expect("无法获取 window 对象");

        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis as i32,
            )
            .expect("设置定时器失败");

        Self { handle, closure }
    }

    /// 取消定时器
    ///
    /// 通常不需要手动调用，drop 时会自动清除。
    pub fn cancel(&self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.handle);
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// 轮询在途标记
///
/// `try_begin` 在上一次请求仍未返回时拒绝发起新的请求；
/// 返回的 `PollTicket` 在 drop 时释放标记，持有到响应处理
/// 结束即可（包括错误路径）。
#[derive(Clone, Default)]
pub struct PollGuard {
    in_flight: Rc<Cell<bool>>,
}

impl PollGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 尝试开始一次轮询；已有请求在途时返回 None
    pub fn try_begin(&self) -> Option<PollTicket> {
        if self.in_flight.get() {
            return None;
        }
        self.in_flight.set(true);
        Some(PollTicket {
            in_flight: Rc::clone(&self.in_flight),
        })
    }
}

/// 一次在途轮询的持有凭证，drop 时释放
pub struct PollTicket {
    in_flight: Rc<Cell<bool>>,
}

impl Drop for PollTicket {
    fn drop(&mut self) {
        self.in_flight.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_rejects_overlapping_poll() {
        let guard = PollGuard::new();
        let ticket = guard.try_begin().expect("first poll should start");
        // 在途期间再次触发被跳过
        assert!(guard.try_begin().is_none());
        drop(ticket);
        assert!(guard.try_begin().is_some());
    }

    #[test]
    fn test_ticket_release_on_error_path() {
        let guard = PollGuard::new();
        {
            let _ticket = guard.try_begin().unwrap();
            // 模拟请求失败提前返回：票据随作用域结束释放
        }
        assert!(guard.try_begin().is_some());
    }

    #[test]
    fn test_clone_shares_state() {
        let guard = PollGuard::new();
        let cloned = guard.clone();
        let _ticket = guard.try_begin().unwrap();
        assert!(cloned.try_begin().is_none());
    }
}
