//! 溢出诊断旁路.
//!
//! 基本运算在结果被钳位时上报 [`OverflowKind::Saturation`], 在移位量越界、
//! 取反/取绝对值遇到最小值等无害但可疑的情况下上报 [`OverflowKind::Range`].
//! 上报只用于观测, 从不改变运算结果.
//!
//! 状态保存在线程局部存储中, 多声道并行编码时各线程互不干扰.
//! 预期会饱和的调用点使用 [`suppress_warnings`] 在作用域内关闭上报.

use std::cell::Cell;
use std::marker::PhantomData;

use log::trace;

/// 诊断事件类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowKind {
    /// 结果超出目标位宽, 已饱和
    Saturation,
    /// 参数越界但结果仍有定义 (如移位量超过字宽)
    Range,
}

/// 当前线程的诊断快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// 是否发生过饱和
    pub overflow: bool,
    /// 是否发生过越界告警
    pub overflow2: bool,
    /// 累计事件数 (两类合计)
    pub count: u32,
}

#[derive(Clone, Copy)]
struct State {
    diag: Diagnostics,
    disable_depth: u32,
}

thread_local! {
    static STATE: Cell<State> = const {
        Cell::new(State {
            diag: Diagnostics {
                overflow: false,
                overflow2: false,
                count: 0,
            },
            disable_depth: 0,
        })
    };
}

fn update<R>(f: impl FnOnce(&mut State) -> R) -> R {
    STATE.with(|cell| {
        let mut state = cell.get();
        let ret = f(&mut state);
        cell.set(state);
        ret
    })
}

/// 上报一次诊断事件. 告警关闭期间不记录.
pub(crate) fn report(op: &'static str, kind: OverflowKind) {
    let recorded = update(|state| {
        if state.disable_depth > 0 {
            return false;
        }
        match kind {
            OverflowKind::Saturation => state.diag.overflow = true,
            OverflowKind::Range => state.diag.overflow2 = true,
        }
        state.diag.count = state.diag.count.saturating_add(1);
        true
    });
    if recorded {
        trace!("基本运算 {} 诊断: {:?}", op, kind);
    }
}

/// 获取当前线程的诊断快照
pub fn snapshot() -> Diagnostics {
    update(|state| state.diag)
}

/// 是否发生过饱和 (不清除)
pub fn overflow() -> bool {
    snapshot().overflow
}

/// 读取并清除饱和标志
pub fn take_overflow() -> bool {
    update(|state| std::mem::take(&mut state.diag.overflow))
}

/// 累计诊断事件数
pub fn overflow_count() -> u32 {
    snapshot().count
}

/// 清除标志与计数. 不影响告警开关.
pub fn reset() {
    update(|state| state.diag = Diagnostics::default());
}

/// 当前是否记录诊断事件
pub fn warnings_enabled() -> bool {
    update(|state| state.disable_depth == 0)
}

/// 在作用域内关闭诊断上报
///
/// 返回的守卫析构时恢复; 可嵌套.
pub fn suppress_warnings() -> WarningGuard {
    update(|state| state.disable_depth += 1);
    WarningGuard {
        _not_send: PhantomData,
    }
}

/// 诊断关闭守卫, 只能在创建它的线程上释放
#[must_use = "守卫析构即恢复告警"]
pub struct WarningGuard {
    _not_send: PhantomData<*const ()>,
}

impl Drop for WarningGuard {
    fn drop(&mut self) {
        update(|state| state.disable_depth = state.disable_depth.saturating_sub(1));
    }
}

/// 以调用为粒度检查饱和
///
/// 在清零的饱和标志下执行 `f`, 返回其结果及期间是否发生饱和.
/// 结束后恢复调用方原有的饱和标志.
pub fn with_overflow_check<T>(f: impl FnOnce() -> T) -> (T, bool) {
    struct Restore(bool);

    impl Drop for Restore {
        fn drop(&mut self) {
            let saved = self.0;
            update(|state| state.diag.overflow = saved);
        }
    }

    let saved = update(|state| std::mem::take(&mut state.diag.overflow));
    let _restore = Restore(saved);
    let value = f();
    let overflowed = overflow();
    (value, overflowed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_sets_flag_and_count() {
        reset();
        report("add", OverflowKind::Saturation);
        report("shr", OverflowKind::Range);
        let diag = snapshot();
        assert!(diag.overflow);
        assert!(diag.overflow2);
        assert_eq!(diag.count, 2);
        assert!(take_overflow());
        assert!(!overflow());
        assert_eq!(overflow_count(), 2);
    }

    #[test]
    fn test_suppress_is_scoped_and_nested() {
        reset();
        {
            let _outer = suppress_warnings();
            {
                let _inner = suppress_warnings();
                report("add", OverflowKind::Saturation);
            }
            assert!(!warnings_enabled());
            report("add", OverflowKind::Saturation);
        }
        assert!(warnings_enabled());
        assert_eq!(snapshot(), Diagnostics::default());
    }

    #[test]
    fn test_with_overflow_check_restores_caller_flag() {
        reset();
        report("add", OverflowKind::Saturation);
        let (value, overflowed) = with_overflow_check(|| 7);
        assert_eq!(value, 7);
        assert!(!overflowed);
        assert!(overflow());

        reset();
        let ((), overflowed) = with_overflow_check(|| report("l_add", OverflowKind::Saturation));
        assert!(overflowed);
        assert!(!overflow());
    }

    #[test]
    fn test_state_is_thread_local() {
        reset();
        report("add", OverflowKind::Saturation);
        let other = std::thread::spawn(snapshot).join().unwrap();
        assert_eq!(other, Diagnostics::default());
        assert!(overflow());
    }
}
