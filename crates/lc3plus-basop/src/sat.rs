//! 关闭诊断上报的饱和运算变体.
//!
//! 数值结果与基础运算完全一致, 仅在调用期间关闭诊断旁路.
//! 用于饱和属于预期结果的调用点, 例如把宽中间和转换为必然可表示的增益值.

use crate::diagnostics::suppress_warnings;
use crate::ops16::{abs_s, add, shl, shr, sub};
use crate::ops32::{l_abs, l_add, l_mac, l_mac0, l_msu, l_shl, l_shr, l_sub, mac_r, round_fx};
use crate::{Word16, Word32};

macro_rules! quiet {
    ($(#[$doc:meta])* $name:ident => $op:ident($($arg:ident: $ty:ty),*) -> $ret:ty) => {
        $(#[$doc])*
        #[inline]
        pub fn $name($($arg: $ty),*) -> $ret {
            let _guard = suppress_warnings();
            $op($($arg),*)
        }
    };
}

quiet!(/// 不上报诊断的 [`add`]
    add_sat => add(var1: Word16, var2: Word16) -> Word16);
quiet!(/// 不上报诊断的 [`sub`]
    sub_sat => sub(var1: Word16, var2: Word16) -> Word16);
quiet!(/// 不上报诊断的 [`shl`]
    shl_sat => shl(var1: Word16, var2: Word16) -> Word16);
quiet!(/// 不上报诊断的 [`shr`]
    shr_sat => shr(var1: Word16, var2: Word16) -> Word16);
quiet!(/// 不上报诊断的 [`abs_s`]
    abs_s_sat => abs_s(var1: Word16) -> Word16);
quiet!(/// 不上报诊断的 [`mac_r`]
    mac_r_sat => mac_r(l_var3: Word32, var1: Word16, var2: Word16) -> Word16);
quiet!(/// 不上报诊断的 [`round_fx`]
    round_fx_sat => round_fx(l_var1: Word32) -> Word16);
quiet!(/// 不上报诊断的 [`l_add`]
    l_add_sat => l_add(l_var1: Word32, l_var2: Word32) -> Word32);
quiet!(/// 不上报诊断的 [`l_sub`]
    l_sub_sat => l_sub(l_var1: Word32, l_var2: Word32) -> Word32);
quiet!(/// 不上报诊断的 [`l_shl`]
    l_shl_sat => l_shl(l_var1: Word32, var2: Word16) -> Word32);
quiet!(/// 不上报诊断的 [`l_shr`]
    l_shr_sat => l_shr(l_var1: Word32, var2: Word16) -> Word32);
quiet!(/// 不上报诊断的 [`l_abs`]
    l_abs_sat => l_abs(l_var1: Word32) -> Word32);
quiet!(/// 不上报诊断的 [`l_mac`]
    l_mac_sat => l_mac(l_var3: Word32, var1: Word16, var2: Word16) -> Word32);
quiet!(/// 不上报诊断的 [`l_msu`]
    l_msu_sat => l_msu(l_var3: Word32, var1: Word16, var2: Word16) -> Word32);
quiet!(/// 不上报诊断的 [`l_mac0`]
    l_mac0_sat => l_mac0(l_var3: Word32, var1: Word16, var2: Word16) -> Word32);
