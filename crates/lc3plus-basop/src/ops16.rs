//! 16 位基本运算.
//!
//! 加减、移位、Q15 乘法、归一化与除法. 结果超出 16 位时饱和并上报诊断.

use crate::diagnostics::{self, OverflowKind};
use crate::error::{Lc3Error, Lc3Result};
use crate::{MAX_16, MIN_16, Word16, Word32};

/// 将 32 位中间值钳位到 16 位, 返回结果及是否发生钳位
#[inline]
pub(crate) fn clamp16(l_var1: Word32) -> (Word16, bool) {
    if l_var1 > Word32::from(MAX_16) {
        (MAX_16, true)
    } else if l_var1 < Word32::from(MIN_16) {
        (MIN_16, true)
    } else {
        (l_var1 as Word16, false)
    }
}

/// 饱和到 16 位, 钳位时以 `op` 的名义上报
#[inline]
pub(crate) fn saturate(op: &'static str, l_var1: Word32) -> Word16 {
    let (out, clamped) = clamp16(l_var1);
    if clamped {
        diagnostics::report(op, OverflowKind::Saturation);
    }
    out
}

/// 饱和加法
#[inline]
pub fn add(var1: Word16, var2: Word16) -> Word16 {
    saturate("add", Word32::from(var1) + Word32::from(var2))
}

/// 饱和减法
#[inline]
pub fn sub(var1: Word16, var2: Word16) -> Word16 {
    saturate("sub", Word32::from(var1) - Word32::from(var2))
}

/// 绝对值, `abs_s(MIN_16) == MAX_16`
#[inline]
pub fn abs_s(var1: Word16) -> Word16 {
    if var1 == MIN_16 {
        diagnostics::report("abs_s", OverflowKind::Range);
        MAX_16
    } else {
        var1.abs()
    }
}

/// 取反, `negate(MIN_16) == MAX_16`
#[inline]
pub fn negate(var1: Word16) -> Word16 {
    if var1 == MIN_16 {
        diagnostics::report("negate", OverflowKind::Range);
        MAX_16
    } else {
        -var1
    }
}

/// 算术左移, 溢出时饱和
///
/// 负移位量等价于 `shr(var1, -var2)`, 移位量先钳位到 -16.
pub fn shl(var1: Word16, var2: Word16) -> Word16 {
    if var2 < 0 {
        return shr(var1, -(var2.max(-16)));
    }
    if var2 > 15 {
        if var1 == 0 {
            return 0;
        }
        diagnostics::report("shl", OverflowKind::Saturation);
        return if var1 > 0 { MAX_16 } else { MIN_16 };
    }

    let result = Word32::from(var1) << var2;
    if result != Word32::from(result as Word16) {
        diagnostics::report("shl", OverflowKind::Saturation);
        if var1 > 0 { MAX_16 } else { MIN_16 }
    } else {
        result as Word16
    }
}

/// 算术右移 (符号扩展), 从不饱和
///
/// 移位量 >= 15 时返回 0 或 -1; 负移位量等价于 `shl(var1, -var2)`.
pub fn shr(var1: Word16, var2: Word16) -> Word16 {
    if var2 < 0 {
        return shl(var1, -(var2.max(-16)));
    }
    if var2 >= 15 {
        if var2 > 15 {
            diagnostics::report("shr", OverflowKind::Range);
        }
        return if var1 < 0 { -1 } else { 0 };
    }
    var1 >> var2
}

/// 带舍入的算术右移
///
/// 最先移出的一位为 1 时结果加 1. 移位量大于 15 时返回 0 (而不是 -1),
/// 与 [`shr`] 的行为不同.
pub fn shr_r(var1: Word16, var2: Word16) -> Word16 {
    if var2 > 15 {
        diagnostics::report("shr_r", OverflowKind::Range);
        return 0;
    }
    let mut out = shr(var1, var2);
    if var2 > 0 && var1 & (1 << (var2 - 1)) != 0 {
        out += 1;
    }
    out
}

/// Q15 乘法: `(var1 * var2) >> 15`, 仅 `mult(MIN_16, MIN_16)` 饱和
#[inline]
pub fn mult(var1: Word16, var2: Word16) -> Word16 {
    let product = Word32::from(var1) * Word32::from(var2);
    saturate("mult", product >> 15)
}

/// 带舍入的 Q15 乘法
#[inline]
pub fn mult_r(var1: Word16, var2: Word16) -> Word16 {
    let product = Word32::from(var1) * Word32::from(var2) + 0x4000;
    saturate("mult_r", product >> 15)
}

/// 整数乘法, 结果饱和到 16 位 (不做 Q15 缩放)
///
/// 用于长度、下标等整数量, 而非小数信号值.
#[inline]
pub fn i_mult(a: Word16, b: Word16) -> Word16 {
    saturate("i_mult", Word32::from(a) * Word32::from(b))
}

/// 归一化左移量
///
/// 返回使 `shl(var1, n)` 的次高位成为有效位的最小 `n`.
/// 约定: `norm_s(0) == 0`, `norm_s(-1) == 15`.
pub fn norm_s(var1: Word16) -> Word16 {
    match var1 {
        0 => 0,
        -1 => 15,
        v => {
            let magnitude = if v < 0 { !v } else { v };
            magnitude.leading_zeros() as Word16 - 1
        }
    }
}

/// 小数除法 `var1 / var2`, 结果为 Q15
///
/// 要求 `0 <= var1 <= var2` 且 `var2 != 0`, 两数相等时返回 `MAX_16`.
/// 通过 15 次移位减法 (恢复余数除法) 得到商.
///
/// # Panics
///
/// 违反定义域属于致命错误, 直接 panic, 不返回任何数值.
/// 需要在运行时校验输入的调用方请使用 [`try_div_s`].
pub fn div_s(var1: Word16, var2: Word16) -> Word16 {
    match try_div_s(var1, var2) {
        Ok(quotient) => quotient,
        Err(err) => panic!("div_s 致命错误: {err}"),
    }
}

/// [`div_s`] 的受检形式, 定义域错误时返回 [`Lc3Error::DivisionDomain`]
pub fn try_div_s(var1: Word16, var2: Word16) -> Lc3Result<Word16> {
    if var1 > var2 || var1 < 0 || var2 <= 0 {
        return Err(Lc3Error::DivisionDomain {
            numerator: Word32::from(var1),
            denominator: var2,
        });
    }
    if var1 == 0 {
        return Ok(0);
    }
    if var1 == var2 {
        return Ok(MAX_16);
    }

    let mut quotient: Word16 = 0;
    let mut num = Word32::from(var1);
    let denom = Word32::from(var2);
    for _ in 0..15 {
        quotient <<= 1;
        num <<= 1;
        if num >= denom {
            num -= denom;
            quotient += 1;
        }
    }
    Ok(quotient)
}

/// 取 32 位字的高 16 位
#[inline]
pub fn extract_h(l_var1: Word32) -> Word16 {
    (l_var1 >> 16) as Word16
}

/// 取 32 位字的低 16 位 (截断)
#[inline]
pub fn extract_l(l_var1: Word32) -> Word16 {
    l_var1 as Word16
}

/// 较小值
#[inline]
pub fn s_min(var1: Word16, var2: Word16) -> Word16 {
    var1.min(var2)
}

/// 较大值
#[inline]
pub fn s_max(var1: Word16, var2: Word16) -> Word16 {
    var1.max(var2)
}

/// 按位与
#[inline]
pub fn s_and(var1: Word16, var2: Word16) -> Word16 {
    var1 & var2
}

/// 按位或
#[inline]
pub fn s_or(var1: Word16, var2: Word16) -> Word16 {
    var1 | var2
}

/// 按位异或
#[inline]
pub fn s_xor(var1: Word16, var2: Word16) -> Word16 {
    var1 ^ var2
}
