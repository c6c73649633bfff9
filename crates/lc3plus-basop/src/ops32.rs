//! 32 位基本运算.
//!
//! 32 位加减移位、16x16->32 乘法与乘加、舍入、归一化及 32/16 除法.

use crate::diagnostics::{self, OverflowKind};
use crate::error::{Lc3Error, Lc3Result};
use crate::ops16::{add, extract_h, shl};
use crate::{MAX_16, MAX_32, MIN_32, Word16, Word32};

#[inline]
fn saturate32(op: &'static str, toward_negative: bool) -> Word32 {
    diagnostics::report(op, OverflowKind::Saturation);
    if toward_negative { MIN_32 } else { MAX_32 }
}

/// 32 位饱和加法
#[inline]
pub fn l_add(l_var1: Word32, l_var2: Word32) -> Word32 {
    match l_var1.checked_add(l_var2) {
        Some(sum) => sum,
        None => saturate32("l_add", l_var1 < 0),
    }
}

/// 32 位饱和减法
#[inline]
pub fn l_sub(l_var1: Word32, l_var2: Word32) -> Word32 {
    match l_var1.checked_sub(l_var2) {
        Some(diff) => diff,
        None => saturate32("l_sub", l_var1 < 0),
    }
}

/// 32 位取反, `l_negate(MIN_32) == MAX_32`
#[inline]
pub fn l_negate(l_var1: Word32) -> Word32 {
    if l_var1 == MIN_32 {
        diagnostics::report("l_negate", OverflowKind::Range);
        MAX_32
    } else {
        -l_var1
    }
}

/// 32 位绝对值, `l_abs(MIN_32) == MAX_32`
#[inline]
pub fn l_abs(l_var1: Word32) -> Word32 {
    if l_var1 == MIN_32 {
        diagnostics::report("l_abs", OverflowKind::Range);
        MAX_32
    } else {
        l_var1.abs()
    }
}

/// 32 位算术左移, 溢出时饱和
///
/// 负移位量等价于 `l_shr(l_var1, -var2)`, 移位量先钳位到 -32.
pub fn l_shl(l_var1: Word32, var2: Word16) -> Word32 {
    if var2 <= 0 {
        return l_shr(l_var1, -(var2.max(-32)));
    }
    if l_var1 == 0 {
        return 0;
    }
    if var2 > 31 {
        return saturate32("l_shl", l_var1 < 0);
    }

    // 逐位左移在首次越界时饱和, 等价于比较精确结果
    let wide = i64::from(l_var1) << var2;
    if wide > i64::from(MAX_32) {
        saturate32("l_shl", false)
    } else if wide < i64::from(MIN_32) {
        saturate32("l_shl", true)
    } else {
        wide as Word32
    }
}

/// 32 位算术右移 (符号扩展), 从不饱和
///
/// 移位量 >= 31 时返回 0 或 -1; 负移位量等价于 `l_shl(l_var1, -var2)`.
pub fn l_shr(l_var1: Word32, var2: Word16) -> Word32 {
    if var2 < 0 {
        return l_shl(l_var1, -(var2.max(-32)));
    }
    if var2 >= 31 {
        if var2 > 31 {
            diagnostics::report("l_shr", OverflowKind::Range);
        }
        return if l_var1 < 0 { -1 } else { 0 };
    }
    l_var1 >> var2
}

/// 带舍入的 32 位算术右移
///
/// 移位量大于 31 时返回 0 (而不是 -1), 与 [`l_shr`] 的行为不同.
pub fn l_shr_r(l_var1: Word32, var2: Word16) -> Word32 {
    if var2 > 31 {
        diagnostics::report("l_shr_r", OverflowKind::Range);
        return 0;
    }
    let mut out = l_shr(l_var1, var2);
    if var2 > 0 && l_var1 & (1 << (var2 - 1)) != 0 {
        out += 1;
    }
    out
}

/// Q31 乘法: `(var1 * var2) << 1`, 仅 `l_mult(MIN_16, MIN_16)` 饱和
#[inline]
pub fn l_mult(var1: Word16, var2: Word16) -> Word32 {
    let product = Word32::from(var1) * Word32::from(var2);
    if product == 0x4000_0000 {
        saturate32("l_mult", false)
    } else {
        product * 2
    }
}

/// 不带左移的 16x16->32 乘法, 不会溢出
#[inline]
pub fn l_mult0(var1: Word16, var2: Word16) -> Word32 {
    Word32::from(var1) * Word32::from(var2)
}

/// 乘加: `l_add(l_var3, l_mult(var1, var2))`
#[inline]
pub fn l_mac(l_var3: Word32, var1: Word16, var2: Word16) -> Word32 {
    l_add(l_var3, l_mult(var1, var2))
}

/// 乘减: `l_sub(l_var3, l_mult(var1, var2))`
#[inline]
pub fn l_msu(l_var3: Word32, var1: Word16, var2: Word16) -> Word32 {
    l_sub(l_var3, l_mult(var1, var2))
}

/// 不带左移的乘加: `l_add(l_var3, l_mult0(var1, var2))`
#[inline]
pub fn l_mac0(l_var3: Word32, var1: Word16, var2: Word16) -> Word32 {
    l_add(l_var3, l_mult0(var1, var2))
}

/// 不带左移的乘减: `l_sub(l_var3, l_mult0(var1, var2))`
#[inline]
pub fn l_msu0(l_var3: Word32, var1: Word16, var2: Word16) -> Word32 {
    l_sub(l_var3, l_mult0(var1, var2))
}

/// 舍入取高 16 位: `extract_h(l_add(l_var1, 0x8000))`
#[inline]
pub fn round_fx(l_var1: Word32) -> Word16 {
    extract_h(l_add(l_var1, 0x8000))
}

/// 乘加后舍入取高 16 位
#[inline]
pub fn mac_r(l_var3: Word32, var1: Word16, var2: Word16) -> Word16 {
    round_fx(l_mac(l_var3, var1, var2))
}

/// 乘减后舍入取高 16 位
#[inline]
pub fn msu_r(l_var3: Word32, var1: Word16, var2: Word16) -> Word16 {
    round_fx(l_msu(l_var3, var1, var2))
}

/// 将 16 位值放入高半字, 低 16 位补零
#[inline]
pub fn l_deposit_h(var1: Word16) -> Word32 {
    Word32::from(var1) << 16
}

/// 将 16 位值放入低半字, 高 16 位符号扩展
#[inline]
pub fn l_deposit_l(var1: Word16) -> Word32 {
    Word32::from(var1)
}

/// 32 位归一化左移量
///
/// 约定: `norm_l(0) == 0`, `norm_l(-1) == 31`.
pub fn norm_l(l_var1: Word32) -> Word16 {
    match l_var1 {
        0 => 0,
        -1 => 31,
        v => {
            let magnitude = if v < 0 { !v } else { v };
            magnitude.leading_zeros() as Word16 - 1
        }
    }
}

/// 32/16 小数除法, 结果为 Q15
///
/// 被除数不小于 `den << 16` 时返回 `MAX_16`.
///
/// # Panics
///
/// 除数为 0 或任一操作数为负时 panic. 受检形式见 [`try_div_l`].
pub fn div_l(l_num: Word32, den: Word16) -> Word16 {
    match try_div_l(l_num, den) {
        Ok(quotient) => quotient,
        Err(err) => panic!("div_l 致命错误: {err}"),
    }
}

/// [`div_l`] 的受检形式
pub fn try_div_l(l_num: Word32, den: Word16) -> Lc3Result<Word16> {
    if den <= 0 || l_num < 0 {
        return Err(Lc3Error::DivisionDomain {
            numerator: l_num,
            denominator: den,
        });
    }

    let l_den = l_deposit_h(den);
    if l_num >= l_den {
        if l_num > l_den {
            diagnostics::report("div_l", OverflowKind::Range);
        }
        return Ok(MAX_16);
    }

    let mut num = l_shr(l_num, 1);
    let l_den = l_shr(l_den, 1);
    let mut quotient: Word16 = 0;
    for _ in 0..15 {
        quotient = shl(quotient, 1);
        num = l_shl(num, 1);
        if num >= l_den {
            num = l_sub(num, l_den);
            quotient = add(quotient, 1);
        }
    }
    Ok(quotient)
}

/// 32x16 小数乘法
///
/// 低半字与 `v` 的乘积右移 15 位后, 再与高半字的 Q31 乘积相加.
pub fn l_mls(l_v: Word32, v: Word16) -> Word32 {
    let low = (l_v & 0xffff) * Word32::from(v);
    let low = l_shr(low, 15);
    l_mac(low, v, extract_h(l_v))
}

/// 32 位较小值
#[inline]
pub fn l_min(l_var1: Word32, l_var2: Word32) -> Word32 {
    l_var1.min(l_var2)
}

/// 32 位较大值
#[inline]
pub fn l_max(l_var1: Word32, l_var2: Word32) -> Word32 {
    l_var1.max(l_var2)
}
