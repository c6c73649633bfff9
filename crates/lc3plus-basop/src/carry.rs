//! 带进位的 32 位加减 (遗留扩展精度运算).
//!
//! ITU-T 基本运算用全局 `Carry`/`Overflow` 标志串联两个 32 位字完成 64 位等效运算.
//! 这里改为由调用方持有的 [`CarryChain`], 状态机与 `L_add_c`/`L_sub_c` 逐位一致,
//! 包括 `sub_c` 在减数为 `MIN_32` 时的特殊路径.
//!
//! 注意: `sub_c` 以进位 1 表示"无借位". 减数为 0 时进位不会被置位,
//! 这是 `L_sub_c` 的既有行为, 依赖它做多字减法的调用方需要自行处理.

use crate::diagnostics::{self, OverflowKind};
use crate::ops32::l_mult;
use crate::{MAX_32, MIN_32, Word16, Word32};

/// 进位链状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarryChain {
    carry: bool,
    overflow: bool,
}

impl CarryChain {
    /// 创建进位与溢出均为 0 的进位链
    pub const fn new() -> Self {
        Self {
            carry: false,
            overflow: false,
        }
    }

    /// 当前进位
    pub fn carry(&self) -> bool {
        self.carry
    }

    /// 当前溢出标志
    pub fn overflow(&self) -> bool {
        self.overflow
    }

    /// 设置进位输入
    pub fn set_carry(&mut self, carry: bool) {
        self.carry = carry;
    }

    /// 清除溢出标志
    pub fn clear_overflow(&mut self) {
        self.overflow = false;
    }

    /// 带进位加法, 不饱和: `l_var1 + l_var2 + carry`
    ///
    /// 输出进位为无符号意义上的第 32 位进位.
    pub fn add_c(&mut self, l_var1: Word32, l_var2: Word32) -> Word32 {
        let out = l_var1
            .wrapping_add(l_var2)
            .wrapping_add(Word32::from(self.carry));
        let test = l_var1.wrapping_add(l_var2);

        let carry_int;
        if l_var1 > 0 && l_var2 > 0 && test < 0 {
            self.overflow = true;
            carry_int = false;
        } else if l_var1 < 0 && l_var2 < 0 {
            self.overflow = test >= 0;
            carry_int = true;
        } else if (l_var1 ^ l_var2) < 0 && test >= 0 {
            self.overflow = false;
            carry_int = true;
        } else {
            self.overflow = false;
            carry_int = false;
        }

        if self.carry {
            if test == MAX_32 {
                self.overflow = true;
                self.carry = carry_int;
            } else if test == -1 {
                self.carry = true;
            } else {
                self.carry = carry_int;
            }
        } else {
            self.carry = carry_int;
        }
        out
    }

    /// 带借位减法, 不饱和
    ///
    /// 进位为 1 时计算 `l_var1 - l_var2`, 为 0 时计算 `l_var1 - l_var2 - 1`.
    pub fn sub_c(&mut self, l_var1: Word32, l_var2: Word32) -> Word32 {
        if self.carry {
            self.carry = false;
            if l_var2 != MIN_32 {
                return self.add_c(l_var1, -l_var2);
            }
            let out = l_var1.wrapping_sub(l_var2);
            if l_var1 > 0 {
                self.overflow = true;
                self.carry = false;
            }
            return out;
        }

        let out = l_var1.wrapping_sub(l_var2).wrapping_sub(1);
        let test = l_var1.wrapping_sub(l_var2);

        let mut carry_int = false;
        if test < 0 && l_var1 > 0 && l_var2 < 0 {
            self.overflow = true;
        } else if test > 0 && l_var1 < 0 && l_var2 > 0 {
            self.overflow = true;
            carry_int = true;
        } else if test > 0 && (l_var1 ^ l_var2) > 0 {
            self.overflow = false;
            carry_int = true;
        }

        if test == MIN_32 {
            self.overflow = true;
        }
        self.carry = carry_int;
        out
    }

    /// 不饱和乘加: `add_c(l_var3, l_mult(var1, var2))`
    pub fn mac_ns(&mut self, l_var3: Word32, var1: Word16, var2: Word16) -> Word32 {
        let product = l_mult(var1, var2);
        self.add_c(l_var3, product)
    }

    /// 不饱和乘减: `sub_c(l_var3, l_mult(var1, var2))`
    pub fn msu_ns(&mut self, l_var3: Word32, var1: Word16, var2: Word16) -> Word32 {
        let product = l_mult(var1, var2);
        self.sub_c(l_var3, product)
    }

    /// 按待处理的溢出饱和
    ///
    /// 溢出标志置位时, 进位为 1 饱和到 `MIN_32`, 否则饱和到 `MAX_32`,
    /// 随后清除进位与溢出. 未溢出时原样返回.
    pub fn sat(&mut self, l_var1: Word32) -> Word32 {
        if !self.overflow {
            return l_var1;
        }
        diagnostics::report("l_sat", OverflowKind::Saturation);
        let out = if self.carry { MIN_32 } else { MAX_32 };
        self.carry = false;
        self.overflow = false;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 用两个 32 位字做 64 位加法
    fn add64(chain: &mut CarryChain, a: i64, b: i64) -> i64 {
        let lo = chain.add_c(a as i32, b as i32);
        let hi = chain.add_c((a >> 32) as i32, (b >> 32) as i32);
        (i64::from(hi) << 32) | i64::from(lo as u32)
    }

    #[test]
    fn test_two_limb_addition() {
        let cases = [
            (0x0000_0001_ffff_ffff_i64, 1_i64),
            (0x0000_0000_8000_0000, 0x0000_0000_8000_0000),
            (-1, 1),
            (0x1234_5678_9abc_def0, 0x0fed_cba9_8765_4321),
            (-0x0000_0001_0000_0000, 0x0000_0000_7fff_ffff),
        ];
        for (a, b) in cases {
            let mut chain = CarryChain::new();
            assert_eq!(add64(&mut chain, a, b), a.wrapping_add(b), "{a:#x} + {b:#x}");
        }
    }

    #[test]
    fn test_add_c_carry_in_and_overflow() {
        let mut chain = CarryChain::new();
        chain.set_carry(true);
        assert_eq!(chain.add_c(MAX_32, 0), MIN_32);
        assert!(chain.overflow());
        assert!(!chain.carry());

        let mut chain = CarryChain::new();
        chain.set_carry(true);
        assert_eq!(chain.add_c(-1, 0), 0);
        assert!(chain.carry());

        let mut chain = CarryChain::new();
        assert_eq!(chain.add_c(MIN_32, MIN_32), 0);
        assert!(chain.overflow());
        assert!(chain.carry());
    }

    #[test]
    fn test_sub_c_with_and_without_borrow() {
        let mut chain = CarryChain::new();
        chain.set_carry(true);
        assert_eq!(chain.sub_c(5, 3), 2);
        assert!(chain.carry());
        assert!(!chain.overflow());

        let mut chain = CarryChain::new();
        assert_eq!(chain.sub_c(5, 3), 1);
        assert!(chain.carry());

        let mut chain = CarryChain::new();
        assert_eq!(chain.sub_c(MAX_32, -1), MAX_32);
        assert!(chain.overflow());
        assert!(!chain.carry());
    }

    #[test]
    fn test_sub_c_min32_subtrahend() {
        let mut chain = CarryChain::new();
        chain.set_carry(true);
        assert_eq!(chain.sub_c(1, MIN_32), MIN_32 + 1);
        assert!(chain.overflow());
        assert!(!chain.carry());

        let mut chain = CarryChain::new();
        chain.set_carry(true);
        assert_eq!(chain.sub_c(-1, MIN_32), MAX_32);
        assert!(!chain.overflow());
        assert!(!chain.carry());
    }

    #[test]
    fn test_sub_c_zero_subtrahend_leaves_carry_clear() {
        let mut chain = CarryChain::new();
        chain.set_carry(true);
        assert_eq!(chain.sub_c(7, 0), 7);
        assert!(!chain.carry());
    }

    #[test]
    fn test_mac_ns_msu_ns() {
        let mut chain = CarryChain::new();
        assert_eq!(chain.mac_ns(MAX_32, 1, 1), MAX_32.wrapping_add(2));
        assert!(chain.overflow());

        let mut chain = CarryChain::new();
        chain.set_carry(true);
        assert_eq!(chain.msu_ns(10, 1, 1), 8);
    }

    #[test]
    fn test_sat_uses_carry_direction() {
        let mut chain = CarryChain::new();
        let wrapped = chain.add_c(MAX_32, 1);
        assert_eq!(chain.sat(wrapped), MAX_32);
        assert!(!chain.overflow());

        let mut chain = CarryChain::new();
        let wrapped = chain.add_c(MIN_32, -1);
        assert!(chain.carry());
        assert_eq!(chain.sat(wrapped), MIN_32);
        assert!(!chain.carry());

        let mut chain = CarryChain::new();
        assert_eq!(chain.sat(42), 42);
    }
}
