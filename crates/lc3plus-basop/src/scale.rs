//! 块级动态范围 (headroom) 计算.
//!
//! 返回整块数据可以无溢出左移的位数, 即块内最大正值与最小负值归一化移位量的较小者.
//! `_0` 后缀的版本对全零块返回字宽 (16/32), 不带后缀的版本返回 0.

use crate::ops16::norm_s;
use crate::ops32::norm_l;
use crate::{Word16, Word32};

/// 16 位块的可用左移位数, 全零块返回 16
pub fn scale_factor16_0(x: &[Word16]) -> Word16 {
    let x_max = x.iter().copied().filter(|&v| v >= 0).max().unwrap_or(0);
    let x_min = x.iter().copied().filter(|&v| v < 0).min().unwrap_or(0);

    let i_max = if x_max != 0 { norm_s(x_max) } else { 16 };
    let i_min = if x_min != 0 { norm_s(x_min) } else { 16 };
    i_max.min(i_min)
}

/// 16 位块的可用左移位数, 全零块返回 0
pub fn scale_factor16(x: &[Word16]) -> Word16 {
    scale_factor16_0(x) & 0xf
}

/// 32 位块的可用左移位数, 全零块返回 32
pub fn scale_factor32_0(x: &[Word32]) -> Word16 {
    let x_max = x.iter().copied().filter(|&v| v >= 0).max().unwrap_or(0);
    let x_min = x.iter().copied().filter(|&v| v < 0).min().unwrap_or(0);

    let i_max = if x_max != 0 { norm_l(x_max) } else { 32 };
    let i_min = if x_min != 0 { norm_l(x_min) } else { 32 };
    i_max.min(i_min)
}

/// 32 位块的可用左移位数, 全零块返回 0
pub fn scale_factor32(x: &[Word32]) -> Word16 {
    scale_factor32_0(x) & 0x1f
}
