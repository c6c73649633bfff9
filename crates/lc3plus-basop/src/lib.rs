//! # lc3plus-basop
//!
//! LC3plus 定点实现所依赖的位精确基本运算库.
//!
//! 所有运算都作用于 16 位 (`Word16`) 与 32 位 (`Word32`) 有符号字, 语义与 ITU-T G.191 基本运算
//! 逐位一致:
//! - 加减、移位、乘法、乘加在溢出时饱和到目标位宽的上下界
//! - 负移位量表示反方向移位, 并被钳位到字宽
//! - 除法的定义域错误属于致命错误 (panic), 不会返回看似合理的数值
//!
//! 饱和事件通过线程局部的诊断旁路 ([`diagnostics`]) 上报, 不影响运算结果.
//!
//! ## 使用示例
//!
//! ```rust
//! use lc3plus_basop::{add, l_mac, extract_h, diagnostics};
//!
//! assert_eq!(add(32000, 1000), 32767);
//! assert!(diagnostics::take_overflow());
//!
//! let acc = l_mac(0, 16384, 16384);
//! assert_eq!(extract_h(acc), 8192);
//! ```

pub mod carry;
pub mod diagnostics;
pub mod error;
pub mod ops16;
pub mod ops32;
pub mod sat;
pub mod scale;

/// 16 位有符号字
pub type Word16 = i16;
/// 32 位有符号字
pub type Word32 = i32;

/// 16 位上界
pub const MAX_16: Word16 = 0x7fff;
/// 16 位下界
pub const MIN_16: Word16 = -0x8000;
/// 32 位上界
pub const MAX_32: Word32 = 0x7fff_ffff;
/// 32 位下界
pub const MIN_32: Word32 = -0x8000_0000;

// 重导出常用类型与运算
pub use carry::CarryChain;
pub use error::{Lc3Error, Lc3Result};
pub use ops16::*;
pub use ops32::*;
pub use sat::*;
pub use scale::{scale_factor16, scale_factor16_0, scale_factor32, scale_factor32_0};
