//! # lc3plus
//!
//! LC3plus 定点编码核心的 Rust 实现.
//!
//! - **基本运算**: 位精确的 16/32 位饱和运算、归一化、除法与溢出诊断
//! - **瞬态检测**: 逐声道的 attack 检测, 供码率分配使用
//!
//! # 快速开始
//!
//! ```rust
//! use lc3plus::basop::{l_mult, round_fx};
//! use lc3plus::enc::{AttackConfig, FrameDuration};
//!
//! assert_eq!(round_fx(l_mult(16384, 16384)), 8192);
//!
//! let config = AttackConfig::new(32000, FrameDuration::Ms10).unwrap();
//! assert_eq!(config.frame_length(), 320);
//! ```
//!
//! # Crate 结构
//!
//! | Crate | 功能 |
//! |-------|------|
//! | `lc3plus-basop` | 位精确基本运算 |
//! | `lc3plus-enc` | 编码器模块 (瞬态检测) |

/// 位精确基本运算
pub use lc3plus_basop as basop;

/// 编码器模块
pub use lc3plus_enc as enc;

pub mod logging;

/// 获取版本号
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
