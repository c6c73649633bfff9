//! # lc3plus-enc
//!
//! LC3plus 定点编码器模块. 目前提供瞬态 (attack) 检测, 供码率分配阶段使用.
//!
//! 检测器完全构建在 [`lc3plus_basop`] 的位精确基本运算之上,
//! 对相同的持久状态与输入帧, 结果与 ETSI TS 103 634 定点编码器逐位一致.
//!
//! ## 使用示例
//!
//! ```rust
//! use lc3plus_enc::{AttackConfig, AttackDetector, AttackScratch, FrameDuration};
//!
//! let config = AttackConfig::new(48000, FrameDuration::Ms10).unwrap();
//! let mut detector = AttackDetector::new(config, true);
//! let mut scratch = AttackScratch::new(&config);
//!
//! let frame = vec![0i16; config.frame_length()];
//! detector.detect(&frame, 0, &mut scratch).unwrap();
//! assert!(!detector.detected());
//! assert_eq!(detector.position(), -1);
//! ```

pub mod attack_detector;

// 重导出常用类型
pub use attack_detector::{
    AttackConfig, AttackDetector, AttackScratch, AttackState, FrameDuration, InputRate,
    attack_handling_enabled, detect_attack, multichannel::AttackDetectorBank,
};
