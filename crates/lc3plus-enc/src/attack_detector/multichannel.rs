//! 多声道并行瞬态检测.
//!
//! 各声道持有独立的状态与工作区, 诊断旁路为线程局部, 因此声道之间可以完全并行.

use lc3plus_basop::{Lc3Error, Lc3Result, Word16};
use rayon::prelude::*;

use super::{AttackConfig, AttackDetector, AttackScratch};

/// 一组共享配置的声道检测器
#[derive(Debug, Clone)]
pub struct AttackDetectorBank {
    channels: Vec<(AttackDetector, AttackScratch)>,
}

impl AttackDetectorBank {
    /// 创建 `channels` 个声道的检测器
    pub fn new(config: AttackConfig, channels: usize, enabled: bool) -> Self {
        let channels = (0..channels)
            .map(|_| (AttackDetector::new(config, enabled), AttackScratch::new(&config)))
            .collect();
        Self { channels }
    }

    /// 声道数
    pub fn channels(&self) -> usize {
        self.channels.len()
    }

    /// 指定声道的检测器
    pub fn detector(&self, channel: usize) -> Option<&AttackDetector> {
        self.channels.get(channel).map(|(detector, _)| detector)
    }

    /// 统一切换所有声道的瞬态处理开关
    pub fn set_enabled(&mut self, enabled: bool) {
        for (detector, _) in &mut self.channels {
            detector.set_enabled(enabled);
        }
    }

    /// 并行检测一帧
    ///
    /// `frames` 与 `input_scaling` 按声道一一对应.
    pub fn detect(&mut self, frames: &[&[Word16]], input_scaling: &[Word16]) -> Lc3Result<()> {
        if frames.len() != self.channels.len() || input_scaling.len() != self.channels.len() {
            return Err(Lc3Error::InvalidArgument(format!(
                "声道数不匹配: 检测器 {}, 帧 {}, 定标 {}",
                self.channels.len(),
                frames.len(),
                input_scaling.len()
            )));
        }

        self.channels
            .par_iter_mut()
            .zip(frames.par_iter())
            .zip(input_scaling.par_iter())
            .try_for_each(|(((detector, scratch), frame), &scaling)| {
                detector.detect(frame, scaling, scratch)
            })
    }

    /// 各声道 `(detected, position)`
    pub fn results(&self) -> Vec<(bool, Word16)> {
        self.channels
            .iter()
            .map(|(detector, _)| (detector.detected(), detector.position()))
            .collect()
    }
}
