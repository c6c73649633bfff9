//! 瞬态检测的逐声道配置.

use lc3plus_basop::{Lc3Error, Lc3Result};

/// 每个检测块在 16 kHz 下的采样数 (2.5 ms)
pub const BLOCK_LEN: usize = 40;

/// 一帧最多的检测块数
pub const MAX_BLOCKS: usize = 4;

/// 检测器支持的输入采样率
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRate {
    /// 32 kHz, 每 2 个采样合并为一个 16 kHz 采样
    Hz32000,
    /// 48 kHz (44.1 kHz 输入同样按 48 kHz 处理), 每 3 个采样合并
    Hz48000,
}

impl InputRate {
    /// 由外部采样率得到内部处理速率
    pub fn from_sample_rate(sample_rate: u32) -> Lc3Result<Self> {
        match sample_rate {
            32000 => Ok(Self::Hz32000),
            44100 | 48000 => Ok(Self::Hz48000),
            _ => Err(Lc3Error::Unsupported(format!(
                "瞬态检测不支持采样率: {sample_rate} Hz"
            ))),
        }
    }

    /// 内部处理采样率 (Hz)
    pub fn hz(self) -> u32 {
        match self {
            Self::Hz32000 => 32000,
            Self::Hz48000 => 48000,
        }
    }

    /// 降到 16 kHz 的抽取因子
    pub fn decimation(self) -> usize {
        match self {
            Self::Hz32000 => 2,
            Self::Hz48000 => 3,
        }
    }
}

/// 启用瞬态检测的帧长
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameDuration {
    /// 10 ms
    Ms10,
    /// 7.5 ms
    Ms7_5,
}

impl FrameDuration {
    /// 由帧长 (单位 0.1 ms) 解析
    pub fn from_dms(frame_dms: u32) -> Lc3Result<Self> {
        match frame_dms {
            100 => Ok(Self::Ms10),
            75 => Ok(Self::Ms7_5),
            _ => Err(Lc3Error::Unsupported(format!(
                "瞬态检测不支持帧长: {}.{} ms",
                frame_dms / 10,
                frame_dms % 10
            ))),
        }
    }

    /// 帧长, 单位 0.1 ms
    pub fn dms(self) -> u32 {
        match self {
            Self::Ms10 => 100,
            Self::Ms7_5 => 75,
        }
    }

    /// 每帧检测块数
    pub fn nblocks(self) -> usize {
        match self {
            Self::Ms10 => 4,
            Self::Ms7_5 => 3,
        }
    }

    /// 上一帧瞬态位置达到此值时, 本帧沿用检测结果
    pub fn hangover_thresh(self) -> i16 {
        match self {
            Self::Ms10 => 2,
            Self::Ms7_5 => 1,
        }
    }
}

/// 瞬态检测配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackConfig {
    input_rate: InputRate,
    frame_duration: FrameDuration,
    frame_length: usize,
}

impl AttackConfig {
    /// 创建配置
    ///
    /// # 参数
    /// - `sample_rate`: 输入采样率, 仅支持 32000/44100/48000
    /// - `frame_duration`: 帧长
    pub fn new(sample_rate: u32, frame_duration: FrameDuration) -> Lc3Result<Self> {
        let input_rate = InputRate::from_sample_rate(sample_rate)?;
        let frame_length = (input_rate.hz() * frame_duration.dms() / 10_000) as usize;
        Ok(Self {
            input_rate,
            frame_duration,
            frame_length,
        })
    }

    /// 内部处理速率
    pub fn input_rate(&self) -> InputRate {
        self.input_rate
    }

    /// 帧长
    pub fn frame_duration(&self) -> FrameDuration {
        self.frame_duration
    }

    /// 每帧输入采样数
    pub fn frame_length(&self) -> usize {
        self.frame_length
    }

    /// 每帧检测块数
    pub fn nblocks(&self) -> usize {
        self.frame_duration.nblocks()
    }

    /// 延续阈值
    pub fn hangover_thresh(&self) -> i16 {
        self.frame_duration.hangover_thresh()
    }

    /// 降采样到 16 kHz 后的帧长
    pub fn frame_length_16k(&self) -> usize {
        self.nblocks() * BLOCK_LEN
    }
}

/// 当前码率配置下是否启用瞬态处理
///
/// 仅在 10 ms / 7.5 ms 帧、非高分辨率模式、中等码率区间内启用.
///
/// # 参数
/// - `sample_rate`: 外部输入采样率
/// - `frame_dms`: 帧长, 单位 0.1 ms
/// - `target_bytes`: 每帧目标字节数
/// - `hr_mode`: 是否为高分辨率模式
pub fn attack_handling_enabled(
    sample_rate: u32,
    frame_dms: u32,
    target_bytes: u32,
    hr_mode: bool,
) -> bool {
    if hr_mode {
        return false;
    }
    let (min_hi_rate, min_32k, max_bytes) = match frame_dms {
        100 => (100, 81, 340),
        75 => (75, 61, 150),
        _ => return false,
    };
    let rate_ok = (sample_rate >= 44100 && target_bytes >= min_hi_rate)
        || (sample_rate == 32000 && target_bytes >= min_32k);
    rate_ok && target_bytes < max_bytes
}
