//! 逐声道瞬态 (attack) 检测.
//!
//! 每帧执行一次, 流程:
//! 1. 根据输入帧、滤波器记忆与累计能量选取新的公共定标, 并重定标持久状态
//! 2. 将 32/48 kHz 输入抽取到 16 kHz
//! 3. 拼接上一帧末尾两个采样后做二阶高通 `0.375 - 0.5 z^-1 + 0.125 z^-2`
//! 4. 按 2.5 ms 分块计算能量, 与衰减后的累计能量比较得到瞬态位置
//!
//! 上一帧瞬态位置不小于延续阈值时, 本帧检测结果保持为真.

mod config;
pub mod multichannel;

pub use config::{AttackConfig, FrameDuration, InputRate, attack_handling_enabled};
pub use config::{BLOCK_LEN, MAX_BLOCKS};

use lc3plus_basop::{
    Lc3Error, Lc3Result, Word16, Word32, add, extract_h, extract_l, l_mac, l_mac0, l_max, l_msu,
    l_mult, l_mult0, l_shl, l_shr, s_and, s_min, scale_factor16, scale_factor16_0,
    scale_factor32_0, shl, shr, sub,
};
use log::{debug, trace};

/// 高通滤波器系数 (Q15)
const FILTER_B0: Word16 = 12288;
const FILTER_B1: Word16 = 16384;
const FILTER_B2: Word16 = 4096;

/// 能量门限比例: 约 1/8.5 (30840 / 2^15 / 4)
const ENERGY_RATIO: Word16 = 30840;

/// 滤波器记忆长度
const FILTER_MEM_LEN: usize = 2;

/// 每声道持久状态
///
/// 在声道生命周期内逐帧更新, 仅在码率切换等配置变化时由调用方重置.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttackState {
    /// 当前定标 (指数)
    pub scaling: Word16,
    /// 上一帧降采样信号的最后两个采样
    pub filter_mem: [Word16; FILTER_MEM_LEN],
    /// 累计块能量
    pub acc_energy: Word32,
    /// 最近一次检测到的瞬态块位置, -1 表示无
    pub position: Word16,
    /// 本帧是否判定为瞬态
    pub detected: bool,
}

impl AttackState {
    /// 码率切换时的重置: 清除滤波器记忆、累计能量、检测标志与位置
    ///
    /// 定标保持不变, 下一帧会按新数据重新选取.
    pub fn reset(&mut self) {
        self.filter_mem = [0; FILTER_MEM_LEN];
        self.acc_energy = 0;
        self.detected = false;
        self.position = 0;
    }
}

/// 调用方持有的工作区, 可跨帧复用
#[derive(Debug, Clone)]
pub struct AttackScratch {
    block_energy: [Word32; MAX_BLOCKS],
    /// 前 2 个位置存放滤波器记忆, 其后为 16 kHz 信号
    samples: Vec<Word16>,
}

impl AttackScratch {
    /// 按配置分配工作区
    pub fn new(config: &AttackConfig) -> Self {
        Self {
            block_energy: [0; MAX_BLOCKS],
            samples: vec![0; FILTER_MEM_LEN + config.frame_length_16k()],
        }
    }

    /// 最近一帧的块能量
    pub fn block_energy(&self) -> &[Word32; MAX_BLOCKS] {
        &self.block_energy
    }

    /// 最近一帧滤波后的 16 kHz 信号
    pub fn filtered(&self) -> &[Word16] {
        &self.samples[FILTER_MEM_LEN..]
    }
}

/// 对一帧执行瞬态检测 (瞬态处理已启用时的完整流程)
///
/// # 参数
/// - `config`: 声道配置
/// - `state`: 持久状态, 原地更新
/// - `input`: 一帧输入, 长度必须为 `config.frame_length()`
/// - `input_scaling`: 输入信号的指数
/// - `scratch`: 工作区, 至少按 `config` 分配
pub fn detect_attack(
    config: &AttackConfig,
    state: &mut AttackState,
    input: &[Word16],
    input_scaling: Word16,
    scratch: &mut AttackScratch,
) -> Lc3Result<()> {
    if input.len() != config.frame_length() {
        return Err(Lc3Error::InvalidArgument(format!(
            "输入帧长度不匹配: 期望 {}, 实际 {}",
            config.frame_length(),
            input.len()
        )));
    }
    let len_16k = config.frame_length_16k();
    if scratch.samples.len() < FILTER_MEM_LEN + len_16k {
        return Err(Lc3Error::InvalidArgument(format!(
            "工作区过小: 需要 {} 个采样, 实际 {}",
            FILTER_MEM_LEN + len_16k,
            scratch.samples.len()
        )));
    }

    // ===== 选取新定标并重定标持久状态 =====
    let input_scale = add(scale_factor16(input), input_scaling);
    let mem_scale = add(scale_factor16_0(&state.filter_mem), state.scaling);
    let energy_scale = shr(
        add(
            add(scale_factor32_0(&[state.acc_energy]), shl(state.scaling, 1)),
            1,
        ),
        1,
    );
    // 为降采样求和预留 2 位余量
    let new_scaling = sub(s_min(input_scale, s_min(mem_scale, energy_scale)), 2);

    let rescale = sub(new_scaling, state.scaling);
    if rescale != 0 {
        state.filter_mem[0] = shl(state.filter_mem[0], rescale);
        state.filter_mem[1] = shl(state.filter_mem[1], rescale);
        state.acc_energy = l_shl(state.acc_energy, shl(rescale, 1));
    }
    trace!(
        "瞬态检测定标: 输入 {}, 记忆 {}, 能量 {} -> {} (重定标 {})",
        input_scale, mem_scale, energy_scale, new_scaling, rescale
    );
    state.scaling = new_scaling;

    // ===== 降采样到 16 kHz =====
    let samples = &mut scratch.samples[..FILTER_MEM_LEN + len_16k];
    let (mem, down) = samples.split_at_mut(FILTER_MEM_LEN);
    match config.input_rate() {
        InputRate::Hz32000 => {
            let delta = sub(1, sub(new_scaling, input_scaling));
            for (out, pair) in down.iter_mut().zip(input.chunks_exact(2)) {
                *out = add(shr(pair[0], delta), shr(pair[1], delta));
            }
        }
        InputRate::Hz48000 => {
            let delta = sub(2, sub(new_scaling, input_scaling));
            for (out, triple) in down.iter_mut().zip(input.chunks_exact(3)) {
                *out = add(
                    shr(triple[0], delta),
                    add(shr(triple[1], delta), shr(triple[2], delta)),
                );
            }
        }
    }

    mem.copy_from_slice(&state.filter_mem);
    state.filter_mem.copy_from_slice(&down[len_16k - FILTER_MEM_LEN..]);

    // ===== 高通滤波 (倒序原地) =====
    for i in (FILTER_MEM_LEN..FILTER_MEM_LEN + len_16k).rev() {
        let mut acc = l_mult(samples[i], FILTER_B0);
        acc = l_msu(acc, samples[i - 1], FILTER_B1);
        acc = l_mac(acc, samples[i - 2], FILTER_B2);
        samples[i] = extract_h(acc);
    }

    // ===== 块能量 =====
    scratch.block_energy = [0; MAX_BLOCKS];
    let filtered = &scratch.samples[FILTER_MEM_LEN..FILTER_MEM_LEN + len_16k];
    for (energy, block) in scratch
        .block_energy
        .iter_mut()
        .zip(filtered.chunks_exact(BLOCK_LEN))
    {
        *energy = block.iter().fold(0, |e, &s| l_mac(e, s, s));
    }

    // ===== 门限比较 =====
    state.detected = state.position >= config.hangover_thresh();
    let mut position: Word16 = -1;

    for (i, &energy) in scratch.block_energy[..config.nblocks()].iter().enumerate() {
        // energy / 8.5, 按高低半字分别相乘避免溢出
        let l16 = s_and(extract_l(l_shr(energy, 1)), 0x7fff);
        let h16 = extract_h(energy);
        let mut threshold = l_shr(l_mult0(l16, ENERGY_RATIO), 15);
        threshold = l_shr(l_mac0(threshold, h16, ENERGY_RATIO), 2);

        if threshold > state.acc_energy {
            position = i as Word16;
            state.detected = true;
        }
        state.acc_energy = l_max(l_shr(state.acc_energy, 2), energy);
    }
    state.position = position;

    if position >= 0 {
        debug!(
            "检测到瞬态: 块 {}, 块能量 {}, 累计能量 {}",
            position, scratch.block_energy[position as usize], state.acc_energy
        );
    }
    Ok(())
}

/// 单声道瞬态检测器
#[derive(Debug, Clone)]
pub struct AttackDetector {
    config: AttackConfig,
    enabled: bool,
    state: AttackState,
}

impl AttackDetector {
    /// 创建检测器, 初始状态全零
    pub fn new(config: AttackConfig, enabled: bool) -> Self {
        Self {
            config,
            enabled,
            state: AttackState::default(),
        }
    }

    /// 检测一帧; 瞬态处理关闭时为空操作, 状态保持不变
    pub fn detect(
        &mut self,
        input: &[Word16],
        input_scaling: Word16,
        scratch: &mut AttackScratch,
    ) -> Lc3Result<()> {
        if !self.enabled {
            return Ok(());
        }
        detect_attack(&self.config, &mut self.state, input, input_scaling, scratch)
    }

    /// 切换瞬态处理开关; 关闭时重置持久状态
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled && !enabled {
            debug!("瞬态处理关闭, 重置检测状态");
        }
        if !enabled {
            self.state.reset();
        }
        self.enabled = enabled;
    }

    /// 瞬态处理是否启用
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// 本帧是否判定为瞬态
    pub fn detected(&self) -> bool {
        self.state.detected
    }

    /// 瞬态块位置, -1 表示本帧无瞬态
    pub fn position(&self) -> Word16 {
        self.state.position
    }

    /// 持久状态
    pub fn state(&self) -> &AttackState {
        &self.state
    }

    /// 配置
    pub fn config(&self) -> &AttackConfig {
        &self.config
    }
}
