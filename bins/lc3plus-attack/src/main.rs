//! lc3plus-attack - 瞬态检测命令行工具
//!
//! 读取原始 s16le PCM, 逐帧运行 LC3plus 瞬态检测并输出每帧的检测结果.

mod pcm;

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use lc3plus::basop::diagnostics;
use lc3plus::enc::{AttackConfig, AttackDetectorBank, FrameDuration, attack_handling_enabled};
use lc3plus::logging::{self, LoggingConfig};

use pcm::FrameReader;

#[derive(Parser, Debug)]
#[command(name = "lc3plus-attack", version, about = "LC3plus 瞬态检测工具")]
struct Cli {
    /// 输入文件路径 (原始 s16le PCM, 多声道交织)
    input: PathBuf,

    /// 采样率 (Hz), 支持 32000/44100/48000
    #[arg(short = 'r', long, default_value_t = 48000)]
    sample_rate: u32,

    /// 帧长, 单位 0.1 ms (100 或 75)
    #[arg(short = 'f', long, default_value_t = 100)]
    frame_dms: u32,

    /// 声道数
    #[arg(short = 'c', long, default_value_t = 1)]
    channels: usize,

    /// 输入信号的指数
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    input_scaling: i16,

    /// 每帧目标字节数; 指定后按码率规则决定是否启用瞬态处理
    #[arg(short = 'b', long)]
    target_bytes: Option<u32>,

    /// 只输出检测到瞬态的帧
    #[arg(short = 'q', long)]
    only_attacks: bool,

    /// 日志级别 (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::init(&LoggingConfig::for_verbosity("lc3plus-attack", cli.verbose)) {
        eprintln!("警告: 日志初始化失败: {e:#}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("错误: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let duration = FrameDuration::from_dms(cli.frame_dms)?;
    let config = AttackConfig::new(cli.sample_rate, duration)?;
    if cli.channels == 0 {
        bail!("声道数必须大于 0");
    }

    let enabled = match cli.target_bytes {
        Some(bytes) => attack_handling_enabled(cli.sample_rate, cli.frame_dms, bytes, false),
        None => true,
    };
    if !enabled {
        log::warn!("当前码率配置不启用瞬态处理, 所有帧将输出无瞬态");
    }
    log::info!(
        "输入: {}, {} Hz, {} 声道, 帧长 {} 采样",
        cli.input.display(),
        cli.sample_rate,
        cli.channels,
        config.frame_length()
    );

    let mut reader = FrameReader::open(&cli.input, cli.channels, config.frame_length())?;
    let mut bank = AttackDetectorBank::new(config, cli.channels, enabled);
    let mut frames = vec![Vec::with_capacity(config.frame_length()); cli.channels];
    let scaling = vec![cli.input_scaling; cli.channels];

    let mut frame_index = 0usize;
    let mut attack_frames = 0usize;
    while reader.read_frame(&mut frames)? {
        let slices: Vec<&[i16]> = frames.iter().map(Vec::as_slice).collect();
        bank.detect(&slices, &scaling)
            .with_context(|| format!("第 {frame_index} 帧检测失败"))?;

        let results = bank.results();
        let any_attack = results.iter().any(|&(detected, _)| detected);
        if any_attack {
            attack_frames += 1;
        }
        if any_attack || !cli.only_attacks {
            let line: Vec<String> = results
                .iter()
                .map(|&(detected, position)| format!("{}:{}", u8::from(detected), position))
                .collect();
            println!("{frame_index}\t{}", line.join("\t"));
        }
        frame_index += 1;
    }

    let overflows = diagnostics::overflow_count();
    log::info!(
        "处理完成: {} 帧, 其中 {} 帧检测到瞬态, 本线程饱和 {} 次",
        frame_index,
        attack_frames,
        overflows
    );
    Ok(())
}
