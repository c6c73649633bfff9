//! LC3plus 定点核心性能基准测试.
//!
//! 覆盖基本运算的乘加热路径与逐帧瞬态检测.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lc3plus::basop::{l_mac, mult_r, round_fx, shl};
use lc3plus::enc::{AttackConfig, AttackDetector, AttackDetectorBank, AttackScratch, FrameDuration};

/// 创建正弦状的测试帧
fn make_frame(len: usize, period: usize, amplitude: i32) -> Vec<i16> {
    (0..len)
        .map(|i| {
            let phase = (i % period) as i32 * 2 - period as i32;
            (phase * amplitude / period as i32) as i16
        })
        .collect()
}

fn bench_mac_loop(c: &mut Criterion) {
    let x = make_frame(480, 37, 20000);
    let y = make_frame(480, 53, 12000);
    c.bench_function("l_mac_dot_480", |b| {
        b.iter(|| {
            let acc = black_box(&x)
                .iter()
                .zip(black_box(&y))
                .fold(0, |acc, (&p, &q)| l_mac(acc, p, q));
            round_fx(acc)
        });
    });
    c.bench_function("mult_r_shl_480", |b| {
        b.iter(|| {
            black_box(&x)
                .iter()
                .zip(black_box(&y))
                .map(|(&p, &q)| shl(mult_r(p, q), 1))
                .fold(0i32, |s, v| s + i32::from(v))
        });
    });
}

fn bench_attack_detect(c: &mut Criterion) {
    for (rate, name) in [(32000, "attack_detect_32k_10ms"), (48000, "attack_detect_48k_10ms")] {
        let config = AttackConfig::new(rate, FrameDuration::Ms10).unwrap();
        let frame = make_frame(config.frame_length(), 91, 16000);
        c.bench_function(name, |b| {
            let mut detector = AttackDetector::new(config, true);
            let mut scratch = AttackScratch::new(&config);
            b.iter(|| {
                detector.detect(black_box(&frame), 0, &mut scratch).unwrap();
                detector.position()
            });
        });
    }
}

fn bench_attack_bank(c: &mut Criterion) {
    let config = AttackConfig::new(48000, FrameDuration::Ms10).unwrap();
    let frames: Vec<Vec<i16>> = (0..8)
        .map(|ch| make_frame(config.frame_length(), 50 + ch * 7, 12000))
        .collect();
    let slices: Vec<&[i16]> = frames.iter().map(Vec::as_slice).collect();
    let scaling = vec![0; frames.len()];
    c.bench_function("attack_bank_8ch_48k", |b| {
        let mut bank = AttackDetectorBank::new(config, frames.len(), true);
        b.iter(|| bank.detect(black_box(&slices), &scaling).unwrap());
    });
}

criterion_group!(benches, bench_mac_loop, bench_attack_detect, bench_attack_bank);
criterion_main!(benches);
