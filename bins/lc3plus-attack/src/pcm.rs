//! 原始 s16le PCM 读取与分帧.

use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

/// 按帧读取交织的 s16le PCM, 输出逐声道的帧
pub struct FrameReader<R> {
    reader: R,
    channels: usize,
    frame_length: usize,
    bytes: Vec<u8>,
}

impl FrameReader<BufReader<File>> {
    /// 打开 PCM 文件
    pub fn open(path: &Path, channels: usize, frame_length: usize) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("打开输入文件失败, path={}", path.display()))?;
        FrameReader::new(BufReader::new(file), channels, frame_length)
    }
}

impl<R: Read> FrameReader<R> {
    pub fn new(reader: R, channels: usize, frame_length: usize) -> Result<Self> {
        if channels == 0 {
            bail!("声道数必须大于 0");
        }
        Ok(Self {
            reader,
            channels,
            frame_length,
            bytes: vec![0; channels * frame_length * 2],
        })
    }

    /// 读取下一帧到 `frames` (每声道一个缓冲)
    ///
    /// 返回 `Ok(false)` 表示已到文件末尾; 末尾不足一帧的部分补零.
    pub fn read_frame(&mut self, frames: &mut [Vec<i16>]) -> Result<bool> {
        let mut filled = 0;
        while filled < self.bytes.len() {
            match self.reader.read(&mut self.bytes[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e).context("读取 PCM 数据失败"),
            }
        }
        if filled == 0 {
            return Ok(false);
        }
        if filled < self.bytes.len() {
            log::debug!(
                "最后一帧不完整: {} / {} 字节, 补零",
                filled,
                self.bytes.len()
            );
            self.bytes[filled..].fill(0);
        }

        for frame in frames.iter_mut() {
            frame.resize(self.frame_length, 0);
        }
        for (i, sample) in self.bytes.chunks_exact(2).enumerate() {
            let value = i16::from_le_bytes([sample[0], sample[1]]);
            frames[i % self.channels][i / self.channels] = value;
        }
        Ok(true)
    }
}
