//! 统一错误类型定义.
//!
//! 饱和不是错误, 只会经由诊断旁路上报. 这里只描述调用方可以恢复的参数错误,
//! 以及除法定义域错误的受检形式.

use thiserror::Error;

/// LC3plus 定点核心统一错误类型
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Lc3Error {
    /// 无效参数
    #[error("无效参数: {0}")]
    InvalidArgument(String),

    /// 不支持的配置 (采样率、帧长等)
    #[error("不支持的配置: {0}")]
    Unsupported(String),

    /// 除法定义域错误 (除数为 0、操作数为负或被除数大于除数)
    #[error("除法定义域错误: 被除数={numerator}, 除数={denominator}")]
    DivisionDomain {
        /// 被除数
        numerator: i32,
        /// 除数
        denominator: i16,
    },
}

/// LC3plus 定点核心统一 Result 类型
pub type Lc3Result<T> = Result<T, Lc3Error>;
