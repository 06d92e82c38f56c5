//! AI 配置
//!
//! 编排层只需要给出难度（即搜索深度），可选地覆盖时间预算。

use std::time::Duration;

use minichess_core::DEFAULT_TIME_LIMIT_MS;
use serde::{Deserialize, Serialize};

use crate::error::{AiError, Result};

/// 允许配置的最大搜索深度
pub const MAX_SEARCH_DEPTH: u8 = 8;

/// AI 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    /// 简单：depth=1
    Easy,
    /// 中等：depth=2
    #[default]
    Medium,
    /// 困难：depth=3
    Hard,
    /// 专家：depth=4
    Expert,
}

impl Difficulty {
    /// 对应的搜索深度
    pub fn depth(&self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::Expert => 4,
        }
    }

    /// 由深度推出最接近的难度档位
    pub fn from_depth(depth: u8) -> Self {
        match depth {
            0 | 1 => Difficulty::Easy,
            2 => Difficulty::Medium,
            3 => Difficulty::Hard,
            _ => Difficulty::Expert,
        }
    }
}

/// AI 配置
///
/// JSON 中省略 `max_depth` 时取难度对应的深度，两者都给出时以 `max_depth` 为准。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AiConfigFile")]
pub struct AiConfig {
    pub difficulty: Difficulty,
    pub max_depth: u8,
    pub time_limit_ms: u64,
}

/// 配置文件中的形式，所有字段可省略
#[derive(Deserialize)]
#[serde(default)]
struct AiConfigFile {
    difficulty: Difficulty,
    max_depth: Option<u8>,
    time_limit_ms: u64,
}

impl Default for AiConfigFile {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            max_depth: None,
            time_limit_ms: DEFAULT_TIME_LIMIT_MS,
        }
    }
}

impl From<AiConfigFile> for AiConfig {
    fn from(file: AiConfigFile) -> Self {
        Self {
            difficulty: file.difficulty,
            max_depth: file.max_depth.unwrap_or_else(|| file.difficulty.depth()),
            time_limit_ms: file.time_limit_ms,
        }
    }
}

impl AiConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            max_depth: difficulty.depth(),
            time_limit_ms: DEFAULT_TIME_LIMIT_MS,
        }
    }

    /// 直接指定搜索深度
    pub fn from_depth(max_depth: u8) -> Self {
        Self {
            difficulty: Difficulty::from_depth(max_depth),
            max_depth,
            time_limit_ms: DEFAULT_TIME_LIMIT_MS,
        }
    }

    /// 覆盖时间预算
    pub fn with_time_limit(mut self, time_limit_ms: u64) -> Self {
        self.time_limit_ms = time_limit_ms;
        self
    }

    /// 从 JSON 解析并校验
    pub fn from_json(json: &str) -> Result<Self> {
        let config: AiConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 校验搜索深度
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 || self.max_depth > MAX_SEARCH_DEPTH {
            return Err(AiError::InvalidDepth {
                depth: self.max_depth,
                max: MAX_SEARCH_DEPTH,
            });
        }
        Ok(())
    }

    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.time_limit_ms)
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::Medium)
    }
}
