use std::fmt;

use crate::model::Tile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MahjongError {
    /// 手牌の枚数が不正 (副露を3枚として数えて13枚または14枚でない)
    InvalidTileCount { count: usize },
    /// 同一牌が5枚以上存在する
    TooManyTiles { tile: Tile },
    /// 牌文字列・副露文字列のパースエラー
    Parse { input: String, message: String },
    /// 鳴きの種類と牌の枚数・形・提供元が一致しない
    InvalidMeld { meld: String, message: String },
    /// 風が東南西北(1~4)の範囲外
    InvalidWind { wind: usize },
    /// ルール設定(JSON)の読み込みエラー
    Config { message: String },
    /// 和了形ではない
    NotWinningShape,
    /// 和了形だが役がない
    NoYaku,
    /// 前提条件を満たさない操作 (鳴き,リーチ,打牌など)
    IllegalOperation { message: String },
}

impl MahjongError {
    pub fn illegal(message: impl Into<String>) -> Self {
        MahjongError::IllegalOperation {
            message: message.into(),
        }
    }

    pub fn parse(input: &str, message: impl Into<String>) -> Self {
        MahjongError::Parse {
            input: input.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for MahjongError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MahjongError::InvalidTileCount { count } => {
                write!(f, "invalid tile count: {} (expected 13 or 14)", count)
            }
            MahjongError::TooManyTiles { tile } => {
                write!(f, "more than 4 copies of tile {}", tile)
            }
            MahjongError::Parse { input, message } => {
                write!(f, "parse error on '{}': {}", input, message)
            }
            MahjongError::InvalidMeld { meld, message } => {
                write!(f, "invalid meld '{}': {}", meld, message)
            }
            MahjongError::InvalidWind { wind } => write!(f, "invalid wind: {}", wind),
            MahjongError::Config { message } => write!(f, "config error: {}", message),
            MahjongError::NotWinningShape => write!(f, "hand is not a winning shape"),
            MahjongError::NoYaku => write!(f, "winning shape without yaku"),
            MahjongError::IllegalOperation { message } => {
                write!(f, "illegal operation: {}", message)
            }
        }
    }
}

impl std::error::Error for MahjongError {}

impl From<serde_json::Error> for MahjongError {
    fn from(e: serde_json::Error) -> Self {
        MahjongError::Config {
            message: e.to_string(),
        }
    }
}

pub type MahjongResult<T> = Result<T, MahjongError>;
