use super::*;

pub type Points = (Point, Point, Point); // (ロンの支払い, ツモ・子の支払い, ツモ・親の支払い)

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WinType {
    #[default]
    Tsumo,
    Ron,
}

// 待ちの形
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wait {
    Ryanmen, // 両面
    Kanchan, // 嵌張
    Penchan, // 辺張
    Tanki,   // 単騎
    Shanpon, // 双碰
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScoreTier {
    Normal,
    Mangan,       // 満貫
    Haneman,      // 跳満
    Baiman,       // 倍満
    Sanbaiman,    // 三倍満
    KazoeYakuman, // 数え役満
    Yakuman(usize),
}

impl fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreTier::Normal => write!(f, ""),
            ScoreTier::Mangan => write!(f, "Mangan"),
            ScoreTier::Haneman => write!(f, "Haneman"),
            ScoreTier::Baiman => write!(f, "Baiman"),
            ScoreTier::Sanbaiman => write!(f, "Sanbaiman"),
            ScoreTier::KazoeYakuman => write!(f, "Kazoe Yakuman"),
            ScoreTier::Yakuman(1) => write!(f, "Yakuman"),
            ScoreTier::Yakuman(n) => write!(f, "{}x Yakuman", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinContext {
    pub yakus: Vec<(String, usize)>, // 役一覧(ドラを含まない), Vec<(name, fan)> 役満の場合fanは役満倍率
    pub win_type: WinType,           // ツモ or ロン
    pub is_dealer: bool,             // 親の和了
    pub winning_tile: Tile,          // 和了牌
    pub wait: Option<Wait>,          // 採用した待ちの解釈 (国士無双はNone)
    pub n_dora: usize,               // ドラの数(赤5を含む, 裏ドラは含まない)
    pub n_red: usize,                // 赤5の数
    pub n_ura_dora: usize,           // 裏ドラの数
    pub fu: usize,                   // 符数
    pub fan: usize,                  // 飜数(ドラを含む) 役満の場合は13,23,30...
    pub yakuman_times: usize,        // 役満倍率 (0: 通常役, 1: 役満, 2: 二倍役満, ...)
    pub tier: ScoreTier,             // 満貫, 跳満, ...
    pub points: Points,              // 支払い得点
}

impl WinContext {
    // 和了者の得点 (本場・供託を除く)
    pub fn total(&self) -> Point {
        match self.win_type {
            WinType::Ron => self.points.0,
            WinType::Tsumo => {
                if self.is_dealer {
                    self.points.1 * 3
                } else {
                    self.points.1 * 2 + self.points.2
                }
            }
        }
    }
}
