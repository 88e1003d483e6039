use super::*;
use crate::error::MahjongResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    pub use_red_fives: bool,      // 赤ドラ有り
    pub open_tanyao: bool,        // 喰いタン有り
    pub immediate_kan_dora: bool, // 明槓のドラを打牌前にめくる (暗槓は常に即めくり)
    pub double_yakuman: bool,     // 国士13面,四暗刻単騎,純正九蓮,大四喜をダブル役満とする
    pub riichi_min_points: Point, // リーチに必要な持ち点
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            use_red_fives: true,
            open_tanyao: true,
            immediate_kan_dora: false,
            double_yakuman: true,
            riichi_min_points: 1000,
        }
    }
}

impl Rule {
    pub fn from_json(s: &str) -> MahjongResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    // 赤無し・喰いタン無し・ダブル役満無し
    pub fn strict() -> Self {
        Self {
            use_red_fives: false,
            open_tanyao: false,
            immediate_kan_dora: false,
            double_yakuman: false,
            riichi_min_points: 1000,
        }
    }

    // 槓の種類に対してドラ表示牌を即座にめくるかどうか
    pub fn reveals_kan_dora_immediately(&self, tp: MeldType) -> bool {
        match tp {
            MeldType::Ankan => true,
            MeldType::Minkan | MeldType::Kakan => self.immediate_kan_dora,
            _ => false,
        }
    }
}
