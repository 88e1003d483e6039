use super::*;
use crate::error::{MahjongError, MahjongResult};

// 手牌の評価に必要な卓の状態
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableContext {
    pub prevalent_wind: Tnum,                // 場風 (東: 1, 南: 2, 西: 3, 北: 4)
    pub dora_indicators: Vec<Tile>,          // ドラ表示牌 (注:ドラそのものではない)
    pub ura_dora_indicators: Vec<Tile>,      // 裏ドラ表示牌 リーチ者の和了時のみ参照
    pub rule: Rule,                          // ルール
    pub honba: usize,                        // 本場
    pub riichi_sticks: usize,                // 供託リーチ棒の数
    pub wall_remaining: usize,               // 山の残り枚数
    pub any_calls: bool,                     // この局で鳴きが発生しているか
    pub last_discard: Option<(Seat, Tile)>, // 直前の打牌 (打牌者の相対位置, 牌)
    pub is_chankan: bool,                    // last_discardが加槓の牌
}

impl Default for TableContext {
    fn default() -> Self {
        Self {
            prevalent_wind: WE,
            dora_indicators: vec![],
            ura_dora_indicators: vec![],
            rule: Rule::default(),
            honba: 0,
            riichi_sticks: 0,
            wall_remaining: 70,
            any_calls: false,
            last_discard: None,
            is_chankan: false,
        }
    }
}

impl TableContext {
    // 場風と表示牌の範囲チェック (JSONから読み込んだ場合など)
    pub fn validate(&self) -> MahjongResult<()> {
        if !is_wind_number(self.prevalent_wind) {
            return Err(MahjongError::InvalidWind {
                wind: self.prevalent_wind,
            });
        }
        let discard = self.last_discard.map(|(_, t)| t);
        for t in self.dora_indicators.iter().chain(&self.ura_dora_indicators).chain(&discard) {
            if !t.is_valid() {
                return Err(MahjongError::parse(&format!("{:?}", t), "invalid tile"));
            }
        }
        Ok(())
    }

    pub fn dora_tiles(&self) -> Vec<Tile> {
        self.dora_indicators.iter().map(|t| t.next()).collect()
    }

    pub fn ura_dora_tiles(&self) -> Vec<Tile> {
        self.ura_dora_indicators.iter().map(|t| t.next()).collect()
    }

    // 槓ドラ表示牌の追加
    pub fn reveal_kan_dora(&mut self, indicator: Tile) {
        self.dora_indicators.push(indicator);
    }

    #[inline]
    pub fn is_last_tile(&self) -> bool {
        self.wall_remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_context() {
        let mut ctx = TableContext::default();
        assert_eq!(ctx.prevalent_wind, WE);
        assert!(ctx.dora_tiles().is_empty());
        ctx.reveal_kan_dora(Tile(TZ, WN));
        ctx.reveal_kan_dora(Tile(TM, 9));
        assert_eq!(ctx.dora_tiles(), vec![Tile(TZ, WE), Tile(TM, 1)]);

        let ctx: TableContext = serde_json::from_str(r#"{"prevalent_wind": 2, "honba": 1}"#).unwrap();
        assert_eq!(ctx.prevalent_wind, WS);
        assert_eq!(ctx.honba, 1);
        assert_eq!(ctx.wall_remaining, 70);
        assert!(ctx.validate().is_ok());

        let ctx: TableContext = serde_json::from_str(r#"{"prevalent_wind": 12}"#).unwrap();
        assert_eq!(ctx.validate(), Err(MahjongError::InvalidWind { wind: 12 }));
        let ctx = TableContext {
            dora_indicators: vec![Tile(TZ, 8)],
            ..TableContext::default()
        };
        assert!(ctx.validate().is_err());
    }
}
