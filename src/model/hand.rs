use super::*;
use crate::error::{MahjongError, MahjongResult};
use crate::hand::*;
use crate::util::common::*;
use crate::util::string::{meld_from_string, tiles_from_string, tiles_to_string};

// プレイヤーの手牌の状態 (ある時点のスナップショット)
// 面子分解や役の判定結果はキャッシュせず,クエリごとに再計算する
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hand {
    pub(crate) hand: TileTable,   // 手牌(4x10の配列) 鳴きは含まない
    pub(crate) melds: Vec<Meld>,  // 鳴き一覧
    pub drawn: Option<Tile>,      // 最後に加えた牌 (ツモ牌またはロン牌)
    pub discards: Vec<Tile>,      // 捨て牌一覧
    pub seat_wind: Tnum,          // 自風 (東: 1, 南: 2, 西: 3, 北: 4) 東家が親
    pub points: Point,            // 持ち点
    pub turn: usize,              // 自分の打牌の回数
    pub riichi: Option<usize>,    // リーチを宣言した打牌のturn
    pub is_double_riichi: bool,   // ダブルリーチ
    pub is_ippatsu: bool,         // 一発 リーチ後にセットして次の打牌または鳴きでfalseをセット
    pub is_rinshan: bool,         // 槓の直後(嶺上牌のツモ)にtrueをセット 打牌でfalseをセット
    pub win_type: WinType,        // drawnがツモ牌かロン牌か
}

impl Hand {
    // tilesは鳴きを含まない手牌, 14枚形の場合は最後の牌をツモ牌とする
    // turnは0(第一ツモ)で初期化される 途中局面の手牌は呼び出し側でturnを設定すること
    // (turn == 0のツモ和了は天和・地和の判定対象)
    pub fn new(tiles: &[Tile], melds: Vec<Meld>) -> MahjongResult<Self> {
        for &t in tiles {
            if !t.is_valid() {
                return Err(MahjongError::parse(&format!("{:?}", t), "invalid tile"));
            }
        }
        for m in &melds {
            m.validate()?;
        }

        let count = tiles.len() + 3 * melds.len();
        if count != 13 && count != 14 {
            return Err(MahjongError::InvalidTileCount { count });
        }

        // 鳴きを含めて同じ牌は4枚まで
        let mut all = tiles_to_tile_table(tiles);
        for m in &melds {
            for &t in &m.tiles {
                inc_tile(&mut all, t);
            }
        }
        for ti in 0..TYPE {
            for ni in 1..TNUM {
                if all[ti][ni] > TILE {
                    return Err(MahjongError::TooManyTiles { tile: Tile(ti, ni) });
                }
            }
            // 赤5は各色1枚
            if count_red(&all, ti) > 1 {
                return Err(MahjongError::TooManyTiles { tile: Tile(ti, 0) });
            }
        }

        let drawn = if count == 14 { tiles.last().copied() } else { None };
        Ok(Self {
            hand: tiles_to_tile_table(tiles),
            melds,
            drawn,
            discards: vec![],
            seat_wind: WS,
            points: 25000,
            turn: 0,
            riichi: None,
            is_double_riichi: false,
            is_ippatsu: false,
            is_rinshan: false,
            win_type: WinType::Tsumo,
        })
    }

    // 例: Hand::from_string("m123p456s789z1122", &["z333+"])
    pub fn from_string(tiles: &str, melds: &[&str]) -> MahjongResult<Self> {
        let tiles = tiles_from_string(tiles)?;
        let melds = melds
            .iter()
            .map(|m| meld_from_string(m))
            .collect::<MahjongResult<Vec<Meld>>>()?;
        Self::new(&tiles, melds)
    }

    pub fn with_seat_wind(mut self, seat_wind: Tnum) -> Self {
        self.seat_wind = seat_wind;
        self
    }

    // [状態]

    #[inline]
    pub fn tile_table(&self) -> &TileTable {
        &self.hand
    }

    #[inline]
    pub fn melds(&self) -> &[Meld] {
        &self.melds
    }

    // 手牌(鳴きを含まない) ソート済み
    pub fn concealed_tiles(&self) -> Vec<Tile> {
        tiles_from_tile_table(&self.hand)
    }

    // 槓子を3枚として数えた枚数 (13 または 14)
    pub fn tile_count(&self) -> usize {
        count_tiles(&self.hand) + 3 * self.melds.len()
    }

    // ツモ番の手牌(打牌前)かどうか
    #[inline]
    pub fn is_full(&self) -> bool {
        self.tile_count() == 14
    }

    #[inline]
    pub fn is_dealer(&self) -> bool {
        self.seat_wind == WE
    }

    // 門前 (暗槓のみは門前)
    pub fn is_concealed(&self) -> bool {
        self.melds.iter().all(|m| !m.is_open())
    }

    #[inline]
    pub fn is_riichi(&self) -> bool {
        self.riichi.is_some()
    }

    pub fn concealed_quads(&self) -> Vec<Tile> {
        self.filter_melds(|m| m.type_ == MeldType::Ankan)
    }

    pub fn open_quads(&self) -> Vec<Tile> {
        self.filter_melds(|m| matches!(m.type_, MeldType::Minkan | MeldType::Kakan))
    }

    pub fn open_triplets(&self) -> Vec<Tile> {
        self.filter_melds(|m| m.type_ == MeldType::Pon)
    }

    fn filter_melds(&self, f: impl Fn(&Meld) -> bool) -> Vec<Tile> {
        self.melds.iter().filter(|m| f(m)).map(|m| m.base_tile()).collect()
    }

    // [向聴数・和了形]

    // 向聴数 (聴牌: 0, 和了形: -1)
    pub fn shanten(&self) -> i32 {
        calc_shanten(&self.hand, self.melds.len())
    }

    #[inline]
    pub fn is_tenpai(&self) -> bool {
        self.shanten() == 0
    }

    pub fn is_winning_shape(&self) -> bool {
        self.is_full() && is_win(&self.hand)
    }

    // 13枚形の手牌の和了牌 14枚形の場合はdrawnを除いた手牌で判定
    pub fn winning_tiles(&self) -> Vec<Tile> {
        if self.is_full() {
            let mut h = self.hand;
            match self.drawn {
                Some(d) if dec_tile(&mut h, d) => calc_tiles_to_win(&h),
                _ => vec![],
            }
        } else {
            calc_tiles_to_win(&self.hand)
        }
    }

    // 14枚形の手牌で聴牌となる打牌とその待ち
    pub fn tenpai_discards(&self) -> Vec<(Tile, Vec<Tile>)> {
        if self.is_full() {
            calc_discards_to_tenpai_all(&self.hand)
        } else {
            vec![]
        }
    }

    // 自分の捨て牌に和了牌が含まれている
    pub fn is_furiten(&self) -> bool {
        let wts = self.winning_tiles();
        self.discards.iter().any(|d| wts.contains(d))
    }

    // 九種九牌 (第一ツモで么九牌が9種類以上)
    pub fn is_kyuushu_kyuuhai(&self, ctx: &TableContext) -> bool {
        if self.turn != 0 || ctx.any_calls || !self.melds.is_empty() || !self.is_full() {
            return false;
        }
        let kinds = end_tiles()
            .into_iter()
            .filter(|&t| count_tile(&self.hand, t) > 0)
            .count();
        kinds >= 9
    }

    // [役・点数]

    // 和了形のすべての解釈
    pub fn shapes(&self) -> Vec<HandShape> {
        match self.drawn {
            Some(wt) if self.is_full() => {
                calc_hand_shapes(&self.hand, &self.melds, wt, self.win_type)
            }
            _ => vec![],
        }
    }

    // 和了のタイミングによって成立する役のフラグ
    pub fn yaku_flags(&self, ctx: &TableContext) -> YakuFlags {
        self.yaku_flags_for(ctx, self.win_type)
    }

    pub(crate) fn yaku_flags_for(&self, ctx: &TableContext, win_type: WinType) -> YakuFlags {
        let is_tsumo = win_type == WinType::Tsumo;
        // 自分の暗槓も第一ツモを中断する
        let is_first = self.turn == 0 && self.melds.is_empty() && !ctx.any_calls && is_tsumo;
        YakuFlags {
            menzentsumo: self.is_concealed() && is_tsumo,
            riichi: self.is_riichi() && !self.is_double_riichi,
            dabururiichi: self.is_double_riichi,
            ippatsu: self.is_riichi() && self.is_ippatsu,
            haiteiraoyue: is_tsumo && ctx.is_last_tile() && !self.is_rinshan,
            houteiraoyui: !is_tsumo && ctx.is_last_tile(),
            rinshankaihou: is_tsumo && self.is_rinshan,
            chankan: !is_tsumo && ctx.is_chankan,
            tenhou: is_first && self.is_dealer(),
            tiihou: is_first && !self.is_dealer(),
        }
    }

    // 最も高得点となる解釈の評価結果
    pub fn score(&self, ctx: &TableContext) -> MahjongResult<WinContext> {
        let wt = match self.drawn {
            Some(wt) if self.is_full() => wt,
            _ => return Err(MahjongError::NotWinningShape),
        };
        evaluate_hand(
            &self.hand,
            &self.melds,
            wt,
            self.win_type,
            self.is_dealer(),
            self.seat_wind,
            &self.yaku_flags(ctx),
            ctx,
        )
    }

    // 役の一覧 和了形だが無役の場合は空
    pub fn yaku(&self, ctx: &TableContext) -> MahjongResult<Vec<&'static Yaku>> {
        match self.score(ctx) {
            Ok(wc) => Ok(wc.yakus.iter().filter_map(|(name, _)| find_yaku(name)).collect()),
            Err(MahjongError::NoYaku) => Ok(vec![]),
            Err(e) => Err(e),
        }
    }

    pub fn fu(&self, ctx: &TableContext) -> MahjongResult<usize> {
        self.score(ctx).map(|wc| wc.fu)
    }

    // ドラを含む翻数 役満の場合は13, 23, 30...
    pub fn han(&self, ctx: &TableContext) -> MahjongResult<usize> {
        self.score(ctx).map(|wc| wc.fan)
    }

    pub fn tier(&self, ctx: &TableContext) -> MahjongResult<ScoreTier> {
        self.score(ctx).map(|wc| wc.tier)
    }

    // 和了者(自分)を0とする相対位置ごとの点数の増減 (本場・供託を含む)
    pub fn payout(&self, ctx: &TableContext) -> MahjongResult<[Point; SEAT]> {
        let wc = self.score(ctx)?;
        let discarder = match self.win_type {
            WinType::Tsumo => None,
            WinType::Ron => match ctx.last_discard {
                Some((s, _)) => Some(s),
                None => return Err(MahjongError::illegal("ron without discarder")),
            },
        };
        calc_payout(
            0,
            dealer_offset(self.seat_wind),
            discarder,
            &wc.points,
            ctx.honba,
            ctx.riichi_sticks,
        )
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", tiles_to_string(&self.concealed_tiles()))?;
        for m in &self.melds {
            write!(f, " {}", m)?;
        }
        Ok(())
    }
}
