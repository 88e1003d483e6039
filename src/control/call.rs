use log::{debug, warn};

use crate::error::{MahjongError, MahjongResult};
use crate::hand::calc_tiles_to_normal_win;
use crate::model::*;
use crate::util::common::*;

// [Call Operation]
// 他家の打牌に対する鳴き(チー,ポン,大明槓)と自分のツモ番の槓(暗槓,加槓)
// 鳴きの対象となる打牌はctx.last_discard (打牌者の相対位置, 牌)

// 槓は1局に4回まで (ドラ表示牌 最大5枚)
const MAX_DORA_INDICATORS: usize = 5;

fn reject<T>(hand: &Hand, op: &str, message: &str) -> MahjongResult<T> {
    warn!("{} rejected: {} (hand: {})", op, message, hand);
    Err(MahjongError::illegal(format!("{}: {}", op, message)))
}

impl Hand {
    // 他家の打牌 (鳴きが可能な状態でない場合はNone)
    fn claimable_discard(&self, ctx: &TableContext) -> Option<(Seat, Tile)> {
        if self.is_riichi() || self.is_full() || ctx.wall_remaining == 0 {
            return None;
        }
        match ctx.last_discard {
            Some((s, t)) if s != 0 && s < SEAT => Some((s, t)),
            _ => None,
        }
    }

    fn can_kan_more(ctx: &TableContext) -> bool {
        ctx.dora_indicators.len() < MAX_DORA_INDICATORS && ctx.wall_remaining != 0
    }

    pub fn can_pon(&self, ctx: &TableContext) -> bool {
        match self.claimable_discard(ctx) {
            Some((_, t)) => count_tile(&self.hand, t) >= 2,
            None => false,
        }
    }

    // チーに使用する手牌の組み合わせ (赤5を区別)
    // 上家(相対位置3)の打牌のみ
    pub fn chi_candidates(&self, ctx: &TableContext) -> Vec<(Tile, Tile)> {
        let d = match self.claimable_discard(ctx) {
            Some((3, d)) if d.is_suit() => d,
            _ => return vec![],
        };

        let Tile(ti, ni) = d.to_normal();
        let mut check: Vec<(Tnum, Tnum)> = vec![];
        if 3 <= ni {
            check.push((ni - 2, ni - 1)); // 右端をチー
        }
        if (2..=8).contains(&ni) {
            check.push((ni - 1, ni + 1)); // 嵌張をチー
        }
        if ni <= 7 {
            check.push((ni + 1, ni + 2)); // 左端をチー
        }

        let h = &self.hand;
        let mut res = vec![];
        for (ni0, ni1) in check {
            for t0 in tiles_with_red5(h, Tile(ti, ni0)) {
                for t1 in tiles_with_red5(h, Tile(ti, ni1)) {
                    res.push((t0, t1));
                }
            }
        }
        res
    }

    pub fn can_chi(&self, ctx: &TableContext) -> bool {
        !self.chi_candidates(ctx).is_empty()
    }

    pub fn can_minkan(&self, ctx: &TableContext) -> bool {
        if !Self::can_kan_more(ctx) {
            return false;
        }
        match self.claimable_discard(ctx) {
            Some((_, t)) => count_tile(&self.hand, t) == 3,
            None => false,
        }
    }

    // 暗槓が可能な牌
    // リーチ中はツモ牌のみ, かつ待ちが変わらない場合に限る
    pub fn ankan_candidates(&self, ctx: &TableContext) -> Vec<Tile> {
        if !self.is_full() || !Self::can_kan_more(ctx) {
            return vec![];
        }

        if self.is_riichi() {
            let t = match self.drawn {
                Some(t) => t.to_normal(),
                None => return vec![],
            };
            if count_tile(&self.hand, t) != 4 {
                return vec![];
            }
            let mut h = self.hand;
            dec_tile_any(&mut h, t);
            let v1 = calc_tiles_to_normal_win(&h);
            for _ in 0..3 {
                dec_tile_any(&mut h, t);
            }
            let v2 = calc_tiles_to_normal_win(&h);
            return if !v1.is_empty() && v1 == v2 { vec![t] } else { vec![] };
        }

        let mut res = vec![];
        for ti in 0..TYPE {
            for ni in 1..TNUM {
                if self.hand[ti][ni] == 4 {
                    res.push(Tile(ti, ni));
                }
            }
        }
        res
    }

    pub fn can_ankan(&self, ctx: &TableContext) -> bool {
        !self.ankan_candidates(ctx).is_empty()
    }

    // 加槓が可能な牌 (ポンした牌を手牌に持っている)
    pub fn kakan_candidates(&self, ctx: &TableContext) -> Vec<Tile> {
        if !self.is_full() || self.is_riichi() || !Self::can_kan_more(ctx) {
            return vec![];
        }
        self.melds
            .iter()
            .filter(|m| m.type_ == MeldType::Pon)
            .map(|m| m.base_tile())
            .filter(|&t| count_tile(&self.hand, t) > 0)
            .collect()
    }

    pub fn can_kakan(&self, ctx: &TableContext) -> bool {
        !self.kakan_candidates(ctx).is_empty()
    }

    // ポン 手牌の通常の5を優先して使用
    pub fn pon(&mut self, ctx: &mut TableContext) -> MahjongResult<()> {
        if !self.can_pon(ctx) {
            return reject(self, "pon", "no matching pair for the last discard");
        }
        let (s, t) = match ctx.last_discard {
            Some(ld) => ld,
            None => return reject(self, "pon", "no discard"),
        };

        let mut h = self.hand;
        let mut tiles = vec![t];
        for _ in 0..2 {
            match dec_tile_any(&mut h, t) {
                Some(x) => tiles.push(x),
                None => return reject(self, "pon", "tile not in hand"),
            }
        }
        self.push_meld(h, Meld::new(MeldType::Pon, tiles, Some(s)), ctx);
        Ok(())
    }

    // チー consumedはchi_candidatesのいずれか
    pub fn chi(&mut self, ctx: &mut TableContext, consumed: (Tile, Tile)) -> MahjongResult<()> {
        let is_candidate = self
            .chi_candidates(ctx)
            .iter()
            .any(|&(a, b)| same_tile(a, consumed.0) && same_tile(b, consumed.1));
        if !is_candidate {
            return reject(self, "chi", "invalid tiles for chi");
        }
        let (s, t) = match ctx.last_discard {
            Some(ld) => ld,
            None => return reject(self, "chi", "no discard"),
        };

        let mut h = self.hand;
        if !dec_tile(&mut h, consumed.0) || !dec_tile(&mut h, consumed.1) {
            return reject(self, "chi", "tile not in hand");
        }
        let tiles = vec![t, consumed.0, consumed.1];
        self.push_meld(h, Meld::new(MeldType::Chi, tiles, Some(s)), ctx);
        Ok(())
    }

    // 大明槓 このあと嶺上牌をdrawすること
    pub fn minkan(&mut self, ctx: &mut TableContext) -> MahjongResult<()> {
        if !self.can_minkan(ctx) {
            return reject(self, "minkan", "no matching triplet for the last discard");
        }
        let (s, t) = match ctx.last_discard {
            Some(ld) => ld,
            None => return reject(self, "minkan", "no discard"),
        };

        let mut h = self.hand;
        let mut tiles = vec![t];
        for _ in 0..3 {
            match dec_tile_any(&mut h, t) {
                Some(x) => tiles.push(x),
                None => return reject(self, "minkan", "tile not in hand"),
            }
        }
        self.push_meld(h, Meld::new(MeldType::Minkan, tiles, Some(s)), ctx);
        self.is_rinshan = true;
        Ok(())
    }

    // 暗槓 このあと嶺上牌をdrawすること
    pub fn ankan(&mut self, tile: Tile, ctx: &mut TableContext) -> MahjongResult<()> {
        let t = tile.to_normal();
        if !self.ankan_candidates(ctx).contains(&t) {
            return reject(self, "ankan", "no quad in hand");
        }

        let mut h = self.hand;
        let mut tiles = vec![];
        for _ in 0..4 {
            match dec_tile_any(&mut h, t) {
                Some(x) => tiles.push(x),
                None => return reject(self, "ankan", "tile not in hand"),
            }
        }
        self.push_meld(h, Meld::new(MeldType::Ankan, tiles, None), ctx);
        self.is_rinshan = true;
        Ok(())
    }

    // 加槓 このあと他家の槍槓がなければ嶺上牌をdrawすること
    pub fn kakan(&mut self, tile: Tile, ctx: &mut TableContext) -> MahjongResult<()> {
        let t = tile.to_normal();
        if !self.kakan_candidates(ctx).contains(&t) {
            return reject(self, "kakan", "no pon to upgrade");
        }

        let mut h = self.hand;
        let added = match dec_tile_any(&mut h, t) {
            Some(x) => x,
            None => return reject(self, "kakan", "tile not in hand"),
        };
        let idx = match self
            .melds
            .iter()
            .position(|m| m.type_ == MeldType::Pon && m.base_tile() == t)
        {
            Some(i) => i,
            None => return reject(self, "kakan", "no pon to upgrade"),
        };

        let from = self.melds[idx].from;
        let mut tiles = self.melds[idx].tiles.clone();
        tiles.push(added);
        self.melds[idx] = Meld::new(MeldType::Kakan, tiles, from);
        self.hand = h;
        self.drawn = None;
        self.is_rinshan = true;
        self.is_ippatsu = false;
        ctx.any_calls = true;
        debug!("kakan: {}", self);
        Ok(())
    }

    fn push_meld(&mut self, h: TileTable, meld: Meld, ctx: &mut TableContext) {
        debug!("{:?}: {}", meld.type_, meld);
        self.hand = h;
        self.melds.push(meld);
        self.drawn = None;
        self.is_ippatsu = false;
        ctx.any_calls = true;
        if self.melds.last().map_or(false, |m| m.is_open()) {
            ctx.last_discard = None;
        }
    }
}

// 赤5を区別して比較
fn same_tile(a: Tile, b: Tile) -> bool {
    a == b && a.is_red_five() == b.is_red_five()
}
