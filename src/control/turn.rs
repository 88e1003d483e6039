use log::warn;

use crate::error::{MahjongError, MahjongResult};
use crate::hand::{calc_tiles_to_win, evaluate_hand};
use crate::model::*;
use crate::util::common::*;

// [Turn Operation]
// ツモ番のプレイヤーの操作 (ツモ, 打牌, リーチ, 和了)
// 失敗した場合は手牌を変更せずにIllegalOperationを返却

fn reject<T>(hand: &Hand, op: &str, message: &str) -> MahjongResult<T> {
    warn!("{} rejected: {} (hand: {})", op, message, hand);
    Err(MahjongError::illegal(format!("{}: {}", op, message)))
}

impl Hand {
    // 牌山または嶺上牌からのツモ
    pub fn draw(&mut self, tile: Tile) -> MahjongResult<()> {
        if !tile.is_valid() {
            return reject(self, "draw", "invalid tile");
        }
        if self.is_full() {
            return reject(self, "draw", "hand already has 14 tiles");
        }
        if count_tile(&self.hand, tile) >= TILE {
            return reject(self, "draw", "more than 4 copies");
        }

        inc_tile(&mut self.hand, tile);
        self.drawn = Some(tile);
        self.win_type = WinType::Tsumo;
        Ok(())
    }

    // 打牌 リーチ中はツモ切りのみ
    pub fn discard(&mut self, tile: Tile) -> MahjongResult<()> {
        if self.is_riichi() && !is_same_tile(self.drawn, tile) {
            return reject(self, "discard", "only the drawn tile can be discarded after riichi");
        }
        self.discard_tile(tile, "discard")?;
        self.is_ippatsu = false;
        Ok(())
    }

    fn discard_tile(&mut self, tile: Tile, op: &str) -> MahjongResult<()> {
        if !self.is_full() {
            return reject(self, op, "no tile to discard");
        }
        let mut h = self.hand;
        if !dec_tile(&mut h, tile) {
            return reject(self, op, "tile not in hand");
        }

        self.hand = h;
        self.discards.push(tile);
        self.drawn = None;
        self.turn += 1;
        self.is_rinshan = false;
        Ok(())
    }

    // リーチ宣言 + 宣言牌の打牌
    // 門前, 聴牌, 持ち点(rule.riichi_min_points以上), 牌山4枚以上が条件
    // 供託に1000点を加算する
    pub fn declare_riichi(&mut self, tile: Tile, ctx: &mut TableContext) -> MahjongResult<()> {
        if self.is_riichi() {
            return reject(self, "riichi", "already declared");
        }
        if !self.is_concealed() {
            return reject(self, "riichi", "hand is open");
        }
        if self.points < ctx.rule.riichi_min_points {
            return reject(self, "riichi", "not enough points");
        }
        if ctx.wall_remaining < 4 {
            return reject(self, "riichi", "not enough tiles in the wall");
        }
        let mut h = self.hand;
        if !self.is_full() || !dec_tile(&mut h, tile) {
            return reject(self, "riichi", "tile not in hand");
        }
        if calc_tiles_to_win(&h).is_empty() {
            return reject(self, "riichi", "not tenpai after the discard");
        }

        let turn = self.turn;
        self.discard_tile(tile, "riichi")?;
        self.riichi = Some(turn);
        self.is_double_riichi = turn == 0 && !ctx.any_calls;
        self.is_ippatsu = true;
        self.points -= 1000;
        ctx.riichi_sticks += 1;
        Ok(())
    }

    // 他家の鳴きによる一発の消滅
    pub fn break_ippatsu(&mut self) {
        self.is_ippatsu = false;
    }

    // ツモ和了 drawnを和了牌とする
    pub fn declare_tsumo(&self, ctx: &TableContext) -> MahjongResult<WinContext> {
        if self.win_type != WinType::Tsumo || self.drawn.is_none() {
            return reject(self, "tsumo", "no drawn tile");
        }
        self.score(ctx).map_err(|e| {
            warn!("tsumo rejected: {} (hand: {})", e, self);
            e
        })
    }

    // ロン和了 ctx.last_discardを和了牌とする
    // フリテンはここでは判定しない (is_furitenを参照すること)
    pub fn declare_ron(&mut self, ctx: &TableContext) -> MahjongResult<WinContext> {
        let (seat, tile) = match ctx.last_discard {
            Some((s, t)) if s != 0 && s < SEAT => (s, t),
            _ => return reject(self, "ron", "no discard from another seat"),
        };
        if self.is_full() {
            return reject(self, "ron", "hand already has 14 tiles");
        }

        let mut h = self.hand;
        inc_tile(&mut h, tile);
        let res = evaluate_hand(
            &h,
            &self.melds,
            tile,
            WinType::Ron,
            self.is_dealer(),
            self.seat_wind,
            &self.yaku_flags_for(ctx, WinType::Ron),
            ctx,
        );
        match res {
            Ok(wc) => {
                self.hand = h;
                self.drawn = Some(tile);
                self.win_type = WinType::Ron;
                Ok(wc)
            }
            Err(e) => {
                warn!("ron on {} from {} rejected: {} (hand: {})", tile, seat, e, self);
                Err(e)
            }
        }
    }
}

// 赤5を区別して比較
fn is_same_tile(a: Option<Tile>, b: Tile) -> bool {
    match a {
        Some(a) => a == b && a.is_red_five() == b.is_red_five(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(s: &str) -> Hand {
        Hand::from_string(s, &[]).unwrap()
    }

    #[test]
    fn test_draw_discard() {
        let mut h = hand("m123p456s789z1122");
        assert!(h.discard(Tile(TM, 1)).is_err());
        h.draw(Tile(TZ, WW)).unwrap();
        assert!(h.draw(Tile(TZ, WW)).is_err());
        assert_eq!(h.drawn, Some(Tile(TZ, WW)));
        assert!(h.discard(Tile(TS, 1)).is_err());

        h.discard(Tile(TZ, WW)).unwrap();
        assert_eq!(h.turn, 1);
        assert_eq!(h.discards, vec![Tile(TZ, WW)]);
        assert_eq!(h.drawn, None);
        assert_eq!(h.tile_count(), 13);
    }

    #[test]
    fn test_discard_red_five() {
        let mut h = hand("m123p456s789z112m5");
        h.draw(Tile(TZ, WW)).unwrap();
        assert!(h.discard(Tile(TM, 0)).is_err());
        h.discard(Tile(TM, 5)).unwrap();
    }

    #[test]
    fn test_riichi() {
        let mut ctx = TableContext::default();
        let mut h = hand("m123p456s789z1122z3");
        h.turn = 3;

        // 聴牌にならない打牌
        assert!(h.declare_riichi(Tile(TZ, WE), &mut ctx).is_err());
        assert!(h.riichi.is_none());

        h.declare_riichi(Tile(TZ, WW), &mut ctx).unwrap();
        assert_eq!(h.riichi, Some(3));
        assert!(!h.is_double_riichi);
        assert!(h.is_ippatsu);
        assert_eq!(h.points, 24000);
        assert_eq!(ctx.riichi_sticks, 1);

        // リーチ後はツモ切りのみ
        h.draw(Tile(TM, 9)).unwrap();
        assert!(h.discard(Tile(TM, 1)).is_err());
        h.discard(Tile(TM, 9)).unwrap();
        assert!(!h.is_ippatsu);
        assert!(h.declare_riichi(Tile(TM, 9), &mut ctx).is_err());
    }

    #[test]
    fn test_riichi_preconditions() {
        let mut ctx = TableContext::default();
        let mut h = hand("m123p456s789z1122z3");
        h.points = 900;
        assert!(h.declare_riichi(Tile(TZ, WW), &mut ctx).is_err());

        let mut h = hand("m123p456s789z1122z3");
        let mut short = TableContext {
            wall_remaining: 3,
            ..TableContext::default()
        };
        assert!(h.declare_riichi(Tile(TZ, WW), &mut short).is_err());

        let mut h = Hand::from_string("p456s789z1122z3", &["m1+23"]).unwrap();
        assert!(h.declare_riichi(Tile(TZ, WW), &mut ctx).is_err());
        assert_eq!(ctx.riichi_sticks, 0);

        // 第一打牌
        let mut h = hand("m123p456s789z1122z3");
        h.declare_riichi(Tile(TZ, WW), &mut ctx).unwrap();
        assert!(h.is_double_riichi);
    }

    #[test]
    fn test_tsumo_and_ron() {
        let ctx = TableContext::default();
        let mut h = hand("m234p456s789z1122");
        h.turn = 2;
        // 門前ツモ
        h.draw(Tile(TZ, WE)).unwrap();
        let wc = h.declare_tsumo(&ctx).unwrap();
        assert_eq!(wc.win_type, WinType::Tsumo);

        // 役なしのロンは手牌を変更しない
        let mut h = hand("m234p456s789z3322");
        h.turn = 2;
        let ctx = TableContext {
            last_discard: Some((2, Tile(TZ, 3))),
            ..TableContext::default()
        };
        assert_eq!(h.declare_ron(&ctx), Err(MahjongError::NoYaku));
        assert_eq!(h.tile_count(), 13);
        assert_eq!(h.drawn, None);

        // 自分の打牌ではロンできない
        let own = TableContext {
            last_discard: Some((0, Tile(TZ, 3))),
            ..TableContext::default()
        };
        assert!(h.declare_ron(&own).is_err());
    }

    #[test]
    fn test_ron_with_riichi() {
        let mut ctx = TableContext::default();
        let mut h = hand("m234p456s789z1122z3");
        h.turn = 2;
        h.declare_riichi(Tile(TZ, WW), &mut ctx).unwrap();

        ctx.last_discard = Some((1, Tile(TZ, WS)));
        let wc = h.declare_ron(&ctx).unwrap();
        assert_eq!(h.win_type, WinType::Ron);
        assert_eq!(h.drawn, Some(Tile(TZ, WS)));
        let names: Vec<&str> = wc.yakus.iter().map(|(n, _)| n.as_str()).collect();
        assert!(names.contains(&"Riichi"));
        assert!(names.contains(&"Ippatsu"));

        let payout = h.payout(&ctx).unwrap();
        assert_eq!(payout[1], -payout[0] + 1000);
        assert_eq!(payout[2], 0);
    }
}
