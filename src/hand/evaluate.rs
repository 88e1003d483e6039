use log::debug;

use super::point::*;
use super::shape::*;
use super::yaku::*;
use crate::error::{MahjongError, MahjongResult};
use crate::model::*;
use crate::util::common::count_tile;

// ドラの枚数 (手牌 + 鳴き)
pub fn count_dora(hand: &TileTable, melds: &[Meld], doras: &[Tile]) -> usize {
    let mut n = 0;
    for &d in doras {
        n += count_tile(hand, d);
        for m in melds {
            n += m.tiles.iter().filter(|&&t| t == d).count();
        }
    }
    n
}

// 赤5の枚数 (手牌 + 鳴き)
pub fn count_red_five(hand: &TileTable, melds: &[Meld]) -> usize {
    let mut n = hand[TM][0] + hand[TS][0] + hand[TP][0];
    for m in melds {
        n += m.tiles.iter().filter(|t| t.is_red_five()).count();
    }
    n
}

// 和了形である場合,最も高得点となる解釈のWinContextを返却
// 和了形でない場合はNotWinningShape, すべての解釈が無役の場合はNoYaku
// 本場・供託は含まない (calc_payoutで加算)
pub fn evaluate_hand(
    hand: &TileTable,       // 手牌(鳴き以外, ロンの場合でも和了牌を含む)
    melds: &[Meld],         // 鳴き
    winning_tile: Tile,     // 和了牌
    win_type: WinType,      // ツモ or ロン
    is_dealer: bool,        // 親番
    seat_wind: Tnum,        // 自風 (東: 1, 南: 2, 西: 3, 北: 4)
    yaku_flags: &YakuFlags, // 和了形だった場合に自動的に付与される役(特殊条件役)のフラグ
    ctx: &TableContext,     // 場風, ドラ, ルール
) -> MahjongResult<WinContext> {
    ctx.validate()?;
    if !is_wind_number(seat_wind) {
        return Err(MahjongError::InvalidWind { wind: seat_wind });
    }

    let shapes = calc_hand_shapes(hand, melds, winning_tile, win_type);
    if shapes.is_empty() {
        return Err(MahjongError::NotWinningShape);
    }

    let n_dora = count_dora(hand, melds, &ctx.dora_tiles());
    let n_red = if ctx.rule.use_red_fives {
        count_red_five(hand, melds)
    } else {
        0
    };
    let n_ura_dora = if yaku_flags.riichi || yaku_flags.dabururiichi {
        count_dora(hand, melds, &ctx.ura_dora_tiles())
    } else {
        0
    };

    let mut best: Option<WinContext> = None;
    for shape in &shapes {
        let yctx = YakuContext::new(shape, ctx.prevalent_wind, seat_wind, *yaku_flags, ctx.rule);
        let (yakus, yakuman_times, mut fan) = yctx.calc_yaku();
        if yakus.is_empty() {
            continue; // 無役
        }

        let fu = yctx.calc_fu();
        let is_open = shape.is_open;
        let yakus: Vec<(String, usize)> = yakus
            .iter()
            .map(|y| {
                let f = if y.is_yakuman() {
                    if ctx.rule.double_yakuman {
                        y.fan_close - 12
                    } else {
                        1
                    }
                } else {
                    y.fan(is_open)
                };
                (y.name.to_string(), f)
            })
            .collect();

        if yakuman_times == 0 {
            fan += n_dora + n_red + n_ura_dora;
        } else {
            fan = yakuman_fan(yakuman_times);
        }

        let (points, tier) = calc_points(is_dealer, fu, fan, yakuman_times);
        let wc = WinContext {
            yakus,
            win_type,
            is_dealer,
            winning_tile,
            wait: if shape.is_thirteen_orphans() {
                None
            } else {
                Some(shape.wait())
            },
            n_dora: if yakuman_times == 0 { n_dora + n_red } else { 0 },
            n_red: if yakuman_times == 0 { n_red } else { 0 },
            n_ura_dora: if yakuman_times == 0 { n_ura_dora } else { 0 },
            fu,
            fan,
            yakuman_times,
            tier,
            points,
        };

        // 和了形に複数の解釈が可能な場合,最も得点の高いものを採用
        let better = match &best {
            None => true,
            Some(b) => (wc.total(), wc.fan, wc.fu) > (b.total(), b.fan, b.fu),
        };
        if better {
            best = Some(wc);
        }
    }

    match best {
        Some(wc) => {
            debug!(
                "evaluate: {} interpretation(s), fu={} fan={} yakuman={} wait={:?} total={}",
                shapes.len(),
                wc.fu,
                wc.fan,
                wc.yakuman_times,
                wc.wait,
                wc.total()
            );
            Ok(wc)
        }
        None => {
            debug!("evaluate: {} interpretation(s), no yaku", shapes.len());
            Err(MahjongError::NoYaku)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::common::tiles_to_tile_table;
    use crate::util::string::{meld_from_string, tiles_from_string};

    fn eval(
        s: &str,
        melds: &[&str],
        wt: &str,
        win_type: WinType,
        flags: YakuFlags,
        ctx: &TableContext,
    ) -> MahjongResult<WinContext> {
        let h = tiles_to_tile_table(&tiles_from_string(s).unwrap());
        let melds: Vec<Meld> = melds.iter().map(|m| meld_from_string(m).unwrap()).collect();
        let wt = Tile::from_symbol(wt).unwrap();
        evaluate_hand(&h, &melds, wt, win_type, false, WS, &flags, ctx)
    }

    fn names(wc: &WinContext) -> Vec<&str> {
        wc.yakus.iter().map(|(n, _)| n.as_str()).collect()
    }

    #[test]
    fn test_pinfu_iipeikou() {
        // m12233 + m1 (両面)
        let ctx = TableContext::default();
        let wc = eval("m112233p456s78955", &[], "m1", WinType::Ron, YakuFlags::default(), &ctx).unwrap();
        let n = names(&wc);
        assert!(n.contains(&"Pinfu"));
        assert!(n.contains(&"Iipeikou"));
        assert_eq!(wc.fu, 30);
        assert_eq!(wc.wait, Some(Wait::Ryanmen));
    }

    #[test]
    fn test_no_yaku() {
        let ctx = TableContext::default();
        let res = eval("m123p456z444s55", &["s7+89"], "s5", WinType::Ron, YakuFlags::default(), &ctx);
        assert_eq!(res, Err(MahjongError::NoYaku));
        let res = eval("m123p456s789z22234", &[], "z3", WinType::Ron, YakuFlags::default(), &ctx);
        assert_eq!(res, Err(MahjongError::NotWinningShape));
    }

    #[test]
    fn test_dora() {
        let ctx = TableContext {
            dora_indicators: vec![Tile(TM, 4)],
            ura_dora_indicators: vec![Tile(TZ, WE)],
            ..TableContext::default()
        };
        let flags = YakuFlags {
            riichi: true,
            ..YakuFlags::default()
        };
        // ドラ(m5) 2枚(赤5含む), 裏ドラ(z2) 2枚
        let wc = eval("m340567p456s789z22", &[], "z2", WinType::Ron, flags, &ctx).unwrap();
        assert_eq!(wc.n_red, 1);
        assert_eq!(wc.n_dora, 3);
        assert_eq!(wc.n_ura_dora, 2);
        assert_eq!(wc.fan, 1 + 3 + 2);

        let ctx = TableContext {
            rule: Rule::strict(),
            ..ctx
        };
        let wc = eval("m340567p456s789z22", &[], "z2", WinType::Ron, flags, &ctx).unwrap();
        assert_eq!(wc.n_red, 0);
        assert_eq!(wc.n_dora, 2);
    }

    #[test]
    fn test_yakuman_ignores_dora() {
        let ctx = TableContext {
            dora_indicators: vec![Tile(TM, 9)],
            ..TableContext::default()
        };
        let wc = eval("m19s19p19z12345677", &[], "m1", WinType::Ron, YakuFlags::default(), &ctx).unwrap();
        assert_eq!(names(&wc), vec!["Kokushi Musou"]);
        assert_eq!(wc.fan, 13);
        assert_eq!(wc.n_dora, 0);
        assert_eq!(wc.tier, ScoreTier::Yakuman(1));
        assert_eq!(wc.points.0, 32000);
        assert_eq!(wc.wait, None);

        // 13面待ち
        let wc = eval("m19s19p19z12345677", &[], "z7", WinType::Ron, YakuFlags::default(), &ctx).unwrap();
        assert_eq!(names(&wc), vec!["Kokushi Musou 13-sided"]);
        assert_eq!(wc.fan, 23);
        assert_eq!(wc.points.0, 64000);
    }

    #[test]
    fn test_open_hand_fan() {
        // 混一色(鳴き2翻) + 發
        let ctx = TableContext::default();
        let wc = eval("m123456m99z666", &["m7+77"], "m9", WinType::Ron, YakuFlags::default(), &ctx).unwrap();
        let n = names(&wc);
        assert!(n.contains(&"Honitsu"));
        assert!(n.contains(&"Hatsu"));
        assert_eq!(wc.fan, 3);
    }

    #[test]
    fn test_invalid_winds() {
        let h = tiles_to_tile_table(&tiles_from_string("m123p456s789z11122").unwrap());
        let flags = YakuFlags::default();
        let ctx: TableContext = serde_json::from_str(r#"{"prevalent_wind": 12}"#).unwrap();
        let res = evaluate_hand(&h, &[], Tile(TZ, WS), WinType::Ron, false, WS, &flags, &ctx);
        assert_eq!(res, Err(MahjongError::InvalidWind { wind: 12 }));

        let ctx = TableContext::default();
        let res = evaluate_hand(&h, &[], Tile(TZ, WS), WinType::Ron, false, 0, &flags, &ctx);
        assert_eq!(res, Err(MahjongError::InvalidWind { wind: 0 }));
        let res = evaluate_hand(&h, &[], Tile(TZ, WS), WinType::Ron, false, DW, &flags, &ctx);
        assert_eq!(res, Err(MahjongError::InvalidWind { wind: DW }));
    }
}
