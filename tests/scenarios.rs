use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use mahjong_hand::hand::*;
use mahjong_hand::model::*;
use mahjong_hand::util::common::*;

fn hand(s: &str) -> Hand {
    let mut h = Hand::from_string(s, &[]).unwrap();
    h.turn = 5; // 天和・地和の対象外
    h
}

fn yaku_names(h: &Hand, ctx: &TableContext) -> Vec<&'static str> {
    h.yaku(ctx).unwrap().iter().map(|y| y.name).collect()
}

#[test]
fn test_pinfu_tsumo() {
    let ctx = TableContext::default();
    let h = hand("p234567567s34552");
    assert!(h.is_winning_shape());

    let names = yaku_names(&h, &ctx);
    assert!(names.contains(&"Pinfu"));
    assert!(names.contains(&"Menzen Tsumo"));
    assert!(names.contains(&"Tanyao"));
    assert!(names.contains(&"Iipeikou"));
    assert_eq!(h.fu(&ctx).unwrap(), 20);

    let wc = h.score(&ctx).unwrap();
    assert_eq!(wc.wait, Some(Wait::Ryanmen));
    assert_eq!(wc.fan, 4);
}

#[test]
fn test_chiitoitsu() {
    let ctx = TableContext::default();
    let h = hand("m1155s77p3399z117");
    assert_eq!(h.shanten(), 0);
    assert!(h.is_tenpai());
    assert_eq!(h.winning_tiles(), vec![Tile(TZ, DR)]);

    let mut h = h;
    let ron = TableContext {
        last_discard: Some((2, Tile(TZ, DR))),
        ..TableContext::default()
    };
    let wc = h.declare_ron(&ron).unwrap();
    assert_eq!(wc.fu, 25);
    assert_eq!(wc.fan, 2);
    assert_eq!(wc.wait, Some(Wait::Tanki));
    assert_eq!(wc.points.0, 1600);

    // 通常形の和了ではない
    assert!(!is_normal_win(h.tile_table()));
    assert!(is_chiitoitsu_win(h.tile_table()));
    assert_eq!(yaku_names(&h, &ctx), vec!["Chiitoitsu"]);
}

#[test]
fn test_kokushimusou() {
    let ctx = TableContext::default();
    let h = hand("m11p19s19z1234567m9");
    assert!(is_kokushimusou_win(h.tile_table()));
    assert!(!is_normal_win(h.tile_table()));
    assert!(parse_into_normal_win(h.tile_table()).is_empty());

    let wc = h.score(&ctx).unwrap();
    assert_eq!(wc.fan, 13);
    assert_eq!(wc.yakuman_times, 1);
    assert_eq!(wc.wait, None);
    assert_eq!(wc.tier, ScoreTier::Yakuman(1));
    assert_eq!(yaku_names(&h, &ctx), vec!["Kokushi Musou"]);
    assert_eq!(h.han(&ctx).unwrap(), 13);
}

#[test]
fn test_sanankou_tsumo() {
    let ctx = TableContext::default();
    let h = hand("m22288p444s66645s3");
    let names = yaku_names(&h, &ctx);
    assert!(names.contains(&"Sanankou"));
    assert!(names.contains(&"Menzen Tsumo"));
    assert!(names.contains(&"Tanyao"));
    // 20 + 2(ツモ) + 4 * 3(中張牌の暗刻) = 34 => 40
    assert_eq!(h.fu(&ctx).unwrap(), 40);
}

#[test]
fn test_tsumo_payment_rounding() {
    // 子 1翻30符 ツモ: 300/500 (合計1100)
    let ((ron, child, dealer), _) = calc_points(false, 30, 1, 0);
    assert_eq!((ron, child, dealer), (1000, 300, 500));
    // 親 1翻30符 ツモ: 500オール
    let ((ron, child, _), _) = calc_points(true, 30, 1, 0);
    assert_eq!((ron, child), (1500, 500));
    // 子 2翻30符 ツモ: 500/1000
    let ((_, child, dealer), _) = calc_points(false, 30, 2, 0);
    assert_eq!((child, dealer), (500, 1000));
}

#[test]
fn test_round_flow() {
    let mut ctx = TableContext {
        honba: 1,
        ..TableContext::default()
    };
    let mut h = Hand::from_string("m234p456s789z1122", &[]).unwrap();
    assert_eq!(h.tile_count(), 13);
    assert_eq!(h.shanten(), 0);

    h.draw(Tile(TM, 9)).unwrap();
    h.discard(Tile(TM, 9)).unwrap();
    assert_eq!(h.turn, 1);

    h.draw(Tile(TZ, WW)).unwrap();
    assert_eq!(h.tenpai_discards().len(), 1);
    h.declare_riichi(Tile(TZ, WW), &mut ctx).unwrap();
    assert_eq!(ctx.riichi_sticks, 1);
    assert_eq!(h.winning_tiles(), vec![Tile(TZ, WE), Tile(TZ, WS)]);
    assert!(!h.is_furiten());

    h.draw(Tile(TS, 1)).unwrap();
    h.discard(Tile(TS, 1)).unwrap();

    h.draw(Tile(TZ, WS)).unwrap();
    let wc = h.declare_tsumo(&ctx).unwrap();
    let names: Vec<&str> = wc.yakus.iter().map(|(n, _)| n.as_str()).collect();
    assert!(names.contains(&"Riichi"));
    assert!(names.contains(&"Menzen Tsumo"));
    assert!(names.contains(&"Jikaze"));
    assert!(!names.contains(&"Ippatsu"));
    assert_eq!(wc.fan, 3);
    assert_eq!(wc.fu, 40);
    assert_eq!(wc.points, (5200, 1300, 2600));

    // 南家(子)のツモ 親は相対位置3
    let payout = h.payout(&ctx).unwrap();
    assert_eq!(payout, [6500, -1400, -1400, -2700]);
    assert_eq!(payout.iter().sum::<Point>(), 1000);
}

#[test]
fn test_dealer_ron_payout() {
    let ctx = TableContext {
        honba: 2,
        last_discard: Some((2, Tile(TS, 6))),
        ..TableContext::default()
    };
    let mut h = Hand::from_string("m234567p23455s78", &[])
        .unwrap()
        .with_seat_wind(WE);
    h.turn = 4;
    assert!(h.is_dealer());
    let wc = h.declare_ron(&ctx).unwrap();
    assert!(wc.is_dealer);
    // 門前ロン 平和 断么九 30符2翻 親: 2900
    assert_eq!(wc.fu, 30);
    assert_eq!(wc.fan, 2);
    assert_eq!(wc.points.0, 2900);

    let payout = h.payout(&ctx).unwrap();
    assert_eq!(payout, [3500, 0, -3500, 0]);
}

#[test]
fn test_exhaustive_draw() {
    let tenpai = [
        Hand::from_string("m234p456s789z1122", &[]).unwrap().is_tenpai(),
        Hand::from_string("m234p456s789z1234", &[]).unwrap().is_tenpai(),
        Hand::from_string("m234p456s789z5566", &[]).unwrap().is_tenpai(),
        Hand::from_string("m1357p1357s1357z1", &[]).unwrap().is_tenpai(),
    ];
    assert_eq!(tenpai, [true, false, true, false]);
    assert_eq!(calc_draw_payments(&tenpai), [1500, -1500, 1500, -1500]);
}

fn random_hands(seed: u64, n_tiles: usize, count: usize) -> Vec<TileTable> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut wall = Tile::full_set(true);
    (0..count)
        .map(|_| {
            wall.shuffle(&mut rng);
            tiles_to_tile_table(&wall[..n_tiles])
        })
        .collect()
}

#[test]
fn test_shanten_properties_13() {
    for h in random_hands(1, 13, 500) {
        let sh = calc_shanten(&h, 0);
        assert!(sh >= 0);
        assert!(sh <= 6);
        assert_eq!(sh == 0, !calc_tiles_to_win(&h).is_empty());

        // 和了牌をツモると和了形
        for t in calc_tiles_to_win(&h) {
            let mut h2 = h;
            inc_tile(&mut h2, t);
            assert_eq!(calc_shanten(&h2, 0), -1);
        }
    }
}

#[test]
fn test_shanten_properties_14() {
    for h in random_hands(2, 14, 500) {
        let sh = calc_shanten(&h, 0);
        assert!(sh >= -1);
        assert_eq!(sh == -1, is_win(&h));
        if sh >= 1 {
            // どの牌を切っても聴牌にならない
            for t in tiles_from_tile_table(&h) {
                let mut h2 = h;
                dec_tile(&mut h2, t);
                assert!(calc_shanten(&h2, 0) >= 1);
            }
        }
    }
}

#[test]
fn test_shanten_one_exchange() {
    // 1枚交換した手牌同士の向聴数の差は1以下
    let mut rng = StdRng::seed_from_u64(3);
    let mut wall = Tile::full_set(true);
    for _ in 0..1000 {
        wall.shuffle(&mut rng);
        let h1 = tiles_to_tile_table(&wall[..13]);
        let mut tiles = wall[..13].to_vec();
        tiles[rng.gen_range(0..13)] = wall[13];
        let h2 = tiles_to_tile_table(&tiles);

        let (s1, s2) = (calc_shanten(&h1, 0), calc_shanten(&h2, 0));
        assert!((s1 - s2).abs() <= 1, "{:?} => {}, {:?} => {}", wall[..13].to_vec(), s1, tiles, s2);
    }
}

#[test]
fn test_shanten_of_shaped_hands() {
    // 和了形から1枚抜くと聴牌
    let h = hand("p234567567s34552");
    let mut tt = *h.tile_table();
    assert_eq!(calc_shanten(&tt, 0), -1);
    dec_tile(&mut tt, Tile(TS, 2));
    assert_eq!(calc_shanten(&tt, 0), 0);
    // 聴牌から有効牌でない牌に交換すると1向聴
    dec_tile(&mut tt, Tile(TS, 3));
    inc_tile(&mut tt, Tile(TZ, DW));
    assert_eq!(calc_shanten(&tt, 0), 1);
}
