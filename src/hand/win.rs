use super::parse::parse_into_chiitoitsu_win;
use crate::model::*;
use crate::util::common::tiles_with_red5;

// [完成形判定 (面子, 雀頭)]

// 牌種ごとの枚数を3で割った余りと,余り(0,1,2)ごとの牌種の数を返却
pub fn calc_mods_cnts(hand: &TileTable) -> ([usize; TYPE], [usize; 3]) {
    let mut mods = [0; TYPE];
    let mut cnts = [0; 3];
    for ti in 0..TYPE {
        mods[ti] = hand[ti][1..TNUM].iter().sum::<usize>() % 3;
        cnts[mods[ti]] += 1;
    }
    (mods, cnts)
}

// 面子のみで構成されているかの判定
// 左から順に,残った枚数の3の余りを順子として消費していく
pub fn is_sets(tr: &TileRow, ti: Type) -> bool {
    let mut n0 = tr[1];
    let mut n1 = tr[2];
    for i in 1..8 {
        let n2 = tr[i + 2];
        let n = n0 % 3;
        if n != 0 && (ti == TZ || n1 < n || n2 < n) {
            return false;
        }
        n0 = n1 - n;
        n1 = n2 - n;
    }
    n0 % 3 == 0 && n1 % 3 == 0
}

// 雀頭+面子のみで構成されているかの判定
pub fn is_sets_pair(tr: &TileRow, ti: Type) -> bool {
    !calc_pair_candidate(tr, ti).is_empty()
}

// 面子の数字の和は3で割り切れるので,数字の総和の余りから雀頭の候補を絞り込める
// [1,4,7], [2,5,8], [3,6,9] のいずれか
pub fn calc_pair_candidate_index(tr: &TileRow) -> [Tnum; 3] {
    let sum: usize = (1..TNUM).map(|i| i * tr[i]).sum();
    let m = (sum * 2) % 3; // 2 * (雀頭の数字) ≡ sum (mod 3)
    let base = if m == 0 { 3 } else { m };
    [base, base + 3, base + 6]
}

// 牌種が雀頭+面子で構成されている場合,雀頭として成立する牌のリストを返却
// 基本的に1つだが,3113,3111113のような形の場合2つ
pub fn calc_pair_candidate(tr: &TileRow, ti: Type) -> Vec<Tile> {
    let mut tr = *tr;
    let mut res = vec![];
    for ni in calc_pair_candidate_index(&tr) {
        if ni >= TNUM || tr[ni] < 2 {
            continue;
        }
        tr[ni] -= 2;
        if is_sets(&tr, ti) {
            res.push(Tile(ti, ni));
        }
        tr[ni] += 2;
    }
    res
}

// 14 - (副露数) * 3 枚の手牌が和了形である場合,雀頭候補のリストを返却
pub fn calc_possibole_pairs(hand: &TileTable) -> Vec<Tile> {
    let (mods, cnts) = calc_mods_cnts(hand);
    if cnts[1] != 0 || cnts[2] != 1 {
        return vec![];
    }

    let mut res = vec![];
    for ti in 0..TYPE {
        if mods[ti] == 2 {
            res = calc_pair_candidate(&hand[ti], ti);
            if res.is_empty() {
                return vec![];
            }
        } else if !is_sets(&hand[ti], ti) {
            return vec![];
        }
    }
    res
}

// [和了形判定]

// 通常形
pub fn is_normal_win(hand: &TileTable) -> bool {
    !calc_possibole_pairs(hand).is_empty()
}

// 七対子
pub fn is_chiitoitsu_win(hand: &TileTable) -> bool {
    !parse_into_chiitoitsu_win(hand).is_empty()
}

// 国士無双
pub fn is_kokushimusou_win(hand: &TileTable) -> bool {
    let mut count = 0;
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            let n = hand[ti][ni];
            if ti == TZ && ni > DR {
                continue;
            }
            if Tile(ti, ni).is_end() {
                if n == 0 {
                    return false;
                }
                count += n;
            } else if n != 0 {
                return false;
            }
        }
    }
    count == 14
}

pub fn is_win(hand: &TileTable) -> bool {
    is_normal_win(hand) || is_chiitoitsu_win(hand) || is_kokushimusou_win(hand)
}

// [和了牌判定]
// 13 - (副露数) * 3 枚の手牌について和了牌のリストを返却
// 聴牌していない場合は空のリストを返却
// 手牌で4枚使い切っている牌は和了牌に含めない

// 通常形
pub fn calc_tiles_to_normal_win(hand: &TileTable) -> Vec<Tile> {
    let (mods, cnts) = calc_mods_cnts(hand);
    let mut res = vec![];

    // 牌種trに1枚加えた結果がcheckを満たす牌をresに追加
    let mut add_waits = |tr: &TileRow, ti: Type, check: fn(&TileRow, Type) -> bool| {
        let mut tr = *tr;
        for ni in 1..TNUM {
            if tr[ni] >= TILE || (ti == TZ && ni > DR) {
                continue;
            }
            tr[ni] += 1;
            if check(&tr, ti) {
                res.push(Tile(ti, ni));
            }
            tr[ni] -= 1;
        }
    };

    if cnts[1] == 0 && cnts[2] == 2 {
        // 余り2の牌種が2つ: 一方が雀頭を含み,もう一方が塔子を含む
        let mut ti_mod2 = vec![];
        for ti in 0..TYPE {
            if mods[ti] == 2 {
                ti_mod2.push(ti);
            } else if !is_sets(&hand[ti], ti) {
                return vec![];
            }
        }
        for (ti0, ti1) in [(ti_mod2[0], ti_mod2[1]), (ti_mod2[1], ti_mod2[0])] {
            if is_sets_pair(&hand[ti0], ti0) {
                add_waits(&hand[ti1], ti1, is_sets);
            }
        }
    } else if cnts[1] == 1 && cnts[2] == 0 {
        // 余り1の牌種が1つ: 単騎または雀頭+塔子
        for ti in 0..TYPE {
            if mods[ti] == 1 {
                add_waits(&hand[ti], ti, is_sets_pair);
            } else if !is_sets(&hand[ti], ti) {
                return vec![];
            }
        }
    }

    res.sort();
    res.dedup();
    res
}

// 七対子
pub fn calc_tiles_to_chiitoitsu_win(hand: &TileTable) -> Vec<Tile> {
    let mut single = None;
    let mut n_pair = 0;
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            match hand[ti][ni] {
                0 => {}
                1 => {
                    if single.is_some() {
                        return vec![];
                    }
                    single = Some(Tile(ti, ni));
                }
                2 => n_pair += 1,
                _ => return vec![],
            }
        }
    }

    match single {
        Some(t) if n_pair == 6 => vec![t],
        _ => vec![],
    }
}

// 国士無双
pub fn calc_tiles_to_kokushimusou_win(hand: &TileTable) -> Vec<Tile> {
    let mut missing = vec![]; // 所有していない么九牌
    let mut n_end = 0; // 么九牌の数
    let mut has_pair = false;
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            let t = Tile(ti, ni);
            let n = hand[ti][ni];
            if !t.is_end() || (ti == TZ && ni > DR) {
                if n != 0 {
                    return vec![];
                }
                continue;
            }
            match n {
                0 => missing.push(t),
                1 => {}
                2 => {
                    if has_pair {
                        return vec![];
                    }
                    has_pair = true;
                }
                _ => return vec![],
            }
            n_end += n;
        }
    }

    if n_end != 13 {
        return vec![];
    }

    match missing.len() {
        // すべての么九牌を所持している = 国士無双十三面待ち
        0 => end_tiles(),
        // 所有していない么九牌が一枚のみ = その牌が和了牌
        1 => missing,
        _ => vec![],
    }
}

pub fn calc_tiles_to_win(hand: &TileTable) -> Vec<Tile> {
    let mut res = calc_tiles_to_normal_win(hand);
    res.extend(calc_tiles_to_chiitoitsu_win(hand));
    res.extend(calc_tiles_to_kokushimusou_win(hand));
    res.sort();
    res.dedup();
    res
}

// 么九牌13種
pub fn end_tiles() -> Vec<Tile> {
    let mut res = vec![];
    for ti in 0..TZ {
        res.push(Tile(ti, 1));
        res.push(Tile(ti, 9));
    }
    for ni in WE..=DR {
        res.push(Tile(TZ, ni));
    }
    res
}

// [聴牌打牌判定]
// ツモ番において聴牌となる打牌と待ちの組み合わせの一覧を返却
// 主にリーチ宣言が可能かどうかを確認する用途
// この関数群は手牌の赤5を考慮する

fn calc_discards_to_tenpai(
    hand: &TileTable,
    calc_waits: fn(&TileTable) -> Vec<Tile>,
) -> Vec<(Tile, Vec<Tile>)> {
    let mut res = vec![];
    let mut h = *hand;
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            if h[ti][ni] == 0 {
                continue;
            }
            h[ti][ni] -= 1;
            let waits = calc_waits(&h);
            h[ti][ni] += 1;
            if !waits.is_empty() {
                for t in tiles_with_red5(hand, Tile(ti, ni)) {
                    res.push((t, waits.clone()));
                }
            }
        }
    }
    res
}

// 通常形
pub fn calc_discards_to_normal_tenpai(hand: &TileTable) -> Vec<(Tile, Vec<Tile>)> {
    calc_discards_to_tenpai(hand, calc_tiles_to_normal_win)
}

// 七対子
pub fn calc_discards_to_chiitoitsu_tenpai(hand: &TileTable) -> Vec<(Tile, Vec<Tile>)> {
    calc_discards_to_tenpai(hand, calc_tiles_to_chiitoitsu_win)
}

// 国士無双
pub fn calc_discards_to_kokushimusou_tenpai(hand: &TileTable) -> Vec<(Tile, Vec<Tile>)> {
    calc_discards_to_tenpai(hand, calc_tiles_to_kokushimusou_win)
}

// すべての形 打牌ごとに待ちをまとめて返却
pub fn calc_discards_to_tenpai_all(hand: &TileTable) -> Vec<(Tile, Vec<Tile>)> {
    calc_discards_to_tenpai(hand, calc_tiles_to_win)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::common::tiles_to_tile_table;
    use crate::util::string::tiles_from_string;

    fn tt(s: &str) -> TileTable {
        tiles_to_tile_table(&tiles_from_string(s).unwrap())
    }

    #[test]
    fn test_is_normal_win() {
        assert!(is_normal_win(&tt("m123456789p11z111")));
        assert!(is_normal_win(&tt("m111222333s99p789")));
        assert!(is_normal_win(&tt("m11122233344455")));
        assert!(!is_normal_win(&tt("m11122233344456")));
        assert!(!is_normal_win(&tt("z11223344556677")));
        assert!(!is_normal_win(&tt("p0")));
        assert!(is_normal_win(&tt("s55")));
        assert!(!is_normal_win(&tt("z12311")));
    }

    #[test]
    fn test_pair_candidate() {
        let h = tt("m11123444");
        assert_eq!(calc_pair_candidate(&h[TM], TM), vec![Tile(TM, 1), Tile(TM, 4)]);
        let h = tt("m11123");
        assert_eq!(calc_pair_candidate(&h[TM], TM), vec![Tile(TM, 1)]);
    }

    #[test]
    fn test_special_win() {
        assert!(is_chiitoitsu_win(&tt("m1155s77p3399z2277")));
        assert!(!is_chiitoitsu_win(&tt("m1111s77p3399z2277")));
        assert!(is_kokushimusou_win(&tt("m19s19p19z12345677")));
        assert!(!is_normal_win(&tt("m19s19p19z12345677")));
        assert!(!is_kokushimusou_win(&tt("m19s19p19z12345678")));
    }

    #[test]
    fn test_tiles_to_win() {
        assert_eq!(
            calc_tiles_to_normal_win(&tt("m1112345678999")),
            (1..=9).map(|ni| Tile(TM, ni)).collect::<Vec<_>>()
        );
        assert_eq!(
            calc_tiles_to_normal_win(&tt("m23p123456s789z11")),
            vec![Tile(TM, 1), Tile(TM, 4)]
        );
        // 4枚使いの単騎は待ちにならない
        assert!(calc_tiles_to_normal_win(&tt("m1111")).is_empty());
        assert_eq!(
            calc_tiles_to_chiitoitsu_win(&tt("m1155s77p3399z223")),
            vec![Tile(TZ, WW)]
        );
        assert_eq!(calc_tiles_to_kokushimusou_win(&tt("m19s19p19z1234567")).len(), 13);
        assert_eq!(
            calc_tiles_to_kokushimusou_win(&tt("m19s19p19z1234566")),
            vec![Tile(TZ, DR)]
        );
    }

    #[test]
    fn test_discards_to_tenpai() {
        let res = calc_discards_to_normal_tenpai(&tt("m123456789p11z117"));
        assert!(res.iter().any(|(d, w)| *d == Tile(TZ, DR) && w.contains(&Tile(TP, 1))));
        let res = calc_discards_to_tenpai_all(&tt("m1155s77p3399z2237"));
        assert!(res.iter().any(|(d, w)| *d == Tile(TZ, DR) && *w == vec![Tile(TZ, WW)]));
    }
}
