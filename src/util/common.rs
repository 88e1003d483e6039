use crate::model::*;

// 直積 いずれかのリストが空の場合は空を返却
pub fn cartesian_product<T>(vv: &[Vec<T>]) -> Vec<Vec<&T>> {
    let mut res: Vec<Vec<&T>> = vec![vec![]];
    for v in vv {
        let mut next = vec![];
        for prefix in &res {
            for x in v {
                let mut p = prefix.clone();
                p.push(x);
                next.push(p);
            }
        }
        res = next;
    }
    res
}

// 赤5は通常の5として枚数を返却
#[inline]
pub fn count_tile(tt: &TileTable, t: Tile) -> usize {
    tt[t.0][t.n()]
}

// 赤5の枚数
#[inline]
pub fn count_red(tt: &TileTable, ti: Type) -> usize {
    if ti == TZ {
        0
    } else {
        tt[ti][0]
    }
}

pub fn inc_tile(tt: &mut TileTable, tile: Tile) {
    let t = tile;
    tt[t.0][t.1] += 1;
    if t.1 == 0 {
        // 0は赤5のフラグなので本来の5をたてる
        tt[t.0][5] += 1;
    }
}

// 存在しない牌を減らそうとした場合はfalseを返却(変更なし)
pub fn dec_tile(tt: &mut TileTable, tile: Tile) -> bool {
    let t = tile;
    if tt[t.0][t.1] == 0 {
        return false;
    }
    if t.1 == 5 && tt[t.0][5] == tt[t.0][0] {
        // 通常の5が無く赤5のみ
        return false;
    }
    tt[t.0][t.1] -= 1;
    if t.1 == 0 {
        tt[t.0][5] -= 1;
    }
    true
}

// 赤5の区別無しで1枚取り除く (通常の5を優先)
pub fn dec_tile_any(tt: &mut TileTable, tile: Tile) -> Option<Tile> {
    let t = tile.to_normal();
    if dec_tile(tt, t) {
        Some(t)
    } else if t.is_suit() && t.1 == 5 && dec_tile(tt, Tile(t.0, 0)) {
        Some(Tile(t.0, 0))
    } else {
        None
    }
}

pub fn tiles_from_tile_table(tt: &TileTable) -> Vec<Tile> {
    let mut hand = vec![];
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            for c in 0..tt[ti][ni] {
                if ti != TZ && ni == 5 && c < tt[ti][0] {
                    hand.push(Tile(ti, 0)); // 赤5
                } else {
                    hand.push(Tile(ti, ni));
                }
            }
        }
    }
    hand
}

pub fn tiles_to_tile_table(tiles: &[Tile]) -> TileTable {
    let mut tt = TileTable::default();
    for &t in tiles {
        inc_tile(&mut tt, t);
    }
    tt
}

// 手牌の枚数 (赤5の重複を除く)
pub fn count_tiles(tt: &TileTable) -> usize {
    let mut n = 0;
    for ti in 0..TYPE {
        n += tt[ti][1..TNUM].iter().sum::<usize>();
    }
    n
}

// 手牌に含まれる牌tの実体(通常5, 赤5)のリスト
pub fn tiles_with_red5(tt: &TileTable, t: Tile) -> Vec<Tile> {
    let Tile(ti, ni) = t.to_normal();
    if tt[ti][ni] == 0 {
        return vec![];
    }

    let tr = tt[ti];
    if ti == TZ || ni != 5 {
        return vec![Tile(ti, ni)]; // 5ではない場合
    }
    if tr[0] == 0 {
        return vec![Tile(ti, ni)]; // 通常5しかない場合
    }
    if tr[0] == tr[5] {
        return vec![Tile(ti, 0)]; // 赤5しかない場合
    }
    vec![Tile(ti, ni), Tile(ti, 0)] // 通常5と赤5の両方がある場合
}

// 和了者から見た親の相対位置
#[inline]
pub fn dealer_offset(seat_wind: Tnum) -> Seat {
    (SEAT + WE - seat_wind) % SEAT
}
