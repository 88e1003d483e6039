// 向聴数の計算
// 聴牌を0, 和了形を-1とする (あと何枚の有効牌で聴牌になるか)
//
// 通常形は色ごとに面子・塔子・雀頭の取り方を全探索し, (雀頭の有無, 面子数)ごとの塔子数の最大値を
// 色をまたいで合成する. 1色は高々14枚なので探索は定数時間.
// 七対子・国士無双の向聴数と合わせて最小値をとり,聴牌(0)と和了(-1)の境界は和了牌判定で補正する.

use log::debug;

use crate::model::*;

use super::win::{calc_discards_to_tenpai_all, calc_tiles_to_win, is_win};

// 面子 + 塔子の上限
const MAX_SETS: usize = 4;

#[derive(Debug, Default, Clone, Copy)]
struct Blocks {
    sets: usize,    // 面子
    partial: usize, // 塔子 (対子を含む)
    pair: bool,     // 雀頭
}

impl Blocks {
    fn shanten(&self) -> i32 {
        let partial = self.partial.min(MAX_SETS.saturating_sub(self.sets));
        8 - 2 * self.sets as i32 - partial as i32 - if self.pair { 1 } else { 0 }
    }
}

// [雀頭の有無][面子数] => 塔子数の最大値 (-1: 該当する取り方なし)
type BlockTable = [[i32; MAX_SETS + 1]; 2];

const EMPTY_TABLE: BlockTable = [[-1; MAX_SETS + 1]; 2];

// rowのni以降の牌から面子・塔子・雀頭を取り出す全パターンを探索
// 各ブロックは含まれる最小の牌の位置で取り出す
fn search_blocks(row: &mut TileRow, ni: usize, is_suit: bool, b: Blocks, tbl: &mut BlockTable) {
    let mut ni = ni;
    while ni < TNUM && row[ni] == 0 {
        ni += 1;
    }
    if ni == TNUM {
        let (p, s) = (b.pair as usize, b.sets.min(MAX_SETS));
        tbl[p][s] = tbl[p][s].max(b.partial as i32);
        return;
    }

    let set = Blocks { sets: b.sets + 1, ..b };
    let partial = Blocks { partial: b.partial + 1, ..b };

    // 刻子
    if row[ni] >= 3 {
        row[ni] -= 3;
        search_blocks(row, ni, is_suit, set, tbl);
        row[ni] += 3;
    }
    // 順子
    if is_suit && ni + 2 < TNUM && row[ni + 1] > 0 && row[ni + 2] > 0 {
        take(row, &[ni, ni + 1, ni + 2], |row| search_blocks(row, ni, is_suit, set, tbl));
    }
    if row[ni] >= 2 {
        row[ni] -= 2;
        // 雀頭
        if !b.pair {
            search_blocks(row, ni, is_suit, Blocks { pair: true, ..b }, tbl);
        }
        // 対子
        search_blocks(row, ni, is_suit, partial, tbl);
        row[ni] += 2;
    }
    // 両面・辺張, 嵌張
    if is_suit {
        for d in 1..=2 {
            if ni + d < TNUM && row[ni + d] > 0 {
                take(row, &[ni, ni + d], |row| search_blocks(row, ni, is_suit, partial, tbl));
            }
        }
    }
    // 残りは孤立牌
    let n = row[ni];
    row[ni] = 0;
    search_blocks(row, ni + 1, is_suit, b, tbl);
    row[ni] = n;
}

fn take(row: &mut TileRow, nis: &[usize], mut f: impl FnMut(&mut TileRow)) {
    for &ni in nis {
        row[ni] -= 1;
    }
    f(row);
    for &ni in nis {
        row[ni] += 1;
    }
}

// 2つの色の組み合わせを合成 (雀頭は全体で1つまで)
fn merge_tables(a: &BlockTable, b: &BlockTable) -> BlockTable {
    let mut res = EMPTY_TABLE;
    for pa in 0..2 {
        for pb in 0..(2 - pa) {
            for sa in 0..=MAX_SETS {
                for sb in 0..=(MAX_SETS - sa) {
                    if a[pa][sa] < 0 || b[pb][sb] < 0 {
                        continue;
                    }
                    let v = &mut res[pa + pb][sa + sb];
                    *v = (*v).max(a[pa][sa] + b[pb][sb]);
                }
            }
        }
    }
    res
}

// 通常形の向聴数
pub fn calc_normal_shanten(hand: &TileTable, n_melds: usize) -> i32 {
    let mut total = EMPTY_TABLE;
    total[0][0] = 0;
    for ti in 0..TYPE {
        let mut row = hand[ti];
        row[0] = 0; // 赤5は[ti][5]に含まれている
        let mut tbl = EMPTY_TABLE;
        search_blocks(&mut row, 1, ti != TZ, Blocks::default(), &mut tbl);
        total = merge_tables(&total, &tbl);
    }

    let mut best = i32::MAX;
    for (p, row) in total.iter().enumerate() {
        for (sets, &partial) in row.iter().enumerate() {
            if partial < 0 {
                continue;
            }
            let b = Blocks {
                sets: sets + n_melds,
                partial: partial as usize,
                pair: p == 1,
            };
            best = best.min(b.shanten());
        }
    }
    best
}

// 七対子の向聴数 (鳴きがある場合は対象外)
pub fn calc_chiitoitsu_shanten(hand: &TileTable) -> i32 {
    let mut pairs: i32 = 0;
    let mut kinds: i32 = 0;
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            if hand[ti][ni] >= 1 {
                kinds += 1;
            }
            if hand[ti][ni] >= 2 {
                pairs += 1;
            }
        }
    }
    6 - pairs + (7 - kinds).max(0)
}

// 国士無双の向聴数 (鳴きがある場合は対象外)
pub fn calc_kokushimusou_shanten(hand: &TileTable) -> i32 {
    let mut kinds = 0;
    let mut has_pair = false;
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            if (ti == TZ && ni > DR) || !Tile(ti, ni).is_end() {
                continue;
            }
            if hand[ti][ni] >= 1 {
                kinds += 1;
            }
            if hand[ti][ni] >= 2 {
                has_pair = true;
            }
        }
    }
    13 - kinds - if has_pair { 1 } else { 0 }
}

// 向聴数 handは鳴きを含まない手牌(13 - 3 * n_melds 枚 または 14 - 3 * n_melds 枚)
pub fn calc_shanten(hand: &TileTable, n_melds: usize) -> i32 {
    let normal = calc_normal_shanten(hand, n_melds);
    let (chiitoitsu, kokushi) = if n_melds == 0 {
        (calc_chiitoitsu_shanten(hand), calc_kokushimusou_shanten(hand))
    } else {
        (i32::MAX, i32::MAX)
    };
    let mut sh = normal.min(chiitoitsu).min(kokushi);

    // 和了と聴牌は厳密に判定できるので補正
    let n: usize = hand.iter().map(|tr| tr[1..TNUM].iter().sum::<usize>()).sum();
    if n % 3 == 2 {
        if is_win(hand) {
            sh = -1;
        } else if !calc_discards_to_tenpai_all(hand).is_empty() {
            sh = 0;
        } else {
            sh = sh.max(1);
        }
    } else if !calc_tiles_to_win(hand).is_empty() {
        sh = 0;
    } else {
        sh = sh.max(1);
    }

    debug!(
        "shanten: normal={} chiitoitsu={} kokushi={} => {}",
        normal, chiitoitsu, kokushi, sh
    );
    sh
}
