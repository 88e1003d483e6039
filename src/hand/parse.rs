use crate::model::*;
use crate::util::common::cartesian_product;

use super::win::{calc_possibole_pairs, is_kokushimusou_win};

use SetPairType::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetPairType {
    Pair,    // 雀頭
    Shuntsu, // 順子
    Koutsu,  // 刻子
    Chi,     // チー
    Pon,     // ポン
    Minkan,  // 明槓 (大明槓 + 加槓)
    Ankan,   // 暗槓
}

// Tileは順子,チーの場合は先頭の牌 (赤5は通常の5)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetPair(pub SetPairType, pub Tile);

impl SetPair {
    // 牌tを含むかどうか
    pub fn contains(&self, t: Tile) -> bool {
        let SetPair(tp, s) = *self;
        match tp {
            Shuntsu | Chi => s.0 == t.0 && s.1 <= t.n() && t.n() <= s.1 + 2,
            _ => s == t,
        }
    }

    #[inline]
    pub fn is_sequence(&self) -> bool {
        matches!(self.0, Shuntsu | Chi)
    }

    #[inline]
    pub fn is_triplet(&self) -> bool {
        matches!(self.0, Koutsu | Pon | Minkan | Ankan)
    }

    // 鳴きで晒した面子 (暗槓を含む)
    #[inline]
    pub fn is_meld(&self) -> bool {
        matches!(self.0, Chi | Pon | Minkan | Ankan)
    }
}

pub type ParsedHand = Vec<SetPair>;

// 分解の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decomposition {
    Complete { melds: Vec<SetPair>, pair: Tile },
    Incomplete,
}

// 鳴きをSetPairに変換したリストを返却
pub fn parse_melds(melds: &[Meld]) -> ParsedHand {
    melds
        .iter()
        .map(|m| {
            let t = m.base_tile();
            match m.type_ {
                MeldType::Chi => SetPair(Chi, t),
                MeldType::Pon => SetPair(Pon, t),
                MeldType::Minkan | MeldType::Kakan => SetPair(Minkan, t),
                MeldType::Ankan => SetPair(Ankan, t),
            }
        })
        .collect()
}

// 牌種を順子と刻子に分解するすべての方法を返却
// 数字の小さい牌から順に刻子または順子として取り除いていく
// 三連刻(111222333)のような形は刻子3つと順子3つの2通りとなる
// TileRowが空(すべて0)の場合は[[]]を返却, 分解できない場合は[]を返却
fn parse_row_into_sets(tr: &TileRow, ti: Type) -> Vec<ParsedHand> {
    let mut res = vec![];
    let mut tr = *tr;
    tr[0] = 0;
    parse_row_rec(&mut tr, ti, 1, &mut vec![], &mut res);
    res
}

fn parse_row_rec(
    tr: &mut TileRow,
    ti: Type,
    start: Tnum,
    cur: &mut ParsedHand,
    res: &mut Vec<ParsedHand>,
) {
    let ni = match (start..TNUM).find(|&i| tr[i] > 0) {
        Some(ni) => ni,
        None => {
            res.push(cur.clone());
            return;
        }
    };

    // 刻子
    if tr[ni] >= 3 {
        tr[ni] -= 3;
        cur.push(SetPair(Koutsu, Tile(ti, ni)));
        parse_row_rec(tr, ti, ni, cur, res);
        cur.pop();
        tr[ni] += 3;
    }

    // 順子
    if ti != TZ && ni <= 7 && tr[ni + 1] > 0 && tr[ni + 2] > 0 {
        for i in ni..ni + 3 {
            tr[i] -= 1;
        }
        cur.push(SetPair(Shuntsu, Tile(ti, ni)));
        parse_row_rec(tr, ti, ni, cur, res);
        cur.pop();
        for i in ni..ni + 3 {
            tr[i] += 1;
        }
    }
}

// 手牌が完成形(七対子・国士無双は除く)ならすべての面子+雀頭への分解を返却
// 鳴きは含まないので必要に応じてparse_meldsの結果を追加すること
pub fn parse_into_normal_win(hand: &TileTable) -> Vec<ParsedHand> {
    let mut res = vec![];
    for pair in calc_possibole_pairs(hand) {
        let mut h = *hand;
        h[pair.0][pair.1] -= 2;

        let rows: Vec<Vec<ParsedHand>> = (0..TYPE).map(|ti| parse_row_into_sets(&h[ti], ti)).collect();

        // それぞれの列の分割のすべての組み合わせ(直積)を求める
        for v in cartesian_product(&rows) {
            let mut ph: ParsedHand = v.into_iter().flatten().copied().collect();
            ph.push(SetPair(Pair, pair));
            res.push(ph);
        }
    }
    res
}

// 手牌が完成形(七対子)ならすべて対子に分解して返却
pub fn parse_into_chiitoitsu_win(hand: &TileTable) -> Vec<ParsedHand> {
    let mut res = vec![];
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            match hand[ti][ni] {
                0 => {}
                2 => res.push(SetPair(Pair, Tile(ti, ni))),
                _ => return vec![],
            }
        }
    }

    if res.len() == 7 {
        vec![res]
    } else {
        vec![] // 鳴き有り
    }
}

// 手牌が完成形(国士無双)なら空のParsedHandが入ったリストを返却
pub fn parse_into_kokusimusou_win(hand: &TileTable) -> Vec<ParsedHand> {
    if is_kokushimusou_win(hand) {
        vec![vec![]]
    } else {
        vec![]
    }
}

// 通常形の分解の内,最初に見つかったもの
pub fn decompose(hand: &TileTable) -> Decomposition {
    match parse_into_normal_win(hand).into_iter().next() {
        Some(ph) => {
            let mut melds = vec![];
            let mut pair = None;
            for sp in ph {
                if sp.0 == Pair {
                    pair = Some(sp.1);
                } else {
                    melds.push(sp);
                }
            }
            match pair {
                Some(pair) => Decomposition::Complete { melds, pair },
                None => Decomposition::Incomplete,
            }
        }
        None => Decomposition::Incomplete,
    }
}
