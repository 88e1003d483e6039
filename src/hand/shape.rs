use crate::model::*;

use super::parse::*;

use SetPairType::*;

// 和了形の1つの解釈 (面子分解 + 和了牌がどの面子を完成させたか)
// 手牌が変化した場合は再計算すること
#[derive(Debug, Clone)]
pub struct HandShape {
    pub hand: TileTable,          // 和了牌を含む手牌(鳴きは含まない)
    pub parsed_hand: ParsedHand,  // 鳴きを含むすべての面子 (国士無双は空)
    pub winning_tile: Tile,       // 和了牌
    pub win_index: Option<Index>, // 和了牌で完成した面子のparsed_handにおけるindex
    pub win_type: WinType,        // ツモ or ロン
    pub is_open: bool,            // 副露の有無 (暗槓は含まない)
}

// 和了形の解釈の一覧を返却 和了形でない場合は空
pub fn calc_hand_shapes(
    hand: &TileTable,
    melds: &[Meld],
    winning_tile: Tile,
    win_type: WinType,
) -> Vec<HandShape> {
    let is_open = melds.iter().any(|m| m.is_open());
    let winning_tile = winning_tile.to_normal();
    let pm = parse_melds(melds);
    let mut res = vec![];
    let mut push = |parsed_hand: ParsedHand, win_index: Option<Index>| {
        res.push(HandShape {
            hand: *hand,
            parsed_hand,
            winning_tile,
            win_index,
            win_type,
            is_open,
        });
    };

    // 通常形 同じ面子が複数ある場合は最初のもののみ
    for mut ph in parse_into_normal_win(hand) {
        ph.extend(pm.iter().copied());
        for i in 0..ph.len() {
            let sp = ph[i];
            if sp.is_meld() || !sp.contains(winning_tile) || ph[..i].contains(&sp) {
                continue;
            }
            push(ph.clone(), Some(i));
        }
    }

    if melds.is_empty() {
        // 七対子
        for ph in parse_into_chiitoitsu_win(hand) {
            let i = ph.iter().position(|sp| sp.contains(winning_tile));
            push(ph, i);
        }

        // 国士無双
        for ph in parse_into_kokusimusou_win(hand) {
            push(ph, None);
        }
    }

    res
}

impl HandShape {
    // 4面子1雀頭, 七対子, 国士無双のいずれか
    pub fn is_complete(&self) -> bool {
        self.is_thirteen_orphans() || self.is_seven_pairs() || self.parsed_hand.len() == 5
    }

    #[inline]
    pub fn is_concealed(&self) -> bool {
        !self.is_open
    }

    pub fn is_seven_pairs(&self) -> bool {
        self.parsed_hand.len() == 7 && self.parsed_hand.iter().all(|sp| sp.0 == Pair)
    }

    #[inline]
    pub fn is_thirteen_orphans(&self) -> bool {
        self.parsed_hand.is_empty()
    }

    // 雀頭 七対子・国士無双はNone
    pub fn pair(&self) -> Option<Tile> {
        if self.is_seven_pairs() {
            return None;
        }
        self.parsed_hand.iter().find(|sp| sp.0 == Pair).map(|sp| sp.1)
    }

    // 順子(チーを含む)の先頭の牌
    pub fn runs(&self) -> Vec<Tile> {
        self.parsed_hand
            .iter()
            .filter(|sp| sp.is_sequence())
            .map(|sp| sp.1)
            .collect()
    }

    // ロンで完成した刻子は明刻として扱う
    pub fn is_ron_triplet(&self, i: Index) -> bool {
        self.win_type == WinType::Ron
            && self.win_index == Some(i)
            && self.parsed_hand[i].0 == Koutsu
    }

    // 暗刻 (暗槓は含まない)
    pub fn concealed_triplets(&self) -> Vec<Tile> {
        self.parsed_hand
            .iter()
            .enumerate()
            .filter(|(i, sp)| sp.0 == Koutsu && !self.is_ron_triplet(*i))
            .map(|(_, sp)| sp.1)
            .collect()
    }

    // 明刻 (ポン + ロンで完成した刻子)
    pub fn melded_triplets(&self) -> Vec<Tile> {
        self.parsed_hand
            .iter()
            .enumerate()
            .filter(|(i, sp)| sp.0 == Pon || self.is_ron_triplet(*i))
            .map(|(_, sp)| sp.1)
            .collect()
    }

    // 槓子 (明槓 + 暗槓)
    pub fn quads(&self) -> Vec<Tile> {
        self.parsed_hand
            .iter()
            .filter(|sp| matches!(sp.0, Minkan | Ankan))
            .map(|sp| sp.1)
            .collect()
    }

    pub fn concealed_quads(&self) -> Vec<Tile> {
        self.parsed_hand
            .iter()
            .filter(|sp| sp.0 == Ankan)
            .map(|sp| sp.1)
            .collect()
    }

    // 待ちの形 国士無双は単騎として扱う
    pub fn wait(&self) -> Wait {
        let i = match self.win_index {
            Some(i) => i,
            None => return Wait::Tanki,
        };
        let SetPair(tp, t) = self.parsed_hand[i];
        let wn = self.winning_tile.1;
        match tp {
            Pair => Wait::Tanki,
            Koutsu => Wait::Shanpon,
            _ => {
                if wn == t.1 + 1 {
                    Wait::Kanchan
                } else if (wn == t.1 && t.1 == 7) || (wn == t.1 + 2 && t.1 == 1) {
                    Wait::Penchan
                } else {
                    Wait::Ryanmen
                }
            }
        }
    }

    #[inline]
    pub fn is_two_sided_wait(&self) -> bool {
        self.wait() == Wait::Ryanmen
    }
}
