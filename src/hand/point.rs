use crate::error::{MahjongError, MahjongResult};
use crate::model::*;

// 100点単位に切り上げ
fn ceil(n: Point) -> Point {
    (n + 99) / 100 * 100
}

// [点数区分]

// 満貫 (5翻, 4翻40符以上, 3翻70符以上)
pub fn is_mangan(fan: usize, fu: usize) -> bool {
    fan == 5 || (fan == 4 && fu >= 40) || (fan == 3 && fu >= 70)
}

// 跳満
pub fn is_haneman(fan: usize) -> bool {
    fan == 6 || fan == 7
}

// 倍満
pub fn is_baiman(fan: usize) -> bool {
    (8..=10).contains(&fan)
}

// 三倍満
pub fn is_sanbaiman(fan: usize) -> bool {
    fan == 11 || fan == 12
}

// 数え役満
pub fn is_kazoe_yakuman(fan: usize) -> bool {
    fan >= 13
}

pub fn get_score_tier(fu: usize, fan: usize, yakuman: usize) -> ScoreTier {
    if yakuman > 0 {
        ScoreTier::Yakuman(yakuman)
    } else if is_kazoe_yakuman(fan) {
        ScoreTier::KazoeYakuman
    } else if is_sanbaiman(fan) {
        ScoreTier::Sanbaiman
    } else if is_baiman(fan) {
        ScoreTier::Baiman
    } else if is_haneman(fan) {
        ScoreTier::Haneman
    } else if is_mangan(fan, fu) || calc_raw_base_point(fu, fan) >= 2000 {
        ScoreTier::Mangan
    } else {
        ScoreTier::Normal
    }
}

// 役満の翻数表記 (1倍: 13, 2倍: 23, 3倍: 30, それ以上は13の倍数)
pub fn yakuman_fan(yakuman: usize) -> usize {
    match yakuman {
        0 => 0,
        1 => 13,
        2 => 23,
        3 => 30,
        n => 13 * n,
    }
}

fn calc_raw_base_point(fu: usize, fan: usize) -> usize {
    // 13翻以上はオーバーフローを避けるため打ち切り
    fu * 2_usize.pow(fan.min(13) as u32 + 2)
}

// 基本点
pub fn calc_base_point(fu: usize, fan: usize, yakuman: usize) -> Point {
    let base = match get_score_tier(fu, fan, yakuman) {
        ScoreTier::Normal => calc_raw_base_point(fu, fan),
        ScoreTier::Mangan => 2000,
        ScoreTier::Haneman => 3000,
        ScoreTier::Baiman => 4000,
        ScoreTier::Sanbaiman => 6000,
        ScoreTier::KazoeYakuman => 8000,
        ScoreTier::Yakuman(n) => 8000 * n,
    };
    base as Point
}

// (ロンの支払い, ツモ・子の支払い, ツモ・親の支払い)と点数区分を返却
// 親の和了の場合, ツモ・親の支払いは0
// ツモの支払いは支払者ごとに100点単位に切り上げ
pub fn calc_points(is_dealer: bool, fu: usize, fan: usize, yakuman: usize) -> (Points, ScoreTier) {
    let base = calc_base_point(fu, fan, yakuman);
    let tier = get_score_tier(fu, fan, yakuman);
    if is_dealer {
        ((ceil(base * 6), ceil(base * 2), 0), tier)
    } else {
        ((ceil(base * 4), ceil(base), ceil(base * 2)), tier)
    }
}

// 和了時の各座席の点数の増減
// discarder: ロンの場合は放銃者, ツモの場合はNone
// 本場: ロンは放銃者が300点 x 本場, ツモは各支払者が100点 x 本場
// 供託リーチ棒(1000点 x 本数)は和了者が受け取る
pub fn calc_payout(
    winner: Seat,
    dealer: Seat,
    discarder: Option<Seat>,
    points: &Points,
    honba: usize,
    riichi_sticks: usize,
) -> MahjongResult<[Point; SEAT]> {
    if winner >= SEAT || dealer >= SEAT {
        return Err(MahjongError::illegal("seat out of range"));
    }

    let honba = honba as Point;
    let mut deltas = [0; SEAT];
    match discarder {
        Some(d) => {
            if d == winner || d >= SEAT {
                return Err(MahjongError::illegal("invalid discarder"));
            }
            let pay = points.0 + 300 * honba;
            deltas[d] -= pay;
            deltas[winner] += pay;
        }
        None => {
            for s in 0..SEAT {
                if s == winner {
                    continue;
                }
                let share = if winner != dealer && s == dealer {
                    points.2
                } else {
                    points.1
                };
                let pay = share + 100 * honba;
                deltas[s] -= pay;
                deltas[winner] += pay;
            }
        }
    }
    deltas[winner] += 1000 * riichi_sticks as Point;

    Ok(deltas)
}

// 流局時の聴牌料 (不聴罰符3000点を聴牌者で分配)
pub fn calc_draw_payments(tenpai: &[bool; SEAT]) -> [Point; SEAT] {
    let n = tenpai.iter().filter(|&&b| b).count();
    let mut deltas = [0; SEAT];
    if n == 0 || n == SEAT {
        return deltas;
    }

    let recv = 3000 / n as Point;
    let pay = 3000 / (SEAT - n) as Point;
    for s in 0..SEAT {
        deltas[s] = if tenpai[s] { recv } else { -pay };
    }
    deltas
}
