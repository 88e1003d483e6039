// 手牌の向聴数,和了判定,役や点数計算を行うモジュール
mod evaluate;
mod parse;
mod point;
mod shanten;
mod shape;
mod win;
mod yaku;

pub use self::{
    evaluate::{count_dora, count_red_five, evaluate_hand},
    parse::{
        decompose, parse_into_chiitoitsu_win, parse_into_kokusimusou_win, parse_into_normal_win,
        parse_melds, Decomposition, ParsedHand, SetPair, SetPairType,
    },
    point::{
        calc_base_point, calc_draw_payments, calc_payout, calc_points, get_score_tier,
        is_baiman, is_haneman, is_kazoe_yakuman, is_mangan, is_sanbaiman, yakuman_fan,
    },
    shanten::{
        calc_chiitoitsu_shanten, calc_kokushimusou_shanten, calc_normal_shanten, calc_shanten,
    },
    shape::{calc_hand_shapes, HandShape},
    win::{
        calc_discards_to_chiitoitsu_tenpai, calc_discards_to_kokushimusou_tenpai,
        calc_discards_to_normal_tenpai, calc_discards_to_tenpai_all, calc_tiles_to_chiitoitsu_win,
        calc_tiles_to_kokushimusou_win, calc_tiles_to_normal_win, calc_tiles_to_win, end_tiles,
        is_chiitoitsu_win, is_kokushimusou_win, is_normal_win, is_win,
    },
    yaku::{find_yaku, Yaku, YakuContext, YakuFlags},
};
