use std::fmt;

use crate::model::*;

use super::parse::{ParsedHand, SetPair, SetPairType};
use super::shape::HandShape;

use SetPairType::*;

#[derive(Debug)]
pub struct YakuContext {
    hand: TileTable,          // 和了牌を含む手牌(鳴きは含まない) 国士, 九蓮宝燈の判定などに使用
    parsed_hand: ParsedHand,  // 鳴きを含むすべての面子
    pair_tile: Option<Tile>,  // 雀頭の牌 (七対子,国士無双はNone)
    winning_tile: Tile,       // 和了牌
    wait: Wait,               // 待ちの形
    ron_triplet: Option<Index>, // ロンで完成した刻子 (明刻扱い)
    is_self_drawn: bool,      // ツモ和了
    is_open: bool,            // 鳴きの有無
    prevalent_wind: Tnum,     // 場風 (東: 1, 南: 2, 西: 3, 北: 4)
    seat_wind: Tnum,          // 自風 (同上)
    yaku_flags: YakuFlags,    // 組み合わせ以外による役 外部から設定を行う
    counts: Counts,           // 面子や牌種別のカウント
    iipeikou_count: usize,    // 一盃口, 二盃口用
    yakuhai_check: TileRow,   // 字牌の刻子のカウント(雀頭は含まない)
    rule: Rule,               // 喰いタン, ダブル役満の有無
}

impl YakuContext {
    pub fn new(
        shape: &HandShape,
        prevalent_wind: Tnum,
        seat_wind: Tnum,
        yaku_flags: YakuFlags,
        rule: Rule,
    ) -> Self {
        let parsed_hand = shape.parsed_hand.clone();
        let counts = count_type(shape);
        let iipeikou_count = count_iipeikou(&parsed_hand);
        let yakuhai_check = check_yakuhai(&parsed_hand);

        Self {
            hand: shape.hand,
            parsed_hand,
            pair_tile: shape.pair(),
            winning_tile: shape.winning_tile,
            wait: shape.wait(),
            ron_triplet: (0..shape.parsed_hand.len()).find(|&i| shape.is_ron_triplet(i)),
            is_self_drawn: shape.win_type == WinType::Tsumo,
            is_open: shape.is_open,
            prevalent_wind,
            seat_wind,
            yaku_flags,
            counts,
            iipeikou_count,
            yakuhai_check,
            rule,
        }
    }

    // (役一覧, 役満倍率, 翻数)を返却
    // 役満が含まれている場合は役満のみを返却し翻数は0
    pub fn calc_yaku(&self) -> (Vec<&'static Yaku>, usize, usize) {
        let mut yaku = vec![];
        for y in YAKU_LIST {
            if self.is_open && y.fan_open == 0 {
                continue; // 門前限定
            }
            if (y.func)(self) {
                yaku.push(y)
            }
        }

        let yakuman: Vec<&'static Yaku> = yaku.iter().copied().filter(|y| y.is_yakuman()).collect();
        if !yakuman.is_empty() {
            let times: usize = yakuman
                .iter()
                .map(|y| {
                    if self.rule.double_yakuman {
                        y.fan_close - 12
                    } else {
                        1
                    }
                })
                .sum();
            (yakuman, times, 0)
        } else {
            let fan: usize = yaku.iter().map(|y| y.fan(self.is_open)).sum();
            (yaku, 0, fan)
        }
    }

    pub fn calc_fu(&self) -> usize {
        if self.is_self_drawn && is_pinfu(self) {
            return 20;
        }
        if is_chiitoitsu(self) {
            return 25;
        }

        // 副底
        let mut fu: usize = 20;

        // 和了り方
        fu += if self.is_self_drawn {
            2 // ツモ
        } else if !self.is_open {
            10 // 門前ロン
        } else {
            0
        };

        // 面子 刻子を基準に么九牌,暗刻,槓子でそれぞれ倍
        for (i, SetPair(tp, t)) in self.parsed_hand.iter().enumerate() {
            let (is_concealed, is_kan) = match tp {
                Koutsu => (!self.is_ron_triplet(i), false),
                Pon => (false, false),
                Minkan => (false, true),
                Ankan => (true, true),
                _ => continue,
            };
            let mut f = 2;
            if t.is_end() {
                f *= 2;
            }
            if is_concealed {
                f *= 2;
            }
            if is_kan {
                f *= 4;
            }
            fu += f;
        }

        // 雀頭
        if let Some(pt) = self.pair_tile {
            if self.is_yakuhai_tile(pt) {
                fu += 2;
            }
        }

        // 待ちの形 (嵌張,辺張,単騎)
        if !matches!(self.wait, Wait::Ryanmen | Wait::Shanpon) {
            fu += 2;
        }

        // １の位は切り上げ
        ((fu + 9) / 10 * 10).max(30)
    }

    fn is_ron_triplet(&self, i: Index) -> bool {
        self.ron_triplet == Some(i)
    }

    fn is_yakuhai_tile(&self, t: Tile) -> bool {
        t.is_doragon() || (t.is_wind() && (t.1 == self.prevalent_wind || t.1 == self.seat_wind))
    }
}

#[derive(Debug, Default)]
struct Counts {
    pair: usize,
    shuntsu: usize,
    koutsu: usize,
    chi: usize,
    pon: usize,
    minkan: usize,
    ankan: usize,
    shuntsu_total: usize, // shuntu + chi
    koutsu_total: usize,  // koutsu + pon + minkan + ankan
    ankou_total: usize,   // koutsu(ロンで完成したものを除く) + ankan
    kantsu_total: usize,  // minkan + ankan
    tis: [usize; TYPE],   // tile Type Indices counts
}

// 特殊形&特殊条件の役
#[derive(Debug, Default, Clone, Copy)]
pub struct YakuFlags {
    pub menzentsumo: bool,
    pub riichi: bool,
    pub dabururiichi: bool,
    pub ippatsu: bool,
    pub haiteiraoyue: bool,
    pub houteiraoyui: bool,
    pub rinshankaihou: bool,
    pub chankan: bool,
    pub tenhou: bool,
    pub tiihou: bool,
}

fn count_type(shape: &HandShape) -> Counts {
    let mut cnt = Counts::default();
    for (i, SetPair(tp, t)) in shape.parsed_hand.iter().enumerate() {
        match tp {
            Pair => cnt.pair += 1,
            Shuntsu => cnt.shuntsu += 1,
            Koutsu => {
                cnt.koutsu += 1;
                if !shape.is_ron_triplet(i) {
                    cnt.ankou_total += 1;
                }
            }
            Chi => cnt.chi += 1,
            Pon => cnt.pon += 1,
            Minkan => cnt.minkan += 1,
            Ankan => cnt.ankan += 1,
        }
        cnt.tis[t.0] += 1;
    }
    cnt.shuntsu_total = cnt.shuntsu + cnt.chi;
    cnt.koutsu_total = cnt.koutsu + cnt.pon + cnt.minkan + cnt.ankan;
    cnt.ankou_total += cnt.ankan;
    cnt.kantsu_total = cnt.minkan + cnt.ankan;

    cnt
}

// 同じ順子の組の数
fn count_iipeikou(ph: &ParsedHand) -> usize {
    let mut shuntsu = TileTable::default();
    for SetPair(tp, t) in ph {
        if let Shuntsu = tp {
            shuntsu[t.0][t.1] += 1;
        }
    }
    shuntsu.iter().flat_map(|tr| tr.iter()).map(|n| n / 2).sum()
}

fn check_yakuhai(ph: &ParsedHand) -> TileRow {
    let mut tr = TileRow::default();
    for SetPair(tp, t) in ph {
        match tp {
            Koutsu | Pon | Minkan | Ankan => {
                if t.is_hornor() {
                    tr[t.1] += 1;
                }
            }
            _ => {}
        }
    }

    tr
}

pub struct Yaku {
    pub name: &'static str,
    pub func: fn(&YakuContext) -> bool,
    pub fan_close: usize, // 鳴きなしの翻 (13以上は役満, 14はダブル役満)
    pub fan_open: usize,  // 鳴きありの翻(食い下がり) 0は門前限定
}

impl Yaku {
    #[inline]
    pub fn is_yakuman(&self) -> bool {
        self.fan_close >= 13
    }

    #[inline]
    pub fn fan(&self, is_open: bool) -> usize {
        if is_open {
            self.fan_open
        } else {
            self.fan_close
        }
    }
}

impl fmt::Debug for Yaku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.name, self.fan_close, self.fan_open)
    }
}

impl PartialEq for Yaku {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

macro_rules! yaku {
    ($n: expr, $f: expr, $c: expr, $o: expr) => {
        Yaku {
            name: $n,
            func: $f,
            fan_close: $c,
            fan_open: $o,
        }
    };
}

static YAKU_LIST: &[Yaku] = &[
    // 特殊条件
    yaku!("Riichi", is_riichi, 1, 0),
    yaku!("Double Riichi", is_dabururiichi, 2, 0),
    yaku!("Ippatsu", is_ippatsu, 1, 0),
    yaku!("Menzen Tsumo", is_menzentsumo, 1, 0),
    yaku!("Haitei", is_haiteiraoyue, 1, 1),
    yaku!("Houtei", is_houteiraoyui, 1, 1),
    yaku!("Rinshan Kaihou", is_rinshankaihou, 1, 1),
    yaku!("Chankan", is_chankan, 1, 1),
    yaku!("Tenhou", is_tenhou, 13, 0),
    yaku!("Chiihou", is_tiihou, 13, 0),
    // 面子の組み合わせ
    yaku!("Bakaze", is_bakaze, 1, 1),
    yaku!("Jikaze", is_jikaze, 1, 1),
    yaku!("Haku", is_haku, 1, 1),
    yaku!("Hatsu", is_hatsu, 1, 1),
    yaku!("Chun", is_chun, 1, 1),
    yaku!("Tanyao", is_tanyaochuu, 1, 1),
    yaku!("Pinfu", is_pinfu, 1, 0),
    yaku!("Iipeikou", is_iipeikou, 1, 0),
    yaku!("Ryanpeikou", is_ryanpeikou, 3, 0),
    yaku!("Ittsu", is_ikkitsuukan, 2, 1),
    yaku!("Sanshoku Doujun", is_sanshokudoujun, 2, 1),
    yaku!("Sanshoku Doukou", is_sanshokudoukou, 2, 2),
    yaku!("Chanta", is_chanta, 2, 1),
    yaku!("Junchan", is_junchan, 3, 2),
    yaku!("Honroutou", is_honroutou, 2, 2),
    yaku!("Chinroutou", is_chinroutou, 13, 13),
    yaku!("Toitoi", is_toitoihou, 2, 2),
    yaku!("Sanankou", is_sanankou, 2, 2),
    yaku!("Suuankou", is_suuankou, 13, 0),
    yaku!("Suuankou Tanki", is_suuankoutanki, 14, 0),
    yaku!("Sankantsu", is_sankantsu, 2, 2),
    yaku!("Suukantsu", is_suukantsu, 13, 13),
    yaku!("Honitsu", is_honiisou, 3, 2),
    yaku!("Chinitsu", is_chiniisou, 6, 5),
    yaku!("Shousangen", is_shousangen, 2, 2),
    yaku!("Daisangen", is_daisangen, 13, 13),
    yaku!("Shousuushii", is_shousuushii, 13, 13),
    yaku!("Daisuushii", is_daisuushii, 14, 14),
    yaku!("Ryuuiisou", is_ryuuiisou, 13, 13),
    yaku!("Tsuuiisou", is_tuuiisou, 13, 13),
    yaku!("Chuuren Poutou", is_chuurenpoutou, 13, 0),
    yaku!("Junsei Chuuren Poutou", is_junseichuurenpoutou, 14, 0),
    // 特殊な形
    yaku!("Kokushi Musou", is_kokushimusou, 13, 0),
    yaku!("Kokushi Musou 13-sided", is_kokushimusoujuusanmenmachi, 14, 0),
    yaku!("Chiitoitsu", is_chiitoitsu, 2, 0),
];

pub fn find_yaku(name: &str) -> Option<&'static Yaku> {
    YAKU_LIST.iter().find(|y| y.name == name)
}

// 役の優先順位 =================================================================
// * 役満が存在する場合は役満以外の役は削除
// * 以下の役は排他的(包含関係)であり,各判定関数で右側が成立する場合は左側が不成立となる
//     リーチ, ダブルリーチ
//     一盃口, 二盃口
//     チャンタ, 純チャン
//     混老頭, 清老頭
//     混一色, 清一色
//     三暗刻, 四暗刻, 四暗刻単騎
//     三槓子, 四槓子
//     小四喜, 大四喜
//     九蓮宝燈, 純正九蓮宝燈
//     国士無双, 国士無双十三面待ち

// 場風
fn is_bakaze(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[ctx.prevalent_wind] == 1
}

// 自風
fn is_jikaze(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[ctx.seat_wind] == 1
}

// 白
fn is_haku(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[DW] == 1
}

// 發
fn is_hatsu(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[DG] == 1
}

// 中
fn is_chun(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[DR] == 1
}

// 断么九
fn is_tanyaochuu(ctx: &YakuContext) -> bool {
    if ctx.parsed_hand.is_empty() {
        return false; // 国士対策
    }
    if ctx.is_open && !ctx.rule.open_tanyao {
        return false;
    }

    ctx.parsed_hand.iter().all(|SetPair(tp, t)| match tp {
        Chi | Shuntsu => t.1 != 1 && t.1 != 7,
        _ => !t.is_end(),
    })
}

// 平和
fn is_pinfu(ctx: &YakuContext) -> bool {
    if ctx.is_open || ctx.counts.shuntsu != 4 {
        return false;
    }

    match ctx.pair_tile {
        Some(pt) if !ctx.is_yakuhai_tile(pt) => {}
        _ => return false,
    }

    ctx.wait == Wait::Ryanmen
}

// 一盃口
fn is_iipeikou(ctx: &YakuContext) -> bool {
    !ctx.is_open && ctx.iipeikou_count == 1
}

// 二盃口
fn is_ryanpeikou(ctx: &YakuContext) -> bool {
    !ctx.is_open && ctx.iipeikou_count == 2
}

// 一気通貫
fn is_ikkitsuukan(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total < 3 {
        return false;
    }

    let mut f147 = [[false; 3]; TZ];
    for sp in &ctx.parsed_hand {
        let t = sp.1;
        if sp.is_sequence() && (t.1 - 1) % 3 == 0 {
            f147[t.0][t.1 / 3] = true;
        }
    }

    f147.iter().any(|f| f[0] && f[1] && f[2])
}

// 三色同順
fn is_sanshokudoujun(ctx: &YakuContext) -> bool {
    ctx.counts.shuntsu_total >= 3 && has_sanshoku(ctx, SetPair::is_sequence)
}

// 三色同刻
fn is_sanshokudoukou(ctx: &YakuContext) -> bool {
    ctx.counts.koutsu_total >= 3 && has_sanshoku(ctx, SetPair::is_triplet)
}

// チャンタ
fn is_chanta(ctx: &YakuContext) -> bool {
    is_chanta2(ctx) && ctx.counts.tis[TZ] > 0
}

// 純チャン
fn is_junchan(ctx: &YakuContext) -> bool {
    is_chanta2(ctx) && ctx.counts.tis[TZ] == 0
}

// 混老頭
fn is_honroutou(ctx: &YakuContext) -> bool {
    is_routou2(ctx) && ctx.counts.tis[TZ] > 0 && ctx.counts.tis[TZ] < ctx.parsed_hand.len()
}

// 清老頭
fn is_chinroutou(ctx: &YakuContext) -> bool {
    is_routou2(ctx) && ctx.counts.tis[TZ] == 0
}

// 対々和
fn is_toitoihou(ctx: &YakuContext) -> bool {
    ctx.counts.koutsu_total == 4
}

// 三暗刻
fn is_sanankou(ctx: &YakuContext) -> bool {
    ctx.counts.ankou_total == 3
}

// 四暗刻
fn is_suuankou(ctx: &YakuContext) -> bool {
    ctx.counts.ankou_total == 4 && ctx.wait != Wait::Tanki
}

// 四暗刻単騎
fn is_suuankoutanki(ctx: &YakuContext) -> bool {
    ctx.counts.ankou_total == 4 && ctx.wait == Wait::Tanki
}

// 三槓子
fn is_sankantsu(ctx: &YakuContext) -> bool {
    ctx.counts.kantsu_total == 3
}

// 四槓子
fn is_suukantsu(ctx: &YakuContext) -> bool {
    ctx.counts.kantsu_total == 4
}

// 混一色
fn is_honiisou(ctx: &YakuContext) -> bool {
    count_suits(ctx) == 1 && ctx.counts.tis[TZ] > 0
}

// 清一色
fn is_chiniisou(ctx: &YakuContext) -> bool {
    count_suits(ctx) == 1 && ctx.counts.tis[TZ] == 0
}

// 小三元
fn is_shousangen(ctx: &YakuContext) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[DW] + yc[DG] + yc[DR] == 2 && matches!(ctx.pair_tile, Some(t) if t.is_doragon())
}

// 大三元
fn is_daisangen(ctx: &YakuContext) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[DW] + yc[DG] + yc[DR] == 3
}

// 小四喜
fn is_shousuushii(ctx: &YakuContext) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[WE] + yc[WS] + yc[WW] + yc[WN] == 3 && matches!(ctx.pair_tile, Some(t) if t.is_wind())
}

// 大四喜
fn is_daisuushii(ctx: &YakuContext) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[WE] + yc[WS] + yc[WW] + yc[WN] == 4
}

// 緑一色
fn is_ryuuiisou(ctx: &YakuContext) -> bool {
    if ctx.parsed_hand.is_empty() {
        return false;
    }

    ctx.parsed_hand.iter().all(|sp| {
        let t = sp.1;
        if sp.is_sequence() {
            t.0 == TS && t.1 == 2 // 順子は234以外は不可
        } else if t.is_hornor() {
            t.1 == DG
        } else {
            t.0 == TS && matches!(t.1, 2 | 3 | 4 | 6 | 8)
        }
    })
}

// 字一色
fn is_tuuiisou(ctx: &YakuContext) -> bool {
    !ctx.parsed_hand.is_empty() && ctx.counts.tis[TZ] == ctx.parsed_hand.len()
}

// 九蓮宝燈
fn is_chuurenpoutou(ctx: &YakuContext) -> bool {
    let cnt = ctx.hand[ctx.winning_tile.0][ctx.winning_tile.1];
    is_chuurenpoutou2(ctx) && (cnt == 1 || cnt == 3)
}

// 純正九蓮宝燈
fn is_junseichuurenpoutou(ctx: &YakuContext) -> bool {
    let cnt = ctx.hand[ctx.winning_tile.0][ctx.winning_tile.1];
    is_chuurenpoutou2(ctx) && (cnt == 2 || cnt == 4)
}

// 国士無双
fn is_kokushimusou(ctx: &YakuContext) -> bool {
    let wt = &ctx.winning_tile;
    ctx.parsed_hand.is_empty() && ctx.hand[wt.0][wt.1] != 2
}

// 国士無双十三面待ち
fn is_kokushimusoujuusanmenmachi(ctx: &YakuContext) -> bool {
    let wt = &ctx.winning_tile;
    ctx.parsed_hand.is_empty() && ctx.hand[wt.0][wt.1] == 2
}

// 七対子
fn is_chiitoitsu(ctx: &YakuContext) -> bool {
    ctx.parsed_hand.len() == 7 && ctx.counts.pair == 7
}

// 門前自摸
fn is_menzentsumo(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.menzentsumo
}

// リーチ
fn is_riichi(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.riichi && !ctx.yaku_flags.dabururiichi
}

// ダブルリーチ
fn is_dabururiichi(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.dabururiichi
}

// 一発
fn is_ippatsu(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.ippatsu
}

// 海底撈月
fn is_haiteiraoyue(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.haiteiraoyue
}

// 河底撈魚
fn is_houteiraoyui(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.houteiraoyui
}

// 嶺上開花
fn is_rinshankaihou(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.rinshankaihou
}

// 槍槓
fn is_chankan(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.chankan
}

// 天和
fn is_tenhou(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.tenhou
}

// 地和
fn is_tiihou(ctx: &YakuContext) -> bool {
    ctx.yaku_flags.tiihou
}

// 共通処理 ====================================================================

// 数牌の種類数
fn count_suits(ctx: &YakuContext) -> usize {
    let tis = &ctx.counts.tis;
    [TM, TS, TP].iter().filter(|&&ti| tis[ti] > 0).count()
}

// 萬子,索子,筒子で同じ数字の面子(判定関数fを満たすもの)が揃っているか
fn has_sanshoku(ctx: &YakuContext, f: fn(&SetPair) -> bool) -> bool {
    let mut mps = [[false; TZ]; TNUM];
    for sp in &ctx.parsed_hand {
        if f(sp) && sp.1.is_suit() {
            mps[sp.1.1][sp.1.0] = true;
        }
    }
    mps.iter().any(|m| m.iter().all(|&b| b))
}

// チャンタ(純チャンを含む) すべての面子と雀頭に么九牌を含み,順子を含む
fn is_chanta2(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total == 0 || ctx.parsed_hand.is_empty() {
        return false;
    }

    ctx.parsed_hand.iter().all(|sp| {
        if sp.is_sequence() {
            sp.1.1 == 1 || sp.1.1 == 7
        } else {
            sp.1.is_end()
        }
    })
}

// 老頭(混老頭,清老頭) すべての面子と雀頭が么九牌
fn is_routou2(ctx: &YakuContext) -> bool {
    !ctx.parsed_hand.is_empty()
        && ctx.counts.shuntsu_total == 0
        && ctx.parsed_hand.iter().all(|sp| sp.1.is_end())
}

// 九蓮宝燈(純正を含む)
fn is_chuurenpoutou2(ctx: &YakuContext) -> bool {
    if ctx.is_open || ctx.parsed_hand.len() != 5 {
        return false;
    }

    let tis = &ctx.counts.tis;
    let ti = match [TM, TS, TP].iter().find(|&&ti| tis[ti] == 5) {
        Some(&ti) => ti,
        None => return false,
    };

    let h = &ctx.hand;
    h[ti][1] >= 3 && h[ti][9] >= 3 && (2..9).all(|ni| h[ti][ni] > 0)
}
