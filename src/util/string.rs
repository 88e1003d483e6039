use crate::error::{MahjongError, MahjongResult};
use crate::model::*;

pub fn tile_type_from_char(ch: char) -> Result<Type, String> {
    match ch {
        'm' => Ok(TM),
        's' => Ok(TS),
        'p' => Ok(TP),
        'z' => Ok(TZ),
        _ => Err(format!("invalid tile type char: {ch}")),
    }
}

pub fn tile_type_to_char(ti: Type) -> char {
    match ti {
        TM => 'm',
        TS => 's',
        TP => 'p',
        TZ => 'z',
        _ => '?',
    }
}

pub fn tile_number_from_char(ch: char) -> Result<Tnum, String> {
    if let Some(i) = ch.to_digit(10) {
        Ok(i as Tnum)
    } else {
        Err(format!("invalid tile number char: {ch}"))
    }
}

// "m123p0567z11" のような表記を牌のリストに変換
pub fn tiles_from_string(exp: &str) -> MahjongResult<Vec<Tile>> {
    let mut tiles = vec![];
    let mut ti = None;
    for ch in exp.chars() {
        match ch {
            'm' | 's' | 'p' | 'z' => {
                ti = Some(tile_type_from_char(ch).map_err(|m| MahjongError::parse(exp, m))?)
            }
            '0'..='9' => {
                let ti = ti.ok_or_else(|| MahjongError::parse(exp, "tile number before tile type"))?;
                let ni = tile_number_from_char(ch).map_err(|m| MahjongError::parse(exp, m))?;
                let t = Tile(ti, ni);
                if !t.is_valid() {
                    return Err(MahjongError::parse(exp, format!("invalid tile: {t}")));
                }
                tiles.push(t);
            }
            ' ' => {}
            _ => return Err(MahjongError::parse(exp, format!("invalid char: '{ch}'"))),
        }
    }
    Ok(tiles)
}

pub fn tiles_to_string(tiles: &[Tile]) -> String {
    let mut res = String::new();
    let mut last_ti = None;
    for t in tiles {
        if last_ti != Some(t.0) {
            last_ti = Some(t.0);
            res.push(tile_type_to_char(t.0));
        }
        res.push_str(&t.1.to_string());
    }
    res
}

// 副露の表記 "p5+55": 鳴いた牌に'+'を付与. 付与した牌の位置(1~3)が提供元の相対位置.
// 4枚で'+'の無いものは暗槓, "s5555+" の様に4枚目に'+'を付与したものは加槓.
pub fn meld_from_string(exp: &str) -> MahjongResult<Meld> {
    let tiles = tiles_from_string(&exp.replace('+', ""))?;
    if tiles.len() != 3 && tiles.len() != 4 {
        return Err(MahjongError::parse(exp, "meld must have 3 or 4 tiles"));
    }
    let mut from = None;
    let mut n = 0;
    for ch in exp.chars() {
        match ch {
            '0'..='9' => n += 1,
            '+' => {
                if n == 0 {
                    return Err(MahjongError::parse(exp, "invalid '+' position"));
                }
                from = Some(n);
            }
            _ => {}
        }
    }

    let same = is_same(&tiles);
    let seq = is_run(&tiles);

    let type_ = match (tiles.len(), from) {
        (3, Some(_)) if seq => MeldType::Chi,
        (3, Some(_)) if same => MeldType::Pon,
        (4, None) if same => MeldType::Ankan,
        (4, Some(4)) if same => MeldType::Kakan,
        (4, Some(_)) if same => MeldType::Minkan,
        _ => return Err(MahjongError::parse(exp, "invalid meld")),
    };

    // 加槓は元のポンの提供元が不明なので上家扱い
    let from = match (type_, from) {
        (MeldType::Kakan, _) => Some(3),
        (MeldType::Chi, _) => Some(3),
        (_, f) => f,
    };

    let m = Meld::new(type_, tiles, from);
    m.validate()?;
    Ok(m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiles_from_string() {
        let tiles = tiles_from_string("m123p0z77").unwrap();
        assert_eq!(
            tiles,
            vec![
                Tile(TM, 1),
                Tile(TM, 2),
                Tile(TM, 3),
                Tile(TP, 0),
                Tile(TZ, DR),
                Tile(TZ, DR)
            ]
        );
        assert_eq!(tiles_to_string(&tiles), "m123p0z77");
        assert!(tiles_from_string("123").is_err());
        assert!(tiles_from_string("z8").is_err());
        assert!(tiles_from_string("m1x").is_err());
    }

    #[test]
    fn test_meld_from_string() {
        let m = meld_from_string("p5+55").unwrap();
        assert_eq!(m.type_, MeldType::Pon);
        assert_eq!(m.from, Some(1));

        let m = meld_from_string("s3+45").unwrap();
        assert_eq!(m.type_, MeldType::Chi);

        let m = meld_from_string("z1111").unwrap();
        assert_eq!(m.type_, MeldType::Ankan);
        assert_eq!(m.from, None);

        let m = meld_from_string("m99+99").unwrap();
        assert_eq!(m.type_, MeldType::Minkan);
        assert_eq!(m.from, Some(2));

        let m = meld_from_string("m0555+").unwrap();
        assert_eq!(m.type_, MeldType::Kakan);

        assert!(meld_from_string("m124+").is_err());
        assert!(meld_from_string("z123+").is_err());
        assert!(meld_from_string("m111").is_err());
    }
}
