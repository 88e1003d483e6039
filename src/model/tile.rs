use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{de, ser};

use super::*;
use crate::error::{MahjongError, MahjongResult};
use crate::util::string::{tile_number_from_char, tile_type_from_char, tile_type_to_char};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Characters,
    Bamboo,
    Circles,
    Wind,
    Dragon,
}

// (type index, number index)
// 赤5(Tnum=0)は通常の5と等価として扱う. 区別が必要な場合はis_red_fiveを使用すること.
#[derive(Clone, Copy)]
pub struct Tile(pub Type, pub Tnum);

impl Tile {
    pub fn from_symbol(s: &str) -> MahjongResult<Self> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(MahjongError::parse(s, "tile symbol must be 2 chars"));
        }
        let t = tile_type_from_char(chars[0]).map_err(|m| MahjongError::parse(s, m))?;
        let n = tile_number_from_char(chars[1]).map_err(|m| MahjongError::parse(s, m))?;
        let tile = Self(t, n);
        if !tile.is_valid() {
            return Err(MahjongError::parse(s, "tile out of range"));
        }
        Ok(tile)
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        match self.0 {
            TM | TS | TP => self.1 < TNUM,
            TZ => WE <= self.1 && self.1 <= DR,
            _ => false,
        }
    }

    // 赤5の場合,通常の5を返却. それ以外の場合はコピーをそのまま返却.
    #[inline]
    pub fn to_normal(self) -> Self {
        if self.1 == 0 {
            Self(self.0, 5)
        } else {
            self
        }
    }

    // 正規化した数字部分 (赤5は5)
    #[inline]
    pub fn n(&self) -> Tnum {
        if self.1 == 0 {
            5
        } else {
            self.1
        }
    }

    #[inline]
    pub fn is_red_five(&self) -> bool {
        self.0 != TZ && self.1 == 0
    }

    pub fn suit(&self) -> Suit {
        match self.0 {
            TM => Suit::Characters,
            TS => Suit::Bamboo,
            TP => Suit::Circles,
            _ => {
                if self.is_wind() {
                    Suit::Wind
                } else {
                    Suit::Dragon
                }
            }
        }
    }

    // 数牌のみ数字を持つ
    pub fn rank(&self) -> Option<u8> {
        if self.is_suit() {
            Some(self.n() as u8)
        } else {
            None
        }
    }

    // ドラ表示牌に対するドラ
    pub fn next(&self) -> Self {
        let ni = if self.is_hornor() {
            match self.1 {
                WN => WE,
                DR => DW,
                i => i + 1,
            }
        } else {
            match self.n() {
                9 => 1,
                i => i + 1,
            }
        };
        Self(self.0, ni)
    }

    // 数牌
    #[inline]
    pub fn is_suit(&self) -> bool {
        self.0 != TZ
    }

    // 字牌
    #[inline]
    pub fn is_hornor(&self) -> bool {
        self.0 == TZ
    }

    // 么九牌
    #[inline]
    pub fn is_end(&self) -> bool {
        self.0 == TZ || self.1 == 1 || self.1 == 9
    }

    // 風牌
    #[inline]
    pub fn is_wind(&self) -> bool {
        self.0 == TZ && self.1 <= WN
    }

    // 三元牌
    #[inline]
    pub fn is_doragon(&self) -> bool {
        self.0 == TZ && DW <= self.1 && self.1 <= DR
    }

    // 136枚の牌一式 (赤5有りの場合は各色の5の内1枚が赤5)
    pub fn full_set(use_red_fives: bool) -> Vec<Tile> {
        let mut tiles = vec![];
        for ti in 0..TYPE {
            let max = if ti == TZ { DR } else { 9 };
            for ni in 1..=max {
                for c in 0..TILE {
                    if use_red_fives && ti != TZ && ni == 5 && c == 0 {
                        tiles.push(Tile(ti, 0));
                    } else {
                        tiles.push(Tile(ti, ni));
                    }
                }
            }
        }
        tiles
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.n() == other.n()
    }
}

impl Eq for Tile {}

impl Hash for Tile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
        self.n().hash(state);
    }
}

impl PartialOrd for Tile {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// 種別(萬子<索子<筒子<字牌)を優先し,同種別内は数字の昇順. 字牌は風牌(東南西北)<三元牌(白發中).
impl Ord for Tile {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0).then(self.n().cmp(&other.n()))
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", tile_type_to_char(self.0), self.1)
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl FromStr for Tile {
    type Err = MahjongError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tile::from_symbol(s)
    }
}

impl ser::Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct TileVisitor;

impl<'de> de::Visitor<'de> for TileVisitor {
    type Value = Tile;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("tile symbol")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Tile::from_symbol(v).map_err(E::custom)
    }
}

impl<'de> de::Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(TileVisitor)
    }
}

// [TileTable]
// [ti][0]は赤5の枚数 (赤5は[ti][5]にも含まれる)
pub type TileRow = [usize; TNUM];
pub type TileTable = [TileRow; TYPE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_order() {
        let mut tiles = vec![
            Tile(TZ, DW),
            Tile(TP, 1),
            Tile(TZ, WN),
            Tile(TS, 9),
            Tile(TM, 3),
        ];
        tiles.sort();
        assert_eq!(
            tiles,
            vec![
                Tile(TM, 3),
                Tile(TS, 9),
                Tile(TP, 1),
                Tile(TZ, WN),
                Tile(TZ, DW)
            ]
        );
        assert_eq!(Tile(TZ, WE).suit(), Suit::Wind);
        assert_eq!(Tile(TZ, DR).suit(), Suit::Dragon);
        assert!(Suit::Characters < Suit::Bamboo && Suit::Circles < Suit::Wind);
    }

    #[test]
    fn test_red_five() {
        let red = Tile(TP, 0);
        assert_eq!(red, Tile(TP, 5));
        assert!(red.is_red_five());
        assert!(!Tile(TP, 5).is_red_five());
        assert_eq!(red.rank(), Some(5));
        assert_eq!(Tile(TZ, WE).rank(), None);
        assert_eq!(red.to_string(), "p0");
    }

    #[test]
    fn test_next() {
        assert_eq!(Tile(TM, 9).next(), Tile(TM, 1));
        assert_eq!(Tile(TS, 0).next(), Tile(TS, 6));
        assert_eq!(Tile(TZ, WN).next(), Tile(TZ, WE));
        assert_eq!(Tile(TZ, WS).next(), Tile(TZ, WW));
        assert_eq!(Tile(TZ, DR).next(), Tile(TZ, DW));
        assert_eq!(Tile(TZ, DW).next(), Tile(TZ, DG));
    }

    #[test]
    fn test_symbol() {
        assert_eq!(Tile::from_symbol("s7").unwrap(), Tile(TS, 7));
        assert!(Tile::from_symbol("z8").is_err());
        assert!(Tile::from_symbol("x1").is_err());
        assert!(Tile::from_symbol("m").is_err());

        let json = serde_json::to_string(&vec![Tile(TM, 0), Tile(TZ, DG)]).unwrap();
        assert_eq!(json, r#"["m0","z6"]"#);
        let tiles: Vec<Tile> = serde_json::from_str(&json).unwrap();
        assert!(tiles[0].is_red_five());
    }

    #[test]
    fn test_full_set() {
        let tiles = Tile::full_set(true);
        assert_eq!(tiles.len(), 136);
        assert_eq!(tiles.iter().filter(|t| t.is_red_five()).count(), 3);
        assert_eq!(Tile::full_set(false).iter().filter(|t| t.is_red_five()).count(), 0);
    }
}
