use super::*;
use crate::error::{MahjongError, MahjongResult};
use crate::util::string::tiles_to_string;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeldType {
    Chi,
    Pon,
    Minkan,
    Kakan,
    Ankan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meld {
    pub type_: MeldType,
    pub tiles: Vec<Tile>,
    pub from: Option<Seat>, // 鳴いた牌の提供元 (相対位置) 暗槓はNone
}

impl Meld {
    pub fn new(type_: MeldType, mut tiles: Vec<Tile>, from: Option<Seat>) -> Self {
        tiles.sort();
        Self { type_, tiles, from }
    }

    // 暗槓以外は副露
    #[inline]
    pub fn is_open(&self) -> bool {
        self.type_ != MeldType::Ankan
    }

    #[inline]
    pub fn is_kan(&self) -> bool {
        matches!(self.type_, MeldType::Minkan | MeldType::Kakan | MeldType::Ankan)
    }

    // 順子の場合は先頭の牌, 刻子・槓子の場合はその牌 (赤5は通常の5)
    // validate済みの鳴きのみ (tilesが空でないこと)
    #[inline]
    pub fn base_tile(&self) -> Tile {
        self.tiles[0].to_normal()
    }

    // 種類に対して枚数, 形, 提供元が正しいかどうか
    pub fn validate(&self) -> MahjongResult<()> {
        let n = if self.is_kan() { 4 } else { 3 };
        if self.tiles.len() != n {
            return Err(self.invalid(format!("{:?} must have {} tiles", self.type_, n)));
        }
        if let Some(t) = self.tiles.iter().find(|t| !t.is_valid()) {
            return Err(self.invalid(format!("invalid tile: {:?}", t)));
        }

        let ok = match self.type_ {
            MeldType::Chi => is_run(&self.tiles),
            _ => is_same(&self.tiles),
        };
        if !ok {
            return Err(self.invalid(format!("tiles do not form {:?}", self.type_)));
        }

        match (self.type_, self.from) {
            (MeldType::Ankan, None) => Ok(()),
            (MeldType::Chi, Some(3)) => Ok(()),
            (MeldType::Pon | MeldType::Minkan | MeldType::Kakan, Some(1..=3)) => Ok(()),
            (_, from) => Err(self.invalid(format!("invalid from: {:?}", from))),
        }
    }

    fn invalid(&self, message: String) -> MahjongError {
        MahjongError::InvalidMeld {
            meld: format!("{:?} {}", self.type_, tiles_to_string(&self.tiles)),
            message,
        }
    }
}

// 同じ牌のみ (赤5は通常の5と同じ)
pub fn is_same(tiles: &[Tile]) -> bool {
    match tiles.first() {
        Some(t0) => tiles.iter().all(|t| t == t0),
        None => false,
    }
}

// 同じ数牌の連続する3枚
pub fn is_run(tiles: &[Tile]) -> bool {
    if tiles.len() != 3 || !tiles[0].is_suit() || tiles.iter().any(|t| t.0 != tiles[0].0) {
        return false;
    }
    let mut nis: Vec<Tnum> = tiles.iter().map(|t| t.n()).collect();
    nis.sort_unstable();
    nis.windows(2).all(|w| w[0] + 1 == w[1])
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", tiles_to_string(&self.tiles))?;
        if let Some(from) = self.from {
            write!(f, "({})", from)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(ni: Tnum) -> Tile {
        Tile(TM, ni)
    }

    #[test]
    fn test_validate() {
        assert!(Meld::new(MeldType::Chi, vec![m(3), m(0), m(4)], Some(3)).validate().is_ok());
        assert!(Meld::new(MeldType::Pon, vec![m(5), m(0), m(5)], Some(1)).validate().is_ok());
        assert!(Meld::new(MeldType::Ankan, vec![m(9); 4], None).validate().is_ok());
        assert!(Meld::new(MeldType::Kakan, vec![m(9); 4], Some(2)).validate().is_ok());

        // 形
        assert!(Meld::new(MeldType::Chi, vec![m(1), m(5), m(9)], Some(3)).validate().is_err());
        assert!(Meld::new(MeldType::Chi, vec![Tile(TZ, 1), Tile(TZ, 2), Tile(TZ, 3)], Some(3))
            .validate()
            .is_err());
        assert!(Meld::new(MeldType::Chi, vec![m(1), Tile(TP, 2), m(3)], Some(3)).validate().is_err());
        assert!(Meld::new(MeldType::Pon, vec![m(1), m(1), m(2)], Some(1)).validate().is_err());

        // 枚数
        assert!(Meld::new(MeldType::Pon, vec![], Some(1)).validate().is_err());
        assert!(Meld::new(MeldType::Pon, vec![m(1); 4], Some(1)).validate().is_err());
        assert!(Meld::new(MeldType::Minkan, vec![m(1); 3], Some(1)).validate().is_err());

        // 提供元
        assert!(Meld::new(MeldType::Ankan, vec![m(9); 4], Some(1)).validate().is_err());
        assert!(Meld::new(MeldType::Pon, vec![m(9); 3], None).validate().is_err());
        assert!(Meld::new(MeldType::Pon, vec![m(9); 3], Some(0)).validate().is_err());
        assert!(Meld::new(MeldType::Chi, vec![m(1), m(2), m(3)], Some(1)).validate().is_err());
    }

    #[test]
    fn test_is_kan() {
        assert!(Meld::new(MeldType::Kakan, vec![m(9); 4], Some(2)).is_kan());
        assert!(!Meld::new(MeldType::Pon, vec![m(9); 3], Some(2)).is_kan());
    }
}
