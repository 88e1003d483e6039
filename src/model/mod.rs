// 麻雀のデータモデル
mod define;
mod hand;
mod meld;
mod rule;
mod table;
mod tile;
mod win_context;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use define::*;
pub use hand::*;
pub use meld::*;
pub use rule::*;
pub use table::*;
pub use tile::*;
pub use win_context::*;
