//! Domain layer - Memo model and date logic

pub mod date;
pub mod humanize;
pub mod memo;

pub use date::{canonical, parse_canonical, parse_user_date, ParseError};
pub use humanize::{humanize, humanize_date, try_humanize};
pub use memo::{Memo, MemoId, MEMO_KIND};
