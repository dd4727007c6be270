//! Eastmoney public quote API: A-share and sector daily bars, index and
//! board spot quotes.

pub mod provider;
pub mod quotes;
pub mod response;

pub use provider::{secid, EastmoneyProvider, DEFAULT_BASE_URL};
pub use quotes::{is_board_code, EastmoneyQuoteProvider, DEFAULT_QUOTE_BASE_URL};
