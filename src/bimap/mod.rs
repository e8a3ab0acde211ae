//! The ordered bidirectional map and its companions.
//!
//! - [`Bimap`]: the container.
//! - [`Cursor`]: a handle to one pair, viewed from one [`Side`].
//! - [`Iter`], [`Range`], [`Keys`], [`IntoIter`]: iterators in either side's
//!   order.
//! - [`BimapConfig`]: orders and priority seed.

mod config;
mod cursor;
mod iter;
mod map;
mod record;
mod side;

pub use config::{BimapConfig, SEED_VARIABLE};
pub use cursor::{Cursor, LeftCursor, RightCursor};
pub use iter::{IntoIter, Iter, Keys, Range};
pub use map::Bimap;
pub use side::{Left, Right, Side};
