//! # treap-bimap
//!
//! An in-memory ordered bidirectional map.
//!
//! A [`Bimap`] holds unique `(left, right)` pairs and keeps both sides sorted,
//! each under its own ordering relation. Either side can be searched,
//! iterated and edited, and a lookup on one side yields the partner key in
//! constant time.
//!
//! ## Overview
//!
//! - **Bimap**: the container, with cursor, iterator and keyed APIs per side.
//! - **Cursors**: [`Cursor`] handles that survive unrelated mutations and
//!   [`flip`](Cursor::flip) between sides in O(1).
//! - **Orders**: [`order::Natural`], [`order::Reverse`] and
//!   [`order::OrderBy`] for custom comparison functions.
//! - **Treaps**: the [`treap`] module exposes the intrusive randomized search
//!   tree both sides are built on.
//!
//! Every pair lives in exactly one record. That record is a node of the left
//! tree and of the right tree simultaneously, through two independent links
//! blocks; both trees share one sentinel record as their end position.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Bimap`] as a sequence of pairs
//!
//! ## Example
//!
//! ```rust
//! use treap_bimap::prelude::*;
//!
//! let mut ports: Bimap<&str, u16> = Bimap::new();
//! ports.insert("http", 80);
//! ports.insert("https", 443);
//! ports.insert("ssh", 22);
//!
//! assert_eq!(ports.at_left(&"https"), Ok(&443));
//! assert_eq!(ports.at_right(&22), Ok(&"ssh"));
//!
//! let by_port: Vec<u16> = ports.right_values().copied().collect();
//! assert_eq!(by_port, vec![22, 80, 443]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use treap_bimap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bimap::{Bimap, BimapConfig, Cursor, Left, LeftCursor, Right, RightCursor, Side};
    pub use crate::error::BimapError;
    pub use crate::order::{Natural, Order, OrderBy, Reverse};
}

mod bimap;
pub mod error;
pub mod order;
pub mod treap;

pub use bimap::{
    Bimap, BimapConfig, Cursor, IntoIter, Iter, Keys, Left, LeftCursor, Range, Right, RightCursor,
    SEED_VARIABLE, Side,
};
pub use error::{BimapError, ConfigError};
