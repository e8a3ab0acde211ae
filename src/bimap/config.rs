//! Construction-time configuration of a [`Bimap`](crate::Bimap).

use std::env::{self, VarError};

use crate::error::ConfigError;
use crate::order::Natural;
use crate::treap::Seed;

/// Environment variable holding a fixed priority seed.
pub const SEED_VARIABLE: &str = "BIMAP_PRIORITY_SEED";

/// The orders of both sides and the seed of the priority source.
///
/// Everything here is fixed for the lifetime of the map built from it.
///
/// # Examples
///
/// ```rust
/// use treap_bimap::{Bimap, BimapConfig};
/// use treap_bimap::order::{Natural, Reverse};
/// use treap_bimap::treap::Seed;
///
/// let config = BimapConfig::new(Natural, Reverse).with_seed(Seed::Fixed(42));
/// let mut map = Bimap::with_config(config);
/// map.insert(1, 'a');
/// map.insert(2, 'b');
///
/// let rights: Vec<char> = map.right_values().copied().collect();
/// assert_eq!(rights, vec!['b', 'a']);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BimapConfig<LO = Natural, RO = Natural> {
    /// Order of the left side.
    pub left_order: LO,
    /// Order of the right side.
    pub right_order: RO,
    /// Seed of the node priorities.
    pub seed: Seed,
}

impl<LO, RO> BimapConfig<LO, RO> {
    /// Creates a configuration with the given orders and an entropy seed.
    pub const fn new(left_order: LO, right_order: RO) -> Self {
        Self {
            left_order,
            right_order,
            seed: Seed::Entropy,
        }
    }

    /// Replaces the seed.
    #[must_use]
    pub fn with_seed(self, seed: Seed) -> Self {
        Self { seed, ..self }
    }

    /// Creates a configuration with default orders and the seed read from
    /// `BIMAP_PRIORITY_SEED`.
    ///
    /// An unset variable selects [`Seed::Entropy`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSeed`] if the variable is not a decimal
    /// `u64` and [`ConfigError::NotUnicode`] if it is not valid unicode.
    pub fn from_env() -> Result<Self, ConfigError>
    where
        LO: Default,
        RO: Default,
    {
        let seed = match env::var(SEED_VARIABLE) {
            Ok(value) => parse_seed(&value)?,
            Err(VarError::NotPresent) => Seed::Entropy,
            Err(VarError::NotUnicode(_)) => {
                return Err(ConfigError::NotUnicode {
                    variable: SEED_VARIABLE,
                });
            }
        };
        Ok(Self::default().with_seed(seed))
    }
}

fn parse_seed(value: &str) -> Result<Seed, ConfigError> {
    let seed = value
        .trim()
        .parse::<u64>()
        .map_err(|error| ConfigError::InvalidSeed {
            variable: SEED_VARIABLE,
            value: value.to_string(),
            message: error.to_string(),
        })?;
    tracing::info!(seed = seed, "Using deterministic treap priorities");
    Ok(Seed::Fixed(seed))
}
