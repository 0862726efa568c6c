use serde::{Deserialize, Serialize};
use strum::Display;

use crate::error::{DialerError, DialerResult};
use crate::random::IndexSource;

/// Shown after the user backs out of the confirmation dialog.
pub const CANCEL_NOTICE: &str =
    "You chose to cancel, but we submitted anyway. Just kidding, we didn't.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Pool {
    /// Shown after a reset.
    Taunt,
    /// Shown after a rejected submission.
    Excuse,
}

/// The two fixed message pools sampled by reset and submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePools {
    taunts: Vec<String>,
    excuses: Vec<String>,
}

impl MessagePools {
    pub fn new<S: Into<String>>(
        taunts: impl IntoIterator<Item = S>,
        excuses: impl IntoIterator<Item = S>,
    ) -> DialerResult<Self> {
        let pools = Self {
            taunts: taunts.into_iter().map(Into::into).collect(),
            excuses: excuses.into_iter().map(Into::into).collect(),
        };
        pools.validate()?;
        Ok(pools)
    }

    pub(crate) fn validate(&self) -> DialerResult<()> {
        for pool in [Pool::Taunt, Pool::Excuse] {
            if self.pool(pool).is_empty() {
                return Err(DialerError::EmptyPool(pool));
            }
        }
        Ok(())
    }

    pub fn pool(&self, pool: Pool) -> &[String] {
        match pool {
            Pool::Taunt => &self.taunts,
            Pool::Excuse => &self.excuses,
        }
    }

    /// One message from `pool`, chosen by `indices`.
    pub fn draw(&self, pool: Pool, indices: &mut dyn IndexSource) -> &str {
        let messages = self.pool(pool);
        let index = indices.next(messages.len());
        debug_assert!(index < messages.len(), "index source ignored its bound");
        &messages[index % messages.len()]
    }
}
