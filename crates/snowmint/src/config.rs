use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::{BitLayout, CUSTOM_EPOCH, Error, Node, Result};

/// A declarative description of a [`Node`].
///
/// Meant to be embedded in the host process's own configuration (TOML, env,
/// JSON...). Missing fields fall back to [`NodeConfig::default`]: node 0, the
/// Twitter 41/10/12 layout and [`CUSTOM_EPOCH`].
///
/// # Example
///
/// ```
/// use snowmint::NodeConfig;
///
/// let config = NodeConfig {
///     node_id: 12,
///     ..NodeConfig::default()
/// };
/// let node = config.build().unwrap();
/// assert_eq!(node.node_id(), 12);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct NodeConfig {
    /// This node's identity. Must be unique among live nodes.
    pub node_id: u64,
    /// Epoch as milliseconds since 1970-01-01 UTC.
    pub epoch_millis: u64,
    pub timestamp_bits: u8,
    pub node_bits: u8,
    pub sequence_bits: u8,
}

impl Default for NodeConfig {
    fn default() -> Self {
        let layout = BitLayout::TWITTER;
        Self {
            node_id: 0,
            epoch_millis: CUSTOM_EPOCH.as_millis() as u64,
            timestamp_bits: layout.timestamp_bits(),
            node_bits: layout.node_bits(),
            sequence_bits: layout.sequence_bits(),
        }
    }
}

impl NodeConfig {
    /// The configured epoch as a [`SystemTime`].
    pub fn epoch(&self) -> Option<SystemTime> {
        UNIX_EPOCH.checked_add(Duration::from_millis(self.epoch_millis))
    }

    /// Validates the configured widths.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BitWidthOverflow`] unless the widths sum to 63.
    pub fn layout(&self) -> Result<BitLayout> {
        BitLayout::new(self.timestamp_bits, self.node_bits, self.sequence_bits)
    }

    /// Builds the node, validating in the same order as [`Node::new`].
    ///
    /// # Errors
    ///
    /// [`Error::BitWidthOverflow`], [`Error::NodeOverflow`] or
    /// [`Error::EpochAhead`].
    pub fn build(&self) -> Result<Node> {
        self.layout()?;
        let epoch = self.epoch().ok_or_else(|| Error::EpochAhead {
            ahead_by: ahead_of_now(self.epoch_millis),
        })?;
        Node::new(
            self.node_id,
            epoch,
            self.timestamp_bits,
            self.node_bits,
            self.sequence_bits,
        )
    }
}

/// Distance from the current system time to `epoch_millis` past the Unix
/// epoch, zero if that instant has already passed.
fn ahead_of_now(epoch_millis: u64) -> Duration {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO);
    Duration::from_millis(epoch_millis).saturating_sub(now)
}
