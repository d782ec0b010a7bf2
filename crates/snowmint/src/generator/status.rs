use crate::Snowflake;

/// The outcome of a non-blocking generation attempt.
///
/// Returned by [`Node::poll_generate`], which never spins. [`Node::generate`]
/// handles the pending case itself by waiting for the next millisecond.
///
/// # Example
///
/// ```
/// use snowmint::{BitLayout, IdGenStatus, Node, TimeSource};
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> i64 {
///         1
///     }
/// }
///
/// // One sequence bit: two IDs per millisecond.
/// let layout = BitLayout::new(61, 1, 1).unwrap();
/// let node = Node::with_time_source(0, layout, FixedTime).unwrap();
///
/// assert!(matches!(node.poll_generate(), IdGenStatus::Ready { .. }));
/// assert!(matches!(node.poll_generate(), IdGenStatus::Ready { .. }));
/// assert_eq!(node.poll_generate(), IdGenStatus::Pending { yield_for: 1 });
/// ```
///
/// [`Node::poll_generate`]: crate::Node::poll_generate
/// [`Node::generate`]: crate::Node::generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGenStatus {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated Snowflake ID.
        id: Snowflake,
    },
    /// The sequence is exhausted for the current millisecond.
    ///
    /// Try again once the clock has moved `yield_for` milliseconds.
    Pending {
        /// Milliseconds to wait before the next attempt.
        yield_for: i64,
    },
}
