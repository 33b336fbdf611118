//! Group error types.

/// Errors surfaced by the runtime-checked parts of the group API.
///
/// Typed and positional access on [`ComponentGroup`](crate::ComponentGroup)
/// cannot fail: a missing type or an out-of-range position does not compile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GroupError {
    /// The requested component type is not part of the group.
    #[error("component `{name}` is not part of this group")]
    MissingComponent {
        /// Name of the requested component type.
        name: &'static str,
    },

    /// A null pointer was supplied when building a group from raw pointers.
    #[error("null pointer supplied for component `{name}` at position {position}")]
    NullPointer {
        /// Position of the offending pointer in the component list.
        position: usize,
        /// Name of the component type declared at that position.
        name: &'static str,
    },
}
