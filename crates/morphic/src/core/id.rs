use slotmap::new_key_type;

new_key_type! {
    /// Opaque identifier for a morph stored in the Core arena.
    pub struct NodeId;
}

/// Identifier of a running animation.
///
/// Ids are allocated from a per-world counter and never reused, so a stale
/// id held by a completion callback can not address a newer animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(pub(crate) u64);
