/// Stable identifier of a marker within its `World`.
///
/// Ids are dense: the n-th spawned marker has index n.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u32);

impl MarkerId {
    pub fn index(&self) -> u32 {
        self.0
    }
}
