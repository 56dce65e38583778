mod arena;
mod handle;
mod node;
mod raw_osavl_multiset;

pub(crate) use arena::Arena;
pub(crate) use handle::Handle;
pub(crate) use node::Node;
pub(crate) use raw_osavl_multiset::RawOSAvlMultiset;
