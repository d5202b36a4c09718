mod arena;
mod node;
mod raw_osrbtree_map;

pub(crate) use arena::{Arena, Handle};
pub(crate) use node::{Node, Side};
pub(crate) use raw_osrbtree_map::{RawOSRBTreeMap, SearchResult};
