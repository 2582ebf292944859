//! Memory-layout and pool-scoped byte storage (spec.md §3, §4.2).

use std::collections::HashMap;

/// Byte order of a [`State`](crate::state::State)'s memory layout.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Endianness {
    Little,
    Big,
}

/// Alignment/endianness/pointer width fixed per [`State`](crate::state::State)
/// and applied to every pointer dereference (spec.md §3).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MemoryLayout {
    pub alignment: u64,
    pub endianness: Endianness,
    pub pointer_width: u8,
}

impl Default for MemoryLayout {
    fn default() -> Self {
        MemoryLayout {
            alignment: 8,
            endianness: Endianness::Little,
            pointer_width: 64,
        }
    }
}

/// Identifies one pool-scoped byte buffer (e.g. the observation blob pool,
/// or a mapped memory object's shadow copy).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct PoolId(pub u64);

/// Pool-scoped byte storage. `Reads`/`Writes` observations are applied
/// against the pool they reference before/after `mutate` runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryPools {
    pools: HashMap<PoolId, Vec<u8>>,
}

impl MemoryPools {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(&self, id: PoolId) -> Option<&[u8]> {
        self.pools.get(&id).map(Vec::as_slice)
    }

    pub fn pool_mut(&mut self, id: PoolId) -> &mut Vec<u8> {
        self.pools.entry(id).or_default()
    }

    pub fn write(&mut self, id: PoolId, offset: usize, bytes: &[u8]) {
        let pool = self.pool_mut(id);
        let end = offset + bytes.len();
        if pool.len() < end {
            pool.resize(end, 0);
        }
        pool[offset..end].copy_from_slice(bytes);
    }
}
