//! Two-way mapping between registered resources and container lumps

use std::collections::HashMap;

use lumpcat_formats::LumpId;

use crate::registry::ResourceId;

/// `ResourceId` to `LumpId` mapping, filled once at registration
#[derive(Debug, Clone, Default)]
pub struct ResourceIdMap {
    to_lump: HashMap<ResourceId, LumpId>,
    to_resource: HashMap<LumpId, ResourceId>,
}

impl ResourceIdMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `resource` is served by `lump`
    pub fn insert(&mut self, resource: ResourceId, lump: LumpId) {
        self.to_lump.insert(resource, lump);
        self.to_resource.insert(lump, resource);
    }

    /// Lump serving `resource`
    pub fn lump_id(&self, resource: ResourceId) -> Option<LumpId> {
        self.to_lump.get(&resource).copied()
    }

    /// Resource registered for `lump`
    pub fn resource_id(&self, lump: LumpId) -> Option<ResourceId> {
        self.to_resource.get(&lump).copied()
    }

    /// Registered resources ordered by lump position
    pub fn resource_ids(&self) -> Vec<ResourceId> {
        let mut pairs: Vec<(LumpId, ResourceId)> = self
            .to_resource
            .iter()
            .map(|(&lump, &resource)| (lump, resource))
            .collect();
        pairs.sort_unstable();
        pairs.into_iter().map(|(_, resource)| resource).collect()
    }

    /// Number of mapped resources
    pub fn len(&self) -> usize {
        self.to_lump.len()
    }

    /// Check whether nothing is mapped
    pub fn is_empty(&self) -> bool {
        self.to_lump.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_directions() {
        let mut map = ResourceIdMap::new();
        map.insert(ResourceId(40), LumpId(1));
        map.insert(ResourceId(7), LumpId(0));

        assert_eq!(map.lump_id(ResourceId(40)), Some(LumpId(1)));
        assert_eq!(map.resource_id(LumpId(0)), Some(ResourceId(7)));
        assert_eq!(map.lump_id(ResourceId(3)), None);
        assert_eq!(map.resource_ids(), vec![ResourceId(7), ResourceId(40)]);
        assert_eq!(map.len(), 2);
    }
}
