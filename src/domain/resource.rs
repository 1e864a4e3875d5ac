use std::collections::HashMap;

use crate::api::config_dto::{ResourceCategoryDto, ResourceDto};
use crate::domain::id::ResourceId;
use crate::error::{Error, Result};

/// Category of a bookable simulator unit.
///
/// VIP rigs require an elevated caller capability; the role model itself
/// lives with the caller, the catalog only states the requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceCategory {
    Standard,
    Vip,
}

/// A bookable simulator unit. Immutable reference data, defined once at startup.
#[derive(Debug, Clone)]
pub struct Resource {
    pub id: ResourceId,
    pub category: ResourceCategory,
    /// Price per full hour of booked time, before participant multiplication.
    pub base_price: f64,
    pub features: Vec<String>,
}

impl Resource {
    pub fn from_dto(dto: ResourceDto) -> Result<Self> {
        if dto.id.trim().is_empty() {
            return Err(Error::ConfigError("Resource id must not be empty.".to_string()));
        }

        if dto.base_price < 0.0 {
            return Err(Error::ConfigError(format!("Resource '{}' has a negative base price.", dto.id)));
        }

        let category = match dto.category {
            ResourceCategoryDto::Standard => ResourceCategory::Standard,
            ResourceCategoryDto::Vip => ResourceCategory::Vip,
        };

        Ok(Resource { id: ResourceId::new(dto.id), category, base_price: dto.base_price, features: dto.features })
    }
}

/// Lookup table over all configured simulators.
#[derive(Debug, Clone)]
pub struct ResourceCatalog {
    resources: HashMap<ResourceId, Resource>,
}

impl ResourceCatalog {
    pub fn new(resources: Vec<Resource>) -> Result<Self> {
        let mut map: HashMap<ResourceId, Resource> = HashMap::new();

        for resource in resources {
            if map.insert(resource.id.clone(), resource.clone()).is_some() {
                return Err(Error::ConfigError(format!("Duplicate resource id '{}' in catalog.", resource.id)));
            }
        }

        Ok(ResourceCatalog { resources: map })
    }

    pub fn from_dto(dtos: Vec<ResourceDto>) -> Result<Self> {
        let resources = dtos.into_iter().map(Resource::from_dto).collect::<Result<Vec<Resource>>>()?;
        ResourceCatalog::new(resources)
    }

    pub fn get(&self, id: &ResourceId) -> Option<&Resource> {
        self.resources.get(id)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
