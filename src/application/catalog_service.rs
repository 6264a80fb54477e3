// Catalog service - Static plant/device catalog lookups
use crate::application::error::{ServiceError, ServiceResult};
use crate::domain::entity::{CatalogEntry, Entity, Palette, Plant};
use crate::infrastructure::config::{CatalogConfig, VariableConfig};
use std::sync::Arc;

#[derive(Clone)]
pub struct CatalogService {
    plants: Arc<Vec<Plant>>,
    variables: Arc<Vec<VariableConfig>>,
    palette: Palette,
}

impl CatalogService {
    pub fn new(catalog: CatalogConfig) -> Self {
        let plants = catalog
            .plants
            .into_iter()
            .map(|p| Plant {
                entity: Entity::new(p.id, p.name, p.color),
                devices: p
                    .devices
                    .into_iter()
                    .map(|d| Entity::new(d.id, d.name, d.color))
                    .collect(),
            })
            .collect();

        Self {
            plants: Arc::new(plants),
            variables: Arc::new(catalog.variables),
            palette: Palette::new(catalog.palette),
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn list_plants(&self) -> Vec<CatalogEntry> {
        self.plants
            .iter()
            .enumerate()
            .map(|(index, plant)| CatalogEntry {
                entity: plant.entity.clone(),
                color: self.palette.resolve(&plant.entity, index),
                devices: plant
                    .devices
                    .iter()
                    .enumerate()
                    .map(|(device_index, device)| CatalogEntry {
                        entity: device.clone(),
                        color: self.palette.resolve(device, device_index),
                        devices: Vec::new(),
                    })
                    .collect(),
            })
            .collect()
    }

    pub fn plant(&self, plant_id: &str) -> ServiceResult<&Plant> {
        self.plants
            .iter()
            .find(|p| p.entity.id == plant_id)
            .ok_or_else(|| ServiceError::NotFound {
                entity: "plant",
                id: plant_id.to_string(),
            })
    }

    pub fn device(&self, plant_id: &str, device_id: &str) -> ServiceResult<&Entity> {
        self.plant(plant_id)?
            .devices
            .iter()
            .find(|d| d.id == device_id)
            .ok_or_else(|| ServiceError::NotFound {
                entity: "device",
                id: device_id.to_string(),
            })
    }

    /// Plants in selection order, or the whole catalog when nothing is selected.
    /// Repeated ids are kept once.
    pub fn select_plants(&self, plant_ids: &[String]) -> ServiceResult<Vec<Entity>> {
        if plant_ids.is_empty() {
            return Ok(self.plants.iter().map(|p| p.entity.clone()).collect());
        }

        let mut selected: Vec<Entity> = Vec::with_capacity(plant_ids.len());
        for id in plant_ids {
            if selected.iter().any(|e| &e.id == id) {
                continue;
            }
            selected.push(self.plant(id)?.entity.clone());
        }
        Ok(selected)
    }

    pub fn variable(&self, name: &str) -> Option<&VariableConfig> {
        self.variables.iter().find(|v| v.name == name)
    }
}
