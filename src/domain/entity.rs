// Tracked plants and devices, and the color palette used to tell them apart

pub const DEFAULT_PALETTE: &[&str] = &[
    "#F4B400", "#0F9D58", "#4285F4", "#DB4437", "#AB47BC", "#00ACC1", "#FF7043", "#9E9D24",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: String,
    pub display_name: String,
    pub color_token: Option<String>,
}

impl Entity {
    pub fn new(id: impl Into<String>, display_name: Option<String>, color_token: Option<String>) -> Self {
        let id = id.into();
        let display_name = display_name.unwrap_or_else(|| Self::format_name(&id));
        Self {
            id,
            display_name,
            color_token: color_token.filter(|c| !c.trim().is_empty()),
        }
    }

    fn format_name(id: &str) -> String {
        // "plant_north_" -> "plant north"
        id.trim_end_matches('_').replace('_', " ")
    }
}

/// A plant and the devices installed on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Plant {
    pub entity: Entity,
    pub devices: Vec<Entity>,
}

/// Catalog listing with colors already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub entity: Entity,
    pub color: String,
    pub devices: Vec<CatalogEntry>,
}

/// Fixed, read-only color sequence. Fallback colors are a pure function of
/// the entity's position so re-renders stay stable.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    pub fn new(colors: Vec<String>) -> Self {
        if colors.is_empty() {
            return Self::default();
        }
        Self { colors }
    }

    pub fn color_for(&self, index: usize) -> &str {
        &self.colors[index % self.colors.len()]
    }

    pub fn resolve(&self, entity: &Entity, index: usize) -> String {
        entity
            .color_token
            .clone()
            .unwrap_or_else(|| self.color_for(index).to_string())
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}
