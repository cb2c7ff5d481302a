use super::restriction::{ALLOW_RELATION_TYPES, FORBID_RELATION_TYPES};
use std::collections::HashMap;

pub type TypeId = u16;

/// Type id reserved for entities whose type was not recognised by the import
pub const TYPE_IGNORE: TypeId = 0;

/// Everything the builder needs to know about one registered type
#[derive(Clone, Debug)]
pub struct TypeInfo {
    pub name: String,
    pub can_route: bool,
    pub ignore: bool,
}

/// Registry of the object types assigned by the upstream import stages.
/// Type ids are dense, with id 0 reserved for unrecognised objects; the
/// same configuration must be used by every stage of the pipeline so that
/// the ids stored in the data files stay meaningful.
pub struct TypeConfig {
    infos: Vec<TypeInfo>,
    ids: HashMap<String, TypeId>,
}

impl TypeConfig {
    pub fn new() -> Self {
        Self {
            infos: vec![TypeInfo {
                name: String::new(),
                can_route: false,
                ignore: true,
            }],
            ids: HashMap::new(),
        }
    }

    /// The configuration the standalone binary assumes: the standard road
    /// classes as routable way types plus the turn-restriction relation types
    pub fn with_defaults() -> Self {
        let mut config = Self::new();

        for name in &[
            "highway_motorway",
            "highway_motorway_link",
            "highway_trunk",
            "highway_trunk_link",
            "highway_primary",
            "highway_primary_link",
            "highway_secondary",
            "highway_secondary_link",
            "highway_tertiary",
            "highway_tertiary_link",
            "highway_unclassified",
            "highway_residential",
            "highway_living_street",
            "highway_service",
            "highway_road",
        ] {
            config.register(name, true);
        }

        for name in ALLOW_RELATION_TYPES.iter().chain(FORBID_RELATION_TYPES.iter()) {
            config.register(name, false);
        }

        config
    }

    /// Register a new type and return its id
    pub fn register(&mut self, name: &str, can_route: bool) -> TypeId {
        let id = self.infos.len() as TypeId;
        self.infos.push(TypeInfo {
            name: name.to_string(),
            can_route,
            ignore: false,
        });
        self.ids.insert(name.to_string(), id);
        id
    }

    /// Register a type that is parsed by the pipeline but excluded from all processing
    pub fn register_ignored(&mut self, name: &str) -> TypeId {
        let id = self.register(name, false);
        self.infos[id as usize].ignore = true;
        id
    }

    pub fn type_id(&self, name: &str) -> Option<TypeId> {
        self.ids.get(name).cloned()
    }

    pub fn info(&self, type_id: TypeId) -> Option<&TypeInfo> {
        self.infos.get(type_id as usize)
    }

    /// Whether ways of this type take part in the routing graph
    pub fn is_routable(&self, type_id: TypeId) -> bool {
        if type_id == TYPE_IGNORE {
            return false;
        }
        match self.info(type_id) {
            Some(info) => !info.ignore && info.can_route,
            None => false,
        }
    }
}
