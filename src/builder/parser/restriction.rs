//! This file implements the first step of the build: scanning the raw
//! relations for turn restrictions and keying them by their via node

use crate::builder::data_types::*;
use crate::builder::BuildParameter;
use crate::io::FileScanner;
use byteorder::{LittleEndian, ReadBytesExt};
use std::collections::{HashMap, HashSet};
use std::io;

/// Collect every complete turn restriction from `rawrels.dat`.
/// Relations of any other type, and restriction relations missing one of the
/// `from` way / `via` node / `to` way members, are dropped silently.
pub fn read_restrictions(
    parameter: &BuildParameter,
    type_config: &TypeConfig,
) -> io::Result<HashMap<Id, Vec<Restriction>>> {
    let allow_types = relation_type_ids(type_config, &ALLOW_RELATION_TYPES);
    let forbid_types = relation_type_ids(type_config, &FORBID_RELATION_TYPES);

    let mut scanner = FileScanner::open(
        parameter.destination_directory.join("rawrels.dat"),
        false,
    )?;

    let relation_count = scanner.read_u32::<LittleEndian>()?;
    let mut restrictions: HashMap<Id, Vec<Restriction>> = HashMap::new();

    for r in 0..relation_count {
        let relation = RawRelation::read(&mut scanner).map_err(|err| {
            io::Error::new(
                err.kind(),
                format!(
                    "error while reading relation {} of {} in 'rawrels.dat': {}",
                    r + 1,
                    relation_count,
                    err
                ),
            )
        })?;

        let kind = if allow_types.contains(&relation.type_id) {
            RestrictionKind::Allow
        } else if forbid_types.contains(&relation.type_id) {
            RestrictionKind::Forbid
        } else {
            continue;
        };

        let mut from = 0;
        let mut via = 0;
        let mut to = 0;
        for member in &relation.members {
            match (member.kind, member.role.as_str()) {
                (MemberKind::Way, "from") => from = member.id,
                (MemberKind::Node, "via") => via = member.id,
                (MemberKind::Way, "to") => to = member.id,
                _ => {}
            }
        }

        if from != 0 && via != 0 && to != 0 {
            restrictions
                .entry(via)
                .or_insert_with(Vec::new)
                .push(Restriction { from, to, kind });
        }
    }

    Ok(restrictions)
}

/// The type ids under which this configuration registered the given
/// relation type names. Names missing from the configuration are skipped.
fn relation_type_ids(type_config: &TypeConfig, names: &[&str]) -> HashSet<TypeId> {
    names
        .iter()
        .filter_map(|name| type_config.type_id(name))
        .collect()
}
