//! This file implements the third step of the build: mapping each junction
//! to the ways that run through it

use crate::builder::data_types::*;
use crate::builder::BuildParameter;
use std::collections::{BTreeMap, HashSet};
use std::io;

/// Scan `ways.dat` a second time and list, for every junction, the ids of
/// the routable ways containing it, in encounter order. A way appears once
/// per occurrence of the junction among its nodes, so a closed loop lists
/// its way twice under the closure node; the build step relies on those
/// duplicates to tell the two sides of the loop apart.
pub fn collect_endpoints(
    parameter: &BuildParameter,
    type_config: &TypeConfig,
    junctions: &HashSet<Id>,
) -> io::Result<BTreeMap<Id, Vec<Id>>> {
    let mut node_way_map: BTreeMap<Id, Vec<Id>> = BTreeMap::new();

    super::for_each_routable_way(parameter, type_config, |way| {
        for node in &way.nodes {
            if junctions.contains(&node.id) {
                node_way_map
                    .entry(node.id)
                    .or_insert_with(Vec::new)
                    .push(way.id);
            }
        }
    })?;

    Ok(node_way_map)
}
