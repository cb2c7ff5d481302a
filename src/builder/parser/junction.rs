//! This file implements the second step of the build: counting how many
//! routable ways touch each node and keeping the nodes shared by at least two

use crate::builder::data_types::*;
use crate::builder::BuildParameter;
use std::collections::{HashMap, HashSet};
use std::io;

/// Scan `ways.dat` once and return the ids of all junction nodes.
/// Every appearance of a node id counts, so the shared first/last node of a
/// closed way is a junction even when no other way touches it. The count
/// map only lives for the duration of the scan.
pub fn find_junctions(
    parameter: &BuildParameter,
    type_config: &TypeConfig,
) -> io::Result<HashSet<Id>> {
    let mut counts: HashMap<Id, u32> = HashMap::new();

    super::for_each_routable_way(parameter, type_config, |way| {
        for node in &way.nodes {
            // Anonymous geometry points cannot be junctions
            if node.id != 0 {
                *counts.entry(node.id).or_insert(0) += 1;
            }
        }
    })?;

    Ok(counts
        .into_iter()
        .filter(|&(_, count)| count >= 2)
        .map(|(id, _)| id)
        .collect())
}
