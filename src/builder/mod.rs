//! The route graph build stage: four passes over the imported data files,
//! ending in the `route.dat` node stream consumed by the navigation engines

mod data_types;
mod parser;

pub use data_types::*;

use crate::utils::{format_num, Progress};
use std::io;
use std::path::PathBuf;

/// Configuration of the build stage, supplied by the enclosing importer
#[derive(Clone, Debug)]
pub struct BuildParameter {
    /// Directory holding `ways.dat`, `rawrels.dat` and `way.idx`;
    /// `route.dat` is written next to them
    pub destination_directory: PathBuf,
    /// Memory-map `ways.dat` scanners instead of buffered reads
    pub way_data_memory_mapped: bool,
    /// Number of resolved offsets the way index keeps cached
    pub way_index_cache_size: usize,
    pub way_index_memory_mapped: bool,
    /// Junctions processed per block of the write phase
    pub route_node_block_size: usize,
    /// Worker threads for the write phase. `None` uses all available cores,
    /// `Some(1)` forces the sequential path. The output is byte-identical
    /// either way.
    pub threads: Option<usize>,
}

impl BuildParameter {
    pub fn new<P: Into<PathBuf>>(destination_directory: P) -> Self {
        Self {
            destination_directory: destination_directory.into(),
            way_data_memory_mapped: false,
            way_index_cache_size: 10_000,
            way_index_memory_mapped: false,
            route_node_block_size: 5_000,
            threads: Some(1),
        }
    }
}

/// Counters reported by a finished build
#[derive(Copy, Clone, Debug)]
pub struct BuildStats {
    /// Via nodes that carry at least one turn restriction
    pub restricted_node_count: usize,
    pub junction_count: usize,
    pub route_node_count: u32,
    pub path_count: u64,
}

/// Run the whole stage. Aborts on the first I/O or format error; internal
/// inconsistencies are reported through `progress` and skipped.
pub fn build(
    parameter: &BuildParameter,
    type_config: &TypeConfig,
    progress: &mut Progress,
) -> io::Result<BuildStats> {
    progress.info("Scanning for restriction relations");
    let restrictions = parser::restriction::read_restrictions(parameter, type_config)?;
    progress.info(format!(
        "Found {} via nodes with turn restrictions",
        format_num(restrictions.len())
    ));

    progress.info("Scanning for junctions");
    let junctions = parser::junction::find_junctions(parameter, type_config)?;
    progress.info(format!("Found {} junctions", format_num(junctions.len())));

    progress.info("Collecting ways intersecting junctions");
    let node_way_map = parser::endpoint::collect_endpoints(parameter, type_config, &junctions)?;
    let junction_count = junctions.len();
    drop(junctions);
    progress.info(format!(
        "Collected {} route nodes",
        format_num(node_way_map.len())
    ));

    progress.info("Writing route nodes");
    let counts = parser::route::write_route_nodes(parameter, &node_way_map, &restrictions, progress)?;
    progress.info(format!(
        "Wrote {} route node(s) and {} path(s)",
        format_num(counts.nodes as usize),
        format_num(counts.paths as usize)
    ));

    Ok(BuildStats {
        restricted_node_count: restrictions.len(),
        junction_count,
        route_node_count: counts.nodes,
        path_count: counts.paths,
    })
}
