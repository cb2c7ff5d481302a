//! This file implements the fourth and final step of the build: loading the
//! ways incident to each junction in blocks, deriving the outgoing paths and
//! the turn excludes of every junction and streaming the route nodes to disk

use crate::builder::data_types::*;
use crate::builder::BuildParameter;
use crate::io::{FileScanner, NumericIndex};
use crate::utils::Progress;
use byteorder::{LittleEndian, WriteBytesExt};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs::File;
use std::io;
use std::io::{BufWriter, Seek, SeekFrom, Write};

/// Counters accumulated while writing `route.dat`
#[derive(Copy, Clone, Debug)]
pub struct RouteCounts {
    pub nodes: u32,
    pub paths: u64,
}

type BlockEntry<'a> = (Id, &'a Vec<Id>);

/// Walk the endpoint map in ascending junction order, in blocks of
/// `route_node_block_size` junctions, and write one route node per junction.
/// The file starts with a placeholder count that is patched once the real
/// number of emitted nodes is known.
pub fn write_route_nodes(
    parameter: &BuildParameter,
    node_way_map: &BTreeMap<Id, Vec<Id>>,
    restrictions: &HashMap<Id, Vec<Restriction>>,
    progress: &mut Progress,
) -> io::Result<RouteCounts> {
    let mut writer = BufWriter::new(File::create(
        parameter.destination_directory.join("route.dat"),
    )?);
    writer.write_u32::<LittleEndian>(0)?;

    let entries: Vec<BlockEntry> = node_way_map.iter().map(|(&id, list)| (id, list)).collect();
    let block_size = parameter.route_node_block_size.max(1);
    let blocks: Vec<&[BlockEntry]> = entries.chunks(block_size).collect();

    let num_threads = parameter.threads.unwrap_or_else(num_cpus::get).max(1);
    let counts = if num_threads == 1 {
        write_blocks_sequential(
            parameter,
            &blocks,
            node_way_map,
            restrictions,
            &mut writer,
            progress,
        )?
    } else {
        write_blocks_parallel(
            parameter,
            &blocks,
            node_way_map,
            restrictions,
            &mut writer,
            progress,
            num_threads,
        )?
    };

    writer.seek(SeekFrom::Start(0))?;
    writer.write_u32::<LittleEndian>(counts.nodes)?;
    writer.flush()?;

    Ok(counts)
}

fn write_blocks_sequential(
    parameter: &BuildParameter,
    blocks: &[&[BlockEntry]],
    node_way_map: &BTreeMap<Id, Vec<Id>>,
    restrictions: &HashMap<Id, Vec<Restriction>>,
    writer: &mut BufWriter<File>,
    progress: &mut Progress,
) -> io::Result<RouteCounts> {
    let mut scanner = FileScanner::open(
        parameter.destination_directory.join("ways.dat"),
        parameter.way_data_memory_mapped,
    )?;
    let mut index = NumericIndex::open(
        parameter.destination_directory.join("way.idx"),
        parameter.way_index_memory_mapped,
        parameter.way_index_cache_size,
    )?;

    let mut counts = RouteCounts { nodes: 0, paths: 0 };
    for block in blocks {
        let mut warnings = Vec::new();
        let route_nodes = build_block(
            block,
            &mut scanner,
            &mut index,
            node_way_map,
            restrictions,
            &mut warnings,
        )?;
        for warning in warnings {
            progress.error(warning);
        }
        for route_node in &route_nodes {
            route_node.write(writer)?;
            counts.nodes += 1;
            counts.paths += route_node.paths.len() as u64;
        }
    }
    Ok(counts)
}

/// Same output as the sequential path, produced by worker threads: each
/// worker owns a scanner and an index, encodes whole blocks into buffers,
/// and the single writer commits them strictly in block order, keeping the
/// file byte-identical. Workers never talk to the progress sink directly;
/// their warnings travel with the results.
fn write_blocks_parallel(
    parameter: &BuildParameter,
    blocks: &[&[BlockEntry]],
    node_way_map: &BTreeMap<Id, Vec<Id>>,
    restrictions: &HashMap<Id, Vec<Restriction>>,
    writer: &mut BufWriter<File>,
    progress: &mut Progress,
    num_threads: usize,
) -> io::Result<RouteCounts> {
    struct TaskResult {
        seq: usize,
        bytes: Vec<u8>,
        counts: RouteCounts,
        warnings: Vec<String>,
    }

    fn commit(
        writer: &mut BufWriter<File>,
        progress: &mut Progress,
        counts: &mut RouteCounts,
        res: TaskResult,
    ) -> io::Result<()> {
        for warning in res.warnings {
            progress.error(warning);
        }
        writer.write_all(&res.bytes)?;
        counts.nodes += res.counts.nodes;
        counts.paths += res.counts.paths;
        Ok(())
    }

    crossbeam::scope(|scope| -> io::Result<RouteCounts> {
        // Create a work queue that will be filled once by this thread and
        // will be consumed by the worker ones
        let (task_sender, task_receiver) = crossbeam::channel::bounded(blocks.len().max(1));
        for task in blocks.iter().cloned().enumerate() {
            task_sender.send(task).unwrap();
        }
        drop(task_sender);

        let (result_sender, result_receiver) = crossbeam::channel::bounded(2 * num_threads);

        let mut workers = Vec::new();
        for _ in 0..num_threads {
            let task_receiver = task_receiver.clone();
            let result_sender = result_sender.clone();
            workers.push(scope.spawn(move |_| -> io::Result<()> {
                let mut scanner = FileScanner::open(
                    parameter.destination_directory.join("ways.dat"),
                    parameter.way_data_memory_mapped,
                )?;
                let mut index = NumericIndex::open(
                    parameter.destination_directory.join("way.idx"),
                    parameter.way_index_memory_mapped,
                    parameter.way_index_cache_size,
                )?;

                for (seq, block) in task_receiver {
                    let mut warnings = Vec::new();
                    let route_nodes = build_block(
                        block,
                        &mut scanner,
                        &mut index,
                        node_way_map,
                        restrictions,
                        &mut warnings,
                    )?;

                    let mut bytes = Vec::new();
                    let mut counts = RouteCounts { nodes: 0, paths: 0 };
                    for route_node in &route_nodes {
                        route_node.write(&mut bytes)?;
                        counts.nodes += 1;
                        counts.paths += route_node.paths.len() as u64;
                    }

                    result_sender
                        .send(TaskResult {
                            seq,
                            bytes,
                            counts,
                            warnings,
                        })
                        .unwrap();
                }
                Ok(())
            }));
        }
        drop(result_sender);

        // Commit the results in block order, buffering those that arrive early
        let mut counts = RouteCounts { nodes: 0, paths: 0 };
        let mut out_of_order: Vec<TaskResult> = Vec::new();
        let mut next_seq = 0;
        let mut write_error = None;
        for res in result_receiver {
            // After a write error only drain, so the workers can finish
            if write_error.is_some() {
                continue;
            }

            if res.seq == next_seq {
                if let Err(err) = commit(writer, progress, &mut counts, res) {
                    write_error = Some(err);
                    continue;
                }
                next_seq += 1;

                while out_of_order.first().map(|res| res.seq) == Some(next_seq) {
                    let res = out_of_order.remove(0);
                    if let Err(err) = commit(writer, progress, &mut counts, res) {
                        write_error = Some(err);
                        break;
                    }
                    next_seq += 1;
                }
            } else {
                out_of_order.push(res);
                out_of_order.sort_by_key(|res| res.seq);
            }
        }

        for worker in workers {
            worker.join().unwrap()?;
        }
        if let Some(err) = write_error {
            return Err(err);
        }

        Ok(counts)
    })
    .unwrap()
}

/// Build the route nodes of one block: load the union of the referenced ways
/// once, then derive each junction's node from the loaded batch
fn build_block(
    entries: &[BlockEntry],
    scanner: &mut FileScanner,
    index: &mut NumericIndex,
    node_way_map: &BTreeMap<Id, Vec<Id>>,
    restrictions: &HashMap<Id, Vec<Restriction>>,
    warnings: &mut Vec<String>,
) -> io::Result<Vec<RouteNode>> {
    let mut way_ids = BTreeSet::new();
    for (_, way_list) in entries {
        way_ids.extend(way_list.iter().cloned());
    }
    if way_ids.is_empty() {
        return Ok(Vec::new());
    }

    let ways = load_ways(scanner, index, &way_ids)?;
    let ways_map: HashMap<Id, Way> = ways.into_iter().map(|way| (way.id, way)).collect();

    let mut route_nodes = Vec::with_capacity(entries.len());
    for &(junction, way_list) in entries {
        route_nodes.push(build_route_node(
            junction,
            way_list,
            &ways_map,
            node_way_map,
            restrictions,
            warnings,
        ));
    }
    Ok(route_nodes)
}

/// Load a batch of ways by id, restoring the scanner's previous position so
/// that sequential readers of `ways.dat` are unaffected
fn load_ways(
    scanner: &mut FileScanner,
    index: &mut NumericIndex,
    way_ids: &BTreeSet<Id>,
) -> io::Result<Vec<Way>> {
    let offsets = index.offsets(way_ids)?;

    let old_pos = scanner.position()?;
    let mut ways = Vec::with_capacity(offsets.len());
    for offset in offsets {
        scanner.seek(SeekFrom::Start(offset))?;
        let way = Way::read(scanner).map_err(|err| {
            io::Error::new(
                err.kind(),
                format!("error while loading way at offset {}: {}", offset, err),
            )
        })?;
        ways.push(way);
    }
    scanner.seek(SeekFrom::Start(old_pos))?;

    Ok(ways)
}

/// Derive one junction's route node from the ways loaded for its block
fn build_route_node(
    junction: Id,
    way_list: &[Id],
    ways_map: &HashMap<Id, Way>,
    node_way_map: &BTreeMap<Id, Vec<Id>>,
    restrictions: &HashMap<Id, Vec<Restriction>>,
    warnings: &mut Vec<String>,
) -> RouteNode {
    let mut route_node = RouteNode::new(junction);

    // Ways are stored by ascending id, duplicates kept: a junction listed
    // twice for the same way keeps both entries, and each one emits its paths
    let mut sorted_ways = way_list.to_vec();
    sorted_ways.sort();

    for &way_id in &sorted_ways {
        let way = match ways_map.get(&way_id) {
            Some(way) => way,
            None => {
                warnings.push(format!(
                    "way {} was not loaded with its block (internal error?)",
                    way_id
                ));
                continue;
            }
        };

        route_node.ways.push(way_id);
        let way_index = (route_node.ways.len() - 1) as u32;

        if way.is_area() {
            // Area boundaries are implicitly closed and bidirectional
            append_ring_paths(&mut route_node, way, way_index, junction, node_way_map, true);
        } else if way.is_closed() {
            append_ring_paths(
                &mut route_node,
                way,
                way_index,
                junction,
                node_way_map,
                !way.is_oneway(),
            );
        } else {
            append_linear_paths(&mut route_node, way, way_index, junction, node_way_map);
        }
    }

    if let Some(turn_restrictions) = restrictions.get(&junction) {
        resolve_excludes(&mut route_node, &sorted_ways, turn_restrictions);
    }

    route_node
}

/// Outgoing paths along a ring. Starting at the first occurrence of the
/// junction, follow the ring forwards until it either comes back around or
/// reaches another junction; then the same backwards when `walk_backward`
/// allows it. The backward path is also suppressed when it lands on the
/// position the forward walk already found.
fn append_ring_paths(
    route_node: &mut RouteNode,
    way: &Way,
    way_index: u32,
    junction: Id,
    node_way_map: &BTreeMap<Id, Vec<Id>>,
    walk_backward: bool,
) {
    let current = way
        .nodes
        .iter()
        .position(|point| point.id == junction)
        .expect("junction is listed for this way but missing from its nodes");

    let (next, distance) = follow_ring(way, current, true, node_way_map);
    if next != current {
        route_node
            .paths
            .push(make_path(way, way_index, &way.nodes[next], distance));
    }

    if walk_backward {
        let (prev, distance) = follow_ring(way, current, false, node_way_map);
        if prev != current && prev != next {
            route_node
                .paths
                .push(make_path(way, way_index, &way.nodes[prev], distance));
        }
    }
}

/// Step around the ring from `current` until the walk returns to its start
/// or reaches a junction node, summing segment distances on the way.
/// Returns the final position; the caller decides whether a path is due.
fn follow_ring(
    way: &Way,
    current: usize,
    forward: bool,
    node_way_map: &BTreeMap<Id, Vec<Id>>,
) -> (usize, f64) {
    let len = way.nodes.len();
    let step = |i: usize| {
        if forward {
            (i + 1) % len
        } else {
            (i + len - 1) % len
        }
    };

    let mut cursor = step(current);
    let mut distance = way.nodes[current].distance_km(&way.nodes[cursor]);
    while cursor != current && !node_way_map.contains_key(&way.nodes[cursor].id) {
        let last = cursor;
        cursor = step(cursor);
        if cursor != current {
            distance += way.nodes[last].distance_km(&way.nodes[cursor]);
        }
    }

    (cursor, distance)
}

/// Outgoing paths along an open way: for every occurrence of the junction,
/// walk towards both ends of the way until another junction or the way end
/// is reached. Oneway ways only emit the forward direction.
fn append_linear_paths(
    route_node: &mut RouteNode,
    way: &Way,
    way_index: u32,
    junction: Id,
    node_way_map: &BTreeMap<Id, Vec<Id>>,
) {
    for i in 0..way.nodes.len() {
        if way.nodes[i].id != junction {
            continue;
        }

        if i > 0 && !way.is_oneway() {
            let found = (0..i)
                .rev()
                .find(|&j| node_way_map.contains_key(&way.nodes[j].id));
            if let Some(j) = found {
                let distance = segment_distance(&way.nodes[j..=i]);
                route_node
                    .paths
                    .push(make_path(way, way_index, &way.nodes[j], distance));
            }
        }

        if i + 1 < way.nodes.len() {
            let found =
                (i + 1..way.nodes.len()).find(|&j| node_way_map.contains_key(&way.nodes[j].id));
            if let Some(j) = found {
                let distance = segment_distance(&way.nodes[i..=j]);
                route_node
                    .paths
                    .push(make_path(way, way_index, &way.nodes[j], distance));
            }
        }
    }
}

/// Sum of the great-circle segments between consecutive way nodes
fn segment_distance(nodes: &[Point]) -> f64 {
    nodes
        .windows(2)
        .map(|pair| pair[0].distance_km(&pair[1]))
        .sum()
}

fn make_path(way: &Way, way_index: u32, target: &Point, distance: f64) -> Path {
    let mut flags = 0;
    if way.has_access() {
        flags |= PATH_HAS_ACCESS;
    }

    Path {
        id: target.id,
        way_index,
        type_id: way.type_id,
        max_speed: way.max_speed,
        flags,
        lat: target.lat,
        lon: target.lon,
        distance,
    }
}

/// Apply the junction's turn restrictions: for every ordered pair of
/// incident ways whose turn is denied, record an exclude against the first
/// path leaving through the destination way, if one exists
fn resolve_excludes(
    route_node: &mut RouteNode,
    sorted_ways: &[Id],
    turn_restrictions: &[Restriction],
) {
    for &source_way in sorted_ways {
        for &dest_way in sorted_ways {
            if source_way == dest_way || can_turn(turn_restrictions, source_way, dest_way) {
                continue;
            }

            let target_path = route_node
                .paths
                .iter()
                .position(|path| route_node.ways[path.way_index as usize] == dest_way);
            if let Some(target_path) = target_path {
                route_node.excludes.push(Exclude {
                    source_way,
                    target_path: target_path as u32,
                });
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn point(id: Id, lat: f64, lon: f64) -> Point {
        Point { id, lat, lon }
    }

    fn way(id: Id, flags: u8, nodes: Vec<Point>) -> Way {
        Way {
            id,
            type_id: 1,
            flags,
            max_speed: 50,
            nodes,
        }
    }

    /// An endpoint map consistent with the given ways, restricted to `junctions`
    fn endpoint_map(ways: &[&Way], junctions: &[Id]) -> BTreeMap<Id, Vec<Id>> {
        let mut map: BTreeMap<Id, Vec<Id>> = BTreeMap::new();
        for way in ways {
            for node in &way.nodes {
                if junctions.contains(&node.id) {
                    map.entry(node.id).or_insert_with(Vec::new).push(way.id);
                }
            }
        }
        map
    }

    fn build(
        junction: Id,
        ways: &[&Way],
        junctions: &[Id],
        restrictions: &HashMap<Id, Vec<Restriction>>,
    ) -> RouteNode {
        let node_way_map = endpoint_map(ways, junctions);
        let ways_map: HashMap<Id, Way> =
            ways.iter().map(|&way| (way.id, way.clone())).collect();
        let mut warnings = Vec::new();
        let route_node = build_route_node(
            junction,
            &node_way_map[&junction],
            &ways_map,
            &node_way_map,
            restrictions,
            &mut warnings,
        );
        assert!(warnings.is_empty());
        route_node
    }

    #[test]
    fn open_twoway_connects_adjacent_junctions() {
        // Junctions 2 and 4, plain nodes in between and at the ends
        let w1 = way(
            100,
            WAY_HAS_ACCESS,
            vec![
                point(1, 0., 0.),
                point(2, 0., 1.),
                point(3, 0., 2.),
                point(4, 0., 3.),
                point(5, 0., 4.),
            ],
        );
        let spur_a = way(101, 0, vec![point(2, 0., 1.), point(6, 1., 1.)]);
        let spur_b = way(102, 0, vec![point(4, 0., 3.), point(7, 1., 3.)]);
        let ways = [&w1, &spur_a, &spur_b];

        let node = build(2, &ways, &[2, 4], &HashMap::new());
        assert_eq!(node.ways, vec![100, 101]);
        assert_eq!(node.paths.len(), 1);

        let path = &node.paths[0];
        assert_eq!(path.id, 4);
        assert_eq!(path.way_index, 0);
        assert_eq!(path.flags, PATH_HAS_ACCESS);
        assert_eq!(path.lat, 0.);
        assert_eq!(path.lon, 3.);
        let expected = point(2, 0., 1.).distance_km(&point(3, 0., 2.))
            + point(3, 0., 2.).distance_km(&point(4, 0., 3.));
        assert!((path.distance - expected).abs() < 1e-12);

        // And the reverse direction from the other junction
        let node = build(4, &ways, &[2, 4], &HashMap::new());
        assert_eq!(node.paths.len(), 1);
        assert_eq!(node.paths[0].id, 2);
    }

    #[test]
    fn open_oneway_emits_forward_only() {
        let w1 = way(
            100,
            WAY_ONEWAY,
            vec![point(1, 0., 0.), point(2, 0., 1.), point(3, 0., 2.)],
        );
        let spur_a = way(101, 0, vec![point(2, 0., 1.), point(6, 1., 1.)]);
        let spur_b = way(102, 0, vec![point(3, 0., 2.), point(7, 1., 2.)]);
        let ways = [&w1, &spur_a, &spur_b];

        let node = build(2, &ways, &[2, 3], &HashMap::new());
        assert_eq!(node.paths.len(), 1);
        assert_eq!(node.paths[0].id, 3);

        // Downstream junction: nothing back along the oneway
        let node = build(3, &ways, &[2, 3], &HashMap::new());
        assert!(node.paths.is_empty());
    }

    #[test]
    fn area_ring_connects_both_neighbours() {
        // Triangle area; every corner needs a second way to be a junction
        let w2 = way(
            100,
            WAY_AREA,
            vec![
                point(1, 0., 0.),
                point(2, 0., 1.),
                point(3, 1., 1.),
                point(1, 0., 0.),
            ],
        );
        let spur_a = way(101, 0, vec![point(2, 0., 1.), point(8, 2., 0.)]);
        let spur_b = way(102, 0, vec![point(3, 1., 1.), point(9, 2., 1.)]);
        let ways = [&w2, &spur_a, &spur_b];

        let node = build(2, &ways, &[1, 2, 3], &HashMap::new());
        let ring_paths: Vec<&Path> = node.paths.iter().filter(|p| p.way_index == 0).collect();
        assert_eq!(ring_paths.len(), 2);
        // Forward to 3, backward to 1
        assert_eq!(ring_paths[0].id, 3);
        assert_eq!(ring_paths[1].id, 1);

        let forward = point(2, 0., 1.).distance_km(&point(3, 1., 1.));
        assert!((ring_paths[0].distance - forward).abs() < 1e-12);
        let backward = point(2, 0., 1.).distance_km(&point(1, 0., 0.));
        assert!((ring_paths[1].distance - backward).abs() < 1e-12);
    }

    #[test]
    fn closed_oneway_emits_forward_only() {
        // Roundabout with three junctions and three plain nodes
        let w3 = way(
            100,
            WAY_ONEWAY,
            vec![
                point(1, 0., 0.),
                point(10, 0., 1.),
                point(2, 1., 1.),
                point(11, 2., 1.),
                point(3, 2., 0.),
                point(12, 1., 0.),
                point(1, 0., 0.),
            ],
        );
        let spur_a = way(101, 0, vec![point(2, 1., 1.), point(20, 1., 2.)]);
        let spur_b = way(102, 0, vec![point(3, 2., 0.), point(21, 3., 0.)]);
        let ways = [&w3, &spur_a, &spur_b];

        let node = build(2, &ways, &[1, 2, 3], &HashMap::new());
        let ring_paths: Vec<&Path> = node.paths.iter().filter(|p| p.way_index == 0).collect();
        assert_eq!(ring_paths.len(), 1);
        assert_eq!(ring_paths[0].id, 3);

        let node = build(3, &ways, &[1, 2, 3], &HashMap::new());
        let ring_paths: Vec<&Path> = node.paths.iter().filter(|p| p.way_index == 0).collect();
        assert_eq!(ring_paths.len(), 1);
        assert_eq!(ring_paths[0].id, 1);
    }

    #[test]
    fn closed_twoway_walks_both_sides() {
        // Ring with two junctions: the one listed once sees both sides
        let w = way(
            100,
            0,
            vec![
                point(1, 0., 0.),
                point(10, 0., 1.),
                point(2, 0., 2.),
                point(11, 1., 1.),
                point(1, 0., 0.),
            ],
        );
        let spur = way(101, 0, vec![point(2, 0., 2.), point(20, 0., 3.)]);
        let ways = [&w, &spur];

        let node = build(2, &ways, &[1, 2], &HashMap::new());
        let ring_paths: Vec<&Path> = node.paths.iter().filter(|p| p.way_index == 0).collect();
        assert_eq!(ring_paths.len(), 2);
        assert_eq!(ring_paths[0].id, 1);
        assert_eq!(ring_paths[1].id, 1);

        let forward = point(2, 0., 2.).distance_km(&point(11, 1., 1.))
            + point(11, 1., 1.).distance_km(&point(1, 0., 0.));
        let backward = point(2, 0., 2.).distance_km(&point(10, 0., 1.))
            + point(10, 0., 1.).distance_km(&point(1, 0., 0.));
        assert!((ring_paths[0].distance - forward).abs() < 1e-12);
        assert!((ring_paths[1].distance - backward).abs() < 1e-12);
    }

    #[test]
    fn lollipop_way_emits_paths_per_occurrence() {
        // Open way visiting junction 2 twice
        let w = way(
            100,
            0,
            vec![
                point(1, 0., 0.),
                point(2, 0., 1.),
                point(10, 0., 2.),
                point(11, 1., 2.),
                point(2, 0., 1.),
                point(12, 0., 3.),
            ],
        );
        let spur = way(101, 0, vec![point(2, 0., 1.), point(20, 1., 1.)]);
        let ways = [&w, &spur];

        let node = build(2, &ways, &[2], &HashMap::new());
        // First occurrence walks forward to the second one; the second
        // occurrence walks backward to the first. Both are self paths.
        let loop_paths: Vec<&Path> = node.paths.iter().filter(|p| p.way_index == 0).collect();
        assert_eq!(loop_paths.len(), 2);
        for path in loop_paths {
            assert_eq!(path.id, 2);
        }
    }

    #[test]
    fn missing_way_is_reported_and_skipped() {
        let w1 = way(100, 0, vec![point(2, 0., 1.), point(3, 0., 2.)]);

        let mut node_way_map = BTreeMap::new();
        node_way_map.insert(2, vec![100, 999]);
        node_way_map.insert(3, vec![100]);

        let mut ways_map = HashMap::new();
        ways_map.insert(w1.id, w1);

        let mut warnings = Vec::new();
        let node = build_route_node(
            2,
            &node_way_map[&2],
            &ways_map,
            &node_way_map,
            &HashMap::new(),
            &mut warnings,
        );

        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("999"));
        // The present way still contributes
        assert_eq!(node.ways, vec![100]);
        assert_eq!(node.paths.len(), 1);
    }

    #[test]
    fn forbid_restriction_excludes_single_turn() {
        let hub = [
            way(100, 0, vec![point(10, 1., 0.), point(1, 0., 0.)]),
            way(101, 0, vec![point(1, 0., 0.), point(11, 0., 1.)]),
            way(102, 0, vec![point(1, 0., 0.), point(12, 0., -1.)]),
            way(103, 0, vec![point(10, 1., 0.), point(11, 0., 1.), point(12, 0., -1.)]),
        ];
        let ways: Vec<&Way> = hub.iter().collect();

        let mut restrictions = HashMap::new();
        restrictions.insert(
            1,
            vec![Restriction {
                from: 100,
                to: 101,
                kind: RestrictionKind::Forbid,
            }],
        );

        let node = build(1, &ways, &[1, 10, 11, 12], &restrictions);
        assert_eq!(node.ways, vec![100, 101, 102]);
        assert_eq!(node.paths.len(), 3);

        assert_eq!(node.excludes.len(), 1);
        let exclude = node.excludes[0];
        assert_eq!(exclude.source_way, 100);
        let target = &node.paths[exclude.target_path as usize];
        assert_eq!(node.ways[target.way_index as usize], 101);
    }

    #[test]
    fn allow_restriction_excludes_every_other_turn() {
        let hub = [
            way(100, 0, vec![point(10, 1., 0.), point(1, 0., 0.)]),
            way(101, 0, vec![point(1, 0., 0.), point(11, 0., 1.)]),
            way(102, 0, vec![point(1, 0., 0.), point(12, 0., -1.)]),
            way(103, 0, vec![point(10, 1., 0.), point(11, 0., 1.), point(12, 0., -1.)]),
        ];
        let ways: Vec<&Way> = hub.iter().collect();

        let mut restrictions = HashMap::new();
        restrictions.insert(
            1,
            vec![Restriction {
                from: 100,
                to: 101,
                kind: RestrictionKind::Allow,
            }],
        );

        let node = build(1, &ways, &[1, 10, 11, 12], &restrictions);

        // Only (100 -> 102) is denied; other sources are unrestricted
        assert_eq!(node.excludes.len(), 1);
        let exclude = node.excludes[0];
        assert_eq!(exclude.source_way, 100);
        let target = &node.paths[exclude.target_path as usize];
        assert_eq!(node.ways[target.way_index as usize], 102);
    }
}
