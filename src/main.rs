use byteorder::{LittleEndian, ReadBytesExt};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use strabo::builder::{self, BuildParameter, RouteNode, TypeConfig};
use strabo::io::FileScanner;
use strabo::utils::{format_bytes, format_num, Progress};
use structopt::StructOpt;

/// This tool builds the routing graph used by the navigation stages from the
/// intermediate files produced by the map data importer.
#[derive(StructOpt, Debug)]
enum Strabo {
    /// Build `route.dat` from `ways.dat`, `rawrels.dat` and `way.idx`
    Build {
        /// Directory with the input files. The output is written next to them
        #[structopt(short, long, parse(from_os_str))]
        dir: PathBuf,

        /// How many junctions to process per block
        #[structopt(long, default_value = "5000")]
        block_size: usize,

        /// How many threads to use. By default, will use all hyperthreads available
        #[structopt(long)]
        threads: Option<usize>,

        /// Memory-map reads of `ways.dat`
        #[structopt(long)]
        mmap_ways: bool,

        /// Memory-map reads of `way.idx`
        #[structopt(long)]
        mmap_index: bool,

        /// How many resolved way offsets to keep cached
        #[structopt(long, default_value = "10000")]
        index_cache: usize,
    },
    /// Print summary statistics of an existing route node file
    Stats {
        /// Input file, usually named `route.dat`
        #[structopt(short, long, parse(from_os_str))]
        input: PathBuf,
    },
}

fn main() {
    let result = match Strabo::from_args() {
        Strabo::Build {
            dir,
            block_size,
            threads,
            mmap_ways,
            mmap_index,
            index_cache,
        } => run_build(dir, block_size, threads, mmap_ways, mmap_index, index_cache),
        Strabo::Stats { input } => run_stats(&input),
    };

    if let Err(err) = result {
        eprintln!("ERROR {}", err);
        process::exit(1);
    }
}

fn run_build(
    dir: PathBuf,
    block_size: usize,
    threads: Option<usize>,
    mmap_ways: bool,
    mmap_index: bool,
    index_cache: usize,
) -> io::Result<()> {
    let mut parameter = BuildParameter::new(dir);
    parameter.route_node_block_size = block_size;
    parameter.threads = threads;
    parameter.way_data_memory_mapped = mmap_ways;
    parameter.way_index_memory_mapped = mmap_index;
    parameter.way_index_cache_size = index_cache;

    let type_config = TypeConfig::with_defaults();
    let mut progress = Progress::new();
    builder::build(&parameter, &type_config, &mut progress)?;

    let output = parameter.destination_directory.join("route.dat");
    let size = fs::metadata(&output)?.len();
    progress.info(format!(
        "Wrote {}, size = {}",
        output.display(),
        format_bytes(size)
    ));

    Ok(())
}

fn run_stats(input: &Path) -> io::Result<()> {
    let mut scanner = FileScanner::open(input, false)?;
    let node_count = scanner.read_u32::<LittleEndian>()?;

    let mut path_count: u64 = 0;
    let mut exclude_count: u64 = 0;
    for _ in 0..node_count {
        let route_node = RouteNode::read(&mut scanner)?;
        path_count += route_node.paths.len() as u64;
        exclude_count += route_node.excludes.len() as u64;
    }

    println!(
        "{} route nodes, {} paths, {} excludes",
        format_num(node_count as usize),
        format_num(path_count as usize),
        format_num(exclude_count as usize)
    );

    Ok(())
}
