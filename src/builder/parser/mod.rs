pub mod endpoint;
pub mod junction;
pub mod restriction;
pub mod route;

use super::data_types::{TypeConfig, Way};
use super::BuildParameter;
use crate::io::FileScanner;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io;

/// Stream every way record of `ways.dat` in file order, invoking `handle`
/// for the routable ones only. Returns the total record count.
pub fn for_each_routable_way<F: FnMut(Way)>(
    parameter: &BuildParameter,
    type_config: &TypeConfig,
    mut handle: F,
) -> io::Result<u32> {
    let mut scanner = FileScanner::open(
        parameter.destination_directory.join("ways.dat"),
        parameter.way_data_memory_mapped,
    )?;

    let way_count = scanner.read_u32::<LittleEndian>()?;
    for w in 0..way_count {
        let way = Way::read(&mut scanner).map_err(|err| {
            io::Error::new(
                err.kind(),
                format!(
                    "error while reading way {} of {} in 'ways.dat': {}",
                    w + 1,
                    way_count,
                    err
                ),
            )
        })?;

        if type_config.is_routable(way.type_id) {
            handle(way);
        }
    }

    Ok(way_count)
}
