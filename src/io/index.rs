use super::scanner::FileScanner;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

const HEADER_LEN: u64 = 4;
const ENTRY_LEN: u64 = 16;

/// Random-access index from a record id to its byte offset inside the data
/// file. The file holds a `u32` entry count followed by `(id, offset)` pairs
/// sorted by id; lookups binary-search the file directly, so the index never
/// has to be loaded in full. Resolved entries are kept in a bounded cache.
pub struct NumericIndex {
    scanner: FileScanner,
    len: u64,
    cache: HashMap<u64, u64>,
    cache_size: usize,
}

impl NumericIndex {
    pub fn open<P: AsRef<Path>>(
        path: P,
        memory_mapped: bool,
        cache_size: usize,
    ) -> io::Result<Self> {
        let mut scanner = FileScanner::open(path, memory_mapped)?;
        let len = u64::from(scanner.read_u32::<LittleEndian>()?);
        Ok(Self {
            scanner,
            len,
            cache: HashMap::new(),
            cache_size,
        })
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Resolve the offsets for a set of ids, in ascending id order.
    /// Every id must be present in the index.
    pub fn offsets(&mut self, ids: &BTreeSet<u64>) -> io::Result<Vec<u64>> {
        let mut offsets = Vec::with_capacity(ids.len());
        for &id in ids {
            offsets.push(self.offset(id)?);
        }
        Ok(offsets)
    }

    /// Resolve a single id, failing if it is not indexed
    pub fn offset(&mut self, id: u64) -> io::Result<u64> {
        if let Some(&offset) = self.cache.get(&id) {
            return Ok(offset);
        }

        let offset = self.search(id)?.ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("id {} is not in the index", id),
            )
        })?;

        if self.cache.len() >= self.cache_size {
            self.cache.clear();
        }
        self.cache.insert(id, offset);
        Ok(offset)
    }

    fn search(&mut self, id: u64) -> io::Result<Option<u64>> {
        let mut low = 0;
        let mut high = self.len;
        while low < high {
            let mid = low + (high - low) / 2;
            let (entry_id, entry_offset) = self.entry(mid)?;
            if entry_id == id {
                return Ok(Some(entry_offset));
            } else if entry_id < id {
                low = mid + 1;
            } else {
                high = mid;
            }
        }
        Ok(None)
    }

    fn entry(&mut self, i: u64) -> io::Result<(u64, u64)> {
        self.scanner.seek(SeekFrom::Start(HEADER_LEN + i * ENTRY_LEN))?;
        let id = self.scanner.read_u64::<LittleEndian>()?;
        let offset = self.scanner.read_u64::<LittleEndian>()?;
        Ok((id, offset))
    }
}

/// Collects `(id, offset)` pairs while the data file is being written and
/// serializes them in the sorted form `NumericIndex` expects
pub struct NumericIndexBuilder {
    entries: BTreeMap<u64, u64>,
}

impl NumericIndexBuilder {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, id: u64, offset: u64) {
        self.entries.insert(id, offset);
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u32::<LittleEndian>(self.entries.len() as u32)?;
        for (&id, &offset) in &self.entries {
            writer.write_u64::<LittleEndian>(id)?;
            writer.write_u64::<LittleEndian>(offset)?;
        }
        Ok(())
    }
}
