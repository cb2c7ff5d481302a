use memmap::Mmap;
use std::fs::File;
use std::io;
use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

/// A positioned reader over one of the importer's data files.
/// The buffered flavour wraps the file in a `BufReader` for sequential scans;
/// the memory-mapped flavour reads straight from the mapping, which is the
/// better fit for the random seeks of the block loader.
pub enum FileScanner {
    Buffered(BufReader<File>),
    Mapped(Cursor<Mmap>),
}

impl FileScanner {
    pub fn open<P: AsRef<Path>>(path: P, memory_mapped: bool) -> io::Result<Self> {
        let file = File::open(path)?;
        if memory_mapped {
            let mmap = unsafe { Mmap::map(&file)? };
            Ok(FileScanner::Mapped(Cursor::new(mmap)))
        } else {
            Ok(FileScanner::Buffered(BufReader::new(file)))
        }
    }

    /// The current read position, so a caller can seek away and later restore it
    pub fn position(&mut self) -> io::Result<u64> {
        self.seek(SeekFrom::Current(0))
    }
}

impl Read for FileScanner {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            FileScanner::Buffered(reader) => reader.read(buf),
            FileScanner::Mapped(cursor) => cursor.read(buf),
        }
    }
}

impl Seek for FileScanner {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            FileScanner::Buffered(reader) => reader.seek(pos),
            FileScanner::Mapped(cursor) => cursor.seek(pos),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
    use std::io::Write;

    #[test]
    fn buffered_and_mapped_agree() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.bin");

        let mut file = File::create(&path).unwrap();
        for value in 0..100u32 {
            file.write_u32::<LittleEndian>(value * 3).unwrap();
        }
        file.flush().unwrap();

        for &memory_mapped in &[false, true] {
            let mut scanner = FileScanner::open(&path, memory_mapped).unwrap();
            assert_eq!(scanner.read_u32::<LittleEndian>().unwrap(), 0);
            assert_eq!(scanner.position().unwrap(), 4);

            // Random access and position restore
            scanner.seek(SeekFrom::Start(4 * 42)).unwrap();
            assert_eq!(scanner.read_u32::<LittleEndian>().unwrap(), 42 * 3);
            scanner.seek(SeekFrom::Start(4)).unwrap();
            assert_eq!(scanner.read_u32::<LittleEndian>().unwrap(), 3);
        }
    }
}
