use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Fixed preamble of every binary file this crate writes. The CRC covers
/// the serialized prefix (magic through reserved), so any bit flip in the
/// preamble is caught at open time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryHeader {
    pub magic: [u8; 8],
    pub version: u16,
    pub flags: u16,
    pub reserved: u32,
    pub header_crc32: u32,
}

impl BinaryHeader {
    pub const LEN_WITHOUT_CRC: usize = 8 + 2 + 2 + 4;
    pub const TOTAL_LEN: usize = Self::LEN_WITHOUT_CRC + 4;

    pub fn new(magic: [u8; 8], version: u16, flags: u16) -> Self {
        let mut header = Self {
            magic,
            version,
            flags,
            reserved: 0,
            header_crc32: 0,
        };
        header.header_crc32 = crc32fast::hash(&header.prefix_bytes());
        header
    }

    fn prefix_bytes(&self) -> [u8; Self::LEN_WITHOUT_CRC] {
        let mut out = [0u8; Self::LEN_WITHOUT_CRC];
        out[..8].copy_from_slice(&self.magic);
        out[8..10].copy_from_slice(&self.version.to_le_bytes());
        out[10..12].copy_from_slice(&self.flags.to_le_bytes());
        out[12..].copy_from_slice(&self.reserved.to_le_bytes());
        out
    }

    pub fn to_bytes(&self) -> [u8; Self::TOTAL_LEN] {
        let mut out = [0u8; Self::TOTAL_LEN];
        out[..Self::LEN_WITHOUT_CRC].copy_from_slice(&self.prefix_bytes());
        out[Self::LEN_WITHOUT_CRC..].copy_from_slice(&self.header_crc32.to_le_bytes());
        out
    }

    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        w.write_all(&self.to_bytes())
    }

    pub fn read_from<R: Read>(mut r: R) -> io::Result<Self> {
        let mut raw = [0u8; Self::TOTAL_LEN];
        r.read_exact(&mut raw)?;
        Self::from_bytes(&raw)
    }

    fn from_bytes(raw: &[u8; Self::TOTAL_LEN]) -> io::Result<Self> {
        let stored_crc = u32::from_le_bytes([raw[16], raw[17], raw[18], raw[19]]);
        if crc32fast::hash(&raw[..Self::LEN_WITHOUT_CRC]) != stored_crc {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "header CRC mismatch",
            ));
        }

        let mut magic = [0u8; 8];
        magic.copy_from_slice(&raw[..8]);
        Ok(Self {
            magic,
            version: u16::from_le_bytes([raw[8], raw[9]]),
            flags: u16::from_le_bytes([raw[10], raw[11]]),
            reserved: u32::from_le_bytes([raw[12], raw[13], raw[14], raw[15]]),
            header_crc32: stored_crc,
        })
    }
}

pub enum FileKind {
    DictionaryBlob,
    SliceLog,
    OffsetLog,
}

impl FileKind {
    pub const fn magic(&self) -> [u8; 8] {
        match self {
            FileKind::DictionaryBlob => *b"SFRGDIC\0",
            FileKind::SliceLog => *b"SFRGKVL\0",
            FileKind::OffsetLog => *b"SFRGOFF\0",
        }
    }
}

/// Open `path` for appending, stamping a fresh header when the file is
/// empty and validating the existing one otherwise.
pub fn ensure_header_if_new(path: &Path, expected_magic: [u8; 8]) -> io::Result<File> {
    let mut file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .open(path)?;

    if file.metadata()?.len() == 0 {
        BinaryHeader::new(expected_magic, 1, 0).write_to(&mut file)?;
    } else {
        file.rewind()?;
        let header = BinaryHeader::read_from(&mut file)?;
        if header.magic != expected_magic {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "unexpected magic in existing file",
            ));
        }
    }

    file.seek(SeekFrom::End(0))?;
    Ok(file)
}

/// Open `path` read-only, validate the header, and hand back the file with
/// the offset of the first payload byte.
pub fn open_and_header_offset(
    path: &Path,
    expected_magic: [u8; 8],
) -> io::Result<(File, usize)> {
    let mut file = File::open(path)?;
    if file.metadata()?.len() < BinaryHeader::TOTAL_LEN as u64 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "file too small for header",
        ));
    }

    let header = BinaryHeader::read_from(&mut file)?;
    if header.magic != expected_magic {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "invalid magic"));
    }
    Ok((file, BinaryHeader::TOTAL_LEN))
}
