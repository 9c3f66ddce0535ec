//! Deterministic block decomposition of input messages.

use core::fmt;
use core::str::FromStr;

use crate::Error;

/// The kind of input a message was split from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FileType {
    /// Newline-delimited text; blocks are runs of whole lines.
    Text,
    /// Plain-text PGM-style image; blocks are square pixel tiles.
    Image,
}

impl FileType {
    /// Payload identifier for this file type.
    pub fn name(self) -> &'static str {
        match self {
            FileType::Text => "text",
            FileType::Image => "image",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FileType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(FileType::Text),
            "image" => Ok(FileType::Image),
            _ => Err(Error::UnknownIdentifier {
                kind: "file type",
                value: s.into(),
            }),
        }
    }
}

/// How the block size is chosen.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SplitStrategy {
    /// Fixed block size: lines per block for text, tile side for images.
    BlockSize(usize),
    /// Fixed block count; the block size is derived from the input.
    BlockCount(usize),
}

/// A message split into an ordered sequence of byte-string blocks.
///
/// Splitting is deterministic: the same input, file type, and strategy always
/// produce the same blocks, so a verifier can rebuild the decomposition from
/// the parameters carried in a signature payload.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BlockedMessage {
    blocks: Vec<Vec<u8>>,
    block_size: usize,
    message: Vec<u8>,
    file_type: FileType,
}

impl BlockedMessage {
    /// Split `bytes` according to `file_type`.
    pub fn split(bytes: &[u8], file_type: FileType, strategy: SplitStrategy) -> Result<Self, Error> {
        match file_type {
            FileType::Text => Self::text(bytes, strategy),
            FileType::Image => Self::image(bytes, strategy),
        }
    }

    /// Split newline-delimited text into blocks of whole lines.
    ///
    /// Every block holds `block_size` lines (each terminated by `0x0A`);
    /// trailing bytes that do not fill a block are emitted as a final
    /// shorter block. Concatenating the blocks in order reproduces `bytes`
    /// exactly.
    pub fn text(bytes: &[u8], strategy: SplitStrategy) -> Result<Self, Error> {
        let block_size = match strategy {
            SplitStrategy::BlockSize(s) => s,
            SplitStrategy::BlockCount(k) => {
                if k == 0 {
                    return Err(Error::InvalidParameter("block count must be at least 1"));
                }
                let lines = count_lines(bytes);
                let size = (lines as f64 / k as f64).round() as usize;
                size.max(1)
            }
        };
        if block_size == 0 {
            return Err(Error::InvalidParameter("block size must be at least 1"));
        }

        let mut blocks = Vec::new();
        let mut current = Vec::new();
        let mut lines = 0usize;
        for &b in bytes {
            current.push(b);
            if b == b'\n' {
                lines += 1;
                if lines % block_size == 0 {
                    blocks.push(core::mem::take(&mut current));
                }
            }
        }
        if !current.is_empty() {
            blocks.push(current);
        }

        Ok(Self {
            blocks,
            block_size,
            message: bytes.to_vec(),
            file_type: FileType::Text,
        })
    }

    /// Split a plain-text PGM image into square pixel tiles.
    ///
    /// The header is a magic line, one comment line, a `columns rows` line,
    /// and a maximum-value line; the body is whitespace-separated pixel
    /// values. Tiles are emitted row-major and clamped at the image
    /// boundary. The message digested by the protocol is the row-major
    /// pixel byte stream.
    pub fn image(bytes: &[u8], strategy: SplitStrategy) -> Result<Self, Error> {
        let (rows, columns, pixels) = parse_pgm(bytes)?;

        let block_size = match strategy {
            SplitStrategy::BlockSize(s) => {
                if s == 0 {
                    return Err(Error::InvalidParameter("block size must be at least 1"));
                }
                if s > rows || s > columns {
                    rows.max(columns)
                } else {
                    s
                }
            }
            SplitStrategy::BlockCount(k) => {
                if k == 0 {
                    return Err(Error::InvalidParameter("block count must be at least 1"));
                }
                if k > rows * columns {
                    1
                } else {
                    let side = ((rows * columns) as f64 / k as f64).sqrt();
                    (side.round() as usize).max(1)
                }
            }
        };

        let block_rows = rows.div_ceil(block_size);
        let block_columns = columns.div_ceil(block_size);
        let mut blocks = Vec::with_capacity(block_rows * block_columns);
        for bi in 0..block_rows {
            for bj in 0..block_columns {
                let row_start = bi * block_size;
                let row_end = (row_start + block_size).min(rows);
                let col_start = bj * block_size;
                let col_end = (col_start + block_size).min(columns);

                let mut tile = Vec::with_capacity((row_end - row_start) * (col_end - col_start));
                for row in row_start..row_end {
                    tile.extend_from_slice(&pixels[row * columns + col_start..row * columns + col_end]);
                }
                blocks.push(tile);
            }
        }

        Ok(Self {
            blocks,
            block_size,
            message: pixels,
            file_type: FileType::Image,
        })
    }

    /// The blocks, in order.
    pub fn blocks(&self) -> &[Vec<u8>] {
        &self.blocks
    }

    /// A single block.
    pub fn block(&self, index: usize) -> &[u8] {
        &self.blocks[index]
    }

    /// The block size actually used (lines per block or tile side).
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// The byte stream covered by the whole-message digest.
    pub fn message(&self) -> &[u8] {
        &self.message
    }

    /// The kind of input this message was split from.
    pub fn file_type(&self) -> FileType {
        self.file_type
    }
}

/// Number of lines in `bytes`; a trailing run without a newline counts.
fn count_lines(bytes: &[u8]) -> usize {
    let mut lines = bytes.iter().filter(|&&b| b == b'\n').count();
    if let Some(&last) = bytes.last() {
        if last != b'\n' {
            lines += 1;
        }
    }
    lines
}

/// Parse a plain-text PGM body into `(rows, columns, row-major pixels)`.
fn parse_pgm(bytes: &[u8]) -> Result<(usize, usize, Vec<u8>), Error> {
    let text = core::str::from_utf8(bytes).map_err(|_| Error::MalformedImage("not valid text"))?;
    let mut lines = text.lines();

    let _magic = lines.next().ok_or(Error::MalformedImage("missing magic line"))?;
    let _comment = lines.next().ok_or(Error::MalformedImage("missing header line"))?;
    let dims = lines.next().ok_or(Error::MalformedImage("missing dimensions line"))?;
    let mut parts = dims.split_whitespace();
    let columns: usize = parts
        .next()
        .and_then(|v| v.parse().ok())
        .ok_or(Error::MalformedImage("bad column count"))?;
    let rows: usize = parts
        .next()
        .and_then(|v| v.parse().ok())
        .ok_or(Error::MalformedImage("bad row count"))?;
    let _max_value = lines.next().ok_or(Error::MalformedImage("missing max-value line"))?;

    if rows == 0 || columns == 0 {
        return Err(Error::MalformedImage("empty dimensions"));
    }

    let mut pixels = Vec::with_capacity(rows * columns);
    for line in lines {
        for value in line.split_whitespace() {
            let v: u32 = value
                .parse()
                .map_err(|_| Error::MalformedImage("bad pixel value"))?;
            pixels.push(v as u8);
        }
    }
    if pixels.len() != rows * columns {
        return Err(Error::MalformedImage("pixel count does not match dimensions"));
    }

    Ok((rows, columns, pixels))
}
