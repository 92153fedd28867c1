//! Readers for the IDX image and label files.
//!
//! # Image file
//! ```text
//! bytes  0-3:   0x00000803  (magic, big-endian u32)
//! bytes  4-7:   N           (number of images)
//! bytes  8-11:  rows
//! bytes 12-15:  cols
//! bytes 16..:   N * rows * cols pixel bytes
//! ```
//!
//! # Label file
//! ```text
//! bytes  0-3:   0x00000801  (magic, big-endian u32)
//! bytes  4-7:   N           (number of labels)
//! bytes  8..:   N class bytes
//! ```

use std::io::Cursor;

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::{NetError, Result};

pub const IMAGE_MAGIC: u32 = 0x0000_0803;
pub const LABEL_MAGIC: u32 = 0x0000_0801;

/// Normalized pixel data, indexed `pixels[item][column][row]`.
///
/// Each item's bytes are laid into the column axis first, so for one item
/// byte `k` of the payload lands at `[k / rows][k % rows]`. Models trained on
/// this layout depend on it, so it is kept as is.
#[derive(Debug, Clone, PartialEq)]
pub struct Images {
    pub rows: usize,
    pub cols: usize,
    pub pixels: Vec<Vec<Vec<f64>>>,
}

impl Images {
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Flattens item `index` into one input vector, column by column.
    pub fn flat(&self, index: usize) -> Vec<f64> {
        self.pixels[index].iter().flatten().copied().collect()
    }
}

fn read_magic(cursor: &mut Cursor<&[u8]>, expected: u32) -> Result<()> {
    let found = cursor.read_u32::<BigEndian>()?;
    if found != expected {
        return Err(NetError::BadMagic { expected, found });
    }
    Ok(())
}

fn read_count(cursor: &mut Cursor<&[u8]>) -> Result<usize> {
    Ok(cursor.read_u32::<BigEndian>()? as usize)
}

fn too_large(what: &str) -> NetError {
    NetError::Io(std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        format!("{what} overflows usize"),
    ))
}

/// Borrows the next `len` bytes, failing before any allocation when the
/// input holds fewer.
fn take_payload<'a>(cursor: &mut Cursor<&'a [u8]>, len: usize, what: &str) -> Result<&'a [u8]> {
    let data: &'a [u8] = cursor.get_ref();
    let start = (cursor.position() as usize).min(data.len());
    if len > data.len() - start {
        return Err(NetError::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            format!("{what}: header claims {len} bytes, {} remain", data.len() - start),
        )));
    }
    cursor.set_position((start + len) as u64);
    Ok(&data[start..start + len])
}

/// Parses an image file, scaling every byte into `[0, 1]`.
pub fn parse_images(bytes: &[u8]) -> Result<Images> {
    let mut cursor = Cursor::new(bytes);
    read_magic(&mut cursor, IMAGE_MAGIC)?;
    let n_items = read_count(&mut cursor)?;
    let rows = read_count(&mut cursor)?;
    let cols = read_count(&mut cursor)?;

    let n_pixels = rows.checked_mul(cols).ok_or_else(|| too_large("rows * cols"))?;
    let total = n_items.checked_mul(n_pixels).ok_or_else(|| too_large("image payload"))?;
    let payload = take_payload(&mut cursor, total, "image payload")?;

    let pixels = if n_pixels == 0 {
        vec![vec![vec![]; cols]; n_items]
    } else {
        payload
            .chunks_exact(n_pixels)
            .map(|item| {
                item.chunks_exact(rows)
                    .map(|column| column.iter().map(|&px| px as f64 / 255.0).collect())
                    .collect()
            })
            .collect()
    };

    Ok(Images { rows, cols, pixels })
}

/// Parses a label file into raw class bytes.
pub fn parse_labels(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(bytes);
    read_magic(&mut cursor, LABEL_MAGIC)?;
    let n_items = read_count(&mut cursor)?;
    Ok(take_payload(&mut cursor, n_items, "label payload")?.to_vec())
}
