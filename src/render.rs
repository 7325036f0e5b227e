use std::io::{self, Write};

use log::debug;

use crate::{CompareExchange, Network, Result};

const END_MARKER: u8 = b'o';
const EMPTY_LANE: u8 = b'.';
const CROSSED_LANE: u8 = b'-';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// One `swap(i, j)` line per comparator.
    #[default]
    Pseudocode,
    /// One row of lane symbols per comparator.
    Diagram,
}

/// Writes one `swap(i, j)` line per visited comparator.
///
/// The first write error is kept and all later output is dropped, see [`PseudocodeWriter::finish`].
pub struct PseudocodeWriter<'a, W: Write> {
    out: &'a mut W,
    error: Option<io::Error>,
}

impl<'a, W: Write> PseudocodeWriter<'a, W> {
    pub fn new(out: &'a mut W) -> Self {
        Self { out, error: None }
    }

    pub fn finish(self) -> io::Result<()> {
        self.error.map_or(Ok(()), Err)
    }
}

impl<W: Write> CompareExchange for PseudocodeWriter<'_, W> {
    fn compare_exchange(&mut self, a: usize, b: usize) {
        if self.error.is_none() {
            self.error = writeln!(self.out, "swap({a}, {b})").err();
        }
    }

    fn stopped(&self) -> bool {
        self.error.is_some()
    }
}

/// Writes one diagram row per visited comparator, e.g. `. o---o .` for lanes 1 and 3 of 5.
///
/// Rows are streamed in pieces of at most `ROW_CHUNK` bytes, so wide networks never hold a full row in memory.
pub struct DiagramWriter<'a, W: Write> {
    out: &'a mut W,
    lanes: usize,
    row: Vec<u8>,
    error: Option<io::Error>,
}

const ROW_CHUNK: usize = 4096;

impl<'a, W: Write> DiagramWriter<'a, W> {
    pub fn new(out: &'a mut W, lanes: usize) -> Self {
        Self { out, lanes, row: Vec::new(), error: None }
    }

    pub fn finish(self) -> io::Result<()> {
        self.error.map_or(Ok(()), Err)
    }

    fn flush_row(&mut self) -> Option<()> {
        if self.error.is_none() {
            self.error = self.out.write_all(&self.row).err();
        }
        self.row.clear();
        self.error.is_none().then_some(())
    }

    #[inline(always)]
    fn push(&mut self, bytes: &[u8]) -> Option<()> {
        if self.row.len() + bytes.len() > ROW_CHUNK {
            self.flush_row()?;
        }
        self.row.extend_from_slice(bytes);
        Some(())
    }

    fn write_row(&mut self, a: usize, b: usize) -> Option<()> {
        debug_assert!(a < b && b < self.lanes);
        for _ in 0..a {
            self.push(&[EMPTY_LANE, b' '])?;
        }
        self.push(&[END_MARKER])?;
        for _ in a + 1..b {
            self.push(&[b'-', CROSSED_LANE])?;
        }
        self.push(&[b'-', END_MARKER])?;
        for _ in b + 1..self.lanes {
            self.push(&[b' ', EMPTY_LANE])?;
        }
        self.push(b"\n")?;
        self.flush_row()
    }
}

impl<W: Write> CompareExchange for DiagramWriter<'_, W> {
    fn compare_exchange(&mut self, a: usize, b: usize) {
        if self.error.is_none() {
            let _ = self.write_row(a, b);
        }
    }

    fn stopped(&self) -> bool {
        self.error.is_some()
    }
}

/// Parse a line written by [`PseudocodeWriter`] back into its two lane indices.
pub fn parse_pseudocode_line(line: &str) -> Option<(usize, usize)> {
    let (a, b) = line.trim().strip_prefix("swap(")?.strip_suffix(')')?.split_once(',')?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}

impl Network {
    pub fn render<W: Write>(&self, out: &mut W, mode: RenderMode) -> Result<()> {
        debug!("rendering network for {} lanes as {mode:?}", self.len());
        match mode {
            RenderMode::Pseudocode => {
                let mut writer = PseudocodeWriter::new(out);
                self.visit(&mut writer);
                writer.finish()?;
            }
            RenderMode::Diagram => {
                let mut writer = DiagramWriter::new(out, self.len());
                self.visit(&mut writer);
                writer.finish()?;
            }
        }
        Ok(())
    }
}

/// Write the network for `len` elements to `out`.
///
/// Fails with [`crate::Error::InvalidLength`] before anything is written if `len < 1`.
pub fn render<W: Write>(out: &mut W, len: i64, mode: RenderMode) -> Result<()> {
    Network::try_from(len)?.render(out, mode)
}
