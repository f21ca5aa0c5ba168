use std::cmp::min;
use std::convert::TryInto;
use std::io::Write;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::{Error, Result};

/// Nominal size of every block handed to [`write_block`].
pub const BLOCK_SIZE: usize = 4096;

/// What the generated file is filled with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillMode {
    RandomBytes,
    SinglePattern(Vec<u8>),
    /// Blocks are made of patterns picked at random, at least two of them.
    RotatingPatterns(Vec<Vec<u8>>),
}

impl FillMode {
    /// Selects the fill mode from user supplied patterns: none means random
    /// bytes, one is repeated, more than one are rotated.
    pub fn from_patterns<I, P>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<Vec<u8>>,
    {
        let mut patterns: Vec<Vec<u8>> = patterns.into_iter().map(Into::into).collect();
        if patterns.iter().any(|x| x.is_empty()) {
            return Err(Error::EmptyPattern);
        }

        Ok(match patterns.len() {
            0 => FillMode::RandomBytes,
            1 => FillMode::SinglePattern(patterns.remove(0)),
            _ => FillMode::RotatingPatterns(patterns),
        })
    }

    fn check(&self) -> Result<()> {
        match self {
            FillMode::RandomBytes => Ok(()),
            FillMode::SinglePattern(p) if !p.is_empty() => Ok(()),
            FillMode::RotatingPatterns(ps) if !ps.is_empty() && ps.iter().all(|x| !x.is_empty()) => {
                Ok(())
            }
            _ => Err(Error::EmptyPattern),
        }
    }
}

fn repeat_pattern(pattern: &[u8]) -> Vec<u8> {
    debug_assert!(!pattern.is_empty());

    let copies = (BLOCK_SIZE + pattern.len() - 1) / pattern.len();
    pattern.repeat(copies)
}

fn rotate_patterns<R: Rng + ?Sized>(patterns: &[Vec<u8>], rng: &mut R, block: &mut Vec<u8>) {
    block.clear();
    while block.len() < BLOCK_SIZE {
        // patterns is never empty for RotatingPatterns
        if let Some(p) = patterns.choose(rng) {
            block.extend_from_slice(p);
        }
    }
}

/// Writes `block` at `offset` without going past `target`.
///
/// Returns the offset after the write. Nothing is written once `offset`
/// reached `target`, and the block is cut short if it would cross it.
pub fn write_block<W: Write + ?Sized>(
    out: &mut W,
    block: &[u8],
    offset: u64,
    target: u64,
) -> Result<u64> {
    if offset >= target {
        return Ok(offset);
    }

    let left = target - offset;
    let n = min(block.len(), left.try_into().unwrap_or(usize::MAX));
    out.write_all(&block[..n]).map_err(Error::Write)?;

    Ok(offset + n as u64)
}

/// Fills `out` with exactly `target` bytes.
pub fn write_sized<W, R>(out: &mut W, target: u64, mode: &FillMode, rng: &mut R) -> Result<u64>
where
    W: Write + ?Sized,
    R: Rng + ?Sized,
{
    write_sized_with_progress(out, target, mode, rng, |_| ())
}

/// Same as [`write_sized`], `progress` is called with the current offset after
/// every block.
pub fn write_sized_with_progress<W, R, F>(
    out: &mut W,
    target: u64,
    mode: &FillMode,
    rng: &mut R,
    mut progress: F,
) -> Result<u64>
where
    W: Write + ?Sized,
    R: Rng + ?Sized,
    F: FnMut(u64),
{
    mode.check()?;
    let mut offset = 0;

    match mode {
        FillMode::RandomBytes => {
            debug!("filling {} bytes with random data", target);
            let mut block = vec![0u8; BLOCK_SIZE];
            while offset < target {
                rng.fill_bytes(&mut block);
                offset = write_block(out, &block, offset, target)?;
                progress(offset);
            }
        }
        FillMode::SinglePattern(pattern) => {
            let block = repeat_pattern(pattern);
            debug!(
                "filling {} bytes with {} byte pattern, block is {} bytes",
                target,
                pattern.len(),
                block.len()
            );
            while offset < target {
                offset = write_block(out, &block, offset, target)?;
                progress(offset);
            }
        }
        FillMode::RotatingPatterns(patterns) => {
            debug!(
                "filling {} bytes rotating {} patterns",
                target,
                patterns.len()
            );
            let max_len = patterns.iter().map(Vec::len).max().unwrap_or(0);
            let mut block = Vec::with_capacity(BLOCK_SIZE + max_len);
            while offset < target {
                rotate_patterns(patterns, rng, &mut block);
                offset = write_block(out, &block, offset, target)?;
                progress(offset);
            }
        }
    }

    debug_assert_eq!(offset, target);
    Ok(offset)
}
