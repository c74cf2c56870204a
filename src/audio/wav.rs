//! Minimal RIFF/WAVE PCM container I/O.
//!
//! Reads the subset the resampler needs: a RIFF/WAVE file with a PCM `fmt `
//! chunk and a `data` chunk, other chunks skipped by their declared size.
//! Writing emits the canonical 44-byte header followed by raw little-endian
//! samples.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::common::errors::WavError;

/// Microsoft PCM format tag.
const FORMAT_PCM: u16 = 1;

/// A decoded WAVE file: raw sample bytes plus the `fmt ` chunk fields the
/// front end validates against.
#[derive(Debug, Clone)]
pub struct WavAudio {
    /// Raw `data` chunk contents, little-endian interleaved samples.
    pub data: Vec<u8>,
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
}

impl WavAudio {
    /// Reinterpret the data bytes as 16-bit signed samples. Only meaningful
    /// when `bits_per_sample == 16`; a trailing odd byte is dropped.
    pub fn samples_i16(&self) -> Vec<i16> {
        self.data
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]))
            .collect()
    }
}

/// Load a RIFF/WAVE PCM file.
pub fn load(path: impl AsRef<Path>) -> Result<WavAudio, WavError> {
    let file = File::open(path).map_err(WavError::Open)?;
    let mut reader = BufReader::new(file);

    let mut fourcc = [0u8; 4];
    reader.read_exact(&mut fourcc).map_err(|_| WavError::NotRiff)?;
    if &fourcc != b"RIFF" {
        return Err(WavError::NotRiff);
    }
    let _riff_size = reader.read_u32::<LittleEndian>().map_err(|_| WavError::NotRiff)?;
    reader.read_exact(&mut fourcc).map_err(|_| WavError::NotWave)?;
    if &fourcc != b"WAVE" {
        return Err(WavError::NotWave);
    }

    let mut fmt: Option<(u16, u32, u16)> = None;
    let mut data: Option<Vec<u8>> = None;

    // Chunk walk: read each header, handle fmt/data, skip everything else.
    loop {
        if reader.read_exact(&mut fourcc).is_err() {
            break;
        }
        let size = match reader.read_u32::<LittleEndian>() {
            Ok(size) => size as u64,
            Err(_) => break,
        };
        let end = reader.stream_position()? + size;

        match &fourcc {
            // An undersized fmt chunk is skipped like any unknown chunk.
            b"fmt " if size >= 16 => {
                let trunc = |_| WavError::Truncated("fmt ");
                let format_tag = reader.read_u16::<LittleEndian>().map_err(trunc)?;
                if format_tag != FORMAT_PCM {
                    return Err(WavError::NotPcm(format_tag));
                }
                let channels = reader.read_u16::<LittleEndian>().map_err(trunc)?;
                let sample_rate = reader.read_u32::<LittleEndian>().map_err(trunc)?;
                let _avg_bytes_per_sec = reader.read_u32::<LittleEndian>().map_err(trunc)?;
                let _block_align = reader.read_u16::<LittleEndian>().map_err(trunc)?;
                let bits_per_sample = reader.read_u16::<LittleEndian>().map_err(trunc)?;
                fmt = Some((channels, sample_rate, bits_per_sample));
            }
            b"data" => {
                let mut bytes = vec![0u8; size as usize];
                reader
                    .read_exact(&mut bytes)
                    .map_err(|_| WavError::Truncated("data"))?;
                data = Some(bytes);
            }
            _ => {}
        }

        if reader.seek(SeekFrom::Start(end)).is_err() {
            break;
        }
    }

    let (channels, sample_rate, bits_per_sample) = fmt.ok_or(WavError::MissingChunk("fmt "))?;
    let data = data.ok_or(WavError::MissingChunk("data"))?;

    Ok(WavAudio {
        data,
        channels,
        sample_rate,
        bits_per_sample,
    })
}

/// Write 16-bit PCM samples as a minimal RIFF/WAVE file.
pub fn save(
    path: impl AsRef<Path>,
    samples: &[i16],
    channels: u16,
    sample_rate: u32,
) -> Result<(), WavError> {
    const BITS: u16 = 16;
    let data_len = (samples.len() * 2) as u32;

    let file = File::create(path).map_err(WavError::Open)?;
    let mut writer = BufWriter::new(file);

    writer.write_all(b"RIFF")?;
    // Header past the RIFF chunk header is 36 bytes.
    writer.write_u32::<LittleEndian>(36 + data_len)?;
    writer.write_all(b"WAVE")?;

    writer.write_all(b"fmt ")?;
    writer.write_u32::<LittleEndian>(16)?;
    writer.write_u16::<LittleEndian>(FORMAT_PCM)?;
    writer.write_u16::<LittleEndian>(channels)?;
    writer.write_u32::<LittleEndian>(sample_rate)?;
    writer.write_u32::<LittleEndian>(sample_rate * u32::from(channels) * u32::from(BITS) / 8)?;
    writer.write_u16::<LittleEndian>(channels * BITS / 8)?;
    writer.write_u16::<LittleEndian>(BITS)?;

    writer.write_all(b"data")?;
    writer.write_u32::<LittleEndian>(data_len)?;
    for &sample in samples {
        writer.write_i16::<LittleEndian>(sample)?;
    }
    writer.flush()?;

    Ok(())
}
