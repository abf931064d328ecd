//! CLI front-end for the GCIF-mono mask decoder, mirroring the teacher's
//! `gzipd` binary (a `structopt`-derived params struct driving a single
//! library call) but surfacing spec.md §6's flag/exit-code table instead of
//! gzip's two-flag surface.
//!
//! Stream framing: the core codec (and `spec.md`) has no header for
//! `width`/`height`/the trailer hash — those live in file framing that is
//! explicitly out of scope for the core (§1). This binary settles on the
//! simplest possible framing so `-d`/`-t` have something concrete to read:
//! a 12-byte little-endian prologue (`width`, `height`, `hash`) followed by
//! the raw word stream `reader::read` expects.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use gcif_mask_rs::mask::MaskImage;
use gcif_mask_rs::{decode_mask, DecodeError};
use log::LevelFilter;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(name = "gcifmask", about = "GCIF-mono monochrome mask codec")]
struct Params {
    /// Compress IN to OUT. Not implemented: encoding is out of scope.
    #[structopt(short = "c", number_of_values = 2, parse(from_os_str))]
    compress: Option<Vec<PathBuf>>,
    /// Decompress IN to a PBM file at OUT.
    #[structopt(short = "d", number_of_values = 2, parse(from_os_str))]
    decompress: Option<Vec<PathBuf>>,
    /// Decode IN and verify its integrity hash without writing output.
    #[structopt(short = "t", parse(from_os_str))]
    test: Option<PathBuf>,
    /// Verbose logging.
    #[structopt(short = "v")]
    verbose: bool,
    /// Print decode timing statistics.
    #[structopt(short = "s")]
    stats: bool,
}

const PROLOGUE_LEN: usize = 12;

fn load_stream(path: &Path) -> std::io::Result<(u32, u32, u32, Vec<u8>)> {
    let bytes = std::fs::read(path)?;
    if bytes.len() < PROLOGUE_LEN {
        return Err(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "file shorter than the width/height/hash prologue",
        ));
    }
    let width = u32::from_le_bytes(bytes[0..4].try_into().unwrap());
    let height = u32::from_le_bytes(bytes[4..8].try_into().unwrap());
    let hash = u32::from_le_bytes(bytes[8..12].try_into().unwrap());
    Ok((width, height, hash, bytes[PROLOGUE_LEN..].to_vec()))
}

fn write_pbm(path: &Path, image: &MaskImage) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write!(out, "P4\n{} {}\n", image.width(), image.height())?;
    for row in 0..image.height() {
        for &word in image.row(row) {
            out.write_all(&word.to_be_bytes())?;
        }
    }
    out.flush()
}

fn decode(input: &Path, stats: bool) -> Result<MaskImage, i32> {
    let (width, height, hash, words) = load_stream(input).map_err(|e| {
        eprintln!("failed to read {}: {e}", input.display());
        3
    })?;
    let start = Instant::now();
    let image = decode_mask(&words, width, height, Some(hash)).map_err(|e| {
        eprintln!("decode failed: {e}");
        match e {
            DecodeError::EncodingUnsupported => 2,
            _ => 3,
        }
    })?;
    if stats {
        println!("decoded {width}x{height} mask in {:?}", start.elapsed());
    }
    Ok(image)
}

fn run(params: &Params) -> i32 {
    if let Some(files) = &params.compress {
        eprintln!("{}", DecodeError::EncodingUnsupported);
        let _ = (&files[0], &files[1]);
        return 2;
    }
    if let Some(files) = &params.decompress {
        let image = match decode(&files[0], params.stats) {
            Ok(image) => image,
            Err(code) => return code,
        };
        if let Err(e) = write_pbm(&files[1], &image) {
            eprintln!("failed to write {}: {e}", files[1].display());
            return 3;
        }
        return 0;
    }
    if let Some(input) = &params.test {
        return match decode(input, params.stats) {
            Ok(_) => 0,
            Err(code) => code,
        };
    }
    eprintln!("nothing to do: pass one of -c, -d, -t (see --help)");
    1
}

fn main() {
    let params = Params::from_args();
    let level = if params.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new().filter_level(level).init();

    process::exit(run(&params));
}
