use crate::bio::sequence::Sequence;
use crate::{GenoclustError, Result};
use flate2::read::GzDecoder;
use memmap2::Mmap;
use nom::{
    bytes::complete::{tag, take_till},
    character::complete::line_ending,
    combinator::{map, opt},
    IResult,
};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Parse a FASTA header line. The record id doubles as the sequence label
/// (intergenic, intron, or exon); anything after the id is ignored.
fn parse_header(input: &[u8]) -> IResult<&[u8], &str> {
    let (input, _) = tag(b">")(input)?;
    let (input, id) = map(
        take_till(|c: u8| c == b' ' || c == b'\t' || c == b'\n' || c == b'\r'),
        |s| std::str::from_utf8(s).unwrap_or(""),
    )(input)?;
    let (input, _) = take_till(|c: u8| c == b'\n' || c == b'\r')(input)?;
    let (input, _) = opt(line_ending)(input)?;
    Ok((input, id))
}

/// Parse sequence lines until the next header or EOF, uppercasing bases and
/// dropping whitespace.
fn parse_bases(input: &[u8]) -> IResult<&[u8], String> {
    let mut bases = String::new();
    let mut remaining = input;

    while !remaining.is_empty() && remaining[0] != b'>' {
        let (rest, line) =
            take_till::<_, _, nom::error::Error<_>>(|c: u8| c == b'\n' || c == b'\r')(remaining)?;
        let (rest, _) = opt(line_ending)(rest)?;

        for &c in line {
            if !c.is_ascii_whitespace() {
                bases.push(c.to_ascii_uppercase() as char);
            }
        }

        remaining = rest;
    }

    Ok((remaining, bases))
}

/// Parse a labeled FASTA corpus from bytes.
pub fn parse_corpus_from_bytes(data: &[u8]) -> Result<Vec<Sequence>> {
    let mut sequences = Vec::new();
    let mut remaining = data;

    loop {
        // Skip blank lines and stray whitespace between records
        while !remaining.is_empty() && remaining[0].is_ascii_whitespace() {
            remaining = &remaining[1..];
        }

        if remaining.is_empty() {
            break;
        }

        if remaining[0] != b'>' {
            return Err(GenoclustError::Parse(
                "Expected FASTA header starting with '>'".to_string(),
            ));
        }

        let (rest, id) = parse_header(remaining)
            .map_err(|_| GenoclustError::Parse("Failed to parse FASTA header".to_string()))?;
        let (rest, bases) = parse_bases(rest)
            .map_err(|_| GenoclustError::Parse("Failed to parse FASTA sequence".to_string()))?;

        if !bases.is_empty() {
            sequences.push(Sequence::from_parts(&bases, id)?);
        }

        remaining = rest;
    }

    Ok(sequences)
}

/// Parse a labeled FASTA file into a corpus (supports .gz compression).
pub fn parse_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<Sequence>> {
    let path = path.as_ref();

    if path.extension().and_then(|s| s.to_str()) == Some("gz") {
        let file = File::open(path)?;
        let mut decoder = GzDecoder::new(BufReader::new(file));
        let mut buffer = Vec::new();
        decoder.read_to_end(&mut buffer)?;
        parse_corpus_from_bytes(&buffer)
    } else {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        parse_corpus_from_bytes(&mmap[..])
    }
}
