use std::io::{Read, Seek, SeekFrom};

use imgpeek_common::prelude::*;
use imgpeek_jpeg::Jpeg;
use imgpeek_png::{Mng, Png};
use imgpeek_text::{netpbm, xbm, xpm};
use imgpeek_tiff::Tiff;
use imgpeek_webp::WebP;

use crate::{raster, Error};

/// Bytes read before a signature is matched
///
/// Enough to cover the longest signature, `RIFF????WEBP`.
pub const PREFIX_LEN: usize = 12;

/// Magic bytes of a format and how to read its dimensions
#[derive(Debug, Clone, Copy)]
pub struct Signature {
    format: Format,
    matches: fn(&[u8]) -> bool,
    parser: Parser,
}

#[derive(Debug, Clone, Copy)]
enum Parser {
    /// Fixed size header that is read completely before parsing
    Header {
        len: usize,
        parse: fn(&[u8]) -> Result<Dimensions, Error>,
    },
    Jpeg,
    Tiff,
    Netpbm,
    Xbm,
    Xpm,
}

/// All supported signatures, in order of precedence
pub const SIGNATURES: &[Signature] = &[
    Signature::new(Format::Jpeg, imgpeek_jpeg::is_filetype, Parser::Jpeg),
    Signature::new(Format::Png, Png::is_filetype, header(imgpeek_png::HEADER_LEN, png)),
    Signature::new(Format::WebP, WebP::is_filetype, header(imgpeek_webp::HEADER_LEN, webp)),
    Signature::new(Format::Gif, raster::is_gif, header(raster::GIF_HEADER_LEN, raster_gif)),
    Signature::new(Format::Bmp, raster::is_bmp, header(raster::BMP_HEADER_LEN, raster_bmp)),
    Signature::new(Format::Pbm, is_pbm, Parser::Netpbm),
    Signature::new(Format::Pgm, is_pgm, Parser::Netpbm),
    Signature::new(Format::Ppm, is_ppm, Parser::Netpbm),
    Signature::new(Format::Bpm, is_bpm, Parser::Netpbm),
    Signature::new(Format::Xv, is_xv, Parser::Netpbm),
    Signature::new(Format::Xbm, xbm::is_filetype, Parser::Xbm),
    Signature::new(Format::Xpm, xpm::is_filetype, Parser::Xpm),
    Signature::new(Format::Tiff, imgpeek_tiff::is_filetype, Parser::Tiff),
    Signature::new(Format::Psd, raster::is_psd, header(raster::PSD_HEADER_LEN, raster_psd)),
    Signature::new(Format::Mng, Mng::is_filetype, header(imgpeek_png::HEADER_LEN, mng)),
    Signature::new(Format::Rgb, raster::is_rgb, header(raster::RGB_HEADER_LEN, raster_rgb)),
    Signature::new(Format::Ras, raster::is_ras, header(raster::RAS_HEADER_LEN, raster_ras)),
    Signature::new(Format::Pcx, raster::is_pcx, header(raster::PCX_HEADER_LEN, raster_pcx)),
];

impl Signature {
    const fn new(format: Format, matches: fn(&[u8]) -> bool, parser: Parser) -> Self {
        Self {
            format,
            matches,
            parser,
        }
    }

    /// First signature matching `prefix`
    pub fn find(prefix: &[u8]) -> Option<&'static Self> {
        SIGNATURES.iter().find(|x| x.matches(prefix))
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn matches(&self, prefix: &[u8]) -> bool {
        (self.matches)(prefix)
    }

    /// Reads the dimensions from `source`
    ///
    /// The `prefix` must be the first bytes of `source` and `source` must be
    /// positioned directly after them.
    fn read<R: Read + Seek>(
        &self,
        source: &mut R,
        prefix: &[u8; PREFIX_LEN],
    ) -> Result<Info, Error> {
        let dimensions = match self.parser {
            Parser::Header { len, parse } => {
                let mut header = prefix.to_vec();
                header.resize(len.max(PREFIX_LEN), 0);
                let rest = header.get_mut(PREFIX_LEN..).unwrap_or_default();
                source
                    .read_exact(rest)
                    .map_err(|_| Error::UnexpectedEof)?;

                parse(&header)?
            }
            Parser::Jpeg => Jpeg::new(&mut *source).dimensions()?,
            Parser::Tiff => {
                let (mut tiff, header) = Tiff::from_header(&mut *source)?;
                tiff.dimensions(&header)?
            }
            Parser::Netpbm => return Ok(netpbm::read_info(source)?),
            Parser::Xbm => xbm::read_dimensions(source)?,
            Parser::Xpm => xpm::read_dimensions(source)?,
        };

        Ok(Info::new(self.format, dimensions))
    }
}

/// Format and dimensions of the image in `source`
///
/// Every failure, including a source with less than [`PREFIX_LEN`] bytes,
/// results in [`Info::unknown`]. The source is dropped before returning.
///
/// ```
/// # use std::io::Cursor;
/// # use imgpeek::{Format, Info};
/// let info = imgpeek::detect(Cursor::new(b"P2\n10 20\n255\n"));
/// assert_eq!(info.format, Format::Pgm);
///
/// let info = imgpeek::detect(Cursor::new(b"not an image"));
/// assert_eq!(info, Info::unknown());
/// ```
pub fn detect<R: Read + Seek>(source: R) -> Info {
    match try_detect(source) {
        Ok(info) => info,
        Err(err) => {
            tracing::info!("Image format not detected: {err}");
            Info::unknown()
        }
    }
}

/// Same as [`detect`] but returns the reason of a failure
pub fn try_detect<R: Read + Seek>(mut source: R) -> Result<Info, Error> {
    source.seek(SeekFrom::Start(0))?;

    let mut prefix = [0; PREFIX_LEN];
    source.read_exact(&mut prefix).map_err(|err| {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::PrefixTooShort
        } else {
            Error::Io(err)
        }
    })?;

    let signature = Signature::find(&prefix).ok_or(Error::NoSupportedFiletypeFound)?;
    tracing::debug!("Signature matches {}", signature.format());

    let info = signature.read(&mut source, &prefix)?;
    tracing::debug!("Detected {info:?}");

    Ok(info)
}

/// Format of the first matching signature, without reading dimensions
///
/// ```
/// # use imgpeek::Format;
/// assert_eq!(imgpeek::guess_format(b"GIF89a"), Some(Format::Gif));
/// assert_eq!(imgpeek::guess_format(b"GIF"), None);
/// ```
pub fn guess_format(prefix: &[u8]) -> Option<Format> {
    Signature::find(prefix).map(Signature::format)
}

const fn header(len: usize, parse: fn(&[u8]) -> Result<Dimensions, Error>) -> Parser {
    Parser::Header { len, parse }
}

/// `P` followed by a type digit of `format`
fn netpbm_type(data: &[u8], format: Format) -> bool {
    matches!(data, [b'P', t, ..] if netpbm::format(*t) == Some(format))
}

fn is_pbm(data: &[u8]) -> bool {
    netpbm_type(data, Format::Pbm)
}

fn is_pgm(data: &[u8]) -> bool {
    netpbm_type(data, Format::Pgm)
}

fn is_ppm(data: &[u8]) -> bool {
    netpbm_type(data, Format::Ppm)
}

fn is_bpm(data: &[u8]) -> bool {
    netpbm_type(data, Format::Bpm)
}

fn is_xv(data: &[u8]) -> bool {
    netpbm_type(data, Format::Xv)
}

fn png(header: &[u8]) -> Result<Dimensions, Error> {
    Ok(Png::new(header)?.dimensions())
}

fn mng(header: &[u8]) -> Result<Dimensions, Error> {
    Ok(Mng::new(header)?.dimensions())
}

fn webp(header: &[u8]) -> Result<Dimensions, Error> {
    Ok(WebP::new(header)?.dimensions()?)
}

fn raster_gif(header: &[u8]) -> Result<Dimensions, Error> {
    Ok(raster::gif(header)?)
}

fn raster_bmp(header: &[u8]) -> Result<Dimensions, Error> {
    Ok(raster::bmp(header)?)
}

fn raster_psd(header: &[u8]) -> Result<Dimensions, Error> {
    Ok(raster::psd(header)?)
}

fn raster_rgb(header: &[u8]) -> Result<Dimensions, Error> {
    Ok(raster::rgb(header)?)
}

fn raster_ras(header: &[u8]) -> Result<Dimensions, Error> {
    Ok(raster::ras(header)?)
}

fn raster_pcx(header: &[u8]) -> Result<Dimensions, Error> {
    Ok(raster::pcx(header)?)
}
