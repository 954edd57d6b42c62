pub trait ImageFormat {
    /// Usually checks if data start with correct magic bytes
    fn is_filetype(data: &[u8]) -> bool;
}

/// Encoding format of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Format {
    #[default]
    Unknown,
    Jpeg,
    Png,
    WebP,
    Gif,
    Bmp,
    /// Portable bitmap, `P1`
    Pbm,
    /// Portable graymap, `P2` and `P5`
    Pgm,
    /// Portable pixmap, `P3` and `P6`
    Ppm,
    /// Raw portable bitmap, `P4`
    Bpm,
    /// XV thumbnail, `P7`
    Xv,
    /// X11 bitmap
    Xbm,
    /// X11 pixmap
    Xpm,
    Tiff,
    /// Photoshop document
    Psd,
    /// Multiple-image network graphics
    Mng,
    /// Silicon Graphics image
    Rgb,
    /// Sun raster
    Ras,
    Pcx,
}

impl Format {
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Unknown => "application/octet-stream",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::WebP => "image/webp",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
            Self::Pbm | Self::Bpm => "image/x-portable-bitmap",
            Self::Pgm => "image/x-portable-graymap",
            Self::Ppm => "image/x-portable-pixmap",
            Self::Xv => "image/x-portable-arbitrarymap",
            Self::Xbm => "image/x-xbitmap",
            Self::Xpm => "image/x-xpixmap",
            Self::Tiff => "image/tiff",
            Self::Psd => "image/vnd.adobe.photoshop",
            Self::Mng => "video/x-mng",
            Self::Rgb => "image/x-rgb",
            Self::Ras => "image/x-cmu-raster",
            Self::Pcx => "image/vnd.zbrush.pcx",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::WebP => "WEBP",
            Self::Gif => "GIF",
            Self::Bmp => "BMP",
            Self::Pbm => "PBM",
            Self::Pgm => "PGM",
            Self::Ppm => "PPM",
            Self::Bpm => "BPM",
            Self::Xv => "XV",
            Self::Xbm => "XBM",
            Self::Xpm => "XPM",
            Self::Tiff => "TIFF",
            Self::Psd => "PSD",
            Self::Mng => "MNG",
            Self::Rgb => "RGB",
            Self::Ras => "RAS",
            Self::Pcx => "PCX",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Both sides are non-zero
    pub fn is_determined(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// Format and pixel size of an image
///
/// The default value is the unknown record with zero width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Info {
    pub format: Format,
    pub width: u32,
    pub height: u32,
}

impl Info {
    pub fn new(format: Format, dimensions: Dimensions) -> Self {
        Self {
            format,
            width: dimensions.width,
            height: dimensions.height,
        }
    }

    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn is_unknown(&self) -> bool {
        self.format == Format::Unknown
    }

    /// Returns the dimensions if a format was detected
    pub fn dimensions(&self) -> Option<Dimensions> {
        if self.is_unknown() {
            None
        } else {
            Some(Dimensions::new(self.width, self.height))
        }
    }
}
