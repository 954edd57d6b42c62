use std::io::{Read, Seek, SeekFrom};

use imgpeek_common::math::*;
use imgpeek_common::prelude::*;

use super::{Error, Marker};

pub const MARKER_START: u8 = 0xFF;

/// Marker, code, length and the first five payload bytes
///
/// For a frame header the payload starts with sample precision, number of
/// lines and samples per line.
pub const SEGMENT_HEAD_LEN: usize = 9;

/// Offset of the first segment after the SOI marker
const FIRST_SEGMENT: u64 = 2;

#[derive(Clone, Debug)]
pub struct Segment {
    marker: Marker,
    pos: u64,
    length: u16,
    head: [u8; SEGMENT_HEAD_LEN],
}

impl Segment {
    pub fn marker(&self) -> Marker {
        self.marker
    }

    /// Position of the marker start byte
    pub fn pos(&self) -> u64 {
        self.pos
    }

    /// Declared length, including the two length bytes
    pub fn length(&self) -> u16 {
        self.length
    }

    /// Width and height if this is a start of frame segment
    pub fn frame_dimensions(&self) -> Option<Dimensions> {
        if !self.marker.is_sof() {
            return None;
        }

        let [_, _, _, _, _precision, y0, y1, x0, x1] = self.head;
        let height = u16::from_be_bytes([y0, y1]);
        let width = u16::from_be_bytes([x0, x1]);

        Some(Dimensions::new(width.into(), height.into()))
    }

    /// Position of the following segment's marker
    fn next_pos(&self) -> Result<u64, MathError> {
        self.pos.safe_add(2)?.safe_add(self.length.into())
    }
}

/// Walks segments by seeking over their declared length
///
/// Ends when the stream ends at a segment boundary. Stops after the first
/// error.
#[derive(Debug)]
pub struct Segments<'a, R> {
    source: &'a mut R,
    next_pos: Option<u64>,
}

impl<'a, R: Read + Seek> Segments<'a, R> {
    pub fn new(source: &'a mut R) -> Self {
        Self {
            source,
            next_pos: Some(FIRST_SEGMENT),
        }
    }

    /// Segment at `pos` or `None` if the stream ends exactly at `pos`
    fn read_segment(&mut self, pos: u64) -> Result<Option<Segment>, Error> {
        self.source.seek(SeekFrom::Start(pos))?;

        let mut head = [0; SEGMENT_HEAD_LEN];
        let [first, rest @ ..] = &mut head;
        if self.source.read(std::slice::from_mut(first))? == 0 {
            return Ok(None);
        }
        self.source
            .read_exact(rest)
            .map_err(|_| Error::UnexpectedEof)?;

        let [marker_start, code, l0, l1, ..] = head;
        if marker_start != MARKER_START {
            return Err(Error::NoMarker(pos, marker_start));
        }

        Ok(Some(Segment {
            marker: Marker::from(code),
            pos,
            length: u16::from_be_bytes([l0, l1]),
            head,
        }))
    }
}

impl<R: Read + Seek> Iterator for Segments<'_, R> {
    type Item = Result<Segment, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let pos = self.next_pos.take()?;

        let segment = match self.read_segment(pos) {
            Ok(segment) => segment?,
            Err(err) => return Some(Err(err)),
        };

        match segment.next_pos() {
            Ok(next_pos) => self.next_pos = Some(next_pos),
            Err(err) => return Some(Err(err.into())),
        }

        Some(Ok(segment))
    }
}
