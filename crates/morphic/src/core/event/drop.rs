//! Files dropped onto the world from the host.

use image::RgbaImage;

use crate::error::{Error, Result};

/// Suffixes treated as text regardless of the reported MIME type.
const TEXT_SUFFIXES: &[&str] = &["txt", "csv", "json", "text", "xml", "js", "md"];

/// A file delivered by a host drag-and-drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedFile {
    /// File name as reported by the host.
    pub name: String,
    /// MIME type as reported by the host, possibly empty.
    pub mime: String,
    /// Raw file contents.
    pub data: Vec<u8>,
}

/// A dropped file sorted by the hook that receives it.
#[derive(Debug, Clone)]
pub enum Payload {
    /// SVG source text.
    Svg(String),
    /// A decoded raster.
    Image(RgbaImage),
    /// Encoded audio.
    Audio(Vec<u8>),
    /// Decoded text.
    Text(String),
    /// Anything else.
    Binary(Vec<u8>),
}

impl DroppedFile {
    /// Construct a dropped file.
    pub fn new(name: impl Into<String>, mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            data,
        }
    }

    /// Lowercased extension of the file name, if it has one.
    pub fn suffix(&self) -> Option<String> {
        let (stem, suffix) = self.name.rsplit_once('.')?;
        if stem.is_empty() || suffix.is_empty() {
            return None;
        }
        Some(suffix.to_ascii_lowercase())
    }

    /// Sort the file into a payload kind and decode it.
    ///
    /// SVG is checked before other images since it arrives as `image/svg+xml`.
    /// An error means the file claimed a kind it could not be decoded as;
    /// callers fall back to [`Payload::Binary`].
    pub fn classify(&self) -> Result<Payload> {
        let suffix = self.suffix();
        let suffix = suffix.as_deref();
        if self.mime.contains("svg") || suffix == Some("svg") {
            return Ok(Payload::Svg(self.utf8()?));
        }
        if self.mime.starts_with("image") {
            let image = image::load_from_memory(&self.data)?;
            return Ok(Payload::Image(image.to_rgba8()));
        }
        if self.mime.starts_with("audio") || suffix == Some("ogg") {
            return Ok(Payload::Audio(self.data.clone()));
        }
        if self.mime.starts_with("text") || suffix.is_some_and(|s| TEXT_SUFFIXES.contains(&s)) {
            return Ok(Payload::Text(self.utf8()?));
        }
        Ok(Payload::Binary(self.data.clone()))
    }

    /// The contents as UTF-8 text.
    fn utf8(&self) -> Result<String> {
        String::from_utf8(self.data.clone())
            .map_err(|e| Error::Decode(format!("{}: {e}", self.name)))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgba};

    use super::*;

    fn png() -> Vec<u8> {
        let img = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn suffixes() {
        assert_eq!(DroppedFile::new("a.TXT", "", vec![]).suffix().as_deref(), Some("txt"));
        assert_eq!(DroppedFile::new(".bashrc", "", vec![]).suffix(), None);
        assert_eq!(DroppedFile::new("noext", "", vec![]).suffix(), None);
    }

    #[test]
    fn classification() -> Result<()> {
        let svg = DroppedFile::new("x.svg", "image/svg+xml", b"<svg/>".to_vec());
        assert!(matches!(svg.classify()?, Payload::Svg(s) if s == "<svg/>"));

        let img = DroppedFile::new("x.png", "image/png", png());
        match img.classify()? {
            Payload::Image(i) => assert_eq!(i.dimensions(), (3, 2)),
            other => panic!("unexpected {other:?}"),
        }

        let ogg = DroppedFile::new("song.ogg", "", vec![1, 2]);
        assert!(matches!(ogg.classify()?, Payload::Audio(_)));

        let csv = DroppedFile::new("t.csv", "application/octet-stream", b"a,b".to_vec());
        assert!(matches!(csv.classify()?, Payload::Text(t) if t == "a,b"));

        let bin = DroppedFile::new("blob", "application/zip", vec![0, 159]);
        assert!(matches!(bin.classify()?, Payload::Binary(_)));
        Ok(())
    }

    #[test]
    fn decode_failures() {
        let broken = DroppedFile::new("x.png", "image/png", vec![1, 2, 3]);
        assert!(matches!(broken.classify(), Err(Error::Decode(_))));
        let bad_text = DroppedFile::new("x.txt", "text/plain", vec![0xff, 0xfe]);
        assert!(matches!(bad_text.classify(), Err(Error::Decode(_))));
    }
}
