//! Keyboard routing, host drops and other world-level events.

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgba, RgbaImage};
    use morphic::{
        Morph,
        error::Result,
        event::{Event, drop::DroppedFile, key::KeyCode},
        geom::{Point, Rect},
        testing::{Harness, Log, Recorder, log},
    };

    fn entries(l: &Log) -> Vec<String> {
        l.lock().map(|l| l.clone()).unwrap_or_default()
    }

    fn matching(l: &Log, fragment: &str) -> Vec<String> {
        entries(l).into_iter().filter(|e| e.contains(fragment)).collect()
    }

    fn png() -> Vec<u8> {
        let img = RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).expect("png encodes");
        out.into_inner()
    }

    fn target(h: &mut Harness, l: &Log) -> Result<()> {
        h.add(
            Morph::new(Recorder::new("r", l).handling())
                .bounds(Rect::from_xywh(10.0, 10.0, 100.0, 100.0)),
        )?;
        Ok(())
    }

    #[test]
    fn keys_without_focus_stop_at_the_world() -> Result<()> {
        let l = log();
        let mut h = Harness::new();
        target(&mut h, &l)?;
        h.key('a')?;
        assert!(matching(&l, "key").is_empty());
        Ok(())
    }

    #[test]
    fn keys_bubble_from_the_focused_morph() -> Result<()> {
        let l = log();
        let mut h = Harness::new();
        let outer = h.add(
            Morph::new(Recorder::new("outer", &l).handling())
                .bounds(Rect::from_xywh(0.0, 0.0, 100.0, 100.0)),
        )?;
        let inner = h.add_to(
            outer,
            Morph::new(Recorder::new("inner", &l)).bounds(Rect::from_xywh(10.0, 10.0, 20.0, 20.0)),
        )?;
        h.world.core.set_keyboard_focus(Some(inner));
        h.key('x')?;
        assert_eq!(matching(&l, "key"), vec![
            "inner.process_key_down",
            "outer.process_key_down",
            "inner.process_key_press",
            "outer.process_key_press",
            "inner.process_key_up",
            "outer.process_key_up",
        ]);
        Ok(())
    }

    #[test]
    fn destroying_the_focus_sends_keys_to_the_world() -> Result<()> {
        let l = log();
        let mut h = Harness::new();
        let r = h.add(Morph::new(Recorder::new("r", &l).handling()))?;
        h.world.core.set_keyboard_focus(Some(r));
        h.world.core.destroy(r)?;
        assert_eq!(h.world.core.keyboard_focus(), None);
        h.key(KeyCode::Enter)?;
        assert!(matching(&l, "key").is_empty());
        Ok(())
    }

    #[test]
    fn a_single_file_is_delivered_without_a_bulk_bracket() -> Result<()> {
        let l = log();
        let mut h = Harness::new();
        target(&mut h, &l)?;
        h.world.drop_files(Point::new(50.0, 50.0), &[DroppedFile::new(
            "notes.txt",
            "text/plain",
            b"hello".to_vec(),
        )]);
        assert_eq!(matching(&l, "drop"), vec!["r.dropped_text"]);
        Ok(())
    }

    #[test]
    fn several_files_are_bracketed() -> Result<()> {
        let l = log();
        let mut h = Harness::new();
        target(&mut h, &l)?;
        let files = vec![
            DroppedFile::new("pic.png", "image/png", png()),
            DroppedFile::new("logo.svg", "image/svg+xml", b"<svg/>".to_vec()),
            DroppedFile::new("clip.ogg", "", vec![0, 1, 2]),
            DroppedFile::new("data.bin", "application/octet-stream", vec![7]),
        ];
        h.world.event(Event::Drop {
            pos: Point::new(50.0, 50.0),
            files,
        })?;
        assert_eq!(matching(&l, "drop"), vec![
            "r.begin_bulk_drop",
            "r.dropped_image",
            "r.dropped_svg",
            "r.dropped_audio",
            "r.dropped_binary",
            "r.end_bulk_drop",
        ]);
        assert!(h.notices().is_empty());
        Ok(())
    }

    #[test]
    fn undecodable_files_arrive_as_binary_with_a_notice() -> Result<()> {
        let l = log();
        let mut h = Harness::new();
        target(&mut h, &l)?;
        h.world.drop_files(Point::new(50.0, 50.0), &[DroppedFile::new(
            "broken.png",
            "image/png",
            vec![1, 2, 3],
        )]);
        assert_eq!(matching(&l, "drop"), vec!["r.dropped_binary"]);
        let notices = h.notices();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].starts_with("broken.png"));
        Ok(())
    }

    #[test]
    fn the_world_reports_files_nobody_takes() -> Result<()> {
        let mut h = Harness::new();
        h.world.drop_files(Point::new(300.0, 250.0), &[DroppedFile::new(
            "notes.txt",
            "text/plain",
            b"hello".to_vec(),
        )]);
        assert_eq!(h.notices(), vec!["nothing here accepts notes.txt".to_string()]);
        Ok(())
    }

    #[test]
    fn dropped_text_reaches_the_morph_under_the_pointer() -> Result<()> {
        let l = log();
        let mut h = Harness::new();
        target(&mut h, &l)?;
        h.world.event(Event::DropText {
            pos: Point::new(20.0, 20.0),
            text: "some words".into(),
        })?;
        assert_eq!(matching(&l, "drop"), vec!["r.dropped_text"]);
        assert!(h.notices().is_empty());
        Ok(())
    }

    #[test]
    fn double_clicks_are_delivered() -> Result<()> {
        let l = log();
        let mut h = Harness::new();
        target(&mut h, &l)?;
        h.double_click(Point::new(20.0, 20.0));
        assert_eq!(matching(&l, "double"), vec!["r.mouse_double_click"]);
        Ok(())
    }

    #[test]
    fn resizing_tells_every_morph() -> Result<()> {
        let l = log();
        let mut h = Harness::new();
        target(&mut h, &l)?;
        h.cycle()?;
        h.world.event(Event::Resize(Point::new(500.0, 400.0)))?;
        assert_eq!(h.world.canvas().width(), 500);
        assert_eq!(h.world.canvas().height(), 400);
        assert_eq!(matching(&l, "resize"), vec!["r.react_to_world_resize"]);

        h.cycle()?;
        let all = Rect::from_xywh(0.0, 0.0, 500.0, 400.0);
        assert!(h.world.last_repaired().iter().any(|r| r.contains_rect(&all)));
        Ok(())
    }
}
