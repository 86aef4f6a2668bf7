//! Plain-text renderer: one line per paint operation.

use ld_render::{DisplayList, SceneRenderer};
use std::io::{self, Write};

pub struct OutlineRenderer<W: Write> {
    out: W,
}

impl<W: Write> OutlineRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SceneRenderer for OutlineRenderer<W> {
    type Error = io::Error;

    fn render(&mut self, list: &DisplayList) -> io::Result<()> {
        writeln!(
            self.out,
            "canvas {}x{}, {} item(s)",
            list.canvas.width(),
            list.canvas.height(),
            list.items.len()
        )?;
        for item in &list.items {
            let origin = item.transform * kurbo::Point::ORIGIN;
            writeln!(
                self.out,
                "  {:?} {} at ({:.0}, {:.0}) {}x{} opacity {:.2}",
                item.kind,
                item.id,
                origin.x,
                origin.y,
                item.size.width,
                item.size.height,
                item.opacity
            )?;
        }
        Ok(())
    }
}
