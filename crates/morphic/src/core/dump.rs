use std::io::Write;

use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use crate::{
    NodeId,
    core::Core,
    error::{Error, Result},
};

/// Walk the subtree under `root` and return a colourised outline of each
/// morph's name, bounds and flags. This is a debug function.
pub fn dump(core: &Core, root: NodeId) -> Result<String> {
    let mut buffer = Buffer::ansi();
    dump_node(&mut buffer, core, root, 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// The same outline without colour codes, for assertions and logs.
pub fn dump_plain(core: &Core, root: NodeId) -> Result<String> {
    let mut buffer = Buffer::no_color();
    dump_node(&mut buffer, core, root, 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Write an indented, coloured label followed by a value.
fn write_field(buffer: &mut Buffer, indent: &str, label: &str, value: &str) -> Result<()> {
    write!(buffer, "{indent}  ")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(buffer, "{label}")?;
    buffer.reset()?;
    writeln!(buffer, " {value}")?;
    Ok(())
}

/// Status words shown after a morph's name.
fn indicators(core: &Core, id: NodeId) -> Vec<(&'static str, Color)> {
    let mut out = Vec::new();
    let Some(node) = core.node(id) else {
        return out;
    };
    if core.keyboard_focus() == Some(id) {
        out.push(("FOCUSED", Color::Magenta));
    }
    if core.hand().grabbed() == Some(id) {
        out.push(("GRABBED", Color::Red));
    }
    if !node.is_visible() {
        out.push(("hidden", Color::Yellow));
    }
    if node.is_draggable() {
        out.push(("draggable", Color::Blue));
    }
    if node.is_template() {
        out.push(("template", Color::Blue));
    }
    if node.accepts_drops() {
        out.push(("drops", Color::Blue));
    }
    out
}

/// Emit one morph and recurse into its children.
fn dump_node(buffer: &mut Buffer, core: &Core, id: NodeId, level: usize) -> Result<()> {
    let node = core
        .node(id)
        .ok_or_else(|| Error::Internal("missing node".into()))?;
    let indent = "    ".repeat(level);

    write!(buffer, "{indent}")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    write!(buffer, "{}", node.name())?;
    buffer.reset()?;
    write!(buffer, " {id:?}")?;

    for (i, (word, color)) in indicators(core, id).into_iter().enumerate() {
        write!(buffer, "{}", if i == 0 { " " } else { ", " })?;
        buffer.set_color(ColorSpec::new().set_fg(Some(color)))?;
        write!(buffer, "{word}")?;
        buffer.reset()?;
    }
    writeln!(buffer)?;

    let b = node.bounds();
    write_field(
        buffer,
        &indent,
        "bounds:",
        &format!(
            "x: {}, y: {}, w: {}, h: {}",
            b.left(),
            b.top(),
            b.width(),
            b.height()
        ),
    )?;
    let c = node.color();
    write_field(
        buffer,
        &indent,
        "color:",
        &format!("rgba({}, {}, {}, {}) alpha {}", c.r, c.g, c.b, c.a, node.alpha()),
    )?;
    if node.fps() > 0.0 {
        write_field(buffer, &indent, "fps:", &node.fps().to_string())?;
    }

    for child in node.children() {
        dump_node(buffer, core, *child, level + 1)?;
    }
    Ok(())
}
