//! SVG scene writer
//!
//! One primitive per ground shape, in ground order, followed by the
//! trajectory annotations. Text styles emit nothing themselves; they set the
//! font attributes of every text after them.

use std::fmt::{self, Write};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::settings::Settings;
use crate::shape::{Shape, TextStyle};
use crate::sim::{Ground, Trajectory};

/// Everything one document shows
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub ground: &'a Ground,
    pub trajectories: &'a [Trajectory],
    /// viewBox edge length
    pub view_box: f64,
}

/// Render a scene to SVG text
pub fn render(scene: &Scene<'_>, settings: &Settings) -> std::result::Result<String, fmt::Error> {
    let mut svg = String::new();

    writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}">"#,
        scene.view_box, scene.view_box
    )?;

    let mut style: Option<&TextStyle> = None;
    for shape in scene.ground.iter() {
        match shape {
            Shape::TextStyle(ts) => style = Some(ts),
            other => render_shape(&mut svg, other, style)?,
        }
    }

    for trajectory in scene.trajectories {
        render_trajectory(&mut svg, trajectory, settings)?;
    }

    writeln!(svg, "</svg>")?;
    Ok(svg)
}

/// Render and write a scene to `path`
pub fn write_scene(path: &Path, scene: &Scene<'_>, settings: &Settings) -> Result<()> {
    let svg = render(scene, settings)?;
    fs::write(path, svg).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "wrote {} ({} shapes, {} annotations)",
        path.display(),
        scene.ground.len(),
        scene.trajectories.len()
    );
    Ok(())
}

fn render_shape(svg: &mut String, shape: &Shape, style: Option<&TextStyle>) -> fmt::Result {
    match shape {
        Shape::Circle(c) => writeln!(
            svg,
            "<circle cx='{:.2}' cy='{:.2}' r='{:.2}' fill='{}' stroke='{}'/>",
            c.center.x,
            c.center.y,
            c.radius,
            escape_xml(&c.fill_color),
            escape_xml(&c.border_color)
        ),
        Shape::Rectangle(r) => writeln!(
            svg,
            "<rect x='{:.2}' y='{:.2}' width='{:.2}' height='{:.2}' fill='{}' stroke='{}'/>",
            r.origin.x,
            r.origin.y,
            r.width,
            r.height,
            escape_xml(&r.fill_color),
            escape_xml(&r.border_color)
        ),
        Shape::Line(l) => writeln!(
            svg,
            "<line x1='{:.2}' y1='{:.2}' x2='{:.2}' y2='{:.2}' stroke='{}'/>",
            l.start.x,
            l.start.y,
            l.end.x,
            l.end.y,
            escape_xml(&l.color)
        ),
        Shape::Text(t) => {
            write!(
                svg,
                "<text x='{:.2}' y='{:.2}' fill='{}' stroke='{}' text-anchor='{}'",
                t.pos.x,
                t.pos.y,
                escape_xml(&t.fill_color),
                escape_xml(&t.border_color),
                t.anchor.as_str()
            )?;
            if let Some(ts) = style {
                write!(
                    svg,
                    " font-family='{}' font-weight='{}' font-size='{}'",
                    escape_xml(ts.svg_family()),
                    ts.weight.as_str(),
                    ts.size
                )?;
            }
            writeln!(svg, ">{}</text>", escape_xml(&t.content))
        }
        Shape::TextStyle(_) => Ok(()),
    }
}

/// Dashed shot line, landing marker, dimension guides and dx/dy labels
fn render_trajectory(svg: &mut String, t: &Trajectory, settings: &Settings) -> fmt::Result {
    let (o, l) = (t.origin, t.landing);
    let d = t.offset();
    let trajectory = escape_xml(&settings.trajectory_color);
    let guide = escape_xml(&settings.guide_color);

    writeln!(
        svg,
        "<line x1='{:.2}' y1='{:.2}' x2='{:.2}' y2='{:.2}' stroke='{}' stroke-dasharray='4,2' stroke-width='1'/>",
        o.x, o.y, l.x, l.y, trajectory
    )?;
    writeln!(
        svg,
        "<circle cx='{:.2}' cy='{:.2}' r='{}' fill='none' stroke='{}' stroke-width='1'/>",
        l.x, l.y, settings.marker_radius, trajectory
    )?;

    // Horizontal guide along the shooter's row, then vertical down to the landing
    writeln!(
        svg,
        "<line x1='{:.2}' y1='{:.2}' x2='{:.2}' y2='{:.2}' stroke='{}' stroke-dasharray='2,2' stroke-width='0.8'/>",
        o.x, o.y, l.x, o.y, guide
    )?;
    writeln!(
        svg,
        "<line x1='{:.2}' y1='{:.2}' x2='{:.2}' y2='{:.2}' stroke='{}' stroke-dasharray='2,2' stroke-width='0.8'/>",
        l.x, o.y, l.x, l.y, guide
    )?;

    let dx_at = (o.x + d.x * 0.5, o.y - settings.dx_label_offset);
    let dy_at = (l.x + settings.dy_label_offset, o.y + d.y * 0.5);
    writeln!(
        svg,
        "<text x='{:.2}' y='{:.2}' fill='{}' font-size='{}' text-anchor='middle'>{:.2}</text>",
        dx_at.0, dx_at.1, guide, settings.label_font_size, d.x
    )?;
    writeln!(
        svg,
        "<text x='{:.2}' y='{:.2}' fill='{}' font-size='{}' text-anchor='middle' transform='rotate(-90 {:.2} {:.2})'>{:.2}</text>",
        dy_at.0, dy_at.1, guide, settings.label_font_size, dy_at.0, dy_at.1, d.y
    )
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
