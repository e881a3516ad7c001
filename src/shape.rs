//! Shape value objects
//!
//! A closed sum type over the five kinds a .geo file can declare. Shapes are
//! plain values: "editing" one (moving it, recoloring it) produces a new Shape.

use glam::DVec2;

/// Horizontal anchor of a text element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    /// Parse a .geo anchor token ('i'/'s' start, 'm' middle, 'f'/'e' end)
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "m" => TextAnchor::Middle,
            "f" | "e" => TextAnchor::End,
            _ => TextAnchor::Start,
        }
    }

    /// SVG `text-anchor` value
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// Font weight carried by a text style directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
    Bolder,
    Lighter,
}

impl FontWeight {
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "b" => FontWeight::Bold,
            "b+" => FontWeight::Bolder,
            "l" => FontWeight::Lighter,
            _ => FontWeight::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
            FontWeight::Bolder => "bolder",
            FontWeight::Lighter => "lighter",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub id: i32,
    pub center: DVec2,
    pub radius: f64,
    pub border_color: String,
    pub fill_color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub id: i32,
    /// Anchor corner (minimum x and y)
    pub origin: DVec2,
    pub width: f64,
    pub height: f64,
    pub border_color: String,
    pub fill_color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub id: i32,
    pub start: DVec2,
    pub end: DVec2,
    pub color: String,
}

impl Line {
    /// Offset from start to end
    #[inline]
    pub fn delta(&self) -> DVec2 {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.delta().length()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub id: i32,
    pub pos: DVec2,
    pub border_color: String,
    pub fill_color: String,
    pub anchor: TextAnchor,
    pub content: String,
}

impl Text {
    /// Number of characters in the content
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// Font directive applied to every text that follows it
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub family: String,
    pub weight: FontWeight,
    pub size: f64,
}

impl TextStyle {
    /// SVG font-family value ("sans" is the .geo spelling of sans-serif)
    pub fn svg_family(&self) -> &str {
        match self.family.as_str() {
            "sans" => "sans-serif",
            other => other,
        }
    }
}

/// Any shape a ground can hold
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Rectangle(Rectangle),
    Line(Line),
    Text(Text),
    TextStyle(TextStyle),
}

impl Shape {
    /// Identifier from the .geo file (text styles have none)
    pub fn id(&self) -> Option<i32> {
        match self {
            Shape::Circle(c) => Some(c.id),
            Shape::Rectangle(r) => Some(r.id),
            Shape::Line(l) => Some(l.id),
            Shape::Text(t) => Some(t.id),
            Shape::TextStyle(_) => None,
        }
    }

    /// True for kinds with a geometry (everything except text styles)
    pub fn is_geometric(&self) -> bool {
        !matches!(self, Shape::TextStyle(_))
    }

    /// Border (stroke) color; a line's single color counts as its border
    pub fn border_color(&self) -> Option<&str> {
        match self {
            Shape::Circle(c) => Some(&c.border_color),
            Shape::Rectangle(r) => Some(&r.border_color),
            Shape::Line(l) => Some(&l.color),
            Shape::Text(t) => Some(&t.border_color),
            Shape::TextStyle(_) => None,
        }
    }

    /// Fill color, only for kinds that have one
    pub fn fill_color(&self) -> Option<&str> {
        match self {
            Shape::Circle(c) => Some(&c.fill_color),
            Shape::Rectangle(r) => Some(&r.fill_color),
            Shape::Text(t) => Some(&t.fill_color),
            Shape::Line(_) | Shape::TextStyle(_) => None,
        }
    }

    /// Copy moved so its reference point sits at `pos`.
    ///
    /// Lines keep their offset vector. Text styles have no position.
    pub fn with_position(&self, pos: DVec2) -> Option<Shape> {
        let moved = match self {
            Shape::Circle(c) => Shape::Circle(Circle {
                center: pos,
                ..c.clone()
            }),
            Shape::Rectangle(r) => Shape::Rectangle(Rectangle {
                origin: pos,
                ..r.clone()
            }),
            Shape::Line(l) => Shape::Line(Line {
                start: pos,
                end: pos + l.delta(),
                ..l.clone()
            }),
            Shape::Text(t) => Shape::Text(Text { pos, ..t.clone() }),
            Shape::TextStyle(_) => return None,
        };
        Some(moved)
    }

    /// Copy with the border color replaced (a line's only color is its border)
    pub fn with_border_color(&self, color: &str) -> Option<Shape> {
        let recolored = match self {
            Shape::Circle(c) => Shape::Circle(Circle {
                border_color: color.to_string(),
                ..c.clone()
            }),
            Shape::Rectangle(r) => Shape::Rectangle(Rectangle {
                border_color: color.to_string(),
                ..r.clone()
            }),
            Shape::Line(l) => Shape::Line(Line {
                color: color.to_string(),
                ..l.clone()
            }),
            Shape::Text(t) => Shape::Text(Text {
                border_color: color.to_string(),
                ..t.clone()
            }),
            Shape::TextStyle(_) => return None,
        };
        Some(recolored)
    }

    /// Copy with border and fill exchanged, for kinds that have both
    pub fn with_swapped_colors(&self) -> Option<Shape> {
        let swapped = match self {
            Shape::Circle(c) => Shape::Circle(Circle {
                border_color: c.fill_color.clone(),
                fill_color: c.border_color.clone(),
                ..c.clone()
            }),
            Shape::Rectangle(r) => Shape::Rectangle(Rectangle {
                border_color: r.fill_color.clone(),
                fill_color: r.border_color.clone(),
                ..r.clone()
            }),
            Shape::Text(t) => Shape::Text(Text {
                border_color: t.fill_color.clone(),
                fill_color: t.border_color.clone(),
                ..t.clone()
            }),
            Shape::Line(_) | Shape::TextStyle(_) => return None,
        };
        Some(swapped)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn circle(id: i32, r: f64) -> Shape {
        Shape::Circle(Circle {
            id,
            center: DVec2::ZERO,
            radius: r,
            border_color: "black".into(),
            fill_color: "blue".into(),
        })
    }

    pub fn rect(id: i32, w: f64, h: f64) -> Shape {
        Shape::Rectangle(Rectangle {
            id,
            origin: DVec2::ZERO,
            width: w,
            height: h,
            border_color: "green".into(),
            fill_color: "yellow".into(),
        })
    }

    pub fn line(id: i32, dx: f64, dy: f64) -> Shape {
        Shape::Line(Line {
            id,
            start: DVec2::ZERO,
            end: DVec2::new(dx, dy),
            color: "gray".into(),
        })
    }

    pub fn text(id: i32, content: &str) -> Shape {
        Shape::Text(Text {
            id,
            pos: DVec2::ZERO,
            border_color: "black".into(),
            fill_color: "white".into(),
            anchor: TextAnchor::Start,
            content: content.into(),
        })
    }

    pub fn style() -> Shape {
        Shape::TextStyle(TextStyle {
            family: "sans".into(),
            weight: FontWeight::Bold,
            size: 12.0,
        })
    }
}
