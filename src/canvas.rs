//! Drawing seam between the simulator and whatever owns the pixels.
//!
//! The field produces a [`Frame`], a plain display list, and never touches a
//! drawing surface directly. The binary paints frames through an egui
//! painter; tests inspect them or paint into a recorder.

use glam::Vec2;

use crate::particle::Rgba;

/// A 2D surface that accepts the three primitives the field draws.
pub trait Canvas {
    fn clear(&mut self, size: Vec2);
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
    fn circle(&mut self, center: Vec2, radius: f32, color: Rgba);
}

/// A line between particles `a` and `b` (`a < b`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub from: Vec2,
    pub to: Vec2,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub center: Vec2,
    pub radius: f32,
    pub color: Rgba,
}

/// Everything drawn during one animation frame, in paint order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub size: Vec2,
    pub connections: Vec<Connection>,
    pub dots: Vec<Dot>,
}

pub const CONNECTION_WIDTH: f32 = 1.0;

impl Frame {
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty() && self.dots.is_empty()
    }

    /// Clear, then connections, then particles on top.
    pub fn paint<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.clear(self.size);

        for connection in &self.connections {
            canvas.line(
                connection.from,
                connection.to,
                CONNECTION_WIDTH,
                crate::particle::CONNECTION_RGB.with_alpha(connection.opacity),
            );
        }

        for dot in &self.dots {
            canvas.circle(dot.center, dot.radius, dot.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Call {
        Clear,
        Line(f32),
        Circle(f32),
    }

    #[derive(Default)]
    struct Recorder(Vec<Call>);

    impl Canvas for Recorder {
        fn clear(&mut self, _size: Vec2) {
            self.0.push(Call::Clear);
        }

        fn line(&mut self, _from: Vec2, _to: Vec2, _width: f32, color: Rgba) {
            self.0.push(Call::Line(color.a));
        }

        fn circle(&mut self, _center: Vec2, radius: f32, _color: Rgba) {
            self.0.push(Call::Circle(radius));
        }
    }

    #[test]
    fn paints_clear_lines_then_circles() {
        let frame = Frame {
            size: Vec2::new(10.0, 10.0),
            connections: vec![Connection {
                a: 0,
                b: 1,
                from: Vec2::ZERO,
                to: Vec2::ONE,
                opacity: 0.25,
            }],
            dots: vec![
                Dot {
                    center: Vec2::ZERO,
                    radius: 2.0,
                    color: Rgba::rgb(1, 2, 3),
                },
                Dot {
                    center: Vec2::ONE,
                    radius: 1.5,
                    color: Rgba::rgb(1, 2, 3),
                },
            ],
        };

        let mut recorder = Recorder::default();
        frame.paint(&mut recorder);

        assert_eq!(
            recorder.0,
            vec![Call::Clear, Call::Line(0.25), Call::Circle(2.0), Call::Circle(1.5)]
        );
    }

    #[test]
    fn empty_frame_still_clears() {
        let mut recorder = Recorder::default();
        Frame::default().paint(&mut recorder);
        assert_eq!(recorder.0, vec![Call::Clear]);
    }
}
