//! Frame rendering. [`render`] reads a [`World`] and issues draw calls through the
//! [`Painter`] trait in fixed back-to-front order; the browser implements it over a
//! `CanvasRenderingContext2d`, tests implement it with a recorder.

use crate::geom::Rect;
use crate::texture::TextureKind;
use crate::world::{Biome, Cloud, Tree, Vehicle, Weather, World};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fill {
    Color(&'static str),
    /// Repeating pattern anchored at the canvas origin.
    Texture(TextureKind),
    /// Top-to-bottom gradient across the filled rect.
    VerticalGradient {
        top: &'static str,
        bottom: &'static str,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dash {
    pub on: f64,
    pub off: f64,
    pub offset: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: &'static str,
    pub width: f64,
    pub dash: Option<Dash>,
}

impl Stroke {
    pub const fn solid(color: &'static str, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

/// Minimal 2d drawing surface.
pub trait Painter {
    fn clear(&mut self, width: f64, height: f64);
    fn fill_rect(&mut self, rect: Rect, fill: Fill);
    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke);
    /// Fill several circles as one path.
    fn fill_circles(&mut self, circles: &[Circle], color: &'static str);
    /// Closed polygon, optionally outlined.
    fn fill_polygon(&mut self, points: &[(f64, f64)], fill: Fill, outline: Option<Stroke>);
    fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: Stroke);
    fn text(&mut self, text: &str, x: f64, y: f64, font: &'static str, color: &'static str);
}

const ROAD_HEIGHT: f64 = 40.0;
const BLADE_SPACING: usize = 30;
const BLADE_MAX: f64 = 5.0;

pub fn render<P: Painter + ?Sized>(world: &World, p: &mut P) {
    let cfg = &world.config;
    p.clear(cfg.canvas_width, cfg.canvas_height);

    draw_sky(world, p);
    for cloud in &world.clouds {
        draw_cloud(cloud, p);
    }
    if world.weather == Weather::Rainy {
        let stroke = Stroke::solid("#ADD8E6", 1.0);
        for d in &world.raindrops {
            p.line((d.x, d.y), (d.x - 2.0, d.y + d.length), stroke);
        }
    }
    draw_ground(world, p);
    draw_road(world, p);

    for o in &world.obstacles {
        p.fill_rect(o.bounds(), Fill::Texture(TextureKind::Obstacle));
        p.stroke_rect(o.bounds(), Stroke::solid("#777", 2.0));
    }
    draw_vehicle(&world.vehicle, p);
    // trees last so they sit in front of the road traffic
    for t in &world.trees {
        draw_tree(t, p);
    }

    p.text(
        &format!("Score: {}", world.score),
        20.0,
        30.0,
        "20px Arial",
        "white",
    );
    if world.is_over() {
        let (cx, cy) = (cfg.canvas_width / 2.0, cfg.canvas_height / 2.0);
        p.text("Game Over!", cx - 100.0, cy, "40px Arial", "white");
        p.text(
            "Press R to restart",
            cx - 80.0,
            cy + 40.0,
            "20px Arial",
            "white",
        );
    }
}

fn draw_sky<P: Painter + ?Sized>(world: &World, p: &mut P) {
    let (top, bottom) = match world.weather {
        Weather::Sunny => ("#87CEEB", "#B0E2FF"),
        Weather::Rainy => ("#465A61", "#98A5A8"),
    };
    let cfg = &world.config;
    p.fill_rect(
        Rect::new(0.0, 0.0, cfg.canvas_width, cfg.ground_y),
        Fill::VerticalGradient { top, bottom },
    );
}

fn draw_cloud<P: Painter + ?Sized>(c: &Cloud, p: &mut P) {
    let puffs = [
        Circle {
            x: c.x,
            y: c.y,
            r: c.height / 2.0,
        },
        Circle {
            x: c.x + c.width / 3.0,
            y: c.y - c.height / 4.0,
            r: c.height / 2.0,
        },
        Circle {
            x: c.x + c.width / 1.5,
            y: c.y,
            r: c.height / 1.5,
        },
    ];
    p.fill_circles(&puffs, "#FFFFFF");
}

/// Height of the grass blade drawn at column `i`: stable from frame to frame.
fn blade_height(i: usize) -> f64 {
    let h = (i as u32).wrapping_mul(2_654_435_761) >> 24; // 0..256
    h as f64 / 256.0 * BLADE_MAX
}

fn draw_ground<P: Painter + ?Sized>(world: &World, p: &mut P) {
    let cfg = &world.config;
    let (texture, blade) = match world.biome {
        Biome::Plains => (TextureKind::Grass, "#90EE90"),
        Biome::Forest => (TextureKind::Forest, "#228B22"),
    };
    p.fill_rect(
        Rect::new(
            0.0,
            cfg.ground_y,
            cfg.canvas_width,
            cfg.canvas_height - cfg.ground_y,
        ),
        Fill::Texture(texture),
    );
    let stroke = Stroke::solid(blade, 1.0);
    for (i, x) in (0..cfg.canvas_width as usize)
        .step_by(BLADE_SPACING)
        .enumerate()
    {
        let x = x as f64;
        p.line(
            (x, cfg.ground_y),
            (x, cfg.ground_y - blade_height(i)),
            stroke,
        );
    }
}

fn draw_road<P: Painter + ?Sized>(world: &World, p: &mut P) {
    let cfg = &world.config;
    let road_y = cfg.ground_y - ROAD_HEIGHT / 2.0;
    p.fill_rect(
        Rect::new(0.0, road_y, cfg.canvas_width, ROAD_HEIGHT),
        Fill::Texture(TextureKind::Asphalt),
    );
    p.fill_rect(
        Rect::new(0.0, road_y, cfg.canvas_width, 2.0),
        Fill::Color("#777"),
    );
    p.fill_rect(
        Rect::new(0.0, road_y + ROAD_HEIGHT, cfg.canvas_width, 2.0),
        Fill::Color("#777"),
    );
    let mid = road_y + ROAD_HEIGHT / 2.0;
    p.line(
        (0.0, mid),
        (cfg.canvas_width, mid),
        Stroke {
            color: "#FFF",
            width: 2.0,
            dash: Some(Dash {
                on: 20.0,
                off: 20.0,
                offset: world.road_offset,
            }),
        },
    );
}

fn draw_vehicle<P: Painter + ?Sized>(v: &Vehicle, p: &mut P) {
    let (x, y) = (v.x, v.y);
    p.fill_rect(v.bounds(), Fill::Color("#8A2BE2"));
    p.fill_rect(Rect::new(x, y - 5.0, v.width, 8.0), Fill::Color("#7B1FA2"));

    // driver window first, then passengers front to back
    let windows = [45.0, 30.0, 16.0, 1.0].map(|dx| Rect::new(x + dx, y + 3.0, 12.0, 12.0));
    for w in windows {
        p.fill_rect(w, Fill::Color("#ADD8E6"));
    }
    for w in windows {
        p.stroke_rect(w, Stroke::solid("#4A148C", 1.0));
    }

    let axle = y + v.height;
    let wheels = [15.0, 45.0];
    p.fill_circles(
        &wheels.map(|dx| Circle {
            x: x + dx,
            y: axle,
            r: 5.0,
        }),
        "#333",
    );
    p.fill_circles(
        &wheels.map(|dx| Circle {
            x: x + dx,
            y: axle,
            r: 2.0,
        }),
        "#777",
    );
    p.fill_rect(
        Rect::new(x + 55.0, y + 20.0, 4.0, 4.0),
        Fill::Color("#FFF9C4"),
    );
}

fn draw_tree<P: Painter + ?Sized>(t: &Tree, p: &mut P) {
    let crown_base = t.y + t.height - 40.0;
    p.fill_rect(
        Rect::new(t.x + 10.0, crown_base, 10.0, 40.0),
        Fill::Texture(TextureKind::Trunk),
    );
    p.fill_polygon(
        &[
            (t.x, crown_base),
            (t.x + 15.0, t.y),
            (t.x + 30.0, crown_base),
        ],
        Fill::Texture(TextureKind::Crown),
        Some(Stroke::solid("#006400", 1.0)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::world::{Obstacle, Phase, Raindrop};

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear,
        Rect(Rect, Fill),
        StrokeRect(Rect),
        Circles(usize, &'static str),
        Polygon(usize, Fill),
        Line(Stroke),
        Text(String),
    }

    #[derive(Default)]
    struct Recorder(Vec<Op>);

    impl Painter for Recorder {
        fn clear(&mut self, _w: f64, _h: f64) {
            self.0.push(Op::Clear);
        }
        fn fill_rect(&mut self, rect: Rect, fill: Fill) {
            self.0.push(Op::Rect(rect, fill));
        }
        fn stroke_rect(&mut self, rect: Rect, _stroke: Stroke) {
            self.0.push(Op::StrokeRect(rect));
        }
        fn fill_circles(&mut self, circles: &[Circle], color: &'static str) {
            self.0.push(Op::Circles(circles.len(), color));
        }
        fn fill_polygon(&mut self, points: &[(f64, f64)], fill: Fill, _outline: Option<Stroke>) {
            self.0.push(Op::Polygon(points.len(), fill));
        }
        fn line(&mut self, _from: (f64, f64), _to: (f64, f64), stroke: Stroke) {
            self.0.push(Op::Line(stroke));
        }
        fn text(&mut self, text: &str, _x: f64, _y: f64, _font: &'static str, _color: &'static str) {
            self.0.push(Op::Text(text.to_string()));
        }
    }

    impl Recorder {
        fn position(&self, pred: impl Fn(&Op) -> bool) -> usize {
            self.0.iter().position(pred).expect("op not drawn")
        }
        fn texts(&self) -> Vec<&str> {
            self.0
                .iter()
                .filter_map(|op| match op {
                    Op::Text(s) => Some(s.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    fn busy_world() -> World {
        let mut w = World::new(GameConfig::default(), 1);
        w.obstacles.push(Obstacle {
            x: 400.0,
            y: 195.0,
            width: 20.0,
            height: 30.0,
        });
        w.trees.push(Tree {
            x: 600.0,
            y: 120.0,
            width: 30.0,
            height: 150.0,
        });
        w.clouds.push(Cloud {
            x: 300.0,
            y: 50.0,
            width: 80.0,
            height: 30.0,
            speed: 1.2,
        });
        w
    }

    fn is_texture(kind: TextureKind) -> impl Fn(&Op) -> bool {
        move |op: &Op| matches!(op, Op::Rect(_, Fill::Texture(k)) if *k == kind)
    }

    #[test]
    fn layers_are_drawn_back_to_front() {
        let w = busy_world();
        let mut rec = Recorder::default();
        render(&w, &mut rec);

        assert_eq!(rec.0[0], Op::Clear);
        let sky = rec.position(|op| matches!(op, Op::Rect(_, Fill::VerticalGradient { .. })));
        let cloud = rec.position(|op| matches!(op, Op::Circles(3, "#FFFFFF")));
        let ground = rec.position(is_texture(TextureKind::Grass));
        let road = rec.position(is_texture(TextureKind::Asphalt));
        let obstacle = rec.position(is_texture(TextureKind::Obstacle));
        let bus = rec.position(|op| matches!(op, Op::Rect(_, Fill::Color("#8A2BE2"))));
        let trunk = rec.position(is_texture(TextureKind::Trunk));
        let score = rec.position(|op| matches!(op, Op::Text(s) if s == "Score: 0"));
        let order = [sky, cloud, ground, road, obstacle, bus, trunk, score];
        assert!(order.windows(2).all(|p| p[0] < p[1]), "{order:?}");
        assert!(rec
            .0
            .iter()
            .any(|op| matches!(op, Op::Polygon(3, Fill::Texture(TextureKind::Crown)))));
    }

    #[test]
    fn sky_and_ground_follow_weather_and_biome() {
        let mut w = busy_world();
        w.weather = Weather::Rainy;
        w.biome = Biome::Forest;
        let mut rec = Recorder::default();
        render(&w, &mut rec);
        assert!(rec.0.contains(&Op::Rect(
            Rect::new(0.0, 0.0, 800.0, 230.0),
            Fill::VerticalGradient {
                top: "#465A61",
                bottom: "#98A5A8"
            }
        )));
        rec.position(is_texture(TextureKind::Forest));
        assert!(!rec.0.iter().any(is_texture(TextureKind::Grass)));
    }

    #[test]
    fn rain_only_drawn_while_rainy() {
        let mut w = busy_world();
        w.raindrops.push(Raindrop {
            x: 100.0,
            y: 10.0,
            speed: 8.0,
            length: 15.0,
        });
        let rain_lines = |rec: &Recorder| {
            rec.0
                .iter()
                .filter(|op| matches!(op, Op::Line(s) if s.color == "#ADD8E6"))
                .count()
        };
        let mut rec = Recorder::default();
        render(&w, &mut rec);
        assert_eq!(rain_lines(&rec), 0);

        w.weather = Weather::Rainy;
        let mut rec = Recorder::default();
        render(&w, &mut rec);
        assert_eq!(rain_lines(&rec), 1);
    }

    #[test]
    fn road_centre_line_carries_the_marking_offset() {
        let mut w = busy_world();
        w.road_offset = 12.5;
        let mut rec = Recorder::default();
        render(&w, &mut rec);
        let dash = rec.0.iter().find_map(|op| match op {
            Op::Line(Stroke { dash: Some(d), .. }) => Some(*d),
            _ => None,
        });
        assert_eq!(
            dash,
            Some(Dash {
                on: 20.0,
                off: 20.0,
                offset: 12.5
            })
        );
    }

    #[test]
    fn game_over_overlay_only_after_collision() {
        let mut w = busy_world();
        w.score = 7;
        let mut rec = Recorder::default();
        render(&w, &mut rec);
        assert_eq!(rec.texts(), vec!["Score: 7"]);

        w.phase = Phase::GameOver;
        let mut rec = Recorder::default();
        render(&w, &mut rec);
        assert_eq!(
            rec.texts(),
            vec!["Score: 7", "Game Over!", "Press R to restart"]
        );
    }

    #[test]
    fn grass_blades_are_short_and_stable() {
        for i in 0..100 {
            let h = blade_height(i);
            assert!((0.0..BLADE_MAX).contains(&h));
            assert_eq!(h, blade_height(i));
        }
    }
}
