//! Browser glue: canvas setup, texture patterns, keyboard input and the
//! `requestAnimationFrame` loop. Everything gameplay-related lives in `world` and
//! `render`; this module only adapts them to `web_sys`.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use log::info;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{
    CanvasPattern, CanvasRenderingContext2d, Document, HtmlCanvasElement, ImageData,
    KeyboardEvent, window,
};

use crate::config::GameConfig;
use crate::frame_loop::FrameLoop;
use crate::geom::Rect;
use crate::input::Command;
use crate::render::{Circle, Fill, Painter, Stroke};
use crate::texture::{Texture, TextureKind, TextureSet};
use crate::world::World;

const CANVAS_ID: &str = "gameCanvas";

/// `Painter` over a 2d canvas context with the texture patterns pre-uploaded.
pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
    patterns: Vec<CanvasPattern>, // in TextureKind::ALL order
}

impl CanvasPainter {
    pub fn new(
        doc: &Document,
        ctx: CanvasRenderingContext2d,
        textures: &TextureSet,
    ) -> Result<Self, JsValue> {
        let patterns = textures
            .iter()
            .map(|(_, tex)| pattern_from_texture(doc, tex))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { ctx, patterns })
    }

    fn pattern(&self, kind: TextureKind) -> &CanvasPattern {
        &self.patterns[kind as usize]
    }

    fn apply_fill(&self, fill: Fill, rect: Option<Rect>) {
        match fill {
            Fill::Color(c) => self.ctx.set_fill_style_str(c),
            Fill::Texture(kind) => self.ctx.set_fill_style_canvas_pattern(self.pattern(kind)),
            Fill::VerticalGradient { top, bottom } => {
                let (y0, y1) = rect.map(|r| (r.y, r.bottom())).unwrap_or((0.0, 0.0));
                let g = self.ctx.create_linear_gradient(0.0, y0, 0.0, y1);
                g.add_color_stop(0.0, top).ok();
                g.add_color_stop(1.0, bottom).ok();
                self.ctx.set_fill_style_canvas_gradient(&g);
            }
        }
    }

    fn apply_stroke(&self, stroke: Stroke) {
        self.ctx.set_stroke_style_str(stroke.color);
        self.ctx.set_line_width(stroke.width);
    }
}

/// Paint a texture onto an offscreen canvas and wrap it as a repeating pattern.
fn pattern_from_texture(doc: &Document, tex: &Texture) -> Result<CanvasPattern, JsValue> {
    let canvas: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
    canvas.set_width(tex.width());
    canvas.set_height(tex.height());
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context for texture"))?
        .dyn_into()?;
    let image =
        ImageData::new_with_u8_clamped_array_and_sh(Clamped(tex.rgba()), tex.width(), tex.height())?;
    ctx.put_image_data(&image, 0.0, 0.0)?;
    ctx.create_pattern_with_html_canvas_element(&canvas, "repeat")?
        .ok_or_else(|| JsValue::from_str("pattern unavailable"))
}

impl Painter for CanvasPainter {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_rect(&mut self, rect: Rect, fill: Fill) {
        self.apply_fill(fill, Some(rect));
        self.ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.apply_stroke(stroke);
        self.ctx.stroke_rect(rect.x, rect.y, rect.w, rect.h);
    }

    fn fill_circles(&mut self, circles: &[Circle], color: &'static str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        for c in circles {
            // new subpath per circle so arcs aren't joined by a line
            self.ctx.move_to(c.x + c.r, c.y);
            self.ctx.arc(c.x, c.y, c.r, 0.0, TAU).ok();
        }
        self.ctx.fill();
    }

    fn fill_polygon(&mut self, points: &[(f64, f64)], fill: Fill, outline: Option<Stroke>) {
        let Some((&(x0, y0), rest)) = points.split_first() else {
            return;
        };
        self.apply_fill(fill, None);
        self.ctx.begin_path();
        self.ctx.move_to(x0, y0);
        for &(x, y) in rest {
            self.ctx.line_to(x, y);
        }
        self.ctx.close_path();
        self.ctx.fill();
        if let Some(stroke) = outline {
            self.apply_stroke(stroke);
            self.ctx.stroke();
        }
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: Stroke) {
        self.apply_stroke(stroke);
        if let Some(dash) = stroke.dash {
            let segments = js_sys::Array::of2(&dash.on.into(), &dash.off.into());
            self.ctx.set_line_dash(&segments).ok();
            self.ctx.set_line_dash_offset(dash.offset);
        }
        self.ctx.begin_path();
        self.ctx.move_to(from.0, from.1);
        self.ctx.line_to(to.0, to.1);
        self.ctx.stroke();
        if stroke.dash.is_some() {
            self.ctx.set_line_dash(&js_sys::Array::new()).ok();
        }
    }

    fn text(&mut self, text: &str, x: f64, y: f64, font: &'static str, color: &'static str) {
        self.ctx.set_font(font);
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_text(text, x, y).ok();
    }
}

struct Session {
    world: World,
    painter: CanvasPainter,
    frames: FrameLoop,
}

thread_local! {
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
}

pub fn start(config: GameConfig) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // Reuse the page's canvas when present, otherwise append one
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(CANVAS_ID) {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id(CANVAS_ID);
        doc.body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&c)?;
        c
    };
    canvas.set_width(config.canvas_width as u32);
    canvas.set_height(config.canvas_height as u32);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    let mut rng = SmallRng::from_entropy();
    let textures = TextureSet::generate(&mut rng);
    let painter = CanvasPainter::new(&doc, ctx, &textures)?;
    let world = World::new(config, rng.next_u64());

    let already_running = SESSION.with(|cell| {
        cell.replace(Some(Session {
            world,
            painter,
            frames: FrameLoop::new(),
        }))
        .is_some()
    });
    if already_running {
        // listener and frame loop from the first start keep serving the new session
        info!("session replaced");
        return Ok(());
    }

    {
        let closure = Closure::wrap(Box::new(move |evt: KeyboardEvent| {
            let Some(command) = Command::from_key_code(&evt.code()) else {
                return;
            };
            if command == Command::Jump {
                evt.prevent_default(); // keep Space / ArrowUp from scrolling the page
            }
            SESSION.with(|cell| {
                if let Some(s) = cell.borrow_mut().as_mut() {
                    s.world.apply(command);
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    start_frame_loop();
    info!("game started on #{CANVAS_ID}");
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        SESSION.with(|cell| {
            if let Some(s) = cell.borrow_mut().as_mut() {
                s.frames.tick(&mut s.world, &mut s.painter);
            }
        });
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

/// JSON dump of the running world, if a game has been started.
#[cfg(feature = "serde_json")]
pub fn snapshot() -> Option<String> {
    SESSION.with(|cell| {
        cell.borrow()
            .as_ref()
            .and_then(|s| serde_json::to_string(&s.world).ok())
    })
}
