use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};
use yew::prelude::*;

use crate::config::{DEFAULT_HEIGHT, DEFAULT_REVEAL_THRESHOLD, DEFAULT_WIDTH, ScratchConfig};
use crate::error::SurfaceError;
use crate::state::{DisplayRect, Point, Viewport, client_to_raster};
use crate::surface::{CanvasLayer, ScratchSurface};
use crate::util::cwarn;

type CanvasSurface = ScratchSurface<CanvasLayer>;

#[derive(Properties, PartialEq, Clone)]
pub struct ScratchCardProps {
    #[prop_or(DEFAULT_WIDTH)]
    pub width: f64,
    #[prop_or(DEFAULT_HEIGHT)]
    pub height: f64,
    #[prop_or(DEFAULT_REVEAL_THRESHOLD)]
    pub reveal_threshold: f64,
    #[prop_or_default]
    pub cover_color: Option<AttrValue>,
    /// Remaining knobs (brush, cadence, timers); size/threshold/color props win.
    #[prop_or_default]
    pub tuning: ScratchConfig,
    /// Fired exactly once, when the card counts as revealed.
    #[prop_or_default]
    pub on_reveal: Callback<()>,
    #[prop_or_default]
    pub children: Children,
}

impl ScratchCardProps {
    fn config(&self) -> ScratchConfig {
        let tuning = self.tuning.clone();
        ScratchConfig {
            width: self.width,
            height: self.height,
            reveal_threshold: self.reveal_threshold,
            cover_color: self
                .cover_color
                .as_ref()
                .map(|c| c.to_string())
                .or(tuning.cover_color.clone()),
            ..tuning
        }
        .or_default()
    }
}

fn no_point() -> Point {
    Point::new(f64::NAN, f64::NAN)
}

#[function_component(ScratchCard)]
pub fn scratch_card(props: &ScratchCardProps) -> Html {
    let canvas_ref = use_node_ref();
    let revealed = use_state(|| false);
    let surface = use_mut_ref({
        let props = props.clone();
        move || CanvasSurface::new(props.config(), None)
    });
    let auto_timer = use_mut_ref(|| None::<Timeout>);
    // Latest parent callback; the surface's notification outlives renders.
    let on_reveal_ref = use_mut_ref(|| props.on_reveal.clone());
    *on_reveal_ref.borrow_mut() = props.on_reveal.clone();

    {
        let canvas_ref = canvas_ref.clone();
        let surface = surface.clone();
        let auto_timer = auto_timer.clone();
        let revealed = revealed.clone();
        let on_reveal_ref = on_reveal_ref.clone();
        use_effect_with((), move |_| {
            surface.borrow_mut().set_on_reveal(move |_cause| {
                revealed.set(true);
                let cb = on_reveal_ref.borrow().clone();
                cb.emit(());
            });

            let mut listeners: Vec<EventListener> = Vec::new();
            match canvas_ref.cast::<HtmlCanvasElement>() {
                None => cwarn(&SurfaceError::CanvasMissing.to_string()),
                Some(canvas) => match CanvasLayer::attach(canvas.clone()) {
                    Err(e) => cwarn(&format!("scratch cover disabled: {e}")),
                    Ok(layer) => {
                        let (w, h) = {
                            let s = surface.borrow();
                            (s.config().width, s.config().height)
                        };
                        let ratio = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
                        {
                            let mut s = surface.borrow_mut();
                            let style = s.config().cover_style();
                            s.attach(layer);
                            s.initialize(Viewport::new(w, h, ratio), &style, &mut js_sys::Math::random);
                        }
                        listeners = bind_pointer_events(&canvas, surface.clone(), auto_timer.clone());
                    }
                },
            }

            move || {
                drop(listeners);
                // Cancels a pending auto-reveal so nothing fires after unmount.
                auto_timer.borrow_mut().take();
            }
        });
    }

    let skip = {
        let surface = surface.clone();
        Callback::from(move |_: MouseEvent| surface.borrow_mut().skip())
    };

    let is_revealed = *revealed;
    let card_style = format!(
        "position:relative; margin:0 auto; width:{}px; height:{}px; border-radius:24px; overflow:hidden; box-shadow:0 10px 25px rgba(212,137,158,0.35);",
        props.width, props.height
    );
    let canvas_style = format!(
        "position:absolute; inset:0; width:{}px; height:{}px; touch-action:none; cursor:grab;",
        props.width, props.height
    );
    html! {
        <div class="scratch-card" style={card_style}>
            <div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center;">
                { for props.children.iter() }
            </div>
            if !is_revealed {
                <>
                <canvas ref={canvas_ref} class="scratch-canvas" style={canvas_style} />
                <button onclick={skip} style="position:absolute; top:12px; right:12px; z-index:10; padding:6px 12px; background:rgba(255,255,255,0.9); color:#d4899e; font-size:12px; font-weight:600; border:none; border-radius:999px; box-shadow:0 2px 6px rgba(0,0,0,0.15);">
                    {"Skip"}
                </button>
                </>
            }
        </div>
    }
}

/// Wires mouse and touch input on the cover canvas to the surface. Touch only
/// reads the first contact point. Dropping the listeners unbinds them.
fn bind_pointer_events(
    canvas: &HtmlCanvasElement,
    surface: Rc<RefCell<CanvasSurface>>,
    auto_timer: Rc<RefCell<Option<Timeout>>>,
) -> Vec<EventListener> {
    let locate: Rc<dyn Fn(f64, f64) -> Option<Point>> = {
        let canvas = canvas.clone();
        Rc::new(move |client_x, client_y| {
            let r = canvas.get_bounding_client_rect();
            let rect = DisplayRect {
                left: r.left(),
                top: r.top(),
                width: r.width(),
                height: r.height(),
            };
            client_to_raster(client_x, client_y, rect, (canvas.width(), canvas.height()))
        })
    };
    let start: Rc<dyn Fn(Option<Point>)> = {
        let surface = surface.clone();
        Rc::new(move |pos| {
            let now = js_sys::Date::now();
            let deadline = {
                let mut s = surface.borrow_mut();
                s.pointer_down(pos.unwrap_or_else(no_point), now);
                s.auto_reveal_deadline().filter(|_| !s.is_revealed())
            };
            let deadline = deadline.filter(|_| auto_timer.borrow().is_none());
            if let Some(deadline) = deadline {
                // One extra millisecond absorbs clock rounding.
                let delay = (deadline - now).max(0.0).ceil() as u32 + 1;
                let surface = surface.clone();
                let timeout = Timeout::new(delay, move || {
                    surface.borrow_mut().expire_auto_reveal(js_sys::Date::now());
                });
                *auto_timer.borrow_mut() = Some(timeout);
            }
        })
    };
    let end: Rc<dyn Fn()> = {
        let surface = surface.clone();
        Rc::new(move || surface.borrow_mut().pointer_up())
    };
    let opts = EventListenerOptions::enable_prevent_default();
    let mut out = Vec::with_capacity(8);

    {
        let locate = locate.clone();
        let start = start.clone();
        out.push(EventListener::new_with_options(canvas, "mousedown", opts, move |e| {
            e.prevent_default();
            let pos = e
                .dyn_ref::<MouseEvent>()
                .and_then(|m| locate(m.client_x() as f64, m.client_y() as f64));
            start(pos);
        }));
    }
    {
        let locate = locate.clone();
        let surface = surface.clone();
        out.push(EventListener::new_with_options(canvas, "mousemove", opts, move |e| {
            e.prevent_default();
            if !surface.borrow().is_scratching() {
                return;
            }
            if let Some(p) = e
                .dyn_ref::<MouseEvent>()
                .and_then(|m| locate(m.client_x() as f64, m.client_y() as f64))
            {
                surface.borrow_mut().pointer_move(p);
            }
        }));
    }
    for name in ["mouseup", "mouseleave"] {
        let end = end.clone();
        out.push(EventListener::new(canvas, name, move |_e| end()));
    }
    {
        let locate = locate.clone();
        out.push(EventListener::new_with_options(canvas, "touchstart", opts, move |e| {
            e.prevent_default();
            let pos = e
                .dyn_ref::<TouchEvent>()
                .and_then(|t| t.touches().item(0))
                .and_then(|t0| locate(t0.client_x() as f64, t0.client_y() as f64));
            start(pos);
        }));
    }
    {
        let surface = surface.clone();
        out.push(EventListener::new_with_options(canvas, "touchmove", opts, move |e| {
            e.prevent_default();
            if let Some(p) = e
                .dyn_ref::<TouchEvent>()
                .and_then(|t| t.touches().item(0))
                .and_then(|t0| locate(t0.client_x() as f64, t0.client_y() as f64))
            {
                surface.borrow_mut().pointer_move(p);
            }
        }));
    }
    for name in ["touchend", "touchcancel"] {
        let end = end.clone();
        out.push(EventListener::new_with_options(canvas, name, opts, move |e| {
            e.prevent_default();
            end();
        }));
    }
    out
}
