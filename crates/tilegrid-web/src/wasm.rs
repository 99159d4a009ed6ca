#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tilegrid_core::event::HostEvent;
use tilegrid_core::geometry::{Point, Size};
use tilegrid_core::logging::TARGET_WEB;
use tilegrid_runtime::{ResizeDriver, TileSink};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, HtmlImageElement, MouseEvent, Window};

use crate::centre_picker::{CentrePick, ImageMetrics, centre_from_dataset, pick_centre};
use crate::{CONTAINER_SELECTOR, TILE_SELECTOR, format_fractional_px, format_px, parse_css_px};

/// Default selector for images whose crop centre can be picked.
const CENTREABLE_SELECTOR: &str = ".centreable";

/// Tiles backed by live elements.
struct DomTiles(Vec<HtmlElement>);

impl TileSink for DomTiles {
    fn tile_count(&self) -> usize {
        self.0.len()
    }

    fn set_tile_edge(&mut self, index: usize, edge_px: u32) {
        let Some(tile) = self.0.get(index) else {
            return;
        };
        let px = format_px(edge_px);
        let style = tile.style();
        if style.set_property("width", &px).is_err() || style.set_property("height", &px).is_err() {
            tracing::warn!(target: TARGET_WEB, index, "failed to set tile size");
        }
    }
}

struct DomGrid {
    window: Window,
    container: Element,
    driver: ResizeDriver<DomTiles>,
}

impl DomGrid {
    /// Computed size of the container; anything unreadable measures as zero.
    fn measure(&self) -> Size {
        let Ok(Some(style)) = self.window.get_computed_style(&self.container) else {
            return Size::ZERO;
        };
        let read = |property: &str| {
            style
                .get_property_value(property)
                .ok()
                .and_then(|value| parse_css_px(&value))
                .unwrap_or(0.0)
        };
        Size::new(read("width"), read("height"))
    }

    fn now(&self) -> Duration {
        let ms = self.window.performance().map_or(0.0, |p| p.now());
        // `as` saturates; NaN and negatives become 0.
        Duration::from_micros((ms * 1000.0) as u64)
    }

    fn dispatch(&mut self, event: HostEvent) {
        let now = self.now();
        self.driver.handle(event, now);
    }
}

/// Square tile grid bound to the page.
///
/// Construct after the tiles are in the document (`DOMContentLoaded`). Keep
/// the returned object alive for as long as tiles should follow the window
/// size; call `destroy` to detach the resize listener.
#[wasm_bindgen]
pub struct TileGridWeb {
    grid: Option<Rc<RefCell<DomGrid>>>,
    listener: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl TileGridWeb {
    /// Bind to `container_selector` and size the `tile_selector` elements.
    ///
    /// Defaults to `.content-panel` and `.content-panel .grid`. A missing
    /// container leaves the grid inert.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container_selector: Option<String>,
        tile_selector: Option<String>,
    ) -> Result<TileGridWeb, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let container_selector = container_selector.as_deref().unwrap_or(CONTAINER_SELECTOR);
        let Some(container) = document.query_selector(container_selector)? else {
            tracing::debug!(target: TARGET_WEB, container_selector, "no container; grid inert");
            return Ok(Self {
                grid: None,
                listener: None,
            });
        };

        let nodes = document.query_selector_all(tile_selector.as_deref().unwrap_or(TILE_SELECTOR))?;
        let tiles: Vec<HtmlElement> = (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect();

        let grid = Rc::new(RefCell::new(DomGrid {
            window: window.clone(),
            container,
            driver: ResizeDriver::with_defaults(DomTiles(tiles)),
        }));
        {
            let mut grid = grid.borrow_mut();
            let container = grid.measure();
            grid.dispatch(HostEvent::Ready { container });
        }

        let handler = Rc::clone(&grid);
        let listener = Closure::<dyn FnMut()>::new(move || {
            if let Ok(mut grid) = handler.try_borrow_mut() {
                let container = grid.measure();
                grid.dispatch(HostEvent::Resize { container });
            }
        });
        window.add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())?;

        Ok(Self {
            grid: Some(grid),
            listener: Some(listener),
        })
    }

    /// Last applied tile size before padding, if any.
    #[wasm_bindgen(js_name = tileSize)]
    pub fn tile_size(&self) -> Option<u32> {
        self.grid
            .as_ref()
            .and_then(|grid| grid.borrow().driver.sizer().last_applied())
    }

    /// Detach the resize listener and release the elements.
    pub fn destroy(&mut self) {
        if let (Some(grid), Some(listener)) = (self.grid.take(), self.listener.take()) {
            let removed = grid
                .borrow()
                .window
                .remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
            if removed.is_err() {
                tracing::warn!(target: TARGET_WEB, "failed to remove resize listener");
            }
        }
    }
}

/// One `.centreable` frame: the image, its marker and the cropped preview.
struct Centreable {
    img: HtmlImageElement,
    marker: HtmlElement,
    cropped: Option<Element>,
    image_id: String,
}

impl Centreable {
    fn metrics(&self) -> ImageMetrics {
        let rect = self.img.get_bounding_client_rect();
        ImageMetrics::new(
            Size::new(
                f64::from(self.img.natural_width()),
                f64::from(self.img.natural_height()),
            ),
            Size::new(rect.width(), rect.height()),
            Point::new(
                f64::from(self.img.offset_left()),
                f64::from(self.img.offset_top()),
            ),
        )
    }

    fn stored_centre(&self) -> Option<Point> {
        let x = self.img.get_attribute("data-centre-x")?;
        let y = self.img.get_attribute("data-centre-y")?;
        centre_from_dataset(&x, &y)
    }

    /// Put the marker over the centre stored on the image.
    fn place_marker(&self) {
        let Some(centre) = self.stored_centre() else {
            return;
        };
        match self.metrics().marker_position(centre) {
            Ok(at) => self.move_marker(at),
            Err(err) => {
                tracing::debug!(target: TARGET_WEB, image = %self.image_id, %err, "marker not placed");
            }
        }
    }

    fn move_marker(&self, at: Point) {
        let style = self.marker.style();
        if style.set_property("left", &format_fractional_px(at.x)).is_err()
            || style.set_property("top", &format_fractional_px(at.y)).is_err()
        {
            tracing::warn!(target: TARGET_WEB, image = %self.image_id, "failed to move marker");
        }
    }

    /// Store the clicked centre, move the marker and blank the stale crop.
    fn click(&self, event: &MouseEvent) -> Option<CentrePick> {
        let rect = self.img.get_bounding_client_rect();
        let click = Point::new(
            f64::from(event.client_x()) - rect.left(),
            f64::from(event.client_y()) - rect.top(),
        );
        let pick = match pick_centre(&self.metrics(), &self.image_id, click) {
            Ok(pick) => pick,
            Err(err) => {
                tracing::warn!(target: TARGET_WEB, image = %self.image_id, %err, "centre not picked");
                return None;
            }
        };

        let stored = self
            .img
            .set_attribute("data-centre-x", &pick.centre.x.to_string())
            .and_then(|()| {
                self.img
                    .set_attribute("data-centre-y", &pick.centre.y.to_string())
            });
        if stored.is_err() {
            tracing::warn!(target: TARGET_WEB, image = %self.image_id, "failed to store centre");
        }
        self.move_marker(pick.marker);

        if let Some(cropped) = &self.cropped {
            if cropped.set_attribute("src", "").is_err() {
                tracing::warn!(target: TARGET_WEB, image = %self.image_id, "failed to clear crop");
            }
        }
        Some(pick)
    }
}

/// Listeners installed for one frame.
struct CentreBinding {
    frame: Rc<Centreable>,
    on_click: Closure<dyn FnMut(MouseEvent)>,
    on_resize: Closure<dyn FnMut()>,
    // Held so the `onload` handler stays alive.
    _on_load: Closure<dyn FnMut()>,
}

/// Crop-centre picker for the result page.
///
/// Adds a marker to every `.centreable` frame, places it from the image's
/// `data-centre-x` / `data-centre-y` when the image loads and again on
/// window resize, and moves it on click. After a click the new centre is
/// stored on the image and `on_centre(endpoint, body)` is called; the host
/// POSTs `body` to `endpoint` and swaps the returned crop into
/// `.centreable-cropped[data-id=..]`.
#[wasm_bindgen]
pub struct CentrePicker {
    window: Window,
    bindings: Vec<CentreBinding>,
}

#[wasm_bindgen]
impl CentrePicker {
    /// Bind every frame matching `selector` (default `.centreable`).
    #[wasm_bindgen(constructor)]
    pub fn new(
        selector: Option<String>,
        on_centre: js_sys::Function,
    ) -> Result<CentrePicker, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let frames = document.query_selector_all(selector.as_deref().unwrap_or(CENTREABLE_SELECTOR))?;
        let mut bindings = Vec::new();
        for node in (0..frames.length()).filter_map(|i| frames.get(i)) {
            let Ok(frame) = node.dyn_into::<Element>() else {
                continue;
            };
            let Some(img) = frame
                .query_selector("img")?
                .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
            else {
                continue;
            };
            let image_id = img.get_attribute("data-id").unwrap_or_default();
            let cropped =
                document.query_selector(&format!(".centreable-cropped[data-id=\"{image_id}\"]"))?;

            let marker: HtmlElement = document.create_element("div")?.dyn_into()?;
            marker.set_class_name("marker");
            frame.append_child(&marker)?;

            let frame = Rc::new(Centreable {
                img,
                marker,
                cropped,
                image_id,
            });
            bindings.push(Self::bind(&window, frame, on_centre.clone())?);
        }

        tracing::debug!(target: TARGET_WEB, frames = bindings.len(), "centre picker bound");
        Ok(Self { window, bindings })
    }

    fn bind(
        window: &Window,
        frame: Rc<Centreable>,
        on_centre: js_sys::Function,
    ) -> Result<CentreBinding, JsValue> {
        let clicked = Rc::clone(&frame);
        let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let Some(pick) = clicked.click(&event) else {
                return;
            };
            let sent = on_centre.call2(
                &JsValue::NULL,
                &JsValue::from_str(&pick.endpoint),
                &JsValue::from_str(&pick.body),
            );
            if sent.is_err() {
                tracing::warn!(target: TARGET_WEB, image = %clicked.image_id, "centre callback failed");
            }
        });
        frame
            .img
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;

        let loaded = Rc::clone(&frame);
        let on_load = Closure::<dyn FnMut()>::new(move || loaded.place_marker());
        frame.img.set_onload(Some(on_load.as_ref().unchecked_ref()));

        let resized = Rc::clone(&frame);
        let on_resize = Closure::<dyn FnMut()>::new(move || resized.place_marker());
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

        // A cached image may have loaded before the handler was set.
        if frame.img.complete() {
            frame.place_marker();
        }

        Ok(CentreBinding {
            frame,
            on_click,
            on_resize,
            _on_load: on_load,
        })
    }

    /// Number of frames bound.
    #[wasm_bindgen(getter)]
    pub fn frames(&self) -> usize {
        self.bindings.len()
    }

    /// Re-place every marker from the stored centres.
    pub fn refresh(&self) {
        for binding in &self.bindings {
            binding.frame.place_marker();
        }
    }

    /// Detach all listeners. Markers stay in the document.
    pub fn destroy(&mut self) {
        for binding in self.bindings.drain(..) {
            let img = &binding.frame.img;
            img.set_onload(None);
            let click = img.remove_event_listener_with_callback(
                "click",
                binding.on_click.as_ref().unchecked_ref(),
            );
            let resize = self.window.remove_event_listener_with_callback(
                "resize",
                binding.on_resize.as_ref().unchecked_ref(),
            );
            if click.is_err() || resize.is_err() {
                tracing::warn!(
                    target: TARGET_WEB,
                    image = %binding.frame.image_id,
                    "failed to remove centre listeners"
                );
            }
        }
    }
}
