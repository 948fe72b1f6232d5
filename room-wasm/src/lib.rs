use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, HtmlInputElement,
    KeyboardEvent, MouseEvent, Window,
};

use room_core::{Color, EditorSession, GridView};

mod canvas;
mod state;

use canvas::{draw_grid, draw_item};
use state::{STATE, State};

/// Scene offset from the top-left corner of the canvas, in pixels.
const OFFSET_X: f64 = 100.0;
const OFFSET_Y: f64 = 100.0;
/// Width of the wall band painted around the floor.
const WALL_BAND: f64 = 24.0;
/// Horizontal gap before the reference room panel.
const PANEL_GAP: f64 = 80.0;

/// Log a message to the browser console.
fn log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

fn event_canvas_coords(e: &MouseEvent, cv: &HtmlCanvasElement) -> (f64, f64) {
    // Convert client coordinates into canvas internal pixel coordinates
    // so hit testing works even if CSS scales the canvas element.
    // Fallback to offset if element cast fails.
    if let Some(el) = cv.dyn_ref::<web_sys::Element>() {
        let rect = el.get_bounding_client_rect();
        let x = (e.client_x() as f64 - rect.left()) * (cv.width() as f64) / rect.width().max(1.0);
        let y = (e.client_y() as f64 - rect.top()) * (cv.height() as f64) / rect.height().max(1.0);
        (x, y)
    } else {
        (e.offset_x() as f64, e.offset_y() as f64)
    }
}

fn draw_room_panel(
    ctx: &CanvasRenderingContext2d,
    origin: (f64, f64),
    grid: &GridView,
    items: &[room_core::ItemView],
) {
    let (ox, oy) = origin;
    let side = grid.size as f64 * grid.tile_size;
    canvas::set_fill_style(ctx, &grid.wall_color.css());
    ctx.fill_rect(
        ox - WALL_BAND,
        oy - WALL_BAND,
        side + 2.0 * WALL_BAND,
        side + 2.0 * WALL_BAND,
    );
    draw_grid(ctx, origin, grid);
    for view in items {
        draw_item(ctx, origin, view);
    }
}

fn draw(s: &State) {
    let width = s.canvas.width() as f64;
    let height = s.canvas.height() as f64;
    s.ctx.clear_rect(0.0, 0.0, width, height);

    let grid = s.session.grid();
    draw_room_panel(&s.ctx, (OFFSET_X, OFFSET_Y), &grid, &s.session.items());

    if let Some(reference) = s.session.reference() {
        let ref_grid = GridView {
            floor_color: reference.floor_color,
            wall_color: reference.wall_color,
            size: grid.size,
            tile_size: grid.tile_size,
        };
        let ref_x = OFFSET_X + grid.size as f64 * grid.tile_size + PANEL_GAP;
        draw_room_panel(
            &s.ctx,
            (ref_x, OFFSET_Y),
            &ref_grid,
            &s.session.reference_items(),
        );
    }
    update_score_dom(s);
}

fn update_score_dom(s: &State) {
    if let Some(el) = s.document.get_element_by_id("score")
        && let Ok(el) = el.dyn_into::<HtmlElement>()
    {
        let txt = match s.session.reference_score() {
            Some(score) => format!("Match: {score}%"),
            None => String::new(),
        };
        el.set_inner_text(&txt);
    }
}

fn set_status(document: &Document, msg: &str) {
    if let Some(el) = document.get_element_by_id("status")
        && let Ok(el) = el.dyn_into::<HtmlElement>()
    {
        el.set_inner_text(msg);
    }
}

fn input_value(document: &Document, id: &str) -> Option<String> {
    let input = document.get_element_by_id(id)?;
    let input: HtmlInputElement = input.dyn_into().ok()?;
    Some(input.value())
}

fn set_input_value(document: &Document, id: &str, value: &str) {
    if let Some(input) = document.get_element_by_id(id)
        && let Ok(input) = input.dyn_into::<HtmlInputElement>()
    {
        input.set_value(value);
    }
}

/// Parses the `#rrggbb` value of a color input.
fn parse_color_input(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().map(Color)
}

/// Fire-and-forget clipboard write; a failed or denied write is ignored.
fn copy_to_clipboard(window: &Window, text: &str) {
    let promise = window.navigator().clipboard().write_text(text);
    wasm_bindgen_futures::spawn_local(async move {
        let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
    });
}

fn wire_button(
    document: &Document,
    id: &str,
    state: Rc<RefCell<State>>,
    action: impl Fn(&mut State) + 'static,
) {
    if let Some(btn) = document.get_element_by_id(id)
        && let Ok(btn) = btn.dyn_into::<HtmlElement>()
    {
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let mut s = state.borrow_mut();
            action(&mut s);
            draw(&s);
        }));
        btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }
}

fn attach_ui(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc = state.borrow().document.clone();

    // Add-furniture buttons, one per catalog kind
    for (id, kind) in [("addBed", "bed"), ("addTable", "table"), ("addChair", "chair")] {
        wire_button(&doc, id, state.clone(), move |s| {
            if let Err(err) = s.session.add_item(kind) {
                set_status(&s.document, &err.to_string());
            } else {
                set_status(&s.document, "");
            }
        });
    }

    // Seed generation: show the token and copy it to the clipboard
    wire_button(&doc, "generateSeed", state.clone(), |s| {
        let token = s.session.generate_seed();
        set_input_value(&s.document, "seedOutput", &token);
        copy_to_clipboard(&s.window, &token);
        set_status(&s.document, "");
    });

    // Seed loading replaces the room wholesale; a bad token changes nothing
    wire_button(&doc, "loadSeed", state.clone(), |s| {
        let token = input_value(&s.document, "seedInput").unwrap_or_default();
        match s.session.load_seed(&token) {
            Ok(()) => {
                set_input_value(&s.document, "seedOutput", token.trim());
                set_status(&s.document, "");
            }
            Err(err) => set_status(&s.document, &err.to_string()),
        }
    });

    // Comparison: load the second room next to the live one and score it
    wire_button(&doc, "compareSeed", state.clone(), |s| {
        let token = input_value(&s.document, "compareInput").unwrap_or_default();
        match s.session.load_reference(&token) {
            Ok(()) => set_status(&s.document, ""),
            Err(err) => set_status(&s.document, &err.to_string()),
        }
    });

    wire_button(&doc, "clearCompare", state.clone(), |s| {
        s.session.clear_reference();
        set_status(&s.document, "");
    });

    // Color pickers
    for (id, is_floor) in [("floorColor", true), ("wallColor", false)] {
        if let Some(input) = doc.get_element_by_id(id)
            && let Ok(input) = input.dyn_into::<HtmlInputElement>()
        {
            let st = state.clone();
            let input_read = input.clone();
            let oninput = Closure::<dyn FnMut()>::wrap(Box::new(move || {
                let mut s = st.borrow_mut();
                if let Some(color) = parse_color_input(&input_read.value()) {
                    if is_floor {
                        s.session.set_floor_color(color);
                    } else {
                        s.session.set_wall_color(color);
                    }
                    draw(&s);
                }
            }));
            input.set_oninput(Some(oninput.as_ref().unchecked_ref()));
            oninput.forget();
        }
    }

    // Keyboard: Delete removes the selection, R rotates it
    {
        let st = state.clone();
        let keydown = Closure::<dyn FnMut(KeyboardEvent)>::wrap(Box::new(move |e: KeyboardEvent| {
            let mut s = st.borrow_mut();
            match e.key().as_str() {
                "Delete" | "Backspace" => {
                    s.session.delete_selected();
                    draw(&s);
                }
                "r" | "R" => {
                    s.session.rotate_selected();
                    draw(&s);
                }
                _ => {}
            }
        }));
        doc.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
        keydown.forget();
    }

    // Mouse events
    {
        let st = state.clone();
        let mousedown = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            let mut s = st.borrow_mut();
            let (cx, cy) = event_canvas_coords(&e, &s.canvas);
            let (rx, ry) = (cx - OFFSET_X, cy - OFFSET_Y);
            // find topmost item under cursor
            let views = s.session.items();
            for (i, view) in views.iter().enumerate().rev() {
                if rx >= view.pixel_x
                    && rx < view.pixel_x + view.width_px
                    && ry >= view.pixel_y
                    && ry < view.pixel_y + view.height_px
                {
                    let grab = (rx - view.pixel_x, ry - view.pixel_y);
                    s.session.pointer_down(i, e.time_stamp(), grab);
                    break;
                }
            }
            draw(&s);
        }));
        state
            .borrow()
            .canvas
            .add_event_listener_with_callback("mousedown", mousedown.as_ref().unchecked_ref())?;
        mousedown.forget();
    }
    {
        let st = state.clone();
        let mousemove = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            let mut s = st.borrow_mut();
            if !s.session.is_dragging() {
                return;
            }
            let (cx, cy) = event_canvas_coords(&e, &s.canvas);
            s.session.pointer_move(cx - OFFSET_X, cy - OFFSET_Y);
            draw(&s);
        }));
        state
            .borrow()
            .canvas
            .add_event_listener_with_callback("mousemove", mousemove.as_ref().unchecked_ref())?;
        mousemove.forget();
    }
    {
        // attached to the document so releasing outside the canvas also
        // ends the drag
        let st = state.clone();
        let mouseup = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |_e: MouseEvent| {
            st.borrow_mut().session.pointer_up();
        }));
        doc.add_event_listener_with_callback("mouseup", mouseup.as_ref().unchecked_ref())?;
        mouseup.forget();
    }

    Ok(())
}

fn init_canvas(
    document: &Document,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), JsValue> {
    let canvas = document
        .get_element_by_id("canvas")
        .ok_or("no #canvas element")?
        .dyn_into::<HtmlCanvasElement>()?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or("no 2d context")?
        .dyn_into::<CanvasRenderingContext2d>()?;
    Ok((canvas, ctx))
}

/// Simple query string parser used at start-up.
fn get_query_param(search: &str, key: &str) -> Option<String> {
    let s = search.trim_start_matches('?');
    for pair in s.split('&') {
        let mut it = pair.splitn(2, '=');
        let k = it.next()?;
        let v = it.next().unwrap_or("");
        if k == key {
            return Some(url_decode(v));
        }
    }
    None
}

fn url_decode(s: &str) -> String {
    percent_encoding::percent_decode_str(s)
        .decode_utf8()
        .unwrap_or_else(|_| s.into())
        .to_string()
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let (canvas, ctx) = init_canvas(&document)?;

    let mut session = EditorSession::new();
    // If the URL carries ?seed=..., start from that room instead of an
    // empty one; a malformed token falls back to the default.
    if let Ok(search) = window.location().search()
        && let Some(token) = get_query_param(&search, "seed")
        && let Err(err) = session.load_seed(&token)
    {
        log(&format!("Failed to load seed from URL: {err}"));
    }

    let state = Rc::new(RefCell::new(State {
        window,
        document,
        canvas,
        ctx,
        session,
    }));

    STATE.with(|st| st.replace(Some(state.clone())));
    attach_ui(state.clone())?;
    draw(&state.borrow());
    Ok(())
}
