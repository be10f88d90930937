//! Z Plane entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, Document, HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent,
    };

    use z_plane::audio::WebAudio;
    use z_plane::renderer::{CanvasRenderer, frame_commands};
    use z_plane::sim::{GameEvent, GameState, TickInput, tick};
    use z_plane::{Settings, Tuning};

    fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))?
            .dyn_into::<T>()
            .map_err(|_| JsValue::from_str(&format!("element #{id} has the wrong type")))
    }

    /// Optional JSON config embedded in the page as `<script type="application/json">`
    fn embedded_json(document: &Document, id: &str) -> Option<String> {
        document.get_element_by_id(id)?.text_content()
    }

    fn set_display(el: &HtmlElement, value: &str) {
        let _ = el.style().set_property("display", value);
    }

    /// DOM overlays around the canvas
    struct Hud {
        body: HtmlElement,
        score: HtmlElement,
        start_screen: HtmlElement,
        game_over_screen: HtmlElement,
        final_score: HtmlElement,
    }

    impl Hud {
        fn find(document: &Document) -> Result<Self, JsValue> {
            Ok(Self {
                body: document
                    .body()
                    .ok_or_else(|| JsValue::from_str("no body"))?,
                score: element(document, "score-display")?,
                start_screen: element(document, "start-screen")?,
                game_over_screen: element(document, "game-over-screen")?,
                final_score: element(document, "final-score")?,
            })
        }

        fn show_playing(&self) {
            set_display(&self.score, "block");
            set_display(&self.start_screen, "none");
            set_display(&self.game_over_screen, "none");
            let _ = self.body.style().set_property("cursor", "none");
        }

        fn apply(&self, event: GameEvent) {
            match event {
                GameEvent::ScoreChanged { score } => {
                    self.score.set_text_content(Some(&format!("Score: {score}")));
                }
                GameEvent::GameOver { final_score } => {
                    let _ = self.body.style().set_property("cursor", "default");
                    self.final_score
                        .set_text_content(Some(&format!("Coins Collected: {final_score}")));
                    set_display(&self.game_over_screen, "flex");
                }
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        audio: WebAudio,
        renderer: CanvasRenderer,
        canvas: HtmlCanvasElement,
        hud: Hud,
        /// Latest pointer y; written by input handlers, read once per frame
        pointer_y: f32,
    }

    impl Game {
        fn frame(&mut self) {
            let input = TickInput {
                pointer_y: self.pointer_y,
            };
            tick(&mut self.state, &input, &mut self.audio);
            self.renderer.render(&frame_commands(&self.state));

            for event in self.state.drain_events() {
                self.hud.apply(event);
            }
        }

        fn start(&mut self) {
            self.state.start(&mut self.audio);
            self.hud.show_playing();
            for event in self.state.drain_events() {
                self.hud.apply(event);
            }
        }

        fn resize(&mut self) {
            let Some(window) = web_sys::window() else { return };
            let width = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(800.0);
            let height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(600.0);
            self.canvas.set_width(width as u32);
            self.canvas.set_height(height as u32);
            self.state.resize(width as f32, height as f32);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Z Plane starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let tuning = match embedded_json(&document, "tuning") {
            Some(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring bad tuning: {e}");
                Tuning::default()
            }),
            None => Tuning::default(),
        };
        let settings = match embedded_json(&document, "settings") {
            Some(json) => Settings::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring bad settings: {e}");
                Settings::default()
            }),
            None => Settings::default(),
        };

        let canvas: HtmlCanvasElement = element(&document, "gameCanvas")?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<web_sys::CanvasRenderingContext2d>()?;

        let seed = js_sys::Date::now() as u64;
        let width = window.inner_width()?.as_f64().unwrap_or(800.0) as f32;
        let height = window.inner_height()?.as_f64().unwrap_or(600.0) as f32;

        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed, width, height, tuning),
            audio: WebAudio::new(&settings, seed ^ 0x9e37_79b9),
            renderer: CanvasRenderer::new(ctx, settings.glow),
            canvas,
            hud: Hud::find(&document)?,
            pointer_y: height / 2.0,
        }));
        game.borrow_mut().resize();

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&window, game.clone())?;
        setup_buttons(&document, game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Z Plane running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().pointer_y = event.client_y() as f32;
            });
            window.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch move (non-passive so the page doesn't scroll)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut().pointer_y = touch.client_y() as f32;
                }
            });
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            window.add_event_listener_with_callback_and_add_event_listener_options(
                "touchmove",
                closure.as_ref().unchecked_ref(),
                &options,
            )?;
            closure.forget();
        }

        // Resize
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().resize();
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    /// Start and restart both begin a fresh run
    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        for id in ["start-button", "restart-button"] {
            let btn: HtmlElement = element(document, id)?;
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().start();
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Z Plane failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run: drive the simulation with a scripted pointer and no sound.
///
/// Usage: `z-plane [frames] [seed]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use z_plane::NullAudio;
    use z_plane::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use z_plane::{Tuning, renderer};

    env_logger::init();
    log::info!("Z Plane (native) starting...");
    log::info!("Native mode is headless - build for wasm32 to play in a browser");

    let mut args = std::env::args().skip(1);
    let frames: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(3600);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);

    let mut audio = NullAudio;
    let mut state = GameState::new(seed, 1280.0, 720.0, Tuning::default());
    state.start(&mut audio);

    let mut runs = 1u32;
    let mut best = 0u32;
    let mut draw_calls = 0usize;

    for frame in 0..frames {
        if state.phase == GamePhase::Over {
            state.start(&mut audio);
            runs += 1;
        }

        // Chase the nearest coin, otherwise drift through the middle band
        let pointer_y = state
            .coins
            .iter()
            .filter(|c| c.pos.x > state.player.pos.x)
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
            .map(|c| c.pos.y)
            .unwrap_or(360.0 + 200.0 * (frame as f32 * 0.01).sin());

        tick(&mut state, &TickInput { pointer_y }, &mut audio);
        draw_calls += renderer::frame_commands(&state).len();

        for event in state.drain_events() {
            if let GameEvent::GameOver { final_score } = event {
                log::info!("Run {} over at frame {}: {} coins", runs, frame, final_score);
                best = best.max(final_score);
            }
        }
    }
    best = best.max(state.score);

    println!(
        "{} frames, {} runs, best {} coins, {} draw commands",
        frames, runs, best, draw_calls
    );
}
