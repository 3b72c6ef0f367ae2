//! Projectile Sim entry point
//!
//! Handles platform-specific initialization and runs the simulation loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlInputElement};

    use projectile_sim::consts::*;
    use projectile_sim::platform::timer::Interval;
    use projectile_sim::sim::{Session, tick};
    use projectile_sim::view::{PathTrail, Viewport};
    use projectile_sim::{SaveThrottle, Settings};

    /// Simulation instance holding all state
    struct App {
        session: Session,
        viewport: Viewport,
        trail: PathTrail,
        settings: Settings,
        throttle: SaveThrottle,
        ctx: CanvasRenderingContext2d,
    }

    impl App {
        fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
            let settings = Settings::load();
            Self {
                session: Session::launch(settings.elasticity()),
                viewport: Viewport::new(width, height),
                trail: PathTrail::new(settings.persist_path),
                settings,
                throttle: SaveThrottle::default(),
                ctx,
            }
        }

        /// One timer tick: simulate, draw, flush deferred saves
        fn step(&mut self) {
            tick(&mut self.session, SIM_DT);
            self.trail.record(self.session.projectile.position());
            self.draw();

            if self.throttle.poll(js_sys::Date::now()) {
                self.settings.save();
            }
            update_readout(&self.session);
        }

        fn draw(&self) {
            let Some(scale) = self.viewport.scale(self.session.launch_prediction) else {
                return;
            };
            let ctx = &self.ctx;
            ctx.clear_rect(0.0, 0.0, self.viewport.width, self.viewport.height);
            for &pos in self.trail.points() {
                let p = self.viewport.to_canvas(pos, scale);
                ctx.begin_path();
                let _ = ctx.arc(p.x, p.y, self.viewport.radius, 0.0, TAU);
                ctx.fill();
                ctx.stroke();
            }
        }

        fn set_elasticity_percent(&mut self, percent: i32) {
            self.settings.set_elasticity_percent(percent);
            self.session.projectile.collision_elasticity = self.settings.elasticity();
            if self.throttle.request(js_sys::Date::now()) {
                self.settings.save();
            }
            update_elasticity_label(&self.settings);
        }

        fn toggle_persist(&mut self) {
            self.settings.toggle_persist_path();
            self.trail.set_persist(self.settings.persist_path);
            self.settings.save();
        }
    }

    thread_local! {
        /// Keeps the tick timer alive for the lifetime of the page
        static TIMER: RefCell<Option<Interval>> = const { RefCell::new(None) };
    }

    fn document() -> Option<web_sys::Document> {
        web_sys::window().and_then(|w| w.document())
    }

    fn update_readout(session: &Session) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id("position")) {
            let pos = session.projectile.position();
            el.set_text_content(Some(&format!("(x, y): ({:.2}, {:.2})", pos.x, pos.y)));
        }
    }

    fn update_elasticity_label(settings: &Settings) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id("elasticity-label")) {
            el.set_text_content(Some(&format!(
                "Collision Elasticity: {}%",
                settings.collision_elasticity
            )));
        }
    }

    fn setup_controls(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let Some(document) = document() else {
            return Ok(());
        };

        // Elasticity slider
        if let Some(el) = document.get_element_by_id("elasticity") {
            let slider: HtmlInputElement = el.dyn_into()?;
            slider.set_value(&app.borrow().settings.collision_elasticity.to_string());
            let app = app.clone();
            let input = slider.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Some(percent) = projectile_sim::settings::parse_percent(&input.value()) {
                    app.borrow_mut().set_elasticity_percent(i32::from(percent));
                }
            });
            slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Persist path toggle
        if let Some(btn) = document.get_element_by_id("persist") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut app = app.borrow_mut();
                app.toggle_persist();
                log::info!("Persist path: {}", app.settings.persist_path);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Projectile Sim starting...");

        let document = document().ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;
        canvas.set_width(CANVAS_WIDTH);
        canvas.set_height(CANVAS_HEIGHT);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;

        let app = Rc::new(RefCell::new(App::new(
            ctx,
            f64::from(CANVAS_WIDTH),
            f64::from(CANVAS_HEIGHT),
        )));
        {
            let app = app.borrow();
            update_elasticity_label(&app.settings);
            log::info!(
                "Launch prediction: range {:.2} m, apex {:.2} m",
                app.session.launch_prediction.x,
                app.session.launch_prediction.y
            );
        }

        setup_controls(app.clone())?;

        let period_ms = (SIM_DT * 1000.0).round() as i32;
        let timer = Interval::new(period_ms, move || app.borrow_mut().step())?;
        TIMER.with(|t| *t.borrow_mut() = Some(timer));

        log::info!("Projectile Sim running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_app::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    use projectile_sim::Settings;
    use projectile_sim::consts::SIM_DT;
    use projectile_sim::platform::FixedStep;
    use projectile_sim::settings::parse_percent;
    use projectile_sim::sim::{Session, tick};

    const DEFAULT_SECONDS: f64 = 10.0;
    const SETTINGS_FILE: &str = "projectile_sim_settings.json";

    /// `projectile-sim [seconds] [elasticity%]`
    struct Args {
        seconds: f64,
        elasticity_percent: Option<u8>,
    }

    fn parse_args() -> Args {
        let mut args = std::env::args().skip(1);
        let seconds = match args.next() {
            Some(raw) => match raw.parse::<f64>() {
                Ok(s) if s.is_finite() && s > 0.0 => s,
                _ => {
                    log::warn!("Invalid duration {raw:?}, using {DEFAULT_SECONDS}s");
                    DEFAULT_SECONDS
                }
            },
            None => DEFAULT_SECONDS,
        };
        let elasticity_percent = args.next().and_then(|raw| {
            let parsed = parse_percent(&raw);
            if parsed.is_none() {
                log::warn!("Invalid elasticity {raw:?}, keeping saved value");
            }
            parsed
        });
        Args {
            seconds,
            elasticity_percent,
        }
    }

    pub fn run() {
        let args = parse_args();
        let settings_path = PathBuf::from(SETTINGS_FILE);
        let mut settings = Settings::load_from(&settings_path);
        if let Some(percent) = args.elasticity_percent {
            settings.set_elasticity_percent(i32::from(percent));
            settings.save_to(&settings_path);
        }

        let mut session = Session::launch(settings.elasticity());
        log::info!(
            "Launch: elasticity {:.2}, predicted range {:.2} m, apex {:.2} m",
            session.projectile.collision_elasticity,
            session.launch_prediction.x,
            session.launch_prediction.y
        );

        let total_ticks = (args.seconds / SIM_DT).round() as u64;
        let mut clock = FixedStep::default();
        let mut last = Instant::now();
        let mut bounces = 0u32;

        while session.time_ticks < total_ticks {
            std::thread::sleep(Duration::from_secs_f64(SIM_DT));
            let now = Instant::now();
            let steps = clock.advance(now.duration_since(last).as_secs_f64());
            last = now;

            for _ in 0..steps {
                if tick(&mut session, SIM_DT).is_some() {
                    bounces += 1;
                }
                if session.time_ticks % 24 == 0 {
                    let k = session.projectile.kinematics();
                    let predicted = session.projectile.predicted();
                    log::info!(
                        "t={:5.2}s pos=({:7.2}, {:7.2}) v=({:7.2}, {:7.2}) |v|={:6.2} predicted=({:.2}, {:.2})",
                        session.elapsed(SIM_DT),
                        k.pos.x,
                        k.pos.y,
                        k.vel.x,
                        k.vel.y,
                        k.speed(),
                        predicted.x,
                        predicted.y
                    );
                }
            }
        }

        log::info!("Finished after {} ticks, {} bounces", session.time_ticks, bounces);
        match serde_json::to_string(&session) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize final state: {e}"),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Projectile Sim (native) starting...");
    native::run();
}
