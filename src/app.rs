/*
 * Application Module
 *
 * This module is the windowed presentation host. nannou owns the event loop and
 * frame pacing; each update feeds the elapsed frame time to the tick driver and
 * collects the drawn positions, which the view then renders as fixed-radius
 * markers. Escape or closing the window stops the simulation.
 */

use std::sync::Mutex;

use anyhow::{anyhow, Result};
use nannou::prelude::*;
use nannou::winit::event::WindowEvent;
use nannou_egui::Egui;
use tracing::{info, warn};

use crate::debug::DebugInfo;
use crate::driver::{DriverState, Host, TickDriver};
use crate::flock::Flock;
use crate::params::FlockConfig;
use crate::ui;

const BACKGROUND: (u8, u8, u8) = (56, 56, 56);

// Everything the model callback needs, handed over from `run`
struct Launch {
    config: FlockConfig,
    flock: Flock,
    show_panel: bool,
}

static PENDING_LAUNCH: Mutex<Option<Launch>> = Mutex::new(None);

fn stash_launch(slot: &Mutex<Option<Launch>>, launch: Launch) -> Result<()> {
    let mut pending = slot
        .lock()
        .map_err(|_| anyhow!("window launch state lock was poisoned"))?;
    *pending = Some(launch);
    Ok(())
}

fn take_launch(slot: &Mutex<Option<Launch>>) -> Result<Launch> {
    slot.lock()
        .map_err(|_| anyhow!("window launch state lock was poisoned"))?
        .take()
        .ok_or_else(|| anyhow!("window opened without launch state"))
}

/// Host state for one frame: the clock reading, the quit flag and the markers
/// to draw.
#[derive(Debug, Default)]
pub struct FrameHost {
    pub dt: f32,
    pub quit: bool,
    pub markers: Vec<Point2>,
}

impl Host for FrameHost {
    fn elapsed(&mut self) -> f32 {
        self.dt
    }

    fn quit_requested(&mut self) -> bool {
        self.quit
    }

    fn draw_agent(&mut self, position: Point2) {
        self.markers.push(position);
    }
}

// Main model for the application
pub struct Model {
    pub driver: TickDriver,
    pub frame: FrameHost,
    pub egui: Option<Egui>,
    pub debug_info: DebugInfo,
    pub config: FlockConfig,
}

/// Open the window and hand control to nannou's event loop.
pub fn run(config: FlockConfig, flock: Flock, show_panel: bool) -> Result<()> {
    stash_launch(
        &PENDING_LAUNCH,
        Launch {
            config,
            flock,
            show_panel,
        },
    )?;

    nannou::app(model).update(update).exit(exit).run();
    Ok(())
}

// Initialize the model
fn model(app: &App) -> Model {
    // nannou's model callback cannot return an error
    let launch = match take_launch(&PENDING_LAUNCH) {
        Ok(launch) => launch,
        Err(err) => panic!("cannot build the window model: {err}"),
    };
    let config = launch.config;

    let window_id = app
        .new_window()
        .title("Steering Behaviour")
        .size(config.width, config.height)
        .resizable(false)
        .view(view)
        .key_pressed(key_pressed)
        .raw_event(raw_window_event)
        .build()
        .expect("Failed to create window");

    app.set_loop_mode(LoopMode::rate_fps(config.tick_rate as f64));

    let egui = if launch.show_panel {
        app.window(window_id).map(|window| Egui::from_window(&window))
    } else {
        None
    };

    let mut flock = launch.flock;
    flock.wrap_all();
    let mut frame = FrameHost::default();
    frame.markers.extend(flock.positions());

    info!(
        width = config.width,
        height = config.height,
        tick_rate = config.tick_rate,
        panel = egui.is_some(),
        "Window opened"
    );

    Model {
        driver: TickDriver::new(flock),
        frame,
        egui,
        debug_info: DebugInfo::default(),
        config,
    }
}

// Update the model
fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;
    model.debug_info.sample(&model.driver);

    if let Some(egui) = model.egui.as_mut() {
        egui.set_elapsed_time(update.since_start);

        let mut steering = model.driver.flock().steering().clone();
        let mut paused = model.driver.is_paused();
        if ui::update_ui(egui, &mut steering, &mut paused, &model.debug_info) {
            model.driver.flock_mut().retune(steering);
        }
        model.driver.set_paused(paused);
    }

    model.frame.dt = update.since_last.as_secs_f32();
    model.frame.markers.clear();

    if model.driver.tick(&mut model.frame) == DriverState::Stopped {
        app.quit();
    }
}

/// Map a world position (origin top-left, y down) into nannou's window space
/// (origin at the centre, y up).
pub fn to_screen(position: Point2, window_rect: Rect) -> Point2 {
    pt2(window_rect.left() + position.x, window_rect.top() - position.y)
}

// Render the model
fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let (r, g, b) = BACKGROUND;
    draw.background().color(rgb8(r, g, b));

    let window_rect = app.window_rect();
    for &position in &model.frame.markers {
        draw.ellipse()
            .xy(to_screen(position, window_rect))
            .radius(model.config.marker_radius)
            .color(WHITE);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        warn!(?err, "Failed to draw frame");
    }

    if let Some(egui) = &model.egui {
        if let Err(err) = egui.draw_to_frame(&frame) {
            warn!(?err, "Failed to draw panel");
        }
    }
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    if key == Key::Escape {
        model.frame.quit = true;
    }
}

// Pass raw window events to egui
fn raw_window_event(_app: &App, model: &mut Model, event: &WindowEvent) {
    if let Some(egui) = model.egui.as_mut() {
        egui.handle_raw_event(event);
    }
}

fn exit(_app: &App, mut model: Model) {
    model.driver.stop();
    info!(ticks = model.driver.ticks(), "Window closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_mapping_flips_y_about_the_window() {
        let rect = Rect::from_w_h(1280.0, 720.0);

        assert_eq!(to_screen(pt2(0.0, 0.0), rect), pt2(-640.0, 360.0));
        assert_eq!(to_screen(pt2(640.0, 360.0), rect), pt2(0.0, 0.0));
        assert_eq!(to_screen(pt2(1280.0, 720.0), rect), pt2(640.0, -360.0));
    }

    #[test]
    fn frame_host_collects_markers_and_quit() {
        let mut host = FrameHost {
            dt: 0.016,
            ..FrameHost::default()
        };
        assert!(!host.quit_requested());
        host.draw_agent(pt2(1.0, 2.0));
        assert_eq!(host.elapsed(), 0.016);
        assert_eq!(host.markers, vec![pt2(1.0, 2.0)]);

        host.quit = true;
        assert!(host.quit_requested());
    }

    fn launch() -> Launch {
        let config = FlockConfig::default();
        Launch {
            flock: Flock::from_agents(Vec::new(), 100.0, 100.0, config.steering.clone()),
            config,
            show_panel: false,
        }
    }

    #[test]
    fn launch_state_is_handed_over_once() {
        let slot = Mutex::new(None);
        stash_launch(&slot, launch()).unwrap();

        assert!(take_launch(&slot).is_ok());
        assert!(take_launch(&slot).is_err());
    }

    #[test]
    fn poisoned_launch_lock_is_an_error() {
        let slot = std::sync::Arc::new(Mutex::<Option<Launch>>::new(None));
        let holder = std::sync::Arc::clone(&slot);
        let _ = std::thread::spawn(move || {
            let _guard = holder.lock().unwrap();
            panic!("poison the launch lock");
        })
        .join();

        let err = stash_launch(&slot, launch()).unwrap_err();
        assert!(err.to_string().contains("poisoned"));
        assert!(take_launch(&slot).is_err());
    }
}
