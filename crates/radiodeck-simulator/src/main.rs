//! Desktop simulator for the radiodeck tuner UI.
//!
//! Renders radiodeck-core screens in an SDL2 window via
//! `embedded-graphics-simulator`. A mock tuner cycles through a few stations
//! with synthetic RDS data so the screens can be exercised without hardware.
//!
//! # Key bindings
//!
//! | Key | Action                              |
//! |-----|-------------------------------------|
//! | 1   | Receiver screen                     |
//! | 2   | Memory screen                       |
//! | S   | Toggle signal                       |
//! | F   | Tune to the next station            |
//! | Q   | Quit                                |
//!
//! Mouse presses and releases are forwarded as touch events.

use std::fmt::Write;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{info, warn};

use radiodeck_core::config::RadioUiConfig;
use radiodeck_core::radio::{RadioControl, RadioDataSource, SeekDirection};
use radiodeck_core::screens::{DisplayRequest, ScreenManager, display_receiver, display_sender};
use radiodeck_core::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, ScreenId, TouchEvent, TouchPoint};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// How long each radio text stays up before the station sends the next one.
const RADIO_TEXT_INTERVAL: Duration = Duration::from_secs(8);

// ---------------------------------------------------------------------------
// Mock tuner
// ---------------------------------------------------------------------------

struct MockStation {
    frequency_khz: u32,
    name: &'static str,
    program_type: &'static str,
    texts: &'static [&'static str],
}

const STATIONS: &[MockStation] = &[
    MockStation {
        frequency_khz: 87_600,
        name: "CLASSIC",
        program_type: "Serious Classical",
        texts: &[
            "Symphony No. 7 in A major",
            "Up next: the evening concert live from the city hall, with works by Dvorak",
        ],
    },
    MockStation {
        frequency_khz: 98_500,
        name: "RADIO 1",
        program_type: "Pop Music",
        texts: &["Hits all day", "Traffic: roadworks on the ring road, expect delays"],
    },
    MockStation {
        frequency_khz: 104_300,
        name: "NEWS 24",
        program_type: "News",
        texts: &["Headlines at the top of every hour"],
    },
];

/// Tuner stand-in with synthetic RDS data that changes over time.
struct MockTuner {
    station: usize,
    text: usize,
    last_text_change: Instant,
    signal: bool,
    muted: bool,
    agc: bool,
    clock: heapless::String<8>,
}

impl MockTuner {
    fn new() -> Self {
        Self {
            station: 0,
            text: 0,
            last_text_change: Instant::now(),
            signal: true,
            muted: false,
            agc: true,
            clock: heapless::String::new(),
        }
    }

    fn current(&self) -> &'static MockStation {
        &STATIONS[self.station % STATIONS.len()]
    }

    /// Advance the radio text and clock like a real broadcast would.
    fn advance(&mut self) {
        if self.last_text_change.elapsed() >= RADIO_TEXT_INTERVAL {
            self.text = (self.text + 1) % self.current().texts.len();
            self.last_text_change = Instant::now();
        }

        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let minutes_of_day = (secs / 60) % (24 * 60);
        self.clock.clear();
        write!(self.clock, "{:02}:{:02}", minutes_of_day / 60, minutes_of_day % 60).ok();
    }

    fn tune(&mut self, station: usize) {
        self.station = station % STATIONS.len();
        self.text = 0;
        self.last_text_change = Instant::now();
        info!("Tuned to {} kHz", self.current().frequency_khz);
    }
}

impl RadioDataSource for MockTuner {
    fn is_signal_valid(&mut self) -> bool {
        self.signal
    }

    fn station_name(&self) -> &str {
        self.current().name
    }

    fn program_type(&self) -> &str {
        self.current().program_type
    }

    fn radio_text(&self) -> &str {
        let texts = self.current().texts;
        texts[self.text % texts.len()]
    }

    fn clock_time(&self) -> &str {
        &self.clock
    }
}

impl RadioControl for MockTuner {
    fn is_muted(&self) -> bool {
        self.muted
    }

    fn set_mute(&mut self, muted: bool) {
        info!("Mute {}", if muted { "on" } else { "off" });
        self.muted = muted;
    }

    fn is_agc_enabled(&self) -> bool {
        self.agc
    }

    fn set_agc(&mut self, enabled: bool) {
        info!("AGC {}", if enabled { "on" } else { "off" });
        self.agc = enabled;
    }

    fn seek(&mut self, direction: SeekDirection) {
        let next = match direction {
            SeekDirection::Up => self.station + 1,
            SeekDirection::Down => self.station + STATIONS.len() - 1,
        };
        self.tune(next);
    }
}

// ---------------------------------------------------------------------------
// Input mapping
// ---------------------------------------------------------------------------

fn touch_point(point: Point) -> TouchPoint {
    TouchPoint::new(point.x.max(0) as u16, point.y.max(0) as u16)
}

fn keycode_to_screen(keycode: Keycode) -> Option<ScreenId> {
    match keycode {
        Keycode::Num1 | Keycode::Kp1 => Some(ScreenId::Receiver),
        Keycode::Num2 | Keycode::Kp2 => Some(ScreenId::Memory),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting radiodeck simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: 1=Receiver  2=Memory  S=Signal  F=Next station  Q=Quit");

    let mut display =
        SimulatorDisplay::<Rgb565>::new(Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("radiodeck Simulator", &output_settings);

    let mut tuner = MockTuner::new();
    let mut manager = ScreenManager::new(
        RadioUiConfig::default(),
        Rectangle::new(Point::zero(), Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX)),
        &tuner,
    )
    .with_presets(STATIONS.iter().map(|s| s.frequency_khz));

    let sender = display_sender();
    let receiver = display_receiver();
    let start = Instant::now();
    let now = || embassy_time::Instant::from_millis(start.elapsed().as_millis() as u64);

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    let _ = display.clear(Rgb565::BLACK);
    tuner.advance();
    if let Err(e) = manager.tick(now(), &mut tuner, &mut display) {
        log::error!("Draw error: {:?}", e);
    }
    window.update(&display);

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------
    'running: loop {
        let frame_start = Instant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            let request = match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => match keycode {
                    Keycode::Q | Keycode::Escape => break 'running,
                    Keycode::S => {
                        tuner.signal = !tuner.signal;
                        info!("Signal {}", if tuner.signal { "restored" } else { "lost" });
                        None
                    }
                    Keycode::F => {
                        tuner.tune(tuner.station + 1);
                        Some(DisplayRequest::ContextChanged)
                    }
                    other => keycode_to_screen(other).map(DisplayRequest::SwitchScreen),
                },

                SimulatorEvent::MouseButtonDown { point, .. } => {
                    Some(DisplayRequest::Touch(TouchEvent::Press(touch_point(point))))
                }

                SimulatorEvent::MouseButtonUp { point, .. } => {
                    Some(DisplayRequest::Touch(TouchEvent::Release(touch_point(point))))
                }

                _ => None,
            };

            if let Some(request) = request {
                if sender.try_send(request).is_err() {
                    warn!("Display request queue full, dropping {:?}", request);
                }
            }
        }

        // --- Requests + frame -----------------------------------------------
        manager.drain_requests(&receiver, &mut tuner);
        tuner.advance();

        if let Err(e) = manager.tick(now(), &mut tuner, &mut display) {
            log::error!("Draw error: {:?}", e);
        }

        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}
