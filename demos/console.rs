// Type commands as if they were spoken: "take me to the hospital",
// "emergency", or "/route <place>" for the destination field. Empty line quits.
use anyhow::Result;
use std::io::{self, BufRead, Write};
use voice_nav_core::alert_server::AlertServer;
use voice_nav_core::capabilities::{CameraOption, LocationCapability, MapRenderer, SpeechOutput};
use voice_nav_core::config::NavigationConfig;
use voice_nav_core::emergency::HttpAlertTransport;
use voice_nav_core::narration;
use voice_nav_core::navigation_session::EngineEvent;
use voice_nav_core::navigator::Navigator;
use voice_nav_core::Coordinate;

struct ConsoleSpeech;

impl SpeechOutput for ConsoleSpeech {
    fn speak(&mut self, text: &str) {
        println!("[speech] {text}");
    }

    fn cancel(&mut self) {}
}

struct ConsoleMap;

impl MapRenderer for ConsoleMap {
    fn show_route(
        &mut self,
        polyline: &[Coordinate],
        marker: Coordinate,
        label: &str,
        camera: CameraOption,
    ) {
        println!(
            "[map] {label} at ({:.4}, {:.4}), zoom {} around ({:.4}, {:.4})",
            marker.lat, marker.lng, camera.zoom, camera.lat, camera.lng
        );
        for point in polyline {
            println!("[map]   {:.5}, {:.5}", point.lat, point.lng);
        }
    }
}

struct NoGps;

impl LocationCapability for NoGps {
    fn current_position(&self) -> Result<Coordinate> {
        Err(anyhow::anyhow!("no GPS on a console"))
    }
}

pub fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    // Without a config file, alerts go to a server started right here.
    let (config, mut local_alert_server) = match std::env::args().nth(1) {
        Some(path) => (NavigationConfig::load(path)?, None),
        None => {
            let mut server = AlertServer::new("127.0.0.1", 0);
            server.start()?;
            let config = NavigationConfig {
                alert_endpoint: server.url(),
                ..Default::default()
            };
            (config, Some(server))
        }
    };
    let transport = HttpAlertTransport::new(&config.alert_endpoint)?;

    let mut navigator = Navigator::new(
        config.build_session(),
        Box::new(ConsoleSpeech),
        Box::new(ConsoleMap),
        Box::new(transport),
        None,
    );
    navigator.set_voice(&config.voice);
    navigator.start();
    navigator.locate(&NoGps);
    println!("[status] {}", navigator.status());

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 || line.trim().is_empty() {
            break;
        }
        let event = match line.trim().strip_prefix("/route ") {
            Some(place) => navigator.submit_destination(place),
            None => navigator.on_transcript(&line),
        };
        if let EngineEvent::RouteReady { route, destination, .. } = &event {
            let stats = narration::route_stats(destination, route);
            println!(
                "[stats] {}: {} km, {} minutes",
                stats.destination, stats.distance_km, stats.walking_minutes
            );
        }
        println!("[status] {}", navigator.status());
    }

    if let Some(server) = local_alert_server.as_mut() {
        println!("{} emergency alert(s) received", server.alerts().len());
        server.stop();
    }
    Ok(())
}
