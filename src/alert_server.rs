use actix_web::dev::{Service, ServerHandle};
use actix_web::{web, App, HttpResponse, HttpServer};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use tokio::runtime::Runtime;
use uuid::Uuid;

use crate::emergency::{EmergencyPayload, EMERGENCY_PATH};

#[derive(Clone, Debug, PartialEq)]
pub struct ReceivedAlert {
    pub id: Uuid,
    pub received_at: DateTime<Utc>,
    pub payload: EmergencyPayload,
}

pub const MAX_KEPT_ALERTS: usize = 256;

/// The most recent alerts the server accepted, oldest first, shared with
/// whoever started the server.
#[derive(Clone)]
pub struct AlertLog {
    items: Arc<Mutex<VecDeque<ReceivedAlert>>>,
    capacity: usize,
}

impl Default for AlertLog {
    fn default() -> Self {
        Self::with_capacity(MAX_KEPT_ALERTS)
    }
}

impl AlertLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        AlertLog {
            items: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
        }
    }

    fn record(&self, payload: EmergencyPayload) -> Uuid {
        let id = Uuid::new_v4();
        let mut items = self.items.lock().unwrap();
        if items.len() >= self.capacity {
            if let Some(dropped) = items.pop_front() {
                debug!("alert log full, dropping alert {}", dropped.id);
            }
        }
        items.push_back(ReceivedAlert {
            id,
            received_at: Utc::now(),
            payload,
        });
        id
    }

    pub fn all(&self) -> Vec<ReceivedAlert> {
        self.items.lock().unwrap().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AlertReceipt {
    alert_id: Uuid,
    received: bool,
}

struct AppState {
    alerts: AlertLog,
}

async fn receive_emergency(
    payload: web::Json<EmergencyPayload>,
    data: web::Data<AppState>,
) -> HttpResponse {
    let payload = payload.into_inner();
    warn!(
        "emergency alert from {} at ({}, {}): {}",
        payload.user_id, payload.location.lat, payload.location.lng, payload.message
    );
    let alert_id = data.alerts.record(payload);
    HttpResponse::Ok().json(AlertReceipt {
        alert_id,
        received: true,
    })
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().finish()
}

pub struct AlertServer {
    host: String,
    port: u16,
    alerts: AlertLog,
    handle: Option<(ServerHandle, thread::JoinHandle<()>)>,
}

impl AlertServer {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            alerts: AlertLog::new(),
            handle: None,
        }
    }

    pub fn alerts(&self) -> AlertLog {
        self.alerts.clone()
    }

    /// Only meaningful after `start`; port 0 is replaced by the bound port.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    // Start the server in a separate thread
    pub fn start(&mut self) -> Result<()> {
        if self.handle.is_some() {
            bail!("alert server is already running");
        }
        let host = self.host.clone();
        let port = self.port;
        let alerts = self.alerts.clone();

        // reports the bound port (or the bind error) back to the caller
        let (tx, rx) = mpsc::channel::<Result<(u16, ServerHandle)>>();

        let join_handle = thread::spawn(move || {
            let runtime = match Runtime::new() {
                Ok(runtime) => runtime,
                Err(e) => {
                    let _ = tx.send(Err(e.into()));
                    return;
                }
            };
            runtime.block_on(async move {
                let app_state = web::Data::new(AppState { alerts });
                let server = HttpServer::new(move || {
                    App::new()
                        .app_data(app_state.clone())
                        .wrap_fn(|req, srv| {
                            info!("Incoming request: {} {}", req.method(), req.uri());
                            srv.call(req)
                        })
                        .route(EMERGENCY_PATH, web::post().to(receive_emergency))
                        .route("/api/health", web::get().to(health))
                })
                .workers(1)
                .bind(format!("{host}:{port}"));

                let server = match server {
                    Ok(server) => server,
                    Err(e) => {
                        let _ = tx.send(Err(e.into()));
                        return;
                    }
                };

                let bound_port = server
                    .addrs()
                    .first()
                    .map(|addr| addr.port())
                    .unwrap_or(port);
                let server = server.run();
                let _ = tx.send(Ok((bound_port, server.handle())));

                info!("alert server bound to {host}:{bound_port}");
                if let Err(e) = server.await {
                    error!("alert server stopped with error: {e}");
                }
            });
        });

        let (bound_port, server_handle) = rx.recv()??;
        self.port = bound_port;
        self.handle = Some((server_handle, join_handle));
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some((server_handle, join_handle)) = self.handle.take() {
            pollster::block_on(server_handle.stop(true));
            if join_handle.join().is_err() {
                error!("alert server thread panicked");
            }
        }
    }
}

impl Drop for AlertServer {
    fn drop(&mut self) {
        self.stop();
    }
}
