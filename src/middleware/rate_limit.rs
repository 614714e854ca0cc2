use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

struct Window {
    opened: Instant,
    served: u32,
}

/// Fixed one-second-window request counter, shared by every route in the
/// group the layer is attached to.
#[derive(Clone)]
pub struct RpsLimit {
    max_per_second: u32,
    window: Arc<Mutex<Window>>,
}

impl RpsLimit {
    pub fn new(max_per_second: u32) -> Self {
        Self {
            max_per_second: max_per_second.max(1),
            window: Arc::new(Mutex::new(Window {
                opened: Instant::now(),
                served: 0,
            })),
        }
    }

    fn try_acquire(&self) -> bool {
        let mut window = self.window.lock().expect("rate limit mutex poisoned");
        let now = Instant::now();
        if now.duration_since(window.opened) >= Duration::from_secs(1) {
            window.opened = now;
            window.served = 0;
        }
        if window.served >= self.max_per_second {
            return false;
        }
        window.served += 1;
        true
    }
}

pub async fn limit_rps(
    State(limit): State<RpsLimit>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if !limit.try_acquire() {
        return (StatusCode::TOO_MANY_REQUESTS, "rate_limit_exceeded").into_response();
    }
    next.run(req).await
}
