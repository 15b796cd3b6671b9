//! HTTP server implementation
//!
//! Uses hyper http1 with TokioIo for async handling. Routing is a single
//! `match` on method and path; `:id` segments are matched with prefix/suffix
//! guards and the id sliced out of the path.

use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::auth::TokenService;
use crate::config::Args;
use crate::routes;
use crate::routes::helpers::{cors_preflight, not_found_response, BoxBody};
use crate::store::Store;

/// Shared application state
pub struct AppState {
    pub args: Args,
    /// The single authoritative state document plus its snapshot store.
    pub store: Arc<Store>,
    pub tokens: TokenService,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(args: Args, store: Arc<Store>) -> Self {
        let tokens = TokenService::new(&args.jwt_secret(), args.jwt_expiry_days);
        Self {
            args,
            store,
            tokens,
            started_at: Instant::now(),
        }
    }
}

/// Run the HTTP server accept loop.
pub async fn run(state: Arc<AppState>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(state.args.listen).await?;
    info!("HTTP server listening on {}", state.args.listen);

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let io = TokioIo::new(stream);
                let state = Arc::clone(&state);

                tokio::spawn(async move {
                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Route incoming HTTP requests
async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> Result<Response<BoxBody>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    info!("[{}] {} {}", addr, method, path);

    // CORS preflight
    if method == Method::OPTIONS {
        return Ok(cors_preflight());
    }

    let response = match (method, path.as_str()) {
        // ====================================================================
        // Health & info
        // ====================================================================
        (Method::GET, "/health") => routes::health::health_check(state).await,
        (Method::GET, "/api/info") => routes::health::app_info(),

        // ====================================================================
        // Auth
        // ====================================================================
        (Method::POST, "/api/auth/register") => {
            routes::auth_routes::handle_register(req, state).await
        }
        (Method::POST, "/api/auth/login") => routes::auth_routes::handle_login(req, state).await,
        (Method::GET, "/api/auth/me") => routes::auth_routes::handle_me(req, state).await,
        (Method::PUT, "/api/auth/profile") => {
            routes::auth_routes::handle_update_profile(req, state).await
        }
        (Method::PUT, "/api/auth/settings") => {
            routes::auth_routes::handle_update_settings(req, state).await
        }
        (Method::GET, "/api/auth/anonymous-name") => {
            routes::auth_routes::handle_anonymous_name(req, state).await
        }

        // ====================================================================
        // Daily check-ins
        // ====================================================================
        (Method::POST, "/api/checkins") => routes::checkins::handle_create(req, state).await,
        (Method::GET, "/api/checkins/today") => routes::checkins::handle_today(req, state).await,
        (Method::GET, "/api/checkins/stats") => routes::checkins::handle_stats(req, state).await,
        (Method::GET, "/api/checkins/calendar") => {
            routes::checkins::handle_calendar(req, state).await
        }
        (Method::GET, "/api/checkins") => routes::checkins::handle_list(req, state).await,

        // ====================================================================
        // Journal
        // ====================================================================
        (Method::POST, "/api/journal") => routes::journal::handle_create(req, state).await,
        (Method::GET, "/api/journal/stats") => routes::journal::handle_stats(req, state).await,
        (Method::GET, "/api/journal/prompts") => routes::journal::handle_prompts(),
        (Method::GET, "/api/journal") => routes::journal::handle_list(req, state).await,

        // ====================================================================
        // Habits
        // ====================================================================
        (Method::POST, "/api/habits") => routes::habits::handle_create(req, state).await,
        (Method::GET, "/api/habits/stats") => routes::habits::handle_stats(req, state).await,
        (Method::GET, "/api/habits") => routes::habits::handle_list(req, state).await,
        (Method::POST, p) if p.starts_with("/api/habits/") && p.ends_with("/complete") => {
            let id = p
                .strip_prefix("/api/habits/")
                .and_then(|s| s.strip_suffix("/complete"))
                .unwrap_or("")
                .to_string();
            routes::habits::handle_complete(req, state, &id).await
        }

        // ====================================================================
        // Mood
        // ====================================================================
        (Method::POST, "/api/mood") => routes::mood::handle_create(req, state).await,
        (Method::GET, "/api/mood/stats") => routes::mood::handle_stats(req, state).await,
        (Method::GET, "/api/mood") => routes::mood::handle_list(req, state).await,

        // ====================================================================
        // Community
        // ====================================================================
        (Method::POST, "/api/community/posts") => {
            routes::community::handle_create_post(req, state).await
        }
        (Method::GET, "/api/community/posts") => {
            routes::community::handle_list_posts(req, state).await
        }
        (Method::POST, p) if p.starts_with("/api/community/posts/") && p.ends_with("/like") => {
            let id = p
                .strip_prefix("/api/community/posts/")
                .and_then(|s| s.strip_suffix("/like"))
                .unwrap_or("")
                .to_string();
            routes::community::handle_like(req, state, &id).await
        }
        (Method::POST, p) if p.starts_with("/api/community/posts/") && p.ends_with("/replies") => {
            let id = p
                .strip_prefix("/api/community/posts/")
                .and_then(|s| s.strip_suffix("/replies"))
                .unwrap_or("")
                .to_string();
            routes::community::handle_create_reply(req, state, &id).await
        }
        (Method::GET, p) if p.starts_with("/api/community/posts/") && p.ends_with("/replies") => {
            let id = p
                .strip_prefix("/api/community/posts/")
                .and_then(|s| s.strip_suffix("/replies"))
                .unwrap_or("")
                .to_string();
            routes::community::handle_list_replies(req, state, &id).await
        }

        // ====================================================================
        // Achievements & challenges
        // ====================================================================
        (Method::GET, "/api/achievements") => routes::progress::handle_achievements(state).await,
        (Method::GET, "/api/achievements/user") => {
            routes::progress::handle_user_achievements(req, state).await
        }
        (Method::GET, "/api/challenges") => routes::progress::handle_challenges(state).await,
        (Method::GET, "/api/challenges/user") => {
            routes::progress::handle_user_challenges(req, state).await
        }
        (Method::POST, p) if p.starts_with("/api/challenges/") && p.ends_with("/join") => {
            let id = p
                .strip_prefix("/api/challenges/")
                .and_then(|s| s.strip_suffix("/join"))
                .unwrap_or("")
                .to_string();
            routes::progress::handle_join_challenge(req, state, &id).await
        }

        // ====================================================================
        // Self-care planning, reminders, theme
        // ====================================================================
        (Method::POST, "/api/selfcare") => routes::planner::handle_create_activity(req, state).await,
        (Method::GET, "/api/selfcare") => routes::planner::handle_list_activities(req, state).await,
        (Method::POST, "/api/reminders") => routes::planner::handle_create_reminder(req, state).await,
        (Method::GET, "/api/reminders") => routes::planner::handle_list_reminders(req, state).await,
        (Method::GET, "/api/theme") => routes::planner::handle_get_theme(req, state).await,
        (Method::PUT, "/api/theme") => routes::planner::handle_update_theme(req, state).await,

        // ====================================================================
        // Dashboard overview
        // ====================================================================
        (Method::GET, "/api/stats") => routes::overview::handle_stats(req, state).await,

        _ => not_found_response(),
    };

    Ok(response)
}
