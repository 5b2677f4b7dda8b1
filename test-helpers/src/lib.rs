pub mod mock;

use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use payloads::{
    APIClient, ClientError, HttpRequest, HttpResponse, Method, StatusCode,
    Transport, User,
};
use serde_json::{Value, json};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use stores::{MemoryStorage, StoreConfig, Storefront};
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, util::SubscriberInitExt};

pub const TEST_ADDRESS: &str = "http://storefront.test";

/// A scripted answer from the fake backend.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(StatusCode, Value),
    /// The request never reaches a server.
    NetworkError,
}

/// `200 {"success": true, "data": ..}`
pub fn ok(data: Value) -> Reply {
    Reply::Json(StatusCode::OK, json!({ "success": true, "data": data }))
}

/// `200 {"success": true}` with no payload.
pub fn ok_empty() -> Reply {
    Reply::Json(StatusCode::OK, json!({ "success": true }))
}

/// A 2xx response whose envelope reports failure.
pub fn rejected(message: &str) -> Reply {
    Reply::Json(
        StatusCode::OK,
        json!({ "success": false, "message": message }),
    )
}

pub fn error(status: StatusCode, message: &str) -> Reply {
    Reply::Json(status, json!({ "success": false, "message": message }))
}

/// An arbitrary 200 body, for list endpoints with non-standard envelopes.
pub fn raw(body: Value) -> Reply {
    Reply::Json(StatusCode::OK, body)
}

/// A request the fake backend received.
#[derive(Debug, Clone)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

struct Route {
    method: Method,
    path: String,
    /// Served in order; the last one repeats.
    replies: VecDeque<Reply>,
    gate: Option<oneshot::Receiver<()>>,
}

/// Holds the next matching request until released or dropped.
pub struct Gate(oneshot::Sender<()>);

impl Gate {
    pub fn release(self) {
        let _ = self.0.send(());
    }
}

/// An in-process stand-in for the backend. Routes match on method and the
/// exact path (query string included); the most recently registered route
/// wins. Unmatched requests get a 404 envelope.
#[derive(Default)]
pub struct FakeBackend {
    routes: RefCell<Vec<Route>>,
    calls: RefCell<Vec<Call>>,
}

impl FakeBackend {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn on(&self, method: Method, path: &str, reply: Reply) -> &Self {
        self.on_sequence(method, path, vec![reply])
    }

    pub fn on_sequence(
        &self,
        method: Method,
        path: &str,
        replies: Vec<Reply>,
    ) -> &Self {
        self.routes.borrow_mut().push(Route {
            method,
            path: path.to_string(),
            replies: replies.into(),
            gate: None,
        });
        self
    }

    /// Hold the next request to an already registered route until the
    /// returned gate is released.
    pub fn hold(&self, method: Method, path: &str) -> Gate {
        let (tx, rx) = oneshot::channel();
        let mut routes = self.routes.borrow_mut();
        match routes
            .iter_mut()
            .rev()
            .find(|r| r.method == method && r.path == path)
        {
            Some(route) => route.gate = Some(rx),
            None => panic!("No route registered for {method:?} {path}"),
        }
        Gate(tx)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn calls_to(&self, method: Method, path: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .count()
    }

    fn answer(
        &self,
        method: Method,
        path: &str,
    ) -> (Reply, Option<oneshot::Receiver<()>>) {
        let mut routes = self.routes.borrow_mut();
        let Some(route) = routes
            .iter_mut()
            .rev()
            .find(|r| r.method == method && r.path == path)
        else {
            return (error(StatusCode::NOT_FOUND, "Not found"), None);
        };
        let reply = if route.replies.len() > 1 {
            route.replies.pop_front()
        } else {
            route.replies.front().cloned()
        };
        (
            reply.unwrap_or_else(|| error(StatusCode::NOT_FOUND, "Not found")),
            route.gate.take(),
        )
    }
}

impl Transport for FakeBackend {
    fn send(
        &self,
        _address: &str,
        request: HttpRequest,
    ) -> LocalBoxFuture<'_, Result<HttpResponse, ClientError>> {
        let (reply, gate) = self.answer(request.method, &request.path);
        self.calls.borrow_mut().push(Call {
            method: request.method,
            path: request.path,
            body: request.body,
            bearer: request.bearer,
        });
        Box::pin(async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            match reply {
                Reply::Json(status, body) => Ok(HttpResponse {
                    status,
                    body: body.to_string(),
                }),
                Reply::NetworkError => {
                    Err(ClientError::Network("connection refused".into()))
                }
            }
        })
    }
}

/// A storefront wired to a fresh yewdux context, an empty in-memory
/// storage and a fake backend.
pub struct TestStorefront {
    pub backend: Rc<FakeBackend>,
    pub storage: Rc<MemoryStorage>,
    pub api: Rc<APIClient>,
    pub storefront: Storefront,
    pub cx: yewdux::Context,
}

impl TestStorefront {
    /// Sign in as Alice through `/login`. Her server address book starts
    /// empty unless `/addresses` was scripted beforehand.
    pub async fn sign_in_alice(&self) -> anyhow::Result<User> {
        self.backend.on(
            Method::Post,
            "login",
            ok(json!({ "user": mock::alice(), "token": mock::ALICE_TOKEN })),
        );
        if self.backend.routes.borrow().iter().all(|r| r.path != "addresses") {
            self.backend.on(Method::Get, "addresses", ok(json!([])));
        }
        let user = self
            .storefront
            .auth
            .sign_in(&mock::alice_login_credentials())
            .await?;
        Ok(user)
    }

    /// Read a storage key back as JSON.
    pub fn stored(&self, key: &str) -> Option<Value> {
        use stores::KeyValueStorage;
        let raw = self.storage.get_item(key).ok()??;
        serde_json::from_str(&raw).ok()
    }

    /// A second storefront over the same storage and backend, as after a
    /// page reload.
    pub fn reload(&self) -> TestStorefront {
        let cx = yewdux::Context::new();
        let api = Rc::new(APIClient::with_transport(
            TEST_ADDRESS,
            self.backend.clone(),
        ));
        let storefront = Storefront::new(
            &cx,
            api.clone(),
            self.storage.clone(),
            StoreConfig::default(),
        );
        TestStorefront {
            backend: self.backend.clone(),
            storage: self.storage.clone(),
            api,
            storefront,
            cx,
        }
    }
}

pub fn spawn_storefront() -> TestStorefront {
    init_test_tracing();
    let backend = FakeBackend::new();
    let storage = Rc::new(MemoryStorage::new());
    let cx = yewdux::Context::new();
    let api = Rc::new(APIClient::with_transport(TEST_ADDRESS, backend.clone()));
    let storefront = Storefront::new(
        &cx,
        api.clone(),
        storage.clone(),
        StoreConfig::default(),
    );
    TestStorefront {
        backend,
        storage,
        api,
        storefront,
        cx,
    }
}

/// Print logs when `TEST_LOG` is set, filtered by its value
/// (e.g. `TEST_LOG=stores=debug`).
pub fn init_test_tracing() {
    let Ok(filter) = std::env::var("TEST_LOG") else {
        return;
    };
    let _ = LogTracer::init();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_test_writer()
        .finish()
        .try_init();
}

/// Assert that the result of an API action results in a specific status code.
pub fn assert_status_code<T>(result: Result<T, ClientError>, expected: StatusCode) {
    match result {
        Err(ClientError::APIError(code, _)) => assert_eq!(code, expected),
        _ => panic!("Expected APIError"),
    };
}
