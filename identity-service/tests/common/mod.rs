use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use identity_service::domain::account::ports::AccountServicePort;
use identity_service::domain::account::service::AccountService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::InMemoryAccountStore;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TOKEN_EXPIRATION_HOURS: i64 = 24;

/// Test application that spawns a real server on a random port, backed by
/// the in-memory store so the suite needs no external services.
pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryAccountStore>,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryAccountStore::new());
        let authenticator =
            Arc::new(Authenticator::new(TEST_SECRET).expect("Failed to create authenticator"));

        let account_service: Arc<dyn AccountServicePort> = Arc::new(AccountService::new(
            Arc::clone(&store),
            authenticator,
            TOKEN_EXPIRATION_HOURS,
        ));

        let router = create_router(account_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        let jwt_handler = JwtHandler::new(TEST_SECRET).expect("Failed to create JWT handler");

        Self {
            address,
            store,
            api_client: reqwest::Client::new(),
            jwt_handler,
        }
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// POST /user/create-user with the given JSON body
    pub async fn create_user(&self, body: &serde_json::Value) -> reqwest::Response {
        self.post("/user/create-user")
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// POST /user/login with the given JSON body
    pub async fn login(&self, body: &serde_json::Value) -> reqwest::Response {
        self.post("/user/login")
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}
