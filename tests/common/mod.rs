use kodbank::configuration::{get_configuration, DatabaseSettings};
use sqlx::{Connection, Executor, PgConnection, PgPool};
use wiremock::MockServer;

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub ai_server: MockServer,
    pub api_client: reqwest::Client,
    // Held so the uploads directory outlives the app.
    _uploads_dir: tempfile::TempDir,
}

/// Boots the whole application against a throwaway database and a mock AI
/// gateway. Returns `None` (skipping the test) when postgres is not
/// reachable.
pub async fn spawn_app() -> Option<TestApp> {
    let mut configuration = get_configuration().expect("Failed to get configuration");
    configuration.database.database_name = uuid::Uuid::new_v4().to_string();

    let ai_server = MockServer::start().await;
    configuration.promptly.base_url = ai_server.uri();
    configuration.promptly.timeout_secs = 5;

    let uploads_dir = tempfile::tempdir().expect("Failed to create uploads dir");
    configuration.uploads.directory = uploads_dir.path().to_string_lossy().into_owned();

    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let db_pool = match configure_database(&configuration.database).await {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("Skipping test: could not reach postgres: {}", err);
            return None;
        }
    };

    let server = kodbank::startup::run(listener, db_pool.clone(), configuration)
        .await
        .expect("Failed to start the application.");
    let _ = tokio::spawn(server);

    Some(TestApp {
        address,
        db_pool,
        ai_server,
        api_client: reqwest::Client::new(),
        _uploads_dir: uploads_dir,
    })
}

pub async fn configure_database(config: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let mut connection = PgConnection::connect(&config.connection_string_without_db()).await?;

    connection
        .execute(format!(r#"CREATE DATABASE "{}""#, config.database_name).as_str())
        .await?;

    let connection_pool = PgPool::connect(&config.connection_string()).await?;

    sqlx::migrate!("./migrations").run(&connection_pool).await?;

    Ok(connection_pool)
}

pub fn sample_user() -> serde_json::Value {
    serde_json::json!({
        "uid": "KB100200",
        "username": "ravi_kumar",
        "email": "ravi@example.com",
        "password": "S3curePass!x",
        "phone": "+919876543210"
    })
}

/// The `kodbank_token=...` pair from a login response, ready to be sent
/// back in a `Cookie` header.
pub fn session_cookie(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("kodbank_token="))
        .and_then(|value| value.split(';').next())
        .map(|value| value.to_string())
}

impl TestApp {
    pub async fn register(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/auth/register", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/auth/login", self.address))
            .json(&serde_json::json!({"email": email, "password": password}))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Registers the sample user, logs in and hands back the session
    /// cookie pair.
    pub async fn authenticated_cookie(&self) -> String {
        let user = sample_user();
        let response = self.register(&user).await;
        assert_eq!(201, response.status().as_u16(), "registration failed");

        let response = self
            .login(
                user["email"].as_str().unwrap(),
                user["password"].as_str().unwrap(),
            )
            .await;
        assert_eq!(200, response.status().as_u16(), "login failed");

        session_cookie(&response).expect("login response sets no session cookie")
    }

    pub async fn get_authed(&self, path: &str, cookie: &str) -> reqwest::Response {
        self.api_client
            .get(format!("{}{}", self.address, path))
            .header(reqwest::header::COOKIE, cookie)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_json_authed(
        &self,
        path: &str,
        cookie: &str,
        body: &serde_json::Value,
    ) -> reqwest::Response {
        self.api_client
            .post(format!("{}{}", self.address, path))
            .header(reqwest::header::COOKIE, cookie)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn put_json_authed(
        &self,
        path: &str,
        cookie: &str,
        body: &serde_json::Value,
    ) -> reqwest::Response {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .header(reqwest::header::COOKIE, cookie)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn delete_authed(&self, path: &str, cookie: &str) -> reqwest::Response {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .header(reqwest::header::COOKIE, cookie)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// One chat turn with just a message body.
    pub async fn chat(&self, cookie: &str, message: &str) -> reqwest::Response {
        let form = reqwest::multipart::Form::new().text("message", message.to_string());
        self.chat_form(cookie, form).await
    }

    pub async fn chat_form(
        &self,
        cookie: &str,
        form: reqwest::multipart::Form,
    ) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/ai/chat", self.address))
            .header(reqwest::header::COOKIE, cookie)
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }
}
