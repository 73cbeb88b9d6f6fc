use fake::Fake;
use fake::faker::name::en::Name;
use rollbook::engine::EnrollmentEngine;
use rollbook::router::Router;
use rollbook::store::Store;
use rollbook::transport::Server;
use rollbook_core::Response;
use serde_json::{Value, json};
use std::net::SocketAddr;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A server on an ephemeral port backed by a fresh in-memory database.
#[allow(dead_code)]
pub struct TestServer {
    pub addr: SocketAddr,
    pub store: Store,
    stop: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let pool = rollbook_db::init_in_memory().await.unwrap();
        let store = Store::new(pool);
        let router = Router::new(EnrollmentEngine::new(store.clone()));

        let server = Server::bind("127.0.0.1:0", router).await.unwrap();
        let addr = server.local_addr().unwrap();
        let (stop, stopped) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            server
                .run_until(async {
                    stopped.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            store,
            stop: Some(stop),
            handle,
        }
    }

    pub async fn client(&self) -> TestClient {
        TestClient::connect(self.addr).await
    }

    /// Requests shutdown and waits for the listener to drain.
    #[allow(dead_code)]
    pub async fn shutdown(mut self) {
        if let Some(stop) = self.stop.take() {
            stop.send(()).ok();
        }
        (&mut self.handle).await.unwrap();
    }
}

/// Speaks raw protocol lines to a [`TestServer`].
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

#[allow(dead_code)]
impl TestClient {
    pub async fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).await.unwrap();
        let (read_half, writer) = stream.into_split();
        Self {
            reader: BufReader::new(read_half),
            writer,
        }
    }

    pub async fn send_line(&mut self, line: &[u8]) {
        self.writer.write_all(line).await.unwrap();
        self.writer.flush().await.unwrap();
    }

    /// Reads one response line; `None` once the server closed the connection.
    pub async fn read_response(&mut self) -> Option<Response> {
        let mut line = Vec::new();
        let read = self.reader.read_until(b'\n', &mut line).await.unwrap_or(0);
        if read == 0 {
            return None;
        }
        Some(Response::parse(&line).unwrap())
    }

    pub async fn call(&mut self, method: &str, data: Value) -> Response {
        let mut frame = json!({"method": method, "data": data}).to_string().into_bytes();
        frame.push(b'\n');
        self.send_line(&frame).await;
        self.read_response().await.unwrap()
    }

    pub async fn create_school(&mut self, name: &str) -> i64 {
        let response = self.call("/school/create", json!({"name": name})).await;
        assert!(response.status, "{}", response.message);
        data_id(&response)
    }

    pub async fn create_person(&mut self, name: &str) -> i64 {
        let response = self.call("/person/create", json!({"name": name})).await;
        assert!(response.status, "{}", response.message);
        data_id(&response)
    }

    pub async fn create_class(&mut self, name: &str, school_id: i64, teacher_id: i64) -> Response {
        self.call(
            "/class/create",
            json!({"name": name, "school_id": school_id, "teacher": {"id": teacher_id}}),
        )
        .await
    }

    pub async fn add_student(&mut self, student_id: i64, class_id: i64) -> Response {
        self.call(
            "/class/add/student",
            json!({"student_id": student_id, "class_id": class_id}),
        )
        .await
    }

    pub async fn who_am_i(&mut self, id: i64) -> Response {
        self.call("/who/am/i", json!({"id": id})).await
    }
}

pub fn data_id(response: &Response) -> i64 {
    response.data.as_ref().unwrap()["id"].as_i64().unwrap()
}

#[allow(dead_code)]
pub fn class_ids(response: &Response) -> Vec<i64> {
    response.data.as_ref().unwrap()["classes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|id| id.as_i64().unwrap())
        .collect()
}

#[allow(dead_code)]
pub fn fake_name() -> String {
    Name().fake()
}
