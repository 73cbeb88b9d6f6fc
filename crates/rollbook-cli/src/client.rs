//! A line-oriented protocol client.
//!
//! One request is written per line and exactly one response line is read
//! back before the next request is sent.

use anyhow::{Context, anyhow, bail};
use rollbook_core::{RawRequest, Response};
use rollbook_models::{
    AddStudentToClassDto, ClassId, CreateClassDto, CreatePersonDto, CreateSchoolDto, PersonId,
    Request, SchoolId, TeacherRef, WhoAmIDto,
};
use serde::de::DeserializeOwned;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};

pub struct RollbookClient {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl RollbookClient {
    pub async fn connect(addr: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr)
            .await
            .with_context(|| format!("failed to connect to {addr}"))?;
        let (read_half, writer) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(read_half),
            writer,
        })
    }

    pub async fn send(&mut self, request: &Request) -> anyhow::Result<Response> {
        let raw = request.to_raw().context("failed to encode request")?;
        self.send_raw(&raw).await
    }

    /// Sends an envelope as-is, without checking its method or payload.
    pub async fn send_raw(&mut self, raw: &RawRequest) -> anyhow::Result<Response> {
        let frame = raw.to_frame().context("failed to encode request")?;
        self.writer.write_all(&frame).await?;
        self.writer.flush().await?;

        let mut line = Vec::new();
        let read = self.reader.read_until(b'\n', &mut line).await?;
        if read == 0 {
            bail!("server closed the connection");
        }
        Response::parse(&line).context("failed to decode response")
    }

    pub async fn create_school(&mut self, name: &str) -> anyhow::Result<Response> {
        self.send(&Request::CreateSchool(CreateSchoolDto {
            name: name.to_string(),
        }))
        .await
    }

    pub async fn create_person(&mut self, name: &str) -> anyhow::Result<Response> {
        self.send(&Request::CreatePerson(CreatePersonDto {
            name: name.to_string(),
        }))
        .await
    }

    pub async fn create_class(
        &mut self,
        name: &str,
        school_id: SchoolId,
        teacher_id: PersonId,
    ) -> anyhow::Result<Response> {
        self.send(&Request::CreateClass(CreateClassDto {
            name: name.to_string(),
            school_id,
            teacher: TeacherRef { id: teacher_id },
        }))
        .await
    }

    pub async fn add_student(
        &mut self,
        student_id: PersonId,
        class_id: ClassId,
    ) -> anyhow::Result<Response> {
        self.send(&Request::AddStudentToClass(AddStudentToClassDto {
            student_id,
            class_id,
        }))
        .await
    }

    pub async fn who_am_i(&mut self, id: PersonId) -> anyhow::Result<Response> {
        self.send(&Request::WhoAmI(WhoAmIDto { id })).await
    }
}

/// Extracts the `data` of a successful response.
///
/// A failed response becomes an error carrying the server's message.
pub fn expect_data<T>(response: Response) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    if !response.status {
        bail!("server rejected request: {}", response.message);
    }
    let data = response
        .data
        .ok_or_else(|| anyhow!("response to successful request has no data"))?;
    serde_json::from_value(data).context("unexpected response data")
}
