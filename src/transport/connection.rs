use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};
use tracing::debug;

use super::errors::ConnectionError;
use super::shutdown::Shutdown;
use crate::router::Router;

/// Largest accepted request line, newline excluded.
pub const MAX_FRAME_BYTES: usize = 64 * 1024;

#[derive(Debug, PartialEq, Eq)]
enum Frame {
    Line,
    Eof,
    /// The peer closed the stream in the middle of a line.
    Truncated,
}

/// Serves one connection until the peer disconnects, a framing error
/// occurs, or shutdown is requested.
///
/// Requests are handled strictly in order: each response is written and
/// flushed before the next line is read. Shutdown is only observed while
/// waiting for a line, so a request being dispatched still gets its
/// response.
pub async fn serve_connection<S>(
    stream: S,
    router: Router,
    mut shutdown: Shutdown,
) -> Result<(), ConnectionError>
where
    S: AsyncRead + AsyncWrite,
{
    let (read_half, mut write_half) = tokio::io::split(stream);
    let mut reader = BufReader::new(read_half);
    let mut frame = Vec::with_capacity(1024);
    let mut handled: u64 = 0;

    loop {
        frame.clear();

        let read = tokio::select! {
            biased;
            () = shutdown.requested() => {
                debug!(handled, "Closing connection for shutdown");
                return Ok(());
            }
            read = read_frame(&mut reader, &mut frame) => read?,
        };

        match read {
            Frame::Line => {}
            Frame::Eof => {
                debug!(handled, "Client disconnected");
                return Ok(());
            }
            Frame::Truncated => {
                debug!(handled, partial_bytes = frame.len(), "Client disconnected mid-frame");
                return Ok(());
            }
        }

        let response = router.handle_frame(&frame).await;
        write_half.write_all(&response.to_frame()?).await?;
        write_half.flush().await?;
        handled += 1;
    }
}

async fn read_frame<R>(reader: &mut R, buf: &mut Vec<u8>) -> Result<Frame, ConnectionError>
where
    R: AsyncBufRead + Unpin,
{
    let mut limited = (&mut *reader).take(MAX_FRAME_BYTES as u64 + 1);
    let read = limited.read_until(b'\n', buf).await?;

    if read == 0 {
        return Ok(Frame::Eof);
    }
    if buf.last() == Some(&b'\n') {
        return Ok(Frame::Line);
    }
    if buf.len() > MAX_FRAME_BYTES {
        return Err(ConnectionError::FrameTooLarge {
            limit: MAX_FRAME_BYTES,
        });
    }
    Ok(Frame::Truncated)
}
