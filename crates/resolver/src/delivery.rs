use gatehouse_models::ConditionalState;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadBuf};

/// Whether the resource has to be sent again.
///
/// Both sides are compared in whole seconds since HTTP dates carry no
/// fractions. An unknown (0) resource timestamp is always modified.
pub fn resource_modified(resource_millis: i64, conditional: ConditionalState) -> bool {
    let resource_secs = resource_millis / 1000;

    match conditional.if_modified_since() {
        None => true,
        Some(since_millis) => resource_secs == 0 || resource_secs > since_millis / 1000,
    }
}

/// Copies `reader` into `writer` in chunks of `chunk_size` bytes and returns
/// the number of bytes copied.
///
/// The reader is owned and dropped on return. The writer is flushed and shut
/// down on success; on error both are released before the error propagates.
pub async fn copy_resource<R, W>(
    mut reader: R,
    writer: &mut W,
    chunk_size: usize,
) -> std::io::Result<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buffer = vec![0u8; chunk_size.max(1)];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = reader.read(&mut buffer).await?;
        if bytes_read == 0 {
            break;
        }
        writer.write_all(&buffer[..bytes_read]).await?;
        total_bytes += bytes_read as u64;
    }

    writer.flush().await?;
    writer.shutdown().await?;

    Ok(total_bytes)
}

/// Reader that counts what passes through it and logs the total at EOF.
/// Used when a body is streamed instead of copied, so the byte count is
/// still reported once the last chunk went out.
pub struct CountingReader<R> {
    inner: R,
    label: String,
    total: u64,
    finished: bool,
}

impl<R> CountingReader<R> {
    pub fn new(inner: R, label: impl Into<String>) -> Self {
        Self {
            inner,
            label: label.into(),
            total: 0,
            finished: false,
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }
}

impl<R: AsyncRead + Unpin> AsyncRead for CountingReader<R> {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let before = buf.filled().len();
        let this = &mut *self;
        let poll = Pin::new(&mut this.inner).poll_read(cx, buf);

        if let Poll::Ready(Ok(())) = &poll {
            let read = buf.filled().len() - before;
            this.total += read as u64;
            if read == 0 && !this.finished {
                this.finished = true;
                tracing::debug!("deliver: {:?} streamed ({} bytes)", this.label, this.total);
            }
        }

        poll
    }
}
