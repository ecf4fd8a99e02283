//! Channel-backed sink feeding a streaming HTTP response body.
//!
//! The dispatcher writes frames into a small bounded channel; the response
//! body drains it. When the transport drops the body (client gone, server
//! shutting down) the receiver is dropped, which the sink reports both as a
//! failed `write` and through `closed`.

use std::convert::Infallible;
use std::pin::Pin;
use std::task::{Context, Poll};

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use tokio::sync::mpsc;

use crate::ports::{FrameSink, SinkError};

/// Create a connected sink/body pair with room for `capacity` unsent frames.
pub fn frame_channel(capacity: usize) -> (ChannelSink, FrameStream) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (ChannelSink { tx }, FrameStream { rx })
}

/// Write half, owned by the dispatcher.
#[derive(Debug)]
pub struct ChannelSink {
    tx: mpsc::Sender<Bytes>,
}

#[async_trait]
impl FrameSink for ChannelSink {
    async fn write(&self, frame: Bytes) -> Result<(), SinkError> {
        self.tx.send(frame).await.map_err(|_| SinkError::Closed)
    }

    async fn closed(&self) {
        self.tx.closed().await
    }
}

/// Read half, used as the response body stream.
#[derive(Debug)]
pub struct FrameStream {
    rx: mpsc::Receiver<Bytes>,
}

impl Stream for FrameStream {
    type Item = Result<Bytes, Infallible>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx).map(|frame| frame.map(Ok))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn written_frames_come_out_of_the_stream() {
        let (sink, mut stream) = frame_channel(4);

        sink.write(Bytes::from_static(b"one")).await.unwrap();
        sink.write(Bytes::from_static(b"two")).await.unwrap();
        drop(sink);

        assert_eq!(stream.next().await.unwrap().unwrap(), Bytes::from_static(b"one"));
        assert_eq!(stream.next().await.unwrap().unwrap(), Bytes::from_static(b"two"));
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn write_fails_once_stream_is_dropped() {
        let (sink, stream) = frame_channel(4);
        drop(stream);

        assert_eq!(
            sink.write(Bytes::from_static(b"frame")).await,
            Err(SinkError::Closed)
        );
    }

    #[tokio::test]
    async fn closed_resolves_when_stream_is_dropped() {
        let (sink, stream) = frame_channel(1);
        let waiter = tokio::spawn(async move { sink.closed().await });

        drop(stream);

        tokio::time::timeout(std::time::Duration::from_secs(1), waiter)
            .await
            .expect("closed() should resolve")
            .unwrap();
    }
}
