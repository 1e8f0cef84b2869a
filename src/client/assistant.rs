//! Chat widget: remote assistant first, local keyword matcher when that fails.

use super::store::{CHAT_HISTORY_KEY, KeyValueBackend, LocalStore};
use crate::config::{ClientConfig, ReplyDelay};
use crate::errors::RemoteError;
use crate::intent::{self, Context};
use crate::models::{AssistantReply, AssistantRequest, ChatMessage, Speaker};
use chrono::Utc;
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Transport to a remote `/assistant` endpoint.
pub trait AssistantTransport {
    fn ask(
        &self,
        request: &AssistantRequest,
    ) -> impl Future<Output = Result<AssistantReply, RemoteError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpAssistant {
    client: reqwest::Client,
    url: String,
}

impl HttpAssistant {
    pub fn new(api_base: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: format!("{}/assistant", api_base.trim_end_matches('/')),
        }
    }
}

impl AssistantTransport for HttpAssistant {
    async fn ask(&self, request: &AssistantRequest) -> Result<AssistantReply, RemoteError> {
        let response = self.client.post(&self.url).json(request).send().await?;
        if !response.status().is_success() {
            return Err(RemoteError::Status(response.status().as_u16()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|err| RemoteError::Malformed(err.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Remote,
    Local,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub reply: AssistantReply,
    pub source: ReplySource,
}

pub struct AssistantWidget<T, B> {
    transport: T,
    store: LocalStore<B>,
    remote_delay: ReplyDelay,
    local_delay: ReplyDelay,
    name: Option<String>,
}

impl<B: KeyValueBackend> AssistantWidget<HttpAssistant, B> {
    pub fn from_config(config: &ClientConfig, store: LocalStore<B>) -> Self {
        Self::new(HttpAssistant::new(&config.api_base), store)
            .with_delays(config.remote_delay, config.local_delay)
    }
}

impl<T: AssistantTransport, B: KeyValueBackend> AssistantWidget<T, B> {
    pub fn new(transport: T, store: LocalStore<B>) -> Self {
        Self {
            transport,
            store,
            remote_delay: ReplyDelay::millis(600, 800),
            local_delay: ReplyDelay::millis(800, 900),
            name: None,
        }
    }

    pub fn with_delays(mut self, remote: ReplyDelay, local: ReplyDelay) -> Self {
        self.remote_delay = remote;
        self.local_delay = local;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn history(&self) -> Vec<ChatMessage> {
        self.store.get(CHAT_HISTORY_KEY, Vec::new())
    }

    /// Sends one message. Blank input is ignored and yields `None`.
    pub async fn send(&self, text: &str) -> Option<ChatTurn> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.record(Speaker::User, text);

        let request = AssistantRequest {
            message: text.to_string(),
            name: self.name.clone(),
            mood: None,
        };

        let turn = match self.transport.ask(&request).await {
            Ok(reply) => {
                debug!("assistant answered remotely");
                pause(self.remote_delay).await;
                ChatTurn {
                    reply,
                    source: ReplySource::Remote,
                }
            }
            Err(err) => {
                warn!("assistant unreachable, answering locally: {err}");
                let context = Context {
                    name: self.name.as_deref(),
                    mood: None,
                };
                let reply = intent::respond(text, &context, &mut rand::thread_rng());
                pause(self.local_delay).await;
                ChatTurn {
                    reply,
                    source: ReplySource::Local,
                }
            }
        };

        self.record(Speaker::Bot, &turn.reply.reply);
        Some(turn)
    }

    fn record(&self, who: Speaker, text: &str) {
        let mut history = self.history();
        history.push(ChatMessage {
            who,
            text: text.to_string(),
            at: Utc::now(),
        });
        self.store.set(CHAT_HISTORY_KEY, &history);
    }
}

async fn pause(delay: ReplyDelay) {
    let jitter = if delay.jitter.is_zero() {
        Duration::ZERO
    } else {
        rand::thread_rng().gen_range(Duration::ZERO..=delay.jitter)
    };
    let total = delay.base + jitter;
    if !total.is_zero() {
        tokio::time::sleep(total).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::store::MemoryBackend;
    use crate::models::Suggestion;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Down;

    impl AssistantTransport for Down {
        async fn ask(&self, _: &AssistantRequest) -> Result<AssistantReply, RemoteError> {
            Err(RemoteError::Status(503))
        }
    }

    #[derive(Default)]
    struct Canned {
        calls: AtomicUsize,
    }

    impl AssistantTransport for Canned {
        async fn ask(&self, request: &AssistantRequest) -> Result<AssistantReply, RemoteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(AssistantReply {
                reply: format!("remote: {}", request.message),
                suggestions: vec![Suggestion::Tip],
                resources: None,
            })
        }
    }

    fn quiet<T: AssistantTransport>(transport: T) -> AssistantWidget<T, MemoryBackend> {
        AssistantWidget::new(transport, LocalStore::in_memory())
            .with_delays(ReplyDelay::none(), ReplyDelay::none())
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let widget = quiet(Canned::default());
        assert!(widget.send("   ").await.is_none());
        assert_eq!(widget.transport.calls.load(Ordering::SeqCst), 0);
        assert!(widget.history().is_empty());
    }

    #[tokio::test]
    async fn remote_reply_is_used_when_available() {
        let widget = quiet(Canned::default());
        let turn = widget.send("hello").await.unwrap();
        assert_eq!(turn.source, ReplySource::Remote);
        assert_eq!(turn.reply.reply, "remote: hello");
    }

    #[tokio::test]
    async fn failure_falls_back_to_local_matcher() {
        let widget = quiet(Down);
        let turn = widget.send("I can't sleep and need to track my mood").await.unwrap();
        assert_eq!(turn.source, ReplySource::Local);
        assert_eq!(turn.reply.suggestions, vec![Suggestion::Track]);
    }

    #[tokio::test]
    async fn history_records_both_sides() {
        let widget = quiet(Down);
        widget.send("sleep").await.unwrap();

        let history = widget.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].who, Speaker::User);
        assert_eq!(history[0].text, "sleep");
        assert_eq!(history[1].who, Speaker::Bot);
        assert!(history[1].text.starts_with("Sleep is so important"));
    }
}
