use crate::ai::remote::GENERIC_ERROR_REPLY;
use crate::ai::{KeywordMatcher, Preset, RemoteClient};
use crate::core::message::ChatMessage;
use rand::Rng;
use reqwest::Url;
use std::ops::RangeInclusive;
use std::time::Duration;

pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(30_000);
pub const FALLBACK_DELAY: Duration = Duration::from_millis(1_000);
pub const LOCAL_DELAY_MS: RangeInclusive<u64> = 800..=1_800;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverMode {
    Local,
    Remote { endpoint: Url },
}

/// How replies are produced. Built once at start-up and never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    pub(crate) mode: ResolverMode,
    pub(crate) preset: Preset,
    pub(crate) timeout: Duration,
    pub(crate) local_delay_ms: RangeInclusive<u64>,
    pub(crate) fallback_delay: Duration,
}

impl ResolverConfig {
    pub fn local(preset: Preset) -> Self {
        Self {
            mode: ResolverMode::Local,
            preset,
            timeout: REQUEST_TIMEOUT,
            local_delay_ms: LOCAL_DELAY_MS,
            fallback_delay: FALLBACK_DELAY,
        }
    }

    pub fn remote(endpoint: Url, preset: Preset) -> Self {
        Self {
            mode: ResolverMode::Remote { endpoint },
            ..Self::local(preset)
        }
    }

    pub fn mode(&self) -> &ResolverMode {
        &self.mode
    }

    pub fn preset(&self) -> Preset {
        self.preset
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.mode, ResolverMode::Remote { .. })
    }
}

/// Outcome of one resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Answered(ChatMessage),
    /// The remote call failed: `notice` explains why, `fallback` is the
    /// keyword matcher's answer, delivered after the fallback delay.
    Degraded {
        notice: ChatMessage,
        fallback: ChatMessage,
    },
}

impl Resolution {
    #[cfg(test)]
    pub(crate) fn primary(&self) -> &ChatMessage {
        match self {
            Resolution::Answered(reply) => reply,
            Resolution::Degraded { notice, .. } => notice,
        }
    }
}

/// Turns a user message into bot replies, locally or through the backend.
pub struct Resolver {
    config: ResolverConfig,
    matcher: KeywordMatcher,
    remote: Option<RemoteClient>,
}

impl Resolver {
    pub fn new(config: ResolverConfig) -> Self {
        let remote = match &config.mode {
            ResolverMode::Remote { endpoint } => {
                Some(RemoteClient::new(endpoint.clone(), config.timeout))
            }
            ResolverMode::Local => None,
        };
        log::info!(
            "🔧 Resolver ready: remote={} preset={}",
            remote.is_some(),
            config.preset
        );
        Self {
            matcher: KeywordMatcher::new(config.preset),
            config,
            remote,
        }
    }

    pub fn matcher(&self) -> &KeywordMatcher {
        &self.matcher
    }

    pub fn fallback_delay(&self) -> Duration {
        self.config.fallback_delay
    }

    pub async fn resolve(&self, message: &str) -> Resolution {
        let Some(client) = &self.remote else {
            let delay = self.local_delay();
            log::debug!("💬 Local reply in {:?}", delay);
            tokio::time::sleep(delay).await;
            return Resolution::Answered(self.local_reply(message));
        };

        match client.ask(message).await {
            Ok(text) => Resolution::Answered(ChatMessage::bot_or(&text, GENERIC_ERROR_REPLY)),
            Err(e) => {
                log::error!("Chatbot error: {}", e);
                Resolution::Degraded {
                    notice: ChatMessage::bot_or(e.notice(), GENERIC_ERROR_REPLY),
                    fallback: self.local_reply(message),
                }
            }
        }
    }

    fn local_reply(&self, message: &str) -> ChatMessage {
        ChatMessage::bot_or(&self.matcher.classify(message), self.matcher.default_response())
    }

    fn local_delay(&self) -> Duration {
        let ms = rand::rng().random_range(self.config.local_delay_ms.clone());
        Duration::from_millis(ms)
    }
}
