use crate::core::message::{ChatMessage, Transcript};
use crate::core::resolver::{Resolution, Resolver};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Signals for whatever draws the chat.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    TypingStarted,
    TypingFinished,
    MessageAppended(ChatMessage),
    SendEnabled(bool),
}

/// Rendering boundary. Called from resolution tasks, so it must be thread-safe.
pub trait ChatView: Send + Sync + 'static {
    fn notify(&self, event: ViewEvent);
}

#[derive(Debug)]
pub enum Submission {
    /// Accepted; the handle completes once every reply (fallback included) is in.
    Accepted(JoinHandle<()>),
    Empty,
    Busy,
}

/// Turns input into chat submissions, one resolution at a time.
#[derive(Clone)]
pub struct InputRouter {
    resolver: Arc<Resolver>,
    transcript: Transcript,
    view: Arc<dyn ChatView>,
    in_flight: Arc<AtomicBool>,
}

impl InputRouter {
    pub fn new(resolver: Arc<Resolver>, transcript: Transcript, view: Arc<dyn ChatView>) -> Self {
        Self {
            resolver,
            transcript,
            view,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Submits the contents of `input`.
    ///
    /// Blank input and submits during an in-flight resolution leave `input`
    /// untouched and start nothing. Must be called inside a tokio runtime.
    pub fn submit(&self, input: &mut String) -> Submission {
        let Some(message) = ChatMessage::user(input) else {
            return Submission::Empty;
        };
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::debug!("⏳ Submit ignored, reply still pending");
            return Submission::Busy;
        }

        input.clear();
        log::info!("💬 Sending message: {}", message.text());
        let text = message.text().to_string();
        self.append(message);
        self.view.notify(ViewEvent::SendEnabled(false));

        let guard = InFlight {
            flag: Arc::clone(&self.in_flight),
            view: Arc::clone(&self.view),
        };
        let router = self.clone();
        Submission::Accepted(tokio::spawn(async move {
            router.dispatch(text, guard).await;
        }))
    }

    async fn dispatch(&self, text: String, guard: InFlight) {
        self.view.notify(ViewEvent::TypingStarted);
        let resolution = self.resolver.resolve(&text).await;
        self.view.notify(ViewEvent::TypingFinished);

        match resolution {
            Resolution::Answered(reply) => {
                self.append(reply);
                drop(guard);
            }
            Resolution::Degraded { notice, fallback } => {
                self.append(notice);
                drop(guard);
                tokio::time::sleep(self.resolver.fallback_delay()).await;
                self.append(fallback);
            }
        }
    }

    fn append(&self, message: ChatMessage) {
        self.transcript.push(message.clone());
        self.view.notify(ViewEvent::MessageAppended(message));
    }
}

/// Clears the in-flight flag and re-enables send when dropped, on every path.
struct InFlight {
    flag: Arc<AtomicBool>,
    view: Arc<dyn ChatView>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
        self.view.notify(ViewEvent::SendEnabled(true));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::remote::tests::dead_endpoint;
    use crate::ai::remote::NETWORK_NOTICE;
    use crate::ai::{KeywordMatcher, Preset};
    use crate::core::message::Sender;
    use crate::core::resolver::{ResolverConfig, FALLBACK_DELAY};
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<(Instant, ViewEvent)>>,
    }

    impl Recorder {
        fn events(&self) -> Vec<ViewEvent> {
            self.timed().into_iter().map(|(_, event)| event).collect()
        }

        fn timed(&self) -> Vec<(Instant, ViewEvent)> {
            self.events.lock().unwrap().clone()
        }
    }

    impl ChatView for Recorder {
        fn notify(&self, event: ViewEvent) {
            self.events.lock().unwrap().push((Instant::now(), event));
        }
    }

    fn router(config: ResolverConfig) -> (InputRouter, Arc<Recorder>) {
        let view = Arc::new(Recorder::default());
        let router = InputRouter::new(
            Arc::new(Resolver::new(config)),
            Transcript::new(),
            view.clone(),
        );
        (router, view)
    }

    fn local(delay_ms: u64) -> ResolverConfig {
        ResolverConfig {
            local_delay_ms: delay_ms..=delay_ms,
            ..ResolverConfig::local(Preset::Hosted)
        }
    }

    async fn finish(submission: Submission) {
        match submission {
            Submission::Accepted(handle) => handle.await.unwrap(),
            other => panic!("expected acceptance, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let (router, view) = router(local(0));
        for raw in ["", "   ", "\n\t "] {
            let mut input = raw.to_string();
            assert!(matches!(router.submit(&mut input), Submission::Empty));
            assert_eq!(input, raw);
        }
        assert!(router.transcript().is_empty());
        assert!(view.events().is_empty());
        assert!(!router.is_busy());
    }

    #[tokio::test]
    async fn accepted_input_appends_user_then_bot() {
        let (router, view) = router(local(0));
        let mut input = "  tell me about skills ".to_string();

        let submission = router.submit(&mut input);
        assert!(input.is_empty());
        let first = router.transcript().snapshot();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].sender(), Sender::User);
        assert_eq!(first[0].text(), "tell me about skills");

        finish(submission).await;
        let all = router.transcript().snapshot();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].sender(), Sender::Bot);

        let events = view.events();
        assert_eq!(events[0], ViewEvent::MessageAppended(all[0].clone()));
        assert_eq!(events[1], ViewEvent::SendEnabled(false));
        assert_eq!(events[2], ViewEvent::TypingStarted);
        assert_eq!(events[3], ViewEvent::TypingFinished);
        assert_eq!(events[4], ViewEvent::MessageAppended(all[1].clone()));
        assert_eq!(events[5], ViewEvent::SendEnabled(true));
        assert_eq!(events.len(), 6);
    }

    #[tokio::test]
    async fn submit_while_pending_is_rejected() {
        let (router, _view) = router(local(100));
        let mut input = "hello".to_string();
        let first = router.submit(&mut input);
        assert!(router.is_busy());

        let mut second = "and another".to_string();
        assert!(matches!(router.submit(&mut second), Submission::Busy));
        assert_eq!(second, "and another");

        finish(first).await;
        assert!(!router.is_busy());
        assert_eq!(router.transcript().len(), 2);

        let mut third = "again".to_string();
        finish(router.submit(&mut third)).await;
        assert_eq!(router.transcript().len(), 4);
    }

    #[tokio::test]
    async fn failed_remote_call_adds_notice_then_fallback() {
        let config = ResolverConfig {
            fallback_delay: Duration::from_millis(50),
            ..ResolverConfig::remote(dead_endpoint().await, Preset::Hosted)
        };
        let (router, view) = router(config);
        let mut input = "contact".to_string();
        finish(router.submit(&mut input)).await;

        let texts: Vec<(Sender, String)> = router
            .transcript()
            .snapshot()
            .iter()
            .map(|m| (m.sender(), m.text().to_string()))
            .collect();
        let expected_fallback = KeywordMatcher::new(Preset::Hosted).classify("contact");
        assert_eq!(
            texts,
            vec![
                (Sender::User, "contact".to_string()),
                (Sender::Bot, NETWORK_NOTICE.to_string()),
                (Sender::Bot, expected_fallback),
            ]
        );

        // Send comes back before the delayed fallback lands.
        let events = view.events();
        let enabled = events
            .iter()
            .position(|e| *e == ViewEvent::SendEnabled(true))
            .unwrap();
        let last_append = events
            .iter()
            .rposition(|e| matches!(e, ViewEvent::MessageAppended(_)))
            .unwrap();
        assert!(enabled < last_append);
        assert!(events.contains(&ViewEvent::TypingFinished));
    }

    #[tokio::test]
    async fn fallback_waits_a_second_after_the_notice() {
        let config = ResolverConfig::remote(dead_endpoint().await, Preset::Hosted);
        let (router, view) = router(config);
        let mut input = "skills".to_string();
        let Submission::Accepted(handle) = router.submit(&mut input) else {
            panic!("expected acceptance");
        };

        // Wait for the notice, then check the fallback is still held back.
        let deadline = Instant::now() + Duration::from_secs(5);
        while router.transcript().len() < 2 {
            assert!(Instant::now() < deadline, "notice never arrived");
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        let early = router.transcript().snapshot();
        assert_eq!(early.len(), 2);
        assert_eq!(early[1].text(), NETWORK_NOTICE);
        assert!(!router.is_busy());

        handle.await.unwrap();
        assert_eq!(router.transcript().len(), 3);

        let appended: Vec<Instant> = view
            .timed()
            .into_iter()
            .filter(|(_, e)| matches!(e, ViewEvent::MessageAppended(_)))
            .map(|(at, _)| at)
            .collect();
        assert_eq!(appended.len(), 3);
        let gap = appended[2] - appended[1];
        assert!(gap >= FALLBACK_DELAY, "fallback came {gap:?} after the notice");
        assert!(gap < FALLBACK_DELAY + Duration::from_secs(1), "gap {gap:?}");
    }
}
