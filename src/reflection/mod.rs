pub mod anthropic;
pub mod keyring;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::task::Task;

pub const FALLBACK_NO_CREDENTIAL: &str =
    "Set an API key to enable the end-of-day reflection.";
pub const FALLBACK_PROVIDER_ERROR: &str =
    "The reflection guide is meditating right now (service error). \
     Take a deep breath and rest a little.";
pub const FALLBACK_EMPTY: &str =
    "No reflection could be written just now, but you did well today.";

/// Failures inside the gateway boundary. Callers of
/// [`ReflectionGateway::generate_reflection`] never see these.
#[derive(Debug, Error)]
pub enum ReflectionError {
    #[error("no API key configured")]
    MissingCredential,
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed provider response: {0}")]
    Malformed(String),
    #[error("provider returned no text")]
    Empty,
}

impl ReflectionError {
    /// The user-facing text shown in place of a reflection.
    pub fn fallback(&self) -> &'static str {
        match self {
            Self::MissingCredential => FALLBACK_NO_CREDENTIAL,
            Self::Empty => FALLBACK_EMPTY,
            Self::Request(_) | Self::Status { .. } | Self::Malformed(_) => FALLBACK_PROVIDER_ERROR,
        }
    }
}

/// Turns a prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, ReflectionError>;
}

/// Produces the end-of-day summary. Always resolves to displayable text.
#[async_trait]
pub trait ReflectionGateway: Send + Sync {
    async fn generate_reflection(&self, tasks: &[Task]) -> String;
}

/// Gateway over a [`TextGenerator`] that folds every failure into a
/// fallback message.
pub struct Reflector<G> {
    generator: G,
    api_key: Option<String>,
}

impl<G: TextGenerator> Reflector<G> {
    pub fn new(generator: G, api_key: Option<String>) -> Self {
        Self {
            generator,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    async fn try_reflect(&self, tasks: &[Task]) -> Result<String, ReflectionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ReflectionError::MissingCredential)?;
        let text = self.generator.generate(api_key, &build_prompt(tasks)).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(ReflectionError::Empty);
        }
        Ok(text.to_string())
    }
}

#[async_trait]
impl<G: TextGenerator> ReflectionGateway for Reflector<G> {
    async fn generate_reflection(&self, tasks: &[Task]) -> String {
        log::info!("Requesting reflection for {} tasks", tasks.len());
        match self.try_reflect(tasks).await {
            Ok(text) => text,
            Err(e) => {
                log::error!("Reflection failed: {}", e);
                e.fallback().to_string()
            }
        }
    }
}

/// Build the summary request: finished and open buckets with memo counts,
/// then every memo with the bucket it was thrown into.
pub fn build_prompt(tasks: &[Task]) -> String {
    let mut prompt = String::from(
        "You are \"Basket\", a minimalist productivity companion. Your goal is to \
         ease the user's anxiety and offer a gentle end-of-day reflection.\n\
         Here is what is in today's baskets (time blocks):\n",
    );

    prompt.push_str("\nCompleted tasks:\n");
    for task in tasks.iter().filter(|t| t.is_completed) {
        prompt.push_str(&format!("- [x] {} ({} memos)\n", task.title, task.memos.len()));
    }

    prompt.push_str("\nOpen tasks (to continue later, no pressure):\n");
    for task in tasks.iter().filter(|t| !t.is_completed) {
        prompt.push_str(&format!("- [ ] {} ({} memos)\n", task.title, task.memos.len()));
    }

    prompt.push_str("\nMemos (stray thoughts thrown into the baskets):\n");
    for task in tasks {
        for memo in &task.memos {
            prompt.push_str(&format!("\"{}\" (in \"{}\")\n", memo.content, task.title));
        }
    }

    prompt.push_str(
        "\nWrite a short, soothing summary that:\n\
         1. Acknowledges the work already done.\n\
         2. Briefly mentions interesting ideas found in the memos.\n\
         3. Tells the user it is fine to leave the rest for tomorrow.\n\
         Keep the tone warm, concise and light. Do not overuse bold markdown.",
    );
    prompt
}

/// The single text block of the reflection popup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReflectionPanel {
    #[default]
    Closed,
    Loading,
    Ready(String),
}

impl ReflectionPanel {
    pub fn begin(&mut self) {
        *self = Self::Loading;
    }

    /// Show `text`. A result arriving after the panel was closed is dropped.
    pub fn finish(&mut self, text: String) {
        if *self == Self::Loading {
            *self = Self::Ready(text);
        }
    }

    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    pub fn is_loading(&self) -> bool {
        *self == Self::Loading
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Ready(text) => Some(text),
            _ => None,
        }
    }

    pub async fn run(&mut self, gateway: &dyn ReflectionGateway, tasks: &[Task]) {
        self.begin();
        let text = gateway.generate_reflection(tasks).await;
        self.finish(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::TaskStore;
    use crate::core::task::NewTask;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    enum Fake {
        Reply(&'static str),
        Fail,
    }

    struct FakeGenerator {
        behavior: Fake,
        seen: Mutex<Vec<(String, String)>>,
    }

    impl FakeGenerator {
        fn new(behavior: Fake) -> Self {
            Self {
                behavior,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, ReflectionError> {
            self.seen
                .lock()
                .unwrap()
                .push((api_key.to_string(), prompt.to_string()));
            match self.behavior {
                Fake::Reply(text) => Ok(text.to_string()),
                Fake::Fail => Err(ReflectionError::Status {
                    status: 500,
                    body: "overloaded".into(),
                }),
            }
        }
    }

    fn sample_day() -> TaskStore {
        let day = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
        let mut store = TaskStore::new();
        let read = store
            .create_task(NewTask::new("Morning reading", day, "07:30").until("08:30"))
            .unwrap();
        store.create_task(NewTask::new("Deep work", day, "09:30").until("11:30")).unwrap();
        store.toggle_complete(read.id).unwrap();
        store.add_memo(read.id, "chapter three was fun").unwrap();
        store
    }

    #[test]
    fn prompt_partitions_tasks() {
        let store = sample_day();
        let prompt = build_prompt(store.list_all());
        let done = prompt.find("- [x] Morning reading (1 memos)").unwrap();
        let open = prompt.find("- [ ] Deep work (0 memos)").unwrap();
        let memo = prompt
            .find("\"chapter three was fun\" (in \"Morning reading\")")
            .unwrap();
        assert!(done < open && open < memo);
        assert!(!prompt.contains("- [ ] Morning reading"));
    }

    #[tokio::test]
    async fn returns_generated_text() {
        let store = sample_day();
        let reflector = Reflector::new(
            FakeGenerator::new(Fake::Reply("  Well done today.  ")),
            Some("key".into()),
        );
        let text = reflector.generate_reflection(store.list_all()).await;
        assert_eq!(text, "Well done today.");
        let seen = reflector.generator.seen.lock().unwrap();
        assert_eq!(seen[0].0, "key");
        assert!(seen[0].1.contains("Deep work"));
    }

    #[tokio::test]
    async fn missing_credential_falls_back() {
        for key in [None, Some("  ".to_string())] {
            let reflector = Reflector::new(FakeGenerator::new(Fake::Reply("unused")), key);
            assert_eq!(reflector.generate_reflection(&[]).await, FALLBACK_NO_CREDENTIAL);
            assert!(reflector.generator.seen.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn provider_error_falls_back() {
        let reflector = Reflector::new(FakeGenerator::new(Fake::Fail), Some("key".into()));
        let text = reflector.generate_reflection(sample_day().list_all()).await;
        assert_eq!(text, FALLBACK_PROVIDER_ERROR);
    }

    #[tokio::test]
    async fn empty_text_falls_back() {
        let reflector = Reflector::new(FakeGenerator::new(Fake::Reply(" \n")), Some("key".into()));
        let text = reflector.generate_reflection(sample_day().list_all()).await;
        assert_eq!(text, FALLBACK_EMPTY);
    }

    #[test]
    fn fallbacks_are_not_empty() {
        for text in [FALLBACK_NO_CREDENTIAL, FALLBACK_PROVIDER_ERROR, FALLBACK_EMPTY] {
            assert!(!text.trim().is_empty());
        }
    }

    #[tokio::test]
    async fn panel_goes_loading_then_ready() {
        let reflector = Reflector::new(FakeGenerator::new(Fake::Fail), None);
        let mut panel = ReflectionPanel::default();
        panel.run(&reflector, &[]).await;
        assert_eq!(panel.text(), Some(FALLBACK_NO_CREDENTIAL));
    }

    #[test]
    fn late_result_after_close_is_dropped() {
        let mut panel = ReflectionPanel::default();
        panel.begin();
        assert!(panel.is_loading());
        panel.close();
        panel.finish("late".into());
        assert_eq!(panel, ReflectionPanel::Closed);
    }
}
