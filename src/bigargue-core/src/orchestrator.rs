//! Argument request orchestration.
//!
//! Turns the current selection into one generation-service request and the
//! service's output into display records, while tracking the
//! idle/in-flight/errored lifecycle of the request.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::{Discipline, Tone};
use crate::config::PromptsConfig;
use crate::error::ArgueError;
use crate::generator::ArgumentGenerator;

/// One expert contribution in the generated debate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentResult {
    /// Expected to equal a discipline label, though nothing enforces it.
    pub speaker: String,
    pub text: String,
}

/// Where the current request stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    InFlight,
    Errored,
}

/// Shared, observable handle on the request lifecycle.
///
/// The orchestrator owns the transitions; everyone else only reads. While
/// the phase is `InFlight` a new request must not start, and `begin`
/// enforces that even without a UI-level disable guard.
#[derive(Debug, Clone)]
pub struct Lifecycle(Arc<AtomicU8>);

const PHASE_IDLE: u8 = 0;
const PHASE_IN_FLIGHT: u8 = 1;
const PHASE_ERRORED: u8 = 2;

impl Lifecycle {
    fn new() -> Self {
        Self(Arc::new(AtomicU8::new(PHASE_IDLE)))
    }

    pub fn phase(&self) -> Phase {
        match self.0.load(Ordering::SeqCst) {
            PHASE_IN_FLIGHT => Phase::InFlight,
            PHASE_ERRORED => Phase::Errored,
            _ => Phase::Idle,
        }
    }

    fn set(&self, phase: Phase) {
        let raw = match phase {
            Phase::Idle => PHASE_IDLE,
            Phase::InFlight => PHASE_IN_FLIGHT,
            Phase::Errored => PHASE_ERRORED,
        };
        self.0.store(raw, Ordering::SeqCst);
    }

    /// Transition into InFlight unless a request is already outstanding.
    /// A prior error does not block a new attempt.
    fn begin(&self) -> bool {
        self.0
            .compare_exchange(PHASE_IDLE, PHASE_IN_FLIGHT, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
            || self
                .0
                .compare_exchange(
                    PHASE_ERRORED,
                    PHASE_IN_FLIGHT,
                    Ordering::SeqCst,
                    Ordering::SeqCst,
                )
                .is_ok()
    }
}

/// Orchestrates one debate request against the generation service.
pub struct ArgueOrchestrator {
    generator: Box<dyn ArgumentGenerator>,
    prompts: PromptsConfig,
    lifecycle: Lifecycle,
    results: Vec<ArgumentResult>,
}

impl ArgueOrchestrator {
    pub fn new(generator: Box<dyn ArgumentGenerator>, prompts: PromptsConfig) -> Self {
        Self {
            generator,
            prompts,
            lifecycle: Lifecycle::new(),
            results: Vec::new(),
        }
    }

    /// A clone of the lifecycle handle, for display code that wants to
    /// observe the in-flight state while `run` is suspended.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.clone()
    }

    /// The result list from the most recent successful request.
    pub fn results(&self) -> &[ArgumentResult] {
        &self.results
    }

    /// Run one debate request.
    ///
    /// `disciplines` must already be resolved to full records in catalog
    /// order. The service is invoked exactly once; on success the previous
    /// result list is replaced wholesale. A malformed response body
    /// degrades to an empty list, but a transport or service failure is
    /// returned to the caller and leaves the phase at `Errored`.
    pub async fn run(
        &mut self,
        topic: &str,
        tones: &[Tone],
        disciplines: &[Discipline],
    ) -> Result<&[ArgumentResult], ArgueError> {
        if !self.lifecycle.begin() {
            return Err(ArgueError::RequestInFlight);
        }
        self.results.clear();

        let labels = disciplines
            .iter()
            .map(|d| d.label.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let tone_names = tones
            .iter()
            .map(Tone::name)
            .collect::<Vec<_>>()
            .join(" and ");
        let prompt = self.prompts.facilitator_prompt(topic, &labels, &tone_names);

        debug!(topic, disciplines = %labels, tones = %tone_names, "requesting debate");

        match self.generator.generate(&prompt, &self.prompts.opener).await {
            Ok(body) => {
                self.results = parse_arguments(&body);
                self.lifecycle.set(Phase::Idle);
                Ok(&self.results)
            }
            Err(e) => {
                self.lifecycle.set(Phase::Errored);
                Err(e)
            }
        }
    }
}

/// Parse the response body as a JSON array of speaker/text records.
///
/// Models behind OpenAI-compatible endpoints routinely wrap the array in
/// markdown fences or a sentence of prose, so a failed direct parse is
/// retried on the outermost bracketed span. Anything still unparseable is
/// swallowed to an empty list; the user just sees no results.
fn parse_arguments(body: &str) -> Vec<ArgumentResult> {
    let trimmed = body.trim();
    if let Ok(results) = serde_json::from_str::<Vec<ArgumentResult>>(trimmed) {
        return results;
    }

    if let (Some(start), Some(end)) = (trimmed.find('['), trimmed.rfind(']')) {
        if start < end {
            if let Ok(results) = serde_json::from_str::<Vec<ArgumentResult>>(&trimmed[start..=end])
            {
                return results;
            }
        }
    }

    warn!(
        body_len = body.len(),
        "failed to parse argument response; dropping output"
    );
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config;
    use std::sync::atomic::AtomicUsize;
    use std::sync::{Mutex, OnceLock};

    const WELL_FORMED: &str =
        r#"[{"speaker":"Science","text":"Evidence first."},{"speaker":"History","text":"Context matters."}]"#;

    /// Scripted generator: returns a fixed body (or a failure), counts
    /// invocations, and records the lifecycle phase observed mid-call.
    struct ScriptedGenerator {
        body: Result<String, String>,
        calls: Arc<AtomicUsize>,
        prompts_seen: Arc<Mutex<Vec<String>>>,
        lifecycle: Arc<OnceLock<Lifecycle>>,
        phase_during_call: Arc<Mutex<Option<Phase>>>,
    }

    impl ScriptedGenerator {
        fn ok(body: &str) -> (Self, Probes) {
            Self::with(Ok(body.to_string()))
        }

        fn failing(message: &str) -> (Self, Probes) {
            Self::with(Err(message.to_string()))
        }

        fn with(body: Result<String, String>) -> (Self, Probes) {
            let probes = Probes {
                calls: Arc::new(AtomicUsize::new(0)),
                prompts_seen: Arc::new(Mutex::new(Vec::new())),
                lifecycle: Arc::new(OnceLock::new()),
                phase_during_call: Arc::new(Mutex::new(None)),
            };
            let generator = Self {
                body,
                calls: probes.calls.clone(),
                prompts_seen: probes.prompts_seen.clone(),
                lifecycle: probes.lifecycle.clone(),
                phase_during_call: probes.phase_during_call.clone(),
            };
            (generator, probes)
        }
    }

    struct Probes {
        calls: Arc<AtomicUsize>,
        prompts_seen: Arc<Mutex<Vec<String>>>,
        lifecycle: Arc<OnceLock<Lifecycle>>,
        phase_during_call: Arc<Mutex<Option<Phase>>>,
    }

    #[async_trait::async_trait]
    impl ArgumentGenerator for ScriptedGenerator {
        async fn generate(&self, system_prompt: &str, _opener: &str) -> Result<String, ArgueError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts_seen
                .lock()
                .unwrap()
                .push(system_prompt.to_string());
            if let Some(lifecycle) = self.lifecycle.get() {
                *self.phase_during_call.lock().unwrap() = Some(lifecycle.phase());
            }
            self.body
                .clone()
                .map_err(ArgueError::GenerationError)
        }
    }

    fn orchestrator_with(generator: ScriptedGenerator) -> ArgueOrchestrator {
        ArgueOrchestrator::new(Box::new(generator), default_config().prompts)
    }

    fn science_and_history() -> Vec<Discipline> {
        let catalog = default_config().catalog();
        catalog.resolve(&["science".to_string(), "history".to_string()])
    }

    #[tokio::test]
    async fn well_formed_response_round_trips_in_order() {
        let (generator, _probes) = ScriptedGenerator::ok(WELL_FORMED);
        let mut orchestrator = orchestrator_with(generator);
        let results = orchestrator
            .run("AI ethics", &[Tone::Curious], &science_and_history())
            .await
            .unwrap();
        assert_eq!(
            results,
            &[
                ArgumentResult {
                    speaker: "Science".to_string(),
                    text: "Evidence first.".to_string(),
                },
                ArgumentResult {
                    speaker: "History".to_string(),
                    text: "Context matters.".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn service_is_invoked_exactly_once_per_trigger() {
        let (generator, probes) = ScriptedGenerator::ok(WELL_FORMED);
        let mut orchestrator = orchestrator_with(generator);
        orchestrator
            .run("AI ethics", &[Tone::Curious], &science_and_history())
            .await
            .unwrap();
        assert_eq!(probes.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn lifecycle_is_in_flight_during_the_call_and_idle_after() {
        let (generator, probes) = ScriptedGenerator::ok(WELL_FORMED);
        let mut orchestrator = orchestrator_with(generator);
        probes.lifecycle.set(orchestrator.lifecycle()).unwrap();

        assert_eq!(orchestrator.lifecycle().phase(), Phase::Idle);
        orchestrator
            .run("AI ethics", &[Tone::Curious], &science_and_history())
            .await
            .unwrap();
        assert_eq!(
            *probes.phase_during_call.lock().unwrap(),
            Some(Phase::InFlight)
        );
        assert_eq!(orchestrator.lifecycle().phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn transport_failure_propagates_and_leaves_phase_errored() {
        let (generator, probes) = ScriptedGenerator::failing("connection refused");
        let mut orchestrator = orchestrator_with(generator);
        let err = orchestrator
            .run("AI ethics", &[Tone::Curious], &science_and_history())
            .await
            .unwrap_err();
        assert!(matches!(err, ArgueError::GenerationError(_)));
        assert_eq!(orchestrator.lifecycle().phase(), Phase::Errored);
        assert_eq!(probes.calls.load(Ordering::SeqCst), 1);
        assert!(orchestrator.results().is_empty());
    }

    #[tokio::test]
    async fn a_failed_request_does_not_block_the_next_one() {
        let (generator, _probes) = ScriptedGenerator::failing("boom");
        let mut orchestrator = orchestrator_with(generator);
        orchestrator
            .run("AI ethics", &[Tone::Curious], &science_and_history())
            .await
            .unwrap_err();
        // Errored is not InFlight; the guard must allow another attempt,
        // which here fails the same way rather than being rejected.
        let err = orchestrator
            .run("AI ethics", &[Tone::Curious], &science_and_history())
            .await
            .unwrap_err();
        assert!(matches!(err, ArgueError::GenerationError(_)));
    }

    #[tokio::test]
    async fn malformed_body_yields_empty_results_not_an_error() {
        let (generator, _probes) = ScriptedGenerator::ok("I refuse to answer in JSON.");
        let mut orchestrator = orchestrator_with(generator);
        let results = orchestrator
            .run("AI ethics", &[Tone::Curious], &science_and_history())
            .await
            .unwrap();
        assert!(results.is_empty());
        assert_eq!(orchestrator.lifecycle().phase(), Phase::Idle);
    }

    /// Generator that plays a fixed script of response bodies, one per call.
    struct SequencedGenerator {
        script: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl ArgumentGenerator for SequencedGenerator {
        async fn generate(&self, _system_prompt: &str, _opener: &str) -> Result<String, ArgueError> {
            Ok(self.script.lock().unwrap().remove(0))
        }
    }

    #[tokio::test]
    async fn results_are_replaced_wholesale_on_each_success() {
        let generator = SequencedGenerator {
            script: Mutex::new(vec![WELL_FORMED.to_string(), "[]".to_string()]),
        };
        let mut orchestrator =
            ArgueOrchestrator::new(Box::new(generator), default_config().prompts);

        orchestrator
            .run("AI ethics", &[Tone::Curious], &science_and_history())
            .await
            .unwrap();
        assert_eq!(orchestrator.results().len(), 2);

        let results = orchestrator
            .run("AI ethics", &[Tone::Curious], &science_and_history())
            .await
            .unwrap();
        // A legitimately empty debate replaces the old list wholesale.
        assert!(results.is_empty());
        assert!(orchestrator.results().is_empty());
    }

    #[tokio::test]
    async fn prompt_carries_topic_labels_and_tones() {
        let (generator, probes) = ScriptedGenerator::ok("[]");
        let mut orchestrator = orchestrator_with(generator);
        orchestrator
            .run("AI ethics", &[Tone::Curious], &science_and_history())
            .await
            .unwrap();
        let prompts = probes.prompts_seen.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        let prompt = &prompts[0];
        assert!(prompt.contains("AI ethics"));
        assert!(prompt.contains("Science"));
        assert!(prompt.contains("History"));
        assert!(prompt.contains("curious"));
    }

    #[tokio::test]
    async fn multiple_tones_are_conjunction_joined() {
        let (generator, probes) = ScriptedGenerator::ok("[]");
        let mut orchestrator = orchestrator_with(generator);
        orchestrator
            .run(
                "AI ethics",
                &[Tone::Skeptical, Tone::Confident],
                &science_and_history(),
            )
            .await
            .unwrap();
        let prompts = probes.prompts_seen.lock().unwrap();
        assert!(prompts[0].contains("skeptical and confident"));
    }

    #[test]
    fn begin_refuses_while_in_flight() {
        let lifecycle = Lifecycle::new();
        assert!(lifecycle.begin());
        assert_eq!(lifecycle.phase(), Phase::InFlight);
        assert!(!lifecycle.begin());
        lifecycle.set(Phase::Idle);
        assert!(lifecycle.begin());
    }

    #[test]
    fn parse_tolerates_markdown_fences() {
        let body = format!("```json\n{}\n```", WELL_FORMED);
        let results = parse_arguments(&body);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].speaker, "Science");
    }

    #[test]
    fn parse_tolerates_surrounding_prose() {
        let body = format!("Here is the debate you asked for: {} Enjoy!", WELL_FORMED);
        let results = parse_arguments(&body);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn parse_rejects_wrong_shapes_to_empty() {
        assert!(parse_arguments("{\"speaker\":\"x\",\"text\":\"y\"}").is_empty());
        assert!(parse_arguments("[1, 2, 3]").is_empty());
        assert!(parse_arguments("").is_empty());
    }
}
