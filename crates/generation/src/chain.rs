//! Ordered chain of generation backends with a static fallback.

use liftcoach_domain::{GenerateError, GeneratedPlan, Generator, PlanProvider, PlanSource};
use log::{info, warn};

use crate::HttpGenerator;

/// Model identifiers tried in order until one answers.
pub const MODELS: [&str; 3] = ["gemini-1.5-flash", "gemini-1.5-pro", "gemini-pro"];

/// Tries each backend once, in order. When every attempt fails the
/// caller-supplied fallback plan is returned, so providing a plan text
/// is total.
pub struct GeneratorChain {
    generators: Vec<Box<dyn Generator>>,
}

impl GeneratorChain {
    #[must_use]
    pub fn new(generators: Vec<Box<dyn Generator>>) -> Self {
        Self { generators }
    }

    /// Chain without backends; every plan comes from the fallback.
    #[must_use]
    pub fn offline() -> Self {
        Self::new(Vec::new())
    }

    /// The standard chain over [`MODELS`] against the hosted endpoint.
    pub fn gemini(api_key: &str) -> Result<Self, GenerateError> {
        let generators = MODELS
            .iter()
            .map(|model| {
                HttpGenerator::new(*model, api_key).map(|g| Box::new(g) as Box<dyn Generator>)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(generators))
    }
}

impl PlanProvider for GeneratorChain {
    async fn provide(&self, prompt: &str, fallback: String) -> GeneratedPlan {
        for generator in &self.generators {
            match generator.generate(prompt).await {
                Ok(text) => {
                    return GeneratedPlan {
                        text,
                        source: PlanSource::Generated {
                            model: generator.model().to_string(),
                        },
                    };
                }
                Err(err) => {
                    warn!("generator {} failed: {err}", generator.model());
                }
            }
        }
        info!("no generator produced a plan, falling back to the default line");
        GeneratedPlan {
            text: fallback,
            source: PlanSource::Fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;

    struct StubGenerator {
        model: &'static str,
        response: Result<&'static str, GenerateError>,
    }

    #[async_trait]
    impl Generator for StubGenerator {
        fn model(&self) -> &str {
            self.model
        }

        async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
            match &self.response {
                Ok(text) => Ok((*text).to_string()),
                Err(GenerateError::Timeout) => Err(GenerateError::Timeout),
                Err(GenerateError::EmptyResponse) => Err(GenerateError::EmptyResponse),
                Err(GenerateError::Status(status)) => Err(GenerateError::Status(*status)),
                Err(GenerateError::Transport(message)) => {
                    Err(GenerateError::Transport(message.clone()))
                }
            }
        }
    }

    fn ok(model: &'static str, text: &'static str) -> Box<dyn Generator> {
        Box::new(StubGenerator {
            model,
            response: Ok(text),
        })
    }

    fn failing(model: &'static str, error: GenerateError) -> Box<dyn Generator> {
        Box::new(StubGenerator {
            model,
            response: Err(error),
        })
    }

    #[tokio::test]
    async fn test_first_successful_generator_wins() {
        let chain = GeneratorChain::new(vec![ok("a", "plan a"), ok("b", "plan b")]);
        let plan = chain.provide("prompt", "fallback".to_string()).await;
        assert_eq!(
            plan,
            GeneratedPlan {
                text: "plan a".to_string(),
                source: PlanSource::Generated {
                    model: "a".to_string()
                },
            }
        );
    }

    #[tokio::test]
    async fn test_failures_fall_through_to_next_generator() {
        let chain = GeneratorChain::new(vec![
            failing("a", GenerateError::Status(404)),
            failing("b", GenerateError::Timeout),
            ok("c", "plan c"),
        ]);
        let plan = chain.provide("prompt", "fallback".to_string()).await;
        assert_eq!(
            plan,
            GeneratedPlan {
                text: "plan c".to_string(),
                source: PlanSource::Generated {
                    model: "c".to_string()
                },
            }
        );
    }

    #[tokio::test]
    async fn test_exhausted_chain_returns_fallback() {
        let chain = GeneratorChain::new(vec![
            failing("a", GenerateError::Status(429)),
            failing("b", GenerateError::EmptyResponse),
        ]);
        let plan = chain
            .provide("prompt", "『Squat』 【100kg】 (4 sets) 8 reps".to_string())
            .await;
        assert_eq!(
            plan,
            GeneratedPlan {
                text: "『Squat』 【100kg】 (4 sets) 8 reps".to_string(),
                source: PlanSource::Fallback,
            }
        );
    }

    #[tokio::test]
    async fn test_offline_chain_always_falls_back() {
        let plan = GeneratorChain::offline()
            .provide("prompt", "fallback".to_string())
            .await;
        assert_eq!(plan.source, PlanSource::Fallback);
        assert_eq!(plan.text, "fallback");
    }

    #[test]
    fn test_standard_chain_covers_all_models() {
        let chain = GeneratorChain::gemini("key").unwrap();
        assert_eq!(
            chain
                .generators
                .iter()
                .map(|g| g.model().to_string())
                .collect::<Vec<_>>(),
            MODELS.iter().map(ToString::to_string).collect::<Vec<_>>()
        );
    }
}
