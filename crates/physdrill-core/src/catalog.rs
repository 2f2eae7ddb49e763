//! Registry of topic generators.

use std::collections::BTreeMap;

use rand::RngCore;

use crate::config::PracticeConfig;
use crate::error::DrillError;
use crate::generators::{
    Algebra, Collision, Compounds, Energy, Forces, LinearMotion, MotionGraphs, Projectile,
};
use crate::model::{Difficulty, Problem, Topic};
use crate::traits::ProblemGenerator;

/// One generator per topic, dispatched by [`Topic`].
pub struct Catalog {
    generators: BTreeMap<Topic, Box<dyn ProblemGenerator>>,
}

impl Catalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self {
            generators: BTreeMap::new(),
        }
    }

    /// Every built-in generator with default options.
    pub fn with_defaults() -> Self {
        Self::with_polyatomic(false)
    }

    /// Every built-in generator, configured from `config`.
    pub fn from_config(config: &PracticeConfig) -> Self {
        Self::with_polyatomic(config.include_polyatomic)
    }

    fn with_polyatomic(include_polyatomic: bool) -> Self {
        let mut catalog = Self::new();
        catalog.register(Box::new(LinearMotion));
        catalog.register(Box::new(Projectile));
        catalog.register(Box::new(Collision));
        catalog.register(Box::new(Energy));
        catalog.register(Box::new(Forces));
        catalog.register(Box::new(Algebra));
        catalog.register(Box::new(Compounds::new(include_polyatomic)));
        catalog.register(Box::new(MotionGraphs));
        catalog
    }

    /// Register a generator under its topic, returning the one it replaces.
    pub fn register(
        &mut self,
        generator: Box<dyn ProblemGenerator>,
    ) -> Option<Box<dyn ProblemGenerator>> {
        self.generators.insert(generator.topic(), generator)
    }

    pub fn get(&self, topic: Topic) -> Result<&dyn ProblemGenerator, DrillError> {
        self.generators
            .get(&topic)
            .map(|g| g.as_ref())
            .ok_or_else(|| DrillError::UnknownTopic(topic.to_string()))
    }

    /// Registered topics in declaration order.
    pub fn topics(&self) -> impl Iterator<Item = Topic> + '_ {
        self.generators.keys().copied()
    }

    /// Generate one problem. `kind` defaults to the topic's first kind.
    pub fn generate(
        &self,
        topic: Topic,
        kind: Option<&str>,
        difficulty: Difficulty,
        rng: &mut dyn RngCore,
    ) -> Result<Problem, DrillError> {
        let generator = self.get(topic)?;
        let kind = kind.unwrap_or_else(|| generator.default_kind());
        tracing::debug!(%topic, kind, %difficulty, "generating problem");
        generator.generate(kind, difficulty, rng)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn defaults_cover_every_topic() {
        let catalog = Catalog::default();
        assert_eq!(catalog.topics().collect::<Vec<_>>(), Topic::ALL.to_vec());
        for topic in Topic::ALL {
            assert_eq!(catalog.get(topic).unwrap().topic(), topic);
        }
    }

    #[test]
    fn every_kind_and_difficulty_generates() {
        let catalog = Catalog::with_defaults();
        let mut rng = StdRng::seed_from_u64(1);
        for topic in catalog.topics() {
            let generator = catalog.get(topic).unwrap();
            for kind in generator.kinds() {
                for difficulty in generator.difficulties() {
                    for _ in 0..20 {
                        let problem = catalog
                            .generate(topic, Some(*kind), *difficulty, &mut rng)
                            .unwrap_or_else(|e| panic!("{topic}/{kind}/{difficulty}: {e}"));
                        assert_eq!(problem.topic, topic);
                        assert!(!problem.question.is_empty());
                        assert!(!problem.answers.is_empty() && problem.answers.len() <= 2);
                        for answer in &problem.answers {
                            if let crate::model::ExpectedAnswer::Numeric { value, .. } = answer {
                                assert!(value.is_finite(), "{topic}/{kind}: {value}");
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let catalog = Catalog::default();
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..5)
                .map(|_| {
                    catalog
                        .generate(Topic::Projectile, Some("cliff"), Difficulty::Hard, &mut rng)
                        .unwrap()
                        .question
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(9), draw(9));
    }

    #[test]
    fn default_kind_is_first() {
        let catalog = Catalog::default();
        let mut rng = StdRng::seed_from_u64(2);
        let problem = catalog
            .generate(Topic::Energy, None, Difficulty::Easy, &mut rng)
            .unwrap();
        assert_eq!(problem.kind, "kinetic");
    }

    #[test]
    fn unknown_selections_are_errors() {
        let mut rng = StdRng::seed_from_u64(3);
        let empty = Catalog::new();
        assert_eq!(
            empty
                .generate(Topic::Forces, None, Difficulty::Easy, &mut rng)
                .unwrap_err(),
            DrillError::UnknownTopic("forces".into())
        );

        let catalog = Catalog::default();
        assert!(matches!(
            catalog.generate(Topic::Collision, None, Difficulty::Hard, &mut rng),
            Err(DrillError::UnsupportedDifficulty { .. })
        ));
        assert!(matches!(
            catalog.generate(Topic::Forces, Some("torque"), Difficulty::Easy, &mut rng),
            Err(DrillError::UnknownKind { .. })
        ));
    }
}
