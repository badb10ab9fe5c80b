//! Retrieval-augmented answering, plain and boosted.
//!
//! [`RetrievalAugmentedModel`] is the unweighted baseline: generate an answer
//! from each of the first `k` retrieved results and majority-vote.
//! [`RagBooster::fit`] evaluates that model's collaborators over a labeled
//! validation set, learns per-domain importance weights, tunes a pruning
//! threshold, and then serves as the boosted model: low-value domains are
//! skipped before the generator is ever invoked.

pub mod error;

pub use error::BoosterError;

use tracing::{info, instrument};

use crate::config::TrainingConfig;
use crate::corpus::{majority_vote, Question, ValidationSample};
use crate::encoding::{encode_groups, encode_retrievals};
use crate::generator::Generator;
use crate::learner::{learn_importance, LearnerOptions};
use crate::retriever::Retriever;
use crate::scoring::{exact_match, AnswerModel};
use crate::tuning::{tune_pruning_threshold, TuningResult};
use crate::weights::{grouped_weights, GroupWeights};

/// Plain top-k retrieval-augmented model.
#[derive(Debug)]
pub struct RetrievalAugmentedModel<R: Retriever, G: Generator> {
    retriever: R,
    generator: G,
    k: usize,
}

impl<R: Retriever, G: Generator> RetrievalAugmentedModel<R, G> {
    pub fn new(retriever: R, generator: G, k: usize) -> Self {
        Self {
            retriever,
            generator,
            k,
        }
    }

    pub fn retriever(&self) -> &R {
        &self.retriever
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Majority vote over answers generated from the first `k` results.
    ///
    /// Zero retrieved results degrade to the empty string.
    pub async fn generate(&self, question: &Question) -> Result<String, BoosterError> {
        let results = self.retriever.retrieve(question.text()).await?;

        let mut predictions = Vec::with_capacity(self.k.min(results.len()));
        for result in results.iter().take(self.k) {
            let answer = self
                .generator
                .generate(question, Some(result.snippet()))
                .await?;
            predictions.push(answer);
        }

        Ok(majority_vote(&predictions).cloned().unwrap_or_default())
    }
}

impl<R: Retriever, G: Generator> AnswerModel for RetrievalAugmentedModel<R, G> {
    type Error = BoosterError;

    async fn generate(&self, question: &Question) -> Result<String, BoosterError> {
        RetrievalAugmentedModel::generate(self, question).await
    }
}

/// A trained booster: the wrapped model plus frozen group weights and the
/// tuned pruning threshold.
///
/// Training happens once in [`RagBooster::fit`]; inference only reads the
/// frozen state.
#[derive(Debug)]
pub struct RagBooster<R: Retriever, G: Generator> {
    model: RetrievalAugmentedModel<R, G>,
    group_weights: GroupWeights,
    tuning_result: TuningResult,
}

impl<R: Retriever, G: Generator> RagBooster<R, G> {
    /// Learns importance weights and a pruning threshold from a labeled
    /// validation set.
    ///
    /// Every validation question is retrieved once and every retrieved result
    /// answered once (collaborator responses are cached by the backends, so
    /// refitting is cheap). Collaborator failures propagate unmodified.
    #[instrument(skip_all, fields(num_questions = validation_questions.len()))]
    pub async fn fit(
        model: RetrievalAugmentedModel<R, G>,
        validation_questions: &[Question],
        config: &TrainingConfig,
    ) -> Result<Self, BoosterError> {
        config.validate()?;

        if validation_questions.is_empty() {
            return Err(BoosterError::EmptyValidationSet);
        }

        info!("computing validation corpus");
        let mut corpus = Vec::with_capacity(validation_questions.len());

        for question in validation_questions {
            let results = model.retriever.retrieve(question.text()).await?;

            let mut retrieved_sources = Vec::with_capacity(results.len());
            let mut generated_answers = Vec::with_capacity(results.len());

            for result in &results {
                retrieved_sources.push(result.source().to_string());
                let answer = model
                    .generator
                    .generate(question, Some(result.snippet()))
                    .await?;
                generated_answers.push(answer);
            }

            corpus.push(ValidationSample::new(
                question.correct_answers().to_vec(),
                retrieved_sources,
                generated_answers,
            )?);
        }

        info!("learning importance weights for data sources");
        let (encoded, mapping) = encode_retrievals(&corpus, exact_match)?;
        let (grouping, group_mapping) =
            encode_groups(&mapping, |source| model.retriever.group(source));

        let corpus_size = mapping.len();
        let opts = LearnerOptions::from(config);

        // The gradient sweep is CPU-bound; keep it off the async executor.
        let weights = {
            let grouping = grouping.clone();
            tokio::task::spawn_blocking(move || {
                learn_importance(&encoded, corpus_size, Some(&grouping), &opts)
            })
            .await?
        };

        let group_weights = grouped_weights(&weights, &grouping, &group_mapping);

        info!("tuning threshold for corpus pruning");
        let tuning_result = tune_pruning_threshold(
            &corpus,
            &group_weights,
            &config.percentile_range(),
            exact_match,
            |source| model.retriever.group(source),
            config.k,
            config.normalize,
        )?;

        info!(
            best_utility = tuning_result.best_utility,
            best_threshold = tuning_result.best_threshold,
            best_percentile = tuning_result.best_percentile,
            "booster fitted on the validation set"
        );

        Ok(Self {
            model,
            group_weights,
            tuning_result,
        })
    }

    /// Answers with the learned gate applied.
    ///
    /// Results are scanned in retrieval order. While fewer than `k`
    /// predictions are accepted, a result whose domain group is unseen or
    /// weighted at or above the tuned threshold is forwarded to the
    /// generator. Later results are still scanned but never invoke the
    /// generator, so a pruned prefix does not starve the vote. Zero accepted
    /// predictions degrade to the empty string.
    pub async fn generate(&self, question: &Question) -> Result<String, BoosterError> {
        let results = self.model.retriever.retrieve(question.text()).await?;

        let mut predictions = Vec::with_capacity(self.model.k.min(results.len()));

        for result in &results {
            if predictions.len() < self.model.k {
                let group = self.model.retriever.group(result.source());

                let keep = match self.group_weights.get(&group) {
                    // Unseen at training time: never pruned.
                    None => true,
                    Some(&weight) => weight >= self.tuning_result.best_threshold,
                };

                if keep {
                    let answer = self
                        .model
                        .generator
                        .generate(question, Some(result.snippet()))
                        .await?;
                    predictions.push(answer);
                }
            }
        }

        Ok(majority_vote(&predictions).cloned().unwrap_or_default())
    }

    /// Learned weight of the source's group; `None` for groups unseen at
    /// training time (never `0.0`, which would mean "learned as worthless").
    pub fn importance(&self, source: &str) -> Option<f64> {
        self.group_weights
            .get(&self.model.retriever.group(source))
            .copied()
    }

    pub fn best_threshold(&self) -> f64 {
        self.tuning_result.best_threshold
    }

    pub fn best_utility(&self) -> f64 {
        self.tuning_result.best_utility
    }

    pub fn tuning_result(&self) -> &TuningResult {
        &self.tuning_result
    }

    pub fn group_weights(&self) -> &GroupWeights {
        &self.group_weights
    }

    pub fn model(&self) -> &RetrievalAugmentedModel<R, G> {
        &self.model
    }
}

impl<R: Retriever, G: Generator> AnswerModel for RagBooster<R, G> {
    type Error = BoosterError;

    async fn generate(&self, question: &Question) -> Result<String, BoosterError> {
        RagBooster::generate(self, question).await
    }
}
