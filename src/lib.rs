//! ragboost: learned source-importance weighting and corpus pruning for
//! retrieval-augmented generation.
//!
//! A retrieval-augmented model answers a question by generating an answer
//! from each retrieved context and majority-voting. This crate learns, from a
//! labeled validation set, how much each data source (grouped by registrable
//! domain) actually contributes to correct answers, then prunes low-value
//! sources at inference time:
//!
//! 1. Evaluate the retriever and generator over the validation questions
//!    ([`RagBooster::fit`]), building one [`ValidationSample`] per question.
//! 2. Encode sources into a dense index space ([`encode_retrievals`],
//!    [`encode_groups`]).
//! 3. Learn a keep-probability per domain group by gradient ascent on the
//!    expected top-k vote utility ([`learn_importance`]).
//! 4. Grid-search a pruning threshold over the group-weight percentiles
//!    ([`tune_pruning_threshold`]).
//! 5. Serve: results from groups weighted below the threshold are skipped
//!    before the generator is invoked ([`RagBooster::generate`]).
//!
//! External collaborators (the generator, the retriever, and their response
//! caches) are capability traits; production backends and
//! `#[cfg(any(test, feature = "mock"))]` mocks are provided.

pub mod booster;
pub mod cache;
pub mod config;
pub mod constants;
pub mod corpus;
pub mod datasets;
pub mod encoding;
pub mod generator;
pub mod hashing;
pub mod learner;
pub mod retriever;
pub mod scoring;
pub mod tuning;
pub mod weights;

pub use booster::{BoosterError, RagBooster, RetrievalAugmentedModel};
#[cfg(any(test, feature = "mock"))]
pub use cache::MemoryCache;
pub use cache::{CacheError, FileCache, NullCache, ResponseCache};
pub use config::{ConfigError, TrainingConfig};
pub use corpus::{majority_vote, CorpusError, Question, ValidationSample};
pub use datasets::{load_wikifact_questions, DatasetError};
pub use encoding::{
    encode_groups, encode_retrievals, EncodedRetrieval, GroupMapping, Grouping, SourceIndexMapping,
};
#[cfg(any(test, feature = "mock"))]
pub use generator::MockGenerator;
pub use generator::{
    Generator, GeneratorError, LlmGenerator, LlmGeneratorConfig, Prompting, QaPrompt,
};
pub use learner::{learn_importance, GradientScratch, LearnerOptions};
#[cfg(any(test, feature = "mock"))]
pub use retriever::MockRetriever;
pub use retriever::{
    registrable_domain, RetrievedResult, Retriever, RetrieverError, WebSearchConfig,
    WebSearchRetriever,
};
pub use scoring::{exact_match, score, AnswerModel, ScoringError};
pub use tuning::{tune_pruning_threshold, TuningError, TuningResult};
pub use weights::{grouped_weights, GroupWeights};
