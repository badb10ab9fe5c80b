//! Validation-dataset loaders.

pub mod error;

pub use error::DatasetError;

use std::path::Path;

use serde::Deserialize;

use crate::corpus::Question;

#[derive(Deserialize)]
struct HelmScenario {
    request_states: Vec<HelmRequestState>,
}

#[derive(Deserialize)]
struct HelmRequestState {
    instance: HelmInstance,
}

#[derive(Deserialize)]
struct HelmInstance {
    input: String,
    #[serde(default)]
    references: Vec<HelmReference>,
}

#[derive(Deserialize)]
struct HelmReference {
    output: String,
}

/// Loads wikifact questions from a HELM scenario-state JSON file.
///
/// Each request state becomes one [`Question`]: the instance input is the
/// question text and every reference output an acceptable answer.
pub fn load_wikifact_questions(path: impl AsRef<Path>) -> Result<Vec<Question>, DatasetError> {
    let path = path.as_ref();

    let raw = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let scenario: HelmScenario = serde_json::from_str(&raw)?;

    let questions = scenario
        .request_states
        .into_iter()
        .map(|state| {
            let correct_answers = state
                .instance
                .references
                .into_iter()
                .map(|reference| reference.output)
                .collect();
            Question::new(state.instance.input, correct_answers)
        })
        .collect();

    Ok(questions)
}
