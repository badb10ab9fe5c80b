//! End-to-end booster tests against scripted collaborators.
//!
//! The mock generator answers with the retrieved snippet verbatim, so every
//! answer is scripted through the retriever: `good.example` sources carry
//! correct snippets, `bad.example` sources carry wrong ones.

use ragboost::{
    score, MockGenerator, MockRetriever, Question, RagBooster, RetrievalAugmentedModel,
    RetrievedResult, TrainingConfig,
};

fn question(text: &str, answer: &str) -> Question {
    Question::new(text, vec![answer.to_string()])
}

/// Two validation questions, three retrieved results each: two wrong answers
/// from `bad.example` ranked ahead of one correct answer from `good.example`.
fn scripted_retriever() -> MockRetriever {
    MockRetriever::new()
        .script(
            "The capital of France is",
            vec![
                RetrievedResult::new("Lyon", "https://bad.example/1"),
                RetrievedResult::new("Lyon", "https://bad.example/2"),
                RetrievedResult::new("Paris", "https://good.example/1"),
            ],
        )
        .script(
            "The capital of Germany is",
            vec![
                RetrievedResult::new("Bonn", "https://bad.example/3"),
                RetrievedResult::new("Bonn", "https://bad.example/4"),
                RetrievedResult::new("Berlin", "https://good.example/2"),
            ],
        )
}

fn validation_questions() -> Vec<Question> {
    vec![
        question("The capital of France is", "Paris"),
        question("The capital of Germany is", "Berlin"),
    ]
}

fn training_config() -> TrainingConfig {
    TrainingConfig {
        n_jobs: 1,
        ..TrainingConfig::with_k(3)
    }
}

#[tokio::test]
async fn fit_separates_good_and_bad_domains() {
    let model = RetrievalAugmentedModel::new(scripted_retriever(), MockGenerator::new(), 3);
    let booster = RagBooster::fit(model, &validation_questions(), &training_config())
        .await
        .expect("fitting succeeds");

    let good = booster
        .importance("https://good.example/anything")
        .expect("good.example was seen during training");
    let bad = booster
        .importance("https://bad.example/anything")
        .expect("bad.example was seen during training");

    assert!(
        good > bad,
        "correct-answer domain ({good}) should outweigh the wrong-answer domain ({bad})"
    );

    // The tuned threshold excludes the bad domain but keeps the good one.
    assert!(bad < booster.best_threshold());
    assert!(good >= booster.best_threshold());

    // Unpruned, the wrong answers outvote the correct one; the best tested
    // cut point fixes both questions.
    let achieved = &booster.tuning_result().achieved_utilities;
    assert_eq!(achieved[0], 0.0);
    assert_eq!(booster.best_utility(), 1.0);
}

#[tokio::test]
async fn boosting_flips_wrong_majorities() {
    let questions = validation_questions();

    let plain = RetrievalAugmentedModel::new(scripted_retriever(), MockGenerator::new(), 3);
    let plain_accuracy = score(&questions, &plain).await.unwrap();
    assert_eq!(plain_accuracy, 0.0);

    let booster = RagBooster::fit(plain, &questions, &training_config())
        .await
        .unwrap();

    assert_eq!(
        booster.generate(&questions[0]).await.unwrap(),
        "Paris",
        "pruning bad.example should leave the correct answer"
    );

    let boosted_accuracy = score(&questions, &booster).await.unwrap();
    assert_eq!(boosted_accuracy, 1.0);
}

#[tokio::test]
async fn gate_skips_generator_calls_for_pruned_sources() {
    let generator = MockGenerator::new();
    let model = RetrievalAugmentedModel::new(scripted_retriever(), generator.clone(), 3);

    let questions = validation_questions();
    let booster = RagBooster::fit(model, &questions, &training_config())
        .await
        .unwrap();

    // Fitting answers every retrieved result exactly once.
    let calls_after_fit = generator.call_count();
    assert_eq!(calls_after_fit, 6);

    let answer = booster.generate(&questions[0]).await.unwrap();
    assert_eq!(answer, "Paris");

    // Only the surviving good.example result reached the generator.
    assert_eq!(generator.call_count(), calls_after_fit + 1);
}

#[tokio::test]
async fn gate_stops_invoking_after_k_accepted_predictions() {
    let retriever = scripted_retriever().script(
        "The capital of Italy is",
        vec![
            RetrievedResult::new("Rome", "https://good.example/10"),
            RetrievedResult::new("Rome", "https://good.example/11"),
            RetrievedResult::new("Rome", "https://good.example/12"),
            RetrievedResult::new("Milan", "https://good.example/13"),
            RetrievedResult::new("Milan", "https://good.example/14"),
        ],
    );

    let generator = MockGenerator::new();
    let model = RetrievalAugmentedModel::new(retriever, generator.clone(), 3);
    let booster = RagBooster::fit(model, &validation_questions(), &training_config())
        .await
        .unwrap();

    let calls_before = generator.call_count();
    let answer = booster
        .generate(&question("The capital of Italy is", "Rome"))
        .await
        .unwrap();

    // Five results are scanned, but after three accepted predictions the
    // remaining two never reach the generator.
    assert_eq!(answer, "Rome");
    assert_eq!(generator.call_count(), calls_before + 3);
}

#[tokio::test]
async fn unseen_groups_pass_the_gate() {
    let retriever = scripted_retriever().script(
        "The capital of Spain is",
        vec![RetrievedResult::new(
            "Madrid",
            "https://unheard.example/page",
        )],
    );

    let model = RetrievalAugmentedModel::new(retriever, MockGenerator::new(), 3);
    let booster = RagBooster::fit(model, &validation_questions(), &training_config())
        .await
        .unwrap();

    // unheard.example was never seen during training: no learned weight,
    // never pruned, regardless of the tuned threshold.
    assert_eq!(booster.importance("https://unheard.example/page"), None);

    let answer = booster
        .generate(&question("The capital of Spain is", "Madrid"))
        .await
        .unwrap();
    assert_eq!(answer, "Madrid");
}

#[tokio::test]
async fn zero_retrievals_degrade_to_the_empty_string() {
    let model = RetrievalAugmentedModel::new(scripted_retriever(), MockGenerator::new(), 3);
    let booster = RagBooster::fit(model, &validation_questions(), &training_config())
        .await
        .unwrap();

    let answer = booster
        .generate(&question("An unscripted question", "whatever"))
        .await
        .unwrap();
    assert_eq!(answer, "");
}

#[tokio::test]
async fn importance_is_idempotent_and_does_not_retrain() {
    let generator = MockGenerator::new();
    let model = RetrievalAugmentedModel::new(scripted_retriever(), generator.clone(), 3);
    let booster = RagBooster::fit(model, &validation_questions(), &training_config())
        .await
        .unwrap();

    let calls_after_fit = generator.call_count();

    let first = booster.importance("https://good.example/1");
    let second = booster.importance("https://good.example/1");

    assert_eq!(first, second);
    assert!(first.is_some());
    assert_eq!(
        generator.call_count(),
        calls_after_fit,
        "importance lookups must not invoke collaborators"
    );
}

#[tokio::test]
async fn fitting_an_empty_validation_set_fails_fast() {
    let model = RetrievalAugmentedModel::new(scripted_retriever(), MockGenerator::new(), 3);
    let result = RagBooster::fit(model, &[], &training_config()).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn invalid_training_config_fails_fast() {
    let model = RetrievalAugmentedModel::new(scripted_retriever(), MockGenerator::new(), 3);
    let config = TrainingConfig {
        learning_rate: 0.0,
        ..training_config()
    };

    let result = RagBooster::fit(model, &validation_questions(), &config).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn plain_model_votes_over_the_first_k_results() {
    let model = RetrievalAugmentedModel::new(scripted_retriever(), MockGenerator::new(), 3);

    // Two wrong answers outvote the correct one.
    let answer = model
        .generate(&question("The capital of France is", "Paris"))
        .await
        .unwrap();
    assert_eq!(answer, "Lyon");

    // k = 1 keeps only the top-ranked result.
    let top_one = RetrievalAugmentedModel::new(scripted_retriever(), MockGenerator::new(), 1);
    let answer = top_one
        .generate(&question("The capital of France is", "Paris"))
        .await
        .unwrap();
    assert_eq!(answer, "Lyon");
}
