// ============================================================
// Layer 2 — Startup
// ============================================================
// Loads everything the session needs, once, in order:
//
//   Step 1: Generative model directory   (Layer 5 - ml)
//   Step 2: Extractive model directory   (Layer 5 - ml)
//   Step 3: Passage database CSV         (Layer 4 - data)
//
// Any failure here is fatal; the error names the file that
// could not be read.

use anyhow::{Context, Result};

use crate::application::{
    config::AppConfig,
    controller::QaController,
    extractive::BestSpanAnswerer,
};
use crate::data::csv_loader::CsvPassageLoader;
use crate::domain::{database::Database, traits::PassageSource};
use crate::infra::checkpoint::ModelDir;
use crate::ml::{self, Backend, Extractor, Generator, InferBackend};

/// The controller wired to the burn-backed models.
pub type AppController<B = InferBackend> =
    QaController<Generator<B>, BestSpanAnswerer<Extractor<B>>>;

/// Load both models on the default inference device.
pub fn load_default_controller(cfg: &AppConfig) -> Result<AppController> {
    load_controller::<InferBackend>(cfg, ml::inference_device())
}

pub fn load_controller<B: Backend>(cfg: &AppConfig, device: B::Device) -> Result<AppController<B>> {
    tracing::info!("Loading generative model from '{}'", cfg.flan_model_dir.display());
    let generator = ml::load_generator::<B>(&ModelDir::new(&cfg.flan_model_dir), device.clone())
        .context("Failed to load the generative model")?;

    tracing::info!("Loading extractive model from '{}'", cfg.bert_model_dir.display());
    let extractor = ml::load_extractor::<B>(&ModelDir::new(&cfg.bert_model_dir), device)
        .context("Failed to load the extractive model")?;

    let database = Database::new(CsvPassageLoader::new(&cfg.database).load_all()?);
    if database.is_empty() {
        tracing::warn!("Passage database is empty; extractive answers will be blank");
    }

    Ok(QaController::new(
        generator,
        BestSpanAnswerer::new(extractor),
        database,
        cfg.mode,
    ))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::controller::Submission;
    use crate::domain::answer::ModelMode;
    use crate::ml::{extractor, generator};
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn fixture_config(root: &std::path::Path) -> AppConfig {
        let flan = root.join("checkpoint");
        let bert = root.join("bert");
        let csv  = root.join("database_small.csv");

        generator::tests::write_model_dir(&flan);
        extractor::tests::write_model_dir(&bert);
        std::fs::write(
            &csv,
            "id,context\n1,covid is caused by a coronavirus\n2,the coronavirus called sars cov 2\n",
        ).unwrap();

        AppConfig {
            flan_model_dir: flan,
            bert_model_dir: bert,
            database:       csv,
            mode:           ModelMode::Generative,
        }
    }

    #[test]
    fn test_loads_both_models_and_database() {
        let root = tempfile::tempdir().unwrap();
        let cfg  = fixture_config(root.path());

        let mut c = load_controller::<TestBackend>(&cfg, Default::default()).unwrap();
        assert_eq!(c.database().len(), 2);
        assert_eq!(c.mode(), ModelMode::Generative);

        let Submission::Answered(generated) = c.submit("what is covid").unwrap() else {
            panic!("generative question was rejected");
        };
        assert!(generated.starts_with("Question: what is covid\nAnswer from our model:"));

        c.set_mode(ModelMode::Extractive);
        let Submission::Answered(extracted) = c.submit("what causes covid").unwrap() else {
            panic!("extractive question was rejected");
        };
        let answer = extracted
            .strip_prefix("Question: what causes covid\nAnswer from our model: ")
            .unwrap();
        assert!(c.database().passages().iter().any(|p| p.contains(answer)));
    }

    #[test]
    fn test_missing_model_dir_fails_with_context() {
        let root = tempfile::tempdir().unwrap();
        let mut cfg = fixture_config(root.path());
        cfg.bert_model_dir = root.path().join("missing");

        let err = load_controller::<TestBackend>(&cfg, Default::default())
            .err()
            .unwrap();
        assert!(err.to_string().contains("extractive model"));
    }
}
