use crate::infra::InMemoryPredictionRepository;
use cardiocore::config::AppConfig;
use cardiocore::error::AppError;
use cardiocore::prediction::{
    PredictionService, PythonModelClient, RawPredictionInput, RecommendationProfile,
};
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Owner used when recording the sample assessment
    #[arg(long, default_value = "demo-clinic")]
    pub(crate) owner: String,
    /// Skip the batch scoring portion of the demo
    #[arg(long)]
    pub(crate) skip_batch: bool,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;

    let oracle = Arc::new(PythonModelClient::from_config(&config.model));
    let repository = Arc::new(InMemoryPredictionRepository::default());
    let service = PredictionService::new(oracle, repository);

    println!("Heart-failure risk assessment demo");
    println!(
        "External model: {} {} (timeout {:?})",
        config.model.python_bin,
        config.model.script_path.display(),
        config.model.timeout
    );

    let high_risk = sample_high_risk();
    let assessment = match service
        .assess_and_record(&args.owner, Some("demo-patient".to_string()), high_risk)
        .await
    {
        Ok(assessment) => assessment,
        Err(err) => {
            println!("  Assessment unavailable: {err}");
            return Ok(());
        }
    };

    println!("\nSingle assessment (recorded under owner '{}')", args.owner);
    println!(
        "- probability {:.2} ({}%), level {}, method {}, confidence {:.2}",
        assessment.probability,
        assessment.percentage,
        assessment.risk_level.label(),
        assessment.method.label(),
        assessment.confidence
    );
    println!("  Recommendations:");
    for message in &assessment.recommendations {
        println!("    - {message}");
    }

    let stats = service.aggregate_stats(&args.owner)?;
    println!(
        "\nOwner stats: {} total, average probability {:.2}, {} high risk, {} critical",
        stats.total, stats.average_probability, stats.high_risk_count, stats.critical_risk_count
    );

    if args.skip_batch {
        return Ok(());
    }

    println!("\nBatch scoring demo");
    let batch = service
        .assess_batch(vec![sample_high_risk(), sample_low_risk()])
        .await?;
    println!(
        "- {} items: {} successful, {} failed",
        batch.summary.total, batch.summary.successful, batch.summary.failed
    );
    for item in &batch.results {
        match &item.assessment {
            Some(assessment) => println!(
                "  [{}] {} ({}%) via {}",
                item.index,
                assessment.risk_level.label(),
                assessment.percentage,
                assessment.method.label()
            ),
            None => println!(
                "  [{}] failed: {}",
                item.index,
                item.error.as_deref().unwrap_or("unknown error")
            ),
        }
    }

    match serde_json::to_string_pretty(service.model_info()) {
        Ok(json) => println!("\nModel descriptor:\n{json}"),
        Err(err) => println!("\nModel descriptor unavailable: {err}"),
    }

    // Exercised for completeness so the demo covers both profiles.
    let preview = cardiocore::prediction::recommend(
        0.6,
        &sample_low_risk(),
        RecommendationProfile::Patient,
    );
    println!("\nSample high-band patient guidance:");
    for message in preview {
        println!("  - {message}");
    }

    Ok(())
}

fn sample_high_risk() -> RawPredictionInput {
    RawPredictionInput {
        age: 70,
        sex: "male".to_string(),
        chest_pain_type: "typical angina".to_string(),
        resting_bp: 190,
        cholesterol: 320,
        fasting_bs: 1,
        resting_ecg: "left ventricular hypertrophy".to_string(),
        max_hr: 90,
        exercise_angina: true,
        oldpeak: 2.5,
        st_slope: "down".to_string(),
    }
}

fn sample_low_risk() -> RawPredictionInput {
    RawPredictionInput {
        age: 25,
        sex: "female".to_string(),
        chest_pain_type: "asymptomatic".to_string(),
        resting_bp: 110,
        cholesterol: 150,
        fasting_bs: 0,
        resting_ecg: "normal".to_string(),
        max_hr: 180,
        exercise_angina: false,
        oldpeak: 0.0,
        st_slope: "up".to_string(),
    }
}
