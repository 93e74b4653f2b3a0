use anyhow::Context;
use imagenet_classifier::{config::get_configuration, Classifier, FunctionDescriptor};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let config = get_configuration().context("failed to load config")?;
    let log_level = &format!("{},ort=info", config.log_level.as_str());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().json().with_level(true))
        .init();

    let descriptor = FunctionDescriptor::from_config(&config);
    tracing::info!("Prepared deployment descriptor for {}", descriptor.tag);

    let classifier = Classifier::load(&config).context("failed to load classifier")?;

    let image_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "media/cat.jpg".to_string());
    let image =
        image::open(&image_path).with_context(|| format!("failed to open {}", image_path))?;

    let prediction = classifier.predict(&image)?;
    println!("{} {}", prediction.label, prediction.confidence);

    Ok(())
}
