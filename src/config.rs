use crate::registry::{AccessLevel, Dependency};
use serde::Deserialize;
use std::path::PathBuf;

pub trait Validatable {
    fn validate(&self) -> Result<(), String>;
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub model: ModelConfig,
    pub labels: LabelsConfig,
    pub function: FunctionConfig,
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
}

impl Validatable for Config {
    fn validate(&self) -> Result<(), String> {
        self.model.validate()?;
        self.labels.validate()
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.try_into().map_err(serde::de::Error::custom)
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    pub model_dir: PathBuf,
    pub onnx_file: String,
    #[serde(default = "default_model_instances")]
    pub num_instances: usize,
    pub resize_target: u32,
    #[serde(default = "default_crop_size")]
    pub crop_size: u32,
    #[serde(default = "default_mean")]
    pub mean: [f32; 3],
    #[serde(default = "default_std")]
    pub std: [f32; 3],
}

fn default_model_instances() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(5)
}

fn default_crop_size() -> u32 {
    224
}

// ImageNet statistics, shared by every supported model variant.
fn default_mean() -> [f32; 3] {
    [0.485, 0.456, 0.406]
}

fn default_std() -> [f32; 3] {
    [0.229, 0.224, 0.225]
}

impl ModelConfig {
    pub fn get_path(&self) -> PathBuf {
        self.model_dir.join(&self.onnx_file)
    }
}

impl Validatable for ModelConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.get_path().exists() {
            return Err(format!("Model file not found: {:?}", self.get_path()));
        }
        if self.crop_size > self.resize_target {
            return Err(format!(
                "Crop size {} exceeds resize target {}",
                self.crop_size, self.resize_target
            ));
        }
        for (i, &s) in self.std.iter().enumerate() {
            if s <= 0.0 {
                return Err(format!(
                    "Standard deviation for channel {} must be greater than 0, got {}",
                    i, s
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LabelsConfig {
    pub labels_dir: PathBuf,
    pub labels_file: String,
}

impl LabelsConfig {
    pub fn get_path(&self) -> PathBuf {
        self.labels_dir.join(&self.labels_file)
    }
}

impl Validatable for LabelsConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.get_path().exists() {
            return Err(format!("Labels file not found: {:?}", self.get_path()));
        }
        Ok(())
    }
}

/// Descriptor fields handed to the external deployment service, carried in
/// the per-variant configuration file.
#[derive(Debug, Deserialize, Clone)]
pub struct FunctionConfig {
    pub tag: String,
    pub description: String,
    #[serde(default)]
    pub access: AccessLevel,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    #[serde(default)]
    pub targets: Vec<String>,
}

pub fn get_configuration() -> Result<Config, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");

    let variant: Variant = std::env::var("APP_VARIANT")
        .unwrap_or_else(|_| "mobilenet_v2".into())
        .try_into()
        .expect("Failed to parse APP_VARIANT.");
    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.yaml"),
        ))
        .add_source(config::File::from(
            configuration_directory.join(format!("{}.yaml", variant.as_str())),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let settings = settings.try_deserialize::<Config>()?;
    if let Err(e) = settings.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        return Err(config::ConfigError::Message(e));
    }

    Ok(settings)
}

pub enum Variant {
    InceptionV3,
    MaxvitTiny,
    MobilenetV2,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::InceptionV3 => "inception_v3",
            Variant::MaxvitTiny => "maxvit_tiny",
            Variant::MobilenetV2 => "mobilenet_v2",
        }
    }
}

impl TryFrom<String> for Variant {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "inception_v3" => Ok(Self::InceptionV3),
            "maxvit_tiny" => Ok(Self::MaxvitTiny),
            "mobilenet_v2" => Ok(Self::MobilenetV2),
            other => Err(format!(
                "{} is not a supported model variant. Use `inception_v3`, `maxvit_tiny` or `mobilenet_v2`.",
                other
            )),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub enum LogLevel {
    Debug,
    Info,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            other => Err(format!(
                "{} is not a supported minimum log level. Use either `debug` or `info`.",
                other
            )),
        }
    }
}
