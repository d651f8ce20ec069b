//! Predict command - one-shot estimate printed as JSON

use clap::Args;

use crate::api::types::PredictPriceResponse;
use crate::domain::{PredictionRequest, Purpose, DEFAULT_WEIGHT_KG};

/// Arguments for the predict command
#[derive(Args, Clone, Debug)]
pub struct PredictArgs {
    /// Memory in GB
    #[arg(long)]
    pub ram: u32,

    /// Processor choice, as listed by `options`
    #[arg(long)]
    pub cpu: String,

    /// Graphics choice, as listed by `options`
    #[arg(long)]
    pub gpu: String,

    /// Weight in kg
    #[arg(long, default_value_t = DEFAULT_WEIGHT_KG)]
    pub weight: f64,

    /// Display refresh rate in Hz
    #[arg(long)]
    pub refresh_rate: Option<u32>,

    /// Intended use: general, office, student, gaming or editing
    #[arg(long)]
    pub purpose: Option<Purpose>,
}

impl PredictArgs {
    pub fn to_request(&self) -> PredictionRequest {
        PredictionRequest {
            ram_gb: self.ram,
            weight_kg: self.weight,
            cpu: self.cpu.clone(),
            gpu: self.gpu.clone(),
            refresh_rate_hz: self.refresh_rate,
            purpose: self.purpose,
        }
    }
}

/// Run a single estimate
pub async fn run(args: PredictArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let service = crate::create_prediction_service(&config).await?;
    let prediction = service.predict(&args.to_request())?;

    let response = PredictPriceResponse::from_domain(prediction, &config.presentation);
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: PredictArgs,
    }

    #[test]
    fn test_parse_minimal_args() {
        let cli = TestCli::parse_from(["test", "--ram", "16", "--cpu", "Intel Core i5", "--gpu", "Nvidia"]);
        let request = cli.args.to_request();

        assert_eq!(request.ram_gb, 16);
        assert_eq!(request.weight_kg, DEFAULT_WEIGHT_KG);
        assert_eq!(request.purpose, None);
    }

    #[test]
    fn test_parse_full_args() {
        let cli = TestCli::parse_from([
            "test",
            "--ram",
            "32",
            "--cpu",
            "Intel Core i9",
            "--gpu",
            "Nvidia",
            "--weight",
            "2.4",
            "--refresh-rate",
            "165",
            "--purpose",
            "gaming",
        ]);
        let request = cli.args.to_request();

        assert_eq!(request.weight_kg, 2.4);
        assert_eq!(request.refresh_rate_hz, Some(165));
        assert_eq!(request.purpose, Some(Purpose::Gaming));
    }

    #[test]
    fn test_unknown_purpose_is_rejected() {
        let result = TestCli::try_parse_from([
            "test", "--ram", "8", "--cpu", "Intel Core i5", "--gpu", "Intel", "--purpose", "mining",
        ]);

        assert!(result.is_err());
    }
}
